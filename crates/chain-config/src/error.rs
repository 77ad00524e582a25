// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{fork::ForkTrigger, precompile::PrecompileError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{name} enabled at block {block}: forking by height is only supported at the genesis block")]
    NonGenesisForkByHeight { name: &'static str, block: u64 },

    #[error("unsupported fork ordering: {previous} not enabled, but {current} enabled at {trigger}")]
    MissingFork {
        previous: &'static str,
        current: &'static str,
        trigger: ForkTrigger,
    },

    #[error("unsupported fork ordering: {previous} enabled at {previous_trigger}, but {current} enabled at {current_trigger}")]
    OutOfOrder {
        previous: &'static str,
        previous_trigger: ForkTrigger,
        current: &'static str,
        current_trigger: ForkTrigger,
    },

    #[error("unsupported fork ordering: {previous} used timestamp ordering, but {current} reverted to block ordering")]
    OrderingReverted {
        previous: &'static str,
        current: &'static str,
    },

    #[error("invalid precompile upgrades: {0}")]
    Precompile(#[from] PrecompileError),

    #[error("config of {len} bytes exceeds the {max} bytes limit")]
    TooLarge { len: usize, max: usize },

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
