// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Stateful precompile modules and their activation schedule.

mod config;
mod module;
mod upgrade;

pub use self::{
    config::{Accepter, PrecompileConfig, Predicater},
    module::{Module, ModuleCapabilities, ModuleRegistry},
    upgrade::{PrecompileUpgrade, UpgradeConfig},
};

use jeth_types::Address;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PrecompileError {
    #[error("unknown precompile config key: {0}")]
    UnknownKey(String),

    #[error("config block timestamp cannot be nil for {0}")]
    MissingTimestamp(String),

    #[error("config block timestamp ({timestamp}) < previous timestamp ({previous}) for {key}")]
    TimestampDecreased {
        key: String,
        timestamp: u64,
        previous: u64,
    },

    #[error("config block timestamp ({timestamp}) <= previous timestamp ({previous}) of same key {key}")]
    TimestampNotIncreasing {
        key: String,
        timestamp: u64,
        previous: u64,
    },

    #[error("disable should be false for the first upgrade of {0}")]
    FirstUpgradeDisables(String),

    #[error("{key} cannot be {} twice", toggle_name(.disable))]
    RepeatedToggle { key: String, disable: bool },

    #[error("precompile module already registered at {0:?}")]
    DuplicateAddress(Address),

    #[error("precompile module already registered with key {0}")]
    DuplicateKey(String),

    #[error("invalid precompile upgrade entry: {0}")]
    InvalidUpgrade(String),

    #[error("predicate rejected: {0}")]
    Predicate(String),

    #[error("log rejected: {0}")]
    Accept(String),
}

fn toggle_name(disable: &bool) -> &'static str {
    if *disable {
        "disabled"
    } else {
        "enabled"
    }
}
