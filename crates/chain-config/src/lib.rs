// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Fork schedule of the chain and everything derived from it.
//!
//! A [`ChainConfig`] lists when each protocol upgrade activates. From it this
//! crate answers which rules hold for a block ([`Rules`]), whether the
//! schedule is well formed ([`ChainConfig::check_config_fork_order`]) and
//! whether a new schedule can replace a stored one
//! ([`ChainConfig::check_compatible`]).

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

mod chain_config;
mod compat;
mod error;
mod fee;
pub mod fork;
mod fork_order;
pub mod precompile;
mod rules;

pub use crate::{
    chain_config::{ChainConfig, NetworkUpgrades, MAX_JSON_LEN},
    compat::ConfigCompatError,
    error::{ConfigError, Result},
    fee::{is_primary_asset_id, ChainFeeConfig},
    fork::{is_block_forked, is_timestamp_forked, AvalancheFork},
    precompile::{
        Accepter, Module, ModuleCapabilities, ModuleRegistry,
        PrecompileConfig, PrecompileError, PrecompileUpgrade, Predicater,
        UpgradeConfig,
    },
    rules::{AvalancheRules, Rules},
};
