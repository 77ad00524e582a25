// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::PrecompileError;
use jeth_types::{Address, H256};
use serde_json::{Map, Value};
use std::fmt::Debug;

/// One scheduled change of a precompile module.
#[derive(Clone, Debug, PartialEq)]
pub struct PrecompileConfig {
    /// Config key of the module this change applies to.
    pub key: String,
    pub block_timestamp: Option<u64>,
    /// Whether this change turns the module off.
    pub disable: bool,
    /// Module specific parameters.
    pub params: Map<String, Value>,
}

impl PrecompileConfig {
    pub fn new(key: &str, block_timestamp: u64) -> Self {
        PrecompileConfig {
            key: key.into(),
            block_timestamp: Some(block_timestamp),
            disable: false,
            params: Map::new(),
        }
    }

    pub fn disabled(key: &str, block_timestamp: u64) -> Self {
        PrecompileConfig {
            disable: true,
            ..Self::new(key, block_timestamp)
        }
    }

    pub fn with_param(mut self, name: &str, value: Value) -> Self {
        self.params.insert(name.into(), value);
        self
    }

    pub fn is_disabled(&self) -> bool { self.disable }
}

/// A module that verifies predicates attached to transactions before they
/// execute.
pub trait Predicater: Send + Sync + Debug {
    fn predicate_gas(&self, predicate: &[u8]) -> Result<u64, PrecompileError>;

    fn verify_predicate(&self, predicate: &[u8]) -> Result<(), PrecompileError>;
}

/// A module notified of its logs once the block holding them is accepted.
pub trait Accepter: Send + Sync + Debug {
    fn accept(
        &self, tx_hash: &H256, log_index: usize, address: &Address,
        topics: &[H256], data: &[u8],
    ) -> Result<(), PrecompileError>;
}
