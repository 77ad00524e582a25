// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    chain::ChainContext,
    context::new_block_context,
    env::BlockContext,
    transfer::{TransferPolicy, Whitelist},
};
use jeth_chain_config::{
    ChainConfig, ConfigCompatError, ModuleRegistry, Result, Rules,
};
use jeth_primitives::BlockHeader;
use jeth_types::{Address, BlockNumber};
use std::sync::Arc;

/// A validated fork schedule together with the modules and transfer policy
/// blocks are executed with.
pub struct Machine {
    config: Arc<ChainConfig>,
    registry: Arc<ModuleRegistry>,
    transfer: Arc<TransferPolicy>,
}

impl Machine {
    /// Fails when the schedule is out of order or its precompile upgrades
    /// do not match `registry`.
    pub fn new(
        config: Arc<ChainConfig>, registry: Arc<ModuleRegistry>,
    ) -> Result<Machine> {
        config.check_config_fork_order()?;
        config.verify(&registry)?;
        info!("Initialised chain configuration:\n{}", config.description());
        Ok(Machine {
            config,
            registry,
            transfer: Arc::new(TransferPolicy::default()),
        })
    }

    pub fn with_whitelist(mut self, whitelist: Whitelist) -> Self {
        self.transfer = Arc::new(TransferPolicy::new(whitelist));
        self
    }

    pub fn config(&self) -> &Arc<ChainConfig> { &self.config }

    pub fn registry(&self) -> &Arc<ModuleRegistry> { &self.registry }

    pub fn transfer_policy(&self) -> &Arc<TransferPolicy> { &self.transfer }

    pub fn rules(&self, number: BlockNumber, timestamp: u64) -> Rules {
        self.config.rules(number, timestamp, &self.registry)
    }

    pub fn rules_for_header(&self, header: &BlockHeader) -> Rules {
        self.rules(header.number(), header.timestamp())
    }

    pub fn block_context<'a>(
        &self, header: &BlockHeader, chain: &'a dyn ChainContext,
        author: Option<Address>,
    ) -> BlockContext<'a> {
        new_block_context(header, chain, author, self.transfer.clone())
    }

    /// Whether `new` may replace the schedule of this machine with the chain
    /// at (`height`, `time`).
    pub fn check_compatible(
        &self, new: &ChainConfig, height: BlockNumber, time: u64,
    ) -> std::result::Result<(), ConfigCompatError> {
        self.config.check_compatible(new, height, time)
    }
}
