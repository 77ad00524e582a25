// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    chain_config::ChainConfig,
    precompile::{Accepter, ModuleRegistry, PrecompileConfig, Predicater},
};
use jeth_types::{Address, BlockNumber, U256};
use std::{collections::BTreeMap, sync::Arc};

/// Network upgrade flags of [`Rules`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AvalancheRules {
    pub is_apricot_phase_1: bool,
    pub is_apricot_phase_2: bool,
    pub is_apricot_phase_3: bool,
    pub is_apricot_phase_4: bool,
    pub is_apricot_phase_5: bool,
    pub is_apricot_phase_pre_6: bool,
    pub is_apricot_phase_6: bool,
    pub is_apricot_phase_post_6: bool,
    pub is_banff: bool,
    pub is_cortina: bool,
    pub is_durango: bool,
    pub is_fee_update_1: bool,
}

/// Snapshot of every activation predicate for one block.
///
/// Built once per block and never mutated; it must not be reused across a
/// fork boundary.
#[derive(Clone, Debug)]
pub struct Rules {
    pub chain_id: U256,
    pub is_homestead: bool,
    pub is_eip150: bool,
    pub is_eip155: bool,
    pub is_eip158: bool,
    pub is_byzantium: bool,
    pub is_constantinople: bool,
    pub is_petersburg: bool,
    pub is_istanbul: bool,
    pub is_cancun: bool,

    pub avalanche: AvalancheRules,

    /// Stateful precompiles enabled for this block, by address.
    pub active_precompiles: BTreeMap<Address, PrecompileConfig>,
    /// Enabled modules that verify transaction predicates.
    pub predicaters: BTreeMap<Address, Arc<dyn Predicater>>,
    /// Enabled modules notified of their logs on accept.
    pub accepters: BTreeMap<Address, Arc<dyn Accepter>>,
}

impl PartialEq for Rules {
    fn eq(&self, o: &Rules) -> bool {
        self.chain_id == o.chain_id
            && self.is_homestead == o.is_homestead
            && self.is_eip150 == o.is_eip150
            && self.is_eip155 == o.is_eip155
            && self.is_eip158 == o.is_eip158
            && self.is_byzantium == o.is_byzantium
            && self.is_constantinople == o.is_constantinople
            && self.is_petersburg == o.is_petersburg
            && self.is_istanbul == o.is_istanbul
            && self.is_cancun == o.is_cancun
            && self.avalanche == o.avalanche
            && self.active_precompiles == o.active_precompiles
            && self.predicaters.keys().eq(o.predicaters.keys())
            && self.accepters.keys().eq(o.accepters.keys())
    }
}

impl Rules {
    pub fn is_precompile_enabled(&self, address: &Address) -> bool {
        self.active_precompiles.contains_key(address)
    }

    pub fn predicaters_exist(&self) -> bool { !self.predicaters.is_empty() }

    pub fn predicater_exists(&self, address: &Address) -> bool {
        self.predicaters.contains_key(address)
    }
}

impl ChainConfig {
    pub fn avalanche_rules(&self, timestamp: u64) -> AvalancheRules {
        AvalancheRules {
            is_apricot_phase_1: self.is_apricot_phase_1(timestamp),
            is_apricot_phase_2: self.is_apricot_phase_2(timestamp),
            is_apricot_phase_3: self.is_apricot_phase_3(timestamp),
            is_apricot_phase_4: self.is_apricot_phase_4(timestamp),
            is_apricot_phase_5: self.is_apricot_phase_5(timestamp),
            is_apricot_phase_pre_6: self.is_apricot_phase_pre_6(timestamp),
            is_apricot_phase_6: self.is_apricot_phase_6(timestamp),
            is_apricot_phase_post_6: self.is_apricot_phase_post_6(timestamp),
            is_banff: self.is_banff(timestamp),
            is_cortina: self.is_cortina(timestamp),
            is_durango: self.is_durango(timestamp),
            is_fee_update_1: self.is_fee_update_1(timestamp),
        }
    }

    /// The rules in force for the block at (`number`, `timestamp`), with the
    /// modules of `registry` enabled at `timestamp`.
    pub fn rules(
        &self, number: BlockNumber, timestamp: u64, registry: &ModuleRegistry,
    ) -> Rules {
        let mut rules = Rules {
            chain_id: self.chain_id,
            is_homestead: self.is_homestead(number),
            is_eip150: self.is_eip150(number),
            is_eip155: self.is_eip155(number),
            is_eip158: self.is_eip158(number),
            is_byzantium: self.is_byzantium(number),
            is_constantinople: self.is_constantinople(number),
            is_petersburg: self.is_petersburg(number),
            is_istanbul: self.is_istanbul(number),
            is_cancun: self.is_cancun(timestamp),
            avalanche: self.avalanche_rules(timestamp),
            active_precompiles: BTreeMap::new(),
            predicaters: BTreeMap::new(),
            accepters: BTreeMap::new(),
        };

        for module in registry.modules() {
            let config = match self.active_precompile_config(
                &module.address,
                timestamp,
                registry,
            ) {
                Some(config) if !config.is_disabled() => config,
                _ => continue,
            };
            rules.active_precompiles.insert(module.address, config.clone());
            if let Some(predicater) = &module.capabilities.predicater {
                rules.predicaters.insert(module.address, predicater.clone());
            }
            if let Some(accepter) = &module.capabilities.accepter {
                rules.accepters.insert(module.address, accepter.clone());
            }
        }
        trace!(
            "rules at ({}, {}): {} active precompiles",
            number,
            timestamp,
            rules.active_precompiles.len()
        );

        rules
    }
}
