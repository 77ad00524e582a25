// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    error::{ConfigError, Result},
    fork::{is_block_forked, is_timestamp_forked, AvalancheFork},
    precompile::UpgradeConfig,
};
use jeth_types::{BlockNumber, U256};
use serde_derive::{Deserialize, Serialize};

/// Upper bound on the size of a JSON encoded schedule or upgrade config.
pub const MAX_JSON_LEN: usize = 64 * 1024 * 1024;

/// The fork schedule of a chain.
///
/// Ethereum forks are scheduled by block number and may only activate at
/// genesis. Network upgrades are scheduled by block timestamp. `None` means
/// the fork never activates.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainConfig {
    /// Identifies the chain and is used for replay protection.
    #[serde(with = "chain_id_serde")]
    pub chain_id: U256,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub homestead_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dao_fork_block: Option<BlockNumber>,
    /// Whether the node supports or opposes the DAO hard fork.
    #[serde(default, skip_serializing_if = "is_false")]
    pub dao_fork_support: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip150_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip155_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub eip158_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub byzantium_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub constantinople_block: Option<BlockNumber>,
    /// `None` means the same as Constantinople.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub petersburg_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub istanbul_block: Option<BlockNumber>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub muir_glacier_block: Option<BlockNumber>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_1_block_timestamp: Option<u64>,
    /// Includes a modified version of the Berlin hard fork.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_2_block_timestamp: Option<u64>,
    /// Introduces dynamic fees and a modified version of London.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_3_block_timestamp: Option<u64>,
    /// Adds the block fee to the dynamic fee algorithm.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_4_block_timestamp: Option<u64>,
    /// Batches atomic transactions under an atomic gas limit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_5_block_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_pre_6_block_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_6_block_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apricot_phase_post_6_block_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub banff_block_timestamp: Option<u64>,
    /// Raises the block gas limit to 15M.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cortina_block_timestamp: Option<u64>,
    /// Shanghai execution upgrade and warp messaging.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub durango_block_timestamp: Option<u64>,
    /// Switches the minimum base fee to its latest value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fee_update_1_block_timestamp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cancun_time: Option<u64>,

    /// Precompile upgrades, supplied apart from the persisted schedule.
    #[serde(skip)]
    pub upgrade: UpgradeConfig,
}

fn is_false(value: &bool) -> bool { !*value }

/// Activation times of the network upgrades on one network.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkUpgrades {
    pub apricot_phase_1_time: Option<u64>,
    pub apricot_phase_2_time: Option<u64>,
    pub apricot_phase_3_time: Option<u64>,
    pub apricot_phase_4_time: Option<u64>,
    pub apricot_phase_5_time: Option<u64>,
    pub apricot_phase_pre_6_time: Option<u64>,
    pub apricot_phase_6_time: Option<u64>,
    pub apricot_phase_post_6_time: Option<u64>,
    pub banff_time: Option<u64>,
    pub cortina_time: Option<u64>,
    pub durango_time: Option<u64>,
    pub fee_update_1_time: Option<u64>,
}

impl NetworkUpgrades {
    pub fn time(&self, fork: AvalancheFork) -> Option<u64> {
        match fork {
            AvalancheFork::ApricotPhase1 => self.apricot_phase_1_time,
            AvalancheFork::ApricotPhase2 => self.apricot_phase_2_time,
            AvalancheFork::ApricotPhase3 => self.apricot_phase_3_time,
            AvalancheFork::ApricotPhase4 => self.apricot_phase_4_time,
            AvalancheFork::ApricotPhase5 => self.apricot_phase_5_time,
            AvalancheFork::ApricotPhasePre6 => self.apricot_phase_pre_6_time,
            AvalancheFork::ApricotPhase6 => self.apricot_phase_6_time,
            AvalancheFork::ApricotPhasePost6 => self.apricot_phase_post_6_time,
            AvalancheFork::Banff => self.banff_time,
            AvalancheFork::Cortina => self.cortina_time,
            AvalancheFork::Durango => self.durango_time,
            AvalancheFork::FeeUpdate1 => self.fee_update_1_time,
        }
    }
}

impl ChainConfig {
    /// Schedule of a production chain: every Ethereum fork at genesis, the
    /// network upgrades at the times of `upgrades`.
    pub fn from_network_upgrades(
        chain_id: u64, upgrades: &NetworkUpgrades,
    ) -> Self {
        let mut config = ChainConfig {
            chain_id: chain_id.into(),
            dao_fork_block: Some(0),
            dao_fork_support: true,
            muir_glacier_block: Some(0),
            ..Self::genesis_forks()
        };
        for fork in AvalancheFork::ALL {
            config.set_avalanche_fork_time(fork, upgrades.time(fork));
        }
        config
    }

    /// Ethereum forks active at genesis, no network upgrade scheduled.
    fn genesis_forks() -> Self {
        ChainConfig {
            chain_id: U256::one(),
            homestead_block: Some(0),
            eip150_block: Some(0),
            eip155_block: Some(0),
            eip158_block: Some(0),
            byzantium_block: Some(0),
            constantinople_block: Some(0),
            petersburg_block: Some(0),
            istanbul_block: Some(0),
            muir_glacier_block: Some(0),
            ..Default::default()
        }
    }

    /// Every fork active at genesis.
    #[cfg(any(test, feature = "testonly_code"))]
    pub fn test_config() -> Self {
        Self::test_config_up_to(AvalancheFork::FeeUpdate1)
    }

    /// Ethereum forks at genesis, no network upgrade.
    #[cfg(any(test, feature = "testonly_code"))]
    pub fn test_launch_config() -> Self { Self::genesis_forks() }

    /// Network upgrades up to and including `last` active at genesis.
    #[cfg(any(test, feature = "testonly_code"))]
    pub fn test_config_up_to(last: AvalancheFork) -> Self {
        let mut config = Self::genesis_forks();
        for fork in AvalancheFork::ALL.iter().filter(|fork| **fork <= last) {
            config.set_avalanche_fork_time(*fork, Some(0));
        }
        config
    }

    pub fn avalanche_fork_time(&self, fork: AvalancheFork) -> Option<u64> {
        match fork {
            AvalancheFork::ApricotPhase1 => self.apricot_phase_1_block_timestamp,
            AvalancheFork::ApricotPhase2 => self.apricot_phase_2_block_timestamp,
            AvalancheFork::ApricotPhase3 => self.apricot_phase_3_block_timestamp,
            AvalancheFork::ApricotPhase4 => self.apricot_phase_4_block_timestamp,
            AvalancheFork::ApricotPhase5 => self.apricot_phase_5_block_timestamp,
            AvalancheFork::ApricotPhasePre6 => {
                self.apricot_phase_pre_6_block_timestamp
            }
            AvalancheFork::ApricotPhase6 => self.apricot_phase_6_block_timestamp,
            AvalancheFork::ApricotPhasePost6 => {
                self.apricot_phase_post_6_block_timestamp
            }
            AvalancheFork::Banff => self.banff_block_timestamp,
            AvalancheFork::Cortina => self.cortina_block_timestamp,
            AvalancheFork::Durango => self.durango_block_timestamp,
            AvalancheFork::FeeUpdate1 => self.fee_update_1_block_timestamp,
        }
    }

    pub fn set_avalanche_fork_time(
        &mut self, fork: AvalancheFork, time: Option<u64>,
    ) {
        let slot = match fork {
            AvalancheFork::ApricotPhase1 => {
                &mut self.apricot_phase_1_block_timestamp
            }
            AvalancheFork::ApricotPhase2 => {
                &mut self.apricot_phase_2_block_timestamp
            }
            AvalancheFork::ApricotPhase3 => {
                &mut self.apricot_phase_3_block_timestamp
            }
            AvalancheFork::ApricotPhase4 => {
                &mut self.apricot_phase_4_block_timestamp
            }
            AvalancheFork::ApricotPhase5 => {
                &mut self.apricot_phase_5_block_timestamp
            }
            AvalancheFork::ApricotPhasePre6 => {
                &mut self.apricot_phase_pre_6_block_timestamp
            }
            AvalancheFork::ApricotPhase6 => {
                &mut self.apricot_phase_6_block_timestamp
            }
            AvalancheFork::ApricotPhasePost6 => {
                &mut self.apricot_phase_post_6_block_timestamp
            }
            AvalancheFork::Banff => &mut self.banff_block_timestamp,
            AvalancheFork::Cortina => &mut self.cortina_block_timestamp,
            AvalancheFork::Durango => &mut self.durango_block_timestamp,
            AvalancheFork::FeeUpdate1 => {
                &mut self.fee_update_1_block_timestamp
            }
        };
        *slot = time;
    }

    /// Load a persisted schedule. Upgrade config is not part of it.
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        check_json_len(bytes)?;
        Ok(serde_json::from_slice(bytes)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Attach the upgrade config carried by `upgrade_bytes`.
    pub fn with_upgrade_bytes(mut self, upgrade_bytes: &[u8]) -> Result<Self> {
        self.upgrade = UpgradeConfig::from_json(upgrade_bytes)?;
        Ok(self)
    }

    /// Human readable summary of the schedule.
    pub fn description(&self) -> String {
        let mut lines = vec![
            format!("Chain ID:  {}", self.chain_id),
            "Consensus: Dummy Consensus Engine".to_string(),
            String::new(),
            "Hard Forks (block based):".to_string(),
        ];
        let block_forks = [
            ("Homestead", self.homestead_block),
            ("DAO Fork", self.dao_fork_block),
            ("Tangerine Whistle (EIP 150)", self.eip150_block),
            ("Spurious Dragon/1 (EIP 155)", self.eip155_block),
            ("Spurious Dragon/2 (EIP 158)", self.eip158_block),
            ("Byzantium", self.byzantium_block),
            ("Constantinople", self.constantinople_block),
            ("Petersburg", self.petersburg_block),
            ("Istanbul", self.istanbul_block),
            ("Muir Glacier", self.muir_glacier_block),
        ];
        lines.extend(
            block_forks
                .iter()
                .map(|(name, block)| fork_line(name, '#', *block)),
        );

        lines.push(String::new());
        lines.push("Hard Forks (timestamp based):".to_string());
        lines.push(fork_line("Cancun", '@', self.cancun_time));

        lines.push(String::new());
        lines.push("Network Upgrades (timestamp based):".to_string());
        lines.extend(AvalancheFork::ALL.iter().map(|fork| {
            fork_line(
                &format!("{:?}", fork),
                '@',
                self.avalanche_fork_time(*fork),
            )
        }));

        let upgrade = serde_json::to_string(&self.upgrade)
            .unwrap_or_else(|_| "cannot marshal upgrade config".into());
        lines.push(String::new());
        lines.push(format!("Upgrade Config: {}", upgrade));

        let mut banner = lines.join("\n");
        banner.push('\n');
        banner
    }

    pub fn is_homestead(&self, number: BlockNumber) -> bool {
        is_block_forked(self.homestead_block, number)
    }

    pub fn is_dao_fork(&self, number: BlockNumber) -> bool {
        is_block_forked(self.dao_fork_block, number)
    }

    pub fn is_eip150(&self, number: BlockNumber) -> bool {
        is_block_forked(self.eip150_block, number)
    }

    pub fn is_eip155(&self, number: BlockNumber) -> bool {
        is_block_forked(self.eip155_block, number)
    }

    pub fn is_eip158(&self, number: BlockNumber) -> bool {
        is_block_forked(self.eip158_block, number)
    }

    pub fn is_byzantium(&self, number: BlockNumber) -> bool {
        is_block_forked(self.byzantium_block, number)
    }

    pub fn is_constantinople(&self, number: BlockNumber) -> bool {
        is_block_forked(self.constantinople_block, number)
    }

    pub fn is_muir_glacier(&self, number: BlockNumber) -> bool {
        is_block_forked(self.muir_glacier_block, number)
    }

    /// Active from the Petersburg block, or with Constantinople when
    /// Petersburg is not scheduled.
    pub fn is_petersburg(&self, number: BlockNumber) -> bool {
        is_block_forked(self.petersburg_block, number)
            || (self.petersburg_block.is_none()
                && self.is_constantinople(number))
    }

    pub fn is_istanbul(&self, number: BlockNumber) -> bool {
        is_block_forked(self.istanbul_block, number)
    }

    pub fn is_apricot_phase_1(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_1_block_timestamp, time)
    }

    pub fn is_apricot_phase_2(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_2_block_timestamp, time)
    }

    pub fn is_apricot_phase_3(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_3_block_timestamp, time)
    }

    pub fn is_apricot_phase_4(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_4_block_timestamp, time)
    }

    pub fn is_apricot_phase_5(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_5_block_timestamp, time)
    }

    pub fn is_apricot_phase_pre_6(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_pre_6_block_timestamp, time)
    }

    pub fn is_apricot_phase_6(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_6_block_timestamp, time)
    }

    pub fn is_apricot_phase_post_6(&self, time: u64) -> bool {
        is_timestamp_forked(self.apricot_phase_post_6_block_timestamp, time)
    }

    pub fn is_banff(&self, time: u64) -> bool {
        is_timestamp_forked(self.banff_block_timestamp, time)
    }

    pub fn is_cortina(&self, time: u64) -> bool {
        is_timestamp_forked(self.cortina_block_timestamp, time)
    }

    pub fn is_durango(&self, time: u64) -> bool {
        is_timestamp_forked(self.durango_block_timestamp, time)
    }

    pub fn is_fee_update_1(&self, time: u64) -> bool {
        is_timestamp_forked(self.fee_update_1_block_timestamp, time)
    }

    pub fn is_cancun(&self, time: u64) -> bool {
        is_timestamp_forked(self.cancun_time, time)
    }
}

fn fork_line(name: &str, marker: char, trigger: Option<u64>) -> String {
    format!(
        " - {:<28} {}{}",
        format!("{}:", name),
        marker,
        opt_to_string(trigger)
    )
}

fn opt_to_string(value: Option<u64>) -> String {
    match value {
        Some(value) => value.to_string(),
        None => "nil".into(),
    }
}

pub(crate) fn check_json_len(bytes: &[u8]) -> Result<()> {
    if bytes.len() > MAX_JSON_LEN {
        return Err(ConfigError::TooLarge {
            len: bytes.len(),
            max: MAX_JSON_LEN,
        });
    }
    Ok(())
}

/// Chain ids are written as JSON numbers. Ids beyond `u64` fall back to a
/// decimal string; hex strings are accepted on input.
mod chain_id_serde {
    use jeth_types::U256;
    use serde::{de::Error, Deserializer, Serializer};
    use serde_derive::Deserialize;

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Number(u64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(
        chain_id: &U256, serializer: S,
    ) -> Result<S::Ok, S::Error> {
        if *chain_id <= U256::from(u64::MAX) {
            serializer.serialize_u64(chain_id.low_u64())
        } else {
            serializer.serialize_str(&chain_id.to_string())
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<U256, D::Error> {
        match <Repr as serde::Deserialize>::deserialize(deserializer)? {
            Repr::Number(value) => Ok(value.into()),
            Repr::Text(text) => {
                let parsed = match text.strip_prefix("0x") {
                    Some(hex) => U256::from_str_radix(hex, 16).ok(),
                    None => U256::from_dec_str(&text).ok(),
                };
                parsed.ok_or_else(|| D::Error::custom("invalid chain id"))
            }
        }
    }
}
