// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::chain_config::ChainConfig;
use jeth_parameters::{
    asset::{MAINNET_PRIMARY_ASSET_IDS, TESTNET_PRIMARY_ASSET_IDS},
    chain_id::*,
    fee::*,
    network::{MAINNET_ID, TESTNET_ID},
};
use jeth_types::U256;
use serde_derive::{Deserialize, Serialize};
use std::collections::HashMap;

/// Minimum base fees of an asset chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainFeeConfig {
    pub initial_min_base_fee: u64,
    pub previous_min_base_fee: u64,
    /// Applies once the first fee update is active.
    pub latest_min_base_fee: u64,
}

impl From<(u64, u64, u64)> for ChainFeeConfig {
    fn from((initial, previous, latest): (u64, u64, u64)) -> Self {
        ChainFeeConfig {
            initial_min_base_fee: initial,
            previous_min_base_fee: previous,
            latest_min_base_fee: latest,
        }
    }
}

lazy_static! {
    static ref FEE_CONFIGS: HashMap<u64, ChainFeeConfig> = {
        let table = [
            (JUNE_JUNE, JUNE_MIN_BASE_FEES),
            (JUNE_MBTC1, MBTC_MIN_BASE_FEES),
            (JUNE_DOGE1, DOGE_MIN_BASE_FEES),
            (JUNE_USD1, USD_MIN_BASE_FEES),
            (JUNE_USDT1, USD_MIN_BASE_FEES),
            (JUNE_DAI1, USD_MIN_BASE_FEES),
            (JUNE_EUR1, EUR_MIN_BASE_FEES),
            (JUNE_LTC1, LTC_MIN_BASE_FEES),
            (JUNE_GLD1, GLD_MIN_BASE_FEES),
            (JUNE_SGD1, SGD_MIN_BASE_FEES),
            (JUNE_BCH1, BCH_MIN_BASE_FEES),
            (JUNE_LINK1, LINK_MIN_BASE_FEES),
            (SOCOTRA_JUNE, JUNE_MIN_BASE_FEES),
            (SOCOTRA_MBTC1, MBTC_MIN_BASE_FEES),
            (SOCOTRA_DOGE1, DOGE_MIN_BASE_FEES),
            (SOCOTRA_USD1, USD_MIN_BASE_FEES),
            (SOCOTRA_USDT1, USD_MIN_BASE_FEES),
            (SOCOTRA_DAI1, USD_MIN_BASE_FEES),
            (SOCOTRA_EUR1, EUR_MIN_BASE_FEES),
            (SOCOTRA_LTC1, LTC_MIN_BASE_FEES),
            (SOCOTRA_GLD1, GLD_MIN_BASE_FEES),
            (SOCOTRA_SGD1, SGD_MIN_BASE_FEES),
            (SOCOTRA_BCH1, BCH_MIN_BASE_FEES),
            (SOCOTRA_LINK1, LINK_MIN_BASE_FEES),
        ];
        table
            .iter()
            .map(|(chain_id, fees)| (*chain_id, ChainFeeConfig::from(*fees)))
            .collect()
    };
}

impl ChainConfig {
    /// Minimum base fees of this chain, protocol defaults for chains without
    /// a dedicated entry.
    pub fn fee_config(&self) -> ChainFeeConfig {
        if self.chain_id > U256::from(u64::MAX) {
            return DEFAULT_MIN_BASE_FEES.into();
        }
        FEE_CONFIGS
            .get(&self.chain_id.low_u64())
            .copied()
            .unwrap_or_else(|| DEFAULT_MIN_BASE_FEES.into())
    }

    /// Minimum base fee in force at `time`.
    pub fn current_min_base_fee(&self, time: u64) -> U256 {
        let fee_config = self.fee_config();
        if self.is_fee_update_1(time) {
            fee_config.latest_min_base_fee.into()
        } else {
            fee_config.previous_min_base_fee.into()
        }
    }
}

/// Whether `asset_id` is a primary asset of the network `network_id`.
pub fn is_primary_asset_id(network_id: u32, asset_id: &str) -> bool {
    match network_id {
        MAINNET_ID => MAINNET_PRIMARY_ASSET_IDS.contains(&asset_id),
        TESTNET_ID => TESTNET_PRIMARY_ASSET_IDS.contains(&asset_id),
        _ => false,
    }
}
