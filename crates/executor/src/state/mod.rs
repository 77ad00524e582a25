// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Balance view of the world state used by transfers.

#[cfg(any(test, feature = "testonly_code"))]
mod in_memory;

#[cfg(any(test, feature = "testonly_code"))]
pub use self::in_memory::InMemoryStateDb;

use jeth_types::{Address, AssetId, U256};

/// Native and multi-coin balances of accounts.
pub trait StateDb {
    fn balance(&self, address: &Address) -> U256;

    fn sub_balance(&mut self, address: &Address, by: &U256);

    fn add_balance(&mut self, address: &Address, by: &U256);

    fn balance_multi_coin(&self, address: &Address, asset: &AssetId) -> U256;

    fn sub_balance_multi_coin(
        &mut self, address: &Address, asset: &AssetId, by: &U256,
    );

    fn add_balance_multi_coin(
        &mut self, address: &Address, asset: &AssetId, by: &U256,
    );
}
