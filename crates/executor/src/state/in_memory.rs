// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::StateDb;
use jeth_types::{Address, AssetId, U256};
use std::collections::HashMap;

/// Hash map backed balances. Debits below zero saturate.
#[derive(Clone, Debug, Default)]
pub struct InMemoryStateDb {
    balances: HashMap<Address, U256>,
    multi_coin: HashMap<(Address, AssetId), U256>,
}

impl InMemoryStateDb {
    pub fn new() -> Self { Self::default() }

    pub fn with_balance(mut self, address: Address, balance: U256) -> Self {
        self.balances.insert(address, balance);
        self
    }

    pub fn with_balance_multi_coin(
        mut self, address: Address, asset: AssetId, balance: U256,
    ) -> Self {
        self.multi_coin.insert((address, asset), balance);
        self
    }
}

impl StateDb for InMemoryStateDb {
    fn balance(&self, address: &Address) -> U256 {
        self.balances.get(address).copied().unwrap_or_default()
    }

    fn sub_balance(&mut self, address: &Address, by: &U256) {
        let balance = self.balances.entry(*address).or_default();
        *balance = balance.saturating_sub(*by);
    }

    fn add_balance(&mut self, address: &Address, by: &U256) {
        let balance = self.balances.entry(*address).or_default();
        *balance = balance.saturating_add(*by);
    }

    fn balance_multi_coin(&self, address: &Address, asset: &AssetId) -> U256 {
        self.multi_coin
            .get(&(*address, *asset))
            .copied()
            .unwrap_or_default()
    }

    fn sub_balance_multi_coin(
        &mut self, address: &Address, asset: &AssetId, by: &U256,
    ) {
        let balance = self.multi_coin.entry((*address, *asset)).or_default();
        *balance = balance.saturating_sub(*by);
    }

    fn add_balance_multi_coin(
        &mut self, address: &Address, asset: &AssetId, by: &U256,
    ) {
        let balance = self.multi_coin.entry((*address, *asset)).or_default();
        *balance = balance.saturating_add(*by);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_balances_are_per_asset() {
        let alice = Address::repeat_byte(1);
        let gold = AssetId::repeat_byte(7);
        let mut db = InMemoryStateDb::new()
            .with_balance(alice, 10.into())
            .with_balance_multi_coin(alice, gold, 3.into());

        db.add_balance_multi_coin(&alice, &gold, &2.into());
        db.sub_balance(&alice, &4.into());
        assert_eq!(db.balance(&alice), 6.into());
        assert_eq!(db.balance_multi_coin(&alice, &gold), 5.into());
        assert_eq!(
            db.balance_multi_coin(&alice, &AssetId::repeat_byte(8)),
            U256::zero()
        );
    }
}
