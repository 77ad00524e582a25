// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::state::StateDb;
use jeth_parameters::reserved_account::MULTI_COIN_ACCOUNTS;
use jeth_types::{Address, AssetId, U256};
use std::collections::BTreeSet;

/// Accounts allowed to mint multi-coin assets without holding them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Whitelist {
    addresses: BTreeSet<Address>,
}

impl Default for Whitelist {
    fn default() -> Self { Whitelist::new(MULTI_COIN_ACCOUNTS.iter().copied()) }
}

impl Whitelist {
    pub fn new<I: IntoIterator<Item = Address>>(addresses: I) -> Self {
        Whitelist {
            addresses: addresses.into_iter().collect(),
        }
    }

    pub fn empty() -> Self {
        Whitelist {
            addresses: BTreeSet::new(),
        }
    }

    pub fn contains(&self, address: &Address) -> bool {
        self.addresses.contains(address)
    }

    pub fn len(&self) -> usize { self.addresses.len() }

    pub fn is_empty(&self) -> bool { self.addresses.is_empty() }
}

/// Value transfer rules of the executor.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TransferPolicy {
    whitelist: Whitelist,
}

impl TransferPolicy {
    pub fn new(whitelist: Whitelist) -> Self { TransferPolicy { whitelist } }

    pub fn whitelist(&self) -> &Whitelist { &self.whitelist }

    /// Whether `address` holds at least `amount` of the native coin.
    pub fn can_transfer(
        &self, db: &dyn StateDb, address: &Address, amount: &U256,
    ) -> bool {
        db.balance(address) >= *amount
    }

    /// Move `amount` of the native coin. Callers check
    /// [`TransferPolicy::can_transfer`] first.
    pub fn transfer(
        &self, db: &mut dyn StateDb, from: &Address, to: &Address,
        amount: &U256,
    ) {
        db.sub_balance(from, amount);
        db.add_balance(to, amount);
    }

    /// Whether `address` may send `amount` of `asset` to `_to`: it holds
    /// enough of the asset or it is whitelisted.
    pub fn can_transfer_mc(
        &self, db: &dyn StateDb, address: &Address, _to: &Address,
        asset: &AssetId, amount: &U256,
    ) -> bool {
        db.balance_multi_coin(address, asset) >= *amount
            || self.whitelist.contains(address)
    }

    /// Move `amount` of `asset`. Whitelisted senders are not debited.
    pub fn transfer_multi_coin(
        &self, db: &mut dyn StateDb, from: &Address, to: &Address,
        asset: &AssetId, amount: &U256,
    ) {
        if !self.whitelist.contains(from) {
            db.sub_balance_multi_coin(from, asset, amount);
        }
        db.add_balance_multi_coin(to, asset, amount);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::InMemoryStateDb;
    use jeth_types::AddressUtil;

    #[test]
    fn test_default_whitelist() {
        let whitelist = Whitelist::default();
        assert_eq!(whitelist.len(), 17);
        assert!(whitelist.contains(&Address::from_leading_byte(45)));
        assert!(whitelist.contains(&Address::from_leading_byte(61)));
        assert!(!whitelist.contains(&Address::from_leading_byte(62)));
    }

    #[test]
    fn test_transfer() {
        let policy = TransferPolicy::default();
        let alice = Address::repeat_byte(1);
        let bob = Address::repeat_byte(2);
        let mut db = InMemoryStateDb::new().with_balance(alice, 100.into());

        assert!(policy.can_transfer(&db, &alice, &100.into()));
        assert!(!policy.can_transfer(&db, &alice, &101.into()));
        assert!(!policy.can_transfer(&db, &bob, &1.into()));
        assert!(policy.can_transfer(&db, &bob, &0.into()));

        policy.transfer(&mut db, &alice, &bob, &40.into());
        assert_eq!(db.balance(&alice), 60.into());
        assert_eq!(db.balance(&bob), 40.into());
    }

    #[test]
    fn test_whitelisted_multi_coin_transfer() {
        let policy = TransferPolicy::default();
        let reserved = MULTI_COIN_ACCOUNTS[0];
        let user = Address::repeat_byte(0xaa);
        let asset = AssetId::repeat_byte(7);
        let mut db = InMemoryStateDb::new();

        let five = U256::from(5);
        assert!(policy.can_transfer_mc(&db, &reserved, &user, &asset, &five));
        assert!(!policy.can_transfer_mc(&db, &user, &reserved, &asset, &five));

        policy.transfer_multi_coin(&mut db, &reserved, &user, &asset, &five);
        assert_eq!(db.balance_multi_coin(&reserved, &asset), U256::zero());
        assert_eq!(db.balance_multi_coin(&user, &asset), 5.into());

        assert!(policy.can_transfer_mc(&db, &user, &reserved, &asset, &five));
        policy.transfer_multi_coin(&mut db, &user, &reserved, &asset, &2.into());
        assert_eq!(db.balance_multi_coin(&user, &asset), 3.into());
        assert_eq!(db.balance_multi_coin(&reserved, &asset), 2.into());
    }

    #[test]
    fn test_whitelisted_sender_not_debited() {
        let policy = TransferPolicy::default();
        let reserved = MULTI_COIN_ACCOUNTS[3];
        let user = Address::repeat_byte(0xaa);
        let recipient = Address::repeat_byte(0xbb);
        let asset = AssetId::repeat_byte(7);
        let mut db = InMemoryStateDb::new()
            .with_balance_multi_coin(user, asset, 10.into())
            .with_balance_multi_coin(reserved, asset, 10.into());
        let fifteen = U256::from(15);

        assert!(!policy.can_transfer_mc(
            &db, &user, &recipient, &asset, &fifteen
        ));
        assert!(policy.can_transfer_mc(
            &db, &reserved, &recipient, &asset, &fifteen
        ));

        policy.transfer_multi_coin(
            &mut db, &reserved, &recipient, &asset, &fifteen,
        );
        assert_eq!(db.balance_multi_coin(&reserved, &asset), 10.into());
        assert_eq!(db.balance_multi_coin(&recipient, &asset), 15.into());

        policy.transfer_multi_coin(&mut db, &user, &recipient, &asset, &4.into());
        assert_eq!(db.balance_multi_coin(&user, &asset), 6.into());
        assert_eq!(db.balance_multi_coin(&recipient, &asset), 19.into());
    }

    #[test]
    fn test_injected_whitelist() {
        let minter = Address::repeat_byte(9);
        let policy = TransferPolicy::new(Whitelist::new(vec![minter]));
        let asset = AssetId::repeat_byte(1);
        let db = InMemoryStateDb::new();

        let one = U256::one();
        assert!(policy.can_transfer_mc(&db, &minter, &minter, &asset, &one));
        assert!(!policy.can_transfer_mc(
            &db,
            &MULTI_COIN_ACCOUNTS[0],
            &minter,
            &asset,
            &one
        ));
        assert!(Whitelist::empty().is_empty());
    }
}
