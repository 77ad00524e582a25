// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::Address;

pub trait AddressUtil: Sized + Ord {
    /// Address whose first byte is `prefix` and every other byte is zero.
    /// Reserved multi-coin accounts are laid out this way.
    fn from_leading_byte(prefix: u8) -> Self;
}

impl AddressUtil for Address {
    fn from_leading_byte(prefix: u8) -> Self {
        let mut address = Address::zero();
        address.0[0] = prefix;
        address
    }
}
