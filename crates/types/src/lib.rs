// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

extern crate ethereum_types;

pub use ethereum_types::{
    Address, BigEndianHash, Bloom, H160, H256, H64, U128, U256, U512, U64,
};

pub mod address_util;
pub use address_util::AddressUtil;

/// Raw bytes, as carried in header extra data and predicate payloads.
pub type Bytes = Vec<u8>;

/// Identifier of an asset on the multi-coin ledger.
pub type AssetId = H256;

/// Block height of the chain.
pub type BlockNumber = u64;

/// Hash returned for ancestors that cannot be resolved.
pub const ZERO_HASH: H256 = H256([0u8; 32]);
