// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

extern crate keccak_hash as hash;
extern crate rlp;

pub mod block_header;
pub mod predicate;

pub use crate::{
    block_header::{BlockHeader, BlockHeaderBuilder},
    predicate::{predicate_result_bytes, PredicateError, PredicateResults},
};
