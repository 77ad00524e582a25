// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Environment information for transaction execution.

use crate::{block_hash::BlockHashes, transfer::TransferPolicy};
use jeth_primitives::PredicateResults;
use jeth_types::{Address, BlockNumber, H256, U256};
use std::{fmt, sync::Arc};

/// Block fields of the execution environment, for callers that build a
/// context without a header.
#[derive(Debug, Clone, Default)]
pub struct Env {
    /// The block number.
    pub number: BlockNumber,
    /// The block author.
    pub author: Address,
    /// The block timestamp.
    pub timestamp: u64,
    /// The block difficulty.
    pub difficulty: U256,
    /// The block gas limit.
    pub gas_limit: u64,
    /// The block base fee, absent before dynamic fees.
    pub base_fee: Option<U256>,
}

/// Everything the executor knows about the block being executed.
pub struct BlockContext<'a> {
    pub coinbase: Address,
    pub number: BlockNumber,
    pub time: u64,
    pub difficulty: U256,
    pub base_fee: Option<U256>,
    pub gas_limit: u64,
    /// Decoded predicate results of the block, if any.
    pub predicate_results: Option<PredicateResults>,
    pub transfer: Arc<TransferPolicy>,
    block_hashes: Box<dyn BlockHashes + 'a>,
}

impl<'a> BlockContext<'a> {
    pub(crate) fn new(
        env: Env, block_hashes: Box<dyn BlockHashes + 'a>,
        predicate_results: Option<PredicateResults>,
        transfer: Arc<TransferPolicy>,
    ) -> Self {
        BlockContext {
            coinbase: env.author,
            number: env.number,
            time: env.timestamp,
            difficulty: env.difficulty,
            base_fee: env.base_fee,
            gas_limit: env.gas_limit,
            predicate_results,
            transfer,
            block_hashes,
        }
    }

    /// Context for a runtime harness: block fields come from `env` and
    /// historical hashes from `block_hashes`.
    pub fn from_parts(
        env: Env, block_hashes: Box<dyn BlockHashes + 'a>,
        transfer: Arc<TransferPolicy>,
    ) -> Self {
        Self::new(env, block_hashes, None, transfer)
    }

    /// Hash of the ancestor block `number`, zero if unknown.
    pub fn get_hash(&mut self, number: BlockNumber) -> H256 {
        self.block_hashes.block_hash(number)
    }

    /// Predicate results of `address` for the transaction `tx_hash`.
    pub fn predicate_results(&self, tx_hash: &H256, address: &Address) -> &[u8] {
        match &self.predicate_results {
            Some(results) => results.results(tx_hash, address),
            None => &[],
        }
    }
}

impl fmt::Debug for BlockContext<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("BlockContext")
            .field("coinbase", &self.coinbase)
            .field("number", &self.number)
            .field("time", &self.time)
            .field("difficulty", &self.difficulty)
            .field("base_fee", &self.base_fee)
            .field("gas_limit", &self.gas_limit)
            .field("predicate_results", &self.predicate_results)
            .finish()
    }
}

/// The part of a transaction the executor context needs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Message {
    pub from: Address,
    pub gas_price: U256,
    pub blob_hashes: Vec<H256>,
}

/// Transaction fields of the execution environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TxContext {
    pub origin: Address,
    pub gas_price: U256,
    pub blob_hashes: Vec<H256>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_can_be_created_as_default() {
        let default_env = Env::default();

        assert_eq!(default_env.number, 0);
        assert_eq!(default_env.author, Address::default());
        assert_eq!(default_env.timestamp, 0);
        assert_eq!(default_env.difficulty, 0.into());
        assert_eq!(default_env.gas_limit, 0);
        assert_eq!(default_env.base_fee, None);
    }

    #[test]
    fn test_from_parts() {
        let env = Env {
            number: 10,
            author: Address::repeat_byte(1),
            timestamp: 1234,
            difficulty: 1.into(),
            gas_limit: 8_000_000,
            base_fee: Some(25.into()),
        };
        let mut context = BlockContext::from_parts(
            env,
            Box::new(|n: BlockNumber| H256::from_low_u64_be(n + 1)),
            Arc::new(TransferPolicy::default()),
        );

        assert_eq!(context.coinbase, Address::repeat_byte(1));
        assert_eq!(context.time, 1234);
        assert_eq!(context.base_fee, Some(25.into()));
        assert_eq!(context.get_hash(3), H256::from_low_u64_be(4));
        assert!(context.predicate_results.is_none());
        assert!(context
            .predicate_results(&H256::zero(), &Address::zero())
            .is_empty());
    }
}
