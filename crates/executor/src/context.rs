// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    block_hash::BlockHashCache,
    chain::ChainContext,
    env::{BlockContext, Env, Message, TxContext},
    transfer::TransferPolicy,
};
use jeth_primitives::{predicate_result_bytes, BlockHeader, PredicateResults};
use jeth_types::Address;
use std::sync::Arc;

/// Block context for executing `header`, with the predicate results stored
/// in its extra data.
///
/// A malformed predicate payload is logged and the context is built without
/// results.
pub fn new_block_context<'a>(
    header: &BlockHeader, chain: &'a dyn ChainContext, author: Option<Address>,
    transfer: Arc<TransferPolicy>,
) -> BlockContext<'a> {
    let predicate_results = match predicate_result_bytes(header.extra()) {
        None => None,
        Some(bytes) => match PredicateResults::parse(bytes) {
            Ok(results) => Some(results),
            Err(e) => {
                error!(
                    "failed to parse predicate results of block {} ({:?}): {}",
                    header.number(),
                    header.hash(),
                    e
                );
                None
            }
        },
    };
    new_block_context_with_predicate_results(
        header,
        chain,
        author,
        predicate_results,
        transfer,
    )
}

/// Block context for executing `header` with explicit predicate results.
pub fn new_block_context_with_predicate_results<'a>(
    header: &BlockHeader, chain: &'a dyn ChainContext, author: Option<Address>,
    predicate_results: Option<PredicateResults>, transfer: Arc<TransferPolicy>,
) -> BlockContext<'a> {
    let coinbase = author.unwrap_or_else(|| {
        chain.engine().author(header).unwrap_or_else(|e| {
            debug!("no author for block {}: {}", header.number(), e);
            Address::zero()
        })
    });
    let env = Env {
        number: header.number(),
        author: coinbase,
        timestamp: header.timestamp(),
        difficulty: *header.difficulty(),
        gas_limit: header.gas_limit(),
        base_fee: header.base_fee().copied(),
    };
    BlockContext::new(
        env,
        Box::new(BlockHashCache::new(header, chain)),
        predicate_results,
        transfer,
    )
}

pub fn new_tx_context(msg: &Message) -> TxContext {
    TxContext {
        origin: msg.from,
        gas_price: msg.gas_price,
        blob_hashes: msg.blob_hashes.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MemoryChain;
    use jeth_parameters::fee::DYNAMIC_FEE_EXTRA_DATA_SIZE;
    use jeth_primitives::BlockHeaderBuilder;
    use jeth_types::{H256, U256};

    fn header_with_extra(extra: Vec<u8>, author: Address) -> BlockHeader {
        BlockHeaderBuilder::new()
            .with_parent_hash(H256::repeat_byte(1))
            .with_number(7)
            .with_timestamp(1_000)
            .with_author(author)
            .with_difficulty(3.into())
            .with_gas_limit(15_000_000)
            .with_base_fee(Some(25.into()))
            .with_extra(extra)
            .build()
    }

    #[test]
    fn test_block_context_fields() {
        let chain = MemoryChain::new();
        let author = Address::repeat_byte(5);
        let header = header_with_extra(vec![], author);
        let mut context =
            new_block_context(&header, &chain, None, Default::default());

        assert_eq!(context.coinbase, author);
        assert_eq!(context.number, 7);
        assert_eq!(context.time, 1_000);
        assert_eq!(context.difficulty, U256::from(3));
        assert_eq!(context.gas_limit, 15_000_000);
        assert_eq!(context.base_fee, Some(25.into()));
        assert!(context.predicate_results.is_none());
        assert_eq!(context.get_hash(6), H256::repeat_byte(1));
        assert_eq!(context.get_hash(7), H256::zero());
    }

    #[test]
    fn test_block_context_without_base_fee() {
        let chain = MemoryChain::new();
        let header = BlockHeaderBuilder::new()
            .with_number(3)
            .with_author(Address::repeat_byte(5))
            .build();
        assert!(header.base_fee().is_none());

        let context =
            new_block_context(&header, &chain, None, Default::default());
        assert_eq!(context.base_fee, None);
        assert_eq!(context.number, 3);
    }

    #[test]
    fn test_coinbase_override_and_fallback() {
        let chain = MemoryChain::new();
        let header = header_with_extra(vec![], Address::zero());

        let context =
            new_block_context(&header, &chain, None, Default::default());
        assert_eq!(context.coinbase, Address::zero());

        let coinbase = Address::repeat_byte(8);
        let context = new_block_context(
            &header,
            &chain,
            Some(coinbase),
            Default::default(),
        );
        assert_eq!(context.coinbase, coinbase);
    }

    #[test]
    fn test_predicate_results_from_extra() {
        let _ = env_logger::try_init();
        let chain = MemoryChain::new();
        let tx = H256::repeat_byte(0x11);
        let warp = Address::repeat_byte(2);
        let mut results = PredicateResults::new();
        results.set_tx_results(
            tx,
            vec![(warp, vec![0b101])].into_iter().collect(),
        );

        let mut extra = vec![0u8; DYNAMIC_FEE_EXTRA_DATA_SIZE];
        extra.extend(results.bytes());
        let header = header_with_extra(extra, Address::repeat_byte(5));
        let context =
            new_block_context(&header, &chain, None, Default::default());
        assert_eq!(context.predicate_results.as_ref(), Some(&results));
        assert_eq!(context.predicate_results(&tx, &warp), &[0b101]);

        let mut extra = vec![0u8; DYNAMIC_FEE_EXTRA_DATA_SIZE];
        extra.extend(vec![0xc3, 0xff, 0x01, 0x02]);
        let header = header_with_extra(extra, Address::repeat_byte(5));
        let context =
            new_block_context(&header, &chain, None, Default::default());
        assert!(context.predicate_results.is_none());
    }

    #[test]
    fn test_explicit_predicate_results() {
        let chain = MemoryChain::new();
        let mut extra = vec![0u8; DYNAMIC_FEE_EXTRA_DATA_SIZE];
        extra.extend(vec![0xc3, 0xff, 0x01, 0x02]);
        let header = header_with_extra(extra, Address::repeat_byte(5));

        let context = new_block_context_with_predicate_results(
            &header,
            &chain,
            None,
            Some(PredicateResults::new()),
            Default::default(),
        );
        assert_eq!(context.predicate_results, Some(PredicateResults::new()));
    }

    #[test]
    fn test_tx_context() {
        let msg = Message {
            from: Address::repeat_byte(3),
            gas_price: 470.into(),
            blob_hashes: vec![H256::repeat_byte(4)],
        };
        assert_eq!(
            new_tx_context(&msg),
            TxContext {
                origin: Address::repeat_byte(3),
                gas_price: 470.into(),
                blob_hashes: vec![H256::repeat_byte(4)],
            }
        );
    }
}
