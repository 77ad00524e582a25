// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::chain::ChainContext;
use jeth_primitives::BlockHeader;
use jeth_types::{BlockNumber, H256, ZERO_HASH};

/// Source of historical block hashes for the `BLOCKHASH` lookup.
pub trait BlockHashes {
    /// Hash of block `number`, zero when it is unknown.
    fn block_hash(&mut self, number: BlockNumber) -> H256;
}

impl<F> BlockHashes for F
where F: FnMut(BlockNumber) -> H256
{
    fn block_hash(&mut self, number: BlockNumber) -> H256 { self(number) }
}

/// Lazily filled ancestor hashes of a reference header.
///
/// `hashes[i]` is the hash of block `number - 1 - i`. The first entry is the
/// parent hash of the reference header; every further entry costs exactly
/// one header lookup.
pub struct BlockHashCache<'a> {
    chain: &'a dyn ChainContext,
    number: BlockNumber,
    parent_hash: H256,
    hashes: Vec<H256>,
}

impl<'a> BlockHashCache<'a> {
    pub fn new(header: &BlockHeader, chain: &'a dyn ChainContext) -> Self {
        BlockHashCache {
            chain,
            number: header.number(),
            parent_hash: *header.parent_hash(),
            hashes: Vec::new(),
        }
    }

    pub fn get_hash(&mut self, n: BlockNumber) -> H256 {
        if n >= self.number {
            return ZERO_HASH;
        }
        if self.hashes.is_empty() {
            self.hashes.push(self.parent_hash);
        }

        let cached = usize::try_from(self.number - n - 1)
            .ok()
            .and_then(|index| self.hashes.get(index));
        if let Some(hash) = cached {
            return *hash;
        }

        let mut last_hash = self.hashes[self.hashes.len() - 1];
        let mut last_number = self.number - self.hashes.len() as u64;
        trace!(
            "walk block hashes from {} down to {} (cached {})",
            last_number,
            n,
            self.hashes.len()
        );
        while let Some(header) = self.chain.header(&last_hash, last_number) {
            last_hash = *header.parent_hash();
            self.hashes.push(last_hash);
            last_number = match header.number().checked_sub(1) {
                Some(number) => number,
                None => break,
            };
            if n == last_number {
                return last_hash;
            }
        }
        debug!("block hash of {} unavailable below {}", n, last_number);
        ZERO_HASH
    }
}

impl BlockHashes for BlockHashCache<'_> {
    fn block_hash(&mut self, number: BlockNumber) -> H256 {
        self.get_hash(number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chain::MemoryChain;
    use jeth_primitives::BlockHeaderBuilder;

    #[test]
    fn test_get_hash_walks_once() {
        let (chain, headers) = MemoryChain::linked(101);
        let head = &headers[100];
        let mut cache = BlockHashCache::new(head, &chain);

        assert_eq!(cache.get_hash(99), headers[99].hash());
        assert_eq!(chain.fetch_count(), 0);

        assert_eq!(cache.get_hash(95), headers[95].hash());
        assert_eq!(chain.fetch_count(), 4);

        assert_eq!(cache.get_hash(200), ZERO_HASH);
        assert_eq!(cache.get_hash(100), ZERO_HASH);

        assert_eq!(cache.get_hash(99), headers[99].hash());
        assert_eq!(cache.get_hash(97), headers[97].hash());
        assert_eq!(chain.fetch_count(), 4);

        assert_eq!(cache.get_hash(94), headers[94].hash());
        assert_eq!(chain.fetch_count(), 5);
    }

    #[test]
    fn test_get_hash_far_ancestor_misses_cache() {
        let (chain, headers) = MemoryChain::linked(3);
        let head = BlockHeaderBuilder::new()
            .with_parent_hash(headers[2].hash())
            .with_number(u64::MAX)
            .build();
        let mut cache = BlockHashCache::new(&head, &chain);

        assert_eq!(cache.get_hash(u64::MAX - 1), headers[2].hash());
        assert_eq!(cache.get_hash(0), ZERO_HASH);
        assert_eq!(cache.get_hash(u64::MAX - 1), headers[2].hash());
    }

    #[test]
    fn test_get_hash_down_to_genesis() {
        let (chain, headers) = MemoryChain::linked(6);
        let mut cache = BlockHashCache::new(&headers[5], &chain);

        assert_eq!(cache.get_hash(0), headers[0].hash());
        assert_eq!(chain.fetch_count(), 4);
    }

    #[test]
    fn test_get_hash_missing_ancestor() {
        let (mut chain, headers) = MemoryChain::linked(20);
        chain.remove(&headers[15]);
        let mut cache = BlockHashCache::new(&headers[19], &chain);

        assert_eq!(cache.get_hash(15), headers[15].hash());
        assert_eq!(cache.get_hash(14), ZERO_HASH);
        assert_eq!(cache.get_hash(10), ZERO_HASH);
        assert_eq!(cache.get_hash(16), headers[16].hash());
    }
}
