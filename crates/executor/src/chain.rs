// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use jeth_primitives::BlockHeader;
use jeth_types::{Address, BlockNumber, H256};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown author of block {0:?}")]
    UnknownAuthor(H256),
}

/// Consensus engine hooks used while building a block context.
pub trait Engine: Send + Sync {
    fn author(&self, header: &BlockHeader) -> Result<Address, EngineError>;
}

/// Read access to the canonical chain.
pub trait ChainContext {
    fn engine(&self) -> &dyn Engine;

    /// The header with `hash` at height `number`, if known.
    fn header(&self, hash: &H256, number: BlockNumber) -> Option<BlockHeader>;
}

#[cfg(any(test, feature = "testonly_code"))]
pub use self::testonly::{HeaderAuthorEngine, MemoryChain};

#[cfg(any(test, feature = "testonly_code"))]
mod testonly {
    use super::*;
    use jeth_primitives::BlockHeaderBuilder;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Engine reporting the author field of the header, failing on a null
    /// author.
    #[derive(Debug, Default)]
    pub struct HeaderAuthorEngine;

    impl Engine for HeaderAuthorEngine {
        fn author(&self, header: &BlockHeader) -> Result<Address, EngineError> {
            if header.author().is_zero() {
                return Err(EngineError::UnknownAuthor(header.hash()));
            }
            Ok(*header.author())
        }
    }

    /// In-memory chain counting header lookups.
    #[derive(Default)]
    pub struct MemoryChain {
        engine: HeaderAuthorEngine,
        headers: HashMap<(H256, BlockNumber), BlockHeader>,
        fetches: Mutex<usize>,
    }

    impl MemoryChain {
        pub fn new() -> Self { Self::default() }

        /// A linked chain of `len` headers starting at genesis, returned
        /// with the headers in height order.
        pub fn linked(len: u64) -> (Self, Vec<BlockHeader>) {
            let mut chain = Self::new();
            let mut headers = Vec::new();
            let mut parent_hash = H256::zero();
            for number in 0..len {
                let header = BlockHeaderBuilder::new()
                    .with_parent_hash(parent_hash)
                    .with_number(number)
                    .with_timestamp(number * 2)
                    .build();
                parent_hash = header.hash();
                chain.insert(header.clone());
                headers.push(header);
            }
            (chain, headers)
        }

        pub fn insert(&mut self, header: BlockHeader) {
            self.headers.insert((header.hash(), header.number()), header);
        }

        pub fn remove(&mut self, header: &BlockHeader) {
            self.headers.remove(&(header.hash(), header.number()));
        }

        /// Number of `header` calls served so far.
        pub fn fetch_count(&self) -> usize { *self.fetches.lock() }
    }

    impl ChainContext for MemoryChain {
        fn engine(&self) -> &dyn Engine { &self.engine }

        fn header(
            &self, hash: &H256, number: BlockNumber,
        ) -> Option<BlockHeader> {
            *self.fetches.lock() += 1;
            self.headers.get(&(*hash, number)).cloned()
        }
    }
}
