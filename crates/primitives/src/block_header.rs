// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::hash::keccak;
use jeth_types::{Address, BlockNumber, Bytes, H256, U256};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};

/// A block header, restricted to the fields the execution context reads.
#[derive(Clone, Debug, Eq)]
pub struct BlockHeader {
    /// Parent hash.
    parent_hash: H256,
    /// Block number.
    number: BlockNumber,
    /// Block timestamp, in seconds.
    timestamp: u64,
    /// Block author.
    author: Address,
    /// Block difficulty.
    difficulty: U256,
    /// Gas limit.
    gas_limit: u64,
    /// Base fee, present once dynamic fees are active.
    base_fee: Option<U256>,
    /// Extra data: dynamic fee window followed by predicate results.
    extra: Bytes,
    /// Hash of the block
    hash: Option<H256>,
}

impl PartialEq for BlockHeader {
    fn eq(&self, o: &BlockHeader) -> bool {
        self.parent_hash == o.parent_hash
            && self.number == o.number
            && self.timestamp == o.timestamp
            && self.author == o.author
            && self.difficulty == o.difficulty
            && self.gas_limit == o.gas_limit
            && self.base_fee == o.base_fee
            && self.extra == o.extra
    }
}

impl BlockHeader {
    /// Get the parent_hash field of the header.
    pub fn parent_hash(&self) -> &H256 { &self.parent_hash }

    /// Get the block number.
    pub fn number(&self) -> BlockNumber { self.number }

    /// Get the timestamp field of the header.
    pub fn timestamp(&self) -> u64 { self.timestamp }

    /// Get the author field of the header.
    pub fn author(&self) -> &Address { &self.author }

    /// Get the difficulty field of the header.
    pub fn difficulty(&self) -> &U256 { &self.difficulty }

    /// Get the gas limit field of the header.
    pub fn gas_limit(&self) -> u64 { self.gas_limit }

    /// Get the base fee field of the header.
    pub fn base_fee(&self) -> Option<&U256> { self.base_fee.as_ref() }

    /// Get the extra data field of the header.
    pub fn extra(&self) -> &[u8] { &self.extra }

    /// Compute the hash of the block.
    pub fn compute_hash(&mut self) -> H256 {
        let hash = self.hash();
        self.hash = Some(hash);
        hash
    }

    /// Get the hash of the block.
    pub fn hash(&self) -> H256 {
        self.hash.unwrap_or_else(|| keccak(self.rlp()))
    }

    /// Get the RLP representation of this header.
    pub fn rlp(&self) -> Bytes {
        let mut stream = RlpStream::new();
        self.stream_rlp(&mut stream);
        stream.out().to_vec()
    }

    /// Place this header into an RLP stream `stream`. The base fee is only
    /// appended when present.
    fn stream_rlp(&self, stream: &mut RlpStream) {
        let len = if self.base_fee.is_some() { 8 } else { 7 };
        stream
            .begin_list(len)
            .append(&self.parent_hash)
            .append(&self.number)
            .append(&self.timestamp)
            .append(&self.author)
            .append(&self.difficulty)
            .append(&self.gas_limit)
            .append(&self.extra);
        if let Some(base_fee) = &self.base_fee {
            stream.append(base_fee);
        }
    }
}

pub struct BlockHeaderBuilder {
    parent_hash: H256,
    number: BlockNumber,
    timestamp: u64,
    author: Address,
    difficulty: U256,
    gas_limit: u64,
    base_fee: Option<U256>,
    extra: Bytes,
}

impl BlockHeaderBuilder {
    pub fn new() -> Self {
        Self {
            parent_hash: H256::default(),
            number: 0,
            timestamp: 0,
            author: Address::default(),
            difficulty: U256::one(),
            gas_limit: 0,
            base_fee: None,
            extra: Bytes::new(),
        }
    }

    pub fn with_parent_hash(&mut self, parent_hash: H256) -> &mut Self {
        self.parent_hash = parent_hash;
        self
    }

    pub fn with_number(&mut self, number: BlockNumber) -> &mut Self {
        self.number = number;
        self
    }

    pub fn with_timestamp(&mut self, timestamp: u64) -> &mut Self {
        self.timestamp = timestamp;
        self
    }

    pub fn with_author(&mut self, author: Address) -> &mut Self {
        self.author = author;
        self
    }

    pub fn with_difficulty(&mut self, difficulty: U256) -> &mut Self {
        self.difficulty = difficulty;
        self
    }

    pub fn with_gas_limit(&mut self, gas_limit: u64) -> &mut Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_base_fee(&mut self, base_fee: Option<U256>) -> &mut Self {
        self.base_fee = base_fee;
        self
    }

    pub fn with_extra(&mut self, extra: Bytes) -> &mut Self {
        self.extra = extra;
        self
    }

    pub fn build(&self) -> BlockHeader {
        BlockHeader {
            parent_hash: self.parent_hash,
            number: self.number,
            timestamp: self.timestamp,
            author: self.author,
            difficulty: self.difficulty,
            gas_limit: self.gas_limit,
            base_fee: self.base_fee,
            extra: self.extra.clone(),
            hash: None,
        }
    }
}

impl Default for BlockHeaderBuilder {
    fn default() -> Self { Self::new() }
}

impl Encodable for BlockHeader {
    fn rlp_append(&self, stream: &mut RlpStream) { self.stream_rlp(stream); }
}

impl Decodable for BlockHeader {
    fn decode(r: &Rlp) -> Result<Self, DecoderError> {
        let base_fee = match r.item_count()? {
            7 => None,
            8 => Some(r.val_at(7)?),
            _ => return Err(DecoderError::RlpIncorrectListLen),
        };
        let mut header = BlockHeader {
            parent_hash: r.val_at(0)?,
            number: r.val_at(1)?,
            timestamp: r.val_at(2)?,
            author: r.val_at(3)?,
            difficulty: r.val_at(4)?,
            gas_limit: r.val_at(5)?,
            extra: r.val_at(6)?,
            base_fee,
            hash: None,
        };
        header.compute_hash();

        Ok(header)
    }
}
