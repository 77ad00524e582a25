// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Predicate verification results carried in the header extra data.
//!
//! The payload maps a transaction hash to the result bitset each predicater
//! module produced for it. It is stored after the dynamic fee window.

use jeth_parameters::fee::DYNAMIC_FEE_EXTRA_DATA_SIZE;
use jeth_types::{Address, Bytes, H256};
use rlp::{Decodable, DecoderError, Encodable, Rlp, RlpStream};
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PredicateError {
    #[error(transparent)]
    Decoder(#[from] DecoderError),

    #[error("duplicate predicate results for tx {0:?}")]
    DuplicateTx(H256),

    #[error("duplicate predicate result for address {address:?} in tx {tx:?}")]
    DuplicateAddress { tx: H256, address: Address },
}

pub type Result<T> = std::result::Result<T, PredicateError>;

/// Returns the predicate results payload of `extra`, if any.
pub fn predicate_result_bytes(extra: &[u8]) -> Option<&[u8]> {
    if extra.len() <= DYNAMIC_FEE_EXTRA_DATA_SIZE {
        return None;
    }
    Some(&extra[DYNAMIC_FEE_EXTRA_DATA_SIZE..])
}

/// Items of the list `rlp`. The items must fill the list payload exactly.
fn list_items<'a>(rlp: &Rlp<'a>) -> Result<Vec<Rlp<'a>>> {
    if !rlp.is_list() {
        return Err(DecoderError::RlpExpectedToBeList.into());
    }
    let payload = rlp.payload_info()?;
    let items: Vec<Rlp<'a>> = rlp.iter().collect();
    let consumed: usize = items.iter().map(|item| item.as_raw().len()).sum();
    if consumed != payload.value_len {
        return Err(DecoderError::RlpInconsistentLengthAndData.into());
    }
    Ok(items)
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PredicateResults {
    results: BTreeMap<H256, BTreeMap<Address, Bytes>>,
}

impl PredicateResults {
    pub fn new() -> Self { Self::default() }

    /// Decode a payload previously produced by [`PredicateResults::bytes`].
    pub fn parse(bytes: &[u8]) -> Result<Self> {
        let rlp = Rlp::new(bytes);
        let payload = rlp.payload_info()?;
        if payload.header_len + payload.value_len != bytes.len() {
            return Err(DecoderError::RlpInconsistentLengthAndData.into());
        }
        let mut results = BTreeMap::new();
        for tx_entry in list_items(&rlp)? {
            let tx_hash: H256 = tx_entry.val_at(0)?;
            let mut tx_results = BTreeMap::new();
            for item in list_items(&tx_entry.at(1)?)? {
                let address: Address = item.val_at(0)?;
                let bitset: Bytes = item.val_at(1)?;
                if tx_results.insert(address, bitset).is_some() {
                    return Err(PredicateError::DuplicateAddress {
                        tx: tx_hash,
                        address,
                    });
                }
            }
            if results.insert(tx_hash, tx_results).is_some() {
                return Err(PredicateError::DuplicateTx(tx_hash));
            }
        }
        Ok(Self { results })
    }

    pub fn bytes(&self) -> Bytes { rlp::encode(self).to_vec() }

    /// Result bitset of `address` for `tx_hash`, empty when unknown.
    pub fn results(&self, tx_hash: &H256, address: &Address) -> &[u8] {
        self.results
            .get(tx_hash)
            .and_then(|tx_results| tx_results.get(address))
            .map(|bitset| bitset.as_slice())
            .unwrap_or(&[])
    }

    /// Replace the results of `tx_hash`. Empty results remove the entry.
    pub fn set_tx_results(
        &mut self, tx_hash: H256, tx_results: BTreeMap<Address, Bytes>,
    ) {
        if tx_results.is_empty() {
            self.results.remove(&tx_hash);
        } else {
            self.results.insert(tx_hash, tx_results);
        }
    }

    pub fn delete_tx_results(&mut self, tx_hash: &H256) {
        self.results.remove(tx_hash);
    }

    pub fn is_empty(&self) -> bool { self.results.is_empty() }
}

impl Encodable for PredicateResults {
    fn rlp_append(&self, stream: &mut RlpStream) {
        stream.begin_list(self.results.len());
        for (tx_hash, tx_results) in &self.results {
            stream.begin_list(2).append(tx_hash);
            stream.begin_list(tx_results.len());
            for (address, bitset) in tx_results {
                stream.begin_list(2).append(address).append(bitset);
            }
        }
    }
}

impl Decodable for PredicateResults {
    fn decode(rlp: &Rlp) -> std::result::Result<Self, DecoderError> {
        Self::parse(rlp.as_raw()).map_err(|e| match e {
            PredicateError::Decoder(e) => e,
            _ => DecoderError::Custom("duplicate predicate results"),
        })
    }
}
