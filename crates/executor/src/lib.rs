// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

//! Execution context handed to the transaction executor.
//!
//! - **Block context** ([`BlockContext`]): coinbase, number, time, fees, gas
//!   limit, decoded predicate results and the historical block hash source.
//! - **Transaction context** ([`TxContext`]): origin, gas price and blob
//!   hashes of a single transaction.
//! - **Transfer policy** ([`TransferPolicy`]): balance checks and moves,
//!   including the multi-coin ledger and its reserved accounts.
//! - **Machine** ([`Machine`]): ties a validated fork schedule and module
//!   registry to the builders above.

#[macro_use]
extern crate log;

mod block_hash;
mod chain;
mod context;
mod env;
mod machine;
pub mod state;
mod transfer;

pub use crate::{
    block_hash::{BlockHashCache, BlockHashes},
    chain::{ChainContext, Engine, EngineError},
    context::{
        new_block_context, new_block_context_with_predicate_results,
        new_tx_context,
    },
    env::{BlockContext, Env, Message, TxContext},
    machine::Machine,
    state::StateDb,
    transfer::{TransferPolicy, Whitelist},
};

#[cfg(any(test, feature = "testonly_code"))]
pub use crate::chain::{HeaderAuthorEngine, MemoryChain};
#[cfg(any(test, feature = "testonly_code"))]
pub use crate::state::InMemoryStateDb;
