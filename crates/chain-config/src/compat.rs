// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    chain_config::ChainConfig,
    fork::{is_block_forked, is_timestamp_forked, AvalancheFork},
};
use jeth_types::BlockNumber;
use std::fmt;
use thiserror::Error;

/// Number of fork checks done by one compatibility scan.
const COMPAT_CHECKS: usize = 12 + AvalancheFork::ALL.len() + 1;

/// Raised when a new schedule would alter history the local chain has
/// already imported.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub struct ConfigCompatError {
    pub what: &'static str,
    /// Triggers of the stored and new schedules, for block based forks.
    pub stored_block: Option<BlockNumber>,
    pub new_block: Option<BlockNumber>,
    /// Triggers of the stored and new schedules, for timestamp based forks.
    pub stored_time: Option<u64>,
    pub new_time: Option<u64>,
    /// Block the local chain must be rewound to.
    pub rewind_to_block: BlockNumber,
    /// Timestamp the local chain must be rewound to.
    pub rewind_to_time: u64,
}

impl ConfigCompatError {
    fn new_block(
        what: &'static str, stored: Option<BlockNumber>,
        new: Option<BlockNumber>,
    ) -> Self {
        ConfigCompatError {
            what,
            stored_block: stored,
            new_block: new,
            stored_time: None,
            new_time: None,
            rewind_to_block: rewind_point(stored, new),
            rewind_to_time: 0,
        }
    }

    fn new_timestamp(
        what: &'static str, stored: Option<u64>, new: Option<u64>,
    ) -> Self {
        ConfigCompatError {
            what,
            stored_block: None,
            new_block: None,
            stored_time: stored,
            new_time: new,
            rewind_to_block: 0,
            rewind_to_time: rewind_point(stored, new),
        }
    }

    pub fn is_block_based(&self) -> bool {
        self.stored_block.is_some() || self.new_block.is_some()
    }
}

/// One unit before the earlier of the two triggers, floored at zero.
fn rewind_point(stored: Option<u64>, new: Option<u64>) -> u64 {
    let target = match (stored, new) {
        (None, new) => new,
        (Some(stored), None) => Some(stored),
        (Some(stored), Some(new)) if stored < new => Some(stored),
        (_, new) => new,
    };
    match target {
        Some(target) if target > 0 => target - 1,
        _ => 0,
    }
}

impl fmt::Display for ConfigCompatError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.is_block_based() {
            write!(
                f,
                "mismatching {} in database (have block {}, want block {}, \
                 rewindto block {})",
                self.what,
                opt_to_string(self.stored_block),
                opt_to_string(self.new_block),
                self.rewind_to_block
            )
        } else {
            write!(
                f,
                "mismatching {} in database (have timestamp {}, want \
                 timestamp {}, rewindto timestamp {})",
                self.what,
                opt_to_string(self.stored_time),
                opt_to_string(self.new_time),
                self.rewind_to_time
            )
        }
    }
}

fn opt_to_string(value: Option<u64>) -> String {
    value.map_or_else(|| "nil".to_string(), |v| v.to_string())
}

fn is_fork_block_incompatible(
    stored: Option<BlockNumber>, new: Option<BlockNumber>, head: BlockNumber,
) -> bool {
    (is_block_forked(stored, head) || is_block_forked(new, head))
        && stored != new
}

fn is_fork_timestamp_incompatible(
    stored: Option<u64>, new: Option<u64>, head: u64,
) -> bool {
    (is_timestamp_forked(stored, head) || is_timestamp_forked(new, head))
        && stored != new
}

impl ChainConfig {
    /// Check whether `new` can replace this stored schedule for a chain whose
    /// head is at (`height`, `time`). Returns the incompatibility with the
    /// lowest rewind point.
    pub fn check_compatible(
        &self, new: &ChainConfig, height: BlockNumber, time: u64,
    ) -> Result<(), ConfigCompatError> {
        let (mut head, mut head_time) = (height, time);
        let mut last_err: Option<ConfigCompatError> = None;
        // Each fork is reported at most once while rewinding.
        for _ in 0..COMPAT_CHECKS + 2 {
            let err = match self.scan_compatible(new, head, head_time) {
                None => return settle(last_err),
                Some(err) => err,
            };
            if let Some(last) = &last_err {
                if err.rewind_to_block == last.rewind_to_block
                    && err.rewind_to_time == last.rewind_to_time
                {
                    return settle(last_err);
                }
            }
            trace!("compat scan at ({}, {}) found: {}", head, head_time, err);
            if err.rewind_to_time > 0 {
                head_time = err.rewind_to_time;
            } else {
                head = err.rewind_to_block;
            }
            last_err = Some(err);
        }
        panic!(
            "compatibility check did not settle within {} scans",
            COMPAT_CHECKS + 2
        );
    }

    fn scan_compatible(
        &self, new: &ChainConfig, height: BlockNumber, time: u64,
    ) -> Option<ConfigCompatError> {
        let block = |what, stored, proposed| {
            if is_fork_block_incompatible(stored, proposed, height) {
                Some(ConfigCompatError::new_block(what, stored, proposed))
            } else {
                None
            }
        };
        let timestamp = |what, stored, proposed| {
            if is_fork_timestamp_incompatible(stored, proposed, time) {
                Some(ConfigCompatError::new_timestamp(what, stored, proposed))
            } else {
                None
            }
        };

        block("Homestead fork block", self.homestead_block, new.homestead_block)
            .or_else(|| {
                block("DAO fork block", self.dao_fork_block, new.dao_fork_block)
            })
            .or_else(|| {
                if self.is_dao_fork(height)
                    && self.dao_fork_support != new.dao_fork_support
                {
                    return Some(ConfigCompatError::new_block(
                        "DAO fork support flag",
                        self.dao_fork_block,
                        new.dao_fork_block,
                    ));
                }
                None
            })
            .or_else(|| {
                block("EIP150 fork block", self.eip150_block, new.eip150_block)
            })
            .or_else(|| {
                block("EIP155 fork block", self.eip155_block, new.eip155_block)
            })
            .or_else(|| {
                block("EIP158 fork block", self.eip158_block, new.eip158_block)
            })
            .or_else(|| {
                if self.is_eip158(height) && self.chain_id != new.chain_id {
                    return Some(ConfigCompatError::new_block(
                        "EIP158 chain ID",
                        self.eip158_block,
                        new.eip158_block,
                    ));
                }
                None
            })
            .or_else(|| {
                block(
                    "Byzantium fork block",
                    self.byzantium_block,
                    new.byzantium_block,
                )
            })
            .or_else(|| {
                block(
                    "Constantinople fork block",
                    self.constantinople_block,
                    new.constantinople_block,
                )
            })
            .or_else(|| {
                // Petersburg may be moved into the past only onto
                // Constantinople.
                if is_fork_block_incompatible(
                    self.constantinople_block,
                    new.petersburg_block,
                    height,
                ) {
                    block(
                        "Petersburg fork block",
                        self.petersburg_block,
                        new.petersburg_block,
                    )
                } else {
                    None
                }
            })
            .or_else(|| {
                block(
                    "Istanbul fork block",
                    self.istanbul_block,
                    new.istanbul_block,
                )
            })
            .or_else(|| {
                block(
                    "Muir Glacier fork block",
                    self.muir_glacier_block,
                    new.muir_glacier_block,
                )
            })
            .or_else(|| {
                AvalancheFork::ALL.iter().find_map(|fork| {
                    timestamp(
                        compat_name(*fork),
                        self.avalanche_fork_time(*fork),
                        new.avalanche_fork_time(*fork),
                    )
                })
            })
            .or_else(|| {
                timestamp(
                    "Cancun fork block timestamp",
                    self.cancun_time,
                    new.cancun_time,
                )
            })
    }
}

fn settle(
    last_err: Option<ConfigCompatError>,
) -> Result<(), ConfigCompatError> {
    match last_err {
        Some(err) => {
            warn!("incompatible chain config: {}", err);
            Err(err)
        }
        None => Ok(()),
    }
}

fn compat_name(fork: AvalancheFork) -> &'static str {
    match fork {
        AvalancheFork::ApricotPhase1 => "ApricotPhase1 fork block timestamp",
        AvalancheFork::ApricotPhase2 => "ApricotPhase2 fork block timestamp",
        AvalancheFork::ApricotPhase3 => "ApricotPhase3 fork block timestamp",
        AvalancheFork::ApricotPhase4 => "ApricotPhase4 fork block timestamp",
        AvalancheFork::ApricotPhase5 => "ApricotPhase5 fork block timestamp",
        AvalancheFork::ApricotPhasePre6 => {
            "ApricotPhasePre6 fork block timestamp"
        }
        AvalancheFork::ApricotPhase6 => "ApricotPhase6 fork block timestamp",
        AvalancheFork::ApricotPhasePost6 => {
            "ApricotPhasePost6 fork block timestamp"
        }
        AvalancheFork::Banff => "Banff fork block timestamp",
        AvalancheFork::Cortina => "Cortina fork block timestamp",
        AvalancheFork::Durango => "Durango fork block timestamp",
        AvalancheFork::FeeUpdate1 => "FeeUpdate1 fork block timestamp",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rewind_point() {
        assert_eq!(rewind_point(None, Some(10)), 9);
        assert_eq!(rewind_point(Some(10), None), 9);
        assert_eq!(rewind_point(Some(10), Some(20)), 9);
        assert_eq!(rewind_point(Some(20), Some(10)), 9);
        assert_eq!(rewind_point(Some(0), Some(10)), 0);
        assert_eq!(rewind_point(None, None), 0);
    }

    #[test]
    fn test_display() {
        let err = ConfigCompatError::new_timestamp(
            "Durango fork block timestamp",
            Some(1000),
            None,
        );
        assert_eq!(
            err.to_string(),
            "mismatching Durango fork block timestamp in database (have \
             timestamp 1000, want timestamp nil, rewindto timestamp 999)"
        );

        let err = ConfigCompatError::new_block(
            "Homestead fork block",
            Some(0),
            Some(2),
        );
        assert_eq!(
            err.to_string(),
            "mismatching Homestead fork block in database (have block 0, \
             want block 2, rewindto block 0)"
        );
    }
}
