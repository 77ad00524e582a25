// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use jeth_types::BlockNumber;
use std::fmt;

/// Whether a fork scheduled at block `trigger` is active at block `number`.
/// An unscheduled fork never activates.
pub fn is_block_forked(trigger: Option<BlockNumber>, number: BlockNumber) -> bool {
    matches!(trigger, Some(trigger) if trigger <= number)
}

/// Whether a fork scheduled at `trigger` is active at timestamp `time`.
pub fn is_timestamp_forked(trigger: Option<u64>, time: u64) -> bool {
    matches!(trigger, Some(trigger) if trigger <= time)
}

/// Activation point of a fork.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ForkTrigger {
    Block(BlockNumber),
    Timestamp(u64),
}

impl fmt::Display for ForkTrigger {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ForkTrigger::Block(number) => write!(f, "block {}", number),
            ForkTrigger::Timestamp(time) => write!(f, "timestamp {}", time),
        }
    }
}

/// One entry of the fork schedule, as walked by the fork order check.
#[derive(Clone, Copy, Debug)]
pub struct Fork {
    pub name: &'static str,
    pub trigger: Option<ForkTrigger>,
    /// An optional fork may be left unscheduled without blocking the forks
    /// after it.
    pub optional: bool,
}

impl Fork {
    pub fn block(name: &'static str, block: Option<BlockNumber>) -> Self {
        Fork {
            name,
            trigger: block.map(ForkTrigger::Block),
            optional: false,
        }
    }

    pub fn timestamp(name: &'static str, time: Option<u64>) -> Self {
        Fork {
            name,
            trigger: time.map(ForkTrigger::Timestamp),
            optional: false,
        }
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self
    }
}

/// Timestamp based network upgrades, in activation order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AvalancheFork {
    ApricotPhase1,
    ApricotPhase2,
    ApricotPhase3,
    ApricotPhase4,
    ApricotPhase5,
    ApricotPhasePre6,
    ApricotPhase6,
    ApricotPhasePost6,
    Banff,
    Cortina,
    Durango,
    FeeUpdate1,
}

impl AvalancheFork {
    pub const ALL: [AvalancheFork; 12] = [
        AvalancheFork::ApricotPhase1,
        AvalancheFork::ApricotPhase2,
        AvalancheFork::ApricotPhase3,
        AvalancheFork::ApricotPhase4,
        AvalancheFork::ApricotPhase5,
        AvalancheFork::ApricotPhasePre6,
        AvalancheFork::ApricotPhase6,
        AvalancheFork::ApricotPhasePost6,
        AvalancheFork::Banff,
        AvalancheFork::Cortina,
        AvalancheFork::Durango,
        AvalancheFork::FeeUpdate1,
    ];

    /// Name of the schedule field holding this upgrade.
    pub fn field_name(&self) -> &'static str {
        match self {
            AvalancheFork::ApricotPhase1 => "apricotPhase1BlockTimestamp",
            AvalancheFork::ApricotPhase2 => "apricotPhase2BlockTimestamp",
            AvalancheFork::ApricotPhase3 => "apricotPhase3BlockTimestamp",
            AvalancheFork::ApricotPhase4 => "apricotPhase4BlockTimestamp",
            AvalancheFork::ApricotPhase5 => "apricotPhase5BlockTimestamp",
            AvalancheFork::ApricotPhasePre6 => {
                "apricotPhasePre6BlockTimestamp"
            }
            AvalancheFork::ApricotPhase6 => "apricotPhase6BlockTimestamp",
            AvalancheFork::ApricotPhasePost6 => {
                "apricotPhasePost6BlockTimestamp"
            }
            AvalancheFork::Banff => "banffBlockTimestamp",
            AvalancheFork::Cortina => "cortinaBlockTimestamp",
            AvalancheFork::Durango => "durangoBlockTimestamp",
            AvalancheFork::FeeUpdate1 => "feeUpdate1BlockTimestamp",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_forked_predicates() {
        assert!(!is_block_forked(None, 0));
        assert!(!is_block_forked(None, u64::MAX));
        assert!(is_block_forked(Some(0), 0));
        assert!(!is_block_forked(Some(10), 9));
        assert!(is_block_forked(Some(10), 10));

        assert!(!is_timestamp_forked(None, 1_000));
        assert!(!is_timestamp_forked(Some(1_000), 999));
        assert!(is_timestamp_forked(Some(1_000), 1_000));
        assert!(is_timestamp_forked(Some(1_000), 1_001));
    }

    #[test]
    fn test_trigger_display() {
        assert_eq!(ForkTrigger::Block(7).to_string(), "block 7");
        assert_eq!(ForkTrigger::Timestamp(9).to_string(), "timestamp 9");
    }
}
