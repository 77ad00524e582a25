// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use crate::{
    chain_config::ChainConfig,
    error::{ConfigError, Result},
    fork::{AvalancheFork, Fork, ForkTrigger},
};

impl ChainConfig {
    /// Ethereum forks in activation order.
    pub fn eth_forks(&self) -> Vec<Fork> {
        vec![
            Fork::block("homesteadBlock", self.homestead_block),
            Fork::block("daoForkBlock", self.dao_fork_block).optional(),
            Fork::block("eip150Block", self.eip150_block),
            Fork::block("eip155Block", self.eip155_block),
            Fork::block("eip158Block", self.eip158_block),
            Fork::block("byzantiumBlock", self.byzantium_block),
            Fork::block("constantinopleBlock", self.constantinople_block),
            Fork::block("petersburgBlock", self.petersburg_block),
            Fork::block("istanbulBlock", self.istanbul_block),
            Fork::block("muirGlacierBlock", self.muir_glacier_block)
                .optional(),
            Fork::timestamp("cancunTime", self.cancun_time),
        ]
    }

    /// Network upgrades in activation order.
    pub fn avalanche_forks(&self) -> Vec<Fork> {
        AvalancheFork::ALL
            .iter()
            .map(|fork| {
                Fork::timestamp(fork.field_name(), self.avalanche_fork_time(*fork))
            })
            .collect()
    }

    /// Check that no fork is skipped and that forks activate in order.
    ///
    /// Ethereum forks scheduled by block must activate at genesis. Network
    /// upgrades are only checked for ordering: blocks are produced
    /// asynchronously so their timestamps carry no further constraint.
    pub fn check_config_fork_order(&self) -> Result<()> {
        check_forks(&self.eth_forks(), true)?;
        check_forks(&self.avalanche_forks(), false)
    }
}

fn check_forks(forks: &[Fork], genesis_only: bool) -> Result<()> {
    let mut last: Option<&Fork> = None;
    for cur in forks {
        if let Some(ForkTrigger::Block(block)) = cur.trigger {
            if genesis_only && block != 0 {
                return Err(ConfigError::NonGenesisForkByHeight {
                    name: cur.name,
                    block,
                });
            }
        }
        if let Some(last) = last {
            match (last.trigger, cur.trigger) {
                (None, Some(trigger)) => {
                    return Err(ConfigError::MissingFork {
                        previous: last.name,
                        current: cur.name,
                        trigger,
                    });
                }
                (
                    Some(ForkTrigger::Block(previous)),
                    Some(ForkTrigger::Block(current)),
                ) if previous > current => {
                    return Err(out_of_order(last, cur));
                }
                (
                    Some(ForkTrigger::Timestamp(previous)),
                    Some(ForkTrigger::Timestamp(current)),
                ) if previous > current => {
                    return Err(out_of_order(last, cur));
                }
                (
                    Some(ForkTrigger::Timestamp(_)),
                    Some(ForkTrigger::Block(_)),
                ) => {
                    return Err(ConfigError::OrderingReverted {
                        previous: last.name,
                        current: cur.name,
                    });
                }
                _ => {}
            }
        }
        // An unscheduled optional fork does not reset the ordering.
        if !cur.optional || cur.trigger.is_some() {
            last = Some(cur);
        }
    }
    Ok(())
}

fn out_of_order(last: &Fork, cur: &Fork) -> ConfigError {
    match (last.trigger, cur.trigger) {
        (Some(previous_trigger), Some(current_trigger)) => {
            ConfigError::OutOfOrder {
                previous: last.name,
                previous_trigger,
                current: cur.name,
                current_trigger,
            }
        }
        _ => unreachable!("both forks are scheduled"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reversed() -> Vec<Fork> {
        vec![
            Fork::block("a", Some(0)),
            Fork::timestamp("b", Some(5)),
            Fork::block("c", Some(0)),
        ]
    }

    #[test]
    fn test_block_after_timestamp_rejected() {
        match check_forks(&reversed(), true) {
            Err(ConfigError::OrderingReverted { previous, current }) => {
                assert_eq!(previous, "b");
                assert_eq!(current, "c");
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_optional_gap_allowed() {
        let forks = vec![
            Fork::timestamp("a", Some(1)),
            Fork::timestamp("b", None).optional(),
            Fork::timestamp("c", Some(2)),
        ];
        assert!(check_forks(&forks, false).is_ok());

        let forks = vec![
            Fork::timestamp("a", Some(3)),
            Fork::timestamp("b", None).optional(),
            Fork::timestamp("c", Some(2)),
        ];
        let err = check_forks(&forks, false).unwrap_err();
        assert_eq!(
            err.to_string(),
            "unsupported fork ordering: a enabled at timestamp 3, but c \
             enabled at timestamp 2"
        );
    }

    #[test]
    fn test_non_genesis_block_fork() {
        let forks = vec![Fork::block("a", Some(0)), Fork::block("b", Some(4))];
        assert!(matches!(
            check_forks(&forks, true),
            Err(ConfigError::NonGenesisForkByHeight { name: "b", block: 4 })
        ));
        assert!(check_forks(&forks, false).is_ok());
    }
}
