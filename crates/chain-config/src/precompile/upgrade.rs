// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{ModuleRegistry, PrecompileConfig, PrecompileError};
use crate::{
    chain_config::{check_json_len, ChainConfig},
    error::Result,
    fork::is_timestamp_forked,
};
use jeth_types::Address;
use serde_derive::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::{collections::BTreeMap, convert::TryFrom};

type UpgradeRepr = BTreeMap<String, Map<String, Value>>;

/// A precompile upgrade, written as a single key object naming the module:
/// `{"<key>": {"blockTimestamp": 10, "disable": false, ...params}}`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "UpgradeRepr", into = "UpgradeRepr")]
pub struct PrecompileUpgrade {
    pub config: PrecompileConfig,
}

impl From<PrecompileConfig> for PrecompileUpgrade {
    fn from(config: PrecompileConfig) -> Self { PrecompileUpgrade { config } }
}

impl TryFrom<UpgradeRepr> for PrecompileUpgrade {
    type Error = PrecompileError;

    fn try_from(repr: UpgradeRepr) -> std::result::Result<Self, Self::Error> {
        if repr.len() != 1 {
            return Err(PrecompileError::InvalidUpgrade(format!(
                "expected exactly one module key, found {}",
                repr.len()
            )));
        }
        let (key, mut params) = repr.into_iter().next().ok_or_else(|| {
            PrecompileError::InvalidUpgrade("empty upgrade".into())
        })?;
        let block_timestamp = match params.remove("blockTimestamp") {
            None | Some(Value::Null) => None,
            Some(value) => Some(value.as_u64().ok_or_else(|| {
                PrecompileError::InvalidUpgrade(format!(
                    "blockTimestamp of {} is not a timestamp",
                    key
                ))
            })?),
        };
        let disable = match params.remove("disable") {
            None | Some(Value::Null) => false,
            Some(value) => value.as_bool().ok_or_else(|| {
                PrecompileError::InvalidUpgrade(format!(
                    "disable of {} is not a boolean",
                    key
                ))
            })?,
        };
        Ok(PrecompileUpgrade {
            config: PrecompileConfig {
                key,
                block_timestamp,
                disable,
                params,
            },
        })
    }
}

impl From<PrecompileUpgrade> for UpgradeRepr {
    fn from(upgrade: PrecompileUpgrade) -> Self {
        let PrecompileConfig {
            key,
            block_timestamp,
            disable,
            mut params,
        } = upgrade.config;
        if let Some(time) = block_timestamp {
            params.insert("blockTimestamp".into(), time.into());
        }
        if disable {
            params.insert("disable".into(), true.into());
        }
        let mut repr = UpgradeRepr::new();
        repr.insert(key, params);
        repr
    }
}

/// Upgrades supplied next to the persisted schedule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeConfig {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub precompile_upgrades: Vec<PrecompileUpgrade>,
}

impl UpgradeConfig {
    pub fn from_json(bytes: &[u8]) -> Result<Self> {
        check_json_len(bytes)?;
        Ok(serde_json::from_slice(bytes)?)
    }

    /// Check the upgrades are consistent with each other and with the
    /// modules in `registry`.
    pub fn verify(
        &self, registry: &ModuleRegistry,
    ) -> std::result::Result<(), PrecompileError> {
        let mut last_timestamp = 0u64;
        let mut last_by_key: BTreeMap<&str, (u64, bool)> = BTreeMap::new();
        for upgrade in &self.precompile_upgrades {
            let config = &upgrade.config;
            let key = config.key.as_str();
            if registry.by_key(key).is_none() {
                return Err(PrecompileError::UnknownKey(key.into()));
            }
            let timestamp = config
                .block_timestamp
                .ok_or_else(|| PrecompileError::MissingTimestamp(key.into()))?;
            if timestamp < last_timestamp {
                return Err(PrecompileError::TimestampDecreased {
                    key: key.into(),
                    timestamp,
                    previous: last_timestamp,
                });
            }
            match last_by_key.get(key) {
                None if config.disable => {
                    return Err(PrecompileError::FirstUpgradeDisables(
                        key.into(),
                    ));
                }
                Some((previous, _)) if *previous >= timestamp => {
                    return Err(PrecompileError::TimestampNotIncreasing {
                        key: key.into(),
                        timestamp,
                        previous: *previous,
                    });
                }
                Some((_, disabled)) if *disabled == config.disable => {
                    return Err(PrecompileError::RepeatedToggle {
                        key: key.into(),
                        disable: config.disable,
                    });
                }
                _ => {}
            }
            last_by_key.insert(key, (timestamp, config.disable));
            last_timestamp = timestamp;
        }
        Ok(())
    }
}

impl ChainConfig {
    /// Check the schedule and its upgrades against the known modules.
    pub fn verify(&self, registry: &ModuleRegistry) -> Result<()> {
        self.upgrade.verify(registry)?;
        Ok(())
    }

    /// The latest upgrade of the module at `address` activated at
    /// `timestamp`, disabling upgrades included.
    pub fn active_precompile_config(
        &self, address: &Address, timestamp: u64, registry: &ModuleRegistry,
    ) -> Option<&PrecompileConfig> {
        let module = registry.by_address(address)?;
        self.upgrade
            .precompile_upgrades
            .iter()
            .map(|upgrade| &upgrade.config)
            .filter(|config| {
                config.key == module.config_key
                    && is_timestamp_forked(config.block_timestamp, timestamp)
            })
            .last()
    }

    pub fn is_precompile_enabled(
        &self, address: &Address, timestamp: u64, registry: &ModuleRegistry,
    ) -> bool {
        matches!(
            self.active_precompile_config(address, timestamp, registry),
            Some(config) if !config.is_disabled()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::precompile::Module;
    use serde_json::json;

    fn registry() -> ModuleRegistry {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Module::new("warpConfig", Address::repeat_byte(2)))
            .unwrap();
        registry
            .register(Module::new("feeManagerConfig", Address::repeat_byte(3)))
            .unwrap();
        registry
    }

    fn upgrades(configs: Vec<PrecompileConfig>) -> UpgradeConfig {
        UpgradeConfig {
            precompile_upgrades: configs.into_iter().map(Into::into).collect(),
        }
    }

    #[test]
    fn test_upgrade_json_layout() {
        let raw = json!({
            "precompileUpgrades": [
                {"warpConfig": {"blockTimestamp": 10, "quorumNumerator": 67}},
                {"warpConfig": {"blockTimestamp": 20, "disable": true}}
            ]
        });
        let config: UpgradeConfig = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(
            config,
            upgrades(vec![
                PrecompileConfig::new("warpConfig", 10)
                    .with_param("quorumNumerator", json!(67)),
                PrecompileConfig::disabled("warpConfig", 20),
            ])
        );
        assert_eq!(serde_json::to_value(&config).unwrap(), raw);
    }

    #[test]
    fn test_upgrade_needs_single_key() {
        let raw = json!({"precompileUpgrades": [{"a": {}, "b": {}}]});
        assert!(serde_json::from_value::<UpgradeConfig>(raw).is_err());
    }

    #[test]
    fn test_verify() {
        let registry = registry();
        let ok = upgrades(vec![
            PrecompileConfig::new("warpConfig", 10),
            PrecompileConfig::new("feeManagerConfig", 10),
            PrecompileConfig::disabled("warpConfig", 20),
            PrecompileConfig::new("warpConfig", 30),
        ]);
        assert_eq!(ok.verify(&registry), Ok(()));

        let cases = vec![
            (
                vec![PrecompileConfig::new("unknown", 1)],
                PrecompileError::UnknownKey("unknown".into()),
            ),
            (
                vec![PrecompileConfig::disabled("warpConfig", 1)],
                PrecompileError::FirstUpgradeDisables("warpConfig".into()),
            ),
            (
                vec![
                    PrecompileConfig::new("warpConfig", 5),
                    PrecompileConfig::new("feeManagerConfig", 4),
                ],
                PrecompileError::TimestampDecreased {
                    key: "feeManagerConfig".into(),
                    timestamp: 4,
                    previous: 5,
                },
            ),
            (
                vec![
                    PrecompileConfig::new("warpConfig", 5),
                    PrecompileConfig::disabled("warpConfig", 5),
                ],
                PrecompileError::TimestampNotIncreasing {
                    key: "warpConfig".into(),
                    timestamp: 5,
                    previous: 5,
                },
            ),
            (
                vec![
                    PrecompileConfig::new("warpConfig", 5),
                    PrecompileConfig::new("warpConfig", 6),
                ],
                PrecompileError::RepeatedToggle {
                    key: "warpConfig".into(),
                    disable: false,
                },
            ),
        ];
        for (configs, expected) in cases {
            assert_eq!(upgrades(configs).verify(&registry), Err(expected));
        }

        let mut missing = PrecompileConfig::new("warpConfig", 0);
        missing.block_timestamp = None;
        assert_eq!(
            upgrades(vec![missing]).verify(&registry),
            Err(PrecompileError::MissingTimestamp("warpConfig".into()))
        );
    }

    #[test]
    fn test_active_config() {
        let registry = registry();
        let mut config = ChainConfig::test_config();
        config.upgrade = upgrades(vec![
            PrecompileConfig::new("warpConfig", 10),
            PrecompileConfig::disabled("warpConfig", 20),
        ]);
        let warp = Address::repeat_byte(2);

        assert!(config.active_precompile_config(&warp, 9, &registry).is_none());
        assert!(config.is_precompile_enabled(&warp, 10, &registry));
        assert!(config.is_precompile_enabled(&warp, 19, &registry));
        assert!(config
            .active_precompile_config(&warp, 20, &registry)
            .map_or(false, |c| c.is_disabled()));
        assert!(!config.is_precompile_enabled(&warp, 20, &registry));
        assert!(!config.is_precompile_enabled(
            &Address::repeat_byte(7),
            20,
            &registry
        ));
    }
}
