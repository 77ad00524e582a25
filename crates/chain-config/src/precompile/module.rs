// Copyright 2019 Conflux Foundation. All rights reserved.
// Conflux is free software and distributed under GNU General Public License.
// See http://www.gnu.org/licenses/

use super::{Accepter, PrecompileError, Predicater};
use jeth_types::Address;
use std::{collections::BTreeMap, fmt, sync::Arc};

/// Optional behaviours a module takes part in besides execution.
#[derive(Clone, Default)]
pub struct ModuleCapabilities {
    pub predicater: Option<Arc<dyn Predicater>>,
    pub accepter: Option<Arc<dyn Accepter>>,
}

impl fmt::Debug for ModuleCapabilities {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("ModuleCapabilities")
            .field("predicater", &self.predicater.is_some())
            .field("accepter", &self.accepter.is_some())
            .finish()
    }
}

/// Descriptor of a stateful precompile module.
#[derive(Clone, Debug)]
pub struct Module {
    /// Key naming the module in upgrade configs.
    pub config_key: String,
    /// Address the module is installed at.
    pub address: Address,
    pub capabilities: ModuleCapabilities,
}

impl Module {
    pub fn new(config_key: &str, address: Address) -> Self {
        Module {
            config_key: config_key.into(),
            address,
            capabilities: ModuleCapabilities::default(),
        }
    }

    pub fn with_predicater(mut self, predicater: Arc<dyn Predicater>) -> Self {
        self.capabilities.predicater = Some(predicater);
        self
    }

    pub fn with_accepter(mut self, accepter: Arc<dyn Accepter>) -> Self {
        self.capabilities.accepter = Some(accepter);
        self
    }
}

/// The set of modules known to the node, ordered by address.
#[derive(Clone, Debug, Default)]
pub struct ModuleRegistry {
    modules: BTreeMap<Address, Module>,
}

impl ModuleRegistry {
    pub fn new() -> Self { Self::default() }

    pub fn register(&mut self, module: Module) -> Result<(), PrecompileError> {
        if self.modules.contains_key(&module.address) {
            return Err(PrecompileError::DuplicateAddress(module.address));
        }
        if self.by_key(&module.config_key).is_some() {
            return Err(PrecompileError::DuplicateKey(module.config_key));
        }
        debug!(
            "register precompile module {} at {:?}",
            module.config_key, module.address
        );
        self.modules.insert(module.address, module);
        Ok(())
    }

    /// Registered modules, in address order.
    pub fn modules(&self) -> impl Iterator<Item = &Module> {
        self.modules.values()
    }

    pub fn by_address(&self, address: &Address) -> Option<&Module> {
        self.modules.get(address)
    }

    pub fn by_key(&self, key: &str) -> Option<&Module> {
        self.modules.values().find(|module| module.config_key == key)
    }

    pub fn len(&self) -> usize { self.modules.len() }

    pub fn is_empty(&self) -> bool { self.modules.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_rejects_duplicates() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Module::new("warpConfig", Address::repeat_byte(2)))
            .unwrap();
        assert_eq!(
            registry.register(Module::new("other", Address::repeat_byte(2))),
            Err(PrecompileError::DuplicateAddress(Address::repeat_byte(2)))
        );
        assert_eq!(
            registry
                .register(Module::new("warpConfig", Address::repeat_byte(3))),
            Err(PrecompileError::DuplicateKey("warpConfig".into()))
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_modules_in_address_order() {
        let mut registry = ModuleRegistry::new();
        registry
            .register(Module::new("b", Address::repeat_byte(9)))
            .unwrap();
        registry
            .register(Module::new("a", Address::repeat_byte(1)))
            .unwrap();
        let keys: Vec<_> =
            registry.modules().map(|m| m.config_key.as_str()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(
            registry.by_key("b").map(|m| m.address),
            Some(Address::repeat_byte(9))
        );
    }
}
