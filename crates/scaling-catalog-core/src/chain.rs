//! Chain registry: a fixed, bidirectional name <-> chain id table.
//!
//! Built once from a static list and never mutated afterwards, so a shared
//! reference can be read from any number of threads.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::{CoreError, Result};
use crate::types::ChainId;

/// A known chain, identified both by name and by numeric id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChainDescriptor {
    pub name: String,
    pub chain_id: ChainId,
}

impl ChainDescriptor {
    pub fn new(name: impl Into<String>, chain_id: ChainId) -> Self {
        Self {
            name: name.into(),
            chain_id,
        }
    }
}

/// Bidirectional chain table.
#[derive(Debug, Clone, Default)]
pub struct ChainRegistry {
    /// Descriptors in the order they were supplied.
    chains: Vec<ChainDescriptor>,
    by_name: HashMap<String, ChainId>,
    by_id: HashMap<ChainId, String>,
}

impl ChainRegistry {
    /// Build the table.
    ///
    /// Fails with [`CoreError::DuplicateChainName`] if two descriptors share
    /// a name or a chain id.
    pub fn build(descriptors: impl IntoIterator<Item = ChainDescriptor>) -> Result<Self> {
        let mut registry = Self::default();

        for descriptor in descriptors {
            if registry.by_name.contains_key(&descriptor.name)
                || registry.by_id.contains_key(&descriptor.chain_id)
            {
                return Err(CoreError::DuplicateChainName {
                    name: descriptor.name,
                    chain_id: descriptor.chain_id,
                });
            }
            registry
                .by_name
                .insert(descriptor.name.clone(), descriptor.chain_id);
            registry
                .by_id
                .insert(descriptor.chain_id, descriptor.name.clone());
            registry.chains.push(descriptor);
        }

        Ok(registry)
    }

    /// Resolve a chain name to its id.
    pub fn to_chain_id(&self, name: &str) -> Result<ChainId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| CoreError::UnknownChain(name.to_string()))
    }

    /// Resolve a chain id to its name.
    pub fn to_chain_name(&self, chain_id: ChainId) -> Result<&str> {
        self.by_id
            .get(&chain_id)
            .map(String::as_str)
            .ok_or_else(|| CoreError::UnknownChain(chain_id.to_string()))
    }

    pub fn contains_id(&self, chain_id: ChainId) -> bool {
        self.by_id.contains_key(&chain_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChainDescriptor> {
        self.chains.iter()
    }

    pub fn len(&self) -> usize {
        self.chains.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chains.is_empty()
    }
}
