//! Adapter registry
//!
//! Holds the set of extraction backends for a run. Registration order is
//! preserved and becomes the execution order, so runs are deterministic
//! and the baseline can be registered first.

use crate::adapter::ExtractorAdapter;
use crate::{Error, Result};
use ahash::AHashMap;
use std::sync::Arc;

/// Ordered collection of extraction adapters keyed by name
pub struct AdapterRegistry {
    adapters: Vec<Arc<dyn ExtractorAdapter>>,
    index: AHashMap<String, usize>,
}

impl AdapterRegistry {
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
            index: AHashMap::new(),
        }
    }

    /// Register an adapter under its own name.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Benchmark`] when an adapter with the same
    /// name is already registered.
    pub fn register(&mut self, adapter: Arc<dyn ExtractorAdapter>) -> Result<()> {
        let name = adapter.name().to_string();
        if self.index.contains_key(&name) {
            return Err(Error::Benchmark(format!(
                "adapter '{}' is already registered",
                name
            )));
        }
        self.index.insert(name, self.adapters.len());
        self.adapters.push(adapter);
        Ok(())
    }

    /// Look up an adapter by name
    pub fn get(&self, name: &str) -> Option<&Arc<dyn ExtractorAdapter>> {
        self.index.get(name).map(|&i| &self.adapters[i])
    }

    /// All adapters, in registration order
    pub fn adapters(&self) -> &[Arc<dyn ExtractorAdapter>] {
        &self.adapters
    }

    /// Adapter names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.adapters.len()
    }

    pub fn is_empty(&self) -> bool {
        self.adapters.is_empty()
    }
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new()
    }
}
