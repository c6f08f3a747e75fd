//! Static provider registry and dependency expansion.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::error::QueueError;

/// A named external data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    /// Unique provider name.
    pub name: String,
    /// Endpoint for the fetcher; not read by the queue.
    pub base_url: String,
    /// Providers that must be fetched first, in order.
    #[serde(default)]
    pub depends_on: Vec<String>,
}

impl Provider {
    /// Build a provider record.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        base_url: impl Into<String>,
        depends_on: &[&str],
    ) -> Self {
        Self {
            name: name.into(),
            base_url: base_url.into(),
            depends_on: depends_on.iter().map(|d| (*d).to_string()).collect(),
        }
    }
}

/// Read-only set of known providers, keyed by name.
#[derive(Debug, Clone)]
pub struct ProviderRegistry {
    providers: Vec<Provider>,
    index: HashMap<String, usize>,
}

impl ProviderRegistry {
    /// Build a registry, rejecting duplicate names and dependency cycles.
    pub fn new(providers: Vec<Provider>) -> Result<Self, QueueError> {
        let mut index = HashMap::with_capacity(providers.len());
        for (pos, provider) in providers.iter().enumerate() {
            if index.insert(provider.name.clone(), pos).is_some() {
                return Err(QueueError::InvalidProviderGraph(format!(
                    "provider `{}` registered twice",
                    provider.name
                )));
            }
        }
        let registry = Self { providers, index };
        for provider in &registry.providers {
            registry.dependency_closure(&provider.name)?;
        }
        Ok(registry)
    }

    /// The providers wired into the production pipeline.
    #[must_use]
    pub fn default_registry() -> Self {
        let providers = vec![
            Provider::new("bank_statements", "https://fake.bankstatements.co.uk", &[]),
            Provider::new("companies_house", "https://fake.companieshouse.co.uk", &[]),
            Provider::new(
                "credit_check",
                "https://fake.creditcheck.co.uk",
                &["companies_house"],
            ),
            Provider::new("id_verification", "https://fake.idv.co.uk", &[]),
        ];
        Self::new_unchecked(providers)
    }

    /// Build without graph validation.
    pub(crate) fn new_unchecked(providers: Vec<Provider>) -> Self {
        let index = providers
            .iter()
            .enumerate()
            .map(|(pos, p)| (p.name.clone(), pos))
            .collect();
        Self { providers, index }
    }

    /// Look up a provider by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Provider> {
        self.index.get(name).map(|&pos| &self.providers[pos])
    }

    /// Whether `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// All providers in registration order.
    #[must_use]
    pub fn providers(&self) -> &[Provider] {
        &self.providers
    }

    /// Transitive dependencies of `name`, deepest first.
    ///
    /// For each direct dependency its own closure is emitted before it, so the
    /// result is in the order the fetches must run. Shared dependencies appear
    /// once per path; the queue's merge step collapses them. Unknown names have
    /// no dependencies.
    pub fn dependency_closure(&self, name: &str) -> Result<Vec<String>, QueueError> {
        let mut closure = Vec::new();
        let mut path = Vec::new();
        let mut on_path = HashSet::new();
        self.collect(name, &mut path, &mut on_path, &mut closure)?;
        Ok(closure)
    }

    fn collect<'a>(
        &'a self,
        name: &'a str,
        path: &mut Vec<&'a str>,
        on_path: &mut HashSet<&'a str>,
        out: &mut Vec<String>,
    ) -> Result<(), QueueError> {
        let Some(provider) = self.get(name) else {
            return Ok(());
        };
        path.push(name);
        on_path.insert(name);
        for dep in &provider.depends_on {
            if on_path.contains(dep.as_str()) {
                let mut cycle = path.join(" -> ");
                cycle.push_str(" -> ");
                cycle.push_str(dep);
                return Err(QueueError::InvalidProviderGraph(format!(
                    "dependency cycle: {cycle}"
                )));
            }
            self.collect(dep, path, on_path, out)?;
            out.push(dep.clone());
        }
        on_path.remove(name);
        path.pop();
        Ok(())
    }
}

impl Default for ProviderRegistry {
    fn default() -> Self {
        Self::default_registry()
    }
}
