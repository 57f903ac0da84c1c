// src/services.rs
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;

use crate::error::Result;
use crate::feed::FeedType;

pub const ENV_SERVICES_PATH: &str = "STATUS_SERVICES_PATH";
pub const DEFAULT_SERVICES_PATH: &str = "config/services.toml";

/// One catalog entry: where a service's incident feed lives and the aliases
/// it answers to.
#[derive(Debug, Clone, Deserialize)]
pub struct Service {
    pub name: String,
    pub feed: String,
    #[serde(default)]
    pub feed_type: FeedType,
    #[serde(default)]
    pub aliases: Vec<String>,
}

/// Service catalog loaded from a TOML document mapping keys to services.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct ServiceCatalog {
    services: BTreeMap<String, Service>,
}

impl ServiceCatalog {
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let catalog = toml::from_str(&raw)?;
        Ok(catalog)
    }

    /// Find a service by key or alias, case-insensitively.
    /// Returns the canonical key, never the alias. Unknown queries are a
    /// normal `None`, not an error. If two services ever claimed the same
    /// alias, the first in key order would win.
    pub fn find(&self, query: &str) -> Option<(&str, &Service)> {
        let query = query.to_lowercase();

        if let Some((key, service)) = self.services.get_key_value(&query) {
            return Some((key.as_str(), service));
        }

        for (key, service) in &self.services {
            if service.aliases.iter().any(|a| a.eq_ignore_ascii_case(&query)) {
                return Some((key.as_str(), service));
            }
        }

        None
    }

    /// Canonical service keys, in catalog order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.services.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}

/// Memoizes catalog loads per path for the lifetime of one process run, so
/// repeated lookups against the same file parse it once.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    loaded: HashMap<PathBuf, Arc<ServiceCatalog>>,
}

impl CatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load(&mut self, path: &Path) -> Result<Arc<ServiceCatalog>> {
        if let Some(catalog) = self.loaded.get(path) {
            return Ok(Arc::clone(catalog));
        }
        let catalog = Arc::new(ServiceCatalog::load(path)?);
        self.loaded.insert(path.to_path_buf(), Arc::clone(&catalog));
        Ok(catalog)
    }
}

/// Resolve the catalog path: `$STATUS_SERVICES_PATH`, else the shipped
/// `config/services.toml`.
pub fn default_services_path() -> PathBuf {
    std::env::var(ENV_SERVICES_PATH)
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_SERVICES_PATH))
}
