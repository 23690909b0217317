//! Installable integration catalog
//!
//! The catalog ships embedded in the binary: integration name to GitHub
//! repository, supported providers, and a one-line description.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::config::Provider;

const CATALOG_JSON: &str = include_str!("../integrations.json");

/// One installable integration
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogEntry {
    /// GitHub repository holding the integration's releases.
    pub github: String,

    /// Providers the package ships code for.
    pub providers: Vec<Provider>,

    pub description: String,
}

static CATALOG: LazyLock<BTreeMap<String, CatalogEntry>> = LazyLock::new(|| {
    serde_json::from_str(CATALOG_JSON).expect("embedded integrations.json is valid")
});

/// The full catalog, ordered by name.
pub fn all() -> &'static BTreeMap<String, CatalogEntry> {
    &CATALOG
}

/// Look up an integration by name.
pub fn get(name: &str) -> Option<&'static CatalogEntry> {
    CATALOG.get(name)
}
