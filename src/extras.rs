use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::persist::write_pretty_json;

/// Locally curated per-member fields, keyed by normalized tag. Entries are
/// created on first sight of a tag and never deleted by this pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtrasEntry {
    pub note: String,
    pub profile_url: String,
    pub address: String,
    pub date_joined: String,
}

impl ExtrasEntry {
    /// Fresh entry for a member seen for the first time this run.
    pub fn provisioned(now: &str) -> Self {
        Self {
            date_joined: now.to_string(),
            ..Self::default()
        }
    }
}

pub type ExtrasMap = BTreeMap<String, ExtrasEntry>;

/// Load the extras file; a missing file is an empty map, not an error.
pub fn load_extras(path: &Path) -> Result<ExtrasMap> {
    if !path.exists() {
        return Ok(ExtrasMap::new());
    }
    let raw = fs::read_to_string(path)
        .with_context(|| format!("failed reading {}", path.display()))?;
    serde_json::from_str(&raw).with_context(|| format!("invalid extras json in {}", path.display()))
}

pub fn save_extras(path: &Path, extras: &ExtrasMap) -> Result<()> {
    write_pretty_json(path, extras)
}
