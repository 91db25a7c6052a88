//! Seed data configuration

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Where the initial organisation comes from
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SeedConfig {
    /// YAML seed file; the embedded demo seed is used when unset
    pub path: Option<PathBuf>,
}

impl SeedConfig {
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}
