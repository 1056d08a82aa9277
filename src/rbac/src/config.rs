//! File-backed RBAC configuration
//!
//! Loads scopes and compact role definitions from TOML or JSON:
//!
//! ```toml
//! scopes = [
//!     { name = "self", weight = 1 },
//!     { name = "org", weight = 3 },
//! ]
//!
//! [roles]
//! admin = "viewer;deleteImage:org"
//! viewer = ";getImage:self"
//! ```
//!
//! Omitting `scopes` installs the default four-tier scope set.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::error::{RbacError, Result};
use crate::rbac::Rbac;
use crate::scope::Scope;

/// Scopes and role definitions for one RBAC instance
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RbacConfig {
    /// Explicit scopes; `None` means the default scopes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scopes: Option<Vec<Scope>>,

    /// Role name to `"<inherits-csv>;<action:scope-csv>"`, in file order
    #[serde(default)]
    pub roles: IndexMap<String, String>,
}

impl RbacConfig {
    /// Load from a file, JSON for a `.json` extension and TOML otherwise
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));

        debug!("Loading RBAC configuration from {}", path.display());

        if is_json {
            Self::from_json_str(&content)
        } else {
            Self::from_toml_str(&content)
        }
    }

    /// Parse TOML configuration
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| RbacError::Config(e.to_string()))
    }

    /// Parse JSON configuration
    pub fn from_json_str(content: &str) -> Result<Self> {
        serde_json::from_str(content).map_err(|e| RbacError::Config(e.to_string()))
    }

    /// Build the RBAC instance described by this configuration
    pub fn into_rbac(self) -> Result<Rbac> {
        Rbac::from_definitions(self.roles, self.scopes)
    }
}
