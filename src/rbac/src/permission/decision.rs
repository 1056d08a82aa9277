//! Permission decision types

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{RbacError, Result};
use crate::role::Action;

/// Verdict for a single scope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScopeVerdict {
    /// Whether access at this scope is implied by the granted scope
    pub granted: bool,
}

/// Result of evaluating one action query
///
/// Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permission {
    /// Evaluated action: the effective scope when granted, the requested one otherwise
    action: Action,

    /// Whether the requested action is granted
    granted: bool,

    /// Per-scope verdicts, one entry per registered scope
    scopes: IndexMap<String, bool>,
}

impl Permission {
    pub(crate) fn new(action: Action, granted: bool, scopes: IndexMap<String, bool>) -> Self {
        Self {
            action,
            granted,
            scopes,
        }
    }

    /// The evaluated action
    pub fn action(&self) -> &Action {
        &self.action
    }

    /// Whether the requested action is granted
    pub fn is_granted(&self) -> bool {
        self.granted
    }

    /// Verdict for the scope named `scope`
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::NotFound`] if the scope is not registered.
    pub fn scope(&self, scope: &str) -> Result<ScopeVerdict> {
        self.scopes
            .get(scope)
            .map(|granted| ScopeVerdict { granted: *granted })
            .ok_or_else(|| RbacError::unknown_scope(scope))
    }

    /// Iterate over `(scope name, granted)` pairs in registry order
    pub fn scopes(&self) -> impl Iterator<Item = (&str, bool)> {
        self.scopes.iter().map(|(name, granted)| (name.as_str(), *granted))
    }
}
