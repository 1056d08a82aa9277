/// Immutable registry of scopes keyed by name

use indexmap::IndexMap;
use tracing::debug;

use super::types::{DefaultScopes, Scope};
use crate::error::{RbacError, Result};

/// Registry of the scopes known to one RBAC instance
///
/// The registry is never empty. Its lowest-weight scope is the default
/// requested scope for queries that do not name one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeRegistry {
    /// Scopes in registration order
    scopes: IndexMap<String, Scope>,

    /// Index of the lowest-weight scope (first registered wins ties)
    lowest: usize,
}

impl ScopeRegistry {
    /// Creates a registry from an optional explicit scope list
    ///
    /// `None` installs [`DefaultScopes`].
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Configuration`] if the explicit list is empty or
    /// names a scope twice.
    pub fn new(scopes: Option<Vec<Scope>>) -> Result<Self> {
        match scopes {
            Some(scopes) => Self::from_scopes(scopes),
            None => Ok(Self::with_defaults()),
        }
    }

    /// Creates a registry holding the default four-tier scopes
    pub fn with_defaults() -> Self {
        Self::build(DefaultScopes::new().into_vec())
    }

    /// Creates a registry from an explicit, non-empty scope list
    pub fn from_scopes(scopes: Vec<Scope>) -> Result<Self> {
        if scopes.is_empty() {
            return Err(RbacError::Configuration(
                "at least one scope must be given; omit the scope list to use the default scopes"
                    .to_string(),
            ));
        }

        let mut seen = std::collections::HashSet::new();
        for scope in &scopes {
            if !seen.insert(scope.name.as_str()) {
                return Err(RbacError::Configuration(format!(
                    "scope '{}' is defined more than once",
                    scope.name
                )));
            }
        }

        Ok(Self::build(scopes))
    }

    fn build(scopes: Vec<Scope>) -> Self {
        let mut lowest = 0;
        for (idx, scope) in scopes.iter().enumerate() {
            if scope.weight < scopes[lowest].weight {
                lowest = idx;
            }
        }

        let scopes: IndexMap<String, Scope> = scopes
            .into_iter()
            .map(|scope| (scope.name.clone(), scope))
            .collect();

        debug!(
            "Scope registry built with {} scopes, lowest={}",
            scopes.len(),
            scopes[lowest].name
        );

        Self { scopes, lowest }
    }

    /// Looks up a scope by name
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::NotFound`] for an unregistered name.
    pub fn get(&self, name: &str) -> Result<&Scope> {
        self.scopes
            .get(name)
            .ok_or_else(|| RbacError::unknown_scope(name))
    }

    /// Returns true if a scope with this name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.scopes.contains_key(name)
    }

    /// The lowest-weight registered scope
    pub fn lowest(&self) -> &Scope {
        &self.scopes[self.lowest]
    }

    /// Iterates over the registered scopes
    pub fn iter(&self) -> impl Iterator<Item = &Scope> {
        self.scopes.values()
    }

    /// Number of registered scopes
    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    /// Always false; a registry holds at least one scope
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}

impl Default for ScopeRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
