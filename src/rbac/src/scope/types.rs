/// Scope type definitions
///
/// Provides the weighted `Scope` value, the "no scope" sentinel and the
/// default four-tier scope configuration.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Name of the sentinel scope used when no scope applies
pub const NO_SCOPE_NAME: &str = "no_scope";

/// Weight of the sentinel scope, lower than any registered scope
pub const NO_SCOPE_WEIGHT: i32 = -1;

/// A named access breadth
///
/// Higher weight means broader access. Scope `a` subsumes scope `b` when
/// `a.weight >= b.weight`.
///
/// # Examples
///
/// ```
/// use cretoai_rbac::scope::Scope;
///
/// let team = Scope::new("team", 2);
/// let tenant = Scope::new("tenant", 5);
///
/// assert!(tenant.subsumes(&team));
/// assert!(!team.subsumes(&tenant));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Scope {
    /// Scope identifier, unique within a registry
    pub name: String,

    /// Position in the total order of scopes
    pub weight: i32,
}

impl Scope {
    /// Creates a new scope
    pub fn new(name: impl Into<String>, weight: i32) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }

    /// The "not applicable" sentinel, weighted below every registered scope
    pub fn none() -> Self {
        Self::new(NO_SCOPE_NAME, NO_SCOPE_WEIGHT)
    }

    /// Returns true if this is the sentinel scope
    pub fn is_none(&self) -> bool {
        self.name == NO_SCOPE_NAME && self.weight == NO_SCOPE_WEIGHT
    }

    /// Returns true if access at this scope implies access at `other`
    pub fn subsumes(&self, other: &Scope) -> bool {
        self.weight >= other.weight
    }
}

impl fmt::Display for Scope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.weight)
    }
}

/// The default four-tier scope configuration
///
/// `self`(1) < `group`(2) < `org`(3) < `all`(4). Registries only install these
/// when the caller asks for them, see [`ScopeRegistry::with_defaults`].
///
/// [`ScopeRegistry::with_defaults`]: super::ScopeRegistry::with_defaults
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultScopes {
    self_scope: Scope,
    group: Scope,
    org: Scope,
    all: Scope,
}

impl DefaultScopes {
    /// Builds the default scope tiers
    pub fn new() -> Self {
        Self {
            self_scope: Scope::new("self", 1),
            group: Scope::new("group", 2),
            org: Scope::new("org", 3),
            all: Scope::new("all", 4),
        }
    }

    /// The narrowest tier: resources owned by the subject itself
    pub fn self_scope(&self) -> &Scope {
        &self.self_scope
    }

    /// Resources owned by one of the subject's groups
    pub fn group(&self) -> &Scope {
        &self.group
    }

    /// Resources owned by the subject's organization
    pub fn org(&self) -> &Scope {
        &self.org
    }

    /// Every resource
    pub fn all(&self) -> &Scope {
        &self.all
    }

    /// Returns the tiers in ascending weight order
    pub fn into_vec(self) -> Vec<Scope> {
        vec![self.self_scope, self.group, self.org, self.all]
    }
}

impl Default for DefaultScopes {
    fn default() -> Self {
        Self::new()
    }
}
