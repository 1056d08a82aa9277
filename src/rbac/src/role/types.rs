//! Role and action type definitions

use serde::{Deserialize, Serialize};

use crate::scope::Scope;

/// Role identifier
pub type RoleName = String;

/// A named operation granted up to and including `scope`
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    /// Action name (e.g., "getImage")
    pub name: String,

    /// Broadest scope at which the action is permitted
    pub scope: Scope,
}

impl Action {
    /// Create a new action
    pub fn new(name: impl Into<String>, scope: Scope) -> Self {
        Self {
            name: name.into(),
            scope,
        }
    }
}

/// A named bundle of granted actions plus the roles it inherits from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Unique role name within a role graph
    pub name: RoleName,

    /// Inherited roles, in declaration order
    #[serde(default)]
    pub inherits: Vec<RoleName>,

    /// Actions granted directly by this role
    #[serde(default)]
    pub actions: Vec<Action>,
}

impl Role {
    /// Create a role with no inheritance and no grants
    pub fn new(name: impl Into<RoleName>) -> Self {
        Self {
            name: name.into(),
            inherits: Vec::new(),
            actions: Vec::new(),
        }
    }

    /// Add an inherited role
    pub fn with_inherit(mut self, role: impl Into<RoleName>) -> Self {
        self.inherits.push(role.into());
        self
    }

    /// Add a granted action
    pub fn with_action(mut self, name: impl Into<String>, scope: Scope) -> Self {
        self.actions.push(Action::new(name, scope));
        self
    }

    /// Look up a directly granted action by name
    pub fn action(&self, name: &str) -> Option<&Action> {
        self.actions.iter().find(|a| a.name == name)
    }

    /// Returns true if this role directly inherits `role`
    pub fn inherits_from(&self, role: &str) -> bool {
        self.inherits.iter().any(|r| r == role)
    }
}
