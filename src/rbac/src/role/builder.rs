//! Fluent builder for a role under construction
//!
//! Only local duplicates are checked while building. Whether inherited roles
//! exist is decided once, when the owning [`RbacBuilder`] is finalized.
//!
//! [`RbacBuilder`]: crate::RbacBuilder

use super::types::{Action, Role, RoleName};
use crate::error::{RbacError, Result};
use crate::scope::Scope;

/// Mutable view of one role inside an [`RbacBuilder`](crate::RbacBuilder)
#[derive(Debug)]
pub struct RoleBuilder<'a> {
    role: &'a mut Role,
}

impl<'a> RoleBuilder<'a> {
    pub(crate) fn new(role: &'a mut Role) -> Self {
        Self { role }
    }

    /// Grant `action` up to and including `scope`
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Conflict`] if the role already grants this action.
    pub fn grant(&mut self, action: impl Into<String>, scope: &Scope) -> Result<&mut Self> {
        let action = action.into();
        if self.role.action(&action).is_some() {
            return Err(RbacError::Conflict(format!(
                "action '{}' already exists on role '{}'",
                action, self.role.name
            )));
        }
        self.role.actions.push(Action::new(action, scope.clone()));
        Ok(self)
    }

    /// Grant every action in `actions` at `scope`, in order
    pub fn grant_multiple<I, S>(&mut self, actions: I, scope: &Scope) -> Result<&mut Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for action in actions {
            self.grant(action, scope)?;
        }
        Ok(self)
    }

    /// Inherit every action granted by `role`
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Conflict`] if `role` is already inherited.
    pub fn inherit(&mut self, role: impl Into<RoleName>) -> Result<&mut Self> {
        let role = role.into();
        if self.role.inherits_from(&role) {
            return Err(RbacError::Conflict(format!(
                "role '{}' is already inherited by role '{}'",
                role, self.role.name
            )));
        }
        self.role.inherits.push(role);
        Ok(self)
    }

    /// The role as built so far
    pub fn role(&self) -> &Role {
        &*self.role
    }
}
