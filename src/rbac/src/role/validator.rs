//! Batch validation for role records
//!
//! Every batch of roles passes through [`validate_roles`] before it becomes
//! queryable, whichever path (compact definitions, prebuilt records, fluent
//! builder) produced it.

use std::collections::HashSet;

use super::types::Role;
use crate::error::{RbacError, Result};

/// Validate a batch of roles
///
/// # Errors
///
/// - [`RbacError::Conflict`] if two roles share a name
/// - [`RbacError::Referential`] if a role inherits from a role outside the batch
/// - [`RbacError::Conflict`] if a role grants the same action twice
pub fn validate_roles(roles: &[Role]) -> Result<()> {
    let mut names: HashSet<&str> = HashSet::with_capacity(roles.len());
    for role in roles {
        if !names.insert(role.name.as_str()) {
            return Err(RbacError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }
    }

    for role in roles {
        for inherited in &role.inherits {
            if !names.contains(inherited.as_str()) {
                return Err(RbacError::Referential {
                    role: role.name.clone(),
                    inherited: inherited.clone(),
                });
            }
        }

        let mut actions: HashSet<&str> = HashSet::with_capacity(role.actions.len());
        for action in &role.actions {
            if !actions.insert(action.name.as_str()) {
                return Err(RbacError::Conflict(format!(
                    "role '{}' has a duplicate action: '{}'",
                    role.name, action.name
                )));
            }
        }
    }

    Ok(())
}
