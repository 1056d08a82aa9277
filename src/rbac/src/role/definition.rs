//! Compact textual role definitions
//!
//! A definition maps a role name to `"<inherits-csv>;<action:scope-csv>"`:
//!
//! ```text
//! role1 = "role2;action10:self,action11:self"
//! role2 = ";action20:org"
//! ```
//!
//! Empty entries on either side of the `;` are ignored, so `"role2,;"` and
//! `";"` are valid.

use tracing::debug;

use super::types::{Action, Role};
use super::validator::validate_roles;
use crate::error::{RbacError, Result};
use crate::scope::ScopeRegistry;

/// Parse a whole set of role definitions and validate the resulting batch
///
/// Roles are returned in the iteration order of `definitions`. Standalone
/// parsing runs [`validate_roles`] itself; [`Rbac::from_definitions`] leaves
/// validation to [`RoleGraph::new`](super::RoleGraph::new) instead.
///
/// [`Rbac::from_definitions`]: crate::Rbac::from_definitions
///
/// # Example
///
/// ```
/// use cretoai_rbac::role::parse_role_definitions;
/// use cretoai_rbac::scope::ScopeRegistry;
///
/// let registry = ScopeRegistry::with_defaults();
/// let roles = parse_role_definitions(
///     &registry,
///     [("role1", "role2;action10:self"), ("role2", ";action20:org")],
/// )?;
///
/// assert_eq!(roles[0].inherits, vec!["role2".to_string()]);
/// assert_eq!(roles[1].actions[0].scope.name, "org");
/// # Ok::<(), cretoai_rbac::RbacError>(())
/// ```
pub fn parse_role_definitions<I, K, V>(registry: &ScopeRegistry, definitions: I) -> Result<Vec<Role>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let roles = parse_role_batch(registry, definitions)?;
    validate_roles(&roles)?;

    Ok(roles)
}

/// Parse every definition without cross-role checks
pub(crate) fn parse_role_batch<I, K, V>(registry: &ScopeRegistry, definitions: I) -> Result<Vec<Role>>
where
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let roles = definitions
        .into_iter()
        .map(|(name, definition)| parse_role_definition(registry, name.as_ref(), definition.as_ref()))
        .collect::<Result<Vec<_>>>()?;

    debug!("Parsed {} role definitions", roles.len());
    Ok(roles)
}

/// Parse a single role definition
///
/// Only the syntax and scope names are checked here; cross-role checks happen
/// in [`parse_role_definitions`].
///
/// # Errors
///
/// Returns [`RbacError::Parse`] if the definition does not contain exactly one
/// `;`, an action entry does not contain exactly one `:`, or a scope name is not
/// registered.
pub fn parse_role_definition(registry: &ScopeRegistry, name: &str, definition: &str) -> Result<Role> {
    let segments: Vec<&str> = definition.split(';').collect();
    let [inherits, actions] = segments.as_slice() else {
        return Err(RbacError::Parse(format!(
            "invalid definition for role '{}', there must be exactly one ';' between roles and actions: {}",
            name, definition
        )));
    };

    let mut role = Role::new(name);

    role.inherits.extend(
        inherits
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from),
    );

    for entry in actions.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        role.actions.push(parse_action(registry, name, entry)?);
    }

    Ok(role)
}

fn parse_action(registry: &ScopeRegistry, role: &str, entry: &str) -> Result<Action> {
    let parts: Vec<&str> = entry.split(':').collect();
    let [action, scope] = parts.as_slice() else {
        return Err(RbacError::Parse(format!(
            "invalid action '{}' on role '{}', there must be exactly one ':' between name and scope",
            entry, role
        )));
    };

    let scope = registry
        .get(scope.trim())
        .map_err(|_| RbacError::Parse(format!("unknown scope '{}' in action '{}' on role '{}'", scope.trim(), entry, role)))?;

    Ok(Action::new(action.trim(), scope.clone()))
}
