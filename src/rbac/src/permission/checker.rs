//! Permission evaluation
//!
//! [`evaluate`] is a pure function over an effective action set and a scope
//! registry. [`PermissionChecker`] binds it to the roles of one `can(...)` call.
//!
//! Decision table:
//!
//! | action granted? | scope requested? | effective >= requested | result                         |
//! |-----------------|------------------|------------------------|--------------------------------|
//! | no              | any              | -                      | denied, all verdicts false     |
//! | yes             | no               | -                      | granted at the effective scope |
//! | yes             | yes              | yes                    | granted at the effective scope |
//! | yes             | yes              | no                     | denied, verdicts kept          |

use indexmap::IndexMap;
use tracing::debug;

use super::decision::Permission;
use crate::error::Result;
use crate::resolver::EffectiveActions;
use crate::role::Action;
use crate::scope::{Scope, ScopeRegistry};

/// Evaluate one action query
///
/// * `effective` - effective action set of the queried roles
/// * `registry` - registered scopes, one verdict is produced per scope
/// * `lowest` - default requested scope when `requested` is `None`
/// * `action` - requested action name
/// * `requested` - explicit requested scope
pub fn evaluate(
    effective: &EffectiveActions,
    registry: &ScopeRegistry,
    lowest: Option<&Scope>,
    action: &str,
    requested: Option<&Scope>,
) -> Permission {
    let requested_scope = requested
        .or(lowest)
        .cloned()
        .unwrap_or_else(Scope::none);
    let requested_action = Action::new(action, requested_scope);

    let Some(allowed) = effective.get(action) else {
        debug!("Action '{}' not granted by any resolved role", action);
        let verdicts = registry.iter().map(|s| (s.name.clone(), false)).collect();
        return Permission::new(requested_action, false, verdicts);
    };

    let verdicts: IndexMap<String, bool> = registry
        .iter()
        .map(|s| (s.name.clone(), s.weight <= allowed.scope.weight))
        .collect();

    match requested {
        Some(scope) if !allowed.scope.subsumes(scope) => {
            debug!(
                "Action '{}' denied: requested scope {} exceeds granted scope {}",
                action, scope, allowed.scope
            );
            Permission::new(requested_action, false, verdicts)
        }
        _ => {
            debug!("Action '{}' granted at scope {}", action, allowed.scope);
            Permission::new(allowed.clone(), true, verdicts)
        }
    }
}

/// Evaluator bound to the effective actions of a set of roles
///
/// # Example
///
/// ```
/// use cretoai_rbac::Rbac;
///
/// let rbac = Rbac::from_definitions([("viewer", ";read:group")], None)?;
/// let permission = rbac.can(["viewer"])?.perform("read", None);
///
/// assert!(permission.is_granted());
/// assert_eq!(permission.action().scope.name, "group");
/// # Ok::<(), cretoai_rbac::RbacError>(())
/// ```
#[derive(Debug, Clone)]
pub struct PermissionChecker<'a> {
    registry: &'a ScopeRegistry,
    allowed: EffectiveActions,
}

impl<'a> PermissionChecker<'a> {
    /// Bind an effective action set to a registry
    pub fn new(registry: &'a ScopeRegistry, allowed: EffectiveActions) -> Self {
        Self { registry, allowed }
    }

    /// Evaluate `action`, optionally at an explicit scope
    pub fn perform(&self, action: &str, scope: Option<&Scope>) -> Permission {
        evaluate(
            &self.allowed,
            self.registry,
            Some(self.registry.lowest()),
            action,
            scope,
        )
    }

    /// Evaluate `action` at the registered scope named `scope`
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::NotFound`](crate::RbacError::NotFound) for an
    /// unknown scope name.
    pub fn perform_scoped(&self, action: &str, scope: &str) -> Result<Permission> {
        let scope = self.registry.get(scope)?;
        Ok(self.perform(action, Some(scope)))
    }

    /// The effective actions this checker evaluates against
    pub fn allowed_actions(&self) -> &EffectiveActions {
        &self.allowed
    }
}
