//! RBAC facade
//!
//! [`Rbac`] owns one scope registry and one frozen role graph. It is built
//! either in one shot (compact definitions or role records) or through the
//! two-phase [`RbacBuilder`], and is read-only afterwards.
//!
//! ```text
//! role names → ActionResolver → EffectiveActions → PermissionChecker → Permission
//!                   ↓                                     ↓
//!               RoleGraph                           ScopeRegistry
//! ```

use indexmap::IndexMap;
use tracing::{info, warn};

use crate::error::{RbacError, Result};
use crate::permission::PermissionChecker;
use crate::resolver::{ActionResolver, EffectiveActions};
use crate::role::definition::parse_role_batch;
use crate::role::{Action, Role, RoleBuilder, RoleGraph};
use crate::scope::{Scope, ScopeRegistry};

/// Role-based access control instance
///
/// `Rbac` is `Send + Sync` and holds no interior mutability; share it across
/// threads behind an `Arc` once built.
#[derive(Debug, Clone)]
pub struct Rbac {
    scopes: ScopeRegistry,
    graph: RoleGraph,
}

impl Rbac {
    /// Start a two-phase build with the default scopes
    pub fn builder() -> RbacBuilder {
        RbacBuilder::new()
    }

    /// Build from compact role definitions
    ///
    /// `scopes` of `None` installs the default scopes.
    ///
    /// # Errors
    ///
    /// - [`RbacError::Configuration`] for an empty or duplicated scope list
    /// - [`RbacError::Parse`] for malformed definitions or unknown scopes
    /// - any batch validation error, see [`RoleGraph::new`]
    pub fn from_definitions<I, K, V>(definitions: I, scopes: Option<Vec<Scope>>) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let scopes = ScopeRegistry::new(scopes)?;
        let roles = parse_role_batch(&scopes, definitions)?;
        Self::freeze(scopes, roles)
    }

    /// Build from prebuilt role records
    ///
    /// # Errors
    ///
    /// Same as [`Rbac::from_definitions`], minus parse errors, plus
    /// [`RbacError::Configuration`] if a role grants an unregistered scope.
    pub fn from_roles(roles: Vec<Role>, scopes: Option<Vec<Scope>>) -> Result<Self> {
        let scopes = ScopeRegistry::new(scopes)?;
        Self::freeze(scopes, roles)
    }

    fn freeze(scopes: ScopeRegistry, roles: Vec<Role>) -> Result<Self> {
        for role in &roles {
            for action in &role.actions {
                if scopes.get(&action.scope.name).ok() != Some(&action.scope) {
                    return Err(RbacError::Configuration(format!(
                        "role '{}' grants '{}' at unregistered scope {}",
                        role.name, action.name, action.scope
                    )));
                }
            }
        }

        let graph = RoleGraph::new(roles)?;
        info!(
            "RBAC initialized with {} roles and {} scopes",
            graph.len(),
            scopes.len()
        );

        Ok(Self { scopes, graph })
    }

    /// Resolve the effective actions of `roles` and bind an evaluator to them
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::NotFound`] if any role is unknown.
    pub fn can<I, S>(&self, roles: I) -> Result<PermissionChecker<'_>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let allowed = self.effective_actions(roles)?;
        Ok(PermissionChecker::new(&self.scopes, allowed))
    }

    /// Effective actions of `roles`, each at its highest granted scope
    pub fn get_allowed_actions<I, S>(&self, roles: I) -> Result<Vec<Action>>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Ok(self.effective_actions(roles)?.into_vec())
    }

    fn effective_actions<I, S>(&self, roles: I) -> Result<EffectiveActions>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        ActionResolver::new(&self.graph)
            .allowed_actions(roles)
            .map_err(|e| {
                warn!("Failed to resolve allowed actions: {}", e);
                e
            })
    }

    /// Look up a role by name
    pub fn role(&self, name: &str) -> Result<&Role> {
        self.graph.get(name)
    }

    /// Role names in definition order
    pub fn role_names(&self) -> impl Iterator<Item = &str> {
        self.graph.roles().map(|r| r.name.as_str())
    }

    /// The scope registry
    pub fn scopes(&self) -> &ScopeRegistry {
        &self.scopes
    }

    /// The frozen role graph
    pub fn graph(&self) -> &RoleGraph {
        &self.graph
    }
}

/// Mutable, under-construction RBAC configuration
///
/// Duplicate roles, grants and inheritance declarations fail immediately.
/// Referential integrity and cycles are checked once, by [`RbacBuilder::build`].
///
/// # Example
///
/// ```
/// use cretoai_rbac::{Rbac, scope::DefaultScopes};
///
/// let scopes = DefaultScopes::new();
/// let mut builder = Rbac::builder();
///
/// builder.role("role2")?.grant("action20", scopes.org())?;
/// builder
///     .role("role1")?
///     .inherit("role2")?
///     .grant_multiple(["action10", "action11"], scopes.self_scope())?;
///
/// let rbac = builder.build()?;
/// assert!(rbac.can(["role1"])?.perform("action20", Some(scopes.group())).is_granted());
/// # Ok::<(), cretoai_rbac::RbacError>(())
/// ```
#[derive(Debug, Clone)]
pub struct RbacBuilder {
    scopes: ScopeRegistry,
    roles: IndexMap<String, Role>,
}

impl RbacBuilder {
    /// Builder over the default scopes
    pub fn new() -> Self {
        Self {
            scopes: ScopeRegistry::with_defaults(),
            roles: IndexMap::new(),
        }
    }

    /// Builder over an explicit, non-empty scope list
    pub fn with_scopes(scopes: Vec<Scope>) -> Result<Self> {
        Ok(Self {
            scopes: ScopeRegistry::from_scopes(scopes)?,
            roles: IndexMap::new(),
        })
    }

    /// The scope registry roles will be validated against
    pub fn scopes(&self) -> &ScopeRegistry {
        &self.scopes
    }

    /// Start a new role
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Conflict`] if the role already exists.
    pub fn role(&mut self, name: impl Into<String>) -> Result<RoleBuilder<'_>> {
        let name = name.into();
        if self.roles.contains_key(&name) {
            return Err(RbacError::Conflict(format!("role '{}' already exists", name)));
        }

        let role = self.roles.entry(name.clone()).or_insert_with(|| Role::new(name));
        Ok(RoleBuilder::new(role))
    }

    /// Add a prebuilt role record
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Conflict`] if the role already exists.
    pub fn add_role(&mut self, role: Role) -> Result<&mut Self> {
        if self.roles.contains_key(&role.name) {
            return Err(RbacError::Conflict(format!(
                "role '{}' already exists",
                role.name
            )));
        }
        self.roles.insert(role.name.clone(), role);
        Ok(self)
    }

    /// Validate every role and freeze the configuration
    pub fn build(self) -> Result<Rbac> {
        Rbac::freeze(self.scopes, self.roles.into_values().collect())
    }
}

impl Default for RbacBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scope::DefaultScopes;

    #[test]
    fn test_builder_rejects_duplicate_role() {
        let mut builder = Rbac::builder();
        builder.role("role1").unwrap();
        assert!(matches!(builder.role("role1"), Err(RbacError::Conflict(_))));
    }

    #[test]
    fn test_builder_defers_reference_check_to_build() {
        let mut builder = Rbac::builder();
        builder.role("role1").unwrap().inherit("ghost").unwrap();

        match builder.build() {
            Err(RbacError::Referential { role, inherited }) => {
                assert_eq!(role, "role1");
                assert_eq!(inherited, "ghost");
            }
            other => panic!("Expected Referential error, got {:?}", other),
        }
    }

    #[test]
    fn test_builder_forward_reference_resolves_at_build() {
        let scopes = DefaultScopes::new();
        let mut builder = Rbac::builder();
        builder.role("role1").unwrap().inherit("role2").unwrap();
        builder.role("role2").unwrap().grant("read", scopes.org()).unwrap();

        let rbac = builder.build().unwrap();
        let actions = rbac.get_allowed_actions(["role1"]).unwrap();
        assert_eq!(actions, vec![Action::new("read", scopes.org().clone())]);
    }

    #[test]
    fn test_builder_rejects_cycle_at_build() {
        let mut builder = Rbac::builder();
        builder.role("a").unwrap().inherit("b").unwrap();
        builder.role("b").unwrap().inherit("a").unwrap();
        assert!(matches!(builder.build(), Err(RbacError::Cycle(_))));
    }

    #[test]
    fn test_add_role_rejects_duplicate() {
        let mut builder = Rbac::builder();
        builder.add_role(Role::new("role1")).unwrap();
        assert!(matches!(builder.add_role(Role::new("role1")), Err(RbacError::Conflict(_))));
    }

    #[test]
    fn test_definitions_are_validated_when_frozen() {
        let dangling = Rbac::from_definitions([("role1", "ghost;action10:self")], None);
        match dangling {
            Err(RbacError::Referential { role, inherited }) => {
                assert_eq!(role, "role1");
                assert_eq!(inherited, "ghost");
            }
            other => panic!("Expected Referential error, got {:?}", other),
        }

        let duplicate = Rbac::from_definitions([("role1", ";read:self,read:org")], None);
        assert!(matches!(duplicate, Err(RbacError::Conflict(_))));
    }

    #[test]
    fn test_unregistered_scope_rejected() {
        let roles = vec![Role::new("role1").with_action("read", Scope::new("galaxy", 9))];
        assert!(matches!(Rbac::from_roles(roles, None), Err(RbacError::Configuration(_))));
    }

    #[test]
    fn test_empty_scope_list_rejected() {
        let result = Rbac::from_definitions([("role1", ";action10:self")], Some(vec![]));
        assert!(matches!(result, Err(RbacError::Configuration(_))));
    }

    #[test]
    fn test_custom_scopes_with_builder() {
        let project = Scope::new("project", 1);
        let tenant = Scope::new("tenant", 2);
        let mut builder = RbacBuilder::with_scopes(vec![project.clone(), tenant.clone()]).unwrap();
        builder.role("owner").unwrap().grant("deploy", &tenant).unwrap();

        let rbac = builder.build().unwrap();
        let permission = rbac.can(["owner"]).unwrap().perform("deploy", None);

        assert!(permission.is_granted());
        assert!(permission.scope("project").unwrap().granted);
        assert!(permission.scope("tenant").unwrap().granted);
        assert!(permission.scope("self").is_err());
    }

    #[test]
    fn test_introspection() {
        let rbac = Rbac::from_definitions(
            [("role1", "role2;action10:self"), ("role2", ";action20:org")],
            None,
        )
        .unwrap();

        assert_eq!(rbac.role_names().collect::<Vec<_>>(), vec!["role1", "role2"]);
        assert_eq!(rbac.role("role1").unwrap().inherits, vec!["role2".to_string()]);
        assert_eq!(rbac.scopes().len(), 4);
        assert_eq!(rbac.graph().len(), 2);
        assert!(matches!(rbac.can(["ghost"]), Err(RbacError::NotFound(_))));
    }
}
