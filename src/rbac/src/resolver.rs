//! Effective action resolution
//!
//! Computes, for one or more roles, the set of actions they permit once every
//! transitively inherited role is taken into account. Each action name keeps
//! the single highest-weighted scope found anywhere in the closure; on equal
//! weight the first-seen grant wins.

use indexmap::IndexMap;
use tracing::debug;

use crate::error::Result;
use crate::role::{Action, RoleGraph};

/// Effective action set: action name to the broadest granted action
///
/// Iteration follows the order in which action names were first encountered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EffectiveActions {
    actions: IndexMap<String, Action>,
}

impl EffectiveActions {
    /// Create an empty set
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge one candidate into the set
    ///
    /// A new name is inserted. An existing name is replaced only if the
    /// candidate's scope weight is strictly higher.
    pub fn merge(&mut self, candidate: &Action) {
        match self.actions.get_mut(&candidate.name) {
            Some(existing) if existing.scope.weight < candidate.scope.weight => {
                *existing = candidate.clone();
            }
            Some(_) => {}
            None => {
                self.actions.insert(candidate.name.clone(), candidate.clone());
            }
        }
    }

    /// Look up the effective action for a name
    pub fn get(&self, name: &str) -> Option<&Action> {
        self.actions.get(name)
    }

    /// Returns true if the set grants the action at any scope
    pub fn contains(&self, name: &str) -> bool {
        self.actions.contains_key(name)
    }

    /// Iterate over effective actions
    pub fn iter(&self) -> impl Iterator<Item = &Action> {
        self.actions.values()
    }

    /// Number of distinct action names
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    /// Returns true if no action is granted
    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Consume the set into a list of actions
    pub fn into_vec(self) -> Vec<Action> {
        self.actions.into_values().collect()
    }
}

impl FromIterator<Action> for EffectiveActions {
    fn from_iter<T: IntoIterator<Item = Action>>(iter: T) -> Self {
        let mut set = Self::new();
        for action in iter {
            set.merge(&action);
        }
        set
    }
}

/// Resolves effective actions against a frozen role graph
#[derive(Debug, Clone, Copy)]
pub struct ActionResolver<'a> {
    graph: &'a RoleGraph,
}

impl<'a> ActionResolver<'a> {
    /// Create a resolver over `graph`
    pub fn new(graph: &'a RoleGraph) -> Self {
        Self { graph }
    }

    /// Compute the effective action set for `role_names`
    ///
    /// For each role (in input order) its own actions are merged first, then
    /// the actions of every inherited role in resolution order.
    ///
    /// # Errors
    ///
    /// - [`RbacError::NotFound`](crate::RbacError::NotFound) for an unknown role
    /// - [`RbacError::Cycle`](crate::RbacError::Cycle) if resolution meets a cycle
    pub fn allowed_actions<I, S>(&self, role_names: I) -> Result<EffectiveActions>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut effective = EffectiveActions::new();

        for role_name in role_names {
            let role = self.graph.get(role_name.as_ref())?;
            let inherited = self.graph.resolve_inherited_roles(role)?;

            debug!(
                "Resolved role '{}' with {} inherited roles",
                role.name,
                inherited.len()
            );

            let candidates = role
                .actions
                .iter()
                .chain(inherited.iter().flat_map(|r| r.actions.iter()));

            for action in candidates {
                effective.merge(action);
            }
        }

        Ok(effective)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::role::Role;
    use crate::scope::DefaultScopes;

    fn hierarchy() -> RoleGraph {
        let s = DefaultScopes::new();
        RoleGraph::new(vec![
            Role::new("all").with_inherit("org").with_action("action10", s.all().clone()),
            Role::new("org").with_inherit("group").with_action("action10", s.org().clone()),
            Role::new("group").with_inherit("self").with_action("action10", s.group().clone()),
            Role::new("self").with_action("action10", s.self_scope().clone()),
            Role::new("allSelfAndGroup")
                .with_inherit("all")
                .with_inherit("self")
                .with_action("action10", s.group().clone()),
        ])
        .unwrap()
    }

    #[test]
    fn test_merge_keeps_strictly_higher_weight() {
        let s = DefaultScopes::new();
        let mut set = EffectiveActions::new();

        set.merge(&Action::new("read", s.group().clone()));
        set.merge(&Action::new("read", s.self_scope().clone()));
        assert_eq!(set.get("read").unwrap().scope.name, "group");

        set.merge(&Action::new("read", s.all().clone()));
        assert_eq!(set.get("read").unwrap().scope.name, "all");
    }

    #[test]
    fn test_merge_tie_keeps_first_seen() {
        let mut set = EffectiveActions::new();
        set.merge(&Action::new("read", crate::scope::Scope::new("first", 2)));
        set.merge(&Action::new("read", crate::scope::Scope::new("second", 2)));
        assert_eq!(set.get("read").unwrap().scope.name, "first");
    }

    #[test]
    fn test_each_tier_resolves_to_its_own_scope() {
        let graph = hierarchy();
        let resolver = ActionResolver::new(&graph);

        for tier in ["self", "group", "org", "all"] {
            let actions = resolver.allowed_actions([tier]).unwrap().into_vec();
            assert_eq!(actions.len(), 1);
            assert_eq!(actions[0].name, "action10");
            assert_eq!(actions[0].scope.name, tier);
        }
    }

    #[test]
    fn test_highest_scope_in_closure_wins_over_direct_grant() {
        let graph = hierarchy();
        let actions = ActionResolver::new(&graph)
            .allowed_actions(["allSelfAndGroup"])
            .unwrap();

        assert_eq!(actions.len(), 1);
        assert_eq!(actions.get("action10").unwrap().scope.name, "all");
    }

    #[test]
    fn test_merge_across_requested_roles() {
        let graph = hierarchy();
        let actions = ActionResolver::new(&graph)
            .allowed_actions(["self", "org"])
            .unwrap();
        assert_eq!(actions.get("action10").unwrap().scope.name, "org");
    }

    #[test]
    fn test_unknown_role_fails() {
        let graph = hierarchy();
        let result = ActionResolver::new(&graph).allowed_actions(["ghost"]);
        assert!(matches!(result, Err(crate::RbacError::NotFound(_))));
    }

    #[test]
    fn test_empty_role_list_grants_nothing() {
        let graph = hierarchy();
        let actions = ActionResolver::new(&graph)
            .allowed_actions(Vec::<String>::new())
            .unwrap();
        assert!(actions.is_empty());
    }
}
