//! Frozen role graph with cycle-safe inheritance resolution
//!
//! This module:
//! 1. Validates a batch of roles (names, references, per-role grants)
//! 2. Rejects inheritance cycles before the graph becomes queryable
//! 3. Resolves the transitive closure of a role's inherited roles

use indexmap::{IndexMap, IndexSet};
use std::collections::HashMap;
use tracing::debug;

use super::types::Role;
use super::validator::validate_roles;
use crate::error::{RbacError, Result};

/// DFS visitation state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VisitState {
    /// On the current DFS path
    Visiting,
    /// Fully explored
    Visited,
}

/// Immutable mapping from role name to role record
///
/// # Example
///
/// ```
/// use cretoai_rbac::role::{Role, RoleGraph};
///
/// let graph = RoleGraph::new(vec![
///     Role::new("editor").with_inherit("viewer"),
///     Role::new("viewer"),
/// ])?;
///
/// let editor = graph.get("editor")?;
/// let inherited = graph.resolve_inherited_roles(editor)?;
/// assert_eq!(inherited[0].name, "viewer");
/// # Ok::<(), cretoai_rbac::RbacError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct RoleGraph {
    /// Roles in insertion order
    roles: IndexMap<String, Role>,
}

impl RoleGraph {
    /// Build a graph from a batch of roles
    ///
    /// # Errors
    ///
    /// Returns the first validation failure (see [`validate_roles`]), or
    /// [`RbacError::Cycle`] if the inheritance relation contains a cycle.
    pub fn new(roles: Vec<Role>) -> Result<Self> {
        validate_roles(&roles)?;

        let graph = Self {
            roles: roles.into_iter().map(|r| (r.name.clone(), r)).collect(),
        };
        graph.detect_cycles()?;

        debug!("Role graph built with {} roles", graph.roles.len());
        Ok(graph)
    }

    /// Look up a role by name
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::NotFound`] if the role does not exist.
    pub fn get(&self, name: &str) -> Result<&Role> {
        self.roles
            .get(name)
            .ok_or_else(|| RbacError::role_not_found(name))
    }

    /// Returns true if the graph contains the role
    pub fn contains(&self, name: &str) -> bool {
        self.roles.contains_key(name)
    }

    /// Iterate over roles in insertion order
    pub fn roles(&self) -> impl Iterator<Item = &Role> {
        self.roles.values()
    }

    /// Number of roles
    pub fn len(&self) -> usize {
        self.roles.len()
    }

    /// Returns true if the graph holds no roles
    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }

    /// Resolve every role transitively reachable from `role` via `inherits`
    ///
    /// Depth-first, de-duplicated by name, `role` itself excluded. A role
    /// reachable via two paths appears once, at its first position. The walk
    /// keeps an explicit stack, so inheritance depth is bounded by memory only.
    ///
    /// # Errors
    ///
    /// - [`RbacError::NotFound`] if an inherited name is missing
    /// - [`RbacError::Cycle`] if a role is revisited while on the current path
    pub fn resolve_inherited_roles<'a>(&'a self, role: &'a Role) -> Result<Vec<&'a Role>> {
        // One frame per role on the current path: the role and its next inherit index
        let mut stack: Vec<(&'a Role, usize)> = vec![(role, 0)];
        let mut path: IndexSet<&'a str> = IndexSet::new();
        let mut resolved: IndexMap<&'a str, &'a Role> = IndexMap::new();

        path.insert(role.name.as_str());

        while let Some(frame) = stack.last_mut() {
            let (current, next) = *frame;
            let Some(inherited_name) = current.inherits.get(next) else {
                stack.pop();
                path.pop();
                continue;
            };
            frame.1 += 1;

            let inherited = self.get(inherited_name)?;
            let name = inherited.name.as_str();

            if path.contains(name) {
                let mut cycle: Vec<String> = path
                    .iter()
                    .skip_while(|n| **n != name)
                    .map(|n| n.to_string())
                    .collect();
                cycle.push(name.to_string());
                return Err(RbacError::Cycle(cycle));
            }

            // Already fully expanded through another path
            if resolved.contains_key(name) {
                continue;
            }

            resolved.insert(name, inherited);
            path.insert(name);
            stack.push((inherited, 0));
        }

        Ok(resolved.into_values().collect())
    }

    /// Check the whole graph for inheritance cycles
    ///
    /// Depth-first search with two states per role (visiting, visited);
    /// meeting a role that is still being visited closes a cycle.
    ///
    /// # Errors
    ///
    /// Returns [`RbacError::Cycle`] with the first cycle found.
    pub fn detect_cycles(&self) -> Result<()> {
        let mut state: HashMap<&str, VisitState> = HashMap::with_capacity(self.roles.len());

        for name in self.roles.keys() {
            if !state.contains_key(name.as_str()) {
                self.dfs_cycle_detect(name, &mut state)?;
            }
        }

        Ok(())
    }

    fn dfs_cycle_detect<'a>(
        &'a self,
        start: &'a str,
        state: &mut HashMap<&'a str, VisitState>,
    ) -> Result<()> {
        // The stack doubles as the current DFS path
        let mut stack: Vec<(&'a str, usize)> = vec![(start, 0)];
        state.insert(start, VisitState::Visiting);

        while let Some(frame) = stack.last_mut() {
            let (node, next) = *frame;
            let inherits = self
                .roles
                .get(node)
                .map(|r| r.inherits.as_slice())
                .unwrap_or_default();

            let Some(inherited) = inherits.get(next).map(String::as_str) else {
                state.insert(node, VisitState::Visited);
                stack.pop();
                continue;
            };
            frame.1 += 1;

            match state.get(inherited) {
                Some(VisitState::Visiting) => {
                    let cycle = stack
                        .iter()
                        .map(|(n, _)| *n)
                        .skip_while(|n| *n != inherited)
                        .chain(std::iter::once(inherited))
                        .map(String::from)
                        .collect();
                    return Err(RbacError::Cycle(cycle));
                }
                Some(VisitState::Visited) => {}
                None => {
                    state.insert(inherited, VisitState::Visiting);
                    stack.push((inherited, 0));
                }
            }
        }

        Ok(())
    }

    /// Build a graph without validation, for exercising the resolution guard
    #[cfg(test)]
    pub(crate) fn unchecked(roles: Vec<Role>) -> Self {
        Self {
            roles: roles.into_iter().map(|r| (r.name.clone(), r)).collect(),
        }
    }
}
