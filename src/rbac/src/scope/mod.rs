//! Weighted access scopes
//!
//! A scope is a named access breadth carrying an integer weight. Weights form a
//! total order: a grant at a broader (heavier) scope implies every narrower one.
//!
//! # Examples
//!
//! ```
//! use cretoai_rbac::scope::{DefaultScopes, ScopeRegistry};
//!
//! let registry = ScopeRegistry::with_defaults();
//! let defaults = DefaultScopes::new();
//!
//! assert_eq!(registry.lowest(), defaults.self_scope());
//! assert!(defaults.org().subsumes(defaults.group()));
//! ```

mod registry;
mod types;

pub use registry::ScopeRegistry;
pub use types::{DefaultScopes, Scope, NO_SCOPE_NAME, NO_SCOPE_WEIGHT};
