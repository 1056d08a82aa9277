//! # CretoAI RBAC Engine
//!
//! In-memory role-based access control with weighted scopes.
//!
//! ## Features
//!
//! - **Weighted scopes**: a grant at a broad scope implies every narrower scope
//! - **Role inheritance** with transitive, cycle-safe resolution
//! - **Highest-weight-wins** merging of actions across roles and ancestors
//! - **Compact role definitions** (`"<inherits>;<action:scope>,..."`) and a fluent builder
//! - **Per-scope verdicts** on every permission decision
//!
//! ## Example
//!
//! ```rust
//! use cretoai_rbac::{Rbac, scope::DefaultScopes};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let rbac = Rbac::from_definitions(
//!         [("role1", "role2;action10:self"), ("role2", ";action20:org")],
//!         None,
//!     )?;
//!     let scopes = DefaultScopes::new();
//!
//!     let permission = rbac.can(["role1"])?.perform("action20", Some(scopes.group()));
//!
//!     if permission.is_granted() {
//!         println!("Access granted at {}", permission.action().scope);
//!     }
//!     assert!(!permission.scope("all")?.granted);
//!
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod permission;
pub mod rbac;
pub mod resolver;
pub mod role;
pub mod scope;

// Re-export commonly used types
pub use config::RbacConfig;
pub use error::{RbacError, Result};
pub use permission::{Permission, PermissionChecker, ScopeVerdict};
pub use rbac::{Rbac, RbacBuilder};
pub use resolver::{ActionResolver, EffectiveActions};
pub use role::{Action, Role, RoleBuilder, RoleGraph, RoleName};
pub use scope::{DefaultScopes, Scope, ScopeRegistry};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
