//! Roles, their definitions and the inheritance graph
//!
//! Provides the role records, the compact textual definition parser, batch
//! validation, the fluent role builder and the frozen [`RoleGraph`].
//!
//! # Features
//!
//! - **Compact Definitions**: `"<inherits-csv>;<action:scope-csv>"` per role
//! - **Batch Validation**: duplicate roles, dangling inheritance, duplicate grants
//! - **Cycle Detection**: DFS-based, with the cycle path in the error
//! - **Transitive Resolution**: depth-first, de-duplicated closure of inherited roles

pub mod builder;
pub mod definition;
pub mod graph;
pub mod types;
pub mod validator;


pub use builder::RoleBuilder;
pub use definition::{parse_role_definition, parse_role_definitions};
pub use graph::RoleGraph;
pub use types::{Action, Role, RoleName};
pub use validator::validate_roles;
