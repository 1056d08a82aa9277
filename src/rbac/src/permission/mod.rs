//! Permission evaluation and decision types

pub mod checker;
pub mod decision;

pub use checker::{evaluate, PermissionChecker};
pub use decision::{Permission, ScopeVerdict};
