//! Error types for the RBAC engine

use thiserror::Error;

/// RBAC engine errors
#[derive(Debug, Error)]
pub enum RbacError {
    /// Invalid scope setup (empty or duplicate scope list)
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Malformed compact role definition
    #[error("Parse error: {0}")]
    Parse(String),

    /// A role inherits from a role that is not part of the batch
    #[error("Referential error: role '{role}' inherits from '{inherited}', but this role does not exist")]
    Referential {
        /// Role declaring the inheritance
        role: String,
        /// Missing inherited role
        inherited: String,
    },

    /// Duplicate role, grant or inheritance declaration
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Unknown role or scope at query time
    #[error("Not found: {0}")]
    NotFound(String),

    /// Inheritance graph contains a cycle
    #[error("Circular inheritance detected: {}", .0.join(" -> "))]
    Cycle(Vec<String>),

    /// Configuration file could not be decoded
    #[error("Invalid configuration file: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl RbacError {
    pub(crate) fn role_not_found(role: &str) -> Self {
        Self::NotFound(format!("role '{}' was not found", role))
    }

    pub(crate) fn unknown_scope(scope: &str) -> Self {
        Self::NotFound(format!("unknown scope '{}'", scope))
    }
}

/// Result type for RBAC operations
pub type Result<T> = std::result::Result<T, RbacError>;
