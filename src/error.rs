//! Error types for the sidebar crate

use thiserror::Error;

/// Errors raised while loading sidebar inputs.
///
/// Attaching the sidebar itself never fails; these only come from reading
/// trees, configuration and page context supplied by the host.
#[derive(Error, Debug)]
pub enum SidebarError {
    #[error("Invalid navigation tree: {0}")]
    InvalidTree(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Path to root '{0}' must be empty or end with '/'")]
    InvalidPathToRoot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for sidebar operations
pub type SidebarResult<T> = Result<T, SidebarError>;
