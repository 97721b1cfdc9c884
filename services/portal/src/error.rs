//! services/portal/src/error.rs
//!
//! Defines the primary error type for the portal application shell.

use crate::config::ConfigError;
use bachelor_point_core::ports::PortError;
use bachelor_point_core::FlowError;

/// The primary error type for the `portal` service.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Represents an error that occurred during configuration loading.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A state-machine operation was refused or its collaborator failed.
    #[error("Flow error: {0}")]
    Flow(#[from] FlowError),

    /// Represents an error that propagated up from one of the core service ports.
    #[error("Service Port Error: {0}")]
    Port(#[from] PortError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Represents a standard Input/Output error (e.g., writing to stdout).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A catch-all for any other unexpected errors.
    #[error("An unexpected internal error occurred: {0}")]
    Internal(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn collaborator_errors_convert() {
        let err: AppError = PortError::NotFound("no account for +8801712345678".into()).into();
        assert!(matches!(err, AppError::Port(PortError::NotFound(_))));
        assert_eq!(
            err.to_string(),
            "Service Port Error: Item not found: no account for +8801712345678"
        );

        let err: AppError = FlowError::Busy.into();
        assert!(matches!(err, AppError::Flow(FlowError::Busy)));
    }
}
