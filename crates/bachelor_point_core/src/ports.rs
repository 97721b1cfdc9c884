//! crates/bachelor_point_core/src/ports.rs
//!
//! Defines the service contracts (traits) the core state machines call out to.
//! These traits form the boundary of the hexagonal architecture, allowing the core
//! to be independent of the real SMS gateway or listing backend.

use async_trait::async_trait;
use std::time::Duration;

use crate::domain::{ListingDraftSnapshot, ListingId, SessionToken};

//=========================================================================================
// Generic Port Error and Result Types
//=========================================================================================

/// A generic error type for all port operations.
/// This abstracts away the specific errors from external services (e.g., network, backend).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PortError {
    #[error("Item not found: {0}")]
    NotFound(String),
    #[error("Rejected by the service: {0}")]
    Rejected(String),
    #[error("Unauthorized")]
    Unauthorized,
    #[error("The service did not answer within {0:?}")]
    Timeout(Duration),
    #[error("An unexpected error occurred: {0}")]
    Unexpected(String),
}

/// A convenience type alias for `Result<T, PortError>`.
pub type PortResult<T> = Result<T, PortError>;

//=========================================================================================
// Service Ports (Traits)
//=========================================================================================

#[async_trait]
pub trait OtpService: Send + Sync {
    /// Dispatches a one-time code to the given (canonical) phone number.
    async fn send_code(&self, phone: &str) -> PortResult<()>;

    /// Checks a code previously sent to `phone` and issues a session on success.
    async fn verify_code(&self, phone: &str, code: &str) -> PortResult<SessionToken>;
}

#[async_trait]
pub trait ListingService: Send + Sync {
    /// Publishes a completed listing draft.
    async fn submit_listing(&self, draft: ListingDraftSnapshot) -> PortResult<ListingId>;
}

/// Runs a collaborator call under a deadline.
///
/// An elapsed deadline is folded into `PortError::Timeout`.
pub async fn with_deadline<T, F>(limit: Duration, call: F) -> PortResult<T>
where
    F: std::future::Future<Output = PortResult<T>>,
{
    match tokio::time::timeout(limit, call).await {
        Ok(result) => result,
        Err(_) => Err(PortError::Timeout(limit)),
    }
}
