//! crates/bachelor_point_core/src/error.rs
//!
//! The error returned by every state-machine operation. None of these are fatal:
//! the flow is always left in a valid state that accepts the next action.

use crate::i18n::Message;
use crate::ports::PortError;
use crate::validation::ValidationError;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum FlowError {
    /// A local check failed; the transition was refused.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// A collaborator call failed or timed out. The action can be retried.
    #[error("Service call failed: {0}")]
    Service(#[from] PortError),

    /// The action is not available in the current stage.
    #[error("'{action}' is not allowed while in {stage}")]
    InvalidTransition {
        stage: &'static str,
        action: &'static str,
    },

    /// The same action is already in flight; the call was ignored.
    #[error("Another request is already in progress")]
    Busy,

    /// The flow was closed or moved on while the call was pending; its result was dropped.
    #[error("The flow was closed before the request completed")]
    Closed,
}

impl FlowError {
    /// The message to show for a service failure, given what the user was doing.
    pub(crate) fn service_message(error: &PortError, fallback: Message) -> Message {
        match error {
            PortError::Timeout(_) => Message::RequestTimedOut,
            _ => fallback,
        }
    }
}

pub type FlowResult<T> = Result<T, FlowError>;
