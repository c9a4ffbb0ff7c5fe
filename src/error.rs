//! Error types for thread ownership and parallel reduction

use std::any::Any;
use thiserror::Error;

/// Errors raised by thread handles and the reduction orchestrator
#[derive(Debug, Error)]
pub enum ThreadError {
    /// The handle does not own a joinable thread
    #[error("invalid thread state: {0}")]
    InvalidState(&'static str),

    /// The operating system refused to start a thread
    #[error("failed to spawn thread: {0}")]
    Spawn(#[from] std::io::Error),

    /// The owned thread panicked before producing a result
    #[error("thread panicked: {0}")]
    Panicked(String),
}

impl ThreadError {
    /// Build a `Panicked` error from the payload returned by `JoinHandle::join`
    pub(crate) fn from_panic(payload: Box<dyn Any + Send + 'static>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        ThreadError::Panicked(message)
    }

    pub fn is_invalid_state(&self) -> bool {
        matches!(self, ThreadError::InvalidState(_))
    }
}

/// Result type alias for threadkeep operations
pub type Result<T> = std::result::Result<T, ThreadError>;
