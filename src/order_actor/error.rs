//! Error types for the Order store.

use crate::model::OrderStatus;
use thiserror::Error;

/// Errors that can occur during order operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The request was malformed (empty items, blank name, takeaway payment toggle...).
    /// Rejected before anything is written.
    #[error("Invalid order: {0}")]
    Validation(String),

    /// The order (or the parent of an add-on) no longer exists.
    #[error("Order not found: {0}")]
    NotFound(String),

    /// The requested status change is not allowed by the order lifecycle.
    #[error("Cannot move order from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    /// The order's lines changed between read and conditional write.
    #[error("Order changed concurrently: {0}")]
    Conflict(String),

    /// The underlying store failed or went away.
    #[error("Order store error: {0}")]
    Store(String),
}

/// Coarse classification of [`OrderError`] for operator-facing messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller mistake; do not retry.
    Validation,
    /// Stale reference; the data moved on.
    NotFound,
    /// Lost a race with another writer; nothing was written.
    Conflict,
    /// Infrastructure failure; the outcome of a write may be unknown.
    Store,
}

impl OrderError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            OrderError::Validation(_) | OrderError::InvalidTransition { .. } => {
                ErrorKind::Validation
            }
            OrderError::NotFound(_) => ErrorKind::NotFound,
            OrderError::Conflict(_) => ErrorKind::Conflict,
            OrderError::Store(_) => ErrorKind::Store,
        }
    }

    pub(crate) fn validation(msg: impl Into<String>) -> Self {
        OrderError::Validation(msg.into())
    }
}

impl From<String> for OrderError {
    fn from(msg: String) -> Self {
        OrderError::Store(msg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transition_errors_are_caller_mistakes() {
        let err = OrderError::InvalidTransition {
            from: OrderStatus::Completed,
            to: OrderStatus::Pending,
        };
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Cannot move order from completed to pending");
    }

    #[test]
    fn test_plain_strings_are_store_failures() {
        let err: OrderError = "connection reset".to_string().into();
        assert_eq!(err.kind(), ErrorKind::Store);
    }
}
