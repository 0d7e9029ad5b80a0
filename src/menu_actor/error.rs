//! Error types for the Menu store.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum MenuError {
    /// The item data provided is invalid.
    #[error("Invalid menu item: {0}")]
    Validation(String),

    /// The requested item was not found.
    #[error("Menu item not found: {0}")]
    NotFound(String),

    /// The underlying store failed or went away.
    #[error("Menu store error: {0}")]
    Store(String),
}

impl From<String> for MenuError {
    fn from(msg: String) -> Self {
        MenuError::Store(msg)
    }
}
