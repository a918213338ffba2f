//! Input validation error types.

use thiserror::Error;

/// Errors raised when lobby form input is rejected before reaching the engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    #[error("Please enter your name")]
    EmptyName,

    #[error("Please enter lobby code")]
    EmptyCode,
}
