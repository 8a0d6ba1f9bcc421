//! Error types for the Alon core library.

use thiserror::Error;

use crate::validation::ValidationError;

/// Result type alias using the core [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while turning an untrusted request body into a [`crate::NewRecipe`].
#[derive(Debug, Error)]
pub enum Error {
    /// The body was not well-formed JSON
    #[error("Invalid JSON body: {0}")]
    Json(#[from] serde_json::Error),

    /// The body was JSON but did not satisfy the creation schema
    #[error(transparent)]
    Validation(#[from] ValidationError),
}
