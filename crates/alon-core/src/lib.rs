//! Alon Core Library
//!
//! Shared functionality for the Alon receipt generator:
//! - Recipe record model and public ID generation
//! - Validation of untrusted creation payloads
//! - Database error type and `SQLite` pool helpers
//! - Tracing initialisation

pub mod db;
pub mod error;
pub mod schema;
pub mod tracing_init;
pub mod validation;

pub use error::{Error, Result};
pub use schema::{NewRecipe, Recipe, generate_public_id, is_public_id};
pub use validation::{ValidationError, parse_create_body, validate_create_input};
