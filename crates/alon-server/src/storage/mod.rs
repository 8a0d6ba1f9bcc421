//! `SQLite` storage for Alon receipts.
//!
//! Owns the `recipes` table. Everything else reaches it through the
//! [`RecipeStore`] trait.

mod db;
mod queries;
mod store;


pub use alon_core::db::{DatabaseError, PoolSettings};
pub use db::RecipeDatabase;
pub use queries::PUBLIC_ID_ATTEMPTS;
pub use store::RecipeStore;
