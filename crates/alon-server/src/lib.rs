//! Alon Receipts Server Library
//!
//! - `SQLite` storage for receipt records behind the `RecipeStore` trait
//! - JSON API over axum (`/api/recipes` and the serverless mirror)
//! - Startup seeding and configuration

pub mod config;
pub mod error;
pub mod routes;
pub mod seed;
pub mod storage;
