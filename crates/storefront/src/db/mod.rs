//! Database operations for storefront `PostgreSQL`.
//!
//! # Database: `foodiehub_storefront`
//!
//! ## Tables
//!
//! - `restaurants` - Restaurant listings
//! - `foods` - Menu items, keyed to a restaurant
//! - `cart_items` - Persisted cart rows per user, including the
//!   denormalized add-time snapshot so hydration needs no catalog join
//! - `orders` / `order_items` - Placed orders with denormalized lines
//!
//! The in-memory cart is authoritative; repositories here are a side
//! effect wired in after mutations, never a prerequisite for them.

use std::time::Duration;

use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

pub mod carts;
pub mod foods;
pub mod orders;
pub mod restaurants;

pub use carts::CartRepository;
pub use foods::FoodRepository;
pub use orders::OrderRepository;
pub use restaurants::RestaurantRepository;

/// Errors from repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// The operation conflicts with existing data.
    #[error("conflict: {0}")]
    Conflict(String),
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
