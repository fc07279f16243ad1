//! Domain models for the storefront.
//!
//! These are validated domain objects, separate from database row types;
//! the repositories in [`crate::db`] map rows into them.

pub mod food;
pub mod order;
pub mod restaurant;

pub use food::Food;
pub use order::{Order, OrderLine};
pub use restaurant::Restaurant;
