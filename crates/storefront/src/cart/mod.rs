//! Cart state management.
//!
//! [`store::CartStore`] holds the ordered line items and enforces the cart
//! invariants; [`session::CartSession`] wraps a store in a single-owner
//! async handle that serializes mutation and publishes snapshots to
//! subscribers.

pub mod session;
pub mod store;

pub use session::CartSession;
pub use store::{CartSnapshot, CartStore, FoodSnapshot, LineItem};
