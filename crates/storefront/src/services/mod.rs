//! Business logic services for the storefront.
//!
//! # Services
//!
//! - [`ordering`] - The add-to-cart and place-order flows, wiring the
//!   catalog, the cart session, and the order repository together

pub mod ordering;

pub use ordering::{OrderingError, OrderingService};
