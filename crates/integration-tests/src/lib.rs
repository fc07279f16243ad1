//! Integration tests for FoodieHub.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p foodiehub-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `cart_checkout_flow` - Cart mutation through to checkout totals
//! - `catalog_filtering` - Menu and restaurant filter scenarios
//!
//! Everything here runs against the in-memory domain; the `PostgreSQL`
//! repositories are exercised separately against a live database.

use foodiehub_core::{FoodId, Money, RestaurantId};
use foodiehub_storefront::cart::store::FoodSnapshot;
use foodiehub_storefront::models::Food;

/// A cart candidate for a food, priced in minor units.
#[must_use]
pub fn cart_candidate(food_id: FoodId, name: &str, price_minor: i64) -> FoodSnapshot {
    FoodSnapshot {
        food_id,
        name: name.to_owned(),
        unit_price: Money::from_minor_units(price_minor),
        image_url: Some(format!(
            "https://cdn.foodiehub.example/{}.jpg",
            name.to_lowercase().replace(' ', "-")
        )),
        restaurant_id: RestaurantId::random(),
        restaurant_name: "Spice Garden".to_owned(),
    }
}

/// A catalog food row for filter tests.
#[must_use]
pub fn catalog_food(
    restaurant_id: RestaurantId,
    name: &str,
    price_minor: i64,
    category: &str,
    is_veg: bool,
) -> Food {
    Food {
        id: FoodId::random(),
        restaurant_id,
        name: name.to_owned(),
        description: Some(format!("House special {name}")),
        price: Money::from_minor_units(price_minor),
        image_url: None,
        category: category.to_owned(),
        is_veg,
        is_available: true,
    }
}
