//! Food domain types.

use serde::{Deserialize, Serialize};

use foodiehub_core::{FoodId, Money, RestaurantId};

use crate::cart::store::FoodSnapshot;

/// A menu item (domain type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Food {
    pub id: FoodId,
    /// Restaurant serving this item.
    pub restaurant_id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub price: Money,
    pub image_url: Option<String>,
    /// Free-form menu category (e.g. "Starters", "Main Course").
    pub category: String,
    pub is_veg: bool,
    /// Unavailable items stay on the menu but cannot enter a cart.
    pub is_available: bool,
}

impl Food {
    /// Build the denormalized add-time snapshot for the cart.
    ///
    /// The restaurant name is supplied by the caller because foods only
    /// carry the restaurant id.
    #[must_use]
    pub fn to_cart_snapshot(&self, restaurant_name: impl Into<String>) -> FoodSnapshot {
        FoodSnapshot {
            food_id: self.id,
            name: self.name.clone(),
            unit_price: self.price,
            image_url: self.image_url.clone(),
            restaurant_id: self.restaurant_id,
            restaurant_name: restaurant_name.into(),
        }
    }
}
