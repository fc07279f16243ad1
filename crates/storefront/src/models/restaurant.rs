//! Restaurant domain types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use foodiehub_core::RestaurantId;

/// A restaurant (domain type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Restaurant {
    pub id: RestaurantId,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    /// Cuisine tags shown on the card (e.g. "North Indian", "Chinese").
    pub cuisines: Vec<String>,
    /// Average rating, one decimal place (e.g. 4.3).
    pub rating: Decimal,
    /// Whether the whole kitchen is pure veg.
    pub is_veg: bool,
}
