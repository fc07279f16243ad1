//! Order domain types.
//!
//! Orders denormalize both the checkout totals and the line details at
//! placement time, so an order's history view never depends on the
//! catalog rows it was built from.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use foodiehub_core::{FoodId, Money, OrderId, OrderStatus, UserId};

/// A placed order (domain type).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub user_id: UserId,
    pub status: OrderStatus,
    /// Cart subtotal at placement time.
    pub subtotal: Money,
    /// GST charged on the subtotal.
    pub tax: Money,
    pub grand_total: Money,
    pub delivery_address: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One denormalized line of a placed order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLine {
    pub order_id: OrderId,
    pub food_id: FoodId,
    pub food_name: String,
    pub food_price: Money,
    pub quantity: u32,
}

impl OrderLine {
    /// Quantity × price for this line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.food_price.times(self.quantity)
    }
}
