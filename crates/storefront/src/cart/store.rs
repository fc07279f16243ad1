//! In-memory cart state.
//!
//! The store owns an ordered sequence of line items, unique by food id.
//! All operations are total: mutating an absent item is a silent no-op and
//! a non-positive quantity means removal, so no operation here returns an
//! error. Aggregates (item count, subtotal) are recomputed on demand from
//! the line items rather than cached.

use foodiehub_core::{FoodId, Money, RestaurantId};
use serde::{Deserialize, Serialize};

/// Denormalized food fields captured when an item enters the cart.
///
/// Copied at insertion time so cart display stays stable even if the
/// catalog row changes or disappears later.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodSnapshot {
    /// Stable join key back to the catalog.
    pub food_id: FoodId,
    pub name: String,
    pub unit_price: Money,
    pub image_url: Option<String>,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
}

/// One food entry in the cart with a quantity.
///
/// A line item with quantity 0 never exists in the store; removal is the
/// zero state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub food_id: FoodId,
    pub name: String,
    pub unit_price: Money,
    pub image_url: Option<String>,
    pub restaurant_id: RestaurantId,
    pub restaurant_name: String,
    pub quantity: u32,
}

impl LineItem {
    fn from_snapshot(snapshot: FoodSnapshot) -> Self {
        Self {
            food_id: snapshot.food_id,
            name: snapshot.name,
            unit_price: snapshot.unit_price,
            image_url: snapshot.image_url,
            restaurant_id: snapshot.restaurant_id,
            restaurant_name: snapshot.restaurant_name,
            quantity: 1,
        }
    }

    /// Quantity × unit price for this line.
    #[must_use]
    pub const fn line_total(&self) -> Money {
        self.unit_price.times(self.quantity)
    }
}

/// Immutable point-in-time view of the cart.
///
/// Handed to observers and templates; nothing outside the store ever holds
/// a mutable reference into its internals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CartSnapshot {
    pub items: Vec<LineItem>,
    pub item_count: u64,
    pub subtotal: Money,
}

impl CartSnapshot {
    /// Whether the cart had no items at snapshot time.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Ordered collection of cart line items, unique by food id.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<LineItem>,
}

impl CartStore {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from persisted line items.
    ///
    /// Rows are normalized back into a consistent state: quantity-0 rows
    /// are dropped and duplicate food ids collapse into the first row
    /// (first-write-wins for the snapshot fields, quantities summed).
    #[must_use]
    pub fn hydrate(rows: Vec<LineItem>) -> Self {
        let mut store = Self::new();
        for row in rows {
            if row.quantity == 0 {
                continue;
            }
            match store.position(row.food_id) {
                Some(idx) => {
                    if let Some(existing) = store.items.get_mut(idx) {
                        existing.quantity = existing.quantity.saturating_add(row.quantity);
                    }
                }
                None => store.items.push(row),
            }
        }
        store
    }

    /// Add one unit of a food to the cart.
    ///
    /// If a line for the same food id exists its quantity is incremented
    /// and the denormalized fields are left untouched (first-write-wins);
    /// otherwise a new line with quantity 1 is appended.
    pub fn add_item(&mut self, snapshot: FoodSnapshot) {
        match self.position(snapshot.food_id) {
            Some(idx) => {
                if let Some(item) = self.items.get_mut(idx) {
                    item.quantity = item.quantity.saturating_add(1);
                }
            }
            None => self.items.push(LineItem::from_snapshot(snapshot)),
        }
    }

    /// Set a line's quantity to an absolute value.
    ///
    /// A quantity of 0 or less removes the line (the decrement-to-zero
    /// path in the quantity stepper). An absent food id is a silent no-op
    /// and never creates a line.
    pub fn set_quantity(&mut self, food_id: FoodId, quantity: i64) {
        if quantity <= 0 {
            self.remove_item(food_id);
            return;
        }

        if let Some(idx) = self.position(food_id)
            && let Some(item) = self.items.get_mut(idx)
        {
            item.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Remove a line if present; relative order of the rest is preserved.
    pub fn remove_item(&mut self, food_id: FoodId) {
        self.items.retain(|item| item.food_id != food_id);
    }

    /// Remove every line. Idempotent.
    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Total number of units across all lines.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }

    /// Sum of quantity × unit price across all lines.
    #[must_use]
    pub fn subtotal(&self) -> Money {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// The line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    /// Whether the cart has no items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Take a consistent point-in-time copy of the cart.
    #[must_use]
    pub fn snapshot(&self) -> CartSnapshot {
        CartSnapshot {
            items: self.items.clone(),
            item_count: self.item_count(),
            subtotal: self.subtotal(),
        }
    }

    fn position(&self, food_id: FoodId) -> Option<usize> {
        self.items.iter().position(|item| item.food_id == food_id)
    }
}
