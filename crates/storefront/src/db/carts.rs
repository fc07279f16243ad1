//! Cart repository for database operations.
//!
//! Cart rows carry the full denormalized add-time snapshot, not just
//! `(food_id, quantity)`: hydrating a cart must not depend on the catalog
//! still containing (or still pricing) the foods in it.

use sqlx::PgPool;

use foodiehub_core::{FoodId, Money, RestaurantId, UserId};

use super::RepositoryError;
use crate::cart::store::LineItem;

/// One persisted cart row.
#[derive(sqlx::FromRow)]
struct CartItemRow {
    food_id: FoodId,
    name: String,
    unit_price_minor: i64,
    image_url: Option<String>,
    restaurant_id: RestaurantId,
    restaurant_name: String,
    quantity: i64,
}

impl CartItemRow {
    fn into_line_item(self) -> Result<LineItem, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative cart quantity {} for food {}",
                self.quantity, self.food_id
            ))
        })?;

        Ok(LineItem {
            food_id: self.food_id,
            name: self.name,
            unit_price: Money::from_minor_units(self.unit_price_minor),
            image_url: self.image_url,
            restaurant_id: self.restaurant_id,
            restaurant_name: self.restaurant_name,
            quantity,
        })
    }
}

/// Repository for persisted cart rows.
pub struct CartRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> CartRepository<'a> {
    /// Create a new cart repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Load a user's persisted cart rows in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` for a negative quantity.
    pub async fn load(&self, user_id: UserId) -> Result<Vec<LineItem>, RepositoryError> {
        let rows: Vec<CartItemRow> = sqlx::query_as(
            r"
            SELECT food_id, name, unit_price_minor, image_url,
                   restaurant_id, restaurant_name, quantity
            FROM storefront.cart_items
            WHERE user_id = $1
            ORDER BY position
            ",
        )
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(CartItemRow::into_line_item).collect()
    }

    /// Replace a user's persisted cart with the given line items.
    ///
    /// Delete-and-insert in one transaction; the stored `position` column
    /// preserves insertion order across hydrations.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if any statement fails; the
    /// transaction rolls back and the previous rows survive.
    pub async fn replace(&self, user_id: UserId, items: &[LineItem]) -> Result<(), RepositoryError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM storefront.cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        let mut position: i64 = 0;
        for item in items {
            sqlx::query(
                r"
                INSERT INTO storefront.cart_items
                    (user_id, food_id, name, unit_price_minor, image_url,
                     restaurant_id, restaurant_name, quantity, position)
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ",
            )
            .bind(user_id)
            .bind(item.food_id)
            .bind(&item.name)
            .bind(item.unit_price.minor_units())
            .bind(item.image_url.as_deref())
            .bind(item.restaurant_id)
            .bind(&item.restaurant_name)
            .bind(i64::from(item.quantity))
            .bind(position)
            .execute(&mut *tx)
            .await?;
            position += 1;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Delete all of a user's persisted cart rows.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn clear(&self, user_id: UserId) -> Result<(), RepositoryError> {
        sqlx::query("DELETE FROM storefront.cart_items WHERE user_id = $1")
            .bind(user_id)
            .execute(self.pool)
            .await?;
        Ok(())
    }
}
