//! Order repository for database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use foodiehub_core::{FoodId, Money, OrderId, OrderStatus, UserId};

use super::RepositoryError;
use crate::cart::store::LineItem;
use crate::checkout::OrderTotals;
use crate::models::{Order, OrderLine};

#[derive(sqlx::FromRow)]
struct OrderRow {
    id: OrderId,
    user_id: UserId,
    status: String,
    total_amount_minor: i64,
    gst_amount_minor: i64,
    grand_total_minor: i64,
    delivery_address: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl OrderRow {
    fn into_order(self) -> Result<Order, RepositoryError> {
        let status: OrderStatus = self.status.parse().map_err(|e: String| {
            RepositoryError::DataCorruption(format!("invalid status in database: {e}"))
        })?;

        Ok(Order {
            id: self.id,
            user_id: self.user_id,
            status,
            subtotal: Money::from_minor_units(self.total_amount_minor),
            tax: Money::from_minor_units(self.gst_amount_minor),
            grand_total: Money::from_minor_units(self.grand_total_minor),
            delivery_address: self.delivery_address,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct OrderLineRow {
    order_id: OrderId,
    food_id: FoodId,
    food_name: String,
    food_price_minor: i64,
    quantity: i64,
}

impl OrderLineRow {
    fn into_order_line(self) -> Result<OrderLine, RepositoryError> {
        let quantity = u32::try_from(self.quantity).map_err(|_| {
            RepositoryError::DataCorruption(format!(
                "negative order quantity {} for food {}",
                self.quantity, self.food_id
            ))
        })?;

        Ok(OrderLine {
            order_id: self.order_id,
            food_id: self.food_id,
            food_name: self.food_name,
            food_price: Money::from_minor_units(self.food_price_minor),
            quantity,
        })
    }
}

const ORDER_COLUMNS: &str = "id, user_id, status, total_amount_minor, gst_amount_minor, \
                             grand_total_minor, delivery_address, created_at, updated_at";

/// Repository for placed orders.
pub struct OrderRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> OrderRepository<'a> {
    /// Create a new order repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Create an order from cart line items and precomputed totals.
    ///
    /// The order header and its denormalized lines are written in one
    /// transaction; a failure rolls the whole order back.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Conflict` if there are no line items.
    /// Returns `RepositoryError::Database` if any statement fails.
    pub async fn create(
        &self,
        user_id: UserId,
        delivery_address: Option<&str>,
        items: &[LineItem],
        totals: &OrderTotals,
    ) -> Result<Order, RepositoryError> {
        if items.is_empty() {
            return Err(RepositoryError::Conflict(
                "cannot place an order with no line items".to_owned(),
            ));
        }

        let order_id = OrderId::random();
        let status = OrderStatus::Pending;
        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r"
            INSERT INTO storefront.orders
                (id, user_id, status, total_amount_minor, gst_amount_minor,
                 grand_total_minor, delivery_address, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $8)
            ",
        )
        .bind(order_id)
        .bind(user_id)
        .bind(status.to_string())
        .bind(totals.subtotal.minor_units())
        .bind(totals.tax.minor_units())
        .bind(totals.grand_total.minor_units())
        .bind(delivery_address)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        for item in items {
            sqlx::query(
                r"
                INSERT INTO storefront.order_items
                    (id, order_id, food_id, food_name, food_price_minor, quantity)
                VALUES ($1, $2, $3, $4, $5, $6)
                ",
            )
            .bind(uuid::Uuid::new_v4())
            .bind(order_id)
            .bind(item.food_id)
            .bind(&item.name)
            .bind(item.unit_price.minor_units())
            .bind(i64::from(item.quantity))
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(Order {
            id: order_id,
            user_id,
            status,
            subtotal: totals.subtotal,
            tax: totals.tax,
            grand_total: totals.grand_total,
            delivery_address: delivery_address.map(str::to_owned),
            created_at: now,
            updated_at: now,
        })
    }

    /// List a user's orders, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` for an unknown status value.
    pub async fn list_for_user(&self, user_id: UserId) -> Result<Vec<Order>, RepositoryError> {
        let rows: Vec<OrderRow> = sqlx::query_as(&format!(
            "SELECT {ORDER_COLUMNS} FROM storefront.orders WHERE user_id = $1 ORDER BY created_at DESC"
        ))
        .bind(user_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderRow::into_order).collect()
    }

    /// Load the denormalized lines of an order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn lines(&self, order_id: OrderId) -> Result<Vec<OrderLine>, RepositoryError> {
        let rows: Vec<OrderLineRow> = sqlx::query_as(
            r"
            SELECT order_id, food_id, food_name, food_price_minor, quantity
            FROM storefront.order_items
            WHERE order_id = $1
            ",
        )
        .bind(order_id)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(OrderLineRow::into_order_line).collect()
    }

    /// Advance an order's status.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the statement fails.
    pub async fn update_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), RepositoryError> {
        sqlx::query(
            "UPDATE storefront.orders SET status = $2, updated_at = $3 WHERE id = $1",
        )
        .bind(order_id)
        .bind(status.to_string())
        .bind(Utc::now())
        .execute(self.pool)
        .await?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_order_row_rejects_unknown_status() {
        let row = OrderRow {
            id: OrderId::random(),
            user_id: UserId::random(),
            status: "shipped".to_owned(),
            total_amount_minor: 500,
            gst_amount_minor: 25,
            grand_total_minor: 565,
            delivery_address: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        assert!(matches!(
            row.into_order(),
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[test]
    fn test_order_row_maps_amounts() {
        let row = OrderRow {
            id: OrderId::random(),
            user_id: UserId::random(),
            status: "pending".to_owned(),
            total_amount_minor: 500,
            gst_amount_minor: 25,
            grand_total_minor: 565,
            delivery_address: Some("12 MG Road".to_owned()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let order = row.into_order().unwrap();
        assert_eq!(order.subtotal, Money::from_minor_units(500));
        assert_eq!(order.tax, Money::from_minor_units(25));
        assert_eq!(order.grand_total, Money::from_minor_units(565));
        assert_eq!(order.status, OrderStatus::Pending);
    }
}
