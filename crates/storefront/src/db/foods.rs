//! Food repository for database operations.

use sqlx::PgPool;

use foodiehub_core::{FoodId, Money, RestaurantId};

use super::RepositoryError;
use crate::models::Food;

#[derive(sqlx::FromRow)]
struct FoodRow {
    id: FoodId,
    restaurant_id: RestaurantId,
    name: String,
    description: Option<String>,
    price_minor: i64,
    image_url: Option<String>,
    category: String,
    is_veg: bool,
    is_available: bool,
}

impl From<FoodRow> for Food {
    fn from(row: FoodRow) -> Self {
        Self {
            id: row.id,
            restaurant_id: row.restaurant_id,
            name: row.name,
            description: row.description,
            price: Money::from_minor_units(row.price_minor),
            image_url: row.image_url,
            category: row.category,
            is_veg: row.is_veg,
            is_available: row.is_available,
        }
    }
}

const FOOD_COLUMNS: &str = "id, restaurant_id, name, description, price_minor, \
                            image_url, category, is_veg, is_available";

/// Repository for menu items.
pub struct FoodRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> FoodRepository<'a> {
    /// Create a new food repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a food by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: FoodId) -> Result<Option<Food>, RepositoryError> {
        let row: Option<FoodRow> = sqlx::query_as(&format!(
            "SELECT {FOOD_COLUMNS} FROM storefront.foods WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Food::from))
    }

    /// List all available foods in catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_available(&self) -> Result<Vec<Food>, RepositoryError> {
        let rows: Vec<FoodRow> = sqlx::query_as(&format!(
            "SELECT {FOOD_COLUMNS} FROM storefront.foods WHERE is_available ORDER BY name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Food::from).collect())
    }

    /// List a restaurant's menu, including unavailable items.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list_for_restaurant(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Food>, RepositoryError> {
        let rows: Vec<FoodRow> = sqlx::query_as(&format!(
            "SELECT {FOOD_COLUMNS} FROM storefront.foods WHERE restaurant_id = $1 ORDER BY category, name"
        ))
        .bind(restaurant_id)
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Food::from).collect())
    }
}
