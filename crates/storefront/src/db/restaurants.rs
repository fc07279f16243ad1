//! Restaurant repository for database operations.

use rust_decimal::Decimal;
use sqlx::PgPool;

use foodiehub_core::RestaurantId;

use super::RepositoryError;
use crate::models::Restaurant;

#[derive(sqlx::FromRow)]
struct RestaurantRow {
    id: RestaurantId,
    name: String,
    description: Option<String>,
    image_url: Option<String>,
    cuisines: Vec<String>,
    rating: Decimal,
    is_veg: bool,
}

impl From<RestaurantRow> for Restaurant {
    fn from(row: RestaurantRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            description: row.description,
            image_url: row.image_url,
            cuisines: row.cuisines,
            rating: row.rating,
            is_veg: row.is_veg,
        }
    }
}

const RESTAURANT_COLUMNS: &str = "id, name, description, image_url, cuisines, rating, is_veg";

/// Repository for restaurants.
pub struct RestaurantRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> RestaurantRepository<'a> {
    /// Create a new restaurant repository.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Get a restaurant by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn get_by_id(&self, id: RestaurantId) -> Result<Option<Restaurant>, RepositoryError> {
        let row: Option<RestaurantRow> = sqlx::query_as(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM storefront.restaurants WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        Ok(row.map(Restaurant::from))
    }

    /// List all restaurants, best-rated first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn list(&self) -> Result<Vec<Restaurant>, RepositoryError> {
        let rows: Vec<RestaurantRow> = sqlx::query_as(&format!(
            "SELECT {RESTAURANT_COLUMNS} FROM storefront.restaurants ORDER BY rating DESC, name"
        ))
        .fetch_all(self.pool)
        .await?;

        Ok(rows.into_iter().map(Restaurant::from).collect())
    }
}
