//! Catalog read side: food and restaurant lookup.
//!
//! Menu reads are hot and nearly static, so lookups go through a `moka`
//! cache (5-minute TTL) in front of the repositories. The cart never
//! calls into this module itself; callers fetch a [`FoodSnapshot`] here
//! and hand it to the cart.

pub mod filter;

pub use filter::{DietFilter, FoodFilter, PriceRange, RestaurantFilter};

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use sqlx::PgPool;
use tracing::{debug, instrument};

use foodiehub_core::{FoodId, RestaurantId};

use crate::cart::store::FoodSnapshot;
use crate::db::RepositoryError;
use crate::db::foods::FoodRepository;
use crate::db::restaurants::RestaurantRepository;
use crate::models::{Food, Restaurant};

/// Shown when a food's restaurant row is missing.
const UNKNOWN_RESTAURANT: &str = "Unknown Restaurant";

/// Cached catalog lookups.
///
/// Cheaply cloneable; clones share the same cache.
#[derive(Clone)]
pub struct CatalogService {
    inner: Arc<CatalogServiceInner>,
}

struct CatalogServiceInner {
    pool: PgPool,
    foods: Cache<FoodId, Food>,
    restaurant_names: Cache<RestaurantId, String>,
}

impl CatalogService {
    /// Create a catalog service over a connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        let foods = Cache::builder()
            .max_capacity(2000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();
        let restaurant_names = Cache::builder()
            .max_capacity(500)
            .time_to_live(Duration::from_secs(300))
            .build();

        Self {
            inner: Arc::new(CatalogServiceInner {
                pool,
                foods,
                restaurant_names,
            }),
        }
    }

    /// Look up a food by id, serving repeated reads from cache.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails.
    #[instrument(skip(self))]
    pub async fn get_food(&self, id: FoodId) -> Result<Option<Food>, RepositoryError> {
        if let Some(food) = self.inner.foods.get(&id).await {
            return Ok(Some(food));
        }

        let repo = FoodRepository::new(&self.inner.pool);
        let Some(food) = repo.get_by_id(id).await? else {
            return Ok(None);
        };

        self.inner.foods.insert(id, food.clone()).await;
        Ok(Some(food))
    }

    /// Look up a restaurant's display name, cached.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the underlying query fails.
    pub async fn restaurant_name(
        &self,
        id: RestaurantId,
    ) -> Result<Option<String>, RepositoryError> {
        if let Some(name) = self.inner.restaurant_names.get(&id).await {
            return Ok(Some(name));
        }

        let repo = RestaurantRepository::new(&self.inner.pool);
        let Some(restaurant) = repo.get_by_id(id).await? else {
            return Ok(None);
        };

        self.inner
            .restaurant_names
            .insert(id, restaurant.name.clone())
            .await;
        Ok(Some(restaurant.name))
    }

    /// Build the add-time cart snapshot for a food.
    ///
    /// Returns `None` for a missing or unavailable food; the cart is left
    /// for the caller to leave unchanged in that case. A missing
    /// restaurant row degrades to a placeholder name rather than failing
    /// the add.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a lookup query fails.
    #[instrument(skip(self))]
    pub async fn snapshot_for_cart(
        &self,
        id: FoodId,
    ) -> Result<Option<FoodSnapshot>, RepositoryError> {
        let Some(food) = self.get_food(id).await? else {
            return Ok(None);
        };

        if !food.is_available {
            debug!(food_id = %id, "food unavailable, not snapshotting for cart");
            return Ok(None);
        }

        let restaurant_name = self
            .restaurant_name(food.restaurant_id)
            .await?
            .unwrap_or_else(|| UNKNOWN_RESTAURANT.to_owned());

        Ok(Some(food.to_cart_snapshot(restaurant_name)))
    }

    /// The filtered menu listing: available foods passing the filter, in
    /// catalog order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the listing query fails.
    pub async fn menu(&self, food_filter: &FoodFilter) -> Result<Vec<Food>, RepositoryError> {
        let foods = FoodRepository::new(&self.inner.pool).list_available().await?;
        Ok(foods
            .into_iter()
            .filter(|food| food_filter.matches(food))
            .collect())
    }

    /// A restaurant's full menu for the detail page, unavailable items
    /// included (they render greyed out rather than disappearing).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the listing query fails.
    pub async fn restaurant_menu(
        &self,
        restaurant_id: RestaurantId,
    ) -> Result<Vec<Food>, RepositoryError> {
        FoodRepository::new(&self.inner.pool)
            .list_for_restaurant(restaurant_id)
            .await
    }

    /// The filtered restaurant listing.
    ///
    /// The menu is loaded alongside because the search predicate matches
    /// restaurants through their menu item names.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a listing query fails.
    pub async fn restaurants(
        &self,
        restaurant_filter: &RestaurantFilter,
    ) -> Result<Vec<Restaurant>, RepositoryError> {
        let restaurants = RestaurantRepository::new(&self.inner.pool).list().await?;
        let menu = FoodRepository::new(&self.inner.pool).list_available().await?;
        Ok(restaurants
            .into_iter()
            .filter(|restaurant| restaurant_filter.matches(restaurant, &menu))
            .collect())
    }
}
