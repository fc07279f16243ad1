//! Add-to-cart and checkout flows.
//!
//! The cart is local-first: every flow mutates the in-memory session
//! first and treats persistence as a trailing side effect. A failing
//! database write is logged and reported where the contract requires it,
//! but it never rolls back or blocks the session state.

use sqlx::PgPool;
use tracing::{instrument, warn};

use foodiehub_core::{FoodId, UserId};

use crate::cart::session::CartSession;
use crate::cart::store::CartSnapshot;
use crate::catalog::CatalogService;
use crate::checkout::{CheckoutPolicy, OrderTotals};
use crate::db::RepositoryError;
use crate::db::carts::CartRepository;
use crate::db::orders::OrderRepository;
use crate::models::{Order, OrderLine};

/// Errors from ordering flows.
#[derive(Debug, thiserror::Error)]
pub enum OrderingError {
    /// A repository operation failed.
    #[error("repository error: {0}")]
    Repository(#[from] RepositoryError),

    /// Guests cannot place orders; the session has no user.
    #[error("sign in to place an order")]
    GuestCheckout,

    /// The cart was empty at checkout time.
    #[error("cannot place an order from an empty cart")]
    EmptyCart,
}

/// Flows that span catalog, cart, and orders.
#[derive(Clone)]
pub struct OrderingService {
    catalog: CatalogService,
    pool: PgPool,
}

impl OrderingService {
    /// Create an ordering service.
    #[must_use]
    pub const fn new(catalog: CatalogService, pool: PgPool) -> Self {
        Self { catalog, pool }
    }

    /// Load the session user's persisted cart into the session.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the load fails; the in-memory cart is
    /// left untouched.
    pub async fn restore_cart(
        &self,
        session: &CartSession,
    ) -> Result<CartSnapshot, RepositoryError> {
        session.hydrate(&CartRepository::new(&self.pool)).await
    }

    /// Add one unit of a food to the session cart.
    ///
    /// Returns `Ok(false)` without touching the cart when the food is
    /// missing or unavailable.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the catalog lookup fails.
    #[instrument(skip(self, session))]
    pub async fn add_to_cart(
        &self,
        session: &CartSession,
        food_id: FoodId,
    ) -> Result<bool, RepositoryError> {
        let Some(snapshot) = self.catalog.snapshot_for_cart(food_id).await? else {
            return Ok(false);
        };

        session.add_item(snapshot).await;
        self.persist_best_effort(session).await;
        Ok(true)
    }

    /// Set a line's quantity to an absolute value (0 or less removes it).
    pub async fn set_quantity(
        &self,
        session: &CartSession,
        food_id: FoodId,
        quantity: i64,
    ) -> CartSnapshot {
        let snapshot = session.set_quantity(food_id, quantity).await;
        self.persist_best_effort(session).await;
        snapshot
    }

    /// Remove a line from the session cart.
    pub async fn remove_from_cart(&self, session: &CartSession, food_id: FoodId) -> CartSnapshot {
        let snapshot = session.remove_item(food_id).await;
        self.persist_best_effort(session).await;
        snapshot
    }

    /// Empty the session cart.
    pub async fn clear_cart(&self, session: &CartSession) -> CartSnapshot {
        let snapshot = session.clear().await;
        self.persist_best_effort(session).await;
        snapshot
    }

    /// Place an order from the session cart.
    ///
    /// Totals are computed from the live snapshot with the supplied
    /// policy, the order is written transactionally, and only then is the
    /// cart cleared (in memory and in the store).
    ///
    /// # Errors
    ///
    /// Returns `OrderingError::GuestCheckout` for anonymous sessions,
    /// `OrderingError::EmptyCart` for an empty cart, and
    /// `OrderingError::Repository` if the order insert fails — the cart
    /// is left intact in that case so the user can retry.
    #[instrument(skip(self, session, policy))]
    pub async fn place_order(
        &self,
        session: &CartSession,
        delivery_address: Option<&str>,
        policy: &CheckoutPolicy,
    ) -> Result<Order, OrderingError> {
        let Some(user) = session.user() else {
            return Err(OrderingError::GuestCheckout);
        };

        let snapshot = session.snapshot().await;
        if snapshot.is_empty() {
            return Err(OrderingError::EmptyCart);
        }

        let totals = OrderTotals::for_snapshot(&snapshot, policy);
        let order = OrderRepository::new(&self.pool)
            .create(user, delivery_address, &snapshot.items, &totals)
            .await?;

        session.clear().await;
        self.persist_best_effort(session).await;
        Ok(order)
    }

    /// A user's past orders with their denormalized lines, newest first.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if a query fails.
    pub async fn order_history(
        &self,
        user: UserId,
    ) -> Result<Vec<(Order, Vec<OrderLine>)>, RepositoryError> {
        let repo = OrderRepository::new(&self.pool);
        let orders = repo.list_for_user(user).await?;

        let mut history = Vec::with_capacity(orders.len());
        for order in orders {
            let lines = repo.lines(order.id).await?;
            history.push((order, lines));
        }
        Ok(history)
    }

    async fn persist_best_effort(&self, session: &CartSession) {
        if let Err(e) = session.persist(&CartRepository::new(&self.pool)).await {
            warn!(error = %e, "cart persistence failed; in-memory cart remains authoritative");
        }
    }
}
