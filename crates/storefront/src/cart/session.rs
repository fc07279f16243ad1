//! Single-owner cart handle with change notification.
//!
//! The browser-side implementation kept cart state in a framework-managed
//! reactive context; here the same contract is an explicit handle owning
//! the [`CartStore`] plus a `watch` channel of snapshots. Mutations are
//! serialized behind a mutex because add's check-then-increment is not
//! atomic across the two steps, and every mutation publishes a fresh
//! snapshot for subscribers to re-render from.

use std::sync::Arc;

use tokio::sync::{Mutex, watch};
use tracing::instrument;

use foodiehub_core::{FoodId, UserId};

use crate::cart::store::{CartSnapshot, CartStore, FoodSnapshot};
use crate::db::RepositoryError;
use crate::db::carts::CartRepository;

/// Shared handle to one session's cart.
///
/// Cheaply cloneable; all clones observe and mutate the same cart.
#[derive(Clone)]
pub struct CartSession {
    inner: Arc<CartSessionInner>,
}

struct CartSessionInner {
    store: Mutex<CartStore>,
    changes: watch::Sender<CartSnapshot>,
    user: Option<UserId>,
}

impl CartSession {
    /// Create an empty cart for an anonymous session.
    #[must_use]
    pub fn new() -> Self {
        Self::build(None)
    }

    /// Create an empty cart owned by an authenticated user.
    ///
    /// Call [`Self::hydrate`] afterwards to load any persisted cart rows.
    #[must_use]
    pub fn for_user(user: UserId) -> Self {
        Self::build(Some(user))
    }

    fn build(user: Option<UserId>) -> Self {
        let (changes, _) = watch::channel(CartSnapshot::default());
        Self {
            inner: Arc::new(CartSessionInner {
                store: Mutex::new(CartStore::new()),
                changes,
                user,
            }),
        }
    }

    /// The authenticated owner, if any.
    #[must_use]
    pub fn user(&self) -> Option<UserId> {
        self.inner.user
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver always holds the latest [`CartSnapshot`]; observers
    /// re-render from it and never hold a reference into the store.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartSnapshot> {
        self.inner.changes.subscribe()
    }

    /// Add one unit of a food, returning the resulting snapshot.
    pub async fn add_item(&self, snapshot: FoodSnapshot) -> CartSnapshot {
        self.mutate(|store| store.add_item(snapshot)).await
    }

    /// Set a line's quantity to an absolute value (0 or less removes it).
    pub async fn set_quantity(&self, food_id: FoodId, quantity: i64) -> CartSnapshot {
        self.mutate(|store| store.set_quantity(food_id, quantity))
            .await
    }

    /// Remove a line if present.
    pub async fn remove_item(&self, food_id: FoodId) -> CartSnapshot {
        self.mutate(|store| store.remove_item(food_id)).await
    }

    /// Empty the cart.
    pub async fn clear(&self) -> CartSnapshot {
        self.mutate(CartStore::clear).await
    }

    /// Current snapshot without mutating.
    pub async fn snapshot(&self) -> CartSnapshot {
        self.inner.store.lock().await.snapshot()
    }

    /// Replace the in-memory cart with the user's persisted rows.
    ///
    /// Anonymous sessions have nothing persisted and keep their current
    /// state. The loaded snapshot is published to subscribers.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if loading fails; the in-memory cart is
    /// left untouched in that case.
    #[instrument(skip(self, repo))]
    pub async fn hydrate(&self, repo: &CartRepository<'_>) -> Result<CartSnapshot, RepositoryError> {
        let Some(user) = self.inner.user else {
            return Ok(self.snapshot().await);
        };

        let rows = repo.load(user).await?;
        let mut store = self.inner.store.lock().await;
        *store = CartStore::hydrate(rows);
        let snapshot = store.snapshot();
        drop(store);

        self.inner.changes.send_replace(snapshot.clone());
        Ok(snapshot)
    }

    /// Persist the current cart rows for the session user.
    ///
    /// A no-op for anonymous sessions. Failure is reported to the caller
    /// and never rolls back the in-memory state (local-first).
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError` if the save fails.
    #[instrument(skip(self, repo))]
    pub async fn persist(&self, repo: &CartRepository<'_>) -> Result<(), RepositoryError> {
        let Some(user) = self.inner.user else {
            return Ok(());
        };

        let snapshot = self.snapshot().await;
        repo.replace(user, &snapshot.items).await
    }

    async fn mutate(&self, f: impl FnOnce(&mut CartStore)) -> CartSnapshot {
        let mut store = self.inner.store.lock().await;
        f(&mut store);
        let snapshot = store.snapshot();
        drop(store);

        self.inner.changes.send_replace(snapshot.clone());
        snapshot
    }
}

impl Default for CartSession {
    fn default() -> Self {
        Self::new()
    }
}
