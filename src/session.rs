//! Session-scoped carts.
//!
//! Each session id maps to its own `Mutex<Cart>`. Handlers hold that lock for the
//! whole of one cart operation, so concurrent requests against the same session
//! apply one after another and the last write wins.
//!
//! Entries only live while they hold something: handlers release a session once
//! its cart is empty, and a periodic sweep drops carts left idle too long.

use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use chrono::{Duration, Utc};
use thiserror::Error;
use tokio::sync::{Mutex, RwLock};

use crate::domain::Cart;

const MAX_SESSION_ID_LEN: usize = 128;

/// Opaque client-chosen session key: 1-128 ASCII letters, digits, `-` or `_`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    pub fn parse(raw: &str) -> Result<Self, SessionIdError> {
        if raw.is_empty() || raw.len() > MAX_SESSION_ID_LEN {
            return Err(SessionIdError::Length(raw.len()));
        }
        if !raw.chars().all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
            return Err(SessionIdError::Charset);
        }
        Ok(Self(raw.to_string()))
    }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionIdError {
    #[error("session id must be 1-128 characters, got {0}")]
    Length(usize),
    #[error("session id may only contain ASCII letters, digits, '-' and '_'")]
    Charset,
}

pub type SharedCart = Arc<Mutex<Cart>>;

#[derive(Debug, Default)]
pub struct SessionStore {
    carts: RwLock<HashMap<SessionId, SharedCart>>,
}

impl SessionStore {
    pub fn new() -> Self { Self::default() }

    /// The session's cart, created empty on first use.
    pub async fn cart(&self, session: &SessionId) -> SharedCart {
        if let Some(cart) = self.existing(session).await {
            return cart;
        }
        let mut carts = self.carts.write().await;
        carts
            .entry(session.clone())
            .or_insert_with(|| {
                tracing::debug!(session = %session, "creating cart for new session");
                Arc::new(Mutex::new(Cart::new()))
            })
            .clone()
    }

    /// The session's cart if one has been created.
    pub async fn existing(&self, session: &SessionId) -> Option<SharedCart> {
        self.carts.read().await.get(session).cloned()
    }

    /// Drops the session's entry if its cart is empty and no request is using it.
    ///
    /// Callers must have dropped their own handle to the cart first.
    pub async fn release_if_empty(&self, session: &SessionId) -> bool {
        let mut carts = self.carts.write().await;
        let Some(cart) = carts.get(session) else { return false };
        let unused = Arc::strong_count(cart) == 1 && cart.try_lock().map_or(false, |c| c.is_empty());
        if unused {
            carts.remove(session);
            tracing::debug!(%session, "released empty cart");
        }
        unused
    }

    /// Drops carts untouched for longer than `max_idle`. Carts in use are kept.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let cutoff = Utc::now() - max_idle;
        let mut carts = self.carts.write().await;
        let before = carts.len();
        carts.retain(|_, cart| {
            Arc::strong_count(cart) > 1 || cart.try_lock().map_or(true, |c| c.updated_at() > cutoff)
        });
        let evicted = before - carts.len();
        if evicted > 0 {
            tracing::info!(evicted, remaining = carts.len(), "evicted idle carts");
        }
        evicted
    }

    pub async fn len(&self) -> usize { self.carts.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.carts.read().await.is_empty() }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::domain::{Money, Product, ProductId};

    fn session(raw: &str) -> SessionId { SessionId::parse(raw).unwrap() }

    #[test]
    fn test_session_id_validation() {
        assert!(SessionId::parse("abc-123_XYZ").is_ok());
        assert_eq!(SessionId::parse(""), Err(SessionIdError::Length(0)));
        assert_eq!(SessionId::parse(&"a".repeat(129)), Err(SessionIdError::Length(129)));
        assert_eq!(SessionId::parse("a b"), Err(SessionIdError::Charset));
        assert_eq!(SessionId::parse("../etc"), Err(SessionIdError::Charset));
    }

    #[tokio::test]
    async fn test_cart_created_once_per_session() {
        let store = SessionStore::new();
        assert!(store.existing(&session("s1")).await.is_none());
        let a = store.cart(&session("s1")).await;
        let b = store.cart(&session("s1")).await;
        assert!(Arc::ptr_eq(&a, &b));
        store.cart(&session("s2")).await;
        assert_eq!(store.len().await, 2);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let catalog = tank_solo();
        let store = SessionStore::new();
        store.cart(&session("alice")).await.lock().await.add_item(&catalog, ProductId::new(1), 2).unwrap();
        assert!(store.cart(&session("bob")).await.lock().await.is_empty());
        assert_eq!(store.cart(&session("alice")).await.lock().await.item_count(), 2);
    }

    fn tank_solo() -> Catalog {
        Catalog::new(vec![
            Product::create(ProductId::new(1), "Tank Solo", "Cartier", "Dress", Money::from_dollars(2_740))
                .unwrap()
                .with_stock(10),
        ])
    }

    #[tokio::test]
    async fn test_release_only_drops_empty_unused_carts() {
        let store = SessionStore::new();
        let (full, empty) = (session("full"), session("empty"));
        store.cart(&full).await.lock().await.add_item(&tank_solo(), ProductId::new(1), 1).unwrap();
        store.cart(&empty).await;

        assert!(!store.release_if_empty(&full).await);
        let held = store.cart(&empty).await;
        assert!(!store.release_if_empty(&empty).await);
        drop(held);
        assert!(store.release_if_empty(&empty).await);
        assert!(!store.release_if_empty(&session("never")).await);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_evict_idle_keeps_recent_and_held_carts() {
        let store = SessionStore::new();
        store.cart(&session("a")).await;
        store.cart(&session("b")).await;
        let held = store.cart(&session("c")).await;

        assert_eq!(store.evict_idle(Duration::hours(1)).await, 0);
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        assert_eq!(store.evict_idle(Duration::zero()).await, 2);
        assert_eq!(store.len().await, 1);
        assert!(Arc::ptr_eq(&held, &store.cart(&session("c")).await));
    }

    #[tokio::test]
    async fn test_concurrent_adds_are_serialized() {
        let catalog = Arc::new(Catalog::new(vec![
            Product::create(ProductId::new(1), "Prospex Diver", "Seiko", "Dive", Money::from_cents(120_000))
                .unwrap()
                .with_stock(1_000),
        ]));
        let store = Arc::new(SessionStore::new());
        let mut handles = vec![];
        for _ in 0..50 {
            let (store, catalog) = (store.clone(), catalog.clone());
            handles.push(tokio::spawn(async move {
                let cart = store.cart(&session("shared")).await;
                let mut cart = cart.lock().await;
                cart.add_item(catalog.as_ref(), ProductId::new(1), 1).map(|_| ())
            }));
        }
        for handle in handles {
            handle.await.unwrap().unwrap();
        }
        let cart = store.cart(&session("shared")).await;
        let cart = cart.lock().await;
        assert_eq!(cart.item_count(), 50);
        assert_eq!(cart.subtotal(), cart.recomputed_subtotal());
        assert_eq!(store.len().await, 1);
    }
}
