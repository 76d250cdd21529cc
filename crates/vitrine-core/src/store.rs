//! The cart store: the single owner of cart state across UI surfaces.
//!
//! Every mutating operation rewrites the full item list to the configured
//! [`CartStorage`] backend, and construction re-hydrates from it, so the
//! cart survives page reloads with storage as the sole source of truth.
//! Surfaces that only render (header badge, cart drawer, checkout summary)
//! read synchronous snapshots via [`CartStore::items`] or subscribe to a
//! watch channel for change notifications.

use std::path::{Path, PathBuf};
use std::sync::Mutex;

use rust_decimal::Decimal;
use thiserror::Error;
use tokio::sync::watch;

use crate::cart::{CartItem, CartTotals};

/// Errors from a [`CartStorage`] backend.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    #[error("cart storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The persisted payload could not be serialized.
    #[error("cart serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Durable persistence for the cart item list.
///
/// `load` is called once at store construction; `save` after every
/// mutation. A load failure must hydrate an empty cart, never an error —
/// a corrupt or missing payload is treated the same as a first visit.
pub trait CartStorage: Send + Sync {
    /// Reads the persisted item list, or `None` if nothing usable is stored.
    fn load(&self) -> Option<Vec<CartItem>>;

    /// Persists the full item list.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError`] if the payload cannot be written.
    fn save(&self, items: &[CartItem]) -> Result<(), StorageError>;
}

/// File-backed JSON storage: the whole item list under one fixed path.
#[derive(Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CartStorage for JsonFileStorage {
    fn load(&self) -> Option<Vec<CartItem>> {
        let data = std::fs::read_to_string(&self.path).ok()?;
        match serde_json::from_str(&data) {
            Ok(items) => Some(items),
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "discarding unparsable cart payload");
                None
            }
        }
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        let payload = serde_json::to_string(items).map_err(StorageError::Serialize)?;
        std::fs::write(&self.path, payload)?;
        Ok(())
    }
}

/// In-memory storage for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    saved: Mutex<Option<Vec<CartItem>>>,
}

impl MemoryStorage {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl CartStorage for MemoryStorage {
    fn load(&self) -> Option<Vec<CartItem>> {
        self.saved.lock().ok()?.clone()
    }

    fn save(&self, items: &[CartItem]) -> Result<(), StorageError> {
        if let Ok(mut slot) = self.saved.lock() {
            *slot = Some(items.to_vec());
        }
        Ok(())
    }
}

/// The cart store.
///
/// All writes go through the operations below; mutations are atomic behind
/// the internal lock, so concurrent UI surfaces can never observe a
/// half-applied change. Persistence failures are logged and swallowed — a
/// cart operation itself never fails.
pub struct CartStore {
    items: Mutex<Vec<CartItem>>,
    tx: watch::Sender<Vec<CartItem>>,
    storage: Box<dyn CartStorage>,
    max_quantity: u32,
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("items", &self.items)
            .field("max_quantity", &self.max_quantity)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Creates a store hydrated from `storage`.
    ///
    /// A missing or unparsable payload hydrates an empty cart.
    #[must_use]
    pub fn new(storage: Box<dyn CartStorage>, max_quantity: u32) -> Self {
        let items = storage.load().unwrap_or_default();
        let (tx, _rx) = watch::channel(items.clone());
        Self {
            items: Mutex::new(items),
            tx,
            storage,
            max_quantity,
        }
    }

    /// Adds `item` to the cart.
    ///
    /// If a line with the same `(product_id, variant_id)` already exists,
    /// its quantity is incremented by the incoming quantity; otherwise the
    /// item is appended. Quantities are capped at the configured maximum.
    pub fn add(&self, item: CartItem) {
        self.mutate(|items, max| {
            if let Some(existing) = items.iter_mut().find(|i| i.key() == item.key()) {
                existing.quantity = existing.quantity.saturating_add(item.quantity).min(max);
            } else {
                let mut item = item;
                item.quantity = item.quantity.min(max).max(1);
                items.push(item);
            }
        });
    }

    /// Sets the quantity of the matching line exactly.
    ///
    /// A `quantity` below 1 is a silent no-op: the store clamps, it never
    /// auto-removes. Callers that mean "take this line out" must use
    /// [`CartStore::remove`].
    pub fn update_quantity(&self, product_id: i64, variant_id: i64, quantity: u32) {
        if quantity < 1 {
            return;
        }
        self.mutate(|items, max| {
            if let Some(item) = items
                .iter_mut()
                .find(|i| i.product_id == product_id && i.variant_id == variant_id)
            {
                item.quantity = quantity.min(max);
            }
        });
    }

    /// Removes the matching line; no-op if absent.
    pub fn remove(&self, product_id: i64, variant_id: i64) {
        self.mutate(|items, _| {
            items.retain(|i| !(i.product_id == product_id && i.variant_id == variant_id));
        });
    }

    /// Empties the cart. Called on successful checkout completion.
    pub fn clear(&self) {
        self.mutate(|items, _| items.clear());
    }

    /// A snapshot of the current item list.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.items.lock().map(|i| i.clone()).unwrap_or_default()
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.lock().map(|i| i.len()).unwrap_or(0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Totals over the current snapshot at the given tax rate.
    #[must_use]
    pub fn totals(&self, tax_rate: Decimal) -> CartTotals {
        CartTotals::compute(&self.items(), tax_rate)
    }

    /// Subscribes to cart changes.
    ///
    /// The receiver always holds the latest snapshot, so independent UI
    /// surfaces render from a consistent state.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Vec<CartItem>> {
        self.tx.subscribe()
    }

    fn mutate(&self, f: impl FnOnce(&mut Vec<CartItem>, u32)) {
        let Ok(mut items) = self.items.lock() else {
            return;
        };
        f(&mut items, self.max_quantity);
        if let Err(e) = self.storage.save(&items) {
            tracing::warn!(error = %e, "failed to persist cart; keeping in-memory state");
        }
        let _ = self.tx.send(items.clone());
    }
}
