//! Core domain state for the vitrine storefront client.
//!
//! Holds the pieces of state shared across independent UI surfaces: the
//! cart store with its durable persistence, the async-fetch status
//! containers for catalog data, and the environment-driven configuration
//! (tax rate, poll cadence, quantity cap, backend endpoint).

pub mod cart;
pub mod config;
pub mod fetch;
pub mod store;

pub use cart::{CartItem, CartKey, CartTotals};
pub use config::{load_config, load_config_from_env, ConfigError, StoreConfig};
pub use fetch::{FeaturedState, FetchState, FetchStatus, ProductDetailState, ProductListState};
pub use store::{CartStorage, CartStore, JsonFileStorage, MemoryStorage, StorageError};
