//! Typed HTTP client for the storefront backend REST API.
//!
//! Wraps `reqwest` with shop-specific error handling and typed request and
//! response DTOs for the order, payment-preparation, and catalog endpoints.
//! The client never interprets payment-provider data beyond carrying the
//! opaque client secret back to the checkout flow.

pub mod catalog;
pub mod client;
pub mod error;
pub mod types;

pub use client::ShopClient;
pub use error::ApiError;
pub use types::{
    Color, OrderItemDto, OrderRequest, OrderResponse, PaymentIntentResponse, PaymentType, Product,
    ProductCard, ProductFilter, ProductImage, ProductVariant, ShippingAddress, Size, SortKey,
    SortOrder,
};
