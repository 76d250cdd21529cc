//! Request and response DTOs for the storefront backend.
//!
//! All shapes mirror the backend's JSON (camelCase fields, prices as
//! numbers). Money is `rust_decimal::Decimal` end to end so totals are
//! exact; the backend is expected to echo the client-computed line totals.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The order status the backend sets once payment capture is confirmed.
pub const PAID_STATUS: &str = "PAYEE";

/// Shipping address collected during the checkout address step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingAddress {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

/// One order line as submitted to and echoed by the backend.
///
/// `total` is computed client-side as `unit_price × quantity` before
/// submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemDto {
    pub product_id: i64,
    pub product_variant_id: i64,
    pub product_name: String,
    pub quantity: u32,
    pub unit_price: Decimal,
    pub total: Decimal,
}

/// Which payment provider the order is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentType {
    Stripe,
    Paypal,
}

/// Body of `POST /orders`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub shipping_address: ShippingAddress,
    pub items: Vec<OrderItemDto>,
    pub currency: String,
    pub payment_type: PaymentType,
}

/// Response of `POST /orders` and `GET /orders/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub order_id: i64,
    pub status: String,
    pub total_amount: Decimal,
    pub currency: String,
    pub payment_type: PaymentType,
    #[serde(default)]
    pub client_secret: Option<String>,
    #[serde(default)]
    pub payment_intent_id: Option<String>,
    #[serde(default)]
    pub payment_status: Option<String>,
    pub shipping_address: ShippingAddress,
    #[serde(default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItemDto>,
}

impl OrderResponse {
    /// `true` once the backend has confirmed payment capture.
    #[must_use]
    pub fn is_paid(&self) -> bool {
        self.status == PAID_STATUS
    }
}

/// Response of `POST /orders/{id}/prepare-payment`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentResponse {
    pub client_secret: String,
    pub payment_intent_id: String,
}

/// Catalog card as returned by the listing and featured endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCard {
    pub id: i64,
    pub variant_id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Full product detail, including all color/size variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: Decimal,
    #[serde(default)]
    pub original_price: Option<Decimal>,
    #[serde(default)]
    pub is_new: bool,
    #[serde(default)]
    pub is_best_seller: bool,
    #[serde(default)]
    pub is_featured: bool,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub main_image_url: Option<String>,
    pub category_id: i64,
    #[serde(default)]
    pub common_images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl Product {
    /// The variant with the given id, if any.
    #[must_use]
    pub fn variant(&self, variant_id: i64) -> Option<&ProductVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }
}

/// One purchasable color/size combination with its own stock and SKU.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub id: i64,
    pub color: Color,
    pub size: Size,
    pub stock: i32,
    pub sku: String,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub available: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductImage {
    pub id: i64,
    pub image_url: String,
    #[serde(default)]
    pub is_main: bool,
    #[serde(default)]
    pub display_order: Option<i32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    pub id: i64,
    pub name: String,
    pub hex_code: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Size {
    pub id: i64,
    pub name: String,
    pub code: String,
}

/// Which catalog attribute to sort the listing by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Price,
    Rating,
    Popularity,
}

impl SortKey {
    fn query_name(self) -> &'static str {
        match self {
            SortKey::Price => "price",
            SortKey::Rating => "rating",
            SortKey::Popularity => "popularity",
        }
    }
}

/// Sort direction; ascending when unspecified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    fn query_value(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

/// Filter parameters for `GET /products/filter`.
///
/// The backend takes one query pair per active sort key, e.g.
/// `?price=desc`; an empty filter sends no parameters at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProductFilter {
    pub sort_by: Option<SortKey>,
    pub order: Option<SortOrder>,
}

impl ProductFilter {
    #[must_use]
    pub fn sorted_by(sort_by: SortKey, order: SortOrder) -> Self {
        Self {
            sort_by: Some(sort_by),
            order: Some(order),
        }
    }

    /// The query pairs this filter adds to the listing request.
    #[must_use]
    pub fn query_pairs(&self) -> Vec<(&'static str, &'static str)> {
        match self.sort_by {
            Some(key) => vec![(
                key.query_name(),
                self.order.unwrap_or_default().query_value(),
            )],
            None => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_request_serializes_camel_case() {
        let request = OrderRequest {
            shipping_address: ShippingAddress {
                first_name: "Awa".to_owned(),
                last_name: "Diop".to_owned(),
                email: "awa@example.com".to_owned(),
                address: "12 rue des Lilas".to_owned(),
                city: "Paris".to_owned(),
                postal_code: "75011".to_owned(),
                country: "France".to_owned(),
                phone: None,
            },
            items: vec![OrderItemDto {
                product_id: 1,
                product_variant_id: 10,
                product_name: "Oversized Hoodie".to_owned(),
                quantity: 2,
                unit_price: "50".parse().unwrap(),
                total: "100".parse().unwrap(),
            }],
            currency: "EUR".to_owned(),
            payment_type: PaymentType::Stripe,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["shippingAddress"]["firstName"], "Awa");
        assert_eq!(json["items"][0]["productVariantId"], 10);
        assert_eq!(json["paymentType"], "STRIPE");
        assert!(json["shippingAddress"].get("phone").is_none());
    }

    #[test]
    fn order_response_parses_with_missing_optionals() {
        let body = serde_json::json!({
            "orderId": 42,
            "status": "EN_ATTENTE",
            "totalAmount": 120.0,
            "currency": "EUR",
            "paymentType": "STRIPE",
            "shippingAddress": {
                "firstName": "Awa", "lastName": "Diop", "email": "awa@example.com",
                "address": "12 rue des Lilas", "city": "Paris",
                "postalCode": "75011", "country": "France"
            }
        });
        let order: OrderResponse = serde_json::from_value(body).unwrap();
        assert_eq!(order.order_id, 42);
        assert!(order.client_secret.is_none());
        assert!(order.items.is_empty());
        assert!(!order.is_paid());
    }

    #[test]
    fn paid_status_is_terminal() {
        let body = serde_json::json!({
            "orderId": 1,
            "status": "PAYEE",
            "totalAmount": 10.0,
            "currency": "EUR",
            "paymentType": "PAYPAL",
            "shippingAddress": {
                "firstName": "A", "lastName": "B", "email": "a@b.c",
                "address": "x", "city": "y", "postalCode": "z", "country": "w"
            }
        });
        let order: OrderResponse = serde_json::from_value(body).unwrap();
        assert!(order.is_paid());
    }

    #[test]
    fn filter_maps_sort_key_to_one_query_pair() {
        let filter = ProductFilter::sorted_by(SortKey::Price, SortOrder::Desc);
        assert_eq!(filter.query_pairs(), vec![("price", "desc")]);

        let filter = ProductFilter {
            sort_by: Some(SortKey::Popularity),
            order: None,
        };
        assert_eq!(filter.query_pairs(), vec![("popularity", "asc")]);
    }

    #[test]
    fn empty_filter_adds_no_query_pairs() {
        assert!(ProductFilter::default().query_pairs().is_empty());
    }
}
