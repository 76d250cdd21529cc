//! Catalog endpoints: filtered listing, product detail, featured products.

use crate::client::ShopClient;
use crate::error::ApiError;
use crate::types::{Product, ProductCard, ProductFilter};

impl ShopClient {
    /// Fetches the shop listing with the given sort filter applied.
    ///
    /// Calls `GET /products/filter` with one query pair per active sort
    /// key (`?price=asc`, `?rating=desc`, ...).
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ApiError::Deserialize`] if the response shape is unexpected.
    pub async fn filtered_products(
        &self,
        filter: &ProductFilter,
    ) -> Result<Vec<ProductCard>, ApiError> {
        let mut url = self.endpoint("products/filter")?;
        {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in filter.query_pairs() {
                pairs.append_pair(key, value);
            }
        }
        self.get_json(url).await
    }

    /// Fetches a product's full detail with the given variant preselected.
    ///
    /// Calls `GET /products/{id}/with-variant?variantId=`.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the product does not exist.
    /// - [`ApiError::Http`], [`ApiError::UnexpectedStatus`],
    ///   [`ApiError::Deserialize`] as for any call.
    pub async fn product_with_variant(
        &self,
        product_id: i64,
        variant_id: i64,
    ) -> Result<Product, ApiError> {
        let mut url = self.endpoint(&format!("products/{product_id}/with-variant"))?;
        url.query_pairs_mut()
            .append_pair("variantId", &variant_id.to_string());
        self.get_json(url).await
    }

    /// Fetches the most recent featured products (`GET /featured-products/latest`).
    ///
    /// # Errors
    ///
    /// See [`ShopClient::filtered_products`].
    pub async fn latest_featured(&self) -> Result<Vec<ProductCard>, ApiError> {
        let url = self.endpoint("featured-products/latest")?;
        self.get_json(url).await
    }

    /// Fetches all featured products (`GET /featured-products`).
    ///
    /// # Errors
    ///
    /// See [`ShopClient::filtered_products`].
    pub async fn all_featured(&self) -> Result<Vec<ProductCard>, ApiError> {
        let url = self.endpoint("featured-products")?;
        self.get_json(url).await
    }
}
