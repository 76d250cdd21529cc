//! HTTP client for the storefront backend.
//!
//! Wraps `reqwest` with backend-specific error mapping and typed
//! deserialization. A 404 on an order lookup surfaces as
//! [`ApiError::NotFound`] so the confirmation view can render a terminal
//! "order not found" message instead of retrying.

use std::time::Duration;

use reqwest::{Client, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ApiError;
use crate::types::{OrderRequest, OrderResponse, PaymentIntentResponse};

const DEFAULT_USER_AGENT: &str = "vitrine/0.1 (storefront-client)";

/// Client for the storefront backend REST API.
///
/// Manages the HTTP client and base URL. Use [`ShopClient::new`] for the
/// configured backend or [`ShopClient::with_base_url`] to point at a mock
/// server in tests.
#[derive(Debug, Clone)]
pub struct ShopClient {
    client: Client,
    base_url: Url,
}

impl ShopClient {
    /// Creates a new client for the backend at `base_url`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed, or [`ApiError::InvalidBaseUrl`] if
    /// `base_url` does not parse.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        Self::with_base_url(base_url, timeout_secs)
    }

    /// Creates a new client with an explicit base URL (for testing with
    /// wiremock).
    ///
    /// # Errors
    ///
    /// Same conditions as [`ShopClient::new`].
    pub fn with_base_url(base_url: &str, timeout_secs: u64) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;

        // Normalise: the base URL must end with exactly one slash so that
        // Url::join appends endpoint paths instead of replacing the last
        // path segment.
        let normalised = format!("{}/", base_url.trim_end_matches('/'));
        let base_url = Url::parse(&normalised)
            .map_err(|_| ApiError::InvalidBaseUrl(base_url.to_owned()))?;

        Ok(Self { client, base_url })
    }

    /// Creates the order on the backend.
    ///
    /// Calls `POST /orders` with the full item list; line totals are
    /// computed by the caller before submission.
    ///
    /// # Errors
    ///
    /// - [`ApiError::Http`] on network failure.
    /// - [`ApiError::UnexpectedStatus`] on a non-2xx response.
    /// - [`ApiError::Deserialize`] if the response body is malformed.
    pub async fn create_order(&self, request: &OrderRequest) -> Result<OrderResponse, ApiError> {
        let url = self.endpoint("orders")?;
        tracing::debug!(items = request.items.len(), "creating order");
        self.post_json(url, request).await
    }

    /// Asks the backend to create a payment intent for an existing order.
    ///
    /// Calls `POST /orders/{id}/prepare-payment` and returns the provider
    /// client secret the payment widget binds to.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the order does not exist.
    /// - [`ApiError::Http`], [`ApiError::UnexpectedStatus`],
    ///   [`ApiError::Deserialize`] as for any call.
    pub async fn prepare_payment(&self, order_id: i64) -> Result<PaymentIntentResponse, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}/prepare-payment"))?;
        let response = self.client.post(url.clone()).send().await?;
        Self::decode(url, response).await
    }

    /// Fetches an order by id, including its current status.
    ///
    /// This is what the confirmation view polls until the status reaches
    /// the terminal paid value.
    ///
    /// # Errors
    ///
    /// - [`ApiError::NotFound`] if the order id does not resolve.
    /// - [`ApiError::Http`], [`ApiError::UnexpectedStatus`],
    ///   [`ApiError::Deserialize`] as for any call.
    pub async fn get_order(&self, order_id: i64) -> Result<OrderResponse, ApiError> {
        let url = self.endpoint(&format!("orders/{order_id}"))?;
        self.get_json(url).await
    }

    pub(crate) fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|_| ApiError::InvalidBaseUrl(format!("{}{path}", self.base_url)))
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        let response = self.client.get(url.clone()).send().await?;
        Self::decode(url, response).await
    }

    pub(crate) async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.client.post(url.clone()).json(body).send().await?;
        Self::decode(url, response).await
    }

    /// Maps the HTTP status, then parses the body as JSON with the request
    /// URL as deserialization context.
    async fn decode<T: DeserializeOwned>(
        url: Url,
        response: reqwest::Response,
    ) -> Result<T, ApiError> {
        let status = response.status();
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(url.to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.text().await?;
        serde_json::from_str(&body).map_err(|e| ApiError::Deserialize {
            context: url.to_string(),
            source: e,
        })
    }
}
