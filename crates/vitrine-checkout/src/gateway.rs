//! Boundary to the payment provider's client library.
//!
//! The checkout core treats the provider as an opaque capability: given a
//! client secret it either returns a provider-issued payment confirmation
//! id or an error message. Card data never crosses this boundary in the
//! primary flow; the provider's hosted UI collects it.

use thiserror::Error;

/// Provider-reported payment failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GatewayError {
    /// The provider processed the attempt and declined it.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The provider could not be reached or was not ready.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),
}

/// Successful confirmation from the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentConfirmation {
    /// Provider-issued payment identifier (e.g. a payment-intent id).
    pub payment_id: String,
}

/// One payment confirmation attempt against the provider.
pub trait PaymentGateway {
    /// Confirms the payment authorized by `client_secret`.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayError`] when the provider declines the payment or
    /// cannot be reached; the caller keeps its order and client secret so
    /// the user can retry.
    fn confirm_payment(
        &self,
        client_secret: &str,
    ) -> impl std::future::Future<Output = Result<PaymentConfirmation, GatewayError>> + Send;
}
