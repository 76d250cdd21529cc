use thiserror::Error;

use vitrine_api::ApiError;

use crate::flow::CheckoutStep;
use crate::gateway::GatewayError;

/// A per-field validation failure, rendered next to the offending input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

impl FieldError {
    #[must_use]
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

impl std::fmt::Display for FieldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Errors raised by the checkout flow.
///
/// Every variant converts to step-local UI state; none of these are meant
/// to escape to a global error boundary.
#[derive(Debug, Error)]
pub enum CheckoutError {
    /// One entry per invalid form field; the step does not advance.
    #[error("validation failed for {} field(s)", .0.len())]
    Validation(Vec<FieldError>),

    /// The backend rejected or failed order creation; no order id exists
    /// afterwards and resubmitting the step retries from scratch.
    #[error("order creation failed: {0}")]
    OrderCreation(#[from] ApiError),

    /// The payment provider reported a failure. The order and its client
    /// secret are kept so the user can retry without a second order.
    #[error("payment failed: {0}")]
    Payment(#[from] GatewayError),

    /// Payment was attempted before a client secret was obtained.
    #[error("no client secret available; the order must be created first")]
    MissingClientSecret,

    /// The requested operation is not valid in the current step.
    #[error("cannot {action} while in the {from:?} step")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    /// Checkout cannot start or submit with an empty cart.
    #[error("the cart is empty")]
    EmptyCart,
}

impl CheckoutError {
    /// The per-field messages, if this is a validation failure.
    #[must_use]
    pub fn field_errors(&self) -> &[FieldError] {
        match self {
            CheckoutError::Validation(errors) => errors,
            _ => &[],
        }
    }
}
