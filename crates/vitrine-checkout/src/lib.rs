//! Checkout orchestration for the vitrine storefront.
//!
//! Drives the multi-step flow (address → payment → recap → confirmation):
//! validates each step, creates the backend order exactly once per
//! attempt, exchanges it for a payment-provider client secret, hands off
//! to the [`gateway::PaymentGateway`] boundary, and finalizes by clearing
//! the cart. After redirect, [`poller`] watches the order until the
//! backend confirms payment capture.

pub mod error;
pub mod flow;
pub mod form;
pub mod gateway;
pub mod poller;

pub use error::{CheckoutError, FieldError};
pub use flow::{CheckoutFlow, CheckoutStep, PlacedOrder, Recap};
pub use form::{CheckoutForm, PaymentMethod};
pub use gateway::{GatewayError, PaymentConfirmation, PaymentGateway};
pub use poller::{poll_order_status, spawn_poller, PollHandle, PollOutcome, PollUpdate};
