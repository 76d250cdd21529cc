//! The checkout state machine.
//!
//! One `CheckoutFlow` lives for one checkout attempt. It walks the steps
//! strictly forward (address → payment → recap → confirmation, with
//! backward navigation from payment and recap), creates the backend order
//! exactly once, and only clears the cart after the payment provider has
//! confirmed the charge.

use rust_decimal::Decimal;

use vitrine_api::{
    OrderItemDto, OrderRequest, ShippingAddress, ShopClient,
};
use vitrine_core::{CartItem, CartStore, CartTotals, StoreConfig};

use crate::error::CheckoutError;
use crate::form::{CheckoutForm, PaymentMethod};
use crate::gateway::PaymentGateway;

/// Where the user currently is in the checkout funnel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckoutStep {
    Address,
    Payment,
    Recap,
    /// Terminal; no transitions leave this step.
    Confirmation,
}

impl CheckoutStep {
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == CheckoutStep::Confirmation
    }
}

/// The order created for this attempt, held for the rest of the session.
///
/// Once `order_id` is assigned it is immutable: the flow never creates a
/// second order; later payment setups reuse the stored client secret.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlacedOrder {
    pub order_id: i64,
    pub client_secret: Option<String>,
    pub payment_intent_id: Option<String>,
}

/// Read-only summary rendered by the recap step.
#[derive(Debug, Clone)]
pub struct Recap {
    pub shipping: ShippingAddress,
    /// Payment-method label, card numbers masked to their last 4 digits.
    pub payment_label: String,
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

/// One checkout attempt.
pub struct CheckoutFlow {
    step: CheckoutStep,
    form: CheckoutForm,
    currency: String,
    tax_rate: Decimal,
    order: Option<PlacedOrder>,
}

impl std::fmt::Debug for CheckoutFlow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CheckoutFlow")
            .field("step", &self.step)
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

impl CheckoutFlow {
    /// Starts a new attempt at the address step with an empty form.
    #[must_use]
    pub fn new(config: &StoreConfig) -> Self {
        Self {
            step: CheckoutStep::Address,
            form: CheckoutForm::default(),
            currency: config.currency.clone(),
            tax_rate: config.tax_rate,
            order: None,
        }
    }

    #[must_use]
    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    #[must_use]
    pub fn form(&self) -> &CheckoutForm {
        &self.form
    }

    /// Mutable access for field-by-field input binding.
    pub fn form_mut(&mut self) -> &mut CheckoutForm {
        &mut self.form
    }

    /// The order created for this attempt, if any.
    #[must_use]
    pub fn order(&self) -> Option<&PlacedOrder> {
        self.order.as_ref()
    }

    /// Totals for the given items at this attempt's tax rate.
    #[must_use]
    pub fn totals(&self, items: &[CartItem]) -> CartTotals {
        CartTotals::compute(items, self.tax_rate)
    }

    /// Submits the address step.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] outside the address step.
    /// - [`CheckoutError::Validation`] with one entry per missing field;
    ///   the step does not advance.
    pub fn submit_address(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Address {
            return Err(self.invalid("submit the address form"));
        }
        self.form
            .validate_address()
            .map_err(CheckoutError::Validation)?;
        tracing::debug!("address step complete");
        self.step = CheckoutStep::Payment;
        Ok(())
    }

    /// Creates the backend order for this attempt, at most once.
    ///
    /// Called on entering the payment step. If an order already exists the
    /// stored handle (and its client secret) is returned without any HTTP
    /// call. Otherwise every cart line is mapped to an order line with its
    /// total precomputed and posted to the backend; if the response carries
    /// no client secret, one `prepare-payment` call fills it in.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] before the payment step.
    /// - [`CheckoutError::EmptyCart`] with nothing to order.
    /// - [`CheckoutError::Validation`] if the shipping form is incomplete.
    /// - [`CheckoutError::OrderCreation`] on backend failure; no order is
    ///   kept and resubmitting retries from scratch.
    pub async fn ensure_order(
        &mut self,
        client: &ShopClient,
        cart: &CartStore,
    ) -> Result<PlacedOrder, CheckoutError> {
        if let Some(order) = &self.order {
            tracing::debug!(order_id = order.order_id, "reusing existing order");
            return Ok(order.clone());
        }
        if !matches!(self.step, CheckoutStep::Payment | CheckoutStep::Recap) {
            return Err(self.invalid("create the order"));
        }
        let items = cart.items();
        if items.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        self.form
            .validate_address()
            .map_err(CheckoutError::Validation)?;

        let request = OrderRequest {
            shipping_address: self.shipping_address(),
            items: items.iter().map(order_line).collect(),
            currency: self.currency.clone(),
            payment_type: self.form.payment_method.payment_type(),
        };

        let response = client.create_order(&request).await?;
        let mut placed = PlacedOrder {
            order_id: response.order_id,
            client_secret: response.client_secret,
            payment_intent_id: response.payment_intent_id,
        };
        if placed.client_secret.is_none() {
            let intent = client.prepare_payment(placed.order_id).await?;
            placed.client_secret = Some(intent.client_secret);
            placed.payment_intent_id = Some(intent.payment_intent_id);
        }
        tracing::info!(order_id = placed.order_id, "order created");
        self.order = Some(placed.clone());
        Ok(placed)
    }

    /// Confirms the payment through the provider and finalizes the attempt.
    ///
    /// On provider-reported success the cart is cleared, the flow moves to
    /// the terminal confirmation step, and the order id is returned for
    /// navigation to the confirmation route. On failure nothing advances
    /// and the stored order/client secret is kept for retry.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] outside the payment/recap steps.
    /// - [`CheckoutError::MissingClientSecret`] before the order exists.
    /// - [`CheckoutError::Payment`] on provider failure.
    pub async fn confirm_payment<G: PaymentGateway>(
        &mut self,
        gateway: &G,
        cart: &CartStore,
    ) -> Result<i64, CheckoutError> {
        if !matches!(self.step, CheckoutStep::Payment | CheckoutStep::Recap) {
            return Err(self.invalid("confirm payment"));
        }
        let Some(order) = &mut self.order else {
            return Err(CheckoutError::MissingClientSecret);
        };
        let Some(secret) = order.client_secret.clone() else {
            return Err(CheckoutError::MissingClientSecret);
        };

        let confirmation = gateway.confirm_payment(&secret).await?;
        order.payment_intent_id = Some(confirmation.payment_id);
        let order_id = order.order_id;

        // Cart-clear strictly follows confirmed payment, never precedes it.
        cart.clear();
        self.step = CheckoutStep::Confirmation;
        tracing::info!(order_id, "payment confirmed, checkout complete");
        Ok(order_id)
    }

    /// Legacy path: validates the directly captured card or PayPal fields
    /// and advances to the recap step.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] outside the payment step.
    /// - [`CheckoutError::Validation`] per malformed field.
    pub fn submit_payment_details(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(self.invalid("submit payment details"));
        }
        self.form
            .validate_payment_details()
            .map_err(CheckoutError::Validation)?;
        self.step = CheckoutStep::Recap;
        Ok(())
    }

    /// Legacy path: final commit from the recap step — clears the cart and
    /// reaches confirmation. The widget-driven flow folds this into
    /// [`CheckoutFlow::confirm_payment`] instead.
    ///
    /// # Errors
    ///
    /// - [`CheckoutError::InvalidTransition`] outside the recap step.
    /// - [`CheckoutError::EmptyCart`] with nothing to commit.
    pub fn submit_recap(&mut self, cart: &CartStore) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Recap {
            return Err(self.invalid("confirm the order"));
        }
        if cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        cart.clear();
        self.step = CheckoutStep::Confirmation;
        Ok(())
    }

    /// The read-only recap: shipping address, masked payment label, items,
    /// and totals at this attempt's tax rate.
    #[must_use]
    pub fn recap(&self, items: Vec<CartItem>) -> Recap {
        let payment_label = match self.form.payment_method {
            PaymentMethod::Card => self
                .form
                .masked_card()
                .map_or_else(|| "Card".to_owned(), |masked| format!("Card {masked}")),
            PaymentMethod::Paypal => format!("PayPal ({})", self.form.paypal_email),
        };
        let totals = self.totals(&items);
        Recap {
            shipping: self.shipping_address(),
            payment_label,
            items,
            totals,
        }
    }

    /// Navigates one step back: payment → address or recap → payment.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::InvalidTransition`] from the address or
    /// confirmation steps.
    pub fn back(&mut self) -> Result<(), CheckoutError> {
        self.step = match self.step {
            CheckoutStep::Payment => CheckoutStep::Address,
            CheckoutStep::Recap => CheckoutStep::Payment,
            CheckoutStep::Address | CheckoutStep::Confirmation => {
                return Err(self.invalid("navigate back"));
            }
        };
        Ok(())
    }

    fn shipping_address(&self) -> ShippingAddress {
        let phone = self.form.phone.trim();
        ShippingAddress {
            first_name: self.form.first_name.clone(),
            last_name: self.form.last_name.clone(),
            email: self.form.email.clone(),
            address: self.form.address.clone(),
            city: self.form.city.clone(),
            postal_code: self.form.postal_code.clone(),
            country: self.form.country.clone(),
            phone: (!phone.is_empty()).then(|| phone.to_owned()),
        }
    }

    fn invalid(&self, action: &'static str) -> CheckoutError {
        CheckoutError::InvalidTransition {
            from: self.step,
            action,
        }
    }
}

/// Maps one cart line into the order line submitted to the backend, with
/// the line total precomputed.
fn order_line(item: &CartItem) -> OrderItemDto {
    OrderItemDto {
        product_id: item.product_id,
        product_variant_id: item.variant_id,
        product_name: item.name.clone(),
        quantity: item.quantity,
        unit_price: item.price,
        total: item.line_total(),
    }
}
