//! The checkout form: shipping fields, payment-method selection, and the
//! legacy method-specific fields.
//!
//! In the primary flow card entry is delegated entirely to the payment
//! widget, so the card fields here are only used by the legacy path that
//! captures them directly. Validation is advisory: the backend and the
//! payment provider remain the source of truth.

use std::sync::OnceLock;

use regex::Regex;

use vitrine_api::PaymentType;

use crate::error::FieldError;

fn card_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{16}$").expect("valid card number regex"))
}

fn expiry_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{2}/\d{2}$").expect("valid expiry regex"))
}

fn cvc_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{3,4}$").expect("valid cvc regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"))
}

/// How the user chose to pay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentMethod {
    #[default]
    Card,
    Paypal,
}

impl PaymentMethod {
    /// The backend payment type this method routes through.
    #[must_use]
    pub fn payment_type(self) -> PaymentType {
        match self {
            PaymentMethod::Card => PaymentType::Stripe,
            PaymentMethod::Paypal => PaymentType::Paypal,
        }
    }
}

/// Mutable record of everything the user types during checkout.
///
/// Created empty at checkout start, mutated field by field on input, and
/// discarded when the flow completes or is abandoned.
#[derive(Debug, Clone, Default)]
pub struct CheckoutForm {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
    pub phone: String,

    pub payment_method: PaymentMethod,

    // Legacy direct-capture path only; the widget flow never fills these.
    pub card_number: String,
    pub card_expiry: String,
    pub card_cvc: String,
    pub paypal_email: String,
}

impl CheckoutForm {
    /// Validates the address step: every shipping field except phone must
    /// be present. Email is checked for presence only here; the backend
    /// validates it for real.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per missing field.
    pub fn validate_address(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let require = |errors: &mut Vec<FieldError>, value: &str, field: &'static str, message: &'static str| {
            if value.trim().is_empty() {
                errors.push(FieldError::new(field, message));
            }
        };
        require(&mut errors, &self.first_name, "firstName", "First name is required");
        require(&mut errors, &self.last_name, "lastName", "Last name is required");
        require(&mut errors, &self.email, "email", "Email is required");
        require(&mut errors, &self.address, "address", "Address is required");
        require(&mut errors, &self.city, "city", "City is required");
        require(&mut errors, &self.postal_code, "postalCode", "Postal code is required");
        require(&mut errors, &self.country, "country", "Country is required");
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the legacy card fields: 16 digits (spaces ignored),
    /// `MM/YY` expiry, 3–4 digit CVC.
    ///
    /// # Errors
    ///
    /// Returns one [`FieldError`] per missing or malformed field.
    pub fn validate_card(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        let digits: String = self.card_number.chars().filter(|c| !c.is_whitespace()).collect();
        if digits.is_empty() {
            errors.push(FieldError::new("cardNumber", "Card number is required"));
        } else if !card_number_re().is_match(&digits) {
            errors.push(FieldError::new("cardNumber", "Card number must be 16 digits"));
        }
        if self.card_expiry.is_empty() {
            errors.push(FieldError::new("cardExpiry", "Expiry is required"));
        } else if !expiry_re().is_match(&self.card_expiry) {
            errors.push(FieldError::new("cardExpiry", "Expected MM/YY format"));
        }
        if self.card_cvc.is_empty() {
            errors.push(FieldError::new("cardCvc", "CVC is required"));
        } else if !cvc_re().is_match(&self.card_cvc) {
            errors.push(FieldError::new("cardCvc", "CVC must be 3 or 4 digits"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// Validates the PayPal path: a syntactically plausible email.
    ///
    /// # Errors
    ///
    /// Returns a single [`FieldError`] for the paypal email field.
    pub fn validate_paypal(&self) -> Result<(), Vec<FieldError>> {
        if self.paypal_email.is_empty() {
            return Err(vec![FieldError::new("paypalEmail", "PayPal email is required")]);
        }
        if !email_re().is_match(&self.paypal_email) {
            return Err(vec![FieldError::new("paypalEmail", "PayPal email is invalid")]);
        }
        Ok(())
    }

    /// Validates whichever method-specific fields the selected payment
    /// method uses (legacy path only).
    ///
    /// # Errors
    ///
    /// See [`CheckoutForm::validate_card`] and
    /// [`CheckoutForm::validate_paypal`].
    pub fn validate_payment_details(&self) -> Result<(), Vec<FieldError>> {
        match self.payment_method {
            PaymentMethod::Card => self.validate_card(),
            PaymentMethod::Paypal => self.validate_paypal(),
        }
    }

    /// The captured card number masked down to its last 4 digits, for the
    /// recap display. `None` when no card number was captured.
    #[must_use]
    pub fn masked_card(&self) -> Option<String> {
        let digits: String = self.card_number.chars().filter(char::is_ascii_digit).collect();
        if digits.len() < 4 {
            return None;
        }
        let last4 = digits.get(digits.len() - 4..)?;
        Some(format!("**** {last4}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete_address() -> CheckoutForm {
        CheckoutForm {
            first_name: "Awa".to_owned(),
            last_name: "Diop".to_owned(),
            email: "awa@example.com".to_owned(),
            address: "12 rue des Lilas".to_owned(),
            city: "Paris".to_owned(),
            postal_code: "75011".to_owned(),
            country: "France".to_owned(),
            ..CheckoutForm::default()
        }
    }

    #[test]
    fn complete_address_validates() {
        assert!(complete_address().validate_address().is_ok());
    }

    #[test]
    fn empty_form_reports_every_required_field() {
        let errors = CheckoutForm::default().validate_address().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(
            fields,
            vec!["firstName", "lastName", "email", "address", "city", "postalCode", "country"]
        );
    }

    #[test]
    fn missing_country_alone_reports_only_country() {
        let mut form = complete_address();
        form.country = String::new();
        let errors = form.validate_address().unwrap_err();
        assert_eq!(errors, vec![FieldError::new("country", "Country is required")]);
    }

    #[test]
    fn whitespace_only_fields_count_as_missing() {
        let mut form = complete_address();
        form.city = "   ".to_owned();
        let errors = form.validate_address().unwrap_err();
        assert_eq!(errors[0].field, "city");
    }

    #[test]
    fn card_validation_accepts_spaced_digit_groups() {
        let form = CheckoutForm {
            card_number: "1234 5678 9012 3456".to_owned(),
            card_expiry: "12/27".to_owned(),
            card_cvc: "123".to_owned(),
            ..CheckoutForm::default()
        };
        assert!(form.validate_card().is_ok());
    }

    #[test]
    fn card_validation_rejects_bad_formats() {
        let form = CheckoutForm {
            card_number: "1234".to_owned(),
            card_expiry: "13-27".to_owned(),
            card_cvc: "12".to_owned(),
            ..CheckoutForm::default()
        };
        let errors = form.validate_card().unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["cardNumber", "cardExpiry", "cardCvc"]);
    }

    #[test]
    fn paypal_validation_requires_a_plausible_email() {
        let mut form = CheckoutForm {
            payment_method: PaymentMethod::Paypal,
            paypal_email: "not-an-email".to_owned(),
            ..CheckoutForm::default()
        };
        assert!(form.validate_payment_details().is_err());
        form.paypal_email = "awa@example.com".to_owned();
        assert!(form.validate_payment_details().is_ok());
    }

    #[test]
    fn masked_card_shows_only_the_last_four_digits() {
        let form = CheckoutForm {
            card_number: "1234 5678 9012 3456".to_owned(),
            ..CheckoutForm::default()
        };
        assert_eq!(form.masked_card().as_deref(), Some("**** 3456"));
        assert_eq!(CheckoutForm::default().masked_card(), None);
    }
}
