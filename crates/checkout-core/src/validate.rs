//! # Validation Engine
//!
//! Wholesale form validation: a complete [`FormState`] in, a map of
//! field → message out. Every rule runs on every call; an empty map means
//! the submit attempt is accepted.

use crate::form::{Field, FormState};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use std::collections::BTreeMap;

static EMAIL_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("valid email regex"));

static EXPIRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{2}/\d{2}$").expect("valid expiry regex"));

/// Minimum digits for a plausible card number
const CARD_MIN_DIGITS: usize = 13;

/// Minimum CVV length
const CVV_MIN_DIGITS: usize = 3;

/// Per-field validation messages, recomputed wholesale on each submit
/// attempt. Absence of a field means it passed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: BTreeMap<Field, String>,
}

impl ValidationErrors {
    /// No errors: the form passed
    pub fn new() -> Self {
        Self::default()
    }

    /// True when every field passed
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Number of offending fields
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Message for one field, if it failed
    pub fn get(&self, field: Field) -> Option<&str> {
        self.errors.get(&field).map(String::as_str)
    }

    /// Record a failure for a field
    pub fn insert(&mut self, field: Field, message: impl Into<String>) {
        self.errors.insert(field, message.into());
    }

    /// Clear one field's error (called the instant that field changes)
    pub fn clear(&mut self, field: Field) {
        self.errors.remove(&field);
    }

    /// Iterate over offending fields and their messages
    pub fn iter(&self) -> impl Iterator<Item = (Field, &str)> {
        self.errors.iter().map(|(f, m)| (*f, m.as_str()))
    }
}

/// Validate a complete form. Rules are independent; all fields are checked
/// on every call.
pub fn validate(form: &FormState) -> ValidationErrors {
    let mut errors = ValidationErrors::new();

    if form.full_name.trim().is_empty() {
        errors.insert(Field::FullName, "Full name is required");
    }

    if !EMAIL_RE.is_match(&form.email) {
        errors.insert(Field::Email, "Enter a valid email");
    }

    let card_digits = form.card_number.chars().filter(|c| *c != ' ').count();
    if card_digits < CARD_MIN_DIGITS {
        errors.insert(Field::CardNumber, "Enter a valid card number");
    }

    if !EXPIRY_RE.is_match(&form.expiry) {
        errors.insert(Field::Expiry, "Expiry must be MM/YY");
    }

    if form.cvv.len() < CVV_MIN_DIGITS {
        errors.insert(Field::Cvv, "CVV required");
    }

    if form.country.is_empty() {
        errors.insert(Field::Country, "Country required");
    }

    let amount_ok = form
        .amount
        .parse::<u64>()
        .map(|n| n > 0)
        .unwrap_or(false);
    if !amount_ok {
        errors.insert(Field::Amount, "Enter a valid amount");
    }

    errors
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_form() -> FormState {
        let mut form = FormState::new();
        form.full_name = "Jane Q. Trader".to_string();
        form.email = "jane@example.com".to_string();
        form.card_number = "4242 4242 4242 4242".to_string();
        form.expiry = "12/26".to_string();
        form.cvv = "123".to_string();
        form.country = "United Kingdom".to_string();
        form.amount = "1499".to_string();
        form
    }

    #[test]
    fn test_valid_form_passes() {
        let errors = validate(&valid_form());
        assert!(errors.is_empty());
    }

    #[test]
    fn test_empty_full_name_is_the_only_error() {
        let mut form = valid_form();
        form.full_name = "   ".to_string();

        let errors = validate(&form);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get(Field::FullName), Some("Full name is required"));
    }

    #[test]
    fn test_email_shape() {
        let mut form = valid_form();
        for bad in ["", "plain", "a@b", "a b@c.d", "a@b@c.d"] {
            form.email = bad.to_string();
            assert!(
                validate(&form).get(Field::Email).is_some(),
                "accepted {:?}",
                bad
            );
        }
        form.email = "you@domain.com".to_string();
        assert!(validate(&form).get(Field::Email).is_none());
    }

    #[test]
    fn test_card_number_length_threshold() {
        let mut form = valid_form();

        // 14 digits, grouped: passes
        form.card_number = "4242 4242 4242 42".to_string();
        assert!(validate(&form).get(Field::CardNumber).is_none());

        // 13 digits: passes
        form.card_number = "4242 4242 4242 4".to_string();
        assert!(validate(&form).get(Field::CardNumber).is_none());

        // 12 digits: fails
        form.card_number = "424242424242".to_string();
        assert_eq!(
            validate(&form).get(Field::CardNumber),
            Some("Enter a valid card number")
        );
    }

    #[test]
    fn test_expiry_shape() {
        let mut form = valid_form();
        for bad in ["", "12", "1/26", "12/2", "12-26", "12/266"] {
            form.expiry = bad.to_string();
            assert!(
                validate(&form).get(Field::Expiry).is_some(),
                "accepted {:?}",
                bad
            );
        }
        form.expiry = "01/30".to_string();
        assert!(validate(&form).get(Field::Expiry).is_none());
    }

    #[test]
    fn test_cvv_and_country() {
        let mut form = valid_form();
        form.cvv = "12".to_string();
        assert_eq!(validate(&form).get(Field::Cvv), Some("CVV required"));

        form.cvv = "1234".to_string();
        form.country = String::new();
        let errors = validate(&form);
        assert!(errors.get(Field::Cvv).is_none());
        assert_eq!(errors.get(Field::Country), Some("Country required"));
    }

    #[test]
    fn test_amount_must_be_positive() {
        let mut form = valid_form();
        for bad in ["", "0", "abc"] {
            form.amount = bad.to_string();
            assert!(
                validate(&form).get(Field::Amount).is_some(),
                "accepted {:?}",
                bad
            );
        }
        form.amount = "974".to_string();
        assert!(validate(&form).get(Field::Amount).is_none());
    }

    #[test]
    fn test_all_rules_reported_together() {
        let errors = validate(&FormState::new());
        // Default form: amount is valid (1499), everything else fails
        assert_eq!(errors.len(), 6);
        assert!(errors.get(Field::Amount).is_none());
    }

    #[test]
    fn test_serializes_to_flat_field_map() {
        let mut form = valid_form();
        form.full_name = String::new();
        let errors = validate(&form);

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["fullName"], "Full name is required");
    }
}
