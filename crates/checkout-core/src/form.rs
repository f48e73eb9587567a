//! # Form State & Field Normalization
//!
//! The payment form's field set and the keystroke normalizers that keep each
//! field in canonical shape. Normalization is pure: the same previous state
//! and raw input always produce the same next state.

use crate::pricing;
use serde::{Deserialize, Serialize};

/// Maximum digits accepted in a card number (pre-grouping)
pub const CARD_NUMBER_MAX_DIGITS: usize = 19;

/// Maximum digits accepted in the CVV field
pub const CVV_MAX_DIGITS: usize = 4;

/// Maximum digits accepted in the amount field
pub const AMOUNT_MAX_DIGITS: usize = 7;

/// The eight payment-form fields.
///
/// Serializes to the camelCase names used on the wire and in error maps.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "camelCase")]
pub enum Field {
    FullName,
    Email,
    CardNumber,
    Expiry,
    Cvv,
    Country,
    Amount,
    Discount,
}

impl Field {
    /// All fields, in form order
    pub const ALL: [Field; 8] = [
        Field::FullName,
        Field::Email,
        Field::CardNumber,
        Field::Expiry,
        Field::Cvv,
        Field::Country,
        Field::Amount,
        Field::Discount,
    ];

    /// The camelCase wire name for this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::FullName => "fullName",
            Field::Email => "email",
            Field::CardNumber => "cardNumber",
            Field::Expiry => "expiry",
            Field::Cvv => "cvv",
            Field::Country => "country",
            Field::Amount => "amount",
            Field::Discount => "discount",
        }
    }

    /// Parse a wire name back into a field
    pub fn parse(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.as_str() == name)
    }
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The complete field state of the payment form.
///
/// Values are kept as the canonical strings the normalizers produce. The
/// `amount` and `discount` fields are coupled: every write to `discount`
/// recomputes `amount` through the pricing engine, and a manual write to
/// `amount` clears `discount`. `amount` is the single source of truth for
/// the charged price everywhere downstream.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FormState {
    pub full_name: String,
    pub email: String,
    pub card_number: String,
    pub expiry: String,
    pub cvv: String,
    pub country: String,
    pub amount: String,
    pub discount: String,
}

impl Default for FormState {
    fn default() -> Self {
        Self {
            full_name: String::new(),
            email: String::new(),
            card_number: String::new(),
            expiry: String::new(),
            cvv: String::new(),
            country: String::new(),
            amount: pricing::base_price_string(),
            discount: String::new(),
        }
    }
}

impl FormState {
    /// Fresh form with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a field's current value
    pub fn value(&self, field: Field) -> &str {
        match field {
            Field::FullName => &self.full_name,
            Field::Email => &self.email,
            Field::CardNumber => &self.card_number,
            Field::Expiry => &self.expiry,
            Field::Cvv => &self.cvv,
            Field::Country => &self.country,
            Field::Amount => &self.amount,
            Field::Discount => &self.discount,
        }
    }

    /// Apply a single-field edit, returning the normalized next state.
    ///
    /// This is the only mutation path for form state. Free-text fields pass
    /// through untouched; digit fields are reshaped; the `amount`/`discount`
    /// coupling routes every price through [`pricing::price`] so there is
    /// exactly one computation of the displayed amount.
    pub fn with_edit(&self, field: Field, raw: &str) -> FormState {
        let mut next = self.clone();
        match field {
            Field::FullName => next.full_name = raw.to_string(),
            Field::Email => next.email = raw.to_string(),
            Field::Country => next.country = raw.to_string(),
            Field::CardNumber => next.card_number = normalize_card_number(raw),
            Field::Expiry => next.expiry = normalize_expiry(raw),
            Field::Cvv => next.cvv = normalize_cvv(raw),
            Field::Amount => {
                next.amount = normalize_amount(raw);
                next.discount.clear();
            }
            Field::Discount => {
                next.discount = raw.to_string();
                next.amount = pricing::price(raw);
            }
        }
        next
    }

    /// Whether the recognized discount code is currently applied
    pub fn discount_applied(&self) -> bool {
        pricing::discount_applies(&self.discount)
    }

    /// Last four digits of the card number, for the masked summary
    pub fn card_last4(&self) -> String {
        let digits: String = self
            .card_number
            .chars()
            .filter(|c| c.is_ascii_digit())
            .collect();
        let skip = digits.len().saturating_sub(4);
        digits.chars().skip(skip).collect()
    }
}

/// Strip non-digits, cap at 19 digits, group in blocks of 4 separated by
/// single spaces. No trailing space; idempotent on its own output.
pub fn normalize_card_number(raw: &str) -> String {
    let digits = digits_only(raw, CARD_NUMBER_MAX_DIGITS);
    let mut out = String::with_capacity(digits.len() + digits.len() / 4);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            out.push(' ');
        }
        out.push(c);
    }
    out
}

/// Strip non-digits, cap at 4; once more than two digits are present,
/// insert `/` after the second.
pub fn normalize_expiry(raw: &str) -> String {
    let digits = digits_only(raw, 4);
    if digits.len() > 2 {
        format!("{}/{}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

/// Strip non-digits, cap at 4
pub fn normalize_cvv(raw: &str) -> String {
    digits_only(raw, CVV_MAX_DIGITS)
}

/// Strip non-digits, cap at 7
pub fn normalize_amount(raw: &str) -> String {
    digits_only(raw, AMOUNT_MAX_DIGITS)
}

fn digits_only(raw: &str, max: usize) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).take(max).collect()
}
