//! # Checkout Lifecycle
//!
//! The three-stage payment state machine: `Form` → `Processing` →
//! `Complete`, with an explicit restart back to `Form`. The session owns
//! the form state, the current error map, the lifecycle state, and, once a
//! payment settles, the canonical transaction id every consumer reads.
//!
//! Receipt requests are deliberately not transitions of this machine: the
//! session only hands out an order snapshot, in any state.

use crate::form::{Field, FormState};
use crate::receipt::{ReceiptOrder, TransactionId};
use crate::validate::{validate, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Fixed simulated-authorization latency for `Processing` → `Complete`
pub const AUTHORIZATION_DELAY: Duration = Duration::from_millis(900);

/// The checkout stages. Owned by [`CheckoutSession`]; presentation layers
/// only read it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifecycleState {
    /// Collecting and editing payment input
    Form,
    /// Submitted; waiting out the authorization delay
    Processing,
    /// Payment confirmed (terminal until an explicit restart)
    Complete,
}

impl Default for LifecycleState {
    fn default() -> Self {
        LifecycleState::Form
    }
}

/// A single checkout's state: fields, errors, lifecycle stage, and the
/// canonical transaction id assigned at settle.
#[derive(Debug, Clone, Default)]
pub struct CheckoutSession {
    form: FormState,
    errors: ValidationErrors,
    state: LifecycleState,
    transaction_id: Option<TransactionId>,
}

impl CheckoutSession {
    /// Fresh session at the `Form` stage with default field values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn state(&self) -> LifecycleState {
        self.state
    }

    /// The canonical id for this session's payment, once settled
    pub fn transaction_id(&self) -> Option<&TransactionId> {
        self.transaction_id.as_ref()
    }

    /// Apply a single-field edit through the normalizer and clear that
    /// field's validation error. Editing `amount` also clears any stale
    /// `discount` error (the two fields are one computation).
    pub fn edit(&mut self, field: Field, raw: &str) {
        self.form = self.form.with_edit(field, raw);
        self.errors.clear(field);
        match field {
            Field::Amount => self.errors.clear(Field::Discount),
            Field::Discount => self.errors.clear(Field::Amount),
            _ => {}
        }
    }

    /// Attempt submission. Only meaningful at the `Form` stage.
    ///
    /// A valid form moves the session to `Processing`; an invalid one
    /// stores and returns the error map and leaves the state untouched;
    /// the attempt is absorbed, never escalated.
    pub fn submit(&mut self) -> Result<(), ValidationErrors> {
        if self.state != LifecycleState::Form {
            return Ok(());
        }

        let errors = validate(&self.form);
        if errors.is_empty() {
            self.errors = ValidationErrors::new();
            self.state = LifecycleState::Processing;
            Ok(())
        } else {
            self.errors = errors.clone();
            Err(errors)
        }
    }

    /// Wait out the fixed authorization delay, then settle.
    ///
    /// Authorization always succeeds in this model; there is no decline
    /// path and the wait cannot be cancelled. A no-op outside `Processing`.
    pub async fn authorize(&mut self) {
        if self.state != LifecycleState::Processing {
            return;
        }
        tokio::time::sleep(AUTHORIZATION_DELAY).await;
        self.settle();
    }

    /// The `Processing` → `Complete` transition itself. Public so hosts
    /// that own their own timer (the browser client) can drive it; assigns
    /// the canonical transaction id exactly once.
    pub fn settle(&mut self) {
        if self.state != LifecycleState::Processing {
            return;
        }
        self.state = LifecycleState::Complete;
        if self.transaction_id.is_none() {
            self.transaction_id = Some(TransactionId::generate());
        }
    }

    /// "Make another payment": from `Complete`, reset everything to
    /// defaults and return to `Form`. A no-op elsewhere; in particular it
    /// cannot abort an in-flight authorization.
    pub fn restart(&mut self) {
        if self.state != LifecycleState::Complete {
            return;
        }
        *self = CheckoutSession::new();
    }

    /// The displayed "you will be charged" value, read from the single
    /// amount source of truth
    pub fn display_amount(&self) -> String {
        format!("${}", self.form.amount)
    }

    /// Snapshot for the receipt pipeline. Available in any state; carries
    /// the canonical id when one exists so every receipt consumer shows
    /// the same reference.
    pub fn receipt_order(&self) -> ReceiptOrder {
        ReceiptOrder {
            full_name: self.form.full_name.clone(),
            email: self.form.email.clone(),
            amount: self.form.amount.clone(),
            transaction_id: self.transaction_id.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_session() -> CheckoutSession {
        let mut session = CheckoutSession::new();
        session.edit(Field::FullName, "Jane Q. Trader");
        session.edit(Field::Email, "jane@example.com");
        session.edit(Field::CardNumber, "4242424242424242");
        session.edit(Field::Expiry, "1226");
        session.edit(Field::Cvv, "123");
        session.edit(Field::Country, "United Kingdom");
        session
    }

    #[test]
    fn test_valid_submit_moves_to_processing() {
        let mut session = filled_session();
        assert_eq!(session.state(), LifecycleState::Form);

        session.submit().expect("valid form");
        assert_eq!(session.state(), LifecycleState::Processing);
        assert!(session.errors().is_empty());
    }

    #[test]
    fn test_invalid_submit_is_absorbed() {
        let mut session = filled_session();
        session.edit(Field::FullName, "");

        let errors = session.submit().unwrap_err();
        assert_eq!(session.state(), LifecycleState::Form);
        assert_eq!(errors.get(Field::FullName), Some("Full name is required"));
        assert_eq!(session.errors().get(Field::FullName), Some("Full name is required"));
    }

    #[test]
    fn test_edit_clears_field_error() {
        let mut session = filled_session();
        session.edit(Field::FullName, "");
        session.submit().unwrap_err();

        session.edit(Field::FullName, "Jane");
        assert!(session.errors().get(Field::FullName).is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_authorization_settles_after_fixed_delay() {
        let mut session = filled_session();
        session.submit().expect("valid form");

        let started = tokio::time::Instant::now();
        session.authorize().await;

        assert!(started.elapsed() >= AUTHORIZATION_DELAY);
        assert_eq!(session.state(), LifecycleState::Complete);
        assert!(session.transaction_id().is_some());
    }

    #[tokio::test(start_paused = true)]
    async fn test_authorize_outside_processing_is_noop() {
        let mut session = filled_session();
        session.authorize().await;
        assert_eq!(session.state(), LifecycleState::Form);
        assert!(session.transaction_id().is_none());
    }

    #[test]
    fn test_settle_assigns_one_canonical_id() {
        let mut session = filled_session();
        session.submit().expect("valid form");
        session.settle();

        let id = session.transaction_id().cloned().expect("id assigned");
        assert!(id.as_str().starts_with("FTUK-"));

        // Same id everywhere a consumer reads it
        let order = session.receipt_order();
        assert_eq!(order.transaction_id.as_ref(), Some(&id));
    }

    #[test]
    fn test_restart_only_from_complete() {
        let mut session = filled_session();
        session.submit().expect("valid form");

        // Restart cannot abort an in-flight authorization
        session.restart();
        assert_eq!(session.state(), LifecycleState::Processing);

        session.settle();
        session.restart();
        assert_eq!(session.state(), LifecycleState::Form);
        assert_eq!(session.form().full_name, "");
        assert_eq!(session.form().amount, "1499");
        assert!(session.transaction_id().is_none());
    }

    #[test]
    fn test_receipt_order_available_in_any_state() {
        let mut session = filled_session();
        session.edit(Field::Discount, "POWERUP");

        let from_form = session.receipt_order();
        assert_eq!(from_form.amount, "974");
        assert_eq!(from_form.email, "jane@example.com");
        assert!(from_form.transaction_id.is_none());

        session.submit().expect("valid form");
        session.settle();
        let from_complete = session.receipt_order();
        assert!(from_complete.transaction_id.is_some());
    }

    #[test]
    fn test_display_amount_reads_single_source() {
        let mut session = filled_session();
        assert_eq!(session.display_amount(), "$1499");

        session.edit(Field::Discount, "powerup");
        assert_eq!(session.display_amount(), "$974");

        session.edit(Field::Amount, "250");
        assert_eq!(session.display_amount(), "$250");
    }
}
