//! Payment intent API trait

use async_trait::async_trait;

use crate::client::models::{PaymentIntent, PaymentIntentStatus, Refund};
use crate::error::Result;
use crate::payments::{ConfirmOutcome, RefundRequest};

/// Payment intent operations for the SupplyMind API.
///
/// The platform fronts the payment processor; this client only moves the
/// opaque client secret around and never sees card data.
#[async_trait]
pub trait PaymentApi: Send + Sync {
    /// Create a payment intent for a purchase order in the given currency
    async fn create_payment_intent(&self, po_id: &str, currency: &str) -> Result<PaymentIntent>;

    /// Confirm a payment intent with its client secret
    async fn confirm_payment(
        &self,
        intent_id: &str,
        client_secret: &str,
    ) -> Result<ConfirmOutcome>;

    /// Current settlement state of an intent (used for polling)
    async fn get_intent(&self, intent_id: &str) -> Result<PaymentIntentStatus>;

    /// Request a refund. `RefundRequest` is validated at construction, so
    /// anything reaching this call is well-formed.
    async fn refund_payment(&self, intent_id: &str, request: &RefundRequest) -> Result<Refund>;
}
