//! Supplier payment and payment intent resources

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Scheduled or executed payment against an invoice.
///
/// Payment IDs are bare numbers on the wire; the schedule endpoint returns
/// the number alone and callers correlate it with records fetched later.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupplierPayment {
    /// Numeric payment ID
    pub id: i64,

    /// Invoice the payment belongs to
    pub invoice_id: String,

    /// Payment amount in minor currency units
    pub amount_cents: i64,

    /// Server-owned status (e.g. SCHEDULED, EXECUTED, FAILED)
    pub status: String,

    /// When the payment was scheduled
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheduled_at: Option<DateTime<Utc>>,

    /// When the payment was executed, if it has been
    #[serde(skip_serializing_if = "Option::is_none")]
    pub executed_at: Option<DateTime<Utc>>,
}

/// Payment intent handle returned by the platform.
///
/// The client secret authorizes one client-side confirmation and is passed
/// through opaquely; this client never inspects it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntent {
    /// Intent ID
    pub intent_id: String,

    /// Opaque client secret for confirmation
    pub client_secret: String,
}

/// Settlement state of a payment intent.
///
/// The server-side webhook remains the source of truth; this is what the
/// client observes while polling.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentIntentStatus {
    /// Intent ID
    pub intent_id: String,

    /// Current intent state
    pub status: IntentState,

    /// Amount refunded so far, in minor units
    #[serde(default)]
    pub refunded_cents: i64,
}

/// Payment intent lifecycle states reported by the platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntentState {
    Processing,
    RequiresAction,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

impl IntentState {
    /// Whether this state is terminal for settlement polling
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            IntentState::Succeeded | IntentState::Failed | IntentState::Canceled
        )
    }
}

/// Refund record returned after a refund request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Refund {
    /// Refund ID
    pub refund_id: String,

    /// Refunded amount in minor units (the server fills this in for full
    /// refunds, where the request carried no amount)
    pub amount_cents: i64,

    /// Refund status
    pub status: String,
}
