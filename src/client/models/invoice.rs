//! Invoice resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Invoice raised against a purchase order
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    /// Invoice ID
    pub id: String,

    /// Purchase order this invoice was created from
    pub po_id: String,

    /// Supplier ID (not in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_id: Option<String>,

    /// Server-owned status (e.g. OPEN, SCHEDULED, PAID)
    pub status: String,

    /// Invoice amount in minor currency units
    pub amount_cents: i64,

    /// ISO 4217 currency code, lowercase
    pub currency: String,

    /// Issue timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issued_at: Option<DateTime<Utc>>,
}

/// Response of invoice creation: the new ID only.
///
/// The server does not return the full entity; callers re-fetch to observe
/// complete invoice state.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedInvoice {
    /// ID of the newly created invoice
    pub invoice_id: String,
}
