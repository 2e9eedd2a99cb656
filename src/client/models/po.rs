//! Purchase order resource

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Purchase order summary as returned by the platform
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseOrder {
    /// Purchase order ID
    pub id: String,

    /// Human-facing PO number (e.g. "PO-2026-0412")
    pub number: String,

    /// Supplier ID
    pub supplier_id: String,

    /// Supplier display name (not in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier_name: Option<String>,

    /// Server-owned status (e.g. READY, INVOICED, CLOSED)
    pub status: String,

    /// Order total in minor currency units
    pub total_cents: i64,

    /// ISO 4217 currency code, lowercase
    pub currency: String,

    /// Creation timestamp
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_purchase_order_deserializes_camel_case() {
        let json = r#"{
            "id": "po-1",
            "number": "PO-2026-0001",
            "supplierId": "sup-9",
            "status": "READY",
            "totalCents": 125000,
            "currency": "usd"
        }"#;

        let po: PurchaseOrder = serde_json::from_str(json).unwrap();
        assert_eq!(po.supplier_id, "sup-9");
        assert_eq!(po.total_cents, 125_000);
        assert!(po.supplier_name.is_none());
        assert!(po.created_at.is_none());
    }
}
