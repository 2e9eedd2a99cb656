//! Inventory, receiving and returns resources

use serde::{Deserialize, Serialize};

/// Inventory line as held by the warehouse
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryItem {
    /// Stock-keeping unit
    pub sku: String,

    /// Item display name
    pub name: String,

    /// Units on hand
    pub on_hand: i64,

    /// Warehouse location code (not in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

/// One received line in a goods receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReceiptLine {
    /// Stock-keeping unit received
    pub sku: String,

    /// Units received
    pub quantity: i64,
}

/// Response of receipt creation: the new ID only
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedReceipt {
    /// ID of the recorded goods receipt
    pub receipt_id: String,
}

/// A customer return awaiting inspection
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnCase {
    /// Return case ID
    pub id: String,

    /// Stock-keeping unit returned
    pub sku: String,

    /// Units returned
    pub quantity: i64,

    /// Reason given for the return (not always present)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,

    /// Server-owned status (e.g. PENDING, INSPECTED)
    pub status: String,
}

/// Inspection outcome for a return case
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReturnDisposition {
    /// Put the goods back on the shelf
    Restock,
    /// Destroy the goods
    Scrap,
    /// Ship the goods back to the supplier
    ReturnToSupplier,
}
