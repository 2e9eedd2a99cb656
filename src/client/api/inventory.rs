//! Inventory API trait: warehouse receiving and returns inspection

use async_trait::async_trait;

use crate::client::models::{
    CreatedReceipt, InventoryItem, ReceiptLine, ReturnCase, ReturnDisposition,
};
use crate::error::Result;

/// Warehouse operations for the SupplyMind API
#[async_trait]
pub trait InventoryApi: Send + Sync {
    /// Current inventory levels
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>>;

    /// Record a goods receipt against a purchase order; returns the new ID
    async fn record_receipt(&self, po_id: &str, lines: &[ReceiptLine]) -> Result<CreatedReceipt>;

    /// Returns awaiting inspection
    async fn list_pending_returns(&self) -> Result<Vec<ReturnCase>>;

    /// Submit the inspection outcome for a return case
    async fn submit_inspection(
        &self,
        return_id: &str,
        disposition: ReturnDisposition,
        notes: Option<&str>,
    ) -> Result<()>;
}
