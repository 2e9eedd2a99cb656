//! Finance API trait: purchase orders, invoices, supplier payments

use async_trait::async_trait;

use crate::client::models::{CreatedInvoice, Invoice, PurchaseOrder, SupplierPayment};
use crate::error::Result;

/// Finance operations for the SupplyMind API.
///
/// Each operation is a single request/response pair: no client-side retry,
/// no idempotency keys. Mutations return identifiers, not full entities;
/// callers re-fetch to reconcile state.
#[async_trait]
pub trait FinanceApi: Send + Sync {
    /// Purchase orders ready for invoicing, in server order
    async fn list_ready_pos(&self) -> Result<Vec<PurchaseOrder>>;

    /// Fetch a single purchase order
    async fn get_po(&self, po_id: &str) -> Result<PurchaseOrder>;

    /// Create an invoice from a purchase order; returns the new ID only
    async fn create_invoice(&self, po_id: &str) -> Result<CreatedInvoice>;

    /// Fetch a single invoice
    async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice>;

    /// Invoice raised against a purchase order, if one exists.
    ///
    /// Absence is a normal outcome (`Ok(None)`), never an error.
    async fn invoice_for_po(&self, po_id: &str) -> Result<Option<Invoice>>;

    /// Schedule a payment for an invoice.
    ///
    /// With no amount the server pays the invoice balance. Returns the bare
    /// numeric payment ID the server responds with.
    async fn schedule_payment(&self, invoice_id: &str, amount_cents: Option<i64>) -> Result<i64>;

    /// Execute a scheduled payment.
    ///
    /// The response shape is server-determined; it is passed through
    /// untouched.
    async fn execute_payment(&self, payment_id: i64) -> Result<serde_json::Value>;

    /// Payments recorded against an invoice, newest first (server-enforced
    /// ordering; index 0 is the latest)
    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<SupplierPayment>>;
}
