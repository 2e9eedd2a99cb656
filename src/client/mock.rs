//! Mock SupplyMind API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use super::api::{AuthApi, FinanceApi, InventoryApi, PaymentApi, ProfileApi, SupplierApi};
use super::models::{
    AuthToken, ConnectStatus, CreatedInvoice, CreatedReceipt, IntentState, InventoryItem, Invoice,
    OnboardingLink, PaymentIntent, PaymentIntentStatus, PurchaseOrder, ReceiptLine, Refund,
    ReturnCase, ReturnDisposition, Supplier, SupplierPayment, UserProfile,
};
use crate::error::{ApiError, Result};
use crate::payments::{ConfirmOutcome, RefundRequest};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockClient::new()
///     .with_connect_status("sup-1", ConnectStatus::Enabled)
///     .await;
///
/// let status = mock.connect_status("sup-1").await?;
/// ```
pub struct MockClient {
    /// Purchase orders returned by list_ready_pos/get_po
    pos: Arc<Mutex<Vec<PurchaseOrder>>>,
    /// Invoices keyed by invoice ID
    invoices: Arc<Mutex<HashMap<String, Invoice>>>,
    /// Invoice lookup by PO ID
    invoices_by_po: Arc<Mutex<HashMap<String, Invoice>>>,
    /// Payments per invoice, newest first
    payments: Arc<Mutex<HashMap<String, Vec<SupplierPayment>>>>,
    /// Next numeric payment ID handed out by schedule_payment
    next_payment_id: Arc<Mutex<i64>>,
    /// Suppliers returned by list_suppliers
    suppliers: Arc<Mutex<Vec<Supplier>>>,
    /// Connect status per supplier ID
    connect_statuses: Arc<Mutex<HashMap<String, ConnectStatus>>>,
    /// Artificial delay (ms) per supplier ID, to scramble completion order
    status_delays: Arc<Mutex<HashMap<String, u64>>>,
    /// Settlement states per intent ID, consumed one per get_intent call
    intent_states: Arc<Mutex<HashMap<String, Vec<IntentState>>>>,
    /// Confirm outcome per intent ID
    confirm_outcomes: Arc<Mutex<HashMap<String, ConfirmOutcome>>>,
    /// Inventory items
    inventory: Arc<Mutex<Vec<InventoryItem>>>,
    /// Pending return cases
    returns: Arc<Mutex<Vec<ReturnCase>>>,
    /// Profile returned by get_profile
    profile: Arc<Mutex<Option<UserProfile>>>,
    /// Token returned by login
    token: Arc<Mutex<Option<AuthToken>>>,
    /// Error to return (if any), consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub logout: usize,
    pub list_ready_pos: usize,
    pub create_invoice: usize,
    pub invoice_for_po: usize,
    pub schedule_payment: usize,
    pub execute_payment: usize,
    pub payments_for_invoice: usize,
    pub connect_status: usize,
    pub create_payment_intent: usize,
    pub confirm_payment: usize,
    pub get_intent: usize,
    pub refund_payment: usize,
    pub record_receipt: usize,
    pub submit_inspection: usize,
}

impl Default for MockClient {
    fn default() -> Self {
        Self {
            pos: Arc::new(Mutex::new(Vec::new())),
            invoices: Arc::new(Mutex::new(HashMap::new())),
            invoices_by_po: Arc::new(Mutex::new(HashMap::new())),
            payments: Arc::new(Mutex::new(HashMap::new())),
            next_payment_id: Arc::new(Mutex::new(1)),
            suppliers: Arc::new(Mutex::new(Vec::new())),
            connect_statuses: Arc::new(Mutex::new(HashMap::new())),
            status_delays: Arc::new(Mutex::new(HashMap::new())),
            intent_states: Arc::new(Mutex::new(HashMap::new())),
            confirm_outcomes: Arc::new(Mutex::new(HashMap::new())),
            inventory: Arc::new(Mutex::new(Vec::new())),
            returns: Arc::new(Mutex::new(Vec::new())),
            profile: Arc::new(Mutex::new(None)),
            token: Arc::new(Mutex::new(None)),
            error: Arc::new(Mutex::new(None)),
            call_count: Arc::new(Mutex::new(CallCounts::default())),
        }
    }
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_pos(self, pos: Vec<PurchaseOrder>) -> Self {
        *self.pos.lock().await = pos;
        self
    }

    pub async fn with_invoice(self, invoice: Invoice) -> Self {
        self.invoices
            .lock().await
            .insert(invoice.id.clone(), invoice.clone());
        self.invoices_by_po
            .lock().await
            .insert(invoice.po_id.clone(), invoice);
        self
    }

    pub async fn with_suppliers(self, suppliers: Vec<Supplier>) -> Self {
        *self.suppliers.lock().await = suppliers;
        self
    }

    pub async fn with_connect_status(self, supplier_id: &str, status: ConnectStatus) -> Self {
        self.connect_statuses
            .lock().await
            .insert(supplier_id.to_string(), status);
        self
    }

    /// Delay `connect_status` for one supplier, to exercise out-of-order
    /// completion in concurrent fetch tests
    pub async fn with_status_delay(self, supplier_id: &str, millis: u64) -> Self {
        self.status_delays
            .lock().await
            .insert(supplier_id.to_string(), millis);
        self
    }

    /// Queue settlement states for an intent; get_intent consumes them in
    /// order and repeats the last one
    pub async fn with_intent_states(self, intent_id: &str, states: Vec<IntentState>) -> Self {
        self.intent_states
            .lock().await
            .insert(intent_id.to_string(), states);
        self
    }

    pub async fn with_confirm_outcome(self, intent_id: &str, outcome: ConfirmOutcome) -> Self {
        self.confirm_outcomes
            .lock().await
            .insert(intent_id.to_string(), outcome);
        self
    }

    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(AuthToken {
            token: token.to_string(),
        });
        self
    }

    pub async fn with_profile(self, profile: UserProfile) -> Self {
        *self.profile.lock().await = Some(profile);
        self
    }

    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Snapshot of call counts for verification
    pub async fn calls(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Return the queued error if one is set (consumed on first use)
    async fn take_error(&self) -> Result<()> {
        if let Some(err) = self.error.lock().await.take() {
            return Err(err.into());
        }
        Ok(())
    }
}

#[async_trait]
impl AuthApi for MockClient {
    async fn login(&self, _email: &str, _password: &str) -> Result<AuthToken> {
        self.call_count.lock().await.login += 1;
        self.take_error().await?;
        Ok(self
            .token
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| AuthToken {
                token: "mock-token".to_string(),
            }))
    }

    async fn logout(&self) -> Result<()> {
        self.call_count.lock().await.logout += 1;
        self.take_error().await
    }
}

#[async_trait]
impl FinanceApi for MockClient {
    async fn list_ready_pos(&self) -> Result<Vec<PurchaseOrder>> {
        self.call_count.lock().await.list_ready_pos += 1;
        self.take_error().await?;
        Ok(self.pos.lock().await.clone())
    }

    async fn get_po(&self, po_id: &str) -> Result<PurchaseOrder> {
        self.take_error().await?;
        self.pos
            .lock()
            .await
            .iter()
            .find(|po| po.id == po_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(po_id.to_string()).into())
    }

    async fn create_invoice(&self, po_id: &str) -> Result<CreatedInvoice> {
        self.call_count.lock().await.create_invoice += 1;
        self.take_error().await?;

        let invoice_id = format!("inv-{po_id}");
        let invoice = Invoice {
            id: invoice_id.clone(),
            po_id: po_id.to_string(),
            supplier_id: None,
            status: "OPEN".to_string(),
            amount_cents: self
                .pos
                .lock()
                .await
                .iter()
                .find(|po| po.id == po_id)
                .map(|po| po.total_cents)
                .unwrap_or_default(),
            currency: "usd".to_string(),
            issued_at: Some(Utc::now()),
        };
        self.invoices
            .lock()
            .await
            .insert(invoice_id.clone(), invoice.clone());
        self.invoices_by_po
            .lock()
            .await
            .insert(po_id.to_string(), invoice);
        Ok(CreatedInvoice { invoice_id })
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        self.take_error().await?;
        self.invoices
            .lock()
            .await
            .get(invoice_id)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(invoice_id.to_string()).into())
    }

    async fn invoice_for_po(&self, po_id: &str) -> Result<Option<Invoice>> {
        self.call_count.lock().await.invoice_for_po += 1;
        self.take_error().await?;
        Ok(self.invoices_by_po.lock().await.get(po_id).cloned())
    }

    async fn schedule_payment(&self, invoice_id: &str, amount_cents: Option<i64>) -> Result<i64> {
        self.call_count.lock().await.schedule_payment += 1;
        self.take_error().await?;

        let amount = match amount_cents {
            Some(amount) => amount,
            // No explicit amount: the server pays the invoice balance
            None => self
                .invoices
                .lock()
                .await
                .get(invoice_id)
                .map(|inv| inv.amount_cents)
                .unwrap_or_default(),
        };

        let mut next_id = self.next_payment_id.lock().await;
        let id = *next_id;
        *next_id += 1;
        drop(next_id);

        let payment = SupplierPayment {
            id,
            invoice_id: invoice_id.to_string(),
            amount_cents: amount,
            status: "SCHEDULED".to_string(),
            scheduled_at: Some(Utc::now()),
            executed_at: None,
        };

        // Server keeps payments newest first
        self.payments
            .lock()
            .await
            .entry(invoice_id.to_string())
            .or_default()
            .insert(0, payment);
        Ok(id)
    }

    async fn execute_payment(&self, payment_id: i64) -> Result<serde_json::Value> {
        self.call_count.lock().await.execute_payment += 1;
        self.take_error().await?;

        for payments in self.payments.lock().await.values_mut() {
            if let Some(payment) = payments.iter_mut().find(|p| p.id == payment_id) {
                payment.status = "EXECUTED".to_string();
                payment.executed_at = Some(Utc::now());
            }
        }
        Ok(serde_json::json!({ "paymentId": payment_id, "result": "EXECUTED" }))
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<SupplierPayment>> {
        self.call_count.lock().await.payments_for_invoice += 1;
        self.take_error().await?;
        Ok(self
            .payments
            .lock()
            .await
            .get(invoice_id)
            .cloned()
            .unwrap_or_default())
    }
}

#[async_trait]
impl SupplierApi for MockClient {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        self.take_error().await?;
        Ok(self.suppliers.lock().await.clone())
    }

    async fn connect_status(&self, supplier_id: &str) -> Result<ConnectStatus> {
        self.call_count.lock().await.connect_status += 1;
        self.take_error().await?;

        let delay = self.status_delays.lock().await.get(supplier_id).copied();
        if let Some(millis) = delay {
            tokio::time::sleep(Duration::from_millis(millis)).await;
        }

        self.connect_statuses
            .lock()
            .await
            .get(supplier_id)
            .copied()
            .ok_or_else(|| ApiError::NotFound(supplier_id.to_string()).into())
    }

    async fn create_onboarding_link(&self, supplier_id: &str) -> Result<OnboardingLink> {
        self.take_error().await?;
        Ok(OnboardingLink {
            url: format!("https://connect.example.com/onboard/{supplier_id}"),
        })
    }
}

#[async_trait]
impl PaymentApi for MockClient {
    async fn create_payment_intent(&self, po_id: &str, _currency: &str) -> Result<PaymentIntent> {
        self.call_count.lock().await.create_payment_intent += 1;
        self.take_error().await?;
        Ok(PaymentIntent {
            intent_id: format!("pi-{po_id}"),
            client_secret: format!("cs-{po_id}"),
        })
    }

    async fn confirm_payment(
        &self,
        intent_id: &str,
        _client_secret: &str,
    ) -> Result<ConfirmOutcome> {
        self.call_count.lock().await.confirm_payment += 1;
        self.take_error().await?;
        Ok(self
            .confirm_outcomes
            .lock()
            .await
            .get(intent_id)
            .cloned()
            .unwrap_or(ConfirmOutcome::Succeeded))
    }

    async fn get_intent(&self, intent_id: &str) -> Result<PaymentIntentStatus> {
        self.call_count.lock().await.get_intent += 1;
        self.take_error().await?;

        let mut states = self.intent_states.lock().await;
        let queue = states
            .get_mut(intent_id)
            .filter(|queue| !queue.is_empty())
            .ok_or_else(|| ApiError::NotFound(intent_id.to_string()))?;
        let status = if queue.len() > 1 {
            queue.remove(0)
        } else {
            queue[0]
        };
        Ok(PaymentIntentStatus {
            intent_id: intent_id.to_string(),
            status,
            refunded_cents: 0,
        })
    }

    async fn refund_payment(&self, intent_id: &str, request: &RefundRequest) -> Result<Refund> {
        self.call_count.lock().await.refund_payment += 1;
        self.take_error().await?;
        Ok(Refund {
            refund_id: format!("re-{intent_id}"),
            amount_cents: request.amount_cents.unwrap_or(0),
            status: "succeeded".to_string(),
        })
    }
}

#[async_trait]
impl InventoryApi for MockClient {
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        self.take_error().await?;
        Ok(self.inventory.lock().await.clone())
    }

    async fn record_receipt(&self, po_id: &str, lines: &[ReceiptLine]) -> Result<CreatedReceipt> {
        self.call_count.lock().await.record_receipt += 1;
        self.take_error().await?;

        let mut inventory = self.inventory.lock().await;
        for line in lines {
            if let Some(item) = inventory.iter_mut().find(|i| i.sku == line.sku) {
                item.on_hand += line.quantity;
            }
        }
        Ok(CreatedReceipt {
            receipt_id: format!("rcpt-{po_id}"),
        })
    }

    async fn list_pending_returns(&self) -> Result<Vec<ReturnCase>> {
        self.take_error().await?;
        Ok(self.returns.lock().await.clone())
    }

    async fn submit_inspection(
        &self,
        return_id: &str,
        _disposition: ReturnDisposition,
        _notes: Option<&str>,
    ) -> Result<()> {
        self.call_count.lock().await.submit_inspection += 1;
        self.take_error().await?;
        self.returns.lock().await.retain(|r| r.id != return_id);
        Ok(())
    }
}

#[async_trait]
impl ProfileApi for MockClient {
    async fn get_profile(&self) -> Result<UserProfile> {
        self.take_error().await?;
        self.profile
            .lock()
            .await
            .clone()
            .ok_or_else(|| ApiError::NotFound("profile".to_string()).into())
    }

    async fn upload_signature(&self, _path: &Path) -> Result<String> {
        self.take_error().await?;
        Ok("https://cdn.example.com/sig/mock.png".to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_po(id: &str, total_cents: i64) -> PurchaseOrder {
        PurchaseOrder {
            id: id.to_string(),
            number: format!("PO-{id}"),
            supplier_id: "sup-1".to_string(),
            supplier_name: None,
            status: "READY".to_string(),
            total_cents,
            currency: "usd".to_string(),
            created_at: None,
        }
    }

    #[tokio::test]
    async fn test_invoice_for_po_absent_before_creation() {
        let mock = MockClient::new().with_pos(vec![sample_po("po-1", 5000)]).await;

        // Absent is Ok(None), never an error
        let invoice = mock.invoice_for_po("po-1").await.unwrap();
        assert!(invoice.is_none());

        mock.create_invoice("po-1").await.unwrap();
        let invoice = mock.invoice_for_po("po-1").await.unwrap();
        assert!(invoice.is_some());
    }

    #[tokio::test]
    async fn test_scheduled_payment_surfaces_newest_first() {
        let mock = MockClient::new().with_pos(vec![sample_po("po-1", 5000)]).await;
        let created = mock.create_invoice("po-1").await.unwrap();

        let first = mock
            .schedule_payment(&created.invoice_id, Some(1000))
            .await
            .unwrap();
        let second = mock
            .schedule_payment(&created.invoice_id, None)
            .await
            .unwrap();

        let payments = mock.payments_for_invoice(&created.invoice_id).await.unwrap();
        assert_eq!(payments[0].id, second, "latest payment must be at index 0");
        assert_eq!(payments[1].id, first);
        // No explicit amount: server paid the invoice balance
        assert_eq!(payments[0].amount_cents, 5000);
    }

    #[tokio::test]
    async fn test_error_consumed_on_first_use() {
        let mock = MockClient::new().with_error(ApiError::Forbidden).await;

        assert!(mock.list_ready_pos().await.is_err());
        assert!(mock.list_ready_pos().await.is_ok());
    }

    #[tokio::test]
    async fn test_settlement_states_consumed_in_order() {
        let mock = MockClient::new()
            .with_intent_states("pi-1", vec![IntentState::Processing, IntentState::Succeeded])
            .await;

        assert_eq!(
            mock.get_intent("pi-1").await.unwrap().status,
            IntentState::Processing
        );
        assert_eq!(
            mock.get_intent("pi-1").await.unwrap().status,
            IntentState::Succeeded
        );
        // Last state repeats
        assert_eq!(
            mock.get_intent("pi-1").await.unwrap().status,
            IntentState::Succeeded
        );
    }

    #[tokio::test]
    async fn test_empty_intent_state_queue_is_not_found() {
        let mock = MockClient::new().with_intent_states("pi-1", vec![]).await;

        let err = mock.get_intent("pi-1").await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::Error::Api(ApiError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_invalid_refund_never_reaches_client() {
        let mock = MockClient::new();

        // Partial refund of zero is rejected at construction
        let request = RefundRequest::partial(0, None);
        assert!(request.is_err());

        // Over the supplied maximum likewise
        let request = RefundRequest::partial(9000, Some(1500));
        assert!(request.is_err());

        assert_eq!(mock.calls().await.refund_payment, 0);
    }
}
