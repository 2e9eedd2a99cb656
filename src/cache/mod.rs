//! Normalized client-side entity store.
//!
//! One store keyed by entity identifier, read-through for fetches and
//! explicitly invalidated on every mutation. This replaces per-command
//! re-fetch-and-merge: a command re-reading an entity it just observed hits
//! the store instead of the network. Disabled entirely by `--no-cache`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use crate::client::api::{AuthApi, FinanceApi, InventoryApi, PaymentApi, ProfileApi, SupplierApi};
use crate::client::models::{
    AuthToken, ConnectStatus, CreatedInvoice, CreatedReceipt, InventoryItem, Invoice,
    OnboardingLink, PaymentIntent, PaymentIntentStatus, PurchaseOrder, ReceiptLine, Refund,
    ReturnCase, ReturnDisposition, Supplier, SupplierPayment, UserProfile,
};
use crate::client::SupplyMindApi;
use crate::error::Result;
use crate::payments::{ConfirmOutcome, RefundRequest};

/// In-memory entity tables, keyed by identifier
#[derive(Default)]
struct Store {
    ready_pos: Option<Vec<PurchaseOrder>>,
    pos: HashMap<String, PurchaseOrder>,
    invoices: HashMap<String, Invoice>,
    /// Keyed by PO ID; `Some(None)` caches a confirmed absence
    invoice_by_po: HashMap<String, Option<Invoice>>,
    /// Keyed by invoice ID, newest first as the server returns them
    payments: HashMap<String, Vec<SupplierPayment>>,
    suppliers: Option<Vec<Supplier>>,
    connect: HashMap<String, ConnectStatus>,
    inventory: Option<Vec<InventoryItem>>,
    returns: Option<Vec<ReturnCase>>,
    profile: Option<UserProfile>,
}

/// Caching wrapper for any [`SupplyMindApi`] implementation.
///
/// Payment-intent reads are never cached; settlement polling must observe
/// live state.
pub struct CachedClient<C: SupplyMindApi> {
    inner: Arc<C>,
    store: Option<Mutex<Store>>,
}

impl<C: SupplyMindApi> CachedClient<C> {
    /// Wrap a client. `enabled` is false for `--no-cache`.
    pub fn new(inner: C, enabled: bool) -> Self {
        Self {
            inner: Arc::new(inner),
            store: enabled.then(|| Mutex::new(Store::default())),
        }
    }

    /// The wrapped client (for operations outside the trait surface)
    #[allow(dead_code)]
    pub fn inner(&self) -> &C {
        &self.inner
    }

    fn read<T>(&self, f: impl FnOnce(&Store) -> Option<T>) -> Option<T> {
        let store = self.store.as_ref()?;
        let guard = store.lock().ok()?;
        f(&guard)
    }

    fn write(&self, f: impl FnOnce(&mut Store)) {
        if let Some(store) = self.store.as_ref() {
            if let Ok(mut guard) = store.lock() {
                f(&mut guard);
            }
        }
    }
}

#[async_trait]
impl<C: SupplyMindApi> AuthApi for CachedClient<C> {
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken> {
        let token = self.inner.login(email, password).await?;
        // New identity invalidates everything
        self.write(|store| *store = Store::default());
        Ok(token)
    }

    async fn logout(&self) -> Result<()> {
        self.inner.logout().await?;
        self.write(|store| *store = Store::default());
        Ok(())
    }
}

#[async_trait]
impl<C: SupplyMindApi> FinanceApi for CachedClient<C> {
    async fn list_ready_pos(&self) -> Result<Vec<PurchaseOrder>> {
        if let Some(pos) = self.read(|s| s.ready_pos.clone()) {
            return Ok(pos);
        }
        let pos = self.inner.list_ready_pos().await?;
        self.write(|store| {
            store.ready_pos = Some(pos.clone());
            for po in &pos {
                store.pos.insert(po.id.clone(), po.clone());
            }
        });
        Ok(pos)
    }

    async fn get_po(&self, po_id: &str) -> Result<PurchaseOrder> {
        if let Some(po) = self.read(|s| s.pos.get(po_id).cloned()) {
            return Ok(po);
        }
        let po = self.inner.get_po(po_id).await?;
        self.write(|store| {
            store.pos.insert(po.id.clone(), po.clone());
        });
        Ok(po)
    }

    async fn create_invoice(&self, po_id: &str) -> Result<CreatedInvoice> {
        let created = self.inner.create_invoice(po_id).await?;
        self.write(|store| {
            // The PO is no longer "ready", and its invoice lookup is stale
            store.ready_pos = None;
            store.pos.remove(po_id);
            store.invoice_by_po.remove(po_id);
        });
        Ok(created)
    }

    async fn get_invoice(&self, invoice_id: &str) -> Result<Invoice> {
        if let Some(invoice) = self.read(|s| s.invoices.get(invoice_id).cloned()) {
            return Ok(invoice);
        }
        let invoice = self.inner.get_invoice(invoice_id).await?;
        self.write(|store| {
            store.invoices.insert(invoice.id.clone(), invoice.clone());
        });
        Ok(invoice)
    }

    async fn invoice_for_po(&self, po_id: &str) -> Result<Option<Invoice>> {
        if let Some(cached) = self.read(|s| s.invoice_by_po.get(po_id).cloned()) {
            return Ok(cached);
        }
        let invoice = self.inner.invoice_for_po(po_id).await?;
        self.write(|store| {
            if let Some(ref inv) = invoice {
                store.invoices.insert(inv.id.clone(), inv.clone());
            }
            store.invoice_by_po.insert(po_id.to_string(), invoice.clone());
        });
        Ok(invoice)
    }

    async fn schedule_payment(&self, invoice_id: &str, amount_cents: Option<i64>) -> Result<i64> {
        let payment_id = self.inner.schedule_payment(invoice_id, amount_cents).await?;
        self.write(|store| {
            store.payments.remove(invoice_id);
            store.invoices.remove(invoice_id);
            // The PO-keyed lookup holds a full invoice; drop the entry
            // whose invoice this payment mutated
            store
                .invoice_by_po
                .retain(|_, cached| cached.as_ref().map_or(true, |inv| inv.id != invoice_id));
        });
        Ok(payment_id)
    }

    async fn execute_payment(&self, payment_id: i64) -> Result<serde_json::Value> {
        let value = self.inner.execute_payment(payment_id).await?;
        // Payment state changed; the owning invoice is unknown here, so
        // drop all invoice-bearing tables
        self.write(|store| {
            store.payments.clear();
            store.invoices.clear();
            store.invoice_by_po.clear();
        });
        Ok(value)
    }

    async fn payments_for_invoice(&self, invoice_id: &str) -> Result<Vec<SupplierPayment>> {
        if let Some(payments) = self.read(|s| s.payments.get(invoice_id).cloned()) {
            return Ok(payments);
        }
        let payments = self.inner.payments_for_invoice(invoice_id).await?;
        self.write(|store| {
            store
                .payments
                .insert(invoice_id.to_string(), payments.clone());
        });
        Ok(payments)
    }
}

#[async_trait]
impl<C: SupplyMindApi> SupplierApi for CachedClient<C> {
    async fn list_suppliers(&self) -> Result<Vec<Supplier>> {
        if let Some(suppliers) = self.read(|s| s.suppliers.clone()) {
            return Ok(suppliers);
        }
        let suppliers = self.inner.list_suppliers().await?;
        self.write(|store| store.suppliers = Some(suppliers.clone()));
        Ok(suppliers)
    }

    async fn connect_status(&self, supplier_id: &str) -> Result<ConnectStatus> {
        if let Some(status) = self.read(|s| s.connect.get(supplier_id).copied()) {
            return Ok(status);
        }
        let status = self.inner.connect_status(supplier_id).await?;
        self.write(|store| {
            store.connect.insert(supplier_id.to_string(), status);
        });
        Ok(status)
    }

    async fn create_onboarding_link(&self, supplier_id: &str) -> Result<OnboardingLink> {
        let link = self.inner.create_onboarding_link(supplier_id).await?;
        // Onboarding is about to change state
        self.write(|store| {
            store.connect.remove(supplier_id);
        });
        Ok(link)
    }
}

#[async_trait]
impl<C: SupplyMindApi> PaymentApi for CachedClient<C> {
    async fn create_payment_intent(&self, po_id: &str, currency: &str) -> Result<PaymentIntent> {
        self.inner.create_payment_intent(po_id, currency).await
    }

    async fn confirm_payment(
        &self,
        intent_id: &str,
        client_secret: &str,
    ) -> Result<ConfirmOutcome> {
        self.inner.confirm_payment(intent_id, client_secret).await
    }

    async fn get_intent(&self, intent_id: &str) -> Result<PaymentIntentStatus> {
        self.inner.get_intent(intent_id).await
    }

    async fn refund_payment(&self, intent_id: &str, request: &RefundRequest) -> Result<Refund> {
        let refund = self.inner.refund_payment(intent_id, request).await?;
        self.write(|store| {
            store.payments.clear();
            store.invoices.clear();
            store.invoice_by_po.clear();
        });
        Ok(refund)
    }
}

#[async_trait]
impl<C: SupplyMindApi> InventoryApi for CachedClient<C> {
    async fn list_inventory(&self) -> Result<Vec<InventoryItem>> {
        if let Some(items) = self.read(|s| s.inventory.clone()) {
            return Ok(items);
        }
        let items = self.inner.list_inventory().await?;
        self.write(|store| store.inventory = Some(items.clone()));
        Ok(items)
    }

    async fn record_receipt(&self, po_id: &str, lines: &[ReceiptLine]) -> Result<CreatedReceipt> {
        let created = self.inner.record_receipt(po_id, lines).await?;
        self.write(|store| store.inventory = None);
        Ok(created)
    }

    async fn list_pending_returns(&self) -> Result<Vec<ReturnCase>> {
        if let Some(returns) = self.read(|s| s.returns.clone()) {
            return Ok(returns);
        }
        let returns = self.inner.list_pending_returns().await?;
        self.write(|store| store.returns = Some(returns.clone()));
        Ok(returns)
    }

    async fn submit_inspection(
        &self,
        return_id: &str,
        disposition: ReturnDisposition,
        notes: Option<&str>,
    ) -> Result<()> {
        self.inner
            .submit_inspection(return_id, disposition, notes)
            .await?;
        self.write(|store| {
            store.returns = None;
            store.inventory = None;
        });
        Ok(())
    }
}

#[async_trait]
impl<C: SupplyMindApi> ProfileApi for CachedClient<C> {
    async fn get_profile(&self) -> Result<UserProfile> {
        if let Some(profile) = self.read(|s| s.profile.clone()) {
            return Ok(profile);
        }
        let profile = self.inner.get_profile().await?;
        self.write(|store| store.profile = Some(profile.clone()));
        Ok(profile)
    }

    async fn upload_signature(&self, path: &Path) -> Result<String> {
        let url = self.inner.upload_signature(path).await?;
        self.write(|store| store.profile = None);
        Ok(url)
    }
}
