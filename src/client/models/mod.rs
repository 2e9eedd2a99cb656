//! SupplyMind API resource models
//!
//! Wire shapes for the platform's JSON API. Field names follow the server's
//! camelCase convention; optional fields are omitted when absent.

mod inventory;
mod invoice;
mod payment;
mod po;
mod supplier;
mod user;

pub use inventory::{CreatedReceipt, InventoryItem, ReceiptLine, ReturnCase, ReturnDisposition};
pub use invoice::{CreatedInvoice, Invoice};
pub use payment::{IntentState, PaymentIntent, PaymentIntentStatus, Refund, SupplierPayment};
pub use po::PurchaseOrder;
pub use supplier::{ConnectStatus, OnboardingLink, Supplier};
pub use user::{AuthToken, UserProfile};
