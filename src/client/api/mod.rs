//! API trait definitions split by responsibility
//!
//! This module organizes the SupplyMind API surface into focused sub-traits:
//! - [`AuthApi`] - Login and logout
//! - [`FinanceApi`] - Purchase orders, invoices, supplier payments
//! - [`SupplierApi`] - Suppliers and Connect onboarding
//! - [`PaymentApi`] - Payment intents, confirmation and refunds
//! - [`InventoryApi`] - Inventory, receiving and returns inspection
//! - [`ProfileApi`] - User profile and signature upload
//!
//! The [`SupplyMindApi`](super::SupplyMindApi) super-trait combines them.

mod auth;
mod finance;
mod inventory;
mod payment;
mod profile;
mod supplier;

pub use auth::AuthApi;
pub use finance::FinanceApi;
pub use inventory::InventoryApi;
pub use payment::PaymentApi;
pub use profile::ProfileApi;
pub use supplier::SupplierApi;
