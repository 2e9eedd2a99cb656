//! SupplyMind API client

pub mod api;
pub mod connect;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod rest;

pub use api::{AuthApi, FinanceApi, InventoryApi, PaymentApi, ProfileApi, SupplierApi};
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockClient;
pub use rest::RestClient;

/// Complete SupplyMind API surface, combining all sub-traits
pub trait SupplyMindApi:
    AuthApi + FinanceApi + SupplierApi + PaymentApi + InventoryApi + ProfileApi
{
}

impl<T> SupplyMindApi for T where
    T: AuthApi + FinanceApi + SupplierApi + PaymentApi + InventoryApi + ProfileApi
{
}
