//! Supplier API trait: suppliers and Connect onboarding

use async_trait::async_trait;

use crate::client::models::{ConnectStatus, OnboardingLink, Supplier};
use crate::error::Result;

/// Supplier onboarding operations for the SupplyMind API
#[async_trait]
pub trait SupplierApi: Send + Sync {
    /// All suppliers visible to this user
    async fn list_suppliers(&self) -> Result<Vec<Supplier>>;

    /// Payment-platform onboarding state for one supplier
    async fn connect_status(&self, supplier_id: &str) -> Result<ConnectStatus>;

    /// Create a one-time onboarding link for a supplier
    async fn create_onboarding_link(&self, supplier_id: &str) -> Result<OnboardingLink>;
}
