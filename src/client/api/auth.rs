//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::AuthToken;
use crate::error::Result;

/// Authentication operations for the SupplyMind API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Sign in with email and password; the server issues an opaque token
    async fn login(&self, email: &str, password: &str) -> Result<AuthToken>;

    /// Invalidate the current token server-side
    async fn logout(&self) -> Result<()>;
}
