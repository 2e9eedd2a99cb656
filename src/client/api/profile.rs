//! User profile API trait

use async_trait::async_trait;
use std::path::Path;

use crate::client::models::UserProfile;
use crate::error::Result;

/// Profile operations for the SupplyMind API
#[async_trait]
pub trait ProfileApi: Send + Sync {
    /// Fetch the signed-in user's profile
    async fn get_profile(&self) -> Result<UserProfile>;

    /// Upload a signature image (multipart); returns the stored image URL
    async fn upload_signature(&self, path: &Path) -> Result<String>;
}
