//! User profile and authentication resources

use serde::{Deserialize, Serialize};

/// Authentication token issued on successful login.
///
/// Opaque to the client; expiry, if any, is enforced server-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthToken {
    /// The token string
    pub token: String,
}

/// User profile record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    /// User ID
    pub id: String,

    /// Display name
    pub name: String,

    /// Login email
    pub email: String,

    /// Platform role (not in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// URL of the uploaded signature image, if one exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub signature_url: Option<String>,
}
