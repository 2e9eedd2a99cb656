//! Supplier and Connect onboarding resources

use serde::{Deserialize, Serialize};

/// Supplier record
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Supplier {
    /// Supplier ID
    pub id: String,

    /// Supplier display name
    pub name: String,

    /// Contact email (not in all responses)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

/// Onboarding state of a supplier with the payment platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConnectStatus {
    NotStarted,
    Pending,
    Enabled,
}

impl std::fmt::Display for ConnectStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ConnectStatus::NotStarted => "NOT_STARTED",
            ConnectStatus::Pending => "PENDING",
            ConnectStatus::Enabled => "ENABLED",
        };
        write!(f, "{s}")
    }
}

/// One-time onboarding link for a supplier
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingLink {
    /// URL the supplier opens to complete onboarding
    pub url: String,
}
