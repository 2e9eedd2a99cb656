//! Device-setup payloads.
//!
//! A device that already holds a token can hand it to a second device by
//! encoding `SUPPLYMIND_SETUP:<token>` into a QR code. This format is for
//! pairing only and is distinct from the desktop login QR, which carries a
//! bare Session Identifier.

use crate::auth::TokenStore;
use crate::error::{Result, ValidationError};

/// Fixed prefix of a setup payload
pub const SETUP_PREFIX: &str = "SUPPLYMIND_SETUP:";

/// Build a setup payload from this device's token
pub fn encode_setup_payload(token: &str) -> String {
    format!("{SETUP_PREFIX}{token}")
}

/// Extract the token from a scanned setup payload.
///
/// Rejects anything without the literal prefix; the scan loop surfaces the
/// error and keeps scanning.
pub fn parse_setup_payload(payload: &str) -> Result<&str> {
    let token = payload
        .strip_prefix(SETUP_PREFIX)
        .ok_or(ValidationError::BadSetupPrefix)?;
    if token.is_empty() {
        return Err(ValidationError::EmptySetupToken.into());
    }
    Ok(token)
}

/// Parse a setup payload and adopt its token as this device's credential.
///
/// On a malformed payload the stored credential is left untouched.
pub fn adopt_setup_payload(payload: &str, store: &dyn TokenStore) -> Result<()> {
    let token = parse_setup_payload(payload)?;
    store.save(token)
}
