//! Setup command implementations

use colored::Colorize;

use crate::auth::FileTokenStore;
use crate::config::Config;
use crate::error::Result;
use crate::link::qr::render_qr;
use crate::link::setup::{adopt_setup_payload, encode_setup_payload};

/// Show this device's credential as a setup QR code
pub fn show(config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    config.validate_auth()?;
    let token = config.token.as_deref().unwrap_or_default();

    let payload = encode_setup_payload(token);
    println!("Scan this code on the new device:\n");
    println!("{}", render_qr(&payload)?);
    println!(
        "{}",
        "Anyone who scans this code can act as you. Keep it private."
            .yellow()
    );

    Ok(())
}

/// Adopt a credential from a scanned setup payload
pub fn adopt(payload: &str, config_path: Option<&str>) -> Result<()> {
    let store = FileTokenStore::new(config_path);
    adopt_setup_payload(payload, &store)?;

    println!("{} Credential adopted on this device", "✓".green());
    Ok(())
}
