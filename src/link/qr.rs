//! Terminal QR rendering

use qrcode::QrCode;
use qrcode::render::unicode;

use crate::error::{Error, Result};

/// Render a payload as a unicode-block QR code for the terminal
pub fn render_qr(payload: &str) -> Result<String> {
    let code = QrCode::new(payload.as_bytes())
        .map_err(|e| Error::Other(format!("Failed to build QR code: {e}")))?;
    Ok(code
        .render::<unicode::Dense1x2>()
        .quiet_zone(true)
        .build())
}
