//! Login command implementations.
//!
//! `password` is the classic prompt flow. `qr` runs the desktop half of the
//! device-linking handshake and `approve` the mobile half. Both halves only
//! ever exchange the ephemeral session identifier and the resulting token.

use std::time::Duration;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use indicatif::{ProgressBar, ProgressStyle};

use crate::auth::{FileTokenStore, TokenStore};
use crate::client::{AuthApi, RestClient};
use crate::config::Config;
use crate::error::Result;
use crate::link::{self, DEFAULT_LOGIN_TIMEOUT, qr};

/// Sign in with email and password
pub async fn password(api_host: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path).unwrap_or_default();
    let host = api_host.unwrap_or_else(|| config.api_host());

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let secret: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    let client = RestClient::with_host(None, Some(host.to_string()))?;
    let auth = client.login(&email, &secret).await?;

    FileTokenStore::new(config_path).save(&auth.token)?;
    println!("{} Signed in as {}", "✓".green(), email.bold());

    Ok(())
}

/// Sign in by showing a QR code to an already-authenticated device
pub async fn qr(config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path).unwrap_or_default();
    let store = FileTokenStore::new(config_path);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );

    let token = link::desktop_login(
        config.ws_host(),
        &store,
        DEFAULT_LOGIN_TIMEOUT,
        |session| {
            match qr::render_qr(session.id()) {
                Ok(art) => {
                    println!("Scan this code with a signed-in SupplyMind device:\n");
                    println!("{art}");
                    println!("Session: {}\n", session.id().dimmed());
                }
                Err(e) => eprintln!("Could not render QR code: {e}"),
            }
            spinner.set_message("Waiting for your device...");
            spinner.enable_steady_tick(Duration::from_millis(100));
        },
    )
    .await;
    spinner.finish_and_clear();

    token?;
    println!("{} Signed in", "✓".green());
    Ok(())
}

/// Approve a desktop login session from this signed-in device
pub async fn approve(session_id: &str, config_path: Option<&str>) -> Result<()> {
    let config = Config::load_at(config_path)?;
    config.validate_auth()?;
    let token = config.token.as_deref().unwrap_or_default();

    link::approve_login(config.ws_host(), session_id, token).await?;

    println!("{} Approved desktop session {}", "✓".green(), session_id);
    Ok(())
}

/// Sign out and discard the stored credential
pub async fn logout(api_host: Option<&str>, config_path: Option<&str>) -> Result<()> {
    let mut config = Config::load_at(config_path)?;
    config.validate_auth()?;
    if let Some(host) = api_host {
        config.api_host = Some(host.to_string());
    }

    let client = RestClient::with_host(
        config.token.clone(),
        Some(config.api_host().to_string()),
    )?;
    if let Err(e) = client.logout().await {
        // The server session may already be gone; drop the local credential
        // regardless.
        eprintln!("{} Server sign-out failed: {e}", "⚠".yellow());
    }

    FileTokenStore::new(config_path).clear()?;
    println!("{} Signed out", "✓".green());

    Ok(())
}
