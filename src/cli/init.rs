//! Init command implementation

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};

use crate::client::{AuthApi, RestClient};
use crate::config::Config;
use crate::error::Result;

/// Run the init command.
///
/// Interactive setup signs in with email and password and stores the issued
/// token. A custom API host passed on the command line is saved alongside it.
pub async fn run(api_host: Option<&str>, config_path: Option<&str>) -> Result<()> {
    println!("{}", "Welcome to SupplyMind!".bold().green());
    println!("Let's sign you in.\n");

    let email: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt("Email")
        .interact_text()?;

    let password: String = Password::with_theme(&ColorfulTheme::default())
        .with_prompt("Password")
        .interact()?;

    println!("\n{}", "Signing in...".cyan());
    let client = RestClient::with_host(None, api_host.map(String::from))?;
    let auth = client.login(&email, &password).await?;

    println!("{}", "✓ Signed in!".green());

    let mut config = Config::load_at(config_path).unwrap_or_default();
    config.token = Some(auth.token);
    if let Some(host) = api_host {
        config.api_host = Some(host.to_string());
    }
    config.save_at(config_path)?;

    let path = Config::resolve_path(config_path)?;
    println!(
        "\n{} Configuration saved to: {}",
        "✓".green(),
        path.display()
    );

    println!("\n{}", "You're all set! Try running:".bold());
    println!("  {} - Show configuration status", "supplymind status".cyan());
    println!(
        "  {} - List purchase orders ready for invoicing",
        "supplymind po list".cyan()
    );

    Ok(())
}
