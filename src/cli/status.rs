//! Status command implementation

use colored::Colorize;

use crate::config::Config;
use crate::error::Result;

/// Run the status command to display configuration status
pub fn run(config_path: Option<&str>) -> Result<()> {
    println!("{}\n", "SupplyMind Configuration Status".bold());

    match Config::load_at(config_path) {
        Ok(config) => {
            let path = Config::resolve_path(config_path)?;
            println!("Config file: {}", path.display().to_string().cyan());
            println!();

            if config.token.is_some() {
                println!("{} Credential stored", "✓".green());
            } else {
                println!("{} No credential stored", "✗".red());
                println!("  → Run 'supplymind init' or 'supplymind login qr'");
            }

            if let Some(ref host) = config.api_host {
                println!("{} Custom API host: {}", "○".dimmed(), host.cyan());
            }
            if let Some(ref host) = config.ws_host {
                println!("{} Custom realtime host: {}", "○".dimmed(), host.cyan());
            }

            println!(
                "{} Payment currency: {}",
                "○".dimmed(),
                config.preferences.currency.to_uppercase()
            );

            println!();
        }
        Err(_) => {
            println!("{} Configuration not found", "✗".red());
            println!();
            println!(
                "Run {} to create a configuration file.",
                "supplymind init".cyan()
            );
            println!();
        }
    }

    Ok(())
}
