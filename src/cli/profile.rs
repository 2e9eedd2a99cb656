//! Profile command implementations

use std::path::Path;

use colored::Colorize;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::ProfileApi;
use crate::error::{Error, Result};
use crate::output::json;

/// Run the profile show command
pub async fn show(ctx: &CommandContext) -> Result<()> {
    let profile = ctx.client.get_profile().await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("{}", "Signed-in User".bold());
            println!();
            println!("  ID:    {}", profile.id);
            println!("  Name:  {}", profile.name);
            println!("  Email: {}", profile.email);
            if let Some(role) = profile.role {
                println!("  Role:  {role}");
            }
            if let Some(url) = profile.signature_url {
                println!("  Signature: {}", url.cyan());
            }
        }
        OutputFormat::Json => println!("{}", json::format_json(&profile)?),
    }

    Ok(())
}

/// Run the profile signature command
pub async fn signature(ctx: &CommandContext, path: &str) -> Result<()> {
    let path = Path::new(path);
    if !path.is_file() {
        return Err(Error::Other(format!(
            "Signature file not found: {}",
            path.display()
        )));
    }

    let url = ctx.client.upload_signature(path).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("{} Signature uploaded:", "✓".green());
            println!("  {}", url.cyan());
        }
        OutputFormat::Json => println!("{}", json::format_json(&url)?),
    }

    Ok(())
}
