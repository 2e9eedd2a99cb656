//! Returns inspection command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::InventoryApi;
use crate::client::models::{ReturnCase, ReturnDisposition};
use crate::error::Result;
use crate::output::{json, table};

/// Return case for table display
#[derive(Tabled)]
struct ReturnDisplay {
    #[tabled(rename = "RETURN ID")]
    id: String,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "QTY")]
    quantity: i64,
    #[tabled(rename = "REASON")]
    reason: String,
    #[tabled(rename = "STATUS")]
    status: String,
}

impl From<ReturnCase> for ReturnDisplay {
    fn from(case: ReturnCase) -> Self {
        Self {
            id: case.id,
            sku: case.sku,
            quantity: case.quantity,
            reason: case.reason.unwrap_or_else(|| "-".to_string()),
            status: case.status,
        }
    }
}

/// Run the returns list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let cases = ctx.client.list_pending_returns().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<ReturnDisplay> = cases.into_iter().map(ReturnDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&cases)?),
    }

    Ok(())
}

/// Run the returns inspect command
pub async fn inspect(
    ctx: &CommandContext,
    return_id: &str,
    disposition: ReturnDisposition,
    notes: Option<&str>,
) -> Result<()> {
    ctx.client
        .submit_inspection(return_id, disposition, notes)
        .await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Recorded inspection for return {}: {:?}",
                "✓".green(),
                return_id.bold(),
                disposition
            );
            if let Some(notes) = notes {
                println!("  Notes: {notes}");
            }
        }
        OutputFormat::Json => println!("{}", json::format_json(&disposition)?),
    }

    Ok(())
}
