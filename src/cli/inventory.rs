//! Inventory command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::InventoryApi;
use crate::client::models::{InventoryItem, ReceiptLine};
use crate::error::{Error, Result};
use crate::output::{json, table};

/// Inventory item for table display
#[derive(Tabled)]
struct InventoryDisplay {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "ON HAND")]
    on_hand: i64,
    #[tabled(rename = "LOCATION")]
    location: String,
}

impl From<InventoryItem> for InventoryDisplay {
    fn from(item: InventoryItem) -> Self {
        Self {
            sku: item.sku,
            name: item.name,
            on_hand: item.on_hand,
            location: item.location.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Run the inventory list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let items = ctx.client.list_inventory().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<InventoryDisplay> =
                items.into_iter().map(InventoryDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&items)?),
    }

    Ok(())
}

/// Run the inventory receive command
pub async fn receive(ctx: &CommandContext, po_id: &str, raw_lines: &[String]) -> Result<()> {
    let lines = raw_lines
        .iter()
        .map(|raw| parse_line(raw))
        .collect::<Result<Vec<ReceiptLine>>>()?;

    let receipt = ctx.client.record_receipt(po_id, &lines).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Recorded receipt {} against purchase order {} ({} line{})",
                "✓".green(),
                receipt.receipt_id.bold(),
                po_id,
                lines.len(),
                if lines.len() == 1 { "" } else { "s" }
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&receipt)?),
    }

    Ok(())
}

/// Parse a `SKU=QUANTITY` argument into a receipt line
fn parse_line(raw: &str) -> Result<ReceiptLine> {
    let (sku, quantity) = raw
        .split_once('=')
        .ok_or_else(|| Error::Other(format!("Expected SKU=QUANTITY, got '{raw}'")))?;

    if sku.is_empty() {
        return Err(Error::Other(format!("Missing SKU in line '{raw}'")));
    }

    let quantity: i64 = quantity
        .parse()
        .map_err(|_| Error::Other(format!("Invalid quantity in line '{raw}'")))?;
    if quantity <= 0 {
        return Err(Error::Other(format!(
            "Quantity must be positive in line '{raw}'"
        )));
    }

    Ok(ReceiptLine {
        sku: sku.to_string(),
        quantity,
    })
}
