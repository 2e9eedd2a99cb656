//! Purchase order command implementations

use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::FinanceApi;
use crate::client::models::PurchaseOrder;
use crate::error::Result;
use crate::output::{format_cents, format_date, json, table};

/// Purchase order for table display
#[derive(Tabled)]
struct PoDisplay {
    #[tabled(rename = "PO ID")]
    id: String,
    #[tabled(rename = "NUMBER")]
    number: String,
    #[tabled(rename = "SUPPLIER")]
    supplier: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "TOTAL")]
    total: String,
    #[tabled(rename = "CREATED")]
    created: String,
}

impl From<PurchaseOrder> for PoDisplay {
    fn from(po: PurchaseOrder) -> Self {
        Self {
            total: format_cents(po.total_cents, &po.currency),
            supplier: po.supplier_name.unwrap_or(po.supplier_id),
            created: format_date(po.created_at),
            id: po.id,
            number: po.number,
            status: po.status,
        }
    }
}

/// Run the po list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let pos = ctx.client.list_ready_pos().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<PoDisplay> = pos.into_iter().map(PoDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&pos)?),
    }

    Ok(())
}

/// Run the po get command
pub async fn get(ctx: &CommandContext, po_id: &str) -> Result<()> {
    let po = ctx.client.get_po(po_id).await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows = vec![PoDisplay::from(po)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&po)?),
    }

    Ok(())
}
