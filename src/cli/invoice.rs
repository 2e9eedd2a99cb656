//! Invoice command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::FinanceApi;
use crate::client::models::Invoice;
use crate::error::Result;
use crate::output::{format_cents, format_date, json, table};

/// Invoice for table display
#[derive(Tabled)]
struct InvoiceDisplay {
    #[tabled(rename = "INVOICE ID")]
    id: String,
    #[tabled(rename = "PO ID")]
    po_id: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "ISSUED")]
    issued: String,
}

impl From<Invoice> for InvoiceDisplay {
    fn from(invoice: Invoice) -> Self {
        Self {
            amount: format_cents(invoice.amount_cents, &invoice.currency),
            issued: format_date(invoice.issued_at),
            id: invoice.id,
            po_id: invoice.po_id,
            status: invoice.status,
        }
    }
}

/// Run the invoice create command
pub async fn create(ctx: &CommandContext, po_id: &str) -> Result<()> {
    let created = ctx.client.create_invoice(po_id).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Created invoice {} for purchase order {}",
                "✓".green(),
                created.invoice_id.bold(),
                po_id
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&created)?),
    }

    Ok(())
}

/// Run the invoice get command
pub async fn get(ctx: &CommandContext, invoice_id: &str) -> Result<()> {
    let invoice = ctx.client.get_invoice(invoice_id).await?;
    print_invoice(ctx.format, invoice)
}

/// Run the invoice for-po command
pub async fn for_po(ctx: &CommandContext, po_id: &str) -> Result<()> {
    match ctx.client.invoice_for_po(po_id).await? {
        Some(invoice) => print_invoice(ctx.format, invoice),
        None => {
            match ctx.format {
                OutputFormat::Table => {
                    println!("No invoice exists for purchase order {po_id}.");
                    println!(
                        "Run {} to create one.",
                        format!("supplymind invoice create {po_id}").cyan()
                    );
                }
                OutputFormat::Json => {
                    println!("{}", json::format_json(&Option::<Invoice>::None)?)
                }
            }
            Ok(())
        }
    }
}

fn print_invoice(format: OutputFormat, invoice: Invoice) -> Result<()> {
    match format {
        OutputFormat::Table => {
            let rows = vec![InvoiceDisplay::from(invoice)];
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&invoice)?),
    }
    Ok(())
}
