//! Supplier payment command implementations

use colored::Colorize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::FinanceApi;
use crate::client::models::SupplierPayment;
use crate::error::Result;
use crate::output::{format_cents, format_date, json, table};

/// Payment for table display
#[derive(Tabled)]
struct PaymentDisplay {
    #[tabled(rename = "PAYMENT ID")]
    id: i64,
    #[tabled(rename = "INVOICE ID")]
    invoice_id: String,
    #[tabled(rename = "STATUS")]
    status: String,
    #[tabled(rename = "AMOUNT")]
    amount: String,
    #[tabled(rename = "SCHEDULED")]
    scheduled: String,
    #[tabled(rename = "EXECUTED")]
    executed: String,
}

impl PaymentDisplay {
    fn from_payment(payment: SupplierPayment, currency: &str) -> Self {
        Self {
            amount: format_cents(payment.amount_cents, currency),
            scheduled: format_date(payment.scheduled_at),
            executed: format_date(payment.executed_at),
            id: payment.id,
            invoice_id: payment.invoice_id,
            status: payment.status,
        }
    }
}

/// Run the payment schedule command
pub async fn schedule(
    ctx: &CommandContext,
    invoice_id: &str,
    amount_cents: Option<i64>,
) -> Result<()> {
    let payment_id = ctx.client.schedule_payment(invoice_id, amount_cents).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Scheduled payment {} against invoice {}",
                "✓".green(),
                payment_id.to_string().bold(),
                invoice_id
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&payment_id)?),
    }

    Ok(())
}

/// Run the payment execute command
pub async fn execute(ctx: &CommandContext, payment_id: i64) -> Result<()> {
    let receipt = ctx.client.execute_payment(payment_id).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!("{} Executed payment {}", "✓".green(), payment_id);
        }
        OutputFormat::Json => println!("{}", json::format_json(&receipt)?),
    }

    Ok(())
}

/// Run the payment list command
pub async fn list(ctx: &CommandContext, invoice_id: &str) -> Result<()> {
    let payments = ctx.client.payments_for_invoice(invoice_id).await?;

    match ctx.format {
        OutputFormat::Table => {
            let currency = ctx.config.preferences.currency.clone();
            let rows: Vec<PaymentDisplay> = payments
                .into_iter()
                .map(|p| PaymentDisplay::from_payment(p, &currency))
                .collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&payments)?),
    }

    Ok(())
}
