//! Supplier command implementations

use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::cli::{CommandContext, OutputFormat};
use crate::client::SupplierApi;
use crate::client::connect::connect_status_map;
use crate::client::models::{ConnectStatus, Supplier};
use crate::error::Result;
use crate::output::{json, table};

/// Supplier for table display
#[derive(Tabled)]
struct SupplierDisplay {
    #[tabled(rename = "SUPPLIER ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "EMAIL")]
    email: String,
}

impl From<Supplier> for SupplierDisplay {
    fn from(supplier: Supplier) -> Self {
        Self {
            id: supplier.id,
            name: supplier.name,
            email: supplier.email.unwrap_or_else(|| "-".to_string()),
        }
    }
}

/// Supplier joined with payout onboarding status
#[derive(Tabled, Serialize)]
struct OnboardingDisplay {
    #[tabled(rename = "SUPPLIER ID")]
    #[serde(rename = "supplierId")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "PAYOUT STATUS")]
    #[serde(rename = "payoutStatus")]
    payout_status: ConnectStatus,
}

/// Run the supplier list command
pub async fn list(ctx: &CommandContext) -> Result<()> {
    let suppliers = ctx.client.list_suppliers().await?;

    match ctx.format {
        OutputFormat::Table => {
            let rows: Vec<SupplierDisplay> =
                suppliers.into_iter().map(SupplierDisplay::from).collect();
            println!("{}", table::format_table(&rows));
        }
        OutputFormat::Json => println!("{}", json::format_json(&suppliers)?),
    }

    Ok(())
}

/// Run the supplier status command.
///
/// Fetches onboarding status for every supplier concurrently and joins the
/// results back onto the supplier list.
pub async fn status(ctx: &CommandContext) -> Result<()> {
    let suppliers = ctx.client.list_suppliers().await?;
    let ids: Vec<String> = suppliers.iter().map(|s| s.id.clone()).collect();
    let statuses = connect_status_map(ctx.client.as_ref(), &ids).await?;

    let rows: Vec<OnboardingDisplay> = suppliers
        .into_iter()
        .map(|s| OnboardingDisplay {
            payout_status: statuses
                .get(&s.id)
                .copied()
                .unwrap_or(ConnectStatus::NotStarted),
            id: s.id,
            name: s.name,
        })
        .collect();

    match ctx.format {
        OutputFormat::Table => println!("{}", table::format_table(&rows)),
        OutputFormat::Json => println!("{}", json::format_json(&rows)?),
    }

    Ok(())
}

/// Run the supplier onboard command
pub async fn onboard(ctx: &CommandContext, supplier_id: &str) -> Result<()> {
    let link = ctx.client.create_onboarding_link(supplier_id).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Onboarding link for supplier {}:",
                "✓".green(),
                supplier_id.bold()
            );
            println!("  {}", link.url.cyan().underline());
            println!("\nSend this link to the supplier; it expires after first use.");
        }
        OutputFormat::Json => println!("{}", json::format_json(&link)?),
    }

    Ok(())
}
