//! Checkout command implementations.
//!
//! These drive a card payment for a purchase order through the processor:
//! create an intent, confirm it with the client secret, watch it settle, and
//! refund it afterwards.

use std::time::Duration;

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use crate::cli::{CommandContext, OutputFormat};
use crate::client::PaymentApi;
use crate::error::Result;
use crate::output::{format_cents, json};
use crate::payments::{self, ConfirmOutcome, RefundRequest};

/// Run the checkout create command
pub async fn create(ctx: &CommandContext, po_id: &str, currency: Option<&str>) -> Result<()> {
    let currency = currency.unwrap_or(&ctx.config.preferences.currency);
    let intent = ctx.client.create_payment_intent(po_id, currency).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Started payment {} for purchase order {}",
                "✓".green(),
                intent.intent_id.bold(),
                po_id
            );
            println!("  Client secret: {}", intent.client_secret);
            println!(
                "\nConfirm it with {}",
                format!(
                    "supplymind checkout confirm {} <CLIENT_SECRET>",
                    intent.intent_id
                )
                .cyan()
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&intent)?),
    }

    Ok(())
}

/// Run the checkout confirm command
pub async fn confirm(ctx: &CommandContext, intent_id: &str, client_secret: &str) -> Result<()> {
    let outcome = ctx.client.confirm_payment(intent_id, client_secret).await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&outcome)?),
        OutputFormat::Table => match &outcome {
            ConfirmOutcome::Succeeded => {
                println!("{} Payment {} settled", "✓".green(), intent_id);
            }
            ConfirmOutcome::RequiresAction { redirect_url } => {
                println!(
                    "{} Payment {} needs buyer authentication:",
                    "⚠".yellow(),
                    intent_id
                );
                match redirect_url {
                    Some(url) => println!("  {}", url.cyan().underline()),
                    None => println!("  Complete the authentication in the dashboard."),
                }
                println!(
                    "\nAfter completing it, run {}",
                    format!("supplymind checkout watch {intent_id}").cyan()
                );
            }
            ConfirmOutcome::Failed(reason) => {
                println!("{} Payment {} failed: {}", "✗".red(), intent_id, reason);
            }
        },
    }

    Ok(())
}

/// Run the checkout watch command.
///
/// Polls the intent until it reaches a terminal state, showing progress
/// along the way.
pub async fn watch(ctx: &CommandContext, intent_id: &str) -> Result<()> {
    let spinner = match ctx.format {
        OutputFormat::Table => {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::with_template("{spinner:.cyan} {msg}")
                    .unwrap_or_else(|_| ProgressStyle::default_spinner()),
            );
            spinner.enable_steady_tick(Duration::from_millis(100));
            Some(spinner)
        }
        OutputFormat::Json => None,
    };

    let final_status = payments::poll_settlement(
        ctx.client.as_ref(),
        intent_id,
        payments::POLL_INTERVAL,
        payments::POLL_ATTEMPTS,
        |status| {
            if let Some(ref spinner) = spinner {
                spinner.set_message(format!("Payment {}: {:?}", intent_id, status.status));
            }
        },
    )
    .await;

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let status = final_status?;
    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Payment {} finished as {:?}",
                "✓".green(),
                intent_id,
                status.status
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&status)?),
    }

    Ok(())
}

/// Run the checkout refund command
pub async fn refund(ctx: &CommandContext, intent_id: &str, amount_cents: Option<i64>) -> Result<()> {
    let request = match amount_cents {
        Some(amount) => RefundRequest::partial(amount, None)?,
        None => RefundRequest::full(),
    };

    let refund = ctx.client.refund_payment(intent_id, &request).await?;

    match ctx.format {
        OutputFormat::Table => {
            println!(
                "{} Refunded {} on payment {} (refund {})",
                "✓".green(),
                format_cents(refund.amount_cents, &ctx.config.preferences.currency).bold(),
                intent_id,
                refund.refund_id
            );
        }
        OutputFormat::Json => println!("{}", json::format_json(&refund)?),
    }

    Ok(())
}
