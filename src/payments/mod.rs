//! Payment intent orchestration helpers
//!
//! The platform owns the payment processor integration; this module holds
//! the client's side of it: refund request validation (rejected before any
//! network call) and the tagged outcome of a confirmation attempt.

use std::time::Duration;

use serde::Serialize;

use crate::client::models::{IntentState, PaymentIntentStatus};
use crate::client::api::PaymentApi;
use crate::error::{Result, ValidationError};

/// Refund scope requested by the operator
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefundMode {
    /// Refund the remaining balance; the request carries no amount
    Full,
    /// Refund a specific amount in minor units
    Partial,
}

/// A validated refund request.
///
/// Construction enforces the client-side rules: a partial amount must be
/// strictly positive and must not exceed a supplied maximum. Invalid
/// requests never reach the network layer.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefundRequest {
    /// Amount in minor units; omitted for full refunds (the server
    /// defaults to the remaining balance)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount_cents: Option<i64>,
}

impl RefundRequest {
    /// Full refund: no amount, server refunds the remaining balance
    pub fn full() -> Self {
        Self { amount_cents: None }
    }

    /// Partial refund of `amount_cents`, optionally capped at
    /// `max_refundable_cents` (the remaining refundable balance, when the
    /// caller knows it).
    pub fn partial(amount_cents: i64, max_refundable_cents: Option<i64>) -> Result<Self> {
        if amount_cents <= 0 {
            return Err(ValidationError::NonPositiveRefund.into());
        }
        if let Some(max) = max_refundable_cents {
            if amount_cents > max {
                return Err(ValidationError::RefundExceedsMax {
                    requested: amount_cents,
                    max,
                }
                .into());
            }
        }
        Ok(Self {
            amount_cents: Some(amount_cents),
        })
    }

    /// The mode this request was built with
    pub fn mode(&self) -> RefundMode {
        match self.amount_cents {
            None => RefundMode::Full,
            Some(_) => RefundMode::Partial,
        }
    }
}

/// Tagged result of a payment confirmation attempt.
///
/// The server-side webhook is the source of truth for final settlement;
/// this only reflects what the confirmation call reported.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ConfirmOutcome {
    /// Further customer action is needed (e.g. a 3DS redirect)
    #[serde(rename_all = "camelCase")]
    RequiresAction { redirect_url: Option<String> },
    /// The confirmation call reported immediate success
    Succeeded,
    /// The confirmation failed; reason surfaced verbatim from the platform
    Failed(String),
}

/// Default interval between settlement polls
pub const POLL_INTERVAL: Duration = Duration::from_secs(2);

/// Default number of settlement polls before giving up
pub const POLL_ATTEMPTS: u32 = 30;

/// Poll a payment intent until it reaches a terminal state.
///
/// Returns the last observed status either way; callers inspect
/// `status.is_terminal()` to distinguish settled from still-processing.
/// `on_poll` is invoked after each fetch (the CLI ticks a spinner there).
pub async fn poll_settlement<C, F>(
    client: &C,
    intent_id: &str,
    interval: Duration,
    attempts: u32,
    mut on_poll: F,
) -> Result<PaymentIntentStatus>
where
    C: PaymentApi + ?Sized,
    F: FnMut(&PaymentIntentStatus),
{
    let mut last = client.get_intent(intent_id).await?;
    on_poll(&last);

    for _ in 1..attempts {
        if last.status.is_terminal() {
            break;
        }
        tokio::time::sleep(interval).await;
        last = client.get_intent(intent_id).await?;
        on_poll(&last);
    }

    Ok(last)
}

/// Map the platform's confirmation response fields to a tagged outcome
pub fn confirm_outcome(
    state: IntentState,
    redirect_url: Option<String>,
    error: Option<String>,
) -> ConfirmOutcome {
    match state {
        IntentState::RequiresAction => ConfirmOutcome::RequiresAction { redirect_url },
        IntentState::Succeeded => ConfirmOutcome::Succeeded,
        _ => ConfirmOutcome::Failed(
            error.unwrap_or_else(|| format!("confirmation ended in state {state:?}")),
        ),
    }
}
