//! Output formatting for CLI results

pub mod json;
pub mod table;

use chrono::{DateTime, Utc};

/// Format an amount in minor units for display, e.g. `12,345.67 USD`.
///
/// Amounts stay integral everywhere else; the decimal point exists only at
/// this display boundary.
pub fn format_cents(amount_cents: i64, currency: &str) -> String {
    let sign = if amount_cents < 0 { "-" } else { "" };
    let abs = amount_cents.unsigned_abs();
    let units = abs / 100;
    let cents = abs % 100;
    format!(
        "{sign}{}.{cents:02} {}",
        group_thousands(units),
        currency.to_uppercase()
    )
}

/// Format an optional timestamp as a date, or `-` when absent
pub fn format_date(ts: Option<DateTime<Utc>>) -> String {
    match ts {
        Some(ts) => ts.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

fn group_thousands(mut value: u64) -> String {
    let mut groups = Vec::new();
    loop {
        if value < 1000 {
            groups.push(value.to_string());
            break;
        }
        groups.push(format!("{:03}", value % 1000));
        value /= 1000;
    }
    groups.reverse();
    groups.join(",")
}
