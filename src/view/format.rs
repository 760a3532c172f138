//! Number formatting for the dashboard (Indian digit grouping, rupee glyph).

use rust_decimal::{Decimal, RoundingStrategy};

pub const CURRENCY_SYMBOL: &str = "₹";
pub const PLACEHOLDER: &str = "N/A";

/// Two decimals with en-IN grouping: `1234567.891` -> `12,34,567.89`.
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "∞" } else { "-∞" }.to_string();
    }

    let fixed = to_fixed_2(value.abs());
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{}.{frac_part}", group_indian(int_part))
}

pub fn format_money(value: f64) -> String {
    if value < 0.0 {
        return format!("-{CURRENCY_SYMBOL}{}", format_number(value.abs()));
    }
    format!("{CURRENCY_SYMBOL}{}", format_number(value))
}

/// Always signed: `+₹100.00`, `-₹2,500.00`. Zero counts as positive.
pub fn format_pnl(value: f64) -> String {
    let formatted = format!("{CURRENCY_SYMBOL}{}", format_number(value.abs()));
    if is_gain(value) {
        format!("+{formatted}")
    } else {
        format!("-{formatted}")
    }
}

pub fn pnl_class(value: f64) -> &'static str {
    if is_gain(value) {
        "pnl positive"
    } else {
        "pnl negative"
    }
}

/// Quantities print without forced decimals (`10`, `2.5`).
pub fn format_quantity(value: f64) -> String {
    value.to_string()
}

/// Two decimals, halves rounded away from zero (`0.125` -> `0.13`).
///
/// Goes through the exact decimal value of the float, so `1.005` (really
/// `1.00499...`) still rounds down.
fn to_fixed_2(value: f64) -> String {
    match Decimal::from_f64_retain(value) {
        Some(d) => format!(
            "{:.2}",
            d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        ),
        // Beyond Decimal's range; sub-paisa rounding is moot at that magnitude.
        None => format!("{value:.2}"),
    }
}

fn is_gain(value: f64) -> bool {
    value >= 0.0
}

// Last three digits form one group, everything before it is grouped in twos.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }
    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{tail}", groups.join(","))
}
