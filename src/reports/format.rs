// src/reports/format.rs

use crate::domain::money::round_cents;
use rust_decimal::{Decimal, RoundingStrategy};

/// US-dollar formatting with thousands separators, e.g. `$1,234.56`.
pub fn format_currency(amount: Decimal) -> String {
    let rounded = round_cents(amount);
    let digits = format!("{:.2}", rounded.abs());
    let (whole, cents) = digits.split_once('.').unwrap_or((digits.as_str(), "00"));
    let sign = if rounded.is_sign_negative() && !rounded.is_zero() { "-" } else { "" };
    format!("{sign}${}.{cents}", group_thousands(whole))
}

/// Whole-dollar variant used for tier ranges, e.g. `$162,500`.
pub fn format_whole_dollars(amount: Decimal) -> String {
    let dollars = amount.round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    let sign = if dollars.is_sign_negative() && !dollars.is_zero() { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{:.0}", dollars.abs())))
}

pub fn format_percent(pct: Decimal) -> String {
    // 4 -> "4%", 3.50 -> "3.5%"
    format!("{}%", pct.normalize())
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
