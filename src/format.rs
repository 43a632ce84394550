//! Display formatting shared by every encoder.
//!
//! CSV cells, document cells and fragment cells all go through these
//! functions, so a date or an amount renders the same everywhere.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::{Decimal, RoundingStrategy};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";
pub const TIME_FORMAT: &str = "%H:%M";

/// Round half away from zero and pin the scale, so `12.5` prints as `12.50`.
fn fixed(value: Decimal, dp: u32) -> Decimal {
    let mut d = value.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    d.rescale(dp);
    if d.is_zero() {
        d.set_sign_positive(true);
    }
    d
}

/// Two decimals, no symbol: `1234.50`.
pub fn money(value: Decimal) -> String {
    fixed(value, 2).to_string()
}

/// Two decimals with a leading symbol: `$1234.50`, `-$3.00`.
pub fn currency(value: Decimal, symbol: &str) -> String {
    let amount = fixed(value, 2);
    if amount.is_sign_negative() && !amount.is_zero() {
        format!("-{symbol}{}", amount.abs())
    } else {
        format!("{symbol}{}", amount.abs())
    }
}

/// Plain number, at most two decimals, trailing zeros dropped: `9.5`, `12`.
pub fn number(value: Decimal) -> String {
    value
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .normalize()
        .to_string()
}

/// One decimal and a percent sign: `66.7%`.
pub fn percentage(value: Decimal) -> String {
    format!("{}%", fixed(value, 1))
}

pub fn date(value: NaiveDate) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn datetime(value: NaiveDateTime) -> String {
    value.format(DATETIME_FORMAT).to_string()
}

pub fn time(value: NaiveTime) -> String {
    value.format(TIME_FORMAT).to_string()
}

/// Generation stamp printed in document and CSV title blocks.
pub fn timestamp(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%d %H:%M:%S").to_string()
}

/// Reduce a keyword to `[a-z0-9-]`, e.g. `On Leave` -> `on-leave`.
pub fn slug(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') && !out.is_empty() {
            out.push('-');
        }
    }
    while out.ends_with('-') {
        out.pop();
    }
    out
}

/// Title-case a status keyword for display: `on_leave` -> `On Leave`.
pub fn humanize(value: &str) -> String {
    value
        .split(|c: char| c == '_' || c == '-' || c.is_whitespace())
        .filter(|w| !w.is_empty())
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
