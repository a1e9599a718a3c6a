//! Display-string formatting for estimate results.
//!
//! Presentation layers render these strings verbatim; no numeric logic
//! happens downstream of the engine.

use crate::types::PaybackPeriod;

/// Format a dollar amount with thousands separators, e.g. `$1,234.56`
pub fn format_money(value: f64) -> String {
    let negative = value < 0.0;
    let rounded = format!("{:.2}", value.abs());
    let (int_part, frac_part) = match rounded.split_once('.') {
        Some((i, f)) => (i, f),
        None => (rounded.as_str(), "00"),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}${grouped}.{frac_part}")
}

/// Format an ROI ratio as a percentage, e.g. `0.135` -> `13.5%`
pub fn format_percent(ratio: f64) -> String {
    format!("{:.1}%", ratio * 100.0)
}

/// Format a payback projection; the sentinel renders as plain text, never
/// as infinity
pub fn format_payback(payback: &PaybackPeriod) -> String {
    match payback {
        PaybackPeriod::Years(years) => {
            if (*years - 1.0).abs() < f64::EPSILON {
                "1.0 year".to_string()
            } else {
                format!("{years:.1} years")
            }
        }
        PaybackPeriod::NoPayback => "No payback".to_string(),
    }
}
