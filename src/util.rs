// Utility helpers for parsing loose input values, guarded arithmetic and
// locale-aware number formatting.
//
// The loaders lean on the `parse_*` helpers so the rest of the crate can
// assume clean, typed values; the reports lean on the `format_*` helpers.
use chrono::NaiveDate;
use num_format::{Locale, ToFormattedString};

/// Parse a string-like value into `f64` while being forgiving about
/// formatting issues that are common in spreadsheet exports.
///
/// - Accepts `Option<&str>` so callers can pass through optional fields.
/// - Trims whitespace and a leading currency marker such as `S/`.
/// - Rejects values that still contain alphabetic characters.
/// - Strips thousands separators like `","` before parsing.
/// - Returns `None` for anything that cannot be safely parsed, including
///   NaN and infinities.
pub fn parse_f64_safe(s: Option<&str>) -> Option<f64> {
    let s = s?.trim();
    let s = s.strip_prefix("S/").unwrap_or(s).trim();
    if s.is_empty() {
        return None;
    }
    if s.chars().any(|c| c.is_ascii_alphabetic()) {
        return None;
    }
    let s = s.replace(',', "");
    s.parse::<f64>().ok().filter(|v| v.is_finite())
}

pub fn parse_date_safe(s: Option<&str>) -> Option<NaiveDate> {
    // Dates are expected in `YYYY-MM-DD` format.
    let s = s?.trim();
    if s.is_empty() {
        return None;
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d").ok()
}

/// Interpret a spreadsheet cell as a yes/no flag. Blank or unrecognised
/// cells count as "absent".
pub fn parse_flag(s: Option<&str>) -> bool {
    let Some(s) = s else { return false };
    matches!(
        s.trim().to_lowercase().as_str(),
        "true" | "yes" | "y" | "si" | "sí" | "x" | "1"
    )
}

/// `numerator / denominator`, or `None` when the denominator is zero or the
/// result is not finite.
pub fn safe_div(numerator: f64, denominator: f64) -> Option<f64> {
    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator).filter(|v| v.is_finite())
}

/// Share of `part` in `whole` on a 0..=100 scale; 0 for an empty whole.
pub fn percentage(part: usize, whole: usize) -> f64 {
    safe_div(part as f64, whole as f64).map_or(0.0, |ratio| ratio * 100.0)
}

pub fn format_number(n: f64, decimals: usize) -> String {
    // Format a floating-point value with:
    // - a fixed number of decimal places, and
    // - locale-aware thousands separators (e.g., `1,234,567.89`).
    let s = format!("{:.*}", decimals, n.abs());
    // Sign is decided after rounding so `-0.004` does not print as `-0.00`.
    let neg = n < 0.0 && s.bytes().any(|b| matches!(b, b'1'..=b'9'));
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (s.as_str(), None),
    };
    // Integers beyond u128 are left ungrouped rather than misrendered.
    let mut res = match int_part.parse::<u128>() {
        Ok(v) => v.to_formatted_string(&Locale::en),
        Err(_) => int_part.to_string(),
    };
    if let Some(frac) = frac_part {
        res.push('.');
        res.push_str(frac);
    }
    if neg {
        format!("-{}", res)
    } else {
        res
    }
}

/// Money with a currency symbol prefix, e.g. `S/ 150,000.00`.
pub fn format_currency(amount: f64, symbol: &str) -> String {
    format!("{} {}", symbol, format_number(amount, 2))
}

/// Like [`format_currency`] but renders a missing value as an em dash.
pub fn format_optional_currency(amount: Option<f64>, symbol: &str) -> String {
    match amount {
        Some(v) => format_currency(v, symbol),
        None => "—".to_string(),
    }
}

pub fn format_percent(p: f64) -> String {
    format!("{}%", format_number(p, 1))
}

pub fn format_int<T>(n: T) -> String
where
    T: ToFormattedString,
{
    // Counts in console messages (e.g., `9,855 rows loaded`).
    n.to_formatted_string(&Locale::en)
}
