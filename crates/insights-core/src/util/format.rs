//! Number formatting helpers for chart labels and tooltips.

/// Formats a number in compact notation: `1.2K`, `3.4M`, `5.6B`.
///
/// Values below 1000 are returned with up to `precision` fractional digits.
pub fn format_compact(value: f64, precision: usize) -> String {
    let abs = value.abs();
    let (scaled, suffix) = if abs >= 1e9 {
        (value / 1e9, "B")
    } else if abs >= 1e6 {
        (value / 1e6, "M")
    } else if abs >= 1e3 {
        (value / 1e3, "K")
    } else {
        (value, "")
    };
    format!("{}{}", format_number(scaled, precision), suffix)
}

/// Formats a number with up to `precision` fractional digits, trimming
/// trailing zeros (`1.50` becomes `1.5`, `2.00` becomes `2`).
pub fn format_number(value: f64, precision: usize) -> String {
    let formatted = format!("{:.*}", precision, value);
    if !formatted.contains('.') {
        return formatted;
    }
    let trimmed = formatted.trim_end_matches('0').trim_end_matches('.');
    trimmed.to_string()
}

/// English ordinal suffix: `1st`, `2nd`, `3rd`, `11th`, `21st`.
pub fn ordinal(n: u32) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}
