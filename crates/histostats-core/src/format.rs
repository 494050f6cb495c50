//! Number formatting for plot labels and statistical expressions

/// Format a value with a fixed number of decimals
///
/// Values that round to zero print without a sign, so `-0.001` at two
/// digits is `"0.00"` rather than `"-0.00"`.
pub fn format_value(value: f64, digits: usize) -> String {
    if !value.is_finite() {
        return match value {
            v if v.is_nan() => "NA".to_string(),
            v if v > 0.0 => "Inf".to_string(),
            _ => "-Inf".to_string(),
        };
    }
    let threshold = 0.5 * 10f64.powi(-(digits as i32));
    let value = if value.abs() < threshold { 0.0 } else { value };
    format!("{value:.digits$}")
}

/// Format a p-value
///
/// Uses scientific notation once the value drops below `10^-digits`, where a
/// fixed-point rendering would read as zero.
pub fn format_p_value(p: f64, digits: usize) -> String {
    if p.is_finite() && p > 0.0 && p < 10f64.powi(-(digits as i32)) {
        format!("{p:.digits$e}")
    } else {
        format_value(p, digits)
    }
}

/// Convert a proportion to a percentage label, e.g. `0.125 -> "12.5%"`
pub fn format_percent(proportion: f64, digits: usize) -> String {
    format!("{}%", format_value(proportion * 100.0, digits))
}

/// Format an interval as `[lower, upper]`
pub fn format_interval(lower: f64, upper: f64, digits: usize) -> String {
    format!(
        "[{}, {}]",
        format_value(lower, digits),
        format_value(upper, digits)
    )
}

/// Confidence level as a percentage without trailing zeros (`0.95 -> "95%"`)
pub fn format_level(level: f64) -> String {
    let pct = level * 100.0;
    if (pct - pct.round()).abs() < 1e-9 {
        format!("{}%", pct.round() as i64)
    } else {
        format!("{}%", format_value(pct, 1))
    }
}
