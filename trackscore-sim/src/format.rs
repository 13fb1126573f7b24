//! Display formatting for dashboard values.
//!
//! Amounts use Indian digit grouping (`1,35,000`) since sellers think in
//! lakhs and crores.

/// Group a whole number Indian-style: last three digits, then pairs.
pub fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
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
    format!("{},{}", groups.join(","), tail)
}

/// Format a rupee amount rounded to the nearest rupee.
pub fn format_rupees(amount: f64) -> String {
    let whole = amount.abs().round() as u64;
    let sign = if amount < 0.0 && whole > 0 { "-" } else { "" };
    format!("{}\u{20b9}{}", sign, group_indian(whole))
}

/// Format a count rounded to the nearest whole unit.
pub fn format_count(value: f64) -> String {
    group_indian(value.max(0.0).round() as u64)
}

/// Format a percentage with at most one decimal place (`25%`, `24.8%`).
pub fn format_percent(value: f64) -> String {
    let rounded = (value * 10.0).round() / 10.0;
    if rounded.fract() == 0.0 {
        format!("{:.0}%", rounded)
    } else {
        format!("{:.1}%", rounded)
    }
}

/// Format a return-on-capital multiplier (`1.07x`).
pub fn format_multiplier(value: f64) -> String {
    format!("{:.2}x", value)
}
