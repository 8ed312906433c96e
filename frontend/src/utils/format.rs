pub const NOT_AVAILABLE: &str = "N/A";

/// `1234.5` -> `1,234.50`.
pub fn amount(value: f64) -> String {
    let fixed = format!("{:.2}", value.abs());
    let (whole, cents) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));
    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, digit) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    let sign = if value < 0.0 && fixed != "0.00" { "-" } else { "" };
    format!("{}{}.{}", sign, grouped, cents)
}

pub fn peso(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("₱{}", amount(v)))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn hours(value: Option<f64>) -> String {
    value
        .filter(|v| v.is_finite())
        .map(|v| format!("{:.2}", v))
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

pub fn text(value: Option<&str>) -> String {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(NOT_AVAILABLE)
        .to_string()
}
