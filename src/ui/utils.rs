/// Uppercase heading with a trailing colon, e.g. "CAVEATS:"
pub fn section_heading(text: impl Into<String>) -> String {
    text.into().to_uppercase() + ":"
}

/// Whole number with thousands separators: 1234567 -> "1,234,567"
pub fn format_count(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn format_currency(value: u64) -> String {
    format!("${}", format_count(value))
}

pub fn format_percentage(fraction: f64) -> String {
    format!("{:.2}%", fraction * 100.0)
}
