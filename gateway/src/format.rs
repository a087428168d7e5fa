//! Number formatting for the detail panel

/// Shown wherever a remote sub-field is missing
pub const UNKNOWN: &str = "Unknown";

/// Insert `,` every three digits of a plain integer string
fn group_integer_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

/// Group the integer part of an already formatted decimal string
fn group_decimal_str(formatted: &str) -> String {
    let (sign, unsigned) = match formatted.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", formatted),
    };
    match unsigned.split_once('.') {
        Some((int, frac)) => format!("{}{}.{}", sign, group_integer_digits(int), frac),
        None => format!("{}{}", sign, group_integer_digits(unsigned)),
    }
}

/// `1234567` -> `1,234,567`
pub fn grouped(value: u64) -> String {
    group_integer_digits(&value.to_string())
}

/// `9065.800825` -> `$9,065.80`
pub fn currency(value: f64) -> String {
    let formatted = group_decimal_str(&format!("{:.2}", value));
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${}", rest),
        None => format!("${}", formatted),
    }
}

/// `72.39` -> `72.4`
pub fn one_decimal(value: f64) -> String {
    format!("{:.1}", value)
}

/// Grouped integer part, shortest fractional part but never fewer than one
/// digit: `8515767.0` -> `8,515,767.0`
pub fn area(value: f64) -> String {
    let mut raw = value.to_string();
    if value.is_finite() && !raw.contains('.') {
        raw.push_str(".0");
    }
    group_decimal_str(&raw)
}

pub fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN)
}

/// Join a list, or `Unknown` when it is empty
pub fn join_or_unknown<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let parts: Vec<String> = items.into_iter().map(|s| s.as_ref().to_string()).collect();
    if parts.is_empty() {
        UNKNOWN.to_string()
    } else {
        parts.join(", ")
    }
}
