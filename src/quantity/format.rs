//! Digit grouping shared by the quantity renderers

/// Insert a comma every three digits from the right
pub(crate) fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (len - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}

/// Group the whole part of an unsigned plain decimal and keep any non-zero fraction
pub(crate) fn group_decimal(plain: &str) -> String {
    let (whole, fraction) = plain.split_once('.').unwrap_or((plain, ""));
    let fraction = fraction.trim_end_matches('0');

    let mut grouped = group_digits(whole);
    if !fraction.is_empty() {
        grouped.push('.');
        grouped.push_str(fraction);
    }
    grouped
}

/// Render a finite or special value as `[-]<body>`, where the body is
/// `?` for NaN, `∞` for infinities and `finite` otherwise
///
/// A body that renders as zero never carries a sign.
pub(crate) fn render_signed(value: f64, finite: impl FnOnce(f64) -> String) -> String {
    if value.is_nan() {
        return "?".to_string();
    }

    let body = if value.is_infinite() {
        "∞".to_string()
    } else {
        finite(value.abs())
    };

    let is_zero = body.chars().all(|c| matches!(c, '0' | '.' | ','));
    if value < 0.0 && !is_zero {
        format!("-{}", body)
    } else {
        body
    }
}
