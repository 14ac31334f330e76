//! Numeric coercion for field text and number formatting for output.
//!
//! Every pawk variable is a plain `f64`; the only strings in play are the
//! record and its fields, which are converted on demand.

/// Convert a field to a number.
///
/// The whole field must parse as a number, otherwise it counts as 0:
/// "42" -> 42.0, "-1.5e3" -> -1500.0, "4x" -> 0.0, "" -> 0.0
#[inline]
pub fn parse_field_number(s: &str) -> f64 {
    // Fast path for plain integers
    if !s.is_empty()
        && s.bytes().all(|b| b.is_ascii_digit())
        && let Ok(n) = s.parse::<i64>()
    {
        return n as f64;
    }
    s.parse::<f64>().unwrap_or(0.0)
}

/// Format a number for output.
///
/// Values print in the shortest form that round-trips, integral ones without
/// a decimal point. A decimal exponent below -4 or at/above 6 switches to
/// exponent notation with a signed, two-digit exponent: 1e6 is `1e+06`.
pub fn format_number(n: f64) -> String {
    if n.is_nan() {
        return "NaN".to_string();
    }
    if n.is_infinite() {
        return if n > 0.0 { "+Inf" } else { "-Inf" }.to_string();
    }

    let abs = n.abs();
    if abs != 0.0 && !(1e-4..1e6).contains(&abs) {
        let s = format!("{:e}", n);
        if let Some((mantissa, exp)) = s.split_once('e') {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            return format!("{mantissa}e{sign}{digits:0>2}");
        }
        return s;
    }

    format!("{}", n)
}
