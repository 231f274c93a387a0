//! Number parsing with the lenient semantics of the UI the tables were built
//! for: a numeric prefix is enough, trailing garbage is ignored, and no
//! prefix at all means "not a number".

/// Parse the longest decimal prefix of `text` (after leading whitespace) as a
/// float. Returns NaN if there is no such prefix.
pub fn parse_float(text: &str) -> f64 {
    let text = text.trim_start();
    let (sign, rest) = split_sign(text);

    if rest.starts_with("Infinity") {
        return sign * f64::INFINITY;
    }

    let bytes = rest.as_bytes();
    let mut end = 0;
    let mut num_digits = 0;
    while end < bytes.len() && bytes[end].is_ascii_digit() {
        end += 1;
        num_digits += 1;
    }
    if end < bytes.len() && bytes[end] == b'.' {
        end += 1;
        while end < bytes.len() && bytes[end].is_ascii_digit() {
            end += 1;
            num_digits += 1;
        }
    }
    if num_digits == 0 {
        return f64::NAN;
    }
    // An exponent only counts if at least one digit follows it.
    if end < bytes.len() && (bytes[end] == b'e' || bytes[end] == b'E') {
        let mut k = end + 1;
        if k < bytes.len() && (bytes[k] == b'+' || bytes[k] == b'-') {
            k += 1;
        }
        let exp_start = k;
        while k < bytes.len() && bytes[k].is_ascii_digit() {
            k += 1;
        }
        if k > exp_start {
            end = k;
        }
    }

    match rest[..end].parse::<f64>() {
        Ok(val) => sign * val,
        Err(_) => f64::NAN,
    }
}

/// Parse the integer prefix of `text` (after leading whitespace). A `0x`
/// prefix switches to hexadecimal. `None` stands for "not a number", which
/// also covers values that do not fit into an `i64`.
pub fn parse_int(text: &str) -> Option<i64> {
    let text = text.trim_start();
    let (sign, rest) = split_sign(text);

    let (radix, digits) = match rest.get(..2) {
        Some("0x") | Some("0X") => (16, &rest[2..]),
        _ => (10, rest),
    };
    let end = digits
        .find(|chr: char| !chr.is_digit(radix))
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    if sign < 0.0 {
        magnitude.checked_neg()
    } else {
        Some(magnitude)
    }
}

fn split_sign(text: &str) -> (f64, &str) {
    if let Some(rest) = text.strip_prefix('-') {
        (-1.0, rest)
    } else if let Some(rest) = text.strip_prefix('+') {
        (1.0, rest)
    } else {
        (1.0, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_float_plain() {
        assert_eq!(parse_float("0.75"), 0.75);
        assert_eq!(parse_float("  -2.5"), -2.5);
        assert_eq!(parse_float("+.5"), 0.5);
        assert_eq!(parse_float("3."), 3.0);
        assert_eq!(parse_float("1e-3"), 0.001);
    }

    #[test]
    fn test_parse_float_prefix() {
        assert_eq!(parse_float("0.25abc"), 0.25);
        assert_eq!(parse_float("1.5.3"), 1.5);
        // A dangling exponent is not part of the number.
        assert_eq!(parse_float("2e"), 2.0);
        assert_eq!(parse_float("2e+x"), 2.0);
    }

    #[test]
    fn test_parse_float_not_a_number() {
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float(".").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float("NaN").is_nan());
    }

    #[test]
    fn test_parse_float_infinity() {
        assert_eq!(parse_float("Infinity"), f64::INFINITY);
        assert_eq!(parse_float("-Infinityxyz"), f64::NEG_INFINITY);
    }

    #[test]
    fn test_parse_int() {
        assert_eq!(parse_int("2"), Some(2));
        assert_eq!(parse_int("  -7"), Some(-7));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("1.9"), Some(1));
        assert_eq!(parse_int("0x1A"), Some(26));
        assert_eq!(parse_int("-0"), Some(0));
    }

    #[test]
    fn test_parse_int_not_a_number() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("   "), None);
        assert_eq!(parse_int("0x"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }
}
