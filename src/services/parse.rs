use std::str::FromStr;

/// Trimmed value, or `None` when the field is missing or blank.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}

/// Parse a raw form value, falling back to `default` when it is missing,
/// blank or not a valid `T`. Never fails.
pub fn parse_with_default<T: FromStr>(raw: Option<&str>, default: T) -> T {
    let Some(value) = non_blank(raw) else {
        return default;
    };
    match value.parse::<T>() {
        Ok(parsed) => parsed,
        Err(_) => {
            tracing::debug!(raw = %value, "unparseable numeric input, using default");
            default
        }
    }
}

/// Money amounts additionally reject `inf` and `NaN`.
pub fn parse_amount(raw: Option<&str>, default: f64) -> f64 {
    let amount = parse_with_default(raw, default);
    if amount.is_finite() { amount } else { default }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_or_blank_uses_default() {
        assert_eq!(parse_with_default::<f64>(None, 5000.0), 5000.0);
        assert_eq!(parse_with_default::<f64>(Some(""), 5000.0), 5000.0);
        assert_eq!(parse_with_default::<f64>(Some("   "), 5000.0), 5000.0);
    }

    #[test]
    fn garbage_uses_default() {
        assert_eq!(parse_with_default::<f64>(Some("abc"), 0.0), 0.0);
        assert_eq!(parse_with_default::<i32>(Some("1.5"), 1), 1);
        assert_eq!(parse_with_default::<i32>(Some("12kg"), 1), 1);
    }

    #[test]
    fn valid_input_is_parsed_after_trimming() {
        assert_eq!(parse_with_default::<f64>(Some(" 4500.5 "), 0.0), 4500.5);
        assert_eq!(parse_with_default::<i32>(Some("7"), 1), 7);
    }

    #[test]
    fn amounts_must_be_finite() {
        assert_eq!(parse_amount(Some("inf"), 10.0), 10.0);
        assert_eq!(parse_amount(Some("NaN"), 10.0), 10.0);
        assert_eq!(parse_amount(Some("-250"), 10.0), -250.0);
    }

    #[test]
    fn non_blank_trims() {
        assert_eq!(non_blank(Some("  12 ")), Some("12"));
        assert_eq!(non_blank(Some(" ")), None);
        assert_eq!(non_blank(None), None);
    }
}
