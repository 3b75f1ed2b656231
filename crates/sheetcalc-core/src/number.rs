//! Canonical number text

/// Numbers at or above this magnitude are written in exponent form
const EXPONENT_UPPER: f64 = 1e21;

/// Numbers below this magnitude (other than zero) are written in exponent form
const EXPONENT_LOWER: f64 = 1e-6;

/// Format a number the way the formula engine turns it into text.
///
/// Uses the shortest digits that round-trip, drops the fractional part of
/// integers, and switches to exponent notation (`1e+21`, `1.5e-7`) outside
/// `[1e-6, 1e21)`. Negative zero is written as `0`. The number must be
/// finite; the engine turns every non-finite result into `#NUM!`.
///
/// ```rust
/// use sheetcalc_core::format_number;
///
/// assert_eq!(format_number(1.0), "1");
/// assert_eq!(format_number(0.1 + 0.2), "0.30000000000000004");
/// assert_eq!(format_number(1e21), "1e+21");
/// ```
pub fn format_number(n: f64) -> String {
    debug_assert!(n.is_finite(), "formula values are always finite");
    if n == 0.0 {
        return "0".to_string();
    }

    let abs = n.abs();
    if (EXPONENT_LOWER..EXPONENT_UPPER).contains(&abs) {
        return format!("{}", n);
    }

    // `{:e}` already gives the shortest mantissa, only the sign of a
    // positive exponent is missing
    let text = format!("{:e}", n);
    match text.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{}e+{}", mantissa, exponent)
        }
        _ => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_integers() {
        assert_eq!(format_number(0.0), "0");
        assert_eq!(format_number(-0.0), "0");
        assert_eq!(format_number(42.0), "42");
        assert_eq!(format_number(-7.0), "-7");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }

    #[test]
    fn test_fractions() {
        assert_eq!(format_number(1.5), "1.5");
        assert_eq!(format_number(-0.25), "-0.25");
        assert_eq!(format_number(0.000001), "0.000001");
    }

    #[test]
    fn test_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(1.5e22), "1.5e+22");
        assert_eq!(format_number(-2e25), "-2e+25");
        assert_eq!(format_number(1e-7), "1e-7");
        assert_eq!(format_number(1.25e-9), "1.25e-9");
    }

    #[test]
    #[cfg(debug_assertions)]
    #[should_panic(expected = "always finite")]
    fn test_non_finite_is_rejected() {
        format_number(f64::INFINITY);
    }
}
