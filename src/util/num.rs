/// Magnitude from which numbers are printed in exponent form.
const EXPONENT_THRESHOLD: f64 = 1e21;

/// Formats a number for display.
///
/// Integral values print without a fractional part, `-0` prints as `0`, very
/// large magnitudes use exponent form (`1e+21`), and the non-finite values
/// print as `NaN`, `Infinity` and `-Infinity`.
///
/// ## Example
/// ```
/// use embedscript::util::num::format_number;
///
/// assert_eq!(format_number(3.0), "3");
/// assert_eq!(format_number(0.75), "0.75");
/// assert_eq!(format_number(-0.0), "0");
/// assert_eq!(format_number(f64::INFINITY), "Infinity");
/// ```
#[must_use]
pub fn format_number(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        return format!("{value:e}").replacen('e', "e+", 1);
    }
    value.to_string()
}

/// Parses the text of a number literal.
///
/// The lexer only hands over digit runs with at most one `.`, possibly a
/// trailing one (`1.`), all of which `f64::from_str` accepts.
///
/// ## Example
/// ```
/// use embedscript::util::num::parse_literal;
///
/// assert_eq!(parse_literal("1."), Some(1.0));
/// assert_eq!(parse_literal("0.75"), Some(0.75));
/// assert_eq!(parse_literal(""), None);
/// ```
#[must_use]
pub fn parse_literal(text: &str) -> Option<f64> {
    text.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_integral_values_without_fraction() {
        assert_eq!(format_number(12.0), "12");
        assert_eq!(format_number(-4.0), "-4");
        assert_eq!(format_number(1.5), "1.5");
    }

    #[test]
    fn formats_non_finite_values() {
        assert_eq!(format_number(f64::NAN), "NaN");
        assert_eq!(format_number(f64::NEG_INFINITY), "-Infinity");
    }

    #[test]
    fn formats_large_values_in_exponent_form() {
        assert_eq!(format_number(1e21), "1e+21");
        assert_eq!(format_number(-2.5e30), "-2.5e+30");
        assert_eq!(format_number(1e20), "100000000000000000000");
    }
}
