//! Number formatting for stack display
//!
//! Two renderings are used by the calculator:
//! - `general`: shortest round-trip digits, switching to exponent form for
//!   very large or very small magnitudes (`1e+10`, `1.5e-07`)
//! - `fixed`: six digits after the decimal point

/// Decimal exponents at or above this switch `general` to exponent form
const GENERAL_EXP_MAX: i32 = 6;

/// Decimal exponents below this switch `general` to exponent form
const GENERAL_EXP_MIN: i32 = -4;

fn non_finite(value: f64) -> Option<&'static str> {
    if value.is_nan() {
        Some("NaN")
    } else if value == f64::INFINITY {
        Some("+Inf")
    } else if value == f64::NEG_INFINITY {
        Some("-Inf")
    } else {
        None
    }
}

/// Format a value with the shortest digits that round-trip
pub fn general(value: f64) -> String {
    if let Some(s) = non_finite(value) {
        return s.to_string();
    }

    // `{:e}` yields the shortest round-trip mantissa, e.g. "1.234567e6"
    let sci = format!("{:e}", value);
    let (mantissa, exp) = match sci.split_once('e') {
        Some((m, e)) => (m, e.parse::<i32>().unwrap_or(0)),
        None => (sci.as_str(), 0),
    };

    if (GENERAL_EXP_MIN..GENERAL_EXP_MAX).contains(&exp) {
        format!("{}", value)
    } else {
        let sign = if exp < 0 { '-' } else { '+' };
        format!("{}e{}{:02}", mantissa, sign, exp.abs())
    }
}

/// Format a value with six fixed decimals
pub fn fixed(value: f64) -> String {
    match non_finite(value) {
        Some(s) => s.to_string(),
        None => format!("{:.6}", value),
    }
}

/// Render values as `[ v1  v2  v3 ]` using the given number formatter
pub fn bracketed(values: &[f64], fmt: fn(f64) -> String) -> String {
    let body = values.iter().map(|v| fmt(*v)).collect::<Vec<_>>().join("  ");
    format!("[ {} ]", body)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_general_integers() {
        assert_eq!(general(3579.0), "3579");
        assert_eq!(general(-1111.0), "-1111");
        assert_eq!(general(0.0), "0");
        assert_eq!(general(-0.0), "-0");
        assert_eq!(general(100000.0), "100000");
    }

    #[test]
    fn test_general_fractions() {
        assert_eq!(general(2.5), "2.5");
        assert_eq!(general(0.1), "0.1");
        assert_eq!(general(0.0001), "0.0001");
    }

    #[test]
    fn test_general_exponent_form() {
        assert_eq!(general(1e10), "1e+10");
        assert_eq!(general(1234567.0), "1.234567e+06");
        assert_eq!(general(0.000015), "1.5e-05");
        assert_eq!(general(-2.5e-300), "-2.5e-300");
    }

    #[test]
    fn test_general_non_finite() {
        assert_eq!(general(f64::INFINITY), "+Inf");
        assert_eq!(general(f64::NEG_INFINITY), "-Inf");
        assert_eq!(general(f64::NAN), "NaN");
    }

    #[test]
    fn test_fixed() {
        assert_eq!(fixed(1.0), "1.000000");
        assert_eq!(fixed(-2.5), "-2.500000");
        assert_eq!(fixed(1.0 / 3.0), "0.333333");
        assert_eq!(fixed(f64::INFINITY), "+Inf");
    }

    #[test]
    fn test_bracketed() {
        assert_eq!(bracketed(&[], general), "[  ]");
        assert_eq!(bracketed(&[1.0, 2.0, 3.0], general), "[ 1  2  3 ]");
        assert_eq!(bracketed(&[1.5], fixed), "[ 1.500000 ]");
    }
}
