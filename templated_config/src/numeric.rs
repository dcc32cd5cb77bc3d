//! Number literals and their Go-style text forms.
//!
//! Template number literals follow Go syntax and are written out the way Go
//! prints the constant: `0x1F` renders as `31`, `1_000` as `1000` and `1e3`
//! as `1000`. Comparison functions reuse the same parser so `9` sorts before
//! `10`.

use std::cmp::Ordering;
use std::fmt;

/// A numeric value read from template text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(crate) enum Number {
    Int(i64),
    Float(f64),
}

const BASE_PREFIXES: [(&str, u32); 6] = [
    ("0x", 16),
    ("0X", 16),
    ("0o", 8),
    ("0O", 8),
    ("0b", 2),
    ("0B", 2),
];

impl Number {
    /// Parse `text` as a Go number literal.
    ///
    /// Accepts an optional sign, decimal, `0x`, `0o`, `0b` and leading-zero
    /// octal integers, and decimal floats with an optional exponent.
    /// Underscores may separate digits. Integers must fit in an `i64`.
    pub(crate) fn parse(text: &str) -> Option<Self> {
        let (negative, unsigned) = match text.as_bytes().first() {
            Some(b'-') => (true, text.get(1..)?),
            Some(b'+') => (false, text.get(1..)?),
            _ => (false, text),
        };
        if unsigned.is_empty()
            || unsigned.starts_with(['+', '-', '_'])
            || unsigned.ends_with('_')
            || unsigned.contains("__")
        {
            return None;
        }
        let cleaned = unsigned.replace('_', "");
        if let Some(magnitude) = parse_unsigned(&cleaned) {
            let signed = if negative {
                -i128::from(magnitude)
            } else {
                i128::from(magnitude)
            };
            return i64::try_from(signed).ok().map(Self::Int);
        }
        parse_float(&cleaned).map(|value| {
            Self::Float(if negative { value.copysign(-1.0) } else { value })
        })
    }

    /// The value as a float.
    #[expect(
        clippy::cast_precision_loss,
        reason = "mixed integer and float operands are handled as f64"
    )]
    pub(crate) const fn to_f64(self) -> f64 {
        match self {
            Self::Int(value) => value as f64,
            Self::Float(value) => value,
        }
    }

    /// Order two numbers, comparing integers exactly.
    pub(crate) fn compare(self, other: Self) -> Ordering {
        match (self, other) {
            (Self::Int(left), Self::Int(right)) => left.cmp(&right),
            _ => self
                .to_f64()
                .partial_cmp(&other.to_f64())
                .unwrap_or(Ordering::Equal),
        }
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(value) => write!(f, "{value}"),
            Self::Float(value) => f.write_str(&format_general(*value, None)),
        }
    }
}

fn parse_unsigned(digits: &str) -> Option<u64> {
    let (body, radix) = BASE_PREFIXES
        .into_iter()
        .find_map(|(prefix, radix)| digits.strip_prefix(prefix).map(|body| (body, radix)))
        .or_else(|| {
            digits
                .strip_prefix('0')
                .filter(|body| !body.is_empty() && body.bytes().all(|b| b.is_ascii_digit()))
                .map(|body| (body, 8))
        })
        .unwrap_or((digits, 10));
    if body.is_empty() || !body.chars().all(|c| c.is_digit(radix)) {
        return None;
    }
    u64::from_str_radix(body, radix).ok()
}

fn parse_float(digits: &str) -> Option<f64> {
    let well_formed = digits.contains(['.', 'e', 'E'])
        && digits.bytes().any(|b| b.is_ascii_digit())
        && digits
            .bytes()
            .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'));
    if !well_formed {
        return None;
    }
    digits.parse::<f64>().ok().filter(|value| value.is_finite())
}

/// Format `value` like Go's `%g`, or `%v` when `precision` is `None`.
///
/// Exponent form is used when the decimal exponent is below -4 or at least
/// the precision (6 for the shortest form). Trailing zeros are dropped.
pub(crate) fn format_general(value: f64, precision: Option<usize>) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let magnitude = value.abs();
    let scientific = match precision {
        None => format!("{magnitude:e}"),
        Some(wanted) => format!("{:.*e}", wanted.max(1) - 1, magnitude),
    };
    let (mantissa, exponent_text) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent_text.parse().unwrap_or(0);
    let mut digits: String = mantissa.chars().filter(char::is_ascii_digit).collect();
    let significant = digits.trim_end_matches('0').len().max(1);
    digits.truncate(significant);

    let count = i32::try_from(digits.len()).unwrap_or(i32::MAX);
    let limit = precision.map_or(6, |wanted| {
        let requested = i32::try_from(wanted.max(1)).unwrap_or(i32::MAX);
        if requested > count && count > exponent {
            count
        } else {
            requested
        }
    });
    if exponent < -4 || exponent >= limit {
        let (lead, rest) = digits.split_at(1);
        let fraction = if rest.is_empty() {
            String::new()
        } else {
            format!(".{rest}")
        };
        return format!("{sign}{lead}{fraction}{}", exponent_suffix(exponent));
    }
    let point = exponent + 1;
    match usize::try_from(point) {
        Ok(0) | Err(_) => {
            let zeros = "0".repeat(usize::try_from(-point).unwrap_or(0));
            format!("{sign}0.{zeros}{digits}")
        }
        Ok(whole) if whole >= digits.len() => {
            format!("{sign}{digits}{}", "0".repeat(whole - digits.len()))
        }
        Ok(whole) => {
            let (integer, fraction) = digits.split_at(whole);
            format!("{sign}{integer}.{fraction}")
        }
    }
}

/// Format `value` like Go's `%e` with `precision` fractional digits.
pub(crate) fn format_exponent(value: f64, precision: usize) -> String {
    let sign = if value.is_sign_negative() { "-" } else { "" };
    let scientific = format!("{:.*e}", precision, value.abs());
    let (mantissa, exponent_text) = scientific
        .split_once('e')
        .unwrap_or((scientific.as_str(), "0"));
    let exponent: i32 = exponent_text.parse().unwrap_or(0);
    format!("{sign}{mantissa}{}", exponent_suffix(exponent))
}

fn exponent_suffix(exponent: i32) -> String {
    let sign = if exponent < 0 { '-' } else { '+' };
    format!("e{sign}{:02}", exponent.unsigned_abs())
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{Number, format_exponent, format_general};

    #[rstest]
    #[case("42", "42")]
    #[case("-7", "-7")]
    #[case("+7", "7")]
    #[case("1_000", "1000")]
    #[case("0x1F", "31")]
    #[case("0o17", "15")]
    #[case("017", "15")]
    #[case("0b101", "5")]
    #[case("-0b101", "-5")]
    #[case("0", "0")]
    #[case("1e3", "1000")]
    #[case("1.50", "1.5")]
    #[case("2.0", "2")]
    #[case(".5", "0.5")]
    #[case("-1.5", "-1.5")]
    #[case("1e6", "1e+06")]
    #[case("1.5e-7", "1.5e-07")]
    #[case("123456.0", "123456")]
    #[case("0.0001", "0.0001")]
    fn literals_render_as_go_constants(#[case] literal: &str, #[case] expected: &str) {
        let number = Number::parse(literal).expect("valid literal");
        assert_eq!(number.to_string(), expected);
    }

    #[rstest]
    #[case("12abc")]
    #[case("08")]
    #[case("1__0")]
    #[case("_1")]
    #[case("1_")]
    #[case("9223372036854775808")]
    #[case("inf")]
    #[case("NaN")]
    #[case("1.2.3")]
    #[case("-")]
    fn malformed_literals_are_rejected(#[case] literal: &str) {
        assert_eq!(Number::parse(literal), None);
    }

    #[rstest]
    fn smallest_integer_fits() {
        assert_eq!(
            Number::parse("-9223372036854775808"),
            Some(Number::Int(i64::MIN))
        );
    }

    #[rstest]
    #[case(3.141_59, Some(3), "3.14")]
    #[case(1234.5678, Some(2), "1.2e+03")]
    #[case(100.0, Some(3), "100")]
    #[case(0.000_012_5, None, "1.25e-05")]
    fn general_format_honours_precision(
        #[case] value: f64,
        #[case] precision: Option<usize>,
        #[case] expected: &str,
    ) {
        assert_eq!(format_general(value, precision), expected);
    }

    #[rstest]
    fn exponent_format_pads_the_exponent() {
        assert_eq!(format_exponent(1234.56, 6), "1.234560e+03");
        assert_eq!(format_exponent(-0.5, 2), "-5.00e-01");
    }
}
