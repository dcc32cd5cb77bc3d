//! Print built-ins: `print`, `println` and `printf`.
//!
//! Arguments arrive as text. Numeric verbs parse their argument as a number
//! literal; an argument that does not fit its verb is written as
//! `%!verb(string=value)` rather than failing the render.

use std::iter::Peekable;
use std::str::Chars;

use crate::numeric::{Number, format_exponent, format_general};
use crate::{ConfigError, ConfigResult};

/// `print ARG...`: the arguments concatenated.
#[expect(
    clippy::unnecessary_wraps,
    reason = "every built-in shares the fallible signature"
)]
pub(super) fn print(args: &[String]) -> ConfigResult<String> {
    Ok(args.concat())
}

/// `println ARG...`: the arguments joined by spaces, then a newline.
#[expect(
    clippy::unnecessary_wraps,
    reason = "every built-in shares the fallible signature"
)]
pub(super) fn println(args: &[String]) -> ConfigResult<String> {
    Ok(format!("{}\n", args.join(" ")))
}

/// `printf FORMAT ARG...`.
pub(super) fn printf(args: &[String]) -> ConfigResult<String> {
    let Some((format, values)) = args.split_first() else {
        return Err(ConfigError::invalid_arguments(
            "printf",
            "expected a format string",
        ));
    };
    Ok(sprintf(format, values))
}

/// Format `values` with Go's `fmt` verbs.
///
/// Supports the flags `-`, `+`, `0` and space, a width and a precision, and
/// the verbs `%v %s %q %d %b %o %x %X %e %E %f %F %g %G %t %%`.
pub(super) fn sprintf(format: &str, values: &[String]) -> String {
    let mut out = String::new();
    let mut pending = values.iter();
    let mut chars = format.chars().peekable();
    while let Some(current) = chars.next() {
        if current != '%' {
            out.push(current);
            continue;
        }
        let spec = Spec::parse(&mut chars);
        match spec.verb {
            None => out.push_str("%!(NOVERB)"),
            Some('%') => out.push('%'),
            Some(verb) => match pending.next() {
                Some(value) => out.push_str(&spec.render(verb, value)),
                None => out.push_str(&format!("%!{verb}(MISSING)")),
            },
        }
    }
    let extra: Vec<String> = pending.map(|value| format!("string={value}")).collect();
    if !extra.is_empty() {
        out.push_str(&format!("%!(EXTRA {})", extra.join(", ")));
    }
    out
}

#[derive(Debug, Default)]
struct Spec {
    left_align: bool,
    plus: bool,
    zero: bool,
    space: bool,
    width: Option<usize>,
    precision: Option<usize>,
    verb: Option<char>,
}

/// A formatted operand before padding.
enum Piece {
    Text(String),
    Numeric { negative: bool, digits: String },
}

impl Spec {
    fn parse(chars: &mut Peekable<Chars<'_>>) -> Self {
        let mut spec = Self::default();
        while let Some(flag) = chars.next_if(|c| matches!(*c, '-' | '+' | '0' | ' ' | '#')) {
            match flag {
                '-' => spec.left_align = true,
                '+' => spec.plus = true,
                '0' => spec.zero = true,
                ' ' => spec.space = true,
                _ => {}
            }
        }
        spec.width = read_digits(chars);
        if chars.next_if_eq(&'.').is_some() {
            spec.precision = Some(read_digits(chars).unwrap_or(0));
        }
        spec.verb = chars.next();
        spec
    }

    fn render(&self, verb: char, value: &str) -> String {
        self.piece(verb, value).map_or_else(
            || format!("%!{verb}(string={value})"),
            |piece| self.pad(piece),
        )
    }

    fn piece(&self, verb: char, value: &str) -> Option<Piece> {
        let number = Number::parse(value);
        let integer = match number {
            Some(Number::Int(int)) => Some(int),
            _ => None,
        };
        match verb {
            's' | 'v' => Some(Piece::Text(self.truncate(value))),
            'q' => Some(Piece::Text(quote(&self.truncate(value)))),
            't' => matches!(value, "true" | "false").then(|| Piece::Text(value.to_owned())),
            'x' | 'X' if integer.is_none() => {
                let hex: String = value.bytes().map(|byte| format!("{byte:02x}")).collect();
                Some(Piece::Text(if verb == 'X' {
                    hex.to_uppercase()
                } else {
                    hex
                }))
            }
            'd' | 'b' | 'o' | 'x' | 'X' => integer.map(|int| {
                let magnitude = int.unsigned_abs();
                let digits = match verb {
                    'b' => format!("{magnitude:b}"),
                    'o' => format!("{magnitude:o}"),
                    'x' => format!("{magnitude:x}"),
                    'X' => format!("{magnitude:X}"),
                    _ => magnitude.to_string(),
                };
                Piece::Numeric {
                    negative: int < 0,
                    digits,
                }
            }),
            'e' | 'E' | 'f' | 'F' | 'g' | 'G' => number.map(|parsed| {
                let float = parsed.to_f64();
                let magnitude = float.abs();
                let digits = match verb {
                    'e' => format_exponent(magnitude, self.precision.unwrap_or(6)),
                    'E' => format_exponent(magnitude, self.precision.unwrap_or(6)).to_uppercase(),
                    'f' | 'F' => format!("{:.*}", self.precision.unwrap_or(6), magnitude),
                    'g' => format_general(magnitude, self.precision),
                    _ => format_general(magnitude, self.precision).to_uppercase(),
                };
                Piece::Numeric {
                    negative: float.is_sign_negative(),
                    digits,
                }
            }),
            _ => None,
        }
    }

    fn truncate(&self, value: &str) -> String {
        self.precision.map_or_else(
            || value.to_owned(),
            |limit| value.chars().take(limit).collect(),
        )
    }

    fn pad(&self, piece: Piece) -> String {
        let width = self.width.unwrap_or(0);
        match piece {
            Piece::Text(text) => self.pad_text(text, width),
            Piece::Numeric { negative, digits } => {
                let sign = if negative {
                    "-"
                } else if self.plus {
                    "+"
                } else if self.space {
                    " "
                } else {
                    ""
                };
                let length = sign.len() + digits.chars().count();
                if self.zero && !self.left_align && width > length {
                    format!("{sign}{}{digits}", "0".repeat(width - length))
                } else {
                    self.pad_text(format!("{sign}{digits}"), width)
                }
            }
        }
    }

    fn pad_text(&self, text: String, width: usize) -> String {
        let length = text.chars().count();
        if length >= width {
            return text;
        }
        let fill = " ".repeat(width - length);
        if self.left_align {
            text + &fill
        } else {
            fill + &text
        }
    }
}

fn read_digits(chars: &mut Peekable<Chars<'_>>) -> Option<usize> {
    let mut value: Option<usize> = None;
    while let Some(digit) = chars.next_if(char::is_ascii_digit).and_then(|c| c.to_digit(10)) {
        let step = usize::try_from(digit).unwrap_or_default();
        value = Some(value.unwrap_or(0).saturating_mul(10).saturating_add(step));
    }
    value
}

/// Quote `value` as a Go double-quoted string literal.
fn quote(value: &str) -> String {
    let mut out = String::from('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\u{7}' => out.push_str("\\a"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{b}' => out.push_str("\\v"),
            control if control.is_control() => {
                let code = u32::from(control);
                out.push_str(&if code < 0x80 {
                    format!("\\x{code:02x}")
                } else if code <= 0xFFFF {
                    format!("\\u{code:04x}")
                } else {
                    format!("\\U{code:08x}")
                });
            }
            other => out.push(other),
        }
    }
    out.push('"');
    out
}
