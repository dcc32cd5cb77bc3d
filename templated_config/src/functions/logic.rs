//! Comparison and boolean built-ins.
//!
//! Every value is text. Operands compare as numbers when both parse as number
//! literals and as text otherwise, so `lt 9 10` holds and `lt "b" "a"` does
//! not.

use std::cmp::Ordering;

use crate::numeric::Number;
use crate::{ConfigError, ConfigResult};

/// Returns `false` for an empty value, `false` or `0`, and `true` otherwise.
///
/// `if`, `with`, `not`, `and` and `or` all use this test.
///
/// # Examples
///
/// ```
/// use templated_config::functions::is_truthy;
///
/// assert!(is_truthy("prod"));
/// assert!(!is_truthy(""));
/// assert!(!is_truthy("false"));
/// assert!(!is_truthy("0"));
/// ```
#[must_use]
pub fn is_truthy(value: &str) -> bool {
    !matches!(value, "" | "false" | "0")
}

fn compare(left: &str, right: &str) -> Ordering {
    match (Number::parse(left), Number::parse(right)) {
        (Some(lhs), Some(rhs)) => lhs.compare(rhs),
        _ => left.cmp(right),
    }
}

fn boolean(flag: bool) -> String {
    flag.to_string()
}

fn arity_error(function: &str, expected: &str, args: &[String]) -> ConfigError {
    ConfigError::invalid_arguments(
        function,
        format!("expected {expected}, got {} arguments", args.len()),
    )
}

/// `eq ARG1 ARG2...`: whether `ARG1` equals any of the later arguments.
pub(super) fn eq(args: &[String]) -> ConfigResult<String> {
    match args.split_first() {
        Some((first, others)) if !others.is_empty() => Ok(boolean(
            others
                .iter()
                .any(|other| compare(first, other) == Ordering::Equal),
        )),
        _ => Err(arity_error("eq", "at least two arguments", args)),
    }
}

/// `ne ARG1 ARG2`.
pub(super) fn ne(args: &[String]) -> ConfigResult<String> {
    ordered("ne", args, Ordering::is_ne)
}

/// `lt ARG1 ARG2`.
pub(super) fn lt(args: &[String]) -> ConfigResult<String> {
    ordered("lt", args, Ordering::is_lt)
}

/// `le ARG1 ARG2`.
pub(super) fn le(args: &[String]) -> ConfigResult<String> {
    ordered("le", args, Ordering::is_le)
}

/// `gt ARG1 ARG2`.
pub(super) fn gt(args: &[String]) -> ConfigResult<String> {
    ordered("gt", args, Ordering::is_gt)
}

/// `ge ARG1 ARG2`.
pub(super) fn ge(args: &[String]) -> ConfigResult<String> {
    ordered("ge", args, Ordering::is_ge)
}

fn ordered(function: &str, args: &[String], accept: fn(Ordering) -> bool) -> ConfigResult<String> {
    match args {
        [left, right] => Ok(boolean(accept(compare(left, right)))),
        _ => Err(arity_error(function, "two arguments", args)),
    }
}

/// `not ARG`.
pub(super) fn not(args: &[String]) -> ConfigResult<String> {
    match args {
        [value] => Ok(boolean(!is_truthy(value))),
        _ => Err(arity_error("not", "one argument", args)),
    }
}

/// `and ARG...`: the first false argument, or the last one.
pub(super) fn and(args: &[String]) -> ConfigResult<String> {
    pick("and", args, |value| !is_truthy(value))
}

/// `or ARG...`: the first true argument, or the last one.
pub(super) fn or(args: &[String]) -> ConfigResult<String> {
    pick("or", args, is_truthy)
}

fn pick(function: &str, args: &[String], stop: fn(&str) -> bool) -> ConfigResult<String> {
    let Some(last) = args.last() else {
        return Err(arity_error(function, "at least one argument", args));
    };
    Ok(args
        .iter()
        .find(|value| stop(value))
        .unwrap_or(last)
        .clone())
}

/// `len ARG`: the length of `ARG` in bytes.
pub(super) fn len(args: &[String]) -> ConfigResult<String> {
    match args {
        [value] => Ok(value.len().to_string()),
        _ => Err(arity_error("len", "one argument", args)),
    }
}
