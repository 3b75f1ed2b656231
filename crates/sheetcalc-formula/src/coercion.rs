//! Operand coercion and operator rules
//!
//! Each operator family converts its operands to the type it needs before
//! doing any work:
//! - arithmetic (`+ - * / ^`, prefix `-`) needs numbers
//! - concatenation (`&`) needs text
//! - prefix `+` needs nothing and passes its operand through
//!
//! A coercion that fails yields an [`ErrorKind`] which the operator returns
//! as a [`Value::Error`]; nothing here panics or returns a host error.
//! Lists used as operands stand for their first element.

use std::borrow::Cow;

use lazy_regex::regex_is_match;
use sheetcalc_core::{format_number, ErrorKind, Value};

/// Arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arithmetic {
    Add,
    Subtract,
    Multiply,
    Divide,
    Power,
}

/// Reduce a value to the scalar it stands for in a scalar context
///
/// Lists reduce to their first element, recursively. An empty list has no
/// scalar and yields `#VALUE!`.
pub fn first_scalar(value: &Value) -> Result<&Value, ErrorKind> {
    match value {
        Value::List(items) => match items.first() {
            Some(first) => first_scalar(first),
            None => Err(ErrorKind::Value),
        },
        scalar => Ok(scalar),
    }
}

/// Parse text as a number the way arithmetic operands are parsed
///
/// Accepts an optional sign, digits with an optional decimal point, and an
/// optional exponent, surrounded by optional whitespace. Anything else
/// (including the empty string) is not a number.
pub fn parse_numeric_text(text: &str) -> Option<f64> {
    let text = text.trim();
    if !regex_is_match!(r"^[+-]?(?:\d+\.?\d*|\.\d+)(?:[eE][+-]?\d+)?$", text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Coerce a value to a number
pub fn to_number(value: &Value) -> Result<f64, ErrorKind> {
    match first_scalar(value)? {
        Value::Number(n) => Ok(*n),
        Value::Boolean(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::String(s) => parse_numeric_text(s.as_str()).ok_or(ErrorKind::Value),
        Value::Error(e) => Err(*e),
        Value::List(_) => Err(ErrorKind::Value),
    }
}

/// Coerce a value to text
pub fn to_text(value: &Value) -> Result<Cow<'_, str>, ErrorKind> {
    match first_scalar(value)? {
        Value::Number(n) => Ok(Cow::Owned(format_number(*n))),
        Value::Boolean(b) => Ok(Cow::Borrowed(if *b { "TRUE" } else { "FALSE" })),
        Value::String(s) => Ok(Cow::Borrowed(s.as_str())),
        Value::Error(e) => Err(*e),
        Value::List(_) => Err(ErrorKind::Value),
    }
}

/// Turn a raw float result into a formula value
fn number_result(n: f64) -> Value {
    if n.is_finite() {
        // Normalizes -0 to 0
        Value::Number(n + 0.0)
    } else {
        Value::Error(ErrorKind::Num)
    }
}

/// Apply an arithmetic operator
///
/// The left operand's coercion error wins over the right one's.
pub fn arithmetic(op: Arithmetic, left: &Value, right: &Value) -> Value {
    let (l, r) = match (to_number(left), to_number(right)) {
        (Ok(l), Ok(r)) => (l, r),
        (Err(e), _) | (_, Err(e)) => return Value::Error(e),
    };

    match op {
        Arithmetic::Add => number_result(l + r),
        Arithmetic::Subtract => number_result(l - r),
        Arithmetic::Multiply => number_result(l * r),
        Arithmetic::Divide => {
            if r == 0.0 {
                Value::Error(ErrorKind::Div0)
            } else {
                number_result(l / r)
            }
        }
        Arithmetic::Power => power(l, r),
    }
}

fn power(base: f64, exponent: f64) -> Value {
    if base == 0.0 {
        return if exponent == 0.0 {
            Value::Error(ErrorKind::Num)
        } else if exponent < 0.0 {
            Value::Error(ErrorKind::Div0)
        } else {
            Value::Number(0.0)
        };
    }
    number_result(base.powf(exponent))
}

/// Concatenate two values as text
pub fn concat(left: &Value, right: &Value) -> Value {
    match (to_text(left), to_text(right)) {
        (Ok(l), Ok(r)) => Value::string(format!("{}{}", l, r)),
        (Err(e), _) | (_, Err(e)) => Value::Error(e),
    }
}

/// Prefix `-`: numeric coercion, then negation
pub fn negate(value: &Value) -> Value {
    match to_number(value) {
        Ok(n) => number_result(-n),
        Err(e) => Value::Error(e),
    }
}

/// Prefix `+`: no coercion at all
///
/// Scalars come back unchanged, whatever their type. A list comes back as
/// its first element, which keeps its own type.
pub fn identity(value: &Value) -> Value {
    match first_scalar(value) {
        Ok(scalar) => scalar.clone(),
        Err(e) => Value::Error(e),
    }
}
