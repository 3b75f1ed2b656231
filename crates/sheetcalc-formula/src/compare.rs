//! Value comparison
//!
//! All six relational operators are answered from one three-way
//! [`compare`], so `a<b` iff `b>a` and `a<=b` iff not `a>b` hold by
//! construction.

use std::cmp::Ordering;

use sheetcalc_core::{ErrorKind, Value};

use crate::coercion::first_scalar;
use crate::collation::collate;

/// Relational operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Comparison {
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
}

impl Comparison {
    /// Whether the operator holds for a given ordering of its operands
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Comparison::Equal => ordering.is_eq(),
            Comparison::NotEqual => ordering.is_ne(),
            Comparison::LessThan => ordering.is_lt(),
            Comparison::LessEqual => ordering.is_le(),
            Comparison::GreaterThan => ordering.is_gt(),
            Comparison::GreaterEqual => ordering.is_ge(),
        }
    }
}

/// Cross-type rank: numbers < strings < booleans
fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Number(_) => 0,
        Value::String(_) => 1,
        Value::Boolean(_) => 2,
        Value::Error(_) | Value::List(_) => 3,
    }
}

/// Three-way comparison of two values
///
/// Lists are compared by their first element. An error operand is returned
/// as `Err` (left first), since errors have no place in the ordering.
pub fn compare(left: &Value, right: &Value) -> Result<Ordering, ErrorKind> {
    let left = first_scalar(left)?;
    let right = first_scalar(right)?;

    match (left, right) {
        (Value::Error(e), _) | (_, Value::Error(e)) => Err(*e),

        // NaN never reaches here, arithmetic turns it into #NUM!
        (Value::Number(l), Value::Number(r)) => Ok(l.partial_cmp(r).unwrap_or(Ordering::Equal)),

        // Collation order, never numeric
        (Value::String(l), Value::String(r)) => Ok(collate(l.as_str(), r.as_str())),

        // FALSE < TRUE
        (Value::Boolean(l), Value::Boolean(r)) => Ok(l.cmp(r)),

        // Mixed types
        (l, r) => Ok(type_rank(l).cmp(&type_rank(r))),
    }
}

/// Apply a relational operator
pub fn relational(op: Comparison, left: &Value, right: &Value) -> Value {
    match compare(left, right) {
        Ok(ordering) => Value::Boolean(op.holds(ordering)),
        Err(e) => Value::Error(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn s(text: &str) -> Value {
        Value::string(text)
    }

    #[test]
    fn test_numbers() {
        assert_eq!(compare(&Value::Number(1.0), &Value::Number(2.0)), Ok(Ordering::Less));
        assert_eq!(compare(&Value::Number(-1.0), &Value::Number(-1.0)), Ok(Ordering::Equal));
        assert_eq!(compare(&Value::Number(3.0), &Value::Number(0.5)), Ok(Ordering::Greater));
    }

    #[test]
    fn test_booleans() {
        assert_eq!(
            compare(&Value::Boolean(false), &Value::Boolean(true)),
            Ok(Ordering::Less)
        );
        assert_eq!(
            compare(&Value::Boolean(true), &Value::Boolean(true)),
            Ok(Ordering::Equal)
        );
    }

    #[test]
    fn test_type_rank() {
        assert_eq!(compare(&Value::Number(1e9), &s("0")), Ok(Ordering::Less));
        assert_eq!(compare(&s(""), &Value::Number(-5.0)), Ok(Ordering::Greater));
        assert_eq!(compare(&s("zzz"), &Value::Boolean(false)), Ok(Ordering::Less));
        assert_eq!(
            compare(&Value::Boolean(false), &Value::Number(1e9)),
            Ok(Ordering::Greater)
        );
    }

    #[test]
    fn test_strings_use_collation() {
        assert_eq!(compare(&s("0"), &s("-1")), Ok(Ordering::Greater));
        assert_eq!(compare(&s("10"), &s("9")), Ok(Ordering::Less));
        assert_eq!(compare(&s("a"), &s("a")), Ok(Ordering::Equal));
    }

    #[test]
    fn test_lists_compare_first_element() {
        assert_eq!(
            compare(&Value::list([Value::Number(1.0), s("x")]), &Value::Number(1.0)),
            Ok(Ordering::Equal)
        );
        assert_eq!(
            compare(&s("1"), &Value::list([Value::Number(1.0)])),
            Ok(Ordering::Greater)
        );
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(
            compare(&Value::Error(ErrorKind::Na), &Value::Error(ErrorKind::Div0)),
            Err(ErrorKind::Na)
        );
        assert_eq!(
            compare(&Value::Number(1.0), &Value::Error(ErrorKind::Div0)),
            Err(ErrorKind::Div0)
        );
        assert_eq!(
            relational(Comparison::Equal, &Value::Error(ErrorKind::Ref), &Value::Number(1.0)),
            Value::Error(ErrorKind::Ref)
        );
    }

    #[test]
    fn test_relational_operators() {
        let one = Value::Number(1.0);
        let two = Value::Number(2.0);
        let cases = [
            (Comparison::Equal, false),
            (Comparison::NotEqual, true),
            (Comparison::LessThan, true),
            (Comparison::LessEqual, true),
            (Comparison::GreaterThan, false),
            (Comparison::GreaterEqual, false),
        ];
        for (op, expected) in cases {
            assert_eq!(relational(op, &one, &two), Value::Boolean(expected), "{:?}", op);
        }
    }
}
