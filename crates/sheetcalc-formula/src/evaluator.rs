//! Formula evaluator
//!
//! Evaluates formula ASTs to produce values. Evaluation never fails: bad
//! operands turn into error values, and array literals stay lists.

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::coercion::{self, Arithmetic};
use crate::compare::{self, Comparison};
use sheetcalc_core::Value;

/// Evaluate a formula expression
pub fn evaluate(expr: &FormulaExpr) -> Value {
    match expr {
        FormulaExpr::Literal(value) => value.clone(),

        FormulaExpr::UnaryOp { op, operand } => {
            let value = evaluate(operand);
            match op {
                UnaryOperator::Negate => coercion::negate(&value),
                UnaryOperator::Plus => coercion::identity(&value),
            }
        }

        FormulaExpr::BinaryOp { .. } => {
            // Walk the left spine in a loop; operator chains are left-deep
            let mut rights = Vec::new();
            let mut node = expr;
            while let FormulaExpr::BinaryOp { op, left, right } = node {
                rights.push((*op, right.as_ref()));
                node = left.as_ref();
            }

            let mut value = evaluate(node);
            for (op, right) in rights.into_iter().rev() {
                let right = evaluate(right);
                value = evaluate_binary_op(op, &value, &right);
            }
            value
        }

        FormulaExpr::Array(elements) => Value::List(elements.iter().map(evaluate).collect()),

        FormulaExpr::Group(inner) => evaluate(inner),
    }
}

/// Apply a binary operator to evaluated operands
pub fn evaluate_binary_op(op: BinaryOperator, left: &Value, right: &Value) -> Value {
    match op {
        // Arithmetic operators
        BinaryOperator::Add => coercion::arithmetic(Arithmetic::Add, left, right),
        BinaryOperator::Subtract => coercion::arithmetic(Arithmetic::Subtract, left, right),
        BinaryOperator::Multiply => coercion::arithmetic(Arithmetic::Multiply, left, right),
        BinaryOperator::Divide => coercion::arithmetic(Arithmetic::Divide, left, right),
        BinaryOperator::Power => coercion::arithmetic(Arithmetic::Power, left, right),

        // Concatenation
        BinaryOperator::Concat => coercion::concat(left, right),

        // Comparison operators
        BinaryOperator::Equal => compare::relational(Comparison::Equal, left, right),
        BinaryOperator::NotEqual => compare::relational(Comparison::NotEqual, left, right),
        BinaryOperator::LessThan => compare::relational(Comparison::LessThan, left, right),
        BinaryOperator::LessEqual => compare::relational(Comparison::LessEqual, left, right),
        BinaryOperator::GreaterThan => compare::relational(Comparison::GreaterThan, left, right),
        BinaryOperator::GreaterEqual => {
            compare::relational(Comparison::GreaterEqual, left, right)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaResult;
    use crate::parser::parse_formula;
    use pretty_assertions::assert_eq;
    use sheetcalc_core::ErrorKind;

    fn eval(formula: &str) -> FormulaResult<Value> {
        let ast = parse_formula(formula)?;
        Ok(evaluate(&ast))
    }

    #[test]
    fn test_evaluate_literals() {
        assert_eq!(eval("=42").unwrap(), Value::Number(42.0));
        assert_eq!(eval("=\"Hello\"").unwrap(), Value::string("Hello"));
        assert_eq!(eval("=TRUE").unwrap(), Value::Boolean(true));
        assert_eq!(eval("=#N/A").unwrap(), Value::Error(ErrorKind::Na));
    }

    #[test]
    fn test_evaluate_arithmetic() {
        assert_eq!(eval("=1+2").unwrap(), Value::Number(3.0));
        assert_eq!(eval("=10-3").unwrap(), Value::Number(7.0));
        assert_eq!(eval("=4*5").unwrap(), Value::Number(20.0));
        assert_eq!(eval("=20/4").unwrap(), Value::Number(5.0));
        assert_eq!(eval("=2^10").unwrap(), Value::Number(1024.0));
    }

    #[test]
    fn test_evaluate_precedence() {
        assert_eq!(eval("=1+2*3").unwrap(), Value::Number(7.0));
        assert_eq!(eval("=(1+2)*3").unwrap(), Value::Number(9.0));
        assert_eq!(eval("=2+3*4-5").unwrap(), Value::Number(9.0));
        assert_eq!(eval("=-2^2").unwrap(), Value::Number(4.0));
        assert_eq!(eval("=2^3^2").unwrap(), Value::Number(64.0));
        assert_eq!(eval("=1+2&3").unwrap(), Value::string("33"));
    }

    #[test]
    fn test_evaluate_unary() {
        assert_eq!(eval("=-5").unwrap(), Value::Number(-5.0));
        assert_eq!(eval("=--5").unwrap(), Value::Number(5.0));
        assert_eq!(eval("=+\"Hello\"").unwrap(), Value::string("Hello"));
        assert_eq!(eval("=-\"Hello\"").unwrap(), Value::Error(ErrorKind::Value));
        assert_eq!(eval("=+TRUE").unwrap(), Value::Boolean(true));
        assert_eq!(eval("=-TRUE").unwrap(), Value::Number(-1.0));
    }

    #[test]
    fn test_evaluate_comparison() {
        assert_eq!(eval("=1<2").unwrap(), Value::Boolean(true));
        assert_eq!(eval("=1>2").unwrap(), Value::Boolean(false));
        assert_eq!(eval("=5=5").unwrap(), Value::Boolean(true));
        assert_eq!(eval("=5<>5").unwrap(), Value::Boolean(false));
        assert_eq!(eval("=\"0\">\"-1\"").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_evaluate_chained_comparison() {
        // (1<2)<3 compares TRUE with 3, and booleans rank above numbers
        assert_eq!(eval("=1<2<3").unwrap(), Value::Boolean(false));
        assert_eq!(eval("=1<2=TRUE").unwrap(), Value::Boolean(true));
    }

    #[test]
    fn test_evaluate_array_stays_list() {
        assert_eq!(
            eval("={1,\"a\",TRUE,1/0}").unwrap(),
            Value::list([
                Value::Number(1.0),
                Value::string("a"),
                Value::Boolean(true),
                Value::Error(ErrorKind::Div0),
            ])
        );
        assert_eq!(
            eval("=({1,2})").unwrap(),
            Value::list([Value::Number(1.0), Value::Number(2.0)])
        );
    }

    #[test]
    fn test_evaluate_array_in_scalar_context() {
        assert_eq!(eval("={1}+{\"1\"}").unwrap(), Value::Number(2.0));
        assert_eq!(eval("={3,4}*2").unwrap(), Value::Number(6.0));
        assert_eq!(eval("={\"a\",\"b\"}&{\"c\"}").unwrap(), Value::string("ac"));
        assert_eq!(eval("=+{\"1\",2}").unwrap(), Value::string("1"));
        assert_eq!(eval("=-{\"1\",2}").unwrap(), Value::Number(-1.0));
    }

    #[test]
    fn test_evaluate_long_chain() {
        let formula = format!("=0{}", "+1".repeat(2000));
        assert_eq!(eval(&formula).unwrap(), Value::Number(2000.0));

        let formula = format!("=\"\"{}", "&\"a\"".repeat(500));
        assert_eq!(eval(&formula).unwrap(), Value::string("a".repeat(500)));
    }

    #[test]
    fn test_evaluate_error_propagation() {
        assert_eq!(eval("=#REF!+1").unwrap(), Value::Error(ErrorKind::Ref));
        assert_eq!(eval("=1/0+#N/A").unwrap(), Value::Error(ErrorKind::Div0));
        assert_eq!(eval("=\"a\"&#NUM!").unwrap(), Value::Error(ErrorKind::Num));
        assert_eq!(eval("=#NAME?=1").unwrap(), Value::Error(ErrorKind::Name));
        assert_eq!(eval("=-#NULL!").unwrap(), Value::Error(ErrorKind::Null));
    }
}
