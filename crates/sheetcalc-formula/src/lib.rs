//! # sheetcalc-formula
//!
//! Formula lexer, parser and evaluator for sheetcalc.
//!
//! This crate provides:
//! - Tokenizing (text → tokens)
//! - Formula parsing (tokens → AST)
//! - Formula evaluation (AST → value), with the spreadsheet engine's
//!   coercion and comparison rules
//!
//! ## Example
//!
//! ```rust
//! use sheetcalc_formula::{parse, ErrorKind, Tag, TaggedPayload};
//!
//! let result = parse("=0/0").unwrap();
//! assert_eq!(result.tag, Tag::Error);
//! assert_eq!(result.value, TaggedPayload::Error(ErrorKind::Div0));
//!
//! let result = parse("={1}+{\"1\"}").unwrap();
//! assert_eq!(result.value, TaggedPayload::Number(2.0));
//! ```

pub mod ast;
pub mod coercion;
pub mod collation;
pub mod compare;
pub mod error;
pub mod evaluator;
pub mod lexer;
pub mod parser;
pub mod token;

use log::debug;

pub use ast::{BinaryOperator, FormulaExpr, UnaryOperator};
pub use error::{FormulaError, FormulaResult, LexError, ParseError};
pub use evaluator::evaluate;
pub use lexer::{tokenize, Lexer};
pub use parser::parse_formula;
pub use sheetcalc_core::{ErrorKind, Tag, TaggedPayload, TaggedValue, Value};
pub use token::{Operator, Token, TokenKind};

/// Evaluate a formula and return its tagged result
///
/// Malformed formula text is an `Err`; everything that parses produces a
/// value, possibly an error value such as `#DIV/0!`.
pub fn parse(formula: &str) -> FormulaResult<TaggedValue> {
    calculate(formula).map(TaggedValue::from)
}

/// Evaluate a formula and return its untagged value
pub fn calculate(formula: &str) -> FormulaResult<Value> {
    let ast = parse_formula(formula).map_err(|e| {
        debug!("failed to parse {:?}: {}", formula, e);
        e
    })?;
    let value = evaluate(&ast);
    debug!("{:?} evaluated to {:?}", formula, value);
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_tags_result() {
        let result = parse("=\"A\"&1").unwrap();
        assert_eq!(result.tag, Tag::String);
        assert_eq!(result.value, TaggedPayload::String("A1".into()));
    }

    #[test]
    fn test_parse_list_result() {
        let result = parse("={1,\"x\"}").unwrap();
        assert_eq!(result.tag, Tag::List);
        assert_eq!(
            result.value,
            TaggedPayload::List(vec![
                TaggedValue::from(Value::Number(1.0)),
                TaggedValue::from(Value::string("x")),
            ])
        );
    }

    #[test]
    fn test_structural_errors_are_err() {
        assert!(matches!(parse("=\"abc"), Err(FormulaError::Lex(_))));
        assert!(matches!(parse("=(1"), Err(FormulaError::Parse(_))));
    }

    #[test]
    fn test_calculate() {
        assert_eq!(calculate("=TRUE+FALSE").unwrap(), Value::Number(1.0));
    }
}
