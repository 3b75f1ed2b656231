//! # sheetcalc
//!
//! A spreadsheet formula interpreter.
//!
//! Sheetcalc evaluates formula text such as `=0/0`, `="A"&1` or `={1}+{"1"}`
//! to a typed result, reproducing the spreadsheet engine's arithmetic,
//! comparison and concatenation rules value for value.
//!
//! ## Features
//!
//! - Number, string, boolean and error literals, and `{...}` array literals
//! - Operators `+ - * / ^ & = <> < <= > >=` with spreadsheet precedence
//! - Spreadsheet-style coercion (`TRUE+FALSE` is `1`, `-"x"` is `#VALUE!`)
//! - Error values as ordinary results (`#DIV/0!`, `#NUM!`, ...)
//! - Optional `serde` feature for `{"type": ..., "value": ...}` JSON output
//!
//! ## Example
//!
//! ```rust
//! use sheetcalc::prelude::*;
//!
//! let result = sheetcalc::parse("=TRUE+FALSE").unwrap();
//! assert_eq!(result.tag, Tag::Number);
//! assert_eq!(result.value, TaggedPayload::Number(1.0));
//!
//! // Array literals stay lists
//! let value = sheetcalc::calculate("={1,2}").unwrap();
//! assert_eq!(value, Value::list([Value::Number(1.0), Value::Number(2.0)]));
//! ```

pub mod prelude;

// Re-export core types
pub use sheetcalc_core::{
    format_number, ErrorKind, SharedString, Tag, TaggedPayload, TaggedValue, Value,
};

// Re-export formula types
pub use sheetcalc_formula::{
    calculate, evaluate, parse, parse_formula, tokenize, BinaryOperator, FormulaError,
    FormulaExpr, FormulaResult, LexError, Lexer, ParseError, Token, TokenKind, UnaryOperator,
};

// Modules for lower-level access
pub use sheetcalc_formula::{coercion, collation, compare};
