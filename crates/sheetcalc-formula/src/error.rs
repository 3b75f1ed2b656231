//! Formula error types
//!
//! These are structural failures only: text that cannot be tokenized or
//! parsed. Value-level errors such as `#DIV/0!` are ordinary
//! [`Value::Error`](sheetcalc_core::Value::Error) results.

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula tokenizing or parsing
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    /// Formula text could not be tokenized
    #[error("Lex error: {0}")]
    Lex(#[from] LexError),

    /// Token stream does not match the grammar
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),
}

impl FormulaError {
    /// Byte offset of the offending input, when known
    pub fn position(&self) -> Option<usize> {
        match self {
            FormulaError::Lex(e) => Some(e.position()),
            FormulaError::Parse(ParseError::UnexpectedToken { position, .. }) => Some(*position),
            FormulaError::Parse(ParseError::NestingTooDeep { position }) => Some(*position),
            FormulaError::Parse(ParseError::UnexpectedEnd) => None,
        }
    }
}

/// Tokenizer failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    /// A string literal is missing its closing quote
    #[error("Unterminated string starting at position {position}")]
    UnterminatedString { position: usize },

    /// A character that starts no token
    #[error("Unexpected character '{found}' at position {position}")]
    UnexpectedCharacter { found: char, position: usize },

    /// A word other than TRUE or FALSE
    #[error("Unknown identifier '{found}' at position {position}")]
    UnknownIdentifier { found: String, position: usize },

    /// A `#...` word that is not a known error literal
    #[error("Unknown error literal '{found}' at position {position}")]
    UnknownError { found: String, position: usize },

    /// A number with a dangling exponent marker (`1e`) or beyond the f64 range
    #[error("Malformed number '{found}' at position {position}")]
    MalformedNumber { found: String, position: usize },
}

impl LexError {
    /// Byte offset where the bad input starts
    pub fn position(&self) -> usize {
        match self {
            LexError::UnterminatedString { position }
            | LexError::UnexpectedCharacter { position, .. }
            | LexError::UnknownIdentifier { position, .. }
            | LexError::UnknownError { position, .. }
            | LexError::MalformedNumber { position, .. } => *position,
        }
    }
}

/// Grammar failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// A token that cannot appear here
    #[error("Unexpected token '{found}' at position {position}")]
    UnexpectedToken { found: String, position: usize },

    /// Input ended in the middle of an expression
    #[error("Unexpected end of formula")]
    UnexpectedEnd,

    /// Parentheses, array braces or prefix operators nested too deeply
    #[error("Formula nested too deeply at position {position}")]
    NestingTooDeep { position: usize },
}
