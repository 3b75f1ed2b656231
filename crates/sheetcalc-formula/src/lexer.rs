//! Formula lexer
//!
//! Scans formula text into a lazy stream of [`Token`]s. The stream is an
//! ordinary iterator: cloning a [`Lexer`] (or calling [`tokenize`] again)
//! restarts scanning deterministically from the same point.
//!
//! Supported input:
//! - Optional leading `=`
//! - Numbers: `1`, `1.5`, `.5`, `1.`, `1e10`, `2.5E-3`
//! - Strings: `"text"`, with `""` for an embedded quote
//! - Booleans: `TRUE` / `FALSE` (any case)
//! - Error literals: `#DIV/0!`, `#VALUE!`, `#N/A`, ...
//! - Operators: `+ - * / ^ & = <> < <= > >=`
//! - Delimiters: `( ) { } ,`

use log::trace;
use sheetcalc_core::ErrorKind;

use crate::error::LexError;
use crate::token::{Operator, Token, TokenKind};

/// Tokenize a formula
///
/// # Example
/// ```rust
/// use sheetcalc_formula::lexer::tokenize;
/// use sheetcalc_formula::token::{Operator, TokenKind};
///
/// let kinds: Vec<TokenKind> = tokenize("=1<>2")
///     .map(|t| t.map(|t| t.kind))
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(
///     kinds,
///     vec![
///         TokenKind::Number(1.0),
///         TokenKind::Operator(Operator::NotEqual),
///         TokenKind::Number(2.0),
///     ]
/// );
/// ```
pub fn tokenize(source: &str) -> Lexer<'_> {
    Lexer::new(source)
}

/// Lazy token scanner over formula text
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    input: &'a str,
    pos: usize,
    done: bool,
}

impl<'a> Lexer<'a> {
    /// Create a lexer, skipping a leading `=` if present
    pub fn new(input: &'a str) -> Self {
        let leading = input.len() - input.trim_start().len();
        let pos = if input[leading..].starts_with('=') {
            leading + 1
        } else {
            leading
        };

        Self {
            input,
            pos,
            done: false,
        }
    }

    fn scan_token(&mut self) -> Option<Result<Token<'a>, LexError>> {
        self.skip_whitespace();

        let start = self.pos;
        let c = self.peek_char()?;

        let kind = match c {
            '+' => self.single(TokenKind::Operator(Operator::Plus)),
            '-' => self.single(TokenKind::Operator(Operator::Minus)),
            '*' => self.single(TokenKind::Operator(Operator::Star)),
            '/' => self.single(TokenKind::Operator(Operator::Slash)),
            '^' => self.single(TokenKind::Operator(Operator::Caret)),
            '&' => self.single(TokenKind::Operator(Operator::Ampersand)),
            '=' => self.single(TokenKind::Operator(Operator::Equal)),
            '(' => self.single(TokenKind::LeftParen),
            ')' => self.single(TokenKind::RightParen),
            '{' => self.single(TokenKind::LeftBrace),
            '}' => self.single(TokenKind::RightBrace),
            ',' => self.single(TokenKind::Comma),

            // Two-character forms first
            '<' => {
                self.advance();
                match self.peek_char() {
                    Some('=') => self.single(TokenKind::Operator(Operator::LessEqual)),
                    Some('>') => self.single(TokenKind::Operator(Operator::NotEqual)),
                    _ => TokenKind::Operator(Operator::LessThan),
                }
            }
            '>' => {
                self.advance();
                match self.peek_char() {
                    Some('=') => self.single(TokenKind::Operator(Operator::GreaterEqual)),
                    _ => TokenKind::Operator(Operator::GreaterThan),
                }
            }

            '"' => match self.scan_string() {
                Ok(kind) => kind,
                Err(e) => return Some(Err(e)),
            },

            c if c.is_ascii_digit()
                || (c == '.' && self.peek_char_at(1).is_some_and(|c| c.is_ascii_digit())) =>
            {
                match self.scan_number() {
                    Ok(kind) => kind,
                    Err(e) => return Some(Err(e)),
                }
            }

            '#' => match self.scan_error() {
                Ok(kind) => kind,
                Err(e) => return Some(Err(e)),
            },

            c if c.is_alphabetic() || c == '_' => match self.scan_word() {
                Ok(kind) => kind,
                Err(e) => return Some(Err(e)),
            },

            found => {
                return Some(Err(LexError::UnexpectedCharacter {
                    found,
                    position: start,
                }))
            }
        };

        let token = Token {
            kind,
            text: &self.input[start..self.pos],
            position: start,
        };
        trace!("token {:?} at {}", token.kind, token.position);
        Some(Ok(token))
    }

    fn single(&mut self, kind: TokenKind) -> TokenKind {
        self.advance();
        kind
    }

    fn scan_string(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        self.advance(); // Skip opening quote

        let mut s = String::new();
        loop {
            match self.peek_char() {
                Some('"') => {
                    self.advance();
                    // "" inside a string is an escaped quote
                    if self.peek_char() == Some('"') {
                        s.push('"');
                        self.advance();
                    } else {
                        return Ok(TokenKind::String(s));
                    }
                }
                Some(c) => {
                    s.push(c);
                    self.advance();
                }
                None => return Err(LexError::UnterminatedString { position: start }),
            }
        }
    }

    fn scan_number(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;

        // Integer part
        self.skip_digits();

        // Decimal part
        if self.peek_char() == Some('.') {
            self.advance();
            self.skip_digits();
        }

        // Exponent part
        if matches!(self.peek_char(), Some('e' | 'E')) {
            self.advance();
            if matches!(self.peek_char(), Some('+' | '-')) {
                self.advance();
            }
            if !self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
                return Err(LexError::MalformedNumber {
                    found: self.input[start..self.pos].to_string(),
                    position: start,
                });
            }
            self.skip_digits();
        }

        let text = &self.input[start..self.pos];
        // Literals beyond the f64 range are rejected, not read as infinity
        text.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite())
            .map(TokenKind::Number)
            .ok_or_else(|| LexError::MalformedNumber {
                found: text.to_string(),
                position: start,
            })
    }

    fn scan_error(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        if let Some(kind) = ErrorKind::parse_prefix(&self.input[start..]) {
            self.pos += kind.as_str().len();
            return Ok(TokenKind::Error(kind));
        }

        self.advance(); // Skip '#'
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || matches!(c, '/' | '!' | '?' | '_'))
        {
            self.advance();
        }
        Err(LexError::UnknownError {
            found: self.input[start..self.pos].to_string(),
            position: start,
        })
    }

    fn scan_word(&mut self) -> Result<TokenKind, LexError> {
        let start = self.pos;
        while self
            .peek_char()
            .is_some_and(|c| c.is_alphanumeric() || c == '_' || c == '.')
        {
            self.advance();
        }

        let word = &self.input[start..self.pos];
        if word.eq_ignore_ascii_case("TRUE") {
            Ok(TokenKind::Boolean(true))
        } else if word.eq_ignore_ascii_case("FALSE") {
            Ok(TokenKind::Boolean(false))
        } else {
            Err(LexError::UnknownIdentifier {
                found: word.to_string(),
                position: start,
            })
        }
    }

    // === Helper methods ===

    fn peek_char(&self) -> Option<char> {
        self.input[self.pos..].chars().next()
    }

    fn peek_char_at(&self, offset: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(offset)
    }

    fn advance(&mut self) {
        if let Some(c) = self.peek_char() {
            self.pos += c.len_utf8();
        }
    }

    fn skip_digits(&mut self) {
        while self.peek_char().is_some_and(|c| c.is_ascii_digit()) {
            self.advance();
        }
    }

    fn skip_whitespace(&mut self) {
        while self.peek_char().is_some_and(char::is_whitespace) {
            self.advance();
        }
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Token<'a>, LexError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let item = self.scan_token();
        if !matches!(item, Some(Ok(_))) {
            self.done = true;
        }
        item
    }
}

impl std::iter::FusedIterator for Lexer<'_> {}
