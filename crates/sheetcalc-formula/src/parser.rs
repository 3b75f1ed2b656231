//! Formula parser
//!
//! A recursive descent parser over the lexer's token stream, with the
//! spreadsheet engine's own operator precedence (unary binds tighter than `^`).

use log::trace;

use crate::ast::{BinaryOperator, FormulaExpr, UnaryOperator};
use crate::error::{FormulaResult, LexError, ParseError};
use crate::lexer::tokenize;
use crate::token::{Operator, Token, TokenKind};
use sheetcalc_core::Value;

/// Parse a formula string into an AST
///
/// # Example
/// ```rust
/// use sheetcalc_formula::parse_formula;
///
/// let ast = parse_formula("=1+2").unwrap();
/// let ast = parse_formula("={1,\"a\",TRUE}").unwrap();
/// let ast = parse_formula("=\"0\">\"-1\"").unwrap();
/// ```
pub fn parse_formula(formula: &str) -> FormulaResult<FormulaExpr> {
    parse(tokenize(formula))
}

/// Parse a token stream into an AST
///
/// The stream is consumed lazily; the first lex error aborts parsing.
pub fn parse<'a, I>(tokens: I) -> FormulaResult<FormulaExpr>
where
    I: IntoIterator<Item = Result<Token<'a>, LexError>>,
{
    let mut parser = FormulaParser::new(tokens.into_iter())?;
    let expr = parser.parse_expression()?;

    // Make sure we consumed all input
    if let Some(token) = parser.current.take() {
        return Err(unexpected(&token).into());
    }

    trace!("parsed {:?}", expr);
    Ok(expr)
}

fn unexpected(token: &Token<'_>) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.text.to_string(),
        position: token.position,
    }
}

/// Deepest allowed nesting of parentheses, array braces and prefix operators
pub const MAX_NESTING: usize = 64;

/// Formula parser
struct FormulaParser<'a, I> {
    tokens: I,
    current: Option<Token<'a>>,
    depth: usize,
}

impl<'a, I> FormulaParser<'a, I>
where
    I: Iterator<Item = Result<Token<'a>, LexError>>,
{
    fn new(tokens: I) -> FormulaResult<Self> {
        let mut parser = Self {
            tokens,
            current: None,
            depth: 0,
        };
        parser.advance()?;
        Ok(parser)
    }

    // === Token handling ===

    /// Move to the next token, returning the one that was current
    fn advance(&mut self) -> FormulaResult<Option<Token<'a>>> {
        let next = self.tokens.next().transpose()?;
        Ok(std::mem::replace(&mut self.current, next))
    }

    fn current_kind(&self) -> Option<&TokenKind> {
        self.current.as_ref().map(|t| &t.kind)
    }

    fn expect(&mut self, expected: &TokenKind) -> FormulaResult<()> {
        match &self.current {
            Some(token) if &token.kind == expected => {
                self.advance()?;
                Ok(())
            }
            Some(token) => Err(unexpected(token).into()),
            None => Err(ParseError::UnexpectedEnd.into()),
        }
    }

    /// Run `inner` one nesting level deeper, failing past [`MAX_NESTING`]
    fn nested<T>(
        &mut self,
        position: usize,
        inner: impl FnOnce(&mut Self) -> FormulaResult<T>,
    ) -> FormulaResult<T> {
        if self.depth >= MAX_NESTING {
            return Err(ParseError::NestingTooDeep { position }.into());
        }
        self.depth += 1;
        let result = inner(self);
        self.depth -= 1;
        result
    }

    fn current_binary(&self) -> Option<BinaryOperator> {
        let op = match self.current_kind()? {
            TokenKind::Operator(op) => op,
            _ => return None,
        };

        Some(match op {
            Operator::Plus => BinaryOperator::Add,
            Operator::Minus => BinaryOperator::Subtract,
            Operator::Star => BinaryOperator::Multiply,
            Operator::Slash => BinaryOperator::Divide,
            Operator::Caret => BinaryOperator::Power,
            Operator::Ampersand => BinaryOperator::Concat,
            Operator::Equal => BinaryOperator::Equal,
            Operator::NotEqual => BinaryOperator::NotEqual,
            Operator::LessThan => BinaryOperator::LessThan,
            Operator::LessEqual => BinaryOperator::LessEqual,
            Operator::GreaterThan => BinaryOperator::GreaterThan,
            Operator::GreaterEqual => BinaryOperator::GreaterEqual,
        })
    }

    // === Expression parsing with precedence ===
    // Precedence (lowest to highest), all binary tiers left-associative:
    // 1. Comparison: =, <>, <, <=, >, >=
    // 2. Concatenation: &
    // 3. Addition/Subtraction: +, -
    // 4. Multiplication/Division: *, /
    // 5. Exponentiation: ^
    // 6. Unary prefix: -, +
    // 7. Primary: literals, parentheses, array literals

    fn parse_expression(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_comparison()
    }

    fn parse_comparison(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_tier(1, Self::parse_concatenation)
    }

    fn parse_concatenation(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_tier(2, Self::parse_additive)
    }

    fn parse_additive(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_tier(3, Self::parse_multiplicative)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_tier(4, Self::parse_exponent)
    }

    fn parse_exponent(&mut self) -> FormulaResult<FormulaExpr> {
        self.parse_tier(5, Self::parse_unary)
    }

    /// Left-associative loop over the operators of one precedence level
    fn parse_tier(
        &mut self,
        level: u8,
        operand: fn(&mut Self) -> FormulaResult<FormulaExpr>,
    ) -> FormulaResult<FormulaExpr> {
        let mut left = operand(self)?;

        while let Some(op) = self.current_binary().filter(|op| op.precedence() == level) {
            self.advance()?;
            let right = operand(self)?;
            left = FormulaExpr::binary(op, left, right);
        }

        Ok(left)
    }

    fn parse_unary(&mut self) -> FormulaResult<FormulaExpr> {
        let op = match self.current_kind() {
            Some(TokenKind::Operator(Operator::Minus)) => UnaryOperator::Negate,
            Some(TokenKind::Operator(Operator::Plus)) => UnaryOperator::Plus,
            _ => return self.parse_primary(),
        };

        let position = self.current.as_ref().map_or(0, |t| t.position);
        self.advance()?;
        let operand = self.nested(position, Self::parse_unary)?;
        Ok(FormulaExpr::unary(op, operand))
    }

    fn parse_primary(&mut self) -> FormulaResult<FormulaExpr> {
        let Some(token) = self.advance()? else {
            return Err(ParseError::UnexpectedEnd.into());
        };

        match token.kind {
            TokenKind::Number(n) => Ok(FormulaExpr::Literal(Value::Number(n))),
            TokenKind::String(s) => Ok(FormulaExpr::Literal(Value::string(s))),
            TokenKind::Boolean(b) => Ok(FormulaExpr::Literal(Value::Boolean(b))),
            TokenKind::Error(e) => Ok(FormulaExpr::Literal(Value::Error(e))),

            TokenKind::LeftParen => self.nested(token.position, |parser| {
                let expr = parser.parse_expression()?;
                parser.expect(&TokenKind::RightParen)?;
                Ok(FormulaExpr::Group(Box::new(expr)))
            }),

            TokenKind::LeftBrace => self.nested(token.position, Self::parse_array),

            _ => Err(unexpected(&token).into()),
        }
    }

    /// Parse the elements of an array literal; the opening brace is already consumed
    fn parse_array(&mut self) -> FormulaResult<FormulaExpr> {
        let mut elements = vec![self.parse_expression()?];

        loop {
            match &self.current {
                Some(token) => match token.kind {
                    TokenKind::Comma => {
                        self.advance()?;
                        elements.push(self.parse_expression()?);
                    }
                    TokenKind::RightBrace => {
                        self.advance()?;
                        return Ok(FormulaExpr::Array(elements));
                    }
                    _ => return Err(unexpected(token).into()),
                },
                None => return Err(ParseError::UnexpectedEnd.into()),
            }
        }
    }
}
