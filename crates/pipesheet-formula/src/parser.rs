//! Formula parser
//!
//! A recursive descent parser with two left-associative binary levels and a
//! prefix minus that binds tighter than both:
//!
//! ```text
//! expr    := term (('+'|'-') term)*
//! term    := unary (('*'|'/') unary)*
//! unary   := '-' unary | primary
//! primary := NUMBER | CELLREF | '(' expr ')'
//! ```

use pipesheet_core::{CellAddress, ExprId, Location};

use crate::ast::{BinaryOperator, Expr, ExprArena, ExprKind};
use crate::error::{FormulaError, FormulaResult};
use crate::lexer::{Lexer, TokenKind};

/// Parse formula text (without the leading `=`) into `arena`
///
/// `origin` is the location of the first byte of `source`; every node
/// records the location of the token it came from.
///
/// # Example
/// ```rust
/// use std::sync::Arc;
/// use pipesheet_core::Location;
/// use pipesheet_formula::{parse_formula, ExprArena};
///
/// let mut arena = ExprArena::new();
/// let origin = Location::new(Arc::from("t.txt"), 1, 2);
/// let root = parse_formula("A1 + 2 * 3", origin, &mut arena).unwrap();
/// assert_eq!(arena.len(), 5);
/// # let _ = root;
/// ```
pub fn parse_formula(
    source: &str,
    origin: Location,
    arena: &mut ExprArena,
) -> FormulaResult<ExprId> {
    let mut parser = FormulaParser {
        lexer: Lexer::new(source, origin),
        arena,
    };
    let root = parser.parse_expression()?;

    // Make sure we consumed all input
    parser.lexer.expect_end()?;

    Ok(root)
}

/// Formula parser
struct FormulaParser<'a, 'b> {
    lexer: Lexer<'a>,
    arena: &'b mut ExprArena,
}

impl FormulaParser<'_, '_> {
    fn parse_expression(&mut self) -> FormulaResult<ExprId> {
        self.parse_additive()
    }

    fn parse_additive(&mut self) -> FormulaResult<ExprId> {
        let mut lhs = self.parse_multiplicative()?;

        loop {
            let token = self.lexer.peek_token()?;
            let op = match token.kind {
                TokenKind::Plus => BinaryOperator::Add,
                TokenKind::Minus => BinaryOperator::Subtract,
                _ => break,
            };

            self.lexer.next_token()?;
            let rhs = self.parse_multiplicative()?;
            lhs = self.arena.alloc(Expr::new(
                ExprKind::BinaryOp { op, lhs, rhs },
                token.location,
            ));
        }

        Ok(lhs)
    }

    fn parse_multiplicative(&mut self) -> FormulaResult<ExprId> {
        let mut lhs = self.parse_unary()?;

        loop {
            let token = self.lexer.peek_token()?;
            let op = match token.kind {
                TokenKind::Star => BinaryOperator::Multiply,
                TokenKind::Slash => BinaryOperator::Divide,
                _ => break,
            };

            self.lexer.next_token()?;
            let rhs = self.parse_unary()?;
            lhs = self.arena.alloc(Expr::new(
                ExprKind::BinaryOp { op, lhs, rhs },
                token.location,
            ));
        }

        Ok(lhs)
    }

    fn parse_unary(&mut self) -> FormulaResult<ExprId> {
        let token = self.lexer.peek_token()?;
        if token.kind == TokenKind::Minus {
            self.lexer.next_token()?;
            let operand = self.parse_unary()?;
            return Ok(self
                .arena
                .alloc(Expr::new(ExprKind::Negate { operand }, token.location)));
        }

        self.parse_primary()
    }

    fn parse_primary(&mut self) -> FormulaResult<ExprId> {
        let token = self.lexer.next_token()?;

        match token.kind {
            TokenKind::Eof => Err(FormulaError::UnexpectedEnd {
                location: token.location,
            }),

            TokenKind::LeftParen => {
                let expr = self.parse_expression()?;
                let close = self.lexer.next_token()?;
                if close.kind != TokenKind::RightParen {
                    return Err(FormulaError::UnclosedParen {
                        found: close.describe(),
                        location: close.location,
                    });
                }
                Ok(expr)
            }

            TokenKind::Name => {
                let kind = match token.text.parse::<f64>() {
                    Ok(n) => ExprKind::Number(n),
                    Err(_) => {
                        let address = CellAddress::parse(token.text).map_err(|e| {
                            FormulaError::InvalidReference {
                                location: token.location.clone(),
                                token: token.text.to_string(),
                                reason: e.to_string(),
                            }
                        })?;
                        ExprKind::CellRef(address)
                    }
                };
                Ok(self.arena.alloc(Expr::new(kind, token.location)))
            }

            _ => Err(FormulaError::UnexpectedToken {
                location: token.location,
                token: token.text.to_string(),
            }),
        }
    }
}
