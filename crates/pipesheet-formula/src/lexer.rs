//! Formula lexer
//!
//! Splits the text after a cell's `=` into operator, parenthesis and name
//! tokens. Names are maximal runs of ASCII letters, digits and underscores;
//! whether a name is a number or a cell reference is decided by the parser.

use pipesheet_core::Location;

use crate::error::{FormulaError, FormulaResult};

/// Token types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Plus,
    Minus,
    Star,
    Slash,
    LeftParen,
    RightParen,
    /// Run of letters, digits and underscores
    Name,
    /// End of input (empty text)
    Eof,
}

/// A token borrowed from the formula text
#[derive(Debug, Clone, PartialEq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub location: Location,
}

impl Token<'_> {
    /// Human-readable description for error messages
    pub fn describe(&self) -> String {
        match self.kind {
            TokenKind::Eof => "end of input".to_string(),
            _ => format!("`{}`", self.text),
        }
    }
}

fn is_name(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Cursor over one formula
pub struct Lexer<'a> {
    source: &'a str,
    pos: usize,
    /// Location of the first byte of `source`
    origin: Location,
}

impl<'a> Lexer<'a> {
    /// Create a lexer over `source`, whose first byte sits at `origin`
    pub fn new(source: &'a str, origin: Location) -> Self {
        Self {
            source,
            pos: 0,
            origin,
        }
    }

    /// Location of the cursor
    pub fn location(&self) -> Location {
        self.origin.advanced(self.pos)
    }

    fn skip_whitespace(&mut self) {
        let rest = &self.source[self.pos..];
        self.pos += rest.len() - rest.trim_start().len();
    }

    /// Return the next token without consuming it
    pub fn peek_token(&mut self) -> FormulaResult<Token<'a>> {
        self.skip_whitespace();

        let location = self.location();
        let rest = &self.source[self.pos..];

        let Some(c) = rest.chars().next() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: "",
                location,
            });
        };

        let kind = match c {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            c if is_name(c) => {
                let end = rest.find(|c: char| !is_name(c)).unwrap_or(rest.len());
                return Ok(Token {
                    kind: TokenKind::Name,
                    text: &rest[..end],
                    location,
                });
            }
            character => {
                return Err(FormulaError::UnknownToken {
                    location,
                    character,
                })
            }
        };

        Ok(Token {
            kind,
            text: &rest[..1],
            location,
        })
    }

    /// Consume and return the next token
    pub fn next_token(&mut self) -> FormulaResult<Token<'a>> {
        let token = self.peek_token()?;
        self.pos += token.text.len();
        Ok(token)
    }

    /// Fail unless the whole input has been consumed
    pub fn expect_end(&mut self) -> FormulaResult<()> {
        let token = self.next_token()?;
        match token.kind {
            TokenKind::Eof => Ok(()),
            _ => Err(FormulaError::UnexpectedToken {
                location: token.location,
                token: token.text.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn lex(source: &str) -> Lexer<'_> {
        Lexer::new(source, Location::new(Arc::from("f"), 1, 10))
    }

    fn kinds(source: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = lex(source);
        let mut out = Vec::new();
        loop {
            let token = lexer.next_token().unwrap();
            if token.kind == TokenKind::Eof {
                break;
            }
            out.push((token.kind, token.text.to_string()));
        }
        out
    }

    #[test]
    fn test_operators_and_names() {
        assert_eq!(
            kinds("A1 + 2*(B3-x_1)/ 4"),
            vec![
                (TokenKind::Name, "A1".into()),
                (TokenKind::Plus, "+".into()),
                (TokenKind::Name, "2".into()),
                (TokenKind::Star, "*".into()),
                (TokenKind::LeftParen, "(".into()),
                (TokenKind::Name, "B3".into()),
                (TokenKind::Minus, "-".into()),
                (TokenKind::Name, "x_1".into()),
                (TokenKind::RightParen, ")".into()),
                (TokenKind::Slash, "/".into()),
                (TokenKind::Name, "4".into()),
            ]
        );
    }

    #[test]
    fn test_peek_does_not_consume() {
        let mut lexer = lex("  42");
        let peeked = lexer.peek_token().unwrap();
        let next = lexer.next_token().unwrap();
        assert_eq!(peeked, next);
        assert_eq!(next.text, "42");
        assert_eq!(next.location.col, 12);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_eof_is_empty_and_repeats() {
        let mut lexer = lex("   ");
        for _ in 0..2 {
            let token = lexer.next_token().unwrap();
            assert_eq!(token.kind, TokenKind::Eof);
            assert!(token.text.is_empty());
        }
    }

    #[test]
    fn test_unknown_character() {
        let mut lexer = lex("1 . 5");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert_eq!(
            err,
            FormulaError::UnknownToken {
                location: Location::new(Arc::from("f"), 1, 12),
                character: '.',
            }
        );
    }

    #[test]
    fn test_expect_end() {
        let mut lexer = lex("");
        assert!(lexer.expect_end().is_ok());

        let mut lexer = lex(" )");
        assert!(matches!(
            lexer.expect_end(),
            Err(FormulaError::UnexpectedToken { ref token, .. }) if token == ")"
        ));
    }
}
