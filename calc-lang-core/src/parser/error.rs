use std::fmt::Display;

use crate::lexer::{Token, TokenKind};

use thiserror::Error;

#[derive(Debug, PartialEq, Clone, Error)]
pub enum ParseError {
    #[error("expected {expected}, got end of input")]
    PrematureEndOfInput { expected: Expected },
    #[error("expected {expected}, got `{got}` instead")]
    UnexpectedToken { expected: Expected, got: Token },
    #[error("could not parse value \"{literal}\" as float")]
    InvalidFloat {
        literal: std::rc::Rc<str>,
        source: std::num::ParseFloatError,
    },
    #[error("no prefix parse function for `{0}` found")]
    NoPrefixFunction(Token),
    #[error("illegal character `{0}`")]
    IllegalToken(Token),
    #[error("expression nesting exceeds {0} levels")]
    NestingTooDeep(usize),
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expected {
    Token(TokenKind),
    Expression,
}

impl Display for Expected {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Expected::Token(kind) => write!(f, "token `{}`", kind),
            Expected::Expression => write!(f, "expression"),
        }
    }
}

impl ParseError {
    pub fn premature_end_expected_expression() -> Self {
        ParseError::PrematureEndOfInput {
            expected: Expected::Expression,
        }
    }

    pub fn unexpected_token(expected: TokenKind, got: Option<Token>) -> ParseError {
        match got {
            Some(got) => ParseError::UnexpectedToken {
                expected: Expected::Token(expected),
                got,
            },
            None => ParseError::PrematureEndOfInput {
                expected: Expected::Token(expected),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::ParseError;
    use crate::lexer::{Token, TokenKind};

    #[test]
    fn test_messages() {
        let token = |kind| Token {
            kind,
            start: 3,
            end: 4,
        };

        assert_eq!(
            ParseError::unexpected_token(TokenKind::RParen, None).to_string(),
            "expected token `)`, got end of input"
        );
        assert_eq!(
            ParseError::unexpected_token(TokenKind::RParen, Some(token(TokenKind::Comma)))
                .to_string(),
            "expected token `)`, got `,` instead"
        );
        assert_eq!(
            ParseError::NoPrefixFunction(token(TokenKind::NotEqual)).to_string(),
            "no prefix parse function for `!=` found"
        );
        assert_eq!(
            ParseError::IllegalToken(token(TokenKind::Illegal("$".into()))).to_string(),
            "illegal character `$`"
        );
        assert_eq!(
            ParseError::premature_end_expected_expression().to_string(),
            "expected expression, got end of input"
        );
    }
}
