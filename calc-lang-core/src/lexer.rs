use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum TokenKind {
    Eof,
    Illegal(Rc<str>),
    Ident(Rc<str>),
    Float(Rc<str>),

    // Operators
    Assign,
    Plus,
    Minus,
    Bang,
    Asterisk,
    Slash,
    Caret,

    Equal,
    NotEqual,

    GreaterThan,
    GreaterEqual,
    LessThan,
    LessEqual,

    And,
    Or,

    Comma,
    SemiColon,
    LParen,
    RParen,
    LBracket,
    RBracket,

    // Keywords
    True,
    False,
}

impl TokenKind {
    /// Source text of the token. Empty for `Eof`.
    pub fn literal(&self) -> &str {
        use TokenKind::*;
        match self {
            Eof => "",
            Illegal(text) | Ident(text) | Float(text) => text,
            Assign => "=",
            Plus => "+",
            Minus => "-",
            Bang => "!",
            Asterisk => "*",
            Slash => "/",
            Caret => "^",
            Equal => "==",
            NotEqual => "!=",
            GreaterThan => ">",
            GreaterEqual => ">=",
            LessThan => "<",
            LessEqual => "<=",
            And => "&&",
            Or => "||",
            Comma => ",",
            SemiColon => ";",
            LParen => "(",
            RParen => ")",
            LBracket => "[",
            RBracket => "]",
            True => "true",
            False => "false",
        }
    }
}

impl Display for TokenKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TokenKind::Eof => write!(f, "EOF"),
            kind => write!(f, "{}", kind.literal()),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Token {
    pub kind: TokenKind,
    pub start: usize,
    pub end: usize,
}

impl Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)
    }
}

fn keywords(ident: &str) -> Option<TokenKind> {
    match ident {
        "true" => Some(TokenKind::True),
        "false" => Some(TokenKind::False),
        _ => None,
    }
}

/// Pull-based tokenizer over a single line of source.
///
/// [`Tokenizer::next_token`] never runs dry: once the input is exhausted it
/// keeps handing out `Eof` tokens. The [`Iterator`] implementation stops at
/// the first `Eof` instead, which is what the parser consumes.
#[derive(Clone)]
pub struct Tokenizer<'a> {
    input: &'a str,
    iter: std::iter::Peekable<std::str::CharIndices<'a>>,
}

impl<'a> Tokenizer<'a> {
    pub fn new(input: &'a str) -> Self {
        let iter = input.char_indices().peekable();
        Self { input, iter }
    }

    fn is_letter(ch: char) -> bool {
        ch.is_ascii_alphabetic() || ch == '_'
    }

    fn is_number_part(ch: char) -> bool {
        ch.is_ascii_digit() || ch == '.'
    }

    fn read_identifier(&mut self, start: usize) -> Token {
        while self
            .iter
            .next_if(|(_, ch)| Self::is_letter(*ch) || ch.is_ascii_digit())
            .is_some()
        {}

        let end = self.next_idx();
        let ident = &self.input[start..end];
        Token {
            kind: keywords(ident).unwrap_or_else(|| TokenKind::Ident(ident.into())),
            start,
            end,
        }
    }

    fn read_number(&mut self, start: usize) -> Token {
        while self.iter.next_if(|(_, ch)| Self::is_number_part(*ch)).is_some() {}

        let end = self.next_idx();
        let number = &self.input[start..end];

        // `.5` is read as `0.5`; a bare `.` stays malformed
        let kind = if number.starts_with('.')
            && number[1..].starts_with(|ch: char| ch.is_ascii_digit())
        {
            TokenKind::Float(format!("0{number}").into())
        } else {
            TokenKind::Float(number.into())
        };

        Token { kind, start, end }
    }

    /// Builds a token for `single`, or for `double` when the next character
    /// is `second`.
    fn read_operator(
        &mut self,
        start: usize,
        second: char,
        double: TokenKind,
        single: TokenKind,
    ) -> Token {
        let kind = if self.iter.next_if(|(_, ch)| *ch == second).is_some() {
            double
        } else {
            single
        };
        Token {
            kind,
            start,
            end: self.next_idx(),
        }
    }

    fn single(&mut self, kind: TokenKind, start: usize) -> Token {
        Token {
            kind,
            start,
            end: self.next_idx(),
        }
    }

    fn next_idx(&mut self) -> usize {
        self.iter
            .peek()
            .map(|(idx, _)| *idx)
            .unwrap_or(self.input.len())
    }

    pub fn next_token(&mut self) -> Token {
        while self
            .iter
            .next_if(|(_, ch)| matches!(ch, ' ' | '\t' | '\r' | '\n'))
            .is_some()
        {}

        let Some((idx, ch)) = self.iter.next() else {
            return Token {
                kind: TokenKind::Eof,
                start: self.input.len(),
                end: self.input.len(),
            };
        };

        match ch {
            '=' => self.read_operator(idx, '=', TokenKind::Equal, TokenKind::Assign),
            '!' => self.read_operator(idx, '=', TokenKind::NotEqual, TokenKind::Bang),
            '<' => self.read_operator(idx, '=', TokenKind::LessEqual, TokenKind::LessThan),
            '>' => self.read_operator(idx, '=', TokenKind::GreaterEqual, TokenKind::GreaterThan),
            '&' => self.read_operator(idx, '&', TokenKind::And, TokenKind::Illegal("&".into())),
            '|' => self.read_operator(idx, '|', TokenKind::Or, TokenKind::Illegal("|".into())),
            '+' => self.single(TokenKind::Plus, idx),
            '-' => self.single(TokenKind::Minus, idx),
            '*' => self.single(TokenKind::Asterisk, idx),
            '/' => self.single(TokenKind::Slash, idx),
            '^' => self.single(TokenKind::Caret, idx),
            ',' => self.single(TokenKind::Comma, idx),
            ';' => self.single(TokenKind::SemiColon, idx),
            '(' => self.single(TokenKind::LParen, idx),
            ')' => self.single(TokenKind::RParen, idx),
            '[' => self.single(TokenKind::LBracket, idx),
            ']' => self.single(TokenKind::RBracket, idx),
            c if Tokenizer::is_letter(c) => self.read_identifier(idx),
            c if Tokenizer::is_number_part(c) => self.read_number(idx),
            _ => self.single(TokenKind::Illegal(ch.to_string().into()), idx),
        }
    }
}

impl<'a> Iterator for Tokenizer<'a> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        match self.next_token() {
            Token {
                kind: TokenKind::Eof,
                ..
            } => None,
            token => Some(token),
        }
    }
}
