pub mod error;
pub mod expressions;
pub mod statements;

use crate::lexer::{Token, TokenKind};
pub use error::ParseError;
use statements::parse_statement;

/// Deepest expression nesting the parser accepts before giving up on a
/// statement.
pub const MAX_NESTING_DEPTH: usize = 256;

pub struct Parser<'a> {
    pub iter: std::iter::Peekable<crate::lexer::Tokenizer<'a>>,
    errors: Vec<ParseError>,
    depth: usize,
}

impl<'a> Parser<'a> {
    pub fn new(tokenizer: crate::lexer::Tokenizer<'a>) -> Self {
        let iter = tokenizer.peekable();
        Self {
            iter,
            errors: Vec::new(),
            depth: 0,
        }
    }

    pub(crate) fn expect_token(&mut self, token_kind: TokenKind) -> Result<(), ParseError> {
        match self.iter.next_if(|token| token.kind == token_kind) {
            Some(_) => Ok(()),
            None => Err(ParseError::unexpected_token(
                token_kind,
                self.iter.peek().cloned(),
            )),
        }
    }

    pub(crate) fn enter_nesting(&mut self) -> Result<(), ParseError> {
        if self.depth >= MAX_NESTING_DEPTH {
            return Err(ParseError::NestingTooDeep(MAX_NESTING_DEPTH));
        }
        self.depth += 1;
        Ok(())
    }

    pub(crate) fn leave_nesting(&mut self) {
        self.unwind_nesting(1);
    }

    pub(crate) fn unwind_nesting(&mut self, levels: usize) {
        self.depth -= levels;
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn errors(&self) -> &[ParseError] {
        &self.errors
    }

    /// Parses every statement of the input.
    ///
    /// Never stops at the first error: a statement that fails to parse is
    /// left out of the returned program, its error is recorded, and parsing
    /// resumes after the next `;`. Check [`Parser::has_errors`] afterwards.
    pub fn parse_program(&mut self) -> crate::ast::Program {
        let mut statements = Vec::new();

        while let Some(token) = self.iter.peek() {
            if token.kind == TokenKind::SemiColon {
                self.iter.next();
                continue;
            }

            self.depth = 0;
            let parsed = parse_statement(self);
            let failed = parsed.is_err();
            match parsed {
                Ok(statement) => statements.push(statement),
                Err(err) => self.errors.push(err),
            }

            match self.iter.peek() {
                Some(Token {
                    kind: TokenKind::SemiColon,
                    ..
                }) => {
                    self.iter.next();
                }
                None => {}
                Some(token) => {
                    if !failed {
                        let error = match token.kind {
                            TokenKind::Illegal(_) => ParseError::IllegalToken(token.clone()),
                            _ => ParseError::UnexpectedToken {
                                expected: error::Expected::Token(TokenKind::SemiColon),
                                got: token.clone(),
                            },
                        };
                        self.errors.push(error);
                    }
                    for token in self.iter.by_ref() {
                        if token.kind == TokenKind::SemiColon {
                            break;
                        }
                    }
                }
            }
        }

        crate::ast::Program { statements }
    }
}

#[cfg(test)]
mod tests {
    use super::error::Expected;
    use super::{ParseError, Parser, MAX_NESTING_DEPTH};
    use crate::ast::{AssignmentStatement, Expression, Identifier, Program, Statement};
    use crate::lexer::{Token, TokenKind, Tokenizer};

    fn parse(input: &str) -> (Program, Vec<ParseError>) {
        let mut parser = Parser::new(Tokenizer::new(input));
        let program = parser.parse_program();
        (program, parser.errors().to_vec())
    }

    fn test_parsing(tests: Vec<(&str, &str)>) {
        for (input, expected) in tests {
            let (program, errors) = parse(input);

            assert!(errors.is_empty(), "{input}: {errors:?}");
            assert_eq!(program.to_string(), expected, "{input}")
        }
    }

    #[test]
    fn test_expression_1() {
        let tests = vec![
            ("-a * b", "((-a) * b);\n"),
            ("!-a", "(!(-a));\n"),
            ("a + b + c", "((a + b) + c);\n"),
            ("a + b - c", "((a + b) - c);\n"),
            ("a * b * c", "((a * b) * c);\n"),
            ("a * b / c", "((a * b) / c);\n"),
            ("a + b / c", "(a + (b / c));\n"),
            (
                "a + b * c + d / e - f",
                "(((a + (b * c)) + (d / e)) - f);\n",
            ),
            ("3 + 4; -5 * 5", "(3 + 4);\n((-5) * 5);\n"),
            ("!true == false", "((!true) == false);\n"),
            ("3 >= 5", "(3 >= 5);\n"),
            ("a + b == c", "((a + b) == c);\n"),
            ("a == b + c", "((a == b) + c);\n"),
            ("a < b && c", "((a < b) && c);\n"),
            ("a || b * c", "(a || (b * c));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_power_precedence() {
        let tests = vec![
            ("2 * 3 ^ 2", "(2 * (3 ^ 2));\n"),
            ("2 ^ 3 ^ 2", "((2 ^ 3) ^ 2);\n"),
            ("-2 ^ 2", "((-2) ^ 2);\n"),
            ("a ^ b / c", "((a ^ b) / c);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_expression_precedence() {
        let tests = vec![
            ("1 + (2 + 3) + 4", "((1 + (2 + 3)) + 4);\n"),
            ("(5 + 5) * 2", "((5 + 5) * 2);\n"),
            ("2 / (5 + 5)", "(2 / (5 + 5));\n"),
            ("-(5 + 5)", "(-(5 + 5));\n"),
            ("!(true == true)", "(!(true == true));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_call_expression() {
        let tests = vec![
            ("a + add(b * c) + d", "((a + add((b * c))) + d);\n"),
            (
                "add(a, b, 1, 2 * 3, 4 + 5, add(6, 7 * 8))",
                "add(a, b, 1, (2 * 3), (4 + 5), add(6, (7 * 8)));\n",
            ),
            (
                "add(a + b + c * d / f + g)",
                "add((((a + b) + ((c * d) / f)) + g));\n",
            ),
            ("inspect()", "inspect();\n"),
            ("-sin(pi)", "(-sin(pi));\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_list_literal() {
        let tests = vec![
            ("[]", "[];\n"),
            ("[1, 2 * 2, 3 + 3]", "[1, (2 * 2), (3 + 3)];\n"),
            ("len([true, [.5]])", "len([true, [0.5]]);\n"),
        ];

        test_parsing(tests)
    }

    #[test]
    fn test_assignment_statements() {
        let (program, errors) = parse("x = 15;\ny = 20;\nx123 = 99999;\nx= 0.5;");

        assert!(errors.is_empty());
        let names: Vec<&str> = program
            .statements
            .iter()
            .map(|statement| match statement {
                Statement::Assignment(assignment) => &*assignment.identifier.name,
                other => panic!("expected an assignment, got {other:?}"),
            })
            .collect();
        assert_eq!(names, vec!["x", "y", "x123", "x"]);
        assert_eq!(
            program.statements[3],
            Statement::Assignment(AssignmentStatement {
                identifier: Identifier { name: "x".into() },
                value: Expression::FloatLiteral(0.5),
            })
        );
    }

    #[test]
    fn test_identifier_without_assignment_is_an_expression() {
        test_parsing(vec![
            ("a == b", "(a == b);\n"),
            ("a; b = a", "a;\nb = a;\n"),
            ("ans;;", "ans;\n"),
        ])
    }

    #[test]
    fn test_canonical_form_is_stable() {
        let inputs = vec![
            "a + b * c + d / e - f",
            "x = -(1 + 2) ^ 3; get([1, true], 0)",
            "!(a == b) || c <= d && e",
            "f(g(1, [2, 3]), -.5)",
        ];

        for input in inputs {
            let (first, errors) = parse(input);
            assert!(errors.is_empty(), "{input}: {errors:?}");
            let rendered = first.to_string();
            let (second, errors) = parse(&rendered);
            assert!(errors.is_empty(), "{rendered}: {errors:?}");
            assert_eq!(second.to_string(), rendered);
        }
    }

    #[test]
    fn test_error_messages() {
        let (program, errors) = parse("x = 15;\ny =!= 20;\n");

        assert_eq!(errors.len(), 1);
        assert_eq!(
            errors[0],
            ParseError::NoPrefixFunction(Token {
                kind: TokenKind::NotEqual,
                start: 11,
                end: 13,
            })
        );
        assert_eq!(program.to_string(), "x = 15;\n");
    }

    #[test]
    fn test_errors_are_collected_across_statements() {
        let (program, errors) = parse("(1 + 2; 3 $ 4; 1.2.3; 5; * 2");

        assert_eq!(errors.len(), 4, "{errors:?}");
        assert_eq!(
            errors[0],
            ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::RParen),
                got: Token {
                    kind: TokenKind::SemiColon,
                    start: 6,
                    end: 7,
                },
            }
        );
        assert!(matches!(errors[1], ParseError::IllegalToken(_)));
        assert!(matches!(
            &errors[2],
            ParseError::InvalidFloat { literal, .. } if &**literal == "1.2.3"
        ));
        assert!(matches!(errors[3], ParseError::NoPrefixFunction(_)));
        assert_eq!(program.to_string(), "3;\n5;\n");
    }

    #[test]
    fn test_unclosed_groups() {
        let (_, errors) = parse("(1 + 2");
        assert_eq!(
            errors,
            vec![ParseError::PrematureEndOfInput {
                expected: Expected::Token(TokenKind::RParen),
            }]
        );

        let (_, errors) = parse("add(1, 2");
        assert_eq!(
            errors,
            vec![ParseError::PrematureEndOfInput {
                expected: Expected::Token(TokenKind::RParen),
            }]
        );

        let (_, errors) = parse("x =");
        assert_eq!(errors, vec![ParseError::premature_end_expected_expression()]);
    }

    #[test]
    fn test_missing_separator() {
        let (program, errors) = parse("1 2; 3");

        assert_eq!(
            errors,
            vec![ParseError::UnexpectedToken {
                expected: Expected::Token(TokenKind::SemiColon),
                got: Token {
                    kind: TokenKind::Float("2".into()),
                    start: 2,
                    end: 3,
                },
            }]
        );
        assert_eq!(program.to_string(), "1;\n3;\n");
    }

    #[test]
    fn test_nesting_limit() {
        let depth = MAX_NESTING_DEPTH * 4;
        let input = format!("{}1{}; 2", "(".repeat(depth), ")".repeat(depth));
        let (program, errors) = parse(&input);

        assert_eq!(
            errors,
            vec![ParseError::NestingTooDeep(MAX_NESTING_DEPTH)]
        );
        assert_eq!(program.to_string(), "2;\n");

        let input = format!("{}1", "-".repeat(MAX_NESTING_DEPTH - 1));
        let (_, errors) = parse(&input);
        assert!(errors.is_empty(), "{errors:?}");
    }

    #[test]
    fn test_long_chains_count_as_nesting() {
        let inputs = [
            format!("{}1; 2", "1+".repeat(100_000)),
            format!("len{}; 2", "()".repeat(10_000)),
            format!("{}2; 2", "2 ^ ".repeat(MAX_NESTING_DEPTH * 2)),
        ];

        for input in inputs {
            let (program, errors) = parse(&input);
            assert_eq!(
                errors,
                vec![ParseError::NestingTooDeep(MAX_NESTING_DEPTH)]
            );
            assert_eq!(program.to_string(), "2;\n");
        }

        let input = format!("{}1", "1 + ".repeat(MAX_NESTING_DEPTH / 2));
        let (program, errors) = parse(&input);
        assert!(errors.is_empty(), "{errors:?}");
        assert_eq!(program.statements.len(), 1);
    }
}
