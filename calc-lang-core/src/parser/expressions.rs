use super::error::ParseError;
use crate::ast::{Expression, Identifier, InfixOperationKind, PrefixOperationKind};
use crate::lexer::{Token, TokenKind};
use crate::parser::Parser;

/// Binding power of infix tokens. Comparison and logical operators share the
/// `Sum` tier with `+` and `-`.
#[derive(PartialOrd, PartialEq, Debug, Clone, Copy)]
pub enum Precedence {
    Lowest = 0,
    Sum,
    Product,
    Power,
    Prefix,
    Call,
}

pub fn precedence_of(token: &TokenKind) -> Precedence {
    match token {
        TokenKind::Plus
        | TokenKind::Minus
        | TokenKind::Equal
        | TokenKind::NotEqual
        | TokenKind::LessThan
        | TokenKind::LessEqual
        | TokenKind::GreaterThan
        | TokenKind::GreaterEqual
        | TokenKind::And
        | TokenKind::Or => Precedence::Sum,
        TokenKind::Asterisk | TokenKind::Slash => Precedence::Product,
        TokenKind::Caret => Precedence::Power,
        TokenKind::LParen => Precedence::Call,
        _ => Precedence::Lowest,
    }
}

pub fn parse_expression(
    parser: &mut Parser,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    // leave the `;` in place so the statement boundary survives the error
    let Some(token) = parser.iter.next_if(|next| next.kind != TokenKind::SemiColon) else {
        return Err(match parser.iter.peek() {
            Some(token) => ParseError::NoPrefixFunction(token.clone()),
            None => ParseError::premature_end_expected_expression(),
        });
    };
    parse_expression_from(parser, token, precedence)
}

/// Pratt loop starting from an already consumed `token`.
pub fn parse_expression_from(
    parser: &mut Parser,
    token: Token,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    parser.enter_nesting()?;
    let result = parse_operations(parser, token, precedence);
    parser.leave_nesting();
    result
}

fn parse_operations(
    parser: &mut Parser,
    token: Token,
    precedence: Precedence,
) -> Result<Expression, ParseError> {
    let left_expression = prefix_parsing(token, parser)?;

    let mut folds = 0;
    let result = fold_infix_operations(parser, left_expression, precedence, &mut folds);
    parser.unwind_nesting(folds);
    result
}

/// Each fold wraps the left expression in a new node, so it counts as one
/// nesting level until the loop exits.
fn fold_infix_operations(
    parser: &mut Parser,
    mut left_expression: Expression,
    precedence: Precedence,
    folds: &mut usize,
) -> Result<Expression, ParseError> {
    loop {
        let Some(next_token) = parser.iter.peek() else {
            break;
        };

        let next_precedence = precedence_of(&next_token.kind);
        if precedence >= next_precedence {
            break;
        }

        let Some(infix_parse_function) = infix_parsing_function(&next_token.kind) else {
            break;
        };
        parser.enter_nesting()?;
        *folds += 1;
        parser.iter.next();
        left_expression = infix_parse_function(left_expression, parser)?;
    }

    Ok(left_expression)
}

fn prefix_operation(
    kind: PrefixOperationKind,
) -> impl FnOnce(&mut Parser) -> Result<Expression, ParseError> {
    move |parser| {
        Ok(Expression::PrefixOperation(
            kind,
            Box::new(parse_expression(parser, Precedence::Prefix)?),
        ))
    }
}

fn parse_grouped_expression(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expression = parse_expression(parser, Precedence::Lowest)?;
    parser.expect_token(TokenKind::RParen)?;

    Ok(expression)
}

fn parse_float_literal(literal: std::rc::Rc<str>) -> Result<Expression, ParseError> {
    match literal.parse() {
        Ok(value) => Ok(Expression::FloatLiteral(value)),
        Err(source) => Err(ParseError::InvalidFloat { literal, source }),
    }
}

fn parse_sequence<T>(
    parser: &mut Parser,
    parse_element: impl Fn(&mut Parser) -> Result<T, ParseError>,
    separator: TokenKind,
    terminator: TokenKind,
) -> Result<Vec<T>, ParseError> {
    let mut elements = Vec::new();

    if parser
        .iter
        .next_if(|next| next.kind == terminator)
        .is_some()
    {
        return Ok(elements);
    }

    loop {
        elements.push(parse_element(parser)?);

        match parser.iter.peek() {
            Some(next) if next.kind == separator => {
                parser.iter.next();
            }
            Some(next) if next.kind == terminator => {
                parser.iter.next();
                return Ok(elements);
            }
            next => return Err(ParseError::unexpected_token(terminator, next.cloned())),
        }
    }
}

fn parse_list_literal(parser: &mut Parser) -> Result<Expression, ParseError> {
    let expressions = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::Comma,
        TokenKind::RBracket,
    )?;
    Ok(Expression::ListLiteral(expressions))
}

pub fn prefix_parsing(token: Token, parser: &mut Parser) -> Result<Expression, ParseError> {
    match token.kind {
        TokenKind::Ident(name) => Ok(Expression::Identifier(Identifier { name })),
        TokenKind::Float(literal) => parse_float_literal(literal),
        TokenKind::True => Ok(Expression::BooleanLiteral(true)),
        TokenKind::False => Ok(Expression::BooleanLiteral(false)),
        TokenKind::Bang => prefix_operation(PrefixOperationKind::Bang)(parser),
        TokenKind::Minus => prefix_operation(PrefixOperationKind::Minus)(parser),
        TokenKind::LParen => parse_grouped_expression(parser),
        TokenKind::LBracket => parse_list_literal(parser),
        TokenKind::Illegal(_) => Err(ParseError::IllegalToken(token)),
        _ => Err(ParseError::NoPrefixFunction(token)),
    }
}

type InfixFunction = Box<dyn FnOnce(Expression, &mut Parser) -> Result<Expression, ParseError>>;

fn infix_operation(token: TokenKind, kind: InfixOperationKind) -> InfixFunction {
    Box::new(
        move |left: Expression, parser: &mut Parser| -> Result<Expression, ParseError> {
            let new_precedence = precedence_of(&token);

            Ok(Expression::InfixOperation(
                kind,
                Box::new(left),
                Box::new(parse_expression(parser, new_precedence)?),
            ))
        },
    )
}

fn parse_call_function(left: Expression, parser: &mut Parser) -> Result<Expression, ParseError> {
    let arguments = parse_sequence(
        parser,
        |parser| parse_expression(parser, Precedence::Lowest),
        TokenKind::Comma,
        TokenKind::RParen,
    )?;

    Ok(Expression::CallExpression {
        function: Box::new(left),
        arguments,
    })
}

pub fn infix_parsing_function(token: &TokenKind) -> Option<InfixFunction> {
    use InfixOperationKind as InfixKind;

    let kind = match token {
        TokenKind::Plus => InfixKind::Plus,
        TokenKind::Minus => InfixKind::Minus,
        TokenKind::Asterisk => InfixKind::Multiply,
        TokenKind::Slash => InfixKind::Divide,
        TokenKind::Caret => InfixKind::Power,
        TokenKind::Equal => InfixKind::Equal,
        TokenKind::NotEqual => InfixKind::NotEqual,
        TokenKind::LessThan => InfixKind::LessThan,
        TokenKind::LessEqual => InfixKind::LessEqual,
        TokenKind::GreaterThan => InfixKind::GreaterThan,
        TokenKind::GreaterEqual => InfixKind::GreaterEqual,
        TokenKind::And => InfixKind::And,
        TokenKind::Or => InfixKind::Or,
        TokenKind::LParen => return Some(Box::new(parse_call_function)),
        _ => return None,
    };
    Some(infix_operation(token.clone(), kind))
}
