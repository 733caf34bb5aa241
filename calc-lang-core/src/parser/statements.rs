use crate::ast::{AssignmentStatement, Identifier, Statement};
use crate::lexer::TokenKind;
use crate::parser::expressions::{parse_expression_from, Precedence};
use crate::parser::{ParseError, Parser};

/// `name = expression` when an identifier is directly followed by `=`,
/// otherwise an expression statement.
pub fn parse_statement(parser: &mut Parser) -> Result<Statement, ParseError> {
    let Some(token) = parser.iter.next() else {
        return Err(ParseError::premature_end_expected_expression());
    };

    if let TokenKind::Ident(name) = &token.kind {
        if parser
            .iter
            .next_if(|next| next.kind == TokenKind::Assign)
            .is_some()
        {
            let name = name.clone();
            return Ok(Statement::Assignment(parse_assignment_statement(
                parser, name,
            )?));
        }
    }

    Ok(Statement::Expression(parse_expression_from(
        parser,
        token,
        Precedence::Lowest,
    )?))
}

fn parse_assignment_statement(
    parser: &mut Parser,
    name: std::rc::Rc<str>,
) -> Result<AssignmentStatement, ParseError> {
    let value = crate::parser::expressions::parse_expression(parser, Precedence::Lowest)?;

    Ok(AssignmentStatement {
        identifier: Identifier { name },
        value,
    })
}
