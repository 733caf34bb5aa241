use std::rc::Rc;

use crate::environment::Environment;
use crate::object::{EvaluationError, NativeFunction, Object};
use calc_lang_core::ast;
use calc_lang_core::ast::Expression;
use calc_lang_core::lexer::Tokenizer;
use calc_lang_core::parser::Parser;

/// Name bound to the result of the last successful evaluation.
pub const ANS: &str = "ans";

/// An interactive session: one environment, evaluated one line at a time.
pub struct Evaluator {
    environment: Environment,
}

impl Evaluator {
    pub fn new() -> Self {
        Self {
            environment: Environment::with_builtins(),
        }
    }

    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// Tokenizes, parses and evaluates `line`.
    ///
    /// Failures come back as an [`Object::Error`]; syntax errors are folded
    /// into a single one. A line that only assigns produces [`Object::Null`].
    /// `ans` is rebound whenever a value (not an error) is produced.
    pub fn evaluate(&mut self, line: &str) -> Rc<Object> {
        let mut parser = Parser::new(Tokenizer::new(line));
        let program = parser.parse_program();
        if parser.has_errors() {
            return Object::error(EvaluationError::SyntaxError(parser.errors().to_vec()));
        }

        match eval_program(&program, &mut self.environment) {
            Ok(Some(value)) => {
                self.environment.set(ANS.into(), value.clone());
                value
            }
            Ok(None) => Object::null(),
            Err(error) => Object::error(error),
        }
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates statements in order. The result is the value of the last
/// statement, or `None` when that statement is an assignment. The first
/// error stops evaluation.
pub fn eval_program(
    program: &ast::Program,
    environment: &mut Environment,
) -> Result<Option<Rc<Object>>, EvaluationError> {
    let mut output = None;
    for statement in &program.statements {
        output = eval_statement(statement, environment)?;
    }
    Ok(output)
}

fn eval_statement(
    statement: &ast::Statement,
    environment: &mut Environment,
) -> Result<Option<Rc<Object>>, EvaluationError> {
    match statement {
        ast::Statement::Expression(expression) => {
            eval_expression(expression, environment).map(Some)
        }
        ast::Statement::Assignment(statement) => {
            eval_assignment_statement(statement, environment)?;
            Ok(None)
        }
    }
}

fn eval_assignment_statement(
    statement: &ast::AssignmentStatement,
    environment: &mut Environment,
) -> Result<(), EvaluationError> {
    let value = eval_expression(&statement.value, environment)?;
    environment.set(statement.identifier.name.clone(), value);
    Ok(())
}

fn eval_identifier(
    identifier: &ast::Identifier,
    environment: &Environment,
) -> Result<Rc<Object>, EvaluationError> {
    environment
        .get(&identifier.name)
        .ok_or_else(|| EvaluationError::UnknownIdentifier(identifier.name.clone()))
}

fn eval_expression(
    expression: &Expression,
    environment: &mut Environment,
) -> Result<Rc<Object>, EvaluationError> {
    match expression {
        Expression::FloatLiteral(value) => Ok(Object::number(*value)),
        Expression::BooleanLiteral(value) => Ok(Object::boolean(*value)),
        Expression::ListLiteral(list) => Ok(Object::list(eval_expressions(list, environment)?)),
        Expression::Identifier(identifier) => eval_identifier(identifier, environment),
        Expression::PrefixOperation(kind, expression) => {
            let right = eval_expression(expression, environment)?;
            eval_prefix_operation(*kind, right)
        }
        Expression::InfixOperation(kind, left, right) => {
            // right operand first
            let right = eval_expression(right, environment)?;
            let left = eval_expression(left, environment)?;
            eval_infix_operation(*kind, left, right)
        }
        Expression::CallExpression {
            function,
            arguments,
        } => {
            let callee = eval_expression(function, environment)?;
            if let Object::NativeFunction(function) = callee.as_ref() {
                return eval_call_native_function(function, arguments, environment);
            }
            // calling anything else yields the callee itself
            Ok(callee)
        }
    }
}

fn eval_call_native_function(
    function: &NativeFunction,
    arguments: &[Expression],
    environment: &mut Environment,
) -> Result<Rc<Object>, EvaluationError> {
    let arguments = match eval_expressions(arguments, environment) {
        Ok(arguments) => arguments,
        Err(error) if function.receives_errors && arguments.len() == 1 => {
            vec![Object::error(error)]
        }
        Err(error) => return Err(error),
    };
    (function.func)(&arguments, environment)
}

fn eval_expressions(
    expressions: &[Expression],
    environment: &mut Environment,
) -> Result<Vec<Rc<Object>>, EvaluationError> {
    let mut result = Vec::with_capacity(expressions.len());
    for expression in expressions {
        result.push(eval_expression(expression, environment)?);
    }
    Ok(result)
}

fn eval_prefix_operation(
    kind: ast::PrefixOperationKind,
    right: Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    match (kind, right.as_ref()) {
        (ast::PrefixOperationKind::Bang, Object::Boolean(value)) => Ok(Object::boolean(!value)),
        (ast::PrefixOperationKind::Minus, Object::Number(value)) => Ok(Object::number(-value)),
        _ => Err(EvaluationError::UnknownPrefixOperator {
            operation: kind,
            right: right.kind(),
        }),
    }
}

fn eval_infix_operation(
    kind: ast::InfixOperationKind,
    left: Rc<Object>,
    right: Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    match (left.as_ref(), right.as_ref()) {
        (Object::Number(x), Object::Number(y)) => {
            eval_number_infix_operation(kind, *x, *y, &left, &right)
        }
        (Object::Boolean(x), Object::Boolean(y)) => {
            eval_boolean_infix_operation(kind, *x, *y, &left, &right)
        }
        _ => Err(unknown_infix_operator(kind, &left, &right)),
    }
}

fn unknown_infix_operator(
    kind: ast::InfixOperationKind,
    left: &Rc<Object>,
    right: &Rc<Object>,
) -> EvaluationError {
    EvaluationError::UnknownInfixOperator {
        left: left.kind(),
        operation: kind,
        right: right.kind(),
    }
}

fn eval_number_infix_operation(
    kind: ast::InfixOperationKind,
    x: f64,
    y: f64,
    left: &Rc<Object>,
    right: &Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    use ast::InfixOperationKind::*;
    match kind {
        Plus => Ok(Object::number(x + y)),
        Minus => Ok(Object::number(x - y)),
        Multiply => Ok(Object::number(x * y)),
        Divide if y == 0.0 => Err(EvaluationError::DivideByZero {
            left: left.clone(),
            right: right.clone(),
        }),
        Divide => Ok(Object::number(x / y)),
        Power => Ok(Object::number(x.powf(y))),
        Equal => Ok(Object::boolean(x == y)),
        NotEqual => Ok(Object::boolean(x != y)),
        LessThan => Ok(Object::boolean(x < y)),
        LessEqual => Ok(Object::boolean(x <= y)),
        GreaterThan => Ok(Object::boolean(x > y)),
        GreaterEqual => Ok(Object::boolean(x >= y)),
        And | Or => Err(unknown_infix_operator(kind, left, right)),
    }
}

fn eval_boolean_infix_operation(
    kind: ast::InfixOperationKind,
    x: bool,
    y: bool,
    left: &Rc<Object>,
    right: &Rc<Object>,
) -> Result<Rc<Object>, EvaluationError> {
    use ast::InfixOperationKind::*;
    match kind {
        Equal => Ok(Object::boolean(x == y)),
        NotEqual => Ok(Object::boolean(x != y)),
        And => Ok(Object::boolean(x && y)),
        Or => Ok(Object::boolean(x || y)),
        _ => Err(unknown_infix_operator(kind, left, right)),
    }
}
