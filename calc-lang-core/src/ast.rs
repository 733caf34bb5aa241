use std::fmt::Display;
use std::rc::Rc;

#[derive(Debug, PartialEq, Clone)]
pub enum Statement {
    Assignment(AssignmentStatement),
    Expression(Expression),
}

#[derive(Debug, PartialEq, Clone)]
pub struct AssignmentStatement {
    pub identifier: Identifier,
    pub value: Expression,
}

#[derive(Debug, PartialEq, Clone)]
pub enum Expression {
    Identifier(Identifier),
    FloatLiteral(f64),
    BooleanLiteral(bool),
    ListLiteral(Vec<Expression>),
    PrefixOperation(PrefixOperationKind, Box<Expression>),
    InfixOperation(InfixOperationKind, Box<Expression>, Box<Expression>),
    CallExpression {
        function: Box<Expression>,
        arguments: Vec<Expression>,
    },
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum InfixOperationKind {
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    Equal,
    NotEqual,
    LessThan,
    LessEqual,
    GreaterThan,
    GreaterEqual,
    And,
    Or,
}

#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum PrefixOperationKind {
    Minus,
    Bang,
}

#[derive(Debug, PartialEq, Clone)]
pub struct Identifier {
    pub name: Rc<str>,
}

#[derive(Debug, PartialEq, Clone, Default)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Display for AssignmentStatement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} = {};", self.identifier.name, self.value)
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Expression::*;
        match self {
            Identifier(ident) => write!(f, "{}", ident.name),
            FloatLiteral(val) => write!(f, "{}", val),
            BooleanLiteral(val) => write!(f, "{}", val),
            ListLiteral(list) => {
                write!(f, "[")?;
                for (i, expr) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", expr)?;
                }
                write!(f, "]")
            }
            PrefixOperation(kind, expr) => write!(f, "({}{})", kind, expr),
            InfixOperation(kind, left, right) => {
                write!(f, "({} {} {})", left, kind, right)
            }
            CallExpression {
                function,
                arguments,
            } => {
                write!(
                    f,
                    "{}({})",
                    function,
                    arguments
                        .iter()
                        .map(|arg| arg.to_string())
                        .collect::<Vec<String>>()
                        .join(", ")
                )
            }
        }
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        use Statement::*;
        match self {
            Assignment(statement) => write!(f, "{}", statement),
            Expression(expression) => write!(f, "{};", expression),
        }
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for statement in &self.statements {
            writeln!(f, "{}", statement)?;
        }
        Ok(())
    }
}

impl Display for PrefixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl Display for InfixOperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.to_str())
    }
}

impl PrefixOperationKind {
    fn to_str(self) -> &'static str {
        use PrefixOperationKind::*;
        match self {
            Minus => "-",
            Bang => "!",
        }
    }
}

impl InfixOperationKind {
    fn to_str(self) -> &'static str {
        use InfixOperationKind::*;
        match self {
            Plus => "+",
            Minus => "-",
            Multiply => "*",
            Divide => "/",
            Power => "^",
            Equal => "==",
            NotEqual => "!=",
            LessThan => "<",
            LessEqual => "<=",
            GreaterThan => ">",
            GreaterEqual => ">=",
            And => "&&",
            Or => "||",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ident(name: &str) -> Expression {
        Expression::Identifier(Identifier { name: name.into() })
    }

    #[test]
    fn test_program_display() {
        let program = Program {
            statements: vec![
                Statement::Assignment(AssignmentStatement {
                    identifier: Identifier { name: "x".into() },
                    value: Expression::InfixOperation(
                        InfixOperationKind::Power,
                        Box::new(Expression::FloatLiteral(2.0)),
                        Box::new(Expression::FloatLiteral(0.5)),
                    ),
                }),
                Statement::Expression(Expression::CallExpression {
                    function: Box::new(ident("get")),
                    arguments: vec![
                        Expression::ListLiteral(vec![
                            Expression::BooleanLiteral(true),
                            Expression::PrefixOperation(
                                PrefixOperationKind::Minus,
                                Box::new(ident("x")),
                            ),
                        ]),
                        Expression::FloatLiteral(1.0),
                    ],
                }),
            ],
        };

        assert_eq!(
            program.to_string(),
            "x = (2 ^ 0.5);\nget([true, (-x)], 1);\n"
        );
    }

    #[test]
    fn test_empty_list_and_call() {
        let call = Expression::CallExpression {
            function: Box::new(ident("inspect")),
            arguments: vec![],
        };

        assert_eq!(call.to_string(), "inspect()");
        assert_eq!(Expression::ListLiteral(vec![]).to_string(), "[]");
    }
}
