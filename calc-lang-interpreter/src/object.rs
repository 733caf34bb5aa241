use std::fmt::Display;
use std::rc::Rc;

use crate::environment::Environment;
use calc_lang_core::ast;
use calc_lang_core::parser::ParseError;

use thiserror::Error;

#[derive(Debug, PartialEq, Clone)]
pub enum Object {
    Number(f64),
    Boolean(bool),
    String(String),
    List(Vec<Rc<Object>>),
    NativeFunction(NativeFunction),
    Type(ObjectKind),
    Error(EvaluationError),
    Null,
}

/// Runtime tag of an [`Object`], as reported by `typeof`.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum ObjectKind {
    Null,
    Number,
    Boolean,
    String,
    List,
    NativeFunction,
    Type,
    Error,
}

thread_local! {
    static NULL: Rc<Object> = Rc::new(Object::Null);
    static TRUE: Rc<Object> = Rc::new(Object::Boolean(true));
    static FALSE: Rc<Object> = Rc::new(Object::Boolean(false));
}

impl Object {
    pub fn null() -> Rc<Object> {
        NULL.with(|x| x.clone())
    }
    pub fn boolean(value: bool) -> Rc<Object> {
        if value {
            TRUE.with(|x| x.clone())
        } else {
            FALSE.with(|x| x.clone())
        }
    }
    pub fn number(value: f64) -> Rc<Object> {
        Rc::new(Object::Number(value))
    }
    pub fn string(value: String) -> Rc<Object> {
        Rc::new(Object::String(value))
    }
    pub fn list(list: Vec<Rc<Object>>) -> Rc<Object> {
        Rc::new(Object::List(list))
    }
    pub fn native_function(func: NativeFunction) -> Rc<Object> {
        Rc::new(Object::NativeFunction(func))
    }
    pub fn type_tag(kind: ObjectKind) -> Rc<Object> {
        Rc::new(Object::Type(kind))
    }
    pub fn error(error: EvaluationError) -> Rc<Object> {
        Rc::new(Object::Error(error))
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            Object::Number(_) => ObjectKind::Number,
            Object::Boolean(_) => ObjectKind::Boolean,
            Object::String(_) => ObjectKind::String,
            Object::List(_) => ObjectKind::List,
            Object::NativeFunction(_) => ObjectKind::NativeFunction,
            Object::Type(_) => ObjectKind::Type,
            Object::Error(_) => ObjectKind::Error,
            Object::Null => ObjectKind::Null,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, Object::Error(_))
    }

    /// Tagged form used by `typeofS`, e.g. `<Number: 5>` or `<Nil>`.
    pub fn type_string(&self) -> String {
        match self {
            Object::Null => self.kind().tagged(&[]),
            Object::NativeFunction(function) => self.kind().tagged(&[function.name]),
            Object::Type(kind) => self.kind().tagged(&[kind.name()]),
            object => self.kind().tagged(&[&object.to_string()]),
        }
    }
}

impl Display for Object {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Object::Number(value) => write!(f, "{}", value),
            Object::Boolean(true) => write!(f, "True"),
            Object::Boolean(false) => write!(f, "False"),
            Object::String(value) => write!(f, "{}", value),
            Object::List(list) => {
                write!(f, "[")?;
                for (i, object) in list.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", object)?;
                }
                write!(f, "]")
            }
            Object::NativeFunction(function) => write!(f, "<native-fn {}>", function.name),
            Object::Type(kind) => write!(f, "{}", kind),
            Object::Error(error) => write!(f, "{}", error),
            Object::Null => write!(f, "{}", ObjectKind::Null),
        }
    }
}

impl ObjectKind {
    pub fn name(self) -> &'static str {
        match self {
            ObjectKind::Null => "Nil",
            ObjectKind::Number => "Number",
            ObjectKind::Boolean => "Bool",
            ObjectKind::String => "Str",
            ObjectKind::List => "List",
            ObjectKind::NativeFunction => "NativeFn",
            ObjectKind::Type => "Type",
            ObjectKind::Error => "Err",
        }
    }

    fn tagged(self, params: &[&str]) -> String {
        if params.is_empty() {
            format!("<{}>", self)
        } else {
            format!("<{}: {}>", self, params.join(", "))
        }
    }
}

impl Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

pub type NativeFn = fn(&[Rc<Object>], &Environment) -> Result<Rc<Object>, EvaluationError>;

#[derive(Clone)]
pub struct NativeFunction {
    pub name: &'static str,
    pub func: NativeFn,
    /// Introspection functions are handed an argument's evaluation error as
    /// their only argument instead of having the error propagate.
    pub receives_errors: bool,
}

impl PartialEq for NativeFunction {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.func as usize == other.func as usize
    }
}

impl std::fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish()
    }
}

#[derive(Debug, PartialEq, Clone, Error)]
pub enum EvaluationError {
    #[error("Identifier not found {0}")]
    UnknownIdentifier(Rc<str>),
    #[error("Unknown operator {left} {operation} {right}")]
    UnknownInfixOperator {
        left: ObjectKind,
        operation: ast::InfixOperationKind,
        right: ObjectKind,
    },
    #[error("Unknown operator {operation}{right}")]
    UnknownPrefixOperator {
        operation: ast::PrefixOperationKind,
        right: ObjectKind,
    },
    #[error("Cannot divide by zero ({left} / {right})")]
    DivideByZero { left: Rc<Object>, right: Rc<Object> },
    #[error("{function} expects {expected} argument(s), got {actual}")]
    WrongArgumentCount {
        function: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("{function} can only be applied to {expected}. Got {actual}")]
    UnexpectedArgument {
        function: &'static str,
        expected: ObjectKind,
        actual: ObjectKind,
    },
    #[error("{function}: {index} is not a valid list index")]
    InvalidIndex { function: &'static str, index: f64 },
    #[error("{function}: index {index} out of range for list of length {length}")]
    IndexOutOfRange {
        function: &'static str,
        index: f64,
        length: usize,
    },
    #[error("Syntax error: {}", format_syntax_errors(.0))]
    SyntaxError(Vec<ParseError>),
}

fn format_syntax_errors(errors: &[ParseError]) -> String {
    errors
        .iter()
        .map(|error| format!("\n\t\t{}", error))
        .collect()
}
