use std::rc::Rc;

use crate::environment::Environment;
use crate::object::{EvaluationError, NativeFn, NativeFunction, Object, ObjectKind};

fn expect_arguments(
    function: &'static str,
    args: &[Rc<Object>],
    expected: usize,
) -> Result<(), EvaluationError> {
    if args.len() != expected {
        return Err(EvaluationError::WrongArgumentCount {
            function,
            expected,
            actual: args.len(),
        });
    }
    Ok(())
}

fn expect_list<'a>(
    function: &'static str,
    object: &'a Rc<Object>,
) -> Result<&'a [Rc<Object>], EvaluationError> {
    match object.as_ref() {
        Object::List(list) => Ok(list),
        other => Err(EvaluationError::UnexpectedArgument {
            function,
            expected: ObjectKind::List,
            actual: other.kind(),
        }),
    }
}

fn expect_number(function: &'static str, object: &Rc<Object>) -> Result<f64, EvaluationError> {
    match object.as_ref() {
        Object::Number(value) => Ok(*value),
        other => Err(EvaluationError::UnexpectedArgument {
            function,
            expected: ObjectKind::Number,
            actual: other.kind(),
        }),
    }
}

fn element_at(
    function: &'static str,
    list: &[Rc<Object>],
    index: f64,
) -> Result<Rc<Object>, EvaluationError> {
    if index.fract() != 0.0 || index.is_nan() {
        return Err(EvaluationError::InvalidIndex { function, index });
    }
    if index < 0.0 || index >= list.len() as f64 {
        return Err(EvaluationError::IndexOutOfRange {
            function,
            index,
            length: list.len(),
        });
    }
    Ok(list[index as usize].clone())
}

fn builtin_typeof(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    match args {
        [] => Ok(Object::type_tag(ObjectKind::NativeFunction)),
        [object] => Ok(Object::type_tag(object.kind())),
        _ => Err(EvaluationError::WrongArgumentCount {
            function: "typeof",
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn builtin_typeof_s(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    match args {
        [] => Ok(Object::string(format!("<{}: typeofS>", ObjectKind::NativeFunction))),
        [object] => Ok(Object::string(object.type_string())),
        _ => Err(EvaluationError::WrongArgumentCount {
            function: "typeofS",
            expected: 1,
            actual: args.len(),
        }),
    }
}

fn builtin_inspect(
    args: &[Rc<Object>],
    environment: &Environment,
) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments("inspect", args, 0)?;
    Ok(Object::string(environment.to_string()))
}

fn builtin_len(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments("len", args, 1)?;
    let list = expect_list("len", &args[0])?;
    Ok(Object::number(list.len() as f64))
}

fn builtin_get(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments("get", args, 2)?;
    let list = expect_list("get", &args[0])?;
    let index = expect_number("get", &args[1])?;
    element_at("get", list, index)
}

fn builtin_head(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments("head", args, 1)?;
    let list = expect_list("head", &args[0])?;
    element_at("head", list, 0.0)
}

fn builtin_tail(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments("tail", args, 1)?;
    let list = expect_list("tail", &args[0])?;
    if list.is_empty() {
        return Err(EvaluationError::IndexOutOfRange {
            function: "tail",
            index: 1.0,
            length: 0,
        });
    }
    Ok(Object::list(list[1..].to_owned()))
}

fn apply_math(
    function: &'static str,
    args: &[Rc<Object>],
    operation: fn(f64) -> f64,
) -> Result<Rc<Object>, EvaluationError> {
    expect_arguments(function, args, 1)?;
    let value = expect_number(function, &args[0])?;
    Ok(Object::number(operation(value)))
}

fn builtin_sin(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("sin", args, f64::sin)
}

fn builtin_cos(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("cos", args, f64::cos)
}

fn builtin_ln(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("ln", args, f64::ln)
}

fn builtin_log2(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("log2", args, f64::log2)
}

fn builtin_log10(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("log10", args, f64::log10)
}

fn builtin_sqrt(args: &[Rc<Object>], _: &Environment) -> Result<Rc<Object>, EvaluationError> {
    apply_math("sqrt", args, f64::sqrt)
}

const BUILTINS: &[(&str, NativeFn, bool)] = &[
    ("typeof", builtin_typeof, true),
    ("typeofS", builtin_typeof_s, true),
    ("inspect", builtin_inspect, false),
    ("len", builtin_len, false),
    ("get", builtin_get, false),
    ("head", builtin_head, false),
    ("tail", builtin_tail, false),
    ("sin", builtin_sin, false),
    ("cos", builtin_cos, false),
    ("ln", builtin_ln, false),
    ("log2", builtin_log2, false),
    ("log10", builtin_log10, false),
    ("log", builtin_log10, false),
    ("sqrt", builtin_sqrt, false),
];

const PHI: f64 = 1.618_033_988_749_895;

const CONSTANTS: &[(&str, f64)] = &[
    ("e", std::f64::consts::E),
    ("pi", std::f64::consts::PI),
    ("phi", PHI),
];

pub(crate) fn register_builtins(environment: &mut Environment) {
    for &(name, func, receives_errors) in BUILTINS {
        environment.set(
            name.into(),
            Object::native_function(NativeFunction {
                name,
                func,
                receives_errors,
            }),
        );
    }
    for &(name, value) in CONSTANTS {
        environment.set(name.into(), Object::number(value));
    }
}
