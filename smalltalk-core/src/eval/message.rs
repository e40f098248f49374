use crate::{
    environment::prelude::{Closure, Environment, Value, ValueType},
    utils::prelude::SrcSpan
};
use super::{
    error::{eval_error, EvalError, EvalErrorType},
    evaluate, Runtime
};

/// Maps a selector to the name of the operation it invokes.
pub fn operation_name(selector: &str) -> String {
    let operation = match selector {
        "+" => "add",
        "-" => "subtract",
        "*" => "multiply",
        "/" => "divide",
        "," => "concat",
        _ => return selector.replace(':', "_"),
    };

    operation.to_string()
}

/// A message with its arguments already evaluated.
pub struct Message<'a> {
    pub selector: &'a str,
    pub operation: String,
    pub arguments: Vec<Value>,
    pub location: SrcSpan,
}

impl<'a> Message<'a> {
    fn no_such_operation<T>(&self, receiver: &Value) -> Result<T, EvalError> {
        eval_error(
            EvalErrorType::NoSuchOperation {
                selector: self.selector.to_string(),
                operation: self.operation.clone(),
                receiver: receiver._type(),
            },
            self.location
        )
    }

    fn arity(&self, expected: usize) -> Result<(), EvalError> {
        if self.arguments.len() == expected {
            return Ok(());
        }

        eval_error(
            EvalErrorType::ArgumentCount { expected, got: self.arguments.len() },
            self.location
        )
    }

    fn argument_type<T>(&self, expected: ValueType, got: &Value) -> Result<T, EvalError> {
        eval_error(
            EvalErrorType::ArgumentType {
                selector: self.selector.to_string(),
                expected,
                got: got._type(),
            },
            self.location
        )
    }

    fn number_argument(&self) -> Result<f64, EvalError> {
        self.arity(1)?;

        match &self.arguments[0] {
            Value::Number { value } => Ok(*value),
            other => self.argument_type(ValueType::Number, other),
        }
    }
}

pub fn perform(receiver: &Value, message: Message, runtime: &Runtime) -> Result<Value, EvalError> {
    match receiver {
        Value::String { value } => perform_string(receiver, value, message, runtime),
        Value::Number { value } => perform_number(receiver, *value, message, runtime),
        Value::Closure(closure) => perform_closure(receiver, closure, message, runtime),
        Value::Undefined => message.no_such_operation(receiver),
    }
}

fn perform_string(
    receiver: &Value,
    value: &str,
    message: Message,
    runtime: &Runtime
) -> Result<Value, EvalError> {
    match message.operation.as_str() {
        "concat" => {
            message.arity(1)?;

            match &message.arguments[0] {
                Value::String { value: other } => Ok(Value::String {
                    value: format!("{value}{other}")
                }),
                other => message.argument_type(ValueType::String, other),
            }
        },
        "printNl" | "displayNl" => {
            message.arity(0)?;
            runtime.transcript.show(value);

            Ok(receiver.clone())
        },
        "printString" => {
            message.arity(0)?;

            Ok(Value::String { value: receiver.print_string() })
        },
        "size" => {
            message.arity(0)?;

            Ok(Value::Number { value: value.chars().count() as f64 })
        },
        _ => message.no_such_operation(receiver),
    }
}

fn perform_number(
    receiver: &Value,
    value: f64,
    message: Message,
    runtime: &Runtime
) -> Result<Value, EvalError> {
    let result = match message.operation.as_str() {
        "add" => value + message.number_argument()?,
        "subtract" => value - message.number_argument()?,
        "multiply" => value * message.number_argument()?,
        "divide" => value / message.number_argument()?,
        "negated" => {
            message.arity(0)?;
            -value
        },
        "printNl" | "displayNl" => {
            message.arity(0)?;
            runtime.transcript.show(&receiver.to_string());

            return Ok(receiver.clone());
        },
        "printString" => {
            message.arity(0)?;

            return Ok(Value::String { value: receiver.print_string() });
        },
        _ => return message.no_such_operation(receiver),
    };

    Ok(Value::Number { value: result })
}

fn perform_closure(
    receiver: &Value,
    closure: &Closure,
    message: Message,
    runtime: &Runtime
) -> Result<Value, EvalError> {
    match message.operation.as_str() {
        "value" | "value_" | "value_value_" | "value_value_value_" | "valueWithArguments_" => {
            call(closure, message.arguments, message.location, runtime)
        },
        "numArgs" => {
            message.arity(0)?;

            Ok(Value::Number { value: closure.arity() as f64 })
        },
        _ => message.no_such_operation(receiver),
    }
}

/// Runs the block body in a fresh frame whose parent is the captured one.
/// Temporaries start out undefined, arguments are bound by position.
pub fn call(
    closure: &Closure,
    arguments: Vec<Value>,
    location: SrcSpan,
    runtime: &Runtime
) -> Result<Value, EvalError> {
    if arguments.len() != closure.arity() {
        return eval_error(
            EvalErrorType::ArgumentCount { expected: closure.arity(), got: arguments.len() },
            location
        );
    }

    let frame = Environment::child(&closure.scope);

    {
        let mut env = frame.borrow_mut();

        for name in &closure.temporaries {
            env.init(name.as_str(), Value::Undefined);
        }

        for (name, value) in closure.arguments.iter().zip(arguments) {
            env.init(name.as_str(), value);
        }
    }

    evaluate(closure.body.as_ref(), Some(frame), runtime)
}
