pub mod error;
pub mod message;

pub mod prelude {
    pub use super::{
        error::*,
        message::*,
        evaluate,
        Runtime
    };
}


use std::rc::Rc;

use crate::{
    environment::prelude::{Binding, Closure, Environment, Scope, Value},
    lexer::prelude::{Node, NodeType},
    utils::prelude::{SourceWarning, SourceWarningEmitter, SrcSpan, Transcript}
};
use error::{eval_error, EvalError, EvalErrorType};
use message::{operation_name, perform, Message};

/// What the host lends to an evaluation: the transcript `printNl` writes to
/// and the sink for warnings.
pub struct Runtime {
    pub transcript: Transcript,
    pub warnings: SourceWarningEmitter,
}

impl Runtime {
    pub fn new(transcript: Transcript, warnings: SourceWarningEmitter) -> Self {
        Self { transcript, warnings }
    }

    pub fn null() -> Self {
        Self::new(Transcript::null(), SourceWarningEmitter::null())
    }
}

/// Evaluates a tree in `env`, or in a fresh top-level frame when none is
/// given. An absent tree evaluates to `Undefined`.
pub fn evaluate(
    node: Option<&Node>,
    env: Option<Scope>,
    runtime: &Runtime
) -> Result<Value, EvalError> {
    let env = env.unwrap_or_else(Environment::root);

    match node {
        Some(node) => eval_node(node, &env, runtime),
        None => Ok(Value::Undefined),
    }
}

fn eval_node(node: &Node, env: &Scope, runtime: &Runtime) -> Result<Value, EvalError> {
    match node.node_type {
        NodeType::Statements => node.children.iter()
            .try_fold(Value::Undefined, |_, statement| match statement {
                Some(statement) => eval_node(statement, env, runtime),
                None => Ok(Value::Undefined),
            }),
        NodeType::Expression => eval_expression(node, env, runtime),
        NodeType::Assignment => eval_assignment(node, env, runtime),
        NodeType::Return => eval_node(required(node.child(0), node.location)?, env, runtime),
        NodeType::Identifier => match env.borrow().get(node.text()) {
            Some(value) => Ok(value),
            None => eval_error(
                EvalErrorType::UndefinedVariable { name: node.text().to_string() },
                node.location
            ),
        },
        NodeType::String => Ok(Value::String { value: node.text().to_string() }),
        NodeType::Integer => match node.text().parse::<i64>() {
            Ok(value) => Ok(Value::Number { value: value as f64 }),
            Err(_) => eval_error(
                EvalErrorType::InvalidNumber { text: node.text().to_string() },
                node.location
            ),
        },
        NodeType::BlockClosure => Ok(Value::Closure(Rc::new(Closure::new(node, env.clone())))),
        node_type => eval_error(
            EvalErrorType::UnexpectedNode { node_type: Some(node_type) },
            node.location
        ),
    }
}

// The first message run is sent along the chain, remembering the receiver
// of its last message. Every cascaded run restarts from that remembered
// receiver, and the value of the last message sent is the result.
fn eval_expression(node: &Node, env: &Scope, runtime: &Runtime) -> Result<Value, EvalError> {
    let primary_node = required(node.child(0), node.location)?;

    let mut primary = eval_node(primary_node, env, runtime)?;
    if primary.is_undefined() {
        return eval_error(
            EvalErrorType::UnresolvedPrimary { primary: primary_node.describe() },
            primary_node.location
        );
    }

    let mut secondary = primary.clone();

    for (idx, messages) in node.children.iter().enumerate().skip(1) {
        let messages = match messages {
            Some(messages) if messages.is(NodeType::Messages) => messages,
            other => return eval_error(
                EvalErrorType::UnexpectedNode { node_type: other.as_ref().map(|n| n.node_type) },
                other.as_ref().map_or(node.location, |n| n.location)
            ),
        };

        if idx == 1 {
            for message in &messages.children {
                let result = send(&primary, required(message.as_ref(), messages.location)?, env, runtime)?;
                secondary = std::mem::replace(&mut primary, result);
            }
        } else {
            primary = secondary.clone();

            for message in &messages.children {
                primary = send(&primary, required(message.as_ref(), messages.location)?, env, runtime)?;
            }
        }
    }

    Ok(primary)
}

fn eval_assignment(node: &Node, env: &Scope, runtime: &Runtime) -> Result<Value, EvalError> {
    let target = required(node.child(0), node.location)?;
    let expression = required(node.child(1), node.location)?;

    let value = eval_node(expression, env, runtime)?;

    let binding = env.borrow_mut().set(target.text(), value.clone());
    if binding == Binding::Created && !env.borrow().is_root() {
        runtime.warnings.emit(SourceWarning::ImplicitDeclaration {
            name: target.text().to_string(),
            location: target.location,
        });
    }

    Ok(value)
}

// The receiver must understand the selector before any argument is
// evaluated.
fn send(receiver: &Value, message: &Node, env: &Scope, runtime: &Runtime) -> Result<Value, EvalError> {
    if !matches!(message.node_type, NodeType::Identifier | NodeType::Binary | NodeType::Keyword) {
        return eval_error(
            EvalErrorType::UnexpectedNode { node_type: Some(message.node_type) },
            message.location
        );
    }

    let selector = message.text();
    let operation = operation_name(selector);

    if !receiver.responds_to(&operation) {
        return eval_error(
            EvalErrorType::NoSuchOperation {
                selector: selector.to_string(),
                operation,
                receiver: receiver._type(),
            },
            message.location
        );
    }

    let arguments = message.children.iter()
        .map(|argument| eval_node(required(argument.as_ref(), message.location)?, env, runtime))
        .collect::<Result<Vec<Value>, EvalError>>()?;

    perform(receiver, Message {
        selector,
        operation,
        arguments,
        location: message.location,
    }, runtime)
}

fn required(node: Option<&Node>, location: SrcSpan) -> Result<&Node, EvalError> {
    match node {
        Some(node) => Ok(node),
        None => eval_error(EvalErrorType::UnexpectedNode { node_type: None }, location),
    }
}
