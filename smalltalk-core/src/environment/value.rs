use std::{fmt::Display, rc::Rc};

use crate::{
    lexer::prelude::{Node, NodeType},
    utils::prelude::SrcSpan
};
use super::environment::Scope;

const STRING_OPERATIONS: &[&str] = &[
    "concat", "printNl", "displayNl", "printString", "size",
];

const NUMBER_OPERATIONS: &[&str] = &[
    "add", "subtract", "multiply", "divide",
    "printNl", "displayNl", "printString", "negated",
];

const CLOSURE_OPERATIONS: &[&str] = &[
    "value", "value_", "value_value_", "value_value_value_",
    "valueWithArguments_", "numArgs",
];

#[derive(Debug, Clone, Default)]
pub enum Value {
    #[default]
    Undefined,
    String {
        value: String,
    },
    Number {
        value: f64,
    },
    Closure(Rc<Closure>),
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Undefined, Value::Undefined) => true,
            (Value::String { value: a }, Value::String { value: b }) => a == b,
            (Value::Number { value: a }, Value::Number { value: b }) => a == b,
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Undefined => write!(f, "nil"),
            Value::String { value } => write!(f, "{value}"),
            Value::Number { value } => write!(f, "{value}"),
            Value::Closure(_) => write!(f, "a BlockClosure"),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String { value: value.to_string() }
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Number { value }
    }
}

impl Value {
    pub fn _type(&self) -> ValueType {
        match self {
            Self::Undefined => ValueType::Undefined,
            Self::String { .. } => ValueType::String,
            Self::Number { .. } => ValueType::Number,
            Self::Closure(_) => ValueType::Closure,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Value::Undefined)
    }

    /// Printed form: strings are quoted, with inner ticks doubled.
    pub fn print_string(&self) -> String {
        match self {
            Value::String { value } => format!("'{}'", value.replace('\'', "''")),
            value => value.to_string(),
        }
    }

    pub fn responds_to(&self, operation: &str) -> bool {
        let operations = match self {
            Value::Undefined => return false,
            Value::String { .. } => STRING_OPERATIONS,
            Value::Number { .. } => NUMBER_OPERATIONS,
            Value::Closure(_) => CLOSURE_OPERATIONS,
        };

        operations.contains(&operation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    Undefined,
    String,
    Number,
    Closure,
}

impl ValueType {
    pub fn as_literal(&self) -> &'static str {
        match self {
            ValueType::Undefined => "nil",
            ValueType::String => "String",
            ValueType::Number => "Number",
            ValueType::Closure => "BlockClosure",
        }
    }
}

impl Display for ValueType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_literal())
    }
}

/// A block value. The defining frame is captured when the block is
/// evaluated, not when it is called.
pub struct Closure {
    pub arguments: Vec<String>,
    pub temporaries: Vec<String>,
    pub body: Option<Node>,
    pub scope: Scope,
    pub location: SrcSpan,
}

impl Closure {
    pub fn new(node: &Node, scope: Scope) -> Self {
        let mut arguments = vec![];
        let mut temporaries = vec![];
        let mut body = None;

        for child in node.children.iter().flatten() {
            match child.node_type {
                NodeType::BlockArguments => arguments = names(child),
                NodeType::Temporaries => temporaries = names(child),
                _ => body = Some(child.clone()),
            }
        }

        Self {
            arguments,
            temporaries,
            body,
            scope,
            location: node.location,
        }
    }

    pub fn arity(&self) -> usize {
        self.arguments.len()
    }
}

fn names(node: &Node) -> Vec<String> {
    node.children.iter()
        .flatten()
        .map(|name| name.text().to_string())
        .collect()
}

impl std::fmt::Debug for Closure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Closure")
            .field("arguments", &self.arguments)
            .field("temporaries", &self.temporaries)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
