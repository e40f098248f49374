use crate::{
    environment::prelude::ValueType,
    lexer::prelude::NodeType,
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq)]
pub enum EvalErrorType {
    UndefinedVariable {
        name: String,
    },
    NoSuchOperation {
        selector: String,
        operation: String,
        receiver: ValueType,
    },
    ArgumentType {
        selector: String,
        expected: ValueType,
        got: ValueType,
    },
    ArgumentCount {
        expected: usize,
        got: usize,
    },
    UnresolvedPrimary {
        primary: String,
    },
    UnexpectedNode {
        node_type: Option<NodeType>,
    },
    InvalidNumber {
        text: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct EvalError {
    pub error: EvalErrorType,
    pub location: SrcSpan,
}

impl EvalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            EvalErrorType::UndefinedVariable { name } => (
                "Undefined variable",
                vec![format!("`{name}` is not bound in any enclosing scope")]
            ),
            EvalErrorType::NoSuchOperation { selector, operation, receiver } => (
                "No such operation",
                vec![format!("{receiver} does not understand `{selector}` ({operation})")]
            ),
            EvalErrorType::ArgumentType { selector, expected, got } => (
                "Wrong argument type",
                vec![format!("`{selector}` expects a {expected} argument but got {got}")]
            ),
            EvalErrorType::ArgumentCount { expected, got } => (
                "Wrong number of arguments",
                vec![format!("The block takes {expected} argument(s) but was given {got}")]
            ),
            EvalErrorType::UnresolvedPrimary { primary } => (
                "Unresolved receiver",
                vec![format!("{primary} evaluated to nil")]
            ),
            EvalErrorType::UnexpectedNode { node_type } => (
                "Can not evaluate this",
                vec![match node_type {
                    Some(node_type) => format!("{} is not an evaluable node", node_type.as_literal()),
                    None => "A required node is missing".to_string(),
                }]
            ),
            EvalErrorType::InvalidNumber { text } => (
                "Invalid number",
                vec![format!("`{text}` does not fit in a 64 bit integer")]
            ),
        }
    }
}

pub fn eval_error<T>(error: EvalErrorType, location: SrcSpan) -> Result<T, EvalError> {
    Err(EvalError { error, location })
}
