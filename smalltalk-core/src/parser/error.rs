use crate::{
    lexer::prelude::{LexicalError, LexicalErrorType, NodeType},
    utils::prelude::SrcSpan
};

#[derive(Debug, Clone, PartialEq)]
pub enum ParseErrorType {
    UnexpectedToken {
        expected: String,
        found: String,
    },
    UnexpectedEof {
        expected: String,
    },
    MissingExpression {
        after: String,
    },
    UnlexComposite {
        node_type: NodeType,
    },
    LexError { error: LexicalError },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ParseError {
    pub error: ParseErrorType,
    pub span: SrcSpan
}

impl ParseError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match &self.error {
            ParseErrorType::UnexpectedToken { expected, found } => {
                ("Not expected this", vec![format!("Expected {expected} but found {found}")])
            },
            ParseErrorType::UnexpectedEof { expected } => {
                ("Unexpected end of file", vec![format!("Expected {expected}")])
            },
            ParseErrorType::MissingExpression { after } => {
                ("Missing expression", vec![format!("Expected an expression after {after}")])
            },
            ParseErrorType::UnlexComposite { node_type } => {
                ("Can not push back a composed node", vec![format!("`{node_type}` has children")])
            },
            ParseErrorType::LexError { error } => error.details()
        }
    }

    pub fn is_eof(&self) -> bool {
        matches!(self.error, ParseErrorType::UnexpectedEof { .. })
    }
}

impl From<LexicalError> for ParseError {
    fn from(error: LexicalError) -> Self {
        let span = error.location;

        match error.error {
            LexicalErrorType::UnlexComposite { node_type } => ParseError {
                error: ParseErrorType::UnlexComposite { node_type },
                span,
            },
            _ => ParseError {
                error: ParseErrorType::LexError { error },
                span,
            }
        }
    }
}
