use crate::utils::prelude::SrcSpan;
use super::token::NodeType;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexicalErrorType {
    UnrecognizedToken { tok: char },
    MissingStringEnd,
    MissingCommentEnd,
    UnexpectedEof,
    UnlexComposite { node_type: NodeType },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LexicalError {
    pub error: LexicalErrorType,
    pub location: SrcSpan,
    pub line: u32,
    pub column: u32,
}

impl LexicalError {
    pub fn details(&self) -> (&'static str, Vec<String>) {
        match self.error {
            LexicalErrorType::UnrecognizedToken { tok } => {
                ("Unknown character", vec![format!("`{}` cannot start a token", tok.escape_debug())])
            },
            LexicalErrorType::MissingStringEnd => {
                ("Unterminated string", vec!["Missing closing `'`".to_string()])
            },
            LexicalErrorType::MissingCommentEnd => {
                ("Unterminated comment", vec!["Missing closing `\"`".to_string()])
            },
            LexicalErrorType::UnexpectedEof => {
                ("Unexpected end of file", vec![])
            },
            LexicalErrorType::UnlexComposite { node_type } => {
                ("Can not push back a composed node", vec![format!("`{node_type}` has children")])
            }
        }
    }
}
