use std::path::PathBuf;

use termcolor::Buffer;
use thiserror::Error;

use crate::{
    eval::prelude::EvalError,
    lexer::prelude::LexicalError,
    parser::prelude::ParseError,
    utils::prelude::SrcSpan,
};
use super::diagnostic::{Diagnostic, Label, Level, Location};

#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    #[error("failed to tokenize source code")]
    Lex {
        path: PathBuf,
        src: String,
        error: LexicalError
    },
    #[error("failed to parse source code")]
    Parse {
        path: PathBuf,
        src: String,
        error: ParseError
    },
    #[error("evaluation failed")]
    Eval {
        path: PathBuf,
        src: String,
        error: EvalError
    },
}

impl Error {
    pub fn pretty_string(&self) -> String {
        let mut nocolor = Buffer::no_color();
        self.pretty(&mut nocolor);
        String::from_utf8(nocolor.into_inner()).expect("Error printing produced invalid utf8")
    }

    pub fn pretty(&self, buf: &mut Buffer) {
        use std::io::Write;

        for diagnostic in self.to_diagnostics() {
            diagnostic.write(buf);
            writeln!(buf).expect("write new line diagnostic");
        }
    }

    pub fn to_diagnostics(&self) -> Vec<Diagnostic> {
        let (title, path, src, (label, extra), span) = match self {
            Error::Lex { path, src, error } => {
                ("Syntax error", path, src, error.details(), error.location)
            },
            Error::Parse { path, src, error } => {
                let span = if error.is_eof() {
                    end_of(src)
                } else {
                    error.span
                };

                ("Syntax error", path, src, error.details(), span)
            },
            Error::Eval { path, src, error } => {
                ("Runtime error", path, src, error.details(), error.location)
            },
        };

        vec![Diagnostic {
            title: title.into(),
            text: extra.join("\n"),
            hint: None,
            level: Level::Error,
            location: Some(Location {
                src,
                path: path.clone(),
                label: Label {
                    text: Some(label.to_string()),
                    span,
                },
                extra_labels: vec![],
            }),
        }]
    }
}

fn end_of(src: &str) -> SrcSpan {
    SrcSpan::from(src.len() as u32, src.len() as u32)
}
