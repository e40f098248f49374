#[cfg(test)]
mod tests;

pub mod prelude {
    pub use super::{interpret, run, Evaluated};
}

use std::{path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::{Environment, Scope, Value},
    eval::prelude::{evaluate, Runtime},
    parser::prelude::{parse_program, ParseErrorType},
    utils::prelude::{
        Error, SourceWarning, SourceWarningEmitter, SrcSpan, StringTranscriptIO, Transcript,
        TranscriptIO, VectorWarningEmitterIO, Warning, WarningEmitter, WarningEmitterIO
    }
};

/// Parses and evaluates `src` in `env`.
///
/// Whatever follows the longest parsable program is reported as an
/// `UnparsedInput` warning and skipped.
pub fn interpret(
    path: PathBuf,
    src: &str,
    env: Scope,
    transcript: Rc<dyn TranscriptIO>,
    warnings: Rc<dyn WarningEmitterIO>,
) -> Result<Value, Error> {
    let parsed = match parse_program(src) {
        Ok(parsed) => parsed,
        Err(err) => {
            let error = match err.error {
                ParseErrorType::LexError { error } => Error::Lex {
                    path,
                    src: src.to_string(),
                    error
                },
                _ => Error::Parse {
                    path,
                    src: src.to_string(),
                    error: err
                },
            };
            return Err(error)
        }
    };

    let runtime = Runtime::new(
        Transcript::new(transcript),
        SourceWarningEmitter::new(
            path.clone(),
            src.to_string(),
            WarningEmitter::new(warnings)
        )
    );

    if let Some(first) = parsed.rest.first() {
        runtime.warnings.emit(SourceWarning::UnparsedInput {
            location: SrcSpan::from(first.location.start, src.len() as u32),
        });
    }

    match evaluate(parsed.program.as_ref(), Some(env), &runtime) {
        Ok(value) => Ok(value),
        Err(error) => Err(Error::Eval {
            path,
            src: src.to_string(),
            error
        }),
    }
}

/// Result of a self-contained `run`.
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluated {
    pub value: Value,
    pub transcript: String,
    pub warnings: Vec<Warning>,
}

/// Evaluates `src` in a fresh top-level frame, collecting the transcript and
/// the warnings.
pub fn run(src: &str) -> Result<Evaluated, Error> {
    let transcript = StringTranscriptIO::new();
    let warnings = VectorWarningEmitterIO::new();

    let value = interpret(
        PathBuf::new(),
        src,
        Environment::root(),
        Rc::new(transcript.clone()),
        Rc::new(warnings.clone())
    )?;

    Ok(Evaluated {
        value,
        transcript: transcript.take(),
        warnings: warnings.take(),
    })
}
