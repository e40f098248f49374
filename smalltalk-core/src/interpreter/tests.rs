use std::{path::PathBuf, rc::Rc};

use crate::{
    environment::prelude::{Environment, Value},
    eval::prelude::EvalErrorType,
    interpreter::prelude::{interpret, run},
    lexer::prelude::LexicalErrorType,
    parser::prelude::ParseErrorType,
    utils::prelude::{
        Error, NullWarningEmitterIO, SourceWarning, SrcSpan, StringTranscriptIO, Warning
    }
};

fn error_of(src: &str) -> Error {
    match run(src) {
        Err(err) => err,
        Ok(evaluated) => panic!("Expected Err for `{src}` but got Ok({evaluated:?})"),
    }
}

#[test]
fn test_run() -> Result<(), Error> {
    let evaluated = run("a := 3. b := a * 4. (b - 2) printNl. 'done' displayNl. b")?;

    assert_eq!(evaluated.value, Value::Number { value: 12.0 });
    assert_eq!(evaluated.transcript, "10done");
    assert!(evaluated.warnings.is_empty());

    Ok(())
}

#[test]
fn test_run_empty_source() -> Result<(), Error> {
    let evaluated = run("  \"only a comment\"  ")?;

    assert_eq!(evaluated.value, Value::Undefined);
    assert_eq!(evaluated.transcript, "");

    Ok(())
}

#[test]
fn test_interpret_keeps_environment() -> Result<(), Error> {
    let env = Environment::root();
    let transcript = StringTranscriptIO::new();

    for src in ["counter := 0.", "inc := [ counter := counter + 1 ].", "inc value. inc value"] {
        interpret(
            PathBuf::from("session.st"),
            src,
            env.clone(),
            Rc::new(transcript.clone()),
            Rc::new(NullWarningEmitterIO)
        )?;
    }

    let value = interpret(
        PathBuf::from("session.st"),
        "counter printNl",
        env.clone(),
        Rc::new(transcript.clone()),
        Rc::new(NullWarningEmitterIO)
    )?;

    assert_eq!(value, Value::Number { value: 2.0 });
    assert_eq!(transcript.contents(), "2");

    Ok(())
}

#[test]
fn test_unparsed_input_warning() -> Result<(), Error> {
    let evaluated = run("1 + 2 ;")?;

    assert_eq!(evaluated.value, Value::Number { value: 3.0 });
    assert_eq!(evaluated.warnings.len(), 1);

    match &evaluated.warnings[0] {
        Warning::Source { warning, .. } => assert_eq!(
            *warning,
            SourceWarning::UnparsedInput { location: SrcSpan::from(6, 7) }
        ),
    }

    assert!(evaluated.warnings[0].pretty_string().contains("Unparsed input"));

    Ok(())
}

#[test]
fn test_implicit_declaration_is_collected() -> Result<(), Error> {
    let evaluated = run("[ fresh := 1 ] value")?;

    assert_eq!(evaluated.value, Value::Number { value: 1.0 });
    assert_eq!(evaluated.warnings.len(), 1);

    let pretty = evaluated.warnings[0].pretty_string();
    assert!(pretty.contains("Implicit declaration"), "{pretty}");
    assert!(pretty.contains("| fresh |"), "{pretty}");

    Ok(())
}

#[test]
fn test_lex_error() {
    match error_of("'open") {
        Error::Lex { error, src, .. } => {
            assert_eq!(error.error, LexicalErrorType::MissingStringEnd);
            assert_eq!(src, "'open");
        },
        other => panic!("Expected a lex error but got {other:?}"),
    }
}

#[test]
fn test_parse_error() {
    match error_of("[ 1 ") {
        Error::Parse { error, .. } => assert_eq!(error.error, ParseErrorType::UnexpectedEof {
            expected: "`]` at the end of a block".into()
        }),
        other => panic!("Expected a parse error but got {other:?}"),
    }
}

#[test]
fn test_eval_error() {
    match error_of("x := 1. y + x") {
        Error::Eval { error, .. } => {
            assert_eq!(error.error, EvalErrorType::UndefinedVariable { name: "y".into() });
            assert_eq!(error.location, SrcSpan::from(8, 9));
        },
        other => panic!("Expected an eval error but got {other:?}"),
    }
}

#[test]
fn test_error_rendering() {
    let pretty = error_of("1 + #").pretty_string();
    assert!(pretty.contains("Syntax error"), "{pretty}");
    assert!(pretty.contains("Unknown character"), "{pretty}");

    let pretty = error_of("( 1 + 2").pretty_string();
    assert!(pretty.contains("Syntax error"), "{pretty}");
    assert!(pretty.contains("Expected `)` after a parenthesised expression"), "{pretty}");

    let pretty = error_of("'a' + 1").pretty_string();
    assert!(pretty.contains("Runtime error"), "{pretty}");
    assert!(pretty.contains("String does not understand `+` (add)"), "{pretty}");
}
