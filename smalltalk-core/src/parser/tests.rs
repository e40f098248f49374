use crate::{
    lexer::prelude::{LexicalErrorType, Node, NodeType},
    parser::prelude::{parse_program, ParseError, ParseErrorType, Parser}
};

fn parse(input: &str) -> Result<Node, ParseError> {
    let parsed = parse_program(input)?;

    assert!(parsed.rest.is_empty(), "`{input}` left {:?} unparsed", parsed.rest);

    Ok(parsed.program.expect("program should not be empty"))
}

fn child(node: &Node, idx: usize) -> &Node {
    node.child(idx)
        .unwrap_or_else(|| panic!("{} has no child {idx}:\n{}", node, node.tree_string()))
}

fn assert_node(node: &Node, node_type: NodeType, text: &str) {
    assert_eq!(node.node_type, node_type, "in\n{}", node.tree_string());
    assert_eq!(node.text(), text, "in\n{}", node.tree_string());
}

#[test]
fn test_unary_message() -> Result<(), ParseError> {
    for (input, primary_type, primary_text) in [
        ("'hello' printNl", NodeType::String, "hello"),
        ("42 printNl", NodeType::Integer, "42"),
    ] {
        let node = parse(input)?;

        assert_node(&node, NodeType::Expression, "");
        assert_node(child(&node, 0), primary_type, primary_text);

        let messages = child(&node, 1);
        assert_node(messages, NodeType::Messages, "");
        assert_node(child(messages, 0), NodeType::Identifier, "printNl");
    }

    Ok(())
}

#[test]
fn test_keyword_message() -> Result<(), ParseError> {
    let node = parse("1 to: 20")?;

    assert_node(child(&node, 0), NodeType::Integer, "1");

    let message = child(child(&node, 1), 0);
    assert_node(message, NodeType::Keyword, "to:");
    assert_node(child(message, 0), NodeType::Integer, "20");

    Ok(())
}

#[test]
fn test_keyword_selector_concatenation() -> Result<(), ParseError> {
    let node = parse("1 to: 20 by: 2")?;

    let message = child(child(&node, 1), 0);
    assert_node(message, NodeType::Keyword, "to:by:");
    assert_eq!(message.children.len(), 2);
    assert_node(child(message, 0), NodeType::Integer, "20");
    assert_node(child(message, 1), NodeType::Integer, "2");

    Ok(())
}

#[test]
fn test_binary_message() -> Result<(), ParseError> {
    let node = parse("1 + 3")?;

    let message = child(child(&node, 1), 0);
    assert_node(message, NodeType::Binary, "+");
    assert_node(child(message, 0), NodeType::Integer, "3");

    Ok(())
}

#[test]
fn test_message_precedence() -> Result<(), ParseError> {
    let node = parse("a foo bar + 2 * 3 at: 1 put: b")?;

    let messages = child(&node, 1);
    let selectors = messages.children.iter()
        .flatten()
        .map(|m| (m.node_type, m.text()))
        .collect::<Vec<_>>();

    assert_eq!(selectors, vec![
        (NodeType::Identifier, "foo"),
        (NodeType::Identifier, "bar"),
        (NodeType::Binary, "+"),
        (NodeType::Binary, "*"),
        (NodeType::Keyword, "at:put:"),
    ]);

    Ok(())
}

#[test]
fn test_cascade() -> Result<(), ParseError> {
    let node = parse("2 + 3 ; - 1")?;

    assert_node(child(&node, 0), NodeType::Integer, "2");

    let first = child(&node, 1);
    assert_node(first, NodeType::Messages, "");
    assert_node(child(first, 0), NodeType::Binary, "+");
    assert_node(child(child(first, 0), 0), NodeType::Integer, "3");

    let second = child(&node, 2);
    assert_node(second, NodeType::Messages, "");
    assert_node(child(second, 0), NodeType::Binary, "-");
    assert_node(child(child(second, 0), 0), NodeType::Integer, "1");

    Ok(())
}

#[test]
fn test_cascade_with_several_messages() -> Result<(), ParseError> {
    let node = parse("1 + 3 * 4 ; + 5 + 6 ; + 7 + 8")?;

    assert_eq!(node.children.len(), 4);

    for (idx, expected) in [(1, ["+", "*"]), (2, ["+", "+"]), (3, ["+", "+"])] {
        let messages = child(&node, idx);
        assert_eq!(messages.children.len(), 2);
        assert_node(child(messages, 0), NodeType::Binary, expected[0]);
        assert_node(child(messages, 1), NodeType::Binary, expected[1]);
    }

    assert_node(child(child(child(&node, 3), 1), 0), NodeType::Integer, "8");

    Ok(())
}

#[test]
fn test_dangling_semicolon_is_pushed_back() -> Result<(), ParseError> {
    let parsed = parse_program("1 + 2 ;")?;

    let program = parsed.program.expect("expression");
    assert_eq!(program.children.len(), 2);
    assert_eq!(parsed.rest.len(), 1);
    assert_node(&parsed.rest[0], NodeType::Semicolon, ";");

    Ok(())
}

#[test]
fn test_keyword_without_argument_is_pushed_back() -> Result<(), ParseError> {
    let parsed = parse_program("1 to: 2 by: )")?;

    let program = parsed.program.expect("expression");
    assert_node(child(child(&program, 1), 0), NodeType::Keyword, "to:");

    let rest = parsed.rest.iter().map(|t| t.node_type).collect::<Vec<_>>();
    assert_eq!(rest, vec![NodeType::Keyword, NodeType::RightParenthesis]);

    let parsed = parse_program("1 to: )")?;

    let program = parsed.program.expect("expression");
    assert_eq!(program.children.len(), 1);
    assert_node(&parsed.rest[0], NodeType::Keyword, "to:");

    Ok(())
}

#[test]
fn test_negative_literal() -> Result<(), ParseError> {
    let node = parse("-5")?;
    assert_node(child(&node, 0), NodeType::Integer, "-5");

    let node = parse("3 - -2")?;
    let message = child(child(&node, 1), 0);
    assert_node(message, NodeType::Binary, "-");
    assert_node(child(message, 0), NodeType::Integer, "-2");

    Ok(())
}

#[test]
fn test_parenthesis_are_not_kept() -> Result<(), ParseError> {
    let node = parse("( 1 + 2 ) * 3")?;

    let inner = child(&node, 0);
    assert_node(inner, NodeType::Expression, "");
    assert_node(child(inner, 0), NodeType::Integer, "1");

    let message = child(child(&node, 1), 0);
    assert_node(message, NodeType::Binary, "*");

    Ok(())
}

#[test]
fn test_assignment_and_statements() -> Result<(), ParseError> {
    let node = parse("a := 'hello'. b := 'world'.")?;

    assert_node(&node, NodeType::Statements, "");
    assert_eq!(node.children.len(), 2);

    let first = child(&node, 0);
    assert_node(first, NodeType::Assignment, "");
    assert_node(child(first, 0), NodeType::Identifier, "a");
    assert_node(child(child(first, 1), 0), NodeType::String, "hello");

    let second = child(&node, 1);
    assert_node(child(second, 0), NodeType::Identifier, "b");

    Ok(())
}

#[test]
fn test_single_statement_is_not_wrapped() -> Result<(), ParseError> {
    let node = parse("a := 1.")?;

    assert_node(&node, NodeType::Assignment, "");

    Ok(())
}

#[test]
fn test_return_statement() -> Result<(), ParseError> {
    let node = parse("^ 1 + 2.")?;

    assert_node(&node, NodeType::Return, "");
    assert_node(child(&node, 0), NodeType::Expression, "");

    Ok(())
}

#[test]
fn test_block() -> Result<(), ParseError> {
    let node = parse("[:x :y | | t | t := x + y. t * 2]")?;

    let block = child(&node, 0);
    assert_node(block, NodeType::BlockClosure, "");
    assert_eq!(block.children.len(), 3);

    let arguments = child(block, 0);
    assert_node(arguments, NodeType::BlockArguments, "");
    assert_node(child(arguments, 0), NodeType::Identifier, "x");
    assert_node(child(arguments, 1), NodeType::Identifier, "y");

    let temporaries = child(block, 1);
    assert_node(temporaries, NodeType::Temporaries, "");
    assert_node(child(temporaries, 0), NodeType::Identifier, "t");

    assert_node(child(block, 2), NodeType::Statements, "");

    Ok(())
}

#[test]
fn test_block_shapes() -> Result<(), ParseError> {
    let cases = vec![
        ("[]", vec![]),
        ("[||]", vec![]),
        ("[ 7 ]", vec![NodeType::Expression]),
        ("[:a | a]", vec![NodeType::BlockArguments, NodeType::Expression]),
        ("[ | t | t ]", vec![NodeType::Temporaries, NodeType::Expression]),
        ("[ ^ 1 ]", vec![NodeType::Return]),
    ];

    for (input, expected) in cases {
        let node = parse(input)?;
        let block = child(&node, 0);

        let shape = block.children.iter()
            .flatten()
            .map(|c| c.node_type)
            .collect::<Vec<_>>();

        assert_eq!(shape, expected, "while parsing `{input}`");
    }

    Ok(())
}

#[test]
fn test_empty_program() -> Result<(), ParseError> {
    for input in ["", "   ", "\"just a comment\""] {
        let parsed = parse_program(input)?;

        assert_eq!(parsed.program, None);
        assert!(parsed.rest.is_empty());
    }

    Ok(())
}

#[test]
fn test_no_match_pushes_back() -> Result<(), ParseError> {
    let mut parser = Parser::new("- 'x'");

    assert_eq!(parser.number_literal()?, None);
    assert_eq!(parser.assignment()?, None);
    assert_eq!(parser.keyword_message()?, None);

    let minus = parser.lex()?.expect("binary selector");
    assert_node(&minus, NodeType::Binary, "-");

    let string = parser.string_literal()?.expect("string literal");
    assert_node(&string, NodeType::String, "x");

    Ok(())
}

#[test]
fn test_productions_called_directly() -> Result<(), ParseError> {
    let mut parser = Parser::new("| a b | foo: 1");

    let temporaries = parser.temporaries()?.expect("temporaries");
    assert_eq!(temporaries.children.len(), 2);

    let message = parser.keyword_message()?.expect("keyword message");
    assert_node(&message, NodeType::Keyword, "foo:");

    assert_eq!(parser.lex()?, None);

    Ok(())
}

#[test]
fn test_syntax_errors() {
    let cases = vec![
        ("[ 1 ", "`]` at the end of a block"),
        ("[:a a]", "`|` after block arguments"),
        ("[: 1 | 1]", "identifier after `:`"),
        ("( 1 + 2", "`)` after a parenthesised expression"),
        ("[ | a b ]", "`|` after temporaries declaration"),
    ];

    for (input, expected_text) in cases {
        let err = match parse_program(input) {
            Err(err) => err,
            Ok(parsed) => panic!("Expected Err for `{input}` but got Ok({parsed:?})"),
        };

        let expected = match &err.error {
            ParseErrorType::UnexpectedToken { expected, .. } => expected,
            ParseErrorType::UnexpectedEof { expected } => expected,
            other => panic!("unexpected error {other:?} for `{input}`"),
        };

        assert_eq!(expected, expected_text, "while parsing `{input}`");
    }
}

#[test]
fn test_unexpected_token_reports_found() {
    let err = parse_program("[ 1 )").expect_err("missing bracket");

    assert_eq!(err.error, ParseErrorType::UnexpectedToken {
        expected: "`]` at the end of a block".into(),
        found: "`)`".into(),
    });
    assert_eq!((err.span.start, err.span.end), (4, 5));
}

#[test]
fn test_missing_expression() {
    let cases = vec![
        ("^", "`^`"),
        ("a := )", "`:=`"),
        ("( )", "`(`"),
    ];

    for (input, after) in cases {
        let err = parse_program(input).expect_err("missing expression");

        assert_eq!(
            err.error,
            ParseErrorType::MissingExpression { after: after.into() },
            "while parsing `{input}`"
        );
    }
}

#[test]
fn test_lex_error_is_forwarded() {
    let err = parse_program("a := 'open").expect_err("unterminated string");

    assert!(matches!(
        err.error,
        ParseErrorType::LexError { error } if error.error == LexicalErrorType::MissingStringEnd
    ));
}

#[test]
fn test_tree_string() -> Result<(), ParseError> {
    let node = parse("x := 1 + 2")?;

    let expected = "\
Assignment
    Identifier 'x'
    Expression
        Integer '1'
        Messages
            Binary '+'
                Integer '2'
";

    assert_eq!(node.tree_string(), expected);

    Ok(())
}
