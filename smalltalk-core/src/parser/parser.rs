use crate::{
    lexer::prelude::{Lexer, Node, NodeType},
    utils::prelude::SrcSpan
};
use super::error::{ParseError, ParseErrorType};

/// `Ok(None)` means the production did not match and every token it read
/// has been pushed back.
pub type ParseResult = Result<Option<Node>, ParseError>;

#[derive(Debug, Clone, PartialEq)]
pub struct Parsed {
    pub program: Option<Node>,
    /// Tokens left over once the program stopped matching.
    pub rest: Vec<Node>,
}

/// Recursive descent over a pushback lexer. All lookahead is done by
/// reading a token and unlexing it again.
#[derive(Debug)]
pub struct Parser {
    lexer: Lexer,
}

impl Parser {
    pub fn new(src: &str) -> Self {
        Self::from_lexer(Lexer::new(src))
    }

    pub fn from_lexer(lexer: Lexer) -> Self {
        Self { lexer }
    }

    pub fn lexer(&self) -> &Lexer {
        &self.lexer
    }

    pub fn into_lexer(self) -> Lexer {
        self.lexer
    }

    pub fn parse(&mut self) -> Result<Parsed, ParseError> {
        let program = self.program()?;

        let mut rest = vec![];
        while let Some(token) = self.lex()? {
            rest.push(token);
        }

        Ok(Parsed { program, rest })
    }

    pub fn lex(&mut self) -> ParseResult {
        Ok(self.lexer.lex()?)
    }

    pub fn unlex(&mut self, token: Option<Node>) -> Result<(), ParseError> {
        Ok(self.lexer.unlex(token)?)
    }

    /// Next token if it is of the given kind, otherwise it is pushed back.
    pub fn accept(&mut self, node_type: NodeType) -> ParseResult {
        match self.lex()? {
            Some(token) if token.is(node_type) => Ok(Some(token)),
            token => {
                self.unlex(token)?;
                Ok(None)
            }
        }
    }

    /// Like `accept`, for a binary selector with the given text.
    pub fn accept_binary(&mut self, text: &str) -> ParseResult {
        match self.lex()? {
            Some(token) if token.is(NodeType::Binary) && token.text() == text => Ok(Some(token)),
            token => {
                self.unlex(token)?;
                Ok(None)
            }
        }
    }

    pub fn expect_one(&mut self, node_type: NodeType, expected: &str) -> Result<Node, ParseError> {
        match self.lex()? {
            Some(token) if token.is(node_type) => Ok(token),
            token => self.unexpected(token, expected),
        }
    }

    pub fn expect_binary(&mut self, text: &str, expected: &str) -> Result<Node, ParseError> {
        match self.lex()? {
            Some(token) if token.is(NodeType::Binary) && token.text() == text => Ok(token),
            token => self.unexpected(token, expected),
        }
    }

    pub(crate) fn missing_expression<T>(&self, after: &Node) -> Result<T, ParseError> {
        parse_error(
            ParseErrorType::MissingExpression { after: after.describe() },
            after.location
        )
    }

    fn unexpected<T>(&mut self, found: Option<Node>, expected: &str) -> Result<T, ParseError> {
        match found {
            Some(token) => {
                let error = ParseErrorType::UnexpectedToken {
                    expected: expected.to_string(),
                    found: token.describe(),
                };
                let span = token.location;
                self.unlex(Some(token))?;

                parse_error(error, span)
            },
            None => {
                let end = self.lexer.offset();

                parse_error(
                    ParseErrorType::UnexpectedEof { expected: expected.to_string() },
                    SrcSpan::from(end, end)
                )
            }
        }
    }
}

pub fn parse_program(src: &str) -> Result<Parsed, ParseError> {
    let mut parser = Parser::new(src);
    let parsed = parser.parse()?;

    Ok(parsed)
}

pub fn parse_error<T>(error: ParseErrorType, span: SrcSpan) -> Result<T, ParseError> {
    Err(ParseError { error, span })
}
