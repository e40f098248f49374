use crate::{
    lexer::prelude::{Node, NodeType},
    utils::prelude::SrcSpan
};
use super::parser::{Parser, ParseResult};

// One method per production. Each either returns the matched node or
// returns `None` after pushing back what it read, in reverse order.
impl Parser {
    // program := statements
    pub fn program(&mut self) -> ParseResult {
        self.statements()
    }

    // temporaries := '|' identifier* '|'
    //
    // `||` yields an empty node so the bars are not read twice.
    pub fn temporaries(&mut self) -> ParseResult {
        let Some(open) = self.accept_binary("|")? else {
            return Ok(None);
        };

        let mut temporaries = Node::new(NodeType::Temporaries, open.location);
        while let Some(identifier) = self.identifier()? {
            temporaries.append(identifier);
        }

        let close = self.expect_binary("|", "`|` after temporaries declaration")?;
        temporaries.location = open.location.merge(close.location);

        Ok(Some(temporaries))
    }

    // block_constructor := '[' block_body ']'
    pub fn block_constructor(&mut self) -> ParseResult {
        let Some(open) = self.accept(NodeType::LeftSquareBracket)? else {
            return Ok(None);
        };

        let mut closure = match self.block_body()? {
            Some(closure) => closure,
            None => Node::new(NodeType::BlockClosure, open.location),
        };

        let close = self.expect_one(NodeType::RightSquareBracket, "`]` at the end of a block")?;
        closure.location = open.location.merge(close.location);

        Ok(Some(closure))
    }

    // block_body := block_argument* ('|')? temporaries? statements?
    pub fn block_body(&mut self) -> ParseResult {
        let mut closure = Node::new(NodeType::BlockClosure, SrcSpan::default());

        let mut arguments: Option<Node> = None;
        while let Some(argument) = self.block_argument()? {
            arguments
                .get_or_insert_with(|| Node::new(NodeType::BlockArguments, SrcSpan::default()))
                .append(argument);
        }

        if let Some(arguments) = arguments {
            self.expect_binary("|", "`|` after block arguments")?;
            closure.append(arguments);
        }

        if let Some(temporaries) = self.temporaries()? {
            if !temporaries.is_leaf() {
                closure.append(temporaries);
            }
        }

        if let Some(statements) = self.statements()? {
            closure.append(statements);
        }

        Ok(Some(closure))
    }

    // block_argument := ':' identifier
    pub fn block_argument(&mut self) -> ParseResult {
        if self.accept(NodeType::Colon)?.is_none() {
            return Ok(None);
        }

        let identifier = self.expect_one(NodeType::Identifier, "identifier after `:`")?;

        Ok(Some(identifier))
    }

    // statements := return_statement '.'?
    //             | expression ('.' expression)*
    pub fn statements(&mut self) -> ParseResult {
        if let Some(statement) = self.return_statement()? {
            self.accept(NodeType::Dot)?;

            return Ok(Some(statement));
        }

        let Some(first) = self.expression()? else {
            return Ok(None);
        };

        let mut expressions = vec![first];
        while self.accept(NodeType::Dot)?.is_some() {
            match self.expression()? {
                Some(expression) => expressions.push(expression),
                None => break,
            }
        }

        if expressions.len() == 1 {
            return Ok(expressions.pop());
        }

        let mut statements = Node::new(NodeType::Statements, SrcSpan::default());
        for expression in expressions {
            statements.append(expression);
        }

        Ok(Some(statements))
    }

    // return_statement := '^' expression
    pub fn return_statement(&mut self) -> ParseResult {
        let Some(mut statement) = self.accept(NodeType::Return)? else {
            return Ok(None);
        };

        let Some(expression) = self.expression()? else {
            return self.missing_expression(&statement);
        };
        statement.append(expression);

        Ok(Some(statement))
    }

    // expression := assignment | basic_expression
    pub fn expression(&mut self) -> ParseResult {
        if let Some(assignment) = self.assignment()? {
            return Ok(Some(assignment));
        }

        self.basic_expression()
    }

    // assignment := identifier ':=' expression
    pub fn assignment(&mut self) -> ParseResult {
        let Some(identifier) = self.identifier()? else {
            return Ok(None);
        };

        let Some(mut assignment) = self.accept(NodeType::Assignment)? else {
            self.unlex(Some(identifier))?;
            return Ok(None);
        };

        let Some(expression) = self.expression()? else {
            return self.missing_expression(&assignment);
        };

        assignment.append(identifier);
        assignment.append(expression);

        Ok(Some(assignment))
    }

    // basic_expression := primary (messages (';' messages)*)?
    //
    // Every message run becomes its own `Messages` child; the evaluator
    // decides which receiver a cascaded run is sent to.
    pub fn basic_expression(&mut self) -> ParseResult {
        let Some(primary) = self.primary()? else {
            return Ok(None);
        };

        let mut expression = Node::new(NodeType::Expression, SrcSpan::default());
        expression.append(primary);

        let mut semicolon: Option<Node> = None;
        loop {
            match self.messages()? {
                Some(messages) => expression.append(messages),
                None if semicolon.is_some() => {
                    self.unlex(semicolon.take())?;
                    break;
                },
                None => {},
            }

            semicolon = self.accept(NodeType::Semicolon)?;
            if semicolon.is_none() {
                break;
            }
        }

        Ok(Some(expression))
    }

    pub fn identifier(&mut self) -> ParseResult {
        self.accept(NodeType::Identifier)
    }

    // primary := identifier | literal | block_constructor | '(' expression ')'
    pub fn primary(&mut self) -> ParseResult {
        if let Some(identifier) = self.identifier()? {
            return Ok(Some(identifier));
        }

        if let Some(literal) = self.literal()? {
            return Ok(Some(literal));
        }

        if let Some(block) = self.block_constructor()? {
            return Ok(Some(block));
        }

        let Some(open) = self.accept(NodeType::LeftParenthesis)? else {
            return Ok(None);
        };

        let Some(expression) = self.expression()? else {
            return self.missing_expression(&open);
        };

        self.expect_one(NodeType::RightParenthesis, "`)` after a parenthesised expression")?;

        Ok(Some(expression))
    }

    // messages := unary_message+ binary_message* keyword_message?
    //           | binary_message+ keyword_message?
    //           | keyword_message
    pub fn messages(&mut self) -> ParseResult {
        let mut messages = Node::new(NodeType::Messages, SrcSpan::default());

        while let Some(message) = self.unary_message()? {
            messages.append(message);
        }

        while let Some(message) = self.binary_message()? {
            messages.append(message);
        }

        if let Some(message) = self.keyword_message()? {
            messages.append(message);
        }

        if messages.is_leaf() {
            return Ok(None);
        }

        Ok(Some(messages))
    }

    pub fn unary_message(&mut self) -> ParseResult {
        self.accept(NodeType::Identifier)
    }

    // binary_message := binary_selector binary_argument
    pub fn binary_message(&mut self) -> ParseResult {
        let Some(mut selector) = self.binary_selector()? else {
            return Ok(None);
        };

        let Some(argument) = self.binary_argument()? else {
            self.unlex(Some(selector))?;
            return Ok(None);
        };
        selector.append(argument);

        Ok(Some(selector))
    }

    pub fn binary_selector(&mut self) -> ParseResult {
        self.accept(NodeType::Binary)
    }

    pub fn binary_argument(&mut self) -> ParseResult {
        self.primary()
    }

    // keyword_message := (keyword keyword_argument)+
    //
    // The selector text accumulates every segment, `to:` + `by:` gives
    // `to:by:`, and the arguments are kept in reading order.
    pub fn keyword_message(&mut self) -> ParseResult {
        let Some(mut message) = self.keyword()? else {
            return Ok(None);
        };

        let Some(argument) = self.keyword_argument()? else {
            self.unlex(Some(message))?;
            return Ok(None);
        };
        message.append(argument);

        while let Some(keyword) = self.keyword()? {
            let Some(argument) = self.keyword_argument()? else {
                self.unlex(Some(keyword))?;
                break;
            };

            message.text = Some(format!("{}{}", message.text(), keyword.text()));
            message.location = message.location.merge(keyword.location);
            message.append(argument);
        }

        Ok(Some(message))
    }

    pub fn keyword(&mut self) -> ParseResult {
        self.accept(NodeType::Keyword)
    }

    pub fn keyword_argument(&mut self) -> ParseResult {
        self.primary()
    }

    // literal := number_literal | string_literal
    pub fn literal(&mut self) -> ParseResult {
        if let Some(number) = self.number_literal()? {
            return Ok(Some(number));
        }

        self.string_literal()
    }

    // number_literal := '-'? integer
    pub fn number_literal(&mut self) -> ParseResult {
        let minus = self.accept_binary("-")?;

        let Some(mut integer) = self.integer()? else {
            self.unlex(minus)?;
            return Ok(None);
        };

        if let Some(minus) = minus {
            integer.text = Some(format!("-{}", integer.text()));
            integer.location = minus.location.merge(integer.location);
        }

        Ok(Some(integer))
    }

    pub fn integer(&mut self) -> ParseResult {
        self.accept(NodeType::Integer)
    }

    pub fn string_literal(&mut self) -> ParseResult {
        self.accept(NodeType::String)
    }
}
