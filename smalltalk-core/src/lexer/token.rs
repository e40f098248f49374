use std::fmt::Display;

/// Tag shared by lexical tokens and syntax-tree nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    // <letter>{<letter>|<digit>}
    Identifier,
    // <identifier>: with no blank before the colon
    Keyword,
    // ! % & * + , / < = > ? @ \ ~ | -
    Binary,
    Colon, // :
    Semicolon, // ;
    Dot, // .
    LeftParenthesis, // (
    RightParenthesis, // )
    LeftSquareBracket, // [
    RightSquareBracket, // ]
    Return, // ^
    Assignment, // :=
    // "..." is skipped by the lexer, the kind only exists for completeness
    Comment,
    // '...' where '' stands for one tick
    String,
    // {<digit>}, a leading `-` is folded in by the parser
    Integer,

    // | a b |
    Temporaries,
    // <expression> . <expression> ...
    Statements,
    // [ :a | | t | ... ]
    BlockClosure,
    // :a :b
    BlockArguments,
    // <primary> <messages> (; <messages>)*
    Expression,
    Messages,
}

impl NodeType {
    pub fn is_token(&self) -> bool {
        !matches!(
            self,
            NodeType::Temporaries
            | NodeType::Statements
            | NodeType::BlockClosure
            | NodeType::BlockArguments
            | NodeType::Expression
            | NodeType::Messages
        )
    }

    /// Kinds whose text differs from token to token.
    pub fn carries_text(&self) -> bool {
        matches!(
            self,
            NodeType::Identifier
            | NodeType::Keyword
            | NodeType::Binary
            | NodeType::String
            | NodeType::Integer
        )
    }

    pub fn as_literal(&self) -> &'static str {
        match self {
            NodeType::Identifier => "identifier",
            NodeType::Keyword => "keyword",
            NodeType::Binary => "binary selector",
            NodeType::Colon => "`:`",
            NodeType::Semicolon => "`;`",
            NodeType::Dot => "`.`",
            NodeType::LeftParenthesis => "`(`",
            NodeType::RightParenthesis => "`)`",
            NodeType::LeftSquareBracket => "`[`",
            NodeType::RightSquareBracket => "`]`",
            NodeType::Return => "`^`",
            NodeType::Assignment => "`:=`",
            NodeType::Comment => "comment",
            NodeType::String => "string",
            NodeType::Integer => "integer",
            NodeType::Temporaries => "temporaries",
            NodeType::Statements => "statements",
            NodeType::BlockClosure => "block closure",
            NodeType::BlockArguments => "block arguments",
            NodeType::Expression => "expression",
            NodeType::Messages => "messages",
        }
    }
}

impl Display for NodeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}
