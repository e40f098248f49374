use super::error::{LexicalError, LexicalErrorType};
use super::node::Node;
use super::token::NodeType;
use std::fmt::Display;
use crate::utils::prelude::SrcSpan;

pub type LexResult = std::result::Result<Option<Node>, LexicalError>;

// Fed to the state machine once the input is exhausted so that tokens
// which end on any non-continuation character terminate cleanly.
const VIRTUAL_BLANK: char = ' ';

pub fn is_binary_char(ch: char) -> bool {
	matches!(
		ch,
		'!' | '%' | '&' | '*' | '+' | ',' | '/' | '<' | '=' | '>' | '?' | '@' | '\\' | '~' | '|' | '-'
	)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
	Start,
	Identifier,
	// identifier text followed by `:`
	KeywordLookahead,
	String,
	// closing tick seen, a second one continues the string
	QuoteLookahead,
	Comment,
	Integer,
	// `:` read from the start state
	Colon,
}

#[derive(Debug)]
pub struct Lexer {
	data: Vec<(u32, char)>,
	len: u32,
	pos: usize,
	line: u32,
	column: u32,

	state: State,
	text: String,
	start: u32,
	mark: u32,
	failed: bool,

	token_stack: Vec<Node>,
}

impl Display for Lexer {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		write!(f,
			"Lexer {{\n\tpos: {},\n\tline: {}, column: {},\n\tstate: {:?}, pending: {}\n}}",
			self.pos, self.line, self.column, self.state, self.token_stack.len()
		)
	}
}

impl Lexer {
	pub fn new(input: &str) -> Self {
		Self {
			data: input.char_indices().map(|(i, c)| (i as u32, c)).collect(),
			len: input.len() as u32,
			pos: 0,
			line: 1,
			column: 1,

			state: State::Start,
			text: String::new(),
			start: 0,
			mark: 0,
			failed: false,

			token_stack: vec![],
		}
	}

	pub fn line(&self) -> u32 {
		self.line
	}

	pub fn column(&self) -> u32 {
		self.column
	}

	/// Byte offset of the next character to be scanned.
	pub fn offset(&self) -> u32 {
		self.offset_of(self.pos)
	}

	/// Pushes a token back; the next `lex` returns it before scanning.
	/// Pushing back nothing is a no-op.
	pub fn unlex(&mut self, token: Option<Node>) -> Result<(), LexicalError> {
		let Some(token) = token else {
			return Ok(());
		};

		if !token.is_leaf() {
			return Err(LexicalError {
				error: LexicalErrorType::UnlexComposite { node_type: token.node_type },
				location: token.location,
				line: self.line,
				column: self.column,
			});
		}

		self.token_stack.push(token);

		Ok(())
	}

	/// Next token, or `None` at the end of input.
	pub fn lex(&mut self) -> LexResult {
		if let Some(token) = self.token_stack.pop() {
			return Ok(Some(token));
		}

		loop {
			let (ch, at_end) = match self.getc() {
				Some(ch) => (ch, false),
				None => (VIRTUAL_BLANK, true),
			};

			match self.state {
				State::Start => {
					self.start = self.offset_of(self.pos.saturating_sub(1));

					match ch {
						' ' | '\r' | '\n' | '\t' | '\x0B' => {
							if at_end {
								return Ok(None);
							}
						},
						'^' => return Ok(Some(self.single(NodeType::Return, None))),
						';' => return Ok(Some(self.single(NodeType::Semicolon, Some(ch)))),
						'.' => return Ok(Some(self.single(NodeType::Dot, Some(ch)))),
						'(' => return Ok(Some(self.single(NodeType::LeftParenthesis, Some(ch)))),
						')' => return Ok(Some(self.single(NodeType::RightParenthesis, Some(ch)))),
						'[' => return Ok(Some(self.single(NodeType::LeftSquareBracket, Some(ch)))),
						']' => return Ok(Some(self.single(NodeType::RightSquareBracket, Some(ch)))),
						'\'' => self.enter(State::String),
						'"' => self.enter(State::Comment),
						':' => self.enter(State::Colon),
						ch if is_binary_char(ch) => {
							return Ok(Some(self.single(NodeType::Binary, Some(ch))))
						},
						ch if ch.is_ascii_alphabetic() => {
							self.enter(State::Identifier);
							self.text.push(ch);
						},
						ch if ch.is_ascii_digit() => {
							self.enter(State::Integer);
							self.text.push(ch);
						},
						tok => return Err(self.error(LexicalErrorType::UnrecognizedToken { tok })),
					}
				},
				State::Identifier => {
					if ch.is_ascii_alphanumeric() {
						self.text.push(ch);
					} else if ch == ':' {
						self.mark = self.offset_of(self.pos - 1);
						self.state = State::KeywordLookahead;
					} else {
						self.reject(at_end);
						return Ok(Some(self.emit(NodeType::Identifier)));
					}
				},
				State::KeywordLookahead => {
					if ch == '=' {
						// `name:=` is an identifier followed by an assignment,
						// never the keyword `name:` followed by `=`
						let assignment = Node::new(
							NodeType::Assignment,
							SrcSpan::from(self.mark, self.offset())
						);
						self.token_stack.push(assignment);

						let identifier = Node::with_text(
							NodeType::Identifier,
							std::mem::take(&mut self.text),
							SrcSpan::from(self.start, self.mark)
						);
						self.state = State::Start;

						return Ok(Some(identifier));
					}

					self.reject(at_end);
					self.text.push(':');

					return Ok(Some(self.emit(NodeType::Keyword)));
				},
				State::String => {
					if ch == '\'' {
						self.state = State::QuoteLookahead;
					} else if at_end {
						return Err(self.error(LexicalErrorType::MissingStringEnd));
					} else {
						self.text.push(ch);
					}
				},
				State::QuoteLookahead => {
					if ch == '\'' {
						self.text.push(ch);
						self.state = State::String;
					} else {
						self.reject(at_end);
						return Ok(Some(self.emit(NodeType::String)));
					}
				},
				State::Comment => {
					if ch == '"' {
						self.state = State::Start;
					} else if at_end {
						return Err(self.error(LexicalErrorType::MissingCommentEnd));
					}
				},
				State::Integer => {
					if ch.is_ascii_digit() {
						self.text.push(ch);
					} else {
						self.reject(at_end);
						return Ok(Some(self.emit(NodeType::Integer)));
					}
				},
				State::Colon => {
					self.state = State::Start;

					if ch == '=' {
						return Ok(Some(self.single(NodeType::Assignment, None)));
					}

					self.reject(at_end);

					return Ok(Some(self.single(NodeType::Colon, Some(':'))));
				},
			}

			if at_end {
				return Err(self.error(LexicalErrorType::UnexpectedEof));
			}
		}
	}

	fn eof(&self) -> bool {
		self.pos >= self.data.len()
	}

	fn offset_of(&self, idx: usize) -> u32 {
		match self.data.get(idx) {
			Some((offset, _)) => *offset,
			None => self.len,
		}
	}

	fn getc(&mut self) -> Option<char> {
		if self.eof() {
			return None;
		}

		let (_, ch) = self.data[self.pos];
		self.pos += 1;

		if ch == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}

		Some(ch)
	}

	// Rewinding over a newline does not recover the real column of the
	// previous line: the column becomes the index of the nearest newline
	// found scanning backwards from the cursor.
	fn ungetc(&mut self) {
		if self.pos == 0 {
			return;
		}

		self.pos -= 1;
		let (_, ch) = self.data[self.pos];

		if ch == '\n' {
			self.column = self.data[..=self.pos].iter()
				.rposition(|(_, c)| *c == '\n')
				.unwrap_or(0) as u32;
			self.line -= 1;
		} else {
			self.column -= 1;
		}
	}

	// The virtual blank was never consumed, so there is nothing to rewind.
	fn reject(&mut self, at_end: bool) {
		if !at_end {
			self.ungetc();
		}
	}

	fn enter(&mut self, state: State) {
		self.state = state;
		self.text.clear();
	}

	fn single(&mut self, node_type: NodeType, text: Option<char>) -> Node {
		self.state = State::Start;
		let location = SrcSpan::from(self.start, self.offset());

		match text {
			Some(ch) => Node::with_text(node_type, ch, location),
			None => Node::new(node_type, location),
		}
	}

	fn emit(&mut self, node_type: NodeType) -> Node {
		self.state = State::Start;

		Node::with_text(
			node_type,
			std::mem::take(&mut self.text),
			SrcSpan::from(self.start, self.offset())
		)
	}

	fn error(&self, error: LexicalErrorType) -> LexicalError {
		LexicalError {
			error,
			location: SrcSpan::from(self.start, self.offset().max(self.start)),
			line: self.line,
			column: self.column,
		}
	}
}

impl Iterator for Lexer {
	type Item = Result<Node, LexicalError>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.failed {
			return None;
		}

		match self.lex() {
			Ok(Some(token)) => Some(Ok(token)),
			Ok(None) => None,
			Err(err) => {
				self.failed = true;
				Some(Err(err))
			}
		}
	}
}

/// Drains a fresh lexer over `src`.
pub fn tokenize(src: &str) -> Result<Vec<Node>, LexicalError> {
	Lexer::new(src).collect()
}
