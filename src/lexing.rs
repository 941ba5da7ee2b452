use decoded_char::DecodedChar;
use iref::IriBuf;
use langtag::LangTagBuf;
use locspan::{Meta, Span};
use rdf_types::BlankIdBuf;
use std::{collections::VecDeque, fmt, iter::Peekable};

/// Tokens iterator with lookahead.
pub trait Tokens {
	#[allow(clippy::type_complexity)]
	fn peek(&mut self) -> Result<Meta<Option<&Token>, Span>, Meta<Error, Span>>;

	#[allow(clippy::type_complexity)]
	fn next(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>>;
}

/// Lexing error.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
	#[error("unterminated string literal")]
	UnterminatedLiteral,

	#[error("unterminated IRI reference")]
	UnterminatedIri,

	#[error("invalid escape sequence")]
	InvalidEscape,

	#[error("illegal character `{}`", .0.escape_debug())]
	IllegalCharacter(char),

	#[error("invalid character code point {0:x}")]
	InvalidCodepoint(u32),

	#[error("invalid IRI <{0}>")]
	InvalidIri(String),

	#[error("invalid language tag")]
	InvalidLangTag,

	#[error("invalid blank node label")]
	InvalidBlankLabel,

	#[error("unexpected end of line")]
	UnexpectedEnd,
}

/// Token.
#[derive(Debug, Clone)]
pub enum Token {
	LangTag(LangTagBuf),
	Iri(IriBuf),
	StringLiteral(String),
	BlankNodeLabel(BlankIdBuf),
	Dot,
	Carets,
}

impl fmt::Display for Token {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::LangTag(tag) => write!(f, "language tag `{}`", tag.as_str()),
			Self::Iri(iri) => write!(f, "IRI <{}>", iri.as_str()),
			Self::StringLiteral(string) => {
				write!(f, "string literal \"{}\"", DisplayStringLiteral(string))
			}
			Self::BlankNodeLabel(label) => write!(f, "blank node label `{}`", label.as_str()),
			Self::Dot => write!(f, "dot `.`"),
			Self::Carets => write!(f, "carets `^^`"),
		}
	}
}

/// Wrapper to display string literals with N-Triples escapes.
pub struct DisplayStringLiteral<'a>(pub &'a str);

impl<'a> fmt::Display for DisplayStringLiteral<'a> {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		use fmt::Write;
		for c in self.0.chars() {
			match c {
				'"' => f.write_str("\\\""),
				'\\' => f.write_str("\\\\"),
				'\n' => f.write_str("\\n"),
				'\r' => f.write_str("\\r"),
				'\t' => f.write_str("\\t"),
				'\u{08}' => f.write_str("\\b"),
				'\u{0c}' => f.write_str("\\f"),
				c => f.write_char(c),
			}?
		}

		Ok(())
	}
}

/// Lexer position, in bytes from the start of the line.
#[derive(Default)]
struct Position {
	/// Start of the token being lexed.
	start: usize,
	end: usize,
	last_start: usize,
}

impl Position {
	fn current(&self) -> Span {
		Span::new(self.start, self.end)
	}

	fn end(&self) -> Span {
		Span::new(self.end, self.end)
	}

	fn last(&self) -> Span {
		Span::new(self.last_start, self.end)
	}

	fn since(&self, start: usize) -> Span {
		Span::new(start, self.end)
	}

	fn advance(&mut self, len: usize) {
		self.last_start = self.end;
		self.end += len;
	}

	fn begin(&mut self) {
		self.start = self.end
	}
}

/// Lexer.
///
/// Changes the characters of a single line into a `Token` iterator.
/// Comments are skipped, and the end of the line is reported as a `None`
/// token.
pub struct Lexer<C: Iterator<Item = DecodedChar>> {
	chars: Peekable<C>,
	pos: Position,
	lookahead: Option<Meta<Token, Span>>,

	/// Dots split off the end of a blank node label.
	pending: VecDeque<Meta<Token, Span>>,
}

impl<C: Iterator<Item = DecodedChar>> Lexer<C> {
	pub fn new(chars: C) -> Self {
		Self {
			chars: chars.peekable(),
			pos: Position::default(),
			lookahead: None,
			pending: VecDeque::new(),
		}
	}

	fn peek_char(&mut self) -> Option<char> {
		self.chars.peek().map(|c| c.into_char())
	}

	fn next_char(&mut self) -> Option<char> {
		let c = self.chars.next()?;
		self.pos.advance(c.len());
		Some(c.into_char())
	}

	/// Skips white spaces and comments.
	///
	/// Comments start with `#` outside of an IRI or string literal and run
	/// to the end of the line.
	fn skip_whitespaces(&mut self) {
		while let Some(c) = self.peek_char() {
			match c {
				' ' | '\t' => {
					self.next_char();
				}
				'#' => while self.next_char().is_some() {},
				_ => break,
			}
		}

		self.pos.begin()
	}

	/// Parses the rest of a lang tag, after the first `@` character.
	fn next_langtag(&mut self) -> Result<Meta<LangTagBuf, Span>, Meta<Error, Span>> {
		let mut tag = String::new();

		while let Some(c) = self.peek_char().filter(char::is_ascii_alphabetic) {
			self.next_char();
			tag.push(c)
		}

		if tag.is_empty() {
			return Err(Meta(Error::InvalidLangTag, self.pos.current()));
		}

		while let Some('-') = self.peek_char() {
			self.next_char();
			tag.push('-');

			let mut empty_subtag = true;
			while let Some(c) = self.peek_char().filter(char::is_ascii_alphanumeric) {
				self.next_char();
				tag.push(c);
				empty_subtag = false
			}

			if empty_subtag {
				return Err(Meta(Error::InvalidLangTag, self.pos.current()));
			}
		}

		match LangTagBuf::new(tag) {
			Ok(tag) => Ok(Meta(tag, self.pos.current())),
			Err(_) => Err(Meta(Error::InvalidLangTag, self.pos.current())),
		}
	}

	/// Parses an IRI, starting after the first `<` until the closing `>`.
	fn next_iri(&mut self) -> Result<Meta<IriBuf, Span>, Meta<Error, Span>> {
		let mut iri = String::new();

		loop {
			match self.next_char() {
				Some('>') => break,
				Some('\\') => {
					let start = self.pos.last().start();
					let c = match self.next_char() {
						Some('u') => self.next_uchar(start, 4)?,
						Some('U') => self.next_uchar(start, 8)?,
						Some(_) => return Err(Meta(Error::InvalidEscape, self.pos.since(start))),
						None => return Err(Meta(Error::UnterminatedIri, self.pos.current())),
					};

					iri.push(c)
				}
				Some(c) => {
					if matches!(
						c,
						'\u{00}'..='\u{20}' | '<' | '"' | '{' | '}' | '|' | '^' | '`'
					) {
						return Err(Meta(Error::IllegalCharacter(c), self.pos.last()));
					}

					iri.push(c)
				}
				None => return Err(Meta(Error::UnterminatedIri, self.pos.current())),
			}
		}

		match IriBuf::new(iri) {
			Ok(iri) => Ok(Meta(iri, self.pos.current())),
			Err(e) => Err(Meta(Error::InvalidIri(e.0), self.pos.current())),
		}
	}

	/// Parses the hexadecimal digits of a `\u` or `\U` escape.
	///
	/// `start` is the offset of the backslash.
	fn next_uchar(&mut self, start: usize, len: u8) -> Result<char, Meta<Error, Span>> {
		let mut codepoint = 0;

		for _ in 0..len {
			match self.next_char().and_then(|c| c.to_digit(16)) {
				Some(d) => codepoint = codepoint << 4 | d,
				None => return Err(Meta(Error::InvalidEscape, self.pos.since(start))),
			}
		}

		char::from_u32(codepoint)
			.ok_or_else(|| Meta(Error::InvalidCodepoint(codepoint), self.pos.since(start)))
	}

	/// Parses a string literal, starting after the first `"` until the closing `"`.
	fn next_string_literal(&mut self) -> Result<Meta<String, Span>, Meta<Error, Span>> {
		let mut string = String::new();

		loop {
			match self.next_char() {
				Some('"') => break,
				Some('\\') => {
					let start = self.pos.last().start();
					let c = match self.next_char() {
						Some('u') => self.next_uchar(start, 4)?,
						Some('U') => self.next_uchar(start, 8)?,
						Some('t') => '\t',
						Some('b') => '\u{08}',
						Some('n') => '\n',
						Some('r') => '\r',
						Some('f') => '\u{0c}',
						Some('\'') => '\'',
						Some('"') => '"',
						Some('\\') => '\\',
						Some(_) => return Err(Meta(Error::InvalidEscape, self.pos.since(start))),
						None => return Err(Meta(Error::UnterminatedLiteral, self.pos.current())),
					};

					string.push(c)
				}
				Some(c @ ('\n' | '\r')) => {
					return Err(Meta(Error::IllegalCharacter(c), self.pos.last()))
				}
				Some(c) => string.push(c),
				None => return Err(Meta(Error::UnterminatedLiteral, self.pos.current())),
			}
		}

		Ok(Meta(string, self.pos.current()))
	}

	/// Parses a blank node label, starting after the first `_`.
	///
	/// A label may contain dots but never ends with one. Trailing dots are
	/// given back as `Dot` tokens.
	fn next_blank_node_label(&mut self) -> Result<Meta<BlankIdBuf, Span>, Meta<Error, Span>> {
		match self.next_char() {
			Some(':') => (),
			Some(c) => return Err(Meta(Error::IllegalCharacter(c), self.pos.last())),
			None => return Err(Meta(Error::InvalidBlankLabel, self.pos.current())),
		}

		let mut label = String::from("_:");
		match self.peek_char() {
			Some(c) if c.is_ascii_digit() || is_pn_chars_u(c) => {
				self.next_char();
				label.push(c)
			}
			_ => return Err(Meta(Error::InvalidBlankLabel, self.pos.current())),
		}

		let mut trailing_dots = 0;
		loop {
			match self.peek_char() {
				Some(c) if is_pn_chars(c) => {
					self.next_char();
					label.extend(std::iter::repeat('.').take(trailing_dots));
					label.push(c);
					trailing_dots = 0
				}
				Some('.') => {
					self.next_char();
					trailing_dots += 1
				}
				_ => break,
			}
		}

		let label_end = self.pos.end - trailing_dots;
		for offset in label_end..self.pos.end {
			self.pending
				.push_back(Meta(Token::Dot, Span::new(offset, offset + 1)));
		}

		// The label was checked character by character above, inner dots
		// included.
		let label = unsafe { BlankIdBuf::new_unchecked(label) };
		Ok(Meta(label, Span::new(self.pos.start, label_end)))
	}

	pub fn consume(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>> {
		if let Some(Meta(token, span)) = self.pending.pop_front() {
			return Ok(Meta(Some(token), span));
		}

		self.skip_whitespaces();
		match self.next_char() {
			Some('@') => {
				let Meta(tag, span) = self.next_langtag()?;
				Ok(Meta(Some(Token::LangTag(tag)), span))
			}
			Some('<') => {
				let Meta(iri, span) = self.next_iri()?;
				Ok(Meta(Some(Token::Iri(iri)), span))
			}
			Some('"') => {
				let Meta(string, span) = self.next_string_literal()?;
				Ok(Meta(Some(Token::StringLiteral(string)), span))
			}
			Some('_') => {
				let Meta(label, span) = self.next_blank_node_label()?;
				Ok(Meta(Some(Token::BlankNodeLabel(label)), span))
			}
			Some('.') => Ok(Meta(Some(Token::Dot), self.pos.current())),
			Some('^') => match self.next_char() {
				Some('^') => Ok(Meta(Some(Token::Carets), self.pos.current())),
				Some(c) => Err(Meta(Error::IllegalCharacter(c), self.pos.last())),
				None => Err(Meta(Error::UnexpectedEnd, self.pos.end())),
			},
			Some(c) => Err(Meta(Error::IllegalCharacter(c), self.pos.last())),
			None => Ok(Meta(None, self.pos.end())),
		}
	}

	#[allow(clippy::type_complexity)]
	pub fn peek(&mut self) -> Result<Meta<Option<&Token>, Span>, Meta<Error, Span>> {
		if self.lookahead.is_none() {
			if let Meta(Some(token), span) = self.consume()? {
				self.lookahead = Some(Meta(token, span));
			}
		}

		match &self.lookahead {
			Some(Meta(token, span)) => Ok(Meta(Some(token), *span)),
			None => Ok(Meta(None, self.pos.end())),
		}
	}

	#[allow(clippy::type_complexity, clippy::should_implement_trait)]
	pub fn next(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>> {
		match self.lookahead.take() {
			Some(Meta(token, span)) => Ok(Meta(Some(token), span)),
			None => self.consume(),
		}
	}
}

impl<C: Iterator<Item = DecodedChar>> Tokens for Lexer<C> {
	fn peek(&mut self) -> Result<Meta<Option<&Token>, Span>, Meta<Error, Span>> {
		self.peek()
	}

	fn next(&mut self) -> Result<Meta<Option<Token>, Span>, Meta<Error, Span>> {
		self.next()
	}
}

impl<C: Iterator<Item = DecodedChar>> Iterator for Lexer<C> {
	type Item = Result<Meta<Token, Span>, Meta<Error, Span>>;

	fn next(&mut self) -> Option<Self::Item> {
		match Lexer::next(self) {
			Ok(Meta(Some(token), span)) => Some(Ok(Meta(token, span))),
			Ok(Meta(None, _)) => None,
			Err(e) => Some(Err(e)),
		}
	}
}

fn is_pn_chars_base(c: char) -> bool {
	matches!(c, 'A'..='Z' | 'a'..='z' | '\u{00c0}'..='\u{00d6}' | '\u{00d8}'..='\u{00f6}' | '\u{00f8}'..='\u{02ff}' | '\u{0370}'..='\u{037d}' | '\u{037f}'..='\u{1fff}' | '\u{200c}'..='\u{200d}' | '\u{2070}'..='\u{218f}' | '\u{2c00}'..='\u{2fef}' | '\u{3001}'..='\u{d7ff}' | '\u{f900}'..='\u{fdcf}' | '\u{fdf0}'..='\u{fffd}' | '\u{10000}'..='\u{effff}')
}

fn is_pn_chars_u(c: char) -> bool {
	is_pn_chars_base(c) || matches!(c, '_' | ':')
}

fn is_pn_chars(c: char) -> bool {
	is_pn_chars_u(c)
		|| matches!(c, '-' | '0'..='9' | '\u{00b7}' | '\u{0300}'..='\u{036f}' | '\u{203f}'..='\u{2040}')
}
