use crate::{lexing::Lexer, parsing, Factory, ParseError, Statements};
use decoded_char::Utf8Decoded;
use locspan::Meta;
use std::io::BufRead;

/// Input format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Format {
	/// One triple per line.
	#[default]
	NTriples,

	/// One triple per line, with an optional graph label before the `.`.
	NQuads,
}

/// Error policy of a stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
	/// The first malformed line ends the stream with an error.
	#[default]
	Strict,

	/// Malformed lines are skipped.
	Lenient,
}

/// Parser options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ParserOptions {
	pub format: Format,
	pub mode: Mode,

	/// Keeps the errors of the lines skipped in lenient mode.
	///
	/// See [`Statements::take_diagnostics`].
	pub diagnostics: bool,
}

impl ParserOptions {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_format(mut self, format: Format) -> Self {
		self.format = format;
		self
	}

	pub fn with_mode(mut self, mode: Mode) -> Self {
		self.mode = mode;
		self
	}

	pub fn with_diagnostics(mut self) -> Self {
		self.diagnostics = true;
		self
	}
}

/// N-Triples parser.
///
/// Borrows the factory used to build statements for as long as it lives.
/// Streams built with [`for_reader`](Self::for_reader) take that borrow over.
pub struct NtParser<'f, F> {
	factory: &'f mut F,
	options: ParserOptions,
}

impl<'f, F: Factory> NtParser<'f, F> {
	pub fn new(factory: &'f mut F, options: ParserOptions) -> Self {
		Self { factory, options }
	}

	pub fn strict(factory: &'f mut F) -> Self {
		Self::new(factory, ParserOptions::new())
	}

	pub fn lenient(factory: &'f mut F) -> Self {
		Self::new(factory, ParserOptions::new().with_mode(Mode::Lenient))
	}

	pub fn options(&self) -> &ParserOptions {
		&self.options
	}

	pub fn factory(&self) -> &F {
		&*self.factory
	}

	pub fn factory_mut(&mut self) -> &mut F {
		&mut *self.factory
	}

	/// Parses a single line, reporting errors on line 1.
	///
	/// Returns `None` if the line is blank or only holds a comment.
	pub fn parse(&mut self, text: &str) -> Result<Option<F::Statement>, ParseError> {
		self.parse_line(text, 1)
	}

	/// Parses a single line, reporting errors on the given line.
	pub fn parse_line(
		&mut self,
		text: &str,
		line: usize,
	) -> Result<Option<F::Statement>, ParseError> {
		parse_statement(text, line, self.options.format, &mut *self.factory)
	}

	/// Parses a single line, discarding any error.
	pub fn parse_or_none(&mut self, text: &str) -> Option<F::Statement> {
		self.parse(text).ok().flatten()
	}

	/// Lazily parses every line of `reader`.
	pub fn for_reader<R: BufRead>(self, reader: R) -> Statements<'f, R, F> {
		Statements::new(reader, self.factory, self.options)
	}
}

/// Parses one line with the given factory.
///
/// A trailing line terminator is ignored.
pub(crate) fn parse_statement<F: Factory>(
	text: &str,
	line: usize,
	format: Format,
	factory: &mut F,
) -> Result<Option<F::Statement>, ParseError> {
	let text = text.trim_end_matches(|c| c == '\n' || c == '\r');
	let mut lexer = Lexer::new(Utf8Decoded::new(text.chars()));
	match parsing::parse_line(&mut lexer, format) {
		Ok(Some(Meta(quad, _))) => {
			log::trace!("parsed statement on line {line}");
			Ok(Some(quad.build(factory)))
		}
		Ok(None) => Ok(None),
		Err(e) => Err(ParseError::new(text, line, e)),
	}
}
