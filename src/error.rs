use crate::{lexing, parsing};
use locspan::{Meta, Span};
use std::{fmt, ops::Range, str::Utf8Error};

/// Kind of a [`ParseError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	UnterminatedLiteral,
	UnterminatedIri,
	InvalidEscape,
	IllegalCharacter,
	InvalidCodepoint,
	InvalidIri,
	InvalidLangTag,
	InvalidBlankLabel,
	InvalidUtf8,
	UnexpectedTerm,
	MissingTerm,
	MissingTerminator,
	TrailingContent,
	ConflictingLiteralTags,
}

impl ErrorKind {
	/// Checks if the error was raised by the lexer.
	///
	/// Tokens are lexed as the grammar asks for them, so a lexical error
	/// further down the line is not reported if an earlier term already
	/// breaks a grammar rule.
	pub fn is_lexical(&self) -> bool {
		!matches!(
			self,
			Self::UnexpectedTerm
				| Self::MissingTerm
				| Self::MissingTerminator
				| Self::TrailingContent
				| Self::ConflictingLiteralTags
		)
	}
}

impl fmt::Display for ErrorKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		fmt::Debug::fmt(self, f)
	}
}

impl From<&lexing::Error> for ErrorKind {
	fn from(e: &lexing::Error) -> Self {
		match e {
			lexing::Error::UnterminatedLiteral => Self::UnterminatedLiteral,
			lexing::Error::UnterminatedIri => Self::UnterminatedIri,
			lexing::Error::InvalidEscape => Self::InvalidEscape,
			lexing::Error::IllegalCharacter(_) | lexing::Error::UnexpectedEnd => {
				Self::IllegalCharacter
			}
			lexing::Error::InvalidCodepoint(_) => Self::InvalidCodepoint,
			lexing::Error::InvalidIri(_) => Self::InvalidIri,
			lexing::Error::InvalidLangTag => Self::InvalidLangTag,
			lexing::Error::InvalidBlankLabel => Self::InvalidBlankLabel,
		}
	}
}

impl From<&parsing::Error> for ErrorKind {
	fn from(e: &parsing::Error) -> Self {
		match e {
			parsing::Error::Lexer(e) => e.into(),
			parsing::Error::UnexpectedTerm(_, _) => Self::UnexpectedTerm,
			parsing::Error::MissingTerm(_) => Self::MissingTerm,
			parsing::Error::MissingTerminator(_) => Self::MissingTerminator,
			parsing::Error::TrailingContent(_) => Self::TrailingContent,
			parsing::Error::ConflictingLiteralTags => Self::ConflictingLiteralTags,
		}
	}
}

/// Error raised on a malformed line.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}, column {column}: {message}")]
pub struct ParseError {
	/// Line number, starting at 1.
	pub line: usize,

	/// Column of the offending fragment, in characters, starting at 1.
	pub column: usize,

	pub kind: ErrorKind,

	/// Source text of the offending fragment.
	///
	/// Empty when the error is at the end of the line.
	pub fragment: String,

	pub message: String,

	/// Byte range of the offending fragment in the line.
	pub bytes: Range<usize>,
}

impl ParseError {
	pub(crate) fn new(text: &str, line: usize, Meta(e, span): Meta<parsing::Error, Span>) -> Self {
		let bytes = span.start()..span.end();
		Self {
			line,
			column: column_of(text, bytes.start),
			kind: (&e).into(),
			fragment: text.get(bytes.clone()).unwrap_or_default().to_owned(),
			message: e.to_string(),
			bytes,
		}
	}

	pub(crate) fn invalid_utf8(bytes: &[u8], line: usize, e: Utf8Error) -> Self {
		let valid = &bytes[..e.valid_up_to()];
		let end = e.valid_up_to() + e.error_len().unwrap_or(bytes.len() - e.valid_up_to());
		Self {
			line,
			column: String::from_utf8_lossy(valid).chars().count() + 1,
			kind: ErrorKind::InvalidUtf8,
			fragment: String::from_utf8_lossy(&bytes[e.valid_up_to()..end]).into_owned(),
			message: e.to_string(),
			bytes: e.valid_up_to()..end,
		}
	}
}

fn column_of(text: &str, offset: usize) -> usize {
	text.get(..offset)
		.map_or(offset, |prefix| prefix.chars().count())
		+ 1
}

/// Error raised while reading a stream of statements.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Parse(#[from] ParseError),

	#[error(transparent)]
	Io(#[from] std::io::Error),
}

impl Error {
	pub fn as_parse_error(&self) -> Option<&ParseError> {
		match self {
			Self::Parse(e) => Some(e),
			Self::Io(_) => None,
		}
	}
}
