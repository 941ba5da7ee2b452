use crate::{
	lexing::{self, Token, Tokens},
	Format, GraphLabel, Literal, Object, Quad, Subject,
};
use iref::IriBuf;
use locspan::{Meta, Span};
use std::fmt;

/// Position of a term in a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Expected {
	Subject,
	Predicate,
	Object,
	Datatype,
}

impl fmt::Display for Expected {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Subject => write!(f, "subject (IRI or blank node)"),
			Self::Predicate => write!(f, "predicate IRI"),
			Self::Object => write!(f, "object (IRI, blank node or literal)"),
			Self::Datatype => write!(f, "datatype IRI"),
		}
	}
}

/// Unexpected token or end of line.
#[derive(Debug, thiserror::Error)]
pub enum Unexpected {
	#[error("{0}")]
	Token(Token),

	#[error("end of line")]
	EndOfLine,
}

impl From<Option<Token>> for Unexpected {
	fn from(value: Option<Token>) -> Self {
		match value {
			Some(token) => Unexpected::Token(token),
			None => Unexpected::EndOfLine,
		}
	}
}

/// Grammar error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Lexer(#[from] lexing::Error),

	#[error("expected {0}, found {1}")]
	UnexpectedTerm(Expected, Token),

	#[error("expected {0}, found end of line")]
	MissingTerm(Expected),

	#[error("expected `.`, found {0}")]
	MissingTerminator(Unexpected),

	#[error("unexpected {0} after `.`")]
	TrailingContent(Token),

	#[error("literal has both a language tag and a datatype")]
	ConflictingLiteralTags,
}

pub type MetaError = Meta<Error, Span>;

fn lexer_error(Meta(e, span): Meta<lexing::Error, Span>) -> MetaError {
	Meta(Error::Lexer(e), span)
}

fn unexpected(expected: Expected, Meta(token, span): Meta<Option<Token>, Span>) -> MetaError {
	match token {
		Some(token) => Meta(Error::UnexpectedTerm(expected, token), span),
		None => Meta(Error::MissingTerm(expected), span),
	}
}

pub trait Parse: Sized {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, MetaError>;
}

impl Parse for Subject {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, MetaError> {
		match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			other => Err(unexpected(Expected::Subject, other)),
		}
	}
}

/// Parses a predicate.
impl Parse for IriBuf {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, MetaError> {
		match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(iri, span)),
			other => Err(unexpected(Expected::Predicate, other)),
		}
	}
}

/// Parses the optional tag of a literal, after its string.
///
/// Rejects any literal followed by both a language tag and a datatype,
/// in either order.
fn parse_literal<L: Tokens>(
	lexer: &mut L,
	Meta(string, string_span): Meta<String, Span>,
) -> Result<Meta<Literal, Span>, MetaError> {
	let Meta(token, span) = lexer.peek().map_err(lexer_error)?;
	let (is_lang_tag, is_carets) = (
		matches!(token, Some(Token::LangTag(_))),
		matches!(token, Some(Token::Carets)),
	);

	let literal = if is_lang_tag {
		let tag = match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::LangTag(tag)), _) => tag,
			other => return Err(unexpected(Expected::Object, other)),
		};

		Meta(
			Literal::LangString(string, tag),
			Span::new(string_span.start(), span.end()),
		)
	} else if is_carets {
		lexer.next().map_err(lexer_error)?;
		match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::Iri(iri)), iri_span) => Meta(
				Literal::TypedString(string, iri),
				Span::new(string_span.start(), iri_span.end()),
			),
			Meta(Some(Token::LangTag(_)), tag_span) => {
				return Err(Meta(Error::ConflictingLiteralTags, tag_span))
			}
			other => return Err(unexpected(Expected::Datatype, other)),
		}
	} else {
		return Ok(Meta(Literal::String(string), string_span));
	};

	let Meta(token, span) = lexer.peek().map_err(lexer_error)?;
	let conflicting = match token {
		Some(Token::LangTag(_)) => is_carets,
		Some(Token::Carets) => is_lang_tag,
		_ => false,
	};

	if conflicting {
		return Err(Meta(Error::ConflictingLiteralTags, span));
	}

	Ok(literal)
}

impl Parse for Object {
	fn parse<L: Tokens>(lexer: &mut L) -> Result<Meta<Self, Span>, MetaError> {
		match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::Iri(iri)), span) => Ok(Meta(Self::Iri(iri), span)),
			Meta(Some(Token::BlankNodeLabel(label)), span) => Ok(Meta(Self::Blank(label), span)),
			Meta(Some(Token::StringLiteral(string)), span) => {
				let Meta(literal, span) = parse_literal(lexer, Meta(string, span))?;
				Ok(Meta(Self::Literal(literal), span))
			}
			other => Err(unexpected(Expected::Object, other)),
		}
	}
}

impl Quad {
	/// Parses a statement and its terminator.
	///
	/// The graph label is only accepted in the N-Quads format.
	pub fn parse_with<L: Tokens>(
		lexer: &mut L,
		format: Format,
	) -> Result<Meta<Self, Span>, MetaError> {
		let subject = Subject::parse(lexer)?;
		let predicate = IriBuf::parse(lexer)?;
		let object = Object::parse(lexer)?;

		let graph = match format {
			Format::NQuads => {
				let Meta(token, _) = lexer.peek().map_err(lexer_error)?;
				if matches!(token, Some(Token::Iri(_) | Token::BlankNodeLabel(_))) {
					match lexer.next().map_err(lexer_error)? {
						Meta(Some(Token::Iri(iri)), span) => Some(Meta(GraphLabel::Iri(iri), span)),
						Meta(Some(Token::BlankNodeLabel(label)), span) => {
							Some(Meta(GraphLabel::Blank(label), span))
						}
						Meta(other, span) => {
							return Err(Meta(Error::MissingTerminator(other.into()), span))
						}
					}
				} else {
					None
				}
			}
			Format::NTriples => None,
		};

		let end = match lexer.next().map_err(lexer_error)? {
			Meta(Some(Token::Dot), span) => span.end(),
			Meta(other, span) => return Err(Meta(Error::MissingTerminator(other.into()), span)),
		};

		let span = Span::new(subject.1.start(), end);
		Ok(Meta(
			Self {
				subject,
				predicate,
				object,
				graph,
			},
			span,
		))
	}
}

/// Parses a whole line.
///
/// Returns `None` if the line is blank or only holds a comment.
/// Anything but a comment after the terminating `.` is an error.
pub fn parse_line<L: Tokens>(
	lexer: &mut L,
	format: Format,
) -> Result<Option<Meta<Quad, Span>>, MetaError> {
	let Meta(token, _) = lexer.peek().map_err(lexer_error)?;
	if token.is_none() {
		return Ok(None);
	}

	let quad = Quad::parse_with(lexer, format)?;
	match lexer.next().map_err(lexer_error)? {
		Meta(None, _) => Ok(Some(quad)),
		Meta(Some(token), span) => Err(Meta(Error::TrailingContent(token), span)),
	}
}
