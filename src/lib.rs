//! N-Triples is a line-based, plain text serialization of RDF graphs, and
//! N-Quads extends it with an optional graph label on each line.
//! This library provides a streaming parser for both formats that lets the
//! caller choose how terms and statements are represented in memory.
//!
//! ## Basic usage
//!
//! The parser does not build terms by itself. It hands the lexical content of
//! each term to a [`Factory`], which builds the caller's own representation.
//! Two factories are provided: [`model::ModelFactory`] builds the typed terms
//! of the [`model`] module, and [`strings::StringFactory`] renders every term
//! back to its N-Triples surface text.
//!
//! ```rust
//! use ntriples_syntax::{model::ModelFactory, NtParser};
//!
//! let mut factory = ModelFactory::new();
//! let mut parser = NtParser::strict(&mut factory);
//!
//! let statement = parser
//! 	.parse("<abc:def> <ghi:jkl> \"hello\"@en .")
//! 	.unwrap()
//! 	.unwrap();
//! assert_eq!(statement.to_string(), "<abc:def> <ghi:jkl> \"hello\"@en .");
//!
//! let error = parser.parse_line("<abc:def> <ghi:jkl> <mno:pqr>", 42).unwrap_err();
//! assert_eq!(error.line, 42);
//! ```
//!
//! Whole documents are read lazily from any [`std::io::BufRead`], one line at
//! a time:
//!
//! ```rust
//! use ntriples_syntax::{strings::StringFactory, NtParser};
//!
//! let input = "# comment\n<a:s> <a:p> _:o .\n<a:s> <a:p> \"o\" .\n";
//! let mut factory = StringFactory;
//! let statements: Vec<_> = NtParser::strict(&mut factory)
//! 	.for_reader(input.as_bytes())
//! 	.collect::<Result<_, _>>()
//! 	.unwrap();
//!
//! assert_eq!(statements.len(), 2);
//! assert_eq!(statements[1].2, "\"o\"");
//! ```
use iref::IriBuf;
use langtag::LangTagBuf;
use locspan::{Meta, Span};

mod error;
pub mod factory;
pub mod lexing;
pub mod model;
mod parser;
pub mod parsing;
mod stream;
pub mod strings;

pub use error::{Error, ErrorKind, ParseError};
pub use factory::Factory;
pub use parser::{Format, Mode, NtParser, ParserOptions};
pub use rdf_types::BlankIdBuf;
pub use stream::Statements;

/// Subject.
#[derive(Clone, Debug)]
pub enum Subject {
	Iri(IriBuf),
	Blank(BlankIdBuf),
}

/// Literal.
///
/// A literal carries at most one of a language tag or a datatype.
#[derive(Clone, Debug)]
pub enum Literal {
	String(String),
	LangString(String, LangTagBuf),
	TypedString(String, IriBuf),
}

/// Object.
#[derive(Clone, Debug)]
pub enum Object {
	Iri(IriBuf),
	Blank(BlankIdBuf),
	Literal(Literal),
}

/// Graph Label.
#[derive(Clone, Debug)]
pub enum GraphLabel {
	Iri(IriBuf),
	Blank(BlankIdBuf),
}

/// Syntactic statement, as it appears on a line.
///
/// Each component is located by its byte span in the line.
#[derive(Clone, Debug)]
pub struct Quad {
	pub subject: Meta<Subject, Span>,
	pub predicate: Meta<IriBuf, Span>,
	pub object: Meta<Object, Span>,
	pub graph: Option<Meta<GraphLabel, Span>>,
}
