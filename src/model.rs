//! Built-in RDF model.
//!
//! Terms and statements built by [`ModelFactory`]. Statements display as
//! canonical N-Triples (or N-Quads) lines.
use crate::{factory::Factory, lexing::DisplayStringLiteral};
use iref::IriBuf;
use langtag::LangTagBuf;
use std::{collections::HashMap, fmt};

/// Blank node.
///
/// Two blank nodes are equal only if they were built in the same session
/// from the same label.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BlankNode {
	id: u64,
	label: String,
}

impl BlankNode {
	/// Identifier of the blank node, unique for the factory that built it.
	pub fn id(&self) -> u64 {
		self.id
	}

	/// Label of the blank node, without the `_:` prefix.
	pub fn label(&self) -> &str {
		&self.label
	}
}

impl fmt::Display for BlankNode {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "_:{}", self.label)
	}
}

/// IRI or blank node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Subject {
	Iri(IriBuf),
	Blank(BlankNode),
}

impl fmt::Display for Subject {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{}>", iri.as_str()),
			Self::Blank(node) => fmt::Display::fmt(node, f),
		}
	}
}

/// Literal tag.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum LiteralTag {
	None,
	Language(LangTagBuf),
	Datatype(IriBuf),
}

/// Literal value.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Literal {
	lexical: String,
	tag: LiteralTag,
}

impl Literal {
	pub fn new(lexical: String, tag: LiteralTag) -> Self {
		Self { lexical, tag }
	}

	pub fn lexical(&self) -> &str {
		&self.lexical
	}

	pub fn tag(&self) -> &LiteralTag {
		&self.tag
	}

	pub fn language(&self) -> Option<&LangTagBuf> {
		match &self.tag {
			LiteralTag::Language(lang) => Some(lang),
			_ => None,
		}
	}

	pub fn datatype(&self) -> Option<&IriBuf> {
		match &self.tag {
			LiteralTag::Datatype(iri) => Some(iri),
			_ => None,
		}
	}
}

impl fmt::Display for Literal {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "\"{}\"", DisplayStringLiteral(&self.lexical))?;
		match &self.tag {
			LiteralTag::None => Ok(()),
			LiteralTag::Language(lang) => write!(f, "@{}", lang.as_str()),
			LiteralTag::Datatype(iri) => write!(f, "^^<{}>", iri.as_str()),
		}
	}
}

/// RDF term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Term {
	Iri(IriBuf),
	Blank(BlankNode),
	Literal(Literal),
}

impl Term {
	pub fn is_literal(&self) -> bool {
		matches!(self, Self::Literal(_))
	}

	pub fn as_literal(&self) -> Option<&Literal> {
		match self {
			Self::Literal(literal) => Some(literal),
			_ => None,
		}
	}

	pub fn into_subject(self) -> Option<Subject> {
		match self {
			Self::Iri(iri) => Some(Subject::Iri(iri)),
			Self::Blank(node) => Some(Subject::Blank(node)),
			Self::Literal(_) => None,
		}
	}
}

impl From<Subject> for Term {
	fn from(subject: Subject) -> Self {
		match subject {
			Subject::Iri(iri) => Self::Iri(iri),
			Subject::Blank(node) => Self::Blank(node),
		}
	}
}

impl fmt::Display for Term {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		match self {
			Self::Iri(iri) => write!(f, "<{}>", iri.as_str()),
			Self::Blank(node) => fmt::Display::fmt(node, f),
			Self::Literal(literal) => fmt::Display::fmt(literal, f),
		}
	}
}

/// RDF statement, with an optional graph label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Statement {
	pub subject: Subject,
	pub predicate: IriBuf,
	pub object: Term,
	pub graph: Option<Subject>,
}

impl Statement {
	/// Writes the statement as an N-Triples (or N-Quads) line, without the
	/// line terminator.
	pub fn n3(&self) -> String {
		self.to_string()
	}
}

impl fmt::Display for Statement {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"{} <{}> {}",
			self.subject,
			self.predicate.as_str(),
			self.object
		)?;

		if let Some(graph) = &self.graph {
			write!(f, " {graph}")?;
		}

		write!(f, " .")
	}
}

/// Factory building the terms of this module.
///
/// Blank nodes are interned by label for the duration of a session.
#[derive(Debug, Default)]
pub struct ModelFactory {
	blank_nodes: HashMap<String, BlankNode>,
	next_id: u64,
}

impl ModelFactory {
	pub fn new() -> Self {
		Self::default()
	}
}

impl Factory for ModelFactory {
	type Subject = Subject;
	type Predicate = IriBuf;
	type Object = Term;
	type Statement = Statement;

	fn iri_ref(&mut self, iri: IriBuf) -> Subject {
		Subject::Iri(iri)
	}

	fn blank_node(&mut self, label: String) -> Subject {
		let next_id = &mut self.next_id;
		let node = self.blank_nodes.entry(label).or_insert_with_key(|label| {
			let node = BlankNode {
				id: *next_id,
				label: label.clone(),
			};
			*next_id += 1;
			node
		});

		Subject::Blank(node.clone())
	}

	fn predicate(&mut self, iri: IriBuf) -> IriBuf {
		iri
	}

	fn literal(&mut self, lexical: String) -> Term {
		Term::Literal(Literal::new(lexical, LiteralTag::None))
	}

	fn tagged_literal(&mut self, lexical: String, lang: LangTagBuf) -> Term {
		Term::Literal(Literal::new(lexical, LiteralTag::Language(lang)))
	}

	fn typed_literal(&mut self, lexical: String, datatype: IriBuf) -> Term {
		Term::Literal(Literal::new(lexical, LiteralTag::Datatype(datatype)))
	}

	fn statement(
		&mut self,
		subject: Subject,
		predicate: IriBuf,
		object: Term,
		graph: Option<Subject>,
	) -> Statement {
		Statement {
			subject,
			predicate,
			object,
			graph,
		}
	}

	/// Forgets every blank node label.
	///
	/// Identifiers keep increasing, so blank nodes of different sessions
	/// never compare equal.
	fn reset(&mut self) {
		self.blank_nodes.clear()
	}
}
