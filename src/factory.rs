//! Term and statement construction.
use crate::{GraphLabel, Literal, Object, Quad, Subject};
use iref::IriBuf;
use langtag::LangTagBuf;
use locspan::Meta;
use rdf_types::BlankIdBuf;

/// Builds terms and statements in a caller chosen representation.
///
/// The parser calls the term constructors in the order the terms appear on
/// the line (subject, predicate, object, graph), and then `statement`, only
/// once the whole line is known to be well formed.
///
/// A factory may keep state across the statements of a parse session, such
/// as a blank node interning table. That state is cleared by [`reset`].
///
/// [`reset`]: Factory::reset
pub trait Factory {
	/// Subject representation, also used for graph labels.
	type Subject;

	type Predicate;

	/// Object representation.
	///
	/// IRIs and blank nodes in object position are built as subjects first.
	type Object: From<Self::Subject>;

	type Statement;

	fn iri_ref(&mut self, iri: IriBuf) -> Self::Subject;

	/// Builds a blank node from its label, without the `_:` prefix.
	///
	/// Within a session, the same label must denote the same blank node.
	fn blank_node(&mut self, label: String) -> Self::Subject;

	fn predicate(&mut self, iri: IriBuf) -> Self::Predicate;

	fn literal(&mut self, lexical: String) -> Self::Object;

	fn tagged_literal(&mut self, lexical: String, lang: LangTagBuf) -> Self::Object;

	fn typed_literal(&mut self, lexical: String, datatype: IriBuf) -> Self::Object;

	fn statement(
		&mut self,
		subject: Self::Subject,
		predicate: Self::Predicate,
		object: Self::Object,
		graph: Option<Self::Subject>,
	) -> Self::Statement;

	/// Starts a new session.
	///
	/// Blank nodes built after a reset never denote the blank nodes built
	/// before it.
	fn reset(&mut self);
}

/// Local label of a blank node identifier.
fn label(id: BlankIdBuf) -> String {
	let id = id.as_str();
	id.strip_prefix("_:").unwrap_or(id).to_owned()
}

impl Subject {
	pub fn build<F: Factory>(self, factory: &mut F) -> F::Subject {
		match self {
			Self::Iri(iri) => factory.iri_ref(iri),
			Self::Blank(id) => factory.blank_node(label(id)),
		}
	}
}

impl GraphLabel {
	pub fn build<F: Factory>(self, factory: &mut F) -> F::Subject {
		match self {
			Self::Iri(iri) => factory.iri_ref(iri),
			Self::Blank(id) => factory.blank_node(label(id)),
		}
	}
}

impl Literal {
	pub fn build<F: Factory>(self, factory: &mut F) -> F::Object {
		match self {
			Self::String(lexical) => factory.literal(lexical),
			Self::LangString(lexical, lang) => factory.tagged_literal(lexical, lang),
			Self::TypedString(lexical, datatype) => factory.typed_literal(lexical, datatype),
		}
	}
}

impl Object {
	pub fn build<F: Factory>(self, factory: &mut F) -> F::Object {
		match self {
			Self::Iri(iri) => factory.iri_ref(iri).into(),
			Self::Blank(id) => factory.blank_node(label(id)).into(),
			Self::Literal(literal) => literal.build(factory),
		}
	}
}

impl Quad {
	/// Builds the statement, left to right.
	pub fn build<F: Factory>(self, factory: &mut F) -> F::Statement {
		let Meta(subject, _) = self.subject;
		let Meta(predicate, _) = self.predicate;
		let Meta(object, _) = self.object;

		let subject = subject.build(factory);
		let predicate = factory.predicate(predicate);
		let object = object.build(factory);
		let graph = self.graph.map(|Meta(graph, _)| graph.build(factory));
		factory.statement(subject, predicate, object, graph)
	}
}
