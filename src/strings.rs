//! Plain string statements.
use crate::{factory::Factory, lexing::DisplayStringLiteral};
use iref::IriBuf;
use langtag::LangTagBuf;

/// Statement as the surface text of its terms.
pub type StringStatement = (String, String, String, Option<String>);

/// Factory rendering each term as its N-Triples surface text.
///
/// Blank nodes are identified by their label alone, so identity carries
/// over a reset.
#[derive(Debug, Clone, Copy, Default)]
pub struct StringFactory;

impl Factory for StringFactory {
	type Subject = String;
	type Predicate = String;
	type Object = String;
	type Statement = StringStatement;

	fn iri_ref(&mut self, iri: IriBuf) -> String {
		format!("<{}>", iri.as_str())
	}

	fn blank_node(&mut self, label: String) -> String {
		format!("_:{label}")
	}

	fn predicate(&mut self, iri: IriBuf) -> String {
		self.iri_ref(iri)
	}

	fn literal(&mut self, lexical: String) -> String {
		format!("\"{}\"", DisplayStringLiteral(&lexical))
	}

	fn tagged_literal(&mut self, lexical: String, lang: LangTagBuf) -> String {
		format!("\"{}\"@{}", DisplayStringLiteral(&lexical), lang.as_str())
	}

	fn typed_literal(&mut self, lexical: String, datatype: IriBuf) -> String {
		format!(
			"\"{}\"^^<{}>",
			DisplayStringLiteral(&lexical),
			datatype.as_str()
		)
	}

	fn statement(
		&mut self,
		subject: String,
		predicate: String,
		object: String,
		graph: Option<String>,
	) -> StringStatement {
		(subject, predicate, object, graph)
	}

	fn reset(&mut self) {}
}
