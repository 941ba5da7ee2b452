use iref::IriBuf;
use langtag::LangTagBuf;
use ntriples_syntax::{
	model::{LiteralTag, ModelFactory, Subject, Term},
	strings::StringFactory,
	ErrorKind, Factory, Format, NtParser, ParserOptions,
};

/// Factory recording every call it receives.
#[derive(Default)]
struct Recorder {
	calls: Vec<String>,
	resets: usize,
}

impl Factory for Recorder {
	type Subject = String;
	type Predicate = String;
	type Object = String;
	type Statement = usize;

	fn iri_ref(&mut self, iri: IriBuf) -> String {
		self.calls.push(format!("iri_ref {}", iri.as_str()));
		iri.as_str().to_owned()
	}

	fn blank_node(&mut self, label: String) -> String {
		self.calls.push(format!("blank_node {label}"));
		label
	}

	fn predicate(&mut self, iri: IriBuf) -> String {
		self.calls.push(format!("predicate {}", iri.as_str()));
		iri.as_str().to_owned()
	}

	fn literal(&mut self, lexical: String) -> String {
		self.calls.push(format!("literal {lexical}"));
		lexical
	}

	fn tagged_literal(&mut self, lexical: String, lang: LangTagBuf) -> String {
		self.calls
			.push(format!("tagged_literal {lexical} {}", lang.as_str()));
		lexical
	}

	fn typed_literal(&mut self, lexical: String, datatype: IriBuf) -> String {
		self.calls
			.push(format!("typed_literal {lexical} {}", datatype.as_str()));
		lexical
	}

	fn statement(
		&mut self,
		_subject: String,
		_predicate: String,
		_object: String,
		graph: Option<String>,
	) -> usize {
		self.calls.push(format!("statement {}", graph.is_some()));
		self.calls.len()
	}

	fn reset(&mut self) {
		self.resets += 1
	}
}

#[test]
fn scenario_a() {
	let mut factory = ModelFactory::new();
	let statement = NtParser::strict(&mut factory)
		.parse("<abc:def> <ghi:jkl> <mno:pqr> .")
		.unwrap()
		.unwrap();

	assert_eq!(
		statement.subject,
		Subject::Iri(IriBuf::new("abc:def".to_owned()).unwrap())
	);
	assert_eq!(statement.predicate.as_str(), "ghi:jkl");
	assert_eq!(
		statement.object,
		Term::Iri(IriBuf::new("mno:pqr".to_owned()).unwrap())
	);
	assert!(statement.graph.is_none());
}

#[test]
fn scenario_b() {
	let mut factory = ModelFactory::new();
	let e = NtParser::strict(&mut factory)
		.parse_line("<abc:def> <ghi:jkl> <mno:pqr>", 42)
		.unwrap_err();

	assert_eq!(e.line, 42);
	assert_eq!(e.kind, ErrorKind::MissingTerminator);
}

#[test]
fn scenario_c() {
	let mut factory = ModelFactory::new();
	let mut parser = NtParser::strict(&mut factory);

	let tagged = parser.parse("<a:s> <a:p> \"hello\"@en .").unwrap().unwrap();
	let literal = tagged.object.as_literal().unwrap();
	assert_eq!(literal.lexical(), "hello");
	assert_eq!(literal.language().unwrap().as_str(), "en");
	assert!(literal.datatype().is_none());

	let typed = parser
		.parse("<a:s> <a:p> \"hello\"^^<http://example/dt> .")
		.unwrap()
		.unwrap();
	let literal = typed.object.as_literal().unwrap();
	assert_eq!(literal.lexical(), "hello");
	assert_eq!(literal.datatype().unwrap().as_str(), "http://example/dt");
	assert!(literal.language().is_none());

	let plain = parser.parse("<a:s> <a:p> \"hello\" .").unwrap().unwrap();
	assert_eq!(
		plain.object.as_literal().unwrap().tag(),
		&LiteralTag::None
	);

	let e = parser
		.parse("<a:s> <a:p> \"hello\"@en^^<http://example/dt> .")
		.unwrap_err();
	assert_eq!(e.kind, ErrorKind::ConflictingLiteralTags);
}

#[test]
fn parse_or_none() {
	let mut factory = StringFactory;
	let mut parser = NtParser::strict(&mut factory);

	assert!(parser.parse_or_none("<a:s> <a:p> <a:o>").is_none());
	assert!(parser.parse_or_none("# comment").is_none());
	assert_eq!(
		parser.parse_or_none("<a:s> <a:p> <a:o> .\n"),
		Some((
			"<a:s>".to_owned(),
			"<a:p>".to_owned(),
			"<a:o>".to_owned(),
			None
		))
	);
}

#[test]
fn blank_and_comment_lines() {
	let mut factory = StringFactory;
	let mut parser = NtParser::strict(&mut factory);

	assert_eq!(parser.parse(""), Ok(None));
	assert_eq!(parser.parse("   \t"), Ok(None));
	assert_eq!(parser.parse("# <a:s> <a:p> <a:o> ."), Ok(None));
	assert_eq!(parser.parse("\r\n"), Ok(None));
}

#[test]
fn calls_in_order() {
	let mut factory = Recorder::default();
	let options = ParserOptions::new().with_format(Format::NQuads);
	let mut parser = NtParser::new(&mut factory, options);

	parser
		.parse("_:s <a:p> \"v\"^^<a:dt> <a:g> .")
		.unwrap()
		.unwrap();

	assert_eq!(
		parser.factory().calls,
		[
			"blank_node s",
			"predicate a:p",
			"typed_literal v a:dt",
			"iri_ref a:g",
			"statement true"
		]
	);
}

#[test]
fn malformed_lines_do_not_reach_factory() {
	let mut factory = Recorder::default();
	let mut parser = NtParser::strict(&mut factory);

	assert!(parser.parse("<a:s> <a:p> \"v\"@en").is_err());
	assert!(parser.parse("<a:s> <a:p> <a:o> . trailing").is_err());
	assert!(parser.factory().calls.is_empty());

	parser.factory_mut().reset();
	assert_eq!(factory.resets, 1);
}

#[test]
fn blank_node_scope() {
	let mut factory = ModelFactory::new();
	let input = "_:x <a:p> _:y .\n_:y <a:p> _:x .\n";

	let first: Vec<_> = NtParser::strict(&mut factory)
		.for_reader(input.as_bytes())
		.collect::<Result<_, _>>()
		.unwrap();

	assert_eq!(Term::from(first[0].subject.clone()), first[1].object);
	assert_eq!(Term::from(first[1].subject.clone()), first[0].object);

	factory.reset();
	let second: Vec<_> = NtParser::strict(&mut factory)
		.for_reader(input.as_bytes())
		.collect::<Result<_, _>>()
		.unwrap();

	assert_ne!(first[0].subject, second[0].subject);
	assert_eq!(first[0].n3(), second[0].n3());

	match (&first[0].subject, &second[0].subject) {
		(Subject::Blank(a), Subject::Blank(b)) => {
			assert_eq!(a.label(), "x");
			assert_eq!(b.label(), "x");
			assert_ne!(a.id(), b.id())
		}
		other => panic!("unexpected {other:?}"),
	}
}

#[test]
fn blank_node_persists_without_reset() {
	let mut factory = ModelFactory::new();
	let a = NtParser::strict(&mut factory)
		.parse("_:x <a:p> <a:o> .")
		.unwrap()
		.unwrap();
	let b = NtParser::strict(&mut factory)
		.parse("<a:s> <a:p> _:x .")
		.unwrap()
		.unwrap();

	assert_eq!(Term::from(a.subject), b.object);
}

#[test]
fn nquads_graph() {
	let mut factory = StringFactory;
	let mut parser = NtParser::new(
		&mut factory,
		ParserOptions::new().with_format(Format::NQuads),
	);

	let (_, _, _, graph) = parser.parse("<a:s> <a:p> <a:o> _:g .").unwrap().unwrap();
	assert_eq!(graph.as_deref(), Some("_:g"));

	let (_, _, _, graph) = parser.parse("<a:s> <a:p> <a:o> .").unwrap().unwrap();
	assert!(graph.is_none());

	let e = parser.parse("<a:s> <a:p> <a:o> \"g\" .").unwrap_err();
	assert_eq!(e.kind, ErrorKind::MissingTerminator);
}

#[test]
fn string_terms_are_escaped() {
	let mut factory = StringFactory;
	let (s, _, o, _) = NtParser::strict(&mut factory)
		.parse("<a:\\u00E9> <a:p> \"x\\\"y\\u000Az\"@en-US .")
		.unwrap()
		.unwrap();

	assert_eq!(s, "<a:\u{e9}>");
	assert_eq!(o, "\"x\\\"y\\nz\"@en-US");
}

#[test]
fn dotted_blank_labels() {
	let mut factory = StringFactory;
	let (s, _, o, _) = NtParser::strict(&mut factory)
		.parse("_:b.1 <a:p> _:x.y .")
		.unwrap()
		.unwrap();
	assert_eq!((s.as_str(), o.as_str()), ("_:b.1", "_:x.y"));

	let mut factory = Recorder::default();
	let options = ParserOptions::new().with_format(Format::NQuads);
	NtParser::new(&mut factory, options)
		.parse("_:a.b <a:p> <a:o> _:g.h.")
		.unwrap()
		.unwrap();
	assert_eq!(
		factory.calls,
		[
			"blank_node a.b",
			"predicate a:p",
			"iri_ref a:o",
			"blank_node g.h",
			"statement true"
		]
	);

	let mut factory = ModelFactory::new();
	let options = ParserOptions::new().with_format(Format::NQuads);
	let statement = NtParser::new(&mut factory, options)
		.parse("_:a.b <a:p> <a:o> _:a.b .")
		.unwrap()
		.unwrap();
	assert_eq!(statement.graph, Some(statement.subject.clone()));
	assert_eq!(statement.n3(), "_:a.b <a:p> <a:o> _:a.b .");
}
