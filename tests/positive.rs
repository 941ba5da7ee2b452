use ntriples_syntax::{
	model::{ModelFactory, Statement},
	Format, NtParser, ParserOptions,
};
use std::{fs::File, io::BufReader, path::Path};

fn parse_with<P: AsRef<Path>>(path: P, format: Format) -> Vec<Statement> {
	stderrlog::new().init().ok();
	let file = match File::open(&path) {
		Ok(file) => file,
		Err(e) => {
			log::error!("unable to read file `{}`: {}", path.as_ref().display(), e);
			panic!("IO error: {e:?}")
		}
	};

	let mut factory = ModelFactory::new();
	let options = ParserOptions::new().with_format(format);
	match NtParser::new(&mut factory, options)
		.for_reader(BufReader::new(file))
		.collect::<Result<Vec<_>, _>>()
	{
		Ok(statements) => {
			assert_round_trip(&statements, format);
			statements
		}
		Err(e) => {
			log::error!("parse error: {e}");
			panic!("parse error: {e:?}")
		}
	}
}

fn parse<P: AsRef<Path>>(path: P) -> Vec<Statement> {
	parse_with(path, Format::NTriples)
}

/// Writes every statement back and parses it again.
fn assert_round_trip(statements: &[Statement], format: Format) {
	let mut factory = ModelFactory::new();
	let options = ParserOptions::new().with_format(format);
	let mut parser = NtParser::new(&mut factory, options);
	for statement in statements {
		let line = statement.n3();
		let reparsed = parser.parse(&line).unwrap().unwrap();
		assert_eq!(reparsed.n3(), line)
	}
}

#[test]
fn p01() {
	let statements = parse("tests/positive/01.nt");
	assert_eq!(statements.len(), 4);
	assert_eq!(
		statements[0].n3(),
		"<http://example.org/alice> <http://xmlns.com/foaf/0.1/name> \"Alice\" ."
	);

	let name = statements[2].object.as_literal().unwrap();
	assert_eq!(name.lexical(), "Bob");
	assert_eq!(name.language().unwrap().as_str(), "en");
	assert!(name.datatype().is_none());

	let age = statements[3].object.as_literal().unwrap();
	assert_eq!(age.lexical(), "42");
	assert_eq!(
		age.datatype().unwrap().as_str(),
		"http://www.w3.org/2001/XMLSchema#integer"
	);
}

#[test]
fn p02() {
	let statements = parse("tests/positive/02.nt");
	assert_eq!(statements.len(), 3);
	assert_eq!(
		Some(statements[0].subject.clone()),
		statements[1].object.clone().into_subject()
	);
	assert_eq!(
		Some(statements[1].subject.clone()),
		statements[0].object.clone().into_subject()
	);
	assert_eq!(statements[2].n3(), "_:b.1 <http://example.org/p> _:b1 .");
}

#[test]
fn p03() {
	let statements = parse("tests/positive/03.nt");
	let lexical: Vec<_> = statements
		.iter()
		.map(|s| s.object.as_literal().unwrap().lexical().to_owned())
		.collect();

	assert_eq!(
		lexical,
		[
			"tab\there",
			"quote \" and backslash \\",
			"\u{e9}t\u{e9}",
			"\u{1f600}",
			"line\nbreak",
			"\u{e9}t\u{e9}"
		]
	);

	assert_eq!(statements[4].subject, statements[5].subject);
	assert_eq!(
		statements[4].object.as_literal().unwrap().language().unwrap().as_str(),
		"en-GB"
	);
}

#[test]
fn p04() {
	let statements = parse("tests/positive/04.nt");
	assert_eq!(statements.len(), 3);
	assert_eq!(
		statements[1].n3(),
		"<http://example.org/s> <http://example.org/p> \"compact\" ."
	);
	assert_eq!(statements[2].object.as_literal().unwrap().lexical(), "");
}

#[test]
fn pq01() {
	let statements = parse_with("tests/positive/nquads/01.nq", Format::NQuads);
	assert_eq!(statements.len(), 3);
	assert_eq!(
		statements[0].n3(),
		"<http://example.org/s> <http://example.org/p> <http://example.org/o> <http://example.org/g> ."
	);
	assert_eq!(statements[1].n3(), "_:s <http://example.org/p> \"o\"@fr _:g .");
	assert!(statements[2].graph.is_none());
}

#[test]
fn blank_label_trailing_dots() {
	use decoded_char::Utf8Decoded;
	use ntriples_syntax::lexing::{Lexer, Token};

	let tokens: Vec<_> = Lexer::new(Utf8Decoded::new("_:a.b..".chars()))
		.map(|t| t.unwrap())
		.collect();

	assert_eq!(tokens.len(), 3);
	assert!(matches!(&tokens[0].0, Token::BlankNodeLabel(label) if label.as_str() == "_:a.b"));
	assert_eq!((tokens[0].1.start(), tokens[0].1.end()), (0, 5));
	assert!(matches!(tokens[1].0, Token::Dot));
	assert!(matches!(tokens[2].0, Token::Dot));
	assert_eq!(tokens[2].1.start(), 6);
}
