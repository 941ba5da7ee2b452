use codespan_reporting::{
	diagnostic::{Diagnostic, Label},
	files::SimpleFile,
	term::{self, termcolor::NoColor},
};
use ntriples_syntax::{model::ModelFactory, NtParser, ParseError};

/// Renders a parse error the way a command line tool would.
fn render(name: &str, source: &str, e: &ParseError) -> String {
	let line_start: usize = source
		.split_inclusive('\n')
		.take(e.line - 1)
		.map(str::len)
		.sum();

	let file = SimpleFile::new(name, source);
	let diagnostic = Diagnostic::error()
		.with_message(format!("parse error: {}", e.message))
		.with_labels(vec![Label::primary(
			(),
			line_start + e.bytes.start..line_start + e.bytes.end,
		)]);

	let mut writer = NoColor::new(Vec::new());
	let config = term::Config::default();
	term::emit(&mut writer, &config, &file, &diagnostic).unwrap();
	String::from_utf8(writer.into_inner()).unwrap()
}

#[test]
fn render_unterminated_literal() {
	stderrlog::new().init().ok();
	let source = "<a:s> <a:p> <a:o> .\n<a:s> <a:p> \"abc .\n";

	let mut factory = ModelFactory::new();
	let e = NtParser::strict(&mut factory)
		.for_reader(source.as_bytes())
		.find_map(Result::err)
		.unwrap();
	let e = e.as_parse_error().unwrap();

	let output = render("input.nt", source, e);
	log::info!("{output}");
	assert!(output.contains("error: parse error: unterminated string literal"));
	assert!(output.contains("input.nt:2:13"));
}

#[test]
fn render_escape_error() {
	let source = "<a:s> <a:p> \"\u{e9}\\x\" .";

	let mut factory = ModelFactory::new();
	let e = NtParser::strict(&mut factory).parse(source).unwrap_err();
	assert_eq!(e.column, 15);
	assert_eq!(e.bytes, 15..17);

	let output = render("escape.nt", source, &e);
	assert!(output.contains("error: parse error: invalid escape sequence"));
	assert!(output.contains("escape.nt:1:15"));
}
