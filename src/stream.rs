use crate::{parser::parse_statement, Error, Factory, Mode, ParseError, ParserOptions};
use std::{io::BufRead, iter::FusedIterator};

/// Lazy statement stream.
///
/// Reads its source one line at a time and yields one statement per
/// well formed line. Blank and comment lines are skipped, and so are
/// malformed lines in lenient mode. In strict mode a malformed line is
/// yielded as an error and ends the stream.
///
/// The source is dropped as soon as the stream ends, or with the stream
/// itself if it is abandoned early.
pub struct Statements<'f, R, F: Factory> {
	source: Option<R>,
	factory: &'f mut F,
	options: ParserOptions,
	line: usize,
	buffer: Vec<u8>,
	peeked: Option<Result<F::Statement, Error>>,
	diagnostics: Vec<ParseError>,
}

impl<'f, R: BufRead, F: Factory> Statements<'f, R, F> {
	pub fn new(source: R, factory: &'f mut F, options: ParserOptions) -> Self {
		Self {
			source: Some(source),
			factory,
			options,
			line: 0,
			buffer: Vec::new(),
			peeked: None,
			diagnostics: Vec::new(),
		}
	}

	/// Number of the last line read.
	pub fn line(&self) -> usize {
		self.line
	}

	pub fn options(&self) -> &ParserOptions {
		&self.options
	}

	/// Checks if the source has been released.
	pub fn is_released(&self) -> bool {
		self.source.is_none()
	}

	/// Checks if there is another item, reading ahead if necessary.
	pub fn has_next(&mut self) -> bool {
		if self.peeked.is_none() {
			self.peeked = self.advance();
		}

		self.peeked.is_some()
	}

	/// Drains the errors of the lines skipped so far.
	///
	/// Always empty unless the stream is lenient and
	/// [`diagnostics`](ParserOptions::diagnostics) is set.
	pub fn take_diagnostics(&mut self) -> Vec<ParseError> {
		std::mem::take(&mut self.diagnostics)
	}

	fn release(&mut self) {
		if self.source.take().is_some() {
			log::debug!("released input after {} lines", self.line)
		}
	}

	fn advance(&mut self) -> Option<Result<F::Statement, Error>> {
		loop {
			let source = self.source.as_mut()?;

			self.buffer.clear();
			match source.read_until(b'\n', &mut self.buffer) {
				Ok(0) => {
					self.release();
					return None;
				}
				Ok(_) => self.line += 1,
				Err(e) => {
					self.release();
					return Some(Err(Error::Io(e)));
				}
			}

			let result = match std::str::from_utf8(&self.buffer) {
				Ok(text) => parse_statement(text, self.line, self.options.format, &mut *self.factory),
				Err(e) => Err(ParseError::invalid_utf8(&self.buffer, self.line, e)),
			};

			match result {
				Ok(Some(statement)) => return Some(Ok(statement)),
				Ok(None) => (),
				Err(e) => match self.options.mode {
					Mode::Strict => {
						self.release();
						return Some(Err(Error::Parse(e)));
					}
					Mode::Lenient => {
						log::warn!("skipping malformed {e}");
						if self.options.diagnostics {
							self.diagnostics.push(e)
						}
					}
				},
			}
		}
	}
}

impl<'f, R: BufRead, F: Factory> Iterator for Statements<'f, R, F> {
	type Item = Result<F::Statement, Error>;

	fn next(&mut self) -> Option<Self::Item> {
		match self.peeked.take() {
			Some(item) => Some(item),
			None => self.advance(),
		}
	}
}

impl<'f, R: BufRead, F: Factory> FusedIterator for Statements<'f, R, F> {}

impl<'f, R, F: Factory> Drop for Statements<'f, R, F> {
	fn drop(&mut self) {
		if self.source.take().is_some() {
			log::debug!("input abandoned at line {}", self.line)
		}
	}
}
