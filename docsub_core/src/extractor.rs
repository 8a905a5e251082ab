use std::collections::BTreeMap;
use std::path::Path;

use derive_more::Deref;

use crate::DocSubError;
use crate::DocSubResult;
use crate::config::DocSubOptions;
use crate::config::DuplicatePolicy;
use crate::io::read_file;
use crate::markers::CommentKind;
use crate::markers::DocLine;
use crate::markers::classify;

/// A named, ordered list of `tag: text` lines pulled from a source comment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocString {
	/// The name given by the `DocString:` start marker.
	pub name: String,
	/// Formatted `tag: text` entries in source order.
	pub lines: Vec<String>,
	/// 1-indexed line of the start marker in the source file.
	pub line: usize,
}

impl DocString {
	pub fn new(name: impl Into<String>, line: usize) -> Self {
		Self {
			name: name.into(),
			lines: Vec::new(),
			line,
		}
	}

	/// Build a doc-string with the given entries. Mostly useful for tests and
	/// callers assembling a table by hand.
	pub fn with_lines<I, S>(name: impl Into<String>, lines: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			name: name.into(),
			lines: lines.into_iter().map(Into::into).collect(),
			line: 0,
		}
	}
}

/// Doc-strings keyed by name, iterated in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deref)]
pub struct DocStringTable(BTreeMap<String, DocString>);

impl DocStringTable {
	pub fn new() -> Self {
		Self::default()
	}

	/// Add a finished doc-string, applying `policy` when its name is already
	/// taken.
	pub fn commit(&mut self, doc: DocString, policy: DuplicatePolicy) -> DocSubResult<()> {
		if let Some(existing) = self.0.get(&doc.name) {
			match policy {
				DuplicatePolicy::Reject => {
					return Err(DocSubError::DuplicateDocString {
						name: doc.name,
						first_line: existing.line,
						second_line: doc.line,
					});
				}
				DuplicatePolicy::LastWins => {
					tracing::warn!(
						name = %doc.name,
						first_line = existing.line,
						second_line = doc.line,
						"doc-string defined twice, keeping the later definition"
					);
				}
			}
		}

		self.0.insert(doc.name.clone(), doc);
		Ok(())
	}
}

impl FromIterator<DocString> for DocStringTable {
	fn from_iter<T: IntoIterator<Item = DocString>>(iter: T) -> Self {
		Self(iter.into_iter().map(|doc| (doc.name.clone(), doc)).collect())
	}
}

/// Where the extractor is within the source file.
#[derive(Debug)]
enum ExtractorState {
	/// Looking for the next `DocString:` start marker.
	Outside,
	/// A start marker was seen but no block comment is open yet.
	AwaitingBody(DocString),
	/// Inside a `/*! ... */` block.
	InBlock(DocString),
}

/// Single forward pass over source lines, driven one line at a time.
struct Extractor {
	state: ExtractorState,
	table: DocStringTable,
	policy: DuplicatePolicy,
}

impl Extractor {
	fn new(policy: DuplicatePolicy) -> Self {
		Self {
			state: ExtractorState::Outside,
			table: DocStringTable::new(),
			policy,
		}
	}

	fn feed(&mut self, line_number: usize, line: &str) -> DocSubResult<()> {
		let state = std::mem::replace(&mut self.state, ExtractorState::Outside);

		self.state = match (state, classify(line.trim())) {
			(ExtractorState::Outside, DocLine::Start { name, kind }) => {
				tracing::debug!(name, line = line_number, "found doc-string start marker");
				let doc = DocString::new(name, line_number);
				match kind {
					CommentKind::Line => ExtractorState::AwaitingBody(doc),
					CommentKind::Block => ExtractorState::InBlock(doc),
				}
			}
			(ExtractorState::Outside, _) => ExtractorState::Outside,
			(
				ExtractorState::AwaitingBody(mut doc) | ExtractorState::InBlock(mut doc),
				DocLine::LineDoc(entry),
			) => {
				// The single-line form holds exactly one entry.
				doc.lines.push(entry.to_string());
				self.table.commit(doc, self.policy)?;
				ExtractorState::Outside
			}
			(
				ExtractorState::AwaitingBody(mut doc) | ExtractorState::InBlock(mut doc),
				DocLine::BlockOpen(entry),
			) => {
				doc.lines.push(entry.to_string());
				ExtractorState::InBlock(doc)
			}
			(ExtractorState::AwaitingBody(mut doc), DocLine::Param(entry)) => {
				doc.lines.push(entry.to_string());
				ExtractorState::AwaitingBody(doc)
			}
			(ExtractorState::InBlock(mut doc), DocLine::Param(entry)) => {
				doc.lines.push(entry.to_string());
				ExtractorState::InBlock(doc)
			}
			(
				ExtractorState::AwaitingBody(doc) | ExtractorState::InBlock(doc),
				DocLine::Terminator,
			) => {
				self.table.commit(doc, self.policy)?;
				ExtractorState::Outside
			}
			(state, DocLine::Start { name, .. }) => {
				tracing::warn!(
					name,
					line = line_number,
					"ignoring start marker inside an unterminated doc-string block"
				);
				state
			}
			(state, DocLine::Other) => state,
		};

		Ok(())
	}

	fn finish(mut self) -> DocSubResult<DocStringTable> {
		match std::mem::replace(&mut self.state, ExtractorState::Outside) {
			ExtractorState::Outside => {}
			ExtractorState::AwaitingBody(doc) | ExtractorState::InBlock(doc) => {
				tracing::debug!(
					name = %doc.name,
					entries = doc.lines.len(),
					"doc-string block ran to end of input"
				);
				self.table.commit(doc, self.policy)?;
			}
		}

		Ok(self.table)
	}
}

/// Build a [`DocStringTable`] from source text.
pub fn extract(content: &str, options: &DocSubOptions) -> DocSubResult<DocStringTable> {
	let mut extractor = Extractor::new(options.duplicates);

	for (index, line) in content.lines().enumerate() {
		extractor.feed(index + 1, line)?;
	}

	let table = extractor.finish()?;
	tracing::debug!(count = table.len(), "extracted doc-strings");

	Ok(table)
}

/// Read `path` and build a [`DocStringTable`] from its contents.
pub fn extract_file(path: &Path, options: &DocSubOptions) -> DocSubResult<DocStringTable> {
	let content = read_file(path, options.max_file_size)?;
	extract(&content, options)
}
