use std::path::Path;

use crate::DocString;
use crate::DocStringTable;
use crate::DocSubError;
use crate::DocSubResult;
use crate::config::DocSubOptions;
use crate::io::read_file;
use crate::io::write_atomic;
use crate::markers::find_placeholders;

/// Result of rewriting a document in memory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substitution {
	/// The rewritten document. Every line ends with `\n`.
	pub content: String,
	/// Number of `@DocString(...)` placeholders that were replaced.
	pub replaced: usize,
	/// Whether `content` differs from the input.
	pub changed: bool,
}

/// Join the entries of a doc-string with newlines.
pub fn flatten(doc: &DocString) -> String {
	doc.lines.join("\n")
}

/// Replace each newline with the two characters `\n` so the text fits on one
/// line.
pub fn escape(text: &str) -> String {
	text.replace('\n', "\\n")
}

/// Replace every placeholder in a single line. Trailing whitespace is
/// stripped. Returns the new line and the number of replacements.
///
/// Inserted text is not scanned again, so a doc-string containing
/// `@DocString(...)` is copied literally.
pub fn substitute_line(
	line: &str,
	line_number: usize,
	table: &DocStringTable,
) -> DocSubResult<(String, usize)> {
	let line = line.trim_end();
	let mut output = String::with_capacity(line.len());
	let mut cursor = 0;
	let mut replaced = 0;

	for placeholder in find_placeholders(line) {
		let doc = table
			.get(placeholder.name)
			.ok_or_else(|| DocSubError::MissingDocString {
				name: placeholder.name.to_string(),
				line: line_number,
			})?;

		output.push_str(&line[cursor..placeholder.range.start]);
		output.push_str(&escape(&flatten(doc)));
		cursor = placeholder.range.end;
		replaced += 1;
	}

	output.push_str(&line[cursor..]);

	Ok((output, replaced))
}

/// Rewrite a whole document. Nothing is written to disk; the first missing
/// doc-string aborts the pass.
pub fn substitute(content: &str, table: &DocStringTable) -> DocSubResult<Substitution> {
	let mut output = String::with_capacity(content.len());
	let mut replaced = 0;

	for (index, line) in content.lines().enumerate() {
		let (line, count) = substitute_line(line, index + 1, table)?;
		output.push_str(&line);
		output.push('\n');
		replaced += count;
	}

	let changed = output != content;

	Ok(Substitution {
		content: output,
		replaced,
		changed,
	})
}

/// Read the document at `path` and compute its substitution without writing.
pub fn render_file(
	path: &Path,
	table: &DocStringTable,
	options: &DocSubOptions,
) -> DocSubResult<Substitution> {
	let content = read_file(path, options.max_file_size)?;
	substitute(&content, table)
}

/// Substitute placeholders in the document at `path` and write the result
/// back atomically. The file is only rewritten when its content changes.
pub fn substitute_file(
	path: &Path,
	table: &DocStringTable,
	options: &DocSubOptions,
) -> DocSubResult<Substitution> {
	let substitution = render_file(path, table, options)?;

	if substitution.changed {
		write_atomic(path, &substitution.content)?;
		tracing::info!(
			path = %path.display(),
			replaced = substitution.replaced,
			"substituted doc-strings"
		);
	} else {
		tracing::debug!(path = %path.display(), "document already up to date");
	}

	Ok(substitution)
}
