use std::fmt;
use std::ops::Range;
use std::sync::LazyLock;

use regex::Regex;

/// `// DocString: name`, also accepting `///`, `//!`, `/*`, `/**` and `/*!`
/// prefixes.
static START_MARKER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^(//|/\*)[!/*]?\s*DocString:\s*(\w+)").expect("start marker pattern is valid")
});

/// `//! tag text`
static LINE_DOC: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^//!\s*(\w+)\s+(.*)").expect("line doc pattern is valid")
});

/// `/*! tag text`
static BLOCK_OPEN_DOC: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"^/\*!\s*(\w+)\s+(.*)").expect("block doc pattern is valid")
});

/// `\tag text`
static PARAM: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^\\(\w+)\s+(.*)").expect("param pattern is valid"));

static PLACEHOLDER: LazyLock<Regex> = LazyLock::new(|| {
	Regex::new(r"@DocString\((\w+)\)").expect("placeholder pattern is valid")
});

/// The line that closes a block comment doc entry.
pub const BLOCK_TERMINATOR: &str = "*/";

/// The comment style a start marker was written in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentKind {
	/// `// DocString: name`
	Line,
	/// `/*! DocString: name`, which leaves a block comment open.
	Block,
}

/// A `tag text` pair captured from a doc line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocEntry<'a> {
	pub tag: &'a str,
	pub text: &'a str,
}

impl fmt::Display for DocEntry<'_> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}: {}", self.tag, self.text)
	}
}

/// Classification of a single trimmed source line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocLine<'a> {
	Start { name: &'a str, kind: CommentKind },
	LineDoc(DocEntry<'a>),
	BlockOpen(DocEntry<'a>),
	Param(DocEntry<'a>),
	Terminator,
	Other,
}

/// Classify a source line. The line is expected to be trimmed already.
///
/// The patterns are anchored at the start of the line so at most one of them
/// can match.
pub fn classify(line: &str) -> DocLine<'_> {
	if line == BLOCK_TERMINATOR {
		return DocLine::Terminator;
	}

	if let Some(captures) = START_MARKER.captures(line) {
		let kind = if captures.get(1).is_some_and(|m| m.as_str() == "/*") {
			CommentKind::Block
		} else {
			CommentKind::Line
		};
		if let Some(name) = captures.get(2) {
			return DocLine::Start {
				name: name.as_str(),
				kind,
			};
		}
	}

	if let Some(entry) = capture_entry(&LINE_DOC, line) {
		return DocLine::LineDoc(entry);
	}

	if let Some(entry) = capture_entry(&BLOCK_OPEN_DOC, line) {
		return DocLine::BlockOpen(entry);
	}

	if let Some(entry) = capture_entry(&PARAM, line) {
		return DocLine::Param(entry);
	}

	DocLine::Other
}

fn capture_entry<'a>(pattern: &Regex, line: &'a str) -> Option<DocEntry<'a>> {
	let captures = pattern.captures(line)?;
	Some(DocEntry {
		tag: captures.get(1)?.as_str(),
		text: captures.get(2)?.as_str(),
	})
}

/// An `@DocString(name)` reference found in a document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Placeholder<'a> {
	/// The referenced doc-string name.
	pub name: &'a str,
	/// Byte range of the whole `@DocString(name)` token within the line.
	pub range: Range<usize>,
}

/// Find every placeholder in `line`, left to right.
pub fn find_placeholders(line: &str) -> impl Iterator<Item = Placeholder<'_>> {
	PLACEHOLDER.captures_iter(line).filter_map(|captures| {
		let whole = captures.get(0)?;
		let name = captures.get(1)?;
		Some(Placeholder {
			name: name.as_str(),
			range: whole.range(),
		})
	})
}
