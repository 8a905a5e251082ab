use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum DocSubError {
	#[error("failed to read `{path}`: {reason}")]
	#[diagnostic(code(docsub::read_file), help("check that the path exists and is readable"))]
	ReadFile { path: String, reason: String },

	#[error("failed to write `{path}`: {reason}")]
	#[diagnostic(
		code(docsub::write_file),
		help("the original file was left unchanged; check directory permissions")
	)]
	WriteFile { path: String, reason: String },

	#[error("file too large: `{path}` is {size} bytes (limit: {limit} bytes)")]
	#[diagnostic(
		code(docsub::file_too_large),
		help("raise `max_file_size` in docsub.toml")
	)]
	FileTooLarge { path: String, size: u64, limit: u64 },

	#[error("no doc-string named `{name}` (referenced on line {line})")]
	#[diagnostic(
		code(docsub::missing_docstring),
		help("add a matching `// DocString: <name>` block to the source file or fix the reference")
	)]
	MissingDocString { name: String, line: usize },

	#[error("duplicate doc-string `{name}`: defined on line {first_line} and line {second_line}")]
	#[diagnostic(
		code(docsub::duplicate_docstring),
		help("rename one of the blocks or pass `--allow-duplicates` to keep the last definition")
	)]
	DuplicateDocString {
		name: String,
		first_line: usize,
		second_line: usize,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(docsub::config_parse),
		help("check that docsub.toml is valid TOML with `duplicates` and `max_file_size` keys")
	)]
	ConfigParse(String),
}

pub type DocSubResult<T> = Result<T, DocSubError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
