use std::path::PathBuf;

use clap::ArgGroup;
use clap::Parser;
use clap::ValueEnum;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Substitute doc-strings from source comments into documentation files.",
	long_about = "docsub scans a source file for named doc-string blocks and rewrites a \
	              documentation file, replacing every `@DocString(name)` placeholder with the \
	              matching doc-string text.\n\nSource markers:\n  // DocString: name      start a \
	              doc-string\n  //! tag text            single-line entry\n  /*! tag text            \
	              open a block entry\n  \\tag text               parameter line inside a block\n  \
	              */                      close the block\n\nThe documentation file is replaced \
	              atomically and is left untouched when any placeholder cannot be resolved."
)]
#[command(group(ArgGroup::new("preview").args(["check", "dry_run"])))]
#[allow(clippy::struct_excessive_bools)]
pub struct DocSubCli {
	/// Source file containing `DocString:` comment blocks.
	pub source: PathBuf,

	/// Documentation file containing `@DocString(name)` placeholders. It is
	/// rewritten in place.
	pub doc: PathBuf,

	/// Report whether the documentation file is up to date without writing
	/// it. Exits with status 1 when the file would be rewritten, either to
	/// substitute placeholders or to normalize trailing whitespace and line
	/// endings.
	#[arg(long, default_value_t = false, conflicts_with_all = ["dry_run", "list"])]
	pub check: bool,

	/// Compute the substitution and report what would change without
	/// writing the documentation file.
	#[arg(long, default_value_t = false, conflicts_with = "list")]
	pub dry_run: bool,

	/// Show a unified diff of the changes. Requires `--check` or
	/// `--dry-run`.
	#[arg(long, default_value_t = false, requires = "preview")]
	pub diff: bool,

	/// Print the extracted doc-strings instead of substituting them.
	#[arg(long, default_value_t = false)]
	pub list: bool,

	/// Output format for `--list`.
	#[arg(long, value_enum, default_value_t = OutputFormat::Text)]
	pub format: OutputFormat,

	/// Keep the last definition when a doc-string name appears twice instead
	/// of failing.
	#[arg(long, default_value_t = false)]
	pub allow_duplicates: bool,

	/// Path to a config file. Defaults to the first of `docsub.toml`,
	/// `.docsub.toml` or `.config/docsub.toml` in the working directory.
	#[arg(long)]
	pub config: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
	/// Human-readable text output.
	Text,
	/// JSON output for programmatic consumption. Each entry includes the
	/// doc-string name, its source line and its formatted lines.
	Json,
}
