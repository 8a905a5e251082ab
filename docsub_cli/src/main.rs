use std::process;

use clap::Parser;
use docsub_cli::DocSubCli;
use docsub_cli::OutputFormat;
use docsub_core::DocStringTable;
use docsub_core::DocSubConfig;
use docsub_core::DocSubOptions;
use docsub_core::DuplicatePolicy;
use docsub_core::Substitution;
use docsub_core::extract_file;
use docsub_core::io::read_file;
use docsub_core::substitute;
use docsub_core::substitute_file;
use owo_colors::OwoColorize;
use serde::Serialize;
use similar::ChangeTag;
use similar::TextDiff;
use tracing_subscriber::EnvFilter;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = DocSubCli::parse();

	// Respect NO_COLOR env var, --no-color flag and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	if let Err(e) = run(&args) {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<docsub_core::DocSubError>() {
			Ok(docsub_err) => {
				let report: miette::Report = (*docsub_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Logs go to stderr so that stdout stays clean for `--list --format json`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let env_filter =
		EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(env_filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.compact()
		.init();
}

fn resolve_options(args: &DocSubCli) -> Result<DocSubOptions, Box<dyn std::error::Error>> {
	let config = match &args.config {
		Some(path) => Some(DocSubConfig::load_from(path)?),
		None => DocSubConfig::load(&std::env::current_dir()?)?,
	};

	let mut options = DocSubOptions::from_config(config.as_ref());
	if args.allow_duplicates {
		options.duplicates = DuplicatePolicy::LastWins;
	}

	tracing::debug!(?options, "resolved options");

	Ok(options)
}

fn run(args: &DocSubCli) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args)?;
	let table = extract_file(&args.source, &options)?;

	tracing::info!(
		count = table.len(),
		source = %args.source.display(),
		"extracted doc-strings"
	);

	if args.list {
		return run_list(&table, args.format);
	}

	if args.check {
		return run_check(args, &table, &options);
	}

	if args.dry_run {
		return run_dry_run(args, &table, &options);
	}

	let result = substitute_file(&args.doc, &table, &options)?;
	if result.changed {
		println!(
			"Updated {}: replaced {} placeholder(s).",
			args.doc.display(),
			result.replaced
		);
	} else {
		println!("{} is already up to date.", args.doc.display());
	}

	Ok(())
}

fn run_check(
	args: &DocSubCli,
	table: &DocStringTable,
	options: &DocSubOptions,
) -> Result<(), Box<dyn std::error::Error>> {
	let current = read_file(&args.doc, options.max_file_size)?;
	let result = substitute(&current, table)?;

	if !result.changed {
		println!("Check passed: {} is up to date.", args.doc.display());
		return Ok(());
	}

	println!(
		"{} {} is out of date: {}.",
		colored!("Check failed:", red),
		args.doc.display(),
		describe_change(&result)
	);
	if args.diff {
		print_diff(&current, &result.content);
	}
	println!("\nRun `docsub` without `--check` to rewrite the file.");

	process::exit(1);
}

fn run_dry_run(
	args: &DocSubCli,
	table: &DocStringTable,
	options: &DocSubOptions,
) -> Result<(), Box<dyn std::error::Error>> {
	let current = read_file(&args.doc, options.max_file_size)?;
	let result = substitute(&current, table)?;

	if result.changed {
		println!(
			"Dry run: {} would be rewritten: {}.",
			args.doc.display(),
			describe_change(&result)
		);
		if args.diff {
			print_diff(&current, &result.content);
		}
	} else {
		println!("{} is already up to date.", args.doc.display());
	}

	Ok(())
}

/// A document can be stale without placeholders when rewriting only strips
/// trailing whitespace or normalizes line endings.
fn describe_change(result: &Substitution) -> String {
	if result.replaced == 0 {
		"trailing whitespace and line endings would be normalized".to_string()
	} else {
		format!("{} placeholder(s) to substitute", result.replaced)
	}
}

#[derive(Serialize)]
struct ListEntry<'a> {
	name: &'a str,
	line: usize,
	lines: &'a [String],
}

fn run_list(table: &DocStringTable, format: OutputFormat) -> Result<(), Box<dyn std::error::Error>> {
	match format {
		OutputFormat::Json => {
			let entries: Vec<ListEntry<'_>> = table
				.values()
				.map(|doc| {
					ListEntry {
						name: &doc.name,
						line: doc.line,
						lines: &doc.lines,
					}
				})
				.collect();
			println!("{}", serde_json::to_string_pretty(&entries)?);
		}
		OutputFormat::Text => {
			if table.is_empty() {
				println!("No doc-strings found.");
				return Ok(());
			}

			for doc in table.values() {
				println!("{} (line {})", colored!(doc.name.as_str(), bold), doc.line);
				for line in &doc.lines {
					println!("  {line}");
				}
			}
			println!("\n{} doc-string(s)", table.len());
		}
	}

	Ok(())
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
	}
}
