#![allow(dead_code)]

use std::path::Path;
use std::path::PathBuf;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const SOURCE: &str = r"#include <vector>

// DocString: track
//! brief Track particles across a sequence of frames.
void track(int frames);

// DocString: piv
/*! brief Run PIV on an image pair.
    \param window Interrogation window size.
    \return Velocity field.
*/
void piv(int window);
";

pub const EXPECTED_TRACK: &str = "brief: Track particles across a sequence of frames.";
pub const EXPECTED_PIV: &str =
	r"brief: Run PIV on an image pair.\nparam: window Interrogation window size.\nreturn: Velocity field.";

pub fn docsub_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("docsub"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
	cmd
}

/// Write `source` and `doc` into `dir` and return their paths.
pub fn write_fixture(dir: &Path, source: &str, doc: &str) -> std::io::Result<(PathBuf, PathBuf)> {
	let source_path = dir.join("openfv.cpp");
	let doc_path = dir.join("python.md");
	std::fs::write(&source_path, source)?;
	std::fs::write(&doc_path, doc)?;
	Ok((source_path, doc_path))
}
