mod common;

use docsub_core::AnyEmptyResult;
use rstest::rstest;

const DUPLICATED: &str = "// DocString: x\n//! brief One.\n// DocString: x\n//! brief Two.\n";

#[rstest]
#[case::primary("docsub.toml")]
#[case::hidden(".docsub.toml")]
#[case::dot_config(".config/docsub.toml")]
fn discovered_config_sets_duplicate_policy(#[case] candidate: &str) -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::create_dir_all(tmp.path().join(".config"))?;
	std::fs::write(tmp.path().join(candidate), "duplicates = \"last-wins\"\n")?;
	let (source, doc) = common::write_fixture(tmp.path(), DUPLICATED, "@DocString(x)\n")?;

	common::docsub_cmd()
		.current_dir(tmp.path())
		.arg(&source)
		.arg(&doc)
		.assert()
		.success();

	assert_eq!(std::fs::read_to_string(&doc)?, "brief: Two.\n");

	Ok(())
}

#[test]
fn explicit_config_path_overrides_discovery() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("docsub.toml"), "duplicates = \"reject\"\n")?;
	std::fs::write(tmp.path().join("lenient.toml"), "duplicates = \"last-wins\"\n")?;
	let (source, doc) = common::write_fixture(tmp.path(), DUPLICATED, "@DocString(x)\n")?;

	common::docsub_cmd()
		.current_dir(tmp.path())
		.arg(&source)
		.arg(&doc)
		.assert()
		.code(2);

	common::docsub_cmd()
		.current_dir(tmp.path())
		.arg("--config")
		.arg(tmp.path().join("lenient.toml"))
		.arg(&source)
		.arg(&doc)
		.assert()
		.success();

	Ok(())
}

#[test]
fn config_size_limit_rejects_large_files() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("docsub.toml"), "max_file_size = 16\n")?;
	let (source, doc) = common::write_fixture(tmp.path(), common::SOURCE, "")?;

	common::docsub_cmd()
		.current_dir(tmp.path())
		.arg(&source)
		.arg(&doc)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docsub::file_too_large"));

	Ok(())
}

#[test]
fn invalid_config_is_reported() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join("docsub.toml"), "duplicates = [\n")?;
	let (source, doc) = common::write_fixture(tmp.path(), common::SOURCE, "")?;

	common::docsub_cmd()
		.current_dir(tmp.path())
		.arg(&source)
		.arg(&doc)
		.assert()
		.code(2)
		.stderr(predicates::str::contains("docsub::config_parse"));

	Ok(())
}
