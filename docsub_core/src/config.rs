use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::DocSubError;
use crate::DocSubResult;

/// Default maximum file size in bytes (10 MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["docsub.toml", ".docsub.toml", ".config/docsub.toml"];

/// What to do when a source file defines the same doc-string name twice.
#[derive(Debug, Clone, Copy, Default, Deserialize, Eq, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub enum DuplicatePolicy {
	/// Fail extraction with [`DocSubError::DuplicateDocString`].
	#[default]
	Reject,
	/// Keep the later definition and log a warning.
	LastWins,
}

/// Configuration loaded from a `docsub.toml` file.
///
/// ```toml
/// duplicates = "last-wins"
/// max_file_size = 1048576
/// ```
#[derive(Debug, Deserialize)]
pub struct DocSubConfig {
	/// Policy for repeated doc-string names. Defaults to `reject`.
	#[serde(default)]
	pub duplicates: DuplicatePolicy,
	/// Maximum size in bytes of the source and documentation files.
	/// Defaults to 10 MB.
	#[serde(default = "default_max_file_size")]
	pub max_file_size: u64,
}

fn default_max_file_size() -> u64 {
	DEFAULT_MAX_FILE_SIZE
}

impl DocSubConfig {
	/// Find the first config file candidate that exists in `root`.
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no candidate exists.
	pub fn load(root: &Path) -> DocSubResult<Option<DocSubConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit path.
	pub fn load_from(path: &Path) -> DocSubResult<DocSubConfig> {
		let content = std::fs::read_to_string(path).map_err(|e| DocSubError::ReadFile {
			path: path.display().to_string(),
			reason: e.to_string(),
		})?;
		toml::from_str(&content).map_err(|e| DocSubError::ConfigParse(e.to_string()))
	}
}

/// Options threaded through extraction and substitution.
///
/// Use [`DocSubOptions::default()`] for sensible defaults or
/// [`DocSubOptions::from_config`] to construct from a [`DocSubConfig`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DocSubOptions {
	pub duplicates: DuplicatePolicy,
	pub max_file_size: u64,
}

impl Default for DocSubOptions {
	fn default() -> Self {
		Self {
			duplicates: DuplicatePolicy::default(),
			max_file_size: DEFAULT_MAX_FILE_SIZE,
		}
	}
}

impl DocSubOptions {
	pub fn from_config(config: Option<&DocSubConfig>) -> Self {
		config.map_or_else(Self::default, |config| {
			Self {
				duplicates: config.duplicates,
				max_file_size: config.max_file_size,
			}
		})
	}
}
