use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::DocSubError;
use crate::DocSubResult;

/// Read a whole file as UTF-8 text, refusing files larger than
/// `max_file_size` bytes.
pub fn read_file(path: &Path, max_file_size: u64) -> DocSubResult<String> {
	let metadata = std::fs::metadata(path).map_err(|e| read_error(path, &e))?;
	let size = metadata.len();
	if size > max_file_size {
		return Err(DocSubError::FileTooLarge {
			path: path.display().to_string(),
			size,
			limit: max_file_size,
		});
	}

	std::fs::read_to_string(path).map_err(|e| read_error(path, &e))
}

/// Replace the contents of `path` without ever leaving it half written.
///
/// The content goes to a temporary file in the same directory, is synced to
/// disk and then renamed over `path`. Until the rename succeeds the original
/// file is untouched. Permissions of an existing file are carried over.
pub fn write_atomic(path: &Path, content: &str) -> DocSubResult<()> {
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp = NamedTempFile::new_in(dir).map_err(|e| write_error(path, &e))?;
	temp.write_all(content.as_bytes())
		.map_err(|e| write_error(path, &e))?;
	temp.as_file()
		.sync_all()
		.map_err(|e| write_error(path, &e))?;

	if let Ok(metadata) = std::fs::metadata(path) {
		temp.as_file()
			.set_permissions(metadata.permissions())
			.map_err(|e| write_error(path, &e))?;
	}

	temp.persist(path).map_err(|e| write_error(path, &e.error))?;
	tracing::debug!(path = %path.display(), bytes = content.len(), "replaced file");

	Ok(())
}

fn read_error(path: &Path, error: &std::io::Error) -> DocSubError {
	DocSubError::ReadFile {
		path: path.display().to_string(),
		reason: error.to_string(),
	}
}

fn write_error(path: &Path, error: &std::io::Error) -> DocSubError {
	DocSubError::WriteFile {
		path: path.display().to_string(),
		reason: error.to_string(),
	}
}
