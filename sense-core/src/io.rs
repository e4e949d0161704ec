use std::fs;
use std::path::{Path, PathBuf};

use crate::error::SenseError;

/// Reads a whole source file into memory.
pub(crate) fn read_source<P: AsRef<Path>>(filename: P) -> Result<String, SenseError> {
	let filename = filename.as_ref();
	fs::read_to_string(filename).map_err(|source| SenseError::Io { path: filename.to_owned(), source })
}

/// Lists all files with a given extension in a directory.
///
/// Returns full paths, sorted so corpus loading is reproducible.
/// Subdirectories are not visited.
pub(crate) fn list_files<P: AsRef<Path>>(dir: P, extension: &str) -> Result<Vec<PathBuf>, SenseError> {
	let dir = dir.as_ref();
	if !dir.is_dir() {
		return Err(SenseError::NotADirectory(dir.to_owned()));
	}

	let io_error = |source| SenseError::Io { path: dir.to_owned(), source };
	let mut files = Vec::new();
	for entry in fs::read_dir(dir).map_err(io_error)? {
		let path = entry.map_err(io_error)?.path();
		if path.is_file() && path.extension() == Some(std::ffi::OsStr::new(extension)) {
			files.push(path);
		}
	}

	files.sort();
	Ok(files)
}
