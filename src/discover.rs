use crate::*;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Find the files under `root` (recursively) with extension `ext`, compared case-insensitively.
///
/// `ext` may be given with or without its leading dot. The paths are absolute and sorted.
/// A root that does not exist holds no files; one that cannot be read is an error.
pub fn find_files(root: impl AsRef<Path>, ext: &str) -> Result<Vec<PathBuf>> {
    let root = root.as_ref();
    if !root.exists() {
        return Ok(Vec::new());
    }

    let root = std::path::absolute(root)
        .map_err(|e| discovery_error(root, e))?;
    let ext = ext.trim_start_matches('.');

    let mut files = Vec::new();
    for entry in WalkDir::new(&root).follow_links(true) {
        let entry = entry.map_err(|e| discovery_error(&root, e))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let matches = entry
            .path()
            .extension()
            .and_then(|x| x.to_str())
            .map_or(false, |x| x.eq_ignore_ascii_case(ext));
        if matches {
            files.push(entry.into_path());
        }
    }

    files.sort();
    Ok(files)
}

fn discovery_error(root: &Path, e: impl std::fmt::Display) -> Error {
    Error::Discovery {
        root: root.to_path_buf(),
        message: e.to_string(),
    }
}
