//! Asset tree copying.
//!
//! Copies a site's `assets/` directory into the output tree byte-for-byte.
//! Every directory entry is re-validated by name before it is touched:
//! an entry that fails [`crate::paths::is_safe_entry_name`] is skipped with
//! a warning on stderr and, for directories, never descended into. One bad
//! entry must not abort the whole copy — but a validated path that still
//! fails to read or write does, with the offending path in the error.
//!
//! Callers are responsible for validating the *source* directory itself
//! (see [`crate::paths::resolve_under`]); this module only guards the
//! entries found inside it.

use crate::paths;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum CopyError {
    #[error("failed to walk {path}: {source}")]
    Walk {
        path: PathBuf,
        source: walkdir::Error,
    },
    #[error("failed to copy {path}: {source}")]
    Copy {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// What a copy did: files written and entries skipped by validation.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CopyStats {
    pub files: usize,
    pub skipped: usize,
}

/// Recursively copy `source` into `dest`.
///
/// Destination directories are created on demand; creating one that already
/// exists is not an error. File contents are copied exactly, without
/// transformation.
pub fn copy_tree(source: &Path, dest: &Path) -> Result<CopyStats, CopyError> {
    fs::create_dir_all(dest).map_err(|e| CopyError::Copy {
        path: dest.to_path_buf(),
        source: e,
    })?;

    let mut stats = CopyStats::default();
    let mut walker = WalkDir::new(source).min_depth(1).into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.map_err(|e| CopyError::Walk {
            path: source.to_path_buf(),
            source: e,
        })?;
        let safe = entry
            .file_name()
            .to_str()
            .is_some_and(paths::is_safe_entry_name);
        if !safe {
            eprintln!(
                "warning: skipping asset entry with unsafe name: {}",
                entry.path().display()
            );
            stats.skipped += 1;
            if entry.file_type().is_dir() {
                walker.skip_current_dir();
            }
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walkdir yields paths under its root");
        let target = dest.join(relative);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|e| CopyError::Copy {
                path: target.clone(),
                source: e,
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|e| CopyError::Copy {
                path: entry.path().to_path_buf(),
                source: e,
            })?;
            stats.files += 1;
        }
    }
    Ok(stats)
}
