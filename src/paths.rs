//! Traversal-safe path validation.
//!
//! User input names two kinds of paths: the config identifier on the command
//! line (may contain subdirectories, e.g. `clients/doug`) and individual
//! entry names encountered while copying an asset tree (must be bare file
//! names). Both are validated before any filesystem operation touches them.
//!
//! ## Layered checks
//!
//! 1. [`validate_relative`] — syntactic: no absolute prefix, no `..`
//!    segments, spelling must match its normalized component form.
//! 2. [`is_safe_entry_name`] — bare names only: no separators at all.
//! 3. [`resolve_under`] — authoritative: canonicalize and require the
//!    result to stay at or below the base directory.
//!
//! The syntactic checks are defense in depth; [`resolve_under`] is the check
//! that decides admissibility. A validation failure always aborts the
//! calling operation — there is no sanitize-and-continue path.

use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("path is empty")]
    Empty,
    #[error("absolute path not allowed: {0}")]
    Absolute(String),
    #[error("parent directory segment not allowed: {0}")]
    ParentSegment(String),
    #[error("path does not match its normalized form: {0}")]
    Denormalized(String),
    #[error("path escapes {base}: {path}")]
    Escape { path: PathBuf, base: PathBuf },
    #[error("failed to resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        source: std::io::Error,
    },
}

/// Syntactic admissibility check for a user-supplied relative path.
///
/// Rejects empty input, absolute paths, `..` segments, and any spelling
/// that differs from its normalized component form (`./x`, `a//b`,
/// trailing separators). Backslashes are rejected outright: they are
/// separators on Windows and never appear in legitimate config names.
pub fn validate_relative(candidate: &str) -> Result<(), PathError> {
    if candidate.trim().is_empty() {
        return Err(PathError::Empty);
    }
    if candidate.contains('\\') {
        return Err(PathError::Denormalized(candidate.to_string()));
    }
    let path = Path::new(candidate);
    if path.is_absolute() || candidate.starts_with('/') {
        return Err(PathError::Absolute(candidate.to_string()));
    }
    let mut rebuilt = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => rebuilt.push(part),
            Component::ParentDir => {
                return Err(PathError::ParentSegment(candidate.to_string()));
            }
            _ => return Err(PathError::Denormalized(candidate.to_string())),
        }
    }
    // Catches redundant separators and trailing slashes that component
    // iteration silently collapses.
    if rebuilt.as_os_str() != candidate {
        return Err(PathError::Denormalized(candidate.to_string()));
    }
    Ok(())
}

/// Whether `name` is acceptable as a single directory-entry name.
///
/// Used by the asset copier on every entry it encounters. Bare names never
/// contain separators; anything else is treated as hostile.
pub fn is_safe_entry_name(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\')
        && !name.contains('\0')
}

/// Resolve `candidate` under `base` and prove containment.
///
/// Runs the syntactic check first, then canonicalizes both sides and
/// requires the resolved candidate to equal the base or be a strict
/// descendant of it. Both paths must exist; resolution failures surface as
/// [`PathError::Resolve`].
pub fn resolve_under(base: &Path, candidate: &str) -> Result<PathBuf, PathError> {
    validate_relative(candidate)?;
    let joined = base.join(candidate);
    let base_resolved = dunce::canonicalize(base).map_err(|source| PathError::Resolve {
        path: base.to_path_buf(),
        source,
    })?;
    let resolved = dunce::canonicalize(&joined).map_err(|source| PathError::Resolve {
        path: joined.clone(),
        source,
    })?;
    if resolved.starts_with(&base_resolved) {
        Ok(resolved)
    } else {
        Err(PathError::Escape {
            path: joined,
            base: base_resolved,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn accepts_plain_names() {
        assert!(validate_relative("example").is_ok());
        assert!(validate_relative("its-doug").is_ok());
        assert!(validate_relative("clients/doug").is_ok());
    }

    #[test]
    fn rejects_empty_and_whitespace() {
        assert!(matches!(validate_relative(""), Err(PathError::Empty)));
        assert!(matches!(validate_relative("   "), Err(PathError::Empty)));
    }

    #[test]
    fn rejects_parent_segments() {
        assert!(matches!(
            validate_relative(".."),
            Err(PathError::ParentSegment(_))
        ));
        assert!(matches!(
            validate_relative("../../etc"),
            Err(PathError::ParentSegment(_))
        ));
        assert!(matches!(
            validate_relative("a/../b"),
            Err(PathError::ParentSegment(_))
        ));
    }

    #[test]
    fn rejects_absolute_paths() {
        assert!(matches!(
            validate_relative("/etc/passwd"),
            Err(PathError::Absolute(_))
        ));
    }

    #[test]
    fn rejects_denormalized_spellings() {
        assert!(matches!(
            validate_relative("./example"),
            Err(PathError::Denormalized(_))
        ));
        assert!(matches!(
            validate_relative("a//b"),
            Err(PathError::Denormalized(_))
        ));
        assert!(matches!(
            validate_relative("example/"),
            Err(PathError::Denormalized(_))
        ));
        assert!(matches!(
            validate_relative("a\\b"),
            Err(PathError::Denormalized(_))
        ));
    }

    #[test]
    fn entry_names_reject_separators_and_dots() {
        assert!(is_safe_entry_name("logo.png"));
        assert!(is_safe_entry_name("fonts"));
        assert!(!is_safe_entry_name(""));
        assert!(!is_safe_entry_name("."));
        assert!(!is_safe_entry_name(".."));
        assert!(!is_safe_entry_name("a/b"));
        assert!(!is_safe_entry_name("a\\b"));
        assert!(!is_safe_entry_name("a\0b"));
    }

    #[test]
    fn resolve_under_accepts_descendants() {
        let tmp = TempDir::new().unwrap();
        fs::create_dir_all(tmp.path().join("example/assets")).unwrap();
        let resolved = resolve_under(tmp.path(), "example/assets").unwrap();
        assert!(resolved.ends_with("example/assets"));
    }

    #[test]
    fn resolve_under_rejects_traversal_before_touching_fs() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_under(tmp.path(), "../../etc").unwrap_err();
        assert!(matches!(err, PathError::ParentSegment(_)));
    }

    #[test]
    fn resolve_under_fails_on_missing_candidate() {
        let tmp = TempDir::new().unwrap();
        let err = resolve_under(tmp.path(), "nope").unwrap_err();
        assert!(matches!(err, PathError::Resolve { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn resolve_under_rejects_symlink_escape() {
        let tmp = TempDir::new().unwrap();
        let outside = TempDir::new().unwrap();
        std::os::unix::fs::symlink(outside.path(), tmp.path().join("sneaky")).unwrap();
        let err = resolve_under(tmp.path(), "sneaky").unwrap_err();
        assert!(matches!(err, PathError::Escape { .. }));
    }
}
