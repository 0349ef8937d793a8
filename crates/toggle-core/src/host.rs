//! Host capabilities consumed by the toggle command.
//!
//! `toggle-core` never talks to an editor, a terminal, or the filesystem directly. The embedding
//! host supplies:
//! - [`Editor`]: the path behind the active view, and a way to open another path
//! - [`FileSystem`]: existence checks for candidates
//! - [`Labeler`]: short display labels for the interactive prompt
//! - [`Prompt`]: the interactive choice among several labels
//!
//! [`OsFileSystem`] and [`RelativeLabeler`] are ready-made implementations for hosts running on
//! a local filesystem; [`crate::Workspace`] is an in-memory [`Editor`].

use crate::error::BoxError;
use std::io;
use std::path::{Component, Path, PathBuf};

/// The editor side of the toggle command.
pub trait Editor {
    /// Path of the file backing the active view, if any.
    fn current_file_path(&self) -> Option<PathBuf>;

    /// Make `path` the active view, opening it if it is not open yet.
    fn open_path(&mut self, path: &Path) -> Result<(), BoxError>;
}

/// Existence checks for candidate paths.
pub trait FileSystem {
    /// Returns whether `path` exists.
    ///
    /// Errors (e.g. permission denied while probing) are not treated as "missing"; they abort
    /// the resolution.
    fn exists(&self, path: &Path) -> io::Result<bool>;
}

/// [`FileSystem`] backed by the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct OsFileSystem;

impl FileSystem for OsFileSystem {
    fn exists(&self, path: &Path) -> io::Result<bool> {
        path.try_exists()
    }
}

/// Produces human-readable labels for candidate paths.
pub trait Labeler {
    /// Display label for `path`.
    fn label(&self, path: &Path) -> String;
}

/// Labels paths relative to a base directory.
///
/// Paths outside the base are labeled with `..` steps (`../other/x.h`). The base itself, paths
/// that cannot be related to it (relative vs absolute, different prefixes, a base containing
/// `..`) are shown as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelativeLabeler {
    base: PathBuf,
}

impl RelativeLabeler {
    /// Label paths relative to `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Label paths relative to the process working directory.
    pub fn from_current_dir() -> io::Result<Self> {
        Ok(Self::new(std::env::current_dir()?))
    }

    /// The base directory.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl Labeler for RelativeLabeler {
    fn label(&self, path: &Path) -> String {
        match relative_to(path, &self.base) {
            Some(rel) => rel.display().to_string(),
            None => path.display().to_string(),
        }
    }
}

/// `path` expressed relative to `base`, or `None` if the two cannot be related.
fn relative_to(path: &Path, base: &Path) -> Option<PathBuf> {
    if path.is_absolute() != base.is_absolute() {
        return None;
    }

    let mut path_parts = path.components().peekable();
    let mut base_parts = base.components().peekable();
    while let (Some(p), Some(b)) = (path_parts.peek(), base_parts.peek()) {
        if p != b {
            break;
        }
        path_parts.next();
        base_parts.next();
    }

    let mut rel = PathBuf::new();
    for part in base_parts {
        match part {
            Component::Normal(_) => rel.push(".."),
            Component::CurDir => {}
            _ => return None,
        }
    }
    rel.extend(path_parts);

    (!rel.as_os_str().is_empty()).then_some(rel)
}

/// Interactive choice among several labels.
pub trait Prompt {
    /// Present `choices` under `label` and return the picked choice.
    ///
    /// `Ok(None)` means the user cancelled; errors are reserved for prompt failures.
    fn choose(&mut self, label: &str, choices: &[String]) -> Result<Option<String>, BoxError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_labels() {
        let labeler = RelativeLabeler::new("/proj");
        assert_eq!(labeler.label(Path::new("/proj/src/foo.h")), "src/foo.h");
        assert_eq!(labeler.label(Path::new("/proj")), "/proj");
    }

    #[cfg(unix)]
    #[test]
    fn test_labels_outside_base_walk_up() {
        let labeler = RelativeLabeler::new("/proj/app");
        assert_eq!(labeler.label(Path::new("/proj/lib/foo.h")), "../lib/foo.h");
        assert_eq!(labeler.label(Path::new("/other/foo.h")), "../../other/foo.h");
        assert_eq!(labeler.label(Path::new("/proj")), "..");

        assert_eq!(labeler.label(Path::new("src/foo.h")), "src/foo.h");
        assert_eq!(
            RelativeLabeler::new("/proj/../x").label(Path::new("/y/foo.h")),
            "/y/foo.h"
        );
    }

    #[test]
    fn test_os_filesystem_reports_existence() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("present.txt");
        std::fs::write(&file, "x").unwrap();

        let fs = OsFileSystem;
        assert!(fs.exists(&file).unwrap());
        assert!(!fs.exists(&dir.path().join("absent.txt")).unwrap());
    }
}
