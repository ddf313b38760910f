//! Read-only file access confined to one root directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use serde::Serialize;
use tracing::warn;

use crate::error::FileError;

/// Contents of a file read through the sandbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileContent {
    /// The path as requested by the page.
    pub file_path: String,
    pub content: String,
    /// Length of `content` in characters.
    pub size: usize,
}

/// One entry of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileInfo {
    pub name: String,
    pub path: String,
    pub size: u64,
    pub modified: String,
}

/// Confines reads to `root`. Any path that resolves outside it, lexically
/// or through symlinks, is rejected with [`FileError::OutsideRoot`].
#[derive(Debug, Clone)]
pub struct FileSandbox {
    root: PathBuf,
    max_file_size: u64,
}

impl FileSandbox {
    /// Relative roots are anchored at the current working directory.
    pub fn new(root: impl Into<PathBuf>, max_file_size: u64) -> Self {
        let root = root.into();
        let root = if root.is_absolute() {
            root
        } else {
            std::env::current_dir()
                .map(|cwd| cwd.join(&root))
                .unwrap_or(root)
        };
        Self {
            root: normalize(&root).unwrap_or(root),
            max_file_size,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolve a requested path to a canonical path inside the root.
    pub fn resolve(&self, requested: &str) -> Result<PathBuf, FileError> {
        if requested.trim().is_empty() || requested.contains('\0') {
            return Err(FileError::InvalidPath(requested.to_string()));
        }

        let candidate = Path::new(requested);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            self.root.join(candidate)
        };

        let lexical = normalize(&joined).ok_or(FileError::OutsideRoot)?;
        if !lexical.starts_with(&self.root) {
            return Err(FileError::OutsideRoot);
        }

        let canonical_root = fs::canonicalize(&self.root)
            .map_err(|e| FileError::RootUnavailable(format!("{}: {e}", self.root.display())))?;
        let canonical = match fs::canonicalize(&lexical) {
            Ok(p) => p,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(FileError::NotFound(requested.to_string()))
            }
            Err(e) => return Err(FileError::Io(e)),
        };

        if !canonical.starts_with(&canonical_root) {
            warn!(requested, "file read blocked: symlink leaves root");
            return Err(FileError::OutsideRoot);
        }
        Ok(canonical)
    }

    /// Read a UTF-8 text file inside the root.
    pub fn read(&self, requested: &str) -> Result<FileContent, FileError> {
        let path = self.resolve(requested)?;

        let metadata = fs::metadata(&path)?;
        if !metadata.is_file() {
            return Err(FileError::NotAFile(requested.to_string()));
        }
        if metadata.len() > self.max_file_size {
            return Err(FileError::TooLarge {
                size: metadata.len(),
                max: self.max_file_size,
            });
        }

        let bytes = fs::read(&path)?;
        let content = String::from_utf8(bytes).map_err(|_| FileError::NotUtf8)?;
        Ok(FileContent {
            file_path: requested.to_string(),
            size: content.chars().count(),
            content,
        })
    }

    /// Regular files directly under the root, sorted by name. Symlinks and
    /// subdirectories are skipped.
    pub fn list(&self) -> Result<Vec<FileInfo>, FileError> {
        let entries = fs::read_dir(&self.root)
            .map_err(|e| FileError::RootUnavailable(format!("{}: {e}", self.root.display())))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            let modified = metadata
                .modified()
                .map(|t| chrono::DateTime::<chrono::Local>::from(t).to_rfc3339())
                .unwrap_or_default();
            files.push(FileInfo {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path().display().to_string(),
                size: metadata.len(),
                modified,
            });
        }
        files.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(files)
    }
}

/// Resolve `.` and `..` without touching the filesystem. Returns `None` if
/// `..` would climb above the filesystem root.
fn normalize(path: &Path) -> Option<PathBuf> {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    return None;
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    Some(out)
}

// =============================================================================
// TESTS
// =============================================================================
