//! Persistent storage capability for finished passes and staging folders.
//!
//! The lifecycle manager receives a `Storage` implementation instead of
//! reaching for a global filesystem facade, so tests can point it at a
//! throwaway root.

use crate::infra::error::{PassError, PassResult};
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem capability scoped to a storage root. All paths are relative
/// names under that root; flat names and single-level staging folders are the
/// only shapes the pipeline uses.
pub trait Storage {
    /// Resolve a relative name to an absolute path under the storage root
    fn resolve(&self, name: &str) -> PathBuf;

    /// Whether a file exists under the root
    fn exists(&self, name: &str) -> bool;

    /// Read a file's full contents
    fn read(&self, name: &str) -> PassResult<Vec<u8>>;

    /// Write a file, creating parent directories as needed
    fn write(&self, name: &str, contents: &[u8]) -> PassResult<()>;

    /// Delete a file if it exists
    fn delete(&self, name: &str) -> PassResult<()>;

    /// Move a file to a new name under the root
    fn rename(&self, from: &str, to: &str) -> PassResult<()>;

    /// Create a directory (and parents) under the root
    fn create_dir(&self, name: &str) -> PassResult<()>;

    /// Remove a directory and everything beneath it; absent directories are fine
    fn remove_dir_all(&self, name: &str) -> PassResult<()>;
}

/// Local-disk storage rooted at a single directory
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create storage rooted at `root`, creating the directory if needed
    pub fn new<P: AsRef<Path>>(root: P) -> PassResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| {
            PassError::ConfigurationError(format!(
                "Failed to create storage root {}: {}",
                root.display(),
                e
            ))
        })?;
        Ok(Self { root })
    }

    /// The storage root directory
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Storage for LocalStorage {
    fn resolve(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn exists(&self, name: &str) -> bool {
        self.resolve(name).exists()
    }

    fn read(&self, name: &str) -> PassResult<Vec<u8>> {
        let path = self.resolve(name);
        fs::read(&path)
            .map_err(|e| PassError::IoError(format!("Failed to read {}: {}", path.display(), e)))
    }

    fn write(&self, name: &str, contents: &[u8]) -> PassResult<()> {
        let path = self.resolve(name);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                PassError::IoError(format!(
                    "Failed to create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
        fs::write(&path, contents)
            .map_err(|e| PassError::IoError(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn delete(&self, name: &str) -> PassResult<()> {
        let path = self.resolve(name);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PassError::IoError(format!(
                "Failed to delete {}: {}",
                path.display(),
                e
            ))),
        }
    }

    fn rename(&self, from: &str, to: &str) -> PassResult<()> {
        let from_path = self.resolve(from);
        let to_path = self.resolve(to);
        fs::rename(&from_path, &to_path).map_err(|e| {
            PassError::IoError(format!(
                "Failed to move {} to {}: {}",
                from_path.display(),
                to_path.display(),
                e
            ))
        })
    }

    fn create_dir(&self, name: &str) -> PassResult<()> {
        let path = self.resolve(name);
        fs::create_dir_all(&path).map_err(|e| {
            PassError::IoError(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        })
    }

    fn remove_dir_all(&self, name: &str) -> PassResult<()> {
        let path = self.resolve(name);
        match fs::remove_dir_all(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(PassError::IoError(format!(
                "Failed to remove directory {}: {}",
                path.display(),
                e
            ))),
        }
    }
}
