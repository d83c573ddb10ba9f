//! Filesystem operation abstractions for dependency injection.
//!
//! Provides the [`FileSystemOps`] trait so that file and folder
//! prerequisites can be unit-tested without touching the real filesystem.
//! Production code uses [`SystemFileSystemOps`]; tests use
//! `MockFileSystemOps`.

use std::path::Path;

/// Abstraction over the filesystem queries and mutations used by
/// prerequisites.
pub trait FileSystemOps: Send + Sync + std::fmt::Debug {
    /// Returns `true` if `path` is a regular file (following symlinks).
    fn is_file(&self, path: &Path) -> bool;

    /// Returns `true` if `path` is a directory (following symlinks).
    fn is_dir(&self, path: &Path) -> bool;

    /// Create `path` as an empty file if it does not exist; leave existing
    /// content untouched.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened for appending.
    fn touch(&self, path: &Path) -> std::io::Result<()>;

    /// Create `path` and all missing parents. Succeeds if it already exists.
    ///
    /// # Errors
    ///
    /// Returns an error if any component cannot be created.
    fn create_dir_all(&self, path: &Path) -> std::io::Result<()>;
}

/// Production [`FileSystemOps`] implementation that delegates to [`std::fs`].
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemFileSystemOps;

impl FileSystemOps for SystemFileSystemOps {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn touch(&self, path: &Path) -> std::io::Result<()> {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map(drop)
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        std::fs::create_dir_all(path)
    }
}

/// Mock [`FileSystemOps`] for unit tests.
///
/// Pre-configure existing files and directories with the builder-style
/// methods. Mutations are recorded (and make the path exist) so tests can
/// assert on what was created.
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MockFileSystemOps {
    files: std::sync::Mutex<Vec<std::path::PathBuf>>,
    dirs: std::sync::Mutex<Vec<std::path::PathBuf>>,
    created: std::sync::Mutex<Vec<std::path::PathBuf>>,
}

#[cfg(test)]
impl MockFileSystemOps {
    /// Create an empty mock with nothing configured.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `path` as an existing regular file.
    #[must_use]
    pub fn with_file(self, path: impl Into<std::path::PathBuf>) -> Self {
        if let Ok(mut files) = self.files.lock() {
            files.push(path.into());
        }
        self
    }

    /// Mark `path` as an existing directory.
    #[must_use]
    pub fn with_dir(self, path: impl Into<std::path::PathBuf>) -> Self {
        if let Ok(mut dirs) = self.dirs.lock() {
            dirs.push(path.into());
        }
        self
    }

    /// Paths passed to [`FileSystemOps::touch`] or
    /// [`FileSystemOps::create_dir_all`], in call order.
    #[must_use]
    pub fn created(&self) -> Vec<std::path::PathBuf> {
        self.created.lock().map_or_else(|_| vec![], |g| g.clone())
    }

    fn record(&self, list: &std::sync::Mutex<Vec<std::path::PathBuf>>, path: &Path) {
        if let Ok(mut guard) = list.lock()
            && !guard.iter().any(|p| p == path)
        {
            guard.push(path.to_path_buf());
        }
        if let Ok(mut created) = self.created.lock() {
            created.push(path.to_path_buf());
        }
    }
}

#[cfg(test)]
impl FileSystemOps for MockFileSystemOps {
    fn is_file(&self, path: &Path) -> bool {
        self.files
            .lock()
            .is_ok_and(|files| files.iter().any(|p| p == path))
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.dirs
            .lock()
            .is_ok_and(|dirs| dirs.iter().any(|p| p == path))
    }

    fn touch(&self, path: &Path) -> std::io::Result<()> {
        self.record(&self.files, path);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> std::io::Result<()> {
        self.record(&self.dirs, path);
        Ok(())
    }
}
