//! Directory prerequisite.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::Prerequisite;
use crate::logging::Log;
use crate::operations::FileSystemOps;

/// A directory; created together with any missing parents.
#[derive(Debug)]
pub struct FolderPrerequisite<'a> {
    path: &'a Path,
    fs_ops: &'a dyn FileSystemOps,
    log: &'a dyn Log,
}

impl<'a> FolderPrerequisite<'a> {
    /// Create a new folder prerequisite for `path`.
    #[must_use]
    pub fn new(path: &'a str, fs_ops: &'a dyn FileSystemOps, log: &'a dyn Log) -> Self {
        Self {
            path: Path::new(path),
            fs_ops,
            log,
        }
    }
}

impl Prerequisite for FolderPrerequisite<'_> {
    fn description(&self) -> String {
        format!("folder {}", self.path.display())
    }

    fn check(&self) -> Result<bool> {
        Ok(self.fs_ops.is_dir(self.path))
    }

    fn create(&self) -> Result<()> {
        self.log
            .debug(&format!("creating folder {}", self.path.display()));
        self.fs_ops
            .create_dir_all(self.path)
            .with_context(|| format!("creating folder {}", self.path.display()))
    }
}
