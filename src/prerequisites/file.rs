//! Regular file prerequisite.
use anyhow::{Context as _, Result};
use std::path::Path;

use super::Prerequisite;
use crate::logging::Log;
use crate::operations::FileSystemOps;

/// A regular file; created empty when absent.
#[derive(Debug)]
pub struct FilePrerequisite<'a> {
    path: &'a Path,
    fs_ops: &'a dyn FileSystemOps,
    log: &'a dyn Log,
}

impl<'a> FilePrerequisite<'a> {
    /// Create a new file prerequisite for `path`.
    #[must_use]
    pub fn new(path: &'a str, fs_ops: &'a dyn FileSystemOps, log: &'a dyn Log) -> Self {
        Self {
            path: Path::new(path),
            fs_ops,
            log,
        }
    }
}

impl Prerequisite for FilePrerequisite<'_> {
    fn description(&self) -> String {
        format!("file {}", self.path.display())
    }

    fn check(&self) -> Result<bool> {
        Ok(self.fs_ops.is_file(self.path))
    }

    fn create(&self) -> Result<()> {
        self.log
            .debug(&format!("creating file {}", self.path.display()));
        self.fs_ops
            .touch(self.path)
            .with_context(|| format!("creating file {}", self.path.display()))
    }
}
