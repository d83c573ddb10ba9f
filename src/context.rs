//! Shared run context handed to both stages.
use std::sync::Arc;

use crate::exec::{Executor, SystemExecutor};
use crate::logging::Log;
use crate::operations::{FileSystemOps, SystemFileSystemOps};

/// Shared context for both stages of a run.
pub struct Context {
    /// Logger for output and rule recording.
    pub log: Arc<dyn Log>,
    /// Print commands instead of running them.
    pub dry_run: bool,
    /// Run each command through `bash -c` instead of invoking it directly.
    pub use_bash: bool,
    /// Command executor (for testing or real system calls).
    pub executor: Arc<dyn Executor>,
    /// Filesystem operation abstraction (injectable for testing).
    pub fs_ops: Arc<dyn FileSystemOps>,
}

impl std::fmt::Debug for Context {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Context")
            .field("log", &"<dyn Log>")
            .field("dry_run", &self.dry_run)
            .field("use_bash", &self.use_bash)
            .field("executor", &self.executor)
            .field("fs_ops", &self.fs_ops)
            .finish()
    }
}

impl Context {
    /// Create a context backed by the real system executor and filesystem.
    #[must_use]
    pub fn new(log: Arc<dyn Log>, dry_run: bool, use_bash: bool) -> Self {
        Self {
            log,
            dry_run,
            use_bash,
            executor: Arc::new(SystemExecutor),
            fs_ops: Arc::new(SystemFileSystemOps),
        }
    }

    /// Replace the command executor.
    #[must_use]
    pub fn with_executor(mut self, executor: Arc<dyn Executor>) -> Self {
        self.executor = executor;
        self
    }

    /// Replace the filesystem operations.
    #[must_use]
    pub fn with_fs_ops(mut self, fs_ops: Arc<dyn FileSystemOps>) -> Self {
        self.fs_ops = fs_ops;
        self
    }
}
