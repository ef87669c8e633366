use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use fs2::FileExt;

/// Fixed, product-scoped identifier for the updater's single-instance lock.
/// Must stay stable across versions so an old updater still blocks a new one.
pub const GUARD_NAME: &str = "handover.updater.guard";

/// Cross-process mutual exclusion backed by an advisory lock on a fixed lock
/// file. The OS releases the lock when the holding process exits, so a
/// crashed updater never leaves the guard stuck.
#[derive(Debug, Clone)]
pub struct UpdaterGuard {
    path: PathBuf,
}

impl UpdaterGuard {
    /// The guard every instance of this product shares.
    pub fn for_product() -> Self {
        Self::at(std::env::temp_dir().join(format!("{GUARD_NAME}.lock")))
    }

    pub fn at(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Non-blocking probe: reports whether some process currently holds the
    /// guard, without retaining it.
    pub fn is_held(&self) -> Result<bool> {
        let file = self.open()?;
        match file.try_lock_exclusive() {
            Ok(()) => {
                file.unlock()
                    .with_context(|| format!("failed to release probe lock: {}", self.path.display()))?;
                Ok(false)
            }
            Err(err) if lock_contended(&err) => Ok(true),
            Err(err) => Err(err)
                .with_context(|| format!("failed to probe updater guard: {}", self.path.display())),
        }
    }

    /// Non-blocking acquisition. Returns `None` when another process already
    /// holds the guard. The returned handle keeps the guard held until
    /// `GuardHandle::release` or process exit.
    pub fn acquire(&self) -> Result<Option<GuardHandle>> {
        let file = self.open()?;
        match file.try_lock_exclusive() {
            Ok(()) => Ok(Some(GuardHandle { file })),
            Err(err) if lock_contended(&err) => Ok(None),
            Err(err) => Err(err).with_context(|| {
                format!("failed to acquire updater guard: {}", self.path.display())
            }),
        }
    }

    fn open(&self) -> Result<File> {
        OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .open(&self.path)
            .with_context(|| format!("failed to open updater guard file: {}", self.path.display()))
    }
}

/// Held guard. Spans the whole updater lifetime: acquired at bootstrap,
/// released explicitly right before the managed executable is relaunched.
#[derive(Debug)]
pub struct GuardHandle {
    file: File,
}

impl GuardHandle {
    pub fn release(self) -> Result<()> {
        self.file
            .unlock()
            .context("failed to release updater guard")?;
        Ok(())
    }
}

fn lock_contended(err: &io::Error) -> bool {
    err.kind() == fs2::lock_contended_error().kind()
}
