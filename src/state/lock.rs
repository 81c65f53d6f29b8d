use crate::error::{Result, RotationError};
use std::fs::{self, File, OpenOptions, TryLockError};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tokio::time::{sleep, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

/// Exclusive advisory lock on the state directory, released on drop.
///
/// Works across processes (the scheduler and short-lived commands) and across
/// separate handles inside one process.
#[derive(Debug)]
pub struct StateLock {
    _file: File,
    path: PathBuf,
}

impl StateLock {
    /// Wait up to `wait` for the lock without blocking the runtime
    pub async fn acquire(path: &Path, wait: Duration) -> Result<Self> {
        let write_failed = |source| RotationError::StoreWriteFailed {
            path: path.to_path_buf(),
            source,
        };

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_failed)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(path)
            .map_err(write_failed)?;

        let deadline = Instant::now() + wait;
        loop {
            match file.try_lock() {
                Ok(()) => {
                    return Ok(Self {
                        _file: file,
                        path: path.to_path_buf(),
                    })
                }
                Err(TryLockError::WouldBlock) => {
                    if Instant::now() >= deadline {
                        return Err(RotationError::StateBusy {
                            path: path.to_path_buf(),
                        });
                    }
                    tracing::debug!(lock = %path.display(), "state locked, waiting");
                    sleep(POLL_INTERVAL).await;
                }
                Err(TryLockError::Error(source)) => return Err(write_failed(source)),
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}
