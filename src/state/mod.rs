//! Durable rotation state shared between the scheduler and command processes.
//!
//! Every file lives in one state directory. Writers replace files atomically
//! (temp file + rename) and every read-modify-write runs under [`StateLock`].

mod current;
mod history;
mod lock;
mod pause;

pub use current::CurrentSelection;
#[cfg(test)]
pub use history::History;
pub use history::HistoryStore;
pub use lock::StateLock;
pub use pause::PauseFlag;

use crate::error::{Result, RotationError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

const HISTORY_FILE: &str = "history.json";
const CURRENT_FILE: &str = "current_wallpaper.txt";
const PAUSE_FILE: &str = "paused";
const LOCK_FILE: &str = "state.lock";

/// Well-known file locations inside the state directory
#[derive(Debug, Clone)]
pub struct StatePaths {
    pub dir: PathBuf,
}

impl StatePaths {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn history(&self) -> PathBuf {
        self.dir.join(HISTORY_FILE)
    }

    pub fn current(&self) -> PathBuf {
        self.dir.join(CURRENT_FILE)
    }

    pub fn pause_marker(&self) -> PathBuf {
        self.dir.join(PAUSE_FILE)
    }

    pub fn lock(&self) -> PathBuf {
        self.dir.join(LOCK_FILE)
    }
}

/// Read a state file, mapping "not found" to `None`
fn read_optional(path: &Path) -> Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(source) => Err(RotationError::StoreReadFailed {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Replace `path` with `content` so readers see either the old or the new file
fn write_atomic(path: &Path, content: &[u8]) -> Result<()> {
    let failed = |source| RotationError::StoreWriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent).map_err(failed)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(failed)?;
    tmp.write_all(content).map_err(failed)?;
    tmp.as_file().sync_all().map_err(failed)?;
    tmp.persist(path).map_err(|e| failed(e.error))?;

    Ok(())
}
