use super::write_atomic;
use crate::error::{Result, RotationError};
use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

/// Rotation gate stored as the presence of an empty marker file.
///
/// Mutations are not locked here; callers hold the [`StateLock`](super::StateLock).
#[derive(Debug, Clone)]
pub struct PauseFlag {
    marker: PathBuf,
}

impl PauseFlag {
    pub fn new(marker: impl Into<PathBuf>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    pub fn is_paused(&self) -> bool {
        self.marker.exists()
    }

    /// Flip the flag and return the new state (`true` = paused)
    pub fn toggle(&self) -> Result<bool> {
        if self.is_paused() {
            self.clear()?;
            Ok(false)
        } else {
            write_atomic(&self.marker, b"")?;
            Ok(true)
        }
    }

    /// Remove the marker if present
    pub fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.marker) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(RotationError::StoreWriteFailed {
                path: self.marker.clone(),
                source,
            }),
        }
    }
}
