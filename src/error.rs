use std::path::PathBuf;
use thiserror::Error;

/// Failures of the rotation engine and its state stores.
#[derive(Debug, Error)]
pub enum RotationError {
    /// The wallpaper directory could not be listed.
    #[error("wallpaper directory unavailable: {}", path.display())]
    DirectoryUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The directory was listed but contains no eligible images.
    #[error("no wallpapers found in {}", path.display())]
    NoImagesAvailable { path: PathBuf },

    /// A persisted record exists but cannot be parsed.
    #[error("corrupt state file {}", path.display())]
    CorruptState {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown command: {0} (expected next, previous, pause, current or stats)")]
    UnknownCommand(String),

    /// The external wallpaper-set action failed. Never aborts a rotation.
    #[error("wallpaper apply action failed: {0}")]
    ApplyActionFailed(String),

    #[error("failed to read {}", path.display())]
    StoreReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {}", path.display())]
    StoreWriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Another process held the state lock for longer than the configured wait.
    #[error("state is locked by another process ({})", path.display())]
    StateBusy { path: PathBuf },
}

pub type Result<T> = std::result::Result<T, RotationError>;
