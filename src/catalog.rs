//! Catalog scanning: the live set of eligible wallpapers in a directory.

use crate::error::{Result, RotationError};
use crate::utils::has_allowed_extension;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Stable key for one wallpaper: its path, compared as an exact string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageId(String);

impl ImageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn as_path(&self) -> &Path {
        Path::new(&self.0)
    }

    /// File name for display, falling back to the full identifier
    pub fn file_name(&self) -> &str {
        self.as_path()
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for ImageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered so that seeded selection is reproducible.
pub type Catalog = BTreeSet<ImageId>;

/// Where and what to scan
#[derive(Debug, Clone)]
pub struct Scanner {
    pub directory: PathBuf,
    pub extensions: Vec<String>,
    pub recursive: bool,
}

impl Scanner {
    /// List eligible images. Recomputed on every call, nothing is cached.
    pub fn list(&self) -> Result<Catalog> {
        let unavailable = |source| RotationError::DirectoryUnavailable {
            path: self.directory.clone(),
            source,
        };

        let entries: Vec<PathBuf> = if self.recursive {
            // The root must be readable; unreadable subdirectories are skipped.
            fs::read_dir(&self.directory).map_err(unavailable)?;
            WalkDir::new(&self.directory)
                .follow_links(true)
                .into_iter()
                .filter_map(|e| e.ok())
                .filter(|e| e.file_type().is_file())
                .map(|e| e.into_path())
                .collect()
        } else {
            fs::read_dir(&self.directory)
                .map_err(unavailable)?
                .flatten()
                .map(|e| e.path())
                .filter(|p| p.is_file())
                .collect()
        };

        let mut catalog = Catalog::new();
        for path in entries {
            if !has_allowed_extension(&path, &self.extensions) {
                continue;
            }
            match path.to_str() {
                Some(s) => {
                    catalog.insert(ImageId::new(s));
                }
                None => tracing::warn!(path = %path.display(), "skipping non UTF-8 path"),
            }
        }

        tracing::debug!(
            directory = %self.directory.display(),
            count = catalog.len(),
            "scanned catalog"
        );
        Ok(catalog)
    }
}
