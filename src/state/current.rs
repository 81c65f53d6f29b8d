use super::{read_optional, write_atomic};
use crate::catalog::ImageId;
use crate::error::Result;
use std::path::{Path, PathBuf};

/// Plain-text publication of the most recently applied wallpaper
#[derive(Debug, Clone)]
pub struct CurrentSelection {
    path: PathBuf,
}

impl CurrentSelection {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// `None` until the first rotation has been published
    pub fn read(&self) -> Result<Option<ImageId>> {
        let content = read_optional(&self.path)?;
        Ok(content
            .map(|c| c.trim().to_string())
            .filter(|c| !c.is_empty())
            .map(ImageId::new))
    }

    pub fn publish(&self, id: &ImageId) -> Result<()> {
        write_atomic(&self.path, id.as_str().as_bytes())
    }
}
