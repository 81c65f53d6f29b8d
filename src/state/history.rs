use super::{read_optional, write_atomic};
use crate::catalog::{Catalog, ImageId};
use crate::error::{Result, RotationError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

/// Wallpapers already shown since the last full-cycle reset
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    pub used: BTreeSet<ImageId>,
    /// Number of full-cycle wraps so far
    #[serde(default)]
    pub cycles: u64,
    /// RFC 3339 time of the last wrap
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_reset: Option<String>,
    /// Fields written by newer versions, kept on rewrite
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl History {
    /// Catalog entries not shown yet, in catalog order
    pub fn available<'a>(&self, catalog: &'a Catalog) -> Vec<&'a ImageId> {
        catalog.iter().filter(|id| !self.used.contains(*id)).collect()
    }

    /// Number of catalog entries already shown; stale ids don't count
    pub fn used_in(&self, catalog: &Catalog) -> usize {
        catalog.iter().filter(|id| self.used.contains(*id)).count()
    }

    /// Start a new cycle
    pub fn reset(&mut self) {
        self.used.clear();
        self.cycles += 1;
        self.last_reset = Some(chrono::Local::now().to_rfc3339());
    }

    pub fn record(&mut self, id: ImageId) {
        self.used.insert(id);
    }
}

/// Loads and saves [`History`] as a single JSON record
#[derive(Debug, Clone)]
pub struct HistoryStore {
    path: PathBuf,
}

impl HistoryStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Empty history when no record exists; `CorruptState` when it can't be parsed
    pub fn load(&self) -> Result<History> {
        let Some(content) = read_optional(&self.path)? else {
            return Ok(History::default());
        };
        serde_json::from_str(&content).map_err(|source| RotationError::CorruptState {
            path: self.path.clone(),
            source,
        })
    }

    /// Like [`load`](Self::load), but a corrupt record is logged and treated as empty
    pub fn load_or_reset(&self) -> Result<History> {
        match self.load() {
            Err(e @ RotationError::CorruptState { .. }) => {
                tracing::warn!(error = %e, "discarding unreadable history");
                Ok(History::default())
            }
            other => other,
        }
    }

    pub fn save(&self, history: &History) -> Result<()> {
        let content = serde_json::to_string_pretty(history).map_err(|e| {
            RotationError::StoreWriteFailed {
                path: self.path.clone(),
                source: e.into(),
            }
        })?;
        write_atomic(&self.path, content.as_bytes())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn ids(names: &[&str]) -> Catalog {
        names.iter().map(|n| ImageId::new(*n)).collect()
    }

    #[test]
    fn test_missing_record_loads_empty() {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path().join("history.json"));
        assert_eq!(store.load().unwrap(), History::default());
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let store = HistoryStore::new(tmp.path().join("cache/history.json"));

        let mut history = History::default();
        history.record(ImageId::new("/w/a.jpg"));
        store.save(&history).unwrap();

        let loaded = store.load().unwrap();
        assert!(loaded.used.contains(&ImageId::new("/w/a.jpg")));
        assert_eq!(loaded.cycles, 0);
    }

    #[test]
    fn test_reads_minimal_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        fs::write(&path, r#"{"used": ["/w/a.jpg", "/w/b.png"]}"#).unwrap();

        let history = HistoryStore::new(&path).load().unwrap();
        assert_eq!(history.used.len(), 2);
    }

    #[test]
    fn test_unknown_fields_survive_rewrite() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        fs::write(&path, r#"{"used": [], "favourites": ["/w/x.jpg"]}"#).unwrap();

        let store = HistoryStore::new(&path);
        let mut history = store.load().unwrap();
        history.record(ImageId::new("/w/a.jpg"));
        store.save(&history).unwrap();

        let raw: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(raw["favourites"][0], "/w/x.jpg");
        assert_eq!(raw["used"][0], "/w/a.jpg");
    }

    #[test]
    fn test_corrupt_record() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("history.json");
        fs::write(&path, "{ not json").unwrap();

        let store = HistoryStore::new(&path);
        assert!(matches!(
            store.load(),
            Err(RotationError::CorruptState { .. })
        ));
        assert_eq!(store.load_or_reset().unwrap(), History::default());
    }

    #[test]
    fn test_available_and_used_ignore_stale_ids() {
        let catalog = ids(&["a", "b", "c"]);
        let mut history = History::default();
        history.record(ImageId::new("a"));
        history.record(ImageId::new("gone"));

        let available: Vec<&str> = history
            .available(&catalog)
            .into_iter()
            .map(ImageId::as_str)
            .collect();
        assert_eq!(available, vec!["b", "c"]);
        assert_eq!(history.used_in(&catalog), 1);
    }

    #[test]
    fn test_reset_counts_cycles() {
        let mut history = History::default();
        history.record(ImageId::new("a"));
        history.reset();

        assert!(history.used.is_empty());
        assert_eq!(history.cycles, 1);
        assert!(history.last_reset.is_some());
    }
}
