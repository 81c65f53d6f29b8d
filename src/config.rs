use crate::apply::ApplyAction;
use crate::catalog::Scanner;
use crate::scheduler::parse_interval;
use crate::state::StatePaths;
use crate::utils::{expand_tilde, IMAGE_EXTENSIONS};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

const DEFAULT_INTERVAL_SECS: u64 = 300;

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub wallpaper: WallpaperConfig,
    #[serde(default)]
    pub rotation: RotationConfig,
    #[serde(default)]
    pub apply: ApplyConfig,
    #[serde(default)]
    pub state: StateConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WallpaperConfig {
    pub directory: PathBuf,
    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,
    #[serde(default)]
    pub recursive: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RotationConfig {
    /// Time between automatic rotations ("90s", "5m", "1h"; bare number = minutes)
    pub interval: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyConfig {
    /// Wallpaper-set command; `{path}` is replaced, otherwise the path is appended.
    /// Empty disables the external action.
    pub command: Vec<String>,
    #[serde(default = "default_apply_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StateConfig {
    /// Where history, pause marker and current selection live
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
    #[serde(default = "default_lock_timeout")]
    pub lock_timeout_secs: u64,
}

fn default_extensions() -> Vec<String> {
    IMAGE_EXTENSIONS.iter().map(|e| e.to_string()).collect()
}

fn default_apply_timeout() -> u64 {
    10
}

fn default_lock_timeout() -> u64 {
    30
}

impl Default for WallpaperConfig {
    fn default() -> Self {
        Self {
            directory: dirs::picture_dir()
                .map(|p| p.join("wallpapers"))
                .unwrap_or_else(|| PathBuf::from("~/Pictures/wallpapers")),
            extensions: default_extensions(),
            recursive: false,
        }
    }
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            interval: "5m".to_string(),
        }
    }
}

impl Default for ApplyConfig {
    fn default() -> Self {
        Self {
            command: vec!["swww".into(), "img".into(), "{path}".into()],
            timeout_secs: default_apply_timeout(),
        }
    }
}

impl Default for StateConfig {
    fn default() -> Self {
        Self {
            directory: None,
            lock_timeout_secs: default_lock_timeout(),
        }
    }
}

impl Config {
    /// Return the default path to the configuration file.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("com", "mrmattias", "wallrotate")
            .map(|dirs| dirs.config_dir().to_path_buf())
            .unwrap_or_else(|| PathBuf::from("."))
            .join("config.toml")
    }

    /// Load config from `path` (or the default location), creating it if
    /// missing. A corrupt file falls back to defaults and is left untouched.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = path.map(Path::to_path_buf).unwrap_or_else(Self::config_path);

        if path.exists() {
            let data = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            match toml::from_str::<Config>(&data) {
                Ok(config) => Ok(config),
                Err(e) => {
                    tracing::warn!(
                        path = %path.display(),
                        error = %e,
                        "failed to parse config, using defaults"
                    );
                    Ok(Config::default())
                }
            }
        } else {
            let config = Config::default();
            config.save(&path)?;
            Ok(config)
        }
    }

    /// Save config to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let data = toml::to_string_pretty(self)?;
        fs::write(path, data)
            .with_context(|| format!("Failed to write config {}", path.display()))?;

        Ok(())
    }

    /// Get wallpaper directory, expanding ~ if needed.
    pub fn wallpaper_dir(&self) -> PathBuf {
        expand_tilde(&self.wallpaper.directory)
    }

    pub fn scanner(&self) -> Scanner {
        Scanner {
            directory: self.wallpaper_dir(),
            extensions: self.wallpaper.extensions.clone(),
            recursive: self.wallpaper.recursive,
        }
    }

    /// State directory: configured, or the platform cache dir.
    pub fn state_paths(&self) -> StatePaths {
        let dir = match &self.state.directory {
            Some(dir) => expand_tilde(dir),
            None => directories::ProjectDirs::from("com", "mrmattias", "wallrotate")
                .map(|dirs| dirs.cache_dir().to_path_buf())
                .unwrap_or_else(|| PathBuf::from("/tmp/wallrotate")),
        };
        StatePaths::new(dir)
    }

    /// A zero timeout would fail every run, so it means the default.
    pub fn apply_action(&self) -> ApplyAction {
        if self.apply.command.is_empty() {
            return ApplyAction::disabled();
        }
        let timeout_secs = match self.apply.timeout_secs {
            0 => {
                tracing::warn!(
                    "apply timeout_secs = 0, using {}s",
                    default_apply_timeout()
                );
                default_apply_timeout()
            }
            secs => secs,
        };
        ApplyAction::new(self.apply.command.clone(), Duration::from_secs(timeout_secs))
    }

    pub fn lock_timeout(&self) -> Duration {
        Duration::from_secs(self.state.lock_timeout_secs)
    }

    /// Rotation interval; an unparsable or zero value falls back to 5 minutes.
    pub fn interval(&self) -> Duration {
        parse_interval(&self.rotation.interval)
            .filter(|interval| !interval.is_zero())
            .unwrap_or_else(|| {
                tracing::warn!(
                    interval = %self.rotation.interval,
                    "invalid rotation interval, using {}s",
                    DEFAULT_INTERVAL_SECS
                );
                Duration::from_secs(DEFAULT_INTERVAL_SECS)
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_created_with_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("conf/config.toml");

        let config = Config::load(Some(path.as_path())).unwrap();
        assert!(path.exists());
        assert_eq!(config.interval(), Duration::from_secs(300));
        assert_eq!(config.wallpaper.extensions, vec!["jpg", "jpeg", "png"]);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(
            &path,
            r#"
[wallpaper]
directory = "/srv/walls"

[apply]
command = []

[state]
directory = "/tmp/wr-state"
"#,
        )
        .unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.wallpaper_dir(), PathBuf::from("/srv/walls"));
        assert!(!config.wallpaper.recursive);
        assert!(!config.apply_action().is_enabled());
        assert_eq!(config.apply.timeout_secs, 10);
        assert_eq!(config.state_paths().dir, PathBuf::from("/tmp/wr-state"));
        assert_eq!(config.lock_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_corrupt_file_uses_defaults_and_is_kept() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");
        fs::write(&path, "[wallpaper\nnope").unwrap();

        let config = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(config.rotation.interval, "5m");
        assert_eq!(fs::read_to_string(&path).unwrap(), "[wallpaper\nnope");
    }

    #[test]
    fn test_invalid_interval_falls_back() {
        let mut config = Config::default();
        config.rotation.interval = "soon".into();
        assert_eq!(config.interval(), Duration::from_secs(300));

        config.rotation.interval = "90s".into();
        assert_eq!(config.interval(), Duration::from_secs(90));
    }

    #[test]
    fn test_zero_interval_falls_back() {
        let mut config = Config::default();
        for zero in ["0", "0s", "0m", "0h"] {
            config.rotation.interval = zero.into();
            assert_eq!(config.interval(), Duration::from_secs(300));
        }
    }

    #[tokio::test]
    async fn test_zero_apply_timeout_uses_default() {
        let mut config = Config::default();
        config.apply.command = vec!["true".into()];
        config.apply.timeout_secs = 0;

        config
            .apply_action()
            .run(&crate::catalog::ImageId::new("/w/a.jpg"))
            .await
            .unwrap();
    }
}
