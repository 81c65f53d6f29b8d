//! Rotation engine: picks the next wallpaper without repeats until the
//! whole catalog has been shown, then starts a new cycle.

use crate::apply::ApplyAction;
use crate::catalog::{ImageId, Scanner};
use crate::error::{Result, RotationError};
use crate::state::{CurrentSelection, HistoryStore, PauseFlag, StateLock, StatePaths};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Outcome of one successful rotation
#[derive(Debug)]
pub struct Rotation {
    pub id: ImageId,
    /// Every catalog entry had been shown, so history was reset first
    pub wrapped: bool,
    /// Set when the apply command failed; the rotation is still recorded
    pub apply_error: Option<RotationError>,
}

/// Derived snapshot, never stored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    pub total: usize,
    pub used: usize,
    pub remaining: usize,
}

pub struct Rotator {
    scanner: Scanner,
    lock_path: PathBuf,
    lock_timeout: Duration,
    history: HistoryStore,
    pause: PauseFlag,
    current: CurrentSelection,
    apply: ApplyAction,
    rng: StdRng,
}

impl Rotator {
    pub fn new(
        scanner: Scanner,
        paths: &StatePaths,
        apply: ApplyAction,
        lock_timeout: Duration,
    ) -> Self {
        Self {
            scanner,
            lock_path: paths.lock(),
            lock_timeout,
            history: HistoryStore::new(paths.history()),
            pause: PauseFlag::new(paths.pause_marker()),
            current: CurrentSelection::new(paths.current()),
            apply,
            rng: StdRng::from_entropy(),
        }
    }

    /// Replace the entropy-seeded RNG with a reproducible one
    #[cfg(test)]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = StdRng::seed_from_u64(seed);
        self
    }

    async fn lock(&self) -> Result<StateLock> {
        StateLock::acquire(&self.lock_path, self.lock_timeout).await
    }

    /// Choose, apply, record and publish the next wallpaper.
    ///
    /// Runs entirely under the state lock so concurrent processes never
    /// interleave their history load and save.
    pub async fn select_next(&mut self) -> Result<Rotation> {
        let lock = self.lock().await?;
        tracing::debug!(lock = %lock.path().display(), "state lock acquired");

        let catalog = self.scanner.list()?;
        if catalog.is_empty() {
            return Err(RotationError::NoImagesAvailable {
                path: self.scanner.directory.clone(),
            });
        }

        let mut history = self.history.load_or_reset()?;
        let mut available = history.available(&catalog);
        let wrapped = available.is_empty();
        if wrapped {
            tracing::info!(
                total = catalog.len(),
                cycle = history.cycles + 1,
                "all wallpapers used, resetting history"
            );
            history.reset();
            available = catalog.iter().collect();
        }

        let Some(id) = available.choose(&mut self.rng).map(|id| (*id).clone()) else {
            return Err(RotationError::NoImagesAvailable {
                path: self.scanner.directory.clone(),
            });
        };

        let apply_error = match self.apply.run(&id).await {
            Ok(()) => None,
            Err(e) => {
                tracing::warn!(wallpaper = %id, error = %e, "apply failed, recording anyway");
                Some(e)
            }
        };

        history.record(id.clone());
        self.history.save(&history)?;
        self.current.publish(&id)?;

        tracing::info!(
            wallpaper = %id,
            remaining = catalog.len().saturating_sub(history.used_in(&catalog)),
            "wallpaper rotated"
        );

        Ok(Rotation {
            id,
            wrapped,
            apply_error,
        })
    }

    /// No back-navigation exists: this is another fresh pick.
    pub async fn previous(&mut self) -> Result<Rotation> {
        self.select_next().await
    }

    pub fn current_selection(&self) -> Result<Option<ImageId>> {
        self.current.read()
    }

    pub fn stats(&self) -> Result<Stats> {
        let catalog = self.scanner.list()?;
        let history = self.history.load_or_reset()?;
        let total = catalog.len();
        let used = history.used_in(&catalog);

        Ok(Stats {
            total,
            used,
            remaining: total - used,
        })
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_paused()
    }

    /// Returns the new state (`true` = paused)
    pub async fn toggle_pause(&self) -> Result<bool> {
        let _lock = self.lock().await?;
        self.pause.toggle()
    }

    pub async fn clear_pause(&self) -> Result<()> {
        let _lock = self.lock().await?;
        self.pause.clear()
    }

    /// Published-selection file, polled by front-ends
    pub fn current_path(&self) -> &std::path::Path {
        self.current.path()
    }
}
