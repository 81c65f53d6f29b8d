use crate::engine::{Rotation, Rotator};
use crate::error::RotationError;
use anyhow::Result;
use std::future::Future;
use std::time::Duration;
use tokio::time::MissedTickBehavior;

/// Parse interval string like "30m", "1h", "90s"; `None` if unparsable or too large
pub fn parse_interval(s: &str) -> Option<Duration> {
    let s = s.trim().to_lowercase();

    let (number, unit_secs) = if let Some(hours) = s.strip_suffix('h') {
        (hours, 3600)
    } else if let Some(mins) = s.strip_suffix('m') {
        (mins, 60)
    } else if let Some(secs) = s.strip_suffix('s') {
        (secs, 1)
    } else {
        // Plain number = minutes
        (s.as_str(), 60)
    };

    number
        .parse::<u64>()
        .ok()?
        .checked_mul(unit_secs)
        .map(Duration::from_secs)
}

/// What a single tick did
#[derive(Debug)]
pub enum TickOutcome {
    Rotated(Rotation),
    Paused,
    Failed(RotationError),
}

/// Rotates on a fixed interval unless paused
pub struct Scheduler {
    rotator: Rotator,
    interval: Duration,
}

impl Scheduler {
    pub fn new(rotator: Rotator, interval: Duration) -> Self {
        Self { rotator, interval }
    }

    pub async fn tick(&mut self) -> TickOutcome {
        if self.rotator.is_paused() {
            tracing::debug!("paused, skipping rotation");
            return TickOutcome::Paused;
        }

        match self.rotator.select_next().await {
            Ok(rotation) => TickOutcome::Rotated(rotation),
            Err(e) => TickOutcome::Failed(e),
        }
    }

    /// Tick immediately, then every interval, until `shutdown` resolves.
    ///
    /// A pause marker left by a previous run is cleared first: starting the
    /// loop always resumes rotation.
    pub async fn run(mut self, shutdown: impl Future<Output = ()>) -> Result<()> {
        self.rotator.clear_pause().await?;

        let mut ticker = tokio::time::interval(self.interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        tokio::pin!(shutdown);

        loop {
            tokio::select! {
                biased;
                _ = &mut shutdown => break,
                _ = ticker.tick() => match self.tick().await {
                    TickOutcome::Rotated(rotation) => {
                        if rotation.wrapped {
                            println!("✓ All wallpapers used, starting a new cycle");
                        }
                        println!("  → {}", rotation.id.file_name());
                    }
                    TickOutcome::Paused => {}
                    TickOutcome::Failed(e) => {
                        tracing::error!(error = %e, "rotation failed, retrying next tick");
                    }
                },
            }
        }

        Ok(())
    }
}

/// Resolves on Ctrl+C
pub async fn ctrl_c() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "could not listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
}
