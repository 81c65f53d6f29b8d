//! Terminal front-end: follows the published wallpaper and stats.

use anyhow::Result;
use std::time::Duration;

use crate::catalog::ImageId;
use crate::engine::{Rotator, Stats};
use crate::scheduler;

const MIN_POLL: Duration = Duration::from_millis(100);

/// What has already been printed, so only changes are reported
#[derive(Debug, Default)]
struct MonitorView {
    shown: Option<ImageId>,
    waiting_shown: bool,
    stats: Option<(Stats, bool)>,
}

impl MonitorView {
    fn update(&mut self, current: Option<ImageId>, stats: Option<Stats>, paused: bool) -> Vec<String> {
        let mut lines = Vec::new();

        match current {
            None if !self.waiting_shown && self.shown.is_none() => {
                self.waiting_shown = true;
                lines.push("Waiting for slideshow to start...".to_string());
            }
            Some(id) if self.shown.as_ref() != Some(&id) => {
                lines.push(format!("🎨 {}", id.file_name()));
                self.shown = Some(id);
            }
            _ => {}
        }

        if let Some(stats) = stats {
            if self.stats != Some((stats, paused)) {
                lines.push(format!(
                    "   {} total, {} used, {} remaining{}",
                    stats.total,
                    stats.used,
                    stats.remaining,
                    if paused { " (paused)" } else { "" }
                ));
                self.stats = Some((stats, paused));
            }
        }

        lines
    }
}

pub async fn cmd_monitor(rotator: Rotator, poll: Duration) -> Result<()> {
    println!(
        "Following {} (Ctrl+C to stop)",
        rotator.current_path().display()
    );

    let mut view = MonitorView::default();
    let mut ticker = tokio::time::interval(poll.max(MIN_POLL));
    let shutdown = scheduler::ctrl_c();
    tokio::pin!(shutdown);

    loop {
        tokio::select! {
            biased;
            _ = &mut shutdown => break,
            _ = ticker.tick() => {
                let current = rotator.current_selection().unwrap_or_else(|e| {
                    tracing::warn!(error = %e, "failed to read current wallpaper");
                    None
                });
                let stats = rotator.stats().map_err(|e| {
                    tracing::warn!(error = %e, "failed to refresh stats");
                }).ok();

                for line in view.update(current, stats, rotator.is_paused()) {
                    println!("{}", line);
                }
            }
        }
    }

    Ok(())
}
