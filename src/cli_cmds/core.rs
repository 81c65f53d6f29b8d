use anyhow::Result;

use crate::config::Config;
use crate::dispatch::{dispatch, Command, CommandOutcome};
use crate::engine::Rotator;
use crate::scheduler::{self, Scheduler};

pub async fn cmd_dispatch(command: Command, mut rotator: Rotator) -> Result<()> {
    match dispatch(command, &mut rotator).await? {
        CommandOutcome::Rotated(rotation) => {
            if rotation.wrapped {
                println!("✓ All wallpapers used, history reset");
            }
            println!("🎨 Wallpaper set: {}", rotation.id);
            if let Some(e) = rotation.apply_error {
                eprintln!("⚠ {}", e);
            }
        }
        CommandOutcome::PauseToggled(true) => println!("⏸ Paused slideshow."),
        CommandOutcome::PauseToggled(false) => println!("▶ Resumed slideshow."),
        CommandOutcome::Current(Some(id)) => println!("{}", id),
        CommandOutcome::Current(None) => eprintln!("No wallpaper set yet."),
        CommandOutcome::Stats(stats) => println!("{}", serde_json::to_string(&stats)?),
    }

    Ok(())
}

/// Run the rotation loop until Ctrl+C
pub async fn cmd_slideshow(config: &Config, rotator: Rotator) -> Result<()> {
    let interval = config.interval();

    println!("🖼  Wallpaper slideshow");
    println!("   Directory: {}", config.wallpaper_dir().display());
    println!("   Interval:  {} seconds", interval.as_secs());
    println!("   State:     {}", config.state_paths().dir.display());
    if config.apply_action().is_enabled() {
        println!("   Apply:     {}", config.apply.command.join(" "));
    } else {
        println!("   Apply:     disabled");
    }
    println!("\n🔄 Running... (Ctrl+C to stop)\n");

    Scheduler::new(rotator, interval)
        .run(scheduler::ctrl_c())
        .await?;

    println!("\nStopped.");
    Ok(())
}
