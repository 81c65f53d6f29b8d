use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "wallrotate")]
#[command(author = "MrMattias")]
#[command(version)]
#[command(about = "Timed wallpaper rotation with persistent no-repeat history")]
#[command(after_help = "\
Commands:
  next      Set the next wallpaper
  previous  Set another wallpaper (same as next)
  pause     Toggle pause of the running slideshow
  current   Print the current wallpaper
  stats     Print {total, used, remaining} as JSON
  monitor   Follow the current wallpaper and stats

Without a command the rotation loop runs until Ctrl+C.")]
pub(crate) struct Cli {
    /// Command to run once; omit to run the rotation loop
    pub(crate) command: Option<String>,

    /// Wallpaper directory
    #[arg(short, long)]
    pub(crate) dir: Option<PathBuf>,

    /// Config file (default: platform config dir)
    #[arg(short, long)]
    pub(crate) config: Option<PathBuf>,

    /// Directory for history, pause marker and current wallpaper
    #[arg(long)]
    pub(crate) state_dir: Option<PathBuf>,

    /// Rotation interval (e.g., "5m", "1h", "90s")
    #[arg(short, long)]
    pub(crate) interval: Option<String>,

    /// Monitor poll interval in seconds
    #[arg(long, default_value = "3")]
    pub(crate) poll: u64,

    /// Enable debug logging
    #[arg(short, long)]
    pub(crate) verbose: bool,
}
