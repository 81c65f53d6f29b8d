use anyhow::Result;
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use super::Cli;
use crate::cli_cmds::*;
use crate::config::Config;
use crate::dispatch::Command;
use crate::engine::Rotator;

/// What the command token asks for
#[derive(Debug)]
enum Mode {
    Slideshow,
    Monitor,
    Dispatch(Command),
}

impl Mode {
    /// Unknown tokens fail here, before any file is touched.
    fn from_token(token: Option<&str>) -> Result<Self> {
        Ok(match token {
            None => Mode::Slideshow,
            Some("monitor") => Mode::Monitor,
            Some(token) => Mode::Dispatch(token.parse()?),
        })
    }
}

pub(crate) async fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mode = Mode::from_token(cli.command.as_deref())?;

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(dir) = cli.dir {
        config.wallpaper.directory = dir;
    }
    if let Some(dir) = cli.state_dir {
        config.state.directory = Some(dir);
    }
    if let Some(interval) = cli.interval {
        config.rotation.interval = interval;
    }

    let rotator = Rotator::new(
        config.scanner(),
        &config.state_paths(),
        config.apply_action(),
        config.lock_timeout(),
    );

    match mode {
        Mode::Slideshow => {
            cmd_slideshow(&config, rotator).await?;
        }
        Mode::Monitor => {
            cmd_monitor(rotator, Duration::from_secs(cli.poll)).await?;
        }
        Mode::Dispatch(command) => {
            cmd_dispatch(command, rotator).await?;
        }
    }

    Ok(())
}

/// Logs go to stderr; stdout carries command output only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
