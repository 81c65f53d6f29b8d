//! One-shot commands issued by front-ends, one process per command.

use crate::catalog::ImageId;
use crate::engine::{Rotation, Rotator, Stats};
use crate::error::{Result, RotationError};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Next,
    Previous,
    Pause,
    Current,
    Stats,
}

impl FromStr for Command {
    type Err = RotationError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "next" => Ok(Command::Next),
            "previous" => Ok(Command::Previous),
            "pause" => Ok(Command::Pause),
            "current" => Ok(Command::Current),
            "stats" => Ok(Command::Stats),
            other => Err(RotationError::UnknownCommand(other.to_string())),
        }
    }
}

#[derive(Debug)]
pub enum CommandOutcome {
    Rotated(Rotation),
    /// New pause state (`true` = paused)
    PauseToggled(bool),
    Current(Option<ImageId>),
    Stats(Stats),
}

pub async fn dispatch(command: Command, rotator: &mut Rotator) -> Result<CommandOutcome> {
    match command {
        Command::Next => rotator.select_next().await.map(CommandOutcome::Rotated),
        Command::Previous => rotator.previous().await.map(CommandOutcome::Rotated),
        Command::Pause => rotator.toggle_pause().await.map(CommandOutcome::PauseToggled),
        Command::Current => rotator.current_selection().map(CommandOutcome::Current),
        Command::Stats => rotator.stats().map(CommandOutcome::Stats),
    }
}
