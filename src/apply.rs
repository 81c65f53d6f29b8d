use crate::catalog::ImageId;
use crate::error::RotationError;
use std::time::Duration;
use tokio::process::Command;

/// Placeholder replaced by the wallpaper path in command arguments
pub const PATH_PLACEHOLDER: &str = "{path}";

/// External command that sets the desktop wallpaper (e.g. `swww img {path}`)
#[derive(Debug, Clone)]
pub struct ApplyAction {
    argv: Vec<String>,
    timeout: Duration,
}

impl ApplyAction {
    /// An empty `argv` disables the action
    pub fn new(argv: Vec<String>, timeout: Duration) -> Self {
        Self { argv, timeout }
    }

    pub fn disabled() -> Self {
        Self::new(Vec::new(), Duration::ZERO)
    }

    pub fn is_enabled(&self) -> bool {
        !self.argv.is_empty()
    }

    /// Program and arguments for one wallpaper
    fn command_line(&self, id: &ImageId) -> Vec<String> {
        let mut argv: Vec<String> = self
            .argv
            .iter()
            .map(|arg| arg.replace(PATH_PLACEHOLDER, id.as_str()))
            .collect();
        if !self.argv.iter().any(|arg| arg.contains(PATH_PLACEHOLDER)) {
            argv.push(id.to_string());
        }
        argv
    }

    /// Run the command, killing it once the timeout elapses
    pub async fn run(&self, id: &ImageId) -> Result<(), RotationError> {
        if !self.is_enabled() {
            tracing::debug!("no apply command configured");
            return Ok(());
        }

        let argv = self.command_line(id);
        let Some((program, args)) = argv.split_first() else {
            return Ok(());
        };

        let mut cmd = Command::new(program);
        cmd.args(args).kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return Err(RotationError::ApplyActionFailed(format!(
                    "failed to run {}: {}",
                    program, e
                )))
            }
            Err(_) => {
                return Err(RotationError::ApplyActionFailed(format!(
                    "{} timed out after {}s",
                    program,
                    self.timeout.as_secs_f32()
                )))
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(RotationError::ApplyActionFailed(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        Ok(())
    }
}
