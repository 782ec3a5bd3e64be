//! Pronunciation playback through an external player process (mpv by default).
//!
//! Fire-and-forget: the child is spawned with all stdio detached so it cannot
//! draw over the TUI, and a background task reaps it and logs the exit.

use std::process::Stdio;

use anyhow::Context;
use tokio::process::Command;
use tracing::{debug, info, warn};

use wordbook_proto::config::AudioConfig;

#[derive(Debug, Clone)]
pub struct Player {
    program: String,
    args: Vec<String>,
}

impl Player {
    pub fn new(config: &AudioConfig) -> Self {
        Self {
            program: config.player.clone(),
            args: config.player_args.clone(),
        }
    }

    fn command(&self, url: &str) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        cmd
    }

    /// Start playing `url`. Errors only when the player cannot be started.
    pub fn play(&self, url: &str) -> anyhow::Result<()> {
        let mut child = self
            .command(url)
            .spawn()
            .with_context(|| format!("failed to start {}", self.program))?;
        info!("{}: playing {} (pid {:?})", self.program, url, child.id());

        let program = self.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) if status.success() => debug!("{} finished", program),
                Ok(status) => warn!("{} exited with {}", program, status),
                Err(e) => warn!("{} wait failed: {}", program, e),
            }
        });
        Ok(())
    }
}
