//! Media player control through playerctl (MPRIS)

use futures::future::BoxFuture;
use tokio::process::Command;
use tracing::{debug, info};

use crate::surfaces::{LoopControl, VideoAction};

/// Loop status playerctl reports when looping is off
const LOOP_OFF: &str = "None";
/// Loop status used when enabling looping
const LOOP_TRACK: &str = "Track";

/// Controls a media player by shelling out to `playerctl`
#[derive(Debug, Clone, Default)]
pub struct PlayerctlPlayer {
    /// Player name passed as `--player`; `None` lets playerctl pick
    pub player: Option<String>,
}

impl PlayerctlPlayer {
    pub fn new(player: Option<String>) -> Self {
        Self { player }
    }

    /// Run playerctl with `args` and return its trimmed stdout
    async fn playerctl(&self, args: &[&str]) -> Result<String, String> {
        debug!("Running playerctl {}", args.join(" "));

        let mut command = Command::new("playerctl");
        if let Some(player) = &self.player {
            command.args(["--player", player.as_str()]);
        }

        let output = command
            .args(args)
            .output()
            .await
            .map_err(|e| format!("Failed to execute playerctl {}: {}", args.join(" "), e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(format!("playerctl {} failed: {}", args.join(" "), stderr.trim()));
        }

        Ok(String::from_utf8_lossy(&output.stdout).trim().to_string())
    }
}

/// Interpret playerctl's loop status
pub fn parse_loop_status(status: &str) -> Result<bool, String> {
    match status {
        LOOP_OFF => Ok(false),
        "Track" | "Playlist" => Ok(true),
        other => Err(format!("Unexpected loop status from playerctl: {:?}", other)),
    }
}

impl VideoAction for PlayerctlPlayer {
    fn pause(&self) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            self.playerctl(&["pause"]).await?;
            info!("Playback paused");
            Ok(())
        })
    }
}

impl LoopControl for PlayerctlPlayer {
    fn loop_enabled(&self) -> BoxFuture<'_, Result<bool, String>> {
        Box::pin(async move {
            let status = self.playerctl(&["loop"]).await?;
            parse_loop_status(&status)
        })
    }

    fn set_loop(&self, enabled: bool) -> BoxFuture<'_, Result<(), String>> {
        Box::pin(async move {
            let status = if enabled { LOOP_TRACK } else { LOOP_OFF };
            self.playerctl(&["loop", status]).await?;
            info!("Loop status set to {}", status);
            Ok(())
        })
    }
}
