//! Host tooling checks

use tokio::process::Command;
use tracing::info;

/// Check if playerctl is available on the system
pub async fn check_playerctl_available() -> Result<(), String> {
    let output = Command::new("playerctl")
        .arg("--version")
        .output()
        .await
        .map_err(|_| "playerctl is not available. This server requires playerctl to control media playback.".to_string())?;

    info!("playerctl is available: {}", String::from_utf8_lossy(&output.stdout).trim());
    Ok(())
}
