//! Build command execution.

use relic_core::{Error, Result};
use std::path::Path;
use tokio::process::Command;
use tracing::info;

/// Run the build command through a shell, inheriting stdio and the ambient
/// environment, and wait for it to finish. A non-zero exit is fatal.
pub async fn run_build(command: &str, workspace: &Path) -> Result<()> {
    info!(command = %command, "running build command");

    let status = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(workspace)
        .status()
        .await
        .map_err(|e| Error::BuildSpawn(e.to_string()))?;

    if !status.success() {
        return Err(Error::BuildFailed {
            exit_code: status.code().unwrap_or(-1),
        });
    }
    Ok(())
}
