// Platform viewer launch for rendered graphs

use std::path::Path;
use std::process::Command;

use tracing::debug;

/// Open the file in the system viewer.
///
/// With `block`, wait for the viewer process to exit before returning;
/// otherwise leave it running. The orchestrator keeps every launch but
/// the last non-blocking so several graphs can stay open at once.
pub fn open(path: &Path, block: bool) -> Result<(), String> {
    let mut cmd = viewer_command(path);
    if block {
        let status = cmd
            .status()
            .map_err(|e| format!("Failed to launch viewer for '{}': {}", path.display(), e))?;
        if !status.success() {
            return Err(format!("Viewer exited with {}", status));
        }
    } else {
        cmd.spawn()
            .map_err(|e| format!("Failed to launch viewer for '{}': {}", path.display(), e))?;
        debug!("viewer launched for {}", path.display());
    }
    Ok(())
}

#[cfg(target_os = "macos")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("open");
    // `open -W` keeps the command alive as long as the viewer
    cmd.arg("-W").arg(path);
    cmd
}

#[cfg(target_os = "windows")]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.args(["/C", "start", "/WAIT", ""]).arg(path);
    cmd
}

#[cfg(not(any(target_os = "macos", target_os = "windows")))]
fn viewer_command(path: &Path) -> Command {
    let mut cmd = Command::new("xdg-open");
    cmd.arg(path);
    cmd
}
