//! External editor integration.
//!
//! Plaintext only ever touches disk inside a private temporary directory that
//! is removed when the buffer has been read back.

use std::path::Path;
use std::process::{Command, ExitStatus};

use tempfile::TempDir;
use zeroize::Zeroizing;

/// Editor command and per-mode arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSettings {
    pub command: String,
    pub new_args: Vec<String>,
    pub read_args: Vec<String>,
}

/// Open the editor on a buffer seeded with `initial` and return the saved bytes.
///
/// A non-zero editor exit status is an error and nothing is returned.
pub fn capture_entry(
    settings: &EditorSettings,
    buffer_name: &str,
    initial: &[u8],
) -> anyhow::Result<Zeroizing<Vec<u8>>> {
    let staging = staging_dir()?;
    let path = staging.path().join(buffer_name);
    std::fs::write(&path, initial)
        .map_err(|e| anyhow::anyhow!("Failed to create editor buffer: {}", e))?;

    let status = run_editor(&settings.command, &settings.new_args, &path)?;
    if !status.success() {
        return Err(anyhow::anyhow!(
            "Editor exited with {}; entry not saved",
            status
        ));
    }

    let contents = std::fs::read(&path)
        .map_err(|e| anyhow::anyhow!("Failed to read editor buffer: {}", e))?;
    Ok(Zeroizing::new(contents))
}

/// Show decrypted text in the editor with the read arguments.
pub fn display_entry(
    settings: &EditorSettings,
    buffer_name: &str,
    plaintext: &[u8],
) -> anyhow::Result<()> {
    let staging = staging_dir()?;
    let path = staging.path().join(buffer_name);
    std::fs::write(&path, plaintext)
        .map_err(|e| anyhow::anyhow!("Failed to create editor buffer: {}", e))?;

    let status = run_editor(&settings.command, &settings.read_args, &path)?;
    if !status.success() {
        tracing::warn!(editor = %settings.command, %status, "editor exited with failure");
    }
    Ok(())
}

fn staging_dir() -> anyhow::Result<TempDir> {
    tempfile::Builder::new()
        .prefix("diary-")
        .tempdir()
        .map_err(|e| anyhow::anyhow!("Failed to create temporary directory: {}", e))
}

fn run_editor(command: &str, args: &[String], path: &Path) -> anyhow::Result<ExitStatus> {
    tracing::debug!(editor = command, ?args, "launching editor");
    Command::new(command)
        .args(args)
        .arg(path)
        .status()
        .map_err(|e| anyhow::anyhow!("Failed to launch editor `{}`: {}", command, e))
}
