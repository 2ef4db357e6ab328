//! Stylesheet build run once at startup.

use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::process::Command;

use crate::config::AssetConfig;

#[derive(Debug, Error)]
pub enum AssetError {
    #[error("Failed to launch {bin}: {source}")]
    Spawn {
        bin: String,
        #[source]
        source: std::io::Error,
    },
    #[error("{bin} exited with {status}: {stderr}")]
    Failed {
        bin: String,
        status: std::process::ExitStatus,
        stderr: String,
    },
}

/// Source stylesheet fed to the utility-class compiler
pub fn stylesheet_source(static_dir: &Path) -> PathBuf {
    static_dir.join("src").join("tw.css")
}

/// Compiled stylesheet served under `/static/css/main.css`
pub fn stylesheet_output(static_dir: &Path) -> PathBuf {
    static_dir.join("css").join("main.css")
}

/// Compile `src/tw.css` into `css/main.css` with the tailwind CLI.
pub async fn build_stylesheet(config: &AssetConfig) -> Result<PathBuf, AssetError> {
    let static_dir = Path::new(&config.static_dir);
    let input = stylesheet_source(static_dir);
    let output = stylesheet_output(static_dir);

    let result = Command::new(&config.tailwind_bin)
        .arg("-i")
        .arg(&input)
        .arg("-o")
        .arg(&output)
        .output()
        .await
        .map_err(|source| AssetError::Spawn {
            bin: config.tailwind_bin.clone(),
            source,
        })?;

    if !result.status.success() {
        return Err(AssetError::Failed {
            bin: config.tailwind_bin.clone(),
            status: result.status,
            stderr: String::from_utf8_lossy(&result.stderr).trim().to_string(),
        });
    }

    tracing::debug!(output = %output.display(), "Stylesheet built");
    Ok(output)
}
