use anyhow::{Context, Result};
use log::{info, warn};
use std::path::PathBuf;

use crate::runtime::Runtime;
use crate::settings::{APP_DIR_NAME, SettingsStore};

/// Pick the download directory: explicit flag, then the saved setting, then
/// the platform default.
#[tracing::instrument(skip(runtime, store))]
pub fn resolve_download_dir<R: Runtime, S: SettingsStore>(
    runtime: &R,
    store: Option<&S>,
    explicit: Option<PathBuf>,
) -> Result<PathBuf> {
    let dir = match explicit {
        Some(dir) => dir,
        None => match store.map(|s| s.read()).transpose() {
            Ok(Some(Some(saved))) => saved,
            Ok(_) => default_download_dir(runtime)?,
            Err(e) => {
                warn!("Ignoring unreadable settings: {:#}", e);
                default_download_dir(runtime)?
            }
        },
    };

    info!("Using download directory: {}", dir.display());
    Ok(dir)
}

/// `<downloads>/hub-peeker`, or `<home>/Downloads/hub-peeker` when the platform
/// reports no downloads folder.
#[tracing::instrument(skip(runtime))]
pub fn default_download_dir<R: Runtime>(runtime: &R) -> Result<PathBuf> {
    let base = match runtime.download_dir() {
        Some(dir) => dir,
        None => runtime
            .home_dir()
            .context("Could not find home directory")?
            .join("Downloads"),
    };
    Ok(base.join(APP_DIR_NAME))
}
