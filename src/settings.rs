//! Persisted user settings (`config.json` under the user's config directory).

use anyhow::{Context, Result};
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::runtime::Runtime;

pub const APP_DIR_NAME: &str = "hub-peeker";
const SETTINGS_FILE: &str = "config.json";

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq, Default)]
pub struct Settings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub download_path: Option<PathBuf>,
}

/// Key-value store for the default download directory.
pub trait SettingsStore {
    fn read(&self) -> Result<Option<PathBuf>>;
    fn write(&self, download_path: &Path) -> Result<()>;
}

/// Settings kept as JSON in a single file.
pub struct FileSettingsStore<'a, R: Runtime> {
    runtime: &'a R,
    path: PathBuf,
}

impl<'a, R: Runtime> FileSettingsStore<'a, R> {
    pub fn new(runtime: &'a R, path: PathBuf) -> Self {
        Self { runtime, path }
    }

    /// Store at `<config dir>/hub-peeker/config.json`, if the platform has a
    /// config directory.
    pub fn in_config_dir(runtime: &'a R) -> Option<Self> {
        let dir = runtime.config_dir()?;
        Some(Self::new(
            runtime,
            dir.join(APP_DIR_NAME).join(SETTINGS_FILE),
        ))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<Settings> {
        if !self.runtime.exists(&self.path) {
            return Ok(Settings::default());
        }
        let content = self
            .runtime
            .read_to_string(&self.path)
            .with_context(|| format!("Failed to read settings from {:?}", self.path))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings in {:?}", self.path))
    }
}

impl<R: Runtime> SettingsStore for FileSettingsStore<'_, R> {
    fn read(&self) -> Result<Option<PathBuf>> {
        let settings = self.load()?;
        Ok(settings
            .download_path
            .filter(|p| !p.as_os_str().is_empty()))
    }

    fn write(&self, download_path: &Path) -> Result<()> {
        let mut settings = match self.load() {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Replacing unreadable settings file: {:#}", e);
                Settings::default()
            }
        };
        settings.download_path = Some(download_path.to_path_buf());

        if let Some(parent) = self.path.parent() {
            self.runtime
                .create_dir_all(parent)
                .with_context(|| format!("Failed to create settings directory {:?}", parent))?;
        }

        let json = serde_json::to_string_pretty(&settings)?;
        self.runtime
            .write(&self.path, json.as_bytes())
            .with_context(|| format!("Failed to write settings to {:?}", self.path))?;

        debug!("Saved download path {:?} to {:?}", download_path, self.path);
        Ok(())
    }
}
