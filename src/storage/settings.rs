use std::{fs, io, path::PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::core::status_query::{SortOrder, StatusFilter};

/// Per-user defaults for the CLI. Command-line flags override them per call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub sort: SortOrder,
    /// Fail `get-status` on names that match nothing instead of skipping them.
    pub strict_names: bool,
    /// What `get-status` reports when no names are given.
    pub status_filter: StatusFilter,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            sort: SortOrder::Name,
            strict_names: true,
            status_filter: StatusFilter::All,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SettingsStore {
    path: PathBuf,
}

impl SettingsStore {
    /// `settings.json` under the per-user config directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::with_dir(super::config_dir()?))
    }

    pub fn with_dir(dir: PathBuf) -> Self {
        Self {
            path: dir.join("settings.json"),
        }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    /// A missing file yields the defaults; a malformed one is an error.
    pub fn load(&self) -> io::Result<Settings> {
        match fs::File::open(&self.path) {
            Ok(f) => Ok(serde_json::from_reader(f).map_err(io::Error::from)?),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No settings at {:?}, using defaults", self.path);
                Ok(Settings::default())
            }
            Err(e) => Err(e),
        }
    }

    pub fn save(&self, settings: &Settings) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let file = fs::File::create(&self.path)?;
        serde_json::to_writer_pretty(file, settings).map_err(io::Error::from)
    }
}
