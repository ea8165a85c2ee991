pub mod profile;
pub mod settings;
pub mod store;

use directories::ProjectDirs;
use std::{io, path::PathBuf};

/// `~/.config/ics_rs` on Linux, `%APPDATA%\ics_rs\config` on Windows, etc.
pub(crate) fn config_dir() -> io::Result<PathBuf> {
    let proj = ProjectDirs::from("", "", "ics_rs")
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "Unable to locate config dir"))?;
    Ok(proj.config_dir().to_path_buf())
}

pub use profile::SharingProfile;
pub use settings::{Settings, SettingsStore};
pub use store::ProfileStore;
