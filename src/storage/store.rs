use std::{fs, io, path::PathBuf};

use log::warn;
use serde_json::Error as SerdeError;

use super::profile::SharingProfile;

#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Profiles live in `profiles/` under the per-user config directory.
    pub fn new() -> io::Result<Self> {
        Self::with_dir(super::config_dir()?.join("profiles"))
    }

    pub fn with_dir(dir: PathBuf) -> io::Result<Self> {
        fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    fn file_for(&self, name: &str) -> io::Result<PathBuf> {
        let valid = !name.trim().is_empty()
            && name
                .chars()
                .all(|c| c.is_alphanumeric() || matches!(c, '-' | '_' | ' ' | '.'))
            && !name.starts_with('.');
        if !valid {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("'{name}' is not a valid profile name"),
            ));
        }
        Ok(self.dir.join(format!("{name}.json")))
    }

    /// Returns every stored profile sorted by name (skips malformed files).
    pub fn list(&self) -> io::Result<Vec<SharingProfile>> {
        let mut out: Vec<SharingProfile> = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if !path.extension().is_some_and(|e| e == "json") {
                continue;
            }
            match fs::File::open(&path)
                .and_then(|f| serde_json::from_reader(f).map_err(SerdeError::into))
            {
                Ok(profile) => out.push(profile),
                Err(e) => warn!("Could not read {:?}: {e}", path),
            }
        }
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    /// `Ok(None)` if no profile has that name.
    pub fn get(&self, name: &str) -> io::Result<Option<SharingProfile>> {
        match fs::File::open(self.file_for(name)?) {
            Ok(f) => Ok(Some(serde_json::from_reader(f).map_err(io::Error::from)?)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Create or overwrite a profile.
    pub fn save(&self, profile: &SharingProfile) -> io::Result<()> {
        let file = fs::File::create(self.file_for(&profile.name)?)?;
        serde_json::to_writer_pretty(file, profile).map_err(SerdeError::into)
    }

    /// Delete a profile (`Ok(true)` if removed, `Ok(false)` if it didn't exist).
    pub fn delete(&self, name: &str) -> io::Result<bool> {
        match fs::remove_file(self.file_for(name)?) {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e),
        }
    }
}
