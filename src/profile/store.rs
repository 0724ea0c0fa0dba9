//! Directory-backed JSON profile store.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use rand::RngCore;
use tracing::debug;

use crate::profile::{Profile, profile_key};

/// Errors raised while reading or writing profiles.
#[derive(Debug)]
pub enum ProfileError {
    /// Filesystem failure.
    Io {
        /// File or directory involved.
        path: PathBuf,
        /// Underlying error.
        source: io::Error,
    },
    /// A profile document could not be parsed or written as JSON.
    Malformed {
        /// Offending file.
        path: PathBuf,
        /// Parser error.
        source: serde_json::Error,
    },
    /// The player name cannot be used as a file name.
    InvalidName {
        /// Name as given.
        name: String,
    },
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io { path, source } => {
                write!(f, "profile I/O error at {}: {source}", path.display())
            }
            ProfileError::Malformed { path, source } => {
                write!(f, "malformed profile {}: {source}", path.display())
            }
            ProfileError::InvalidName { name } => {
                write!(f, "invalid profile name {name:?}")
            }
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Io { source, .. } => Some(source),
            ProfileError::Malformed { source, .. } => Some(source),
            ProfileError::InvalidName { .. } => None,
        }
    }
}

/// One JSON file per profile, named after the upper-cased player name.
#[derive(Debug, Clone)]
pub struct ProfileStore {
    dir: PathBuf,
}

impl ProfileStore {
    /// Open a store rooted at `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::Io`] if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ProfileError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| ProfileError::Io {
            path: dir.clone(),
            source,
        })?;
        Ok(Self { dir })
    }

    /// Directory backing this store.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File a profile with this name lives in.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::InvalidName`] for names that are blank or
    /// could leave the store directory.
    pub fn path_for(&self, name: &str) -> Result<PathBuf, ProfileError> {
        let key = profile_key(name);
        let unsafe_name = key.is_empty()
            || key.contains("..")
            || key.chars().any(|c| matches!(c, '/' | '\\' | '\0'));
        if unsafe_name {
            return Err(ProfileError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.dir.join(format!("{key}.json")))
    }

    /// Load the profile saved under `name`, if there is one.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(&self, name: &str) -> Result<Option<Profile>, ProfileError> {
        let path = self.path_for(name)?;
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(ProfileError::Io { path, source }),
        };
        let profile =
            serde_json::from_str(&text).map_err(|source| ProfileError::Malformed { path, source })?;
        Ok(Some(profile))
    }

    /// Write a profile, replacing any previous version.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation or the write fails.
    pub fn save(&self, profile: &Profile) -> Result<(), ProfileError> {
        let path = self.path_for(&profile.name)?;
        let json = serde_json::to_string_pretty(profile).map_err(|source| {
            ProfileError::Malformed {
                path: path.clone(),
                source,
            }
        })?;
        fs::write(&path, json).map_err(|source| ProfileError::Io {
            path: path.clone(),
            source,
        })?;
        debug!(path = %path.display(), level = profile.level, "profile saved");
        Ok(())
    }

    /// Load the named profile or create a fresh one (not yet saved).
    ///
    /// # Errors
    ///
    /// Propagates errors from [`ProfileStore::load`].
    pub fn load_or_create<R: RngCore>(
        &self,
        name: &str,
        rng: &mut R,
    ) -> Result<Profile, ProfileError> {
        match self.load(name)? {
            Some(profile) => Ok(profile),
            None => {
                debug!(name, "creating new profile");
                Ok(Profile::new(name, rng))
            }
        }
    }
}
