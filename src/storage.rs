use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
    error::AppError,
    profile::{Profile, ProfileFilter},
};

/// Profiles file name, stored next to the executable
const PROFILES_FILE: &str = "profiles.json";

/// On-disk layout of the profiles file
#[derive(Deserialize, Debug)]
struct ProfilesFile {
    #[serde(default)]
    profiles: Vec<Profile>,
}

/// Gets the default path to the profiles file
///
/// The file lives next to the running executable. When that location is
/// unknown the home directory is used instead.
pub fn default_store_path() -> Result<PathBuf, AppError> {
    if let Some(dir) = env::current_exe().ok().and_then(|exe| exe.parent().map(Path::to_path_buf)) {
        return Ok(dir.join(PROFILES_FILE));
    }
    let home_dir: PathBuf = dirs::home_dir().ok_or_else(|| {
        AppError::Validation("failed to find the home directory".to_string())
    })?;
    Ok(home_dir.join(PROFILES_FILE))
}

/// Ordered collection of profiles mirrored to a JSON file
///
/// Every mutation rewrites the whole file. A failed write leaves the in-memory
/// collection already changed.
#[derive(Debug)]
pub struct ProfileStore {
    path: PathBuf,
    profiles: Vec<Profile>,
}

impl ProfileStore {
    /// Loads the store at `path`, creating an empty file if none exists
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, AppError> {
        let path: PathBuf = path.into();

        if !path.exists() {
            debug!(path = %path.display(), "creating empty profiles file");
            fs::write(&path, "")?;
            return Ok(Self { path, profiles: Vec::new() });
        }

        let file_contents: String = fs::read_to_string(&path)?;
        let profiles: Vec<Profile> = if file_contents.trim().is_empty() {
            Vec::new()
        } else {
            serde_json::from_str::<ProfilesFile>(&file_contents)?.profiles
        };

        debug!(path = %path.display(), count = profiles.len(), "loaded profiles");
        Ok(Self { path, profiles })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Writes the full collection to disk
    fn save(&self) -> Result<(), AppError> {
        #[derive(Serialize)]
        struct ProfilesFileRef<'a> {
            profiles: &'a [Profile],
        }

        let json: String = serde_json::to_string_pretty(&ProfilesFileRef { profiles: &self.profiles })?;
        fs::write(&self.path, json)?;
        debug!(path = %self.path.display(), count = self.profiles.len(), "saved profiles");
        Ok(())
    }

    fn position(&self, profile_name: &str) -> Option<usize> {
        self.profiles.iter().position(|p| p.profile_name == profile_name)
    }

    /// Appends a profile, rejecting a name already in use
    pub fn add(&mut self, profile: Profile) -> Result<(), AppError> {
        if self.position(&profile.profile_name).is_some() {
            return Err(AppError::DuplicateProfile(profile.profile_name));
        }
        self.profiles.push(profile);
        self.save()
    }

    /// Replaces the profile called `profile_name` wholesale, renames included
    ///
    /// # Arguments
    /// * `profile_name` - Current name of the profile to replace
    /// * `updated` - New record, its `profile_name` may differ
    pub fn edit(&mut self, profile_name: &str, updated: Profile) -> Result<(), AppError> {
        let index: usize = self
            .position(profile_name)
            .ok_or_else(|| AppError::ProfileNotFound(profile_name.to_string()))?;
        if updated.profile_name != profile_name && self.position(&updated.profile_name).is_some() {
            return Err(AppError::DuplicateProfile(updated.profile_name));
        }
        self.profiles[index] = updated;
        self.save()
    }

    /// Removes the profile called `profile_name`
    pub fn delete(&mut self, profile_name: &str) -> Result<Profile, AppError> {
        let index: usize = self
            .position(profile_name)
            .ok_or_else(|| AppError::ProfileNotFound(profile_name.to_string()))?;
        let removed: Profile = self.profiles.remove(index);
        self.save()?;
        Ok(removed)
    }

    /// Drops every profile
    pub fn clear(&mut self) -> Result<(), AppError> {
        self.profiles.clear();
        self.save()
    }

    pub fn get_by_name(&self, profile_name: &str) -> Option<&Profile> {
        self.profiles.iter().find(|p| p.profile_name == profile_name)
    }

    /// All profiles in insertion order
    pub fn all(&self) -> &[Profile] {
        &self.profiles
    }

    /// Profiles whose origin equals `origin` exactly. Callers normalize first.
    pub fn by_origin(&self, origin: &str) -> Vec<&Profile> {
        self.profiles.iter().filter(|p| p.origin == origin).collect()
    }

    pub fn filter(&self, filter: &ProfileFilter) -> Vec<&Profile> {
        self.profiles.iter().filter(|p| filter.matches(p)).collect()
    }
}
