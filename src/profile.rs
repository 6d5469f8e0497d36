//! Type name profiles
//!
//! A profile is the pair of name sets for one documented library. Profiles
//! are YAML files; two are compiled into the binary and users can add or
//! override profiles in their config directory.
//!
//! Profile loading priority:
//! 1. User config: `~/.config/typemark/profiles/{id}.yaml`
//! 2. Embedded: built-in profiles compiled into binary

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::classify::TypeNames;

// Embed profile YAML files at compile time
pub const LIBPMEMOBJ_YAML: &str = include_str!("../profiles/libpmemobj.yaml");
pub const LIBPMEMOBJ_CPP_YAML: &str = include_str!("../profiles/libpmemobj-cpp.yaml");

/// A built-in profile entry
pub struct BuiltinProfile {
    /// Stable identifier used on the command line and in config
    pub id: &'static str,
    /// Embedded YAML content
    pub yaml: &'static str,
}

/// Registry of all built-in profiles
pub const BUILTIN_PROFILES: &[BuiltinProfile] = &[
    BuiltinProfile {
        id: "libpmemobj",
        yaml: LIBPMEMOBJ_YAML,
    },
    BuiltinProfile {
        id: "libpmemobj-cpp",
        yaml: LIBPMEMOBJ_CPP_YAML,
    },
];

/// Where the profile came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProfileSource {
    /// User-defined profile in ~/.config/typemark/profiles/
    User,
    /// Built-in profile embedded in binary
    Builtin,
}

/// Information about an available profile
#[derive(Debug, Clone)]
pub struct ProfileInfo {
    pub id: String,
    /// Display name from YAML
    pub name: String,
    pub source: ProfileSource,
}

/// Raw profile as written in YAML
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProfileData {
    name: String,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    known_types: Vec<String>,
    #[serde(default)]
    ambiguous_types: Vec<String>,
}

/// A loaded profile
#[derive(Debug, Clone)]
pub struct Profile {
    pub name: String,
    pub description: Option<String>,
    pub names: TypeNames,
}

/// Errors that can occur when loading a profile
#[derive(Debug)]
pub enum ProfileError {
    Io { path: PathBuf, message: String },
    Parse(String),
    UnknownProfile(String),
}

impl std::fmt::Display for ProfileError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ProfileError::Io { path, message } => {
                write!(f, "Failed to read profile {}: {}", path.display(), message)
            }
            ProfileError::Parse(e) => write!(f, "Profile parse error: {}", e),
            ProfileError::UnknownProfile(id) => write!(f, "Unknown profile id: {}", id),
        }
    }
}

impl std::error::Error for ProfileError {}

impl Profile {
    /// Load profile from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self, ProfileError> {
        let data: ProfileData =
            serde_yaml::from_str(yaml).map_err(|e| ProfileError::Parse(e.to_string()))?;
        Ok(Self::from_data(data))
    }

    /// Load a built-in profile by id
    pub fn from_builtin(id: &str) -> Result<Self, ProfileError> {
        let entry = BUILTIN_PROFILES
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| ProfileError::UnknownProfile(id.to_string()))?;
        Profile::from_yaml(entry.yaml)
    }

    /// Load a profile from a YAML file
    pub fn from_file(path: &Path) -> Result<Self, ProfileError> {
        let content = std::fs::read_to_string(path).map_err(|e| ProfileError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        Profile::from_yaml(&content)
    }

    fn from_data(data: ProfileData) -> Self {
        Self {
            name: data.name,
            description: data.description,
            names: TypeNames::new(data.known_types, data.ambiguous_types),
        }
    }
}

/// Load profile by id with priority: user → builtin
pub fn load_profile(id: &str) -> Result<Profile, ProfileError> {
    load_profile_from(crate::config_paths::profiles_dir().as_deref(), id)
}

/// Same as [`load_profile`] with an explicit user profile directory
pub fn load_profile_from(user_dir: Option<&Path>, id: &str) -> Result<Profile, ProfileError> {
    if let Some(user_dir) = user_dir {
        let user_path = user_dir.join(format!("{}.yaml", id));
        if user_path.exists() {
            tracing::info!("Loading user profile from {}", user_path.display());
            return Profile::from_file(&user_path);
        }
    }

    tracing::debug!("Loading builtin profile: {}", id);
    Profile::from_builtin(id)
}

/// List all available profiles from all sources
///
/// User profiles override builtins with the same id.
pub fn list_available_profiles() -> Vec<ProfileInfo> {
    list_available_profiles_from(crate::config_paths::profiles_dir().as_deref())
}

/// Same as [`list_available_profiles`] with an explicit user profile directory
pub fn list_available_profiles_from(user_dir: Option<&Path>) -> Vec<ProfileInfo> {
    let mut profiles = Vec::new();
    let mut seen_ids = HashSet::new();

    if let Some(user_dir) = user_dir {
        if let Ok(entries) = std::fs::read_dir(user_dir) {
            let mut paths: Vec<PathBuf> = entries
                .filter_map(|e| e.ok())
                .map(|e| e.path())
                .filter(|p| p.extension().is_some_and(|ext| ext == "yaml"))
                .collect();
            paths.sort();

            for path in paths {
                let Some(id) = path.file_stem().and_then(|s| s.to_str()) else {
                    continue;
                };
                if !seen_ids.insert(id.to_string()) {
                    continue;
                }
                let name = match Profile::from_file(&path) {
                    Ok(profile) => profile.name,
                    Err(e) => {
                        tracing::warn!("Skipping invalid profile {}: {}", path.display(), e);
                        continue;
                    }
                };
                profiles.push(ProfileInfo {
                    id: id.to_string(),
                    name,
                    source: ProfileSource::User,
                });
            }
        }
    }

    for builtin in BUILTIN_PROFILES {
        if seen_ids.insert(builtin.id.to_string()) {
            let name = Profile::from_yaml(builtin.yaml)
                .map(|p| p.name)
                .unwrap_or_else(|_| builtin.id.to_string());
            profiles.push(ProfileInfo {
                id: builtin.id.to_string(),
                name,
                source: ProfileSource::Builtin,
            });
        }
    }

    profiles
}

/// Load several profiles and union their name sets
pub fn load_merged(ids: &[String], user_dir: Option<&Path>) -> Result<TypeNames, ProfileError> {
    let mut names = TypeNames::default();
    for id in ids {
        let profile = load_profile_from(user_dir, id)?;
        tracing::debug!(
            "Profile {} contributes {} names",
            profile.name,
            profile.names.len()
        );
        names.merge(&profile.names);
    }
    Ok(names)
}
