//! Persisted UI scale preference. This is the only thing the game writes
//! to disk; run state itself never leaves memory.

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::APP_NAME;

const PREFS_FILE_NAME: &str = "ui_scale.json";
const PREFS_FORMAT_VERSION: u32 = 1;

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ScalePreference {
    pub format_version: u32,
    pub scale: f32,
}

impl ScalePreference {
    pub fn with_scale(scale: f32) -> Self {
        Self { format_version: PREFS_FORMAT_VERSION, scale }
    }
}

/// Platform preference location; `None` when no home directory exists, in
/// which case the preference simply is not persisted.
pub fn preference_path() -> Option<PathBuf> {
    let dirs = ProjectDirs::from("", "", APP_NAME)?;
    Some(dirs.data_dir().join(PREFS_FILE_NAME))
}

/// Stage the JSON next to the target and rename it into place, so a crash
/// mid-write never leaves a torn preference behind.
pub fn save_preference(pref: ScalePreference, path: &Path) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let staged = path.with_extension("json.tmp");
    let json = serde_json::to_vec_pretty(&pref).map_err(io::Error::other)?;
    fs::write(&staged, json)?;
    fs::rename(&staged, path)
}

pub fn load_preference(path: &Path) -> io::Result<ScalePreference> {
    let raw = fs::read_to_string(path)?;
    serde_json::from_str(&raw).map_err(|err| io::Error::new(io::ErrorKind::InvalidData, err))
}
