//! Settings persistence (API endpoint, admin code, theme).

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use crate::api::DEFAULT_API_BASE;

/// Admin access code used when settings carry none. Cosmetic gate only.
pub const DEFAULT_ADMIN_CODE: &str = "1234";

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Settings {
    pub api_base: String,
    pub admin_code: String,
    pub theme: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_API_BASE.to_string(),
            admin_code: DEFAULT_ADMIN_CODE.to_string(),
            theme: "light".to_string(),
        }
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("com", "biblio", "biblio-client")
}

pub fn settings_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        let dir = proj.config_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!(error = %e, "failed to create config dir");
            return None;
        }
        return Some(dir.join("settings.json"));
    }
    None
}

/// Marker file holding the admin session between launches.
pub fn session_path() -> Option<PathBuf> {
    if let Some(proj) = project_dirs() {
        let dir = proj.data_dir();
        if let Err(e) = fs::create_dir_all(dir) {
            tracing::warn!(error = %e, "failed to create data dir");
            return None;
        }
        return Some(dir.join("session.json"));
    }
    None
}

pub fn load_settings() -> Option<Settings> {
    let path = settings_path()?;
    let content = fs::read_to_string(path).ok()?;
    serde_json::from_str(&content).ok()
}

pub fn save_settings(settings: &Settings) -> std::io::Result<()> {
    if let Some(path) = settings_path() {
        let mut file = fs::File::create(path)?;
        let data = serde_json::to_string_pretty(settings).expect("settings always serialize");
        file.write_all(data.as_bytes())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.api_base, DEFAULT_API_BASE);
        assert_eq!(settings.admin_code, DEFAULT_ADMIN_CODE);
    }

    #[test]
    fn test_settings_roundtrip() {
        let settings = Settings {
            api_base: "http://library.example:9000".to_string(),
            admin_code: "0000".to_string(),
            theme: "dark".to_string(),
        };
        let json = serde_json::to_string(&settings).unwrap();
        let back: Settings = serde_json::from_str(&json).unwrap();
        assert_eq!(back.api_base, settings.api_base);
        assert_eq!(back.admin_code, settings.admin_code);
        assert_eq!(back.theme, settings.theme);
    }
}
