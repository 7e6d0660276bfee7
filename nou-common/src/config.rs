//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Optional TOML configuration file contents
///
/// All fields are optional; missing files or fields fall back to
/// environment variables and compiled defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TomlConfig {
    /// Root data folder (holds the SQLite database)
    pub root_folder: Option<String>,
    /// Address the HTTP server binds to (e.g. "127.0.0.1")
    pub bind_address: Option<String>,
    /// Port the HTTP server listens on
    pub port: Option<u16>,
}

impl TomlConfig {
    /// Load the TOML config file if one exists, defaults otherwise.
    ///
    /// A missing file is not an error; a present-but-invalid file is.
    pub fn load() -> Result<Self> {
        match config_file_path() {
            Some(path) if path.exists() => Self::from_file(&path),
            _ => Ok(Self::default()),
        }
    }

    /// Parse a specific TOML config file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
        toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))
    }
}

/// Root folder resolution priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. TOML config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(
    cli_arg: Option<&str>,
    env_var_name: &str,
    toml_config: &TomlConfig,
) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(env_var_name) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = toml_config.root_folder.as_deref() {
        return PathBuf::from(path);
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Default configuration file path for the platform
///
/// Linux also honors a system-wide /etc/nou/config.toml when no
/// user-level file exists.
pub fn config_file_path() -> Option<PathBuf> {
    let user_config = dirs::config_dir().map(|d| d.join("nou").join("config.toml"));

    if cfg!(target_os = "linux") {
        if let Some(path) = &user_config {
            if path.exists() {
                return user_config;
            }
        }
        let system_config = PathBuf::from("/etc/nou/config.toml");
        if system_config.exists() {
            return Some(system_config);
        }
    }

    user_config
}

/// OS-dependent default root folder path
pub fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("nou"))
        .unwrap_or_else(|| PathBuf::from("./nou_data"))
}

/// Create the root folder if missing and return the database path inside it
pub fn ensure_root_folder(root: &Path) -> Result<PathBuf> {
    std::fs::create_dir_all(root)
        .map_err(|e| Error::Config(format!("Create {} failed: {}", root.display(), e)))?;
    Ok(root.join("nou.db"))
}
