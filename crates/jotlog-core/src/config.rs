use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Store identifier used when the caller does not supply one.
pub const DEFAULT_IDENTIFIER: &str = "hclogs";

/// Optional library configuration, loaded from a per-user TOML file.
///
/// Everything here has a working default; a missing or unreadable config file
/// is never an error.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LogConfig {
    /// Location of the preferences file used by the preferences-backed store.
    #[serde(default)]
    pub preferences_path: Option<PathBuf>,
    /// Default identifier for stores created without an explicit one.
    #[serde(default)]
    pub identifier: Option<String>,
}

impl LogConfig {
    pub fn config_path() -> Option<PathBuf> {
        #[cfg(target_os = "macos")]
        {
            dirs::home_dir().map(|home| home.join(".config/jotlog/config.toml"))
        }
        #[cfg(target_os = "linux")]
        {
            dirs::config_dir().map(|config| config.join("jotlog/config.toml"))
        }
        #[cfg(target_os = "windows")]
        {
            dirs::config_dir().map(|config| config.join("jotlog\\config.toml"))
        }
        #[cfg(not(any(target_os = "macos", target_os = "linux", target_os = "windows")))]
        {
            None
        }
    }

    pub fn load() -> Self {
        if let Some(config_path) = Self::config_path() {
            if config_path.exists() {
                if let Ok(content) = std::fs::read_to_string(&config_path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    pub fn effective_identifier(&self) -> &str {
        self.identifier.as_deref().unwrap_or(DEFAULT_IDENTIFIER)
    }

    pub fn effective_preferences_path(&self) -> PathBuf {
        self.preferences_path
            .clone()
            .unwrap_or_else(default_preferences_path)
    }
}

/// Default on-disk location of the preferences file.
pub fn default_preferences_path() -> PathBuf {
    dirs::data_dir()
        .map(|data| data.join("jotlog").join("preferences.json"))
        .unwrap_or_else(|| PathBuf::from("jotlog-preferences.json"))
}
