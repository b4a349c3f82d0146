use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for settings operations
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(String),

    #[error("JSON parse error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("YAML parse error: {0}")]
    YamlParse(String),

    #[error("Unknown file format: {0}")]
    UnknownFormat(String),

    #[error("Setting not found: {0}")]
    SettingNotFound(String),
}

/// Result type for settings operations
pub type Result<T> = std::result::Result<T, SettingsError>;

/// Settings format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsFormat {
    /// TOML format
    Toml,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
}

impl SettingsFormat {
    /// Detect the format from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension().and_then(|ext| {
            let ext = ext.to_string_lossy().to_lowercase();
            match ext.as_str() {
                "toml" => Some(Self::Toml),
                "json" => Some(Self::Json),
                "yaml" | "yml" => Some(Self::Yaml),
                _ => None,
            }
        })
    }
}

/// Key/value settings for the frontier and its CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    /// Raw settings as key-value pairs
    #[serde(flatten)]
    pub raw: HashMap<String, serde_json::Value>,

    /// Path to the settings file, if loaded from a file
    #[serde(skip)]
    pub file_path: Option<PathBuf>,
}

impl Settings {
    /// Create a new empty settings object
    pub fn new() -> Self {
        Self::default()
    }

    /// Load settings from a file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)
            .ok_or_else(|| SettingsError::UnknownFormat(path.to_string_lossy().to_string()))?;

        let contents = fs::read_to_string(path)?;
        let mut settings = match format {
            SettingsFormat::Toml => Self::from_toml(&contents)?,
            SettingsFormat::Json => Self::from_json(&contents)?,
            SettingsFormat::Yaml => Self::from_yaml(&contents)?,
        };

        settings.file_path = Some(path.to_path_buf());
        Ok(settings)
    }

    /// Load settings from TOML
    pub fn from_toml(contents: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> =
            toml::from_str(contents).map_err(|e| SettingsError::TomlParse(e.to_string()))?;
        Ok(Self {
            raw,
            file_path: None,
        })
    }

    /// Load settings from JSON
    pub fn from_json(contents: &str) -> Result<Self> {
        let raw: HashMap<String, serde_json::Value> = serde_json::from_str(contents)?;
        Ok(Self {
            raw,
            file_path: None,
        })
    }

    /// Load settings from YAML
    pub fn from_yaml(_contents: &str) -> Result<Self> {
        #[cfg(feature = "yaml")]
        {
            let raw: HashMap<String, serde_json::Value> = serde_yaml::from_str(_contents)
                .map_err(|e| SettingsError::YamlParse(e.to_string()))?;
            Ok(Self {
                raw,
                file_path: None,
            })
        }

        #[cfg(not(feature = "yaml"))]
        {
            Err(SettingsError::YamlParse(
                "YAML support not enabled".to_string(),
            ))
        }
    }

    /// Get a setting as a specific type
    pub fn get<T: for<'de> Deserialize<'de>>(&self, key: &str) -> Result<T> {
        self.raw
            .get(key)
            .ok_or_else(|| SettingsError::SettingNotFound(key.to_string()))
            .and_then(|value| {
                serde_json::from_value(value.clone()).map_err(SettingsError::JsonParse)
            })
    }

    /// Get a setting with a default value
    pub fn get_or<T: for<'de> Deserialize<'de>>(&self, key: &str, default: T) -> T {
        self.get(key).unwrap_or(default)
    }

    /// Set a setting
    pub fn set<T: Serialize>(&mut self, key: &str, value: T) -> Result<()> {
        let value = serde_json::to_value(value).map_err(SettingsError::JsonParse)?;
        self.raw.insert(key.to_string(), value);
        Ok(())
    }

    /// Get all settings
    pub fn all(&self) -> &HashMap<String, serde_json::Value> {
        &self.raw
    }

    /// Save settings to a file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let format = SettingsFormat::from_path(path)
            .ok_or_else(|| SettingsError::UnknownFormat(path.to_string_lossy().to_string()))?;

        let contents = match format {
            SettingsFormat::Toml => {
                toml::to_string(&self.raw).map_err(|e| SettingsError::TomlParse(e.to_string()))?
            }
            SettingsFormat::Json => {
                serde_json::to_string_pretty(&self.raw).map_err(SettingsError::JsonParse)?
            }
            SettingsFormat::Yaml => {
                #[cfg(feature = "yaml")]
                {
                    serde_yaml::to_string(&self.raw)
                        .map_err(|e| SettingsError::YamlParse(e.to_string()))?
                }

                #[cfg(not(feature = "yaml"))]
                {
                    return Err(SettingsError::YamlParse(
                        "YAML support not enabled".to_string(),
                    ));
                }
            }
        };

        fs::write(path, contents)?;
        Ok(())
    }
}
