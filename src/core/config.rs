use crate::core::models::DataPath;
use crate::core::progress::{DEFAULT_BOOKMARKS_KEY, DEFAULT_PROGRESS_KEY, StorageKeys};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Percent added by `advance` when no delta is given.
    #[serde(default = "default_increment")]
    pub default_increment: u8,
    #[serde(default = "default_progress_key")]
    pub progress_key: String,
    #[serde(default = "default_bookmarks_key")]
    pub bookmarks_key: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_increment: default_increment(),
            progress_key: default_progress_key(),
            bookmarks_key: default_bookmarks_key(),
        }
    }
}

fn default_increment() -> u8 {
    25
}
fn default_progress_key() -> String {
    DEFAULT_PROGRESS_KEY.to_string()
}
fn default_bookmarks_key() -> String {
    DEFAULT_BOOKMARKS_KEY.to_string()
}

pub const CONFIG_KEYS: [&str; 3] = ["default_increment", "progress_key", "bookmarks_key"];

impl Config {
    pub fn storage_keys(&self) -> StorageKeys {
        StorageKeys {
            progress: self.progress_key.clone(),
            bookmarks: self.bookmarks_key.clone(),
        }
    }

    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "default_increment" => Some(self.default_increment.to_string()),
            "progress_key" => Some(self.progress_key.clone()),
            "bookmarks_key" => Some(self.bookmarks_key.clone()),
            _ => None,
        }
    }

    pub fn set(&mut self, key: &str, value: &str) -> io::Result<()> {
        match key {
            "default_increment" => {
                let increment: u8 = value.trim().parse().map_err(|_| {
                    io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("default_increment must be a whole number, got '{value}'"),
                    )
                })?;
                validate_increment(increment)?;
                self.default_increment = increment;
            }
            "progress_key" => {
                validate_storage_key(value)?;
                validate_distinct_keys(value, &self.bookmarks_key)?;
                self.progress_key = value.to_string();
            }
            "bookmarks_key" => {
                validate_storage_key(value)?;
                validate_distinct_keys(&self.progress_key, value)?;
                self.bookmarks_key = value.to_string();
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unknown key: {key}"),
                ));
            }
        }
        Ok(())
    }

    /// Checks what `set` enforces, for configs edited by hand.
    pub fn validate(&self) -> io::Result<()> {
        validate_increment(self.default_increment)?;
        validate_storage_key(&self.progress_key)?;
        validate_storage_key(&self.bookmarks_key)?;
        validate_distinct_keys(&self.progress_key, &self.bookmarks_key)
    }
}

fn validate_increment(increment: u8) -> io::Result<()> {
    if !(1..=100).contains(&increment) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "default_increment must be between 1 and 100",
        ));
    }
    Ok(())
}

/// Both documents would land in the same file otherwise.
fn validate_distinct_keys(progress_key: &str, bookmarks_key: &str) -> io::Result<()> {
    if progress_key.eq_ignore_ascii_case(bookmarks_key) {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("progress_key and bookmarks_key must differ, both are '{progress_key}'"),
        ));
    }
    Ok(())
}

/// Storage keys double as file names.
fn validate_storage_key(key: &str) -> io::Result<()> {
    if key.trim().is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Storage key cannot be empty",
        ));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "Storage key may only contain letters, digits, '_' and '-'",
        ));
    }

    Ok(())
}

pub struct ConfigService;

impl ConfigService {
    /// Loads `config.toml`, writing the defaults out first if it is missing.
    pub fn load_config(data_path: &DataPath) -> io::Result<Config> {
        let config_path = data_path.config_path();
        if !config_path.exists() {
            let config = Config::default();
            Self::save_config(&config, data_path)?;
            return Ok(config);
        }

        let content = fs::read_to_string(&config_path)?;
        let config: Config = toml::from_str(&content).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid config format: {e}"),
            )
        })?;
        config.validate().map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Invalid config format: {e}"),
            )
        })?;
        Ok(config)
    }

    pub fn save_config(config: &Config, data_path: &DataPath) -> io::Result<()> {
        let config_path = data_path.config_path();
        let toml_content = toml::to_string_pretty(config).map_err(|e| {
            io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Failed to serialize config: {e}"),
            )
        })?;

        fs::create_dir_all(&data_path.root)?;
        fs::write(&config_path, toml_content)?;
        log::info!("Saved configuration to {}", config_path.display());
        Ok(())
    }
}
