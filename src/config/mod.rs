use crate::errors::{AppError, AppResult};
use crate::logger::LogSettings;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Config {
    #[serde(default = "default_database")]
    pub database: String,
    #[serde(default = "default_log_file")]
    pub log_file: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default = "default_console_log_level")]
    pub console_log_level: String,
    #[serde(default = "default_log_max_bytes")]
    pub log_max_bytes: u64,
    #[serde(default = "default_log_backups")]
    pub log_backups: usize,
    #[serde(default = "default_color")]
    pub color: bool,
}

fn default_database() -> String {
    Config::database_file().to_string_lossy().to_string()
}
fn default_log_file() -> String {
    Config::config_dir()
        .join("kpr.log")
        .to_string_lossy()
        .to_string()
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_console_log_level() -> String {
    "warn".to_string()
}
fn default_log_max_bytes() -> u64 {
    1024 * 1024
}
fn default_log_backups() -> usize {
    3
}
fn default_color() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database: default_database(),
            log_file: default_log_file(),
            log_level: default_log_level(),
            console_log_level: default_console_log_level(),
            log_max_bytes: default_log_max_bytes(),
            log_backups: default_log_backups(),
            color: default_color(),
        }
    }
}

impl Config {
    /// Return the configuration directory (`~/.kpr`, or `%APPDATA%\kpr` on Windows).
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("kpr")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".kpr")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("kpr.conf")
    }

    /// Return the default path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("kpr.db")
    }

    /// Load configuration from the default file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        Self::load_from(&Self::config_file())
    }

    pub fn load_from(path: &Path) -> AppResult<Self> {
        if !path.exists() {
            return Ok(Config::default());
        }
        let content = fs::read_to_string(path).map_err(AppError::file_op("read config", path))?;
        if content.trim().is_empty() {
            return Ok(Config::default());
        }
        Ok(serde_yaml::from_str(&content)?)
    }

    pub fn save_to(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(AppError::file_op("create config dir", parent))?;
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path).map_err(AppError::file_op("write config", path))?;
        file.write_all(yaml.as_bytes())
            .map_err(AppError::file_op("write config", path))?;
        Ok(())
    }

    pub fn database_path(&self) -> PathBuf {
        expand_tilde(&self.database)
    }

    pub fn log_settings(&self) -> LogSettings {
        LogSettings {
            file: expand_tilde(&self.log_file),
            level: self.log_level.clone(),
            console_level: self.console_log_level.clone(),
            max_bytes: self.log_max_bytes,
            backups: self.log_backups,
        }
    }

    /// A `--db` value: `~` is expanded and relative paths land in the config directory.
    pub fn resolve_db_path(name: &str) -> PathBuf {
        let p = expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Initialize the configuration file.
    ///
    /// A relative `custom_db` is placed inside the config directory.
    /// In test mode nothing is written and the resolved config is only returned.
    pub fn init_all(custom_db: Option<&str>, is_test: bool) -> AppResult<Self> {
        let db_path = match custom_db {
            Some(name) => Self::resolve_db_path(name),
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        if !is_test {
            config.save_to(&Self::config_file())?;
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = Config::load_from(&dir.path().join("absent.conf")).unwrap();
        assert_eq!(cfg, Config::default());
    }

    #[test]
    fn partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpr.conf");
        fs::write(&path, "database: /tmp/other.db\nlog_level: debug\n").unwrap();

        let cfg = Config::load_from(&path).unwrap();
        assert_eq!(cfg.database, "/tmp/other.db");
        assert_eq!(cfg.log_level, "debug");
        assert_eq!(cfg.log_backups, 3);
        assert_eq!(cfg.log_max_bytes, 1024 * 1024);
        assert!(cfg.color);
    }

    #[test]
    fn save_then_load_keeps_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("kpr.conf");
        let cfg = Config {
            database: "/data/kpr.db".into(),
            color: false,
            ..Config::default()
        };
        cfg.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), cfg);
    }

    #[test]
    fn malformed_yaml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("kpr.conf");
        fs::write(&path, "database: [unclosed\n").unwrap();
        assert!(matches!(Config::load_from(&path), Err(AppError::Yaml(_))));
    }
}
