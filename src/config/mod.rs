use crate::core::calculator::layout::{PX_PER_SEC, ROW_HEIGHT};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_px_per_sec")]
    pub px_per_sec: f64,
    #[serde(default = "default_row_height")]
    pub row_height: f64,
    /// Default takt time in seconds; 0 = use the total timeline duration.
    #[serde(default)]
    pub takt_sec: f64,
    #[serde(default = "default_video_exts")]
    pub video_exts: Vec<String>,
}

fn default_px_per_sec() -> f64 {
    PX_PER_SEC
}
fn default_row_height() -> f64 {
    ROW_HEIGHT
}
fn default_video_exts() -> Vec<String> {
    vec!["mp4".to_string(), "m4v".to_string(), "mov".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        let db_path = Self::database_file();
        Self {
            database: db_path.to_string_lossy().to_string(),
            px_per_sec: default_px_per_sec(),
            row_height: default_row_height(),
            takt_sec: 0.0,
            video_exts: default_video_exts(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("lapchart")
        } else {
            let home = env::var("HOME").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(home).join(".lapchart")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("lapchart.conf")
    }

    /// Return the full path of the project database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("lapchart.sqlite")
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if !path.exists() {
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path).map_err(|_| AppError::ConfigLoad)?;
        let mut cfg: Config = serde_yaml::from_str(&content)
            .map_err(|e| AppError::Config(format!("{}: {}", path.display(), e)))?;

        // Scale and row height drive the whole chart geometry: refuse nonsense.
        if !cfg.px_per_sec.is_finite() || cfg.px_per_sec <= 0.0 {
            cfg.px_per_sec = default_px_per_sec();
        }
        if !cfg.row_height.is_finite() || cfg.row_height <= 0.0 {
            cfg.row_height = default_row_height();
        }
        if !cfg.takt_sec.is_finite() || cfg.takt_sec < 0.0 {
            cfg.takt_sec = 0.0;
        }

        Ok(cfg)
    }

    pub fn to_yaml(&self) -> AppResult<String> {
        serde_yaml::to_string(self).map_err(|e| AppError::Config(e.to_string()))
    }

    /// Initialize configuration file and database location
    pub fn init_all(custom_db: Option<String>, is_test: bool) -> AppResult<Self> {
        let dir = Self::config_dir();

        // DB path: user provided or default
        let db_path = match custom_db {
            Some(name) => {
                let p = PathBuf::from(&name);
                if p.is_absolute() { p } else { dir.join(p) }
            }
            None => Self::database_file(),
        };

        let config = Config {
            database: db_path.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            fs::create_dir_all(&dir)?;
            let yaml = config.to_yaml()?;
            let mut file = fs::File::create(Self::config_file()).map_err(|_| AppError::ConfigSave)?;
            file.write_all(yaml.as_bytes())
                .map_err(|_| AppError::ConfigSave)?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        Ok(config)
    }
}
