use crate::errors::{AppError, AppResult};
use crate::mirror::sheets::DEFAULT_API_BASE;
use crate::utils::path::expand_tilde;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub const OPEN_ROLLS_FILE: &str = "bobinas_en_curso.csv";
pub const CLOSED_ROLLS_FILE: &str = "bobinas_terminadas.csv";
pub const EVENTS_FILE: &str = "eventos.csv";
pub const JOURNAL_FILE: &str = "rollbook.log";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Directory holding the ledger tables and the operation journal.
    pub data_dir: String,

    /// Keep a local bobinas_terminadas.csv history when closing rolls.
    /// When off, closed rolls exist only on the remote mirror.
    #[serde(default = "default_keep_closed")]
    pub keep_closed_rolls: bool,

    #[serde(default = "default_mirror_enabled")]
    pub mirror_enabled: bool,

    /// Base URL of the spreadsheet gateway.
    #[serde(default = "default_api_base")]
    pub mirror_api_base: String,
}

fn default_keep_closed() -> bool {
    true
}
fn default_mirror_enabled() -> bool {
    true
}
fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir().to_string_lossy().to_string(),
            keep_closed_rolls: default_keep_closed(),
            mirror_enabled: default_mirror_enabled(),
            mirror_api_base: default_api_base(),
        }
    }
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rollbook")
        } else {
            let home = dirs::home_dir().unwrap_or_else(|| PathBuf::from("."));
            home.join(".rollbook")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rollbook.conf")
    }

    pub fn default_data_dir() -> PathBuf {
        Self::config_dir().join("data")
    }

    /// Load configuration from file, or return defaults if not found.
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            serde_yaml::from_str(&content).map_err(|e| {
                AppError::Config(format!("failed to parse {}: {e}", path.display()))
            })
        } else {
            Ok(Config::default())
        }
    }

    pub fn save(&self) -> AppResult<()> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| AppError::Config(format!("failed to serialize configuration: {e}")))?;

        let mut file = fs::File::create(Self::config_file())?;
        file.write_all(yaml.as_bytes())?;

        Ok(())
    }

    /// Resolved data directory (tilde expanded).
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.data_dir)
    }

    pub fn open_rolls_path(&self) -> PathBuf {
        self.data_dir().join(OPEN_ROLLS_FILE)
    }

    pub fn closed_rolls_path(&self) -> PathBuf {
        self.data_dir().join(CLOSED_ROLLS_FILE)
    }

    pub fn events_path(&self) -> PathBuf {
        self.data_dir().join(EVENTS_FILE)
    }

    pub fn journal_path(&self) -> PathBuf {
        self.data_dir().join(JOURNAL_FILE)
    }

    /// Names of the files a backup covers, in a fixed order.
    pub fn ledger_files(&self) -> Vec<PathBuf> {
        vec![
            self.open_rolls_path(),
            self.closed_rolls_path(),
            self.events_path(),
            self.journal_path(),
        ]
    }

    /// Fields a well-formed configuration must carry; used by
    /// `config --check`.
    pub fn check(&self) -> Vec<String> {
        let mut problems = Vec::new();

        if self.data_dir.trim().is_empty() {
            problems.push("data_dir is empty".to_string());
        }
        if self.mirror_enabled && self.mirror_api_base.trim().is_empty() {
            problems.push("mirror_api_base is empty while mirror_enabled is on".to_string());
        }

        problems
    }

    /// Initialize configuration and data files.
    pub fn init_all(custom_data_dir: Option<String>, is_test: bool) -> AppResult<Config> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // Data dir: user provided or default
        let data_dir = match custom_data_dir {
            Some(given) => {
                let p = expand_tilde(&given);
                if p.is_absolute() {
                    p
                } else {
                    dir.join(p)
                }
            }
            None => Self::default_data_dir(),
        };

        let config = Config {
            data_dir: data_dir.to_string_lossy().to_string(),
            ..Config::default()
        };

        // Write config file
        if !is_test {
            config.save()?;
            println!("✅ Config file: {:?}", Self::config_file());
        }

        fs::create_dir_all(&data_dir)?;
        println!("✅ Data directory: {:?}", data_dir);

        Ok(config)
    }
}
