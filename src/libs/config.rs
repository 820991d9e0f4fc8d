//! Configuration for the todomvc service.
//!
//! Settings come from four layers, highest priority first:
//!
//! 1. command-line flags of `todomvc serve`
//! 2. environment variables (`TODOMVC_PORT`, `TODOMVC_STORE_FILE`), including
//!    values loaded from a `.env` file
//! 3. `config.json` in the application data directory
//! 4. built-in defaults (port `8080`, `todo.json` in the data directory)
//!
//! [`Options::resolve`] folds the layers into the [`Options`] value the
//! service is started with.
//!
//! ## File Location
//!
//! - **Windows**: `%LOCALAPPDATA%\todomvc\config.json`
//! - **macOS**: `~/Library/Application Support/todomvc/config.json`
//! - **Linux**: `~/.local/share/todomvc/config.json`
//!
//! ```rust,no_run
//! use todomvc::libs::config::{Config, Options, Overrides};
//!
//! let config = Config::read()?;
//! let options = Options::resolve(Overrides::default(), Overrides::from_env(), &config);
//! println!("serving {} on port {}", options.store_file_path.display(), options.port);
//! # Ok::<(), anyhow::Error>(())
//! ```

use super::data_storage::DataStorage;
use crate::libs::messages::Message;
use crate::{msg_print, msg_warning};
use anyhow::Result;
use dialoguer::{theme::ColorfulTheme, Input};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs::{self, File};
use std::path::PathBuf;

pub const CONFIG_FILE_NAME: &str = "config.json";
pub const DEFAULT_STORE_FILE_NAME: &str = "todo.json";
pub const DEFAULT_PORT: u16 = 8080;

pub const ENV_PORT: &str = "TODOMVC_PORT";
pub const ENV_STORE_FILE: &str = "TODOMVC_STORE_FILE";

/// Listening port and store location persisted in `config.json`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ServerConfig {
    pub port: u16,
    pub store_file: PathBuf,
}

impl Default for ServerConfig {
    fn default() -> Self {
        ServerConfig {
            port: DEFAULT_PORT,
            store_file: DataStorage::new().file_path(DEFAULT_STORE_FILE_NAME),
        }
    }
}

/// Root of `config.json`. Unconfigured sections are omitted from the file.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct Config {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub server: Option<ServerConfig>,
}

impl Config {
    /// Loads `config.json`, returning the default configuration when the
    /// file does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn read() -> Result<Config> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        if !config_file_path.exists() {
            return Ok(Config::default());
        }

        let config_str = fs::read_to_string(config_file_path)?;
        let config: Config = serde_json::from_str(&config_str)?;
        Ok(config)
    }

    /// Writes the configuration as pretty-printed JSON.
    pub fn save(&self) -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;

        let config_file = File::create(config_file_path)?;
        serde_json::to_writer_pretty(&config_file, &self)?;
        Ok(())
    }

    /// Removes `config.json` if present.
    pub fn delete() -> Result<()> {
        let config_file_path = DataStorage::new().get_path(CONFIG_FILE_NAME)?;
        if config_file_path.exists() {
            fs::remove_file(config_file_path)?;
        }
        Ok(())
    }

    /// Interactive setup wizard, seeded with the current values.
    pub fn init() -> Result<Self> {
        let mut config = Self::read().unwrap_or_default();
        let default = config.server.clone().unwrap_or_default();

        msg_print!(Message::ConfigModuleServer);
        let port: u16 = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptServerPort.to_string())
            .default(default.port)
            .interact_text()?;
        let store_file: String = Input::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptStoreFile.to_string())
            .default(default.store_file.display().to_string())
            .interact_text()?;

        config.server = Some(ServerConfig {
            port,
            store_file: PathBuf::from(store_file),
        });
        Ok(config)
    }
}

/// Optional values supplied by one configuration layer.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Overrides {
    pub port: Option<u16>,
    pub store_file: Option<PathBuf>,
}

impl Overrides {
    /// Reads `TODOMVC_PORT` and `TODOMVC_STORE_FILE`. An unparsable port is
    /// reported and ignored.
    pub fn from_env() -> Self {
        let port = env::var(ENV_PORT).ok().and_then(|raw| {
            let parsed = raw.trim().parse::<u16>();
            match parsed {
                Ok(port) => Some(port),
                Err(_) => {
                    msg_warning!(Message::InvalidPortEnv(raw));
                    None
                }
            }
        });
        let store_file = env::var_os(ENV_STORE_FILE).filter(|v| !v.is_empty()).map(PathBuf::from);

        Overrides { port, store_file }
    }
}

/// Startup options of the service.
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    pub store_file_path: PathBuf,
    /// `0` asks the OS for a free port.
    pub port: u16,
}

impl Options {
    pub fn new(store_file_path: impl Into<PathBuf>, port: u16) -> Self {
        Options {
            store_file_path: store_file_path.into(),
            port,
        }
    }

    /// Folds the configuration layers; `cli` wins over `env`, which wins over
    /// the file, which wins over the defaults.
    pub fn resolve(cli: Overrides, env: Overrides, config: &Config) -> Options {
        let file = config.server.clone().unwrap_or_default();
        Options {
            store_file_path: cli.store_file.or(env.store_file).unwrap_or(file.store_file),
            port: cli.port.or(env.port).unwrap_or(file.port),
        }
    }
}
