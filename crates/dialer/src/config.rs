use crate::events::AppEvent;
use async_channel::Sender;
use config::{Environment, File, FileFormat};
use directories::ProjectDirs;
use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use rotary::{Code, DialConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

const DEFAULT_CONFIG: &str = include_str!("default_config.toml");

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct AccessConfig {
    /// Code that grants access. Without one every code is just echoed back.
    pub pin: Option<Code>,
}

impl AccessConfig {
    /// A pin must be something the dial can actually produce.
    pub fn validate(&self, code_length: usize) -> Result<(), ConfigError> {
        let Some(pin) = &self.pin else {
            return Ok(());
        };
        if !pin.chars().all(|c| c.is_ascii_digit()) {
            return Err(ConfigError::PinNotNumeric(pin.clone()));
        }
        let length = pin.chars().count();
        if length != code_length {
            return Err(ConfigError::PinLength {
                expected: code_length,
                actual: length,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub dial: DialConfig,
    #[serde(default)]
    pub access: AccessConfig,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to determine config directory")]
    ConfigDirNotFound,
    #[error("Config error: {0}")]
    Config(#[from] config::ConfigError),
    #[error("Invalid dial settings: {0}")]
    Dial(#[from] rotary::config::ConfigError),
    #[error("Pin '{0}' must contain only digits")]
    PinNotNumeric(Code),
    #[error("Pin has {actual} digits but codes are {expected} long")]
    PinLength { expected: usize, actual: usize },
    #[error("Notify error: {0}")]
    Notify(#[from] notify::Error),
}

pub fn get_config_path() -> Result<PathBuf, ConfigError> {
    let proj_dirs =
        ProjectDirs::from("org", "example", "dialer").ok_or(ConfigError::ConfigDirNotFound)?;
    Ok(proj_dirs.config_dir().join("config.toml"))
}

// Values stay strings so a pin like 0451 keeps its leading zero; numeric
// fields are parsed when deserialized.
fn environment() -> Environment {
    Environment::with_prefix("DIALER")
        .prefix_separator("_")
        .separator("__")
}

/// Built-in defaults, then the file at `path` (if present), then `DIALER_*`
/// environment variables.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    load_config_with(path, environment())
}

fn load_config_with(path: &Path, env: Environment) -> Result<Config, ConfigError> {
    let s = config::Config::builder()
        .add_source(File::from_str(DEFAULT_CONFIG, FileFormat::Toml))
        .add_source(File::from(path).required(false))
        .add_source(env)
        .build()?;

    let config: Config = s.try_deserialize()?;
    config.dial.validate()?;
    config.access.validate(config.dial.max_code_length)?;
    Ok(config)
}

pub fn load_or_default(path: &Path) -> Config {
    match load_config(path) {
        Ok(c) => c,
        Err(e) => {
            log::warn!("Failed to load {}: {}, using defaults", path.display(), e);
            Config::default()
        }
    }
}

pub fn write_default_config(path: &Path) -> std::io::Result<PathBuf> {
    if let Some(parent) = path.parent() {
        fs_err::create_dir_all(parent)?;
    }
    if !path.exists() {
        fs_err::write(path, DEFAULT_CONFIG)?;
    }
    Ok(path.to_path_buf())
}

pub async fn run_async_watcher(config_path: PathBuf, tx: Sender<AppEvent>) {
    let config_dir = match config_path.parent() {
        Some(p) => p.to_path_buf(),
        None => return,
    };

    if let Err(e) = fs_err::create_dir_all(&config_dir) {
        log::error!("Failed to create config directory for watching: {}", e);
        return;
    }

    let (bridge_tx, bridge_rx) = async_channel::unbounded();

    let mut watcher = match RecommendedWatcher::new(
        move |res| {
            let _ = bridge_tx.send_blocking(res);
        },
        notify::Config::default(),
    ) {
        Ok(w) => w,
        Err(e) => {
            log::error!("Failed to create watcher: {}", ConfigError::from(e));
            return;
        }
    };

    if let Err(e) = watcher.watch(&config_dir, RecursiveMode::NonRecursive) {
        log::error!("Failed to watch config directory: {}", e);
        return;
    }

    while let Ok(res) = bridge_rx.recv().await {
        match res {
            Ok(event) => {
                let meaningful_event = matches!(
                    event.kind,
                    EventKind::Modify(_) | EventKind::Create(_) | EventKind::Remove(_)
                );

                if meaningful_event
                    && event.paths.iter().any(|p| p == &config_path)
                    && tx.send(AppEvent::ConfigReload).await.is_err()
                {
                    break;
                }
            }
            Err(e) => log::error!("Watch error: {}", e),
        }
    }
}
