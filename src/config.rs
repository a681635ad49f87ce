//! Game configuration
//!
//! A small RON file with the window size and the target frame rate. A
//! missing or invalid file prints a diagnostic and falls back to the
//! built-in defaults; configuration problems degrade, they never abort.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    IoError(std::io::Error),
    ParseError(ron::error::SpannedError),
    ValidationError(String),
}

impl From<std::io::Error> for ConfigError {
    fn from(e: std::io::Error) -> Self {
        ConfigError::IoError(e)
    }
}

impl From<ron::error::SpannedError> for ConfigError {
    fn from(e: ron::error::SpannedError) -> Self {
        ConfigError::ParseError(e)
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::ParseError(e) => write!(f, "Parse error: {}", e),
            ConfigError::ValidationError(e) => write!(f, "Validation error: {}", e),
        }
    }
}

/// Top-level game settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Displayed in the window title
    pub version: String,
    /// Window width in pixels
    pub frame_width: i32,
    /// Window height in pixels
    pub frame_height: i32,
    /// Target frames per second for the scheduler
    pub fps: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            frame_width: 600,
            frame_height: 400,
            fps: 100,
        }
    }
}

fn validate(config: &GameConfig) -> Result<(), ConfigError> {
    if config.frame_width <= 0 || config.frame_height <= 0 {
        return Err(ConfigError::ValidationError(format!(
            "frame size must be positive ({}x{})",
            config.frame_width, config.frame_height
        )));
    }
    if config.fps == 0 || config.fps > 1000 {
        return Err(ConfigError::ValidationError(format!(
            "fps out of range: {}",
            config.fps
        )));
    }
    Ok(())
}

/// Parse and validate configuration from a RON string.
pub fn load_config_from_str(s: &str) -> Result<GameConfig, ConfigError> {
    let config: GameConfig = ron::from_str(s)?;
    validate(&config)?;
    Ok(config)
}

/// Load and validate a configuration file.
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<GameConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    load_config_from_str(&contents)
}

/// Load a configuration file, degrading to defaults (with a printed
/// diagnostic) when the file is missing or invalid.
pub fn load_or_default<P: AsRef<Path>>(path: P) -> GameConfig {
    match load_config(path.as_ref()) {
        Ok(config) => config,
        Err(e) => {
            println!(
                "Failed to load config {}: {}, using defaults",
                path.as_ref().display(),
                e
            );
            GameConfig::default()
        }
    }
}
