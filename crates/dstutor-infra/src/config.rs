//! Configuration loader for the tutor.
//!
//! Reads `config.toml` from the data directory (`~/.dstutor/` by default) and
//! deserializes it into [`TutorConfig`]. A missing file means defaults; an
//! unreadable or malformed one is a startup error. Value checks are left to
//! `TutorConfig::validate`.

use std::path::{Path, PathBuf};

use dstutor_types::config::TutorConfig;
use dstutor_types::error::ConfigError;

/// Environment variable overriding the data directory.
pub const HOME_ENV: &str = "DSTUTOR_HOME";

/// Resolve the data directory from environment or platform defaults.
///
/// Priority:
/// 1. `DSTUTOR_HOME` environment variable
/// 2. `~/.dstutor`
pub fn resolve_data_dir() -> PathBuf {
    if let Ok(dir) = std::env::var(HOME_ENV) {
        return PathBuf::from(dir);
    }

    if let Some(home) = dirs::home_dir() {
        return home.join(".dstutor");
    }

    // Last resort: current directory
    PathBuf::from(".dstutor")
}

/// Load configuration from `{data_dir}/config.toml`.
///
/// - If the file does not exist, returns [`TutorConfig::default()`].
/// - If the file cannot be read or parsed, returns `ConfigError::Invalid`.
/// - If the file exists and parses successfully, returns the parsed config.
pub async fn load_config(data_dir: &Path) -> Result<TutorConfig, ConfigError> {
    let config_path = data_dir.join("config.toml");

    let content = match tokio::fs::read_to_string(&config_path).await {
        Ok(content) => content,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            tracing::debug!("No config.toml found at {}, using defaults", config_path.display());
            return Ok(TutorConfig::default());
        }
        Err(err) => {
            return Err(ConfigError::Invalid(format!(
                "failed to read {}: {err}",
                config_path.display()
            )));
        }
    };

    let config = toml::from_str::<TutorConfig>(&content).map_err(|err| {
        ConfigError::Invalid(format!("failed to parse {}: {err}", config_path.display()))
    })?;
    tracing::debug!("Loaded configuration from {}", config_path.display());
    Ok(config)
}
