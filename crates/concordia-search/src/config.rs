use anyhow::{Context, Result};
use confyg::{env, Confygery};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Configuration for concordia.
///
/// Configuration is loaded from multiple sources with the following priority:
/// 1. CLI arguments (highest priority)
/// 2. Environment variables (CONCORDIA_* prefix)
/// 3. Config file (~/.config/concordia/config.toml)
/// 4. Built-in defaults (lowest priority)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the Ollama-compatible embedding provider.
    ///
    /// Can be set via:
    /// - ENV: CONCORDIA_OLLAMA_URL
    /// - Config: ollama_url = "http://..."
    #[serde(default = "default_ollama_url")]
    pub ollama_url: String,

    /// Name of the embedding model the provider must serve.
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,

    /// Base URL of the scripture lookup provider.
    #[serde(default = "default_bible_api_url")]
    pub bible_api_url: String,

    /// Translation used when resolving citations (default: Almeida
    /// Revista e Atualizada).
    #[serde(default = "default_translation")]
    pub translation: String,

    /// Path to the SQLite corpus database.
    ///
    /// Can be set via:
    /// - CLI: --db /path/to/db
    /// - ENV: CONCORDIA_DATABASE_PATH
    /// - Config: database_path = "/path/to/db"
    /// - Default: ~/.local/share/concordia/concordia.db
    #[serde(default = "default_db_path")]
    pub database_path: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ollama_url: default_ollama_url(),
            embedding_model: default_embedding_model(),
            bible_api_url: default_bible_api_url(),
            translation: default_translation(),
            database_path: default_db_path(),
        }
    }
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Searches for config file at: ~/.config/concordia/config.toml
    /// Reads environment variables with CONCORDIA_ prefix.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file exists but cannot be parsed.
    pub fn load() -> Result<Self> {
        let config_path = config_file_path();

        let mut builder = Confygery::new().context("Failed to create config builder")?;

        if config_path.exists() {
            let path_str = config_path
                .to_str()
                .ok_or_else(|| anyhow::anyhow!("Config path contains invalid UTF-8"))?;
            builder
                .add_file(path_str)
                .context("Failed to load config file")?;
        }

        let env_opts = env::Options::with_top_level("concordia");
        builder
            .add_env(env_opts)
            .context("Failed to load environment variables")?;

        let config: Self = builder.build().context("Failed to build configuration")?;

        Ok(config)
    }

    /// Load configuration with a custom database path.
    ///
    /// This is used when the --db CLI flag is provided.
    pub fn load_with_db_path(db_path: Option<PathBuf>) -> Result<Self> {
        let mut config = Self::load()?;
        if let Some(db_path) = db_path {
            config.database_path = db_path;
        }
        Ok(config)
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_bible_api_url() -> String {
    "https://bolls.life".to_string()
}

fn default_translation() -> String {
    "ARA".to_string()
}

/// Get the default database path.
///
/// Returns: ~/.local/share/concordia/concordia.db (or platform equivalent)
fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("concordia")
        .join("concordia.db")
}

/// Get the config file path.
///
/// Returns:
/// - Linux: ~/.config/concordia/config.toml
/// - macOS: ~/Library/Application Support/concordia/config.toml
/// - Windows: %APPDATA%\concordia\config.toml
pub fn config_file_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("concordia")
        .join("config.toml")
}

/// Get the example config file content.
pub fn example_config() -> &'static str {
    r#"# Concordia Configuration File
#
# Configuration is loaded from multiple sources with the following priority:
# 1. CLI arguments (highest priority)
# 2. Environment variables (CONCORDIA_* prefix)
# 3. This config file
# 4. Built-in defaults (lowest priority)

# Base URL of the Ollama-compatible embedding provider
#
# The configured model must be pulled first: ollama pull nomic-embed-text
#ollama_url = "http://localhost:11434"

# Embedding model name (matched as a substring against /api/tags)
#embedding_model = "nomic-embed-text"

# Scripture lookup provider and translation
#bible_api_url = "https://bolls.life"
#translation = "ARA"

# Path to the SQLite corpus database
#
# Can also be set via:
# - CLI: concordia --db /custom/path.db search "Lucas 2,15"
# - Environment: CONCORDIA_DATABASE_PATH=/custom/path.db
#
# Default: Platform-specific data directory
#database_path = "/path/to/custom/concordia.db"
"#
}

/// Create default config file if it doesn't exist.
///
/// Returns true if a new file was created, false if it already existed.
pub fn ensure_config_file() -> Result<bool> {
    let config_path = config_file_path();

    if config_path.exists() {
        return Ok(false);
    }

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    std::fs::write(&config_path, example_config()).context("Failed to write config file")?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.ollama_url, "http://localhost:11434");
        assert_eq!(config.embedding_model, "nomic-embed-text");
        assert_eq!(config.translation, "ARA");
        assert!(!config.database_path.as_os_str().is_empty());
    }

    #[test]
    fn test_config_load() {
        // Should not fail even if config file doesn't exist
        let result = Config::load();
        assert!(result.is_ok());
    }

    #[test]
    fn test_config_with_custom_db_path() {
        let custom_path = PathBuf::from("/tmp/test.db");
        let config = Config::load_with_db_path(Some(custom_path.clone()));
        assert!(config.is_ok());
        assert_eq!(config.unwrap().database_path, custom_path);
    }
}
