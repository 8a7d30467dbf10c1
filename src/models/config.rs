//! Configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Canonical show name used when assembling names.
    pub show_name: String,
    /// Media extensions to process, without leading dots.
    pub extensions: Vec<String>,
    /// Fallback service configuration.
    pub fallback: FallbackConfig,
}

/// Fallback (LLM) service configuration.
///
/// Environment variables override the defaults:
/// - `OPENROUTER_API_KEY`: API key (no default; fallback is unavailable
///   without it)
/// - `OPENROUTER_BASE_URL`: service URL (default: https://openrouter.ai/api/v1)
/// - `OPENROUTER_MODEL`: model name (default: meta-llama/llama-3.2-3b-instruct)
/// - `OPENROUTER_TEMPERATURE`: sampling temperature (default: 0.0)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FallbackConfig {
    /// Service base URL.
    pub base_url: String,
    /// Model to use.
    pub model: String,
    /// API key.
    pub api_key: Option<String>,
    /// Sampling temperature; 0 keeps the mapping deterministic.
    pub temperature: f32,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            show_name: "The Office (US)".to_string(),
            extensions: vec!["mkv".to_string(), "mp4".to_string(), "m4v".to_string()],
            fallback: FallbackConfig::default(),
        }
    }
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("OPENROUTER_BASE_URL")
                .unwrap_or_else(|_| "https://openrouter.ai/api/v1".to_string()),
            model: std::env::var("OPENROUTER_MODEL")
                .unwrap_or_else(|_| "meta-llama/llama-3.2-3b-instruct".to_string()),
            api_key: std::env::var("OPENROUTER_API_KEY").ok(),
            temperature: std::env::var("OPENROUTER_TEMPERATURE")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(0.0),
            timeout: 120,
        }
    }
}

/// Get the configuration directory path.
fn dirs_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("scene_renamer")
}

/// Load configuration from file, falling back to defaults.
pub fn load_config() -> Config {
    let config_path = dirs_config_path().join("config.toml");

    if config_path.exists() {
        if let Ok(content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
            tracing::warn!("Ignoring malformed config at {}", config_path.display());
        }
    }

    Config::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.show_name, "The Office (US)");
        assert_eq!(config.extensions, ["mkv", "mp4", "m4v"]);
        assert_eq!(config.fallback.timeout, 120);
    }
}
