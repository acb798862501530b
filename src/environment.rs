// src/environment.rs
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

use crate::core::ai_client::AiConfig;

pub const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_PORT: u16 = 8000;

fn default_port() -> u16 {
    DEFAULT_PORT
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub output_path: PathBuf,
    pub templates_path: PathBuf,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default)]
    pub ai: AiConfig,
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    local: EnvironmentConfig,
    production: EnvironmentConfig,
}

impl Default for EnvironmentConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("out"),
            templates_path: PathBuf::from("templates"),
            port: DEFAULT_PORT,
            ai: AiConfig::default(),
        }
    }
}

impl EnvironmentConfig {
    /// Load configuration for the current environment from `config.yaml`,
    /// falling back to defaults when the file is absent
    pub fn load() -> Result<Self> {
        let environment = Self::get_environment();
        info!("Loading configuration for environment: {}", environment);

        let config_path = PathBuf::from(CONFIG_FILE);
        let config = if config_path.exists() {
            Self::load_from_file(&config_path, &environment)?
        } else {
            info!("{} not found, using default configuration", CONFIG_FILE);
            Self::default()
        };

        Ok(Self {
            output_path: Self::resolve_path(&config.output_path)?,
            templates_path: Self::resolve_path(&config.templates_path)?,
            ..config
        })
    }

    pub fn get_environment() -> String {
        std::env::var("PORTFOLIO_ENV")
            .or_else(|_| std::env::var("ENVIRONMENT"))
            .unwrap_or_else(|_| "local".to_string())
    }

    pub fn load_from_file(config_path: &Path, environment: &str) -> Result<Self> {
        let config_content = std::fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        Self::from_yaml(&config_content, environment)
            .with_context(|| format!("Failed to parse {}", config_path.display()))
    }

    pub fn from_yaml(content: &str, environment: &str) -> Result<Self> {
        let config_file: ConfigFile = serde_yaml::from_str(content)?;

        Ok(match environment {
            "production" => config_file.production,
            _ => config_file.local,
        })
    }

    fn resolve_path(path: &Path) -> Result<PathBuf> {
        if path.is_absolute() {
            Ok(path.to_path_buf())
        } else {
            let current_dir = std::env::current_dir().context("Failed to get current directory")?;
            Ok(current_dir.join(path))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
local:
  output_path: out
  templates_path: templates
production:
  output_path: /app/out
  templates_path: /app/templates
  port: 9100
  ai:
    model: gemini-1.5-flash
    timeout_seconds: 20
"#;

    #[test]
    fn test_from_yaml_picks_section() {
        let local = EnvironmentConfig::from_yaml(SAMPLE, "local").unwrap();
        assert_eq!(local.output_path, PathBuf::from("out"));
        assert_eq!(local.port, 8000);
        assert_eq!(local.ai.model, "gemini-pro");

        let production = EnvironmentConfig::from_yaml(SAMPLE, "production").unwrap();
        assert_eq!(production.templates_path, PathBuf::from("/app/templates"));
        assert_eq!(production.port, 9100);
        assert_eq!(production.ai.model, "gemini-1.5-flash");
        assert_eq!(production.ai.timeout_seconds, 20);
        assert_eq!(production.ai.base_url, crate::core::ai_client::DEFAULT_API_URL);
    }

    #[test]
    fn test_unknown_environment_uses_local() {
        let config = EnvironmentConfig::from_yaml(SAMPLE, "staging").unwrap();
        assert_eq!(config.output_path, PathBuf::from("out"));
    }

    #[test]
    fn test_invalid_yaml_is_an_error() {
        assert!(EnvironmentConfig::from_yaml("local: [", "local").is_err());
    }
}
