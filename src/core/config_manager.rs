// src/core/config_manager.rs
//! Unified configuration: config.yaml plus environment overrides

use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::info;

use crate::config::PortfolioConfig;
use crate::core::ai_client::AiConfig;
use crate::environment::EnvironmentConfig;

#[derive(Debug, Clone)]
pub struct ConfigManager {
    pub environment: EnvironmentConfig,
    pub ai: AiConfig,
}

impl ConfigManager {
    /// Load all configurations
    pub fn load() -> Result<Self> {
        let environment = EnvironmentConfig::load()?;
        Self::from_environment(environment, |key| std::env::var(key).ok())
    }

    /// Apply environment-variable overrides through `lookup`
    pub fn from_environment<F>(mut environment: EnvironmentConfig, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut ai = environment.ai.clone();

        if let Some(key) = lookup("GEMINI_API_KEY").filter(|k| !k.trim().is_empty()) {
            ai.api_key = Some(key);
        }
        if let Some(url) = lookup("AI_API_URL") {
            ai.base_url = url;
        }
        if let Some(model) = lookup("AI_MODEL") {
            ai.model = model;
        }
        if let Some(port) = lookup("PORTFOLIO_PORT") {
            environment.port = port
                .parse::<u16>()
                .with_context(|| format!("PORTFOLIO_PORT must be a valid port number: {}", port))?;
        }

        info!(
            "AI service: {} (model {}, key {})",
            ai.base_url,
            ai.model,
            if ai.api_key.is_some() { "set" } else { "missing" }
        );

        environment.ai = ai.clone();
        Ok(Self { environment, ai })
    }

    /// Create export configuration for one profile
    pub fn create_portfolio_config(
        &self,
        profile_path: PathBuf,
        template: Option<String>,
        output_dir: Option<PathBuf>,
    ) -> PortfolioConfig {
        let mut config = PortfolioConfig::new(profile_path)
            .with_templates_dir(self.environment.templates_path.clone())
            .with_output_dir(
                output_dir.unwrap_or_else(|| self.environment.output_path.clone()),
            );
        if let Some(template) = template {
            config = config.with_template(template);
        }
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_env_overrides() {
        let manager = ConfigManager::from_environment(
            EnvironmentConfig::default(),
            lookup_from(&[
                ("GEMINI_API_KEY", "secret"),
                ("AI_MODEL", "gemini-1.5-pro"),
                ("PORTFOLIO_PORT", "9001"),
            ]),
        )
        .unwrap();

        assert_eq!(manager.ai.api_key.as_deref(), Some("secret"));
        assert_eq!(manager.ai.model, "gemini-1.5-pro");
        assert_eq!(manager.environment.port, 9001);
        assert_eq!(manager.environment.ai.model, "gemini-1.5-pro");
    }

    #[test]
    fn test_invalid_port_is_rejected() {
        let result = ConfigManager::from_environment(
            EnvironmentConfig::default(),
            lookup_from(&[("PORTFOLIO_PORT", "not-a-port")]),
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_create_portfolio_config_defaults() {
        let manager =
            ConfigManager::from_environment(EnvironmentConfig::default(), lookup_from(&[]))
                .unwrap();
        let config = manager.create_portfolio_config(PathBuf::from("me.toml"), None, None);
        assert_eq!(config.template, "minimal");
        assert_eq!(config.output_dir, PathBuf::from("out"));
        assert_eq!(config.templates_dir, Some(PathBuf::from("templates")));
    }
}
