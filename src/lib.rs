// src/lib.rs
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::warn;

pub mod cli;
pub mod config;
pub mod core;
pub mod environment;
pub mod exporter;
pub mod image_validator;
pub mod refine;
pub mod template_processor;
pub mod templates;
pub mod types;
pub mod utils;
pub mod web;

pub use config::PortfolioConfig;
pub use crate::core::template_engine::TemplateInfo;
pub use crate::core::{AiConfig, AiError, ConfigManager, ContentClient, TemplateEngine};
pub use exporter::{ExportBundle, PortfolioExporter};
pub use refine::{Approval, RefinementProposal};
pub use types::UserData;
pub use web::start_web_server;

/// Load the profile named by `config`, logging any validation issues
pub fn load_profile(config: &PortfolioConfig) -> Result<UserData> {
    let path = config.profile_path_absolute();
    let user_data = UserData::load(&path)?;
    for issue in user_data.validate() {
        warn!("{}: {}", path.display(), issue);
    }
    Ok(user_data)
}

/// Convenience function for a one-shot zip export
pub async fn export_portfolio(config: &PortfolioConfig) -> Result<PathBuf> {
    let user_data = load_profile(config)?;
    let engine = TemplateEngine::new(config.templates_dir.clone())
        .context("Failed to initialize template engine")?;

    PortfolioExporter::new(&engine)
        .with_image(config.include_image)
        .export(
            &user_data,
            &config.template,
            Some(&config.profile_dir()),
            &config.output_dir_absolute(),
        )
        .await
}

/// List all available templates
pub fn list_templates(templates_dir: Option<PathBuf>) -> Result<Vec<TemplateInfo>> {
    Ok(TemplateEngine::new(templates_dir)?.template_infos())
}
