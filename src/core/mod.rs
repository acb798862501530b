// src/core/mod.rs
//! Core services shared by the CLI and the preview server

pub mod ai_client;
pub mod config_manager;
pub mod fs_ops;
pub mod prompts;
pub mod template_engine;

pub use ai_client::{AiConfig, AiError, ContentClient};
pub use config_manager::ConfigManager;
pub use fs_ops::FsOps;
pub use template_engine::TemplateEngine;
