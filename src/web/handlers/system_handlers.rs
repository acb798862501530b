// src/web/handlers/system_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info};

use crate::core::template_engine::TemplateInfo;
use crate::core::TemplateEngine;
use crate::web::types::*;

/// Per-request engine so newly added template directories show up without a restart
pub fn load_engine(config: &ServerConfig) -> Result<TemplateEngine, ApiError> {
    TemplateEngine::new(config.templates_dir.clone()).map_err(|e| {
        error!("Failed to initialize template engine: {:#}", e);
        StandardErrorResponse::new(
            "Template system initialization failed".to_string(),
            "TEMPLATE_INIT_ERROR".to_string(),
            vec![
                "Check if the templates directory is readable".to_string(),
                "Contact system administrator".to_string(),
            ],
        )
        .with_status(Status::InternalServerError)
    })
}

pub async fn get_templates_handler(
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<Vec<TemplateInfo>>>, ApiError> {
    let engine = load_engine(config)?;
    let templates = engine.template_infos();

    Ok(Json(DataResponse::success(
        format!("{} templates available", templates.len()),
        templates,
    )))
}

pub async fn health_handler() -> Json<TextResponse> {
    info!("Health check");
    Json(TextResponse::success(
        "Portfolio builder is running".to_string(),
    ))
}
