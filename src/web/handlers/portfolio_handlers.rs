// src/web/handlers/portfolio_handlers.rs
//! Preview, export and validation handlers
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::core::TemplateEngine;
use crate::exporter::PortfolioExporter;
use crate::image_validator::ProfileImage;
use crate::templates::html::StylesheetMode;
use crate::templates::RenderContext;
use crate::types::{UserData, ValidationIssue};
use crate::web::types::*;

use super::system_handlers::load_engine;

/// The server only accepts inline (`data:`) or remote images; local paths are dropped
fn is_remote_or_inline(source: &str) -> bool {
    let source = source.trim();
    source.starts_with("data:") || source.starts_with("http://") || source.starts_with("https://")
}

fn without_local_image(mut user_data: UserData) -> UserData {
    if let Some(source) = user_data.profile_image.as_deref() {
        if !source.trim().is_empty() && !is_remote_or_inline(source) {
            warn!("Ignoring local profile image path in request: {}", source);
            user_data.profile_image = None;
        }
    }
    user_data
}

fn template_not_found(engine: &TemplateEngine, error: anyhow::Error) -> ApiError {
    StandardErrorResponse::new(
        error.to_string(),
        "TEMPLATE_NOT_FOUND".to_string(),
        vec![format!(
            "Use one of: {}",
            engine.list_templates().join(", ")
        )],
    )
    .with_status(Status::NotFound)
}

pub async fn preview_handler(
    request: Json<PreviewRequest>,
    config: &State<ServerConfig>,
) -> Result<RawHtml<String>, ApiError> {
    let engine = load_engine(config)?;
    let request = request.into_inner();
    let user_data = without_local_image(request.user_data);
    let template_id = request
        .template
        .unwrap_or_else(|| engine.default_template_id().to_string());

    let image_src = match user_data.profile_image.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(source) => match ProfileImage::resolve(source, None).await {
            Ok(image) => Some(image.to_data_url()),
            Err(e) => {
                warn!("Preview without profile image [{}]: {}", e.error_type.code(), e.message);
                None
            }
        },
        None => None,
    };

    let ctx = RenderContext::new(&user_data).with_image_src(image_src.as_deref());
    let rendered = engine
        .render(&template_id, &ctx, StylesheetMode::Inline)
        .map_err(|e| template_not_found(&engine, e))?;

    info!(
        "Rendered preview for {} with template '{}'",
        user_data.display_name(),
        rendered.template_id
    );
    Ok(RawHtml(rendered.index_html))
}

pub async fn export_handler(
    request: Json<ExportRequest>,
    config: &State<ServerConfig>,
) -> Result<ArchiveResponse, ApiError> {
    let engine = load_engine(config)?;
    let request = request.into_inner();
    let user_data = without_local_image(request.user_data);
    let template_id = request
        .template
        .unwrap_or_else(|| engine.default_template_id().to_string());

    let template_id = engine
        .resolve(&template_id)
        .map_err(|e| template_not_found(&engine, e))?
        .id()
        .to_string();

    let exporter = PortfolioExporter::new(&engine).with_image(request.include_image.unwrap_or(true));
    let bundle = exporter
        .build_files(&user_data, &template_id, None)
        .await
        .map_err(|e| {
            warn!("Export rejected: {:#}", e);
            StandardErrorResponse::new(
                format!("{:#}", e),
                "EXPORT_FAILED".to_string(),
                vec![
                    "Check the profile image".to_string(),
                    "Retry with includeImage set to false".to_string(),
                ],
            )
            .with_status(Status::UnprocessableEntity)
        })?;

    let archive = PortfolioExporter::build_archive(&bundle).map_err(|e| {
        error!("Failed to build archive: {:#}", e);
        StandardErrorResponse::new(
            "Failed to build archive".to_string(),
            "ARCHIVE_ERROR".to_string(),
            vec!["Try again in a few moments".to_string()],
        )
        .with_status(Status::InternalServerError)
    })?;

    info!(
        "Exported {} with template '{}' ({} files, {} bytes)",
        bundle.archive_name,
        bundle.template_id,
        bundle.files.len(),
        archive.len()
    );
    Ok(ArchiveResponse::new(archive, bundle.archive_name))
}

pub async fn validate_handler(
    user_data: Json<UserData>,
) -> Json<DataResponse<Vec<ValidationIssue>>> {
    let issues = user_data.validate();
    let message = if issues.is_empty() {
        "Profile looks good".to_string()
    } else {
        format!("{} issues found", issues.len())
    };
    Json(DataResponse::success(message, issues))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_image_paths_are_dropped() {
        let data = UserData {
            profile_image: Some("/etc/passwd".to_string()),
            ..Default::default()
        };
        assert_eq!(without_local_image(data).profile_image, None);

        let data = UserData {
            profile_image: Some("https://example.com/me.png".to_string()),
            ..Default::default()
        };
        assert!(without_local_image(data).profile_image.is_some());
    }
}
