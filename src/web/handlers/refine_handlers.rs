// src/web/handlers/refine_handlers.rs
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::State;
use tracing::{error, info, warn};

use crate::core::{AiError, ContentClient};
use crate::refine::RefinementProposal;
use crate::web::types::*;

pub fn ai_error_response(e: &AiError) -> ApiError {
    let status = match e {
        AiError::MissingApiKey => Status::ServiceUnavailable,
        AiError::RateLimited { .. } => Status::TooManyRequests,
        AiError::Transport(_) | AiError::Api { .. } | AiError::Parse(_) => Status::BadGateway,
    };

    let suggestions = match e {
        AiError::MissingApiKey => vec!["Set GEMINI_API_KEY and restart the server".to_string()],
        AiError::RateLimited { .. } => vec!["Wait a minute before retrying".to_string()],
        _ => vec!["Try again in a few moments".to_string()],
    };

    StandardErrorResponse::new(
        e.user_message().to_string(),
        e.code().to_string(),
        suggestions,
    )
    .with_status(status)
}

pub async fn refine_handler(
    request: Json<RefineRequest>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<RefinementProposal>>, ApiError> {
    let client = ContentClient::new(&config.ai).map_err(|e| {
        warn!("Refinement requested but AI client unavailable: {}", e);
        ai_error_response(&e)
    })?;

    let proposal = client
        .propose_refinement(&request.user_data)
        .await
        .map_err(|e| {
            error!("Refinement failed [{}]: {}", e.category(), e);
            ai_error_response(&e)
        })?;

    info!("Prepared {} refinement proposals", proposal.len());
    let message = if proposal.is_empty() {
        "Nothing to refine: bio and project descriptions are empty".to_string()
    } else {
        format!("{} suggestions ready for review", proposal.len())
    };
    Ok(Json(DataResponse::success(message, proposal)))
}

pub async fn apply_refinement_handler(
    request: Json<ApplyRefinementRequest>,
) -> Json<DataResponse<AppliedRefinement>> {
    let ApplyRefinementRequest {
        mut user_data,
        proposal,
        approval,
    } = request.into_inner();

    let applied = proposal.apply(&mut user_data, &approval);
    Json(DataResponse::success(
        format!("Applied {} of {} suggestions", applied, proposal.len()),
        AppliedRefinement { applied, user_data },
    ))
}
