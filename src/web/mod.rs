// src/web/mod.rs
pub mod handlers;
pub mod types;

pub use types::*;

use anyhow::Result;
use rocket::fairing::{Fairing, Info, Kind};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::{catchers, get, options, post, routes, Build, Request, Response, Rocket, State};
use tracing::info;

use crate::core::template_engine::TemplateInfo;
use crate::refine::RefinementProposal;
use crate::types::{UserData, ValidationIssue};

// CORS Fairing
pub struct Cors;

#[rocket::async_trait]
impl Fairing for Cors {
    fn info(&self) -> Info {
        Info {
            name: "Add CORS headers to responses",
            kind: Kind::Response,
        }
    }

    async fn on_response<'r>(&self, _request: &'r Request<'_>, response: &mut Response<'r>) {
        response.set_header(Header::new("Access-Control-Allow-Origin", "*"));
        response.set_header(Header::new(
            "Access-Control-Allow-Methods",
            "POST, GET, OPTIONS",
        ));
        response.set_header(Header::new("Access-Control-Allow-Headers", "*"));
        response.set_header(Header::new(
            "Access-Control-Expose-Headers",
            "Content-Disposition",
        ));
    }
}

#[get("/health")]
pub async fn health() -> Json<TextResponse> {
    handlers::health_handler().await
}

#[get("/templates")]
pub async fn get_templates(
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<Vec<TemplateInfo>>>, ApiError> {
    handlers::get_templates_handler(config).await
}

#[post("/preview", data = "<request>")]
pub async fn preview(
    request: Json<PreviewRequest>,
    config: &State<ServerConfig>,
) -> Result<RawHtml<String>, ApiError> {
    handlers::preview_handler(request, config).await
}

#[post("/export", data = "<request>")]
pub async fn export(
    request: Json<ExportRequest>,
    config: &State<ServerConfig>,
) -> Result<ArchiveResponse, ApiError> {
    handlers::export_handler(request, config).await
}

#[post("/validate", data = "<user_data>")]
pub async fn validate(user_data: Json<UserData>) -> Json<DataResponse<Vec<ValidationIssue>>> {
    handlers::validate_handler(user_data).await
}

#[post("/refine", data = "<request>")]
pub async fn refine(
    request: Json<RefineRequest>,
    config: &State<ServerConfig>,
) -> Result<Json<DataResponse<RefinementProposal>>, ApiError> {
    handlers::refine_handler(request, config).await
}

#[post("/refine/apply", data = "<request>")]
pub async fn apply_refinement(
    request: Json<ApplyRefinementRequest>,
) -> Json<DataResponse<AppliedRefinement>> {
    handlers::apply_refinement_handler(request).await
}

#[options("/<_..>")]
pub async fn options() -> Status {
    Status::Ok
}

// Error catchers
#[rocket::catch(400)]
pub fn bad_request() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Invalid request format".to_string(),
        "BAD_REQUEST".to_string(),
        vec![
            "Check your request JSON format".to_string(),
            "Verify all required fields are present".to_string(),
        ],
    ))
}

#[rocket::catch(404)]
pub fn not_found() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Resource not found".to_string(),
        "NOT_FOUND".to_string(),
        vec!["Check the endpoint path".to_string()],
    ))
}

#[rocket::catch(422)]
pub fn unprocessable() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Request body could not be parsed".to_string(),
        "INVALID_BODY".to_string(),
        vec!["Send userData using camelCase field names".to_string()],
    ))
}

#[rocket::catch(500)]
pub fn internal_error() -> Json<StandardErrorResponse> {
    Json(StandardErrorResponse::new(
        "Internal server error".to_string(),
        "INTERNAL_ERROR".to_string(),
        vec![
            "Try again in a few moments".to_string(),
            "Check the server logs".to_string(),
        ],
    ))
}

/// Assemble the server without launching it
pub fn build_rocket(server_config: ServerConfig) -> Rocket<Build> {
    let figment = rocket::Config::figment()
        .merge(("port", server_config.port))
        .merge(("address", "0.0.0.0"));

    rocket::custom(figment)
        .attach(Cors)
        .manage(server_config)
        .register(
            "/api",
            catchers![bad_request, not_found, unprocessable, internal_error],
        )
        .mount(
            "/api",
            routes![
                health,
                get_templates,
                preview,
                export,
                validate,
                refine,
                apply_refinement,
                options,
            ],
        )
}

pub async fn start_web_server(server_config: ServerConfig) -> Result<()> {
    info!("Starting portfolio preview server");
    info!("Server: http://0.0.0.0:{}", server_config.port);
    match &server_config.templates_dir {
        Some(dir) => info!("Templates: {}", dir.display()),
        None => info!("Templates: built-in only"),
    }

    build_rocket(server_config)
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Server failed: {}", e))?;

    Ok(())
}
