use std::sync::Arc;

use axum::{
    routing::{delete, get, post},
    Json, Router,
};
use service::roster::RosterRepository;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;

use crate::openapi::ApiDoc;

pub mod subjects;

/// Shared handler state: the roster behind its repository trait.
#[derive(Clone)]
pub struct AppState {
    pub roster: Arc<dyn RosterRepository>,
}

impl AppState {
    pub fn new(roster: Arc<dyn RosterRepository>) -> Self {
        Self { roster }
    }
}

pub async fn root() -> &'static str {
    "Attendance backend running!"
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router: banner, health, docs and roster routes.
pub fn build_router(state: AppState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json));

    let roster = Router::new()
        .route("/subjects", get(subjects::list_subjects).post(subjects::create_subject))
        .route("/subjects/:id", get(subjects::get_subject).delete(subjects::delete_subject))
        .route("/subjects/:id/students", post(subjects::create_student))
        .route("/subjects/:id/students/:student_id", delete(subjects::delete_student))
        .route("/subjects/:id/attendance/:student_id", post(subjects::set_attendance));

    public
        .merge(roster)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
