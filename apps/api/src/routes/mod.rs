pub mod health;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;

use crate::state::AppState;
use crate::templates::{TemplateInfo, CATALOG};
use crate::{advice, auth, cv, pdf};

/// Success envelope shared by all JSON endpoints: `{success, data, message}`.
/// Failures are shaped by `AppError::into_response`.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: None,
        })
    }

    pub fn with_message(data: T, message: &str) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            data: Some(data),
            message: Some(message.to_string()),
        })
    }
}

impl ApiResponse<()> {
    pub fn message_only(message: &str) -> Json<Self> {
        Json(ApiResponse {
            success: true,
            data: None,
            message: Some(message.to_string()),
        })
    }
}

/// GET /api/templates — static catalog, no auth required.
async fn handle_template_catalog() -> Json<ApiResponse<&'static [TemplateInfo]>> {
    ApiResponse::ok(CATALOG)
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/auth/register", post(auth::handlers::handle_register))
        .route("/api/auth/login", post(auth::handlers::handle_login))
        .route("/api/auth/me", get(auth::handlers::handle_me))
        // CV CRUD
        .route(
            "/api/cv",
            get(cv::handlers::handle_list).post(cv::handlers::handle_create),
        )
        .route(
            "/api/cv/:id",
            get(cv::handlers::handle_get)
                .put(cv::handlers::handle_update)
                .delete(cv::handlers::handle_delete),
        )
        .route("/api/cv/:id/preview", get(cv::handlers::handle_preview))
        // Templates
        .route("/api/templates", get(handle_template_catalog))
        // AI advice
        .route("/api/ai/career-path", post(advice::handlers::handle_career_path))
        // PDF export
        .route("/api/pdf/:id", get(pdf::handlers::handle_download))
        .with_state(state)
}
