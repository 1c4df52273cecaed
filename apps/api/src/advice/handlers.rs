use axum::{extract::State, Json};
use serde::Deserialize;
use uuid::Uuid;

use crate::advice::prompts::{build_career_path_prompt, CAREER_ADVISOR_SYSTEM};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CareerPathRequest {
    pub cv_id: Uuid,
}

/// POST /api/ai/career-path
///
/// Owner-scoped fetch, then a single-shot model call. The response body is
/// the generated markdown only.
pub async fn handle_career_path(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(req): Json<CareerPathRequest>,
) -> Result<Json<ApiResponse<String>>, AppError> {
    let record = state
        .cvs
        .get(auth.user_id, req.cv_id)
        .await?
        .ok_or_else(|| AppError::NotFound("CV not found".to_string()))?;

    let prompt = build_career_path_prompt(&record.document);
    let markdown = state
        .llm
        .call_text(&prompt, CAREER_ADVISOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    Ok(ApiResponse::ok(markdown))
}
