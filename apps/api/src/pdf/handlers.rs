use axum::{
    extract::{Path, State},
    http::header,
    response::{IntoResponse, Response},
};
use tracing::info;
use uuid::Uuid;

use crate::auth::{issue_token, AuthUser};
use crate::errors::AppError;
use crate::pdf::attachment_disposition;
use crate::state::AppState;

/// GET /api/pdf/:id — bearer header or `?token=` both work, since the
/// browser download path cannot set headers.
pub async fn handle_download(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Response, AppError> {
    // Ownership check before any renderer work.
    state
        .cvs
        .get(auth.user_id, id)
        .await?
        .ok_or_else(|| AppError::NotFound("CV not found".to_string()))?;

    // Short-lived token scoped to the renderer's preview fetch.
    let token = issue_token(auth.user_id, &state.config.jwt_secret, 1)?;
    let target_url = format!(
        "{}/api/cv/{}/preview?token={}",
        state.config.public_base_url, id, token
    );

    info!("Generating PDF for CV {id}");
    let pdf = state
        .renderer
        .render_pdf(&target_url)
        .await
        .map_err(|e| AppError::Renderer(e.to_string()))?;

    info!("PDF generated for CV {id}: {} bytes", pdf.len());

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (header::CONTENT_DISPOSITION, attachment_disposition(id)),
        ],
        pdf,
    )
        .into_response())
}
