use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
    Json,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::cv::validate_required_fields;
use crate::errors::AppError;
use crate::models::cv::{CvPatch, CvRecord};
use crate::presentation::to_draft;
use crate::routes::ApiResponse;
use crate::state::AppState;
use crate::templates;

fn not_found() -> AppError {
    AppError::NotFound("CV not found".to_string())
}

/// GET /api/cv — all documents owned by the caller, newest-first.
pub async fn handle_list(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<Vec<CvRecord>>>, AppError> {
    let records = state.cvs.list(auth.user_id).await?;
    Ok(ApiResponse::ok(records))
}

/// GET /api/cv/:id
pub async fn handle_get(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<CvRecord>>, AppError> {
    let record = state
        .cvs
        .get(auth.user_id, id)
        .await?
        .ok_or_else(not_found)?;
    Ok(ApiResponse::ok(record))
}

/// POST /api/cv
pub async fn handle_create(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(patch): Json<CvPatch>,
) -> Result<(StatusCode, Json<ApiResponse<CvRecord>>), AppError> {
    validate_required_fields(&patch)?;

    let record = state.cvs.create(auth.user_id, patch.into_document()).await?;
    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(record, "CV created successfully"),
    ))
}

/// PUT /api/cv/:id — top-level merge onto the stored document, then full
/// replace. Two concurrent sessions race last-write-wins; there is no
/// version check.
pub async fn handle_update(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
    Json(patch): Json<CvPatch>,
) -> Result<Json<ApiResponse<CvRecord>>, AppError> {
    let existing = state
        .cvs
        .get(auth.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    let merged = patch.apply(existing.document);
    let record = state
        .cvs
        .update(auth.user_id, id, merged)
        .await?
        .ok_or_else(not_found)?;

    Ok(ApiResponse::with_message(record, "CV updated successfully"))
}

/// DELETE /api/cv/:id — hard delete; a missing id is a 404, never a 5xx.
pub async fn handle_delete(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ApiResponse<()>>, AppError> {
    if !state.cvs.delete(auth.user_id, id).await? {
        return Err(not_found());
    }
    Ok(ApiResponse::message_only("CV deleted successfully"))
}

/// GET /api/cv/:id/preview — server-rendered HTML through the document's
/// selected template. This is the page the headless renderer captures.
pub async fn handle_preview(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let record = state
        .cvs
        .get(auth.user_id, id)
        .await?
        .ok_or_else(not_found)?;

    let draft = to_draft(&record.document);
    Ok(Html(templates::render(&draft, record.document.template)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::cv::PersonalInfo;
    use crate::state::AppState;

    fn patch(name: &str, email: &str) -> CvPatch {
        CvPatch {
            personal_info: Some(PersonalInfo {
                full_name: name.into(),
                email: email.into(),
                ..PersonalInfo::default()
            }),
            ..CvPatch::default()
        }
    }

    async fn create(state: &AppState, owner: AuthUser, name: &str) -> CvRecord {
        let (status, response) = handle_create(
            State(state.clone()),
            owner,
            Json(patch(name, "owner@example.com")),
        )
        .await
        .unwrap();
        assert_eq!(status, StatusCode::CREATED);
        response.0.data.unwrap()
    }

    fn user() -> AuthUser {
        AuthUser {
            user_id: Uuid::new_v4(),
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let state = AppState::for_tests();
        let result = handle_create(State(state), user(), Json(CvPatch::default())).await;
        assert!(matches!(result, Err(AppError::Validation(_))));
    }

    #[tokio::test]
    async fn get_does_not_leak_across_owners() {
        let state = AppState::for_tests();
        let alice = user();
        let bob = user();

        let record = create(&state, alice, "Alice").await;

        // Owner sees it; a different authenticated user gets a plain 404.
        assert!(handle_get(State(state.clone()), alice, Path(record.id))
            .await
            .is_ok());
        assert!(matches!(
            handle_get(State(state), bob, Path(record.id)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn delete_twice_returns_not_found_second_time() {
        let state = AppState::for_tests();
        let alice = user();
        let record = create(&state, alice, "Alice").await;

        assert!(handle_delete(State(state.clone()), alice, Path(record.id))
            .await
            .is_ok());
        assert!(matches!(
            handle_delete(State(state), alice, Path(record.id)).await,
            Err(AppError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn update_merges_at_top_level() {
        let state = AppState::for_tests();
        let alice = user();
        let record = create(&state, alice, "Alice").await;

        // A patch that only carries a template must not clobber personalInfo.
        let update = CvPatch {
            template: Some(crate::templates::TemplateId::Classic),
            ..CvPatch::default()
        };
        let updated = handle_update(State(state), alice, Path(record.id), Json(update))
            .await
            .unwrap()
            .0
            .data
            .unwrap();

        assert_eq!(updated.document.personal_info.full_name, "Alice");
        assert_eq!(
            updated.document.template,
            crate::templates::TemplateId::Classic
        );
    }

    #[tokio::test]
    async fn preview_renders_owner_document() {
        let state = AppState::for_tests();
        let alice = user();
        let record = create(&state, alice, "Alice Wonderland").await;

        let Html(html) = handle_preview(State(state), alice, Path(record.id))
            .await
            .unwrap();
        assert!(html.contains("cv-preview-container"));
        assert!(html.contains("Alice Wonderland"));
    }
}
