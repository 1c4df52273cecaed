use axum::{extract::State, http::StatusCode, Json};
use bcrypt::{hash, verify, DEFAULT_COST};
use serde::{Deserialize, Serialize};

use crate::auth::{issue_token, AuthUser};
use crate::errors::AppError;
use crate::models::user::{NewUser, UserProfile};
use crate::routes::ApiResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct AuthData {
    pub user: UserProfile,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MeData {
    pub user: UserProfile,
}

/// POST /api/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<ApiResponse<AuthData>>), AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() || req.name.trim().is_empty() {
        return Err(AppError::Validation(
            "Please provide email, password, and name".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();
    let name = req.name.trim().to_string();

    // bcrypt is intentionally CPU-intensive; keep it off the async executor.
    let password_hash = tokio::task::spawn_blocking(move || hash(req.password, DEFAULT_COST))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("hash task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password hashing failed: {e}")))?;

    let user = state
        .users
        .create(NewUser {
            email,
            name,
            password_hash,
        })
        .await?;

    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expire_hours,
    )?;

    Ok((
        StatusCode::CREATED,
        ApiResponse::with_message(
            AuthData {
                user: (&user).into(),
                token,
            },
            "User registered successfully",
        ),
    ))
}

/// POST /api/auth/login
///
/// Unknown email and wrong password produce the same response, so the
/// endpoint leaks nothing about which accounts exist.
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthData>>, AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Please provide email and password".to_string(),
        ));
    }

    let email = req.email.trim().to_lowercase();
    let user = state
        .users
        .find_by_email(&email)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    let password_hash = user.password_hash.clone();
    let valid = tokio::task::spawn_blocking(move || verify(req.password, &password_hash))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("verify task failed: {e}")))?
        .map_err(|e| AppError::Internal(anyhow::anyhow!("password verification failed: {e}")))?;

    if !valid {
        return Err(AppError::InvalidCredentials);
    }

    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.jwt_expire_hours,
    )?;

    Ok(ApiResponse::with_message(
        AuthData {
            user: (&user).into(),
            token,
        },
        "Login successful",
    ))
}

/// GET /api/auth/me
pub async fn handle_me(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<ApiResponse<MeData>>, AppError> {
    let user = state
        .users
        .find_by_id(auth.user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(ApiResponse::ok(MeData {
        user: (&user).into(),
    }))
}
