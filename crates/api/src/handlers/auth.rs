//! Handlers for the `/auth` resource (register, login, profile).

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use validator::Validate;

use formbox_core::error::CoreError;
use formbox_core::types::DbId;
use formbox_db::models::user::{CreateUser, UserResponse};
use formbox_db::repositories::UserRepo;

use crate::auth::jwt::generate_access_token;
use crate::auth::password::{hash_password, validate_password_strength, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

/// Minimum accepted password length.
const MIN_PASSWORD_LEN: usize = 8;

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/register`.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 120, message = "Username must be 3-120 characters"))]
    pub username: String,
    pub password: String,
}

/// Request body for `POST /auth/login`.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Request body for `PATCH /auth/me`. Both fields optional.
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateMeRequest {
    #[validate(length(min = 3, max = 120, message = "Username must be 3-120 characters"))]
    pub username: Option<String>,
    pub password: Option<String>,
}

/// Bearer token response returned by register and login.
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: &'static str,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/register
///
/// Create an account and return an access token.
pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> AppResult<(StatusCode, Json<TokenResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;
    validate_password_strength(&input.password, MIN_PASSWORD_LEN).map_err(AppError::BadRequest)?;

    if UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .is_some()
    {
        return Err(AppError::Core(CoreError::Conflict(
            "Username already exists".into(),
        )));
    }

    let password_hash = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;
    let user = UserRepo::create(
        &state.pool,
        &CreateUser {
            username: input.username,
            password_hash,
        },
    )
    .await?;

    tracing::info!(user_id = user.id, "Registered new user");

    let token = token_response(&state, user.id, &user.username)?;
    Ok((StatusCode::CREATED, Json(token)))
}

/// POST /api/v1/auth/login
///
/// Authenticate with username + password and return an access token.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<TokenResponse>> {
    // 1. Find user by username.
    let user = UserRepo::find_by_username(&state.pool, &input.username)
        .await?
        .ok_or_else(|| {
            AppError::Core(CoreError::Unauthorized(
                "Incorrect username or password".into(),
            ))
        })?;

    // 2. Verify password.
    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;

    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            "Incorrect username or password".into(),
        )));
    }

    // 3. Issue token.
    let token = token_response(&state, user.id, &user.username)?;
    Ok(Json(token))
}

/// GET /api/v1/auth/me
pub async fn me(
    State(state): State<AppState>,
    auth_user: AuthUser,
) -> AppResult<Json<UserResponse>> {
    let user = UserRepo::find_by_id(&state.pool, auth_user.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;
    Ok(Json(user.into()))
}

/// PATCH /api/v1/auth/me
///
/// Update the current user's username and/or password.
pub async fn update_me(
    State(state): State<AppState>,
    auth_user: AuthUser,
    Json(input): Json<UpdateMeRequest>,
) -> AppResult<Json<UserResponse>> {
    input
        .validate()
        .map_err(|e| AppError::BadRequest(e.to_string()))?;

    // Reject a username change that collides with another account.
    if let Some(username) = input.username.as_deref() {
        if username != auth_user.username
            && UserRepo::find_by_username(&state.pool, username)
                .await?
                .is_some()
        {
            return Err(AppError::Core(CoreError::Conflict(
                "Username already exists".into(),
            )));
        }
    }

    let password_hash = match input.password.as_deref() {
        Some(password) => {
            validate_password_strength(password, MIN_PASSWORD_LEN).map_err(AppError::BadRequest)?;
            Some(
                hash_password(password)
                    .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?,
            )
        }
        None => None,
    };

    let user = UserRepo::update(
        &state.pool,
        auth_user.user_id,
        input.username.as_deref(),
        password_hash.as_deref(),
    )
    .await?
    .ok_or_else(|| AppError::Core(CoreError::Unauthorized("User no longer exists".into())))?;

    Ok(Json(user.into()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Build the token response for a freshly authenticated user.
fn token_response(state: &AppState, user_id: DbId, username: &str) -> AppResult<TokenResponse> {
    let access_token = generate_access_token(user_id, username, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    Ok(TokenResponse {
        access_token,
        token_type: "bearer",
        expires_in: state.config.jwt.access_token_expiry_mins * 60,
    })
}
