use axum::extract::State;
use axum::Json;

use crate::error::AppError;
use crate::models::{LoginRequest, LoginResponse, RegisterRequest, RegisterResponse};
use crate::state::AppState;

/// POST /user/register
pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<Json<RegisterResponse>, AppError> {
    let username = req.username.trim().to_lowercase();
    let email = req.email.trim().to_lowercase();

    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Username, email, and password required".to_string(),
        ));
    }

    state.users.register(&username, &email, &req.password)?;

    Ok(Json(RegisterResponse {
        success: true,
        message: "Registration successful".to_string(),
    }))
}

/// POST /user/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, AppError> {
    let email = req.email.trim().to_lowercase();

    let user = state.users.verify_login(&email, &req.password)?;
    let access_token = state
        .tokens
        .issue(&user.email)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(Json(LoginResponse {
        success: true,
        access_token,
    }))
}
