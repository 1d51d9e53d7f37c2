use axum::{Json, Router, http::StatusCode, routing::post};

use super::dto::{LoginRequest, LoginResponse};
use crate::config::{APP_CONFIG, JWT_EXPIRED_TIME};
use crate::repositories::UserRepository;
use crate::utils::jwt::JwtManager;

pub fn create_route() -> Router {
    Router::new().route("/api/v1/auth/login", post(login))
}

/// Login endpoint - returns JWT token
#[utoipa::path(
    post,
    path = "/api/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid credentials"),
        (status = 500, description = "Internal server error")
    ),
    tag = "Authentication"
)]
pub async fn login(
    Json(payload): Json<LoginRequest>,
) -> Result<(StatusCode, Json<LoginResponse>), (StatusCode, String)> {
    let user_repo = UserRepository::new();

    let user_info = user_repo
        .find_by_username(payload.username.trim())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?
        .ok_or_else(|| {
            (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
            )
        })?;

    let password_valid = bcrypt::verify(&payload.password, &user_info.password).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Password verification error: {}", e),
        )
    })?;

    if !password_valid {
        return Err((
            StatusCode::UNAUTHORIZED,
            "Invalid username or password".to_string(),
        ));
    }

    let access_token = JwtManager::new(&APP_CONFIG.jwt_secret)
        .create_token(
            user_info.id,
            &user_info.username,
            user_info.is_staff,
            JWT_EXPIRED_TIME,
        )
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create token: {}", e),
            )
        })?;

    tracing::info!("User {} logged in", user_info.username);

    Ok((
        StatusCode::OK,
        Json(LoginResponse {
            access_token,
            token_type: "Bearer".to_string(),
            expires_in: JWT_EXPIRED_TIME,
            user_id: user_info.id,
            username: user_info.username,
            is_staff: user_info.is_staff,
        }),
    ))
}
