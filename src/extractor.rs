use axum::{RequestPartsExt, extract::FromRequestParts, http::request::Parts};
use axum_extra::TypedHeader;
use axum_extra::headers::{Authorization, authorization::Bearer};
use http::StatusCode;

use crate::config::APP_CONFIG;
use crate::entities::teacher;
use crate::repositories::TeacherRepository;
use crate::utils::jwt::{JwtManager, TokenClaims};

/// Claims of the bearer token on the request
pub struct AuthClaims(pub TokenClaims);

impl<S> FromRequestParts<S> for AuthClaims
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) = parts
            .extract::<TypedHeader<Authorization<Bearer>>>()
            .await
            .map_err(|_| {
                (
                    StatusCode::UNAUTHORIZED,
                    "Missing or invalid Authorization header".to_string(),
                )
            })?;

        let claims = JwtManager::new(&APP_CONFIG.jwt_secret)
            .decode_token(bearer.token())
            .map_err(|e| {
                tracing::debug!("Rejected bearer token: {}", e);
                (StatusCode::UNAUTHORIZED, "Invalid or expired token".to_string())
            })?;

        Ok(AuthClaims(claims))
    }
}

impl AuthClaims {
    pub fn require_staff(&self) -> Result<(), (StatusCode, String)> {
        if self.0.is_staff {
            Ok(())
        } else {
            Err((StatusCode::FORBIDDEN, "Staff members only".to_string()))
        }
    }
}

/// The authenticated user's teacher profile
pub struct CurrentTeacher {
    pub teacher: teacher::Model,
}

impl<S> FromRequestParts<S> for CurrentTeacher
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, String);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let AuthClaims(claims) = AuthClaims::from_request_parts(parts, state).await?;

        let teacher = TeacherRepository::new()
            .find_by_user_id(claims.sub)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load teacher profile: {}", e),
                )
            })?
            .ok_or_else(|| {
                (
                    StatusCode::NOT_FOUND,
                    "Teacher profile not found".to_string(),
                )
            })?;

        Ok(CurrentTeacher { teacher })
    }
}
