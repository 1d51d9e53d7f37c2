use axum::{
    Json, Router,
    extract::Multipart,
    http::StatusCode,
    routing::post,
};
use std::path::Path;

use super::dto::ProfilePictureResponse;
use crate::config::APP_CONFIG;
use crate::extractor::CurrentTeacher;
use crate::repositories::TeacherRepository;
use crate::utils::upload::{remove_media_file, save_profile_picture};

pub fn create_route() -> Router {
    Router::new().route(
        "/teacher/update-profile-picture/",
        post(update_profile_picture),
    )
}

/// Replace or delete the current teacher's profile picture
#[utoipa::path(
    post,
    path = "/teacher/update-profile-picture/",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form data with fields: profile_picture (binary) or delete_picture (any value)"),
    responses(
        (status = 200, description = "Picture updated", body = ProfilePictureResponse),
        (status = 400, description = "No file provided"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Profile"
)]
pub async fn update_profile_picture(
    CurrentTeacher { teacher }: CurrentTeacher,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ProfilePictureResponse>), (StatusCode, String)> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut delete_requested = false;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart: {}", e),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        match name.as_str() {
            "profile_picture" => {
                let file_name = field.file_name().unwrap_or("picture").to_string();
                let data = field.bytes().await.map_err(|e| {
                    (
                        StatusCode::BAD_REQUEST,
                        format!("Failed to read file: {}", e),
                    )
                })?;
                if !data.is_empty() {
                    upload = Some((file_name, data.to_vec()));
                }
            }
            "delete_picture" => delete_requested = true,
            _ => {}
        }
    }

    let media_root = Path::new(&APP_CONFIG.media_root);
    let old_picture = teacher.profile_picture.clone();

    // An uploaded file takes precedence over a delete request
    let new_picture = match upload {
        Some((file_name, data)) => {
            let stored = save_profile_picture(media_root, &file_name, &data)
                .await
                .map_err(|e| {
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        format!("Failed to store picture: {}", e),
                    )
                })?;
            Some(stored)
        }
        None if delete_requested => None,
        None => return Err((StatusCode::BAD_REQUEST, "No file provided".to_string())),
    };

    let updated = match TeacherRepository::new()
        .update_profile_picture(teacher, new_picture.clone())
        .await
    {
        Ok(updated) => updated,
        Err(e) => {
            if let Some(stored) = new_picture.as_deref() {
                if let Err(remove_err) = remove_media_file(media_root, stored).await {
                    tracing::warn!("Failed to remove unused picture {}: {}", stored, remove_err);
                }
            }
            return Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update profile picture: {}", e),
            ));
        }
    };

    if let Some(old) = old_picture.as_deref() {
        if let Err(e) = remove_media_file(media_root, old).await {
            tracing::warn!("Failed to remove old profile picture {}: {}", old, e);
        }
    }

    tracing::info!(
        "Teacher {} profile picture set to {:?}",
        updated.id,
        updated.profile_picture
    );

    Ok((
        StatusCode::OK,
        Json(ProfilePictureResponse {
            teacher_id: updated.id,
            profile_picture: updated.profile_picture,
        }),
    ))
}
