use axum::{
    Json, Router,
    extract::{Path, Query},
    http::StatusCode,
    routing::{get, patch, post},
};

use rust_decimal::Decimal;

use super::dto::{
    AddLessonRequest, AdminLessonsQuery, CreateLessonRequest, ErrorResponse, LessonResponse,
    SwapLessonRequest, UpdateLessonRequest,
};
use crate::extractor::{AuthClaims, CurrentTeacher};
use crate::repositories::{
    AddLessonResult, AdminLessonFilter, LessonRepository, LessonUpdate, MarkAttendedResult,
    StaffLesson, SwapResult,
};

pub fn create_route() -> Router {
    Router::new()
        .route("/lesson/add/", post(add_lesson))
        .route(
            "/mark_attended/{lesson_id}/",
            get(mark_attended).post(mark_attended),
        )
        .route("/lesson/{lesson_id}/swap/", post(swap_lesson))
        .route("/admin/lessons/", get(list_lessons).post(create_lesson))
        .route("/admin/lessons/{lesson_id}/", patch(update_lesson))
}

fn reject_negative_amount(amount: Option<Decimal>) -> Result<(), (StatusCode, String)> {
    if amount.is_some_and(|amount| amount.is_sign_negative()) {
        return Err((
            StatusCode::BAD_REQUEST,
            "Amount cannot be negative".to_string(),
        ));
    }
    Ok(())
}

/// Record a lesson for one of the current teacher's timetable slots
#[utoipa::path(
    post,
    path = "/lesson/add/",
    request_body = AddLessonRequest,
    responses(
        (status = 201, description = "Lesson recorded", body = LessonResponse),
        (status = 400, description = "Duplicate lesson, foreign slot, unknown week or negative amount"),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn add_lesson(
    CurrentTeacher { teacher }: CurrentTeacher,
    Json(payload): Json<AddLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    reject_negative_amount(payload.amount)?;

    let lesson_repo = LessonRepository::new();

    let result = lesson_repo
        .add_lesson(teacher.id, payload.timetable, payload.week, payload.amount)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record lesson: {}", e),
            )
        })?;

    match result {
        AddLessonResult::Created(lesson) => Ok((StatusCode::CREATED, Json(lesson.into()))),
        other => Err((StatusCode::BAD_REQUEST, other.message().to_string())),
    }
}

/// Reset a lesson's status to Pending (owner or substitute only)
#[utoipa::path(
    post,
    path = "/mark_attended/{lesson_id}/",
    params(
        ("lesson_id" = i32, Path, description = "Lesson record ID")
    ),
    responses(
        (status = 200, description = "Lesson reset to Pending", body = LessonResponse),
        (status = 403, description = "Not allowed", body = ErrorResponse),
        (status = 404, description = "Lesson or teacher profile not found", body = ErrorResponse),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn mark_attended(
    CurrentTeacher { teacher }: CurrentTeacher,
    Path(lesson_id): Path<i32>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, Json<ErrorResponse>)> {
    let lesson_repo = LessonRepository::new();

    let result = lesson_repo
        .mark_attended(lesson_id, &teacher)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: format!("Failed to mark lesson: {}", e),
                }),
            )
        })?;

    let status = match &result {
        MarkAttendedResult::Marked(_) => StatusCode::OK,
        MarkAttendedResult::NotFound => StatusCode::NOT_FOUND,
        MarkAttendedResult::NotAllowed => StatusCode::FORBIDDEN,
    };

    match result {
        MarkAttendedResult::Marked(lesson) => Ok((status, Json(lesson.into()))),
        other => Err((
            status,
            Json(ErrorResponse {
                error: other.message().to_string(),
            }),
        )),
    }
}

/// Assign or clear the substitute teacher of a lesson
#[utoipa::path(
    post,
    path = "/lesson/{lesson_id}/swap/",
    params(
        ("lesson_id" = i32, Path, description = "Lesson record ID")
    ),
    request_body = SwapLessonRequest,
    responses(
        (status = 200, description = "Substitute updated", body = LessonResponse),
        (status = 400, description = "Invalid substitute"),
        (status = 403, description = "Only the slot owner may swap"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn swap_lesson(
    CurrentTeacher { teacher }: CurrentTeacher,
    Path(lesson_id): Path<i32>,
    Json(payload): Json<SwapLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    let lesson_repo = LessonRepository::new();

    let result = lesson_repo
        .assign_substitute(lesson_id, &teacher, payload.teacher_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update substitute: {}", e),
            )
        })?;

    match result {
        SwapResult::Assigned(lesson) => Ok((StatusCode::OK, Json(lesson.into()))),
        SwapResult::NotFound => Err((StatusCode::NOT_FOUND, result.message().to_string())),
        SwapResult::NotAllowed => Err((StatusCode::FORBIDDEN, result.message().to_string())),
        SwapResult::InvalidSubstitute => {
            Err((StatusCode::BAD_REQUEST, result.message().to_string()))
        }
    }
}

/// Lesson records of every teacher (staff only)
#[utoipa::path(
    get,
    path = "/admin/lessons/",
    params(AdminLessonsQuery),
    responses(
        (status = 200, description = "Lesson records, newest first", body = Vec<LessonResponse>),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn list_lessons(
    auth_claims: AuthClaims,
    Query(query): Query<AdminLessonsQuery>,
) -> Result<(StatusCode, Json<Vec<LessonResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let lessons = LessonRepository::new()
        .find_all(AdminLessonFilter {
            week_id: query.week,
            teacher_id: query.teacher,
            class_group_id: query.class_group,
            status: query.status,
            payment_status: query.payment_status,
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load lessons: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(lessons.into_iter().map(Into::into).collect()),
    ))
}

/// Record a lesson on behalf of a teacher (staff only)
#[utoipa::path(
    post,
    path = "/admin/lessons/",
    request_body = CreateLessonRequest,
    responses(
        (status = 201, description = "Lesson recorded", body = LessonResponse),
        (status = 400, description = "Duplicate lesson, slot not taught by that teacher, unknown week or negative amount"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn create_lesson(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;
    reject_negative_amount(payload.amount)?;

    let result = LessonRepository::new()
        .add_lesson_as_staff(StaffLesson {
            created_by: payload.created_by,
            timetable_id: payload.timetable,
            week_id: payload.week,
            status: payload.status,
            payment_status: payload.payment_status,
            amount: payload.amount,
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record lesson: {}", e),
            )
        })?;

    match result {
        AddLessonResult::Created(lesson) => {
            tracing::info!(
                "Lesson {} recorded by staff user {}",
                lesson.id,
                auth_claims.0.username
            );
            Ok((StatusCode::CREATED, Json(lesson.into())))
        }
        other => Err((StatusCode::BAD_REQUEST, other.message().to_string())),
    }
}

/// Set status, payment status or amount of a lesson (staff only)
#[utoipa::path(
    patch,
    path = "/admin/lessons/{lesson_id}/",
    params(
        ("lesson_id" = i32, Path, description = "Lesson record ID")
    ),
    request_body = UpdateLessonRequest,
    responses(
        (status = 200, description = "Lesson updated", body = LessonResponse),
        (status = 400, description = "Negative amount"),
        (status = 403, description = "Staff members only"),
        (status = 404, description = "Lesson not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Lessons"
)]
pub async fn update_lesson(
    auth_claims: AuthClaims,
    Path(lesson_id): Path<i32>,
    Json(payload): Json<UpdateLessonRequest>,
) -> Result<(StatusCode, Json<LessonResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;
    reject_negative_amount(payload.amount)?;

    let lesson_repo = LessonRepository::new();

    let updated = lesson_repo
        .update(
            lesson_id,
            LessonUpdate {
                status: payload.status,
                payment_status: payload.payment_status,
                amount: payload.amount,
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update lesson: {}", e),
            )
        })?
        .ok_or_else(|| (StatusCode::NOT_FOUND, "Lesson not found".to_string()))?;

    tracing::info!(
        "Lesson {} updated by staff user {}",
        lesson_id,
        auth_claims.0.username
    );

    Ok((StatusCode::OK, Json(updated.into())))
}
