use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;

use super::dto::{
    FilterTimetablesQuery, FilterTimetablesResponse, LoadTimetablesQuery, TeacherSubjectItem,
    TeacherSubjectsResponse, TimetableItem, TimetableOption,
};
use crate::extractor::{AuthClaims, CurrentTeacher};
use crate::reports::timetables::{class_names, subject_label};
use crate::reports::{format_time, slot_display};
use crate::repositories::{CatalogRepository, TimetableRepository};

pub fn create_route() -> Router {
    Router::new()
        .route("/ajax/load-timetables/", get(load_timetables))
        .route("/ajax/teacher_subjects/", get(teacher_subjects))
        .route("/filter_timetables/", get(filter_timetables))
}

async fn subject_names() -> Result<HashMap<i32, String>, (StatusCode, String)> {
    let subjects = CatalogRepository::new()
        .find_all_subjects()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load subjects: {}", e),
            )
        })?;
    Ok(subjects.into_iter().map(|s| (s.id, s.name)).collect())
}

/// Slots of a teacher for the lesson form dropdown
#[utoipa::path(
    get,
    path = "/ajax/load-timetables/",
    params(LoadTimetablesQuery),
    responses(
        (status = 200, description = "Timetable slots", body = [TimetableItem]),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetables"
)]
pub async fn load_timetables(
    AuthClaims(_auth_claims): AuthClaims,
    Query(query): Query<LoadTimetablesQuery>,
) -> Result<(StatusCode, Json<Vec<TimetableItem>>), (StatusCode, String)> {
    let Some(teacher_id) = query.teacher else {
        return Ok((StatusCode::OK, Json(Vec::new())));
    };

    let slots = TimetableRepository::new()
        .find_by_teacher(teacher_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load timetables: {}", e),
            )
        })?;
    let names = subject_names().await?;

    let items = slots
        .into_iter()
        .map(|slot| TimetableItem {
            id: slot.id,
            subject: subject_label(
                slot.subject_id
                    .and_then(|id| names.get(&id))
                    .map(String::as_str),
            )
            .to_string(),
            day: slot.day.display_name().to_string(),
            start_time: format_time(slot.start_time),
            end_time: format_time(slot.end_time),
        })
        .collect();

    Ok((StatusCode::OK, Json(items)))
}

/// The current teacher's slots with the classes each one covers
#[utoipa::path(
    get,
    path = "/ajax/teacher_subjects/",
    responses(
        (status = 200, description = "Subjects by slot", body = TeacherSubjectsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetables"
)]
pub async fn teacher_subjects(
    CurrentTeacher { teacher }: CurrentTeacher,
) -> Result<(StatusCode, Json<TeacherSubjectsResponse>), (StatusCode, String)> {
    let timetable_repo = TimetableRepository::new();

    let slots = timetable_repo
        .find_by_teacher(teacher.id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load timetables: {}", e),
            )
        })?;
    let slot_ids: Vec<i32> = slots.iter().map(|s| s.id).collect();
    let classes_by_slot = timetable_repo
        .class_groups_for(&slot_ids)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?;
    let names = subject_names().await?;

    let subjects = slots
        .into_iter()
        .map(|slot| TeacherSubjectItem {
            id: slot.id,
            subject: slot.subject_id.and_then(|id| names.get(&id).cloned()),
            class_groups: class_names(
                classes_by_slot
                    .get(&slot.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            ),
        })
        .collect();

    Ok((StatusCode::OK, Json(TeacherSubjectsResponse { subjects })))
}

/// Slots of a teacher that are still free in the given week
#[utoipa::path(
    get,
    path = "/filter_timetables/",
    params(FilterTimetablesQuery),
    responses(
        (status = 200, description = "Available slots", body = FilterTimetablesResponse),
        (status = 401, description = "Unauthorized"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Timetables"
)]
pub async fn filter_timetables(
    AuthClaims(_auth_claims): AuthClaims,
    Query(query): Query<FilterTimetablesQuery>,
) -> Result<(StatusCode, Json<FilterTimetablesResponse>), (StatusCode, String)> {
    let Some(teacher_id) = query.teacher else {
        return Ok((
            StatusCode::OK,
            Json(FilterTimetablesResponse {
                timetables: Vec::new(),
            }),
        ));
    };

    let timetable_repo = TimetableRepository::new();

    let slots = timetable_repo
        .find_available_for_week(teacher_id, query.week)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load timetables: {}", e),
            )
        })?;
    let slot_ids: Vec<i32> = slots.iter().map(|s| s.id).collect();
    let classes_by_slot = timetable_repo
        .class_groups_for(&slot_ids)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?;
    let names = subject_names().await?;

    let timetables = slots
        .iter()
        .map(|slot| TimetableOption {
            id: slot.id,
            display: slot_display(
                slot,
                slot.subject_id
                    .and_then(|id| names.get(&id))
                    .map(String::as_str),
                classes_by_slot
                    .get(&slot.id)
                    .map(Vec::as_slice)
                    .unwrap_or_default(),
            ),
        })
        .collect();

    Ok((StatusCode::OK, Json(FilterTimetablesResponse { timetables })))
}
