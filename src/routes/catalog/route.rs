use axum::{Json, Router, http::StatusCode, routing::get};
use std::collections::HashSet;

use super::dto::{
    ClassGroupResponse, CreateClassGroupRequest, CreateSubjectRequest, CreateTeacherRequest,
    CreateTimetableRequest, CreateWeekRequest, SubjectResponse, TeacherResponse,
    TimetableResponse, WeekResponse,
};
use crate::extractor::AuthClaims;
use crate::repositories::{
    CatalogRepository, NewTeacher, NewTimetable, TeacherRepository, TimetableRepository,
    UserRepository,
};

pub fn create_route() -> Router {
    Router::new()
        .route("/admin/subjects/", get(list_subjects).post(create_subject))
        .route(
            "/admin/class-groups/",
            get(list_class_groups).post(create_class_group),
        )
        .route("/admin/weeks/", get(list_weeks).post(create_week))
        .route(
            "/admin/timetables/",
            get(list_timetables).post(create_timetable),
        )
        .route("/admin/teachers/", get(list_teachers).post(create_teacher))
}

fn bad_request(message: &str) -> (StatusCode, String) {
    (StatusCode::BAD_REQUEST, message.to_string())
}

fn unique_ids(ids: &[i32]) -> Vec<i32> {
    let mut seen = HashSet::new();
    ids.iter().copied().filter(|id| seen.insert(*id)).collect()
}

/// Reject any id that does not exist in the catalog
async fn ensure_catalog_ids(
    catalog_repo: &CatalogRepository<'_>,
    subject_ids: &[i32],
    class_group_ids: &[i32],
) -> Result<(), (StatusCode, String)> {
    let subjects = catalog_repo
        .find_subjects_by_ids(subject_ids.to_vec())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load subjects: {}", e),
            )
        })?;
    if subjects.len() != subject_ids.len() {
        return Err(bad_request("Unknown subject id"));
    }

    let classes = catalog_repo
        .find_class_groups_by_ids(class_group_ids.to_vec())
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?;
    if classes.len() != class_group_ids.len() {
        return Err(bad_request("Unknown class group id"));
    }

    Ok(())
}

/// List subjects (staff only)
#[utoipa::path(
    get,
    path = "/admin/subjects/",
    responses(
        (status = 200, description = "Subjects", body = [SubjectResponse]),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_subjects(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<Vec<SubjectResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let subjects = CatalogRepository::new()
        .find_all_subjects()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get subjects: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(subjects.into_iter().map(Into::into).collect()),
    ))
}

/// Create a subject (staff only)
#[utoipa::path(
    post,
    path = "/admin/subjects/",
    request_body = CreateSubjectRequest,
    responses(
        (status = 201, description = "Subject created", body = SubjectResponse),
        (status = 400, description = "Bad request"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_subject(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateSubjectRequest>,
) -> Result<(StatusCode, Json<SubjectResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(bad_request("Subject name is required"));
    }

    let subject = CatalogRepository::new()
        .create_subject(name)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create subject: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(subject.into())))
}

/// List class groups (staff only)
#[utoipa::path(
    get,
    path = "/admin/class-groups/",
    responses(
        (status = 200, description = "Class groups", body = [ClassGroupResponse]),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_class_groups(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<Vec<ClassGroupResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let classes = CatalogRepository::new()
        .find_all_class_groups()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get class groups: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(classes.into_iter().map(Into::into).collect()),
    ))
}

/// Create a class group with an optional class teacher (staff only)
#[utoipa::path(
    post,
    path = "/admin/class-groups/",
    request_body = CreateClassGroupRequest,
    responses(
        (status = 201, description = "Class group created", body = ClassGroupResponse),
        (status = 400, description = "Unknown teacher or teacher already has a class"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_class_group(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateClassGroupRequest>,
) -> Result<(StatusCode, Json<ClassGroupResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let name = payload.name.trim().to_string();
    if name.is_empty() {
        return Err(bad_request("Class group name is required"));
    }

    let catalog_repo = CatalogRepository::new();

    if let Some(teacher_id) = payload.class_teacher {
        let teacher = TeacherRepository::new()
            .find_by_id(teacher_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load teacher: {}", e),
                )
            })?;
        if teacher.is_none() {
            return Err(bad_request("Unknown class teacher"));
        }

        let taken = catalog_repo
            .find_class_group_by_teacher(teacher_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load class groups: {}", e),
                )
            })?;
        if taken.is_some() {
            return Err(bad_request("This teacher is already a class teacher"));
        }
    }

    let class = catalog_repo
        .create_class_group(name, payload.class_teacher)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create class group: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(class.into())))
}

/// List weeks (staff only)
#[utoipa::path(
    get,
    path = "/admin/weeks/",
    responses(
        (status = 200, description = "Weeks", body = [WeekResponse]),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_weeks(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<Vec<WeekResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let weeks = CatalogRepository::new()
        .find_all_weeks()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to get weeks: {}", e),
            )
        })?;

    Ok((
        StatusCode::OK,
        Json(weeks.into_iter().map(Into::into).collect()),
    ))
}

/// Create a week (staff only)
#[utoipa::path(
    post,
    path = "/admin/weeks/",
    request_body = CreateWeekRequest,
    responses(
        (status = 201, description = "Week created", body = WeekResponse),
        (status = 400, description = "Start date after end date"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_week(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateWeekRequest>,
) -> Result<(StatusCode, Json<WeekResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    if payload.start_date > payload.end_date {
        return Err(bad_request("Start date must not be after end date"));
    }

    let week = CatalogRepository::new()
        .create_week(payload.number, payload.start_date, payload.end_date)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create week: {}", e),
            )
        })?;

    Ok((StatusCode::CREATED, Json(week.into())))
}

/// List timetable slots (staff only)
#[utoipa::path(
    get,
    path = "/admin/timetables/",
    responses(
        (status = 200, description = "Timetable slots", body = [TimetableResponse]),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_timetables(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<Vec<TimetableResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let timetable_repo = TimetableRepository::new();

    let slots = timetable_repo.find_all().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get timetables: {}", e),
        )
    })?;
    let slot_ids: Vec<i32> = slots.iter().map(|s| s.id).collect();
    let mut classes_by_slot = timetable_repo
        .class_groups_for(&slot_ids)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?;

    let response = slots
        .into_iter()
        .map(|slot| {
            let class_ids = classes_by_slot
                .remove(&slot.id)
                .unwrap_or_default()
                .into_iter()
                .map(|c| c.id)
                .collect();
            TimetableResponse::new(slot, class_ids)
        })
        .collect();

    Ok((StatusCode::OK, Json(response)))
}

/// Create a timetable slot (staff only)
#[utoipa::path(
    post,
    path = "/admin/timetables/",
    request_body = CreateTimetableRequest,
    responses(
        (status = 201, description = "Timetable slot created", body = TimetableResponse),
        (status = 400, description = "Invalid times or unknown references"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_timetable(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateTimetableRequest>,
) -> Result<(StatusCode, Json<TimetableResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    if payload.start_time >= payload.end_time {
        return Err(bad_request("Start time must be before end time"));
    }

    let teacher = TeacherRepository::new()
        .find_by_id(payload.teacher)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load teacher: {}", e),
            )
        })?;
    if teacher.is_none() {
        return Err(bad_request("Unknown teacher"));
    }

    let subject_ids: Vec<i32> = payload.subject.into_iter().collect();
    let class_group_ids = unique_ids(&payload.class_groups);
    ensure_catalog_ids(&CatalogRepository::new(), &subject_ids, &class_group_ids).await?;

    let slot = TimetableRepository::new()
        .create(NewTimetable {
            subject_id: payload.subject,
            teacher_id: payload.teacher,
            day: payload.day,
            start_time: payload.start_time,
            end_time: payload.end_time,
            class_group_ids: class_group_ids.clone(),
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create timetable: {}", e),
            )
        })?;

    Ok((
        StatusCode::CREATED,
        Json(TimetableResponse::new(slot, class_group_ids)),
    ))
}

/// List teachers with their subjects and classes (staff only)
#[utoipa::path(
    get,
    path = "/admin/teachers/",
    responses(
        (status = 200, description = "Teachers", body = [TeacherResponse]),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn list_teachers(
    auth_claims: AuthClaims,
) -> Result<(StatusCode, Json<Vec<TeacherResponse>>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let teacher_repo = TeacherRepository::new();
    let teachers = teacher_repo.find_all_with_users().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to get teachers: {}", e),
        )
    })?;

    let mut response = Vec::with_capacity(teachers.len());
    for (teacher, user) in teachers {
        let subject_ids = teacher_repo
            .subjects_of(&teacher)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load subjects: {}", e),
                )
            })?
            .into_iter()
            .map(|s| s.id)
            .collect();
        let class_group_ids = teacher_repo
            .class_groups_of(&teacher)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load class groups: {}", e),
                )
            })?
            .into_iter()
            .map(|c| c.id)
            .collect();

        response.push(TeacherResponse {
            id: teacher.id,
            user_id: teacher.user_id,
            username: user.as_ref().map(|u| u.username.clone()).unwrap_or_default(),
            name: user
                .as_ref()
                .map(|u| u.display_name())
                .unwrap_or_else(|| format!("Teacher {}", teacher.id)),
            is_class_teacher: teacher.is_class_teacher,
            profile_picture: teacher.profile_picture,
            subject_ids,
            class_group_ids,
        });
    }

    Ok((StatusCode::OK, Json(response)))
}

/// Create a teacher together with its login account (staff only)
#[utoipa::path(
    post,
    path = "/admin/teachers/",
    request_body = CreateTeacherRequest,
    responses(
        (status = 201, description = "Teacher created", body = TeacherResponse),
        (status = 400, description = "Username taken or unknown references"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Catalog"
)]
pub async fn create_teacher(
    auth_claims: AuthClaims,
    Json(payload): Json<CreateTeacherRequest>,
) -> Result<(StatusCode, Json<TeacherResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let username = payload.username.trim().to_string();
    if username.is_empty() || payload.password.is_empty() {
        return Err(bad_request("Username and password are required"));
    }

    let existing = UserRepository::new()
        .find_by_username(&username)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Database error: {}", e),
            )
        })?;
    if existing.is_some() {
        return Err(bad_request("Username already exists"));
    }

    let subject_ids = unique_ids(&payload.subjects);
    let class_group_ids = unique_ids(&payload.class_groups);
    ensure_catalog_ids(&CatalogRepository::new(), &subject_ids, &class_group_ids).await?;

    let password_hash = bcrypt::hash(&payload.password, bcrypt::DEFAULT_COST).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to hash password: {}", e),
        )
    })?;

    let (teacher, user) = TeacherRepository::new()
        .create_with_user(NewTeacher {
            username,
            password_hash,
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            is_class_teacher: payload.is_class_teacher,
            subject_ids: subject_ids.clone(),
            class_group_ids: class_group_ids.clone(),
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create teacher: {}", e),
            )
        })?;

    tracing::info!(
        "Staff user {} created teacher {} ({})",
        auth_claims.0.username,
        teacher.id,
        user.username
    );

    Ok((
        StatusCode::CREATED,
        Json(TeacherResponse {
            id: teacher.id,
            user_id: user.id,
            name: user.display_name(),
            username: user.username,
            is_class_teacher: teacher.is_class_teacher,
            profile_picture: teacher.profile_picture,
            subject_ids,
            class_group_ids,
        }),
    ))
}
