use axum::{
    Json, Router,
    extract::Query,
    http::StatusCode,
    routing::get,
};
use std::collections::HashMap;

use super::dto::{DashboardFilter, DashboardResponse, LessonRow, OptionItem, TeacherSummary};
use crate::entities::teacher;
use crate::extractor::CurrentTeacher;
use crate::reports::{LessonStats, slot_display};
use crate::repositories::{
    CatalogRepository, LessonFilter, LessonRepository, TeacherRepository, TimetableRepository,
    UserRepository,
};

pub fn create_route() -> Router {
    Router::new().route(
        "/teacher/dashboard/",
        get(get_dashboard).post(filter_dashboard),
    )
}

fn internal(context: &'static str) -> impl Fn(anyhow::Error) -> (StatusCode, String) {
    move |e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load {}: {}", context, e),
        )
    }
}

/// Teacher dashboard with lesson counts, filtered by query string
#[utoipa::path(
    get,
    path = "/teacher/dashboard/",
    params(DashboardFilter),
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn get_dashboard(
    CurrentTeacher { teacher }: CurrentTeacher,
    Query(filter): Query<DashboardFilter>,
) -> Result<(StatusCode, Json<DashboardResponse>), (StatusCode, String)> {
    build_dashboard(teacher, filter).await
}

/// Same dashboard, with the filters sent as a JSON body
#[utoipa::path(
    post,
    path = "/teacher/dashboard/",
    request_body = DashboardFilter,
    responses(
        (status = 200, description = "Dashboard data", body = DashboardResponse),
        (status = 401, description = "Unauthorized"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Dashboard"
)]
pub async fn filter_dashboard(
    CurrentTeacher { teacher }: CurrentTeacher,
    Json(filter): Json<DashboardFilter>,
) -> Result<(StatusCode, Json<DashboardResponse>), (StatusCode, String)> {
    build_dashboard(teacher, filter).await
}

async fn build_dashboard(
    teacher: teacher::Model,
    filter: DashboardFilter,
) -> Result<(StatusCode, Json<DashboardResponse>), (StatusCode, String)> {
    let teacher_repo = TeacherRepository::new();
    let catalog_repo = CatalogRepository::new();
    let timetable_repo = TimetableRepository::new();
    let lesson_repo = LessonRepository::new();

    let lessons = lesson_repo
        .find_for_teacher(
            teacher.id,
            LessonFilter {
                week_id: filter.week,
                class_group_id: filter.class_group,
                subject_id: filter.subject,
            },
        )
        .await
        .map_err(internal("lessons"))?;

    let stats = LessonStats::from_records(&lessons);

    let slots = timetable_repo
        .find_by_teacher(teacher.id)
        .await
        .map_err(internal("timetables"))?;
    let slot_ids: Vec<i32> = slots.iter().map(|s| s.id).collect();
    let classes_by_slot = timetable_repo
        .class_groups_for(&slot_ids)
        .await
        .map_err(internal("class groups"))?;

    let subject_names: HashMap<i32, String> = catalog_repo
        .find_all_subjects()
        .await
        .map_err(internal("subjects"))?
        .into_iter()
        .map(|s| (s.id, s.name))
        .collect();
    let weeks = catalog_repo
        .find_all_weeks()
        .await
        .map_err(internal("weeks"))?;
    let week_labels: HashMap<i32, String> = weeks.iter().map(|w| (w.id, w.label())).collect();

    let slot_labels: HashMap<i32, String> = slots
        .iter()
        .map(|slot| {
            let subject = slot
                .subject_id
                .and_then(|id| subject_names.get(&id))
                .map(String::as_str);
            let classes = classes_by_slot
                .get(&slot.id)
                .map(Vec::as_slice)
                .unwrap_or_default();
            (slot.id, slot_display(slot, subject, classes))
        })
        .collect();

    let lesson_rows = lessons
        .into_iter()
        .map(|lesson| LessonRow {
            id: lesson.id,
            timetable_id: lesson.timetable_id,
            slot: slot_labels
                .get(&lesson.timetable_id)
                .cloned()
                .unwrap_or_default(),
            week_id: lesson.week_id,
            week: week_labels.get(&lesson.week_id).cloned().unwrap_or_default(),
            status: lesson.status,
            payment_status: lesson.payment_status,
            amount: lesson.amount,
            swapped_with: lesson.swapped_with,
        })
        .collect();

    let class_groups = teacher_repo
        .class_groups_of(&teacher)
        .await
        .map_err(internal("class groups"))?
        .into_iter()
        .map(|c| OptionItem {
            id: c.id,
            label: c.name,
        })
        .collect();
    let subjects = teacher_repo
        .subjects_of(&teacher)
        .await
        .map_err(internal("subjects"))?
        .into_iter()
        .map(|s| OptionItem {
            id: s.id,
            label: s.name,
        })
        .collect();

    let name = UserRepository::new()
        .find_by_id(teacher.user_id)
        .await
        .map_err(internal("user"))?
        .map(|u| u.display_name())
        .unwrap_or_else(|| format!("Teacher {}", teacher.id));

    let response = DashboardResponse {
        teacher: TeacherSummary {
            id: teacher.id,
            name,
            profile_picture: teacher.profile_picture.clone(),
            is_class_teacher: teacher.is_class_teacher,
        },
        filters: filter,
        weeks: weeks
            .into_iter()
            .map(|w| OptionItem {
                id: w.id,
                label: w.label(),
            })
            .collect(),
        class_groups,
        subjects,
        lessons: lesson_rows,
        stats,
    };

    Ok((StatusCode::OK, Json(response)))
}
