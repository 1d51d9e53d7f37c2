use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::entities::sea_orm_active_enums::{DayOfWeek, LessonStatus, PaymentStatus};
use crate::reports::{AdminPaymentSummary, ClassPaymentStats, ClassPaymentSummary, FeeStatus, LessonStats};
use crate::routes::{
    admin_payments, auth, catalog, dashboard, health, lessons, profile, students, timetables,
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    info(title = "Remedial Service API", description = "Remedial lesson tracking and student fee payments"),
    paths(
        health::route::health,
        auth::route::login,
        lessons::route::add_lesson,
        lessons::route::mark_attended,
        lessons::route::swap_lesson,
        lessons::route::list_lessons,
        lessons::route::create_lesson,
        lessons::route::update_lesson,
        dashboard::route::get_dashboard,
        dashboard::route::filter_dashboard,
        timetables::route::load_timetables,
        timetables::route::teacher_subjects,
        timetables::route::filter_timetables,
        profile::route::update_profile_picture,
        students::route::get_student_payments,
        students::route::record_student_payments,
        students::route::add_student,
        students::route::edit_student,
        students::route::delete_student,
        students::route::import_students,
        admin_payments::route::admin_payments,
        admin_payments::route::export_payments,
        catalog::route::list_subjects,
        catalog::route::create_subject,
        catalog::route::list_class_groups,
        catalog::route::create_class_group,
        catalog::route::list_weeks,
        catalog::route::create_week,
        catalog::route::list_timetables,
        catalog::route::create_timetable,
        catalog::route::list_teachers,
        catalog::route::create_teacher,
    ),
    components(schemas(
        DayOfWeek,
        LessonStatus,
        PaymentStatus,
        FeeStatus,
        LessonStats,
        ClassPaymentSummary,
        ClassPaymentStats,
        AdminPaymentSummary,
        health::route::HealthResponse,
        auth::dto::LoginRequest,
        auth::dto::LoginResponse,
        lessons::dto::AddLessonRequest,
        lessons::dto::SwapLessonRequest,
        lessons::dto::UpdateLessonRequest,
        lessons::dto::CreateLessonRequest,
        lessons::dto::LessonResponse,
        lessons::dto::ErrorResponse,
        dashboard::dto::DashboardFilter,
        dashboard::dto::DashboardResponse,
        dashboard::dto::TeacherSummary,
        dashboard::dto::OptionItem,
        dashboard::dto::LessonRow,
        timetables::dto::TimetableItem,
        timetables::dto::TeacherSubjectItem,
        timetables::dto::TeacherSubjectsResponse,
        timetables::dto::TimetableOption,
        timetables::dto::FilterTimetablesResponse,
        profile::dto::ProfilePictureResponse,
        students::dto::RecordPaymentsRequest,
        students::dto::ClassGroupItem,
        students::dto::StudentRow,
        students::dto::StudentPaymentsResponse,
        students::dto::AddStudentRequest,
        students::dto::AddStudentResponse,
        students::dto::EditStudentRequest,
        students::dto::EditStudentResponse,
        students::dto::DeleteStudentResponse,
        students::dto::BulkStudentResponse,
        students::dto::BulkStudentError,
        admin_payments::dto::PaymentRow,
        admin_payments::dto::AdminPaymentsResponse,
        catalog::dto::CreateSubjectRequest,
        catalog::dto::SubjectResponse,
        catalog::dto::CreateClassGroupRequest,
        catalog::dto::ClassGroupResponse,
        catalog::dto::CreateWeekRequest,
        catalog::dto::WeekResponse,
        catalog::dto::CreateTimetableRequest,
        catalog::dto::TimetableResponse,
        catalog::dto::CreateTeacherRequest,
        catalog::dto::TeacherResponse,
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Liveness"),
        (name = "Authentication", description = "Login and tokens"),
        (name = "Lessons", description = "Lesson recording and attendance"),
        (name = "Dashboard", description = "Teacher dashboard"),
        (name = "Timetables", description = "Dropdown lookups"),
        (name = "Profile", description = "Teacher profile picture"),
        (name = "Students", description = "Students and fee payments"),
        (name = "Admin payments", description = "School-wide payment reports"),
        (name = "Catalog", description = "Subjects, classes, weeks, timetables and teachers"),
    )
)]
pub struct ApiDoc;
