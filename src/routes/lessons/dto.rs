use crate::entities::{
    lesson_record,
    sea_orm_active_enums::{LessonStatus, PaymentStatus},
};
use crate::routes::params::optional_id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddLessonRequest {
    /// Timetable slot id, must be one of the teacher's own
    #[schema(example = 3)]
    pub timetable: i32,

    #[schema(example = 1)]
    pub week: i32,

    /// Defaults to 400 when omitted
    #[schema(value_type = Option<String>, example = "400.00")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct SwapLessonRequest {
    /// Substitute teacher id, or null to clear
    #[schema(example = 5)]
    pub teacher_id: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateLessonRequest {
    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,
    #[schema(value_type = Option<String>, example = "450.00")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct AdminLessonsQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub week: Option<i32>,
    /// Timetable owner
    #[serde(default, deserialize_with = "optional_id")]
    pub teacher: Option<i32>,
    #[serde(default, deserialize_with = "optional_id")]
    pub class_group: Option<i32>,
    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateLessonRequest {
    /// Recording teacher; the slot's teacher when omitted
    #[schema(example = 2)]
    pub created_by: Option<i32>,

    #[schema(example = 3)]
    pub timetable: i32,

    #[schema(example = 1)]
    pub week: i32,

    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,

    #[schema(value_type = Option<String>, example = "400.00")]
    pub amount: Option<Decimal>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonResponse {
    pub id: i32,
    pub timetable_id: i32,
    pub week_id: i32,
    pub created_by: i32,
    pub swapped_with: Option<i32>,
    pub status: LessonStatus,
    pub payment_status: PaymentStatus,
    #[schema(value_type = String, example = "400.00")]
    pub amount: Decimal,
}

impl From<lesson_record::Model> for LessonResponse {
    fn from(lesson: lesson_record::Model) -> Self {
        Self {
            id: lesson.id,
            timetable_id: lesson.timetable_id,
            week_id: lesson.week_id,
            created_by: lesson.created_by,
            swapped_with: lesson.swapped_with,
            status: lesson.status,
            payment_status: lesson.payment_status,
            amount: lesson.amount,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
