use crate::entities::sea_orm_active_enums::{LessonStatus, PaymentStatus};
use crate::reports::LessonStats;
use crate::routes::params::optional_id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Default, Clone, Copy, Deserialize, Serialize, ToSchema, IntoParams)]
pub struct DashboardFilter {
    /// Week id
    #[serde(default, deserialize_with = "optional_id")]
    pub week: Option<i32>,
    /// Class group id
    #[serde(default, deserialize_with = "optional_id")]
    pub class_group: Option<i32>,
    /// Subject id
    #[serde(default, deserialize_with = "optional_id")]
    pub subject: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherSummary {
    pub id: i32,
    pub name: String,
    pub profile_picture: Option<String>,
    pub is_class_teacher: bool,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OptionItem {
    pub id: i32,
    pub label: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LessonRow {
    pub id: i32,
    pub timetable_id: i32,
    pub slot: String,
    pub week_id: i32,
    pub week: String,
    pub status: LessonStatus,
    pub payment_status: PaymentStatus,
    #[schema(value_type = String, example = "400.00")]
    pub amount: Decimal,
    pub swapped_with: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardResponse {
    pub teacher: TeacherSummary,
    pub filters: DashboardFilter,
    pub weeks: Vec<OptionItem>,
    pub class_groups: Vec<OptionItem>,
    pub subjects: Vec<OptionItem>,
    pub lessons: Vec<LessonRow>,
    pub stats: LessonStats,
}
