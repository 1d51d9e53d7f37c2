use crate::routes::params::optional_id;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct LoadTimetablesQuery {
    /// Teacher id; no teacher means no slots
    #[serde(default, deserialize_with = "optional_id")]
    pub teacher: Option<i32>,
}

#[derive(Debug, Deserialize, IntoParams)]
pub struct FilterTimetablesQuery {
    #[serde(default, deserialize_with = "optional_id")]
    pub teacher: Option<i32>,
    /// Slots already recorded in this week are left out
    #[serde(default, deserialize_with = "optional_id")]
    pub week: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableItem {
    pub id: i32,
    #[schema(example = "Mathematics")]
    pub subject: String,
    #[schema(example = "Monday")]
    pub day: String,
    #[schema(example = "08:00")]
    pub start_time: String,
    #[schema(example = "09:00")]
    pub end_time: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherSubjectItem {
    /// Timetable slot id
    pub id: i32,
    pub subject: Option<String>,
    #[schema(example = "Form 2A, Form 2B")]
    pub class_groups: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherSubjectsResponse {
    pub subjects: Vec<TeacherSubjectItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableOption {
    pub id: i32,
    #[schema(example = "Mathematics - Monday 08:00 (Form 2A)")]
    pub display: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct FilterTimetablesResponse {
    pub timetables: Vec<TimetableOption>,
}
