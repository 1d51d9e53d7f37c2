use crate::entities::{class_group, sea_orm_active_enums::DayOfWeek, subject, timetable, week};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateSubjectRequest {
    #[schema(example = "Mathematics")]
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SubjectResponse {
    pub id: i32,
    pub name: String,
}

impl From<subject::Model> for SubjectResponse {
    fn from(subject: subject::Model) -> Self {
        Self {
            id: subject.id,
            name: subject.name,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateClassGroupRequest {
    #[schema(example = "Form 2A")]
    pub name: String,
    /// Teacher id of the class teacher
    pub class_teacher: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassGroupResponse {
    pub id: i32,
    pub name: String,
    pub class_teacher_id: Option<i32>,
}

impl From<class_group::Model> for ClassGroupResponse {
    fn from(class: class_group::Model) -> Self {
        Self {
            id: class.id,
            name: class.name,
            class_teacher_id: class.class_teacher_id,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateWeekRequest {
    #[schema(example = 3)]
    pub number: i32,
    #[schema(value_type = String, example = "2025-01-20")]
    pub start_date: NaiveDate,
    #[schema(value_type = String, example = "2025-01-24")]
    pub end_date: NaiveDate,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct WeekResponse {
    pub id: i32,
    pub number: i32,
    #[schema(value_type = String)]
    pub start_date: NaiveDate,
    #[schema(value_type = String)]
    pub end_date: NaiveDate,
    pub label: String,
}

impl From<week::Model> for WeekResponse {
    fn from(week: week::Model) -> Self {
        Self {
            label: week.label(),
            id: week.id,
            number: week.number,
            start_date: week.start_date,
            end_date: week.end_date,
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTimetableRequest {
    pub subject: Option<i32>,
    pub teacher: i32,
    #[serde(default)]
    pub class_groups: Vec<i32>,
    pub day: DayOfWeek,
    #[schema(value_type = String, example = "08:00")]
    pub start_time: NaiveTime,
    #[schema(value_type = String, example = "09:00")]
    pub end_time: NaiveTime,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TimetableResponse {
    pub id: i32,
    pub subject_id: Option<i32>,
    pub teacher_id: i32,
    pub class_group_ids: Vec<i32>,
    pub day: DayOfWeek,
    #[schema(example = "08:00")]
    pub start_time: String,
    #[schema(example = "09:00")]
    pub end_time: String,
}

impl TimetableResponse {
    pub fn new(slot: timetable::Model, class_group_ids: Vec<i32>) -> Self {
        Self {
            id: slot.id,
            subject_id: slot.subject_id,
            teacher_id: slot.teacher_id,
            class_group_ids,
            day: slot.day,
            start_time: crate::reports::format_time(slot.start_time),
            end_time: crate::reports::format_time(slot.end_time),
        }
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CreateTeacherRequest {
    #[schema(example = "jwanjiku")]
    pub username: String,
    #[schema(example = "password123")]
    pub password: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub is_class_teacher: bool,
    #[serde(default)]
    pub subjects: Vec<i32>,
    #[serde(default)]
    pub class_groups: Vec<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TeacherResponse {
    pub id: i32,
    pub user_id: i32,
    pub username: String,
    pub name: String,
    pub is_class_teacher: bool,
    pub profile_picture: Option<String>,
    pub subject_ids: Vec<i32>,
    pub class_group_ids: Vec<i32>,
}
