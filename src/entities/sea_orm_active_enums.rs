//! `SeaORM` active enums stored as plain strings

use sea_orm::entity::prelude::*;
use sea_orm::sea_query::StringLen;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(3))")]
pub enum DayOfWeek {
    #[sea_orm(string_value = "Mon")]
    Mon,
    #[sea_orm(string_value = "Tue")]
    Tue,
    #[sea_orm(string_value = "Wed")]
    Wed,
    #[sea_orm(string_value = "Thu")]
    Thu,
    #[sea_orm(string_value = "Fri")]
    Fri,
}

impl DayOfWeek {
    pub fn display_name(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Monday",
            DayOfWeek::Tue => "Tuesday",
            DayOfWeek::Wed => "Wednesday",
            DayOfWeek::Thu => "Thursday",
            DayOfWeek::Fri => "Friday",
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            DayOfWeek::Mon => "Mon",
            DayOfWeek::Tue => "Tue",
            DayOfWeek::Wed => "Wed",
            DayOfWeek::Thu => "Thu",
            DayOfWeek::Fri => "Fri",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum LessonStatus {
    #[sea_orm(string_value = "Pending")]
    Pending,
    #[sea_orm(string_value = "Attended")]
    Attended,
    #[sea_orm(string_value = "Not Attended")]
    #[serde(rename = "Not Attended")]
    NotAttended,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(20))")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "Unpaid")]
    Unpaid,
    #[sea_orm(string_value = "Paid")]
    Paid,
}
