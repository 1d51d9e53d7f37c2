use crate::reports::AdminPaymentSummary;
use crate::routes::params::optional_id;
use crate::routes::students::dto::{ClassGroupItem, StudentRow};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct AdminPaymentsQuery {
    /// Class group id; unknown ids show every student
    #[serde(rename = "class", default, deserialize_with = "optional_id")]
    pub class_group: Option<i32>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct PaymentRow {
    pub id: i32,
    pub student_id: i32,
    pub student_name: String,
    #[schema(value_type = String)]
    pub amount: Decimal,
    pub date_paid: NaiveDate,
    pub term: String,
    pub recorded_by: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AdminPaymentsResponse {
    pub class_groups: Vec<ClassGroupItem>,
    /// The applied class filter, null when showing everyone
    pub selected_class: Option<i32>,
    pub students: Vec<StudentRow>,
    pub summary: AdminPaymentSummary,
    pub payments: Vec<PaymentRow>,
}
