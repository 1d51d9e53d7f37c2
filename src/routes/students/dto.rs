use crate::entities::student;
use crate::reports::{ClassPaymentSummary, FeeStatus};
use crate::routes::params::optional_id;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use utoipa::{IntoParams, ToSchema};

#[derive(Debug, Deserialize, IntoParams)]
pub struct StudentPaymentsQuery {
    /// One of the class teacher's class groups
    #[serde(default, deserialize_with = "optional_id")]
    pub class_group: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct RecordPaymentsRequest {
    #[schema(example = 2)]
    pub class_group: i32,

    /// Defaults to the configured current term
    #[schema(example = "Term 1")]
    pub term: Option<String>,

    /// Amount per student id; unparsable entries are skipped
    #[schema(value_type = HashMap<String, String>, example = json!({"12": "500.00", "13": "1500"}))]
    pub amounts: HashMap<i32, serde_json::Value>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ClassGroupItem {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentRow {
    pub id: i32,
    pub name: String,
    pub admission_number: String,
    #[schema(value_type = String)]
    pub term_fee: Decimal,
    #[schema(value_type = String)]
    pub amount_paid: Decimal,
    #[schema(value_type = String)]
    pub balance: Decimal,
    pub status: FeeStatus,
}

impl From<student::Model> for StudentRow {
    fn from(student: student::Model) -> Self {
        Self {
            id: student.id,
            name: student.full_name(),
            balance: student.balance(),
            status: FeeStatus::classify(student.amount_paid),
            admission_number: student.admission_number,
            term_fee: student.term_fee,
            amount_paid: student.amount_paid,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentPaymentsResponse {
    pub class_groups: Vec<ClassGroupItem>,
    pub selected_class_group: Option<i32>,
    pub students: Vec<StudentRow>,
    pub summary: ClassPaymentSummary,
    /// Payments written by the request, POST only
    pub recorded: usize,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddStudentRequest {
    #[schema(example = "Amina")]
    pub first_name: String,
    #[schema(example = "Otieno")]
    pub last_name: String,
    #[schema(example = "ADM-2025-014")]
    pub admission_number: String,
    #[schema(example = 2)]
    pub class_group: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AddStudentResponse {
    pub id: i32,
    pub name: String,
    /// Balance with two decimals
    #[schema(example = "1500.00")]
    pub balance: String,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct EditStudentRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admission_number: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EditStudentResponse {
    pub id: i32,
    pub name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DeleteStudentResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkStudentResponse {
    pub total_records: usize,
    pub successful: usize,
    pub failed: usize,
    pub errors: Vec<BulkStudentError>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct BulkStudentError {
    pub row: usize,
    pub admission_number: String,
    pub error: String,
}

#[derive(Debug)]
pub struct ExcelStudentRow {
    pub first_name: String,
    pub last_name: String,
    pub admission_number: String,
    pub class_group: String,
}

impl ExcelStudentRow {
    pub fn validate(&self) -> Result<(), String> {
        if self.first_name.trim().is_empty() || self.last_name.trim().is_empty() {
            return Err("First and last name are required".to_string());
        }
        if self.admission_number.trim().is_empty() {
            return Err("Admission number is required".to_string());
        }
        if self.admission_number.trim().len() > 20 {
            return Err("Admission number is longer than 20 characters".to_string());
        }
        if self.class_group.trim().is_empty() {
            return Err("Class group is required".to_string());
        }
        Ok(())
    }
}

/// Lenient decimal read: strings and JSON numbers, anything else is skipped
pub fn parse_amount(value: &serde_json::Value) -> Option<Decimal> {
    use std::str::FromStr;

    match value {
        serde_json::Value::String(s) => Decimal::from_str(s.trim()).ok(),
        serde_json::Value::Number(n) => Decimal::from_str(&n.to_string()).ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parse_amount_skips_garbage() {
        assert_eq!(parse_amount(&json!("500.50")), Some(Decimal::new(50050, 2)));
        assert_eq!(parse_amount(&json!(" 700 ")), Some(Decimal::new(700, 0)));
        assert_eq!(parse_amount(&json!(1500)), Some(Decimal::new(1500, 0)));
        assert_eq!(parse_amount(&json!("abc")), None);
        assert_eq!(parse_amount(&json!("")), None);
        assert_eq!(parse_amount(&json!(null)), None);
    }

    #[test]
    fn excel_row_requires_every_column() {
        let row = ExcelStudentRow {
            first_name: "Amina".to_string(),
            last_name: "Otieno".to_string(),
            admission_number: " ".to_string(),
            class_group: "Form 1".to_string(),
        };
        assert!(row.validate().is_err());
    }
}
