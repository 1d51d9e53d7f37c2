use axum::{
    Json, Router,
    extract::{Multipart, Path, Query},
    http::StatusCode,
    routing::{get, post},
};
use calamine::{DataType, Reader, Xlsx, open_workbook_from_rs};
use std::collections::HashMap;
use std::io::Cursor;

use super::dto::{
    AddStudentRequest, AddStudentResponse, BulkStudentError, BulkStudentResponse,
    ClassGroupItem, DeleteStudentResponse, EditStudentRequest, EditStudentResponse,
    ExcelStudentRow, RecordPaymentsRequest, StudentPaymentsQuery, StudentPaymentsResponse,
    parse_amount,
};
use crate::config::APP_CONFIG;
use crate::entities::{class_group, teacher};
use crate::extractor::{AuthClaims, CurrentTeacher};
use crate::reports::ClassPaymentSummary;
use crate::repositories::{
    CatalogRepository, NewStudent, PaymentEntry, PaymentRepository, StudentRepository,
    StudentUpdate, StudentWriteResult, TeacherRepository,
};

pub fn create_route() -> Router {
    Router::new()
        .route(
            "/student/payments/",
            get(get_student_payments).post(record_student_payments),
        )
        .route("/add-student-ajax/", post(add_student))
        .route("/edit-student-ajax/{student_id}/", post(edit_student))
        .route("/delete-student-ajax/{student_id}/", post(delete_student))
        .route("/admin/students/import/", post(import_students))
}

/// Class groups the class teacher may work with; 403 for everyone else
async fn class_teacher_groups(
    teacher: &teacher::Model,
) -> Result<Vec<class_group::Model>, (StatusCode, String)> {
    if !teacher.is_class_teacher {
        return Err((
            StatusCode::FORBIDDEN,
            "Only class teachers can manage student payments".to_string(),
        ));
    }

    TeacherRepository::new()
        .class_groups_of(teacher)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })
}

fn ensure_own_class(
    class_groups: &[class_group::Model],
    class_group_id: i32,
) -> Result<(), (StatusCode, String)> {
    if class_groups.iter().any(|c| c.id == class_group_id) {
        Ok(())
    } else {
        Err((
            StatusCode::FORBIDDEN,
            "This class group is not assigned to you".to_string(),
        ))
    }
}

async fn payments_view(
    class_groups: Vec<class_group::Model>,
    selected: Option<i32>,
    recorded: usize,
) -> Result<StudentPaymentsResponse, (StatusCode, String)> {
    let students = match selected {
        Some(class_group_id) => StudentRepository::new()
            .find_by_class_group(class_group_id)
            .await
            .map_err(|e| {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("Failed to load students: {}", e),
                )
            })?,
        None => Vec::new(),
    };

    let summary = ClassPaymentSummary::from_students(&students);

    Ok(StudentPaymentsResponse {
        class_groups: class_groups
            .into_iter()
            .map(|c| ClassGroupItem {
                id: c.id,
                name: c.name,
            })
            .collect(),
        selected_class_group: selected,
        students: students.into_iter().map(Into::into).collect(),
        summary,
        recorded,
    })
}

/// Students of one of the class teacher's classes with their fee status
#[utoipa::path(
    get,
    path = "/student/payments/",
    params(StudentPaymentsQuery),
    responses(
        (status = 200, description = "Class payment summary", body = StudentPaymentsResponse),
        (status = 403, description = "Not a class teacher, or not their class"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn get_student_payments(
    CurrentTeacher { teacher }: CurrentTeacher,
    Query(query): Query<StudentPaymentsQuery>,
) -> Result<(StatusCode, Json<StudentPaymentsResponse>), (StatusCode, String)> {
    let class_groups = class_teacher_groups(&teacher).await?;
    if let Some(class_group_id) = query.class_group {
        ensure_own_class(&class_groups, class_group_id)?;
    }

    let response = payments_view(class_groups, query.class_group, 0).await?;
    Ok((StatusCode::OK, Json(response)))
}

/// Record fee payments for students of a class
#[utoipa::path(
    post,
    path = "/student/payments/",
    request_body = RecordPaymentsRequest,
    responses(
        (status = 200, description = "Payments recorded, refreshed summary", body = StudentPaymentsResponse),
        (status = 403, description = "Not a class teacher, or not their class"),
        (status = 404, description = "Teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn record_student_payments(
    CurrentTeacher { teacher }: CurrentTeacher,
    Json(payload): Json<RecordPaymentsRequest>,
) -> Result<(StatusCode, Json<StudentPaymentsResponse>), (StatusCode, String)> {
    let class_groups = class_teacher_groups(&teacher).await?;
    ensure_own_class(&class_groups, payload.class_group)?;

    let students = StudentRepository::new()
        .find_by_class_group(payload.class_group)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load students: {}", e),
            )
        })?;

    // Only students of the selected class take part; bad amounts are skipped
    let entries: Vec<PaymentEntry> = students
        .iter()
        .filter_map(|student| {
            let amount = payload.amounts.get(&student.id).and_then(parse_amount)?;
            Some(PaymentEntry {
                student_id: student.id,
                amount,
            })
        })
        .collect();

    let term = payload
        .term
        .as_deref()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .unwrap_or(APP_CONFIG.current_term.as_str())
        .to_string();

    let recorded = PaymentRepository::new()
        .record_payments(entries, &term, Some(teacher.id))
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to record payments: {}", e),
            )
        })?;

    let response = payments_view(class_groups, Some(payload.class_group), recorded.len()).await?;
    Ok((StatusCode::OK, Json(response)))
}

fn student_write_error(result: &StudentWriteResult) -> (StatusCode, String) {
    let status = match result {
        StudentWriteResult::NotFound | StudentWriteResult::ClassGroupNotFound => {
            StatusCode::NOT_FOUND
        }
        StudentWriteResult::DuplicateAdmissionNumber => StatusCode::BAD_REQUEST,
        StudentWriteResult::Saved(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, result.message().to_string())
}

/// Create a student
#[utoipa::path(
    post,
    path = "/add-student-ajax/",
    request_body = AddStudentRequest,
    responses(
        (status = 200, description = "Student created", body = AddStudentResponse),
        (status = 400, description = "Duplicate admission number"),
        (status = 404, description = "Class group or teacher profile not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn add_student(
    CurrentTeacher { teacher }: CurrentTeacher,
    Json(payload): Json<AddStudentRequest>,
) -> Result<(StatusCode, Json<AddStudentResponse>), (StatusCode, String)> {
    let result = StudentRepository::new()
        .create(NewStudent {
            first_name: payload.first_name.trim().to_string(),
            last_name: payload.last_name.trim().to_string(),
            admission_number: payload.admission_number.trim().to_string(),
            class_group_id: payload.class_group,
        })
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to create student: {}", e),
            )
        })?;

    let StudentWriteResult::Saved(student) = result else {
        return Err(student_write_error(&result));
    };

    tracing::info!("Teacher {} added student {}", teacher.id, student.id);

    Ok((
        StatusCode::OK,
        Json(AddStudentResponse {
            id: student.id,
            name: student.full_name(),
            balance: format!("{:.2}", student.balance()),
        }),
    ))
}

/// Update a student's names or admission number
#[utoipa::path(
    post,
    path = "/edit-student-ajax/{student_id}/",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    request_body = EditStudentRequest,
    responses(
        (status = 200, description = "Student updated", body = EditStudentResponse),
        (status = 400, description = "Duplicate admission number"),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn edit_student(
    AuthClaims(_auth_claims): AuthClaims,
    Path(student_id): Path<i32>,
    Json(payload): Json<EditStudentRequest>,
) -> Result<(StatusCode, Json<EditStudentResponse>), (StatusCode, String)> {
    let clean = |value: Option<String>| {
        value
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
    };

    let result = StudentRepository::new()
        .update(
            student_id,
            StudentUpdate {
                first_name: clean(payload.first_name),
                last_name: clean(payload.last_name),
                admission_number: clean(payload.admission_number),
            },
        )
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to update student: {}", e),
            )
        })?;

    let StudentWriteResult::Saved(student) = result else {
        return Err(student_write_error(&result));
    };

    Ok((
        StatusCode::OK,
        Json(EditStudentResponse {
            id: student.id,
            name: student.full_name(),
        }),
    ))
}

/// Delete a student and its payments
#[utoipa::path(
    post,
    path = "/delete-student-ajax/{student_id}/",
    params(
        ("student_id" = i32, Path, description = "Student ID")
    ),
    responses(
        (status = 200, description = "Student deleted", body = DeleteStudentResponse),
        (status = 404, description = "Student not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn delete_student(
    AuthClaims(auth_claims): AuthClaims,
    Path(student_id): Path<i32>,
) -> Result<(StatusCode, Json<DeleteStudentResponse>), (StatusCode, String)> {
    let deleted = StudentRepository::new()
        .delete(student_id)
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to delete student: {}", e),
            )
        })?;

    if !deleted {
        return Err((StatusCode::NOT_FOUND, "Student not found".to_string()));
    }

    tracing::info!("User {} deleted student {}", auth_claims.username, student_id);

    Ok((
        StatusCode::OK,
        Json(DeleteStudentResponse {
            success: true,
            id: student_id,
        }),
    ))
}

/// Bulk create students from an Excel sheet (staff only).
/// Columns: first_name, last_name, admission_number, class group name; first row is the header.
#[utoipa::path(
    post,
    path = "/admin/students/import/",
    request_body(content = String, content_type = "multipart/form-data", description = "Multipart form data with an .xlsx file in field: file"),
    responses(
        (status = 200, description = "Import finished", body = BulkStudentResponse),
        (status = 400, description = "Missing or unreadable file"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
pub async fn import_students(
    auth_claims: AuthClaims,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<BulkStudentResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let mut file_data: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read multipart: {}", e),
        )
    })? {
        let name = field.name().unwrap_or("").to_string();

        if name == "file" {
            let data = field.bytes().await.map_err(|e| {
                (
                    StatusCode::BAD_REQUEST,
                    format!("Failed to read file: {}", e),
                )
            })?;
            file_data = Some(data.to_vec());
            break;
        }
    }

    let file_data =
        file_data.ok_or_else(|| (StatusCode::BAD_REQUEST, "No file provided".to_string()))?;

    let cursor = Cursor::new(file_data);
    let mut workbook: Xlsx<_> = open_workbook_from_rs(cursor).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to open Excel file: {}", e),
        )
    })?;

    let sheet_names = workbook.sheet_names().to_owned();
    let first_sheet = sheet_names.first().ok_or_else(|| {
        (
            StatusCode::BAD_REQUEST,
            "Excel file has no sheets".to_string(),
        )
    })?;

    let range = workbook.worksheet_range(first_sheet).map_err(|e| {
        (
            StatusCode::BAD_REQUEST,
            format!("Failed to read sheet: {}", e),
        )
    })?;

    let mut rows: Vec<(usize, ExcelStudentRow)> = Vec::new();
    let mut errors: Vec<BulkStudentError> = Vec::new();

    // Parse rows (skip header row)
    for (idx, row) in range.rows().enumerate().skip(1) {
        let row_num = idx + 1;
        let cell = |col: usize| -> String {
            row.get(col)
                .and_then(|c| c.as_string())
                .map(|s| s.trim().to_string())
                .unwrap_or_default()
        };

        let student_row = ExcelStudentRow {
            first_name: cell(0),
            last_name: cell(1),
            admission_number: cell(2),
            class_group: cell(3),
        };

        match student_row.validate() {
            Ok(()) => rows.push((row_num, student_row)),
            Err(error) => errors.push(BulkStudentError {
                row: row_num,
                admission_number: student_row.admission_number,
                error,
            }),
        }
    }

    let total_records = rows.len() + errors.len();

    let class_ids: HashMap<String, i32> = CatalogRepository::new()
        .find_all_class_groups()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?
        .into_iter()
        .map(|c| (c.name.to_lowercase(), c.id))
        .collect();

    let student_repo = StudentRepository::new();
    let mut successful = 0;

    for (row_num, row) in rows {
        let Some(class_group_id) = class_ids.get(&row.class_group.to_lowercase()).copied() else {
            errors.push(BulkStudentError {
                row: row_num,
                admission_number: row.admission_number,
                error: format!("Unknown class group: {}", row.class_group),
            });
            continue;
        };

        let admission_number = row.admission_number.clone();
        let result = student_repo
            .create(NewStudent {
                first_name: row.first_name,
                last_name: row.last_name,
                admission_number: row.admission_number,
                class_group_id,
            })
            .await;

        match result {
            Ok(StudentWriteResult::Saved(_)) => successful += 1,
            Ok(other) => errors.push(BulkStudentError {
                row: row_num,
                admission_number,
                error: other.message().to_string(),
            }),
            Err(e) => errors.push(BulkStudentError {
                row: row_num,
                admission_number,
                error: format!("Failed to create student: {}", e),
            }),
        }
    }

    tracing::info!(
        "Student import by {}: {} of {} rows created",
        auth_claims.0.username,
        successful,
        total_records
    );

    Ok((
        StatusCode::OK,
        Json(BulkStudentResponse {
            total_records,
            successful,
            failed: errors.len(),
            errors,
        }),
    ))
}
