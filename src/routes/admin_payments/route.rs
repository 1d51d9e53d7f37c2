use axum::{
    Json, Router,
    extract::Query,
    http::{StatusCode, header},
    response::IntoResponse,
    routing::get,
};

use super::dto::{AdminPaymentsQuery, AdminPaymentsResponse, PaymentRow};
use crate::extractor::AuthClaims;
use crate::reports::{AdminPaymentSummary, export::payments_csv};
use crate::repositories::{
    CatalogRepository, PaymentRepository, StudentRepository, TeacherRepository,
};
use crate::routes::students::dto::ClassGroupItem;

pub fn create_route() -> Router {
    Router::new()
        .route("/admin-payments/", get(admin_payments))
        .route("/admin-payments/export/", get(export_payments))
}

/// School-wide fee dashboard (staff only)
#[utoipa::path(
    get,
    path = "/admin-payments/",
    params(AdminPaymentsQuery),
    responses(
        (status = 200, description = "Payment dashboard", body = AdminPaymentsResponse),
        (status = 401, description = "Unauthorized"),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin payments"
)]
pub async fn admin_payments(
    auth_claims: AuthClaims,
    Query(query): Query<AdminPaymentsQuery>,
) -> Result<(StatusCode, Json<AdminPaymentsResponse>), (StatusCode, String)> {
    auth_claims.require_staff()?;

    let class_groups = CatalogRepository::new()
        .find_all_class_groups()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load class groups: {}", e),
            )
        })?;

    let all_students = StudentRepository::new().find_all(None).await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load students: {}", e),
        )
    })?;

    // An id that matches no class group falls back to all students
    let selected_class = query
        .class_group
        .filter(|id| class_groups.iter().any(|c| c.id == *id));

    let students: Vec<_> = match selected_class {
        Some(class_group_id) => all_students
            .iter()
            .filter(|s| s.class_group_id == class_group_id)
            .cloned()
            .collect(),
        None => all_students.clone(),
    };

    let summary = AdminPaymentSummary::build(&students, &all_students, &class_groups);

    let teacher_names = TeacherRepository::new().display_names().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load teachers: {}", e),
        )
    })?;

    let payments = PaymentRepository::new()
        .find_all_with_students()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load payments: {}", e),
            )
        })?
        .into_iter()
        .map(|(payment, student)| PaymentRow {
            id: payment.id,
            student_id: payment.student_id,
            student_name: student.map(|s| s.full_name()).unwrap_or_default(),
            amount: payment.amount,
            date_paid: payment.date_paid,
            term: payment.term,
            recorded_by: payment
                .recorded_by
                .and_then(|id| teacher_names.get(&id).cloned()),
        })
        .collect();

    let response = AdminPaymentsResponse {
        class_groups: class_groups
            .into_iter()
            .map(|c| ClassGroupItem {
                id: c.id,
                name: c.name,
            })
            .collect(),
        selected_class,
        students: students.into_iter().map(Into::into).collect(),
        summary,
        payments,
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Every student payment as CSV (staff only)
#[utoipa::path(
    get,
    path = "/admin-payments/export/",
    responses(
        (status = 200, description = "CSV file", content_type = "text/csv", body = String),
        (status = 403, description = "Staff members only"),
        (status = 500, description = "Internal server error")
    ),
    security(("bearer_auth" = [])),
    tag = "Admin payments"
)]
pub async fn export_payments(
    auth_claims: AuthClaims,
) -> Result<impl IntoResponse, (StatusCode, String)> {
    auth_claims.require_staff()?;

    let payments = PaymentRepository::new()
        .find_all_with_students()
        .await
        .map_err(|e| {
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to load payments: {}", e),
            )
        })?;
    let teacher_names = TeacherRepository::new().display_names().await.map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to load teachers: {}", e),
        )
    })?;

    let csv = payments_csv(&payments, &teacher_names).map_err(|e| {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to export payments: {}", e),
        )
    })?;

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"student_payments.csv\"",
            ),
        ],
        csv,
    ))
}
