//! Route-level checks against a migrated in-memory database. The global
//! connection and configuration can only be set once per process, so
//! everything runs inside a single test.

mod test_support;

use axum::body::Body;
use http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use remedial_service::app::api_router;
use remedial_service::config::APP_CONFIG;
use remedial_service::entities::{sea_orm_active_enums::DayOfWeek, teacher};
use remedial_service::repositories::{TeacherRepository, UserRepository};
use remedial_service::static_service::DATABASE_CONNECTION;
use remedial_service::utils::jwt::JwtManager;
use sea_orm::DatabaseConnection;
use serde_json::{Value, json};
use std::path::Path;
use test_support::*;
use tower::ServiceExt;

const PAYMENTS_CSV_HEADER: &str =
    "payment_id,admission_number,student_name,amount,date_paid,term,recorded_by";

struct Response {
    status: StatusCode,
    body: Vec<u8>,
}

impl Response {
    fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }

    fn text(&self) -> String {
        String::from_utf8(self.body.clone()).unwrap()
    }
}

async fn send(request: Request<Body>) -> Response {
    let response = api_router().oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes().to_vec();
    Response { status, body }
}

async fn get(uri: &str, token: &str) -> Response {
    send(
        Request::builder()
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap(),
    )
    .await
}

async fn post_json(uri: &str, token: &str, body: Value) -> Response {
    send(
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
}

fn token_for(user_id: i32, username: &str, is_staff: bool) -> String {
    JwtManager::new(&APP_CONFIG.jwt_secret)
        .create_token(user_id, username, is_staff, 3600)
        .unwrap()
}

fn teacher_token(teacher: &teacher::Model, username: &str) -> String {
    token_for(teacher.user_id, username, false)
}

async fn lesson_contracts(db: &DatabaseConnection, staff_token: &str) {
    let owner = seed_teacher(db, "owner", false, vec![]).await;
    let other = seed_teacher(db, "other", false, vec![]).await;
    let slot = seed_timetable(db, owner.id, None, DayOfWeek::Mon, 8, vec![]).await;
    let week = seed_week(db, 1).await;
    let second_week = seed_week(db, 2).await;
    let owner_token = teacher_token(&owner, "owner");
    let other_token = teacher_token(&other, "other");

    let body = json!({ "timetable": slot.id, "week": week.id });
    let created = post_json("/lesson/add/", &owner_token, body.clone()).await;
    assert_eq!(created.status, StatusCode::CREATED);
    let lesson_id = created.json()["id"].as_i64().unwrap();
    assert_eq!(created.json()["status"], "Pending");

    let duplicate = post_json("/lesson/add/", &owner_token, body).await;
    assert_eq!(duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        duplicate.text(),
        "This lesson has already been scheduled for this week."
    );

    let negative = post_json(
        "/lesson/add/",
        &owner_token,
        json!({ "timetable": slot.id, "week": second_week.id, "amount": "-5" }),
    )
    .await;
    assert_eq!(negative.status, StatusCode::BAD_REQUEST);
    assert_eq!(negative.text(), "Amount cannot be negative");

    let refused = post_json(&format!("/mark_attended/{}/", lesson_id), &other_token, json!({})).await;
    assert_eq!(refused.status, StatusCode::FORBIDDEN);
    assert_eq!(refused.json(), json!({ "error": "Not allowed" }));

    let marked = get(&format!("/mark_attended/{}/", lesson_id), &owner_token).await;
    assert_eq!(marked.status, StatusCode::OK);
    assert_eq!(marked.json()["created_by"], json!(owner.id));

    // Staff listing and entry on behalf of a teacher
    let not_staff = get("/admin/lessons/", &owner_token).await;
    assert_eq!(not_staff.status, StatusCode::FORBIDDEN);

    let listed = get(&format!("/admin/lessons/?teacher={}&week=", owner.id), staff_token).await;
    assert_eq!(listed.status, StatusCode::OK);
    assert_eq!(listed.json().as_array().unwrap().len(), 1);

    let wrong_teacher = post_json(
        "/admin/lessons/",
        staff_token,
        json!({ "created_by": other.id, "timetable": slot.id, "week": second_week.id }),
    )
    .await;
    assert_eq!(wrong_teacher.status, StatusCode::BAD_REQUEST);
    assert_eq!(wrong_teacher.text(), "Select a valid timetable slot.");

    let staff_entry = post_json(
        "/admin/lessons/",
        staff_token,
        json!({ "timetable": slot.id, "week": second_week.id, "status": "Attended" }),
    )
    .await;
    assert_eq!(staff_entry.status, StatusCode::CREATED);
    assert_eq!(staff_entry.json()["created_by"], json!(owner.id));
    assert_eq!(staff_entry.json()["status"], "Attended");

    let staff_duplicate = post_json(
        "/admin/lessons/",
        staff_token,
        json!({ "timetable": slot.id, "week": second_week.id }),
    )
    .await;
    assert_eq!(staff_duplicate.status, StatusCode::BAD_REQUEST);
    assert_eq!(
        staff_duplicate.text(),
        "This lesson has already been scheduled for this week."
    );

    let attended = get("/admin/lessons/?status=Attended", staff_token).await;
    assert_eq!(attended.json().as_array().unwrap().len(), 1);
}

async fn payment_contracts(db: &DatabaseConnection, staff_token: &str) {
    let own_class = seed_class_group(db, "Form 4 North").await;
    let foreign_class = seed_class_group(db, "Form 4 South").await;
    let class_teacher = seed_teacher(db, "classlead", true, vec![own_class.id]).await;
    let plain_teacher = seed_teacher(db, "plain", false, vec![]).await;
    let class_token = teacher_token(&class_teacher, "classlead");
    let plain_token = teacher_token(&plain_teacher, "plain");
    seed_student(db, "ADM900", foreign_class.id).await;

    let export = get("/admin-payments/export/", staff_token).await;
    assert_eq!(export.status, StatusCode::OK);
    assert_eq!(export.text().lines().collect::<Vec<_>>(), vec![PAYMENTS_CSV_HEADER]);

    let not_class_teacher = get("/student/payments/", &plain_token).await;
    assert_eq!(not_class_teacher.status, StatusCode::FORBIDDEN);

    let foreign = get(
        &format!("/student/payments/?class_group={}", foreign_class.id),
        &class_token,
    )
    .await;
    assert_eq!(foreign.status, StatusCode::FORBIDDEN);
    assert_eq!(foreign.text(), "This class group is not assigned to you");

    let added = post_json(
        "/add-student-ajax/",
        &class_token,
        json!({
            "first_name": "X",
            "last_name": "Y",
            "admission_number": "ADM901",
            "class_group": own_class.id
        }),
    )
    .await;
    assert_eq!(added.status, StatusCode::OK);
    assert_eq!(added.json()["name"], "X Y");
    assert_eq!(added.json()["balance"], "1500.00");
    let first_id = added.json()["id"].as_i64().unwrap();
    let second_id = seed_student(db, "ADM902", own_class.id).await.id;

    let mut amounts = serde_json::Map::new();
    amounts.insert(first_id.to_string(), json!("abc"));
    amounts.insert(second_id.to_string(), json!("250"));
    let recorded = post_json(
        "/student/payments/",
        &class_token,
        json!({ "class_group": own_class.id, "amounts": amounts }),
    )
    .await;
    assert_eq!(recorded.status, StatusCode::OK);
    assert_eq!(recorded.json()["recorded"], 1);
    assert_eq!(recorded.json()["students"].as_array().unwrap().len(), 2);

    // 9999 matches no class, so every student is shown
    let fallback = get("/admin-payments/?class=9999", staff_token).await;
    assert_eq!(fallback.status, StatusCode::OK);
    assert_eq!(fallback.json()["selected_class"], Value::Null);
    assert_eq!(fallback.json()["summary"]["total_students"], 3);
    assert_eq!(fallback.json()["payments"].as_array().unwrap().len(), 1);

    let export = get("/admin-payments/export/", staff_token).await;
    let text = export.text();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[1].contains("ADM902"));
}

async fn profile_picture_contracts(db: &DatabaseConnection, media_root: &Path) {
    let seeded = seed_teacher(db, "pictured", false, vec![]).await;
    let token = teacher_token(&seeded, "pictured");

    let old_relative = "profile_pictures/old.png";
    tokio::fs::create_dir_all(media_root.join("profile_pictures"))
        .await
        .unwrap();
    tokio::fs::write(media_root.join(old_relative), b"old").await.unwrap();
    TeacherRepository::with_connection(db)
        .update_profile_picture(seeded, Some(old_relative.to_string()))
        .await
        .unwrap();

    // Both fields at once: the upload wins
    let boundary = "remedialboundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"delete_picture\"\r\n\r\n1\r\n\
         --{b}\r\nContent-Disposition: form-data; name=\"profile_picture\"; filename=\"me.png\"\r\n\
         Content-Type: image/png\r\n\r\nnew\r\n--{b}--\r\n",
        b = boundary
    );
    let response = send(
        Request::builder()
            .method("POST")
            .uri("/teacher/update-profile-picture/")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={}", boundary),
            )
            .body(Body::from(body))
            .unwrap(),
    )
    .await;

    assert_eq!(response.status, StatusCode::OK);
    let stored = response.json()["profile_picture"]
        .as_str()
        .unwrap()
        .to_string();
    assert!(stored.starts_with("profile_pictures/"));
    assert!(stored.ends_with("_me.png"));
    assert!(!media_root.join(old_relative).exists());
    assert_eq!(tokio::fs::read(media_root.join(&stored)).await.unwrap(), b"new");
}

#[tokio::test]
async fn http_contracts_hold_against_the_database() {
    let media = tempfile::tempdir().unwrap();
    // SAFETY: set before any other thread reads the environment
    unsafe {
        std::env::set_var("DATABASE_URL", "sqlite::memory:");
        std::env::set_var("JWT_SECRET", "http-contract-secret");
        std::env::set_var("ADMIN_USERNAME", "admin");
        std::env::set_var("ADMIN_PASSWORD", "admin");
        std::env::set_var("MEDIA_ROOT", media.path());
    }

    let db = setup_test_db().await;
    assert!(DATABASE_CONNECTION.set(db).is_ok());
    let db = DATABASE_CONNECTION.get().unwrap();

    let staff = UserRepository::create(db, "staff", "unused".to_string(), "School", "Office", true)
        .await
        .unwrap();
    let staff_token = token_for(staff.id, "staff", true);

    lesson_contracts(db, &staff_token).await;
    payment_contracts(db, &staff_token).await;
    profile_picture_contracts(db, media.path()).await;
}
