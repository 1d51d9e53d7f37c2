#![allow(dead_code)]

use chrono::{NaiveDate, NaiveTime};
use migration::{Migrator, MigratorTrait};
use remedial_service::entities::{
    class_group, sea_orm_active_enums::DayOfWeek, student, subject, teacher, timetable, week,
};
use remedial_service::repositories::{
    CatalogRepository, NewStudent, NewTeacher, NewTimetable, StudentRepository,
    StudentWriteResult, TeacherRepository, TimetableRepository,
};
use sea_orm::{Database, DatabaseConnection};

pub async fn setup_test_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    Migrator::up(&db, None).await.unwrap();
    db
}

pub async fn seed_subject(db: &DatabaseConnection, name: &str) -> subject::Model {
    CatalogRepository::with_connection(db)
        .create_subject(name.to_string())
        .await
        .unwrap()
}

pub async fn seed_class_group(db: &DatabaseConnection, name: &str) -> class_group::Model {
    CatalogRepository::with_connection(db)
        .create_class_group(name.to_string(), None)
        .await
        .unwrap()
}

pub async fn seed_week(db: &DatabaseConnection, number: i32) -> week::Model {
    let start = NaiveDate::from_ymd_opt(2025, 1, 6).unwrap() + chrono::Duration::weeks(number as i64);
    CatalogRepository::with_connection(db)
        .create_week(number, start, start + chrono::Duration::days(4))
        .await
        .unwrap()
}

/// Teacher with a login; the password hash is a placeholder
pub async fn seed_teacher(
    db: &DatabaseConnection,
    username: &str,
    is_class_teacher: bool,
    class_group_ids: Vec<i32>,
) -> teacher::Model {
    let (teacher, _user) = TeacherRepository::with_connection(db)
        .create_with_user(NewTeacher {
            username: username.to_string(),
            password_hash: "not-a-real-hash".to_string(),
            first_name: username.to_string(),
            last_name: "Teacher".to_string(),
            is_class_teacher,
            subject_ids: Vec::new(),
            class_group_ids,
        })
        .await
        .unwrap();
    teacher
}

pub async fn seed_timetable(
    db: &DatabaseConnection,
    teacher_id: i32,
    subject_id: Option<i32>,
    day: DayOfWeek,
    start_hour: u32,
    class_group_ids: Vec<i32>,
) -> timetable::Model {
    TimetableRepository::with_connection(db)
        .create(NewTimetable {
            subject_id,
            teacher_id,
            day,
            start_time: NaiveTime::from_hms_opt(start_hour, 0, 0).unwrap(),
            end_time: NaiveTime::from_hms_opt(start_hour + 1, 0, 0).unwrap(),
            class_group_ids,
        })
        .await
        .unwrap()
}

pub async fn seed_student(
    db: &DatabaseConnection,
    admission_number: &str,
    class_group_id: i32,
) -> student::Model {
    let result = StudentRepository::with_connection(db)
        .create(NewStudent {
            first_name: "Student".to_string(),
            last_name: admission_number.to_string(),
            admission_number: admission_number.to_string(),
            class_group_id,
        })
        .await
        .unwrap();
    match result {
        StudentWriteResult::Saved(student) => student,
        other => panic!("failed to seed student: {:?}", other),
    }
}
