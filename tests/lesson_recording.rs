mod test_support;

use remedial_service::entities::{
    lesson_record,
    sea_orm_active_enums::{DayOfWeek, LessonStatus, PaymentStatus},
};
use remedial_service::repositories::{AddLessonResult, LessonRepository, StaffLesson};
use rust_decimal::Decimal;
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, Set, SqlErr};
use test_support::*;

#[tokio::test]
async fn new_lesson_gets_default_status_and_amount() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Mon, 8, vec![]).await;
    let week = seed_week(&db, 1).await;

    let result = LessonRepository::with_connection(&db)
        .add_lesson(teacher.id, slot.id, week.id, None)
        .await
        .unwrap();

    let AddLessonResult::Created(lesson) = result else {
        panic!("expected a created lesson, got {:?}", result);
    };
    assert_eq!(lesson.status, LessonStatus::Pending);
    assert_eq!(lesson.payment_status, PaymentStatus::Unpaid);
    assert_eq!(lesson.amount, Decimal::new(400, 0));
    assert_eq!(lesson.created_by, teacher.id);
    assert_eq!(lesson.swapped_with, None);
}

#[tokio::test]
async fn explicit_amount_is_kept() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Tue, 10, vec![]).await;
    let week = seed_week(&db, 2).await;

    let result = LessonRepository::with_connection(&db)
        .add_lesson(teacher.id, slot.id, week.id, Some(Decimal::new(550, 0)))
        .await
        .unwrap();

    let AddLessonResult::Created(lesson) = result else {
        panic!("expected a created lesson, got {:?}", result);
    };
    let stored = LessonRepository::with_connection(&db)
        .find_by_id(lesson.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.amount, Decimal::new(550, 0));
}

#[tokio::test]
async fn second_lesson_for_same_slot_and_week_is_rejected() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Wed, 9, vec![]).await;
    let week = seed_week(&db, 3).await;
    let repo = LessonRepository::with_connection(&db);

    let first = repo.add_lesson(teacher.id, slot.id, week.id, None).await.unwrap();
    let second = repo.add_lesson(teacher.id, slot.id, week.id, None).await.unwrap();

    assert!(first.is_created());
    assert!(matches!(second, AddLessonResult::Duplicate));
    assert_eq!(
        second.message(),
        "This lesson has already been scheduled for this week."
    );

    let rows = lesson_record::Entity::find()
        .filter(lesson_record::Column::TimetableId.eq(slot.id))
        .filter(lesson_record::Column::WeekId.eq(week.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn same_slot_in_another_week_is_allowed() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Thu, 11, vec![]).await;
    let week_one = seed_week(&db, 1).await;
    let week_two = seed_week(&db, 2).await;
    let repo = LessonRepository::with_connection(&db);

    assert!(repo.add_lesson(teacher.id, slot.id, week_one.id, None).await.unwrap().is_created());
    assert!(repo.add_lesson(teacher.id, slot.id, week_two.id, None).await.unwrap().is_created());
}

#[tokio::test]
async fn storage_rejects_duplicate_pair_inserted_directly() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Fri, 8, vec![]).await;
    let week = seed_week(&db, 1).await;

    let lesson = || lesson_record::ActiveModel {
        timetable_id: Set(slot.id),
        week_id: Set(week.id),
        created_by: Set(teacher.id),
        swapped_with: Set(None),
        status: Set(LessonStatus::Pending),
        payment_status: Set(PaymentStatus::Unpaid),
        amount: Set(Decimal::new(400, 0)),
        ..Default::default()
    };

    lesson().insert(&db).await.unwrap();
    let err = lesson().insert(&db).await.unwrap_err();

    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn concurrent_adds_for_one_pair_create_a_single_lesson() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Mon, 13, vec![]).await;
    let week = seed_week(&db, 5).await;

    let mut tasks = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let db = db.clone();
        let (teacher_id, slot_id, week_id) = (teacher.id, slot.id, week.id);
        tasks.spawn(async move {
            LessonRepository::with_connection(&db)
                .add_lesson(teacher_id, slot_id, week_id, None)
                .await
        });
    }

    let mut created = 0;
    let mut duplicates = 0;
    while let Some(joined) = tasks.join_next().await {
        match joined.unwrap().unwrap() {
            AddLessonResult::Created(_) => created += 1,
            AddLessonResult::Duplicate => duplicates += 1,
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(duplicates, 7);
    let rows = lesson_record::Entity::find()
        .filter(lesson_record::Column::TimetableId.eq(slot.id))
        .count(&db)
        .await
        .unwrap();
    assert_eq!(rows, 1);
}

#[tokio::test]
async fn staff_entry_defaults_to_slot_teacher() {
    let db = setup_test_db().await;
    let owner = seed_teacher(&db, "owner", false, vec![]).await;
    let other = seed_teacher(&db, "other", false, vec![]).await;
    let slot = seed_timetable(&db, owner.id, None, DayOfWeek::Tue, 9, vec![]).await;
    let week = seed_week(&db, 1).await;
    let repo = LessonRepository::with_connection(&db);

    let staff_lesson = |created_by| StaffLesson {
        created_by,
        timetable_id: slot.id,
        week_id: week.id,
        status: Some(LessonStatus::Attended),
        payment_status: None,
        amount: None,
    };

    let wrong_teacher = repo.add_lesson_as_staff(staff_lesson(Some(other.id))).await.unwrap();
    assert!(matches!(wrong_teacher, AddLessonResult::InvalidTimetable));

    let result = repo.add_lesson_as_staff(staff_lesson(None)).await.unwrap();
    let AddLessonResult::Created(lesson) = result else {
        panic!("expected a created lesson, got {:?}", result);
    };
    assert_eq!(lesson.created_by, owner.id);
    assert_eq!(lesson.status, LessonStatus::Attended);
    assert_eq!(lesson.payment_status, PaymentStatus::Unpaid);

    let again = repo.add_lesson_as_staff(staff_lesson(Some(owner.id))).await.unwrap();
    assert!(matches!(again, AddLessonResult::Duplicate));
}

#[tokio::test]
async fn slot_of_another_teacher_is_invalid() {
    let db = setup_test_db().await;
    let owner = seed_teacher(&db, "owner", false, vec![]).await;
    let intruder = seed_teacher(&db, "intruder", false, vec![]).await;
    let slot = seed_timetable(&db, owner.id, None, DayOfWeek::Mon, 8, vec![]).await;
    let week = seed_week(&db, 1).await;
    let repo = LessonRepository::with_connection(&db);

    let foreign = repo.add_lesson(intruder.id, slot.id, week.id, None).await.unwrap();
    let missing = repo.add_lesson(owner.id, 9999, week.id, None).await.unwrap();

    assert!(matches!(foreign, AddLessonResult::InvalidTimetable));
    assert!(matches!(missing, AddLessonResult::InvalidTimetable));
    assert_eq!(foreign.message(), "Select a valid timetable slot.");
}

#[tokio::test]
async fn unknown_week_is_rejected() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let slot = seed_timetable(&db, teacher.id, None, DayOfWeek::Mon, 8, vec![]).await;

    let result = LessonRepository::with_connection(&db)
        .add_lesson(teacher.id, slot.id, 4242, None)
        .await
        .unwrap();

    assert!(matches!(result, AddLessonResult::WeekNotFound));
}
