mod test_support;

use remedial_service::entities::{
    lesson_record,
    sea_orm_active_enums::{DayOfWeek, LessonStatus, PaymentStatus},
    teacher,
};
use remedial_service::repositories::{
    AddLessonResult, LessonRepository, LessonUpdate, MarkAttendedResult, SwapResult,
};
use rust_decimal::Decimal;
use sea_orm::DatabaseConnection;
use test_support::*;

struct Fixture {
    db: DatabaseConnection,
    owner: teacher::Model,
    other: teacher::Model,
    lesson: lesson_record::Model,
}

async fn fixture() -> Fixture {
    let db = setup_test_db().await;
    let owner = seed_teacher(&db, "owner", false, vec![]).await;
    let other = seed_teacher(&db, "other", false, vec![]).await;
    let slot = seed_timetable(&db, owner.id, None, DayOfWeek::Mon, 8, vec![]).await;
    let week = seed_week(&db, 1).await;

    let AddLessonResult::Created(lesson) = LessonRepository::with_connection(&db)
        .add_lesson(owner.id, slot.id, week.id, None)
        .await
        .unwrap()
    else {
        panic!("lesson was not created");
    };

    Fixture {
        db,
        owner,
        other,
        lesson,
    }
}

#[tokio::test]
async fn owner_resets_attended_lesson_to_pending() {
    let f = fixture().await;
    let repo = LessonRepository::with_connection(&f.db);

    repo.update(
        f.lesson.id,
        LessonUpdate {
            status: Some(LessonStatus::Attended),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    let result = repo.mark_attended(f.lesson.id, &f.owner).await.unwrap();

    let MarkAttendedResult::Marked(lesson) = result else {
        panic!("expected the lesson to be marked, got {:?}", result);
    };
    assert_eq!(lesson.status, LessonStatus::Pending);
    assert_eq!(lesson.created_by, f.owner.id);
}

#[tokio::test]
async fn other_teacher_is_not_allowed() {
    let f = fixture().await;
    let repo = LessonRepository::with_connection(&f.db);

    let result = repo.mark_attended(f.lesson.id, &f.other).await.unwrap();

    assert!(matches!(result, MarkAttendedResult::NotAllowed));
    assert_eq!(result.message(), "Not allowed");
}

#[tokio::test]
async fn missing_lesson_is_not_found() {
    let f = fixture().await;
    let result = LessonRepository::with_connection(&f.db)
        .mark_attended(777, &f.owner)
        .await
        .unwrap();
    assert!(matches!(result, MarkAttendedResult::NotFound));
}

#[tokio::test]
async fn substitute_may_mark_after_swap() {
    let f = fixture().await;
    let repo = LessonRepository::with_connection(&f.db);

    let swap = repo
        .assign_substitute(f.lesson.id, &f.owner, Some(f.other.id))
        .await
        .unwrap();
    assert!(matches!(swap, SwapResult::Assigned(ref l) if l.swapped_with == Some(f.other.id)));

    let result = repo.mark_attended(f.lesson.id, &f.other).await.unwrap();
    let MarkAttendedResult::Marked(lesson) = result else {
        panic!("substitute should be allowed, got {:?}", result);
    };
    assert_eq!(lesson.created_by, f.other.id);
    assert_eq!(lesson.status, LessonStatus::Pending);
}

#[tokio::test]
async fn swap_rules() {
    let f = fixture().await;
    let repo = LessonRepository::with_connection(&f.db);

    let by_other = repo
        .assign_substitute(f.lesson.id, &f.other, Some(f.other.id))
        .await
        .unwrap();
    assert!(matches!(by_other, SwapResult::NotAllowed));

    let to_self = repo
        .assign_substitute(f.lesson.id, &f.owner, Some(f.owner.id))
        .await
        .unwrap();
    assert!(matches!(to_self, SwapResult::InvalidSubstitute));

    let to_unknown = repo
        .assign_substitute(f.lesson.id, &f.owner, Some(5000))
        .await
        .unwrap();
    assert!(matches!(to_unknown, SwapResult::InvalidSubstitute));

    repo.assign_substitute(f.lesson.id, &f.owner, Some(f.other.id))
        .await
        .unwrap();
    let cleared = repo
        .assign_substitute(f.lesson.id, &f.owner, None)
        .await
        .unwrap();
    assert!(matches!(cleared, SwapResult::Assigned(ref l) if l.swapped_with.is_none()));

    // Once cleared the former substitute is locked out again
    let result = repo.mark_attended(f.lesson.id, &f.other).await.unwrap();
    assert!(matches!(result, MarkAttendedResult::NotAllowed));
}

#[tokio::test]
async fn staff_update_sets_fields() {
    let f = fixture().await;
    let repo = LessonRepository::with_connection(&f.db);

    let updated = repo
        .update(
            f.lesson.id,
            LessonUpdate {
                status: Some(LessonStatus::NotAttended),
                payment_status: Some(PaymentStatus::Paid),
                amount: Some(Decimal::new(450, 0)),
            },
        )
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.status, LessonStatus::NotAttended);
    assert_eq!(updated.payment_status, PaymentStatus::Paid);
    assert_eq!(updated.amount, Decimal::new(450, 0));

    let unchanged = repo
        .update(f.lesson.id, LessonUpdate::default())
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, updated);

    assert!(repo.update(999, LessonUpdate::default()).await.unwrap().is_none());
}
