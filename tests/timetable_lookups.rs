mod test_support;

use remedial_service::entities::sea_orm_active_enums::{DayOfWeek, LessonStatus, PaymentStatus};
use remedial_service::reports::{LessonStats, slot_display};
use remedial_service::repositories::{
    AdminLessonFilter, LessonFilter, LessonRepository, LessonUpdate, TimetableRepository,
};
use test_support::*;

#[tokio::test]
async fn recorded_slots_drop_out_of_the_week() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let monday = seed_timetable(&db, teacher.id, None, DayOfWeek::Mon, 8, vec![]).await;
    let tuesday = seed_timetable(&db, teacher.id, None, DayOfWeek::Tue, 8, vec![]).await;
    let week_one = seed_week(&db, 1).await;
    let week_two = seed_week(&db, 2).await;

    LessonRepository::with_connection(&db)
        .add_lesson(teacher.id, monday.id, week_one.id, None)
        .await
        .unwrap();

    let timetables = TimetableRepository::with_connection(&db);
    let week_one_ids: Vec<i32> = timetables
        .find_available_for_week(teacher.id, Some(week_one.id))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    let week_two_ids: Vec<i32> = timetables
        .find_available_for_week(teacher.id, Some(week_two.id))
        .await
        .unwrap()
        .iter()
        .map(|t| t.id)
        .collect();
    let all = timetables.find_available_for_week(teacher.id, None).await.unwrap();

    assert_eq!(week_one_ids, vec![tuesday.id]);
    assert_eq!(week_two_ids.len(), 2);
    assert_eq!(all.len(), 2);
}

#[tokio::test]
async fn only_own_slots_are_listed() {
    let db = setup_test_db().await;
    let owner = seed_teacher(&db, "owner", false, vec![]).await;
    let other = seed_teacher(&db, "other", false, vec![]).await;
    seed_timetable(&db, owner.id, None, DayOfWeek::Mon, 8, vec![]).await;
    seed_timetable(&db, other.id, None, DayOfWeek::Mon, 9, vec![]).await;

    let slots = TimetableRepository::with_connection(&db)
        .find_by_teacher(owner.id)
        .await
        .unwrap();

    assert_eq!(slots.len(), 1);
    assert!(slots.iter().all(|s| s.teacher_id == owner.id));
}

#[tokio::test]
async fn slot_display_lists_classes() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let maths = seed_subject(&db, "Mathematics").await;
    let east = seed_class_group(&db, "Form 3 East").await;
    let west = seed_class_group(&db, "Form 3 West").await;
    let slot = seed_timetable(&db, teacher.id, Some(maths.id), DayOfWeek::Wed, 14, vec![east.id, west.id]).await;

    let grouped = TimetableRepository::with_connection(&db)
        .class_groups_for(&[slot.id])
        .await
        .unwrap();
    let classes = grouped.get(&slot.id).cloned().unwrap_or_default();

    assert_eq!(classes.len(), 2);
    assert_eq!(
        slot_display(&slot, Some(maths.name.as_str()), &classes),
        "Mathematics - Wednesday 14:00 (Form 3 East, Form 3 West)"
    );
}

#[tokio::test]
async fn dashboard_filters_narrow_lessons() {
    let db = setup_test_db().await;
    let teacher = seed_teacher(&db, "owner", false, vec![]).await;
    let other = seed_teacher(&db, "other", false, vec![]).await;
    let maths = seed_subject(&db, "Mathematics").await;
    let physics = seed_subject(&db, "Physics").await;
    let east = seed_class_group(&db, "Form 1 East").await;
    let west = seed_class_group(&db, "Form 1 West").await;
    let week_one = seed_week(&db, 1).await;
    let week_two = seed_week(&db, 2).await;

    let maths_east = seed_timetable(&db, teacher.id, Some(maths.id), DayOfWeek::Mon, 8, vec![east.id]).await;
    let physics_west = seed_timetable(&db, teacher.id, Some(physics.id), DayOfWeek::Tue, 8, vec![west.id]).await;
    let foreign = seed_timetable(&db, other.id, Some(maths.id), DayOfWeek::Mon, 10, vec![east.id]).await;

    let lessons = LessonRepository::with_connection(&db);
    for (owner, slot, week) in [
        (teacher.id, maths_east.id, week_one.id),
        (teacher.id, maths_east.id, week_two.id),
        (teacher.id, physics_west.id, week_one.id),
        (other.id, foreign.id, week_one.id),
    ] {
        assert!(lessons.add_lesson(owner, slot, week, None).await.unwrap().is_created());
    }

    let everything = lessons
        .find_for_teacher(teacher.id, LessonFilter::default())
        .await
        .unwrap();
    assert_eq!(everything.len(), 3);
    assert!(everything.windows(2).all(|w| w[0].id > w[1].id));

    let by_week = lessons
        .find_for_teacher(
            teacher.id,
            LessonFilter {
                week_id: Some(week_one.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_week.len(), 2);

    let by_class = lessons
        .find_for_teacher(
            teacher.id,
            LessonFilter {
                class_group_id: Some(west.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_class.len(), 1);
    assert_eq!(by_class[0].timetable_id, physics_west.id);

    let by_subject_and_week = lessons
        .find_for_teacher(
            teacher.id,
            LessonFilter {
                week_id: Some(week_two.id),
                subject_id: Some(maths.id),
                ..Default::default()
            },
        )
        .await
        .unwrap();
    assert_eq!(by_subject_and_week.len(), 1);

    lessons
        .update(
            by_class[0].id,
            LessonUpdate {
                status: Some(LessonStatus::Attended),
                payment_status: Some(PaymentStatus::Paid),
                amount: None,
            },
        )
        .await
        .unwrap();
    let refreshed = lessons
        .find_for_teacher(teacher.id, LessonFilter::default())
        .await
        .unwrap();
    let stats = LessonStats::from_records(&refreshed);
    assert_eq!(stats.total, 3);
    assert_eq!(stats.attended + stats.not_attended + stats.pending, stats.total);
    assert_eq!(stats.paid + stats.unpaid, stats.total);
    assert_eq!(stats.attended, 1);
    assert_eq!(stats.paid, 1);
}

#[tokio::test]
async fn staff_listing_filters_across_teachers() {
    let db = setup_test_db().await;
    let first = seed_teacher(&db, "first", false, vec![]).await;
    let second = seed_teacher(&db, "second", false, vec![]).await;
    let east = seed_class_group(&db, "Form 2 East").await;
    let west = seed_class_group(&db, "Form 2 West").await;
    let week_one = seed_week(&db, 1).await;
    let week_two = seed_week(&db, 2).await;

    let first_east = seed_timetable(&db, first.id, None, DayOfWeek::Mon, 8, vec![east.id]).await;
    let second_west = seed_timetable(&db, second.id, None, DayOfWeek::Fri, 8, vec![west.id]).await;

    let lessons = LessonRepository::with_connection(&db);
    for (owner, slot, week) in [
        (first.id, first_east.id, week_one.id),
        (first.id, first_east.id, week_two.id),
        (second.id, second_west.id, week_one.id),
    ] {
        assert!(lessons.add_lesson(owner, slot, week, None).await.unwrap().is_created());
    }

    let everything = lessons.find_all(AdminLessonFilter::default()).await.unwrap();
    assert_eq!(everything.len(), 3);

    let by_teacher = lessons
        .find_all(AdminLessonFilter {
            teacher_id: Some(second.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_teacher.len(), 1);
    assert_eq!(by_teacher[0].timetable_id, second_west.id);

    let by_class_and_week = lessons
        .find_all(AdminLessonFilter {
            class_group_id: Some(east.id),
            week_id: Some(week_two.id),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(by_class_and_week.len(), 1);

    lessons
        .update(
            by_class_and_week[0].id,
            LessonUpdate {
                payment_status: Some(PaymentStatus::Paid),
                ..Default::default()
            },
        )
        .await
        .unwrap();

    let paid = lessons
        .find_all(AdminLessonFilter {
            payment_status: Some(PaymentStatus::Paid),
            ..Default::default()
        })
        .await
        .unwrap();
    assert_eq!(paid.len(), 1);
    assert_eq!(paid[0].id, by_class_and_week[0].id);

    let pending_for_nobody = lessons
        .find_all(AdminLessonFilter {
            teacher_id: Some(9999),
            status: Some(LessonStatus::Pending),
            ..Default::default()
        })
        .await
        .unwrap();
    assert!(pending_for_nobody.is_empty());
}
