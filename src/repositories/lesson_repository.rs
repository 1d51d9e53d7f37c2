use crate::config::DEFAULT_LESSON_AMOUNT;
use crate::entities::{
    lesson_record,
    sea_orm_active_enums::{LessonStatus, PaymentStatus},
    teacher, timetable, timetable_class_group, week,
};
use crate::repositories::lesson_result::{AddLessonResult, MarkAttendedResult, SwapResult};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
    QueryOrder, QuerySelect, Set, SqlErr,
};

pub struct LessonRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Default, Clone, Copy)]
pub struct LessonFilter {
    pub week_id: Option<i32>,
    pub class_group_id: Option<i32>,
    pub subject_id: Option<i32>,
}

/// Filters of the staff lesson listing
#[derive(Debug, Default, Clone, Copy)]
pub struct AdminLessonFilter {
    pub week_id: Option<i32>,
    pub teacher_id: Option<i32>,
    pub class_group_id: Option<i32>,
    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,
}

#[derive(Debug, Clone)]
pub struct StaffLesson {
    pub created_by: Option<i32>,
    pub timetable_id: i32,
    pub week_id: i32,
    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub amount: Option<Decimal>,
}

struct NewLesson {
    timetable_id: i32,
    week_id: i32,
    created_by: i32,
    status: LessonStatus,
    payment_status: PaymentStatus,
    amount: Option<Decimal>,
}

#[derive(Debug, Default, Clone)]
pub struct LessonUpdate {
    pub status: Option<LessonStatus>,
    pub payment_status: Option<PaymentStatus>,
    pub amount: Option<Decimal>,
}

impl LessonRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> LessonRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, lesson_id: i32) -> Result<Option<lesson_record::Model>> {
        let lesson = lesson_record::Entity::find_by_id(lesson_id)
            .one(self.db)
            .await?;
        Ok(lesson)
    }

    pub async fn find_with_timetable(
        &self,
        lesson_id: i32,
    ) -> Result<Option<(lesson_record::Model, Option<timetable::Model>)>> {
        let lesson = lesson_record::Entity::find_by_id(lesson_id)
            .find_also_related(timetable::Entity)
            .one(self.db)
            .await?;
        Ok(lesson)
    }

    /// Record one lesson for `teacher_id` on a slot it owns.
    pub async fn add_lesson(
        &self,
        teacher_id: i32,
        timetable_id: i32,
        week_id: i32,
        amount: Option<Decimal>,
    ) -> Result<AddLessonResult> {
        let slot = timetable::Entity::find_by_id(timetable_id)
            .one(self.db)
            .await?;
        match slot {
            Some(slot) if slot.teacher_id == teacher_id => {}
            _ => return Ok(AddLessonResult::InvalidTimetable),
        }

        self.insert_lesson(NewLesson {
            timetable_id,
            week_id,
            created_by: teacher_id,
            status: LessonStatus::Pending,
            payment_status: PaymentStatus::Unpaid,
            amount,
        })
        .await
    }

    /// Staff entry of a lesson. With `created_by` set the slot must belong to
    /// that teacher; without it the slot's teacher is recorded.
    pub async fn add_lesson_as_staff(&self, staff_lesson: StaffLesson) -> Result<AddLessonResult> {
        let Some(slot) = timetable::Entity::find_by_id(staff_lesson.timetable_id)
            .one(self.db)
            .await?
        else {
            return Ok(AddLessonResult::InvalidTimetable);
        };

        let created_by = match staff_lesson.created_by {
            Some(teacher_id) if teacher_id != slot.teacher_id => {
                return Ok(AddLessonResult::InvalidTimetable);
            }
            Some(teacher_id) => teacher_id,
            None => slot.teacher_id,
        };

        self.insert_lesson(NewLesson {
            timetable_id: slot.id,
            week_id: staff_lesson.week_id,
            created_by,
            status: staff_lesson.status.unwrap_or(LessonStatus::Pending),
            payment_status: staff_lesson.payment_status.unwrap_or(PaymentStatus::Unpaid),
            amount: staff_lesson.amount,
        })
        .await
    }

    async fn insert_lesson(&self, new_lesson: NewLesson) -> Result<AddLessonResult> {
        let NewLesson {
            timetable_id,
            week_id,
            created_by,
            status,
            payment_status,
            amount,
        } = new_lesson;

        if week::Entity::find_by_id(week_id).one(self.db).await?.is_none() {
            return Ok(AddLessonResult::WeekNotFound);
        }

        let existing = lesson_record::Entity::find()
            .filter(lesson_record::Column::TimetableId.eq(timetable_id))
            .filter(lesson_record::Column::WeekId.eq(week_id))
            .one(self.db)
            .await?;
        if existing.is_some() {
            tracing::info!(
                "Rejected duplicate lesson for timetable {} in week {}",
                timetable_id,
                week_id
            );
            return Ok(AddLessonResult::Duplicate);
        }

        let lesson = lesson_record::ActiveModel {
            timetable_id: Set(timetable_id),
            week_id: Set(week_id),
            created_by: Set(created_by),
            swapped_with: Set(None),
            status: Set(status),
            payment_status: Set(payment_status),
            amount: Set(amount.unwrap_or(DEFAULT_LESSON_AMOUNT)),
            ..Default::default()
        };

        match lesson.insert(self.db).await {
            Ok(model) => {
                tracing::info!(
                    "Lesson {} recorded by teacher {} for timetable {} in week {}",
                    model.id,
                    created_by,
                    timetable_id,
                    week_id
                );
                Ok(AddLessonResult::Created(model))
            }
            // Lost the race against a concurrent insert of the same pair
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                tracing::info!(
                    "Rejected duplicate lesson for timetable {} in week {}",
                    timetable_id,
                    week_id
                );
                Ok(AddLessonResult::Duplicate)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Every lesson matching `filter`, newest first
    pub async fn find_all(&self, filter: AdminLessonFilter) -> Result<Vec<lesson_record::Model>> {
        let mut query = lesson_record::Entity::find();

        if filter.teacher_id.is_some() || filter.class_group_id.is_some() {
            let mut slots = timetable::Entity::find()
                .select_only()
                .column(timetable::Column::Id);
            if let Some(teacher_id) = filter.teacher_id {
                slots = slots.filter(timetable::Column::TeacherId.eq(teacher_id));
            }
            let mut timetable_ids: Vec<i32> = slots.into_tuple::<i32>().all(self.db).await?;

            if let Some(class_group_id) = filter.class_group_id {
                if timetable_ids.is_empty() {
                    return Ok(Vec::new());
                }
                timetable_ids = timetable_class_group::Entity::find()
                    .filter(timetable_class_group::Column::ClassGroupId.eq(class_group_id))
                    .filter(timetable_class_group::Column::TimetableId.is_in(timetable_ids))
                    .select_only()
                    .column(timetable_class_group::Column::TimetableId)
                    .into_tuple::<i32>()
                    .all(self.db)
                    .await?;
            }

            if timetable_ids.is_empty() {
                return Ok(Vec::new());
            }
            query = query.filter(lesson_record::Column::TimetableId.is_in(timetable_ids));
        }

        if let Some(week_id) = filter.week_id {
            query = query.filter(lesson_record::Column::WeekId.eq(week_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(lesson_record::Column::Status.eq(status));
        }
        if let Some(payment_status) = filter.payment_status {
            query = query.filter(lesson_record::Column::PaymentStatus.eq(payment_status));
        }

        let lessons = query
            .order_by_desc(lesson_record::Column::Id)
            .all(self.db)
            .await?;
        Ok(lessons)
    }

    /// Lessons on the teacher's own slots, newest first, narrowed by `filter`.
    pub async fn find_for_teacher(
        &self,
        teacher_id: i32,
        filter: LessonFilter,
    ) -> Result<Vec<lesson_record::Model>> {
        let mut slots = timetable::Entity::find()
            .filter(timetable::Column::TeacherId.eq(teacher_id))
            .select_only()
            .column(timetable::Column::Id);
        if let Some(subject_id) = filter.subject_id {
            slots = slots.filter(timetable::Column::SubjectId.eq(subject_id));
        }
        let mut timetable_ids: Vec<i32> = slots.into_tuple::<i32>().all(self.db).await?;

        if let Some(class_group_id) = filter.class_group_id {
            if timetable_ids.is_empty() {
                return Ok(Vec::new());
            }
            timetable_ids = timetable_class_group::Entity::find()
                .filter(timetable_class_group::Column::ClassGroupId.eq(class_group_id))
                .filter(timetable_class_group::Column::TimetableId.is_in(timetable_ids))
                .select_only()
                .column(timetable_class_group::Column::TimetableId)
                .into_tuple::<i32>()
                .all(self.db)
                .await?;
        }

        if timetable_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut query = lesson_record::Entity::find()
            .filter(lesson_record::Column::TimetableId.is_in(timetable_ids));
        if let Some(week_id) = filter.week_id {
            query = query.filter(lesson_record::Column::WeekId.eq(week_id));
        }

        let lessons = query
            .order_by_desc(lesson_record::Column::Id)
            .all(self.db)
            .await?;
        Ok(lessons)
    }

    /// Resets the lesson to Pending on behalf of its owner or substitute.
    pub async fn mark_attended(
        &self,
        lesson_id: i32,
        teacher: &teacher::Model,
    ) -> Result<MarkAttendedResult> {
        let Some((lesson, slot)) = self.find_with_timetable(lesson_id).await? else {
            return Ok(MarkAttendedResult::NotFound);
        };

        let is_owner = slot.is_some_and(|slot| slot.teacher_id == teacher.id);
        let is_substitute = lesson.swapped_with == Some(teacher.id);
        if !is_owner && !is_substitute {
            tracing::warn!(
                "Teacher {} is not allowed to mark lesson {}",
                teacher.id,
                lesson_id
            );
            return Ok(MarkAttendedResult::NotAllowed);
        }

        let mut active = lesson.into_active_model();
        active.status = Set(LessonStatus::Pending);
        active.created_by = Set(teacher.id);
        let updated = active.update(self.db).await?;

        Ok(MarkAttendedResult::Marked(updated))
    }

    /// Sets or clears the substitute. Only the slot owner may do this.
    pub async fn assign_substitute(
        &self,
        lesson_id: i32,
        teacher: &teacher::Model,
        substitute_id: Option<i32>,
    ) -> Result<SwapResult> {
        let Some((lesson, slot)) = self.find_with_timetable(lesson_id).await? else {
            return Ok(SwapResult::NotFound);
        };

        if !slot.is_some_and(|slot| slot.teacher_id == teacher.id) {
            return Ok(SwapResult::NotAllowed);
        }

        if let Some(substitute_id) = substitute_id {
            if substitute_id == teacher.id {
                return Ok(SwapResult::InvalidSubstitute);
            }
            let substitute = teacher::Entity::find_by_id(substitute_id)
                .one(self.db)
                .await?;
            if substitute.is_none() {
                return Ok(SwapResult::InvalidSubstitute);
            }
        }

        let mut active = lesson.into_active_model();
        active.swapped_with = Set(substitute_id);
        let updated = active.update(self.db).await?;

        tracing::info!(
            "Lesson {} substitute set to {:?} by teacher {}",
            lesson_id,
            substitute_id,
            teacher.id
        );

        Ok(SwapResult::Assigned(updated))
    }

    pub async fn update(
        &self,
        lesson_id: i32,
        update: LessonUpdate,
    ) -> Result<Option<lesson_record::Model>> {
        let Some(lesson) = self.find_by_id(lesson_id).await? else {
            return Ok(None);
        };

        if update.status.is_none() && update.payment_status.is_none() && update.amount.is_none() {
            return Ok(Some(lesson));
        }

        let mut active = lesson.into_active_model();
        if let Some(status) = update.status {
            active.status = Set(status);
        }
        if let Some(payment_status) = update.payment_status {
            active.payment_status = Set(payment_status);
        }
        if let Some(amount) = update.amount {
            active.amount = Set(amount);
        }

        let updated = active.update(self.db).await?;
        Ok(Some(updated))
    }
}
