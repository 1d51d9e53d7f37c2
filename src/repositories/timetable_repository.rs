use crate::entities::{
    class_group, lesson_record, sea_orm_active_enums::DayOfWeek, timetable, timetable_class_group,
};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::NaiveTime;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder,
    QuerySelect, Set, TransactionTrait,
};
use std::collections::{HashMap, HashSet};

pub struct TimetableRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewTimetable {
    pub subject_id: Option<i32>,
    pub teacher_id: i32,
    pub day: DayOfWeek,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub class_group_ids: Vec<i32>,
}

impl TimetableRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> TimetableRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(&self, new_timetable: NewTimetable) -> Result<timetable::Model> {
        let txn = self.db.begin().await?;

        let slot = timetable::ActiveModel {
            subject_id: Set(new_timetable.subject_id),
            teacher_id: Set(new_timetable.teacher_id),
            day: Set(new_timetable.day),
            start_time: Set(new_timetable.start_time),
            end_time: Set(new_timetable.end_time),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !new_timetable.class_group_ids.is_empty() {
            let links = new_timetable
                .class_group_ids
                .iter()
                .map(|class_group_id| timetable_class_group::ActiveModel {
                    timetable_id: Set(slot.id),
                    class_group_id: Set(*class_group_id),
                });
            timetable_class_group::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok(slot)
    }

    pub async fn find_by_id(&self, timetable_id: i32) -> Result<Option<timetable::Model>> {
        let slot = timetable::Entity::find_by_id(timetable_id).one(self.db).await?;
        Ok(slot)
    }

    pub async fn find_all(&self) -> Result<Vec<timetable::Model>> {
        let slots = timetable::Entity::find()
            .order_by_asc(timetable::Column::Id)
            .all(self.db)
            .await?;
        Ok(slots)
    }

    pub async fn find_by_teacher(&self, teacher_id: i32) -> Result<Vec<timetable::Model>> {
        let slots = timetable::Entity::find()
            .filter(timetable::Column::TeacherId.eq(teacher_id))
            .order_by_asc(timetable::Column::Id)
            .all(self.db)
            .await?;
        Ok(slots)
    }

    /// The teacher's slots, minus those already recorded in `week_id`
    pub async fn find_available_for_week(
        &self,
        teacher_id: i32,
        week_id: Option<i32>,
    ) -> Result<Vec<timetable::Model>> {
        let slots = self.find_by_teacher(teacher_id).await?;

        let Some(week_id) = week_id else {
            return Ok(slots);
        };
        if slots.is_empty() {
            return Ok(slots);
        }

        let used: HashSet<i32> = lesson_record::Entity::find()
            .filter(lesson_record::Column::WeekId.eq(week_id))
            .filter(lesson_record::Column::TimetableId.is_in(slots.iter().map(|s| s.id)))
            .select_only()
            .column(lesson_record::Column::TimetableId)
            .into_tuple::<i32>()
            .all(self.db)
            .await?
            .into_iter()
            .collect();

        Ok(slots
            .into_iter()
            .filter(|slot| !used.contains(&slot.id))
            .collect())
    }

    /// Class groups of each slot, keyed by timetable id
    pub async fn class_groups_for(
        &self,
        timetable_ids: &[i32],
    ) -> Result<HashMap<i32, Vec<class_group::Model>>> {
        let mut grouped: HashMap<i32, Vec<class_group::Model>> = HashMap::new();
        if timetable_ids.is_empty() {
            return Ok(grouped);
        }

        let links = timetable_class_group::Entity::find()
            .filter(timetable_class_group::Column::TimetableId.is_in(timetable_ids.to_vec()))
            .find_also_related(class_group::Entity)
            .order_by_asc(timetable_class_group::Column::ClassGroupId)
            .all(self.db)
            .await?;

        for (link, class) in links {
            if let Some(class) = class {
                grouped.entry(link.timetable_id).or_default().push(class);
            }
        }

        Ok(grouped)
    }
}
