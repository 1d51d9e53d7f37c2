//! `SeaORM` Entity for timetable table

use super::sea_orm_active_enums::DayOfWeek;
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "timetable"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub subject_id: Option<i32>,
    pub teacher_id: i32,
    pub day: DayOfWeek,
    pub start_time: Time,
    pub end_time: Time,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    SubjectId,
    TeacherId,
    Day,
    StartTime,
    EndTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DerivePrimaryKey)]
pub enum PrimaryKey {
    Id,
}

impl PrimaryKeyTrait for PrimaryKey {
    type ValueType = i32;
    fn auto_increment() -> bool {
        true
    }
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Subject,
    Teacher,
    LessonRecord,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::SubjectId => ColumnType::Integer.def().null(),
            Self::TeacherId => ColumnType::Integer.def(),
            Self::Day => DayOfWeek::db_type(),
            Self::StartTime => ColumnType::Time.def(),
            Self::EndTime => ColumnType::Time.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Subject => Entity::belongs_to(super::subject::Entity)
                .from(Column::SubjectId)
                .to(super::subject::Column::Id)
                .into(),
            Self::Teacher => Entity::belongs_to(super::teacher::Entity)
                .from(Column::TeacherId)
                .to(super::teacher::Column::Id)
                .into(),
            Self::LessonRecord => Entity::has_many(super::lesson_record::Entity).into(),
        }
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Subject.def()
    }
}

impl Related<super::teacher::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Teacher.def()
    }
}

impl Related<super::lesson_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonRecord.def()
    }
}

impl Related<super::class_group::Entity> for Entity {
    fn to() -> RelationDef {
        super::timetable_class_group::Relation::ClassGroup.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::timetable_class_group::Relation::Timetable.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
