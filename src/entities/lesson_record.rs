//! `SeaORM` Entity for lesson_record table

use super::sea_orm_active_enums::{LessonStatus, PaymentStatus};
use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "lesson_record"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub timetable_id: i32,
    pub week_id: i32,
    pub created_by: i32,
    /// Substitute teacher covering the slot, if any
    pub swapped_with: Option<i32>,
    pub status: LessonStatus,
    pub payment_status: PaymentStatus,
    pub amount: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    TimetableId,
    WeekId,
    CreatedBy,
    SwappedWith,
    Status,
    PaymentStatus,
    Amount,
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
    Timetable,
    Week,
    CreatedBy,
    SwappedWith,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::TimetableId => ColumnType::Integer.def(),
            Self::WeekId => ColumnType::Integer.def(),
            Self::CreatedBy => ColumnType::Integer.def(),
            Self::SwappedWith => ColumnType::Integer.def().null(),
            Self::Status => LessonStatus::db_type(),
            Self::PaymentStatus => PaymentStatus::db_type(),
            Self::Amount => ColumnType::Decimal(Some((10, 2))).def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Timetable => Entity::belongs_to(super::timetable::Entity)
                .from(Column::TimetableId)
                .to(super::timetable::Column::Id)
                .into(),
            Self::Week => Entity::belongs_to(super::week::Entity)
                .from(Column::WeekId)
                .to(super::week::Column::Id)
                .into(),
            Self::CreatedBy => Entity::belongs_to(super::teacher::Entity)
                .from(Column::CreatedBy)
                .to(super::teacher::Column::Id)
                .into(),
            Self::SwappedWith => Entity::belongs_to(super::teacher::Entity)
                .from(Column::SwappedWith)
                .to(super::teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<super::timetable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timetable.def()
    }
}

impl Related<super::week::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Week.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
