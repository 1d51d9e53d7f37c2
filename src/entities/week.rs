//! `SeaORM` Entity for week table

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "week"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub number: i32,
    pub start_date: Date,
    pub end_date: Date,
    pub created_at: DateTime,
}

impl Model {
    pub fn label(&self) -> String {
        format!(
            "Week {} ({} - {})",
            self.number, self.start_date, self.end_date
        )
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    Number,
    StartDate,
    EndDate,
    CreatedAt,
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
    LessonRecord,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::Number => ColumnType::Integer.def(),
            Self::StartDate => ColumnType::Date.def(),
            Self::EndDate => ColumnType::Date.def(),
            Self::CreatedAt => ColumnType::DateTime.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::LessonRecord => Entity::has_many(super::lesson_record::Entity).into(),
        }
    }
}

impl Related<super::lesson_record::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::LessonRecord.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
