//! `SeaORM` Entity for student_payment table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student_payment"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub student_id: i32,
    pub amount: Decimal,
    pub date_paid: Date,
    pub term: String,
    pub recorded_by: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    StudentId,
    Amount,
    DatePaid,
    Term,
    RecordedBy,
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
    Student,
    RecordedBy,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::StudentId => ColumnType::Integer.def(),
            Self::Amount => ColumnType::Decimal(Some((8, 2))).def(),
            Self::DatePaid => ColumnType::Date.def(),
            Self::Term => ColumnType::String(StringLen::N(20u32)).def(),
            Self::RecordedBy => ColumnType::Integer.def().null(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::Student => Entity::belongs_to(super::student::Entity)
                .from(Column::StudentId)
                .to(super::student::Column::Id)
                .into(),
            Self::RecordedBy => Entity::belongs_to(super::teacher::Entity)
                .from(Column::RecordedBy)
                .to(super::teacher::Column::Id)
                .into(),
        }
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
