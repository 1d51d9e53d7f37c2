//! `SeaORM` Entity for student table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "student"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub admission_number: String,
    pub class_group_id: i32,
    pub term_fee: Decimal,
    pub amount_paid: Decimal,
}

impl Model {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Outstanding fee, derived and never stored
    pub fn balance(&self) -> Decimal {
        self.term_fee - self.amount_paid
    }
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    FirstName,
    LastName,
    AdmissionNumber,
    ClassGroupId,
    TermFee,
    AmountPaid,
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
    ClassGroup,
    StudentPayment,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::FirstName => ColumnType::String(StringLen::N(50u32)).def(),
            Self::LastName => ColumnType::String(StringLen::N(50u32)).def(),
            Self::AdmissionNumber => ColumnType::String(StringLen::N(20u32)).def().unique(),
            Self::ClassGroupId => ColumnType::Integer.def(),
            Self::TermFee => ColumnType::Decimal(Some((8, 2))).def(),
            Self::AmountPaid => ColumnType::Decimal(Some((8, 2))).def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::ClassGroup => Entity::belongs_to(super::class_group::Entity)
                .from(Column::ClassGroupId)
                .to(super::class_group::Column::Id)
                .into(),
            Self::StudentPayment => Entity::has_many(super::student_payment::Entity).into(),
        }
    }
}

impl Related<super::class_group::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ClassGroup.def()
    }
}

impl Related<super::student_payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudentPayment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
