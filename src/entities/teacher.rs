//! `SeaORM` Entity for teacher table

use sea_orm::{entity::prelude::*, sea_query::StringLen};
use serde::{Deserialize, Serialize};

#[derive(Copy, Clone, Default, Debug, DeriveEntity)]
pub struct Entity;

impl EntityName for Entity {
    fn table_name(&self) -> &str {
        "teacher"
    }
}

#[derive(Clone, Debug, PartialEq, DeriveModel, DeriveActiveModel, Eq, Serialize, Deserialize)]
pub struct Model {
    #[serde(skip_deserializing)]
    pub id: i32,
    pub user_id: i32,
    pub profile_picture: Option<String>,
    pub is_class_teacher: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveColumn)]
pub enum Column {
    Id,
    UserId,
    ProfilePicture,
    IsClassTeacher,
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
    User,
    Timetable,
}

impl ColumnTrait for Column {
    type EntityName = Entity;
    fn def(&self) -> ColumnDef {
        match self {
            Self::Id => ColumnType::Integer.def(),
            Self::UserId => ColumnType::Integer.def().unique(),
            Self::ProfilePicture => ColumnType::String(StringLen::None).def().null(),
            Self::IsClassTeacher => ColumnType::Boolean.def(),
        }
    }
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Self::User => Entity::belongs_to(super::user::Entity)
                .from(Column::UserId)
                .to(super::user::Column::Id)
                .into(),
            Self::Timetable => Entity::has_many(super::timetable::Entity).into(),
        }
    }
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::timetable::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Timetable.def()
    }
}

impl Related<super::subject::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_subject::Relation::Subject.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::teacher_subject::Relation::Teacher.def().rev())
    }
}

impl Related<super::class_group::Entity> for Entity {
    fn to() -> RelationDef {
        super::teacher_class_group::Relation::ClassGroup.def()
    }
    fn via() -> Option<RelationDef> {
        Some(super::teacher_class_group::Relation::Teacher.def().rev())
    }
}

impl ActiveModelBehavior for ActiveModel {}
