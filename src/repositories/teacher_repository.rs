use crate::entities::{class_group, subject, teacher, teacher_class_group, teacher_subject, user};
use crate::repositories::UserRepository;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use std::collections::HashMap;

pub struct TeacherRepository<'a> {
    db: &'a DatabaseConnection,
}

pub struct NewTeacher {
    pub username: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub is_class_teacher: bool,
    pub subject_ids: Vec<i32>,
    pub class_group_ids: Vec<i32>,
}

impl TeacherRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> TeacherRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, teacher_id: i32) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find_by_id(teacher_id).one(self.db).await?;
        Ok(teacher)
    }

    pub async fn find_by_user_id(&self, user_id: i32) -> Result<Option<teacher::Model>> {
        let teacher = teacher::Entity::find()
            .filter(teacher::Column::UserId.eq(user_id))
            .one(self.db)
            .await?;
        Ok(teacher)
    }

    /// Every teacher paired with its login account, ordered by id
    pub async fn find_all_with_users(&self) -> Result<Vec<(teacher::Model, Option<user::Model>)>> {
        let teachers = teacher::Entity::find()
            .find_also_related(user::Entity)
            .order_by_asc(teacher::Column::Id)
            .all(self.db)
            .await?;
        Ok(teachers)
    }

    /// Display names keyed by teacher id
    pub async fn display_names(&self) -> Result<HashMap<i32, String>> {
        let names = self
            .find_all_with_users()
            .await?
            .into_iter()
            .map(|(teacher, user)| {
                let name = user
                    .map(|u| u.display_name())
                    .unwrap_or_else(|| format!("Teacher {}", teacher.id));
                (teacher.id, name)
            })
            .collect();
        Ok(names)
    }

    pub async fn subjects_of(&self, teacher: &teacher::Model) -> Result<Vec<subject::Model>> {
        let subjects = teacher.find_related(subject::Entity).all(self.db).await?;
        Ok(subjects)
    }

    pub async fn class_groups_of(&self, teacher: &teacher::Model) -> Result<Vec<class_group::Model>> {
        let classes = teacher
            .find_related(class_group::Entity)
            .order_by_asc(class_group::Column::Name)
            .all(self.db)
            .await?;
        Ok(classes)
    }

    /// Creates the login account, the teacher profile and its links in one transaction
    pub async fn create_with_user(&self, new_teacher: NewTeacher) -> Result<(teacher::Model, user::Model)> {
        let txn = self.db.begin().await?;

        let user = UserRepository::create(
            &txn,
            &new_teacher.username,
            new_teacher.password_hash,
            &new_teacher.first_name,
            &new_teacher.last_name,
            false,
        )
        .await?;

        let teacher = teacher::ActiveModel {
            user_id: Set(user.id),
            profile_picture: Set(None),
            is_class_teacher: Set(new_teacher.is_class_teacher),
            ..Default::default()
        }
        .insert(&txn)
        .await?;

        if !new_teacher.subject_ids.is_empty() {
            let links = new_teacher
                .subject_ids
                .iter()
                .map(|subject_id| teacher_subject::ActiveModel {
                    teacher_id: Set(teacher.id),
                    subject_id: Set(*subject_id),
                });
            teacher_subject::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        if !new_teacher.class_group_ids.is_empty() {
            let links = new_teacher
                .class_group_ids
                .iter()
                .map(|class_group_id| teacher_class_group::ActiveModel {
                    teacher_id: Set(teacher.id),
                    class_group_id: Set(*class_group_id),
                });
            teacher_class_group::Entity::insert_many(links)
                .exec_without_returning(&txn)
                .await?;
        }

        txn.commit().await?;
        Ok((teacher, user))
    }

    pub async fn update_profile_picture(
        &self,
        teacher: teacher::Model,
        profile_picture: Option<String>,
    ) -> Result<teacher::Model> {
        let mut active_model: teacher::ActiveModel = teacher.into();
        active_model.profile_picture = Set(profile_picture);
        let result = active_model.update(self.db).await?;
        Ok(result)
    }
}
