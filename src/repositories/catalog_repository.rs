use crate::entities::{class_group, subject, week};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};

/// Subjects, class groups and weeks
pub struct CatalogRepository<'a> {
    db: &'a DatabaseConnection,
}

impl CatalogRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> CatalogRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create_subject(&self, name: String) -> Result<subject::Model> {
        let subject_model = subject::ActiveModel {
            name: Set(name),
            ..Default::default()
        };
        let result = subject_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_all_subjects(&self) -> Result<Vec<subject::Model>> {
        let subjects = subject::Entity::find()
            .order_by_asc(subject::Column::Name)
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn find_subject(&self, subject_id: i32) -> Result<Option<subject::Model>> {
        let subject = subject::Entity::find_by_id(subject_id).one(self.db).await?;
        Ok(subject)
    }

    pub async fn find_subjects_by_ids(&self, subject_ids: Vec<i32>) -> Result<Vec<subject::Model>> {
        if subject_ids.is_empty() {
            return Ok(Vec::new());
        }
        let subjects = subject::Entity::find()
            .filter(subject::Column::Id.is_in(subject_ids))
            .all(self.db)
            .await?;
        Ok(subjects)
    }

    pub async fn create_class_group(
        &self,
        name: String,
        class_teacher_id: Option<i32>,
    ) -> Result<class_group::Model> {
        let class_model = class_group::ActiveModel {
            name: Set(name),
            class_teacher_id: Set(class_teacher_id),
            ..Default::default()
        };
        let result = class_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_all_class_groups(&self) -> Result<Vec<class_group::Model>> {
        let classes = class_group::Entity::find()
            .order_by_asc(class_group::Column::Name)
            .all(self.db)
            .await?;
        Ok(classes)
    }

    pub async fn find_class_group(&self, class_group_id: i32) -> Result<Option<class_group::Model>> {
        let class = class_group::Entity::find_by_id(class_group_id)
            .one(self.db)
            .await?;
        Ok(class)
    }

    pub async fn find_class_group_by_name(&self, name: &str) -> Result<Option<class_group::Model>> {
        let class = class_group::Entity::find()
            .filter(class_group::Column::Name.eq(name))
            .one(self.db)
            .await?;
        Ok(class)
    }

    pub async fn find_class_group_by_teacher(
        &self,
        teacher_id: i32,
    ) -> Result<Option<class_group::Model>> {
        let class = class_group::Entity::find()
            .filter(class_group::Column::ClassTeacherId.eq(teacher_id))
            .one(self.db)
            .await?;
        Ok(class)
    }

    pub async fn find_class_groups_by_ids(
        &self,
        class_group_ids: Vec<i32>,
    ) -> Result<Vec<class_group::Model>> {
        if class_group_ids.is_empty() {
            return Ok(Vec::new());
        }
        let classes = class_group::Entity::find()
            .filter(class_group::Column::Id.is_in(class_group_ids))
            .order_by_asc(class_group::Column::Name)
            .all(self.db)
            .await?;
        Ok(classes)
    }

    pub async fn create_week(
        &self,
        number: i32,
        start_date: NaiveDate,
        end_date: NaiveDate,
    ) -> Result<week::Model> {
        let week_model = week::ActiveModel {
            number: Set(number),
            start_date: Set(start_date),
            end_date: Set(end_date),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };
        let result = week_model.insert(self.db).await?;
        Ok(result)
    }

    pub async fn find_all_weeks(&self) -> Result<Vec<week::Model>> {
        let weeks = week::Entity::find()
            .order_by_asc(week::Column::Number)
            .all(self.db)
            .await?;
        Ok(weeks)
    }

    pub async fn find_week(&self, week_id: i32) -> Result<Option<week::Model>> {
        let week = week::Entity::find_by_id(week_id).one(self.db).await?;
        Ok(week)
    }
}
