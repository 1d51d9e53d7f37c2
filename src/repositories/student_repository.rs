use crate::config::TERM_FEE;
use crate::entities::{class_group, student, student_payment};
use crate::repositories::student_result::StudentWriteResult;
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, IntoActiveModel,
    QueryFilter, QueryOrder, Set, SqlErr, TransactionTrait,
};

pub struct StudentRepository<'a> {
    db: &'a DatabaseConnection,
}

#[derive(Debug, Clone)]
pub struct NewStudent {
    pub first_name: String,
    pub last_name: String,
    pub admission_number: String,
    pub class_group_id: i32,
}

#[derive(Debug, Default, Clone)]
pub struct StudentUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub admission_number: Option<String>,
}

impl StudentRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}

impl<'a> StudentRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn find_by_id(&self, student_id: i32) -> Result<Option<student::Model>> {
        let student = student::Entity::find_by_id(student_id).one(self.db).await?;
        Ok(student)
    }

    pub async fn find_by_admission_number(
        &self,
        admission_number: &str,
    ) -> Result<Option<student::Model>> {
        let student = student::Entity::find()
            .filter(student::Column::AdmissionNumber.eq(admission_number))
            .one(self.db)
            .await?;
        Ok(student)
    }

    pub async fn find_by_class_group(&self, class_group_id: i32) -> Result<Vec<student::Model>> {
        let students = student::Entity::find()
            .filter(student::Column::ClassGroupId.eq(class_group_id))
            .order_by_asc(student::Column::LastName)
            .order_by_asc(student::Column::FirstName)
            .all(self.db)
            .await?;
        Ok(students)
    }

    /// All students, or only those of `class_group_id` when given
    pub async fn find_all(&self, class_group_id: Option<i32>) -> Result<Vec<student::Model>> {
        match class_group_id {
            Some(class_group_id) => self.find_by_class_group(class_group_id).await,
            None => {
                let students = student::Entity::find()
                    .order_by_asc(student::Column::Id)
                    .all(self.db)
                    .await?;
                Ok(students)
            }
        }
    }

    pub async fn create(&self, new_student: NewStudent) -> Result<StudentWriteResult> {
        let class = class_group::Entity::find_by_id(new_student.class_group_id)
            .one(self.db)
            .await?;
        if class.is_none() {
            return Ok(StudentWriteResult::ClassGroupNotFound);
        }

        if self
            .find_by_admission_number(&new_student.admission_number)
            .await?
            .is_some()
        {
            return Ok(StudentWriteResult::DuplicateAdmissionNumber);
        }

        let student_model = student::ActiveModel {
            first_name: Set(new_student.first_name),
            last_name: Set(new_student.last_name),
            admission_number: Set(new_student.admission_number),
            class_group_id: Set(new_student.class_group_id),
            term_fee: Set(TERM_FEE),
            amount_paid: Set(Decimal::ZERO),
            ..Default::default()
        };

        match student_model.insert(self.db).await {
            Ok(model) => Ok(StudentWriteResult::Saved(model)),
            Err(e) if is_unique_violation(&e) => Ok(StudentWriteResult::DuplicateAdmissionNumber),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn update(
        &self,
        student_id: i32,
        update: StudentUpdate,
    ) -> Result<StudentWriteResult> {
        let Some(existing) = self.find_by_id(student_id).await? else {
            return Ok(StudentWriteResult::NotFound);
        };

        if let Some(admission_number) = &update.admission_number {
            if let Some(other) = self.find_by_admission_number(admission_number).await? {
                if other.id != existing.id {
                    return Ok(StudentWriteResult::DuplicateAdmissionNumber);
                }
            }
        }

        let mut active = existing.clone().into_active_model();
        let mut changed = false;
        if let Some(first_name) = update.first_name {
            active.first_name = Set(first_name);
            changed = true;
        }
        if let Some(last_name) = update.last_name {
            active.last_name = Set(last_name);
            changed = true;
        }
        if let Some(admission_number) = update.admission_number {
            active.admission_number = Set(admission_number);
            changed = true;
        }

        if !changed {
            return Ok(StudentWriteResult::Saved(existing));
        }

        match active.update(self.db).await {
            Ok(model) => Ok(StudentWriteResult::Saved(model)),
            Err(e) if is_unique_violation(&e) => Ok(StudentWriteResult::DuplicateAdmissionNumber),
            Err(e) => Err(e.into()),
        }
    }

    /// Deletes the student together with its payments. Returns false when missing.
    pub async fn delete(&self, student_id: i32) -> Result<bool> {
        let txn = self.db.begin().await?;

        let removed_payments = student_payment::Entity::delete_many()
            .filter(student_payment::Column::StudentId.eq(student_id))
            .exec(&txn)
            .await?;
        let removed = student::Entity::delete_by_id(student_id).exec(&txn).await?;

        if removed.rows_affected == 0 {
            txn.rollback().await?;
            return Ok(false);
        }

        txn.commit().await?;
        tracing::info!(
            "Deleted student {} and {} payment(s)",
            student_id,
            removed_payments.rows_affected
        );
        Ok(true)
    }
}
