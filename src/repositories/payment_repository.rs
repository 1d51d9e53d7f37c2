use crate::entities::{student, student_payment};
use crate::static_service::DATABASE_CONNECTION;
use anyhow::Result;
use chrono::Local;
use rust_decimal::Decimal;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait, sea_query::Expr,
};

pub struct PaymentRepository<'a> {
    db: &'a DatabaseConnection,
}

/// One fee payment to record against a student
#[derive(Debug, Clone)]
pub struct PaymentEntry {
    pub student_id: i32,
    pub amount: Decimal,
}

impl PaymentRepository<'static> {
    pub fn new() -> Self {
        Self {
            db: DATABASE_CONNECTION
                .get()
                .expect("DATABASE_CONNECTION not set"),
        }
    }
}

impl<'a> PaymentRepository<'a> {
    pub fn with_connection(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Appends a payment and adds it to the student's `amount_paid`, one
    /// transaction per entry. Non-positive amounts are ignored.
    pub async fn record_payments(
        &self,
        entries: Vec<PaymentEntry>,
        term: &str,
        recorded_by: Option<i32>,
    ) -> Result<Vec<student_payment::Model>> {
        let mut recorded = Vec::with_capacity(entries.len());
        let today = Local::now().date_naive();

        for entry in entries {
            if entry.amount <= Decimal::ZERO {
                continue;
            }

            let txn = self.db.begin().await?;

            let payment = student_payment::ActiveModel {
                student_id: Set(entry.student_id),
                amount: Set(entry.amount),
                date_paid: Set(today),
                term: Set(term.to_string()),
                recorded_by: Set(recorded_by),
                ..Default::default()
            }
            .insert(&txn)
            .await?;

            student::Entity::update_many()
                .col_expr(
                    student::Column::AmountPaid,
                    Expr::col(student::Column::AmountPaid).add(entry.amount),
                )
                .filter(student::Column::Id.eq(entry.student_id))
                .exec(&txn)
                .await?;

            txn.commit().await?;

            tracing::info!(
                "Recorded payment of {} for student {} ({})",
                entry.amount,
                entry.student_id,
                term
            );
            recorded.push(payment);
        }

        Ok(recorded)
    }

    /// Every payment, latest first
    pub async fn find_all(&self) -> Result<Vec<student_payment::Model>> {
        let payments = student_payment::Entity::find()
            .order_by_desc(student_payment::Column::DatePaid)
            .order_by_desc(student_payment::Column::Id)
            .all(self.db)
            .await?;
        Ok(payments)
    }

    pub async fn find_by_student(&self, student_id: i32) -> Result<Vec<student_payment::Model>> {
        let payments = student_payment::Entity::find()
            .filter(student_payment::Column::StudentId.eq(student_id))
            .order_by_desc(student_payment::Column::DatePaid)
            .order_by_desc(student_payment::Column::Id)
            .all(self.db)
            .await?;
        Ok(payments)
    }

    /// Every payment joined with its student, latest first
    pub async fn find_all_with_students(
        &self,
    ) -> Result<Vec<(student_payment::Model, Option<student::Model>)>> {
        let payments = student_payment::Entity::find()
            .find_also_related(student::Entity)
            .order_by_desc(student_payment::Column::DatePaid)
            .order_by_desc(student_payment::Column::Id)
            .all(self.db)
            .await?;
        Ok(payments)
    }
}
