use sea_orm_migration::prelude::*;

use crate::m20251014_000002_create_catalog_tables::{ClassGroup, Teacher};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Student::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Student::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Student::FirstName).string_len(50).not_null())
                    .col(ColumnDef::new(Student::LastName).string_len(50).not_null())
                    .col(
                        ColumnDef::new(Student::AdmissionNumber)
                            .string_len(20)
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Student::ClassGroupId).integer().not_null())
                    .col(
                        ColumnDef::new(Student::TermFee)
                            .decimal_len(8, 2)
                            .not_null()
                            .default(1500),
                    )
                    .col(
                        ColumnDef::new(Student::AmountPaid)
                            .decimal_len(8, 2)
                            .not_null()
                            .default(0),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_class_group")
                            .from(Student::Table, Student::ClassGroupId)
                            .to(ClassGroup::Table, ClassGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(StudentPayment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(StudentPayment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(StudentPayment::StudentId).integer().not_null())
                    .col(
                        ColumnDef::new(StudentPayment::Amount)
                            .decimal_len(8, 2)
                            .not_null(),
                    )
                    .col(ColumnDef::new(StudentPayment::DatePaid).date().not_null())
                    .col(ColumnDef::new(StudentPayment::Term).string_len(20).not_null())
                    .col(ColumnDef::new(StudentPayment::RecordedBy).integer().null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_payment_student")
                            .from(StudentPayment::Table, StudentPayment::StudentId)
                            .to(Student::Table, Student::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_student_payment_recorded_by")
                            .from(StudentPayment::Table, StudentPayment::RecordedBy)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_class_group_id")
                    .table(Student::Table)
                    .col(Student::ClassGroupId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_student_payment_student_id")
                    .table(StudentPayment::Table)
                    .col(StudentPayment::StudentId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(StudentPayment::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Student::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum Student {
    Table,
    Id,
    FirstName,
    LastName,
    AdmissionNumber,
    ClassGroupId,
    TermFee,
    AmountPaid,
}

#[derive(DeriveIden)]
enum StudentPayment {
    Table,
    Id,
    StudentId,
    Amount,
    DatePaid,
    Term,
    RecordedBy,
}
