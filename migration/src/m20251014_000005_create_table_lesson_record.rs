use sea_orm_migration::prelude::*;

use crate::m20251014_000002_create_catalog_tables::Teacher;
use crate::m20251014_000003_create_table_timetable::Timetable;
use crate::m20251014_000004_create_table_week::Week;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(LessonRecord::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(LessonRecord::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(LessonRecord::TimetableId).integer().not_null())
                    .col(ColumnDef::new(LessonRecord::WeekId).integer().not_null())
                    .col(ColumnDef::new(LessonRecord::CreatedBy).integer().not_null())
                    .col(ColumnDef::new(LessonRecord::SwappedWith).integer().null())
                    .col(
                        ColumnDef::new(LessonRecord::Status)
                            .string_len(20)
                            .not_null()
                            .default("Pending"),
                    )
                    .col(
                        ColumnDef::new(LessonRecord::PaymentStatus)
                            .string_len(20)
                            .not_null()
                            .default("Unpaid"),
                    )
                    .col(
                        ColumnDef::new(LessonRecord::Amount)
                            .decimal_len(10, 2)
                            .not_null()
                            .default(400),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_record_timetable")
                            .from(LessonRecord::Table, LessonRecord::TimetableId)
                            .to(Timetable::Table, Timetable::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_record_week")
                            .from(LessonRecord::Table, LessonRecord::WeekId)
                            .to(Week::Table, Week::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_record_created_by")
                            .from(LessonRecord::Table, LessonRecord::CreatedBy)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_lesson_record_swapped_with")
                            .from(LessonRecord::Table, LessonRecord::SwappedWith)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::SetNull),
                    )
                    .to_owned(),
            )
            .await?;

        // One record per timetable slot per week
        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_record_timetable_week")
                    .table(LessonRecord::Table)
                    .col(LessonRecord::TimetableId)
                    .col(LessonRecord::WeekId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_lesson_record_week_id")
                    .table(LessonRecord::Table)
                    .col(LessonRecord::WeekId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_lesson_record_week_id")
                    .table(LessonRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name("idx_lesson_record_timetable_week")
                    .table(LessonRecord::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(LessonRecord::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum LessonRecord {
    Table,
    Id,
    TimetableId,
    WeekId,
    CreatedBy,
    SwappedWith,
    Status,
    PaymentStatus,
    Amount,
}
