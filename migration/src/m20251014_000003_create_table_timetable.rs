use sea_orm_migration::prelude::*;

use crate::m20251014_000002_create_catalog_tables::{ClassGroup, Subject, Teacher};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Timetable::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Timetable::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Timetable::SubjectId).integer().null())
                    .col(ColumnDef::new(Timetable::TeacherId).integer().not_null())
                    .col(ColumnDef::new(Timetable::Day).string_len(3).not_null())
                    .col(ColumnDef::new(Timetable::StartTime).time().not_null())
                    .col(ColumnDef::new(Timetable::EndTime).time().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_subject")
                            .from(Timetable::Table, Timetable::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_teacher")
                            .from(Timetable::Table, Timetable::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TimetableClassGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TimetableClassGroup::TimetableId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TimetableClassGroup::ClassGroupId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TimetableClassGroup::TimetableId)
                            .col(TimetableClassGroup::ClassGroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_class_group_timetable")
                            .from(TimetableClassGroup::Table, TimetableClassGroup::TimetableId)
                            .to(Timetable::Table, Timetable::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_timetable_class_group_class_group")
                            .from(TimetableClassGroup::Table, TimetableClassGroup::ClassGroupId)
                            .to(ClassGroup::Table, ClassGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_timetable_teacher_id")
                    .table(Timetable::Table)
                    .col(Timetable::TeacherId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TimetableClassGroup::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Timetable::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Timetable {
    Table,
    Id,
    SubjectId,
    TeacherId,
    Day,
    StartTime,
    EndTime,
}

#[derive(DeriveIden)]
enum TimetableClassGroup {
    Table,
    TimetableId,
    ClassGroupId,
}
