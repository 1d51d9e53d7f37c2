use sea_orm_migration::prelude::*;

use crate::m20251014_000001_create_table_user::User;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // ============================================
        // SUBJECT
        // ============================================
        manager
            .create_table(
                Table::create()
                    .table(Subject::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Subject::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Subject::Name).string_len(100).not_null())
                    .to_owned(),
            )
            .await?;

        // ============================================
        // TEACHER
        // ============================================
        manager
            .create_table(
                Table::create()
                    .table(Teacher::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Teacher::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(Teacher::UserId)
                            .integer()
                            .not_null()
                            .unique_key(),
                    )
                    .col(ColumnDef::new(Teacher::ProfilePicture).string().null())
                    .col(
                        ColumnDef::new(Teacher::IsClassTeacher)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_user")
                            .from(Teacher::Table, Teacher::UserId)
                            .to(User::Table, User::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================
        // CLASS GROUP
        // ============================================
        manager
            .create_table(
                Table::create()
                    .table(ClassGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ClassGroup::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ClassGroup::Name).string_len(50).not_null())
                    .col(
                        ColumnDef::new(ClassGroup::ClassTeacherId)
                            .integer()
                            .null()
                            .unique_key(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_class_group_class_teacher")
                            .from(ClassGroup::Table, ClassGroup::ClassTeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::SetNull)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // ============================================
        // TEACHER <-> SUBJECT / CLASS GROUP
        // ============================================
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubject::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(TeacherSubject::TeacherId).integer().not_null())
                    .col(ColumnDef::new(TeacherSubject::SubjectId).integer().not_null())
                    .primary_key(
                        Index::create()
                            .col(TeacherSubject::TeacherId)
                            .col(TeacherSubject::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_subject_teacher")
                            .from(TeacherSubject::Table, TeacherSubject::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_subject_subject")
                            .from(TeacherSubject::Table, TeacherSubject::SubjectId)
                            .to(Subject::Table, Subject::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(TeacherClassGroup::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherClassGroup::TeacherId)
                            .integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherClassGroup::ClassGroupId)
                            .integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TeacherClassGroup::TeacherId)
                            .col(TeacherClassGroup::ClassGroupId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_class_group_teacher")
                            .from(TeacherClassGroup::Table, TeacherClassGroup::TeacherId)
                            .to(Teacher::Table, Teacher::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_teacher_class_group_class_group")
                            .from(TeacherClassGroup::Table, TeacherClassGroup::ClassGroupId)
                            .to(ClassGroup::Table, ClassGroup::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(TeacherClassGroup::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherSubject::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(ClassGroup::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teacher::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subject::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Subject {
    Table,
    Id,
    Name,
}

#[derive(DeriveIden)]
pub enum Teacher {
    Table,
    Id,
    UserId,
    ProfilePicture,
    IsClassTeacher,
}

#[derive(DeriveIden)]
pub enum ClassGroup {
    Table,
    Id,
    Name,
    ClassTeacherId,
}

#[derive(DeriveIden)]
enum TeacherSubject {
    Table,
    TeacherId,
    SubjectId,
}

#[derive(DeriveIden)]
enum TeacherClassGroup {
    Table,
    TeacherId,
    ClassGroupId,
}
