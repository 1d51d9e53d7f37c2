use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Week::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Week::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Week::Number).integer().not_null())
                    .col(ColumnDef::new(Week::StartDate).date().not_null())
                    .col(ColumnDef::new(Week::EndDate).date().not_null())
                    .col(
                        ColumnDef::new(Week::CreatedAt)
                            .timestamp()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Week::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
pub enum Week {
    Table,
    Id,
    Number,
    StartDate,
    EndDate,
    CreatedAt,
}
