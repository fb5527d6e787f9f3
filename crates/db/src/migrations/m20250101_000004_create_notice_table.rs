//! Create notice table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Notice::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Notice::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Notice::WorkId).integer().not_null())
                    .col(ColumnDef::new(Notice::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Notice::Content).text())
                    .col(
                        ColumnDef::new(Notice::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_notices_work")
                            .from(Notice::Table, Notice::WorkId)
                            .to(Work::Table, Work::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_notices_work_id")
                    .table(Notice::Table)
                    .col(Notice::WorkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Notice::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Notice {
    #[iden = "notices"]
    Table,
    Id,
    WorkId,
    Title,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum Work {
    #[iden = "works"]
    Table,
    Id,
}
