//! Create episode table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Episode::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Episode::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Episode::WorkId).integer().not_null())
                    .col(ColumnDef::new(Episode::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Episode::Content).text())
                    .col(
                        ColumnDef::new(Episode::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_episodes_work")
                            .from(Episode::Table, Episode::WorkId)
                            .to(Work::Table, Work::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_episodes_work_id")
                    .table(Episode::Table)
                    .col(Episode::WorkId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Episode::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Episode {
    #[iden = "episodes"]
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
