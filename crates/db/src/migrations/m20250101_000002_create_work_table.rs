//! Create work table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Work::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Work::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Work::UserId).integer().not_null())
                    .col(ColumnDef::new(Work::Title).string_len(256).not_null())
                    .col(ColumnDef::new(Work::Description).text())
                    .col(
                        ColumnDef::new(Work::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_works_user")
                            .from(Work::Table, Work::UserId)
                            .to(User::Table, User::Id),
                    )
                    .to_owned(),
            )
            .await?;

        // Index: user_id (for listing a user's works)
        manager
            .create_index(
                Index::create()
                    .name("idx_works_user_id")
                    .table(Work::Table)
                    .col(Work::UserId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Work::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Work {
    #[iden = "works"]
    Table,
    Id,
    UserId,
    Title,
    Description,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}
