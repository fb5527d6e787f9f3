//! Create comment table migration.

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Comment::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Comment::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Comment::UserId).integer().not_null())
                    .col(ColumnDef::new(Comment::EpisodeId).integer())
                    .col(ColumnDef::new(Comment::NoticeId).integer())
                    .col(ColumnDef::new(Comment::Content).text().not_null())
                    .col(
                        ColumnDef::new(Comment::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_user")
                            .from(Comment::Table, Comment::UserId)
                            .to(User::Table, User::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_episode")
                            .from(Comment::Table, Comment::EpisodeId)
                            .to(Episode::Table, Episode::Id),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_comments_notice")
                            .from(Comment::Table, Comment::NoticeId)
                            .to(Notice::Table, Notice::Id),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_episode_id")
                    .table(Comment::Table)
                    .col(Comment::EpisodeId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_comments_notice_id")
                    .table(Comment::Table)
                    .col(Comment::NoticeId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Comment::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Comment {
    #[iden = "comments"]
    Table,
    Id,
    UserId,
    EpisodeId,
    NoticeId,
    Content,
    CreatedAt,
}

#[derive(Iden)]
enum User {
    #[iden = "users"]
    Table,
    Id,
}

#[derive(Iden)]
enum Episode {
    #[iden = "episodes"]
    Table,
    Id,
}

#[derive(Iden)]
enum Notice {
    #[iden = "notices"]
    Table,
    Id,
}
