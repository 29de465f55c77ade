//! Secondary indexes on `news`.
use sea_orm_migration::prelude::*;

use crate::m20240101_000001_create_news::News;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_published_at")
                    .table(News::Table)
                    .col(News::PublishedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_news_published_at").table(News::Table).to_owned())
            .await
    }
}
