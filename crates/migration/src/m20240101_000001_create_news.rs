//! Create `news` table.
//!
//! One row per article. `categories` is a comma separated label list kept as
//! plain text; there is no category table to reference.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(News::Table)
                    .if_not_exists()
                    .col(pk_auto(News::Id))
                    .col(string(News::Title))
                    .col(text(News::Description))
                    .col(text_null(News::Snippet))
                    .col(string_null(News::Url))
                    .col(string_null(News::ImageUrl))
                    .col(string_null(News::Language))
                    .col(timestamp_with_time_zone_null(News::PublishedAt))
                    .col(string_null(News::Source))
                    .col(string_null(News::Categories))
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(News::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
pub(crate) enum News {
    Table,
    Id,
    Title,
    Description,
    Snippet,
    Url,
    #[sea_orm(iden = "imageUrl")]
    ImageUrl,
    Language,
    PublishedAt,
    Source,
    Categories,
}
