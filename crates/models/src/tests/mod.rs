//! Database-backed tests. They run against `DATABASE_URL` and are skipped when
//! `SKIP_DB_TESTS` is set or no database URL is configured.

use crate::db::connect;
use crate::news::{self, NewNews, NewsChanges};
use anyhow::Result;
use migration::MigratorTrait;
use sea_orm::{DatabaseConnection, EntityTrait};

fn db_tests_disabled() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok() || std::env::var("DATABASE_URL").is_err()
}

async fn setup_test_db() -> Result<DatabaseConnection> {
    let db = connect().await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

fn new_news(title: &str) -> NewNews {
    NewNews {
        title: title.to_string(),
        description: "Coastal alert".into(),
        snippet: None,
        url: None,
        image_url: None,
        language: news::DEFAULT_LANGUAGE.into(),
        published_at: chrono::Utc::now().into(),
        source: Some("MetOffice".into()),
        categories: Some("Weather,Safety".into()),
    }
}

#[tokio::test]
async fn test_news_crud() -> Result<()> {
    if db_tests_disabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let created = news::create(&db, new_news("Storm Warning")).await?;
    assert!(created.id > 0);
    assert!(created.published_at.is_some());
    assert_eq!(created.language.as_deref(), Some("en"));

    let found = news::Entity::find_by_id(created.id).one(&db).await?;
    assert_eq!(found.as_ref(), Some(&created));

    let changes = NewsChanges { snippet: Some(Some("Gale force".into())), ..Default::default() };
    let updated = news::update(&db, created.id, changes).await?.expect("row exists");
    assert_eq!(updated.snippet.as_deref(), Some("Gale force"));
    assert_eq!(updated.title, "Storm Warning");
    assert_eq!(updated.published_at, created.published_at);

    assert!(news::delete(&db, created.id).await?);
    assert!(!news::delete(&db, created.id).await?);
    assert!(news::update(&db, created.id, NewsChanges::default()).await?.is_none());
    Ok(())
}

#[tokio::test]
async fn test_list_all_is_ordered_by_id() -> Result<()> {
    if db_tests_disabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let a = news::create(&db, new_news("Order A")).await?;
    let b = news::create(&db, new_news("Order B")).await?;

    let rows = news::list_all(&db).await?;
    let ids: Vec<i32> = rows.iter().map(|r| r.id).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    let pos_a = ids.iter().position(|id| *id == a.id).expect("a listed");
    let pos_b = ids.iter().position(|id| *id == b.id).expect("b listed");
    assert!(pos_a < pos_b);

    news::delete(&db, a.id).await?;
    news::delete(&db, b.id).await?;
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_empty_title() -> Result<()> {
    if db_tests_disabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;
    let err = news::create(&db, new_news("")).await.unwrap_err();
    assert!(matches!(err, crate::errors::ModelError::Validation(_)));
    Ok(())
}

#[tokio::test]
async fn test_long_language_tags_are_stored() -> Result<()> {
    if db_tests_disabled() {
        return Ok(());
    }
    let db = setup_test_db().await?;

    let mut input = new_news("Long Language");
    input.language = "english-united-kingdom".into();
    let created = news::create(&db, input).await?;
    assert_eq!(created.language.as_deref(), Some("english-united-kingdom"));

    let changes = NewsChanges { language: Some(Some("english-united-states-of-america".into())), ..Default::default() };
    let updated = news::update(&db, created.id, changes).await?.expect("row exists");
    assert_eq!(updated.language.as_deref(), Some("english-united-states-of-america"));

    news::delete(&db, created.id).await?;
    Ok(())
}
