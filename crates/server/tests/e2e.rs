use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use service::media::mock::MockMediaUploader;
use service::news::SeaOrmNewsRepository;
use service::NewsService;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;

use server::{routes, state::ServerState};

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    let mut db_cfg = configs::DatabaseConfig::default();
    db_cfg.normalize_from_env();
    let db = models::db::connect_with_config(&db_cfg).await?;
    if let Err(e) = migration::Migrator::up(&db, None).await { eprintln!("migrations notice: {}", e); }

    let news = NewsService::new(
        Arc::new(SeaOrmNewsRepository { db }),
        Arc::new(MockMediaUploader::default()),
        "news_images",
    );
    let app: Router = routes::build_router(ServerState::new(news), CorsLayer::very_permissive(), 10 * 1024 * 1024);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn skip() -> bool {
    std::env::var("SKIP_DB_TESTS").is_ok()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    if skip() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"status": "ok"}));
    Ok(())
}

#[tokio::test]
async fn e2e_news_lifecycle() -> anyhow::Result<()> {
    if skip() { return Ok(()); }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let client = reqwest::Client::new();

    let form = reqwest::multipart::Form::new()
        .text("title", "E2E Storm Warning")
        .text("description", "Coastal alert")
        .text("categories", "Weather,Safety")
        .part("image", reqwest::multipart::Part::bytes(vec![0xFF, 0xD8, 0xFF]).file_name("storm.jpg"));
    let res = client.post(format!("{}/news", app.base_url)).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let created: Value = res.json().await?;
    let id = created["id"].as_i64().unwrap();
    assert_eq!(created["language"], "en");
    assert!(created["imageUrl"].as_str().unwrap().starts_with("https://media.test/news_images/"));

    let fetched: Value = client.get(format!("{}/news/{}", app.base_url, id)).send().await?.json().await?;
    assert_eq!(fetched["title"], "E2E Storm Warning");
    assert_eq!(fetched["published_at"], created["published_at"]);

    let form = reqwest::multipart::Form::new().text("title", "E2E Storm Over").text("snippet", "");
    let res = client.put(format!("{}/news/{}", app.base_url, id)).multipart(form).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["title"], "E2E Storm Over");
    assert_eq!(updated["description"], "Coastal alert");

    let res = client
        .patch(format!("{}/news/{}", app.base_url, id))
        .json(&json!({"snippet": "", "categories": null}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let patched: Value = res.json().await?;
    assert_eq!(patched["snippet"], "");
    assert_eq!(patched["categories"], Value::Null);

    let res = client.delete(format!("{}/news/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NO_CONTENT);
    let res = client.get(format!("{}/news/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let res = client.delete(format!("{}/news/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
