use async_trait::async_trait;
use models::news::{self, NewNews, NewsChanges};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::ServiceError;

/// Storage seam for news rows. Implementations own atomicity of single-row writes.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// Every row, ascending by id.
    async fn list_all(&self) -> Result<Vec<news::Model>, ServiceError>;
    async fn get(&self, id: i32) -> Result<Option<news::Model>, ServiceError>;
    async fn insert(&self, input: NewNews) -> Result<news::Model, ServiceError>;
    /// Apply `changes` atomically; `None` when the row does not exist.
    async fn update(&self, id: i32, changes: NewsChanges) -> Result<Option<news::Model>, ServiceError>;
    /// Returns true if a row was removed.
    async fn delete(&self, id: i32) -> Result<bool, ServiceError>;
}

fn db_err(e: models::errors::ModelError) -> ServiceError {
    match e {
        models::errors::ModelError::Db(msg) => ServiceError::Db(msg),
        other => ServiceError::Model(other),
    }
}

/// SeaORM-backed repository implementation.
pub struct SeaOrmNewsRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl NewsRepository for SeaOrmNewsRepository {
    async fn list_all(&self) -> Result<Vec<news::Model>, ServiceError> {
        news::list_all(&self.db).await.map_err(db_err)
    }

    async fn get(&self, id: i32) -> Result<Option<news::Model>, ServiceError> {
        news::Entity::find_by_id(id).one(&self.db).await.map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn insert(&self, input: NewNews) -> Result<news::Model, ServiceError> {
        news::create(&self.db, input).await.map_err(db_err)
    }

    async fn update(&self, id: i32, changes: NewsChanges) -> Result<Option<news::Model>, ServiceError> {
        news::update(&self.db, id, changes).await.map_err(db_err)
    }

    async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
        news::delete(&self.db, id).await.map_err(db_err)
    }
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::BTreeMap;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockNewsRepository {
        rows: Mutex<BTreeMap<i32, news::Model>>, // key: id, iteration order is id order
        last_id: Mutex<i32>,
        unavailable: AtomicBool,
    }

    impl MockNewsRepository {
        /// Make every call fail as if the database were unreachable.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().unwrap().len()
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn check(&self) -> Result<(), ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl NewsRepository for MockNewsRepository {
        async fn list_all(&self) -> Result<Vec<news::Model>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().values().cloned().collect())
        }

        async fn get(&self, id: i32) -> Result<Option<news::Model>, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().get(&id).cloned())
        }

        async fn insert(&self, input: NewNews) -> Result<news::Model, ServiceError> {
            self.check()?;
            news::validate_required("title", &input.title)?;
            news::validate_required("description", &input.description)?;
            let mut last_id = self.last_id.lock().unwrap();
            *last_id += 1;
            let model = news::Model {
                id: *last_id,
                title: input.title,
                description: input.description,
                snippet: input.snippet,
                url: input.url,
                image_url: input.image_url,
                language: Some(input.language),
                published_at: Some(input.published_at),
                source: input.source,
                categories: input.categories,
            };
            self.rows.lock().unwrap().insert(model.id, model.clone());
            Ok(model)
        }

        async fn update(&self, id: i32, changes: NewsChanges) -> Result<Option<news::Model>, ServiceError> {
            self.check()?;
            let mut rows = self.rows.lock().unwrap();
            Ok(rows.get_mut(&id).map(|row| {
                changes.apply_to(row);
                row.clone()
            }))
        }

        async fn delete(&self, id: i32) -> Result<bool, ServiceError> {
            self.check()?;
            Ok(self.rows.lock().unwrap().remove(&id).is_some())
        }
    }
}
