use sea_orm::{entity::prelude::*, ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, Set, TransactionTrait};
use serde::{Deserialize, Serialize};

use crate::errors;

pub const DEFAULT_LANGUAGE: &str = "en";

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub snippet: Option<String>,
    pub url: Option<String>,
    #[sea_orm(column_name = "imageUrl")]
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    pub language: Option<String>,
    pub published_at: Option<DateTimeWithTimeZone>,
    pub source: Option<String>,
    /// Comma separated labels, matched case-insensitively at query time.
    pub categories: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Insert payload. `published_at` is stamped by the caller at creation time.
#[derive(Clone, Debug, PartialEq)]
pub struct NewNews {
    pub title: String,
    pub description: String,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub image_url: Option<String>,
    pub language: String,
    pub published_at: DateTimeWithTimeZone,
    pub source: Option<String>,
    pub categories: Option<String>,
}

/// Column replacements for an existing row. `None` leaves a column untouched;
/// for optional columns `Some(None)` stores NULL.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NewsChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<Option<String>>,
    pub url: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
    pub language: Option<Option<String>>,
    pub source: Option<Option<String>>,
    pub categories: Option<Option<String>>,
}

impl NewsChanges {
    pub fn is_empty(&self) -> bool {
        *self == NewsChanges::default()
    }

    /// Mark the replaced columns on an active model.
    pub fn apply(self, am: &mut ActiveModel) {
        if let Some(v) = self.title { am.title = Set(v); }
        if let Some(v) = self.description { am.description = Set(v); }
        if let Some(v) = self.snippet { am.snippet = Set(v); }
        if let Some(v) = self.url { am.url = Set(v); }
        if let Some(v) = self.image_url { am.image_url = Set(v); }
        if let Some(v) = self.language { am.language = Set(v); }
        if let Some(v) = self.source { am.source = Set(v); }
        if let Some(v) = self.categories { am.categories = Set(v); }
    }

    /// Same replacement rules on a plain model, for stores that keep models in memory.
    pub fn apply_to(self, model: &mut Model) {
        if let Some(v) = self.title { model.title = v; }
        if let Some(v) = self.description { model.description = v; }
        if let Some(v) = self.snippet { model.snippet = v; }
        if let Some(v) = self.url { model.url = v; }
        if let Some(v) = self.image_url { model.image_url = v; }
        if let Some(v) = self.language { model.language = v; }
        if let Some(v) = self.source { model.source = v; }
        if let Some(v) = self.categories { model.categories = v; }
    }
}

pub fn validate_required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

pub async fn create(db: &DatabaseConnection, input: NewNews) -> Result<Model, errors::ModelError> {
    validate_required("title", &input.title)?;
    validate_required("description", &input.description)?;

    let am = ActiveModel {
        title: Set(input.title),
        description: Set(input.description),
        snippet: Set(input.snippet),
        url: Set(input.url),
        image_url: Set(input.image_url),
        language: Set(Some(input.language)),
        published_at: Set(Some(input.published_at)),
        source: Set(input.source),
        categories: Set(input.categories),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// All rows in ascending id order.
pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<Model>, errors::ModelError> {
    Entity::find()
        .order_by_asc(Column::Id)
        .all(db)
        .await
        .map_err(|e| errors::ModelError::Db(e.to_string()))
}

/// Read-merge-write inside one transaction. Returns `None` when the row is gone.
pub async fn update(db: &DatabaseConnection, id: i32, changes: NewsChanges) -> Result<Option<Model>, errors::ModelError> {
    let txn = db.begin().await?;
    let Some(existing) = Entity::find_by_id(id).one(&txn).await? else {
        txn.rollback().await?;
        return Ok(None);
    };
    if changes.is_empty() {
        txn.commit().await?;
        return Ok(Some(existing));
    }
    let mut am: ActiveModel = existing.into();
    changes.apply(&mut am);
    let updated = am.update(&txn).await?;
    txn.commit().await?;
    Ok(Some(updated))
}

/// Hard delete; returns whether a row was removed.
pub async fn delete(db: &DatabaseConnection, id: i32) -> Result<bool, errors::ModelError> {
    let res = Entity::delete_by_id(id).exec(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))?;
    Ok(res.rows_affected > 0)
}
