use std::sync::Arc;

use chrono::Utc;
use models::news::{self, NewNews};
use serde_json::{Map, Value};
use tracing::{error, info, instrument};

use super::domain::{non_empty, CreateNewsInput, ListNewsQuery, UpdateNewsInput};
use super::filter::NewsFilter;
use super::patch::changes_from_patch;
use super::repository::NewsRepository;
use crate::errors::ServiceError;
use crate::media::{ImagePayload, MediaUploader};
use crate::pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PER_PAGE};

/// Application service for news items.
///
/// Holds no state besides the storage and upload handles; every call re-reads
/// from storage. Images are uploaded before anything is written, so a failed
/// upload never leaves a row behind or half-updated.
pub struct NewsService {
    repo: Arc<dyn NewsRepository>,
    media: Arc<dyn MediaUploader>,
    folder: String,
}

fn required(field: &str, value: Option<String>) -> Result<String, ServiceError> {
    non_empty(value).ok_or_else(|| ServiceError::Validation(format!("{field} is required")))
}

impl NewsService {
    pub fn new(repo: Arc<dyn NewsRepository>, media: Arc<dyn MediaUploader>, folder: impl Into<String>) -> Self {
        Self { repo, media, folder: folder.into() }
    }

    /// One page of items matching the optional search term and category, in id order.
    #[instrument(skip(self, query), fields(page = ?query.page, limit = ?query.limit))]
    pub async fn list(&self, query: ListNewsQuery) -> Result<Vec<news::Model>, ServiceError> {
        let page = Pagination::new(
            query.page.unwrap_or(DEFAULT_PAGE),
            query.limit.unwrap_or(DEFAULT_PER_PAGE),
        )?;
        let filter = NewsFilter::new(query.category, query.search);
        let matched = filter.apply(self.repo.list_all().await?);
        Ok(page.slice(matched))
    }

    pub async fn get(&self, id: i32) -> Result<news::Model, ServiceError> {
        self.repo.get(id).await?.ok_or_else(|| ServiceError::not_found("News"))
    }

    /// Create an item, uploading `image` first when given.
    ///
    /// # Examples
    /// ```
    /// use service::news::{CreateNewsInput, NewsService, repository::mock::MockNewsRepository};
    /// use service::media::mock::MockMediaUploader;
    /// use std::sync::Arc;
    /// let svc = NewsService::new(Arc::new(MockNewsRepository::default()), Arc::new(MockMediaUploader::default()), "news_images");
    /// let input = CreateNewsInput { title: Some("Storm Warning".into()), description: Some("Coastal alert".into()), ..Default::default() };
    /// let item = tokio_test::block_on(svc.create(input, None)).unwrap();
    /// assert_eq!(item.language.as_deref(), Some("en"));
    /// assert!(item.published_at.is_some());
    /// ```
    #[instrument(skip(self, input, image), fields(has_image = image.is_some()))]
    pub async fn create(&self, input: CreateNewsInput, image: Option<ImagePayload>) -> Result<news::Model, ServiceError> {
        let title = required("title", input.title)?;
        let description = required("description", input.description)?;

        let image_url = self.upload_image(image).await?;
        let new = NewNews {
            title,
            description,
            snippet: non_empty(input.snippet),
            url: non_empty(input.url),
            image_url,
            language: non_empty(input.language).unwrap_or_else(|| news::DEFAULT_LANGUAGE.to_string()),
            published_at: Utc::now().into(),
            source: non_empty(input.source),
            categories: non_empty(input.categories),
        };
        let created = self.repo.insert(new).await?;
        info!(id = created.id, "news_created");
        Ok(created)
    }

    /// Full update: non-empty fields replace stored values, empty or missing
    /// ones are kept. A new image replaces `imageUrl`.
    #[instrument(skip(self, input, image), fields(has_image = image.is_some()))]
    pub async fn update(&self, id: i32, input: UpdateNewsInput, image: Option<ImagePayload>) -> Result<news::Model, ServiceError> {
        self.get(id).await?;
        let image_url = self.upload_image(image).await?;
        let updated = self
            .repo
            .update(id, input.into_changes(image_url))
            .await?
            .ok_or_else(|| ServiceError::not_found("News"))?;
        info!(id, "news_updated");
        Ok(updated)
    }

    /// Partial update: every recognised field is replaced as given, empty
    /// values included. Unrecognised fields are dropped.
    #[instrument(skip(self, body), fields(keys = body.len()))]
    pub async fn patch(&self, id: i32, body: Map<String, Value>) -> Result<news::Model, ServiceError> {
        self.get(id).await?;
        let changes = changes_from_patch(body)?;
        let updated = self
            .repo
            .update(id, changes)
            .await?
            .ok_or_else(|| ServiceError::not_found("News"))?;
        info!(id, "news_patched");
        Ok(updated)
    }

    /// Hard delete.
    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("News"));
        }
        info!(id, "news_deleted");
        Ok(())
    }

    async fn upload_image(&self, image: Option<ImagePayload>) -> Result<Option<String>, ServiceError> {
        let Some(image) = image.filter(|i| !i.is_empty()) else { return Ok(None) };
        let size = image.len();
        match self.media.upload(image, &self.folder).await {
            Ok(url) => {
                info!(size, folder = %self.folder, %url, "image_uploaded");
                Ok(Some(url))
            }
            Err(e) => {
                error!(size, folder = %self.folder, err = %e, "image upload failed");
                Err(e.into())
            }
        }
    }
}
