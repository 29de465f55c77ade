//! Multipart news forms: text fields plus an optional `image` file part.

use std::collections::HashMap;

use axum::extract::Multipart;
use service::media::ImagePayload;
use service::news::{CreateNewsInput, UpdateNewsInput};

use crate::errors::JsonApiError;

pub const IMAGE_FIELD: &str = "image";

/// All parts of one form, read eagerly. Only the `image` part is taken as a
/// file; every other part is read as UTF-8 text. Repeated fields keep their
/// first value.
#[derive(Debug, Default)]
pub struct NewsForm {
    text: HashMap<String, String>,
    image: Option<ImagePayload>,
}

impl NewsForm {
    pub async fn collect(mut multipart: Multipart) -> Result<Self, JsonApiError> {
        let mut form = NewsForm::default();
        while let Some(field) = multipart.next_field().await? {
            let Some(name) = field.name().map(str::to_string) else { continue };
            let file_name = field.file_name().map(str::to_string);
            let content_type = field.content_type().map(str::to_string);
            let data = field.bytes().await?;

            if name == IMAGE_FIELD {
                if form.image.is_none() {
                    form.image = Some(ImagePayload { file_name, content_type, data });
                }
                continue;
            }
            let value = String::from_utf8(data.to_vec())
                .map_err(|_| JsonApiError::bad_request(format!("field '{name}' is not valid UTF-8")))?;
            form.text.entry(name).or_insert(value);
        }
        Ok(form)
    }

    fn take(&mut self, name: &str) -> Option<String> {
        self.text.remove(name)
    }

    /// Empty image parts count as no image.
    fn take_image(&mut self) -> Option<ImagePayload> {
        self.image.take().filter(|i| !i.is_empty())
    }

    pub fn into_create(mut self) -> (CreateNewsInput, Option<ImagePayload>) {
        let input = CreateNewsInput {
            title: self.take("title"),
            description: self.take("description"),
            snippet: self.take("snippet"),
            url: self.take("url"),
            language: self.take("language"),
            source: self.take("source"),
            categories: self.take("categories"),
        };
        (input, self.take_image())
    }

    pub fn into_update(mut self) -> (UpdateNewsInput, Option<ImagePayload>) {
        let input = UpdateNewsInput {
            title: self.take("title"),
            description: self.take("description"),
            snippet: self.take("snippet"),
            url: self.take("url"),
            language: self.take("language"),
            source: self.take("source"),
            categories: self.take("categories"),
        };
        (input, self.take_image())
    }
}
