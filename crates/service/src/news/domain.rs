use models::news::NewsChanges;
use serde::Deserialize;

/// Fields of a create request. `title` and `description` are required; the
/// `Option`s let the service report which one is missing.
#[derive(Debug, Clone, Default)]
pub struct CreateNewsInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub source: Option<String>,
    pub categories: Option<String>,
}

/// Fields of a full update. An empty or absent field keeps the stored value,
/// so this input can never clear a column.
#[derive(Debug, Clone, Default)]
pub struct UpdateNewsInput {
    pub title: Option<String>,
    pub description: Option<String>,
    pub snippet: Option<String>,
    pub url: Option<String>,
    pub language: Option<String>,
    pub source: Option<String>,
    pub categories: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListNewsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub category: Option<String>,
    pub search: Option<String>,
}

/// Empty strings count as absent; whitespace is kept as given.
pub(crate) fn non_empty(v: Option<String>) -> Option<String> {
    v.filter(|s| !s.is_empty())
}

impl UpdateNewsInput {
    /// Merge rule for full updates: only non-empty values replace stored ones.
    pub fn into_changes(self, image_url: Option<String>) -> NewsChanges {
        NewsChanges {
            title: non_empty(self.title),
            description: non_empty(self.description),
            snippet: non_empty(self.snippet).map(Some),
            url: non_empty(self.url).map(Some),
            image_url: image_url.map(Some),
            language: non_empty(self.language).map(Some),
            source: non_empty(self.source).map(Some),
            categories: non_empty(self.categories).map(Some),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_update_fields_are_not_changes() {
        let input = UpdateNewsInput {
            title: Some("".into()),
            description: Some("".into()),
            snippet: None,
            source: Some("Reuters".into()),
            ..Default::default()
        };
        let changes = input.into_changes(None);
        assert_eq!(changes.title, None);
        assert_eq!(changes.description, None);
        assert_eq!(changes.snippet, None);
        assert_eq!(changes.image_url, None);
        assert_eq!(changes.source, Some(Some("Reuters".into())));
    }

    #[test]
    fn whitespace_update_fields_replace_stored_values() {
        let input = UpdateNewsInput { source: Some(" ".into()), title: Some("  ".into()), ..Default::default() };
        let changes = input.into_changes(None);
        assert_eq!(changes.source, Some(Some(" ".into())));
        assert_eq!(changes.title, Some("  ".into()));
    }

    #[test]
    fn uploaded_image_replaces_url() {
        let changes = UpdateNewsInput::default().into_changes(Some("https://img/1.jpg".into()));
        assert_eq!(changes.image_url, Some(Some("https://img/1.jpg".into())));
        assert!(!changes.is_empty());
    }
}
