//! In-memory list filtering. Matching is case-insensitive substring search.

use models::news::Model;

use super::domain::non_empty;

/// Optional search term and category label; empty strings count as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    search: Option<String>,
    category: Option<String>,
}

fn contains_ci(haystack: Option<&str>, needle_lower: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(needle_lower))
}

impl NewsFilter {
    pub fn new(category: Option<String>, search: Option<String>) -> Self {
        Self {
            search: non_empty(search).map(|s| s.to_lowercase()),
            category: non_empty(category).map(|c| c.to_lowercase()),
        }
    }

    /// Title, description or snippet contains the term. A missing snippet never matches.
    pub fn matches_search(&self, item: &Model) -> bool {
        match &self.search {
            None => true,
            Some(q) => {
                contains_ci(Some(&item.title), q)
                    || contains_ci(Some(&item.description), q)
                    || contains_ci(item.snippet.as_deref(), q)
            }
        }
    }

    /// The categories text contains the label. Items without categories never match.
    pub fn matches_category(&self, item: &Model) -> bool {
        match &self.category {
            None => true,
            Some(c) => contains_ci(item.categories.as_deref(), c),
        }
    }

    /// Search narrows first, then category; input order is preserved.
    pub fn apply(&self, items: Vec<Model>) -> Vec<Model> {
        items
            .into_iter()
            .filter(|n| self.matches_search(n))
            .filter(|n| self.matches_category(n))
            .collect()
    }
}
