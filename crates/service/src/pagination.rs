//! Pagination utilities for service layer
//!
//! `Pagination` is a validated 1-based page plus page size. Out-of-range input
//! is rejected rather than clamped.

use crate::errors::ServiceError;

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PER_PAGE: i64 = 10;
pub const MAX_PER_PAGE: i64 = 100;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u32,
    /// items per page
    pub per_page: u32,
}

impl Pagination {
    /// Validate raw query values; `page >= 1`, `1 <= per_page <= 100`.
    pub fn new(page: i64, per_page: i64) -> Result<Self, ServiceError> {
        if page < 1 || page > u32::MAX as i64 {
            return Err(ServiceError::Validation("page must be >= 1".into()));
        }
        if !(1..=MAX_PER_PAGE).contains(&per_page) {
            return Err(ServiceError::Validation(format!("limit must be between 1 and {MAX_PER_PAGE}")));
        }
        Ok(Self { page: page as u32, per_page: per_page as u32 })
    }

    /// Zero-based offset of the first item on this page.
    pub fn offset(self) -> usize {
        (self.page as usize - 1).saturating_mul(self.per_page as usize)
    }

    /// Keep the items of this page; an offset past the end yields an empty page.
    pub fn slice<T>(self, items: Vec<T>) -> Vec<T> {
        items
            .into_iter()
            .skip(self.offset())
            .take(self.per_page as usize)
            .collect()
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: DEFAULT_PAGE as u32, per_page: DEFAULT_PER_PAGE as u32 } }
}

#[cfg(test)]
mod tests {
    use super::Pagination;

    #[test]
    fn rejects_out_of_range_values() {
        assert!(Pagination::new(0, 10).is_err());
        assert!(Pagination::new(-3, 10).is_err());
        assert!(Pagination::new(1, 0).is_err());
        assert!(Pagination::new(1, 101).is_err());
        assert!(Pagination::new(1, 100).is_ok());
    }

    #[test]
    fn second_page_of_seven_has_two_items() {
        let items: Vec<u32> = (1..=7).collect();
        let page = Pagination::new(2, 5).unwrap();
        assert_eq!(page.offset(), 5);
        assert_eq!(page.slice(items), vec![6, 7]);
    }

    #[test]
    fn pages_concatenate_to_the_whole_set() {
        let items: Vec<u32> = (1..=23).collect();
        let mut seen = Vec::new();
        for p in 1..=5 {
            let chunk = Pagination::new(p, 5).unwrap().slice(items.clone());
            assert!(chunk.len() <= 5);
            seen.extend(chunk);
        }
        assert_eq!(seen, items);
    }

    #[test]
    fn offset_past_end_is_empty() {
        let items: Vec<u32> = (1..=3).collect();
        assert!(Pagination::new(9, 10).unwrap().slice(items).is_empty());
    }

    #[test]
    fn default_values_are_sane() {
        let d = Pagination::default();
        assert_eq!(d.page, 1);
        assert_eq!(d.per_page, 10);
    }
}
