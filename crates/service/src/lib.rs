//! Service layer for the news catalog.
//! - Business rules (validation, field merge policies, list filtering) live here.
//! - Storage and image hosting are reached through the `NewsRepository` and
//!   `MediaUploader` traits so either side can be replaced by a fake.

pub mod errors;
pub mod pagination;
pub mod media;
pub mod news;
#[cfg(test)]
pub mod test_support;

pub use news::NewsService;
