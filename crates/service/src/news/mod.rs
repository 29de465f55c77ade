//! News items: domain inputs, list filtering, patch parsing, storage seam and
//! the application service tying them together.

pub mod domain;
pub mod filter;
pub mod patch;
pub mod repository;
pub mod service;

pub use domain::{CreateNewsInput, ListNewsQuery, UpdateNewsInput};
pub use filter::NewsFilter;
pub use repository::{NewsRepository, SeaOrmNewsRepository};
pub use service::NewsService;
