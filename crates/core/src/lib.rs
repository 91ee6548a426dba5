#![forbid(unsafe_code)]

pub mod catalog;
pub mod model;
pub mod reconcile;
pub mod stats;
pub mod time;

pub use catalog::{Catalog, CatalogError, ValidationError};
pub use model::{Dataset, ExamRecord, ExamStatus, ExamYear, ParseYearError, SubjectCode};
pub use reconcile::reconcile;
pub use stats::{CompletionStats, Statistics, aggregate};
pub use time::Clock;
