#![forbid(unsafe_code)]

pub mod error;
pub mod exam_service;
pub mod outcome;
pub mod views;

pub use cnc_core::Clock;

pub use error::ExamServiceError;
pub use exam_service::ExamService;
pub use outcome::ExamOutcome;
pub use views::{Dashboard, SubjectView};
