mod dataset;
mod exam;
mod subject;
mod year;

pub use dataset::Dataset;
pub use exam::{ExamRecord, ExamStatus};
pub use subject::SubjectCode;
pub use year::{ExamYear, ParseYearError};
