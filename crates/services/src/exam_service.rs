use std::cmp::Reverse;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tracing::{debug, info};

use cnc_core::catalog::{Catalog, ValidationError};
use cnc_core::model::{Dataset, ExamRecord, ExamYear, SubjectCode};
use cnc_core::reconcile::reconcile;
use cnc_core::stats::aggregate;
use cnc_core::time::Clock;
use storage::repository::DatasetStore;

use crate::error::ExamServiceError;
use crate::outcome::ExamOutcome;
use crate::views::{Dashboard, SubjectView};

/// Orchestrates every tracker operation as one load-reconcile-act-persist
/// sequence against the snapshot store.
pub struct ExamService {
    clock: Clock,
    catalog: Catalog,
    store: Arc<dyn DatasetStore>,
    // Serializes whole sequences. The flat snapshot has no per-record
    // writes, so interleaved callers would drop each other's updates.
    guard: Mutex<()>,
}

impl ExamService {
    #[must_use]
    pub fn new(clock: Clock, catalog: Catalog, store: Arc<dyn DatasetStore>) -> Self {
        Self {
            clock,
            catalog,
            store,
            guard: Mutex::new(()),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    fn lock(&self) -> MutexGuard<'_, ()> {
        // A poisoned guard only means another caller panicked between load
        // and save; the snapshot itself is still consistent.
        self.guard.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Loads the dataset and repairs catalog gaps in memory.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` if the snapshot cannot be read
    /// or parsed.
    fn load_repaired(&self) -> Result<(Dataset, bool), ExamServiceError> {
        let mut dataset = self.store.load()?;
        let appended = reconcile(&mut dataset, &self.catalog, self.clock.today());
        if appended > 0 {
            debug!(appended, "catalog gaps repaired");
        }
        Ok((dataset, appended > 0))
    }

    /// Overall statistics plus the subject list, for the landing page.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` on storage failures.
    pub fn dashboard(&self) -> Result<Dashboard, ExamServiceError> {
        let _guard = self.lock();
        let (dataset, repaired) = self.load_repaired()?;
        if repaired {
            self.store.save(&dataset)?;
        }
        Ok(Dashboard {
            subjects: self.catalog.subjects().to_vec(),
            stats: aggregate(&dataset, &self.catalog),
        })
    }

    /// One subject's exams, newest session first, with its counters.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Validation` for a subject outside the
    /// catalog and `ExamServiceError::Storage` on storage failures.
    pub fn subject_view(&self, subject: &str) -> Result<SubjectView, ExamServiceError> {
        let subject = self.catalog.resolve_subject(subject)?;
        let _guard = self.lock();
        let (dataset, repaired) = self.load_repaired()?;
        if repaired {
            self.store.save(&dataset)?;
        }
        let mut exams = dataset.records(&subject).to_vec();
        exams.sort_by_key(|record| Reverse(record.year()));
        let stats = aggregate(&dataset, &self.catalog).subject(&subject);
        Ok(SubjectView {
            subject,
            exams,
            stats,
        })
    }

    /// Appends a record for a (subject, year) pair not yet persisted.
    ///
    /// The duplicate check runs against the records as loaded from the
    /// snapshot, so a year the reconciler has not persisted yet is added
    /// with the submitted notes; remaining catalog gaps are filled in the
    /// same save.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` on storage failures. Rejected
    /// input and duplicates come back as classifications, not errors.
    pub fn add_exam(
        &self,
        subject: &str,
        year: &str,
        notes: &str,
    ) -> Result<ExamOutcome, ExamServiceError> {
        let subject = match self.catalog.resolve_subject(subject) {
            Ok(subject) => subject,
            Err(reason) => return Ok(ExamOutcome::Rejected(reason)),
        };
        let year = match self.catalog.resolve_year(year) {
            Ok(year) => year,
            Err(reason) => return Ok(ExamOutcome::Rejected(reason)),
        };

        let _guard = self.lock();
        let mut dataset = self.store.load()?;
        if dataset.find(&subject, year).is_some() {
            if reconcile(&mut dataset, &self.catalog, self.clock.today()) > 0 {
                self.store.save(&dataset)?;
            }
            return Ok(ExamOutcome::AlreadyExists { subject, year });
        }

        dataset
            .records_mut(&subject)
            .push(ExamRecord::new(year, notes, self.clock.today()));
        reconcile(&mut dataset, &self.catalog, self.clock.today());
        self.store.save(&dataset)?;
        info!(subject = %subject, year = %year, "exam added");
        Ok(ExamOutcome::Added { subject, year })
    }

    /// Moves a record from pending to completed, stamping today's date.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` on storage failures. A missing
    /// record classifies as `NotFound`, a repeat call as
    /// `AlreadyCompleted` with no mutation and no save.
    pub fn mark_completed(
        &self,
        subject: &str,
        year: &str,
    ) -> Result<ExamOutcome, ExamServiceError> {
        let subject = SubjectCode::new(subject);
        let Ok(year) = year.parse::<ExamYear>() else {
            return Ok(ExamOutcome::Rejected(ValidationError::YearNotNumeric(
                year.trim().to_string(),
            )));
        };

        let _guard = self.lock();
        let (mut dataset, repaired) = self.load_repaired()?;
        let outcome = match dataset.find_mut(&subject, year) {
            Some(record) => {
                if record.mark_completed(self.clock.today()) {
                    ExamOutcome::Completed {
                        subject: subject.clone(),
                        year,
                    }
                } else {
                    ExamOutcome::AlreadyCompleted {
                        subject: subject.clone(),
                        year,
                    }
                }
            }
            None => ExamOutcome::NotFound {
                subject: subject.clone(),
                year,
            },
        };
        if repaired || outcome.mutated() {
            self.store.save(&dataset)?;
        }
        if outcome.mutated() {
            info!(subject = %subject, year = %year, "exam marked completed");
        }
        Ok(outcome)
    }

    /// Overwrites a record's notes unconditionally; empty text is allowed.
    ///
    /// # Errors
    ///
    /// Returns `ExamServiceError::Storage` on storage failures. A missing
    /// record classifies as `NotFound`.
    pub fn update_notes(
        &self,
        subject: &str,
        year: &str,
        notes: &str,
    ) -> Result<ExamOutcome, ExamServiceError> {
        let subject = SubjectCode::new(subject);
        let Ok(year) = year.parse::<ExamYear>() else {
            return Ok(ExamOutcome::Rejected(ValidationError::YearNotNumeric(
                year.trim().to_string(),
            )));
        };

        let _guard = self.lock();
        let (mut dataset, repaired) = self.load_repaired()?;
        let outcome = match dataset.find_mut(&subject, year) {
            Some(record) => {
                record.set_notes(notes);
                ExamOutcome::NotesUpdated {
                    subject: subject.clone(),
                    year,
                }
            }
            None => ExamOutcome::NotFound {
                subject: subject.clone(),
                year,
            },
        };
        if repaired || outcome.mutated() {
            self.store.save(&dataset)?;
        }
        if outcome.mutated() {
            info!(subject = %subject, year = %year, "exam notes updated");
        }
        Ok(outcome)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;

    use cnc_core::time::{fixed_clock, fixed_now, fixed_today};
    use storage::repository::{InMemoryStore, StorageError};

    fn test_catalog() -> Catalog {
        Catalog::new(
            vec![SubjectCode::new("math1"), SubjectCode::new("pc1")],
            2010..=2014,
        )
        .unwrap()
    }

    fn service() -> (ExamService, InMemoryStore) {
        let store = InMemoryStore::new();
        let service = ExamService::new(fixed_clock(), test_catalog(), Arc::new(store.clone()));
        (service, store)
    }

    #[test]
    fn add_rejects_unknown_subject() {
        let (service, _) = service();
        let outcome = service.add_exam("philo", "2012", "").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Rejected(ValidationError::UnknownSubject("philo".to_string()))
        );
    }

    #[test]
    fn add_rejects_year_outside_range() {
        let (service, store) = service();
        let outcome = service.add_exam("math1", "2025", "").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Rejected(ValidationError::YearOutOfRange {
                year: 2025,
                start: 2010,
                end: 2014
            })
        );
        assert!(store.load().unwrap().is_empty());
    }

    #[test]
    fn add_rejects_non_numeric_year() {
        let (service, _) = service();
        let outcome = service.add_exam("math1", "soon", "").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Rejected(ValidationError::YearNotNumeric("soon".to_string()))
        );
    }

    #[test]
    fn first_add_keeps_submitted_notes() {
        let (service, store) = service();
        let outcome = service.add_exam("math1", "2012", "hard").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Added {
                subject: SubjectCode::new("math1"),
                year: ExamYear::new(2012),
            }
        );

        let dataset = store.load().unwrap();
        let record = dataset
            .find(&SubjectCode::new("math1"), ExamYear::new(2012))
            .unwrap();
        assert_eq!(record.notes(), "hard");
        // The same save filled the remaining catalog gaps.
        assert_eq!(dataset.records(&SubjectCode::new("math1")).len(), 5);
        assert_eq!(dataset.records(&SubjectCode::new("pc1")).len(), 5);
    }

    #[test]
    fn duplicate_add_reports_already_exists_and_preserves_notes() {
        let (service, store) = service();
        service.add_exam("math1", "2012", "hard").unwrap();

        let outcome = service.add_exam("math1", "2012", "other").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::AlreadyExists {
                subject: SubjectCode::new("math1"),
                year: ExamYear::new(2012),
            }
        );
        let record = store
            .load()
            .unwrap()
            .find(&SubjectCode::new("math1"), ExamYear::new(2012))
            .cloned()
            .unwrap();
        assert_eq!(record.notes(), "hard");
    }

    #[test]
    fn add_after_reconcile_was_persisted_reports_already_exists() {
        let (service, _) = service();
        service.dashboard().unwrap();

        let outcome = service.add_exam("pc1", "2011", "late notes").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::AlreadyExists {
                subject: SubjectCode::new("pc1"),
                year: ExamYear::new(2011),
            }
        );
    }

    #[test]
    fn mark_completed_stamps_today() {
        let (service, store) = service();
        let outcome = service.mark_completed("pc1", "2012").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Completed {
                subject: SubjectCode::new("pc1"),
                year: ExamYear::new(2012),
            }
        );

        let dataset = store.load().unwrap();
        let record = dataset
            .find(&SubjectCode::new("pc1"), ExamYear::new(2012))
            .unwrap();
        assert!(record.is_completed());
        assert_eq!(record.completed_date(), Some(fixed_today()));
    }

    #[test]
    fn repeat_mark_completed_keeps_the_first_date() {
        let (service, store) = service();
        service.mark_completed("pc1", "2012").unwrap();

        // A later day, same store.
        let later = Clock::fixed(fixed_now() + chrono::Duration::days(3));
        let later_service = ExamService::new(later, test_catalog(), Arc::new(store.clone()));
        let outcome = later_service.mark_completed("pc1", "2012").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::AlreadyCompleted {
                subject: SubjectCode::new("pc1"),
                year: ExamYear::new(2012),
            }
        );

        let record = store
            .load()
            .unwrap()
            .find(&SubjectCode::new("pc1"), ExamYear::new(2012))
            .cloned()
            .unwrap();
        assert_eq!(record.completed_date(), Some(fixed_today()));
    }

    #[test]
    fn mark_completed_for_missing_year_is_not_found() {
        let (service, _) = service();
        let outcome = service.mark_completed("pc1", "1999").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::NotFound {
                subject: SubjectCode::new("pc1"),
                year: ExamYear::new(1999),
            }
        );
    }

    #[test]
    fn mark_completed_for_unknown_subject_is_not_found() {
        let (service, _) = service();
        let outcome = service.mark_completed("philo", "2012").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::NotFound {
                subject: SubjectCode::new("philo"),
                year: ExamYear::new(2012),
            }
        );
    }

    #[test]
    fn mark_completed_rejects_non_numeric_year() {
        let (service, _) = service();
        let outcome = service.mark_completed("pc1", "someday").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::Rejected(ValidationError::YearNotNumeric("someday".to_string()))
        );
    }

    #[test]
    fn update_notes_overwrites_without_touching_completion() {
        let (service, store) = service();
        let outcome = service
            .update_notes("math1", "2013", "review chapter 3")
            .unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::NotesUpdated {
                subject: SubjectCode::new("math1"),
                year: ExamYear::new(2013),
            }
        );

        let dataset = store.load().unwrap();
        let record = dataset
            .find(&SubjectCode::new("math1"), ExamYear::new(2013))
            .unwrap();
        assert_eq!(record.notes(), "review chapter 3");
        assert_eq!(record.completed_date(), None);
    }

    #[test]
    fn update_notes_allows_clearing() {
        let (service, store) = service();
        service.update_notes("math1", "2013", "draft").unwrap();
        service.update_notes("math1", "2013", "").unwrap();

        let dataset = store.load().unwrap();
        let record = dataset
            .find(&SubjectCode::new("math1"), ExamYear::new(2013))
            .unwrap();
        assert_eq!(record.notes(), "");
    }

    #[test]
    fn update_notes_for_missing_record_is_not_found() {
        let (service, _) = service();
        let outcome = service.update_notes("math1", "1999", "x").unwrap();
        assert_eq!(
            outcome,
            ExamOutcome::NotFound {
                subject: SubjectCode::new("math1"),
                year: ExamYear::new(1999),
            }
        );
    }

    #[test]
    fn dashboard_reconciles_and_persists_the_repair() {
        let (service, store) = service();
        let dashboard = service.dashboard().unwrap();

        assert_eq!(dashboard.subjects, test_catalog().subjects());
        assert_eq!(dashboard.stats.total().total(), 10);
        assert_eq!(dashboard.stats.total().completed(), 0);
        assert!(!store.load().unwrap().is_empty());
    }

    #[test]
    fn subject_view_sorts_years_descending() {
        let (service, _) = service();
        let view = service.subject_view("MATH1").unwrap();

        assert_eq!(view.subject, SubjectCode::new("math1"));
        let years: Vec<i32> = view.exams.iter().map(|e| e.year().value()).collect();
        assert_eq!(years, vec![2014, 2013, 2012, 2011, 2010]);
        assert_eq!(view.stats.total(), 5);
    }

    #[test]
    fn subject_view_rejects_unknown_subject() {
        let (service, _) = service();
        let err = service.subject_view("philo").unwrap_err();
        assert!(matches!(
            err,
            ExamServiceError::Validation(ValidationError::UnknownSubject(_))
        ));
    }

    struct BrokenStore;

    impl DatasetStore for BrokenStore {
        fn load(&self) -> Result<Dataset, StorageError> {
            Err(StorageError::Malformed("truncated snapshot".to_string()))
        }

        fn save(&self, _dataset: &Dataset) -> Result<(), StorageError> {
            Err(StorageError::Unavailable("read-only".to_string()))
        }
    }

    #[test]
    fn corrupt_storage_surfaces_instead_of_an_empty_dashboard() {
        let service = ExamService::new(fixed_clock(), test_catalog(), Arc::new(BrokenStore));
        let err = service.dashboard().unwrap_err();
        assert!(matches!(
            err,
            ExamServiceError::Storage(StorageError::Malformed(_))
        ));
    }
}
