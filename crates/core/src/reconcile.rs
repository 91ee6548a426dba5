use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::catalog::Catalog;
use crate::model::{Dataset, ExamRecord};

/// Fills catalog gaps so every subject carries one record per catalog year.
///
/// Appends default pending records for missing (subject, year) pairs and
/// returns how many were appended. Existing records are never removed or
/// overwritten, and years outside the catalog range are left alone, so a
/// second pass over the same inputs appends nothing.
pub fn reconcile(dataset: &mut Dataset, catalog: &Catalog, today: NaiveDate) -> usize {
    let mut appended = 0;
    for subject in catalog.subjects() {
        let records = dataset.records_mut(subject);
        let existing: BTreeSet<_> = records.iter().map(ExamRecord::year).collect();
        for year in catalog.years() {
            if !existing.contains(&year) {
                records.push(ExamRecord::new(year, "", today));
                appended += 1;
            }
        }
    }
    appended
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
