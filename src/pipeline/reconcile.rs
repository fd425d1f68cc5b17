//! Merge stdin and file records back into input order.

use crate::{BatchResult, ClassificationRecord, Failure};

/// Sort records by original index (stable, so duplicates keep their relative order) and set
/// `had_errors` when anything failed. Zero records is a valid, empty result.
pub fn reconcile(
    stdin: Option<(usize, ClassificationRecord)>,
    files: Vec<(usize, ClassificationRecord)>,
    failures: Vec<Failure>,
) -> BatchResult {
    let mut records = files;
    records.extend(stdin);
    records.sort_by_key(|(index, _)| *index);
    BatchResult {
        records,
        had_errors: !failures.is_empty(),
        failures,
    }
}
