//! Batched classification of validated file targets.

use anyhow::{Result, bail};
use log::debug;
use std::path::PathBuf;

use crate::ClassificationRecord;
use crate::engine::classifier::Classifier;

/// A file target that passed validation: original index, literal path string, path to read.
#[derive(Clone, Debug)]
pub struct ValidTarget {
    pub index: usize,
    pub source_label: String,
    pub path: PathBuf,
}

/// Classify every valid target with one engine call and zip the outcomes back onto their
/// targets in submission order. A failed call fails the whole set; nothing partial is returned.
pub fn classify_file_batch<C>(
    classifier: &C,
    targets: &[ValidTarget],
) -> Result<Vec<(usize, ClassificationRecord)>>
where
    C: Classifier + ?Sized,
{
    let paths: Vec<PathBuf> = targets.iter().map(|t| t.path.clone()).collect();
    debug!("Classifying {} file(s) in one batch", paths.len());
    let outcomes = classifier.classify_paths(&paths)?;
    if outcomes.len() != targets.len() {
        bail!(
            "engine returned {} result(s) for {} file(s)",
            outcomes.len(),
            targets.len()
        );
    }
    Ok(targets
        .iter()
        .zip(outcomes)
        .map(|(t, outcome)| {
            (
                t.index,
                ClassificationRecord::from_outcome(t.source_label.clone(), outcome),
            )
        })
        .collect())
}
