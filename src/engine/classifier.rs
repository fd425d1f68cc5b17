//! Classification engine seam.
//!
//! The batch pipeline only talks to a [`Classifier`]; the engine is constructed once by the
//! caller and passed in. [`SignatureClassifier`](super::signatures::SignatureClassifier) is the
//! built-in implementation; tests and embedders can supply their own.

use anyhow::{Context, Result};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::ClassificationOutcome;
use crate::utils::config::ClassifierConsts;

pub trait Classifier {
    /// Classify an in-memory buffer.
    fn classify_bytes(&self, buffer: &[u8]) -> Result<ClassificationOutcome>;

    /// Classify one file by path. Default: read a bounded head and call [`Self::classify_bytes`].
    fn classify_path(&self, path: &Path) -> Result<ClassificationOutcome> {
        let head = read_head(path, ClassifierConsts::HEAD_READ_LIMIT)?;
        self.classify_bytes(&head)
            .with_context(|| format!("classify {}", path.display()))
    }

    /// Classify many files. Outcomes are returned in input order; any single failure fails the call.
    fn classify_paths(&self, paths: &[PathBuf]) -> Result<Vec<ClassificationOutcome>> {
        paths.iter().map(|p| self.classify_path(p)).collect()
    }
}

/// Read at most `limit` bytes from the start of `path`.
pub fn read_head(path: &Path, limit: usize) -> Result<Vec<u8>> {
    let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let mut head = Vec::with_capacity(limit.min(ClassifierConsts::TEXT_SAMPLE_SIZE));
    file.take(limit as u64)
        .read_to_end(&mut head)
        .with_context(|| format!("read {}", path.display()))?;
    Ok(head)
}
