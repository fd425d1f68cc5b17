use log::error;
use std::fmt::Display;

use crate::{Failure, FailureScope};

/// Collects per-target failures for a batch. Each one is logged as it is recorded, so every
/// failure produces exactly one diagnostic line on stderr.
#[derive(Debug, Default)]
pub struct FailureLog {
    failures: Vec<Failure>,
}

impl FailureLog {
    /// Start from failures already reported elsewhere (e.g. by the walk); these are not logged again.
    pub fn with_reported(failures: Vec<Failure>) -> Self {
        Self { failures }
    }

    pub fn record(&mut self, scope: FailureScope, reason: impl Display) {
        let failure = Failure {
            scope,
            reason: reason.to_string(),
        };
        error!("{}", failure);
        self.failures.push(failure);
    }

    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn into_inner(self) -> Vec<Failure> {
        self.failures
    }
}
