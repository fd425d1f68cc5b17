//! Public and internal types for the detection API and pipeline.

use serde::Serialize;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::utils::config::{STDIN_LABEL, StdinConsts};

/// What a detection target points at: a path string or the standard-input stream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TargetKind {
    FilePath(String),
    StdinMarker,
}

/// One unit of detection work, tagged with its position in the expanded input list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DetectionTarget {
    pub index: usize,
    pub kind: TargetKind,
}

impl DetectionTarget {
    pub fn is_stdin(&self) -> bool {
        matches!(self.kind, TargetKind::StdinMarker)
    }

    /// Literal path string, or `-` for stdin.
    pub fn source_label(&self) -> &str {
        match &self.kind {
            TargetKind::FilePath(p) => p,
            TargetKind::StdinMarker => STDIN_LABEL,
        }
    }
}

/// Why a file target was rejected before classification. Display text is the diagnostic reason.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum ErrorKind {
    #[error("No such file or directory")]
    NotFound,
    #[error("Not a regular file")]
    NotRegularFile,
    #[error("Permission denied")]
    PermissionDenied,
}

/// Result of checking a single file target.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationOutcome {
    Valid(PathBuf),
    Rejected(PathBuf, ErrorKind),
}

/// Conditions that abort a batch before any classification work starts.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum BatchError {
    #[error("multiple stdin inputs are not supported; use '-' only once ({count} given)")]
    MultipleStdin { count: usize },
    #[error("no files to process")]
    NoTargets,
}

/// Engine output for one input, before it is tied to a source label.
#[derive(Clone, Debug, PartialEq)]
pub struct ClassificationOutcome {
    pub label: String,
    pub mime_type: String,
    pub group: String,
    pub description: String,
    pub is_text: bool,
    /// Confidence in [0, 1].
    pub score: f64,
}

/// Uniform per-target result handed to the formatter.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassificationRecord {
    /// Literal path string as given (or discovered), `-` for stdin.
    #[serde(rename = "path")]
    pub source_label: String,
    pub label: String,
    pub mime_type: String,
    pub score: f64,
    pub group: String,
    pub description: String,
    pub is_text: bool,
}

impl ClassificationRecord {
    /// Tie an engine outcome to its source. Score is clamped to [0, 1] and rounded for output.
    pub fn from_outcome(source_label: impl Into<String>, outcome: ClassificationOutcome) -> Self {
        Self {
            source_label: source_label.into(),
            label: outcome.label,
            mime_type: outcome.mime_type,
            score: round_score(outcome.score),
            group: outcome.group,
            description: outcome.description,
            is_text: outcome.is_text,
        }
    }
}

fn round_score(score: f64) -> f64 {
    let scale = 10f64.powi(crate::utils::config::SCORE_DECIMALS);
    (score.clamp(0.0, 1.0) * scale).round() / scale
}

/// Which part of the batch a failure belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FailureScope {
    /// A single file target, rejected or unreachable.
    Target { index: usize, path: String },
    /// The stdin unit (capture or classification).
    Stdin { index: usize },
    /// The batched engine call for every file target at once.
    FileBatch { count: usize },
    /// A directory entry that could not be read during recursive expansion.
    Walk { path: Option<PathBuf> },
}

/// One reported failure. Rejections never show up in `records` but always land here.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Failure {
    pub scope: FailureScope,
    pub reason: String,
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.scope {
            FailureScope::Target { path, .. } => write!(f, "{}: {}", path, self.reason),
            FailureScope::Stdin { .. } => write!(f, "stdin: {}", self.reason),
            FailureScope::FileBatch { count } => {
                write!(f, "detection failed for {} file(s): {}", count, self.reason)
            }
            FailureScope::Walk { path: Some(p) } => write!(f, "{}: {}", p.display(), self.reason),
            FailureScope::Walk { path: None } => write!(f, "walk: {}", self.reason),
        }
    }
}

/// Reconciled output of one batch.
///
/// `records` is sorted by original index ascending, stable on ties (duplicate paths keep their
/// relative order). `had_errors` is true iff at least one target failed, whatever else succeeded.
#[derive(Clone, Debug, Default)]
pub struct BatchResult {
    pub records: Vec<(usize, ClassificationRecord)>,
    pub had_errors: bool,
    pub failures: Vec<Failure>,
}

impl BatchResult {
    /// Records only, in output order.
    pub fn records(&self) -> impl Iterator<Item = &ClassificationRecord> {
        self.records.iter().map(|(_, r)| r)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }
}

/// Process exit status derived from a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    /// Every target succeeded and at least one produced output.
    Success,
    /// Nothing produced output (including batch-fatal conditions).
    Failure,
    /// At least one success and at least one failure.
    Partial,
}

impl ExitStatus {
    pub fn code(self) -> i32 {
        match self {
            ExitStatus::Success => 0,
            ExitStatus::Failure => 1,
            ExitStatus::Partial => 2,
        }
    }

    pub fn for_batch(result: &BatchResult) -> Self {
        if result.is_empty() {
            ExitStatus::Failure
        } else if result.had_errors {
            ExitStatus::Partial
        } else {
            ExitStatus::Success
        }
    }

    pub fn for_outcome(outcome: &Result<BatchResult, BatchError>) -> Self {
        match outcome {
            Ok(result) => Self::for_batch(result),
            Err(_) => ExitStatus::Failure,
        }
    }
}

/// How stdin is captured before classification.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StdinPolicy {
    /// Copy the whole stream to a temporary file, classify by path, remove the file.
    #[default]
    Spool,
    /// Read at most `max_bytes` and classify that prefix in memory.
    Head { max_bytes: usize },
}

impl StdinPolicy {
    /// Build from a mode name (`spool` / `head`) and an optional byte cap.
    pub fn from_mode(mode: StdinMode, max_bytes: Option<usize>) -> Self {
        match mode {
            StdinMode::Spool => StdinPolicy::Spool,
            StdinMode::Head => StdinPolicy::Head {
                max_bytes: max_bytes.unwrap_or(StdinConsts::DEFAULT_HEAD_MAX_BYTES),
            },
        }
    }
}

/// Name-only form of [`StdinPolicy`], used by the CLI and the config file.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StdinMode {
    #[default]
    Spool,
    Head,
}

/// Rendering for the result stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Human,
    Mime,
}

/// Full options (CLI and lib).
#[derive(Clone, Debug, Default)]
pub struct Opts {
    /// Expand directory arguments into the regular files below them.
    pub recursive: bool,
    /// Follow symbolic links while recursing.
    pub follow_links: bool,
    /// Exclude patterns (glob syntax) for files discovered by recursion.
    pub exclude: Vec<String>,
    /// Stdin capture policy.
    pub stdin_policy: StdinPolicy,
    /// Output rendering (CLI only).
    pub format: OutputFormat,
    /// Debug logging.
    pub verbose: bool,
}
