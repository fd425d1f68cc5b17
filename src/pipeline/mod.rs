//! Batch pipeline: expand, validate, capture stdin, classify, reconcile.

pub mod batch;
pub mod error_handler;
pub mod orchestrator;
pub mod reconcile;
pub mod stdin;
pub mod validate;
pub mod walk;

pub use batch::{ValidTarget, classify_file_batch};
pub use error_handler::FailureLog;
pub use orchestrator::{check_batch, detect_files};
pub use reconcile::reconcile;
pub use stdin::{StdinCapture, classify_stdin};
pub use validate::validate_target;
pub use walk::{Expansion, WalkOutcome, expand_targets, to_outcome_walkdir};
