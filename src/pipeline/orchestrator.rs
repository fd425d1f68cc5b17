use log::debug;
use std::io::Read;
use std::path::Path;

use crate::engine::classifier::Classifier;
use crate::pipeline::batch::{ValidTarget, classify_file_batch};
use crate::pipeline::error_handler::FailureLog;
use crate::pipeline::reconcile::reconcile;
use crate::pipeline::stdin::classify_stdin;
use crate::pipeline::validate::validate_target;
use crate::pipeline::walk::Expansion;
use crate::{
    BatchError, BatchResult, ClassificationRecord, FailureScope, Opts, TargetKind,
    ValidationOutcome,
};

/// Check the batch-fatal conditions before any work starts: no targets, or more than one `-`.
pub fn check_batch(expansion: &Expansion) -> Result<(), BatchError> {
    if expansion.targets.is_empty() {
        return Err(BatchError::NoTargets);
    }
    let count = expansion.targets.iter().filter(|t| t.is_stdin()).count();
    if count > 1 {
        return Err(BatchError::MultipleStdin { count });
    }
    Ok(())
}

/// Main orchestrator: classify every target in `expansion` and reconcile into input order.
///
/// Stdin (if present) is captured from `stdin` under `opts.stdin_policy` and classified once.
/// File targets are validated one by one, then all valid ones go to the engine in a single
/// batched call. Per-target failures are logged and recorded without stopping the batch; only
/// the conditions in [`check_batch`] abort it.
pub fn detect_files<C, R>(
    classifier: &C,
    expansion: &Expansion,
    opts: &Opts,
    stdin: &mut R,
) -> Result<BatchResult, BatchError>
where
    C: Classifier + ?Sized,
    R: Read + ?Sized,
{
    check_batch(expansion)?;
    let mut failures = FailureLog::with_reported(expansion.walk_failures.clone());

    let mut stdin_record: Option<(usize, ClassificationRecord)> = None;
    let mut valid: Vec<ValidTarget> = Vec::new();

    for target in &expansion.targets {
        match &target.kind {
            TargetKind::StdinMarker => {
                match classify_stdin(classifier, stdin, opts.stdin_policy) {
                    Ok(capture) => {
                        debug!(
                            "stdin: {} byte(s) classified as {}",
                            capture.bytes_read, capture.outcome.label
                        );
                        stdin_record = Some((
                            target.index,
                            ClassificationRecord::from_outcome(
                                target.source_label(),
                                capture.outcome,
                            ),
                        ));
                    }
                    Err(e) => failures.record(
                        FailureScope::Stdin {
                            index: target.index,
                        },
                        format!("{:#}", e),
                    ),
                }
            }
            TargetKind::FilePath(p) => match validate_target(Path::new(p)) {
                ValidationOutcome::Valid(path) => valid.push(ValidTarget {
                    index: target.index,
                    source_label: p.clone(),
                    path,
                }),
                ValidationOutcome::Rejected(_, kind) => failures.record(
                    FailureScope::Target {
                        index: target.index,
                        path: p.clone(),
                    },
                    kind,
                ),
            },
        }
    }

    let file_records = if valid.is_empty() {
        Vec::new()
    } else {
        match classify_file_batch(classifier, &valid) {
            Ok(records) => records,
            Err(e) => {
                failures.record(
                    FailureScope::FileBatch { count: valid.len() },
                    format!("{:#}", e),
                );
                Vec::new()
            }
        }
    };

    debug!(
        "Batch done: {} target(s), {} classified, failures: {}",
        expansion.targets.len(),
        file_records.len() + usize::from(stdin_record.is_some()),
        !failures.is_empty()
    );
    Ok(reconcile(stdin_record, file_records, failures.into_inner()))
}
