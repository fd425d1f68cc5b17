//! detect-file-type: batch file type identification from file content

pub mod engine;
pub mod pipeline;
pub mod types;
pub mod utils;

/// Re-export types for API
pub use types::*;

pub use engine::{Classifier, SignatureClassifier};
pub use pipeline::{Expansion, detect_files, expand_targets};

use log::debug;
use std::io::Read;

/// Single entry point: expand `args` under `opts`, classify every target with `classifier`, and
/// return the reconciled batch.
///
/// - `-` in `args` reads from `stdin` (at most one `-` per call).
/// - The classifier is passed in and used as-is; build it once and reuse it across calls.
/// - `Err` only for batch-fatal conditions ([`BatchError`]). Per-target failures are logged, set
///   [`BatchResult::had_errors`], and are listed in [`BatchResult::failures`].
///
/// ```ignore
/// let opts = detect_file_type::Opts { recursive: true, ..Default::default() };
/// let classifier = detect_file_type::SignatureClassifier::new();
/// let result = detect_file_type::detect(&["src".into()], &opts, &classifier, &mut std::io::empty())?;
/// for record in result.records() {
///     println!("{}: {}", record.source_label, record.mime_type);
/// }
/// ```
pub fn detect<C, R>(
    args: &[String],
    opts: &Opts,
    classifier: &C,
    stdin: &mut R,
) -> Result<BatchResult, BatchError>
where
    C: Classifier + ?Sized,
    R: Read + ?Sized,
{
    debug!("{} CONFIG:{:#?}", env!("CARGO_PKG_NAME").to_uppercase(), opts);
    let expansion = expand_targets(args, opts);
    detect_files(classifier, &expansion, opts, stdin)
}
