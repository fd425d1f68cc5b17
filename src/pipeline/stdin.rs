//! Capture the stdin stream under a [`StdinPolicy`] and classify it.

use anyhow::{Context, Result};
use log::{debug, warn};
use std::io::Read;

use crate::engine::classifier::Classifier;
use crate::utils::tempfiles::SpoolFile;
use crate::{ClassificationOutcome, StdinPolicy};

/// Classified stdin plus how much of it was seen.
#[derive(Debug)]
pub struct StdinCapture {
    pub outcome: ClassificationOutcome,
    pub bytes_read: u64,
    /// Head policy only: the cap was reached, trailing bytes (if any) were not read.
    pub truncated: bool,
}

pub fn classify_stdin<C, R>(classifier: &C, reader: &mut R, policy: StdinPolicy) -> Result<StdinCapture>
where
    C: Classifier + ?Sized,
    R: Read + ?Sized,
{
    match policy {
        StdinPolicy::Spool => spool_and_classify(classifier, reader),
        StdinPolicy::Head { max_bytes } => head_and_classify(classifier, reader, max_bytes),
    }
}

/// Whole stream to a temp file, classify by path. The spool file is dropped (and removed) before
/// returning, whether classification succeeded or not.
fn spool_and_classify<C, R>(classifier: &C, reader: &mut R) -> Result<StdinCapture>
where
    C: Classifier + ?Sized,
    R: Read + ?Sized,
{
    let spool = SpoolFile::spool(reader)?;
    debug!(
        "Spooled {} byte(s) of stdin to {}",
        spool.len(),
        spool.path().display()
    );
    let outcome = classifier.classify_path(spool.path())?;
    Ok(StdinCapture {
        outcome,
        bytes_read: spool.len(),
        truncated: false,
    })
}

fn head_and_classify<C, R>(classifier: &C, reader: &mut R, max_bytes: usize) -> Result<StdinCapture>
where
    C: Classifier + ?Sized,
    R: Read + ?Sized,
{
    let mut buffer = Vec::new();
    reader
        .take(max_bytes as u64)
        .read_to_end(&mut buffer)
        .context("read stdin")?;
    let truncated = buffer.len() == max_bytes;
    if truncated {
        warn!(
            "stdin: read limit of {} bytes reached; any remaining input was ignored",
            max_bytes
        );
    }
    let outcome = classifier.classify_bytes(&buffer)?;
    Ok(StdinCapture {
        outcome,
        bytes_read: buffer.len() as u64,
        truncated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::signatures::SignatureClassifier;
    use std::io::Cursor;

    #[test]
    fn head_at_cap_is_truncated() {
        let data = b"abcdefgh".repeat(4);
        let cap = data.len();
        let got = classify_stdin(
            &SignatureClassifier::new(),
            &mut Cursor::new(data),
            StdinPolicy::Head { max_bytes: cap },
        )
        .unwrap();
        assert!(got.truncated);
        assert_eq!(got.bytes_read, cap as u64);
    }

    #[test]
    fn head_below_cap_is_not_truncated() {
        let data = b"abcdefgh".repeat(4);
        let cap = data.len() + 1;
        let got = classify_stdin(
            &SignatureClassifier::new(),
            &mut Cursor::new(data),
            StdinPolicy::Head { max_bytes: cap },
        )
        .unwrap();
        assert!(!got.truncated);
    }

    #[test]
    fn head_only_sees_prefix() {
        // PNG magic within the cap, text after it.
        let mut data = b"\x89PNG\r\n\x1a\n".to_vec();
        data.extend_from_slice(&b"x".repeat(100));
        let got = classify_stdin(
            &SignatureClassifier::new(),
            &mut Cursor::new(data),
            StdinPolicy::Head { max_bytes: 8 },
        )
        .unwrap();
        assert_eq!(got.bytes_read, 8);
        assert_eq!(got.outcome.label, "png");
    }

    #[test]
    fn empty_input_is_empty_under_both_policies() {
        for policy in [StdinPolicy::Spool, StdinPolicy::Head { max_bytes: 1024 }] {
            let got =
                classify_stdin(&SignatureClassifier::new(), &mut Cursor::new(Vec::new()), policy)
                    .unwrap();
            assert_eq!(got.outcome.label, "empty", "{policy:?}");
            assert!(!got.truncated);
        }
    }

    #[test]
    fn spool_reads_everything() {
        let data = "plain text line\n".repeat(10_000);
        let got = classify_stdin(
            &SignatureClassifier::new(),
            &mut Cursor::new(data.clone().into_bytes()),
            StdinPolicy::Spool,
        )
        .unwrap();
        assert_eq!(got.bytes_read, data.len() as u64);
        assert_eq!(got.outcome.group, "text");
    }
}
