//! Application configuration constants.
//! Capture limits and engine thresholds in one place.

use std::sync::OnceLock;

// ---- Package / paths (from CARGO_PKG_NAME, cached) ----

/// Package-derived names: built once from `CARGO_PKG_NAME`, then cached.
pub struct PackagePaths {
    pkg_name: &'static str,
    config_filename: String,
    spool_prefix: String,
}

static PACKAGE_PATHS: OnceLock<PackagePaths> = OnceLock::new();

impl PackagePaths {
    /// Build and cache names from `CARGO_PKG_NAME`. Called once on first use.
    pub fn get() -> &'static PackagePaths {
        PACKAGE_PATHS.get_or_init(|| {
            let pkg = env!("CARGO_PKG_NAME");
            PackagePaths {
                pkg_name: pkg,
                config_filename: format!(".{pkg}.toml"),
                spool_prefix: format!(".{pkg}-stdin-"),
            }
        })
    }

    pub fn pkg_name(&self) -> &str {
        self.pkg_name
    }

    /// Per-directory settings file, e.g. `.detect-file-type.toml`.
    pub fn config_filename(&self) -> &str {
        &self.config_filename
    }

    /// Prefix for the temporary file that holds spooled stdin.
    pub fn spool_prefix(&self) -> &str {
        &self.spool_prefix
    }
}

/// Argument token and source label for standard input.
pub const STDIN_LABEL: &str = "-";

// ---- Stdin capture ----

pub struct StdinConsts;

impl StdinConsts {
    /// Byte cap for head capture when none is configured. 1 MB.
    pub const DEFAULT_HEAD_MAX_BYTES: usize = 1_048_576;
    /// Chunk size for copying stdin into the spool file (bytes). 64 KB.
    pub const SPOOL_CHUNK_SIZE: usize = 64 * 1024;
}

// ---- Classification ----

/// Content-signature engine thresholds.
pub struct ClassifierConsts;

impl ClassifierConsts {
    /// Bytes read from the start of a file for path-based classification. 64 KB.
    pub const HEAD_READ_LIMIT: usize = 64 * 1024;
    /// Prefix inspected by the text heuristic (bytes).
    pub const TEXT_SAMPLE_SIZE: usize = 8 * 1024;
    /// Max share of control bytes (excluding whitespace) still treated as text.
    pub const MAX_CONTROL_RATIO: f64 = 0.05;
    /// Score for a matched magic number.
    pub const SIGNATURE_SCORE: f64 = 0.99;
    /// Score for text that parsed as its refined type (JSON, markup, script).
    pub const REFINED_TEXT_SCORE: f64 = 0.95;
    /// Score for generic text.
    pub const TEXT_SCORE: f64 = 0.9;
    /// Score when nothing matched.
    pub const UNKNOWN_SCORE: f64 = 0.5;
}

// ---- Output ----

/// Decimal places kept for the score in records.
pub const SCORE_DECIMALS: i32 = 4;
