use clap::Parser;
use std::num::NonZeroUsize;

use crate::{OutputFormat, StdinMode};

/// Content-based file type detection for many files at once.
#[derive(Clone, Debug, Parser)]
#[command(name = "detect-file-type", version)]
#[command(about = "Detect file types from content. Use - to read from stdin.")]
pub struct Cli {
    /// File paths to detect (use - for stdin).
    #[arg(value_name = "PATHS", required = true, num_args = 1..)]
    pub paths: Vec<String>,

    /// JSON output (default).
    #[arg(long, overrides_with_all = ["human", "mime"])]
    pub json: bool,

    /// Human-readable output.
    #[arg(long, overrides_with_all = ["json", "mime"])]
    pub human: bool,

    /// Bare MIME type output, one per line.
    #[arg(long, overrides_with_all = ["json", "human"])]
    pub mime: bool,

    // Switches below only turn things on; the settings file can also turn them on.

    /// Recurse into directories.
    #[arg(long, short = 'r')]
    pub recursive: bool,

    /// Follow symbolic links while recursing.
    #[arg(long, short = 'f')]
    pub follow_links: bool,

    /// Exclude patterns (glob syntax) for files found by recursion: -e pattern1 pattern2
    #[arg(long, short = 'e', num_args = 1..)]
    pub exclude: Vec<String>,

    /// How to capture stdin: spool to a temp file (whole stream) or head (first N bytes).
    #[arg(long, value_enum)]
    pub stdin_mode: Option<StdinMode>,

    /// Byte cap for --stdin-mode head (at least 1). Default: 1 MB.
    #[arg(long)]
    pub stdin_max_bytes: Option<NonZeroUsize>,

    /// Verbose output.
    #[arg(long, short = 'v')]
    pub verbose: bool,
}

impl Cli {
    /// Output format from flags; None when no format flag was given.
    pub fn format(&self) -> Option<OutputFormat> {
        if self.human {
            Some(OutputFormat::Human)
        } else if self.mime {
            Some(OutputFormat::Mime)
        } else if self.json {
            Some(OutputFormat::Json)
        } else {
            None
        }
    }
}
