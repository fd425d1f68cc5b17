//! Path expansion: turns raw arguments into ordered detection targets, recursing into
//! directories when asked.

use log::{debug, warn};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::engine::tools::should_include_in_walk;
use crate::utils::config::STDIN_LABEL;
use crate::{DetectionTarget, Failure, FailureScope, Opts, TargetKind};

/// One result from a directory walk: either a file to consider or an error with optional path.
pub enum WalkOutcome {
    Ok(PathBuf),
    Err { msg: String, path: Option<PathBuf> },
}

/// Convert a walkdir result into [`WalkOutcome`]. Non-files become `None`.
pub fn to_outcome_walkdir(r: Result<walkdir::DirEntry, walkdir::Error>) -> Option<WalkOutcome> {
    match r {
        Ok(entry) if entry.file_type().is_file() => Some(WalkOutcome::Ok(entry.into_path())),
        Ok(_) => None,
        Err(err) => Some(WalkOutcome::Err {
            msg: format!("{}", err),
            path: err.path().map(PathBuf::from),
        }),
    }
}

/// Expanded argument list. `walk_failures` holds entries the recursive walk could not read.
#[derive(Debug, Default)]
pub struct Expansion {
    pub targets: Vec<DetectionTarget>,
    pub walk_failures: Vec<Failure>,
}

impl Expansion {
    /// Wrap an already-built target list (no walk happened).
    pub fn from_targets(targets: Vec<DetectionTarget>) -> Self {
        Self {
            targets,
            walk_failures: Vec::new(),
        }
    }

    fn push(&mut self, kind: TargetKind) {
        let index = self.targets.len();
        self.targets.push(DetectionTarget { index, kind });
    }
}

/// Expand `args` in order. `-` always stays a stdin marker; a directory expands to its regular
/// files (depth-first, sorted by name per directory) only when `opts.recursive`; everything else
/// passes through untouched. Existence is not checked here and duplicates are kept.
pub fn expand_targets(args: &[String], opts: &Opts) -> Expansion {
    let mut expansion = Expansion::default();
    for arg in args {
        if arg == STDIN_LABEL {
            expansion.push(TargetKind::StdinMarker);
            continue;
        }
        let path = Path::new(arg);
        if opts.recursive && path.is_dir() {
            run_walk_loop(&mut expansion, walkdir_iter(path, opts.follow_links), &opts.exclude);
        } else {
            expansion.push(TargetKind::FilePath(arg.clone()));
        }
    }
    debug!(
        "Expanded {} argument(s) into {} target(s)",
        args.len(),
        expansion.targets.len()
    );
    expansion
}

/// Per directory: files first, then subdirectories, each sorted by name.
fn walkdir_iter(root: &Path, follow_links: bool) -> impl Iterator<Item = WalkOutcome> {
    WalkDir::new(root)
        .follow_links(follow_links)
        .sort_by(|a, b| {
            a.file_type()
                .is_dir()
                .cmp(&b.file_type().is_dir())
                .then_with(|| a.file_name().cmp(b.file_name()))
        })
        .into_iter()
        .filter_map(to_outcome_walkdir)
}

/// Consume `iter`, appending included files as targets and recording unreadable entries.
fn run_walk_loop<I>(expansion: &mut Expansion, iter: I, exclude: &[String])
where
    I: Iterator<Item = WalkOutcome>,
{
    for outcome in iter {
        match outcome {
            WalkOutcome::Ok(path) => {
                if should_include_in_walk(&path, exclude) {
                    expansion.push(TargetKind::FilePath(path.to_string_lossy().into_owned()));
                }
            }
            WalkOutcome::Err { msg, path } => {
                warn!("Permission denied or error accessing path: {}", msg);
                expansion.walk_failures.push(Failure {
                    scope: FailureScope::Walk { path },
                    reason: msg,
                });
            }
        }
    }
}
