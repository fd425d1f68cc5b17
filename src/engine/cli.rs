//! CLI command handler: build options, run the batch, print results, pick the exit status.

use anyhow::{Context, Result};
use log::{debug, error, warn};
use std::io::Write;
use std::num::NonZeroUsize;

use crate::engine::arg_parser::Cli;
use crate::engine::format::render;
use crate::engine::signatures::SignatureClassifier;
use crate::pipeline::{detect_files, expand_targets};
use crate::utils::{apply_file_to_opts, load_settings_toml, setup_logging};
use crate::{ExitStatus, Opts, StdinPolicy};

/// Apply CLI flags on top of `opts` (defaults, then settings file).
pub fn apply_cli_to_opts(cli: &Cli, opts: &mut Opts) {
    if let Some(format) = cli.format() {
        opts.format = format;
    }
    opts.recursive |= cli.recursive;
    opts.follow_links |= cli.follow_links;
    if !cli.exclude.is_empty() {
        opts.exclude = cli.exclude.clone();
    }
    opts.verbose |= cli.verbose;
    match (cli.stdin_mode, cli.stdin_max_bytes.map(NonZeroUsize::get)) {
        (Some(mode), cap) => {
            let cap = cap.or(match opts.stdin_policy {
                StdinPolicy::Head { max_bytes } => Some(max_bytes),
                StdinPolicy::Spool => None,
            });
            opts.stdin_policy = StdinPolicy::from_mode(mode, cap);
        }
        (None, Some(cap)) => {
            if let StdinPolicy::Head { ref mut max_bytes } = opts.stdin_policy {
                *max_bytes = cap;
            } else {
                warn!("--stdin-max-bytes only applies with --stdin-mode head; ignoring");
            }
        }
        (None, None) => {}
    }
}

/// Run one batch. Results go to stdout, diagnostics to stderr via the logger.
pub fn handle_run(cli: &Cli) -> Result<ExitStatus> {
    let cwd = std::env::current_dir().context("read current directory")?;
    let settings = load_settings_toml(&cwd);

    let mut opts = Opts::default();
    if let Ok(Some(ref file)) = settings {
        apply_file_to_opts(file, &mut opts);
    }
    setup_logging(opts.verbose || cli.verbose);
    if let Err(e) = &settings {
        warn!("{:#}; using defaults", e);
    }
    apply_cli_to_opts(cli, &mut opts);
    debug!(
        "{} CONFIG:{:#?}",
        env!("CARGO_PKG_NAME").to_uppercase(),
        opts
    );

    let expansion = expand_targets(&cli.paths, &opts);
    let classifier = SignatureClassifier::new();
    let stdin = std::io::stdin();
    let outcome = detect_files(&classifier, &expansion, &opts, &mut stdin.lock());

    let status = ExitStatus::for_outcome(&outcome);
    match outcome {
        Err(e) => error!("{}", e),
        Ok(result) if !result.is_empty() => {
            let rendered = render(&result, opts.format)?;
            let mut out = std::io::stdout().lock();
            writeln!(out, "{}", rendered).context("write results")?;
            out.flush().context("flush results")?;
        }
        Ok(_) => debug!("No target produced a result"),
    }
    Ok(status)
}
