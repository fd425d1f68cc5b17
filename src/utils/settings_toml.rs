//! Load `.detect-file-type.toml` from a directory (CLI only). Lib callers build [`Opts`] themselves.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::num::NonZeroUsize;
use std::path::Path;

use crate::utils::config::PackagePaths;
use crate::{Opts, OutputFormat, StdinMode, StdinPolicy};

#[derive(Debug, Default, Deserialize)]
pub struct SettingsToml {
    #[serde(default)]
    settings: DetectSection,
}

#[derive(Debug, Default, Deserialize)]
struct DetectSection {
    format: Option<OutputFormat>,
    recursive: Option<bool>,
    follow_links: Option<bool>,
    exclude: Option<Vec<String>>,
    stdin_mode: Option<StdinMode>,
    stdin_max_bytes: Option<NonZeroUsize>,
    verbose: Option<bool>,
}

/// Load the settings file from `dir`. `Ok(None)` when there is no file; `Err` when it exists but
/// cannot be read or parsed (caller warns and carries on with defaults).
pub fn load_settings_toml(dir: &Path) -> Result<Option<SettingsToml>> {
    let path = dir.join(PackagePaths::get().config_filename());
    let s = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e).with_context(|| format!("read {}", path.display())),
    };
    parse_settings_toml(&s)
        .map(Some)
        .with_context(|| format!("parse {}", path.display()))
}

pub fn parse_settings_toml(s: &str) -> Result<SettingsToml, toml::de::Error> {
    toml::from_str(s)
}

/// Overwrite opts field from file when present.
macro_rules! apply_file_opt {
    ($sec:expr, $opts:expr, $sec_field:ident => $opts_field:ident) => {
        if let Some(v) = $sec.$sec_field {
            $opts.$opts_field = v;
        }
    };
}

/// Apply file config to opts (only fields present in the file). Call before applying CLI.
pub fn apply_file_to_opts(file: &SettingsToml, opts: &mut Opts) {
    let sec = &file.settings;
    apply_file_opt!(sec, opts, format => format);
    apply_file_opt!(sec, opts, recursive => recursive);
    apply_file_opt!(sec, opts, follow_links => follow_links);
    if let Some(ref v) = sec.exclude {
        opts.exclude = v.clone();
    }
    apply_file_opt!(sec, opts, verbose => verbose);
    match (sec.stdin_mode, sec.stdin_max_bytes.map(NonZeroUsize::get)) {
        (Some(mode), cap) => opts.stdin_policy = StdinPolicy::from_mode(mode, cap),
        (None, Some(cap)) => {
            if let StdinPolicy::Head { ref mut max_bytes } = opts.stdin_policy {
                *max_bytes = cap;
            }
        }
        (None, None) => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_overrides_defaults() {
        let file = parse_settings_toml(
            r#"
            [settings]
            format = "human"
            recursive = true
            exclude = ["*.log"]
            stdin_mode = "head"
            stdin_max_bytes = 16
            "#,
        )
        .unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.format, OutputFormat::Human);
        assert!(opts.recursive);
        assert!(!opts.follow_links);
        assert_eq!(opts.exclude, vec!["*.log".to_string()]);
        assert_eq!(opts.stdin_policy, StdinPolicy::Head { max_bytes: 16 });
    }

    #[test]
    fn cap_without_mode_only_touches_head_policy() {
        let file = parse_settings_toml("[settings]\nstdin_max_bytes = 8\n").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.stdin_policy, StdinPolicy::Spool);
    }

    #[test]
    fn zero_cap_is_rejected() {
        assert!(parse_settings_toml("[settings]\nstdin_max_bytes = 0\n").is_err());
        assert!(parse_settings_toml("[settings]\nstdin_max_bytes = 1\n").is_ok());
    }

    #[test]
    fn missing_section_is_empty() {
        let file = parse_settings_toml("").unwrap();
        let mut opts = Opts::default();
        apply_file_to_opts(&file, &mut opts);
        assert_eq!(opts.format, OutputFormat::Json);
    }

    #[test]
    fn unknown_mode_is_rejected() {
        assert!(parse_settings_toml("[settings]\nstdin_mode = \"mmap\"\n").is_err());
    }
}
