//! Engine module: classification capability, CLI surface, output rendering

pub mod arg_parser;
pub mod classifier;
pub mod cli;
pub mod format;
pub mod signatures;
pub mod tools;

// Re-export commonly used functions
pub use arg_parser::Cli;
pub use classifier::{Classifier, read_head};
pub use cli::handle_run;
pub use format::{format_human, format_json, format_mime, render};
pub use signatures::{SignatureClassifier, TypeInfo};
pub use tools::{glob_match, is_os_hidden_file, should_include_in_walk};
