pub mod config;
pub mod logger;
pub mod settings_toml;
pub mod tempfiles;

pub use config::*;
pub use logger::setup_logging;
pub use settings_toml::{SettingsToml, apply_file_to_opts, load_settings_toml};
pub use tempfiles::SpoolFile;
