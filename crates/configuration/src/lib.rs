use crate::error::ConfigError;
use std::path::Path;

// Declare the modules that make up this crate.
pub mod error;
pub mod settings;

// Re-export the core types to provide a clean public API.
pub use settings::{AnalyticsSettings, ServerSettings, Settings, SourceSettings};

/// Loads the application configuration.
///
/// This function is the primary entry point for this crate. It reads the
/// configuration file (default `config.toml`, overridable per invocation),
/// layers `FUNDSCOPE_*` environment variables on top, and deserializes the
/// result into our strongly-typed `Settings` struct. Every field has a
/// default, so a missing file yields the stock configuration rather than an
/// error.
pub fn load_settings(path: Option<&Path>) -> Result<Settings, ConfigError> {
    let file = match path {
        Some(path) => config::File::from(path).required(true),
        None => config::File::with_name("config").required(false),
    };

    let builder = config::Config::builder()
        .add_source(file)
        // Allow e.g. FUNDSCOPE_SERVER__PORT=9000 to override the file.
        .add_source(
            config::Environment::with_prefix("FUNDSCOPE")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    let settings = builder.try_deserialize::<Settings>()?;
    settings.validate()?;

    Ok(settings)
}
