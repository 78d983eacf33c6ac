//! Shared configuration loader for the adf toolchain.
//!
//! `defaults/adf.default.toml` is embedded into every binary so that docs and
//! runtime behavior stay in sync. Applications layer user-specific files on top
//! of those defaults via [`Loader`] before deserializing into [`AdfConfig`].

use adf_babel::formats::html::HtmlOptions;
use adf_babel::formats::markdown::MarkdownOptions;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, File, FileFormat, ValueKind};
use serde::Deserialize;
use std::path::Path;

const DEFAULT_TOML: &str = include_str!("../defaults/adf.default.toml");

/// Top-level configuration consumed by adf applications.
#[derive(Debug, Clone, Deserialize)]
pub struct AdfConfig {
    pub render: RenderConfig,
    pub markdown: MarkdownConfig,
}

/// HTML rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderConfig {
    pub base_url: String,
    pub attachment_scheme: String,
    pub default_image_width: i64,
    pub max_image_width: i64,
}

impl From<&RenderConfig> for HtmlOptions {
    fn from(config: &RenderConfig) -> Self {
        HtmlOptions::new(config.base_url.clone())
            .with_attachment_scheme(config.attachment_scheme.clone())
            .with_image_widths(config.default_image_width, config.max_image_width)
    }
}

impl From<RenderConfig> for HtmlOptions {
    fn from(config: RenderConfig) -> Self {
        HtmlOptions::from(&config)
    }
}

/// Markdown rendering knobs.
#[derive(Debug, Clone, Deserialize)]
pub struct MarkdownConfig {
    pub bullet_marker: char,
}

impl From<&MarkdownConfig> for MarkdownOptions {
    fn from(config: &MarkdownConfig) -> Self {
        MarkdownOptions::default().with_bullet_marker(config.bullet_marker)
    }
}

impl From<MarkdownConfig> for MarkdownOptions {
    fn from(config: MarkdownConfig) -> Self {
        MarkdownOptions::from(&config)
    }
}

/// Helper for layering user overrides over the built-in defaults.
#[derive(Debug, Clone)]
pub struct Loader {
    builder: ConfigBuilder<DefaultState>,
}

impl Loader {
    /// Start a loader seeded with the embedded defaults.
    pub fn new() -> Self {
        let builder = Config::builder().add_source(File::from_str(DEFAULT_TOML, FileFormat::Toml));
        Self { builder }
    }

    /// Layer a configuration file. Missing files trigger an error.
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(true);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Layer an optional configuration file (ignored if the file is absent).
    pub fn with_optional_file(mut self, path: impl AsRef<Path>) -> Self {
        let source = File::from(path.as_ref())
            .format(FileFormat::Toml)
            .required(false);
        self.builder = self.builder.add_source(source);
        self
    }

    /// Apply a single key/value override (useful for CLI settings).
    pub fn set_override<I>(mut self, key: &str, value: I) -> Result<Self, ConfigError>
    where
        I: Into<ValueKind>,
    {
        self.builder = self.builder.set_override(key, value)?;
        Ok(self)
    }

    /// Finalize the builder and deserialize the resulting configuration.
    pub fn build(self) -> Result<AdfConfig, ConfigError> {
        self.builder.build()?.try_deserialize()
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience helper for callers that only need the defaults.
pub fn load_defaults() -> Result<AdfConfig, ConfigError> {
    Loader::new().build()
}
