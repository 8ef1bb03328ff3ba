//! Render configuration.
//!
//! Built in code with the `with_*` setters or loaded from TOML:
//!
//! ```toml
//! url_template = "https://yuml.me/diagram/{style}/class/"
//! style = "scruffy"
//! atomic_write = true
//! ```

use std::path::Path;

use serde::Deserialize;

use depdiag_core::{Error, Result};

use crate::style::Style;

/// Replaced by the style token in [`RenderConfig::url_template`].
pub const STYLE_PLACEHOLDER: &str = "{style}";

pub const DEFAULT_URL_TEMPLATE: &str = "https://yuml.me/diagram/{style}/class/";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Request target prefix; the encoded notation is appended verbatim.
    pub url_template: String,
    /// Style used by `DiagramRenderer::generate`.
    pub style: Style,
    /// Write through a temporary file and rename on success.
    pub atomic_write: bool,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            url_template: DEFAULT_URL_TEMPLATE.to_string(),
            style: Style::default(),
            atomic_write: true,
        }
    }
}

impl RenderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_url_template(mut self, template: impl Into<String>) -> Self {
        self.url_template = template.into();
        self
    }

    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    pub fn with_atomic_write(mut self, atomic: bool) -> Self {
        self.atomic_write = atomic;
        self
    }

    /// Parse and validate a TOML document.
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self = toml::from_str(source).map_err(|err| {
            Error::config_invalid(err.message().to_string())
                .with_operation("config::from_toml_str")
                .set_source(err)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|err| {
            Error::from(err)
                .with_operation("config::load")
                .with_context("path", path.display().to_string())
        })?;
        Self::from_toml_str(&source)
            .map_err(|err| err.with_context("path", path.display().to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if !self.url_template.contains(STYLE_PLACEHOLDER) {
            return Err(Error::config_invalid(format!(
                "url_template must contain {STYLE_PLACEHOLDER}"
            ))
            .with_operation("config::validate")
            .with_context("url_template", self.url_template.as_str()));
        }
        Ok(())
    }
}
