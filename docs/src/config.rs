//! Render options, loadable from TOML.
//!
//! ```toml
//! include_css = false
//! stylesheet_name = "style.css"
//! strict_links = true
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::DocsError;

/// Stylesheet file name used when none is configured.
pub const DEFAULT_STYLESHEET: &str = "supermodel.css";

/// Options controlling one render.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderOptions {
    /// Inline the stylesheet in `<head>`; otherwise link to `stylesheet_name`.
    pub include_css: bool,
    /// File name of the external stylesheet.
    pub stylesheet_name: String,
    /// Render the "Class Hierarchy" section.
    pub class_hierarchy: bool,
    /// Check internal links after rendering.
    pub verify_links: bool,
    /// Treat broken internal links as an error.
    pub strict_links: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            include_css: true,
            stylesheet_name: DEFAULT_STYLESHEET.to_string(),
            class_hierarchy: true,
            verify_links: true,
            strict_links: false,
        }
    }
}

impl RenderOptions {
    /// Parses options from TOML; absent keys keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Config`] on malformed TOML or unknown keys.
    pub fn from_toml_str(source: &str) -> Result<Self, DocsError> {
        Ok(toml::from_str(source)?)
    }

    /// Reads options from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`DocsError::Io`] if the file cannot be read, or
    /// [`DocsError::Config`] if it does not parse.
    pub fn from_path(path: &Path) -> Result<Self, DocsError> {
        let source = std::fs::read_to_string(path).map_err(|source| DocsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }
}
