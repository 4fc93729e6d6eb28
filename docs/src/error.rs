//! Errors raised by the documentation renderer.

use std::path::PathBuf;

use supermodel_model::ModelError;

/// Failure to configure, render or write a document.
#[derive(Debug, thiserror::Error)]
pub enum DocsError {
    /// The supermodel could not be loaded.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The render options file is invalid.
    #[error("invalid render options: {0}")]
    Config(#[from] toml::de::Error),

    /// A file could not be read or written.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Strict link checking found internal links without a target.
    #[error("{count} broken internal link(s), first: {first}")]
    BrokenLinks {
        /// Number of broken links.
        count: usize,
        /// The first broken `href`.
        first: String,
    },
}
