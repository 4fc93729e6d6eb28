//! Errors raised while loading a supermodel.

use std::path::PathBuf;

/// Failure to load or validate a supermodel.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// The model file could not be read.
    #[error("cannot read model {path}: {source}")]
    Io {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The model JSON is malformed or does not match the schema.
    #[error("invalid model JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// The supermodel declares no title.
    #[error(
        "the supermodel {iri} has no title; supply dcterms:title, rdfs:label or schema:name"
    )]
    MissingTitle {
        /// IRI of the supermodel.
        iri: String,
    },
}
