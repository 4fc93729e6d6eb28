//! Supermodel semantic model encoded as typed Rust data.
//!
//! The `supermodel-model` crate holds the already-extracted view of an
//! ontology that the documentation renderer consumes: component models,
//! classes, properties, notes and preamble metadata. Models arrive as JSON
//! produced by an upstream query layer and are normalised on load.
//!
//! # Entry Point
//!
//! ```
//! let json = r#"{ "iri": "https://example.org/sm", "metadata": { "title": "Example" } }"#;
//! let model = supermodel_model::Supermodel::from_json_str(json).unwrap();
//! assert_eq!(model.title(), Some("Example"));
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod error;
pub mod loader;
pub mod model;

pub use error::ModelError;
pub use model::{
    Class, ClassProperty, ComponentModel, EntityRef, Metadata, Note, NoteKind, RdfProperty,
    Supermodel, DEFAULT_ORDER,
};
