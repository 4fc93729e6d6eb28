//! Supermodel documentation generator.
//!
//! Renders a [`Supermodel`] to a single HTML document: a metadata preamble,
//! a collapsible class hierarchy, one section per module with its classes and
//! properties, and a numbered table of contents built from the finished body.
//! Every cross-reference to an entity documented in the same file becomes an
//! in-page anchor; everything else links out to its IRI.
//!
//! # Entry Points
//!
//! ```no_run
//! use std::path::Path;
//! use supermodel_docs::{generate, RenderOptions};
//!
//! generate(
//!     Path::new("cadastre.json"),
//!     Path::new("public/cadastre.html"),
//!     &RenderOptions::default(),
//! )
//! .expect("Documentation generation failed");
//! ```
//!
//! # Passes
//!
//! ```text
//! Supermodel ──► LocalityIndex + ClassTable
//!            ──► DocumentRenderer  (body, headings carry derived ids)
//!            ──► Headings ──► TocBuilder ──► spliced into div#header
//!            ──► verify_links
//! ```

#![deny(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic,
    missing_docs,
    clippy::missing_errors_doc
)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod config;
pub mod dom;
pub mod error;
pub mod extractor;
pub mod fragment;
pub mod headings;
pub mod hierarchy;
pub mod linker;
pub mod renderer;
pub mod toc;
pub mod verifier;
pub mod writer;

use std::path::Path;

use anyhow::{Context, Result};
use supermodel_model::Supermodel;
use tracing::{debug, info, warn};

pub use config::RenderOptions;
pub use dom::Element;
pub use error::DocsError;
pub use fragment::{LabelToId, SlugFragments};
pub use toc::Toc;
pub use verifier::LinkReport;

use extractor::{ClassTable, LocalityIndex};
use headings::collect_headings;
use linker::Linker;
use renderer::{DocumentRenderer, STYLESHEET};
use toc::build_toc;
use verifier::verify_links;

/// A rendered document.
#[derive(Debug, Clone)]
pub struct Rendered {
    /// The `<html>` element, table of contents included.
    pub document: Element,
    /// The table of contents spliced into the header.
    pub toc: Toc,
    /// Outcome of the internal link check; empty when checking is off.
    pub links: LinkReport,
}

impl Rendered {
    /// Serialises the document with its doctype.
    #[must_use]
    pub fn to_html(&self) -> String {
        format!("<!DOCTYPE html>\n{}", self.document.render())
    }
}

/// Renders `model` to a document tree.
///
/// `fragments` derives every heading id and every internal link target, so
/// the two always agree.
///
/// # Errors
///
/// Returns [`DocsError::BrokenLinks`] when `options.strict_links` is set and
/// an internal link has no target.
pub fn render(
    model: &Supermodel,
    options: &RenderOptions,
    fragments: &dyn LabelToId,
) -> Result<Rendered, DocsError> {
    let index = LocalityIndex::from_model(model);
    let classes = ClassTable::from_model(model);
    let linker = Linker::new(&index, fragments);

    let mut document = DocumentRenderer::new(model, options, linker, &classes).document();
    debug!(
        modules = model.component_models.len(),
        local_iris = index.len(),
        "document body rendered"
    );

    let toc = build_toc(collect_headings(&document));
    debug!(entries = toc.len(), "table of contents assembled");
    match document.find_mut(|el| el.id() == Some("header")) {
        Some(header) => header.push(toc.to_element()),
        None => warn!("document has no header; table of contents dropped"),
    }

    let links = if options.verify_links || options.strict_links {
        verify_links(&document)
    } else {
        LinkReport::default()
    };
    for href in &links.broken {
        warn!(%href, "internal link has no target");
    }
    for id in &links.duplicate_ids {
        warn!(%id, "element id used more than once");
    }
    if options.strict_links {
        if let Some(first) = links.broken.first() {
            return Err(DocsError::BrokenLinks {
                count: links.broken.len(),
                first: first.clone(),
            });
        }
    }

    Ok(Rendered {
        document,
        toc,
        links,
    })
}

/// Loads and normalises the JSON model at `path`.
///
/// # Errors
///
/// Returns [`DocsError::Model`] if the file cannot be read, does not parse, or
/// declares no title.
pub fn load_model(path: &Path) -> Result<Supermodel, DocsError> {
    Ok(Supermodel::from_path(path)?)
}

/// Loads the JSON model at `model_path`, renders it and writes the HTML to
/// `out_path`. With `include_css` off the stylesheet is written next to it.
///
/// # Errors
///
/// Returns an error if the model cannot be loaded, strict link checking
/// fails, or any file cannot be written.
pub fn generate(model_path: &Path, out_path: &Path, options: &RenderOptions) -> Result<Rendered> {
    let model = load_model(model_path)
        .with_context(|| format!("Failed to load model: {}", model_path.display()))?;
    let rendered = render(&model, options, &SlugFragments)
        .with_context(|| format!("Failed to render: {}", model_path.display()))?;

    writer::write_file(out_path, &rendered.to_html())?;
    if !options.include_css {
        let css = writer::write_stylesheet(out_path, &options.stylesheet_name, STYLESHEET)?;
        debug!(path = %css.display(), "stylesheet written");
    }

    info!(
        out = %out_path.display(),
        toc_entries = rendered.toc.len(),
        broken_links = rendered.links.broken.len(),
        "documentation written"
    );
    Ok(rendered)
}
