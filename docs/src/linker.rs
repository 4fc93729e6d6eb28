//! Resolves entity references to internal anchors or external links.
//!
//! A reference to an IRI in the [`LocalityIndex`] becomes `#<fragment>`, where
//! the fragment is derived from the entity's canonical heading label exactly as
//! the heading itself derived its id. Anything else links to the IRI verbatim.

use supermodel_model::EntityRef;

use crate::dom::Element;
use crate::extractor::LocalityIndex;
use crate::fragment::{EntityKind, LabelToId};

/// A resolved reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    /// Target: `#fragment` or the entity IRI.
    pub href: String,
    /// Link text: the entity name.
    pub text: String,
    /// True when the target is outside this document.
    pub is_external: bool,
}

impl Link {
    /// Renders the link as an `<a>` element.
    ///
    /// External links open in a new tab and carry an icon.
    #[must_use]
    pub fn to_element(&self) -> Element {
        if self.is_external {
            external_link(&self.text, &self.href)
        } else {
            Element::new("a")
                .with_attr("href", self.href.clone())
                .with_child(self.text.clone())
        }
    }
}

/// Builds an external link element.
#[must_use]
pub fn external_link(text: &str, href: &str) -> Element {
    Element::new("a")
        .with_class("external-link")
        .with_attr("href", href)
        .with_attr("target", "_blank")
        .with_attr("rel", "noopener")
        .with_child(text)
        .with_child(
            Element::new("i")
                .with_class("fa fa-external-link")
                .with_attr("aria-hidden", "true"),
        )
}

/// The cross-reference resolver.
///
/// Holds only the read-only locality index and the shared [`LabelToId`];
/// resolution has no side effects and can be repeated freely.
#[derive(Clone, Copy)]
pub struct Linker<'a> {
    index: &'a LocalityIndex,
    fragments: &'a dyn LabelToId,
}

impl<'a> Linker<'a> {
    /// Creates a resolver over `index`.
    #[must_use]
    pub fn new(index: &'a LocalityIndex, fragments: &'a dyn LabelToId) -> Self {
        Self { index, fragments }
    }

    /// The locality index.
    #[must_use]
    pub fn index(&self) -> &'a LocalityIndex {
        self.index
    }

    /// Returns true if `iri` has a heading in this document.
    #[must_use]
    pub fn is_local(&self, iri: &str) -> bool {
        self.index.contains(iri)
    }

    /// Anchor id of the heading for an entity of `kind` named `name`.
    #[must_use]
    pub fn anchor_id(&self, kind: EntityKind, name: &str) -> String {
        self.fragments.fragment(&kind.heading_label(name))
    }

    /// Anchor id for an arbitrary heading label.
    #[must_use]
    pub fn label_id(&self, label: &str) -> String {
        self.fragments.fragment(label)
    }

    /// Resolves a reference to an entity of `kind`.
    #[must_use]
    pub fn resolve(&self, kind: EntityKind, iri: &str, name: &str) -> Link {
        if self.is_local(iri) {
            Link {
                href: format!("#{}", self.anchor_id(kind, name)),
                text: name.to_string(),
                is_external: false,
            }
        } else {
            Link {
                href: iri.to_string(),
                text: name.to_string(),
                is_external: true,
            }
        }
    }

    /// Resolves an [`EntityRef`] of `kind`.
    #[must_use]
    pub fn resolve_ref(&self, kind: EntityKind, entity: &EntityRef) -> Link {
        self.resolve(kind, &entity.iri, &entity.name)
    }

    /// Resolves and renders in one step.
    #[must_use]
    pub fn link(&self, kind: EntityKind, entity: &EntityRef) -> Element {
        self.resolve_ref(kind, entity).to_element()
    }
}
