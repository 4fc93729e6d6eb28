//! Label-to-anchor derivation and the canonical heading labels.
//!
//! Heading rendering and reference resolution never talk to each other. They
//! agree on anchor ids only because both apply the same [`LabelToId`] to the
//! same canonical label produced by [`EntityKind::heading_label`].

/// Derives a URL-fragment-safe identifier from a display label.
///
/// Implementations must be pure: equal labels always yield equal ids.
pub trait LabelToId {
    /// Returns the anchor id for `label`.
    fn fragment(&self, label: &str) -> String;
}

/// Default [`LabelToId`]: lowercase slug with `-` separators.
///
/// `"Class: Parcel"` becomes `class-parcel`; a label with no alphanumeric
/// characters becomes `section`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SlugFragments;

impl LabelToId for SlugFragments {
    fn fragment(&self, label: &str) -> String {
        let mut out = String::with_capacity(label.len());
        let mut last_dash = false;
        for ch in label.chars().flat_map(char::to_lowercase) {
            if ch.is_alphanumeric() {
                out.push(ch);
                last_dash = false;
            } else if !last_dash {
                out.push('-');
                last_dash = true;
            }
        }
        let trimmed = out.trim_matches('-');
        if trimmed.is_empty() {
            "section".to_string()
        } else {
            trimmed.to_string()
        }
    }
}

/// The kinds of entity that own a heading in the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    /// A component model.
    Module,
    /// A class.
    Class,
    /// A documented RDF property.
    Property,
}

impl EntityKind {
    /// Returns the exact heading text for an entity of this kind.
    #[must_use]
    pub fn heading_label(self, name: &str) -> String {
        match self {
            EntityKind::Module => format!("Module: {name}"),
            EntityKind::Class => format!("Class: {name}"),
            EntityKind::Property => format!("Property: {name}"),
        }
    }
}

/// Id label of a structural heading that documents no entity, e.g.
/// `"Section: Class Hierarchy"`.
///
/// The `Section:` prefix keeps these ids apart from every canonical entity
/// label, so a class named `Hierarchy` never shares an anchor with the
/// hierarchy section.
#[must_use]
pub fn structural_label(text: &str) -> String {
    format!("Section: {text}")
}

/// Id label of a module's section heading, e.g.
/// `"Section: Cadastre - Classes"`.
#[must_use]
pub fn section_label(module_name: &str, section: &str) -> String {
    structural_label(&format!("{module_name} - {section}"))
}
