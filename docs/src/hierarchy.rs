//! Recursive class-hierarchy tree.
//!
//! Each class gets a marker (`hierarchy-node` when at least one of its
//! subclasses is documented here, `hierarchy-node-leaf` otherwise) and a link
//! from the [`Linker`]. Subclasses are followed through the [`ClassTable`]; a
//! class reached again on the same descent path is drawn as a leaf.

use std::collections::HashSet;

use supermodel_model::{ComponentModel, EntityRef};
use tracing::warn;

use crate::dom::Element;
use crate::extractor::ClassTable;
use crate::fragment::EntityKind;
use crate::linker::Linker;

/// Marker class for a class with documented subclasses.
pub const BRANCH_MARKER: &str = "hierarchy-node";
/// Marker class for a class without documented subclasses.
pub const LEAF_MARKER: &str = "hierarchy-node-leaf";

/// Renders subclass trees.
pub struct HierarchyRenderer<'a> {
    linker: Linker<'a>,
    classes: &'a ClassTable<'a>,
}

impl<'a> HierarchyRenderer<'a> {
    /// Creates a renderer.
    #[must_use]
    pub fn new(linker: Linker<'a>, classes: &'a ClassTable<'a>) -> Self {
        Self { linker, classes }
    }

    /// Renders `roots` and everything below them as nested lists.
    #[must_use]
    pub fn render(&self, roots: &[EntityRef]) -> Element {
        let mut path = HashSet::new();
        self.render_list(roots, &mut path)
    }

    /// The top-level "all modules" tree: one item per module, then its
    /// top-level classes.
    #[must_use]
    pub fn render_modules(&self, modules: &[ComponentModel]) -> Element {
        let mut ul = Element::new("ul").with_class("hierarchy-list");
        for module in modules {
            let mut li = Element::new("li")
                .with_child(Element::new("span").with_class(BRANCH_MARKER))
                .with_child(self.linker.link(EntityKind::Module, &module.to_ref()));
            let roots: Vec<EntityRef> = module
                .top_level_classes()
                .into_iter()
                .map(|c| c.to_ref())
                .collect();
            if !roots.is_empty() {
                li.push(self.render(&roots));
            }
            ul.push(li);
        }
        ul
    }

    /// Returns true if any subclass of `iri` is documented here.
    #[must_use]
    pub fn has_local_subclasses(&self, iri: &str) -> bool {
        self.subclasses(iri)
            .iter()
            .any(|sub| self.linker.is_local(&sub.iri))
    }

    fn subclasses(&self, iri: &str) -> &'a [EntityRef] {
        self.classes
            .get(iri)
            .map(|c| c.subclasses.as_slice())
            .unwrap_or_default()
    }

    fn render_list(&self, classes: &[EntityRef], path: &mut HashSet<String>) -> Element {
        let mut ul = Element::new("ul").with_class("nested-hierarchy-list");
        for class in classes {
            ul.push(self.render_item(class, path));
        }
        ul
    }

    fn render_item(&self, class: &EntityRef, path: &mut HashSet<String>) -> Element {
        let link = self.linker.link(EntityKind::Class, class);

        if path.contains(&class.iri) {
            warn!(iri = %class.iri, "subclass cycle; drawing class as a leaf");
            return Element::new("li")
                .with_child(Element::new("span").with_class(LEAF_MARKER))
                .with_child(link);
        }

        let marker = if self.has_local_subclasses(&class.iri) {
            BRANCH_MARKER
        } else {
            LEAF_MARKER
        };
        let mut li = Element::new("li")
            .with_child(Element::new("span").with_class(marker))
            .with_child(link);

        let subclasses = self.subclasses(&class.iri);
        if !subclasses.is_empty() {
            path.insert(class.iri.clone());
            li.push(self.render_list(subclasses, path));
            path.remove(&class.iri);
        }
        li
    }
}
