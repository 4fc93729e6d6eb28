//! Section headings: construction, and collection from a finished tree.

use crate::dom::{Element, Node};

/// Class of the self-link placed inside anchored headings.
pub const ANCHOR_CLASS: &str = "anchor";

/// Builds a heading element.
///
/// With an `id`, the heading carries a self-link so readers can copy the
/// anchor. The self-link contributes no text to the heading label.
#[must_use]
pub fn heading(level: u8, text: &str, id: Option<String>) -> Element {
    let tag = match level {
        1 => "h1",
        2 => "h2",
        3 => "h3",
        4 => "h4",
        5 => "h5",
        _ => "h6",
    };
    let mut el = Element::new(tag);
    if let Some(id) = id {
        el.push(
            Element::new("a")
                .with_class(ANCHOR_CLASS)
                .with_attr("href", format!("#{id}")),
        );
        el.set_attr("id", id);
    }
    el.with_child(Element::new("span").with_child(text))
}

/// Returns the outline-relevant level (2, 3 or 4) of an element.
#[must_use]
pub fn outline_level(el: &Element) -> Option<u8> {
    match el.tag() {
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        _ => None,
    }
}

/// A heading found in the document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Heading<'a> {
    /// Document heading level: 2, 3 or 4.
    pub level: u8,
    /// The heading's anchor id, if any.
    pub identifier: Option<&'a str>,
    /// Display text.
    pub label: String,
}

impl Heading<'_> {
    /// Outline depth: level 2 is depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        usize::from(self.level.saturating_sub(1))
    }

    fn from_element(el: &Element, level: u8) -> Heading<'_> {
        Heading {
            level,
            identifier: el.id(),
            label: heading_label(el),
        }
    }
}

/// Text of a heading, ignoring its self-link.
fn heading_label(el: &Element) -> String {
    let mut out = String::new();
    for child in el.children() {
        match child {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) if e.tag() == "a" && e.has_class(ANCHOR_CLASS) => {}
            Node::Element(e) => out.push_str(&e.text_content()),
            Node::Raw(_) => {}
        }
    }
    out.trim().to_string()
}

/// Pre-order iterator over the outline headings of a tree.
///
/// A heading is yielded and its subtree is not searched further; every other
/// element's children are visited in document order.
pub struct Headings<'a> {
    stack: Vec<&'a Element>,
}

impl<'a> Headings<'a> {
    /// Starts a walk at `root`.
    #[must_use]
    pub fn new(root: &'a Element) -> Self {
        Self { stack: vec![root] }
    }
}

impl<'a> Iterator for Headings<'a> {
    type Item = Heading<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(el) = self.stack.pop() {
            if let Some(level) = outline_level(el) {
                return Some(Heading::from_element(el, level));
            }
            // Reverse so the first child is popped first.
            for child in el.children().iter().rev() {
                if let Node::Element(e) = child {
                    self.stack.push(e);
                }
            }
        }
        None
    }
}

/// Collects all outline headings of `root` in reading order.
#[must_use]
pub fn collect_headings(root: &Element) -> Vec<Heading<'_>> {
    Headings::new(root).collect()
}
