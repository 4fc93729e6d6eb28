//! A minimal owned HTML document tree.
//!
//! The renderer builds the whole document as [`Element`]s before anything is
//! serialised, so later passes (heading collection, TOC assembly, link
//! verification) can walk the finished structure.

use std::fmt::Write as _;

/// Elements serialised without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "col", "hr", "img", "link", "meta"];

/// A node in the document tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    /// An element with attributes and children.
    Element(Element),
    /// Text, escaped on output.
    Text(String),
    /// Pre-rendered markup, written verbatim.
    Raw(String),
}

impl Node {
    /// Creates a text node.
    pub fn text(s: impl Into<String>) -> Self {
        Node::Text(s.into())
    }

    /// Creates a raw markup node.
    pub fn raw(s: impl Into<String>) -> Self {
        Node::Raw(s.into())
    }

    /// Returns the element if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    fn write_html(&self, out: &mut String) {
        match self {
            Node::Element(e) => e.write_html(out),
            Node::Text(t) => out.push_str(&escape_html(t)),
            Node::Raw(r) => out.push_str(r),
        }
    }
}

impl From<Element> for Node {
    fn from(e: Element) -> Self {
        Node::Element(e)
    }
}

impl From<&str> for Node {
    fn from(s: &str) -> Self {
        Node::Text(s.to_string())
    }
}

impl From<String> for Node {
    fn from(s: String) -> Self {
        Node::Text(s)
    }
}

/// An HTML element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Element {
    tag: &'static str,
    attrs: Vec<(&'static str, String)>,
    children: Vec<Node>,
}

impl Element {
    /// Creates an empty element.
    #[must_use]
    pub fn new(tag: &'static str) -> Self {
        Self {
            tag,
            attrs: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Returns the tag name.
    #[must_use]
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// Returns the children in insertion order.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Returns the value of an attribute.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the `id` attribute, if set and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.attr("id").filter(|id| !id.is_empty())
    }

    /// Returns true if the `class` attribute contains `class`.
    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map(|v| v.split_whitespace().any(|c| c == class))
            .unwrap_or(false)
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set_attr(&mut self, name: &'static str, value: impl Into<String>) {
        let value = value.into();
        match self.attrs.iter_mut().find(|(k, _)| *k == name) {
            Some(slot) => slot.1 = value,
            None => self.attrs.push((name, value)),
        }
    }

    /// Builder form of [`Element::set_attr`].
    #[must_use]
    pub fn with_attr(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Adds a class to the `class` attribute.
    #[must_use]
    pub fn with_class(mut self, class: &str) -> Self {
        let merged = match self.attr("class") {
            Some(existing) if !existing.is_empty() => format!("{existing} {class}"),
            _ => class.to_string(),
        };
        self.set_attr("class", merged);
        self
    }

    /// Sets the `id` attribute.
    #[must_use]
    pub fn with_id(self, id: impl Into<String>) -> Self {
        self.with_attr("id", id)
    }

    /// Appends a child.
    pub fn push(&mut self, child: impl Into<Node>) {
        self.children.push(child.into());
    }

    /// Builder form of [`Element::push`].
    #[must_use]
    pub fn with_child(mut self, child: impl Into<Node>) -> Self {
        self.push(child);
        self
    }

    /// Appends several children.
    #[must_use]
    pub fn with_children<I, N>(mut self, children: I) -> Self
    where
        I: IntoIterator<Item = N>,
        N: Into<Node>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Returns true if the element has no children.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(&self.children, &mut out);
        out
    }

    /// Finds the first descendant-or-self element matching `pred`, pre-order.
    pub fn find_mut<F>(&mut self, pred: F) -> Option<&mut Element>
    where
        F: Fn(&Element) -> bool + Copy,
    {
        if pred(self) {
            return Some(self);
        }
        for child in &mut self.children {
            if let Node::Element(e) = child {
                if let Some(found) = e.find_mut(pred) {
                    return Some(found);
                }
            }
        }
        None
    }

    /// Serialises the element and its subtree to HTML.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(self.tag);
        for (k, v) in &self.attrs {
            let _ = write!(out, " {}=\"{}\"", k, escape_html(v));
        }
        out.push('>');
        if VOID_ELEMENTS.contains(&self.tag) {
            return;
        }
        for child in &self.children {
            child.write_html(out);
        }
        let _ = write!(out, "</{}>", self.tag);
    }
}

fn collect_text(nodes: &[Node], out: &mut String) {
    for node in nodes {
        match node {
            Node::Text(t) => out.push_str(t),
            Node::Element(e) => collect_text(&e.children, out),
            Node::Raw(_) => {}
        }
    }
}

/// Escapes HTML special characters in a string.
#[must_use]
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_nested_elements_with_escaping() {
        let el = Element::new("p")
            .with_class("a")
            .with_class("b")
            .with_child(Element::new("a").with_attr("href", "#x\"y").with_child("<T&>"));
        assert_eq!(
            el.render(),
            "<p class=\"a b\"><a href=\"#x&quot;y\">&lt;T&amp;&gt;</a></p>"
        );
    }

    #[test]
    fn void_elements_have_no_closing_tag() {
        assert_eq!(Element::new("hr").render(), "<hr>");
    }

    #[test]
    fn raw_nodes_are_verbatim_and_not_text() {
        let el = Element::new("div")
            .with_child(Node::raw("<b>bold</b>"))
            .with_child("plain");
        assert_eq!(el.render(), "<div><b>bold</b>plain</div>");
        assert_eq!(el.text_content(), "plain");
    }

    #[test]
    fn find_mut_locates_by_id() {
        let mut root = Element::new("body")
            .with_child(Element::new("div").with_id("header"))
            .with_child(Element::new("div").with_id("content"));
        let header = root.find_mut(|e| e.id() == Some("header"));
        assert!(header.is_some());
        if let Some(h) = header {
            h.push("x");
        }
        assert!(root.render().contains("<div id=\"header\">x</div>"));
    }

    #[test]
    fn empty_id_is_absent() {
        let el = Element::new("h2").with_id("");
        assert_eq!(el.id(), None);
    }
}
