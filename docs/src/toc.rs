//! Outline numbering and table-of-contents assembly.
//!
//! [`TocBuilder`] consumes headings in reading order and, in one forward pass,
//! assigns section numbers (`1.`, `1.2.`, `1.2.3.`) and places each entry in a
//! nested list that mirrors the heading nesting. Lists live in an arena; the
//! builder keeps the list currently open at each depth so an insertion point is
//! found without walking the tree.
//!
//! Counters reset only when descending into a deeper level. Ascending never
//! resets the deeper counters; the next descent does.

use std::fmt::Write as _;

use crate::dom::Element;
use crate::headings::Heading;

/// Deepest outline depth that is numbered (document heading level 4).
pub const MAX_DEPTH: usize = 3;

type ListId = usize;

const TOP: ListId = 0;

/// One entry of the table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocEntry {
    /// Section number followed by the heading label, e.g. `"1.2. Classes"`.
    pub label: String,
    /// `#identifier`, or `#` for a heading without an id.
    pub href: String,
    children: Option<ListId>,
}

/// An owned view of one entry and its nested entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocNode {
    /// Entry label.
    pub label: String,
    /// Entry target.
    pub href: String,
    /// Nested entries.
    pub children: Vec<TocNode>,
}

/// The assembled table of contents.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toc {
    entries: Vec<TocEntry>,
    lists: Vec<Vec<usize>>,
}

impl Default for Toc {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
            lists: vec![Vec::new()],
        }
    }
}

impl Toc {
    /// Total number of entries at all depths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if no headings were consumed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entry labels in reading order, flattened.
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        let mut out = Vec::with_capacity(self.entries.len());
        self.walk(TOP, &mut |e| out.push(e.label.as_str()));
        out
    }

    /// Builds an owned tree view of the top-level list.
    #[must_use]
    pub fn tree(&self) -> Vec<TocNode> {
        self.list_tree(TOP)
    }

    fn list_tree(&self, list: ListId) -> Vec<TocNode> {
        self.lists[list]
            .iter()
            .map(|&i| {
                let entry = &self.entries[i];
                TocNode {
                    label: entry.label.clone(),
                    href: entry.href.clone(),
                    children: entry
                        .children
                        .map(|l| self.list_tree(l))
                        .unwrap_or_default(),
                }
            })
            .collect()
    }

    fn walk<'s, F: FnMut(&'s TocEntry)>(&'s self, list: ListId, f: &mut F) {
        for &i in &self.lists[list] {
            let entry = &self.entries[i];
            f(entry);
            if let Some(child) = entry.children {
                self.walk(child, f);
            }
        }
    }

    /// Renders the table of contents block spliced into the document header.
    #[must_use]
    pub fn to_element(&self) -> Element {
        Element::new("div")
            .with_class("toc2")
            .with_id("toc")
            .with_child(
                Element::new("div")
                    .with_id("toctitle")
                    .with_child("Table of Contents"),
            )
            .with_child(self.list_element(TOP, 1))
    }

    fn list_element(&self, list: ListId, depth: usize) -> Element {
        let mut ul = Element::new("ul").with_class(&format!("sectlevel{depth}"));
        for &i in &self.lists[list] {
            let entry = &self.entries[i];
            let mut li = Element::new("li").with_child(
                Element::new("a")
                    .with_attr("href", entry.href.clone())
                    .with_child(entry.label.clone()),
            );
            if let Some(child) = entry.children {
                li.push(self.list_element(child, depth + 1));
            }
            ul.push(li);
        }
        ul
    }

    fn new_list(&mut self) -> ListId {
        self.lists.push(Vec::new());
        self.lists.len() - 1
    }
}

/// Single-pass outline numbering and TOC placement.
#[derive(Debug, Default)]
pub struct TocBuilder {
    toc: Toc,
    counters: [u32; MAX_DEPTH + 1],
    previous_depth: Option<usize>,
    insertion: [Option<ListId>; MAX_DEPTH + 1],
}

impl TocBuilder {
    /// Creates a builder with all counters at zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Numbers and places one heading.
    pub fn push(&mut self, heading: &Heading<'_>) {
        let depth = heading.depth().clamp(1, MAX_DEPTH);
        let previous = match self.previous_depth {
            Some(p) => p,
            None => {
                self.insertion[1] = Some(TOP);
                depth
            }
        };

        self.counters[depth] += 1;
        if previous < depth {
            self.counters[depth] = 1;
        }

        let mut label = self.number(depth);
        label.push_str(&heading.label);
        let href = match heading.identifier {
            Some(id) => format!("#{id}"),
            None => {
                tracing::debug!(label = %heading.label, "heading without anchor id");
                "#".to_string()
            }
        };

        let list = match self.insertion[depth] {
            Some(list) if depth <= previous => list,
            _ => self.open_list(depth),
        };

        let index = self.toc.entries.len();
        self.toc.entries.push(TocEntry {
            label,
            href,
            children: None,
        });
        self.toc.lists[list].push(index);

        // Lists recorded for deeper levels belong to an earlier branch now.
        for slot in self.insertion.iter_mut().skip(depth + 1) {
            *slot = None;
        }
        self.previous_depth = Some(depth);
    }

    /// Finishes assembly.
    #[must_use]
    pub fn finish(self) -> Toc {
        self.toc
    }

    /// Section number prefix for `depth`, e.g. `"2.1. "`.
    fn number(&self, depth: usize) -> String {
        let mut out = String::new();
        for d in 1..=depth {
            let _ = write!(out, "{}.", self.counters[d]);
        }
        out.push(' ');
        out
    }

    /// Opens the list for `depth` under the last entry of the nearest
    /// shallower open list, and records it as the insertion point.
    fn open_list(&mut self, depth: usize) -> ListId {
        if depth == 1 {
            self.insertion[1] = Some(TOP);
            return TOP;
        }
        let parent = (1..depth)
            .rev()
            .find_map(|d| self.insertion[d])
            .unwrap_or(TOP);

        let list = match self.toc.lists[parent].last().copied() {
            Some(owner) => match self.toc.entries[owner].children {
                Some(existing) => existing,
                None => {
                    let list = self.toc.new_list();
                    self.toc.entries[owner].children = Some(list);
                    list
                }
            },
            // Nothing to nest under: entries go straight into the parent list.
            None => parent,
        };
        self.insertion[depth] = Some(list);
        list
    }
}

/// Builds the table of contents from headings in reading order.
pub fn build_toc<'a, I>(headings: I) -> Toc
where
    I: IntoIterator<Item = Heading<'a>>,
{
    let mut builder = TocBuilder::new();
    for heading in headings {
        builder.push(&heading);
    }
    builder.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at_depths(depths: &[u8]) -> Vec<Heading<'static>> {
        depths
            .iter()
            .enumerate()
            .map(|(i, d)| Heading {
                level: d + 1,
                identifier: None,
                label: format!("h{i}"),
            })
            .collect()
    }

    fn numbers(toc: &Toc) -> Vec<String> {
        toc.labels()
            .iter()
            .map(|l| l.split(' ').next().unwrap_or_default().to_string())
            .collect()
    }

    #[test]
    fn outline_numbering() {
        let toc = build_toc(at_depths(&[1, 2, 2, 1, 2, 3, 2]));
        assert_eq!(
            numbers(&toc),
            vec!["1.", "1.1.", "1.2.", "2.", "2.1.", "2.1.1.", "2.2."]
        );
    }

    #[test]
    fn counter_resets_on_descend() {
        let toc = build_toc(at_depths(&[1, 2, 1, 2]));
        assert_eq!(numbers(&toc), vec!["1.", "1.1.", "2.", "2.1."]);
    }

    #[test]
    fn deep_counter_resets_on_later_descend() {
        let toc = build_toc(at_depths(&[1, 2, 2, 3, 1, 2, 3, 3]));
        assert_eq!(
            numbers(&toc),
            vec!["1.", "1.1.", "1.2.", "1.2.1.", "2.", "2.1.", "2.1.1.", "2.1.2."]
        );
    }

    #[test]
    fn labels_carry_number_prefix() {
        let toc = build_toc(at_depths(&[1, 2]));
        assert_eq!(toc.labels(), vec!["1. h0", "1.1. h1"]);
    }

    #[test]
    fn nesting_shape() {
        // Document heading levels 2,3,3,4,3,2.
        let toc = build_toc(at_depths(&[1, 2, 2, 3, 2, 1]));
        let tree = toc.tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children.len(), 3);
        assert!(tree[0].children[0].children.is_empty());
        assert_eq!(tree[0].children[1].children.len(), 1);
        assert_eq!(tree[0].children[1].children[0].label, "1.2.1. h3");
        assert!(tree[1].children.is_empty());
        assert_eq!(tree[1].label, "2. h5");
    }

    #[test]
    fn nesting_shape_first_child_has_grandchild() {
        // 2,3,4,3,2: the first sub-entry owns the single-item nested list.
        let toc = build_toc(at_depths(&[1, 2, 3, 2, 1]));
        let tree = toc.tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(tree[0].children[0].children.len(), 1);
        assert!(tree[0].children[1].children.is_empty());
        assert!(tree[1].children.is_empty());
    }

    #[test]
    fn missing_identifier_degrades_to_hash() {
        let headings = vec![
            Heading {
                level: 2,
                identifier: Some("section-class-hierarchy"),
                label: "Class Hierarchy".into(),
            },
            Heading {
                level: 2,
                identifier: None,
                label: "Classes and Properties".into(),
            },
        ];
        let tree = build_toc(headings).tree();
        assert_eq!(tree[0].href, "#section-class-hierarchy");
        assert_eq!(tree[1].href, "#");
    }

    #[test]
    fn first_heading_deeper_than_top() {
        let toc = build_toc(at_depths(&[2, 2, 1]));
        assert_eq!(numbers(&toc), vec!["0.1.", "0.2.", "1."]);
        assert_eq!(toc.tree().len(), 3);
    }

    #[test]
    fn skipped_level_nests_under_nearest_parent() {
        let toc = build_toc(at_depths(&[1, 3, 2, 1]));
        let tree = toc.tree();
        assert_eq!(tree.len(), 2);
        assert_eq!(tree[0].children.len(), 2);
        assert_eq!(numbers(&toc), vec!["1.", "1.0.1.", "1.1.", "2."]);
    }

    #[test]
    fn renders_nested_lists() {
        let html = build_toc(at_depths(&[1, 2])).to_element().render();
        assert!(html.starts_with("<div class=\"toc2\" id=\"toc\">"));
        assert!(html.contains("<ul class=\"sectlevel1\"><li><a href=\"#\">1. h0</a><ul class=\"sectlevel2\">"));
    }

    #[test]
    fn empty_toc() {
        let toc = build_toc(Vec::new());
        assert!(toc.is_empty());
        assert!(toc.tree().is_empty());
    }
}
