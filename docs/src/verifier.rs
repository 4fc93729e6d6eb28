//! Internal link verification over a finished document tree.
//!
//! Every `href` beginning with `#` must name an element id somewhere in the
//! document. A bare `#` is the placeholder emitted for headings without an id
//! and is counted, not reported.

use std::collections::{HashMap, HashSet};

use crate::dom::{Element, Node};

/// Outcome of a link check.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    /// `#fragment` hrefs with no matching id, in document order, deduplicated.
    pub broken: Vec<String>,
    /// Ids that appear on more than one element, in first-seen order.
    pub duplicate_ids: Vec<String>,
    /// Number of bare `#` hrefs.
    pub dead_self_links: usize,
    /// Number of internal hrefs checked, excluding bare `#`.
    pub checked: usize,
}

impl LinkReport {
    /// Returns true if nothing is broken or duplicated.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.broken.is_empty() && self.duplicate_ids.is_empty()
    }
}

#[derive(Default)]
struct Scan<'a> {
    ids: HashMap<&'a str, usize>,
    id_order: Vec<&'a str>,
    hrefs: Vec<&'a str>,
}

impl<'a> Scan<'a> {
    fn visit(&mut self, el: &'a Element) {
        if let Some(id) = el.id() {
            let seen = self.ids.entry(id).or_insert(0);
            if *seen == 0 {
                self.id_order.push(id);
            }
            *seen += 1;
        }
        if el.tag() == "a" {
            if let Some(href) = el.attr("href").filter(|h| h.starts_with('#')) {
                self.hrefs.push(href);
            }
        }
        for child in el.children() {
            if let Node::Element(e) = child {
                self.visit(e);
            }
        }
    }
}

/// Checks every internal link of `root`.
#[must_use]
pub fn verify_links(root: &Element) -> LinkReport {
    let mut scan = Scan::default();
    scan.visit(root);

    let mut report = LinkReport::default();
    let mut reported = HashSet::new();
    for href in &scan.hrefs {
        let fragment = &href[1..];
        if fragment.is_empty() {
            report.dead_self_links += 1;
            continue;
        }
        report.checked += 1;
        if !scan.ids.contains_key(fragment) && reported.insert(*href) {
            report.broken.push((*href).to_string());
        }
    }
    report.duplicate_ids = scan
        .id_order
        .iter()
        .filter(|id| scan.ids.get(*id).copied().unwrap_or(0) > 1)
        .map(|id| (*id).to_string())
        .collect();
    report
}
