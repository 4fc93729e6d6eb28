//! Builds the document tree for a supermodel.
//!
//! The tree is complete except for the table of contents, which is assembled
//! from the finished body in a second pass and spliced into `div#header`.

use pulldown_cmark::{html, Options, Parser};
use serde_json::{json, Map, Value};
use supermodel_model::{
    Class, ClassProperty, ComponentModel, EntityRef, Note, RdfProperty, Supermodel,
};

use crate::config::RenderOptions;
use crate::dom::{Element, Node};
use crate::extractor::ClassTable;
use crate::fragment::{section_label, structural_label, EntityKind};
use crate::headings::heading;
use crate::hierarchy::HierarchyRenderer;
use crate::linker::{external_link, Linker};

/// The bundled stylesheet.
pub const STYLESHEET: &str = include_str!("../static/supermodel.css");

/// Expand/collapse behaviour for the class hierarchy.
pub const HIERARCHY_SCRIPT: &str = include_str!("../static/class-hierarchy.js");

/// Heading of the class hierarchy section.
pub const CLASS_HIERARCHY: &str = "Class Hierarchy";

const TABLE_CELL: &str = "tableblock halign-left valign-top";

/// Converts Markdown to HTML using pulldown-cmark.
#[must_use]
pub fn markdown_to_html(markdown: &str) -> String {
    let mut opts = Options::empty();
    opts.insert(Options::ENABLE_TABLES);
    opts.insert(Options::ENABLE_FOOTNOTES);
    opts.insert(Options::ENABLE_STRIKETHROUGH);

    let parser = Parser::new_ext(markdown, opts);
    let mut html_output = String::new();
    html::push_html(&mut html_output, parser);
    html_output
}

/// Formats a cardinality range.
///
/// | min  | max  | text     |
/// |------|------|----------|
/// | -    | -    | `[0..*]` |
/// | -    | 3    | `[0..3]` |
/// | 1    | -    | `[1..*]` |
/// | 2    | 2    | `[2]`    |
/// | 1    | 3    | `[1..3]` |
#[must_use]
pub fn cardinality(min: Option<u32>, max: Option<u32>) -> String {
    match (min, max) {
        (None, None) => "[0..*]".to_string(),
        (None, Some(max)) => format!("[0..{max}]"),
        (Some(min), None) => format!("[{min}..*]"),
        (Some(min), Some(max)) if min == max => format!("[{max}]"),
        (Some(min), Some(max)) => format!("[{min}..{max}]"),
    }
}

/// Builds the schema.org description of the document for the JSON-LD head
/// script.
#[must_use]
pub fn json_ld(model: &Supermodel) -> Value {
    let meta = &model.metadata;
    let mut node = Map::new();
    node.insert("@context".to_owned(), json!("https://schema.org"));
    node.insert("@type".to_owned(), json!("DefinedTermSet"));
    if !model.iri.is_empty() {
        node.insert("@id".to_owned(), json!(model.iri));
    }

    let scalars = [
        ("name", model.title()),
        ("description", meta.description.as_deref()),
        ("identifier", meta.identifier.as_deref()),
        ("version", meta.version_info.as_deref()),
        ("dateCreated", meta.created.as_deref()),
        ("dateModified", meta.modified.as_deref()),
        ("datePublished", meta.issued.as_deref()),
        ("license", meta.license.as_deref()),
    ];
    for (key, value) in scalars {
        if let Some(value) = value {
            node.insert(key.to_owned(), json!(value));
        }
    }

    if let Some(publisher) = &meta.publisher {
        node.insert(
            "publisher".to_owned(),
            json!({ "@type": "Organization", "name": publisher }),
        );
    }
    for (key, people) in [("creator", &meta.creators), ("contributor", &meta.contributors)] {
        if !people.is_empty() {
            let people: Vec<Value> = people
                .iter()
                .map(|name| json!({ "@type": "Person", "name": name }))
                .collect();
            node.insert(key.to_owned(), Value::Array(people));
        }
    }
    Value::Object(node)
}

fn paragraph(markdown: &str) -> Element {
    Element::new("div")
        .with_class("paragraph")
        .with_child(Node::raw(markdown_to_html(markdown)))
}

fn example_block(text: &str) -> Element {
    Element::new("div").with_class("listingblock").with_child(
        Element::new("div").with_class("content").with_child(
            Element::new("pre")
                .with_class("highlight")
                .with_child(Element::new("code").with_child(text)),
        ),
    )
}

fn iri_line(iri: &str) -> Element {
    Element::new("p")
        .with_class("overflow-x-auto")
        .with_child("IRI: ")
        .with_child(external_link(iri, iri))
}

fn admonition(note: &Note) -> Element {
    let row = Element::new("tr")
        .with_child(
            Element::new("td").with_class("icon").with_child(
                Element::new("div")
                    .with_class("title")
                    .with_child(note.kind.title()),
            ),
        )
        .with_child(
            Element::new("td")
                .with_class("content")
                .with_child(Node::raw(markdown_to_html(&note.value))),
        );
    Element::new("div")
        .with_class("admonitionblock note")
        .with_child(Element::new("table").with_child(Element::new("tbody").with_child(row)))
}

/// Puts `items` in sequence with an `<hr>` between each pair.
fn separated(items: impl IntoIterator<Item = Element>) -> Vec<Element> {
    let mut out = Vec::new();
    for (i, item) in items.into_iter().enumerate() {
        if i > 0 {
            out.push(Element::new("hr"));
        }
        out.push(item);
    }
    out
}

/// One metadata table value.
enum Meta<'m> {
    Text(&'m str),
    Link(&'m str),
    List(&'m [String]),
}

/// Renders the document tree for one supermodel.
pub struct DocumentRenderer<'a> {
    model: &'a Supermodel,
    options: &'a RenderOptions,
    linker: Linker<'a>,
    classes: &'a ClassTable<'a>,
}

impl<'a> DocumentRenderer<'a> {
    /// Creates a renderer.
    #[must_use]
    pub fn new(
        model: &'a Supermodel,
        options: &'a RenderOptions,
        linker: Linker<'a>,
        classes: &'a ClassTable<'a>,
    ) -> Self {
        Self {
            model,
            options,
            linker,
            classes,
        }
    }

    /// The whole `<html>` element, without a table of contents.
    #[must_use]
    pub fn document(&self) -> Element {
        Element::new("html")
            .with_attr("lang", "en")
            .with_child(self.head())
            .with_child(self.body())
    }

    /// The `<head>` element.
    #[must_use]
    pub fn head(&self) -> Element {
        let mut head = Element::new("head")
            .with_child(Element::new("meta").with_attr("charset", "utf-8"))
            .with_child(
                Element::new("meta")
                    .with_attr("name", "viewport")
                    .with_attr("content", "width=device-width, initial-scale=1.0"),
            )
            .with_child(Element::new("title").with_child(self.title()));

        if self.options.include_css {
            head.push(Element::new("style").with_child(Node::raw(STYLESHEET)));
        } else {
            head.push(
                Element::new("link")
                    .with_attr("rel", "stylesheet")
                    .with_attr("href", self.options.stylesheet_name.clone()),
            );
        }

        let ld = format!("{:#}", json_ld(self.model)).replace("</", "<\\/");
        head.with_child(
            Element::new("script")
                .with_attr("type", "application/ld+json")
                .with_child(Node::raw(ld)),
        )
    }

    /// The `<body>` element: header with the title, then the content.
    #[must_use]
    pub fn body(&self) -> Element {
        let header = Element::new("div")
            .with_id("header")
            .with_child(Element::new("h1").with_child(self.title()));
        Element::new("body")
            .with_class("book toc2 toc-left")
            .with_child(header)
            .with_child(self.content())
    }

    fn title(&self) -> &'a str {
        self.model.title().unwrap_or_default()
    }

    fn content(&self) -> Element {
        let mut content = Element::new("div")
            .with_id("content")
            .with_child(self.preamble());

        if !self.model.examples.is_empty() {
            content.push(
                Element::new("div")
                    .with_class("sect1")
                    .with_children(self.model.examples.iter().map(|ex| example_block(ex))),
            );
        }

        let mut models = Element::new("div").with_class("sect1");
        if self.options.class_hierarchy {
            models = models.with_children(self.class_hierarchy());
        }
        match self.model.component_models.as_slice() {
            [] => {}
            [only] => {
                models.push(heading(2, "Classes and Properties", None));
                models = models.with_children(self.module_core(only));
            }
            several => {
                for module in several {
                    models.push(self.module_section(module));
                }
            }
        }
        content.with_child(models)
    }

    fn preamble(&self) -> Element {
        let meta = &self.model.metadata;
        let mut rows = Element::new("tbody");

        if let Some(publisher) = &meta.publisher {
            rows.push(
                Element::new("tr").with_class("bg-white").with_child(
                    Element::new("td")
                        .with_class("tableblock halign-right valign-top")
                        .with_attr("colspan", "2")
                        .with_child(
                            Element::new("p").with_class("tableblock").with_child(
                                Element::new("strong")
                                    .with_class("big")
                                    .with_child(publisher.as_str()),
                            ),
                        ),
                ),
            );
        }

        let optional = [
            ("Modified Date", meta.modified.as_deref()),
            ("Submission Date", meta.created.as_deref()),
            ("Approval Date", meta.date_accepted.as_deref()),
            ("Publication Date", meta.issued.as_deref()),
        ];
        for (label, value) in optional {
            if let Some(value) = value {
                rows.push(metadata_row(label, Meta::Text(value)));
            }
        }
        if !self.model.iri.is_empty() {
            rows.push(metadata_row(
                "External identifier of this document",
                Meta::Link(&self.model.iri),
            ));
        }
        if let Some(id) = &meta.identifier {
            rows.push(metadata_row(
                "Internal reference number of this document",
                Meta::Text(id),
            ));
        }
        if let Some(version) = &meta.version_info {
            rows.push(metadata_row("Version", Meta::Text(version)));
        }
        for (label, values) in [
            ("Category", &meta.categories),
            ("Editors", &meta.creators),
            ("Contributors", &meta.contributors),
        ] {
            if !values.is_empty() {
                rows.push(metadata_row(label, Meta::List(values)));
            }
        }
        if let Some(license) = &meta.license {
            rows.push(metadata_row("License", Meta::Link(license)));
        }
        if let Some(prefix) = meta.preferred_namespace_prefix.as_deref().filter(|p| !p.is_empty()) {
            rows.push(metadata_row("Preferred Namespace Prefix", Meta::Text(prefix)));
        }

        let mut body = Element::new("div").with_class("sectionbody").with_child(
            Element::new("table")
                .with_class("tableblock frame-none grid-none stripes-odd stretch")
                .with_child(rows),
        );
        for text in [&meta.description, &meta.history_note].into_iter().flatten() {
            body.push(paragraph(text));
        }
        Element::new("div").with_id("preamble").with_child(body)
    }

    fn class_hierarchy(&self) -> Vec<Element> {
        let tree = HierarchyRenderer::new(self.linker, self.classes)
            .render_modules(&self.model.component_models);
        vec![
            heading(
                2,
                CLASS_HIERARCHY,
                Some(self.linker.label_id(&structural_label(CLASS_HIERARCHY))),
            ),
            Element::new("div").with_class("class-hierarchy").with_child(tree),
            Element::new("script").with_child(Node::raw(HIERARCHY_SCRIPT)),
        ]
    }

    fn module_section(&self, module: &ComponentModel) -> Element {
        let label = EntityKind::Module.heading_label(&module.name);
        let mut intro = Element::new("div")
            .with_class("sect2")
            .with_child(Element::new("div").with_class("paragraph").with_child(iri_line(&module.iri)));
        if let Some(description) = &module.description {
            intro.push(paragraph(description));
        }
        if !module.examples.is_empty() {
            intro.push(heading(3, "Examples", None));
            intro.push(
                Element::new("div")
                    .with_class("sect4")
                    .with_children(module.examples.iter().map(|ex| example_block(ex))),
            );
        }
        intro.push(Element::new("hr"));

        Element::new("div")
            .with_class("sect1")
            .with_child(heading(2, &label, Some(self.linker.label_id(&label))))
            .with_child(intro)
            .with_children(self.module_core(module))
    }

    /// The classes section followed by each non-empty property section.
    fn module_core(&self, module: &ComponentModel) -> Vec<Element> {
        let mut out = vec![Element::new("div")
            .with_class("sect2")
            .with_child(self.section_heading(module, "Classes"))
            .with_child(Element::new("hr"))
            .with_children(separated(module.classes.iter().map(|c| self.class_section(c))))];

        let sections = [
            ("Annotation Properties", &module.annotation_properties),
            ("Datatype Properties", &module.datatype_properties),
            ("Object Properties", &module.object_properties),
            ("Ontology Properties", &module.ontology_properties),
        ];
        for (title, props) in sections {
            if props.is_empty() {
                continue;
            }
            out.push(Element::new("hr"));
            out.push(
                Element::new("div")
                    .with_class("sect2")
                    .with_child(self.section_heading(module, title))
                    .with_child(Element::new("hr"))
                    .with_children(separated(props.iter().map(|p| self.property_section(p)))),
            );
        }
        out
    }

    fn section_heading(&self, module: &ComponentModel, section: &str) -> Element {
        let id = self.linker.label_id(&section_label(&module.name, section));
        heading(3, section, Some(id))
    }

    fn class_section(&self, class: &Class) -> Element {
        let label = EntityKind::Class.heading_label(&class.name);
        let mut sect = Element::new("div")
            .with_class("sect3")
            .with_child(heading(4, &label, Some(self.linker.label_id(&label))))
            .with_child(iri_line(&class.iri));

        if let Some(description) = &class.description {
            sect.push(paragraph(description));
        }
        sect = sect.with_children(class.notes.iter().map(admonition));
        if let Some(defined_by) = &class.is_defined_by {
            sect.push(self.defined_by(defined_by));
        }
        if !class.superclasses.is_empty() {
            sect.push(heading(5, "Subclass of", None));
            sect.push(self.sect5_list(EntityKind::Class, &class.superclasses));
        }
        if !class.subclasses.is_empty() {
            sect.push(heading(5, "Superclass of", None));
            sect.push(self.sect5_list(EntityKind::Class, &class.subclasses));
        }
        if !class.properties.is_empty() {
            sect.push(heading(5, "Properties", None));
            sect.push(self.properties_table(&class.properties));
        }
        if !class.examples.is_empty() {
            sect.push(heading(5, "Examples", None));
            sect.push(
                Element::new("div")
                    .with_class("sect5")
                    .with_children(class.examples.iter().map(|ex| example_block(ex))),
            );
        }
        sect
    }

    fn properties_table(&self, properties: &[ClassProperty]) -> Element {
        let head = ["Property", "Description", "Cardinality", "Value type", "Value class type"]
            .into_iter()
            .fold(Element::new("tr"), |tr, title| {
                tr.with_child(Element::new("th").with_class(TABLE_CELL).with_child(title))
            });
        let rows = properties.iter().map(|p| self.property_row(p));
        Element::new("div").with_class("sect5 overflow-x-auto").with_child(
            Element::new("table")
                .with_class("tableblock frame-all grid-all stripes-even fit-content stretch")
                .with_child(Element::new("thead").with_child(head))
                .with_child(Element::new("tbody").with_children(rows)),
        )
    }

    fn property_row(&self, property: &ClassProperty) -> Element {
        let cell = || Element::new("td").with_class(TABLE_CELL);

        let target = EntityRef::new(property.iri.clone(), property.name.clone());
        let mut name = cell().with_child(self.linker.link(EntityKind::Property, &target));
        if let Some(owner) = &property.belongs_to_class {
            name.push(
                Element::new("p").with_class("tableblock").with_child(
                    Element::new("em")
                        .with_child("From ")
                        .with_child(self.linker.link(EntityKind::Class, owner)),
                ),
            );
        }

        let mut value_type = cell();
        if let Some(vt) = &property.value_type {
            value_type.push(self.linker.link(EntityKind::Class, vt));
        }

        let mut class_types = cell();
        if !property.value_class_types.is_empty() {
            let mut p = Element::new("p").with_class("tableblock");
            for (i, vct) in property.value_class_types.iter().enumerate() {
                if i > 0 {
                    p.push(", ");
                }
                p.push(self.linker.link(EntityKind::Class, vct));
            }
            class_types.push(p);
        }

        Element::new("tr")
            .with_child(name)
            .with_child(
                cell().with_child(Element::new("p").with_child(property.description.as_str())),
            )
            .with_child(cell().with_child(
                Element::new("p")
                    .with_class("tableblock")
                    .with_child(cardinality(property.cardinality_min, property.cardinality_max)),
            ))
            .with_child(value_type)
            .with_child(class_types)
    }

    fn property_section(&self, property: &RdfProperty) -> Element {
        let label = EntityKind::Property.heading_label(&property.name);
        let mut sect = Element::new("div")
            .with_class("sect3")
            .with_child(heading(4, &label, Some(self.linker.label_id(&label))))
            .with_child(iri_line(&property.iri));

        if let Some(description) = &property.description {
            sect.push(paragraph(description));
        }
        sect = sect.with_children(property.notes.iter().map(admonition));

        let lists = [
            ("Sub property of:", EntityKind::Property, &property.super_properties),
            ("Domain includes:", EntityKind::Class, &property.domain_includes),
            ("Range includes:", EntityKind::Class, &property.range_includes),
        ];
        for (title, kind, refs) in lists {
            if !refs.is_empty() {
                sect.push(Element::new("p").with_child(title));
                sect.push(self.ref_list(kind, refs));
            }
        }
        if let Some(defined_by) = &property.is_defined_by {
            sect.push(self.defined_by(defined_by));
        }
        sect
    }

    fn defined_by(&self, ontology: &EntityRef) -> Element {
        Element::new("p")
            .with_child("Is defined by ")
            .with_child(self.linker.link(EntityKind::Module, ontology))
    }

    fn ref_list(&self, kind: EntityKind, refs: &[EntityRef]) -> Element {
        Element::new("ul").with_children(
            refs.iter()
                .map(|r| Element::new("li").with_child(self.linker.link(kind, r))),
        )
    }

    fn sect5_list(&self, kind: EntityKind, refs: &[EntityRef]) -> Element {
        let items = refs.iter().map(|r| {
            Element::new("li").with_child(Element::new("p").with_child(self.linker.link(kind, r)))
        });
        Element::new("div").with_class("sect5").with_child(
            Element::new("div")
                .with_class("ulist")
                .with_child(Element::new("ul").with_children(items)),
        )
    }
}

fn metadata_row(label: &str, value: Meta<'_>) -> Element {
    let mut cell = Element::new("td").with_class(TABLE_CELL);
    match value {
        Meta::Text(text) => cell.push(Element::new("p").with_class("tableblock").with_child(text)),
        Meta::Link(href) => cell.push(
            Element::new("p")
                .with_class("tableblock")
                .with_child(external_link(href, href)),
        ),
        Meta::List(values) => {
            for value in values {
                cell.push(Element::new("p").with_class("tableblock").with_child(value.as_str()));
            }
        }
    }
    Element::new("tr")
        .with_child(
            Element::new("th")
                .with_class("tableblock halign-left valign-top")
                .with_child(label),
        )
        .with_child(cell)
}
