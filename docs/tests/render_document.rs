//! End-to-end rendering: model JSON in, HTML out, every internal link checked
//! against the ids actually present in the serialised document.

use std::collections::HashSet;

use supermodel_docs::{generate, render, DocsError, RenderOptions, SlugFragments};
use supermodel_model::{ModelError, Supermodel};

const TWO_MODULES: &str = r#"{
    "iri": "https://example.org/land",
    "metadata": {
        "title": "Land Administration",
        "publisher": "Example Survey Office",
        "modified": "2024-03-01",
        "creators": ["A. Surveyor"],
        "license": "https://creativecommons.org/licenses/by/4.0/"
    },
    "examples": ["ex:parcel1 a ex:Parcel ."],
    "component_models": [
        {
            "iri": "https://example.org/land/addressing",
            "name": "Addressing",
            "order": 2,
            "examples": ["ex:addr1 a ex:Address ."],
            "classes": [
                {
                    "iri": "https://example.org/Address",
                    "name": "Address",
                    "description": "A postal *address*.",
                    "properties": [
                        {
                            "iri": "https://example.org/locatedIn",
                            "name": "locatedIn",
                            "description": "Parcel the address points at.",
                            "cardinality_min": 1,
                            "belongs_to_class": { "iri": "https://example.org/Address", "name": "Address" },
                            "value_class_types": [
                                { "iri": "https://example.org/Parcel", "name": "Parcel" },
                                { "iri": "https://schema.org/Place", "name": "Place" }
                            ]
                        }
                    ]
                }
            ]
        },
        {
            "iri": "https://example.org/land/cadastre",
            "name": "Cadastre",
            "order": 1,
            "classes": [
                {
                    "iri": "https://example.org/Parcel",
                    "name": "Parcel",
                    "subclasses": [{ "iri": "https://example.org/Lot", "name": "Lot" }],
                    "superclasses": [{ "iri": "http://www.w3.org/2002/07/owl#Thing", "name": "Thing" }],
                    "is_defined_by": { "iri": "https://example.org/land/cadastre", "name": "Cadastre" },
                    "notes": [{ "value": "Boundaries follow the survey.", "type": "Scope Note" }]
                },
                {
                    "iri": "https://example.org/Lot",
                    "name": "Lot",
                    "superclasses": [{ "iri": "https://example.org/Parcel", "name": "Parcel" }]
                }
            ],
            "object_properties": [
                {
                    "iri": "https://example.org/adjoins",
                    "name": "adjoins",
                    "super_properties": [
                        { "iri": "http://www.w3.org/2004/02/skos/core#related", "name": "related" }
                    ],
                    "domain_includes": [{ "iri": "https://example.org/Parcel", "name": "Parcel" }],
                    "range_includes": [{ "iri": "https://example.org/Parcel", "name": "Parcel" }]
                }
            ]
        }
    ]
}"#;

const ONE_MODULE: &str = r#"{
    "iri": "https://example.org/tiny",
    "metadata": { "title": "Tiny" },
    "component_models": [
        {
            "iri": "https://example.org/tiny/core",
            "name": "Core",
            "classes": [{ "iri": "https://example.org/Thing", "name": "Thing" }]
        }
    ]
}"#;

/// Values of `attr="..."` across the serialised document.
fn attr_values<'a>(html: &'a str, attr: &str) -> Vec<&'a str> {
    let pattern = format!(" {attr}=\"");
    html.match_indices(&pattern)
        .filter_map(|(i, _)| {
            let rest = &html[i + pattern.len()..];
            rest.find('"').map(|end| &rest[..end])
        })
        .collect()
}

fn render_html(json: &str, options: &RenderOptions) -> String {
    let model = Supermodel::from_json_str(json).unwrap();
    render(&model, options, &SlugFragments).unwrap().to_html()
}

#[test]
fn every_internal_link_resolves() {
    let html = render_html(TWO_MODULES, &RenderOptions::default());
    let ids: HashSet<&str> = attr_values(&html, "id").into_iter().collect();
    let internal: Vec<&str> = attr_values(&html, "href")
        .into_iter()
        .filter_map(|href| href.strip_prefix('#'))
        .filter(|fragment| !fragment.is_empty())
        .collect();

    assert!(internal.len() > 10, "expected many internal links, got {}", internal.len());
    for fragment in internal {
        assert!(ids.contains(fragment), "no element with id {fragment:?}");
    }
}

#[test]
fn strict_render_succeeds_and_report_is_clean() {
    let model = Supermodel::from_json_str(TWO_MODULES).unwrap();
    let options = RenderOptions {
        strict_links: true,
        ..RenderOptions::default()
    };
    let rendered = render(&model, &options, &SlugFragments).unwrap();
    assert!(rendered.links.is_clean(), "{:?}", rendered.links);
    // Module "Examples" heading has no id.
    assert_eq!(rendered.links.dead_self_links, 1);
}

#[test]
fn toc_numbers_follow_document_order() {
    let model = Supermodel::from_json_str(TWO_MODULES).unwrap();
    let rendered = render(&model, &RenderOptions::default(), &SlugFragments).unwrap();
    assert_eq!(
        rendered.toc.labels(),
        vec![
            "1. Class Hierarchy",
            "2. Module: Cadastre",
            "2.1. Classes",
            "2.1.1. Class: Lot",
            "2.1.2. Class: Parcel",
            "2.2. Object Properties",
            "2.2.1. Property: adjoins",
            "3. Module: Addressing",
            "3.1. Examples",
            "3.2. Classes",
            "3.2.1. Class: Address",
        ]
    );

    let tree = rendered.toc.tree();
    assert_eq!(tree.len(), 3);
    assert_eq!(tree[1].href, "#module-cadastre");
    assert_eq!(tree[1].children.len(), 2);
    assert_eq!(tree[1].children[0].children.len(), 2);
    assert_eq!(tree[2].children[0].href, "#");
}

#[test]
fn cross_module_and_hierarchy_links() {
    let html = render_html(TWO_MODULES, &RenderOptions::default());

    // Hierarchy: Cadastre is a local module, Parcel a branch with Lot below.
    assert!(html.contains("<span class=\"hierarchy-node\"></span><a href=\"#module-cadastre\">Cadastre</a>"));
    assert!(html.contains("<span class=\"hierarchy-node\"></span><a href=\"#class-parcel\">Parcel</a>"));
    assert!(html.contains("<span class=\"hierarchy-node-leaf\"></span><a href=\"#class-lot\">Lot</a>"));

    // Value class types: one local, one external.
    assert!(html.contains("<a href=\"#class-parcel\">Parcel</a>, <a class=\"external-link\" href=\"https://schema.org/Place\""));
    // Is-defined-by points at the module heading.
    assert!(html.contains("Is defined by <a href=\"#module-cadastre\">Cadastre</a>"));
    // Superclass outside the model links out.
    assert!(html.contains("href=\"http://www.w3.org/2002/07/owl#Thing\""));

    assert!(html.contains("<p class=\"tableblock\">[1..*]</p>"));
    assert!(html.contains("Scope Note"));
    assert!(html.contains("<p>A postal <em>address</em>.</p>"));
    assert!(html.contains("Example Survey Office"));
}

#[test]
fn single_module_has_no_module_heading() {
    let html = render_html(ONE_MODULE, &RenderOptions::default());
    assert!(html.contains("<h2><span>Classes and Properties</span></h2>"));
    assert!(!html.contains("id=\"module-core\""));
    assert!(html.contains("id=\"section-core-classes\""));
    // Module IRI is not local, so the hierarchy links out to it.
    assert!(html.contains("href=\"https://example.org/tiny/core\""));
}

#[test]
fn generate_writes_html_and_stylesheet() {
    let dir = std::env::temp_dir().join(format!("supermodel-docs-e2e-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("model.json");
    std::fs::write(&model_path, ONE_MODULE).unwrap();
    let out = dir.join("site/tiny.html");

    let options = RenderOptions {
        include_css: false,
        ..RenderOptions::default()
    };
    let rendered = generate(&model_path, &out, &options).unwrap();
    assert_eq!(rendered.toc.len(), 4);

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("<link rel=\"stylesheet\" href=\"supermodel.css\">"));
    assert!(dir.join("site/supermodel.css").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn missing_title_is_a_model_error() {
    let dir = std::env::temp_dir().join(format!("supermodel-docs-untitled-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let model_path = dir.join("model.json");
    std::fs::write(&model_path, r#"{ "iri": "https://example.org/x" }"#).unwrap();

    let err = generate(&model_path, &dir.join("out.html"), &RenderOptions::default()).unwrap_err();
    assert!(err.to_string().contains("Failed to load model"));
    assert!(matches!(
        err.downcast_ref::<DocsError>(),
        Some(DocsError::Model(ModelError::MissingTitle { .. }))
    ));
    assert!(!dir.join("out.html").exists());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn entity_names_cannot_capture_section_anchors() {
    let json = r#"{
        "iri": "https://example.org/clash",
        "metadata": { "title": "Clash" },
        "component_models": [
            {
                "iri": "https://example.org/clash/class",
                "name": "Class",
                "classes": [
                    { "iri": "ex:Hierarchy", "name": "Hierarchy" },
                    { "iri": "ex:Classes", "name": "Classes" }
                ]
            }
        ]
    }"#;
    let model = Supermodel::from_json_str(json).unwrap();
    let options = RenderOptions {
        strict_links: true,
        ..RenderOptions::default()
    };
    let rendered = render(&model, &options, &SlugFragments).unwrap();
    assert!(rendered.links.duplicate_ids.is_empty(), "{:?}", rendered.links.duplicate_ids);

    let html = rendered.to_html();
    assert_eq!(html.matches(" id=\"class-hierarchy\"").count(), 1);
    assert!(html.contains("<h4 id=\"class-hierarchy\"><a class=\"anchor\" href=\"#class-hierarchy\"></a><span>Class: Hierarchy</span></h4>"));
    assert!(html.contains("<h4 id=\"class-classes\">"));
    assert!(html.contains("<h2 id=\"section-class-hierarchy\">"));
    assert!(html.contains("<h3 id=\"section-class-classes\">"));
}

#[test]
fn property_defined_by_links_to_module_heading_when_local() {
    let json = r#"{
        "iri": "https://example.org/net",
        "metadata": { "title": "Network" },
        "component_models": [
            {
                "iri": "https://example.org/net/topology",
                "name": "Topology",
                "object_properties": [
                    {
                        "iri": "https://example.org/connects",
                        "name": "connects",
                        "is_defined_by": { "iri": "https://example.org/net/topology", "name": "Topology" }
                    },
                    {
                        "iri": "https://example.org/sameAs",
                        "name": "sameAs",
                        "is_defined_by": { "iri": "http://www.w3.org/2002/07/owl", "name": "OWL" }
                    }
                ]
            },
            { "iri": "https://example.org/net/links", "name": "Links" }
        ]
    }"#;
    let html = render_html(json, &RenderOptions::default());
    assert!(html.contains("Is defined by <a href=\"#module-topology\">Topology</a>"));
    assert!(html.contains("Is defined by <a class=\"external-link\" href=\"http://www.w3.org/2002/07/owl\""));
}
