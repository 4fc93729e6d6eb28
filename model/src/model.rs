//! Core supermodel types.
//!
//! These types are the read-only view of an ontology that the documentation
//! renderer consumes: component models (modules), their classes and
//! properties, and the ontology-level metadata shown in the preamble. They are
//! produced by an upstream query layer and handed over as JSON; the top-level
//! entry point is [`Supermodel::from_json_str`](crate::Supermodel::from_json_str).

use serde::{Deserialize, Serialize};

/// Order assigned to component models that do not declare one.
pub const DEFAULT_ORDER: i64 = 999_999;

/// A reference to a documented (or external) entity.
///
/// References are views: the entity they name may or may not be described
/// elsewhere in the same supermodel.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityRef {
    /// Full IRI.
    pub iri: String,
    /// Display label.
    #[serde(default)]
    pub name: String,
}

impl EntityRef {
    /// Creates a reference from an IRI and a display name.
    pub fn new(iri: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            iri: iri.into(),
            name: name.into(),
        }
    }
}

/// The SKOS note kinds a class or property may carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum NoteKind {
    /// `skos:note`.
    #[serde(rename = "note")]
    Note,
    /// `skos:changeNote`.
    #[serde(rename = "Change Note")]
    ChangeNote,
    /// `skos:editorialNote`.
    #[serde(rename = "Editorial Note")]
    EditorialNote,
    /// `skos:historyNote`.
    #[serde(rename = "History Note")]
    HistoryNote,
    /// `skos:scopeNote`.
    #[serde(rename = "Scope Note")]
    ScopeNote,
}

impl NoteKind {
    /// Returns the title shown in the note's admonition block.
    #[must_use]
    pub fn title(self) -> &'static str {
        match self {
            NoteKind::Note => "note",
            NoteKind::ChangeNote => "Change Note",
            NoteKind::EditorialNote => "Editorial Note",
            NoteKind::HistoryNote => "History Note",
            NoteKind::ScopeNote => "Scope Note",
        }
    }
}

/// A note attached to a class or property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Note text.
    pub value: String,
    /// Kind of note.
    #[serde(rename = "type")]
    pub kind: NoteKind,
}

/// A property row of a class, typically derived from a SHACL property shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassProperty {
    /// IRI of the property path.
    pub iri: String,
    /// Display label.
    pub name: String,
    /// Description.
    pub description: String,
    /// The class the property shape belongs to.
    pub belongs_to_class: Option<EntityRef>,
    /// `sh:minCount`.
    pub cardinality_min: Option<u32>,
    /// `sh:maxCount`.
    pub cardinality_max: Option<u32>,
    /// `sh:nodeKind`, as a class reference.
    pub value_type: Option<EntityRef>,
    /// `sh:class` values.
    pub value_class_types: Vec<EntityRef>,
}

/// An OWL/RDFS class.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Class {
    /// Full IRI.
    pub iri: String,
    /// Display label.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Direct subclasses (`rdfs:subClassOf` inverse).
    pub subclasses: Vec<EntityRef>,
    /// Direct superclasses (`rdfs:subClassOf`).
    pub superclasses: Vec<EntityRef>,
    /// Property rows.
    pub properties: Vec<ClassProperty>,
    /// `skos:example` values.
    pub examples: Vec<String>,
    /// Notes.
    pub notes: Vec<Note>,
    /// The ontology this class is defined by.
    pub is_defined_by: Option<EntityRef>,
}

impl Class {
    /// Returns a reference to this class.
    #[must_use]
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.iri.clone(), self.name.clone())
    }
}

/// An RDF property documented in its own section.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RdfProperty {
    /// Full IRI.
    pub iri: String,
    /// Display label.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Notes.
    pub notes: Vec<Note>,
    /// The ontology this property is defined by.
    pub is_defined_by: Option<EntityRef>,
    /// `rdfs:subPropertyOf` values.
    pub super_properties: Vec<EntityRef>,
    /// `schema:domainIncludes` values.
    pub domain_includes: Vec<EntityRef>,
    /// `schema:rangeIncludes` values.
    pub range_includes: Vec<EntityRef>,
}

/// One component model (a module) of the supermodel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ComponentModel {
    /// Full IRI.
    pub iri: String,
    /// Display label.
    pub name: String,
    /// Description.
    pub description: Option<String>,
    /// Classes documented in this module.
    pub classes: Vec<Class>,
    /// Examples.
    pub examples: Vec<String>,
    /// `sh:order`; [`DEFAULT_ORDER`] when absent.
    pub order: Option<i64>,
    /// Class IRIs excluded from the documentation.
    pub ignored_classes: Vec<String>,
    /// `owl:AnnotationProperty` definitions.
    pub annotation_properties: Vec<RdfProperty>,
    /// `owl:DatatypeProperty` definitions.
    pub datatype_properties: Vec<RdfProperty>,
    /// `owl:ObjectProperty` definitions.
    pub object_properties: Vec<RdfProperty>,
    /// `owl:OntologyProperty` definitions.
    pub ontology_properties: Vec<RdfProperty>,
}

impl ComponentModel {
    /// Returns the effective sort order.
    #[must_use]
    pub fn effective_order(&self) -> i64 {
        self.order.unwrap_or(DEFAULT_ORDER)
    }

    /// Returns a reference to this module.
    #[must_use]
    pub fn to_ref(&self) -> EntityRef {
        EntityRef::new(self.iri.clone(), self.name.clone())
    }

    /// Returns the classes none of whose superclasses belong to this module.
    #[must_use]
    pub fn top_level_classes(&self) -> Vec<&Class> {
        self.classes
            .iter()
            .filter(|cls| {
                !cls.superclasses
                    .iter()
                    .any(|sup| self.classes.iter().any(|c| c.iri == sup.iri))
            })
            .collect()
    }

    /// Iterates all properties of the four property sections, in section order.
    pub fn all_properties(&self) -> impl Iterator<Item = &RdfProperty> {
        self.annotation_properties
            .iter()
            .chain(&self.datatype_properties)
            .chain(&self.object_properties)
            .chain(&self.ontology_properties)
    }
}

/// Ontology-level metadata shown in the document preamble.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Metadata {
    /// `dcterms:title`. Required.
    pub title: Option<String>,
    /// `dcterms:description`.
    pub description: Option<String>,
    /// `skos:historyNote`.
    pub history_note: Option<String>,
    /// `dcterms:publisher`.
    pub publisher: Option<String>,
    /// `dcterms:created`.
    pub created: Option<String>,
    /// `dcterms:modified`.
    pub modified: Option<String>,
    /// `dcterms:dateAccepted`.
    pub date_accepted: Option<String>,
    /// `dcterms:issued`.
    pub issued: Option<String>,
    /// `schema:identifier`.
    pub identifier: Option<String>,
    /// `owl:versionInfo`.
    pub version_info: Option<String>,
    /// `schema:category` values.
    pub categories: Vec<String>,
    /// `dcterms:creator` values.
    pub creators: Vec<String>,
    /// `dcterms:contributor` values.
    pub contributors: Vec<String>,
    /// `dcterms:license`.
    pub license: Option<String>,
    /// `vann:preferredNamespacePrefix`.
    pub preferred_namespace_prefix: Option<String>,
}

/// A complete supermodel: metadata plus its component models.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Supermodel {
    /// IRI of the supermodel itself.
    pub iri: String,
    /// Preamble metadata.
    pub metadata: Metadata,
    /// Examples shown before the component models.
    pub examples: Vec<String>,
    /// Component models, in document order once normalised.
    pub component_models: Vec<ComponentModel>,
}

impl Supermodel {
    /// Returns the document title, if declared.
    #[must_use]
    pub fn title(&self) -> Option<&str> {
        self.metadata.title.as_deref().filter(|t| !t.trim().is_empty())
    }

    /// Looks up a class by IRI across all component models.
    #[must_use]
    pub fn find_class(&self, iri: &str) -> Option<&Class> {
        self.component_models
            .iter()
            .flat_map(|m| m.classes.iter())
            .find(|c| c.iri == iri)
    }

    /// Looks up a documented property by IRI across all component models.
    #[must_use]
    pub fn find_property(&self, iri: &str) -> Option<&RdfProperty> {
        self.component_models
            .iter()
            .flat_map(ComponentModel::all_properties)
            .find(|p| p.iri == iri)
    }

    /// Returns the total number of classes across all component models.
    #[must_use]
    pub fn class_count(&self) -> usize {
        self.component_models.iter().map(|m| m.classes.len()).sum()
    }

    /// Returns the total number of documented properties across all component models.
    #[must_use]
    pub fn property_count(&self) -> usize {
        self.component_models
            .iter()
            .map(|m| m.all_properties().count())
            .sum()
    }
}
