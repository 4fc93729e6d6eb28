//! Loads a supermodel from its JSON hand-off format and normalises it.
//!
//! Normalisation reproduces the ordering guarantees of the query layer so that
//! rendering is deterministic regardless of how the JSON was produced:
//! component models by `order`, classes and class references by name, notes by
//! kind, examples trimmed and sorted. Ignored classes are removed.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::error::ModelError;
use crate::model::{ComponentModel, EntityRef, Supermodel};

impl Supermodel {
    /// Parses and normalises a supermodel from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Json`] for malformed input (including unknown note
    /// kinds) and [`ModelError::MissingTitle`] if no title is declared.
    pub fn from_json_str(json: &str) -> Result<Self, ModelError> {
        let mut model: Supermodel = serde_json::from_str(json)?;
        if model.title().is_none() {
            return Err(ModelError::MissingTitle {
                iri: model.iri.clone(),
            });
        }
        model.normalize();
        debug!(
            modules = model.component_models.len(),
            classes = model.class_count(),
            properties = model.property_count(),
            "loaded supermodel"
        );
        Ok(model)
    }

    /// Reads, parses and normalises a supermodel JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::Io`] if the file cannot be read, otherwise as
    /// [`Supermodel::from_json_str`].
    pub fn from_path(path: &Path) -> Result<Self, ModelError> {
        let json = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }

    /// Applies the query layer's ordering and filtering rules in place.
    pub fn normalize(&mut self) {
        self.examples = normalize_examples(std::mem::take(&mut self.examples));
        for module in &mut self.component_models {
            normalize_module(module);
        }
        self.component_models
            .sort_by_key(ComponentModel::effective_order);
    }
}

fn normalize_module(module: &mut ComponentModel) {
    let ignored: HashSet<String> = module.ignored_classes.iter().cloned().collect();

    module.classes.retain(|c| !ignored.contains(&c.iri));
    for class in &mut module.classes {
        retain_and_sort(&mut class.subclasses, &ignored);
        retain_and_sort(&mut class.superclasses, &ignored);
        class.notes.sort_by(|a, b| a.kind.title().cmp(b.kind.title()));
        class.examples = normalize_examples(std::mem::take(&mut class.examples));
    }
    module.classes.sort_by(|a, b| a.name.cmp(&b.name));

    for prop in module
        .annotation_properties
        .iter_mut()
        .chain(module.datatype_properties.iter_mut())
        .chain(module.object_properties.iter_mut())
        .chain(module.ontology_properties.iter_mut())
    {
        prop.notes.sort_by(|a, b| a.kind.title().cmp(b.kind.title()));
    }

    module.examples = normalize_examples(std::mem::take(&mut module.examples));
}

fn retain_and_sort(refs: &mut Vec<EntityRef>, ignored: &HashSet<String>) {
    refs.retain(|r| !ignored.contains(&r.iri));
    refs.sort_by(|a, b| a.name.cmp(&b.name));
}

fn normalize_examples(examples: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = examples
        .into_iter()
        .map(|ex| ex.trim().to_string())
        .filter(|ex| !ex.is_empty())
        .collect();
    out.sort();
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::NoteKind;

    const MODEL: &str = r#"{
        "iri": "https://example.org/sm",
        "metadata": { "title": "Example Supermodel" },
        "component_models": [
            {
                "iri": "https://example.org/b",
                "name": "Second",
                "order": 2,
                "ignored_classes": ["https://example.org/b/Hidden"],
                "classes": [
                    {
                        "iri": "https://example.org/b/Zeta",
                        "name": "Zeta",
                        "subclasses": [
                            { "iri": "https://example.org/b/Hidden", "name": "Hidden" },
                            { "iri": "https://example.org/b/Beta", "name": "Beta" }
                        ],
                        "notes": [
                            { "value": "plain", "type": "note" },
                            { "value": "scope", "type": "Scope Note" }
                        ]
                    },
                    { "iri": "https://example.org/b/Hidden", "name": "Hidden" },
                    { "iri": "https://example.org/b/Alpha", "name": "Alpha" }
                ]
            },
            { "iri": "https://example.org/a", "name": "First", "order": 1 },
            { "iri": "https://example.org/c", "name": "Unordered" }
        ]
    }"#;

    #[test]
    fn modules_sorted_by_order() {
        let model = Supermodel::from_json_str(MODEL).unwrap();
        let names: Vec<&str> = model
            .component_models
            .iter()
            .map(|m| m.name.as_str())
            .collect();
        assert_eq!(names, vec!["First", "Second", "Unordered"]);
    }

    #[test]
    fn ignored_classes_dropped_everywhere() {
        let model = Supermodel::from_json_str(MODEL).unwrap();
        let second = &model.component_models[1];
        let names: Vec<&str> = second.classes.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Alpha", "Zeta"]);
        let zeta = &second.classes[1];
        assert_eq!(zeta.subclasses.len(), 1);
        assert_eq!(zeta.subclasses[0].name, "Beta");
    }

    #[test]
    fn notes_sorted_by_kind_title() {
        let model = Supermodel::from_json_str(MODEL).unwrap();
        let zeta = model.find_class("https://example.org/b/Zeta").unwrap();
        assert_eq!(zeta.notes[0].kind, NoteKind::ScopeNote);
        assert_eq!(zeta.notes[1].kind, NoteKind::Note);
    }

    #[test]
    fn missing_title_rejected() {
        let err = Supermodel::from_json_str(r#"{ "iri": "https://example.org/x" }"#)
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingTitle { .. }));
    }

    #[test]
    fn unknown_note_kind_rejected() {
        let json = r#"{
            "metadata": { "title": "T" },
            "component_models": [{ "classes": [{
                "iri": "x", "name": "X",
                "notes": [{ "value": "v", "type": "Gossip" }]
            }]}]
        }"#;
        assert!(matches!(
            Supermodel::from_json_str(json),
            Err(ModelError::Json(_))
        ));
    }

    #[test]
    fn examples_trimmed_and_sorted() {
        let out = normalize_examples(vec!["  b\n".into(), "a".into(), "   ".into()]);
        assert_eq!(out, vec!["a".to_string(), "b".to_string()]);
    }
}
