//! Builds the read-only indexes the renderer queries: which IRIs are
//! documented here, and which class records back the hierarchy.

use std::collections::{HashMap, HashSet};

use supermodel_model::{Class, Supermodel};

/// The set of IRIs that have a heading in this document.
#[derive(Debug, Clone, Default)]
pub struct LocalityIndex {
    iris: HashSet<String>,
}

impl LocalityIndex {
    /// Builds the index for `model`.
    ///
    /// Every class and every sectioned property is local. Module IRIs are local
    /// only when module headings are rendered, i.e. with more than one module.
    #[must_use]
    pub fn from_model(model: &Supermodel) -> Self {
        let mut iris = HashSet::new();
        let module_headings = model.component_models.len() > 1;
        for module in &model.component_models {
            if module_headings {
                iris.insert(module.iri.clone());
            }
            for class in &module.classes {
                iris.insert(class.iri.clone());
            }
            for prop in module.all_properties() {
                iris.insert(prop.iri.clone());
            }
        }
        Self { iris }
    }

    /// Returns true if `iri` is documented in this document.
    #[must_use]
    pub fn contains(&self, iri: &str) -> bool {
        self.iris.contains(iri)
    }

    /// Number of local IRIs.
    #[must_use]
    pub fn len(&self) -> usize {
        self.iris.len()
    }

    /// Returns true if nothing is local.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.iris.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for LocalityIndex {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            iris: iter.into_iter().map(Into::into).collect(),
        }
    }
}

/// Class records by IRI, used to follow subclass references.
#[derive(Debug, Default)]
pub struct ClassTable<'a> {
    classes: HashMap<&'a str, &'a Class>,
}

impl<'a> ClassTable<'a> {
    /// Indexes every class of every component model. The first record wins
    /// when an IRI appears in several modules.
    #[must_use]
    pub fn from_model(model: &'a Supermodel) -> Self {
        Self::from_classes(model.component_models.iter().flat_map(|m| m.classes.iter()))
    }

    /// Indexes an arbitrary set of classes.
    pub fn from_classes<I>(classes: I) -> Self
    where
        I: IntoIterator<Item = &'a Class>,
    {
        let mut map = HashMap::new();
        for class in classes {
            map.entry(class.iri.as_str()).or_insert(class);
        }
        Self { classes: map }
    }

    /// Looks up a class by IRI.
    #[must_use]
    pub fn get(&self, iri: &str) -> Option<&'a Class> {
        self.classes.get(iri).copied()
    }
}
