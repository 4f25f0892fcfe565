//! Tree traversals: callback and image collection, getter/setter auto-binding
//!
//! Every traversal is depth-first, pre-order. Auto-binding never touches the
//! input tree; it returns a bound copy plus the generated [`Bindings`], so
//! running it again on the bound copy finds nothing left to bind.

use crate::model::{Attr, BindingKind, Node};
use std::collections::HashSet;
use tracing::{debug, warn};

/// One generated handler name for an unset getter/setter attribute
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    /// Value written into the attribute (module-qualified when configured)
    pub name: String,
    /// VBA procedure name, always `{id}_{attribute}`
    pub procedure: String,
    pub element_id: String,
    pub attr: Attr,
}

/// Generated name -> binding, in traversal order. The first entry for a name wins.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    entries: Vec<Binding>,
    names: HashSet<String>,
}

impl Bindings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns false (and keeps the existing entry) when the name is taken.
    pub fn insert(&mut self, binding: Binding) -> bool {
        if !self.names.insert(binding.name.clone()) {
            return false;
        }
        self.entries.push(binding);
        true
    }

    pub fn merge(&mut self, other: Bindings) {
        for binding in other.entries {
            let (name, element) = (binding.name.clone(), binding.element_id.clone());
            if !self.insert(binding) {
                warn!(name = %name, element = %element, "generated binding name already taken, element ids must be unique");
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Binding> {
        self.entries.iter().find(|b| b.name == name)
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// The attribute kind a generated name satisfies
    pub fn attr_for(&self, name: &str) -> Option<Attr> {
        self.get(name).map(|b| b.attr)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|b| b.name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Binding> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a Bindings {
    type Item = &'a Binding;
    type IntoIter = std::slice::Iter<'a, Binding>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Procedure name generated for `attr` on the element `id`
pub fn procedure_name(id: &str, attr: Attr) -> String {
    format!("{}_{}", id, attr.name())
}

/// Attribute value generated for `attr` on `id`, optionally module-qualified
pub fn binding_name(id: &str, attr: Attr, qualifier: Option<&str>) -> String {
    let procedure = procedure_name(id, attr);
    match qualifier {
        Some(module) => format!("{}.{}", module, procedure),
        None => procedure,
    }
}

/// All set callback-bearing values, in traversal order, duplicates kept.
pub fn collect_callbacks(root: &Node) -> Vec<String> {
    let mut callbacks = Vec::new();
    root.walk(&mut |node| {
        callbacks.extend(
            node.attributes()
                .filter(|(attr, _)| attr.is_callback())
                .map(|(_, value)| value.to_string()),
        );
    });
    callbacks
}

/// All image references, in traversal order, duplicates kept.
pub fn collect_images(root: &Node) -> Vec<String> {
    let mut images = Vec::new();
    root.walk(&mut |node| {
        images.extend(
            node.attributes()
                .filter(|(attr, _)| attr.is_image())
                .map(|(_, value)| value.to_string()),
        );
    });
    images
}

pub fn resolve_getters(root: &Node, qualifier: Option<&str>) -> (Node, Bindings) {
    resolve(root, BindingKind::Getter, qualifier)
}

pub fn resolve_setters(root: &Node, qualifier: Option<&str>) -> (Node, Bindings) {
    resolve(root, BindingKind::Setter, qualifier)
}

fn resolve(root: &Node, kind: BindingKind, qualifier: Option<&str>) -> (Node, Bindings) {
    let mut bound = root.clone();
    let bindings = bind_subtree(&mut bound, kind, qualifier);
    debug!(
        kind = kind.label(),
        count = bindings.len(),
        "resolved automatic bindings"
    );
    (bound, bindings)
}

fn bind_subtree(node: &mut Node, kind: BindingKind, qualifier: Option<&str>) -> Bindings {
    let mut bindings = Bindings::new();

    let unset: Vec<Attr> = node
        .unset_attributes()
        .filter(|attr| attr.binding() == Some(kind))
        .collect();
    for attr in unset {
        let binding = Binding {
            name: binding_name(node.id(), attr, qualifier),
            procedure: procedure_name(node.id(), attr),
            element_id: node.id().to_string(),
            attr,
        };
        node.set_attr(attr, binding.name.clone());
        bindings.insert(binding);
    }

    for child in node.children_mut() {
        let child_bindings = bind_subtree(child, kind, qualifier);
        bindings.merge(child_bindings);
    }
    bindings
}
