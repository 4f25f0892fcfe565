use super::attr::Attr;
use super::kind::NodeKind;
use crate::error::{RibbonError, RibbonResult};
use regex::Regex;
use std::collections::BTreeMap;

/// Pattern every node id must match. Ids end up in generated VBA procedure
/// names (`{id}_{attribute}`), so they must be valid VBA identifiers.
pub const ID_PATTERN: &str = r"^[A-Za-z_][A-Za-z0-9_]*$";

/// A validated ribbon element and its subtree.
///
/// Nodes can only be created through [`NodeBuilder::build`], so every node in
/// a tree has its required attributes set, only declares attributes its kind
/// knows about, and only holds children of allowed kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    kind: NodeKind,
    id: String,
    attrs: BTreeMap<Attr, String>,
    children: Vec<Node>,
}

impl Node {
    pub fn builder(kind: NodeKind, id: impl Into<String>) -> NodeBuilder {
        NodeBuilder {
            kind,
            id: id.into(),
            attrs: Vec::new(),
            unknown: Vec::new(),
            children: Vec::new(),
        }
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn attr(&self, attr: Attr) -> Option<&str> {
        self.attrs.get(&attr).map(String::as_str)
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Set attributes in declaration order
    pub fn attributes(&self) -> impl Iterator<Item = (Attr, &str)> + '_ {
        self.kind
            .attributes()
            .iter()
            .filter_map(move |spec| self.attr(spec.attr).map(|value| (spec.attr, value)))
    }

    /// Declared attributes that are currently unset
    pub fn unset_attributes(&self) -> impl Iterator<Item = Attr> + '_ {
        self.kind
            .attributes()
            .iter()
            .map(|spec| spec.attr)
            .filter(move |attr| !self.attrs.contains_key(attr))
    }

    /// Depth-first, pre-order visit of this node and its descendants
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in &self.children {
            child.walk(visit);
        }
    }

    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// Used by the binding resolver on its own copy of the tree; `attr` is
    /// always a declared slot of this node's kind.
    pub(crate) fn set_attr(&mut self, attr: Attr, value: String) {
        debug_assert!(self.kind.declares(attr));
        self.attrs.insert(attr, value);
    }

    pub(crate) fn children_mut(&mut self) -> &mut [Node] {
        &mut self.children
    }
}

/// Collects attributes and children for a [`Node`] and validates them on `build()`.
#[derive(Debug, Clone)]
pub struct NodeBuilder {
    kind: NodeKind,
    id: String,
    attrs: Vec<(Attr, String)>,
    unknown: Vec<String>,
    children: Vec<Node>,
}

impl NodeBuilder {
    pub fn attr(mut self, attr: Attr, value: impl Into<String>) -> Self {
        self.attrs.push((attr, value.into()));
        self
    }

    /// Set an attribute by its XML name; unknown names fail at `build()`.
    pub fn attr_named(mut self, name: &str, value: impl Into<String>) -> Self {
        match Attr::from_name(name) {
            Some(attr) => self.attrs.push((attr, value.into())),
            None => self.unknown.push(name.to_string()),
        }
        self
    }

    pub fn child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn build(self) -> RibbonResult<Node> {
        let kind = self.kind;
        let identifier = Regex::new(ID_PATTERN)
            .map_err(|e| RibbonError::Validation(format!("Regex error: {}", e)))?;
        validate_id(&identifier, kind, &self.id)?;
        let context = format!("{} '{}'", kind, self.id);

        if let Some(name) = self.unknown.first() {
            return Err(RibbonError::Validation(format!(
                "{}: unknown attribute '{}'",
                context, name
            )));
        }

        let mut attrs = BTreeMap::new();
        for (attr, value) in self.attrs {
            if !kind.declares(attr) {
                return Err(RibbonError::Validation(format!(
                    "{}: attribute '{}' is not allowed on {}",
                    context, attr, kind
                )));
            }
            if value.trim().is_empty() {
                return Err(RibbonError::Validation(format!(
                    "{}: attribute '{}' must not be empty",
                    context, attr
                )));
            }
            // image names become file names, zip entry names and relationship ids
            if attr.is_image() && !identifier.is_match(&value) {
                return Err(RibbonError::Validation(format!(
                    "{}: image name '{}' is invalid: names must start with a letter or '_' and contain only letters, digits and '_'",
                    context, value
                )));
            }
            attrs.insert(attr, value);
        }

        let missing: Vec<&str> = kind
            .attributes()
            .iter()
            .filter(|spec| spec.required && !attrs.contains_key(&spec.attr))
            .map(|spec| spec.attr.name())
            .collect();
        if !missing.is_empty() {
            return Err(RibbonError::Validation(format!(
                "{}: missing required attribute(s) {}",
                context,
                missing.join(", ")
            )));
        }

        for child in &self.children {
            if !kind.accepts_child(child.kind) {
                let allowed: Vec<String> = kind
                    .allowed_children()
                    .iter()
                    .map(|k| k.tag_name())
                    .collect();
                let expected = if allowed.is_empty() {
                    "no children".to_string()
                } else {
                    format!("one of {}", allowed.join(", "))
                };
                return Err(RibbonError::Validation(format!(
                    "{}: child {} '{}' is not allowed, expected {}",
                    context, child.kind, child.id, expected
                )));
            }
        }

        Ok(Node {
            kind,
            id: self.id,
            attrs,
            children: self.children,
        })
    }
}

fn validate_id(pattern: &Regex, kind: NodeKind, id: &str) -> RibbonResult<()> {
    if !pattern.is_match(id) {
        return Err(RibbonError::Validation(format!(
            "{} id '{}' is invalid: ids must start with a letter or '_' and contain only letters, digits and '_'",
            kind, id
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn button(id: &str) -> Node {
        Node::builder(NodeKind::Button, id)
            .attr(Attr::Label, "Save")
            .attr(Attr::Size, "large")
            .attr(Attr::OnAction, "doSave")
            .build()
            .unwrap()
    }

    #[test]
    fn test_build_valid_button() {
        let node = button("b1");
        assert_eq!(node.kind(), NodeKind::Button);
        assert_eq!(node.id(), "b1");
        assert_eq!(node.attr(Attr::Label), Some("Save"));
        assert_eq!(node.attr(Attr::Image), None);
        assert!(node.children().is_empty());
    }

    #[test]
    fn test_attributes_follow_declaration_order() {
        let node = Node::builder(NodeKind::Button, "b1")
            .attr(Attr::OnAction, "doSave")
            .attr(Attr::Supertip, "Saves")
            .attr(Attr::Size, "large")
            .attr(Attr::Label, "Save")
            .build()
            .unwrap();
        let names: Vec<&str> = node.attributes().map(|(a, _)| a.name()).collect();
        assert_eq!(names, vec!["label", "size", "onAction", "supertip"]);
    }

    #[test]
    fn test_missing_required_attribute() {
        let err = Node::builder(NodeKind::Button, "b1")
            .attr(Attr::Label, "Save")
            .build()
            .unwrap_err();
        assert!(err.is_validation());
        let msg = err.to_string();
        assert!(msg.contains("size"), "{msg}");
        assert!(msg.contains("onAction"), "{msg}");
    }

    #[test]
    fn test_empty_required_attribute_rejected() {
        let err = Node::builder(NodeKind::Item, "i1")
            .attr(Attr::Label, "  ")
            .build()
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn test_undeclared_attribute_rejected() {
        let err = Node::builder(NodeKind::Item, "i1")
            .attr(Attr::Label, "One")
            .attr(Attr::OnAction, "go")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("not allowed on item"));
    }

    #[test]
    fn test_unknown_attribute_name_rejected() {
        let err = Node::builder(NodeKind::Item, "i1")
            .attr_named("label", "One")
            .attr_named("colour", "red")
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("unknown attribute 'colour'"));
    }

    #[test]
    fn test_invalid_id_rejected() {
        for id in ["", "1abc", "my-button", "a.b"] {
            let err = Node::builder(NodeKind::Item, id)
                .attr(Attr::Label, "x")
                .build()
                .unwrap_err();
            assert!(err.is_validation(), "id {id:?} should be rejected");
        }
    }

    #[test]
    fn test_image_name_must_be_identifier() {
        for image in ["../secret", "icons/save", "my icon", "save.png"] {
            let err = Node::builder(NodeKind::Button, "b1")
                .attr(Attr::Label, "Save")
                .attr(Attr::Image, image)
                .attr(Attr::Size, "large")
                .attr(Attr::OnAction, "doSave")
                .build()
                .unwrap_err();
            assert!(err.is_validation(), "image {image:?} should be rejected");
            assert!(err.to_string().contains("button 'b1'"));
            assert!(err.to_string().contains(image));
        }

        let node = Node::builder(NodeKind::Button, "b1")
            .attr(Attr::Label, "Save")
            .attr(Attr::Image, "save_24")
            .attr(Attr::Size, "large")
            .attr(Attr::OnAction, "doSave")
            .build()
            .unwrap();
        assert_eq!(node.attr(Attr::Image), Some("save_24"));
    }

    #[test]
    fn test_disallowed_child_kind() {
        let tab = Node::builder(NodeKind::Tab, "t1")
            .attr(Attr::Label, "Tab")
            .build()
            .unwrap();
        let err = Node::builder(NodeKind::Group, "g1")
            .attr(Attr::Label, "Group")
            .child(tab)
            .build()
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("child tab 't1' is not allowed"), "{msg}");
        assert!(msg.contains("button"), "{msg}");
    }

    #[test]
    fn test_leaf_rejects_children() {
        let err = Node::builder(NodeKind::Item, "i1")
            .attr(Attr::Label, "x")
            .child(button("b1"))
            .build()
            .unwrap_err();
        assert!(err.to_string().contains("expected no children"));
    }

    #[test]
    fn test_walk_is_pre_order() {
        let group = Node::builder(NodeKind::Group, "g1")
            .attr(Attr::Label, "Group")
            .child(button("b1"))
            .child(
                Node::builder(NodeKind::ButtonGroup, "bg")
                    .child(button("b2"))
                    .build()
                    .unwrap(),
            )
            .build()
            .unwrap();
        let mut ids = Vec::new();
        group.walk(&mut |n| ids.push(n.id()));
        assert_eq!(ids, vec!["g1", "b1", "bg", "b2"]);
        assert_eq!(group.node_count(), 4);
    }

    #[test]
    fn test_unset_attributes() {
        let node = Node::builder(NodeKind::LabelControl, "lbl")
            .attr(Attr::GetText, "readIt")
            .build()
            .unwrap();
        let unset: Vec<Attr> = node.unset_attributes().collect();
        assert_eq!(unset, vec![Attr::SetText]);
    }
}
