use super::attr::Attr;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One declared attribute slot of a node kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttrSpec {
    pub attr: Attr,
    pub required: bool,
}

const fn req(attr: Attr) -> AttrSpec {
    AttrSpec {
        attr,
        required: true,
    }
}

const fn opt(attr: Attr) -> AttrSpec {
    AttrSpec {
        attr,
        required: false,
    }
}

//==============================================================================
// Attribute tables (declaration order is render order)
//==============================================================================

const LABELLED: &[AttrSpec] = &[req(Attr::Label)];

const BUTTON: &[AttrSpec] = &[
    opt(Attr::Enabled),
    req(Attr::Label),
    opt(Attr::Image),
    opt(Attr::ImageMso),
    req(Attr::Size),
    req(Attr::OnAction),
    opt(Attr::Screentip),
    opt(Attr::Supertip),
];

const CHECK_BOX: &[AttrSpec] = &[
    opt(Attr::Enabled),
    req(Attr::Label),
    opt(Attr::Image),
    opt(Attr::ImageMso),
    req(Attr::Size),
    opt(Attr::OnAction),
    opt(Attr::Screentip),
    opt(Attr::Supertip),
    opt(Attr::GetPressed),
];

const COMBO_BOX: &[AttrSpec] = &[
    opt(Attr::Enabled),
    req(Attr::Label),
    opt(Attr::Image),
    opt(Attr::ImageMso),
    req(Attr::Size),
    opt(Attr::OnAction),
    opt(Attr::Screentip),
    opt(Attr::Supertip),
    req(Attr::SizeString),
    opt(Attr::OnChange),
];

const EDIT_BOX: &[AttrSpec] = &[
    req(Attr::Label),
    opt(Attr::SizeString),
    opt(Attr::OnChange),
];

const LABEL_CONTROL: &[AttrSpec] = &[opt(Attr::GetText), opt(Attr::SetText)];

const NONE: &[AttrSpec] = &[];

//==============================================================================
// Child allow-lists
//==============================================================================

const TABS_CHILDREN: &[NodeKind] = &[NodeKind::Tab];
const TAB_CHILDREN: &[NodeKind] = &[NodeKind::Group];
const GROUP_CHILDREN: &[NodeKind] = &[
    NodeKind::Button,
    NodeKind::ButtonGroup,
    NodeKind::CheckBox,
    NodeKind::ComboBox,
    NodeKind::EditBox,
    NodeKind::LabelControl,
];
const BUTTON_GROUP_CHILDREN: &[NodeKind] = &[NodeKind::Button];
const COMBO_BOX_CHILDREN: &[NodeKind] = &[NodeKind::Item];
const LEAF: &[NodeKind] = &[];

/// The closed set of ribbon element kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeKind {
    Tabs,
    Tab,
    Group,
    Button,
    ButtonGroup,
    CheckBox,
    ComboBox,
    EditBox,
    LabelControl,
    Item,
}

impl NodeKind {
    pub const ALL: [NodeKind; 10] = [
        NodeKind::Tabs,
        NodeKind::Tab,
        NodeKind::Group,
        NodeKind::Button,
        NodeKind::ButtonGroup,
        NodeKind::CheckBox,
        NodeKind::ComboBox,
        NodeKind::EditBox,
        NodeKind::LabelControl,
        NodeKind::Item,
    ];

    pub fn variant_name(self) -> &'static str {
        match self {
            NodeKind::Tabs => "Tabs",
            NodeKind::Tab => "Tab",
            NodeKind::Group => "Group",
            NodeKind::Button => "Button",
            NodeKind::ButtonGroup => "ButtonGroup",
            NodeKind::CheckBox => "CheckBox",
            NodeKind::ComboBox => "ComboBox",
            NodeKind::EditBox => "EditBox",
            NodeKind::LabelControl => "LabelControl",
            NodeKind::Item => "Item",
        }
    }

    /// XML element name: the variant name with its first letter lower-cased
    pub fn tag_name(self) -> String {
        let name = self.variant_name();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_lowercase().chain(chars).collect(),
            None => String::new(),
        }
    }

    /// Accepts either the XML tag (`checkBox`) or the variant name (`CheckBox`).
    pub fn from_name(name: &str) -> Option<NodeKind> {
        NodeKind::ALL
            .into_iter()
            .find(|kind| kind.tag_name() == name || kind.variant_name() == name)
    }

    /// Declared attributes in render order (`id` excluded, it always comes first)
    pub fn attributes(self) -> &'static [AttrSpec] {
        match self {
            NodeKind::Tabs | NodeKind::Tab | NodeKind::Group | NodeKind::Item => LABELLED,
            NodeKind::Button => BUTTON,
            NodeKind::ButtonGroup => NONE,
            NodeKind::CheckBox => CHECK_BOX,
            NodeKind::ComboBox => COMBO_BOX,
            NodeKind::EditBox => EDIT_BOX,
            NodeKind::LabelControl => LABEL_CONTROL,
        }
    }

    pub fn allowed_children(self) -> &'static [NodeKind] {
        match self {
            NodeKind::Tabs => TABS_CHILDREN,
            NodeKind::Tab => TAB_CHILDREN,
            NodeKind::Group => GROUP_CHILDREN,
            NodeKind::ButtonGroup => BUTTON_GROUP_CHILDREN,
            NodeKind::ComboBox => COMBO_BOX_CHILDREN,
            NodeKind::Button
            | NodeKind::CheckBox
            | NodeKind::EditBox
            | NodeKind::LabelControl
            | NodeKind::Item => LEAF,
        }
    }

    pub fn declares(self, attr: Attr) -> bool {
        self.attributes().iter().any(|spec| spec.attr == attr)
    }

    pub fn accepts_child(self, child: NodeKind) -> bool {
        self.allowed_children().contains(&child)
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_name_lowercases_first_letter() {
        assert_eq!(NodeKind::CheckBox.tag_name(), "checkBox");
        assert_eq!(NodeKind::LabelControl.tag_name(), "labelControl");
        assert_eq!(NodeKind::Tabs.tag_name(), "tabs");
    }

    #[test]
    fn test_from_name_accepts_tag_and_variant() {
        assert_eq!(NodeKind::from_name("comboBox"), Some(NodeKind::ComboBox));
        assert_eq!(NodeKind::from_name("ComboBox"), Some(NodeKind::ComboBox));
        assert_eq!(NodeKind::from_name("combobox"), None);
    }

    #[test]
    fn test_group_children_allow_list() {
        assert!(NodeKind::Group.accepts_child(NodeKind::Button));
        assert!(NodeKind::Group.accepts_child(NodeKind::LabelControl));
        assert!(!NodeKind::Group.accepts_child(NodeKind::Tab));
        assert!(!NodeKind::Group.accepts_child(NodeKind::Item));
    }

    #[test]
    fn test_every_bindable_attribute_is_optional_where_declared() {
        for kind in NodeKind::ALL {
            for spec in kind.attributes() {
                if spec.attr.binding().is_some() {
                    assert!(!spec.required, "{}.{} must be optional", kind, spec.attr);
                }
            }
        }
    }
}
