use serde::{Deserialize, Serialize};
use std::fmt;

/// Every attribute a ribbon node may carry (besides `id`).
///
/// Names serialize in camelCase, which is exactly the attribute name used in
/// custom-UI XML (`imageMso`, `onAction`, `getPressed`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Attr {
    Enabled,
    Label,
    Image,
    ImageMso,
    Size,
    SizeString,
    OnAction,
    Screentip,
    Supertip,
    GetPressed,
    GetText,
    SetText,
    OnChange,
}

/// Which side of an auto-generated binding an attribute sits on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingKind {
    /// Queried by Excel for the control's current display state
    Getter,
    /// Invoked by Excel to push new state from the control
    Setter,
}

impl BindingKind {
    pub fn label(self) -> &'static str {
        match self {
            BindingKind::Getter => "GETTER",
            BindingKind::Setter => "SETTER",
        }
    }
}

impl Attr {
    pub const ALL: [Attr; 13] = [
        Attr::Enabled,
        Attr::Label,
        Attr::Image,
        Attr::ImageMso,
        Attr::Size,
        Attr::SizeString,
        Attr::OnAction,
        Attr::Screentip,
        Attr::Supertip,
        Attr::GetPressed,
        Attr::GetText,
        Attr::SetText,
        Attr::OnChange,
    ];

    /// Attribute name as written in custom-UI XML
    pub fn name(self) -> &'static str {
        match self {
            Attr::Enabled => "enabled",
            Attr::Label => "label",
            Attr::Image => "image",
            Attr::ImageMso => "imageMso",
            Attr::Size => "size",
            Attr::SizeString => "sizeString",
            Attr::OnAction => "onAction",
            Attr::Screentip => "screentip",
            Attr::Supertip => "supertip",
            Attr::GetPressed => "getPressed",
            Attr::GetText => "getText",
            Attr::SetText => "setText",
            Attr::OnChange => "onChange",
        }
    }

    pub fn from_name(name: &str) -> Option<Attr> {
        Attr::ALL.into_iter().find(|attr| attr.name() == name)
    }

    /// Values of callback attributes name handlers that must exist in the router.
    pub fn is_callback(self) -> bool {
        matches!(self, Attr::OnAction | Attr::GetPressed)
    }

    /// Getter/setter attributes get a generated handler name when left unset.
    pub fn binding(self) -> Option<BindingKind> {
        match self {
            Attr::GetPressed | Attr::GetText => Some(BindingKind::Getter),
            Attr::OnChange | Attr::SetText => Some(BindingKind::Setter),
            _ => None,
        }
    }

    pub fn is_image(self) -> bool {
        self == Attr::Image
    }

    /// All attributes that can produce an auto-generated binding
    pub fn bindable() -> impl Iterator<Item = Attr> {
        Attr::ALL.into_iter().filter(|attr| attr.binding().is_some())
    }
}

impl fmt::Display for Attr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
