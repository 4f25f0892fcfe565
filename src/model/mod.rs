//! Ribbon node model
//!
//! A closed set of element kinds, each with a declared attribute table and a
//! child allow-list. See [`NodeKind::attributes`] and [`NodeKind::allowed_children`].

mod attr;
mod kind;
mod node;

pub use attr::{Attr, BindingKind};
pub use kind::{AttrSpec, NodeKind};
pub use node::{Node, NodeBuilder, ID_PATTERN};
