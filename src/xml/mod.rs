//! Custom-UI and relationship XML rendering

use crate::model::Node;
use quick_xml::escape::escape;

pub const CUSTOM_UI_NAMESPACE: &str = "http://schemas.microsoft.com/office/2006/01/customui";
pub const UI_EXTENSIBILITY_RELATIONSHIP: &str =
    "http://schemas.microsoft.com/office/2006/relationships/ui/extensibility";
pub const PACKAGE_RELATIONSHIPS_NAMESPACE: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships";

/// Render a node and its subtree as an XML fragment.
///
/// `id` comes first, then every set attribute in declaration order as
/// `key='value'`. Childless nodes are self-closed.
pub fn render(node: &Node) -> String {
    let mut out = String::new();
    render_into(node, &mut out);
    out
}

fn render_into(node: &Node, out: &mut String) {
    let tag = node.kind().tag_name();
    out.push('<');
    out.push_str(&tag);
    push_attr(out, "id", node.id());
    for (attr, value) in node.attributes() {
        push_attr(out, attr.name(), value);
    }

    if node.children().is_empty() {
        out.push_str("/>");
        return;
    }

    out.push('>');
    for child in node.children() {
        render_into(child, out);
    }
    out.push_str("</");
    out.push_str(&tag);
    out.push('>');
}

fn push_attr(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push_str("='");
    out.push_str(&escape(value));
    out.push('\'');
}

/// Full custom-UI document: the rendered root inside the `customUI`/`ribbon` envelope
pub fn custom_ui_xml(root: &Node) -> String {
    format!(
        "<customUI xmlns=\"{}\">\n\t<ribbon startFromScratch=\"false\">{}</ribbon>\n</customUI>",
        CUSTOM_UI_NAMESPACE,
        render(root)
    )
}

/// One `Relationship` element per image, newline separated, without envelope.
pub fn relationships_xml(images: &[String]) -> String {
    images
        .iter()
        .map(|image| {
            let image = escape(image.as_str());
            format!(
                "<Relationship Id=\"{}\" Type=\"{}\" Target=\"customImages/{}.png\"/>",
                image, UI_EXTENSIBILITY_RELATIONSHIP, image
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// `customUI/_rels/customUI.xml.rels` part content
pub fn relationships_part(images: &[String]) -> String {
    format!(
        "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\n<Relationships xmlns=\"{}\">\n{}\n</Relationships>",
        PACKAGE_RELATIONSHIPS_NAMESPACE,
        relationships_xml(images)
    )
}
