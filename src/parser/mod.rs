use crate::codegen::TemplateSet;
use crate::config::RibbonConfig;
use crate::error::{RibbonError, RibbonResult};
use crate::model::{Attr, Node, NodeKind};
use crate::router::Router;
use serde::Deserialize;
use serde_yaml::Value;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Everything loaded from one project file
#[derive(Debug, Clone)]
pub struct RibbonProject {
    /// Project file the model was loaded from (empty for in-memory sources)
    pub path: PathBuf,
    pub config: RibbonConfig,
    pub templates: TemplateSet,
    pub router: Router,
    pub root: Node,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct ProjectFile {
    #[serde(default)]
    config: RibbonConfig,
    #[serde(default)]
    templates: BTreeMap<Attr, String>,
    #[serde(default)]
    router: Router,
    ribbon: NodeDef,
}

/// Raw node entry: `kind`, `id`, `children`, plus attributes by XML name
#[derive(Debug, Deserialize)]
struct NodeDef {
    kind: String,
    id: String,
    #[serde(default)]
    children: Vec<NodeDef>,
    #[serde(flatten)]
    attributes: BTreeMap<String, Value>,
}

/// Parse a ribbon project file.
///
/// # Example
/// ```no_run
/// use xlribbon::parser::parse_project;
/// use std::path::Path;
///
/// let project = parse_project(Path::new("ribbon.yaml"))?;
/// println!("Root: {} ({} nodes)", project.root.id(), project.root.node_count());
/// # Ok::<(), xlribbon::error::RibbonError>(())
/// ```
pub fn parse_project(path: &Path) -> RibbonResult<RibbonProject> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        RibbonError::Parse(format!(
            "Failed to read project file '{}': {}",
            path.display(),
            e
        ))
    })?;
    let base_dir = path.parent().unwrap_or_else(|| Path::new("."));
    let mut project = parse_project_str(&content, base_dir)?;
    project.path = path.to_path_buf();
    Ok(project)
}

/// Parse project YAML; relative paths in `config:` are anchored at `base_dir`.
pub fn parse_project_str(content: &str, base_dir: &Path) -> RibbonResult<RibbonProject> {
    let file: ProjectFile = serde_yaml::from_str(content)?;

    let mut config = file.config;
    config.validate()?;
    config.resolve_paths(base_dir);

    let templates = TemplateSet::default().with_overrides(file.templates)?;
    let root = build_node(file.ribbon)?;

    Ok(RibbonProject {
        path: PathBuf::new(),
        config,
        templates,
        router: file.router,
        root,
    })
}

/// Parse just a ribbon tree (the value of `ribbon:`)
pub fn parse_ribbon_str(content: &str) -> RibbonResult<Node> {
    let def: NodeDef = serde_yaml::from_str(content)?;
    build_node(def)
}

fn build_node(def: NodeDef) -> RibbonResult<Node> {
    let kind = NodeKind::from_name(&def.kind).ok_or_else(|| {
        let known: Vec<String> = NodeKind::ALL.iter().map(|k| k.tag_name()).collect();
        RibbonError::Validation(format!(
            "'{}': unknown element kind '{}', expected one of {}",
            def.id,
            def.kind,
            known.join(", ")
        ))
    })?;

    let mut builder = Node::builder(kind, def.id.clone());
    for (name, value) in &def.attributes {
        if let Some(text) = scalar_to_string(&def.id, name, value)? {
            builder = builder.attr_named(name, text);
        }
    }
    for child in def.children {
        builder = builder.child(build_node(child)?);
    }
    builder.build()
}

/// Attribute values are strings in the XML; YAML booleans and numbers are
/// accepted and written back as text. `null` leaves the attribute unset.
fn scalar_to_string(id: &str, name: &str, value: &Value) -> RibbonResult<Option<String>> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s.clone())),
        Value::Bool(b) => Ok(Some(b.to_string())),
        Value::Number(n) => Ok(Some(n.to_string())),
        _ => Err(RibbonError::Validation(format!(
            "'{}': attribute '{}' must be a scalar value",
            id, name
        ))),
    }
}
