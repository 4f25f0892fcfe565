//! A checked, auto-bound ribbon ready to be written or packaged

use crate::binding::{collect_callbacks, collect_images, resolve_getters, resolve_setters, Bindings};
use crate::checks::{check_images_available, check_router_compatibility, check_unique_ids};
use crate::codegen::{module_source, CodeEmitter, TemplateSet};
use crate::config::RibbonConfig;
use crate::error::RibbonResult;
use crate::model::Node;
use crate::parser::RibbonProject;
use crate::router::Router;
use crate::writer::write_new_file;
use crate::xml;
use chrono::{DateTime, Local};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

#[derive(Debug, Clone)]
pub struct Ribbon {
    root: Node,
    getters: Bindings,
    setters: Bindings,
    config: RibbonConfig,
    templates: TemplateSet,
}

impl Ribbon {
    /// Check the tree against the router and the image directory, then
    /// resolve automatic getters and setters.
    ///
    /// Both checks run before anything is bound or rendered, so a failing
    /// configuration never yields a partial artifact.
    pub fn new(
        root: Node,
        router: &Router,
        config: RibbonConfig,
        templates: TemplateSet,
    ) -> RibbonResult<Self> {
        config.validate()?;
        check_unique_ids(&root)?;
        check_router_compatibility(&root, router)?;
        check_images_available(&root, &config.image_dir)?;

        let qualifier = config.qualifier();
        let (with_getters, getters) = resolve_getters(&root, qualifier);
        let (bound, setters) = resolve_setters(&with_getters, qualifier);
        debug!(
            root = root.id(),
            nodes = root.node_count(),
            getters = getters.len(),
            setters = setters.len(),
            "ribbon bound"
        );

        Ok(Self {
            root: bound,
            getters,
            setters,
            config,
            templates,
        })
    }

    pub fn from_project(project: RibbonProject) -> RibbonResult<Self> {
        Self::new(
            project.root,
            &project.router,
            project.config,
            project.templates,
        )
    }

    /// The bound tree (generated names filled in)
    pub fn root(&self) -> &Node {
        &self.root
    }

    pub fn getters(&self) -> &Bindings {
        &self.getters
    }

    pub fn setters(&self) -> &Bindings {
        &self.setters
    }

    pub fn config(&self) -> &RibbonConfig {
        &self.config
    }

    /// Callbacks declared by the model itself (generated bindings excluded)
    pub fn callbacks(&self) -> Vec<String> {
        let generated = |name: &String| {
            self.getters.contains_key(name) || self.setters.contains_key(name)
        };
        collect_callbacks(&self.root)
            .into_iter()
            .filter(|name| !generated(name))
            .collect()
    }

    /// Referenced images, deduplicated, in first-seen order
    pub fn images(&self) -> Vec<String> {
        let mut images: Vec<String> = Vec::new();
        for image in collect_images(&self.root) {
            if !images.contains(&image) {
                images.push(image);
            }
        }
        images
    }

    pub fn xml(&self) -> String {
        xml::custom_ui_xml(&self.root)
    }

    pub fn relationships_xml(&self) -> String {
        xml::relationships_xml(&self.images())
    }

    pub fn macros(&self, generated_at: DateTime<Local>) -> RibbonResult<String> {
        CodeEmitter::new(&self.templates).emit(&self.getters, &self.setters, generated_at)
    }

    pub fn macros_now(&self) -> RibbonResult<String> {
        self.macros(Local::now())
    }

    /// Write the custom-UI XML as `{dir}/{ui_file}`. Fails if it exists.
    pub fn write_ui(&self, dir: &Path) -> RibbonResult<PathBuf> {
        let path = dir.join(&self.config.ui_file);
        write_new_file(&path, self.xml().as_bytes())?;
        info!(path = %path.display(), "wrote custom UI");
        Ok(path)
    }

    /// Write the generated macros as `{dir}/{module_name}.bas`, creating `dir`
    /// if needed. Fails if the module file exists.
    pub fn write_macros(&self, dir: &Path) -> RibbonResult<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.bas", self.config.module_name));
        let source = module_source(&self.config.module_name, &self.macros_now()?);
        write_new_file(&path, source.as_bytes())?;
        info!(path = %path.display(), "wrote macro module");
        Ok(path)
    }
}
