//! Generation settings
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. The project file's `config:` section
//! 3. CLI flags / `XLRIBBON_*` environment variables ([`ConfigOverrides`])

use crate::error::{RibbonError, RibbonResult};
use crate::model::ID_PATTERN;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RibbonConfig {
    /// VBA module that receives the generated macros
    pub module_name: String,
    /// Write `{module}.{id}_{attribute}` instead of `{id}_{attribute}` into
    /// auto-bound attributes
    pub qualify_bindings: bool,
    /// Directory holding `{image}.png` for every referenced image
    pub image_dir: PathBuf,
    /// File name of the standalone custom-UI XML output
    pub ui_file: PathBuf,
    /// Where `build` puts the packaged add-in and the macro module
    pub build_dir: PathBuf,
}

impl Default for RibbonConfig {
    fn default() -> Self {
        Self {
            module_name: "xlribbon".to_string(),
            qualify_bindings: false,
            image_dir: PathBuf::from("img"),
            ui_file: PathBuf::from("customUI.xml"),
            build_dir: PathBuf::from("build"),
        }
    }
}

impl RibbonConfig {
    /// Module qualifier for generated binding names, if enabled
    pub fn qualifier(&self) -> Option<&str> {
        self.qualify_bindings.then_some(self.module_name.as_str())
    }

    /// Anchor a relative image directory at the project file's directory.
    pub fn resolve_paths(&mut self, base_dir: &Path) {
        if self.image_dir.is_relative() {
            self.image_dir = base_dir.join(&self.image_dir);
        }
    }

    pub fn validate(&self) -> RibbonResult<()> {
        let pattern = Regex::new(ID_PATTERN)
            .map_err(|e| RibbonError::Configuration(format!("Regex error: {}", e)))?;
        if !pattern.is_match(&self.module_name) {
            return Err(RibbonError::Configuration(format!(
                "module_name '{}' is not a valid VBA module name",
                self.module_name
            )));
        }
        if self.ui_file.as_os_str().is_empty() {
            return Err(RibbonError::Configuration(
                "ui_file must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// Values supplied on the command line (or via environment) that win over
/// the project file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub module_name: Option<String>,
    pub image_dir: Option<PathBuf>,
    pub build_dir: Option<PathBuf>,
    pub qualify_bindings: bool,
}

impl ConfigOverrides {
    pub fn apply(&self, config: &mut RibbonConfig) {
        if let Some(ref module) = self.module_name {
            config.module_name = module.clone();
        }
        if let Some(ref dir) = self.image_dir {
            config.image_dir = dir.clone();
        }
        if let Some(ref dir) = self.build_dir {
            config.build_dir = dir.clone();
        }
        if self.qualify_bindings {
            config.qualify_bindings = true;
        }
    }
}
