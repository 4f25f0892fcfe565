//! Add-in packaging
//!
//! Rewrites an existing `.xlam` (or any Office zip package) with the rendered
//! custom UI, its relationships and image assets. Every other entry is copied
//! unchanged.

mod archive;
mod inject;

pub use inject::{CodeInjector, ModuleFileInjector};

use crate::checks::image_path;
use crate::error::{RibbonError, RibbonResult};
use crate::ribbon::Ribbon;
use crate::xml::{relationships_part, UI_EXTENSIBILITY_RELATIONSHIP};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub const CUSTOM_UI_PART: &str = "customUI/customUI.xml";
pub const CUSTOM_UI_RELS_PART: &str = "customUI/_rels/customUI.xml.rels";
pub const CUSTOM_IMAGES_DIR: &str = "customUI/customImages";
pub const PACKAGE_RELS_PART: &str = "_rels/.rels";
pub const CONTENT_TYPES_PART: &str = "[Content_Types].xml";

/// Outcome of one packaging run
#[derive(Debug, Clone)]
pub struct PackageReport {
    pub output: PathBuf,
    /// Entries carried over unchanged from the input package
    pub copied_entries: usize,
    /// Entries written by xlribbon, sorted
    pub written_entries: Vec<String>,
    pub images: Vec<String>,
    /// Generated macro code
    pub macros: String,
    /// Where the injector delivered the macros; `None` when injection failed
    pub injected: Option<PathBuf>,
}

pub struct Packager<'a> {
    ribbon: &'a Ribbon,
}

impl<'a> Packager<'a> {
    pub fn new(ribbon: &'a Ribbon) -> Self {
        Self { ribbon }
    }

    /// Archive path -> content for the custom-UI part, its relationships and images
    pub fn overrides(&self) -> RibbonResult<BTreeMap<String, Vec<u8>>> {
        let images = self.ribbon.images();
        let mut overrides = BTreeMap::new();
        overrides.insert(CUSTOM_UI_PART.to_string(), self.ribbon.xml().into_bytes());
        overrides.insert(
            CUSTOM_UI_RELS_PART.to_string(),
            relationships_part(&images).into_bytes(),
        );
        for image in &images {
            let path = image_path(&self.ribbon.config().image_dir, image);
            let bytes = std::fs::read(&path).map_err(|e| {
                RibbonError::Package(format!("Failed to read image '{}': {}", path.display(), e))
            })?;
            overrides.insert(format!("{}/{}.png", CUSTOM_IMAGES_DIR, image), bytes);
        }
        Ok(overrides)
    }

    /// Build `output` from `input`, then hand the macros to `injector`.
    ///
    /// The package is written to a staging file next to `output` and renamed
    /// into place. A failing injector only produces a warning: the package is
    /// complete without the macros, which can be added by hand.
    pub fn package(
        &self,
        input: &Path,
        output: &Path,
        injector: &dyn CodeInjector,
    ) -> RibbonResult<PackageReport> {
        if !input.is_file() {
            return Err(RibbonError::Package(format!(
                "Input package '{}' does not exist",
                input.display()
            )));
        }

        let macros = self.ribbon.macros_now()?;
        let mut overrides = self.overrides()?;
        self.add_package_patches(input, &mut overrides)?;

        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let staging = staging_path(output);
        debug!(staging = %staging.display(), "writing staging package");

        let copied = match archive::rewrite_archive(input, &staging, &overrides) {
            Ok(copied) => copied,
            Err(e) => {
                let _ = std::fs::remove_file(&staging);
                return Err(RibbonError::Package(format!("{:#}", e)));
            }
        };
        if let Err(e) = std::fs::rename(&staging, output) {
            let _ = std::fs::remove_file(&staging);
            return Err(e.into());
        }
        info!(
            output = %output.display(),
            copied,
            written = overrides.len(),
            "package written"
        );

        let module = &self.ribbon.config().module_name;
        let injected = match injector.inject(output, module, &macros) {
            Ok(path) => {
                info!(path = %path.display(), "macros delivered");
                Some(path)
            }
            Err(e) => {
                warn!(
                    error = %e,
                    "could not inject generated macros into {}; copy the generated code into a module named '{}' manually",
                    output.display(),
                    module
                );
                None
            }
        };

        Ok(PackageReport {
            output: output.to_path_buf(),
            copied_entries: copied,
            written_entries: overrides.into_keys().collect(),
            images: self.ribbon.images(),
            macros,
            injected,
        })
    }

    /// Register the custom UI in `_rels/.rels` and the png content type in
    /// `[Content_Types].xml` when the input package lacks them.
    fn add_package_patches(
        &self,
        input: &Path,
        overrides: &mut BTreeMap<String, Vec<u8>>,
    ) -> RibbonResult<()> {
        let package_error = |e: anyhow::Error| RibbonError::Package(format!("{:#}", e));

        match archive::read_entry(input, PACKAGE_RELS_PART).map_err(package_error)? {
            Some(bytes) => {
                let rels = String::from_utf8_lossy(&bytes);
                if let Some(patched) =
                    archive::ensure_ui_relationship(&rels, UI_EXTENSIBILITY_RELATIONSHIP)
                        .map_err(package_error)?
                {
                    overrides.insert(PACKAGE_RELS_PART.to_string(), patched.into_bytes());
                }
            }
            None => warn!(
                "{} has no {}; Excel will not load the custom UI",
                input.display(),
                PACKAGE_RELS_PART
            ),
        }

        if self.ribbon.images().is_empty() {
            return Ok(());
        }
        match archive::read_entry(input, CONTENT_TYPES_PART).map_err(package_error)? {
            Some(bytes) => {
                let types = String::from_utf8_lossy(&bytes);
                if let Some(patched) =
                    archive::ensure_png_content_type(&types).map_err(package_error)?
                {
                    overrides.insert(CONTENT_TYPES_PART.to_string(), patched.into_bytes());
                }
            }
            None => warn!("{} has no {}", input.display(), CONTENT_TYPES_PART),
        }
        Ok(())
    }
}

fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "package".to_string());
    output.with_file_name(format!(".{}.partial", name))
}
