//! Eager setup checks, run once before any output is produced

use crate::binding::{collect_callbacks, collect_images};
use crate::error::{RibbonError, RibbonResult};
use crate::model::Node;
use crate::router::Router;
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Every callback referenced in the tree must be a router key.
pub fn check_router_compatibility(root: &Node, router: &Router) -> RibbonResult<()> {
    let missing = missing_callbacks(root, router);
    if missing.is_empty() {
        return Ok(());
    }
    Err(RibbonError::Configuration(format!(
        "Model and router are not compatible, callbacks {} are missing",
        missing.into_iter().collect::<Vec<_>>().join(", ")
    )))
}

/// Callbacks required by the tree that the router does not provide
pub fn missing_callbacks(root: &Node, router: &Router) -> BTreeSet<String> {
    collect_callbacks(root)
        .into_iter()
        .filter(|callback| !router.contains(callback))
        .collect()
}

/// Element ids must be unique across the tree; generated procedure names
/// are derived from them.
pub fn check_unique_ids(root: &Node) -> RibbonResult<()> {
    let mut seen = HashSet::new();
    let mut duplicates = BTreeSet::new();
    root.walk(&mut |node| {
        if !seen.insert(node.id()) {
            duplicates.insert(node.id().to_string());
        }
    });
    if duplicates.is_empty() {
        return Ok(());
    }
    Err(RibbonError::Validation(format!(
        "Duplicate element id(s): {}",
        duplicates.into_iter().collect::<Vec<_>>().join(", ")
    )))
}

/// Every referenced image must exist as `{image_dir}/{name}.png`.
/// Stops at the first missing file.
pub fn check_images_available(root: &Node, image_dir: &Path) -> RibbonResult<()> {
    for image in collect_images(root) {
        let file_name = image_file_name(&image);
        if !image_dir.join(&file_name).is_file() {
            return Err(RibbonError::Configuration(format!(
                "Image file '{}' not found in '{}'",
                file_name,
                image_dir.display()
            )));
        }
    }
    Ok(())
}

pub fn image_file_name(image: &str) -> String {
    format!("{}.png", image)
}

pub fn image_path(image_dir: &Path, image: &str) -> PathBuf {
    image_dir.join(image_file_name(image))
}
