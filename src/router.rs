//! Callback router: callback name -> handler macro
//!
//! Only key presence matters when checking a ribbon against its router. The
//! handler is informational (shown by `xlribbon callbacks`).

use crate::error::{RibbonError, RibbonResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Router {
    routes: BTreeMap<String, Option<String>>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_route(&mut self, callback: impl Into<String>, handler: impl Into<String>) -> &mut Self {
        self.routes.insert(callback.into(), Some(handler.into()));
        self
    }

    pub fn contains(&self, callback: &str) -> bool {
        self.routes.contains_key(callback)
    }

    /// Handler for a callback. A route declared without a handler maps to a
    /// macro of the same name.
    pub fn handler<'a>(&'a self, callback: &'a str) -> Option<&'a str> {
        match self.routes.get(callback)? {
            Some(handler) if !handler.trim().is_empty() => Some(handler.as_str()),
            _ => Some(callback),
        }
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.routes.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    /// Load a standalone router file. `.json` files are read as JSON,
    /// everything else as YAML.
    pub fn from_path(path: &Path) -> RibbonResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            RibbonError::Parse(format!(
                "Failed to read router file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(serde_yaml::from_str(&content)?)
        }
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Router {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut router = Router::new();
        for (callback, handler) in iter {
            router.add_route(callback, handler);
        }
        router
    }
}
