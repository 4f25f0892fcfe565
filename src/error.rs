use std::path::PathBuf;
use thiserror::Error;

pub type RibbonResult<T> = Result<T, RibbonError>;

#[derive(Error, Debug)]
pub enum RibbonError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    /// Malformed node tree: missing required attribute, unknown attribute,
    /// bad id or disallowed child kind.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Router/callback mismatch, missing image asset or incomplete templates.
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Refusing to overwrite existing file: {}", .0.display())]
    OutputExists(PathBuf),

    #[error("Packaging error: {0}")]
    Package(String),
}

impl RibbonError {
    pub fn is_validation(&self) -> bool {
        matches!(self, RibbonError::Validation(_))
    }

    pub fn is_configuration(&self) -> bool {
        matches!(self, RibbonError::Configuration(_))
    }
}
