//! VBA code-text generation for auto-bound getters and setters

mod templates;

pub use templates::{placeholder_body, TemplateSet, BODY_PLACEHOLDER, NAME_PLACEHOLDER};

use crate::binding::{Binding, Bindings};
use crate::error::{RibbonError, RibbonResult};
use crate::model::BindingKind;
use chrono::{DateTime, Local};

pub struct CodeEmitter<'a> {
    templates: &'a TemplateSet,
}

impl<'a> CodeEmitter<'a> {
    pub fn new(templates: &'a TemplateSet) -> Self {
        Self { templates }
    }

    /// Header comment, then every getter block, then every setter block,
    /// separated by blank lines.
    pub fn emit(
        &self,
        getters: &Bindings,
        setters: &Bindings,
        generated_at: DateTime<Local>,
    ) -> RibbonResult<String> {
        let mut blocks = vec![format!(
            "' xlribbon generated at {}",
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )];
        for binding in getters {
            blocks.push(self.block(binding, BindingKind::Getter)?);
        }
        for binding in setters {
            blocks.push(self.block(binding, BindingKind::Setter)?);
        }
        let mut code = blocks.join("\n\n");
        code.push('\n');
        Ok(code)
    }

    fn block(&self, binding: &Binding, kind: BindingKind) -> RibbonResult<String> {
        let body = self
            .templates
            .fill(binding.attr, &binding.procedure)
            .ok_or_else(|| {
                RibbonError::Configuration(format!(
                    "No code template for '{}' (binding {})",
                    binding.attr, binding.name
                ))
            })?;
        Ok(format!(
            "' AUTOMATIC {} for '{}' ({})\n{}",
            kind.label(),
            binding.element_id,
            binding.attr,
            body
        ))
    }
}

/// Wrap generated code as an importable `.bas` module (CRLF line endings).
pub fn module_source(module: &str, code: &str) -> String {
    let source = format!(
        "Attribute VB_Name = \"{}\"\nOption Explicit\n\n{}",
        module, code
    );
    source.replace("\r\n", "\n").replace('\n', "\r\n")
}
