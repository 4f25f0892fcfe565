use crate::error::{RibbonError, RibbonResult};
use crate::model::Attr;
use std::collections::BTreeMap;

/// Placeholder replaced by the procedure name
pub const NAME_PLACEHOLDER: &str = "{name}";
/// Placeholder replaced by the per-attribute stub body
pub const BODY_PLACEHOLDER: &str = "{body}";

const GETTER_TEMPLATE: &str = "Sub {name}(control As IRibbonControl, ByRef returnedVal)\n    {body}\nEnd Sub";
const TEXT_SETTER_TEMPLATE: &str = "Sub {name}(control As IRibbonControl, text As String)\n    {body}\nEnd Sub";

/// VBA code templates keyed by the attribute kind they implement.
///
/// A `TemplateSet` always covers every getter/setter attribute and every
/// template contains `{name}`; both are checked on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateSet {
    templates: BTreeMap<Attr, String>,
}

impl TemplateSet {
    pub fn new(templates: BTreeMap<Attr, String>) -> RibbonResult<Self> {
        for (attr, template) in &templates {
            if attr.binding().is_none() {
                return Err(RibbonError::Configuration(format!(
                    "Template given for '{}', which is not a getter or setter attribute",
                    attr
                )));
            }
            if !template.contains(NAME_PLACEHOLDER) {
                return Err(RibbonError::Configuration(format!(
                    "Template for '{}' has no {} placeholder",
                    attr, NAME_PLACEHOLDER
                )));
            }
        }

        let missing: Vec<&str> = Attr::bindable()
            .filter(|attr| !templates.contains_key(attr))
            .map(Attr::name)
            .collect();
        if !missing.is_empty() {
            return Err(RibbonError::Configuration(format!(
                "No code template for {}",
                missing.join(", ")
            )));
        }

        Ok(Self { templates })
    }

    /// Replace individual templates; the result is validated again.
    pub fn with_overrides(self, overrides: BTreeMap<Attr, String>) -> RibbonResult<Self> {
        let mut templates = self.templates;
        templates.extend(overrides);
        Self::new(templates)
    }

    pub fn get(&self, attr: Attr) -> Option<&str> {
        self.templates.get(&attr).map(String::as_str)
    }

    /// Fill a template. `None` only for attributes without a template, which
    /// a validated set never produces for getter/setter attributes.
    pub fn fill(&self, attr: Attr, procedure: &str) -> Option<String> {
        let template = self.get(attr)?;
        Some(
            template
                .replace(BODY_PLACEHOLDER, placeholder_body(attr))
                .replace(NAME_PLACEHOLDER, procedure),
        )
    }
}

impl Default for TemplateSet {
    fn default() -> Self {
        let templates = Attr::bindable()
            .map(|attr| {
                let template = match attr {
                    Attr::OnChange | Attr::SetText => TEXT_SETTER_TEMPLATE,
                    _ => GETTER_TEMPLATE,
                };
                (attr, template.to_string())
            })
            .collect();
        Self { templates }
    }
}

/// Stub statement placed in each generated procedure
pub fn placeholder_body(attr: Attr) -> &'static str {
    match attr {
        Attr::GetPressed => "returnedVal = False",
        Attr::GetText => "returnedVal = \"\"",
        Attr::OnChange | Attr::SetText => "Debug.Print control.Id, text",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_set_is_complete() {
        let defaults = TemplateSet::default();
        for attr in Attr::bindable() {
            assert!(defaults.get(attr).is_some(), "missing {attr}");
        }
        let revalidated = TemplateSet::new(defaults.templates.clone()).unwrap();
        assert_eq!(revalidated, defaults);
    }

    #[test]
    fn test_incomplete_set_rejected() {
        let mut templates = TemplateSet::default().templates;
        templates.remove(&Attr::SetText);
        let err = TemplateSet::new(templates).unwrap_err();
        assert!(err.is_configuration());
        assert!(err.to_string().contains("setText"));
    }

    #[test]
    fn test_template_without_name_rejected() {
        let overrides = BTreeMap::from([(Attr::GetText, "Sub x()\nEnd Sub".to_string())]);
        let err = TemplateSet::default().with_overrides(overrides).unwrap_err();
        assert!(err.to_string().contains("{name}"));
    }

    #[test]
    fn test_template_for_plain_attribute_rejected() {
        let overrides = BTreeMap::from([(Attr::Label, "{name}".to_string())]);
        assert!(TemplateSet::default().with_overrides(overrides).is_err());
    }

    #[test]
    fn test_fill() {
        let filled = TemplateSet::default()
            .fill(Attr::GetPressed, "cb1_getPressed")
            .unwrap();
        assert_eq!(
            filled,
            "Sub cb1_getPressed(control As IRibbonControl, ByRef returnedVal)\n    returnedVal = False\nEnd Sub"
        );
    }

    #[test]
    fn test_override_is_used() {
        let overrides = BTreeMap::from([(
            Attr::GetText,
            "Function {name}() As String\nEnd Function".to_string(),
        )]);
        let set = TemplateSet::default().with_overrides(overrides).unwrap();
        assert_eq!(
            set.fill(Attr::GetText, "lbl_getText").unwrap(),
            "Function lbl_getText() As String\nEnd Function"
        );
    }
}
