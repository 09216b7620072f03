//! `{{placeholder}}` message templates.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use thiserror::Error;

/// Maximum template length in characters.
pub const MAX_TEMPLATE_LENGTH: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TemplateError {
    #[error("Template is empty")]
    Empty,

    #[error("Template exceeds {0} characters")]
    TooLong(usize),

    #[error("Unclosed placeholder starting at byte {0}")]
    Unclosed(usize),

    #[error("Empty placeholder at byte {0}")]
    EmptyPlaceholder(usize),

    #[error("Missing variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Unknown placeholders: {}", .0.join(", "))]
    UnknownPlaceholders(Vec<String>),
}

/// A message body with `{{name}}` placeholders. Whitespace inside the braces
/// is ignored, so `{{ name }}` and `{{name}}` are the same placeholder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageTemplate {
    source: String,
}

enum Segment<'a> {
    Text(&'a str),
    Placeholder(&'a str),
}

impl MessageTemplate {
    /// Parses `source`, rejecting unclosed or empty placeholders.
    pub fn new(source: impl Into<String>) -> Result<Self, TemplateError> {
        let source = source.into();
        if source.trim().is_empty() {
            return Err(TemplateError::Empty);
        }
        if source.chars().count() > MAX_TEMPLATE_LENGTH {
            return Err(TemplateError::TooLong(MAX_TEMPLATE_LENGTH));
        }
        segments(&source)?;
        Ok(Self { source })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Distinct placeholder names in sorted order.
    pub fn placeholders(&self) -> Vec<String> {
        let names: BTreeSet<String> = segments(&self.source)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) => Some(name.to_string()),
                Segment::Text(_) => None,
            })
            .collect();
        names.into_iter().collect()
    }

    /// Fails unless every placeholder is in `allowed`.
    pub fn check_placeholders(&self, allowed: &[&str]) -> Result<(), TemplateError> {
        let unknown: Vec<String> = self
            .placeholders()
            .into_iter()
            .filter(|name| !allowed.contains(&name.as_str()))
            .collect();
        if unknown.is_empty() {
            Ok(())
        } else {
            Err(TemplateError::UnknownPlaceholders(unknown))
        }
    }

    /// Substitutes every placeholder. Lists all missing variables at once.
    pub fn render(&self, vars: &HashMap<String, String>) -> Result<String, TemplateError> {
        let segments = segments(&self.source)?;

        let missing: BTreeSet<String> = segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder(name) if !vars.contains_key(*name) => Some(name.to_string()),
                _ => None,
            })
            .collect();
        if !missing.is_empty() {
            return Err(TemplateError::MissingVariables(missing.into_iter().collect()));
        }

        let mut out = String::with_capacity(self.source.len());
        for segment in segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder(name) => {
                    if let Some(value) = vars.get(name) {
                        out.push_str(value);
                    }
                }
            }
        }
        Ok(out)
    }
}

impl TryFrom<String> for MessageTemplate {
    type Error = TemplateError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<MessageTemplate> for String {
    fn from(template: MessageTemplate) -> Self {
        template.source
    }
}

fn segments(source: &str) -> Result<Vec<Segment<'_>>, TemplateError> {
    let mut out = Vec::new();
    let mut rest = source;
    let mut offset = 0;

    while let Some(open) = rest.find("{{") {
        if open > 0 {
            out.push(Segment::Text(&rest[..open]));
        }
        let after_open = &rest[open + 2..];
        let close = after_open
            .find("}}")
            .ok_or(TemplateError::Unclosed(offset + open))?;
        let name = after_open[..close].trim();
        if name.is_empty() {
            return Err(TemplateError::EmptyPlaceholder(offset + open));
        }
        out.push(Segment::Placeholder(name));

        let consumed = open + 2 + close + 2;
        rest = &rest[consumed..];
        offset += consumed;
    }
    if !rest.is_empty() {
        out.push(Segment::Text(rest));
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn renders_placeholders_with_whitespace() {
        let template = MessageTemplate::new("Hi {{ first_name }}, happy {{holiday}}!").unwrap();
        let text = template
            .render(&vars(&[("first_name", "Mei"), ("holiday", "Deepavali")]))
            .unwrap();
        assert_eq!(text, "Hi Mei, happy Deepavali!");
    }

    #[test]
    fn repeated_placeholder_is_replaced_everywhere() {
        let template = MessageTemplate::new("{{name}} / {{name}}").unwrap();
        assert_eq!(template.render(&vars(&[("name", "A")])).unwrap(), "A / A");
        assert_eq!(template.placeholders(), vec!["name".to_string()]);
    }

    #[test]
    fn lists_every_missing_variable() {
        let template = MessageTemplate::new("{{b}} {{a}} {{c}}").unwrap();
        let err = template.render(&vars(&[("c", "x")])).unwrap_err();
        assert_eq!(err, TemplateError::MissingVariables(vec!["a".into(), "b".into()]));
        assert_eq!(err.to_string(), "Missing variables: a, b");
    }

    #[test]
    fn rejects_malformed_templates() {
        assert_eq!(MessageTemplate::new("Hi {{name").unwrap_err(), TemplateError::Unclosed(3));
        assert_eq!(MessageTemplate::new("Hi {{  }}").unwrap_err(), TemplateError::EmptyPlaceholder(3));
        assert_eq!(MessageTemplate::new("   ").unwrap_err(), TemplateError::Empty);
    }

    #[test]
    fn plain_text_renders_unchanged() {
        let template = MessageTemplate::new("No placeholders here").unwrap();
        assert_eq!(template.render(&HashMap::new()).unwrap(), "No placeholders here");
    }

    #[test]
    fn check_placeholders_reports_unknown_names() {
        let template = MessageTemplate::new("{{first_name}} {{discount}}").unwrap();
        assert!(template.check_placeholders(&["first_name", "discount"]).is_ok());
        assert_eq!(
            template.check_placeholders(&["first_name"]).unwrap_err(),
            TemplateError::UnknownPlaceholders(vec!["discount".into()])
        );
    }
}
