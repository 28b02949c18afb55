//! Template Resolver
//!
//! Substitutes `{{token}}` placeholders in a content template with contract
//! field values.

use std::sync::LazyLock;

use contract_types::{FieldDefinition, FieldValue, ValueMap};
use regex::{Captures, Regex};
use serde::Serialize;

use super::lookup::find_field;

/// Rendered for missing, absent or empty values (20 underscores)
pub const BLANK_PLACEHOLDER: &str = "____________________";

/// Rendered for a checked checkbox
pub const CHECKED: &str = "[x] Yes";

/// Rendered for an unchecked checkbox
pub const UNCHECKED: &str = "[ ] No";

/// `{{...}}`, non-greedy, does not span lines
static PLACEHOLDER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\{\{(.*?)\}\}").unwrap());

/// Render a template against a value map.
///
/// When `fields` is supplied, tokens that are not value-map keys resolve
/// through the first field whose label or id matches. Unmatched tokens render as
/// [`BLANK_PLACEHOLDER`].
pub fn resolve_template(
    template: &str,
    values: &ValueMap,
    fields: Option<&[FieldDefinition]>,
) -> String {
    TemplateResolver {
        values,
        fields,
    }
    .render(template)
}

/// Format a resolved value for the document body.
///
/// Priority: flags first, then blank values, then text verbatim.
pub fn format_value(value: Option<&FieldValue>) -> &str {
    match value {
        Some(FieldValue::Flag(true)) => CHECKED,
        Some(FieldValue::Flag(false)) => UNCHECKED,
        Some(FieldValue::Text(s)) if !s.is_empty() => s.as_str(),
        _ => BLANK_PLACEHOLDER,
    }
}

/// Trimmed placeholder tokens in template order, without duplicates
pub fn placeholders(template: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for caps in PLACEHOLDER_RE.captures_iter(template) {
        let token = caps[1].trim();
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// Outcome of rendering a template with token bookkeeping
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    /// The rendered document text
    pub rendered: String,
    /// Tokens that resolved to a value
    pub resolved: Vec<String>,
    /// Tokens that fell back to the blank placeholder
    pub unresolved: Vec<String>,
}

impl Resolution {
    /// Every placeholder found a value
    pub fn is_complete(&self) -> bool {
        self.unresolved.is_empty()
    }
}

/// Resolves placeholders against one contract's values
#[derive(Debug, Clone, Copy)]
pub struct TemplateResolver<'a> {
    values: &'a ValueMap,
    fields: Option<&'a [FieldDefinition]>,
}

impl<'a> TemplateResolver<'a> {
    /// Resolver that only matches value-map keys
    pub fn new(values: &'a ValueMap) -> Self {
        Self {
            values,
            fields: None,
        }
    }

    /// Also resolve tokens by field id or label
    pub fn with_fields(mut self, fields: &'a [FieldDefinition]) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Value for a token.
    ///
    /// 1. value-map key equal to the token (an `Absent` entry does not count)
    /// 2. field found by [`find_field`], then that field's id in the value map
    pub fn lookup(&self, token: &str) -> Option<&'a FieldValue> {
        if let Some(value) = self.values.get(token).filter(|v| !v.is_absent()) {
            return Some(value);
        }
        let field = find_field(self.fields?, token)?;
        self.values.get(&field.id)
    }

    /// Render the template
    pub fn render(&self, template: &str) -> String {
        PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| {
                format_value(self.lookup(caps[1].trim())).to_string()
            })
            .into_owned()
    }

    /// Render the template and report which tokens resolved
    pub fn resolve(&self, template: &str) -> Resolution {
        let mut resolved: Vec<String> = Vec::new();
        let mut unresolved: Vec<String> = Vec::new();

        let rendered = PLACEHOLDER_RE
            .replace_all(template, |caps: &Captures| {
                let token = caps[1].trim();
                let value = self.lookup(token);
                let bucket = if value.is_some_and(|v| !v.is_blank()) {
                    &mut resolved
                } else {
                    &mut unresolved
                };
                if !bucket.iter().any(|t| t == token) {
                    bucket.push(token.to_string());
                }
                format_value(value).to_string()
            })
            .into_owned();

        if !unresolved.is_empty() {
            tracing::debug!(tokens = ?unresolved, "template placeholders left blank");
        }

        Resolution {
            rendered,
            resolved,
            unresolved,
        }
    }
}
