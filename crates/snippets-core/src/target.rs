//! Declarative snippet targets.
//!
//! A target is configured as a loosely typed value such as
//! `{ target: "node_axios", title: "Axios", syntax: "javascript" }`.
//! [`TargetSpec::normalize`] checks the field types and fills in `title` and
//! `syntax` when they are omitted.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::Error;

/// Syntax names that differ from the language segment of a target.
const SYNTAX_TRANSFORM: &[(&str, &str)] = &[("node", "javascript")];

/// A validated snippet target with a display title and highlighting syntax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetSpec {
    /// Compact identifier, `language` or `language_library`
    pub target: String,
    /// Title shown on the snippet tab
    pub title: String,
    /// Highlighting syntax used to render the snippet
    pub syntax: String,
}

impl TargetSpec {
    /// Validate a raw target value and derive the missing fields.
    ///
    /// Every type violation is reported in one [`Error::Validation`].
    pub fn normalize(raw: &JsonValue) -> crate::Result<Self> {
        let mut violations = Vec::new();

        let target = raw.get("target").and_then(JsonValue::as_str);
        if target.is_none() {
            violations.push("target must be string".to_string());
        }
        // an empty title or syntax falls back to the derived value
        let syntax = optional_string(raw, "syntax", &mut violations).filter(|s| !s.is_empty());
        let title = optional_string(raw, "title", &mut violations).filter(|s| !s.is_empty());

        let target = match target {
            Some(target) if violations.is_empty() => target,
            _ => return Err(Error::validation(violations)),
        };

        let (language, library) = split_target(target);
        let title = title.map(String::from).unwrap_or_else(|| match library {
            Some(library) => format!("{} ({})", language, library),
            None => language.to_string(),
        });
        let syntax = syntax
            .map(String::from)
            .unwrap_or_else(|| default_syntax(language).to_string());

        Ok(Self {
            target: target.to_string(),
            title,
            syntax,
        })
    }

    /// Language segment of the target identifier
    pub fn language(&self) -> &str {
        split_target(&self.target).0
    }

    /// Library segment of the target identifier, if any
    pub fn library(&self) -> Option<&str> {
        split_target(&self.target).1
    }
}

/// Split a target identifier on its first underscore.
///
/// An empty remainder (`"node_"`) counts as no library.
pub fn split_target(target: &str) -> (&str, Option<&str>) {
    match target.split_once('_') {
        Some((language, library)) if !library.is_empty() => (language, Some(library)),
        Some((language, _)) => (language, None),
        None => (target, None),
    }
}

fn default_syntax(language: &str) -> &str {
    SYNTAX_TRANSFORM
        .iter()
        .find(|(from, _)| *from == language)
        .map(|(_, to)| *to)
        .unwrap_or(language)
}

fn optional_string<'a>(
    raw: &'a JsonValue,
    field: &str,
    violations: &mut Vec<String>,
) -> Option<&'a str> {
    match raw.get(field) {
        None | Some(JsonValue::Null) => None,
        Some(JsonValue::String(s)) => Some(s),
        Some(other) => {
            violations.push(format!(
                "{} must be string or undefined :{}",
                field,
                type_name(other)
            ));
            None
        }
    }
}

fn type_name(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "boolean",
        JsonValue::Number(_) => "number",
        JsonValue::String(_) => "string",
        JsonValue::Array(_) => "array",
        JsonValue::Object(_) => "object",
    }
}
