//! Snippet generator registry.
//!
//! The host keeps an ordered collection of snippet generators keyed by target.
//! [`extend`] appends one generator per configured [`TargetSpec`]; each
//! generator renders a live request for exactly its own target.

use std::{collections::HashMap, fmt, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use url::Url;

use crate::{
    har::{param_value, ParamMap},
    snippets::generate,
    target::TargetSpec,
    Error,
};

/// Text returned in place of a snippet whose generation failed.
pub const SNIPPET_ERROR: &str = "snippet generation error. see console";

/// Read-only view of a request as the host exposes it.
///
/// Fields read by the generators are `method`, `url`, `headers` (an object
/// of header names to values) and `body`.
pub trait RequestSource {
    fn get(&self, field: &str) -> Option<JsonValue>;
}

/// Plain request record for hosts without a request object of their own.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RequestRecord {
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub headers: Option<ParamMap>,
    #[serde(default)]
    pub body: Option<String>,
}

impl RequestSource for RequestRecord {
    fn get(&self, field: &str) -> Option<JsonValue> {
        match field {
            "method" => Some(JsonValue::String(self.method.clone())),
            "url" => Some(JsonValue::String(self.url.clone())),
            "headers" => self.headers.clone().map(JsonValue::Object),
            "body" => self.body.clone().map(JsonValue::String),
            _ => None,
        }
    }
}

impl RequestSource for JsonValue {
    fn get(&self, field: &str) -> Option<JsonValue> {
        self.as_object().and_then(|object| object.get(field)).cloned()
    }
}

/// Per-request snippet generator.
pub type GeneratorFn = Arc<dyn Fn(&dyn RequestSource) -> String + Send + Sync>;

/// Display settings and generator for one target.
#[derive(Clone)]
pub struct GeneratorConfig {
    pub title: String,
    pub syntax: String,
    generate: GeneratorFn,
}

impl GeneratorConfig {
    pub fn new<F>(title: impl Into<String>, syntax: impl Into<String>, generate: F) -> Self
    where
        F: Fn(&dyn RequestSource) -> String + Send + Sync + 'static,
    {
        Self {
            title: title.into(),
            syntax: syntax.into(),
            generate: Arc::new(generate),
        }
    }

    /// Render the snippet for a live request
    pub fn call(&self, request: &dyn RequestSource) -> String {
        (self.generate)(request)
    }
}

impl fmt::Debug for GeneratorConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratorConfig")
            .field("title", &self.title)
            .field("syntax", &self.syntax)
            .finish_non_exhaustive()
    }
}

/// Append-only ordered collection of generators.
///
/// Entries keep insertion order. Keys are not deduplicated; lookups by key
/// return the most recently appended entry for that key.
#[derive(Debug, Clone, Default)]
pub struct GeneratorMap {
    entries: Vec<(String, GeneratorConfig)>,
    index: HashMap<String, usize>,
}

impl GeneratorMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, key: impl Into<String>, config: GeneratorConfig) {
        let key = key.into();
        self.index.insert(key.clone(), self.entries.len());
        self.entries.push((key, config));
    }

    pub fn get(&self, key: &str) -> Option<&GeneratorConfig> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn first_key(&self) -> Option<&str> {
        self.entries.first().map(|(key, _)| key.as_str())
    }

    pub fn last_key(&self) -> Option<&str> {
        self.entries.last().map(|(key, _)| key.as_str())
    }

    pub fn entries(&self) -> &[(String, GeneratorConfig)] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, GeneratorConfig)> for GeneratorMap {
    fn from_iter<I: IntoIterator<Item = (String, GeneratorConfig)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, config) in iter {
            map.push(key, config);
        }
        map
    }
}

/// Copy `base` and append one generator per target spec.
pub fn extend(base: &GeneratorMap, specs: &[TargetSpec]) -> GeneratorMap {
    let mut generators = base.clone();
    for spec in specs {
        generators.push(spec.target.clone(), snippet_generator(spec));
    }
    generators
}

/// Generator for a single target. Failures are logged and replaced by
/// [`SNIPPET_ERROR`] so one broken target leaves the others intact.
pub fn snippet_generator(spec: &TargetSpec) -> GeneratorConfig {
    let target = spec.target.clone();
    GeneratorConfig::new(
        spec.title.clone(),
        spec.syntax.clone(),
        move |request: &dyn RequestSource| match render_snippet(&target, request) {
            Ok(content) => content,
            Err(e) => {
                log::error!("Snippet generation for {} failed: {}", target, e);
                SNIPPET_ERROR.to_string()
            }
        },
    )
}

fn render_snippet(target: &str, request: &dyn RequestSource) -> crate::Result<String> {
    let method = text_field(request, "method");
    let url = Url::parse(&text_field(request, "url"))?;
    let query_params: ParamMap = url
        .query_pairs()
        .map(|(name, value)| (name.into_owned(), JsonValue::String(value.into_owned())))
        .collect();
    let headers = match request.get("headers") {
        Some(JsonValue::Object(headers)) => headers,
        _ => ParamMap::new(),
    };
    let body = text_field(request, "body");

    let bundle = generate(
        url.as_str(),
        &method,
        &[target],
        Some(&query_params),
        Some(&headers),
        Some(&body),
    )?;
    bundle
        .snippets
        .into_iter()
        .next()
        .map(|snippet| snippet.content)
        .ok_or_else(|| Error::invalid_target(target))
}

fn text_field(request: &dyn RequestSource, field: &str) -> String {
    match request.get(field) {
        None | Some(JsonValue::Null) => String::new(),
        Some(value) => param_value(&value),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn spec(target: &str) -> TargetSpec {
        TargetSpec::normalize(&json!({ "target": target })).unwrap()
    }

    fn fixed(text: &'static str) -> GeneratorConfig {
        GeneratorConfig::new("Fixed", "bash", move |_: &dyn RequestSource| text.to_string())
    }

    fn get_request() -> RequestRecord {
        RequestRecord {
            method: "get".into(),
            url: "http://api.test/items?x=1".into(),
            headers: None,
            body: None,
        }
    }

    #[test]
    fn test_extend_keeps_base_order_then_appends() {
        let base: GeneratorMap = vec![
            ("curl_bash".to_string(), fixed("curl")),
            ("curl_cmd".to_string(), fixed("curl.exe")),
        ]
        .into_iter()
        .collect();

        let extended = extend(&base, &[spec("node_axios"), spec("python")]);
        let keys: Vec<&str> = extended.keys().collect();
        assert_eq!(keys, vec!["curl_bash", "curl_cmd", "node_axios", "python"]);
        assert_eq!(extended.first_key(), Some("curl_bash"));
        assert_eq!(extended.last_key(), Some("python"));
        assert_eq!(base.len(), 2);

        let node = extended.get("node_axios").unwrap();
        assert_eq!(node.title, "node (axios)");
        assert_eq!(node.syntax, "javascript");
    }

    #[test]
    fn test_duplicate_keys_are_appended() {
        let base: GeneratorMap = vec![("shell_curl".to_string(), fixed("base"))]
            .into_iter()
            .collect();
        let extended = extend(&base, &[spec("shell_curl")]);
        assert_eq!(extended.len(), 2);
        assert_eq!(extended.entries()[0].1.call(&get_request()), "base");
        let latest = extended.get("shell_curl").unwrap().call(&get_request());
        assert!(latest.starts_with("curl --request GET"));
    }

    #[test]
    fn test_generator_renders_live_request() {
        let extended = extend(&GeneratorMap::new(), &[spec("node_axios")]);
        let content = extended.get("node_axios").unwrap().call(&get_request());
        assert!(content.contains("method: \"GET\""));
        assert!(content.contains("\"x\": \"1\""));
    }

    #[test]
    fn test_failing_target_is_isolated() {
        let extended = extend(&GeneratorMap::new(), &[spec("foo_bar"), spec("node_axios")]);
        let request = get_request();

        let broken = extended.get("foo_bar").unwrap().call(&request);
        assert_eq!(broken, SNIPPET_ERROR);

        let working = extended.get("node_axios").unwrap().call(&request);
        assert_ne!(working, SNIPPET_ERROR);
        assert!(working.contains("axios"));
    }

    #[test]
    fn test_malformed_url_yields_sentinel() {
        let generator = snippet_generator(&spec("shell_curl"));
        let request = RequestRecord {
            url: "not a url".into(),
            ..get_request()
        };
        assert_eq!(generator.call(&request), SNIPPET_ERROR);
    }

    #[test]
    fn test_json_request_object() {
        let generator = snippet_generator(&spec("shell_curl"));
        let request = json!({
            "method": "post",
            "url": "http://api.test/items",
            "headers": {"Content-Type": "application/json"},
            "body": "{\"a\":1}"
        });
        let content = generator.call(&request);
        assert!(content.contains("--request POST"));
        assert!(content.contains("--header 'Content-Type: application/json'"));
        assert!(content.contains("--data '{\"a\":1}'"));
    }

    #[test]
    fn test_request_record_fields() {
        let record = RequestRecord {
            headers: Some(json!({"a": "b"}).as_object().cloned().unwrap()),
            ..get_request()
        };
        assert_eq!(record.get("method"), Some(json!("get")));
        assert_eq!(record.get("headers"), Some(json!({"a": "b"})));
        assert_eq!(record.get("body"), None);
        assert_eq!(record.get("other"), None);
    }
}
