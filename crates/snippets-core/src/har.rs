//! HAR request records.
//!
//! The snippet converters consume requests shaped like the `request` object of
//! a HAR 1.2 entry. [`build`] assembles such records from loose request parts,
//! and [`HarContext`] reads recorded traffic from a HAR file so it can be fed
//! back through the same path.

use serde::{Deserialize, Serialize};
use serde_json::{Map as JsonMap, Value as JsonValue};
use std::path::Path;
use tokio::fs;
use url::Url;

use crate::Error;

/// Insertion-ordered key/value mapping used for headers and query parameters.
pub type ParamMap = JsonMap<String, JsonValue>;

/// MIME type assumed for a body sent without a `content-type` header.
pub const DEFAULT_BODY_MIME_TYPE: &str = "application/octet-stream";

/// A `{ name, value }` pair as used by HAR headers, query strings and cookies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HarParam {
    pub name: String,
    pub value: String,
}

/// Request body description.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostData {
    pub mime_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Canonical request record handed to the code generators.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalRequest {
    pub method: String,
    pub url: String,
    pub headers: Vec<HarParam>,
    pub query_string: Vec<HarParam>,
    pub cookies: Vec<HarParam>,
    pub http_version: String,
    pub headers_size: i64,
    pub body_size: i64,
    pub post_data: PostData,
}

impl CanonicalRequest {
    /// Whether the request carries a body
    pub fn has_body(&self) -> bool {
        self.post_data.text.is_some()
    }
}

/// Build the canonical request records for one set of request parts.
///
/// The result currently always holds exactly one record.
pub fn build(
    url: &str,
    method: &str,
    query_params: Option<&ParamMap>,
    headers: Option<&ParamMap>,
    body: Option<&str>,
) -> Vec<CanonicalRequest> {
    let headers = headers.map(to_har_params).unwrap_or_default();
    let query_string = query_params.map(to_har_params).unwrap_or_default();
    let body = body.unwrap_or_default();

    let post_data = if body.is_empty() {
        PostData::default()
    } else {
        let mime_type = headers
            .iter()
            .find(|header| header.name.eq_ignore_ascii_case("content-type"))
            .map(|header| header.value.clone())
            .unwrap_or_else(|| DEFAULT_BODY_MIME_TYPE.to_string());
        PostData {
            mime_type,
            text: Some(body.to_string()),
        }
    };

    vec![CanonicalRequest {
        method: method.to_uppercase(),
        url: url.to_string(),
        headers,
        query_string,
        cookies: Vec::new(),
        http_version: "HTTP/1.1".to_string(),
        headers_size: 0,
        body_size: 0,
        post_data,
    }]
}

fn to_har_params(map: &ParamMap) -> Vec<HarParam> {
    map.iter()
        .map(|(name, value)| HarParam {
            name: name.clone(),
            value: param_value(value),
        })
        .collect()
}

/// Render a mapping value as text; strings are taken verbatim.
pub(crate) fn param_value(value: &JsonValue) -> String {
    match value {
        JsonValue::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Top level structure for a HAR file.
#[derive(Debug, Deserialize)]
struct HarFile {
    log: HarLog,
}

#[derive(Debug, Deserialize)]
struct HarLog {
    entries: Vec<HarEntry>,
}

#[derive(Debug, Deserialize)]
struct HarEntry {
    request: HarRequest,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct HarRequest {
    method: String,
    url: String,
    #[serde(default)]
    headers: Vec<HarParam>,
    #[serde(default)]
    query_string: Vec<HarParam>,
    #[serde(default)]
    post_data: Option<PostData>,
}

/// Request parts recovered from a HAR entry, ready for snippet generation.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub method: String,
    pub url: String,
    pub query_params: ParamMap,
    pub headers: ParamMap,
    pub body: String,
}

/// Parsed representation of a HAR file.
pub struct HarContext {
    entries: Vec<HarEntry>,
}

impl HarContext {
    /// Load a HAR file from disk.
    pub async fn from_file<P: AsRef<Path>>(path: P) -> crate::Result<Self> {
        let content = fs::read_to_string(&path).await?;
        let har: HarFile = serde_json::from_str(&content).map_err(|e| {
            Error::config(format!(
                "Failed to parse HAR {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;
        Ok(Self {
            entries: har.log.entries,
        })
    }

    /// Number of recorded entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the HAR holds no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Return the recorded requests whose URL is absolute and well formed.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        let mut requests = Vec::new();
        for entry in &self.entries {
            let request = &entry.request;
            if let Err(e) = Url::parse(&request.url) {
                log::warn!("Skipping HAR entry with invalid URL {}: {}", request.url, e);
                continue;
            }
            requests.push(RecordedRequest {
                method: request.method.to_uppercase(),
                url: request.url.clone(),
                query_params: to_param_map(&request.query_string),
                headers: to_param_map(&request.headers),
                body: request
                    .post_data
                    .as_ref()
                    .and_then(|data| data.text.clone())
                    .unwrap_or_default(),
            });
        }
        requests
    }
}

fn to_param_map(params: &[HarParam]) -> ParamMap {
    params
        .iter()
        .map(|p| (p.name.clone(), JsonValue::String(p.value.clone())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::path::PathBuf;

    fn params(value: JsonValue) -> ParamMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_build_without_body() {
        let hars = build("http://h/items", "get", Some(&ParamMap::new()), None, Some(""));
        assert_eq!(hars.len(), 1);
        let har = &hars[0];
        assert_eq!(har.method, "GET");
        assert_eq!(har.http_version, "HTTP/1.1");
        assert_eq!(har.post_data.mime_type, "");
        assert_eq!(har.post_data.text, None);
        assert!(har.cookies.is_empty());
        assert!(!har.has_body());
    }

    #[test]
    fn test_build_with_json_body() {
        let headers = params(json!({"content-type": "application/json"}));
        let hars = build("http://h/items", "post", None, Some(&headers), Some("{\"a\":1}"));
        let har = &hars[0];
        assert_eq!(har.method, "POST");
        assert_eq!(har.post_data.mime_type, "application/json");
        assert_eq!(har.post_data.text.as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_content_type_match_ignores_case() {
        let headers = params(json!({"Content-Type": "text/plain", "X-Id": 7}));
        let har = build("http://h/", "put", None, Some(&headers), Some("hi")).remove(0);
        assert_eq!(har.post_data.mime_type, "text/plain");
        assert_eq!(
            har.headers,
            vec![
                HarParam { name: "Content-Type".into(), value: "text/plain".into() },
                HarParam { name: "X-Id".into(), value: "7".into() },
            ]
        );
    }

    #[test]
    fn test_body_without_content_type_defaults() {
        let har = build("http://h/", "post", None, None, Some("raw")).remove(0);
        assert_eq!(har.post_data.mime_type, DEFAULT_BODY_MIME_TYPE);
    }

    #[test]
    fn test_serializes_har_field_names() -> crate::Result<()> {
        let query = params(json!({"x": "1"}));
        let har = build("http://h/?x=1", "get", Some(&query), None, None).remove(0);
        let value = serde_json::to_value(&har)?;
        assert_eq!(value["httpVersion"], "HTTP/1.1");
        assert_eq!(value["queryString"], json!([{"name": "x", "value": "1"}]));
        assert_eq!(value["postData"], json!({"mimeType": ""}));
        Ok(())
    }

    #[tokio::test]
    async fn test_recorded_requests() -> crate::Result<()> {
        let manifest = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
        let har_path = manifest.join("tests/fixtures/har/sample.har");
        let ctx = HarContext::from_file(&har_path).await?;
        assert_eq!(ctx.len(), 3);

        let requests = ctx.requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].query_params, params(json!({"limit": "10"})));
        assert_eq!(requests[1].method, "POST");
        assert_eq!(requests[1].body, "{\"name\":\"widget\"}");
        assert_eq!(
            requests[1].headers.get("Content-Type"),
            Some(&json!("application/json"))
        );
        Ok(())
    }
}
