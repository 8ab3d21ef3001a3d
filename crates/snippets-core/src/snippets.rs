//! Snippet generation for a request across many targets.
//!
//! # Examples
//!
//! ```
//! use snippets_core::snippets::generate;
//!
//! let bundle = generate(
//!     "http://api.test/items",
//!     "get",
//!     &["shell_curl"],
//!     None,
//!     None,
//!     None,
//! )?;
//! assert_eq!(bundle.resource.as_deref(), Some("items"));
//! assert!(bundle.snippets[0].content.starts_with("curl"));
//! # Ok::<(), snippets_core::Error>(())
//! ```

use serde::Serialize;

use crate::{
    convert::HttpSnippet,
    har::{self, ParamMap},
    resolve::resolve_or_err,
};

/// One rendered snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snippet {
    /// Target identifier as requested
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    pub title: String,
    pub content: String,
}

/// Snippets for every requested target plus request metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SnippetBundle {
    pub method: String,
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    pub snippets: Vec<Snippet>,
}

/// Render a request for each target, in target order.
///
/// Fails on the first target that does not resolve against the catalog.
pub fn generate<T: AsRef<str>>(
    url: &str,
    method: &str,
    targets: &[T],
    query_params: Option<&ParamMap>,
    headers: Option<&ParamMap>,
    body: Option<&str>,
) -> crate::Result<SnippetBundle> {
    let hars = har::build(url, method, query_params, headers, body);

    let mut snippets = Vec::new();
    for har in &hars {
        let converter = HttpSnippet::new(har)?;
        let mime_type = Some(har.post_data.mime_type.clone()).filter(|m| !m.is_empty());
        for id in targets {
            let id = id.as_ref();
            let target = resolve_or_err(id)?;
            snippets.push(Snippet {
                id: id.to_string(),
                mime_type: mime_type.clone(),
                title: target.title,
                content: converter.convert(&target.language, target.library.as_deref())?,
            });
        }
    }

    // every record shares the method and url of the first
    let first = &hars[0];
    Ok(SnippetBundle {
        method: first.method.clone(),
        url: first.url.clone(),
        description: None,
        resource: get_resource_name(&first.url),
        snippets,
    })
}

/// Name of the resource a URL addresses: `../users/{userId}` gives `users`.
///
/// Scans path segments from the end, skipping empty segments and path
/// parameter placeholders. Query string and fragment are ignored.
pub fn get_resource_name(url: &str) -> Option<String> {
    let path = url.split(|c: char| c == '?' || c == '#').next().unwrap_or_default();
    path.rsplit('/')
        .find(|segment| !segment.is_empty() && !segment.starts_with('{'))
        .map(String::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;
    use serde_json::json;

    fn params(value: serde_json::Value) -> ParamMap {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_resource_name() {
        assert_eq!(get_resource_name("http://h/users/{userId}").as_deref(), Some("users"));
        assert_eq!(get_resource_name("http://h/a/b/").as_deref(), Some("b"));
        assert_eq!(get_resource_name("http://h/items?x=1").as_deref(), Some("items"));
        assert_eq!(get_resource_name("{a}/{b}"), None);
    }

    #[test]
    fn test_generate_single_target() -> crate::Result<()> {
        let bundle = generate(
            "http://api.test/items?x=1",
            "GET",
            &["node_axios"],
            Some(&params(json!({"x": "1"}))),
            Some(&ParamMap::new()),
            Some(""),
        )?;
        assert_eq!(bundle.method, "GET");
        assert_eq!(bundle.url, "http://api.test/items?x=1");
        assert_eq!(bundle.resource.as_deref(), Some("items"));
        assert_eq!(bundle.description, None);
        assert_eq!(bundle.snippets.len(), 1);

        let snippet = &bundle.snippets[0];
        assert_eq!(snippet.id, "node_axios");
        assert_eq!(snippet.title, "Node + Axios");
        assert_eq!(snippet.mime_type, None);
        assert!(snippet.content.contains("require(\"axios\")"));
        assert!(snippet.content.contains("\"x\": \"1\""));
        Ok(())
    }

    #[test]
    fn test_generate_preserves_target_order() -> crate::Result<()> {
        let targets = ["shell_curl", "python", "go_native"];
        let bundle = generate("http://api.test/", "delete", &targets, None, None, None)?;
        let ids: Vec<&str> = bundle.snippets.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, targets);
        Ok(())
    }

    #[test]
    fn test_mime_type_attached_only_with_body() -> crate::Result<()> {
        let headers = params(json!({"Content-Type": "application/json"}));
        let bundle = generate(
            "http://api.test/items",
            "post",
            &["python_requests"],
            None,
            Some(&headers),
            Some("{\"a\":1}"),
        )?;
        let snippet = &bundle.snippets[0];
        assert_eq!(snippet.mime_type.as_deref(), Some("application/json"));
        assert!(snippet.content.contains("data=payload"));
        Ok(())
    }

    #[test]
    fn test_invalid_target_fails_whole_call() {
        let err = generate("http://api.test/", "get", &["shell_curl", "bogus_lang"], None, None, None)
            .unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(ref t) if t == "bogus_lang"));
    }

    #[test]
    fn test_bundle_serialization() -> crate::Result<()> {
        let bundle = generate("http://api.test/a", "put", &["shell"], None, None, Some("x"))?;
        let value = serde_json::to_value(&bundle)?;
        assert_eq!(value["resource"], "a");
        assert_eq!(value["snippets"][0]["mimeType"], "application/octet-stream");
        assert!(value.get("description").is_none());
        Ok(())
    }
}
