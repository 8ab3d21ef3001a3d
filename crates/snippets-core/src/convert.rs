//! Rendering of canonical requests into client code.
//!
//! [`HttpSnippet`] prepares a render context from a [`CanonicalRequest`] once
//! and then renders it through the template of any catalog client.

use std::collections::HashMap;
use std::error::Error as _;

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::Value as JsonValue;
use tera::{Context, Tera};
use url::Url;

use crate::{
    catalog::{self, available_targets},
    har::{CanonicalRequest, HarParam},
    Error,
};

/// Compiled templates for every catalog client, built on first use.
static TEMPLATES: Lazy<std::result::Result<Tera, String>> = Lazy::new(|| {
    let mut tera = Tera::default();
    tera.autoescape_on(Vec::new());
    tera.register_filter("shell_quote", shell_quote);
    tera.register_filter("shell_word", shell_word);
    tera.register_filter("ps_quote", ps_quote);
    tera.register_filter("php_quote", single_quote);
    tera.register_filter("ruby_quote", single_quote);
    tera.register_filter("kotlin_quote", kotlin_quote);
    tera.register_filter("rust_quote", braced_unicode_quote);
    tera.register_filter("swift_quote", braced_unicode_quote);
    tera.register_filter("ruby_request_class", ruby_request_class);

    let sources = available_targets().iter().flat_map(|target| {
        target
            .clients
            .iter()
            .map(move |client| (catalog::template_name(target.key, client.key), client.template))
    });
    tera.add_raw_templates(sources).map_err(|e| describe(&e))?;
    log::debug!("Compiled snippet templates");
    Ok(tera)
});

/// Values exposed to the client templates.
#[derive(Debug, Clone, Serialize)]
struct RenderContext {
    method: String,
    http_version: String,
    /// URL without query string
    url: String,
    /// URL including the merged query string
    full_url: String,
    scheme: String,
    hostname: String,
    /// Hostname with an explicit non-default port
    host: String,
    port: u16,
    path_query: String,
    query: Vec<HarParam>,
    headers: Vec<HarParam>,
    has_query: bool,
    has_headers: bool,
    has_body: bool,
    body: String,
    body_length: usize,
    mime_type: String,
}

/// A request prepared for conversion into any supported target.
#[derive(Debug, Clone)]
pub struct HttpSnippet {
    context: RenderContext,
}

impl HttpSnippet {
    /// Prepare a converter for one canonical request.
    pub fn new(request: &CanonicalRequest) -> crate::Result<Self> {
        let mut parsed = Url::parse(&request.url)?;
        parsed.set_fragment(None);

        let query = merge_query(&parsed, &request.query_string);
        if query.is_empty() {
            parsed.set_query(None);
        } else {
            parsed
                .query_pairs_mut()
                .clear()
                .extend_pairs(query.iter().map(|p| (p.name.as_str(), p.value.as_str())));
        }
        let full_url = parsed.to_string();

        let path_query = match parsed.query() {
            Some(q) => format!("{}?{}", parsed.path(), q),
            None => parsed.path().to_string(),
        };
        let hostname = parsed.host_str().unwrap_or_default().to_string();
        let host = match parsed.port() {
            Some(port) => format!("{}:{}", hostname, port),
            None => hostname.clone(),
        };
        let port = parsed.port_or_known_default().unwrap_or(80);

        let mut base = parsed.clone();
        base.set_query(None);

        let mut headers = request.headers.clone();
        let has_body = request.has_body();
        let has_content_type = headers
            .iter()
            .any(|h| h.name.eq_ignore_ascii_case("content-type"));
        if has_body && !has_content_type && !request.post_data.mime_type.is_empty() {
            headers.push(HarParam {
                name: "content-type".to_string(),
                value: request.post_data.mime_type.clone(),
            });
        }

        let body = request.post_data.text.clone().unwrap_or_default();
        Ok(Self {
            context: RenderContext {
                method: request.method.clone(),
                http_version: request.http_version.clone(),
                url: base.to_string(),
                full_url,
                scheme: parsed.scheme().to_string(),
                hostname,
                host,
                port,
                path_query,
                has_query: !query.is_empty(),
                query,
                has_headers: !headers.is_empty(),
                headers,
                has_body,
                body_length: body.len(),
                body,
                mime_type: request.post_data.mime_type.clone(),
            },
        })
    }

    /// Render the request for a language and client.
    ///
    /// With no library the language's default client is used.
    pub fn convert(&self, language: &str, library: Option<&str>) -> crate::Result<String> {
        let target = catalog::find_target(language).ok_or_else(|| Error::invalid_target(language))?;
        let client = match library {
            Some(library) => target.client(library),
            None => target.default_client(),
        }
        .ok_or_else(|| {
            Error::invalid_target(format!("{}_{}", language, library.unwrap_or(target.default)))
        })?;

        let tera = TEMPLATES.as_ref().map_err(|e| Error::template(e.clone()))?;
        let name = catalog::template_name(target.key, client.key);
        log::debug!("Rendering {} {} as {}", self.context.method, self.context.full_url, name);
        let rendered = tera.render(&name, &Context::from_serialize(&self.context)?)?;
        Ok(rendered)
    }
}

/// Query pairs from the URL, with each `query_string` entry replacing the
/// URL pairs that share its name.
fn merge_query(url: &Url, query_string: &[HarParam]) -> Vec<HarParam> {
    let mut merged: Vec<HarParam> = url
        .query_pairs()
        .map(|(name, value)| HarParam {
            name: name.into_owned(),
            value: value.into_owned(),
        })
        .collect();

    for param in query_string {
        match merged.iter().position(|p| p.name == param.name) {
            Some(first) => {
                merged[first].value = param.value.clone();
                let mut index = 0;
                merged.retain(|p| {
                    let keep = index <= first || p.name != param.name;
                    index += 1;
                    keep
                });
            }
            None => merged.push(param.clone()),
        }
    }
    merged
}

/// Net::HTTP request classes by method; others use `Net::HTTPGenericRequest`.
const RUBY_REQUEST_CLASSES: &[(&str, &str)] = &[
    ("GET", "Get"),
    ("POST", "Post"),
    ("PUT", "Put"),
    ("PATCH", "Patch"),
    ("DELETE", "Delete"),
    ("HEAD", "Head"),
    ("OPTIONS", "Options"),
    ("TRACE", "Trace"),
    ("COPY", "Copy"),
    ("LOCK", "Lock"),
    ("UNLOCK", "Unlock"),
    ("MKCOL", "Mkcol"),
    ("MOVE", "Move"),
    ("PROPFIND", "Propfind"),
    ("PROPPATCH", "Proppatch"),
];

fn filter_text<'a>(value: &'a JsonValue, filter: &str) -> tera::Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| tera::Error::msg(format!("{} expects a string", filter)))
}

/// POSIX shell single quotes.
fn shell_quote(value: &JsonValue, _: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = filter_text(value, "shell_quote")?;
    Ok(JsonValue::String(format!("'{}'", text.replace('\'', "'\\''"))))
}

/// A shell word, quoted only when it holds more than `[A-Za-z0-9._-]`.
fn shell_word(value: &JsonValue, args: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = filter_text(value, "shell_word")?;
    let bare = !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
    if bare {
        Ok(JsonValue::String(text.to_string()))
    } else {
        shell_quote(value, args)
    }
}

/// PowerShell verbatim string; no `$` expansion.
fn ps_quote(value: &JsonValue, _: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = filter_text(value, "ps_quote")?;
    Ok(JsonValue::String(format!("'{}'", text.replace('\'', "''"))))
}

/// Single-quoted PHP or Ruby literal, where only `\\` and `\'` are escapes.
fn single_quote(value: &JsonValue, _: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = filter_text(value, "single_quote")?;
    let escaped = text.replace('\\', "\\\\").replace('\'', "\\'");
    Ok(JsonValue::String(format!("'{}'", escaped)))
}

/// Kotlin string literal with `$` escaped against templating.
fn kotlin_quote(value: &JsonValue, _: &HashMap<String, JsonValue>) -> tera::Result<JsonValue> {
    let text = filter_text(value, "kotlin_quote")?;
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '$' => quoted.push_str("\\$"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{:04x}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Ok(JsonValue::String(quoted))
}

/// Rust or Swift string literal; control characters use `\u{..}`.
fn braced_unicode_quote(
    value: &JsonValue,
    _: &HashMap<String, JsonValue>,
) -> tera::Result<JsonValue> {
    let text = filter_text(value, "braced_unicode_quote")?;
    let mut quoted = String::with_capacity(text.len() + 2);
    quoted.push('"');
    for c in text.chars() {
        match c {
            '"' => quoted.push_str("\\\""),
            '\\' => quoted.push_str("\\\\"),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            c if c.is_control() => quoted.push_str(&format!("\\u{{{:x}}}", c as u32)),
            c => quoted.push(c),
        }
    }
    quoted.push('"');
    Ok(JsonValue::String(quoted))
}

/// `Net::HTTP::Get` style class for a method, or `""` when Ruby has none.
fn ruby_request_class(
    value: &JsonValue,
    _: &HashMap<String, JsonValue>,
) -> tera::Result<JsonValue> {
    let method = filter_text(value, "ruby_request_class")?;
    let class = RUBY_REQUEST_CLASSES
        .iter()
        .find(|(name, _)| *name == method)
        .map(|(_, class)| format!("Net::HTTP::{}", class))
        .unwrap_or_default();
    Ok(JsonValue::String(class))
}

/// Flatten a tera error and its sources into one line.
fn describe(error: &tera::Error) -> String {
    let mut message = error.to_string();
    let mut source = error.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
