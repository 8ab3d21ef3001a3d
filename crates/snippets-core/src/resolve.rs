//! Resolution of compact target identifiers against the catalog.

use serde::Serialize;

use crate::{catalog, Error};

/// A target identifier checked against the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedTarget {
    pub title: String,
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub library: Option<String>,
}

/// Resolve `language` or `language_library`.
///
/// A missing library is replaced by the language's default client. Returns
/// `None` when the language, or the named library, is not in the catalog.
/// `node_` names the empty library and never resolves.
pub fn resolve(identifier: &str) -> Option<ResolvedTarget> {
    let (language, library) = match identifier.split_once('_') {
        Some((language, library)) => (language, Some(library)),
        None => (identifier, None),
    };
    let target = catalog::find_target(language)?;
    let library = match library {
        Some(library) => target.client(library)?.key,
        None => target.default,
    };

    Some(ResolvedTarget {
        title: format!("{} + {}", capitalize(language), capitalize(library)),
        language: language.to_string(),
        library: Some(library.to_string()),
    })
}

/// Resolve an identifier, failing with [`Error::InvalidTarget`].
pub fn resolve_or_err(identifier: &str) -> crate::Result<ResolvedTarget> {
    resolve(identifier).ok_or_else(|| Error::invalid_target(identifier))
}

/// Upper-case the first character and keep the rest unchanged.
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        None => String::new(),
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_library() {
        let resolved = resolve("node_axios").unwrap();
        assert_eq!(resolved.language, "node");
        assert_eq!(resolved.library.as_deref(), Some("axios"));
        assert_eq!(resolved.title, "Node + Axios");
    }

    #[test]
    fn test_default_library() {
        let resolved = resolve("python").unwrap();
        assert_eq!(resolved.library.as_deref(), Some("python3"));
        assert_eq!(resolved.title, "Python + Python3");
    }

    #[test]
    fn test_library_with_underscore() {
        let resolved = resolve("clojure_clj_http").unwrap();
        assert_eq!(resolved.library.as_deref(), Some("clj_http"));
        assert_eq!(resolved.title, "Clojure + Clj_http");
    }

    #[test]
    fn test_unknown_targets() {
        assert_eq!(resolve("bogus_lang"), None);
        assert_eq!(resolve("bogus"), None);
        assert_eq!(resolve("node_guzzle"), None);
        assert_eq!(resolve("node_"), None);
    }

    #[test]
    fn test_resolve_or_err_names_identifier() {
        let err = resolve_or_err("bogus_lang").unwrap_err();
        assert!(matches!(err, Error::InvalidTarget(ref t) if t == "bogus_lang"));
        assert_eq!(err.to_string(), "Invalid target: bogus_lang");
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("shell"), "Shell");
        assert_eq!(capitalize("http1.1"), "Http1.1");
        assert_eq!(capitalize(""), "");
    }
}
