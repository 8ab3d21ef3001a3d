//! Host plugin assembly.
//!
//! [`SnippetGenerator`] validates the configured targets up front and hands
//! out the two plugins a documentation host installs:
//!
//! - [`RequestSnippetGeneratorPlugin`] extends the host's generator map;
//! - [`RequestSnippetStylingPlugin`] registers highlighting syntaxes and
//!   adjusts the snippet panel layout.

use std::{collections::BTreeMap, sync::Arc};

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::{
    config::Config,
    registry::{self, GeneratorMap},
    syntax::{Highlighter, SyntaxRegistry},
    target::TargetSpec,
};

/// Class marking the snippet panel's tab buttons.
pub const BUTTON_CLASS: &str = "btn";

/// Style applied to the element holding the tab buttons.
pub const BUTTON_CONTAINER_STYLE: &[(&str, &str)] = &[
    ("paddingLeft", "15px"),
    ("paddingRight", "15px"),
    ("paddingTop", "5px"),
    ("overflow", "auto"),
];

/// Validated target list shared by the plugins.
#[derive(Debug, Clone)]
pub struct SnippetGenerator {
    targets: Arc<[TargetSpec]>,
}

impl SnippetGenerator {
    /// Normalize every raw target. The first invalid target aborts assembly.
    pub fn new<'a, I>(raw_targets: I) -> crate::Result<Self>
    where
        I: IntoIterator<Item = &'a JsonValue>,
    {
        let targets = raw_targets
            .into_iter()
            .map(TargetSpec::normalize)
            .collect::<crate::Result<Vec<_>>>()?;
        Ok(Self {
            targets: targets.into(),
        })
    }

    /// Build from the targets listed in a configuration file
    pub fn from_config(config: &Config) -> crate::Result<Self> {
        Self::new(&config.targets)
    }

    pub fn targets(&self) -> &[TargetSpec] {
        &self.targets
    }

    /// The plugin pair to install into the host
    pub fn plugins(&self) -> Plugins {
        Plugins {
            generator: RequestSnippetGeneratorPlugin {
                targets: Arc::clone(&self.targets),
            },
            styling: RequestSnippetStylingPlugin {
                targets: Arc::clone(&self.targets),
            },
        }
    }
}

/// Plugins produced by [`SnippetGenerator::plugins`].
#[derive(Debug, Clone)]
pub struct Plugins {
    pub generator: RequestSnippetGeneratorPlugin,
    pub styling: RequestSnippetStylingPlugin,
}

/// Wraps the host's snippet generator lookup.
#[derive(Debug, Clone)]
pub struct RequestSnippetGeneratorPlugin {
    targets: Arc<[TargetSpec]>,
}

impl RequestSnippetGeneratorPlugin {
    /// The host's generators followed by one generator per target.
    pub fn get_snippet_generators(&self, base: &GeneratorMap) -> GeneratorMap {
        registry::extend(base, &self.targets)
    }
}

/// Highlighting and layout adjustments for the snippet panel.
#[derive(Debug, Clone)]
pub struct RequestSnippetStylingPlugin {
    targets: Arc<[TargetSpec]>,
}

impl RequestSnippetStylingPlugin {
    /// Register the default syntaxes and each target's syntax.
    pub fn after_load<H: Highlighter>(&self, registry: &mut SyntaxRegistry<H>) {
        registry.load(self.targets.iter().map(|target| target.syntax.as_str()));
    }

    /// Give the tab button container room to scroll.
    ///
    /// Returns `false` when the tree has no button container.
    pub fn style_request_snippets(&self, root: &mut ElementNode) -> bool {
        let Some(container) = root.find_container_mut(&|node| node.has_class(BUTTON_CLASS)) else {
            return false;
        };
        for (name, value) in BUTTON_CONTAINER_STYLE {
            container.style.insert(name.to_string(), value.to_string());
        }
        true
    }
}

/// Minimal rendered element: classes, inline style and children.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementNode {
    #[serde(default)]
    pub class_name: Option<String>,
    #[serde(default)]
    pub style: BTreeMap<String, String>,
    #[serde(default)]
    pub children: Vec<ElementNode>,
}

enum Search {
    Missing,
    Match,
    /// Child indices from the searched node down to the container
    Container(Vec<usize>),
}

impl ElementNode {
    pub fn new(class_name: Option<&str>, children: Vec<ElementNode>) -> Self {
        Self {
            class_name: class_name.map(String::from),
            style: BTreeMap::new(),
            children,
        }
    }

    /// Whether the space separated class list contains `class`
    pub fn has_class(&self, class: &str) -> bool {
        self.class_name
            .as_deref()
            .is_some_and(|names| names.split(' ').any(|name| name == class))
    }

    /// Depth-first search for the element that directly holds a matching
    /// child. A container found deeper in an earlier subtree wins over a
    /// match among the current node's own children.
    pub fn find_container_mut(
        &mut self,
        matches: &dyn Fn(&ElementNode) -> bool,
    ) -> Option<&mut ElementNode> {
        let path = match self.search(matches) {
            Search::Container(path) => path,
            Search::Missing | Search::Match => return None,
        };
        let mut node = self;
        for index in path {
            node = &mut node.children[index];
        }
        Some(node)
    }

    fn search(&self, matches: &dyn Fn(&ElementNode) -> bool) -> Search {
        if matches(self) {
            return Search::Match;
        }
        let mut is_container = false;
        for (index, child) in self.children.iter().enumerate() {
            match child.search(matches) {
                Search::Container(mut path) => {
                    path.insert(0, index);
                    return Search::Container(path);
                }
                Search::Match => is_container = true,
                Search::Missing => {}
            }
        }
        if is_container {
            Search::Container(Vec::new())
        } else {
            Search::Missing
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{registry::SNIPPET_ERROR, syntax::tests::RecordingHighlighter, Error};
    use serde_json::json;

    fn button() -> ElementNode {
        ElementNode::new(Some("btn btn-primary"), Vec::new())
    }

    #[test]
    fn test_invalid_target_aborts_assembly() {
        let raw = [json!({"target": "node_axios"}), json!({"target": 42})];
        let err = SnippetGenerator::new(&raw).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
        assert!(err.to_string().contains("target must be string"));
    }

    #[test]
    fn test_generator_plugin_extends_host_map() -> crate::Result<()> {
        let raw = [json!({"target": "node_axios"}), json!({"target": "foo_bar"})];
        let plugins = SnippetGenerator::new(&raw)?.plugins();
        let generators = plugins.generator.get_snippet_generators(&GeneratorMap::new());
        assert_eq!(generators.keys().collect::<Vec<_>>(), vec!["node_axios", "foo_bar"]);

        let request = json!({"method": "get", "url": "http://api.test/items"});
        assert_eq!(generators.get("foo_bar").unwrap().call(&request), SNIPPET_ERROR);
        assert!(generators
            .get("node_axios")
            .unwrap()
            .call(&request)
            .contains("axios"));
        Ok(())
    }

    #[test]
    fn test_after_load_registers_target_syntaxes() -> crate::Result<()> {
        let raw = [
            json!({"target": "node_axios"}),
            json!({"target": "python_requests"}),
            json!({"target": "shell_curl", "syntax": "bash"}),
        ];
        let plugins = SnippetGenerator::new(&raw)?.plugins();
        let mut registry = SyntaxRegistry::new(RecordingHighlighter::default());
        plugins.styling.after_load(&mut registry);
        plugins.styling.after_load(&mut registry);

        let calls = registry.into_inner().calls;
        assert_eq!(calls.len(), 9);
        assert_eq!(calls.last(), Some(&("python".to_string(), "python".to_string())));
        Ok(())
    }

    #[test]
    fn test_styles_button_container() -> crate::Result<()> {
        let plugins = SnippetGenerator::new(std::iter::empty())?.plugins();
        let mut root = ElementNode::new(
            Some("request-snippets"),
            vec![
                ElementNode::new(Some("title"), Vec::new()),
                ElementNode::new(Some("tabs"), vec![button(), button()]),
            ],
        );
        assert!(plugins.styling.style_request_snippets(&mut root));
        assert!(root.style.is_empty());
        let tabs = &root.children[1];
        assert_eq!(tabs.style.get("paddingLeft").map(String::as_str), Some("15px"));
        assert_eq!(tabs.style.get("overflow").map(String::as_str), Some("auto"));
        Ok(())
    }

    #[test]
    fn test_deeper_container_wins() {
        let mut root = ElementNode::new(
            None,
            vec![button(), ElementNode::new(Some("inner"), vec![button()])],
        );
        let container = root
            .find_container_mut(&|node| node.has_class(BUTTON_CLASS))
            .unwrap();
        assert_eq!(container.class_name.as_deref(), Some("inner"));
    }

    #[test]
    fn test_without_buttons_nothing_changes() -> crate::Result<()> {
        let plugins = SnippetGenerator::new(std::iter::empty())?.plugins();
        let mut root = ElementNode::new(Some("btn-group"), vec![ElementNode::default()]);
        let before = root.clone();
        assert!(!plugins.styling.style_request_snippets(&mut root));
        assert_eq!(root, before);
        Ok(())
    }
}
