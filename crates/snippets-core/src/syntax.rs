//! Registration of highlighting syntaxes.
//!
//! Highlighters usually keep a process-wide language table that must not see
//! the same alias twice. [`SyntaxRegistry`] wraps such a table and forwards
//! each syntax name to it at most once.

use std::collections::HashSet;

/// Syntaxes registered for every host, before any target syntax.
pub const DEFAULT_SYNTAXES: &[&str] = &[
    "json",
    "js",
    "xml",
    "yaml",
    "http",
    "bash",
    "powershell",
    "javascript",
];

/// Grammars the highlighter ships.
pub const KNOWN_GRAMMARS: &[&str] = &[
    "json",
    "xml",
    "bash",
    "yaml",
    "http",
    "powershell",
    "javascript",
    "java",
    "python",
    "go",
    "php",
    "typescript",
    "cpp",
    "rust",
];

/// Syntax aliases that are rendered with another grammar.
const SYNTAX_ALIASES: &[(&str, &str)] = &[("js", "javascript")];

/// A highlighter's language table.
pub trait Highlighter {
    /// Make `grammar` available under `alias`.
    fn register_language(&mut self, alias: &str, grammar: &str);
}

/// Register-once front for a [`Highlighter`].
#[derive(Debug, Default)]
pub struct SyntaxRegistry<H> {
    highlighter: H,
    configured: HashSet<String>,
}

impl<H: Highlighter> SyntaxRegistry<H> {
    pub fn new(highlighter: H) -> Self {
        Self {
            highlighter,
            configured: HashSet::new(),
        }
    }

    /// Register a syntax unless it has been seen before.
    ///
    /// Returns `true` when the highlighter was called. A syntax without a
    /// known grammar is remembered but never forwarded.
    pub fn register_if_absent(&mut self, syntax: &str) -> bool {
        if !self.configured.insert(syntax.to_string()) {
            return false;
        }
        let grammar = grammar_for(syntax);
        if !KNOWN_GRAMMARS.iter().any(|known| *known == grammar) {
            log::debug!("No highlighting grammar for syntax {}", syntax);
            return false;
        }
        self.highlighter.register_language(syntax, grammar);
        true
    }

    /// Register the default syntaxes followed by `syntaxes`.
    pub fn load<'a, I>(&mut self, syntaxes: I)
    where
        I: IntoIterator<Item = &'a str>,
    {
        for syntax in DEFAULT_SYNTAXES {
            self.register_if_absent(syntax);
        }
        for syntax in syntaxes {
            self.register_if_absent(syntax);
        }
    }

    pub fn is_registered(&self, syntax: &str) -> bool {
        self.configured.contains(syntax)
    }

    pub fn highlighter(&self) -> &H {
        &self.highlighter
    }

    pub fn into_inner(self) -> H {
        self.highlighter
    }
}

fn grammar_for(syntax: &str) -> &str {
    SYNTAX_ALIASES
        .iter()
        .find(|(alias, _)| *alias == syntax)
        .map(|(_, grammar)| *grammar)
        .unwrap_or(syntax)
}
