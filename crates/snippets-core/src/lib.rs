//! Request Snippets Core Library
//!
//! This library renders an HTTP request description as ready-to-run client
//! code for many languages, and extends a documentation host's snippet
//! generator registry with configured targets.

pub mod catalog;
pub mod config;
pub mod convert;
pub mod error;
pub mod har;
pub mod plugin;
pub mod registry;
pub mod resolve;
pub mod snippets;
pub mod syntax;
pub mod target;

pub use crate::{
    catalog::{available_targets, ClientInfo, TargetInfo},
    config::{Config, OutputFormat},
    convert::HttpSnippet,
    error::{Error, Result},
    har::{CanonicalRequest, HarContext, ParamMap},
    plugin::{ElementNode, SnippetGenerator},
    registry::{GeneratorConfig, GeneratorMap, RequestRecord, RequestSource, SNIPPET_ERROR},
    resolve::{resolve, ResolvedTarget},
    snippets::{generate, get_resource_name, Snippet, SnippetBundle},
    syntax::{Highlighter, SyntaxRegistry},
    target::TargetSpec,
};
