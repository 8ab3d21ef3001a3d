//! Error handling for the request snippets library.
//!
//! This module defines the main error type `Error` used throughout the library,
//! along with a convenient `Result` type alias. It uses `thiserror` for easy
//! error handling and implements conversions from common error types.
//!
//! # Examples
//!
//! ```
//! use snippets_core::error::{Error, Result};
//!
//! fn lookup(target: &str) -> Result<()> {
//!     Err(Error::invalid_target(target))
//! }
//!
//! let err = lookup("bogus_lang").unwrap_err();
//! assert_eq!(err.to_string(), "Invalid target: bogus_lang");
//! ```

use thiserror::Error;

/// Result type for snippet generation operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for snippet generation operations
#[derive(Debug, Error)]
pub enum Error {
    /// A raw target description violated one or more type rules.
    /// The message starts with a summary line followed by one line per rule.
    #[error("{0}")]
    Validation(String),

    /// Target identifier unknown to the code-generation catalog
    #[error("Invalid target: {0}")]
    InvalidTarget(String),

    /// Malformed request URL
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Template error
    #[error("Template error: {0}")]
    Template(String),

    /// Template engine error
    #[error("Template engine error: {0}")]
    Tera(#[from] tera::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create a new validation error from the collected rule violations
    pub fn validation<I, S>(violations: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut message = String::from("validation failed");
        for violation in violations {
            message.push_str("\n  ");
            message.push_str(violation.as_ref());
        }
        Self::Validation(message)
    }

    /// Create a new invalid target error
    pub fn invalid_target<S: Into<String>>(target: S) -> Self {
        Self::InvalidTarget(target.into())
    }

    /// Create a new template error
    pub fn template<S: Into<String>>(msg: S) -> Self {
        Self::Template(msg.into())
    }

    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }
}
