//! Front-end extension point.
//!
//! A [`Frontend`] turns the source text of one compilation unit into a
//! [`DeclarationTree`]. Implement it to teach name-lint a new language.

use crate::declaration::DeclarationTree;
use std::path::Path;

/// Errors a front-end can report for one file.
#[derive(Debug, thiserror::Error)]
pub enum FrontendError {
    /// The grammar could not be loaded.
    #[error("failed to load {language} grammar: {message}")]
    Grammar {
        /// Language identifier.
        language: &'static str,
        /// Loader message.
        message: String,
    },

    /// The parser returned no tree.
    #[error("parser produced no syntax tree")]
    NoTree,

    /// The source contains a syntax error.
    #[error("syntax error at {line}:{column}")]
    Syntax {
        /// Line of the first error (1-indexed).
        line: usize,
        /// Column of the first error (1-indexed).
        column: usize,
    },
}

/// Builds declaration trees for one language.
pub trait Frontend: Send + Sync {
    /// Language identifier (e.g., `"java"`).
    fn language_id(&self) -> &'static str;

    /// File extensions this front-end handles (e.g., `&[".java"]`).
    fn extensions(&self) -> &'static [&'static str];

    /// Parses `source` and returns its declarations.
    ///
    /// `path` is recorded as the file of every declaration location.
    ///
    /// # Errors
    ///
    /// Returns an error if the source cannot be parsed.
    fn parse(&self, path: &Path, source: &str) -> Result<DeclarationTree, FrontendError>;

    /// Returns true if this front-end handles `path`, judged by its extension.
    fn handles(&self, path: &Path) -> bool {
        let Some(ext) = path.extension().and_then(|e| e.to_str()) else {
            return false;
        };
        self.extensions()
            .iter()
            .any(|e| e.strip_prefix('.').unwrap_or(e) == ext)
    }
}

/// Type alias for boxed `Frontend` trait objects.
pub type FrontendBox = Box<dyn Frontend>;
