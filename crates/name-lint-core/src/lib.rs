//! # name-lint-core
//!
//! Naming-convention checks over program declarations.
//!
//! A front-end builds a [`DeclarationTree`] for each compilation unit. The
//! [`NameChecker`] walks it depth-first, picks a naming [`Policy`] for every
//! declaration and reports non-conforming identifiers to a [`DiagnosticSink`].
//! Findings are advisory: nothing is rewritten and nothing fails a build.
//!
//! - [`classifier`] holds the pure camelCase / `ALL_CAPS` checks
//! - [`policy`] maps a declaration to its policy
//! - [`Analyzer`] runs the walker over every file of a project
//!
//! ## Example
//!
//! ```ignore
//! use name_lint_core::{check_tree, DeclKind, Declaration, DeclarationTree};
//!
//! let mut tree = DeclarationTree::new("Widget.java");
//! let ty = tree.add(None, Declaration::new(DeclKind::Type, "Widget"));
//! tree.add(Some(ty), Declaration::new(DeclKind::Method, "Widget"));
//!
//! for violation in check_tree(&tree) {
//!     println!("{violation}");
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod analyzer;
mod checks;
pub mod classifier;
mod config;
mod declaration;
mod frontend;
pub mod policy;
mod sink;
mod types;
mod walker;

pub use analyzer::{Analyzer, AnalyzerBuilder, AnalyzerError};
pub use checks::{help_for, Check};
pub use classifier::NamingIssue;
pub use config::{AnalyzerConfig, CheckConfig, Config, ConfigError};
pub use declaration::{DeclId, DeclKind, Declaration, DeclarationTree, Modifier, Modifiers};
pub use frontend::{Frontend, FrontendBox, FrontendError};
pub use policy::{ConstantReason, Policy};
pub use sink::{CollectingSink, DiagnosticSink, TracingSink};
pub use types::{LintResult, Location, Severity, Suggestion, Violation, ViolationDiagnostic};
pub use walker::{check_tree, NameChecker};
