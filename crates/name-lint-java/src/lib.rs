//! # name-lint-java
//!
//! Java front-end for name-lint.
//!
//! [`JavaFrontend`] parses a compilation unit with Tree-sitter and builds the
//! [`DeclarationTree`](name_lint_core::DeclarationTree) the naming checks
//! walk: types, methods, fields, enum constants and the constructors and
//! initializers that can hold local classes.
//!
//! ## Example
//!
//! ```ignore
//! use name_lint_core::Analyzer;
//! use name_lint_java::JavaFrontend;
//!
//! let analyzer = Analyzer::builder()
//!     .root("./src")
//!     .frontend(JavaFrontend::new())
//!     .build()?;
//!
//! let result = analyzer.analyze()?;
//! println!("{}", result.summary());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod constant;
pub mod java;

pub use java::JavaFrontend;
