//! Declaration walker.
//!
//! Visits a [`DeclarationTree`] depth-first, selects the naming policy of
//! every declaration, runs the classifier and forwards findings to a
//! [`DiagnosticSink`]. Children are always visited, checked or not, so a
//! local class inside a constructor is reached like any other type.

use crate::checks::{help_for, Check};
use crate::classifier::{self, NamingIssue};
use crate::declaration::{DeclId, DeclKind, Declaration, DeclarationTree};
use crate::policy::{self, Policy};
use crate::sink::{CollectingSink, DiagnosticSink};
use crate::types::{Location, Severity, Suggestion, Violation};
use tracing::trace;

/// Walks declaration trees and reports naming violations.
pub struct NameChecker<'s, S: DiagnosticSink + ?Sized> {
    sink: &'s S,
}

impl<'s, S: DiagnosticSink + ?Sized> NameChecker<'s, S> {
    /// Creates a checker reporting into `sink`.
    #[must_use]
    pub fn new(sink: &'s S) -> Self {
        Self { sink }
    }

    /// Visits every root of `tree`.
    pub fn check_tree(&self, tree: &DeclarationTree) {
        for &root in tree.roots() {
            self.visit(tree, root);
        }
    }

    /// Visits `id` and everything nested in it.
    pub fn visit(&self, tree: &DeclarationTree, id: DeclId) {
        let Some(decl) = tree.get(id) else {
            return;
        };

        let policy = policy::select(decl);
        trace!(name = %decl.simple_name, kind = %decl.kind, ?policy, "visiting declaration");

        if decl.kind == DeclKind::Method {
            self.check_shadowing(tree, id, decl);
        }
        if policy != Policy::Unchecked {
            self.check_name(tree, decl, policy);
        }

        for &child in decl.children() {
            self.visit(tree, child);
        }
    }

    /// Reports a method named exactly like its enclosing declaration.
    fn check_shadowing(&self, tree: &DeclarationTree, id: DeclId, decl: &Declaration) {
        if decl.simple_name.is_empty() {
            return;
        }
        let Some(enclosing) = tree.enclosing(id) else {
            return;
        };
        if enclosing.simple_name != decl.simple_name {
            return;
        }

        let check = Check::MethodShadowsType;
        self.sink.report(
            Violation::new(
                check.code(),
                check.name(),
                Severity::Warning,
                location_of(tree, decl),
                format!(
                    "Method `{}` should not share its name with the enclosing {}, it is confusable with a constructor",
                    decl.simple_name, enclosing.kind
                ),
            )
            .with_suggestion(Suggestion::new(
                "Rename the method, or turn it into a constructor",
            )),
        );
    }

    fn check_name(&self, tree: &DeclarationTree, decl: &Declaration, policy: Policy) {
        let Some(issue) = classifier::check(&decl.simple_name, policy) else {
            return;
        };

        let check = Check::for_issue(decl, policy, issue);
        let mut violation = Violation::new(
            check.code(),
            check.name(),
            Severity::Warning,
            location_of(tree, decl),
            describe(decl, issue),
        );
        if let Some(help) = help_for(issue) {
            violation = violation.with_suggestion(Suggestion::new(help));
        }
        self.sink.report(violation);
    }
}

fn describe(decl: &Declaration, issue: NamingIssue) -> String {
    if issue == NamingIssue::EmptyIdentifier {
        format!("Unnamed or empty identifier on {}", decl.kind)
    } else {
        issue.message(&decl.simple_name)
    }
}

fn location_of(tree: &DeclarationTree, decl: &Declaration) -> Location {
    let mut location = decl.location.clone();
    if location.file.as_os_str().is_empty() {
        location.file = tree.file().to_path_buf();
    }
    location
}

/// Walks `tree` and returns its violations in visitation order.
#[must_use]
pub fn check_tree(tree: &DeclarationTree) -> Vec<Violation> {
    let sink = CollectingSink::new();
    NameChecker::new(&sink).check_tree(tree);
    sink.into_violations()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::{Modifier, Modifiers};

    fn codes(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.code.as_str()).collect()
    }

    #[test]
    fn shadowing_is_reported_before_camel_case() {
        let mut tree = DeclarationTree::new("Widget.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, "Widget"));
        tree.add(Some(ty), Declaration::new(DeclKind::Method, "Widget"));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL003", "NL002"]);
        assert!(violations[1].message.contains("should start with a lowercase letter"));
    }

    #[test]
    fn lowercase_method_named_like_type_only_shadows() {
        let mut tree = DeclarationTree::new("widget.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, "widget"));
        tree.add(Some(ty), Declaration::new(DeclKind::Method, "widget"));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL001", "NL003"]);
    }

    #[test]
    fn method_without_enclosing_skips_shadow_check() {
        let mut tree = DeclarationTree::new("Orphan.java");
        tree.add(None, Declaration::new(DeclKind::Method, "Orphan"));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL002"]);
    }

    #[test]
    fn other_kinds_are_not_checked_but_recursed() {
        let mut tree = DeclarationTree::new("Outer.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, "Outer"));
        let ctor = tree.add(Some(ty), Declaration::new(DeclKind::Other, "Outer"));
        tree.add(Some(ctor), Declaration::new(DeclKind::Type, "local_helper"));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL001"]);
        assert!(violations[0].message.contains("local_helper"));
    }

    #[test]
    fn empty_name_gets_dedicated_message() {
        let mut tree = DeclarationTree::new("Anon.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, ""));
        tree.add(Some(ty), Declaration::new(DeclKind::Method, ""));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL000", "NL000"]);
        assert_eq!(violations[0].message, "Unnamed or empty identifier on type");
    }

    #[test]
    fn file_falls_back_to_tree_file() {
        let mut tree = DeclarationTree::new("src/Foo.java");
        let loc = Location::new("src/Other.java".into(), 3, 5);
        tree.add(None, Declaration::new(DeclKind::Type, "foo"));
        tree.add(None, Declaration::new(DeclKind::Type, "bar").at(loc));

        let violations = check_tree(&tree);
        assert_eq!(violations[0].location.file.to_str(), Some("src/Foo.java"));
        assert_eq!(violations[1].location.file.to_str(), Some("src/Other.java"));
        assert_eq!(violations[1].location.line, 3);
    }

    #[test]
    fn constant_field_uses_all_caps() {
        let psf: Modifiers = [Modifier::Public, Modifier::Static, Modifier::Final]
            .into_iter()
            .collect();
        let mut tree = DeclarationTree::new("Limits.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, "Limits"));
        tree.add(Some(ty), Declaration::new(DeclKind::Field, "maxSize").with_modifiers(psf));
        tree.add(Some(ty), Declaration::new(DeclKind::Field, "MAX_SIZE").with_modifiers(psf));

        let violations = check_tree(&tree);
        assert_eq!(codes(&violations), ["NL005"]);
        assert!(violations[0].message.contains("maxSize"));
        assert!(violations[0].suggestion.is_some());
    }
}
