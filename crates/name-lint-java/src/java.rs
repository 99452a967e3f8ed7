//! Java front-end using Tree-sitter.

use std::collections::HashSet;
use std::path::Path;
use tracing::debug;
use tree_sitter::{Language, Node, Parser};

use name_lint_core::{
    DeclId, DeclKind, Declaration, DeclarationTree, Frontend, FrontendError, Location, Modifier,
    Modifiers,
};

use crate::constant::{is_constant_expression, is_constant_type};

const TYPE_KINDS: &[&str] = &[
    "class_declaration",
    "interface_declaration",
    "enum_declaration",
    "record_declaration",
    "annotation_type_declaration",
];

/// Builds declaration trees from Java compilation units.
pub struct JavaFrontend {
    language: Language,
}

impl JavaFrontend {
    /// Creates a new Java front-end.
    #[must_use]
    pub fn new() -> Self {
        Self {
            language: tree_sitter_java::LANGUAGE.into(),
        }
    }
}

impl Default for JavaFrontend {
    fn default() -> Self {
        Self::new()
    }
}

impl Frontend for JavaFrontend {
    fn language_id(&self) -> &'static str {
        "java"
    }

    fn extensions(&self) -> &'static [&'static str] {
        &[".java"]
    }

    fn parse(&self, path: &Path, source: &str) -> Result<DeclarationTree, FrontendError> {
        let mut parser = Parser::new();
        parser
            .set_language(&self.language)
            .map_err(|e| FrontendError::Grammar {
                language: "java",
                message: e.to_string(),
            })?;

        let tree = parser.parse(source, None).ok_or(FrontendError::NoTree)?;
        let root = tree.root_node();
        if root.has_error() {
            let pos = first_error(root).unwrap_or(root).start_position();
            return Err(FrontendError::Syntax {
                line: pos.row + 1,
                column: pos.column + 1,
            });
        }

        let mut builder = TreeBuilder {
            src: source.as_bytes(),
            tree: DeclarationTree::new(path),
        };
        builder.local_types(root, None, &Constants::new());

        debug!(
            file = %path.display(),
            declarations = builder.tree.len(),
            "built declaration tree"
        );
        Ok(builder.tree)
    }
}

/// Text of `node`, or the empty string if it is not valid UTF-8.
pub(crate) fn text<'a>(node: Node<'_>, src: &'a [u8]) -> &'a str {
    node.utf8_text(src).unwrap_or("")
}

/// Finds the first error or missing node in document order.
fn first_error(node: Node<'_>) -> Option<Node<'_>> {
    if node.is_error() || node.is_missing() {
        return Some(node);
    }
    let mut cursor = node.walk();
    let found = node
        .children(&mut cursor)
        .filter(|c| c.has_error() || c.is_missing())
        .find_map(first_error);
    found
}

fn modifiers(node: Node<'_>) -> Modifiers {
    let mut cursor = node.walk();
    let Some(list) = node.children(&mut cursor).find(|c| c.kind() == "modifiers") else {
        return Modifiers::new();
    };
    let mut cursor = list.walk();
    let found = list
        .children(&mut cursor)
        .filter_map(|keyword| Modifier::from_keyword(keyword.kind()))
        .collect();
    found
}

const FIELD_KINDS: &[&str] = &["field_declaration", "constant_declaration"];

/// Names of the constant fields in scope.
type Constants = HashSet<String>;

/// One declarator of a field declaration.
struct FieldSlot<'t> {
    declarator: Node<'t>,
    name: String,
    modifiers: Modifiers,
    /// `final`, primitive or `String`, not an array, and initialized.
    candidate: bool,
    value: Option<Node<'t>>,
}

struct TreeBuilder<'s> {
    src: &'s [u8],
    tree: DeclarationTree,
}

impl TreeBuilder<'_> {
    fn location(&self, node: Node<'_>) -> Location {
        let pos = node.start_position();
        Location::new(self.tree.file().to_path_buf(), pos.row + 1, pos.column + 1)
            .with_span(node.start_byte(), node.end_byte() - node.start_byte())
    }

    /// Starts a declaration named by the `name` field of `node`.
    fn declare(&self, kind: DeclKind, node: Node<'_>) -> Declaration {
        match node.child_by_field_name("name") {
            Some(name) => Declaration::new(kind, text(name, self.src)).at(self.location(name)),
            None => Declaration::new(kind, "").at(self.location(node)),
        }
    }

    /// Adds every type declared below `node`, without entering anonymous
    /// class bodies.
    fn local_types(&mut self, node: Node<'_>, parent: Option<DeclId>, known: &Constants) {
        let mut cursor = node.walk();
        for child in node.named_children(&mut cursor) {
            let kind = child.kind();
            if TYPE_KINDS.contains(&kind) {
                self.type_decl(child, parent, false, known);
            } else if kind != "class_body" {
                self.local_types(child, parent, known);
            }
        }
    }

    fn type_decl(
        &mut self,
        node: Node<'_>,
        parent: Option<DeclId>,
        in_interface: bool,
        known: &Constants,
    ) {
        let decl = self
            .declare(DeclKind::Type, node)
            .with_modifiers(modifiers(node))
            .interface_member(in_interface);
        let id = self.tree.add(parent, decl);

        if node.kind() == "record_declaration" {
            if let Some(params) = node.child_by_field_name("parameters") {
                self.record_components(params, id);
            }
        }

        let Some(body) = node.child_by_field_name("body") else {
            return;
        };
        let interface_like = matches!(
            node.kind(),
            "interface_declaration" | "annotation_type_declaration"
        );
        self.members(body, id, interface_like, known);
    }

    fn record_components(&mut self, params: Node<'_>, parent: DeclId) {
        let implicit: Modifiers = [Modifier::Private, Modifier::Final].into_iter().collect();
        let mut cursor = params.walk();
        for param in params.named_children(&mut cursor) {
            let named = match param.kind() {
                "formal_parameter" => Some(param),
                "spread_parameter" => {
                    let mut inner = param.walk();
                    let declarator = param
                        .named_children(&mut inner)
                        .find(|c| c.kind() == "variable_declarator");
                    declarator
                }
                _ => None,
            };
            if let Some(named) = named {
                let decl = self.declare(DeclKind::Field, named).with_modifiers(implicit);
                self.tree.add(Some(parent), decl);
            }
        }
    }

    /// Adds the members of a class, interface, enum or annotation body.
    ///
    /// `outer` holds the constants of the enclosing bodies.
    fn members(&mut self, body: Node<'_>, parent: DeclId, in_interface: bool, outer: &Constants) {
        let mut cursor = body.walk();
        let mut items: Vec<Node<'_>> = Vec::new();
        for member in body.named_children(&mut cursor) {
            if member.kind() == "enum_body_declarations" {
                let mut inner = member.walk();
                items.extend(member.named_children(&mut inner));
            } else {
                items.push(member);
            }
        }

        let slots: Vec<FieldSlot<'_>> = items
            .iter()
            .filter(|member| FIELD_KINDS.contains(&member.kind()))
            .flat_map(|member| self.field_slots(*member, in_interface))
            .collect();
        let known = self.body_constants(&slots, outer);

        for member in items {
            match member.kind() {
                kind if TYPE_KINDS.contains(&kind) => {
                    self.type_decl(member, Some(parent), in_interface, &known);
                }
                kind if FIELD_KINDS.contains(&kind) => {
                    for slot in self.field_slots(member, in_interface) {
                        self.add_field(slot, parent, in_interface, &known);
                    }
                }
                "method_declaration" | "annotation_type_element_declaration" => {
                    let decl = self
                        .declare(DeclKind::Method, member)
                        .with_modifiers(modifiers(member))
                        .interface_member(in_interface);
                    let id = self.tree.add(Some(parent), decl);
                    if let Some(block) = member.child_by_field_name("body") {
                        self.local_types(block, Some(id), &known);
                    }
                }
                "constructor_declaration" | "compact_constructor_declaration" => {
                    let decl = self
                        .declare(DeclKind::Other, member)
                        .with_modifiers(modifiers(member));
                    let id = self.tree.add(Some(parent), decl);
                    if let Some(block) = member.child_by_field_name("body") {
                        self.local_types(block, Some(id), &known);
                    }
                }
                "static_initializer" | "block" => {
                    let decl = Declaration::new(DeclKind::Other, "").at(self.location(member));
                    let id = self.tree.add(Some(parent), decl);
                    self.local_types(member, Some(id), &known);
                }
                // Constant bodies are anonymous classes and are not entered.
                "enum_constant" => {
                    let decl = self
                        .declare(DeclKind::EnumConstant, member)
                        .with_modifiers(modifiers(member));
                    self.tree.add(Some(parent), decl);
                }
                _ => {}
            }
        }
    }

    /// Splits a field declaration into its declarators.
    fn field_slots<'t>(&self, node: Node<'t>, in_interface: bool) -> Vec<FieldSlot<'t>> {
        let mut mods = modifiers(node);
        if in_interface {
            // Interface fields are implicitly public static final.
            mods.insert(Modifier::Public);
            mods.insert(Modifier::Static);
            mods.insert(Modifier::Final);
        }
        let candidate_type = mods.contains(Modifier::Final)
            && node
                .child_by_field_name("type")
                .is_some_and(|ty| is_constant_type(ty, self.src));

        let mut cursor = node.walk();
        let slots = node
            .children_by_field_name("declarator", &mut cursor)
            .map(|declarator| {
                let value = declarator.child_by_field_name("value");
                FieldSlot {
                    declarator,
                    name: declarator
                        .child_by_field_name("name")
                        .map_or_else(String::new, |n| text(n, self.src).to_owned()),
                    modifiers: mods,
                    candidate: candidate_type
                        && value.is_some()
                        && declarator.child_by_field_name("dimensions").is_none(),
                    value,
                }
            })
            .collect();
        slots
    }

    /// Constants visible inside a body: the outer ones not hidden by a field
    /// of the body, plus the body's own constant fields.
    ///
    /// Initializers may refer to constants declared further down, so the set
    /// is grown until it stops changing.
    fn body_constants(&self, slots: &[FieldSlot<'_>], outer: &Constants) -> Constants {
        let mut known = outer.clone();
        for slot in slots {
            known.remove(&slot.name);
        }
        loop {
            let before = known.len();
            for slot in slots {
                if slot.candidate
                    && !known.contains(&slot.name)
                    && slot
                        .value
                        .is_some_and(|v| is_constant_expression(v, self.src, &known))
                {
                    known.insert(slot.name.clone());
                }
            }
            if known.len() == before {
                return known;
            }
        }
    }

    fn add_field(&mut self, slot: FieldSlot<'_>, parent: DeclId, in_interface: bool, known: &Constants) {
        let constant = slot.candidate && known.contains(&slot.name);
        let decl = self
            .declare(DeclKind::Field, slot.declarator)
            .with_modifiers(slot.modifiers)
            .interface_member(in_interface)
            .constant_value(constant);
        let id = self.tree.add(Some(parent), decl);
        if let Some(value) = slot.value {
            self.local_types(value, Some(id), known);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn build(src: &str) -> DeclarationTree {
        JavaFrontend::new()
            .parse(Path::new("Test.java"), src)
            .expect("parse")
    }

    fn find<'t>(tree: &'t DeclarationTree, name: &str) -> &'t Declaration {
        tree.iter()
            .map(|(_, decl)| decl)
            .find(|decl| decl.simple_name == name)
            .unwrap_or_else(|| panic!("no declaration named {name}"))
    }

    fn outline(tree: &DeclarationTree) -> Vec<(DeclKind, String)> {
        tree.iter()
            .map(|(_, decl)| (decl.kind, decl.simple_name.clone()))
            .collect()
    }

    #[test]
    fn class_members_in_source_order() {
        let tree = build(
            "package p;\nclass Widget {\n  int count;\n  Widget() {}\n  void draw() {}\n  class Part {}\n}\n",
        );
        assert_eq!(
            outline(&tree),
            vec![
                (DeclKind::Type, "Widget".to_string()),
                (DeclKind::Field, "count".to_string()),
                (DeclKind::Other, "Widget".to_string()),
                (DeclKind::Method, "draw".to_string()),
                (DeclKind::Type, "Part".to_string()),
            ]
        );
        assert_eq!(tree.roots().len(), 1);
    }

    #[test]
    fn location_points_at_name() {
        let tree = build("class A {\n  void run() {}\n}\n");
        let run = find(&tree, "run");
        assert_eq!(run.location.line, 2);
        assert_eq!(run.location.column, 8);
        assert_eq!(run.location.length, 3);
        assert_eq!(run.location.file, Path::new("Test.java"));
    }

    #[test]
    fn one_field_per_declarator() {
        let tree = build("class A { private int x, y = 2; }");
        let fields: Vec<_> = tree
            .iter()
            .filter(|(_, d)| d.kind == DeclKind::Field)
            .map(|(_, d)| d.simple_name.as_str())
            .collect();
        assert_eq!(fields, ["x", "y"]);
        assert!(find(&tree, "x").modifiers.contains(Modifier::Private));
    }

    #[test]
    fn compile_time_constants() {
        let tree = build(
            "class A {\n  final int LIMIT = 10;\n  static final int twice = LIMIT * 2;\n  final int computed = size();\n  int plain = 3;\n  final int[] table = {1};\n}\n",
        );
        assert!(find(&tree, "LIMIT").has_compile_time_constant_value);
        assert!(find(&tree, "twice").has_compile_time_constant_value);
        assert!(!find(&tree, "computed").has_compile_time_constant_value);
        assert!(!find(&tree, "plain").has_compile_time_constant_value);
        assert!(!find(&tree, "table").has_compile_time_constant_value);
    }

    #[test]
    fn constants_of_enclosing_types_are_known() {
        let tree = build(
            "class Outer {\n  static final int A = 1;\n  class Inner {\n    private static final int b = Outer.A;\n    final int c = A;\n    final int d = b + 1;\n  }\n}\n",
        );
        assert!(find(&tree, "b").has_compile_time_constant_value);
        assert!(find(&tree, "c").has_compile_time_constant_value);
        assert!(find(&tree, "d").has_compile_time_constant_value);
    }

    #[test]
    fn constants_known_inside_local_classes() {
        let tree = build(
            "class Outer {\n  static final String PREFIX = \"p\";\n  void run() {\n    class Local { final String tag = PREFIX + \"-x\"; }\n  }\n}\n",
        );
        assert!(find(&tree, "tag").has_compile_time_constant_value);
    }

    #[test]
    fn inner_field_hides_outer_constant() {
        let tree = build(
            "class Outer {\n  static final int A = 1;\n  class Inner {\n    int A = 2;\n    final int c = A;\n  }\n}\n",
        );
        assert!(!find(&tree, "c").has_compile_time_constant_value);
    }

    #[test]
    fn constants_may_be_referenced_before_declaration() {
        let tree = build("class A {\n  final int a = B * 2;\n  static final int B = 1;\n}\n");
        assert!(find(&tree, "a").has_compile_time_constant_value);
        assert!(find(&tree, "B").has_compile_time_constant_value);
    }

    #[test]
    fn constants_do_not_leak_between_siblings() {
        let tree = build(
            "class Outer {\n  class First { static final int LIMIT = 1; }\n  class Second { final int copy = LIMIT; }\n}\n",
        );
        assert!(!find(&tree, "copy").has_compile_time_constant_value);
    }

    #[test]
    fn interface_members() {
        let tree = build("interface Settings { int timeout = 5; void apply(); }");
        let timeout = find(&tree, "timeout");
        assert!(timeout.is_interface_member);
        assert!(timeout.modifiers.contains_all(&[
            Modifier::Public,
            Modifier::Static,
            Modifier::Final
        ]));
        assert!(find(&tree, "apply").is_interface_member);
        assert!(!find(&tree, "Settings").is_interface_member);
    }

    #[test]
    fn annotation_elements_are_methods() {
        let tree = build("@interface Tag { String value() default \"\"; int LEVEL = 1; }");
        assert_eq!(find(&tree, "value").kind, DeclKind::Method);
        assert!(find(&tree, "LEVEL").is_interface_member);
    }

    #[test]
    fn enum_constant_bodies_are_skipped() {
        let tree = build(
            "enum Color {\n  RED { void shade() {} int Tint; },\n  Green;\n  private int level;\n}\n",
        );
        let red = find(&tree, "RED");
        assert_eq!(red.kind, DeclKind::EnumConstant);
        assert!(red.has_compile_time_constant_value);
        assert!(red.children().is_empty());
        assert!(tree
            .iter()
            .all(|(_, d)| d.simple_name != "shade" && d.simple_name != "Tint"));
        assert_eq!(find(&tree, "Green").kind, DeclKind::EnumConstant);
        assert_eq!(find(&tree, "level").kind, DeclKind::Field);
    }

    #[test]
    fn record_components_are_private_final_fields() {
        let tree = build("record Point(int x, int y) { }");
        let x = find(&tree, "x");
        assert_eq!(x.kind, DeclKind::Field);
        assert!(x.modifiers.contains_all(&[Modifier::Private, Modifier::Final]));
    }

    #[test]
    fn local_classes_belong_to_their_method() {
        let tree = build(
            "class Outer {\n  void run() {\n    class Helper { int Bad; }\n    Runnable r = () -> { class InLambda {} };\n  }\n}\n",
        );
        let (run_id, _) = tree
            .iter()
            .find(|(_, d)| d.simple_name == "run")
            .expect("run");
        let helper = find(&tree, "Helper");
        assert_eq!(helper.enclosing(), Some(run_id));
        assert_eq!(find(&tree, "InLambda").enclosing(), Some(run_id));
        assert_eq!(find(&tree, "Bad").kind, DeclKind::Field);
    }

    #[test]
    fn anonymous_class_bodies_are_skipped() {
        let tree = build(
            "class A {\n  Object o = new Object() { int Hidden; };\n  void m() { new Thread() { public void Run() {} }; }\n}\n",
        );
        assert!(tree.iter().all(|(_, d)| d.simple_name != "Hidden"));
        assert!(tree.iter().all(|(_, d)| d.simple_name != "Run"));
    }

    #[test]
    fn initializers_are_unnamed_other_declarations() {
        let tree = build("class A { static { class Boot {} } { } }");
        let others: Vec<_> = tree
            .iter()
            .filter(|(_, d)| d.kind == DeclKind::Other)
            .collect();
        assert_eq!(others.len(), 2);
        assert!(others.iter().all(|(_, d)| d.simple_name.is_empty()));
        assert_eq!(find(&tree, "Boot").kind, DeclKind::Type);
    }

    #[test]
    fn syntax_error_is_reported() {
        let err = JavaFrontend::new()
            .parse(Path::new("Broken.java"), "class A {\n  void m( {\n}\n")
            .expect_err("should fail");
        assert!(matches!(err, FrontendError::Syntax { .. }));
    }

    #[test]
    fn empty_source_has_no_declarations() {
        assert!(build("").is_empty());
    }

    #[test]
    fn handles_java_files_only() {
        let frontend = JavaFrontend::new();
        assert!(frontend.handles(Path::new("src/A.java")));
        assert!(!frontend.handles(Path::new("src/A.kt")));
    }
}
