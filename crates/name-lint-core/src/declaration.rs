//! Declaration tree handed to the walker by a front-end.
//!
//! A [`DeclarationTree`] owns every declaration of one compilation unit in an
//! arena. Declarations refer to each other through [`DeclId`] handles: the
//! parent owns the ordered list of its children, and each child keeps a
//! non-owning handle to its enclosing declaration.

use crate::types::Location;
use std::path::{Path, PathBuf};

/// Kind of a declaration, as far as naming policy is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclKind {
    /// Class, interface, enum, record or annotation type.
    Type,
    /// Method (constructors are [`DeclKind::Other`]).
    Method,
    /// Field or interface constant.
    Field,
    /// Enum constant.
    EnumConstant,
    /// Anything else (constructors, initializers, packages, ...).
    Other,
}

impl std::fmt::Display for DeclKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Type => write!(f, "type"),
            Self::Method => write!(f, "method"),
            Self::Field => write!(f, "field"),
            Self::EnumConstant => write!(f, "enum constant"),
            Self::Other => write!(f, "declaration"),
        }
    }
}

/// A declaration modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u16)]
pub enum Modifier {
    /// `public`
    Public = 1 << 0,
    /// `protected`
    Protected = 1 << 1,
    /// `private`
    Private = 1 << 2,
    /// `static`
    Static = 1 << 3,
    /// `final`
    Final = 1 << 4,
    /// `abstract`
    Abstract = 1 << 5,
    /// `default`
    Default = 1 << 6,
    /// `synchronized`
    Synchronized = 1 << 7,
    /// `native`
    Native = 1 << 8,
    /// `transient`
    Transient = 1 << 9,
    /// `volatile`
    Volatile = 1 << 10,
    /// `strictfp`
    Strictfp = 1 << 11,
    /// `sealed`
    Sealed = 1 << 12,
    /// `non-sealed`
    NonSealed = 1 << 13,
}

impl Modifier {
    /// Parses a modifier keyword as it appears in source.
    #[must_use]
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        let modifier = match keyword {
            "public" => Self::Public,
            "protected" => Self::Protected,
            "private" => Self::Private,
            "static" => Self::Static,
            "final" => Self::Final,
            "abstract" => Self::Abstract,
            "default" => Self::Default,
            "synchronized" => Self::Synchronized,
            "native" => Self::Native,
            "transient" => Self::Transient,
            "volatile" => Self::Volatile,
            "strictfp" => Self::Strictfp,
            "sealed" => Self::Sealed,
            "non-sealed" => Self::NonSealed,
            _ => return None,
        };
        Some(modifier)
    }

    fn bit(self) -> u16 {
        self as u16
    }
}

/// Set of modifiers attached to a declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Modifiers(u16);

impl Modifiers {
    /// Creates an empty modifier set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a modifier to the set.
    pub fn insert(&mut self, modifier: Modifier) {
        self.0 |= modifier.bit();
    }

    /// Returns true if the set contains `modifier`.
    #[must_use]
    pub fn contains(self, modifier: Modifier) -> bool {
        self.0 & modifier.bit() != 0
    }

    /// Returns true if the set contains every modifier in `modifiers`.
    #[must_use]
    pub fn contains_all(self, modifiers: &[Modifier]) -> bool {
        modifiers.iter().all(|m| self.contains(*m))
    }

    /// Returns true if no modifier is set.
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl FromIterator<Modifier> for Modifiers {
    fn from_iter<I: IntoIterator<Item = Modifier>>(iter: I) -> Self {
        let mut set = Self::new();
        for modifier in iter {
            set.insert(modifier);
        }
        set
    }
}

/// Handle to a declaration inside a [`DeclarationTree`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DeclId(usize);

/// One named program entity.
#[derive(Debug, Clone)]
pub struct Declaration {
    /// Declaration kind.
    pub kind: DeclKind,
    /// Identifier text as written in source.
    pub simple_name: String,
    /// Modifier keywords.
    pub modifiers: Modifiers,
    /// Declared directly inside an interface or annotation type.
    pub is_interface_member: bool,
    /// Enum constant, or field whose value is known at compile time.
    pub has_compile_time_constant_value: bool,
    /// Location of the identifier.
    pub location: Location,
    enclosing: Option<DeclId>,
    children: Vec<DeclId>,
}

impl Declaration {
    /// Creates a declaration with no modifiers and no location.
    #[must_use]
    pub fn new(kind: DeclKind, simple_name: impl Into<String>) -> Self {
        Self {
            kind,
            simple_name: simple_name.into(),
            modifiers: Modifiers::new(),
            is_interface_member: false,
            has_compile_time_constant_value: kind == DeclKind::EnumConstant,
            location: Location::default(),
            enclosing: None,
            children: Vec::new(),
        }
    }

    /// Sets the modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Marks the declaration as an interface member.
    #[must_use]
    pub fn interface_member(mut self, yes: bool) -> Self {
        self.is_interface_member = yes;
        self
    }

    /// Marks the declaration as carrying a compile-time constant value.
    #[must_use]
    pub fn constant_value(mut self, yes: bool) -> Self {
        self.has_compile_time_constant_value = yes;
        self
    }

    /// Sets the location of the identifier.
    #[must_use]
    pub fn at(mut self, location: Location) -> Self {
        self.location = location;
        self
    }

    /// Handle of the enclosing declaration, if any.
    #[must_use]
    pub fn enclosing(&self) -> Option<DeclId> {
        self.enclosing
    }

    /// Handles of the nested declarations, in source order.
    #[must_use]
    pub fn children(&self) -> &[DeclId] {
        &self.children
    }
}

/// Arena of the declarations of one compilation unit.
#[derive(Debug, Clone, Default)]
pub struct DeclarationTree {
    file: PathBuf,
    nodes: Vec<Declaration>,
    roots: Vec<DeclId>,
}

impl DeclarationTree {
    /// Creates an empty tree for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>) -> Self {
        Self {
            file: file.into(),
            nodes: Vec::new(),
            roots: Vec::new(),
        }
    }

    /// File this tree was built from.
    #[must_use]
    pub fn file(&self) -> &Path {
        &self.file
    }

    /// Adds `decl` as the last child of `parent`, or as a root when `parent` is `None`.
    ///
    /// A `parent` handle that does not belong to this tree makes `decl` a root.
    pub fn add(&mut self, parent: Option<DeclId>, mut decl: Declaration) -> DeclId {
        let id = DeclId(self.nodes.len());
        let parent = parent.filter(|p| p.0 < self.nodes.len());
        decl.enclosing = parent;
        decl.children.clear();
        self.nodes.push(decl);

        match parent {
            Some(p) => self.nodes[p.0].children.push(id),
            None => self.roots.push(id),
        }
        id
    }

    /// Looks up a declaration.
    #[must_use]
    pub fn get(&self, id: DeclId) -> Option<&Declaration> {
        self.nodes.get(id.0)
    }

    /// Returns the declaration enclosing `id`, if any.
    #[must_use]
    pub fn enclosing(&self, id: DeclId) -> Option<&Declaration> {
        self.get(id)
            .and_then(Declaration::enclosing)
            .and_then(|p| self.get(p))
    }

    /// Root declarations, in source order.
    #[must_use]
    pub fn roots(&self) -> &[DeclId] {
        &self.roots
    }

    /// Number of declarations in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns true if the tree holds no declarations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates over all declarations with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (DeclId, &Declaration)> {
        self.nodes.iter().enumerate().map(|(i, d)| (DeclId(i), d))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_links_parent_and_child() {
        let mut tree = DeclarationTree::new("Widget.java");
        let ty = tree.add(None, Declaration::new(DeclKind::Type, "Widget"));
        let method = tree.add(Some(ty), Declaration::new(DeclKind::Method, "render"));

        assert_eq!(tree.roots(), &[ty]);
        assert_eq!(tree.get(ty).map(|d| d.children().to_vec()), Some(vec![method]));
        assert_eq!(
            tree.enclosing(method).map(|d| d.simple_name.as_str()),
            Some("Widget")
        );
        assert!(tree.enclosing(ty).is_none());
    }

    #[test]
    fn foreign_parent_becomes_root() {
        let mut other = DeclarationTree::new("A.java");
        other.add(None, Declaration::new(DeclKind::Type, "A"));
        let foreign = other.add(None, Declaration::new(DeclKind::Type, "B"));

        let mut tree = DeclarationTree::new("C.java");
        let id = tree.add(Some(foreign), Declaration::new(DeclKind::Type, "C"));
        assert_eq!(tree.roots(), &[id]);
        assert!(tree.enclosing(id).is_none());
    }

    #[test]
    fn modifiers_contains_all() {
        let mods: Modifiers = [Modifier::Public, Modifier::Static, Modifier::Final]
            .into_iter()
            .collect();
        assert!(mods.contains_all(&[Modifier::Public, Modifier::Final]));
        assert!(!mods.contains(Modifier::Private));

        let partial: Modifiers = [Modifier::Public, Modifier::Static].into_iter().collect();
        assert!(!partial.contains_all(&[Modifier::Public, Modifier::Static, Modifier::Final]));
    }

    #[test]
    fn modifier_keywords() {
        assert_eq!(Modifier::from_keyword("non-sealed"), Some(Modifier::NonSealed));
        assert_eq!(Modifier::from_keyword("final"), Some(Modifier::Final));
        assert_eq!(Modifier::from_keyword("@Override"), None);
    }

    #[test]
    fn enum_constants_carry_constant_value() {
        assert!(Declaration::new(DeclKind::EnumConstant, "RED").has_compile_time_constant_value);
        assert!(!Declaration::new(DeclKind::Field, "red").has_compile_time_constant_value);
    }
}
