//! Naming policies and policy selection.

use crate::declaration::{DeclKind, Declaration, Modifier};

/// A fixed naming convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Policy {
    /// `FooBar` (types).
    UpperCamelCase,
    /// `fooBar` (methods and non-constant fields).
    LowerCamelCase,
    /// `FOO_BAR` (constants and enum constants).
    ScreamingSnakeCase,
    /// Not checked.
    Unchecked,
}

/// Why a field-like declaration is treated as a constant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConstantReason {
    /// Declared as an enum constant.
    EnumConstant,
    /// Has a value known at compile time.
    CompileTimeConstant,
    /// Fields of interfaces are implicitly `public static final`.
    InterfaceMember,
    /// Explicitly `public static final`.
    PublicStaticFinal,
}

type ConstantRule = (ConstantReason, fn(&Declaration) -> bool);

/// Constant detection rules, in precedence order. The first match wins.
pub const CONSTANT_RULES: &[ConstantRule] = &[
    (ConstantReason::EnumConstant, is_enum_constant),
    (ConstantReason::CompileTimeConstant, has_constant_value),
    (ConstantReason::InterfaceMember, is_interface_member),
    (ConstantReason::PublicStaticFinal, is_public_static_final),
];

fn is_enum_constant(decl: &Declaration) -> bool {
    decl.kind == DeclKind::EnumConstant
}

fn has_constant_value(decl: &Declaration) -> bool {
    decl.has_compile_time_constant_value
}

fn is_interface_member(decl: &Declaration) -> bool {
    decl.is_interface_member
}

fn is_public_static_final(decl: &Declaration) -> bool {
    decl.modifiers
        .contains_all(&[Modifier::Public, Modifier::Static, Modifier::Final])
}

/// Returns the first constant rule matching `decl`.
///
/// Only meaningful for fields and enum constants.
#[must_use]
pub fn constant_reason(decl: &Declaration) -> Option<ConstantReason> {
    CONSTANT_RULES
        .iter()
        .find(|(_, matches)| matches(decl))
        .map(|(reason, _)| *reason)
}

/// Selects the naming policy for a declaration.
///
/// Depends only on the declaration's kind, modifiers and flags.
#[must_use]
pub fn select(decl: &Declaration) -> Policy {
    match decl.kind {
        DeclKind::Type => Policy::UpperCamelCase,
        DeclKind::Method => Policy::LowerCamelCase,
        DeclKind::Field | DeclKind::EnumConstant => {
            if constant_reason(decl).is_some() {
                Policy::ScreamingSnakeCase
            } else {
                Policy::LowerCamelCase
            }
        }
        DeclKind::Other => Policy::Unchecked,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::declaration::Modifiers;

    fn field(name: &str) -> Declaration {
        Declaration::new(DeclKind::Field, name)
    }

    fn mods(list: &[Modifier]) -> Modifiers {
        list.iter().copied().collect()
    }

    #[test]
    fn kinds_map_to_policies() {
        assert_eq!(select(&Declaration::new(DeclKind::Type, "A")), Policy::UpperCamelCase);
        assert_eq!(select(&Declaration::new(DeclKind::Method, "a")), Policy::LowerCamelCase);
        assert_eq!(select(&Declaration::new(DeclKind::Other, "a")), Policy::Unchecked);
        assert_eq!(select(&field("a")), Policy::LowerCamelCase);
    }

    #[test]
    fn enum_constant_wins_first() {
        let decl = Declaration::new(DeclKind::EnumConstant, "Red").constant_value(false);
        assert_eq!(constant_reason(&decl), Some(ConstantReason::EnumConstant));
        assert_eq!(select(&decl), Policy::ScreamingSnakeCase);
    }

    #[test]
    fn compile_time_constant_precedes_interface_rule() {
        let decl = field("limit").constant_value(true).interface_member(true);
        assert_eq!(constant_reason(&decl), Some(ConstantReason::CompileTimeConstant));
    }

    #[test]
    fn interface_member_without_modifiers_is_constant() {
        let decl = field("timeout").interface_member(true);
        assert_eq!(constant_reason(&decl), Some(ConstantReason::InterfaceMember));
        assert_eq!(select(&decl), Policy::ScreamingSnakeCase);
    }

    #[test]
    fn public_static_final_is_constant() {
        let decl =
            field("maxSize").with_modifiers(mods(&[Modifier::Public, Modifier::Static, Modifier::Final]));
        assert_eq!(constant_reason(&decl), Some(ConstantReason::PublicStaticFinal));
    }

    #[test]
    fn partial_modifier_sets_are_not_constants() {
        for list in [
            &[Modifier::Private, Modifier::Static, Modifier::Final][..],
            &[Modifier::Public, Modifier::Final][..],
            &[Modifier::Static, Modifier::Final][..],
        ] {
            let decl = field("cache").with_modifiers(mods(list));
            assert_eq!(select(&decl), Policy::LowerCamelCase);
        }
    }
}
