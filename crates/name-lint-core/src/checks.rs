//! Catalogue of the naming checks and their stable codes.

use crate::classifier::NamingIssue;
use crate::declaration::{DeclKind, Declaration};
use crate::policy::Policy;

/// One kind of report the walker can emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Check {
    /// A checked declaration has an empty name.
    EmptyIdentifier,
    /// Type names are `UpperCamelCase`.
    TypeName,
    /// Method names are `lowerCamelCase`.
    MethodName,
    /// A method is named like its enclosing type.
    MethodShadowsType,
    /// Non-constant field names are `lowerCamelCase`.
    FieldName,
    /// Constants and enum constants are `SCREAMING_SNAKE_CASE`.
    ConstantName,
}

impl Check {
    /// Every check, in code order.
    pub const ALL: [Self; 6] = [
        Self::EmptyIdentifier,
        Self::TypeName,
        Self::MethodName,
        Self::MethodShadowsType,
        Self::FieldName,
        Self::ConstantName,
    ];

    /// Check code (e.g., "NL001").
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::EmptyIdentifier => "NL000",
            Self::TypeName => "NL001",
            Self::MethodName => "NL002",
            Self::MethodShadowsType => "NL003",
            Self::FieldName => "NL004",
            Self::ConstantName => "NL005",
        }
    }

    /// Kebab-case check name (e.g., "type-name").
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EmptyIdentifier => "empty-identifier",
            Self::TypeName => "type-name",
            Self::MethodName => "method-name",
            Self::MethodShadowsType => "method-shadows-type",
            Self::FieldName => "field-name",
            Self::ConstantName => "constant-name",
        }
    }

    /// Brief description of what this check reports.
    #[must_use]
    pub fn description(self) -> &'static str {
        match self {
            Self::EmptyIdentifier => "Checked declarations must have a non-empty name",
            Self::TypeName => "Type names are UpperCamelCase",
            Self::MethodName => "Method names are lowerCamelCase",
            Self::MethodShadowsType => {
                "Methods must not share the enclosing type's name (confusable with a constructor)"
            }
            Self::FieldName => "Non-constant field names are lowerCamelCase",
            Self::ConstantName => "Constants and enum constants are SCREAMING_SNAKE_CASE",
        }
    }

    /// Looks a check up by name or code.
    #[must_use]
    pub fn from_name_or_code(key: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|c| c.name() == key || c.code() == key)
    }

    /// The check responsible for a classifier finding on `decl` under `policy`.
    #[must_use]
    pub fn for_issue(decl: &Declaration, policy: Policy, issue: NamingIssue) -> Self {
        if issue == NamingIssue::EmptyIdentifier {
            return Self::EmptyIdentifier;
        }
        match (decl.kind, policy) {
            (DeclKind::Type, _) => Self::TypeName,
            (DeclKind::Method, _) => Self::MethodName,
            (_, Policy::ScreamingSnakeCase) => Self::ConstantName,
            _ => Self::FieldName,
        }
    }
}

impl std::fmt::Display for Check {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Help text attached to a classifier finding.
#[must_use]
pub fn help_for(issue: NamingIssue) -> Option<&'static str> {
    match issue {
        NamingIssue::EmptyIdentifier => None,
        NamingIssue::ShouldStartLowercase => Some("Start the name with a lowercase letter"),
        NamingIssue::ShouldStartUppercase => Some("Start the name with an uppercase letter"),
        NamingIssue::NotCamelCase => Some(
            "Start with a letter and capitalize only the first letter of each word, e.g. `getHttpCode`",
        ),
        NamingIssue::NotAllCaps => Some(
            "Use uppercase letters and digits separated by single underscores, e.g. `MAX_SIZE`",
        ),
    }
}
