//! Identifier classifier.
//!
//! Pure functions deciding whether one identifier conforms to one naming
//! policy. They look at Unicode code points only, never at the tree.

use crate::policy::Policy;

/// Why an identifier does not conform to its policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NamingIssue {
    /// The identifier is empty.
    EmptyIdentifier,
    /// Starts with an uppercase letter where lowercase is required.
    ShouldStartLowercase,
    /// Starts with a lowercase letter where uppercase is required.
    ShouldStartUppercase,
    /// Starts with a non-letter, or has two consecutive uppercase letters.
    NotCamelCase,
    /// Not of the form `UPPER_CASE_WITH_SINGLE_UNDERSCORES`.
    NotAllCaps,
}

impl NamingIssue {
    /// Human-readable message about `name`.
    #[must_use]
    pub fn message(self, name: &str) -> String {
        match self {
            Self::EmptyIdentifier => "Unnamed or empty identifier".to_string(),
            Self::ShouldStartLowercase => {
                format!("Name `{name}` should start with a lowercase letter")
            }
            Self::ShouldStartUppercase => {
                format!("Name `{name}` should start with an uppercase letter")
            }
            Self::NotCamelCase => format!("Name `{name}` should follow camelCase convention"),
            Self::NotAllCaps => format!(
                "Constant `{name}` should be all uppercase letters/underscores, starting with an uppercase letter"
            ),
        }
    }
}

/// Checks `name` against the given policy.
///
/// [`Policy::Unchecked`] never reports.
#[must_use]
pub fn check(name: &str, policy: Policy) -> Option<NamingIssue> {
    match policy {
        Policy::UpperCamelCase => check_camel_case(name, true),
        Policy::LowerCamelCase => check_camel_case(name, false),
        Policy::ScreamingSnakeCase => check_all_caps(name),
        Policy::Unchecked => None,
    }
}

/// Checks that `name` is camelCase with the required initial case.
///
/// An initial-case mismatch is reported alone; the rest of the name is not
/// scanned in that case. After a matching first letter, two consecutive
/// uppercase code points make the name non-conforming. Digits and
/// underscores are tolerated anywhere after the first code point.
#[must_use]
pub fn check_camel_case(name: &str, require_initial_upper: bool) -> Option<NamingIssue> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some(NamingIssue::EmptyIdentifier);
    };

    let mut previous_upper = false;
    if first.is_uppercase() {
        if !require_initial_upper {
            return Some(NamingIssue::ShouldStartLowercase);
        }
        previous_upper = true;
    } else if first.is_lowercase() {
        if require_initial_upper {
            return Some(NamingIssue::ShouldStartUppercase);
        }
    } else {
        return Some(NamingIssue::NotCamelCase);
    }

    for c in chars {
        let upper = c.is_uppercase();
        if upper && previous_upper {
            return Some(NamingIssue::NotCamelCase);
        }
        previous_upper = upper;
    }

    None
}

/// Checks that `name` is `SCREAMING_SNAKE_CASE`.
///
/// The first code point must be an uppercase letter; the rest may be
/// uppercase letters, decimal digits `0-9`, or underscores that never appear
/// twice in a row.
#[must_use]
pub fn check_all_caps(name: &str) -> Option<NamingIssue> {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return Some(NamingIssue::EmptyIdentifier);
    };
    if !first.is_uppercase() {
        return Some(NamingIssue::NotAllCaps);
    }

    let mut previous_underscore = false;
    for c in chars {
        if c == '_' {
            if previous_underscore {
                return Some(NamingIssue::NotAllCaps);
            }
            previous_underscore = true;
        } else {
            previous_underscore = false;
            if !c.is_uppercase() && !c.is_ascii_digit() {
                return Some(NamingIssue::NotAllCaps);
            }
        }
    }

    None
}
