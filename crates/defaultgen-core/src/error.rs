//! Error taxonomy for default resolution and generation.
//!
//! ## Error Hierarchy
//!
//! ```text
//! DefaultsError (top-level wrapper)
//! ├── LiteralError      - literal text rejected for the parameter type
//! ├── ReferenceError    - field/factory reference did not resolve
//! ├── StructuralError   - target cannot be generated (fatal for that target)
//! ├── DiscoveryWarning  - advisory findings of convention discovery
//! ├── BuilderError      - failure raised by a synthesized builder terminal
//! └── ConfigError       - malformed generator options
//! ```
//!
//! Messages quote the offending reference or value verbatim and name the
//! scope it was looked up in by its simple name.

use thiserror::Error;

use crate::{DeclarationSite, ReferenceKind, SemanticType};

// ============================================================================
// Literal Errors
// ============================================================================

/// A literal default that does not fit its parameter type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LiteralError {
    /// The text is not a valid value of the type, or is out of range.
    #[error("cannot parse default \"{text}\" as {ty}")]
    NotParseable { text: String, ty: SemanticType },

    /// `null` used for a primitive parameter.
    #[error("default \"null\" is not allowed for primitive type {ty}")]
    NullOnPrimitive { ty: SemanticType },

    /// Empty text used for anything other than a string.
    #[error("empty default \"\" is only allowed for String, not {ty}")]
    EmptyNotAllowed { ty: SemanticType },
}

// ============================================================================
// Reference Errors
// ============================================================================

/// A field or factory reference that could not be used as a default.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    /// The reference text is empty.
    #[error("default reference is empty")]
    EmptyReference,

    /// `"Qualifier."` with nothing after the separator.
    #[error("reference \"{reference}\" has no member name after the last '.'")]
    EmptyMemberName { reference: String },

    /// The qualifier names no known scope.
    #[error(
        "cannot resolve type \"{qualifier}\" in reference \"{reference}\" from {scope}; \
         types outside the current namespace must be fully qualified"
    )]
    UnknownScope {
        reference: String,
        qualifier: String,
        scope: String,
    },

    /// The member exists but is an instance member.
    #[error("{kind} \"{member}\" in {scope} must be static (referenced as \"{reference}\")")]
    NotStatic {
        reference: String,
        member: String,
        scope: String,
        kind: ReferenceKind,
    },

    /// The factory method declares parameters.
    #[error(
        "factory method \"{member}\" in {scope} must take no arguments but takes {count} \
         (referenced as \"{reference}\")"
    )]
    TakesArguments {
        reference: String,
        member: String,
        scope: String,
        count: usize,
    },

    /// The factory method returns nothing.
    #[error("factory method \"{member}\" in {scope} returns void (referenced as \"{reference}\")")]
    VoidReturn {
        reference: String,
        member: String,
        scope: String,
    },

    /// The member's type cannot be assigned to the parameter.
    #[error(
        "{kind} \"{member}\" in {scope} has type {found}, which is not assignable to {expected} \
         (referenced as \"{reference}\")"
    )]
    TypeMismatch {
        reference: String,
        member: String,
        scope: String,
        kind: ReferenceKind,
        found: SemanticType,
        expected: SemanticType,
    },

    /// No member of that name. Carries a suggestion or the candidates.
    #[error(
        "{kind} \"{member}\" not found in {scope} (referenced as \"{reference}\"); {}",
        not_found_hint(*kind, suggestion.as_deref(), candidates)
    )]
    NotFound {
        reference: String,
        member: String,
        scope: String,
        kind: ReferenceKind,
        suggestion: Option<String>,
        candidates: Vec<String>,
    },
}

impl ReferenceError {
    /// The reference text as written, when the error has one.
    pub fn reference(&self) -> Option<&str> {
        match self {
            ReferenceError::EmptyReference => None,
            ReferenceError::EmptyMemberName { reference }
            | ReferenceError::UnknownScope { reference, .. }
            | ReferenceError::NotStatic { reference, .. }
            | ReferenceError::TakesArguments { reference, .. }
            | ReferenceError::VoidReturn { reference, .. }
            | ReferenceError::TypeMismatch { reference, .. }
            | ReferenceError::NotFound { reference, .. } => Some(reference),
        }
    }

    /// The typo suggestion of a `NotFound`.
    pub fn suggestion(&self) -> Option<&str> {
        match self {
            ReferenceError::NotFound { suggestion, .. } => suggestion.as_deref(),
            _ => None,
        }
    }
}

fn not_found_hint(kind: ReferenceKind, suggestion: Option<&str>, candidates: &[String]) -> String {
    if let Some(suggestion) = suggestion {
        return format!("did you mean \"{suggestion}\"?");
    }
    if !candidates.is_empty() {
        return format!("available: {}", candidates.join(", "));
    }
    match kind {
        ReferenceKind::Field => "declare a static field with that name".to_string(),
        ReferenceKind::Factory => {
            "declare a static, zero-argument, non-void method with that name".to_string()
        }
    }
}

// ============================================================================
// Structural Errors
// ============================================================================

/// A target whose shape prevents generation. Fatal for that target only.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// A required parameter follows a defaulted one in overloaded mode.
    #[error(
        "parameter \"{name}\" (index {at}) of {target} has no default but follows a defaulted \
         parameter; defaults must run to the end of the list unless named mode is used"
    )]
    NonConsecutiveDefault {
        target: String,
        at: usize,
        name: String,
    },

    /// Distinct named-mode targets would synthesize the same builder type.
    #[error(
        "builder name \"{name}\" in namespace \"{namespace}\" is synthesized by more than one \
         target: {}",
        targets.join(", ")
    )]
    BuilderNameConflict {
        name: String,
        namespace: String,
        targets: Vec<String>,
    },

    /// More than one default declared at the same site.
    #[error(
        "parameter \"{parameter}\" declares {} defaults on the {site}: {}",
        sources.len(),
        sources.join(", ")
    )]
    DuplicateDefaultSource {
        parameter: String,
        site: DeclarationSite,
        sources: Vec<String>,
    },
}

// ============================================================================
// Discovery Warnings
// ============================================================================

/// Advisory findings of convention discovery. Never abort a target.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiscoveryWarning {
    /// No candidate matched any discovered default.
    #[error("no defaults in {companion} match any constructor of {target}")]
    NoDefaultsFound { target: String, companion: String },

    /// A discovered default names no parameter of the selected candidate.
    #[error("default \"{original_name}\" in {companion} matches no parameter of {target}")]
    UnmatchedDefault {
        original_name: String,
        companion: String,
        target: String,
    },

    /// Several companion members normalize to the bound key.
    #[error(
        "parameter \"{parameter}\" matches several defaults in {companion} ({}); using \"{chosen}\"",
        contributors.join(", ")
    )]
    AmbiguousDefault {
        parameter: String,
        companion: String,
        contributors: Vec<String>,
        chosen: String,
    },
}

// ============================================================================
// Builder Errors
// ============================================================================

/// Failure raised by a synthesized builder's terminal operation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuilderError {
    #[error("required field \"{name}\" was not set")]
    RequiredFieldUnset { name: String },
}

// ============================================================================
// Config Errors
// ============================================================================

/// Malformed generator options.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// An option with the generator prefix that is not recognized.
    #[error("unknown option \"{key}\"")]
    UnknownOption { key: String },

    /// A value that does not parse for its option.
    #[error("option \"{key}\" expects {expected}, got \"{value}\"")]
    InvalidValue {
        key: String,
        value: String,
        expected: &'static str,
    },
}

// ============================================================================
// Unified Error Type
// ============================================================================

/// Any error or warning produced while generating defaults.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DefaultsError {
    #[error(transparent)]
    Literal(#[from] LiteralError),

    #[error(transparent)]
    Reference(#[from] ReferenceError),

    #[error(transparent)]
    Structural(#[from] StructuralError),

    #[error(transparent)]
    Discovery(#[from] DiscoveryWarning),

    #[error(transparent)]
    Builder(#[from] BuilderError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl DefaultsError {
    pub fn is_literal(&self) -> bool {
        matches!(self, DefaultsError::Literal(_))
    }

    pub fn is_reference(&self) -> bool {
        matches!(self, DefaultsError::Reference(_))
    }

    pub fn is_structural(&self) -> bool {
        matches!(self, DefaultsError::Structural(_))
    }

    pub fn is_discovery(&self) -> bool {
        matches!(self, DefaultsError::Discovery(_))
    }

    pub fn is_builder(&self) -> bool {
        matches!(self, DefaultsError::Builder(_))
    }

    pub fn is_config(&self) -> bool {
        matches!(self, DefaultsError::Config(_))
    }
}

// ============================================================================
// Tests
// ============================================================================
