//! Shared data model for default-parameter generation.
//!
//! This crate holds everything the engine and its hosts exchange:
//!
//! - [`SemanticType`], [`QualifiedName`] and [`TypeHash`] identities
//! - declared input ([`CallableDecl`], [`ParameterDecl`]) and its normalized
//!   form ([`CallableSpec`], [`ParameterSpec`])
//! - resolved defaults ([`DefaultExpression`]) and emission plans
//! - the [`SymbolTable`] collaborator trait
//! - errors, diagnostics and [`GeneratorConfig`]

mod callable;
mod config;
mod diagnostics;
mod discovered;
mod error;
mod expr;
mod member;
mod params;
mod plan;
mod qualified_name;
mod span;
mod symbols;
mod type_hash;
mod types;

pub use callable::{CallableDecl, CallableKind, CallableSpec, GenerationMode, TargetRef};
pub use config::{GeneratorConfig, OPTION_PREFIX};
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use discovered::{DiscoveredDefault, DiscoveredDefaults, normalize};
pub use error::{
    BuilderError, ConfigError, DefaultsError, DiscoveryWarning, LiteralError, ReferenceError,
    StructuralError,
};
pub use expr::{DefaultExpression, LiteralValue, escape};
pub use member::{MemberFlags, MemberInfo, MemberKind, ScopeInfo, ScopeKind, Visibility};
pub use params::{
    DeclarationSite, DefaultSource, ParameterDecl, ParameterSpec, Reference, ReferenceKind,
    ResolvedParameter,
};
pub use plan::{
    BuilderSpec, EmissionPlan, FieldSpec, ForwardArgument, OverloadSet, Param, Placement,
    TerminalKind, Variant,
};
pub use qualified_name::QualifiedName;
pub use span::Span;
pub use symbols::{SymbolTable, builtin_supertypes, supertype_closure};
pub use type_hash::{TypeHash, hash_constants};
pub use types::{PrimitiveKind, SemanticType};
