//! defaultgen - default-parameter expansion and builder synthesis.
//!
//! Callables whose parameters declare fallback values (literals, static
//! fields or zero-argument factories) are turned into emission plans: a
//! family of forwarding overloads, or a fluent builder. Types the host
//! cannot annotate get their defaults from a companion scope by naming
//! convention.
//!
//! The crates behind this facade:
//!
//! - [`core`]: the data model, errors and the [`SymbolTable`](core::SymbolTable) trait
//! - [`registry`]: an in-memory symbol table
//! - [`engine`]: resolution, expansion, synthesis and the [`Generator`](engine::Generator)

pub use defaultgen_core as core;
pub use defaultgen_engine as engine;
pub use defaultgen_registry as registry;

use defaultgen_core::{ConfigError, GeneratorConfig, SymbolTable};
use defaultgen_engine::{GenerationReport, GenerationRequest, Generator};

/// Run a request with configuration read from host option pairs.
///
/// # Errors
///
/// Returns the first malformed `defaultgen.*` option. Generation problems are
/// reported per target in the returned report, never as an `Err`.
#[cfg_attr(feature = "profiling", profiling::function)]
pub fn generate_with_options<S, I, K, V>(
    symbols: &S,
    options: I,
    request: &GenerationRequest,
) -> Result<GenerationReport, ConfigError>
where
    S: SymbolTable + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: AsRef<str>,
    V: AsRef<str>,
{
    let config = GeneratorConfig::from_options(options)?;
    tracing::info!(
        entry_point = %config.entry_point,
        builder_suffix = %config.builder_suffix,
        utility_namespace = %config.utility_namespace,
        targets = request.len(),
        "running default generation"
    );
    Ok(Generator::new(symbols, config).run(request))
}

pub mod prelude {
    pub use defaultgen_core::{
        BuilderSpec, CallableDecl, CallableKind, CallableSpec, DefaultExpression, DefaultSource,
        DefaultsError, Diagnostic, Diagnostics, EmissionPlan, GenerationMode, GeneratorConfig,
        MemberInfo, OverloadSet, ParameterDecl, ParameterSpec, Placement, PrimitiveKind,
        QualifiedName, ScopeInfo, ScopeKind, SemanticType, Span, SymbolTable,
    };
    pub use defaultgen_engine::{
        ExternalTarget, GenerationReport, GenerationRequest, Generator, TargetOutcome,
    };
    pub use defaultgen_registry::SymbolRegistry;

    pub use crate::generate_with_options;
}
