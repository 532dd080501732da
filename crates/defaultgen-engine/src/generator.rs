//! Generator - runs every target through resolution and synthesis.
//!
//! A run has three phases:
//!
//! 1. **Prepare**: normalize declared callables; for external types, discover
//!    companion defaults, select a candidate constructor and bind it
//! 2. **Validate**: check named-mode targets against each other for builder
//!    name conflicts
//! 3. **Finish**: resolve every remaining default, then expand overloads or
//!    synthesize the builder
//!
//! Targets are independent. A failure aborts only its own target, and every
//! target gets exactly one [`TargetOutcome`], in input order.
//!
//! # Example
//!
//! ```
//! use defaultgen_core::{
//!     CallableDecl, DefaultSource, GeneratorConfig, ParameterDecl, PrimitiveKind,
//! };
//! use defaultgen_engine::{GenerationRequest, Generator};
//! use defaultgen_registry::SymbolRegistry;
//!
//! let registry = SymbolRegistry::new();
//! let request = GenerationRequest::new().with_callable(CallableDecl::constructor(
//!     "acme.Server",
//!     vec![ParameterDecl::new("port", PrimitiveKind::Int32)
//!         .with_default(DefaultSource::literal("8080"))],
//! ));
//!
//! let report = Generator::new(&registry, GeneratorConfig::default()).run(&request);
//! assert!(!report.has_errors());
//! assert_eq!(report.plans().count(), 1);
//! ```

use defaultgen_core::{
    CallableDecl, CallableSpec, DefaultsError, Diagnostic, Diagnostics, DiscoveryWarning,
    EmissionPlan, GenerationMode, GeneratorConfig, Placement, QualifiedName, ResolvedParameter,
    StructuralError, SymbolTable, TargetRef,
};
use rustc_hash::FxHashMap;

use crate::validate::{BuilderSlot, builder_name_conflicts};
use crate::{builder, discovery, literal, overload, params, resolve};

// ============================================================================
// Request and Report
// ============================================================================

/// A type the host cannot annotate, with a companion scope of defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExternalTarget {
    pub owner: QualifiedName,
    /// Scope scanned for `DEFAULT_*` fields and `default*()` factories.
    pub companion: QualifiedName,
    /// Candidate constructors of `owner`, in declaration order.
    pub candidates: Vec<CallableSpec>,
    pub mode: GenerationMode,
    pub entry_point: Option<String>,
}

impl ExternalTarget {
    pub fn new(
        owner: impl Into<QualifiedName>,
        companion: impl Into<QualifiedName>,
        candidates: Vec<CallableSpec>,
    ) -> Self {
        Self {
            owner: owner.into(),
            companion: companion.into(),
            candidates,
            mode: GenerationMode::Overloaded,
            entry_point: None,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }
}

/// Everything one run processes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationRequest {
    pub callables: Vec<CallableDecl>,
    pub external: Vec<ExternalTarget>,
}

impl GenerationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callable(mut self, decl: CallableDecl) -> Self {
        self.callables.push(decl);
        self
    }

    pub fn with_external(mut self, target: ExternalTarget) -> Self {
        self.external.push(target);
        self
    }

    pub fn len(&self) -> usize {
        self.callables.len() + self.external.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Result for one target: a plan unless an error occurred, plus diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetOutcome {
    /// Display form of the target.
    pub target: String,
    pub plan: Option<EmissionPlan>,
    pub diagnostics: Diagnostics,
}

impl TargetOutcome {
    fn failed(target: impl Into<String>, diagnostics: Diagnostics) -> Self {
        Self {
            target: target.into(),
            plan: None,
            diagnostics,
        }
    }

    pub fn is_success(&self) -> bool {
        self.plan.is_some()
    }
}

/// Outcomes of a run: declared callables first, then external targets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GenerationReport {
    pub outcomes: Vec<TargetOutcome>,
}

impl GenerationReport {
    pub fn plans(&self) -> impl Iterator<Item = &EmissionPlan> {
        self.outcomes.iter().filter_map(|o| o.plan.as_ref())
    }

    pub fn diagnostics(&self) -> impl Iterator<Item = &Diagnostic> {
        self.outcomes.iter().flat_map(|o| o.diagnostics.iter())
    }

    pub fn has_errors(&self) -> bool {
        self.outcomes.iter().any(|o| o.diagnostics.has_errors())
    }

    pub fn error_count(&self) -> usize {
        self.diagnostics().filter(|d| d.is_error()).count()
    }

    pub fn warning_count(&self) -> usize {
        self.diagnostics().filter(|d| !d.is_error()).count()
    }

    /// The outcome for a target by display name.
    pub fn outcome(&self, target: &str) -> Option<&TargetOutcome> {
        self.outcomes.iter().find(|o| o.target == target)
    }
}

// ============================================================================
// Pipeline State
// ============================================================================

enum Input<'r> {
    Callable(&'r CallableDecl),
    External(&'r ExternalTarget),
}

/// Parameters of a prepared target.
enum Parameters {
    /// Declared sources still to be resolved.
    Declared,
    /// Already bound by discovery.
    Bound(Vec<ResolvedParameter>),
}

/// A target that survived preparation.
struct Pending {
    spec: CallableSpec,
    target: TargetRef,
    placement: Placement,
    parameters: Parameters,
    diagnostics: Diagnostics,
}

type Prepared = Result<Pending, TargetOutcome>;

// ============================================================================
// Generator
// ============================================================================

/// Runs generation against a symbol table snapshot.
pub struct Generator<'a, S: SymbolTable + ?Sized> {
    symbols: &'a S,
    config: GeneratorConfig,
}

impl<'a, S: SymbolTable + ?Sized> Generator<'a, S> {
    pub fn new(symbols: &'a S, config: GeneratorConfig) -> Self {
        Self { symbols, config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Process every target of `request`.
    #[cfg_attr(feature = "profiling", profiling::function)]
    pub fn run(&self, request: &GenerationRequest) -> GenerationReport {
        if self.config.parallel && !cfg!(feature = "parallel") {
            tracing::warn!("parallel generation requested but the `parallel` feature is disabled");
        }
        tracing::debug!(
            callables = request.callables.len(),
            external = request.external.len(),
            parallel = self.config.parallel,
            "generation started"
        );

        let inputs: Vec<Input<'_>> = request
            .callables
            .iter()
            .map(Input::Callable)
            .chain(request.external.iter().map(Input::External))
            .collect();

        let prepared = map_all(self.config.parallel, inputs, |input| self.prepare(input));
        let validated = self.validate(prepared);
        let outcomes = map_all(self.config.parallel, validated, |item| match item {
            Ok(pending) => self.finish(pending),
            Err(outcome) => outcome,
        });

        let report = GenerationReport { outcomes };
        tracing::debug!(
            targets = report.outcomes.len(),
            plans = report.plans().count(),
            errors = report.error_count(),
            warnings = report.warning_count(),
            "generation finished"
        );
        report
    }

    // ==========================================================================
    // Phase 1: Prepare
    // ==========================================================================

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn prepare(&self, input: Input<'_>) -> Prepared {
        match input {
            Input::Callable(decl) => self.prepare_declared(decl),
            Input::External(external) => self.prepare_external(external),
        }
    }

    fn prepare_declared(&self, decl: &CallableDecl) -> Prepared {
        let spec = params::normalize(decl).map_err(|diagnostics| {
            TargetOutcome::failed(decl.target().to_string(), diagnostics)
        })?;
        Ok(Pending {
            target: spec.target(),
            spec,
            placement: Placement::Owner,
            parameters: Parameters::Declared,
            diagnostics: Diagnostics::new(),
        })
    }

    fn prepare_external(&self, external: &ExternalTarget) -> Prepared {
        let discovered = discovery::discover(&external.companion, self.symbols);
        let Some(selected) = discovery::select_best(&external.candidates, &discovered) else {
            let warning = DiscoveryWarning::NoDefaultsFound {
                target: external.owner.to_string(),
                companion: external.companion.simple_name().to_string(),
            };
            tracing::warn!(
                owner = %external.owner,
                companion = %external.companion,
                "no defaults found"
            );
            return Err(TargetOutcome::failed(
                external.owner.to_string(),
                Diagnostic::warning(external.owner.to_string(), warning).into(),
            ));
        };

        let mut spec = selected.clone();
        spec.mode = external.mode;
        spec.entry_point = external.entry_point.clone();

        let (bound, diagnostics) =
            discovery::bind(&spec, &discovered, self.symbols, self.config.warn_unmatched);
        let target = spec.target();
        if diagnostics.has_errors() {
            return Err(TargetOutcome::failed(target.to_string(), diagnostics));
        }
        Ok(Pending {
            spec,
            target,
            placement: Placement::Utility(self.config.utility_namespace.clone()),
            parameters: Parameters::Bound(bound),
            diagnostics,
        })
    }

    // ==========================================================================
    // Phase 2: Validate
    // ==========================================================================

    fn validate(&self, prepared: Vec<Prepared>) -> Vec<Prepared> {
        let named: Vec<usize> = prepared
            .iter()
            .enumerate()
            .filter_map(|(index, item)| match item {
                Ok(pending) if pending.spec.mode == GenerationMode::Named => Some(index),
                _ => None,
            })
            .collect();

        let mut conflicts: FxHashMap<usize, StructuralError> = FxHashMap::default();
        {
            let slots: Vec<BuilderSlot<'_>> = named
                .iter()
                .filter_map(|&index| prepared[index].as_ref().ok())
                .map(|pending| BuilderSlot {
                    target: &pending.target,
                    placement: &pending.placement,
                })
                .collect();
            for (slot, err) in builder_name_conflicts(&slots, &self.config.builder_suffix) {
                conflicts.insert(named[slot], err);
            }
        }
        if conflicts.is_empty() {
            return prepared;
        }

        prepared
            .into_iter()
            .enumerate()
            .map(|(index, item)| match (item, conflicts.remove(&index)) {
                (Ok(mut pending), Some(err)) => {
                    let target = pending.target.to_string();
                    pending
                        .diagnostics
                        .push(Diagnostic::error(target.as_str(), err));
                    Err(TargetOutcome::failed(target, pending.diagnostics))
                }
                (item, _) => item,
            })
            .collect()
    }

    // ==========================================================================
    // Phase 3: Finish
    // ==========================================================================

    #[cfg_attr(feature = "profiling", profiling::function)]
    fn finish(&self, pending: Pending) -> TargetOutcome {
        let Pending {
            spec,
            target,
            placement,
            parameters,
            mut diagnostics,
        } = pending;
        let name = target.to_string();

        let resolved = match parameters {
            Parameters::Bound(bound) => bound,
            Parameters::Declared => self.resolve_parameters(&spec, &name, &mut diagnostics),
        };
        if diagnostics.has_errors() {
            return TargetOutcome::failed(name, diagnostics);
        }

        let plan = match spec.mode {
            GenerationMode::Overloaded => match overload::generate(&target, &resolved) {
                Ok(set) => EmissionPlan::OverloadSet(set),
                Err(err) => {
                    diagnostics.push(Diagnostic::error(name.as_str(), err));
                    return TargetOutcome::failed(name, diagnostics);
                }
            },
            GenerationMode::Named => {
                EmissionPlan::Builder(builder::synthesize(&spec, &resolved, &self.config))
            }
        };

        TargetOutcome {
            target: name,
            plan: Some(plan.with_placement(placement)),
            diagnostics,
        }
    }

    /// Resolve every parameter, collecting one diagnostic per failure.
    fn resolve_parameters(
        &self,
        spec: &CallableSpec,
        target: &str,
        diagnostics: &mut Diagnostics,
    ) -> Vec<ResolvedParameter> {
        spec.parameters
            .iter()
            .map(|param| {
                let Some(source) = &param.default_source else {
                    return ResolvedParameter::required(param.name.as_str(), param.ty.clone());
                };
                let resolved: Result<_, DefaultsError> = match source.reference_kind() {
                    None => literal::coerce(source.text(), &param.ty).map_err(Into::into),
                    Some(kind) => resolve::resolve_reference(
                        source.text(),
                        kind,
                        &param.ty,
                        &spec.owner,
                        self.symbols,
                    )
                    .map_err(Into::into),
                };
                match resolved {
                    Ok(expression) => ResolvedParameter::defaulted(
                        param.name.as_str(),
                        param.ty.clone(),
                        expression,
                    ),
                    Err(err) => {
                        tracing::debug!(
                            %target,
                            parameter = %param.name,
                            error = %err,
                            "default rejected"
                        );
                        diagnostics.push(
                            Diagnostic::error(target, err)
                                .with_parameter(param.name.as_str())
                                .with_span(param.span),
                        );
                        ResolvedParameter::required(param.name.as_str(), param.ty.clone())
                    }
                }
            })
            .collect()
    }
}

/// Map `items` in order, on the rayon pool when `parallel` is set.
#[cfg(feature = "parallel")]
fn map_all<T, U, F>(parallel: bool, items: Vec<T>, f: F) -> Vec<U>
where
    T: Send,
    U: Send,
    F: Fn(T) -> U + Sync + Send,
{
    use rayon::prelude::*;

    if parallel {
        items.into_par_iter().map(f).collect()
    } else {
        items.into_iter().map(f).collect()
    }
}

#[cfg(not(feature = "parallel"))]
fn map_all<T, U, F>(_parallel: bool, items: Vec<T>, f: F) -> Vec<U>
where
    F: Fn(T) -> U,
{
    items.into_iter().map(f).collect()
}
