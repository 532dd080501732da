//! Convention discovery for externally-owned types.
//!
//! A type the host cannot annotate gets its defaults from a companion scope
//! by naming convention:
//!
//! - a static field `DEFAULT_<NAME>` supplies the default for `name`
//! - a static, zero-argument, non-void method `default<Name>()` does the same
//!
//! Names are compared after [`normalize`], so `DEFAULT_HOST_NAME` matches a
//! parameter called `hostName`. [`select_best`] then picks the candidate
//! constructor that uses the most discovered defaults, and [`bind`] matches
//! its parameters.

mod selection;

pub use selection::{score, select_best};

use defaultgen_core::{
    CallableSpec, DefaultExpression, Diagnostic, Diagnostics, DiscoveredDefault, DiscoveredDefaults,
    DiscoveryWarning, MemberInfo, QualifiedName, ReferenceError, ReferenceKind, ResolvedParameter,
    SymbolTable, Visibility, normalize,
};
use rustc_hash::FxHashSet;

const FIELD_PREFIX: &str = "DEFAULT_";
const FACTORY_PREFIX: &str = "default";

/// Scan the companion scope for convention-named defaults.
///
/// Private members are skipped. Members are scanned in declaration order; on
/// a key collision the last one scanned is bound.
pub fn discover<S: SymbolTable + ?Sized>(
    companion: &QualifiedName,
    symbols: &S,
) -> DiscoveredDefaults {
    let mut discovered = DiscoveredDefaults::new(companion.clone());
    for member in symbols.members_of(companion) {
        if member.visibility == Visibility::Private {
            continue;
        }
        if let Some(default) = classify(companion, &member) {
            tracing::trace!(
                member = %member.name,
                key = %default.normalized_name,
                kind = %default.source_kind,
                "discovered default"
            );
            discovered.insert(default);
        }
    }
    tracing::debug!(%companion, defaults = discovered.len(), "discovered companion defaults");
    discovered
}

/// Recognize one of the two convention shapes.
fn classify(companion: &QualifiedName, member: &MemberInfo) -> Option<DiscoveredDefault> {
    let (suffix, source_kind) = if member.is_static_field() {
        (field_suffix(&member.name)?, ReferenceKind::Field)
    } else if member.is_static_factory() {
        (factory_suffix(&member.name)?, ReferenceKind::Factory)
    } else {
        return None;
    };

    let path = companion.child(member.name.as_str());
    Some(DiscoveredDefault {
        normalized_name: normalize(suffix),
        expression: match source_kind {
            ReferenceKind::Field => DefaultExpression::Field(path),
            ReferenceKind::Factory => DefaultExpression::Factory(path),
        },
        original_name: member.name.clone(),
        source_kind,
        value_type: member.value_type.clone(),
    })
}

/// `DEFAULT_` prefix in any case, with something after it.
fn field_suffix(name: &str) -> Option<&str> {
    let prefix = name.get(..FIELD_PREFIX.len())?;
    let suffix = &name[FIELD_PREFIX.len()..];
    (prefix.eq_ignore_ascii_case(FIELD_PREFIX) && !suffix.is_empty()).then_some(suffix)
}

/// `default` prefix with something after it.
fn factory_suffix(name: &str) -> Option<&str> {
    name.strip_prefix(FACTORY_PREFIX).filter(|s| !s.is_empty())
}

/// Match each parameter of the selected candidate to a discovered default.
///
/// Parameters with no matching key stay required. A matched default whose
/// type is not assignable to the parameter is an error on that parameter.
/// Colliding keys that end up bound, and keys that match no parameter, are
/// reported as warnings.
pub fn bind<S: SymbolTable + ?Sized>(
    candidate: &CallableSpec,
    discovered: &DiscoveredDefaults,
    symbols: &S,
    warn_unmatched: bool,
) -> (Vec<ResolvedParameter>, Diagnostics) {
    let target = candidate.target().to_string();
    let companion = discovered.companion().simple_name();
    let mut diagnostics = Diagnostics::new();
    let mut used: FxHashSet<String> = FxHashSet::default();

    let params: Vec<ResolvedParameter> = candidate
        .parameters
        .iter()
        .map(|param| {
            let key = normalize(&param.name);
            let Some(default) = discovered.get(&key) else {
                return ResolvedParameter::required(param.name.as_str(), param.ty.clone());
            };
            used.insert(key.clone());

            if discovered.is_ambiguous(&key) {
                let warning = DiscoveryWarning::AmbiguousDefault {
                    parameter: param.name.clone(),
                    companion: companion.to_string(),
                    contributors: discovered
                        .contributors(&key)
                        .iter()
                        .map(|d| d.original_name.clone())
                        .collect(),
                    chosen: default.original_name.clone(),
                };
                diagnostics.push(
                    Diagnostic::warning(target.as_str(), warning)
                        .with_parameter(param.name.as_str()),
                );
            }

            if !symbols.is_assignable(&default.value_type, &param.ty) {
                let err = ReferenceError::TypeMismatch {
                    reference: default.original_name.clone(),
                    member: default.original_name.clone(),
                    scope: companion.to_string(),
                    kind: default.source_kind,
                    found: default.value_type.clone(),
                    expected: param.ty.clone(),
                };
                diagnostics.push(
                    Diagnostic::error(target.as_str(), err)
                        .with_parameter(param.name.as_str())
                        .with_span(param.span),
                );
                return ResolvedParameter::required(param.name.as_str(), param.ty.clone());
            }

            ResolvedParameter::defaulted(
                param.name.as_str(),
                param.ty.clone(),
                default.expression.clone(),
            )
        })
        .collect();

    if warn_unmatched {
        for default in discovered.iter().filter(|d| !used.contains(&d.normalized_name)) {
            diagnostics.push(Diagnostic::warning(
                target.as_str(),
                DiscoveryWarning::UnmatchedDefault {
                    original_name: default.original_name.clone(),
                    companion: companion.to_string(),
                    target: target.clone(),
                },
            ));
        }
    }

    tracing::debug!(
        %target,
        bound = used.len(),
        warnings = diagnostics.warnings().count(),
        "bound discovered defaults"
    );
    (params, diagnostics)
}
