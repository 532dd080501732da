//! Parameter model: normalizing declared parameters.
//!
//! A parameter of a record-like owner can carry a default on the parameter
//! itself and on the record component it mirrors. The owner site wins. More
//! than one default at a single site is a structural error.

use defaultgen_core::{
    CallableDecl, CallableSpec, DeclarationSite, DefaultSource, Diagnostic, Diagnostics,
    ParameterDecl, ParameterSpec, ScopeKind, StructuralError,
};

/// Normalize a declaration into a spec with at most one default per parameter.
///
/// Every duplicate is reported before failing.
pub fn normalize(decl: &CallableDecl) -> Result<CallableSpec, Diagnostics> {
    let target = decl.target().to_string();
    let mut diagnostics = Diagnostics::new();
    let mut parameters = Vec::with_capacity(decl.parameters.len());

    for param in &decl.parameters {
        for (site, sources) in [
            (DeclarationSite::Parameter, &param.parameter_site),
            (DeclarationSite::Owner, &param.owner_site),
        ] {
            if sources.len() > 1 {
                let err = StructuralError::DuplicateDefaultSource {
                    parameter: param.name.clone(),
                    site,
                    sources: sources.iter().map(DefaultSource::to_string).collect(),
                };
                diagnostics.push(
                    Diagnostic::error(target.as_str(), err)
                        .with_parameter(param.name.as_str())
                        .with_span(param.span),
                );
            }
        }

        let default_source = effective_source(param, decl.owner_kind);
        parameters.push(ParameterSpec {
            name: param.name.clone(),
            ty: param.ty.clone(),
            default_source,
            span: param.span,
        });
    }

    if diagnostics.has_errors() {
        return Err(diagnostics);
    }

    Ok(CallableSpec {
        name: decl.name.clone(),
        owner: decl.owner.clone(),
        kind: decl.kind,
        is_static: decl.is_static,
        return_type: decl.return_type.clone(),
        parameters,
        mode: decl.mode,
        entry_point: decl.entry_point.clone(),
    })
}

/// Owner site first, then the parameter site. Owner-site defaults are only
/// meaningful on record-like owners.
fn effective_source(param: &ParameterDecl, owner_kind: ScopeKind) -> Option<DefaultSource> {
    if owner_kind == ScopeKind::Record {
        if let Some(source) = param.owner_site.first() {
            if let Some(shadowed) = param.parameter_site.first() {
                tracing::debug!(
                    parameter = %param.name,
                    owner = %source,
                    shadowed = %shadowed,
                    "record component default overrides parameter default"
                );
            }
            return Some(source.clone());
        }
    } else if !param.owner_site.is_empty() {
        tracing::warn!(
            parameter = %param.name,
            ?owner_kind,
            "record component default ignored on non-record owner"
        );
    }
    param.parameter_site.first().cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use defaultgen_core::{PrimitiveKind, SemanticType, Span};

    fn record(params: Vec<ParameterDecl>) -> CallableDecl {
        CallableDecl::constructor("com.acme.Endpoint", params).with_owner_kind(ScopeKind::Record)
    }

    #[test]
    fn order_and_types_are_kept() {
        let decl = CallableDecl::constructor(
            "Server",
            vec![
                ParameterDecl::new("host", SemanticType::String),
                ParameterDecl::new("port", PrimitiveKind::Int32)
                    .with_default(DefaultSource::literal("8080")),
            ],
        );
        let spec = normalize(&decl).unwrap();
        let names: Vec<_> = spec.parameters.iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, ["host", "port"]);
        assert!(spec.parameters[0].is_required());
        assert_eq!(
            spec.parameters[1].default_source,
            Some(DefaultSource::literal("8080"))
        );
    }

    #[test]
    fn owner_site_wins_on_records() {
        let decl = record(vec![
            ParameterDecl::new("port", PrimitiveKind::Int32)
                .with_default(DefaultSource::literal("80"))
                .with_owner_default(DefaultSource::field("DEFAULT_PORT")),
        ]);
        let spec = normalize(&decl).unwrap();
        assert_eq!(
            spec.parameters[0].default_source,
            Some(DefaultSource::field("DEFAULT_PORT"))
        );
    }

    #[test]
    fn owner_site_ignored_on_classes() {
        let decl = CallableDecl::constructor(
            "Server",
            vec![ParameterDecl::new("port", PrimitiveKind::Int32)
                .with_owner_default(DefaultSource::literal("1"))],
        );
        assert_eq!(normalize(&decl).unwrap().parameters[0].default_source, None);
    }

    #[test]
    fn duplicate_sources_are_reported_per_site() {
        let span = Span::new(3, 5, 10);
        let decl = record(vec![
            ParameterDecl::new("port", PrimitiveKind::Int32)
                .with_default(DefaultSource::literal("80"))
                .with_default(DefaultSource::literal("81"))
                .with_span(span),
            ParameterDecl::new("host", SemanticType::String)
                .with_owner_default(DefaultSource::literal("a"))
                .with_owner_default(DefaultSource::factory("defaultHost")),
        ]);
        let diagnostics = normalize(&decl).unwrap_err();
        assert_eq!(diagnostics.len(), 2);

        let first = diagnostics.iter().next().unwrap();
        assert_eq!(first.parameter.as_deref(), Some("port"));
        assert_eq!(first.span, span);
        assert!(matches!(
            &first.error,
            defaultgen_core::DefaultsError::Structural(StructuralError::DuplicateDefaultSource {
                site: DeclarationSite::Parameter,
                ..
            })
        ));
    }
}
