//! Builder synthesis for named-mode targets.
//!
//! Named mode has no placement rule for defaults: any subset of parameters
//! may be optional, and callers set whichever they like before the terminal
//! call. The terminal validates required reference-typed fields first.

use defaultgen_core::{
    BuilderSpec, CallableKind, CallableSpec, FieldSpec, GeneratorConfig, Placement,
    ResolvedParameter, TargetRef, TerminalKind,
};

/// Builder type name for a target: `{Type}{suffix}` for constructors and
/// `{Type}{Method}{suffix}` for methods.
///
/// Derived from the target, never from the entry point, so two entry points
/// on one target share a builder and two targets never do by accident.
pub fn builder_name(target: &TargetRef, suffix: &str) -> String {
    let owner = target.owner.simple_name();
    match target.kind {
        CallableKind::Constructor => format!("{owner}{suffix}"),
        CallableKind::Method => format!("{owner}{}{suffix}", capitalize(&target.name)),
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Synthesize the builder for `spec` from its resolved parameters.
pub fn synthesize(
    spec: &CallableSpec,
    params: &[ResolvedParameter],
    config: &GeneratorConfig,
) -> BuilderSpec {
    let target = spec.target();
    let fields: Vec<FieldSpec> = params
        .iter()
        .map(|p| FieldSpec {
            name: p.name.clone(),
            ty: p.ty.clone(),
            required: p.is_required(),
            initializer: p.default.clone(),
            setter: p.name.clone(),
        })
        .collect();

    let terminal = match spec.kind {
        CallableKind::Constructor => TerminalKind::Build,
        CallableKind::Method => TerminalKind::Call,
    };

    let builder = BuilderSpec {
        name: builder_name(&target, &config.builder_suffix),
        entry_point: spec
            .entry_point
            .clone()
            .unwrap_or_else(|| config.entry_point.clone()),
        target,
        placement: Placement::Owner,
        fields,
        terminal,
    };
    tracing::debug!(
        builder = %builder.name,
        fields = builder.fields.len(),
        checked = builder.checked_fields().count(),
        "synthesized builder"
    );
    builder
}

#[cfg(test)]
mod tests {
    use super::*;
    use defaultgen_core::{
        BuilderError, DefaultExpression, GenerationMode, LiteralValue, ParameterSpec, PrimitiveKind,
        QualifiedName, SemanticType,
    };

    fn method_spec(entry_point: Option<&str>) -> CallableSpec {
        CallableSpec {
            name: "connect".into(),
            owner: QualifiedName::parse("net.Client"),
            kind: CallableKind::Method,
            is_static: false,
            return_type: SemanticType::Void,
            parameters: vec![ParameterSpec::new("host", SemanticType::String, None)],
            mode: GenerationMode::Named,
            entry_point: entry_point.map(String::from),
        }
    }

    fn params() -> Vec<ResolvedParameter> {
        vec![
            ResolvedParameter::required("host", SemanticType::String),
            ResolvedParameter::defaulted(
                "port",
                PrimitiveKind::Int32,
                DefaultExpression::Literal(LiteralValue::Int32(80)),
            ),
            ResolvedParameter::required("retries", PrimitiveKind::Int32),
            ResolvedParameter::defaulted(
                "tag",
                SemanticType::String,
                DefaultExpression::Literal(LiteralValue::Null),
            ),
        ]
    }

    #[test]
    fn names_derive_from_target() {
        let ctor = CallableSpec::constructor("net.Server", vec![]).target();
        assert_eq!(builder_name(&ctor, "Builder"), "ServerBuilder");
        assert_eq!(builder_name(&method_spec(None).target(), "Builder"), "ClientConnectBuilder");
        assert_eq!(builder_name(&ctor, "Options"), "ServerOptions");
    }

    #[test]
    fn entry_point_does_not_affect_name() {
        let config = GeneratorConfig::default();
        let a = synthesize(&method_spec(None), &params(), &config);
        let b = synthesize(&method_spec(Some("open")), &params(), &config);
        assert_eq!(a.name, b.name);
        assert_eq!(a.entry_point, "create");
        assert_eq!(b.entry_point, "open");
    }

    #[test]
    fn fields_follow_parameters() {
        let builder = synthesize(&method_spec(None), &params(), &GeneratorConfig::default());
        assert_eq!(builder.terminal, TerminalKind::Call);
        assert_eq!(builder.fields.len(), 4);

        let port = builder.field("port").unwrap();
        assert!(!port.required);
        assert_eq!(port.setter, "port");
        assert_eq!(
            port.initializer,
            Some(DefaultExpression::Literal(LiteralValue::Int32(80)))
        );
        assert!(builder.field("host").unwrap().required);
    }

    #[test]
    fn only_required_references_are_checked() {
        let builder = synthesize(&method_spec(None), &params(), &GeneratorConfig::default());
        let checked: Vec<_> = builder.checked_fields().map(|f| f.name.as_str()).collect();
        assert_eq!(checked, ["host"]);
        assert_eq!(
            builder.check_required(|name| name != "host"),
            Err(BuilderError::RequiredFieldUnset { name: "host".into() })
        );
        assert!(builder.check_required(|name| name == "host").is_ok());
    }

    #[test]
    fn constructors_build() {
        let spec = CallableSpec::constructor("net.Server", vec![]);
        let builder = synthesize(&spec, &[], &GeneratorConfig::default());
        assert_eq!(builder.terminal, TerminalKind::Build);
        assert_eq!(builder.terminal.method_name(), "build");
    }
}
