//! Overload-set generation.
//!
//! Omission-based overloading can only drop a suffix of the parameter list,
//! so every parameter from the first defaulted one to the end must carry a
//! default. Given that, the set holds one forwarding signature per arity from
//! the full list down to the first defaulted index.

use defaultgen_core::{
    DefaultExpression, ForwardArgument, OverloadSet, Param, Placement, ResolvedParameter,
    StructuralError, TargetRef, Variant,
};

/// Index of the first defaulted parameter, after checking that every later
/// parameter is defaulted too.
///
/// Returns `Ok(None)` when nothing is defaulted, or the lowest offending index.
pub fn first_default_index(params: &[ResolvedParameter]) -> Result<Option<usize>, usize> {
    let Some(k) = params.iter().position(|p| !p.is_required()) else {
        return Ok(None);
    };
    match params[k..].iter().position(ResolvedParameter::is_required) {
        Some(offset) => Err(k + offset),
        None => Ok(Some(k)),
    }
}

/// Generate the overload set for `target`.
///
/// # Errors
///
/// [`StructuralError::NonConsecutiveDefault`] at the lowest index whose
/// parameter has no default but follows a defaulted one.
pub fn generate(
    target: &TargetRef,
    params: &[ResolvedParameter],
) -> Result<OverloadSet, StructuralError> {
    let n = params.len();
    let k = first_default_index(params)
        .map_err(|at| StructuralError::NonConsecutiveDefault {
            target: target.to_string(),
            at,
            name: params[at].name.clone(),
        })?
        .unwrap_or(n);

    // Checked above: every parameter from k on has a default.
    let tail: Vec<&DefaultExpression> = params[k..]
        .iter()
        .filter_map(|p| p.default.as_ref())
        .collect();

    let variants: Vec<Variant> = (k..=n)
        .rev()
        .map(|provided| variant(params, provided, &tail[provided - k..]))
        .collect();

    tracing::debug!(
        %target,
        variants = variants.len(),
        first_default = k,
        "generated overload set"
    );
    Ok(OverloadSet {
        target: target.clone(),
        placement: Placement::Owner,
        variants,
    })
}

fn variant(
    params: &[ResolvedParameter],
    provided: usize,
    defaults: &[&DefaultExpression],
) -> Variant {
    let head = &params[..provided];
    Variant {
        provided_count: provided,
        parameters: head
            .iter()
            .map(|p| Param {
                name: p.name.clone(),
                ty: p.ty.clone(),
            })
            .collect(),
        arguments: head
            .iter()
            .map(|p| ForwardArgument::Param(p.name.clone()))
            .chain(defaults.iter().map(|&e| ForwardArgument::Default(e.clone())))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use defaultgen_core::{CallableDecl, LiteralValue, PrimitiveKind};

    fn target() -> TargetRef {
        CallableDecl::constructor("Server", vec![]).target()
    }

    fn required(name: &str) -> ResolvedParameter {
        ResolvedParameter::required(name, PrimitiveKind::Int32)
    }

    fn defaulted(name: &str, v: i32) -> ResolvedParameter {
        ResolvedParameter::defaulted(
            name,
            PrimitiveKind::Int32,
            DefaultExpression::Literal(LiteralValue::Int32(v)),
        )
    }

    #[test]
    fn no_defaults_is_one_pass_through() {
        let set = generate(&target(), &[required("a"), required("b")]).unwrap();
        assert_eq!(set.variants.len(), 1);
        assert!(set.variants[0].is_pass_through());
        assert_eq!(set.variants[0].provided_count, 2);
    }

    #[test]
    fn empty_list_is_one_variant() {
        let set = generate(&target(), &[]).unwrap();
        assert_eq!(set.variants.len(), 1);
        assert_eq!(set.variants[0].provided_count, 0);
    }

    #[test]
    fn trailing_defaults_descend_in_arity() {
        let params = [required("a"), defaulted("b", 1), defaulted("c", 2)];
        let set = generate(&target(), &params).unwrap();
        let counts: Vec<_> = set.variants.iter().map(|v| v.provided_count).collect();
        assert_eq!(counts, [3, 2, 1]);

        let shortest = &set.variants[2];
        assert_eq!(shortest.parameters.len(), 1);
        assert_eq!(shortest.render_arguments(), "a, 1, 2");
        assert_eq!(set.variants[1].render_arguments(), "a, b, 2");
        assert_eq!(set.variants[0].render_arguments(), "a, b, c");
    }

    #[test]
    fn all_defaulted_includes_zero_arity() {
        let set = generate(&target(), &[defaulted("a", 1), defaulted("b", 2)]).unwrap();
        assert_eq!(set.variants.len(), 3);
        assert_eq!(set.variants[2].provided_count, 0);
        assert_eq!(set.variants[2].render_arguments(), "1, 2");
    }

    #[test]
    fn interior_default_is_rejected_at_lowest_index() {
        let err = generate(
            &target(),
            &[required("a"), defaulted("b", 1), required("c"), required("d")],
        )
        .unwrap_err();
        assert_eq!(
            err,
            StructuralError::NonConsecutiveDefault {
                target: "Server".into(),
                at: 2,
                name: "c".into(),
            }
        );
    }

    #[test]
    fn first_default_index_cases() {
        assert_eq!(first_default_index(&[required("a")]), Ok(None));
        assert_eq!(first_default_index(&[required("a"), defaulted("b", 0)]), Ok(Some(1)));
        assert_eq!(first_default_index(&[defaulted("a", 0), required("b")]), Err(1));
    }
}
