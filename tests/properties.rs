//! Property tests for the generation invariants.
//!
//! 1. Overloaded mode accepts a parameter list iff its defaults are a suffix,
//!    and otherwise reports the lowest offending index
//! 2. A valid list expands to `n - k + 1` variants of strictly descending arity
//! 3. Named mode accepts every placement of defaults
//! 4. Numeric literals survive render-then-coerce
//! 5. A single-edit typo of a candidate is always suggested

use defaultgen::core::{
    CallableDecl, DefaultExpression, GeneratorConfig, LiteralValue, PrimitiveKind,
    ResolvedParameter, SemanticType, StructuralError,
};
use defaultgen::engine::{builder, literal, overload, resolve};
use ordered_float::OrderedFloat;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A parameter list described by which positions carry a default.
fn arb_shape() -> impl Strategy<Value = Vec<bool>> {
    prop::collection::vec(any::<bool>(), 0..8)
}

fn params(shape: &[bool]) -> Vec<ResolvedParameter> {
    shape
        .iter()
        .enumerate()
        .map(|(i, &defaulted)| {
            let name = format!("p{i}");
            if defaulted {
                ResolvedParameter::defaulted(
                    name,
                    PrimitiveKind::Int32,
                    DefaultExpression::Literal(LiteralValue::Int32(i as i32)),
                )
            } else {
                ResolvedParameter::required(name, PrimitiveKind::Int32)
            }
        })
        .collect()
}

fn arb_numeric() -> impl Strategy<Value = LiteralValue> {
    prop_oneof![
        any::<i8>().prop_map(LiteralValue::Int8),
        any::<i16>().prop_map(LiteralValue::Int16),
        any::<i32>().prop_map(LiteralValue::Int32),
        any::<i64>().prop_map(LiteralValue::Int64),
        any::<f32>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| LiteralValue::Float32(OrderedFloat(v))),
        any::<f64>()
            .prop_filter("finite", |v| v.is_finite())
            .prop_map(|v| LiteralValue::Float64(OrderedFloat(v))),
    ]
}

fn target() -> defaultgen::core::TargetRef {
    CallableDecl::constructor("acme.Server", vec![]).target()
}

// ---------------------------------------------------------------------------
// Properties
// ---------------------------------------------------------------------------

proptest! {
    #[test]
    fn overloaded_mode_requires_suffix_defaults(shape in arb_shape()) {
        let first_default = shape.iter().position(|&d| d);
        let offending = first_default
            .and_then(|k| shape[k..].iter().position(|&d| !d).map(|o| k + o));

        match overload::generate(&target(), &params(&shape)) {
            Ok(set) => {
                prop_assert!(offending.is_none());
                let k = first_default.unwrap_or(shape.len());
                prop_assert_eq!(set.variants.len(), shape.len() - k + 1);

                let counts: Vec<usize> = set.variants.iter().map(|v| v.provided_count).collect();
                let expected: Vec<usize> = (k..=shape.len()).rev().collect();
                prop_assert_eq!(counts, expected);
                for variant in &set.variants {
                    prop_assert_eq!(variant.parameters.len(), variant.provided_count);
                    prop_assert_eq!(variant.arguments.len(), shape.len());
                }
            }
            Err(StructuralError::NonConsecutiveDefault { at, .. }) => {
                prop_assert_eq!(Some(at), offending);
            }
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    #[test]
    fn named_mode_accepts_any_placement(shape in arb_shape()) {
        let spec = defaultgen::core::CallableSpec::constructor("acme.Server", vec![]);
        let builder = builder::synthesize(&spec, &params(&shape), &GeneratorConfig::default());
        prop_assert_eq!(builder.fields.len(), shape.len());
        for (field, &defaulted) in builder.fields.iter().zip(&shape) {
            prop_assert_eq!(field.required, !defaulted);
            // every field is an int, so nothing is checked at the terminal
            prop_assert!(!field.needs_check());
        }
    }

    #[test]
    fn numeric_literals_round_trip(value in arb_numeric()) {
        let kind = value.primitive_kind().unwrap();
        let text = value.literal_text();
        let coerced = literal::coerce_value(&text, &SemanticType::Primitive(kind));
        prop_assert_eq!(coerced, Ok(value));
    }

    #[test]
    fn single_edit_typos_are_suggested(
        name in "[A-Z]{4,12}(_[A-Z]{3,8})?",
        position in any::<prop::sample::Index>(),
        replacement in "[a-z0-9]",
    ) {
        let chars: Vec<char> = name.chars().collect();
        let at = position.index(chars.len());
        let mut typo: String = chars[..at].iter().collect();
        typo.push_str(&replacement);
        typo.extend(&chars[at + 1..]);

        let suggestion = resolve::suggest(&typo, [name.as_str(), "ZZZZZZZZZZZZZZZZZZZZZZZZZZ"]);
        prop_assert_eq!(suggestion.as_deref(), Some(name.as_str()));
    }
}

#[test]
fn suggestion_examples() {
    assert_eq!(
        resolve::suggest("DEFUALT_NAME", ["DEFAULT_NAME", "OTHER"]),
        Some("DEFAULT_NAME".to_string())
    );
    assert_eq!(resolve::suggest("xyz", ["abc", "def"]), None);
}
