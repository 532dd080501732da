//! Literal coercion: type-checking literal default text.
//!
//! [`coerce`] turns the text of a literal default into a [`DefaultExpression`]
//! for the parameter's type, or explains why it cannot. Formatting lives on
//! [`LiteralValue`]; for every numeric kind, coercing the `literal_text()` of a
//! value yields that value again.

use defaultgen_core::{DefaultExpression, LiteralError, LiteralValue, PrimitiveKind, SemanticType};
use ordered_float::OrderedFloat;

/// Coerce literal `text` to a default of type `ty`.
///
/// # Errors
///
/// * [`LiteralError::NullOnPrimitive`] for `"null"` on a primitive
/// * [`LiteralError::EmptyNotAllowed`] for `""` on anything but `String`
/// * [`LiteralError::NotParseable`] for malformed or out-of-range values
pub fn coerce(text: &str, ty: &SemanticType) -> Result<DefaultExpression, LiteralError> {
    coerce_value(text, ty).map(DefaultExpression::Literal)
}

/// Like [`coerce`], returning the bare literal value.
pub fn coerce_value(text: &str, ty: &SemanticType) -> Result<LiteralValue, LiteralError> {
    if text == "null" {
        return if ty.is_reference() {
            Ok(LiteralValue::Null)
        } else {
            Err(LiteralError::NullOnPrimitive { ty: ty.clone() })
        };
    }
    if text.is_empty() {
        return if ty.is_string() {
            Ok(LiteralValue::Str(String::new()))
        } else {
            Err(LiteralError::EmptyNotAllowed { ty: ty.clone() })
        };
    }

    let not_parseable = || LiteralError::NotParseable {
        text: text.to_string(),
        ty: ty.clone(),
    };

    match ty {
        SemanticType::String => Ok(LiteralValue::Str(text.to_string())),
        SemanticType::Nominal(_) => Ok(LiteralValue::Verbatim(text.to_string())),
        SemanticType::Void => Err(not_parseable()),
        SemanticType::Primitive(kind) => coerce_primitive(text, *kind).ok_or_else(not_parseable),
    }
}

fn coerce_primitive(text: &str, kind: PrimitiveKind) -> Option<LiteralValue> {
    match kind {
        PrimitiveKind::Bool => match text {
            "true" => Some(LiteralValue::Bool(true)),
            "false" => Some(LiteralValue::Bool(false)),
            _ => None,
        },
        PrimitiveKind::Char => {
            if text.chars().nth(1).is_some() {
                tracing::warn!(text, "multi-character char default kept as written");
            }
            Some(LiteralValue::Char(text.to_string()))
        }
        PrimitiveKind::Int8 => {
            let wide = strip_suffix(text).parse::<i64>().ok()?;
            i8::try_from(wide).ok().map(LiteralValue::Int8)
        }
        PrimitiveKind::Int16 => {
            let wide = strip_suffix(text).parse::<i64>().ok()?;
            i16::try_from(wide).ok().map(LiteralValue::Int16)
        }
        PrimitiveKind::Int32 => strip_suffix(text).parse::<i32>().ok().map(LiteralValue::Int32),
        PrimitiveKind::Int64 => strip_suffix(text).parse::<i64>().ok().map(LiteralValue::Int64),
        PrimitiveKind::Float32 => {
            let value = strip_suffix(text).parse::<f32>().ok()?;
            value.is_finite().then(|| LiteralValue::Float32(OrderedFloat(value)))
        }
        PrimitiveKind::Float64 => {
            let value = strip_suffix(text).parse::<f64>().ok()?;
            value.is_finite().then(|| LiteralValue::Float64(OrderedFloat(value)))
        }
    }
}

/// Drop one trailing width marker (`L`, `D` or `F`, any case).
fn strip_suffix(text: &str) -> &str {
    match text.chars().last() {
        Some('l' | 'L' | 'd' | 'D' | 'f' | 'F') => &text[..text.len() - 1],
        _ => text,
    }
}
