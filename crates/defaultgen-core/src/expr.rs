//! Resolved default expressions.
//!
//! A [`DefaultExpression`] is what a declared default source becomes once it
//! has been type-checked: a normalized literal, a qualified static field, or
//! a qualified zero-argument factory call. The writer only ever sees these.
//!
//! # Example
//!
//! ```
//! use defaultgen_core::{DefaultExpression, LiteralValue, QualifiedName};
//!
//! let port = DefaultExpression::Literal(LiteralValue::Int16(8080));
//! assert_eq!(port.render(), "(short) 8080");
//!
//! let host = DefaultExpression::Field(QualifiedName::parse("com.acme.Defaults.HOST"));
//! assert_eq!(host.render(), "com.acme.Defaults.HOST");
//! ```

use std::fmt;

use ordered_float::OrderedFloat;

use crate::{PrimitiveKind, QualifiedName};

/// A literal default after coercion to its target type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LiteralValue {
    Null,
    Bool(bool),
    /// Character literal text. Kept whole; see the char coercion rules.
    Char(String),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float32(OrderedFloat<f32>),
    Float64(OrderedFloat<f64>),
    /// String literal contents, unescaped.
    Str(String),
    /// Text for other nominal types, emitted exactly as written.
    Verbatim(String),
}

impl LiteralValue {
    /// The primitive kind this value belongs to, if any.
    pub fn primitive_kind(&self) -> Option<PrimitiveKind> {
        Some(match self {
            LiteralValue::Bool(_) => PrimitiveKind::Bool,
            LiteralValue::Char(_) => PrimitiveKind::Char,
            LiteralValue::Int8(_) => PrimitiveKind::Int8,
            LiteralValue::Int16(_) => PrimitiveKind::Int16,
            LiteralValue::Int32(_) => PrimitiveKind::Int32,
            LiteralValue::Int64(_) => PrimitiveKind::Int64,
            LiteralValue::Float32(_) => PrimitiveKind::Float32,
            LiteralValue::Float64(_) => PrimitiveKind::Float64,
            LiteralValue::Null | LiteralValue::Str(_) | LiteralValue::Verbatim(_) => return None,
        })
    }

    /// The literal token, without any cast.
    ///
    /// 64-bit integers carry an `L` marker, 32-bit floats an `F` marker, and
    /// 64-bit floats always contain a decimal point or exponent.
    pub fn literal_text(&self) -> String {
        match self {
            LiteralValue::Null => "null".to_string(),
            LiteralValue::Bool(b) => b.to_string(),
            LiteralValue::Char(text) => format!("'{}'", escape(text, '\'')),
            LiteralValue::Int8(v) => v.to_string(),
            LiteralValue::Int16(v) => v.to_string(),
            LiteralValue::Int32(v) => v.to_string(),
            LiteralValue::Int64(v) => format!("{v}L"),
            LiteralValue::Float32(v) => format!("{:?}F", v.0),
            LiteralValue::Float64(v) => format!("{:?}", v.0),
            LiteralValue::Str(text) => format!("\"{}\"", escape(text, '"')),
            LiteralValue::Verbatim(text) => text.clone(),
        }
    }

    /// The emitted expression: the literal token plus a narrowing cast for
    /// 8 and 16-bit integers.
    pub fn render(&self) -> String {
        match self {
            LiteralValue::Int8(_) | LiteralValue::Int16(_) => {
                // primitive_kind is always Some for these two
                let keyword = self.primitive_kind().map(PrimitiveKind::keyword).unwrap_or_default();
                format!("({keyword}) {}", self.literal_text())
            }
            _ => self.literal_text(),
        }
    }
}

/// Escape control characters, backslash and the given quote character.
pub fn escape(text: &str, quote: char) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{8}' => out.push_str("\\b"),
            '\u{c}' => out.push_str("\\f"),
            c if c == quote => {
                out.push('\\');
                out.push(c);
            }
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out
}

/// The resolved, immutable default of one parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultExpression {
    Literal(LiteralValue),
    /// Qualified static field path (`Owner.FIELD`).
    Field(QualifiedName),
    /// Qualified zero-argument static call path (`Owner.factory`), emitted with `()`.
    Factory(QualifiedName),
}

impl DefaultExpression {
    pub fn render(&self) -> String {
        match self {
            DefaultExpression::Literal(value) => value.render(),
            DefaultExpression::Field(path) => path.to_string(),
            DefaultExpression::Factory(path) => format!("{path}()"),
        }
    }

    pub fn as_literal(&self) -> Option<&LiteralValue> {
        match self {
            DefaultExpression::Literal(value) => Some(value),
            _ => None,
        }
    }
}

impl fmt::Display for DefaultExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_markers() {
        assert_eq!(LiteralValue::Int64(5).literal_text(), "5L");
        assert_eq!(LiteralValue::Float32(OrderedFloat(1.5)).literal_text(), "1.5F");
        assert_eq!(LiteralValue::Float64(OrderedFloat(2.0)).literal_text(), "2.0");
        assert_eq!(LiteralValue::Int32(-7).literal_text(), "-7");
    }

    #[test]
    fn narrow_integers_get_casts() {
        assert_eq!(LiteralValue::Int8(-128).render(), "(byte) -128");
        assert_eq!(LiteralValue::Int16(300).render(), "(short) 300");
        assert_eq!(LiteralValue::Int32(300).render(), "300");
    }

    #[test]
    fn strings_are_escaped() {
        let value = LiteralValue::Str("a\"b\\c\nd\u{1}".to_string());
        assert_eq!(value.render(), "\"a\\\"b\\\\c\\nd\\u0001\"");
    }

    #[test]
    fn chars_escape_single_quote() {
        assert_eq!(LiteralValue::Char("'".to_string()).render(), "'\\''");
    }

    #[test]
    fn references_render_as_paths() {
        let field = DefaultExpression::Field(QualifiedName::parse("Config.PORT"));
        let factory = DefaultExpression::Factory(QualifiedName::parse("Config.defaultPort"));
        assert_eq!(field.render(), "Config.PORT");
        assert_eq!(factory.render(), "Config.defaultPort()");
    }

    #[test]
    fn verbatim_is_untouched() {
        assert_eq!(LiteralValue::Verbatim("Level.INFO".into()).render(), "Level.INFO");
    }
}
