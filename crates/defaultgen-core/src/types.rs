//! Semantic type descriptors for parameters, fields and factory returns.

use std::fmt;

use crate::{QualifiedName, TypeHash};

/// Primitive (non-nullable) value kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PrimitiveKind {
    Bool,
    Char,
    Int8,
    Int16,
    Int32,
    Int64,
    Float32,
    Float64,
}

impl PrimitiveKind {
    /// All primitive kinds, in widening order for the numeric ones.
    pub const ALL: [PrimitiveKind; 8] = [
        PrimitiveKind::Bool,
        PrimitiveKind::Char,
        PrimitiveKind::Int8,
        PrimitiveKind::Int16,
        PrimitiveKind::Int32,
        PrimitiveKind::Int64,
        PrimitiveKind::Float32,
        PrimitiveKind::Float64,
    ];

    /// Source keyword used when rendering casts and signatures.
    pub fn keyword(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "boolean",
            PrimitiveKind::Char => "char",
            PrimitiveKind::Int8 => "byte",
            PrimitiveKind::Int16 => "short",
            PrimitiveKind::Int32 => "int",
            PrimitiveKind::Int64 => "long",
            PrimitiveKind::Float32 => "float",
            PrimitiveKind::Float64 => "double",
        }
    }

    pub fn is_integer(self) -> bool {
        matches!(
            self,
            PrimitiveKind::Int8 | PrimitiveKind::Int16 | PrimitiveKind::Int32 | PrimitiveKind::Int64
        )
    }

    pub fn is_float(self) -> bool {
        matches!(self, PrimitiveKind::Float32 | PrimitiveKind::Float64)
    }

    pub fn is_numeric(self) -> bool {
        self.is_integer() || self.is_float()
    }

    /// Qualified name of the boxed reference type.
    pub fn boxed_name(self) -> &'static str {
        match self {
            PrimitiveKind::Bool => "java.lang.Boolean",
            PrimitiveKind::Char => "java.lang.Character",
            PrimitiveKind::Int8 => "java.lang.Byte",
            PrimitiveKind::Int16 => "java.lang.Short",
            PrimitiveKind::Int32 => "java.lang.Integer",
            PrimitiveKind::Int64 => "java.lang.Long",
            PrimitiveKind::Float32 => "java.lang.Float",
            PrimitiveKind::Float64 => "java.lang.Double",
        }
    }

    /// 8 and 16-bit integers, which need an explicit narrowing cast when emitted.
    pub fn is_narrow(self) -> bool {
        matches!(self, PrimitiveKind::Int8 | PrimitiveKind::Int16)
    }

    /// Position in the widening chain, `None` for `Bool`.
    fn widening_rank(self) -> Option<u8> {
        match self {
            PrimitiveKind::Bool => None,
            PrimitiveKind::Int8 => Some(0),
            PrimitiveKind::Int16 | PrimitiveKind::Char => Some(1),
            PrimitiveKind::Int32 => Some(2),
            PrimitiveKind::Int64 => Some(3),
            PrimitiveKind::Float32 => Some(4),
            PrimitiveKind::Float64 => Some(5),
        }
    }

    /// Whether a value of `self` can be assigned to `target` without a cast.
    pub fn widens_to(self, target: PrimitiveKind) -> bool {
        if self == target {
            return true;
        }
        // char and short share a rank but do not convert into each other
        if matches!(
            (self, target),
            (PrimitiveKind::Char, PrimitiveKind::Int16)
                | (PrimitiveKind::Int16, PrimitiveKind::Char)
        ) || target == PrimitiveKind::Char
        {
            return false;
        }
        match (self.widening_rank(), target.widening_rank()) {
            (Some(from), Some(to)) => from < to,
            _ => false,
        }
    }
}

impl fmt::Display for PrimitiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.keyword())
    }
}

/// A parameter, field or return type as the engine sees it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum SemanticType {
    /// Non-nullable primitive value.
    Primitive(PrimitiveKind),
    /// The string type. Reference-like; the only type accepting `""`.
    String,
    /// Any other reference-like type, by qualified name.
    Nominal(QualifiedName),
    /// Absence of a value (factory return types only).
    Void,
}

impl SemanticType {
    /// Root of the reference hierarchy. Every reference type is assignable to it.
    pub const OBJECT_TYPE: &'static str = "java.lang.Object";

    /// Nominal identity of [`SemanticType::String`].
    pub const STRING_TYPE: &'static str = "java.lang.String";

    pub fn nominal(name: impl Into<QualifiedName>) -> Self {
        SemanticType::Nominal(name.into())
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, SemanticType::Primitive(_))
    }

    /// String and nominal types; these accept `null`.
    pub fn is_reference(&self) -> bool {
        matches!(self, SemanticType::String | SemanticType::Nominal(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, SemanticType::String)
    }

    pub fn is_void(&self) -> bool {
        matches!(self, SemanticType::Void)
    }

    pub fn primitive(&self) -> Option<PrimitiveKind> {
        match self {
            SemanticType::Primitive(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Qualified name of a reference-like type; `String` maps to
    /// [`SemanticType::STRING_TYPE`].
    pub fn reference_name(&self) -> Option<QualifiedName> {
        match self {
            SemanticType::String => Some(QualifiedName::parse(Self::STRING_TYPE)),
            SemanticType::Nominal(name) => Some(name.clone()),
            SemanticType::Primitive(_) | SemanticType::Void => None,
        }
    }

    /// Identity hash of this type.
    pub fn type_hash(&self) -> TypeHash {
        TypeHash::from_name(&self.to_string())
    }
}

impl From<PrimitiveKind> for SemanticType {
    fn from(kind: PrimitiveKind) -> Self {
        SemanticType::Primitive(kind)
    }
}

impl fmt::Display for SemanticType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticType::Primitive(kind) => write!(f, "{kind}"),
            SemanticType::String => f.write_str("String"),
            SemanticType::Nominal(name) => write!(f, "{name}"),
            SemanticType::Void => f.write_str("void"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widening_follows_the_numeric_chain() {
        assert!(PrimitiveKind::Int8.widens_to(PrimitiveKind::Int64));
        assert!(PrimitiveKind::Int32.widens_to(PrimitiveKind::Float64));
        assert!(PrimitiveKind::Char.widens_to(PrimitiveKind::Int32));
        assert!(!PrimitiveKind::Int64.widens_to(PrimitiveKind::Int32));
        assert!(!PrimitiveKind::Int16.widens_to(PrimitiveKind::Char));
        assert!(!PrimitiveKind::Char.widens_to(PrimitiveKind::Int16));
        assert!(!PrimitiveKind::Bool.widens_to(PrimitiveKind::Int32));
        assert!(PrimitiveKind::Bool.widens_to(PrimitiveKind::Bool));
    }

    #[test]
    fn reference_like_types() {
        assert!(SemanticType::String.is_reference());
        assert!(SemanticType::nominal("com.acme.Host").is_reference());
        assert!(!SemanticType::Primitive(PrimitiveKind::Int32).is_reference());
        assert!(!SemanticType::Void.is_reference());
        assert_eq!(
            SemanticType::String.reference_name(),
            Some(QualifiedName::parse("java.lang.String"))
        );
        assert_eq!(SemanticType::from(PrimitiveKind::Int32).reference_name(), None);
    }

    #[test]
    fn display_uses_keywords_and_qualified_names() {
        assert_eq!(SemanticType::from(PrimitiveKind::Int16).to_string(), "short");
        assert_eq!(SemanticType::nominal("java.time.Duration").to_string(), "java.time.Duration");
        assert_eq!(SemanticType::Void.to_string(), "void");
    }
}
