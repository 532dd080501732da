//! Scope and member descriptors supplied by the symbol table.
//!
//! These mirror what a host compiler's introspection layer knows about a
//! declaration: enough to decide whether a member can serve as a static
//! default source, nothing more.

use bitflags::bitflags;

use crate::{QualifiedName, SemanticType};

bitflags! {
    /// Declaration modifiers relevant to default resolution.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MemberFlags: u8 {
        /// Scope-level (`static`) member.
        const STATIC = 0b0000_0001;
        /// Cannot be reassigned.
        const FINAL = 0b0000_0010;
    }
}

/// Member visibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Visibility {
    #[default]
    Public,
    Protected,
    Package,
    Private,
}

/// Whether a member is a field or a method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemberKind {
    Field,
    Method,
}

/// A field or method declared in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemberInfo {
    /// Simple member name.
    pub name: String,
    pub kind: MemberKind,
    pub flags: MemberFlags,
    /// Number of declared parameters (always 0 for fields).
    pub parameter_count: usize,
    /// Field type, or method return type (`Void` for void methods).
    pub value_type: SemanticType,
    pub visibility: Visibility,
}

impl MemberInfo {
    /// A `public static final` field.
    pub fn constant(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            flags: MemberFlags::STATIC | MemberFlags::FINAL,
            parameter_count: 0,
            value_type: ty,
            visibility: Visibility::Public,
        }
    }

    /// A non-static field.
    pub fn instance_field(name: impl Into<String>, ty: SemanticType) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Field,
            flags: MemberFlags::empty(),
            parameter_count: 0,
            value_type: ty,
            visibility: Visibility::Public,
        }
    }

    /// A `public static` method.
    pub fn static_method(
        name: impl Into<String>,
        parameter_count: usize,
        returns: SemanticType,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            flags: MemberFlags::STATIC,
            parameter_count,
            value_type: returns,
            visibility: Visibility::Public,
        }
    }

    /// A public instance method.
    pub fn instance_method(
        name: impl Into<String>,
        parameter_count: usize,
        returns: SemanticType,
    ) -> Self {
        Self {
            name: name.into(),
            kind: MemberKind::Method,
            flags: MemberFlags::empty(),
            parameter_count,
            value_type: returns,
            visibility: Visibility::Public,
        }
    }

    pub fn with_visibility(mut self, visibility: Visibility) -> Self {
        self.visibility = visibility;
        self
    }

    pub fn is_static(&self) -> bool {
        self.flags.contains(MemberFlags::STATIC)
    }

    pub fn is_field(&self) -> bool {
        self.kind == MemberKind::Field
    }

    pub fn is_method(&self) -> bool {
        self.kind == MemberKind::Method
    }

    /// Static field: the shape a field default source must have.
    pub fn is_static_field(&self) -> bool {
        self.is_field() && self.is_static()
    }

    /// Static, zero-argument, non-void method: the shape of a factory source.
    pub fn is_static_factory(&self) -> bool {
        self.is_method()
            && self.is_static()
            && self.parameter_count == 0
            && !self.value_type.is_void()
    }
}

/// Kind of declaration a scope is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ScopeKind {
    #[default]
    Class,
    /// Record-like aggregate; its components can carry defaults too.
    Record,
    Interface,
    Enum,
}

/// A scope (type) that members can be looked up in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScopeInfo {
    pub name: QualifiedName,
    pub kind: ScopeKind,
    /// Direct supertypes, used for reference assignability.
    pub supertypes: Vec<QualifiedName>,
}

impl ScopeInfo {
    pub fn new(name: impl Into<QualifiedName>, kind: ScopeKind) -> Self {
        Self {
            name: name.into(),
            kind,
            supertypes: Vec::new(),
        }
    }

    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }
}
