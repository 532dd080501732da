//! Callable descriptions: the unit of generation.

use std::fmt;

use crate::{ParameterDecl, ParameterSpec, QualifiedName, ScopeKind, SemanticType, TypeHash};

/// Method or constructor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Method,
    Constructor,
}

/// How missing parameters are made optional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum GenerationMode {
    /// Arity-descending family of forwarding overloads.
    #[default]
    Overloaded,
    /// Fluent builder; no placement constraint on defaults.
    Named,
}

/// A callable as declared by the host, parameters not yet normalized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableDecl {
    /// Method name. For constructors, the owner's simple name.
    pub name: String,
    pub owner: QualifiedName,
    pub owner_kind: ScopeKind,
    pub kind: CallableKind,
    pub is_static: bool,
    pub return_type: SemanticType,
    pub parameters: Vec<ParameterDecl>,
    pub mode: GenerationMode,
    /// Name of the builder entry point; `None` uses the configured convention.
    pub entry_point: Option<String>,
}

impl CallableDecl {
    pub fn constructor(owner: impl Into<QualifiedName>, parameters: Vec<ParameterDecl>) -> Self {
        let owner = owner.into();
        Self {
            name: owner.simple_name().to_string(),
            return_type: SemanticType::Nominal(owner.clone()),
            owner,
            owner_kind: ScopeKind::Class,
            kind: CallableKind::Constructor,
            is_static: true,
            parameters,
            mode: GenerationMode::Overloaded,
            entry_point: None,
        }
    }

    pub fn method(
        owner: impl Into<QualifiedName>,
        name: impl Into<String>,
        return_type: SemanticType,
        parameters: Vec<ParameterDecl>,
    ) -> Self {
        Self {
            name: name.into(),
            owner: owner.into(),
            owner_kind: ScopeKind::Class,
            kind: CallableKind::Method,
            is_static: false,
            return_type,
            parameters,
            mode: GenerationMode::Overloaded,
            entry_point: None,
        }
    }

    pub fn with_mode(mut self, mode: GenerationMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn with_owner_kind(mut self, kind: ScopeKind) -> Self {
        self.owner_kind = kind;
        self
    }

    pub fn with_static(mut self, is_static: bool) -> Self {
        self.is_static = is_static;
        self
    }

    pub fn with_entry_point(mut self, entry_point: impl Into<String>) -> Self {
        self.entry_point = Some(entry_point.into());
        self
    }

    /// Identity of this callable, from owner, name and parameter types.
    pub fn target(&self) -> TargetRef {
        TargetRef::new(
            &self.owner,
            &self.name,
            self.kind,
            self.is_static,
            &self.return_type,
            self.parameters.iter().map(|p| &p.ty),
        )
    }
}

/// A callable with normalized parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallableSpec {
    pub name: String,
    pub owner: QualifiedName,
    pub kind: CallableKind,
    pub is_static: bool,
    pub return_type: SemanticType,
    pub parameters: Vec<ParameterSpec>,
    pub mode: GenerationMode,
    pub entry_point: Option<String>,
}

impl CallableSpec {
    /// A constructor whose parameters are already normalized. Used for the
    /// candidate constructors of externally-owned types.
    pub fn constructor(owner: impl Into<QualifiedName>, parameters: Vec<ParameterSpec>) -> Self {
        let owner = owner.into();
        Self {
            name: owner.simple_name().to_string(),
            return_type: SemanticType::Nominal(owner.clone()),
            owner,
            kind: CallableKind::Constructor,
            is_static: true,
            parameters,
            mode: GenerationMode::Overloaded,
            entry_point: None,
        }
    }

    pub fn target(&self) -> TargetRef {
        TargetRef::new(
            &self.owner,
            &self.name,
            self.kind,
            self.is_static,
            &self.return_type,
            self.parameters.iter().map(|p| &p.ty),
        )
    }
}

/// What a generated overload or builder ultimately invokes.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TargetRef {
    pub owner: QualifiedName,
    pub name: String,
    pub kind: CallableKind,
    /// Instance methods are invoked on a receiver.
    pub is_static: bool,
    pub return_type: SemanticType,
    pub hash: TypeHash,
}

impl TargetRef {
    fn new<'a>(
        owner: &QualifiedName,
        name: &str,
        kind: CallableKind,
        is_static: bool,
        return_type: &SemanticType,
        param_types: impl Iterator<Item = &'a SemanticType>,
    ) -> Self {
        let owner_hash = owner.to_type_hash();
        let params: Vec<TypeHash> = param_types.map(SemanticType::type_hash).collect();
        let hash = match kind {
            CallableKind::Constructor => TypeHash::from_constructor(owner_hash, &params),
            CallableKind::Method => TypeHash::from_method(owner_hash, name, &params),
        };
        Self {
            owner: owner.clone(),
            name: name.to_string(),
            kind,
            is_static,
            return_type: return_type.clone(),
            hash,
        }
    }

    pub fn is_constructor(&self) -> bool {
        self.kind == CallableKind::Constructor
    }
}

impl fmt::Display for TargetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            CallableKind::Constructor => write!(f, "{}", self.owner),
            CallableKind::Method => write!(f, "{}.{}", self.owner, self.name),
        }
    }
}
