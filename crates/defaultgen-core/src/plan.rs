//! Emission plans: what the writer should produce for one target.
//!
//! A plan says *what* to emit (signatures, forwarding arguments, builder
//! fields and checks), never how to format it.

use crate::{BuilderError, DefaultExpression, QualifiedName, SemanticType, TargetRef};

/// Where generated code lives.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Placement {
    /// Inside the annotated type itself.
    #[default]
    Owner,
    /// In the utility scope that collects helpers for external targets.
    Utility(QualifiedName),
}

/// A parameter of a generated signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Param {
    pub name: String,
    pub ty: SemanticType,
}

/// One argument of a forwarding call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForwardArgument {
    /// Passes the caller's parameter through.
    Param(String),
    /// Fills an omitted parameter.
    Default(DefaultExpression),
}

impl ForwardArgument {
    pub fn render(&self) -> String {
        match self {
            ForwardArgument::Param(name) => name.clone(),
            ForwardArgument::Default(expr) => expr.render(),
        }
    }
}

/// One signature of an overload set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variant {
    /// Number of leading parameters the caller supplies.
    pub provided_count: usize,
    /// The signature: the first `provided_count` parameters.
    pub parameters: Vec<Param>,
    /// Arguments of the forwarding call, one per target parameter.
    pub arguments: Vec<ForwardArgument>,
}

impl Variant {
    /// Whether this variant takes every parameter (the target itself).
    pub fn is_pass_through(&self) -> bool {
        self.provided_count == self.arguments.len()
    }

    /// Comma-separated forwarding arguments.
    pub fn render_arguments(&self) -> String {
        self.arguments
            .iter()
            .map(ForwardArgument::render)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Arity-descending family of forwarding signatures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverloadSet {
    pub target: TargetRef,
    pub placement: Placement,
    /// Ordered from the full arity down to the first defaulted index.
    pub variants: Vec<Variant>,
}

/// The builder's terminal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TerminalKind {
    /// Constructs the target type.
    Build,
    /// Invokes the target method.
    Call,
}

impl TerminalKind {
    pub fn method_name(self) -> &'static str {
        match self {
            TerminalKind::Build => "build",
            TerminalKind::Call => "call",
        }
    }
}

/// One builder field and its fluent setter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: String,
    pub ty: SemanticType,
    pub required: bool,
    /// Initial value of an optional field.
    pub initializer: Option<DefaultExpression>,
    /// Name of the fluent setter.
    pub setter: String,
}

impl FieldSpec {
    /// Required reference-typed fields are checked by the terminal.
    /// Primitives always hold a value and are never checked.
    pub fn needs_check(&self) -> bool {
        self.required && !self.ty.is_primitive()
    }
}

/// A synthesized fluent builder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderSpec {
    /// Builder type name, derived from the target.
    pub name: String,
    /// Static method that returns a fresh builder.
    pub entry_point: String,
    pub target: TargetRef,
    pub placement: Placement,
    /// In declared parameter order.
    pub fields: Vec<FieldSpec>,
    pub terminal: TerminalKind,
}

impl BuilderSpec {
    /// Fields the terminal validates before invoking the target.
    pub fn checked_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.needs_check())
    }

    /// Run the terminal's emitted checks against a builder state.
    ///
    /// `is_set` reports whether a field currently holds a value. Fails on the
    /// first unset checked field in declared order.
    pub fn check_required(&self, is_set: impl Fn(&str) -> bool) -> Result<(), BuilderError> {
        match self.checked_fields().find(|f| !is_set(&f.name)) {
            Some(field) => Err(BuilderError::RequiredFieldUnset {
                name: field.name.clone(),
            }),
            None => Ok(()),
        }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

/// What the writer emits for one target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmissionPlan {
    OverloadSet(OverloadSet),
    Builder(BuilderSpec),
}

impl EmissionPlan {
    pub fn target(&self) -> &TargetRef {
        match self {
            EmissionPlan::OverloadSet(set) => &set.target,
            EmissionPlan::Builder(builder) => &builder.target,
        }
    }

    pub fn placement(&self) -> &Placement {
        match self {
            EmissionPlan::OverloadSet(set) => &set.placement,
            EmissionPlan::Builder(builder) => &builder.placement,
        }
    }

    pub fn with_placement(mut self, placement: Placement) -> Self {
        match &mut self {
            EmissionPlan::OverloadSet(set) => set.placement = placement,
            EmissionPlan::Builder(builder) => builder.placement = placement,
        }
        self
    }

    pub fn as_overload_set(&self) -> Option<&OverloadSet> {
        match self {
            EmissionPlan::OverloadSet(set) => Some(set),
            EmissionPlan::Builder(_) => None,
        }
    }

    pub fn as_builder(&self) -> Option<&BuilderSpec> {
        match self {
            EmissionPlan::Builder(builder) => Some(builder),
            EmissionPlan::OverloadSet(_) => None,
        }
    }
}
