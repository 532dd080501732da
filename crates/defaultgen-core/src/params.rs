//! Parameter declarations, default sources and their resolved form.

use std::fmt;

use crate::{DefaultExpression, ReferenceError, SemanticType, Span};

/// Declared origin of a parameter's fallback value.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DefaultSource {
    /// Literal text, coerced against the parameter type.
    Literal(String),
    /// Reference to a static field (`NAME` or `Qualifier.NAME`).
    FieldRef(String),
    /// Reference to a static zero-argument factory method.
    FactoryRef(String),
}

impl DefaultSource {
    pub fn literal(text: impl Into<String>) -> Self {
        DefaultSource::Literal(text.into())
    }

    pub fn field(reference: impl Into<String>) -> Self {
        DefaultSource::FieldRef(reference.into())
    }

    pub fn factory(reference: impl Into<String>) -> Self {
        DefaultSource::FactoryRef(reference.into())
    }

    /// The text as declared.
    pub fn text(&self) -> &str {
        match self {
            DefaultSource::Literal(text)
            | DefaultSource::FieldRef(text)
            | DefaultSource::FactoryRef(text) => text,
        }
    }

    /// The reference shape, or `None` for literals.
    pub fn reference_kind(&self) -> Option<ReferenceKind> {
        match self {
            DefaultSource::Literal(_) => None,
            DefaultSource::FieldRef(_) => Some(ReferenceKind::Field),
            DefaultSource::FactoryRef(_) => Some(ReferenceKind::Factory),
        }
    }

    pub fn kind_name(&self) -> &'static str {
        match self {
            DefaultSource::Literal(_) => "literal",
            DefaultSource::FieldRef(_) => "field",
            DefaultSource::FactoryRef(_) => "factory",
        }
    }
}

/// Which member shape a symbolic reference must resolve to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReferenceKind {
    Field,
    Factory,
}

impl fmt::Display for ReferenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceKind::Field => f.write_str("field"),
            ReferenceKind::Factory => f.write_str("factory method"),
        }
    }
}

impl fmt::Display for DefaultSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} \"{}\"", self.kind_name(), self.text())
    }
}

/// A parsed symbolic reference: an optional scope qualifier and a member name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Reference {
    /// Dotted scope path; `None` means the owning scope.
    pub qualifier: Option<String>,
    pub member: String,
}

impl Reference {
    /// Split `text` on its last `.` into qualifier and member.
    ///
    /// # Errors
    ///
    /// * [`ReferenceError::EmptyReference`] for empty input
    /// * [`ReferenceError::EmptyMemberName`] for `"Qualifier."`
    pub fn parse(text: &str) -> Result<Self, ReferenceError> {
        if text.is_empty() {
            return Err(ReferenceError::EmptyReference);
        }
        match text.rsplit_once('.') {
            None => Ok(Self {
                qualifier: None,
                member: text.to_string(),
            }),
            Some((qualifier, member)) => {
                if member.is_empty() {
                    return Err(ReferenceError::EmptyMemberName {
                        reference: text.to_string(),
                    });
                }
                Ok(Self {
                    qualifier: (!qualifier.is_empty()).then(|| qualifier.to_string()),
                    member: member.to_string(),
                })
            }
        }
    }
}

/// Which declaration site a default came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeclarationSite {
    /// On the parameter itself.
    Parameter,
    /// On the record component the parameter mirrors.
    Owner,
}

impl fmt::Display for DeclarationSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationSite::Parameter => f.write_str("parameter"),
            DeclarationSite::Owner => f.write_str("record component"),
        }
    }
}

/// A parameter as the host declared it, before normalization.
///
/// Each site is a list so that two defaults declared at the same site can be
/// reported instead of silently picking one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterDecl {
    pub name: String,
    pub ty: SemanticType,
    pub parameter_site: Vec<DefaultSource>,
    pub owner_site: Vec<DefaultSource>,
    pub span: Span,
}

impl ParameterDecl {
    pub fn new(name: impl Into<String>, ty: impl Into<SemanticType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            parameter_site: Vec::new(),
            owner_site: Vec::new(),
            span: Span::default(),
        }
    }

    /// Add a default declared on the parameter.
    pub fn with_default(mut self, source: DefaultSource) -> Self {
        self.parameter_site.push(source);
        self
    }

    /// Add a default declared on the owning record component.
    pub fn with_owner_default(mut self, source: DefaultSource) -> Self {
        self.owner_site.push(source);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = span;
        self
    }
}

/// A normalized parameter: at most one default source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub ty: SemanticType,
    pub default_source: Option<DefaultSource>,
    pub span: Span,
}

impl ParameterSpec {
    pub fn new(
        name: impl Into<String>,
        ty: impl Into<SemanticType>,
        default_source: Option<DefaultSource>,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default_source,
            span: Span::default(),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default_source.is_none()
    }
}

/// A parameter whose default, if any, has been resolved and type-checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedParameter {
    pub name: String,
    pub ty: SemanticType,
    pub default: Option<DefaultExpression>,
}

impl ResolvedParameter {
    pub fn required(name: impl Into<String>, ty: impl Into<SemanticType>) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: None,
        }
    }

    pub fn defaulted(
        name: impl Into<String>,
        ty: impl Into<SemanticType>,
        default: DefaultExpression,
    ) -> Self {
        Self {
            name: name.into(),
            ty: ty.into(),
            default: Some(default),
        }
    }

    pub fn is_required(&self) -> bool {
        self.default.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_unqualified() {
        let r = Reference::parse("DEFAULT_PORT").unwrap();
        assert_eq!(r.qualifier, None);
        assert_eq!(r.member, "DEFAULT_PORT");
    }

    #[test]
    fn parse_splits_on_last_dot() {
        let r = Reference::parse("com.acme.Config.PORT").unwrap();
        assert_eq!(r.qualifier.as_deref(), Some("com.acme.Config"));
        assert_eq!(r.member, "PORT");
    }

    #[test]
    fn parse_rejects_empty_parts() {
        assert_eq!(Reference::parse(""), Err(ReferenceError::EmptyReference));
        assert!(matches!(
            Reference::parse("Config."),
            Err(ReferenceError::EmptyMemberName { .. })
        ));
    }

    #[test]
    fn leading_dot_means_owner_scope() {
        let r = Reference::parse(".PORT").unwrap();
        assert_eq!(r.qualifier, None);
        assert_eq!(r.member, "PORT");
    }
}
