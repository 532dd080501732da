//! Reference resolution for field and factory defaults.
//!
//! A reference is `NAME` (resolved in the owning scope) or `Qualifier.NAME`
//! (resolved in an external scope, looked up absolutely first and then
//! relative to the owner's namespace). The member found must have the right
//! shape and a type assignable to the parameter; otherwise the error says
//! which rule failed. Unknown names come with a typo suggestion or the list
//! of usable candidates.

mod suggest;

pub use suggest::{edit_distance, suggest};

use defaultgen_core::{
    DefaultExpression, MemberInfo, QualifiedName, Reference, ReferenceError, ReferenceKind,
    SemanticType, SymbolTable, Visibility,
};

/// The scope a reference resolved into.
struct TargetScope {
    name: QualifiedName,
    /// Private members of other scopes are not visible.
    external: bool,
}

/// Resolve a field or factory reference to a default expression.
///
/// # Arguments
///
/// * `text` - The reference as written (`"PORT"`, `"Config.PORT"`)
/// * `kind` - Whether a static field or a static factory is expected
/// * `target_ty` - The parameter type the value must be assignable to
/// * `owner` - The scope declaring the parameter
/// * `symbols` - The symbol table snapshot
pub fn resolve_reference<S: SymbolTable + ?Sized>(
    text: &str,
    kind: ReferenceKind,
    target_ty: &SemanticType,
    owner: &QualifiedName,
    symbols: &S,
) -> Result<DefaultExpression, ReferenceError> {
    let reference = Reference::parse(text)?;
    let scope = resolve_scope(text, &reference, owner, symbols)?;

    let found = Found {
        reference: text,
        member: &reference.member,
        scope: scope.name.simple_name(),
        target_ty,
        symbols,
    };

    // exact owner-scope hit; overloads and misses fall through to the full scan
    if reference.qualifier.is_none()
        && symbols
            .lookup_owner_scope_member(owner, &reference.member)
            .is_some_and(|m| found.accepts(&m, kind))
    {
        return Ok(expression(text, &scope.name, &reference.member, kind));
    }

    let members: Vec<MemberInfo> = symbols
        .members_of(&scope.name)
        .into_iter()
        .filter(|m| !(scope.external && m.visibility == Visibility::Private))
        .collect();

    let resolved = match kind {
        ReferenceKind::Field => found.field(&members),
        ReferenceKind::Factory => found.factory(&members),
    };

    match resolved {
        Some(Ok(())) => Ok(expression(text, &scope.name, &reference.member, kind)),
        Some(Err(err)) => Err(err),
        None => Err(not_found(text, &reference.member, &scope.name, kind, &members)),
    }
}

fn expression(
    text: &str,
    scope: &QualifiedName,
    member: &str,
    kind: ReferenceKind,
) -> DefaultExpression {
    let path = scope.child(member);
    tracing::debug!(reference = text, %kind, resolved = %path, "resolved default reference");
    match kind {
        ReferenceKind::Field => DefaultExpression::Field(path),
        ReferenceKind::Factory => DefaultExpression::Factory(path),
    }
}

fn resolve_scope<S: SymbolTable + ?Sized>(
    text: &str,
    reference: &Reference,
    owner: &QualifiedName,
    symbols: &S,
) -> Result<TargetScope, ReferenceError> {
    let Some(qualifier) = &reference.qualifier else {
        return Ok(TargetScope {
            name: owner.clone(),
            external: false,
        });
    };

    let scope = symbols
        .lookup_absolute_scope(qualifier)
        .or_else(|| symbols.lookup_relative_scope(owner.namespace_path(), qualifier))
        .ok_or_else(|| ReferenceError::UnknownScope {
            reference: text.to_string(),
            qualifier: qualifier.clone(),
            scope: owner.simple_name().to_string(),
        })?;

    tracing::trace!(qualifier = %qualifier, scope = %scope.name, "resolved reference qualifier");
    Ok(TargetScope {
        external: scope.name != *owner,
        name: scope.name,
    })
}

/// Shape and type checks for an exact-name match.
struct Found<'a, S: ?Sized> {
    reference: &'a str,
    member: &'a str,
    scope: &'a str,
    target_ty: &'a SemanticType,
    symbols: &'a S,
}

impl<S: SymbolTable + ?Sized> Found<'_, S> {
    /// A member of the expected shape that passes every check.
    fn accepts(&self, member: &MemberInfo, kind: ReferenceKind) -> bool {
        let shaped = match kind {
            ReferenceKind::Field => member.is_field(),
            ReferenceKind::Factory => member.is_method(),
        };
        shaped && self.check(member, kind).is_ok()
    }

    /// `None` when no field has the name.
    fn field(&self, members: &[MemberInfo]) -> Option<Result<(), ReferenceError>> {
        let field = members.iter().find(|m| m.is_field() && m.name == self.member)?;
        Some(self.check(field, ReferenceKind::Field))
    }

    /// `None` when no method has the name. With overloads, any one that
    /// passes wins; otherwise the zero-argument overload is reported.
    fn factory(&self, members: &[MemberInfo]) -> Option<Result<(), ReferenceError>> {
        let overloads: Vec<&MemberInfo> = members
            .iter()
            .filter(|m| m.is_method() && m.name == self.member)
            .collect();
        let first = *overloads.first()?;

        if overloads
            .iter()
            .any(|m| self.check(m, ReferenceKind::Factory).is_ok())
        {
            return Some(Ok(()));
        }
        let reported = overloads
            .iter()
            .copied()
            .find(|m| m.parameter_count == 0)
            .unwrap_or(first);
        Some(self.check(reported, ReferenceKind::Factory))
    }

    fn check(&self, member: &MemberInfo, kind: ReferenceKind) -> Result<(), ReferenceError> {
        if !member.is_static() {
            return Err(ReferenceError::NotStatic {
                reference: self.reference.to_string(),
                member: self.member.to_string(),
                scope: self.scope.to_string(),
                kind,
            });
        }
        if kind == ReferenceKind::Factory {
            if member.parameter_count > 0 {
                return Err(ReferenceError::TakesArguments {
                    reference: self.reference.to_string(),
                    member: self.member.to_string(),
                    scope: self.scope.to_string(),
                    count: member.parameter_count,
                });
            }
            if member.value_type.is_void() {
                return Err(ReferenceError::VoidReturn {
                    reference: self.reference.to_string(),
                    member: self.member.to_string(),
                    scope: self.scope.to_string(),
                });
            }
        }
        if !self.symbols.is_assignable(&member.value_type, self.target_ty) {
            return Err(ReferenceError::TypeMismatch {
                reference: self.reference.to_string(),
                member: self.member.to_string(),
                scope: self.scope.to_string(),
                kind,
                found: member.value_type.clone(),
                expected: self.target_ty.clone(),
            });
        }
        Ok(())
    }
}

fn not_found(
    text: &str,
    member: &str,
    scope: &QualifiedName,
    kind: ReferenceKind,
    members: &[MemberInfo],
) -> ReferenceError {
    let mut candidates: Vec<String> = Vec::new();
    for m in members {
        let usable = match kind {
            ReferenceKind::Field => m.is_static_field(),
            ReferenceKind::Factory => m.is_static_factory(),
        };
        if usable && !candidates.contains(&m.name) {
            candidates.push(m.name.clone());
        }
    }
    let suggestion = suggest(member, &candidates);
    tracing::debug!(
        reference = text,
        ?suggestion,
        candidates = candidates.len(),
        "default reference not found"
    );

    ReferenceError::NotFound {
        reference: text.to_string(),
        member: member.to_string(),
        scope: scope.simple_name().to_string(),
        kind,
        suggestion,
        candidates,
    }
}
