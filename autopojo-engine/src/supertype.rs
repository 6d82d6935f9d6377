//! Supertype classification.
//!
//! A source interface's declared supertypes blend three roles: data
//! inheritance (another generation target), marker inheritance (an
//! annotation type used purely to opt in), and plain interfaces the
//! generated class should still implement. Each is resolved once, and the
//! task enforces the at-most-one-data-supertype invariant on top.

use autopojo_model::{DeclId, DeclKind, DeclarationModel, TypeRef};

use crate::markers::MarkerResolver;

/// The role a declared supertype plays for generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupertypeKind {
    /// Another generation target: becomes the generated superclass.
    DataSuper(DeclId),
    /// A marker-only supertype: dropped from the generated type.
    MarkerSuper,
    /// An interface the generated class keeps implementing.
    PlainInterface,
    /// Unknown to the model, or not a type generation understands: dropped.
    Foreign,
}

pub fn classify<M: DeclarationModel + ?Sized>(
    model: &M,
    markers: &MarkerResolver<'_, M>,
    ty: &TypeRef,
) -> SupertypeKind {
    let Some(raw) = ty.raw_class() else {
        return SupertypeKind::Foreign;
    };
    let Some(decl) = model.lookup(&raw.qualified()) else {
        return SupertypeKind::Foreign;
    };
    if markers.is_target(decl) {
        return SupertypeKind::DataSuper(decl);
    }
    match model.kind_of(decl) {
        DeclKind::Annotation => SupertypeKind::MarkerSuper,
        DeclKind::Interface => SupertypeKind::PlainInterface,
        _ => SupertypeKind::Foreign,
    }
}
