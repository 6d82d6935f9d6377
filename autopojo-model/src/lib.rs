//! Declaration model for the autopojo generator.
//!
//! This crate holds everything the generation engine reads but never
//! mutates: an immutable declaration store behind the [`DeclarationModel`]
//! query trait, Java type references, annotation mirrors, and the marker
//! annotation contract that opts declarations into generation.
//!
//! # Module Organization
//!
//! - [`types`] - Class and type references (`ClassRef`, `TypeRef`)
//! - [`annotation`] - Annotation mirrors and member values
//! - [`marker`] - The marker surface (`POJO`, `ExtraAnnotation`, ...)
//! - [`decl`] - Declaration records, kinds, and modifiers
//! - [`model`] - The `DeclarationModel` trait and the in-memory arena
//! - [`fixtures`] - Sample models (feature-gated)

pub mod annotation;
pub mod decl;
pub mod marker;
pub mod model;
pub mod types;

#[cfg(any(test, feature = "fixtures"))]
pub mod fixtures;

pub use annotation::{Annotation, AnnotationValue};
pub use decl::{DeclId, DeclKind, Declaration, Modifier};
pub use marker::{ApplySite, ExtraAnnotationSpec, FormatToken, MarkerConfig, MemberSpec};
pub use model::{
    DeclarationModel, FieldDecl, InMemoryModel, MemberDecl, MethodDecl, TypeDecl,
};
pub use types::{ClassRef, TypeRef, TypeVariable, Wildcard};
