//! Declaration records.
//!
//! Declarations live in an arena owned by the model and are referenced by
//! [`DeclId`] handles. The engine only ever reads them.

use std::fmt;

use serde::Serialize;

use crate::annotation::Annotation;
use crate::types::{TypeRef, TypeVariable};

/// Opaque handle to a declaration in the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct DeclId(u32);

impl DeclId {
    pub(crate) fn new(index: usize) -> Self {
        Self(index as u32)
    }

    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// What sort of declaration a [`DeclId`] refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DeclKind {
    Interface,
    Class,
    Annotation,
    Enum,
    EnumConstant,
    Method,
    Field,
    Constructor,
}

impl DeclKind {
    /// Whether this kind encloses other declarations.
    pub fn is_type(self) -> bool {
        matches!(
            self,
            DeclKind::Interface | DeclKind::Class | DeclKind::Annotation | DeclKind::Enum
        )
    }
}

impl fmt::Display for DeclKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            DeclKind::Interface => "interface",
            DeclKind::Class => "class",
            DeclKind::Annotation => "annotation type",
            DeclKind::Enum => "enum",
            DeclKind::EnumConstant => "enum constant",
            DeclKind::Method => "method",
            DeclKind::Field => "field",
            DeclKind::Constructor => "constructor",
        };
        write!(f, "{name}")
    }
}

/// A Java modifier keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum Modifier {
    Public,
    Protected,
    Private,
    Abstract,
    Static,
    Final,
}

impl Modifier {
    pub fn as_str(self) -> &'static str {
        match self {
            Modifier::Public => "public",
            Modifier::Protected => "protected",
            Modifier::Private => "private",
            Modifier::Abstract => "abstract",
            Modifier::Static => "static",
            Modifier::Final => "final",
        }
    }
}

impl fmt::Display for Modifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One declaration in the arena. Which fields are meaningful depends on the
/// kind: types carry supertypes and enclosed members, methods carry a return
/// type and parameters, fields carry a type and initializer data.
#[derive(Debug, Clone, Serialize)]
pub struct Declaration {
    pub kind: DeclKind,
    pub name: String,
    pub package: String,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<Annotation>,
    pub enclosing: Option<DeclId>,
    pub enclosed: Vec<DeclId>,
    pub superclass: Option<TypeRef>,
    pub interfaces: Vec<TypeRef>,
    pub type_params: Vec<TypeVariable>,
    pub return_type: Option<TypeRef>,
    pub params: Vec<TypeRef>,
    pub field_type: Option<TypeRef>,
    pub constant_value: Option<String>,
    pub initializer: Option<String>,
}

impl Declaration {
    pub(crate) fn new(kind: DeclKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            package: String::new(),
            modifiers: Vec::new(),
            annotations: Vec::new(),
            enclosing: None,
            enclosed: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            return_type: None,
            params: Vec::new(),
            field_type: None,
            constant_value: None,
            initializer: None,
        }
    }
}
