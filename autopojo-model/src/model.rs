//! The declaration-model query surface and its in-memory implementation.
//!
//! The engine only ever talks to [`DeclarationModel`]; a host compiler
//! front-end would implement it over a live symbol table. [`InMemoryModel`]
//! is the arena-backed implementation used by tests and example models,
//! filled through the declarative [`TypeDecl`] builders.

use std::collections::HashMap;

use crate::annotation::Annotation;
use crate::decl::{DeclId, DeclKind, Declaration, Modifier};
use crate::types::{TypeRef, TypeVariable};

/// Read-only queries over a compilation's declarations.
///
/// `Sync` is required: independent top-level generation tasks read the model
/// concurrently.
pub trait DeclarationModel: Sync {
    fn kind_of(&self, decl: DeclId) -> DeclKind;
    fn simple_name_of(&self, decl: DeclId) -> &str;
    /// Package of the declaration's compilation unit.
    fn package_of(&self, decl: DeclId) -> &str;
    fn enclosing_of(&self, decl: DeclId) -> Option<DeclId>;
    fn modifiers_of(&self, decl: DeclId) -> &[Modifier];
    /// Directly attached annotations, in attachment order.
    fn annotations_of(&self, decl: DeclId) -> &[Annotation];
    /// Enclosed declarations, in declaration order.
    fn enclosed_of(&self, decl: DeclId) -> &[DeclId];
    fn superclass_of(&self, decl: DeclId) -> Option<&TypeRef>;
    fn interfaces_of(&self, decl: DeclId) -> &[TypeRef];
    fn type_parameters_of(&self, decl: DeclId) -> &[TypeVariable];
    fn method_return_of(&self, decl: DeclId) -> Option<&TypeRef>;
    fn method_params_of(&self, decl: DeclId) -> &[TypeRef];
    fn field_type_of(&self, decl: DeclId) -> Option<&TypeRef>;
    /// Constant-foldable value of a field, already rendered as source text.
    fn constant_value_of(&self, decl: DeclId) -> Option<&str>;
    /// Source-level initializer expression, the fallback when the value is
    /// not constant-foldable.
    fn initializer_of(&self, decl: DeclId) -> Option<&str>;
    /// Find a type declaration by its fully qualified source name.
    fn lookup(&self, qualified_name: &str) -> Option<DeclId>;

    /// Dotted source path of a declaration, for diagnostics.
    fn source_path(&self, decl: DeclId) -> String {
        let mut names = vec![self.simple_name_of(decl).to_string()];
        let mut top = decl;
        while let Some(parent) = self.enclosing_of(top) {
            names.push(self.simple_name_of(parent).to_string());
            top = parent;
        }
        names.reverse();
        let package = self.package_of(top);
        if package.is_empty() {
            names.join(".")
        } else {
            format!("{}.{}", package, names.join("."))
        }
    }
}

/// Arena-backed declaration store.
#[derive(Debug, Default)]
pub struct InMemoryModel {
    decls: Vec<Declaration>,
    by_name: HashMap<String, DeclId>,
}

impl InMemoryModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a top-level type declaration, flattening its member tree into
    /// the arena. Returns the handle of the type itself.
    pub fn insert(&mut self, decl: TypeDecl) -> DeclId {
        let package = decl.package.clone();
        self.insert_type(decl, None, &package)
    }

    fn insert_type(&mut self, decl: TypeDecl, enclosing: Option<DeclId>, package: &str) -> DeclId {
        let mut record = Declaration::new(decl.kind, decl.name);
        record.package = package.to_string();
        record.modifiers = decl.modifiers;
        record.annotations = decl.annotations;
        record.enclosing = enclosing;
        record.superclass = decl.superclass;
        record.interfaces = decl.interfaces;
        record.type_params = decl.type_params;
        let id = self.push(record);
        self.index(id);

        let mut enclosed = Vec::with_capacity(decl.members.len());
        for member in decl.members {
            enclosed.push(self.insert_member(member, id, package));
        }
        self.decls[id.index()].enclosed = enclosed;
        id
    }

    fn insert_member(&mut self, member: MemberDecl, enclosing: DeclId, package: &str) -> DeclId {
        match member {
            MemberDecl::Type(nested) => self.insert_type(nested, Some(enclosing), package),
            MemberDecl::Method(method) => {
                let mut record = Declaration::new(DeclKind::Method, method.name);
                record.package = package.to_string();
                record.modifiers = method.modifiers;
                record.annotations = method.annotations;
                record.enclosing = Some(enclosing);
                record.return_type = Some(method.return_type);
                record.params = method.params;
                self.push(record)
            }
            MemberDecl::Field(field) => {
                let mut record = Declaration::new(DeclKind::Field, field.name);
                record.package = package.to_string();
                record.modifiers = field.modifiers;
                record.annotations = field.annotations;
                record.enclosing = Some(enclosing);
                record.field_type = Some(field.ty);
                record.constant_value = field.constant_value;
                record.initializer = field.initializer;
                self.push(record)
            }
            MemberDecl::EnumConstant(name) => {
                let mut record = Declaration::new(DeclKind::EnumConstant, name);
                record.package = package.to_string();
                record.enclosing = Some(enclosing);
                self.push(record)
            }
            MemberDecl::Constructor { params } => {
                let mut record = Declaration::new(DeclKind::Constructor, "<init>");
                record.package = package.to_string();
                record.enclosing = Some(enclosing);
                record.params = params;
                self.push(record)
            }
        }
    }

    fn push(&mut self, record: Declaration) -> DeclId {
        let id = DeclId::new(self.decls.len());
        self.decls.push(record);
        id
    }

    fn index(&mut self, id: DeclId) {
        let qualified = self.source_path(id);
        self.by_name.insert(qualified, id);
    }

    fn decl(&self, id: DeclId) -> &Declaration {
        &self.decls[id.index()]
    }
}

impl DeclarationModel for InMemoryModel {
    fn kind_of(&self, decl: DeclId) -> DeclKind {
        self.decl(decl).kind
    }

    fn simple_name_of(&self, decl: DeclId) -> &str {
        &self.decl(decl).name
    }

    fn package_of(&self, decl: DeclId) -> &str {
        &self.decl(decl).package
    }

    fn enclosing_of(&self, decl: DeclId) -> Option<DeclId> {
        self.decl(decl).enclosing
    }

    fn modifiers_of(&self, decl: DeclId) -> &[Modifier] {
        &self.decl(decl).modifiers
    }

    fn annotations_of(&self, decl: DeclId) -> &[Annotation] {
        &self.decl(decl).annotations
    }

    fn enclosed_of(&self, decl: DeclId) -> &[DeclId] {
        &self.decl(decl).enclosed
    }

    fn superclass_of(&self, decl: DeclId) -> Option<&TypeRef> {
        self.decl(decl).superclass.as_ref()
    }

    fn interfaces_of(&self, decl: DeclId) -> &[TypeRef] {
        &self.decl(decl).interfaces
    }

    fn type_parameters_of(&self, decl: DeclId) -> &[TypeVariable] {
        &self.decl(decl).type_params
    }

    fn method_return_of(&self, decl: DeclId) -> Option<&TypeRef> {
        self.decl(decl).return_type.as_ref()
    }

    fn method_params_of(&self, decl: DeclId) -> &[TypeRef] {
        &self.decl(decl).params
    }

    fn field_type_of(&self, decl: DeclId) -> Option<&TypeRef> {
        self.decl(decl).field_type.as_ref()
    }

    fn constant_value_of(&self, decl: DeclId) -> Option<&str> {
        self.decl(decl).constant_value.as_deref()
    }

    fn initializer_of(&self, decl: DeclId) -> Option<&str> {
        self.decl(decl).initializer.as_deref()
    }

    fn lookup(&self, qualified_name: &str) -> Option<DeclId> {
        self.by_name.get(qualified_name).copied()
    }
}

/// Declarative builder for a type declaration and its member tree.
#[derive(Debug, Clone)]
pub struct TypeDecl {
    kind: DeclKind,
    package: String,
    name: String,
    modifiers: Vec<Modifier>,
    annotations: Vec<Annotation>,
    superclass: Option<TypeRef>,
    interfaces: Vec<TypeRef>,
    type_params: Vec<TypeVariable>,
    members: Vec<MemberDecl>,
}

impl TypeDecl {
    fn new(kind: DeclKind, package: &str, name: &str) -> Self {
        Self {
            kind,
            package: package.to_string(),
            name: name.to_string(),
            modifiers: vec![Modifier::Public],
            annotations: Vec::new(),
            superclass: None,
            interfaces: Vec::new(),
            type_params: Vec::new(),
            members: Vec::new(),
        }
    }

    pub fn interface(package: &str, name: &str) -> Self {
        let mut decl = Self::new(DeclKind::Interface, package, name);
        decl.modifiers.push(Modifier::Abstract);
        decl
    }

    pub fn class(package: &str, name: &str) -> Self {
        Self::new(DeclKind::Class, package, name)
    }

    pub fn annotation(package: &str, name: &str) -> Self {
        Self::new(DeclKind::Annotation, package, name)
    }

    /// An enum; only meaningful nested inside another type here.
    pub fn enumeration(name: &str) -> Self {
        let mut decl = Self::new(DeclKind::Enum, "", name);
        decl.modifiers.push(Modifier::Final);
        decl
    }

    pub fn modifier(mut self, modifier: Modifier) -> Self {
        self.modifiers.push(modifier);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn extends(mut self, superclass: TypeRef) -> Self {
        self.superclass = Some(superclass);
        self
    }

    pub fn implements(mut self, interface: TypeRef) -> Self {
        self.interfaces.push(interface);
        self
    }

    pub fn type_param(mut self, param: TypeVariable) -> Self {
        self.type_params.push(param);
        self
    }

    /// A zero-parameter accessor-shaped method.
    pub fn getter(self, name: &str, return_type: TypeRef) -> Self {
        self.method(MethodDecl::new(name, return_type))
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.members.push(MemberDecl::Method(method));
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.members.push(MemberDecl::Field(field));
        self
    }

    pub fn nested(mut self, nested: TypeDecl) -> Self {
        self.members.push(MemberDecl::Type(nested));
        self
    }

    pub fn enum_constant(mut self, name: &str) -> Self {
        self.members.push(MemberDecl::EnumConstant(name.to_string()));
        self
    }

    pub fn constructor(mut self, params: Vec<TypeRef>) -> Self {
        self.members.push(MemberDecl::Constructor { params });
        self
    }
}

/// One member inside a [`TypeDecl`].
#[derive(Debug, Clone)]
pub enum MemberDecl {
    Method(MethodDecl),
    Field(FieldDecl),
    Type(TypeDecl),
    EnumConstant(String),
    Constructor { params: Vec<TypeRef> },
}

/// Builder for a method declaration.
#[derive(Debug, Clone)]
pub struct MethodDecl {
    name: String,
    return_type: TypeRef,
    params: Vec<TypeRef>,
    modifiers: Vec<Modifier>,
    annotations: Vec<Annotation>,
}

impl MethodDecl {
    pub fn new(name: &str, return_type: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            return_type,
            params: Vec::new(),
            modifiers: vec![Modifier::Public, Modifier::Abstract],
            annotations: Vec::new(),
        }
    }

    pub fn param(mut self, ty: TypeRef) -> Self {
        self.params.push(ty);
        self
    }

    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }
}

/// Builder for a field declaration; defaults to a `public static final`
/// constant, the only field shape generation accepts.
#[derive(Debug, Clone)]
pub struct FieldDecl {
    name: String,
    ty: TypeRef,
    modifiers: Vec<Modifier>,
    annotations: Vec<Annotation>,
    constant_value: Option<String>,
    initializer: Option<String>,
}

impl FieldDecl {
    pub fn constant(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers: vec![Modifier::Public, Modifier::Static, Modifier::Final],
            annotations: Vec::new(),
            constant_value: None,
            initializer: None,
        }
    }

    /// An instance field, which generation rejects.
    pub fn instance(name: &str, ty: TypeRef) -> Self {
        Self {
            name: name.to_string(),
            ty,
            modifiers: vec![Modifier::Private],
            annotations: Vec::new(),
            constant_value: None,
            initializer: None,
        }
    }

    pub fn value(mut self, constant_value: &str) -> Self {
        self.constant_value = Some(constant_value.to_string());
        self
    }

    pub fn initializer(mut self, expression: &str) -> Self {
        self.initializer = Some(expression.to_string());
        self
    }
}
