//! Generated-name computation and type-reference rewriting.

use autopojo_model::{ClassRef, DeclId, DeclarationModel, TypeRef, TypeVariable, Wildcard};

use crate::markers::MarkerResolver;

pub struct NameResolver<'a, M: DeclarationModel + ?Sized> {
    model: &'a M,
    markers: &'a MarkerResolver<'a, M>,
    suffix: &'a str,
}

impl<'a, M: DeclarationModel + ?Sized> NameResolver<'a, M> {
    pub fn new(model: &'a M, markers: &'a MarkerResolver<'a, M>, suffix: &'a str) -> Self {
        Self {
            model,
            markers,
            suffix,
        }
    }

    /// The generated name of a declaration: nested under its enclosing
    /// type's generated name, or in its own package when top-level. The
    /// simple name is the marker's override when non-blank, otherwise a
    /// default derived from the declaration's own name.
    pub fn resolve_decl(&self, decl: DeclId) -> ClassRef {
        let parent = self
            .model
            .enclosing_of(decl)
            .filter(|&p| self.model.kind_of(p).is_type())
            .map(|p| self.resolve_decl(p));

        let config = self.markers.resolve(decl);
        let name = match &config {
            Some(c) if c.has_name() => c.name.trim().to_string(),
            _ => self.default_name(decl, parent.is_none() && config.is_some()),
        };

        match parent {
            Some(enclosing) => enclosing.nested(name),
            None => ClassRef::top_level(self.model.package_of(decl), name),
        }
    }

    /// Default simple name. Only top-level generation targets get the
    /// suffix treatment: strip the token when present, append it when not.
    /// Nested declarations keep their own name.
    fn default_name(&self, decl: DeclId, apply_suffix: bool) -> String {
        let name = self.model.simple_name_of(decl);
        if !apply_suffix {
            return name.to_string();
        }
        let suffix = self.suffix;
        if name.len() > suffix.len() && name.ends_with(suffix) {
            name[..name.len() - suffix.len()].to_string()
        } else {
            format!("{name}{suffix}")
        }
    }

    /// Rewrite a class reference to its generated name; references to
    /// declarations the model does not know pass through unchanged.
    pub fn resolve_class(&self, class: &ClassRef) -> ClassRef {
        match self.model.lookup(&class.qualified()) {
            Some(decl) => self.resolve_decl(decl),
            None => class.clone(),
        }
    }

    /// Rewrite an arbitrary type reference, recursing through generic
    /// structure and substituting only leaf class references.
    pub fn resolve_type(&self, ty: &TypeRef) -> TypeRef {
        match ty {
            TypeRef::Primitive(_) => ty.clone(),
            TypeRef::Class(class) => TypeRef::Class(self.resolve_class(class)),
            TypeRef::Parameterized { raw, args } => TypeRef::Parameterized {
                raw: self.resolve_class(raw),
                args: args.iter().map(|arg| self.resolve_type(arg)).collect(),
            },
            TypeRef::Variable(variable) => TypeRef::Variable(self.resolve_variable(variable)),
            TypeRef::Wildcard(Wildcard::Unbounded) => ty.clone(),
            TypeRef::Wildcard(Wildcard::Extends(bound)) => {
                TypeRef::Wildcard(Wildcard::Extends(Box::new(self.resolve_type(bound))))
            }
            TypeRef::Wildcard(Wildcard::Super(bound)) => {
                TypeRef::Wildcard(Wildcard::Super(Box::new(self.resolve_type(bound))))
            }
            TypeRef::Array(component) => TypeRef::Array(Box::new(self.resolve_type(component))),
        }
    }

    /// Rewrite the bounds of a type variable, keeping its name.
    pub fn resolve_variable(&self, variable: &TypeVariable) -> TypeVariable {
        TypeVariable {
            name: variable.name.clone(),
            bounds: variable
                .bounds
                .iter()
                .map(|bound| self.resolve_type(bound))
                .collect(),
        }
    }
}
