//! Java class and type references.
//!
//! These are the shapes the engine rewrites when it re-targets source
//! declarations at their generated counterparts: plain class names,
//! parameterized types, type variables with bounds, wildcards, and arrays.

use std::fmt;

use serde::Serialize;

/// A possibly nested class name: a package plus the chain of simple names
/// from the top-level type down.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct ClassRef {
    package: String,
    names: Vec<String>,
}

impl ClassRef {
    /// A top-level class in the given package.
    pub fn top_level(package: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            package: package.into(),
            names: vec![name.into()],
        }
    }

    /// A class nested directly inside `self`.
    pub fn nested(&self, name: impl Into<String>) -> Self {
        let mut names = self.names.clone();
        names.push(name.into());
        Self {
            package: self.package.clone(),
            names,
        }
    }

    /// Guess a class reference from a dotted name: leading segments that
    /// start with a lowercase letter form the package, the rest are nested
    /// simple names. `"java.util.Map.Entry"` splits into package
    /// `java.util` and names `[Map, Entry]`.
    pub fn best_guess(name: &str) -> Self {
        let segments: Vec<&str> = name.split('.').collect();
        let split = segments
            .iter()
            .position(|s| s.chars().next().is_some_and(char::is_uppercase))
            .unwrap_or(segments.len().saturating_sub(1));

        Self {
            package: segments[..split].join("."),
            names: segments[split..].iter().map(|s| s.to_string()).collect(),
        }
    }

    pub fn package(&self) -> &str {
        &self.package
    }

    /// The innermost simple name.
    pub fn simple_name(&self) -> &str {
        self.names.last().map(String::as_str).unwrap_or_default()
    }

    pub fn simple_names(&self) -> &[String] {
        &self.names
    }

    /// The enclosing class reference, if this is a nested name.
    pub fn enclosing(&self) -> Option<ClassRef> {
        if self.names.len() < 2 {
            return None;
        }
        Some(Self {
            package: self.package.clone(),
            names: self.names[..self.names.len() - 1].to_vec(),
        })
    }

    pub fn is_top_level(&self) -> bool {
        self.names.len() == 1
    }

    /// The fully qualified dotted name.
    pub fn qualified(&self) -> String {
        if self.package.is_empty() {
            self.names.join(".")
        } else {
            format!("{}.{}", self.package, self.names.join("."))
        }
    }
}

impl fmt::Display for ClassRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.qualified())
    }
}

/// A type variable: a name plus its declared bounds.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TypeVariable {
    pub name: String,
    pub bounds: Vec<TypeRef>,
}

impl TypeVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            bounds: Vec::new(),
        }
    }

    pub fn bound(mut self, bound: TypeRef) -> Self {
        self.bounds.push(bound);
        self
    }
}

/// A wildcard type argument.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum Wildcard {
    Unbounded,
    Extends(Box<TypeRef>),
    Super(Box<TypeRef>),
}

/// Any Java type reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub enum TypeRef {
    /// A primitive or `void`.
    Primitive(String),
    Class(ClassRef),
    Parameterized { raw: ClassRef, args: Vec<TypeRef> },
    Variable(TypeVariable),
    Wildcard(Wildcard),
    Array(Box<TypeRef>),
}

impl TypeRef {
    pub fn class(name: &str) -> Self {
        TypeRef::Class(ClassRef::best_guess(name))
    }

    pub fn primitive(name: impl Into<String>) -> Self {
        TypeRef::Primitive(name.into())
    }

    pub fn parameterized(raw: &str, args: Vec<TypeRef>) -> Self {
        TypeRef::Parameterized {
            raw: ClassRef::best_guess(raw),
            args,
        }
    }

    pub fn variable(name: impl Into<String>) -> Self {
        TypeRef::Variable(TypeVariable::new(name))
    }

    pub fn array(component: TypeRef) -> Self {
        TypeRef::Array(Box::new(component))
    }

    /// The raw class behind this reference, when there is one.
    pub fn raw_class(&self) -> Option<&ClassRef> {
        match self {
            TypeRef::Class(c) => Some(c),
            TypeRef::Parameterized { raw, .. } => Some(raw),
            _ => None,
        }
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Primitive(name) => write!(f, "{name}"),
            TypeRef::Class(c) => write!(f, "{c}"),
            TypeRef::Parameterized { raw, args } => {
                write!(f, "{raw}<")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ">")
            }
            TypeRef::Variable(v) => write!(f, "{}", v.name),
            TypeRef::Wildcard(Wildcard::Unbounded) => write!(f, "?"),
            TypeRef::Wildcard(Wildcard::Extends(bound)) => write!(f, "? extends {bound}"),
            TypeRef::Wildcard(Wildcard::Super(bound)) => write!(f, "? super {bound}"),
            TypeRef::Array(component) => write!(f, "{component}[]"),
        }
    }
}
