//! Annotation mirrors.
//!
//! An [`Annotation`] records an annotation as attached in source: its type
//! and its explicitly spelled-out members, in order. Members the source
//! left at their defaults are simply absent.

use serde::Serialize;

use crate::types::ClassRef;

/// An annotation attached to a declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Annotation {
    pub type_name: ClassRef,
    pub args: Vec<(String, AnnotationValue)>,
}

impl Annotation {
    pub fn new(type_name: &str) -> Self {
        Self {
            type_name: ClassRef::best_guess(type_name),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, name: impl Into<String>, value: AnnotationValue) -> Self {
        self.args.push((name.into(), value));
        self
    }

    /// The explicit value of a member, if the source spelled one out.
    pub fn get(&self, name: &str) -> Option<&AnnotationValue> {
        self.args
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, value)| value)
    }

    pub fn is_type(&self, qualified: &str) -> bool {
        self.type_name.qualified() == qualified
    }
}

/// A member value inside an annotation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnnotationValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    EnumConstant { type_name: ClassRef, constant: String },
    ClassLiteral(ClassRef),
    List(Vec<AnnotationValue>),
    Nested(Annotation),
}

impl AnnotationValue {
    pub fn string(value: impl Into<String>) -> Self {
        AnnotationValue::Str(value.into())
    }

    pub fn enum_constant(type_name: &str, constant: impl Into<String>) -> Self {
        AnnotationValue::EnumConstant {
            type_name: ClassRef::best_guess(type_name),
            constant: constant.into(),
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AnnotationValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AnnotationValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Nested annotations, accepting both the single-element shorthand and
    /// an explicit list.
    pub fn as_annotations(&self) -> Vec<&Annotation> {
        match self {
            AnnotationValue::Nested(ann) => vec![ann],
            AnnotationValue::List(values) => values
                .iter()
                .filter_map(|value| match value {
                    AnnotationValue::Nested(ann) => Some(ann),
                    _ => None,
                })
                .collect(),
            _ => Vec::new(),
        }
    }
}
