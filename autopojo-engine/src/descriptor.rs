//! The generated-type descriptor tree.
//!
//! One descriptor tree is produced per top-level generation request, owned
//! by its task until handed to the orchestrator, and discarded after
//! rendering. Descriptors carry resolved (generated) names throughout; the
//! renderer never needs the declaration model.

use indexmap::IndexSet;
use serde::Serialize;

use autopojo_model::{
    marker, Annotation, AnnotationValue, ClassRef, DeclId, ExtraAnnotationSpec, FormatToken,
    Modifier, TypeRef, TypeVariable,
};

/// An annotation ready for re-emission on generated output.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnnotationSpec {
    pub type_ref: ClassRef,
    pub args: Vec<(String, AnnotationArg)>,
}

/// One member value of an [`AnnotationSpec`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum AnnotationArg {
    /// A value copied verbatim from a source annotation.
    Value(AnnotationValue),
    /// A value from an extra-annotation descriptor, rendered through its
    /// format token.
    Formatted { format: FormatToken, value: String },
}

impl AnnotationSpec {
    /// Re-emit a source annotation unchanged.
    pub fn verbatim(ann: &Annotation) -> Self {
        Self {
            type_ref: ann.type_name.clone(),
            args: ann
                .args
                .iter()
                .map(|(name, value)| (name.clone(), AnnotationArg::Value(value.clone())))
                .collect(),
        }
    }

    /// Build the annotation an extra-annotation descriptor asks for.
    pub fn from_extra(spec: &ExtraAnnotationSpec) -> Self {
        Self {
            type_ref: spec.target.clone(),
            args: spec
                .members
                .iter()
                .map(|member| {
                    (
                        member.name.clone(),
                        AnnotationArg::Formatted {
                            format: member.format,
                            value: member.value.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// The "this code was generated" marker naming the generating tool.
    pub fn generated(tool: &str) -> Self {
        Self {
            type_ref: ClassRef::best_guess(marker::GENERATED),
            args: vec![(
                "value".to_string(),
                AnnotationArg::Formatted {
                    format: FormatToken::StringQuoted,
                    value: tool.to_string(),
                },
            )],
        }
    }
}

/// A complete generated type: the output of one [`ClassGenerationTask`]
/// invocation.
///
/// [`ClassGenerationTask`]: crate::task::ClassGenerationTask
#[derive(Debug, Clone, Serialize)]
pub struct GeneratedTypeDescriptor {
    pub qualified_name: ClassRef,
    /// The declaration this type was generated from.
    pub source: DeclId,
    pub modifiers: Vec<Modifier>,
    pub annotations: Vec<AnnotationSpec>,
    pub type_parameters: Vec<TypeVariable>,
    pub superclass_ref: Option<TypeRef>,
    pub interface_refs: IndexSet<TypeRef>,
    pub fields: Vec<FieldDescriptor>,
    pub constants: Vec<ConstantDescriptor>,
    pub enums: Vec<EnumDescriptor>,
    pub nested_types: Vec<GeneratedTypeDescriptor>,
    pub builder: Option<BuilderDescriptor>,
}

impl GeneratedTypeDescriptor {
    /// The type of an instance of this class: the raw name, parameterized
    /// with its own variables when generic.
    pub fn self_type(&self) -> TypeRef {
        if self.type_parameters.is_empty() {
            TypeRef::Class(self.qualified_name.clone())
        } else {
            TypeRef::Parameterized {
                raw: self.qualified_name.clone(),
                args: self
                    .type_parameters
                    .iter()
                    .map(|param| TypeRef::Variable(param.clone()))
                    .collect(),
            }
        }
    }
}

/// A generated field with its accessor pair.
#[derive(Debug, Clone, Serialize)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeRef,
    pub annotations_on_field: Vec<AnnotationSpec>,
    pub annotations_on_getter: Vec<AnnotationSpec>,
    pub annotations_on_setter: Vec<AnnotationSpec>,
}

/// A constant copied from the source declaration, initializer reproduced
/// verbatim.
#[derive(Debug, Clone, Serialize)]
pub struct ConstantDescriptor {
    pub name: String,
    pub ty: TypeRef,
    pub modifiers: Vec<Modifier>,
    pub initializer: Option<String>,
}

/// A nested enum reproduced from the source declaration.
#[derive(Debug, Clone, Serialize)]
pub struct EnumDescriptor {
    pub name: String,
    pub modifiers: Vec<Modifier>,
    pub constants: Vec<String>,
}

/// The nested builder type of a generated class.
#[derive(Debug, Clone, Serialize)]
pub struct BuilderDescriptor {
    pub qualified_name: ClassRef,
    /// The supertype's builder, when the generation superclass has one.
    pub superclass_ref: Option<TypeRef>,
    pub type_parameters: Vec<TypeVariable>,
    /// Mirrors the owner's fields, in declaration order; also the
    /// fill-instance assignment order.
    pub fields: Vec<BuilderField>,
    /// Fluent overrides for setters inherited from the parent builder.
    pub overridden_super_setters: Vec<BuilderField>,
}

/// A name/type pair mirrored into a builder.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuilderField {
    pub name: String,
    pub ty: TypeRef,
}
