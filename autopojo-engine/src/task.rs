//! The recursive class generation task.
//!
//! One task turns one marked interface declaration into a
//! [`GeneratedTypeDescriptor`] tree: a single-pass depth-first transform
//! that recurses on nested generation targets. Any configuration error
//! aborts the whole subtree; a task never produces a partial descriptor.

use std::collections::HashSet;

use indexmap::IndexSet;

use autopojo_model::{
    ApplySite, ClassRef, DeclId, DeclKind, DeclarationModel, Modifier, TypeRef, TypeVariable,
};

use crate::annotations::AnnotationExpander;
use crate::descriptor::{
    BuilderDescriptor, BuilderField, ConstantDescriptor, EnumDescriptor, FieldDescriptor,
    GeneratedTypeDescriptor,
};
use crate::error::{Error, Result};
use crate::markers::MarkerResolver;
use crate::names::NameResolver;
use crate::options::GenerationOptions;
use crate::supertype::{classify, SupertypeKind};

pub struct ClassGenerationTask<'a, M: DeclarationModel + ?Sized> {
    model: &'a M,
    markers: &'a MarkerResolver<'a, M>,
    names: NameResolver<'a, M>,
    annotations: AnnotationExpander<'a, M>,
}

impl<'a, M: DeclarationModel + ?Sized> ClassGenerationTask<'a, M> {
    pub fn new(
        model: &'a M,
        options: &'a GenerationOptions,
        markers: &'a MarkerResolver<'a, M>,
    ) -> Self {
        Self {
            model,
            markers,
            names: NameResolver::new(model, markers, &options.name_suffix),
            annotations: AnnotationExpander::new(model, markers),
        }
    }

    /// Generate the complete descriptor for one marked declaration,
    /// recursing into nested generation targets.
    pub fn generate(&self, decl: DeclId) -> Result<GeneratedTypeDescriptor> {
        self.require_opted_in(decl)?;
        let config = self.markers.require(decl)?;

        let qualified_name = self.names.resolve_decl(decl);

        // The generated class is concrete; nested classes must be static.
        let mut modifiers: Vec<Modifier> = self
            .model
            .modifiers_of(decl)
            .iter()
            .copied()
            .filter(|&m| m != Modifier::Abstract)
            .collect();
        if self.model.enclosing_of(decl).is_some() && !modifiers.contains(&Modifier::Static) {
            modifiers.push(Modifier::Static);
        }

        let type_parameters: Vec<TypeVariable> = self
            .model
            .type_parameters_of(decl)
            .iter()
            .map(|param| self.names.resolve_variable(param))
            .collect();

        // Split declared supertypes into the single permitted generation
        // superclass, the plain interfaces the class keeps implementing,
        // and marker-only or foreign supertypes, which are dropped.
        let mut data_super: Option<(DeclId, &TypeRef)> = None;
        let mut interface_refs = IndexSet::new();
        let supertypes = self
            .model
            .superclass_of(decl)
            .into_iter()
            .chain(self.model.interfaces_of(decl));
        for ty in supertypes {
            match classify(self.model, self.markers, ty) {
                SupertypeKind::DataSuper(super_decl) => {
                    if data_super.is_some() {
                        return Err(Error::AmbiguousSuperclass {
                            decl: self.model.source_path(decl),
                        });
                    }
                    data_super = Some((super_decl, ty));
                }
                SupertypeKind::PlainInterface => {
                    interface_refs.insert(self.names.resolve_type(ty));
                }
                SupertypeKind::MarkerSuper | SupertypeKind::Foreign => {}
            }
        }
        let superclass_ref = data_super.map(|(_, ty)| self.names.resolve_type(ty));

        let mut fields = Vec::new();
        let mut constants = Vec::new();
        let mut enums = Vec::new();
        let mut nested_types = Vec::new();
        let mut builder_fields = Vec::new();

        for &member in self.model.enclosed_of(decl) {
            match self.model.kind_of(member) {
                DeclKind::Method => {
                    // Only no-argument accessor-shaped methods define
                    // generated state; anything else is not reproduced.
                    if !self.model.method_params_of(member).is_empty() {
                        continue;
                    }
                    let Some(ret) = self.model.method_return_of(member) else {
                        continue;
                    };
                    let name = self.model.simple_name_of(member).to_string();
                    let ty = self.names.resolve_type(ret);
                    builder_fields.push(BuilderField {
                        name: name.clone(),
                        ty: ty.clone(),
                    });
                    fields.push(FieldDescriptor {
                        name,
                        ty,
                        annotations_on_field: self.annotations.expand(member, ApplySite::Field),
                        annotations_on_getter: self.annotations.expand(member, ApplySite::Getter),
                        annotations_on_setter: self.annotations.expand(member, ApplySite::Setter),
                    });
                }
                DeclKind::Field => {
                    constants.push(self.copy_constant(member)?);
                }
                DeclKind::Enum => {
                    enums.push(self.copy_enum(member)?);
                }
                DeclKind::Interface | DeclKind::Class if self.markers.is_target(member) => {
                    nested_types.push(self.generate(member)?);
                }
                kind => {
                    return Err(Error::UnsupportedMember {
                        kind,
                        decl: self.model.source_path(member),
                    });
                }
            }
        }

        let builder = if config.builder {
            Some(self.build_builder(&qualified_name, &type_parameters, data_super, builder_fields))
        } else {
            None
        };

        Ok(GeneratedTypeDescriptor {
            qualified_name,
            source: decl,
            modifiers,
            annotations: self.annotations.expand(decl, ApplySite::Type),
            type_parameters,
            superclass_ref,
            interface_refs,
            fields,
            constants,
            enums,
            nested_types,
            builder,
        })
    }

    /// The declaration and every lexically enclosing type must carry a
    /// resolvable marker.
    fn require_opted_in(&self, decl: DeclId) -> Result<()> {
        let mut current = Some(decl);
        while let Some(d) = current {
            if self.model.kind_of(d).is_type() {
                self.markers.require(d)?;
            }
            current = self.model.enclosing_of(d);
        }
        Ok(())
    }

    fn build_builder(
        &self,
        owner: &ClassRef,
        type_parameters: &[TypeVariable],
        data_super: Option<(DeclId, &TypeRef)>,
        fields: Vec<BuilderField>,
    ) -> BuilderDescriptor {
        let super_builder = data_super.and_then(|(super_decl, ty)| {
            let super_config = self.markers.resolve(super_decl)?;
            if !super_config.builder {
                return None;
            }
            builder_ref(&self.names.resolve_type(ty))
        });

        let overridden_super_setters = match (super_builder.is_some(), data_super) {
            (true, Some((super_decl, _))) => {
                let mut visited = HashSet::new();
                self.inherited_fields(super_decl, &mut visited)
            }
            _ => Vec::new(),
        };

        BuilderDescriptor {
            qualified_name: owner.nested("Builder"),
            superclass_ref: super_builder,
            type_parameters: type_parameters.to_vec(),
            fields,
            overridden_super_setters,
        }
    }

    /// Every field the given generation target contributes to its builders,
    /// farthest ancestor first, cycle-safe.
    fn inherited_fields(&self, decl: DeclId, visited: &mut HashSet<DeclId>) -> Vec<BuilderField> {
        if !visited.insert(decl) {
            return Vec::new();
        }
        let mut out = Vec::new();

        let ancestor = self
            .model
            .superclass_of(decl)
            .into_iter()
            .chain(self.model.interfaces_of(decl))
            .find_map(|ty| match classify(self.model, self.markers, ty) {
                SupertypeKind::DataSuper(id) => Some(id),
                _ => None,
            });
        if let Some(parent) = ancestor {
            out.extend(self.inherited_fields(parent, visited));
        }

        for &member in self.model.enclosed_of(decl) {
            if self.model.kind_of(member) != DeclKind::Method {
                continue;
            }
            if !self.model.method_params_of(member).is_empty() {
                continue;
            }
            let Some(ret) = self.model.method_return_of(member) else {
                continue;
            };
            out.push(BuilderField {
                name: self.model.simple_name_of(member).to_string(),
                ty: self.names.resolve_type(ret),
            });
        }
        out
    }

    /// A static field becomes a constant; its initializer is copied as
    /// source text, never reinterpreted. Instance fields have no generated
    /// counterpart.
    fn copy_constant(&self, decl: DeclId) -> Result<ConstantDescriptor> {
        if !self.model.modifiers_of(decl).contains(&Modifier::Static) {
            return Err(Error::UnsupportedMember {
                kind: DeclKind::Field,
                decl: self.model.source_path(decl),
            });
        }
        let Some(ty) = self.model.field_type_of(decl) else {
            return Err(Error::UnsupportedMember {
                kind: DeclKind::Field,
                decl: self.model.source_path(decl),
            });
        };
        let initializer = self
            .model
            .constant_value_of(decl)
            .or_else(|| self.model.initializer_of(decl))
            .map(str::to_string);
        Ok(ConstantDescriptor {
            name: self.model.simple_name_of(decl).to_string(),
            ty: self.names.resolve_type(ty),
            modifiers: self.model.modifiers_of(decl).to_vec(),
            initializer,
        })
    }

    /// A nested enum is reproduced as-is: constants in order, a no-argument
    /// constructor and the implicit `values()`/`valueOf(String)` overrides
    /// dropped, anything else rejected.
    fn copy_enum(&self, decl: DeclId) -> Result<EnumDescriptor> {
        let mut constants = Vec::new();
        for &member in self.model.enclosed_of(decl) {
            match self.model.kind_of(member) {
                DeclKind::EnumConstant => {
                    constants.push(self.model.simple_name_of(member).to_string());
                }
                DeclKind::Constructor => {
                    if !self.model.method_params_of(member).is_empty() {
                        return Err(Error::UnsupportedMember {
                            kind: DeclKind::Constructor,
                            decl: self.model.source_path(member),
                        });
                    }
                }
                DeclKind::Method => {
                    let name = self.model.simple_name_of(member);
                    let implicit = match (name, self.model.method_params_of(member)) {
                        ("values", []) => true,
                        ("valueOf", [TypeRef::Class(class)]) => {
                            class.qualified() == "java.lang.String"
                        }
                        _ => false,
                    };
                    if !implicit {
                        return Err(Error::UnsupportedMember {
                            kind: DeclKind::Method,
                            decl: self.model.source_path(member),
                        });
                    }
                }
                kind => {
                    return Err(Error::UnsupportedMember {
                        kind,
                        decl: self.model.source_path(member),
                    });
                }
            }
        }
        // `final` is implicit on enums and not legal to spell out.
        let modifiers = self
            .model
            .modifiers_of(decl)
            .iter()
            .copied()
            .filter(|&m| m != Modifier::Final && m != Modifier::Abstract)
            .collect();
        Ok(EnumDescriptor {
            name: self.model.simple_name_of(decl).to_string(),
            modifiers,
            constants,
        })
    }
}

/// The nested builder reference of a resolved supertype reference,
/// preserving any type arguments.
fn builder_ref(resolved: &TypeRef) -> Option<TypeRef> {
    match resolved {
        TypeRef::Class(class) => Some(TypeRef::Class(class.nested("Builder"))),
        TypeRef::Parameterized { raw, args } => Some(TypeRef::Parameterized {
            raw: raw.nested("Builder"),
            args: args.clone(),
        }),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::AnnotationArg;
    use autopojo_model::{
        fixtures, marker, Annotation, FieldDecl, FormatToken, InMemoryModel, TypeDecl,
    };

    fn run(model: &InMemoryModel, decl: DeclId) -> Result<GeneratedTypeDescriptor> {
        let options = GenerationOptions::default();
        let markers = MarkerResolver::new(model, options.builder_override);
        ClassGenerationTask::new(model, &options, &markers).generate(decl)
    }

    fn field_names(descriptor: &GeneratedTypeDescriptor) -> Vec<&str> {
        descriptor.fields.iter().map(|f| f.name.as_str()).collect()
    }

    #[test]
    fn flat_interface_generates_fields_and_a_builder() {
        let fixture = fixtures::food();
        let food = run(&fixture.model, fixture.food).unwrap();

        assert_eq!(food.qualified_name.qualified(), "gs.example.model.Food");
        assert!(food.modifiers.contains(&Modifier::Public));
        assert!(!food.modifiers.contains(&Modifier::Abstract));
        assert_eq!(field_names(&food), ["name", "tastes", "quality"]);
        assert_eq!(
            food.fields[1].ty.to_string(),
            "java.util.List<java.lang.String>"
        );
        assert!(food.superclass_ref.is_none());
        assert!(food.interface_refs.is_empty());
        // The marker itself is never re-emitted.
        assert!(food.annotations.is_empty());

        let builder = food.builder.as_ref().unwrap();
        assert_eq!(
            builder.qualified_name.qualified(),
            "gs.example.model.Food.Builder"
        );
        assert!(builder.superclass_ref.is_none());
        assert!(builder.overridden_super_setters.is_empty());
        assert_eq!(
            builder.fields.iter().map(|f| f.name.as_str()).collect::<Vec<_>>(),
            field_names(&food)
        );
    }

    #[test]
    fn data_inheritance_chains_generated_builders() {
        let fixture = fixtures::person_employee();
        let employee = run(&fixture.model, fixture.employee).unwrap();

        assert_eq!(
            employee.qualified_name.qualified(),
            "gs.example.model.Employee"
        );
        assert_eq!(
            employee.superclass_ref.as_ref().map(TypeRef::to_string),
            Some("gs.example.model.Person".to_string())
        );
        // The data supertype is not also kept as an implemented interface.
        assert!(employee.interface_refs.is_empty());
        assert_eq!(field_names(&employee), ["area", "subordinates"]);
        assert_eq!(
            employee.fields[1].ty.to_string(),
            "java.util.List<gs.example.model.Employee>"
        );

        let builder = employee.builder.as_ref().unwrap();
        assert_eq!(
            builder.superclass_ref.as_ref().map(TypeRef::to_string),
            Some("gs.example.model.Person.Builder".to_string())
        );
        // Exactly one override per superclass field, ancestors first.
        assert_eq!(
            builder
                .overridden_super_setters
                .iter()
                .map(|f| f.name.as_str())
                .collect::<Vec<_>>(),
            ["id", "name"]
        );
    }

    #[test]
    fn generics_nested_types_enums_and_constants() {
        let fixture = fixtures::complex();
        let complex = run(&fixture.model, fixture.complex).unwrap();

        assert_eq!(
            complex.qualified_name.qualified(),
            "gs.example.model.ComplexEntity"
        );
        assert_eq!(complex.type_parameters.len(), 1);
        assert_eq!(
            complex.type_parameters[0].bounds[0].to_string(),
            "gs.example.model.Item"
        );
        assert_eq!(
            complex
                .interface_refs
                .iter()
                .map(TypeRef::to_string)
                .collect::<Vec<_>>(),
            ["java.lang.Cloneable"]
        );
        assert_eq!(field_names(&complex), ["id", "name", "values", "status"]);
        assert_eq!(
            complex.fields[2].ty.to_string(),
            "java.util.List<gs.example.model.ComplexEntity.Pair<T, ? super gs.example.model.Item>>"
        );

        // Site filtering on the status accessor's extra annotations.
        let status = &complex.fields[3];
        let names = |specs: &[crate::descriptor::AnnotationSpec]| {
            specs.iter().map(|s| s.type_ref.qualified()).collect::<Vec<_>>()
        };
        assert_eq!(names(&status.annotations_on_field), ["java.lang.Deprecated"]);
        assert_eq!(
            names(&status.annotations_on_getter),
            ["java.lang.Deprecated", "javax.inject.Singleton"]
        );
        assert_eq!(names(&status.annotations_on_setter), ["java.lang.Deprecated"]);

        assert_eq!(complex.constants.len(), 1);
        let max_values = &complex.constants[0];
        assert_eq!(max_values.name, "MAX_VALUES");
        assert_eq!(max_values.initializer.as_deref(), Some("3"));

        assert_eq!(complex.enums.len(), 1);
        let status_enum = &complex.enums[0];
        assert_eq!(status_enum.name, "Status");
        assert_eq!(status_enum.constants, ["PENDING", "DONE"]);
        assert!(!status_enum.modifiers.contains(&Modifier::Final));

        assert_eq!(complex.nested_types.len(), 1);
        let pair = &complex.nested_types[0];
        assert_eq!(
            pair.qualified_name.qualified(),
            "gs.example.model.ComplexEntity.Pair"
        );
        assert!(pair.modifiers.contains(&Modifier::Static));
        assert!(pair.builder.is_none());
        assert_eq!(pair.annotations.len(), 1);
        assert_eq!(pair.annotations[0].type_ref.qualified(), "javax.inject.Named");
        assert_eq!(
            pair.annotations[0].args[0].1,
            AnnotationArg::Formatted {
                format: FormatToken::StringQuoted,
                value: "aPair".to_string()
            }
        );
    }

    #[test]
    fn two_marked_supertypes_are_ambiguous() {
        let mut model = InMemoryModel::new();
        let pojo = || Annotation::new(marker::MARKER);
        model.insert(TypeDecl::interface("gs.example", "LeftPOJO").annotate(pojo()));
        model.insert(TypeDecl::interface("gs.example", "RightPOJO").annotate(pojo()));
        let both = model.insert(
            TypeDecl::interface("gs.example", "BothPOJO")
                .annotate(pojo())
                .implements(TypeRef::class("gs.example.LeftPOJO"))
                .implements(TypeRef::class("gs.example.RightPOJO")),
        );

        assert!(matches!(
            run(&model, both),
            Err(Error::AmbiguousSuperclass { decl }) if decl == "gs.example.BothPOJO"
        ));
    }

    #[test]
    fn instance_fields_are_unsupported() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface("gs.example", "BadPOJO")
                .annotate(Annotation::new(marker::MARKER))
                .field(FieldDecl::instance("cache", TypeRef::class("java.lang.Object"))),
        );

        assert!(matches!(
            run(&model, decl),
            Err(Error::UnsupportedMember {
                kind: DeclKind::Field,
                ..
            })
        ));
    }

    #[test]
    fn enum_constructor_with_parameters_is_unsupported() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface("gs.example", "BadPOJO")
                .annotate(Annotation::new(marker::MARKER))
                .nested(
                    TypeDecl::enumeration("Kind")
                        .enum_constant("A")
                        .constructor(vec![TypeRef::primitive("int")]),
                ),
        );

        assert!(matches!(
            run(&model, decl),
            Err(Error::UnsupportedMember {
                kind: DeclKind::Constructor,
                ..
            })
        ));
    }

    #[test]
    fn enum_value_of_with_non_string_parameter_is_unsupported() {
        let mut model = InMemoryModel::new();
        // Only the implicit valueOf(String) override may be dropped; other
        // overloads are members the generator has no mapping for.
        let decl = model.insert(
            TypeDecl::interface("gs.example", "BadPOJO")
                .annotate(Annotation::new(marker::MARKER))
                .nested(
                    TypeDecl::enumeration("Kind")
                        .enum_constant("A")
                        .method(
                            autopojo_model::MethodDecl::new(
                                "valueOf",
                                TypeRef::class("gs.example.BadPOJO.Kind"),
                            )
                            .param(TypeRef::primitive("int")),
                        ),
                ),
        );

        assert!(matches!(
            run(&model, decl),
            Err(Error::UnsupportedMember {
                kind: DeclKind::Method,
                ..
            })
        ));
    }

    #[test]
    fn unmarked_nested_types_are_unsupported() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface("gs.example", "OuterPOJO")
                .annotate(Annotation::new(marker::MARKER))
                .nested(TypeDecl::interface("", "Plain")),
        );

        assert!(matches!(
            run(&model, decl),
            Err(Error::UnsupportedMember {
                kind: DeclKind::Interface,
                ..
            })
        ));
    }

    #[test]
    fn arity_bearing_methods_are_silently_skipped() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface("gs.example", "ApiPOJO")
                .annotate(
                    Annotation::new(marker::MARKER)
                        .arg("builder", autopojo_model::AnnotationValue::Bool(true)),
                )
                .getter("id", TypeRef::primitive("long"))
                .method(
                    autopojo_model::MethodDecl::new("rename", TypeRef::primitive("void"))
                        .param(TypeRef::class("java.lang.String")),
                ),
        );

        let api = run(&model, decl).unwrap();
        assert_eq!(field_names(&api), ["id"]);
        assert_eq!(api.builder.as_ref().unwrap().fields.len(), 1);
    }

    #[test]
    fn superclass_without_builder_leaves_the_chain_open() {
        let mut model = InMemoryModel::new();
        model.insert(
            TypeDecl::interface("gs.example", "BasePOJO")
                .annotate(Annotation::new(marker::MARKER))
                .getter("id", TypeRef::primitive("long")),
        );
        let child = model.insert(
            TypeDecl::interface("gs.example", "ChildPOJO")
                .annotate(
                    Annotation::new(marker::MARKER)
                        .arg("builder", autopojo_model::AnnotationValue::Bool(true)),
                )
                .implements(TypeRef::class("gs.example.BasePOJO"))
                .getter("name", TypeRef::class("java.lang.String")),
        );

        let generated = run(&model, child).unwrap();
        assert_eq!(
            generated.superclass_ref.as_ref().map(TypeRef::to_string),
            Some("gs.example.Base".to_string())
        );
        let builder = generated.builder.as_ref().unwrap();
        assert!(builder.superclass_ref.is_none());
        assert!(builder.overridden_super_setters.is_empty());
    }
}
