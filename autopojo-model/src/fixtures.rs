//! Sample models shared by tests across the workspace.
//!
//! These mirror the example models a user of the generator would write:
//! a flat builder-enabled interface, an inheritance pair opted in through a
//! marker-bearing meta-annotation, and a generic model exercising nested
//! types, enums, constants, and extra annotations.

use crate::annotation::{Annotation, AnnotationValue};
use crate::decl::DeclId;
use crate::marker;
use crate::model::{FieldDecl, InMemoryModel, MethodDecl, TypeDecl};
use crate::types::{TypeRef, TypeVariable, Wildcard};

pub const PACKAGE: &str = "gs.example.model";

fn pojo() -> Annotation {
    Annotation::new(marker::MARKER)
}

fn string() -> TypeRef {
    TypeRef::class("java.lang.String")
}

fn list_of(arg: TypeRef) -> TypeRef {
    TypeRef::parameterized("java.util.List", vec![arg])
}

/// `FoodModel`: a flat interface with `@POJO(value = "Food", builder = true)`.
pub struct FoodFixture {
    pub model: InMemoryModel,
    pub food: DeclId,
}

pub fn food() -> FoodFixture {
    let mut model = InMemoryModel::new();
    let food = model.insert(
        TypeDecl::interface(PACKAGE, "FoodModel")
            .annotate(
                pojo()
                    .arg("value", AnnotationValue::string("Food"))
                    .arg("builder", AnnotationValue::Bool(true)),
            )
            .getter("name", string())
            .getter("tastes", list_of(string()))
            .getter("quality", TypeRef::primitive("float")),
    );
    FoodFixture { model, food }
}

/// `PersonPOJO` / `EmployeePOJO`: builder-enabled inheritance, where the
/// subtype is opted in transitively through `@MyPOJOWithBuilder`.
pub struct EmployeeFixture {
    pub model: InMemoryModel,
    pub person: DeclId,
    pub employee: DeclId,
    pub meta_annotation: DeclId,
}

pub fn person_employee() -> EmployeeFixture {
    let mut model = InMemoryModel::new();

    let meta_annotation = model.insert(
        TypeDecl::annotation(PACKAGE, "MyPOJOWithBuilder")
            .annotate(pojo().arg("builder", AnnotationValue::Bool(true)))
            .annotate(Annotation::new(marker::TARGET).arg(
                "value",
                AnnotationValue::List(vec![AnnotationValue::enum_constant(
                    "java.lang.annotation.ElementType",
                    "TYPE",
                )]),
            )),
    );

    let person = model.insert(
        TypeDecl::interface(PACKAGE, "PersonPOJO")
            .annotate(pojo().arg("builder", AnnotationValue::Bool(true)))
            .getter("id", TypeRef::primitive("long"))
            .getter("name", string()),
    );

    let employee = model.insert(
        TypeDecl::interface(PACKAGE, "EmployeePOJO")
            .annotate(Annotation::new(&format!("{PACKAGE}.MyPOJOWithBuilder")))
            .implements(TypeRef::class(&format!("{PACKAGE}.PersonPOJO")))
            .getter("area", string())
            .getter("subordinates", list_of(TypeRef::class(&format!("{PACKAGE}.EmployeePOJO")))),
    );

    EmployeeFixture {
        model,
        person,
        employee,
        meta_annotation,
    }
}

/// `ComplexPOJO<T>`: generics, a marker-bearing nested type with an extra
/// annotation, a nested enum carrying droppable members, a constant, and a
/// plain superinterface that survives re-targeting.
pub struct ComplexFixture {
    pub model: InMemoryModel,
    pub complex: DeclId,
    pub item: DeclId,
}

pub fn complex() -> ComplexFixture {
    let mut model = InMemoryModel::new();

    // Registered so the interface filter can confirm its kind.
    model.insert(TypeDecl::interface("java.lang", "Cloneable"));

    let item = model.insert(
        TypeDecl::interface(PACKAGE, "ItemPOJO")
            .annotate(pojo())
            .getter("id", TypeRef::primitive("long")),
    );

    let item_ref = TypeRef::class(&format!("{PACKAGE}.ItemPOJO"));
    let pair = TypeDecl::interface("", "Pair")
        .annotate(pojo())
        .annotate(
            Annotation::new(marker::EXTRA_ANNOTATION)
                .arg("value", AnnotationValue::string("javax.inject.Named"))
                .arg(
                    "members",
                    AnnotationValue::Nested(
                        Annotation::new("autopojo.ExtraAnnotation.Member")
                            .arg("format", AnnotationValue::string("$S"))
                            .arg("value", AnnotationValue::string("aPair")),
                    ),
                ),
        )
        .type_param(TypeVariable::new("A"))
        .type_param(TypeVariable::new("B"))
        .getter("a", TypeRef::variable("A"))
        .getter("b", TypeRef::variable("B"));

    let status = TypeDecl::enumeration("Status")
        .enum_constant("PENDING")
        .enum_constant("DONE")
        .constructor(Vec::new())
        .method(MethodDecl::new(
            "values",
            TypeRef::array(TypeRef::class(&format!("{PACKAGE}.ComplexPOJO.Status"))),
        ))
        .method(
            MethodDecl::new(
                "valueOf",
                TypeRef::class(&format!("{PACKAGE}.ComplexPOJO.Status")),
            )
            .param(string()),
        );

    let complex = model.insert(
        TypeDecl::interface(PACKAGE, "ComplexPOJO")
            .annotate(pojo().arg("value", AnnotationValue::string("ComplexEntity")))
            .type_param(TypeVariable::new("T").bound(item_ref.clone()))
            .implements(TypeRef::class("java.lang.Cloneable"))
            .getter("id", TypeRef::primitive("long"))
            .getter("name", string())
            .getter(
                "values",
                list_of(TypeRef::Parameterized {
                    raw: crate::types::ClassRef::top_level(PACKAGE, "ComplexPOJO").nested("Pair"),
                    args: vec![
                        TypeRef::variable("T"),
                        TypeRef::Wildcard(Wildcard::Super(Box::new(item_ref))),
                    ],
                }),
            )
            .method(
                MethodDecl::new(
                    "status",
                    TypeRef::class(&format!("{PACKAGE}.ComplexPOJO.Status")),
                )
                .annotate(
                    Annotation::new(marker::EXTRA_ANNOTATION)
                        .arg("value", AnnotationValue::string("java.lang.Deprecated")),
                )
                .annotate(
                    Annotation::new(marker::EXTRA_ANNOTATION)
                        .arg("value", AnnotationValue::string("javax.inject.Singleton"))
                        .arg(
                            "applyOn",
                            AnnotationValue::List(vec![AnnotationValue::enum_constant(
                                "autopojo.ExtraAnnotation.ApplyOn",
                                "GETTER",
                            )]),
                        ),
                ),
            )
            .field(FieldDecl::constant("MAX_VALUES", TypeRef::primitive("int")).value("3"))
            .nested(pair)
            .nested(status),
    );

    ComplexFixture {
        model,
        complex,
        item,
    }
}
