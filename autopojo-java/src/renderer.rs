//! Java source rendering for generated type descriptors.
//!
//! Every type reference is emitted fully qualified, so no import management
//! is needed and output is insensitive to what else lives in the package.
//! The owning class and its builder refer to themselves by simple name.

use autopojo_engine::{
    AnnotationArg, AnnotationSpec, BuilderDescriptor, ConstantDescriptor, EnumDescriptor,
    FieldDescriptor, GeneratedTypeDescriptor, SourceRenderer,
};
use autopojo_model::{Annotation, AnnotationValue, FormatToken, Modifier, TypeVariable};

use crate::code::CodeBuilder;

pub struct JavaRenderer;

impl SourceRenderer for JavaRenderer {
    fn render(&self, descriptor: &GeneratedTypeDescriptor) -> String {
        let mut code = CodeBuilder::new();
        let package = descriptor.qualified_name.package();
        if !package.is_empty() {
            code = code.line(&format!("package {package};")).blank();
        }
        self.render_type(code, descriptor).build()
    }
}

impl JavaRenderer {
    fn render_type(&self, code: CodeBuilder, d: &GeneratedTypeDescriptor) -> CodeBuilder {
        let code = code.each(&d.annotations, |c, ann| c.line(&render_annotation(ann)));

        let mut header = format!(
            "{}class {}{}",
            modifiers_prefix(&d.modifiers),
            d.qualified_name.simple_name(),
            type_params_decl(&d.type_parameters),
        );
        if let Some(superclass) = &d.superclass_ref {
            header.push_str(&format!(" extends {superclass}"));
        }
        if !d.interface_refs.is_empty() {
            let implemented: Vec<String> =
                d.interface_refs.iter().map(ToString::to_string).collect();
            header.push_str(&format!(" implements {}", implemented.join(", ")));
        }

        code.block(&header, |mut body| {
            let mut first = true;

            if !d.constants.is_empty() {
                body = section(body, &mut first);
                for constant in &d.constants {
                    body = body.line(&render_constant(constant));
                }
            }

            if !d.fields.is_empty() {
                body = section(body, &mut first);
                for field in &d.fields {
                    body = body
                        .each(&field.annotations_on_field, |c, ann| {
                            c.line(&render_annotation(ann))
                        })
                        .line(&format!("private {} {};", field.ty, field.name));
                }
            }

            for field in &d.fields {
                body = section(body, &mut first);
                body = self.render_getter(body, field);
                body = section(body, &mut first);
                body = self.render_setter(body, field);
            }

            for nested_enum in &d.enums {
                body = section(body, &mut first);
                body = render_enum(body, nested_enum);
            }

            for nested in &d.nested_types {
                body = section(body, &mut first);
                body = self.render_type(body, nested);
            }

            if let Some(builder) = &d.builder {
                body = section(body, &mut first);
                body = self.render_builder(body, d, builder);
            }

            body
        })
    }

    fn render_getter(&self, code: CodeBuilder, field: &FieldDescriptor) -> CodeBuilder {
        code.each(&field.annotations_on_getter, |c, ann| {
            c.line(&render_annotation(ann))
        })
        .block(
            &format!("public {} get{}()", field.ty, capitalize(&field.name)),
            |b| b.line(&format!("return {};", field.name)),
        )
    }

    fn render_setter(&self, code: CodeBuilder, field: &FieldDescriptor) -> CodeBuilder {
        code.each(&field.annotations_on_setter, |c, ann| {
            c.line(&render_annotation(ann))
        })
        .block(
            &format!(
                "public void set{}({} {})",
                capitalize(&field.name),
                field.ty,
                field.name
            ),
            |b| b.line(&format!("this.{0} = {0};", field.name)),
        )
    }

    fn render_builder(
        &self,
        code: CodeBuilder,
        owner: &GeneratedTypeDescriptor,
        builder: &BuilderDescriptor,
    ) -> CodeBuilder {
        let owner_self = format!(
            "{}{}",
            owner.qualified_name.simple_name(),
            type_args(&builder.type_parameters)
        );
        let builder_self = format!("Builder{}", type_args(&builder.type_parameters));
        let allocation = if builder.type_parameters.is_empty() {
            format!("new {}()", owner.qualified_name.simple_name())
        } else {
            format!("new {}<>()", owner.qualified_name.simple_name())
        };

        let mut header = format!(
            "public static class Builder{}",
            type_params_decl(&builder.type_parameters)
        );
        if let Some(superclass) = &builder.superclass_ref {
            header.push_str(&format!(" extends {superclass}"));
        }

        code.block(&header, |mut body| {
            let mut first = true;

            if !builder.fields.is_empty() {
                body = section(body, &mut first);
                for field in &builder.fields {
                    body = body.line(&format!("private {} {};", field.ty, field.name));
                }
            }

            for field in &builder.fields {
                body = section(body, &mut first);
                body = body.block(&format!("public {} {}()", field.ty, field.name), |b| {
                    b.line(&format!("return {};", field.name))
                });
                body = section(body, &mut first);
                body = body.block(
                    &format!("public {builder_self} {0}({1} {0})", field.name, field.ty),
                    |b| b.line(&format!("this.{0} = {0};", field.name)).line("return this;"),
                );
            }

            for setter in &builder.overridden_super_setters {
                body = section(body, &mut first);
                body = body.line("@java.lang.Override").block(
                    &format!("public {builder_self} {0}({1} {0})", setter.name, setter.ty),
                    |b| b.line(&format!("super.{0}({0});", setter.name)).line("return this;"),
                );
            }

            body = section(body, &mut first);
            body = body.block(
                &format!("protected void fillInstance({owner_self} instance)"),
                |b| {
                    b.when(builder.superclass_ref.is_some(), |b| {
                        b.line("super.fillInstance(instance);")
                    })
                    .each(&builder.fields, |b, field| {
                        b.line(&format!("instance.{0} = {0};", field.name))
                    })
                },
            );

            body = section(body, &mut first);
            body.block(&format!("public {owner_self} build()"), |b| {
                b.line(&format!("{owner_self} instance = {allocation};"))
                    .line("fillInstance(instance);")
                    .line("return instance;")
            })
        })
    }
}

/// Emit the blank line that separates body sections, except before the
/// first one.
fn section(code: CodeBuilder, first: &mut bool) -> CodeBuilder {
    if std::mem::take(first) { code } else { code.blank() }
}

fn render_constant(constant: &ConstantDescriptor) -> String {
    let mut line = format!(
        "{}{} {}",
        modifiers_prefix(&constant.modifiers),
        constant.ty,
        constant.name
    );
    if let Some(initializer) = &constant.initializer {
        line.push_str(&format!(" = {initializer}"));
    }
    line.push(';');
    line
}

fn render_enum(code: CodeBuilder, nested_enum: &EnumDescriptor) -> CodeBuilder {
    code.block(
        &format!(
            "{}enum {}",
            modifiers_prefix(&nested_enum.modifiers),
            nested_enum.name
        ),
        |b| {
            b.when(!nested_enum.constants.is_empty(), |b| {
                b.line(&nested_enum.constants.join(", "))
            })
        },
    )
}

fn modifiers_prefix(modifiers: &[Modifier]) -> String {
    let mut prefix = String::new();
    for modifier in modifiers {
        prefix.push_str(modifier.as_str());
        prefix.push(' ');
    }
    prefix
}

fn type_params_decl(params: &[TypeVariable]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let rendered: Vec<String> = params
        .iter()
        .map(|param| {
            if param.bounds.is_empty() {
                param.name.clone()
            } else {
                let bounds: Vec<String> = param.bounds.iter().map(ToString::to_string).collect();
                format!("{} extends {}", param.name, bounds.join(" & "))
            }
        })
        .collect();
    format!("<{}>", rendered.join(", "))
}

fn type_args(params: &[TypeVariable]) -> String {
    if params.is_empty() {
        return String::new();
    }
    let names: Vec<&str> = params.iter().map(|param| param.name.as_str()).collect();
    format!("<{}>", names.join(", "))
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(head) => head.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn render_annotation(spec: &AnnotationSpec) -> String {
    render_annotation_parts(
        &spec.type_ref.qualified(),
        spec.args.iter().map(|(name, arg)| (name.as_str(), render_arg(arg))),
    )
}

fn render_raw_annotation(ann: &Annotation) -> String {
    render_annotation_parts(
        &ann.type_name.qualified(),
        ann.args
            .iter()
            .map(|(name, value)| (name.as_str(), render_value(value))),
    )
}

fn render_annotation_parts<'a>(
    name: &str,
    args: impl Iterator<Item = (&'a str, String)>,
) -> String {
    let args: Vec<(&str, String)> = args.collect();
    match args.as_slice() {
        [] => format!("@{name}"),
        [("value", value)] => format!("@{name}({value})"),
        _ => {
            let members: Vec<String> = args
                .iter()
                .map(|(member, value)| format!("{member} = {value}"))
                .collect();
            format!("@{name}({})", members.join(", "))
        }
    }
}

fn render_arg(arg: &AnnotationArg) -> String {
    match arg {
        AnnotationArg::Value(value) => render_value(value),
        AnnotationArg::Formatted {
            format: FormatToken::Literal,
            value,
        } => value.clone(),
        AnnotationArg::Formatted {
            format: FormatToken::StringQuoted,
            value,
        } => quote(value),
    }
}

fn render_value(value: &AnnotationValue) -> String {
    match value {
        AnnotationValue::Bool(b) => b.to_string(),
        AnnotationValue::Int(i) => i.to_string(),
        AnnotationValue::Float(f) => f.to_string(),
        AnnotationValue::Str(s) => quote(s),
        AnnotationValue::EnumConstant {
            type_name,
            constant,
        } => format!("{}.{constant}", type_name.qualified()),
        AnnotationValue::ClassLiteral(class) => format!("{}.class", class.qualified()),
        AnnotationValue::List(values) => {
            let rendered: Vec<String> = values.iter().map(render_value).collect();
            format!("{{{}}}", rendered.join(", "))
        }
        AnnotationValue::Nested(ann) => render_raw_annotation(ann),
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        match c {
            '\\' => quoted.push_str("\\\\"),
            '"' => quoted.push_str("\\\""),
            '\n' => quoted.push_str("\\n"),
            '\r' => quoted.push_str("\\r"),
            '\t' => quoted.push_str("\\t"),
            other => quoted.push(other),
        }
    }
    quoted.push('"');
    quoted
}

#[cfg(test)]
mod tests {
    use super::*;
    use autopojo_model::ClassRef;

    #[test]
    fn annotations_render_members_and_positional_value() {
        let bare = AnnotationSpec {
            type_ref: ClassRef::best_guess("java.lang.Deprecated"),
            args: Vec::new(),
        };
        assert_eq!(render_annotation(&bare), "@java.lang.Deprecated");

        let positional = AnnotationSpec {
            type_ref: ClassRef::best_guess("javax.inject.Named"),
            args: vec![(
                "value".to_string(),
                AnnotationArg::Formatted {
                    format: FormatToken::StringQuoted,
                    value: "aPair".to_string(),
                },
            )],
        };
        assert_eq!(render_annotation(&positional), "@javax.inject.Named(\"aPair\")");

        let multi = AnnotationSpec {
            type_ref: ClassRef::best_guess("gs.example.Range"),
            args: vec![
                ("min".to_string(), AnnotationArg::Value(AnnotationValue::Int(0))),
                (
                    "max".to_string(),
                    AnnotationArg::Formatted {
                        format: FormatToken::Literal,
                        value: "10".to_string(),
                    },
                ),
            ],
        };
        assert_eq!(render_annotation(&multi), "@gs.example.Range(min = 0, max = 10)");
    }

    #[test]
    fn values_cover_every_member_shape() {
        assert_eq!(render_value(&AnnotationValue::Bool(true)), "true");
        assert_eq!(render_value(&AnnotationValue::string("a \"b\"")), "\"a \\\"b\\\"\"");
        assert_eq!(
            render_value(&AnnotationValue::enum_constant(
                "java.lang.annotation.ElementType",
                "TYPE"
            )),
            "java.lang.annotation.ElementType.TYPE"
        );
        assert_eq!(
            render_value(&AnnotationValue::ClassLiteral(ClassRef::best_guess(
                "java.lang.String"
            ))),
            "java.lang.String.class"
        );
        assert_eq!(
            render_value(&AnnotationValue::List(vec![
                AnnotationValue::Int(1),
                AnnotationValue::Int(2)
            ])),
            "{1, 2}"
        );
    }

    #[test]
    fn type_parameter_declarations_spell_out_bounds() {
        let unbounded = TypeVariable::new("T");
        assert_eq!(type_params_decl(&[unbounded.clone()]), "<T>");

        let bounded = TypeVariable::new("T")
            .bound(autopojo_model::TypeRef::class("gs.example.Item"))
            .bound(autopojo_model::TypeRef::class("java.lang.Cloneable"));
        assert_eq!(
            type_params_decl(&[bounded, TypeVariable::new("U")]),
            "<T extends gs.example.Item & java.lang.Cloneable, U>"
        );
        assert_eq!(type_args(&[unbounded, TypeVariable::new("U")]), "<T, U>");
    }

    #[test]
    fn getter_names_capitalize_the_field() {
        assert_eq!(capitalize("name"), "Name");
        assert_eq!(capitalize("iD"), "ID");
        assert_eq!(capitalize(""), "");
    }
}
