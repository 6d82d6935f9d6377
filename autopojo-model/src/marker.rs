//! The marker annotation surface.
//!
//! Three annotation types drive generation: the `POJO` marker that opts a
//! declaration in (with a name override and a builder flag), the
//! `ExtraAnnotation` descriptor that asks for an arbitrary annotation to be
//! re-emitted on generated output, and its repeatable container. The engine
//! reads these from raw [`Annotation`] mirrors through the typed views here.

use serde::Serialize;

use crate::annotation::{Annotation, AnnotationValue};
use crate::types::ClassRef;

/// Qualified name of the generation marker.
pub const MARKER: &str = "autopojo.POJO";
/// Qualified name of the extra-annotation descriptor.
pub const EXTRA_ANNOTATION: &str = "autopojo.ExtraAnnotation";
/// Qualified name of the repeatable extra-annotation container.
pub const EXTRA_ANNOTATIONS: &str = "autopojo.ExtraAnnotations";
/// The "this code was generated" marker attached to written output.
pub const GENERATED: &str = "javax.annotation.Generated";
/// Meta-annotations never re-emitted on generated output.
pub const TARGET: &str = "java.lang.annotation.Target";
pub const RETENTION: &str = "java.lang.annotation.Retention";

/// Annotation types suppressed from re-emission: the engine's own
/// bookkeeping plus meta-annotations.
pub const SUPPRESSED: &[&str] = &[MARKER, GENERATED, TARGET, RETENTION];

/// The effective marker configuration of a declaration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerConfig {
    /// Explicit generated-name override; blank means "derive a default".
    pub name: String,
    /// Whether to generate a nested builder type.
    pub builder: bool,
}

impl MarkerConfig {
    /// Read a marker configuration from a raw annotation, if it is one.
    pub fn from_annotation(ann: &Annotation) -> Option<Self> {
        if !ann.is_type(MARKER) {
            return None;
        }
        Some(Self {
            name: ann
                .get("value")
                .and_then(AnnotationValue::as_str)
                .unwrap_or_default()
                .to_string(),
            builder: ann
                .get("builder")
                .and_then(AnnotationValue::as_bool)
                .unwrap_or(false),
        })
    }

    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}

/// The explicit `builder` member of a marker annotation, if spelled out.
///
/// Distinct from [`MarkerConfig::from_annotation`]: an absent member is not
/// an override, it is the default.
pub fn builder_override(ann: &Annotation) -> Option<bool> {
    if !ann.is_type(MARKER) {
        return None;
    }
    ann.get("builder").and_then(AnnotationValue::as_bool)
}

/// Where an expanded annotation is applied on the generated output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ApplySite {
    Type,
    Field,
    Getter,
    Setter,
}

impl ApplySite {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "TYPE" | "CLASS" => Some(ApplySite::Type),
            "FIELD" => Some(ApplySite::Field),
            "GETTER" => Some(ApplySite::Getter),
            "SETTER" => Some(ApplySite::Setter),
            _ => None,
        }
    }
}

/// The member-rendering mini-language: a value is either spliced in as a
/// literal or emitted as a quoted string. The engine passes the token
/// through; only the renderer interprets it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FormatToken {
    Literal,
    StringQuoted,
}

impl FormatToken {
    pub fn parse(token: &str) -> Option<Self> {
        match token {
            "$L" => Some(FormatToken::Literal),
            "$S" => Some(FormatToken::StringQuoted),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            FormatToken::Literal => "$L",
            FormatToken::StringQuoted => "$S",
        }
    }
}

/// One member of an extra annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MemberSpec {
    pub name: String,
    pub format: FormatToken,
    pub value: String,
}

/// A parsed `ExtraAnnotation` descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtraAnnotationSpec {
    /// The annotation type to emit.
    pub target: ClassRef,
    pub members: Vec<MemberSpec>,
    /// Application sites; empty means all sites.
    pub apply_on: Vec<ApplySite>,
}

impl ExtraAnnotationSpec {
    /// Read an extra-annotation descriptor from a raw annotation, if it is
    /// one.
    pub fn from_annotation(ann: &Annotation) -> Option<Self> {
        if !ann.is_type(EXTRA_ANNOTATION) {
            return None;
        }
        let target = ClassRef::best_guess(ann.get("value").and_then(AnnotationValue::as_str)?);

        let members = ann
            .get("members")
            .map(|value| {
                value
                    .as_annotations()
                    .into_iter()
                    .map(parse_member)
                    .collect()
            })
            .unwrap_or_default();

        let apply_on = ann
            .get("applyOn")
            .map(|value| match value {
                AnnotationValue::List(values) => values.iter().filter_map(parse_site).collect(),
                single => parse_site(single).into_iter().collect(),
            })
            .unwrap_or_default();

        Some(Self {
            target,
            members,
            apply_on,
        })
    }

    pub fn applies_to(&self, site: ApplySite) -> bool {
        self.apply_on.is_empty() || self.apply_on.contains(&site)
    }
}

fn parse_member(ann: &Annotation) -> MemberSpec {
    MemberSpec {
        name: ann
            .get("name")
            .and_then(AnnotationValue::as_str)
            .unwrap_or("value")
            .to_string(),
        format: ann
            .get("format")
            .and_then(AnnotationValue::as_str)
            .and_then(FormatToken::parse)
            .unwrap_or(FormatToken::Literal),
        value: ann
            .get("value")
            .and_then(AnnotationValue::as_str)
            .unwrap_or_default()
            .to_string(),
    }
}

fn parse_site(value: &AnnotationValue) -> Option<ApplySite> {
    match value {
        AnnotationValue::EnumConstant { constant, .. } => ApplySite::parse(constant),
        AnnotationValue::Str(s) => ApplySite::parse(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named_extra() -> Annotation {
        Annotation::new(EXTRA_ANNOTATION)
            .arg("value", AnnotationValue::string("javax.inject.Named"))
            .arg(
                "members",
                AnnotationValue::Nested(
                    Annotation::new("autopojo.ExtraAnnotation.Member")
                        .arg("format", AnnotationValue::string("$S"))
                        .arg("value", AnnotationValue::string("aPair")),
                ),
            )
            .arg(
                "applyOn",
                AnnotationValue::List(vec![AnnotationValue::enum_constant(
                    "autopojo.ExtraAnnotation.ApplyOn",
                    "GETTER",
                )]),
            )
    }

    #[test]
    fn marker_config_reads_overrides_and_defaults() {
        let bare = Annotation::new(MARKER);
        let config = MarkerConfig::from_annotation(&bare).unwrap();
        assert!(!config.has_name());
        assert!(!config.builder);
        assert!(builder_override(&bare).is_none());

        let full = Annotation::new(MARKER)
            .arg("value", AnnotationValue::string("Food"))
            .arg("builder", AnnotationValue::Bool(true));
        let config = MarkerConfig::from_annotation(&full).unwrap();
        assert_eq!(config.name, "Food");
        assert!(config.builder);
        assert_eq!(builder_override(&full), Some(true));
    }

    #[test]
    fn extra_annotation_parses_members_and_sites() {
        let spec = ExtraAnnotationSpec::from_annotation(&named_extra()).unwrap();
        assert_eq!(spec.target.qualified(), "javax.inject.Named");
        assert_eq!(spec.members.len(), 1);
        assert_eq!(spec.members[0].name, "value");
        assert_eq!(spec.members[0].format, FormatToken::StringQuoted);
        assert_eq!(spec.members[0].value, "aPair");
        assert!(spec.applies_to(ApplySite::Getter));
        assert!(!spec.applies_to(ApplySite::Field));
    }

    #[test]
    fn empty_site_set_means_all_sites() {
        let spec = ExtraAnnotationSpec::from_annotation(
            &Annotation::new(EXTRA_ANNOTATION)
                .arg("value", AnnotationValue::string("java.lang.Deprecated")),
        )
        .unwrap();
        for site in [
            ApplySite::Type,
            ApplySite::Field,
            ApplySite::Getter,
            ApplySite::Setter,
        ] {
            assert!(spec.applies_to(site));
        }
    }
}
