//! Per-site annotation expansion.
//!
//! For every annotation directly attached to a declaration: repeatable
//! extra-annotation containers unwrap into their elements, single
//! extra-annotation descriptors are filtered by application site, and
//! anything else is re-emitted verbatim. Annotations cascade through
//! marker-bearing annotation types, so a meta-annotation that opts a type
//! in can also contribute annotations to its output. Bookkeeping
//! annotations are suppressed after expansion, matching the order the
//! cascade produces.

use std::collections::HashSet;

use autopojo_model::{marker, Annotation, ApplySite, DeclId, DeclarationModel, ExtraAnnotationSpec};

use crate::descriptor::AnnotationSpec;
use crate::markers::MarkerResolver;

pub struct AnnotationExpander<'a, M: DeclarationModel + ?Sized> {
    model: &'a M,
    markers: &'a MarkerResolver<'a, M>,
}

impl<'a, M: DeclarationModel + ?Sized> AnnotationExpander<'a, M> {
    pub fn new(model: &'a M, markers: &'a MarkerResolver<'a, M>) -> Self {
        Self { model, markers }
    }

    /// All annotations to re-emit for `decl` at `site`, in attachment
    /// order, cascaded ones after direct ones.
    pub fn expand(&self, decl: DeclId, site: ApplySite) -> Vec<AnnotationSpec> {
        let mut out = Vec::new();
        let mut visited = HashSet::new();
        for ann in self.model.annotations_of(decl) {
            self.expand_one(ann, site, &mut visited, &mut out);
        }
        out.retain(|spec| !marker::SUPPRESSED.contains(&spec.type_ref.qualified().as_str()));
        out
    }

    fn expand_one(
        &self,
        ann: &Annotation,
        site: ApplySite,
        visited: &mut HashSet<DeclId>,
        out: &mut Vec<AnnotationSpec>,
    ) {
        if ann.is_type(marker::EXTRA_ANNOTATIONS) {
            let elements = ann
                .get("value")
                .map(|value| value.as_annotations())
                .unwrap_or_default();
            for element in elements {
                if let Some(spec) = ExtraAnnotationSpec::from_annotation(element) {
                    self.push_extra(&spec, site, out);
                }
            }
        } else if let Some(spec) = ExtraAnnotationSpec::from_annotation(ann) {
            self.push_extra(&spec, site, out);
        } else {
            out.push(AnnotationSpec::verbatim(ann));
        }

        // Cascade: a marker-bearing annotation type contributes its own
        // transitively attached annotations to the output.
        if let Some(ann_type) = self.model.lookup(&ann.type_name.qualified()) {
            if self.markers.is_target(ann_type) && visited.insert(ann_type) {
                for attached in self.model.annotations_of(ann_type) {
                    self.expand_one(attached, site, visited, out);
                }
            }
        }
    }

    fn push_extra(&self, spec: &ExtraAnnotationSpec, site: ApplySite, out: &mut Vec<AnnotationSpec>) {
        if spec.applies_to(site) {
            out.push(AnnotationSpec::from_extra(spec));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OverridePolicy;
    use autopojo_model::{AnnotationValue, InMemoryModel, TypeDecl};

    const PKG: &str = "gs.example";

    fn extra(target: &str) -> Annotation {
        Annotation::new(marker::EXTRA_ANNOTATION).arg("value", AnnotationValue::string(target))
    }

    fn expand(model: &InMemoryModel, decl: DeclId, site: ApplySite) -> Vec<String> {
        let markers = MarkerResolver::new(model, OverridePolicy::LastWins);
        let expander = AnnotationExpander::new(model, &markers);
        expander
            .expand(decl, site)
            .into_iter()
            .map(|spec| spec.type_ref.qualified())
            .collect()
    }

    #[test]
    fn site_filter_limits_extra_annotations() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface(PKG, "Thing").annotate(
                extra("javax.inject.Singleton").arg(
                    "applyOn",
                    AnnotationValue::List(vec![AnnotationValue::enum_constant(
                        "autopojo.ExtraAnnotation.ApplyOn",
                        "GETTER",
                    )]),
                ),
            ),
        );

        assert_eq!(
            expand(&model, decl, ApplySite::Getter),
            ["javax.inject.Singleton"]
        );
        assert!(expand(&model, decl, ApplySite::Type).is_empty());
        assert!(expand(&model, decl, ApplySite::Field).is_empty());
        assert!(expand(&model, decl, ApplySite::Setter).is_empty());
    }

    #[test]
    fn container_unwraps_in_order() {
        let mut model = InMemoryModel::new();
        let container = Annotation::new(marker::EXTRA_ANNOTATIONS).arg(
            "value",
            AnnotationValue::List(vec![
                AnnotationValue::Nested(extra("java.lang.Deprecated")),
                AnnotationValue::Nested(extra("javax.inject.Singleton")),
            ]),
        );
        let decl = model.insert(TypeDecl::interface(PKG, "Thing").annotate(container));

        assert_eq!(
            expand(&model, decl, ApplySite::Type),
            ["java.lang.Deprecated", "javax.inject.Singleton"]
        );
    }

    #[test]
    fn bookkeeping_annotations_are_suppressed() {
        let mut model = InMemoryModel::new();
        let decl = model.insert(
            TypeDecl::interface(PKG, "Thing")
                .annotate(Annotation::new(marker::MARKER))
                .annotate(Annotation::new("javax.inject.Singleton")),
        );

        assert_eq!(expand(&model, decl, ApplySite::Type), ["javax.inject.Singleton"]);
    }

    #[test]
    fn marker_bearing_annotation_types_cascade() {
        let mut model = InMemoryModel::new();
        // @MyPOJO carries the marker plus annotations of its own; using it
        // brings those along, minus the suppressed ones.
        model.insert(
            TypeDecl::annotation(PKG, "MyPOJO")
                .annotate(Annotation::new(marker::MARKER))
                .annotate(Annotation::new("javax.inject.Singleton"))
                .annotate(extra("java.lang.SuppressWarnings"))
                .annotate(Annotation::new(marker::TARGET)),
        );
        let decl = model.insert(
            TypeDecl::interface(PKG, "Thing")
                .annotate(Annotation::new(&format!("{PKG}.MyPOJO"))),
        );

        assert_eq!(
            expand(&model, decl, ApplySite::Type),
            [
                &format!("{PKG}.MyPOJO") as &str,
                "javax.inject.Singleton",
                "java.lang.SuppressWarnings",
            ]
        );
    }

    #[test]
    fn cascades_are_cycle_safe() {
        let mut model = InMemoryModel::new();
        model.insert(
            TypeDecl::annotation(PKG, "A")
                .annotate(Annotation::new(marker::MARKER))
                .annotate(Annotation::new(&format!("{PKG}.B"))),
        );
        model.insert(
            TypeDecl::annotation(PKG, "B")
                .annotate(Annotation::new(marker::MARKER))
                .annotate(Annotation::new(&format!("{PKG}.A"))),
        );
        let decl = model.insert(
            TypeDecl::interface(PKG, "Thing").annotate(Annotation::new(&format!("{PKG}.A"))),
        );

        let names = expand(&model, decl, ApplySite::Type);
        // Finite, and each annotation use is emitted at most once per visit.
        assert_eq!(
            names,
            [&format!("{PKG}.A") as &str, &format!("{PKG}.B"), &format!("{PKG}.A")]
        );
    }
}
