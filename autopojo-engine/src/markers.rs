//! Effective marker configuration lookup.
//!
//! A declaration is a generation target when the marker is attached to it
//! directly or transitively: an annotation type attached to the declaration
//! may itself carry the marker, directly or through its own annotations.
//! The walk is depth-first in attachment order, cycle-safe, and memoized
//! for the lifetime of one resolver.

use std::cell::RefCell;
use std::collections::{HashMap, HashSet};

use autopojo_model::{marker, Annotation, DeclId, DeclarationModel, MarkerConfig};

use crate::error::{Error, Result};
use crate::options::OverridePolicy;

pub struct MarkerResolver<'a, M: DeclarationModel + ?Sized> {
    model: &'a M,
    policy: OverridePolicy,
    // Per-task resolver, single-threaded; interior mutability keeps the
    // query surface &self like the rest of the engine.
    cache: RefCell<HashMap<DeclId, Option<MarkerConfig>>>,
}

impl<'a, M: DeclarationModel + ?Sized> MarkerResolver<'a, M> {
    pub fn new(model: &'a M, policy: OverridePolicy) -> Self {
        Self {
            model,
            policy,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// The effective marker configuration, or `None` when no marker exists
    /// anywhere in the transitive annotation closure.
    pub fn resolve(&self, decl: DeclId) -> Option<MarkerConfig> {
        if let Some(hit) = self.cache.borrow().get(&decl) {
            return hit.clone();
        }
        let computed = self.resolve_uncached(decl);
        self.cache.borrow_mut().insert(decl, computed.clone());
        computed
    }

    /// Like [`resolve`](Self::resolve), but a missing marker is a
    /// configuration error. Callers must only invoke this once a marker is
    /// expected to exist.
    pub fn require(&self, decl: DeclId) -> Result<MarkerConfig> {
        self.resolve(decl).ok_or_else(|| Error::MissingMarker {
            decl: self.model.source_path(decl),
        })
    }

    pub fn is_target(&self, decl: DeclId) -> bool {
        self.resolve(decl).is_some()
    }

    fn resolve_uncached(&self, decl: DeclId) -> Option<MarkerConfig> {
        // The declaration itself comes first in the traversal order.
        let mut first = self
            .model
            .annotations_of(decl)
            .iter()
            .find_map(MarkerConfig::from_annotation);

        let mut overrides = Vec::new();
        let mut visited = HashSet::new();
        self.walk(
            self.model.annotations_of(decl),
            &mut first,
            &mut overrides,
            &mut visited,
        );

        let mut config = first?;
        let winner = match self.policy {
            OverridePolicy::FirstWins => overrides.first(),
            OverridePolicy::LastWins => overrides.last(),
        };
        if let Some(&builder) = winner {
            config.builder = builder;
        }
        Some(config)
    }

    /// Walk annotation types attached through `annotations`, collecting the
    /// first marker found and every explicit builder override, in traversal
    /// order. An annotation type already visited is a dead end.
    fn walk(
        &self,
        annotations: &[Annotation],
        first: &mut Option<MarkerConfig>,
        overrides: &mut Vec<bool>,
        visited: &mut HashSet<DeclId>,
    ) {
        for ann in annotations {
            let Some(ann_type) = self.model.lookup(&ann.type_name.qualified()) else {
                continue;
            };
            if !visited.insert(ann_type) {
                continue;
            }
            for attached in self.model.annotations_of(ann_type) {
                if first.is_none() {
                    *first = MarkerConfig::from_annotation(attached);
                }
                if let Some(builder) = marker::builder_override(attached) {
                    overrides.push(builder);
                }
            }
            self.walk(self.model.annotations_of(ann_type), first, overrides, visited);
        }
    }
}
