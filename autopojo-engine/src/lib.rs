//! Generation engine for the autopojo generator.
//!
//! Given a declaration model and a set of marked interface declarations,
//! the engine produces one [`GeneratedTypeDescriptor`] tree per top-level
//! declaration and hands rendered output to a [`SourceSink`]. The walk is a
//! single-pass depth-first transform; top-level declarations are processed
//! in parallel, nested types synchronously within their parent.
//!
//! # Module Organization
//!
//! - [`markers`] - Effective marker configuration lookup
//! - [`names`] - Generated-name computation and type-reference rewriting
//! - [`annotations`] - Per-site annotation expansion
//! - [`task`] - The recursive class generation task
//! - [`orchestrator`] - Batch scheduling and renderer/sink hand-off
//! - [`descriptor`] - Generated-type descriptor tree
//! - [`error`] - Error taxonomy, diagnostics, batch report

pub mod annotations;
pub mod descriptor;
pub mod error;
pub mod markers;
pub mod names;
pub mod options;
pub mod orchestrator;
pub mod supertype;
pub mod task;

pub use annotations::AnnotationExpander;
pub use descriptor::{
    AnnotationArg, AnnotationSpec, BuilderDescriptor, BuilderField, ConstantDescriptor,
    EnumDescriptor, FieldDescriptor, GeneratedTypeDescriptor,
};
pub use error::{BatchReport, Diagnostic, Error, Result, Severity};
pub use markers::MarkerResolver;
pub use names::NameResolver;
pub use options::{GenerationOptions, OverridePolicy};
pub use orchestrator::{Orchestrator, SourceRenderer, SourceSink};
pub use supertype::SupertypeKind;
pub use task::ClassGenerationTask;
