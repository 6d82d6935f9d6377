//! Batch scheduling and renderer/sink hand-off.
//!
//! Top-level generation tasks are embarrassingly parallel: each one reads
//! the immutable declaration model and owns its descriptor tree until it is
//! rendered. Failures are collected per declaration and never cancel
//! siblings; the batch fails as a whole when any task failed.

use rayon::prelude::*;

use autopojo_model::{DeclId, DeclKind, DeclarationModel};

use crate::descriptor::{AnnotationSpec, GeneratedTypeDescriptor};
use crate::error::{BatchReport, Diagnostic, Error, Result};
use crate::markers::MarkerResolver;
use crate::options::GenerationOptions;
use crate::task::ClassGenerationTask;

/// Renders one generated type descriptor tree to source text.
///
/// Must tolerate concurrent calls on distinct descriptors.
pub trait SourceRenderer: Sync {
    fn render(&self, descriptor: &GeneratedTypeDescriptor) -> String;
}

/// Writes rendered source, keyed by the generated type's qualified name.
pub trait SourceSink: Sync {
    fn write(&self, qualified_name: &str, source: &str) -> std::io::Result<()>;
}

pub struct Orchestrator<'a, M: DeclarationModel + ?Sized> {
    model: &'a M,
    options: GenerationOptions,
}

impl<'a, M: DeclarationModel + ?Sized> Orchestrator<'a, M> {
    pub fn new(model: &'a M, options: GenerationOptions) -> Self {
        Self { model, options }
    }

    /// Run one generation task per declaration and write every top-level
    /// result. The report lists written types and diagnostics in input
    /// order regardless of scheduling.
    pub fn run<R, S>(&self, declarations: &[DeclId], renderer: &R, sink: &S) -> BatchReport
    where
        R: SourceRenderer,
        S: SourceSink,
    {
        let outcomes: Vec<_> = declarations
            .par_iter()
            .map(|&decl| self.process(decl, renderer, sink))
            .collect();

        let mut report = BatchReport::default();
        for (&decl, outcome) in declarations.iter().zip(outcomes) {
            match outcome {
                Ok(Some(qualified_name)) => report.written.push(qualified_name),
                Ok(None) => {}
                Err(err) => report
                    .diagnostics
                    .push(Diagnostic::error(self.model.source_path(decl), err.to_string())),
            }
        }
        report
    }

    /// Generate one declaration; returns the qualified name when output was
    /// written, `None` for nested declarations, which are embedded in their
    /// parent's output instead.
    fn process<R, S>(&self, decl: DeclId, renderer: &R, sink: &S) -> Result<Option<String>>
    where
        R: SourceRenderer,
        S: SourceSink,
    {
        if self.model.kind_of(decl) != DeclKind::Interface {
            return Err(Error::NotAnInterface {
                decl: self.model.source_path(decl),
            });
        }

        let markers = MarkerResolver::new(self.model, self.options.builder_override);
        let task = ClassGenerationTask::new(self.model, &self.options, &markers);
        let mut descriptor = task.generate(decl)?;

        if self.model.enclosing_of(decl).is_some() {
            return Ok(None);
        }

        if let Some(tool) = &self.options.generated_by {
            descriptor.annotations.push(AnnotationSpec::generated(tool));
        }

        let qualified_name = descriptor.qualified_name.qualified();
        let source = renderer.render(&descriptor);
        sink.write(&qualified_name, &source)
            .map_err(|err| Error::Render {
                qualified_name: qualified_name.clone(),
                source: err,
            })?;
        Ok(Some(qualified_name))
    }
}
