//! Filesystem output and the one-call generation entry point.

use std::fs;
use std::path::{Path, PathBuf};

use eyre::{Result, WrapErr};

use autopojo_engine::{BatchReport, GenerationOptions, Orchestrator, SourceSink};
use autopojo_model::{ClassRef, DeclId, DeclarationModel};

use crate::renderer::JavaRenderer;

/// Writes each generated type to `<root>/<package dirs>/<SimpleName>.java`.
pub struct FsSink {
    root: PathBuf,
}

impl FsSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl SourceSink for FsSink {
    fn write(&self, qualified_name: &str, source: &str) -> std::io::Result<()> {
        let class = ClassRef::best_guess(qualified_name);
        let mut path = self.root.clone();
        for segment in class.package().split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        fs::create_dir_all(&path)?;
        path.push(format!("{}.java", class.simple_name()));
        fs::write(path, source)
    }
}

/// Generate Java sources for the given declarations under `out_dir`.
///
/// The report carries per-declaration diagnostics; callers decide whether a
/// failed batch is fatal.
pub fn generate_into<M: DeclarationModel + ?Sized>(
    model: &M,
    declarations: &[DeclId],
    options: GenerationOptions,
    out_dir: &Path,
) -> Result<BatchReport> {
    fs::create_dir_all(out_dir)
        .wrap_err_with(|| format!("failed to create output directory {}", out_dir.display()))?;
    let sink = FsSink::new(out_dir);
    Ok(Orchestrator::new(model, options).run(declarations, &JavaRenderer, &sink))
}
