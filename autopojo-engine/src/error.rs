//! Error taxonomy, diagnostics, and the batch report.
//!
//! Errors inside one generation subtree abort only that subtree; the
//! orchestrator turns each into a [`Diagnostic`] attached to the offending
//! declaration and keeps going. The batch as a whole fails if any
//! diagnostic carries error severity.

use serde::Serialize;
use thiserror::Error;

use autopojo_model::DeclKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A generation target, or one of its lexical ancestors, has no marker
    /// anywhere in its transitive annotation closure.
    #[error("missing marker annotation on {decl}")]
    MissingMarker { decl: String },

    /// More than one marker-bearing supertype: a generated class can extend
    /// at most one other generated class.
    #[error("more than one marker-bearing supertype on {decl}")]
    AmbiguousSuperclass { decl: String },

    /// An enclosed declaration the generator has no mapping for.
    #[error("unsupported {kind} member: {decl}")]
    UnsupportedMember { kind: DeclKind, decl: String },

    /// A marked declaration that is not an interface.
    #[error("not an interface: {decl}")]
    NotAnInterface { decl: String },

    /// The sink failed to write rendered output.
    #[error("failed to write {qualified_name}")]
    Render {
        qualified_name: String,
        #[source]
        source: std::io::Error,
    },
}

/// Severity of a reported diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
}

impl Severity {
    pub fn is_error(self) -> bool {
        matches!(self, Severity::Error)
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning"),
        }
    }
}

/// A message attached to one declaration.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Dotted source path of the declaration the message is about.
    pub declaration: String,
    pub message: String,
}

impl Diagnostic {
    pub fn error(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            declaration: declaration.into(),
            message: message.into(),
        }
    }

    pub fn warning(declaration: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            declaration: declaration.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} (at {})", self.severity, self.message, self.declaration)
    }
}

/// Outcome of one batch run.
#[derive(Debug, Default, Serialize)]
pub struct BatchReport {
    /// Qualified names of top-level types written, in input order.
    pub written: Vec<String>,
    pub diagnostics: Vec<Diagnostic>,
}

impl BatchReport {
    /// The batch succeeds only when no error diagnostic was emitted, even
    /// if other declarations were written.
    pub fn is_success(&self) -> bool {
        !self.diagnostics.iter().any(|d| d.severity.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.severity.is_error())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_fails_on_any_error_diagnostic() {
        let mut report = BatchReport::default();
        assert!(report.is_success());

        report.written.push("gs.example.Food".to_string());
        report
            .diagnostics
            .push(Diagnostic::warning("gs.example.Odd", "suspicious"));
        assert!(report.is_success());

        report
            .diagnostics
            .push(Diagnostic::error("gs.example.Bad", "missing marker"));
        assert!(!report.is_success());
        assert_eq!(report.errors().count(), 1);
    }

    #[test]
    fn diagnostic_display_names_the_declaration() {
        let diag = Diagnostic::error("gs.example.Bad", "not an interface");
        assert_eq!(
            diag.to_string(),
            "error: not an interface (at gs.example.Bad)"
        );
    }
}
