//! Engine configuration.

/// Knobs for one generation run.
#[derive(Debug, Clone)]
pub struct GenerationOptions {
    /// Suffix token stripped from (or appended to) top-level default names.
    pub name_suffix: String,
    /// Tie-break rule when transitively attached markers disagree on the
    /// builder flag.
    pub builder_override: OverridePolicy,
    /// When set, top-level output carries a `Generated` annotation naming
    /// this tool.
    pub generated_by: Option<String>,
}

impl Default for GenerationOptions {
    fn default() -> Self {
        Self {
            name_suffix: "POJO".to_string(),
            builder_override: OverridePolicy::default(),
            generated_by: None,
        }
    }
}

/// Which explicit builder override wins when several are found in the
/// transitive annotation closure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OverridePolicy {
    FirstWins,
    #[default]
    LastWins,
}
