use std::path::PathBuf;

/// Arguments for the inspect command
#[derive(Debug, Clone)]
pub struct InspectArgs {
    /// Raw trace JSON file
    pub trace: PathBuf,

    /// Output path for the canonical trace document
    pub output: PathBuf,

    /// Optional normalizer config (TOML)
    pub config: Option<PathBuf>,
}

impl Default for InspectArgs {
    fn default() -> Self {
        Self {
            trace: PathBuf::new(),
            output: PathBuf::from("trace.canonical.json"),
            config: None,
        }
    }
}

/// Arguments for the step command
#[derive(Debug, Clone, Default)]
pub struct StepArgs {
    /// Raw trace JSON file
    pub trace: PathBuf,

    /// Step to show (clamped into range)
    pub index: i64,

    /// Optional normalizer config (TOML)
    pub config: Option<PathBuf>,
}
