//! Configuration and constants for trace normalization.

use super::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Current canonical-trace document schema version
pub const SCHEMA_VERSION: &str = "1.0.0";

// Defaults applied to raw steps and frames that omit a field
pub const DEFAULT_LINE: u32 = 1;
pub const MODULE_FUNC_NAME: &str = "<module>";
pub const DEFAULT_FRAME_FUNC_NAME: &str = "function";

/// Number of source characters kept as a callable's body digest
pub const FUNCTION_DIGEST_CHARS: usize = 50;

// Field names under which a wrapped trace may carry its step array
pub const TRACE_FIELD_NAMES: &[&str] = &["trace", "steps", "execution_trace"];

/// Knobs for a normalization pass
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct NormalizerConfig {
    /// Maximum number of raw steps accepted
    ///
    /// Unlimited unless set. Tracers cap their own output and append a
    /// final exception step when the cap is hit, so any default here
    /// would reject exactly those traces.
    #[serde(default)]
    pub max_steps: Option<usize>,
}

/// Load a normalizer config from a TOML file
///
/// # Errors
/// * `ConfigError::IoError` - If file cannot be read
/// * `ConfigError::ParseFailed` - If TOML is invalid
/// * `ConfigError::Invalid` - If `max_steps` is zero
///
/// # Example
/// ```ignore
/// let config = load_config("stepper.toml")?;
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<NormalizerConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: NormalizerConfig = toml::from_str(&contents)?;

    if config.max_steps == Some(0) {
        return Err(ConfigError::Invalid("max_steps must be greater than 0".to_string()));
    }

    Ok(config)
}
