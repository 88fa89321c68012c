//! Versioned document wrapping a normalized trace.

use crate::navigator::Session;
use crate::normalizer::CanonicalStep;
use crate::utils::config::SCHEMA_VERSION;
use chrono::Utc;
use serde::{Deserialize, Serialize};

/// Top-level canonical trace written to JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceDocument {
    /// Schema version for compatibility checking
    pub version: String,

    /// Timestamp when the document was generated
    pub generated_at: String,

    pub total_steps: usize,

    /// Traced program text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,

    pub steps: Vec<CanonicalStep>,
}

/// Snapshot a session into a document
pub fn to_document(session: &Session) -> TraceDocument {
    TraceDocument {
        version: SCHEMA_VERSION.to_string(),
        generated_at: Utc::now().to_rfc3339(),
        total_steps: session.total_steps(),
        source: session.source().map(str::to_string),
        steps: session.steps().to_vec(),
    }
}
