use serde::Serialize;
use tracing::warn;

/// A non-fatal finding. Reported, never blocks the run.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub code: String,
    pub message: String,
}

pub const MISSING_ANNOTATION: &str = "MISSING_ANNOTATION";
pub const NAME_MISMATCH: &str = "NAME_MISMATCH";
pub const UNKNOWN_GROUP: &str = "UNKNOWN_GROUP";

impl Diagnostic {
    pub fn missing_annotation(name: &str, base_sequence: &str) -> Self {
        Self {
            code: MISSING_ANNOTATION.to_string(),
            message: format!("No annotation: {name} ({base_sequence})"),
        }
    }

    pub fn name_mismatch(parsed: &str, annotated: &str) -> Self {
        Self {
            code: NAME_MISMATCH.to_string(),
            message: format!("Annotation has different name: {parsed} vs. {annotated}"),
        }
    }

    pub fn unknown_group(group: &str, key: &str) -> Self {
        Self {
            code: UNKNOWN_GROUP.to_string(),
            message: format!("No category key for group '{group}', using '{key}'"),
        }
    }

    pub fn emit(&self) {
        warn!(code = %self.code, "{}", self.message);
    }
}
