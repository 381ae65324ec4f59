use std::collections::HashMap;

/// CLDR metadata for one character sequence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationEntry {
    pub tts: Option<String>,
    pub keywords: Option<String>,
}

/// Keyed by the literal character sequence (the `cp` attribute).
pub type AnnotationMap = HashMap<String, AnnotationEntry>;
