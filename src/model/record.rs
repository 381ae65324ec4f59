use serde::Serialize;

use super::sequence::CodepointSequence;

/// One qualifying data line of the test data. Build-time only.
#[derive(Debug, Clone, PartialEq)]
pub struct RawRecord {
    pub sequence: CodepointSequence,
    pub qualification: String,
    pub emoji: String,
    pub category: usize,
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct Variation {
    pub emoji: String,
    pub name: String,
}

/// A pickable emoji as persisted in the artifact.
#[derive(Debug, Serialize, Clone, PartialEq, Eq)]
pub struct EmojiEntry {
    pub emoji: String,

    pub category: usize,

    pub name: String,

    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub variations: Vec<Variation>,

    pub keywords: String,
}

#[derive(Debug, Serialize, Clone, Default, PartialEq, Eq)]
pub struct Dataset {
    pub categories: Vec<String>,
    pub emoji: Vec<EmojiEntry>,
}
