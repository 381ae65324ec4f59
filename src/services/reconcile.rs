use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::model::annotation::AnnotationMap;
use crate::model::config::GeneratorConfig;
use crate::model::record::{EmojiEntry, RawRecord, Variation};
use crate::model::sequence::CodepointSequence;
use crate::services::diagnostics::Diagnostic;

const FAMILY_PREFIX: &str = "family";
const COOKIE_MARKER: &str = "cookie:";
const DIAGNOSED_LOCALE: &str = "en";

/// Records removed or regrouped by each pass.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
pub struct ReconcileStats {
    pub selector_duplicates: usize,
    pub blacklisted: usize,
    pub folded_variants: usize,
    pub grouped_variations: usize,
}

#[derive(Debug)]
pub struct Reconciled {
    pub entries: Vec<EmojiEntry>,
    pub stats: ReconcileStats,
    pub diagnostics: Vec<Diagnostic>,
}

/// Records live in an arena and are addressed by index, so removal never
/// confuses two records that happen to have equal contents.
struct WorkingSet {
    records: Vec<RawRecord>,
    variations: Vec<Vec<Variation>>,
    live: Vec<usize>,
}

impl WorkingSet {
    fn new(records: Vec<RawRecord>) -> Self {
        let len = records.len();
        Self {
            records,
            variations: vec![Vec::new(); len],
            live: (0..len).collect(),
        }
    }

    fn remove(&mut self, doomed: &HashSet<usize>) -> usize {
        let before = self.live.len();
        self.live.retain(|id| !doomed.contains(id));
        before - self.live.len()
    }

    /// First live record per name.
    fn name_index(&self) -> HashMap<&str, usize> {
        let mut index = HashMap::new();
        for &id in &self.live {
            index.entry(self.records[id].name.as_str()).or_insert(id);
        }
        index
    }

    /// Plain-presentation siblings of emoji-presentation forms.
    fn collapse_selector_variants(&mut self) -> usize {
        let mut by_sequence: HashMap<&CodepointSequence, usize> = HashMap::new();
        for &id in &self.live {
            by_sequence.entry(&self.records[id].sequence).or_insert(id);
        }

        let doomed: HashSet<usize> = self
            .live
            .iter()
            .map(|&id| &self.records[id].sequence)
            .filter(|seq| seq.has_presentation_selector())
            .filter_map(|seq| by_sequence.get(&seq.without_first_selector()).copied())
            .collect();

        self.remove(&doomed)
    }

    fn remove_blacklisted(&mut self, cfg: &GeneratorConfig) -> usize {
        let doomed: HashSet<usize> = self
            .live
            .iter()
            .copied()
            .filter(|&id| cfg.is_blacklisted(&self.records[id].name))
            .collect();

        self.remove(&doomed)
    }

    /// `"thumbs up: dark skin tone"` goes when `"thumbs up"` exists.
    /// Cookie-style names are left for [`WorkingSet::group_cookie_variations`].
    fn fold_named_variants(&mut self) -> usize {
        let names = self.name_index();

        let doomed: HashSet<usize> = self
            .live
            .iter()
            .copied()
            .filter(|&id| {
                let name = &self.records[id].name;
                name.contains(':')
                    && !name.starts_with(FAMILY_PREFIX)
                    && !name.contains(COOKIE_MARKER)
                    && names.contains_key(base_name(name))
            })
            .collect();

        self.remove(&doomed)
    }

    fn group_cookie_variations(&mut self) -> usize {
        let mut moves: Vec<(usize, usize)> = Vec::new();
        {
            let names = self.name_index();
            for &id in &self.live {
                let name = &self.records[id].name;
                if !name.contains(COOKIE_MARKER) {
                    continue;
                }
                if let Some(&base) = names.get(base_name(name)) {
                    moves.push((id, base));
                }
            }
        }

        let mut doomed = HashSet::with_capacity(moves.len());
        for (id, base) in moves {
            let record = &self.records[id];
            self.variations[base].push(Variation {
                emoji: record.emoji.clone(),
                name: record.name.clone(),
            });
            doomed.insert(id);
        }

        self.remove(&doomed)
    }
}

fn base_name(name: &str) -> &str {
    name.split(':').next().unwrap_or(name)
}

/// `keywords` as shipped: optionally repeated once, see [`GeneratorConfig::duplicate_keywords`].
pub fn assemble_keywords(keywords: Option<&str>, duplicate: bool) -> String {
    match keywords {
        Some(k) if duplicate && !k.is_empty() => format!("{k},{k}"),
        Some(k) => k.to_string(),
        None => String::new(),
    }
}

/// Runs the deduplication passes over the full record set, then merges
/// CLDR names and keywords into the survivors.
pub fn reconcile(
    records: Vec<RawRecord>,
    annotations: &AnnotationMap,
    cfg: &GeneratorConfig,
) -> Reconciled {
    let mut set = WorkingSet::new(records);

    let stats = ReconcileStats {
        selector_duplicates: set.collapse_selector_variants(),
        blacklisted: set.remove_blacklisted(cfg),
        folded_variants: set.fold_named_variants(),
        grouped_variations: set.group_cookie_variations(),
    };

    let mut diagnostics = Vec::new();
    let mut entries = Vec::with_capacity(set.live.len());

    for &id in &set.live {
        let record = &set.records[id];
        let base = record.sequence.without_selectors();

        let mut name = record.name.clone();
        let mut keywords = String::new();

        match annotations.get(&base.to_emoji()) {
            None => {
                let diagnostic = Diagnostic::missing_annotation(&record.name, &base.to_string());
                diagnostics.push(diagnostic);
            }
            Some(annotation) => {
                let tts = annotation.tts.as_deref().filter(|t| !t.is_empty());

                if cfg.locale == DIAGNOSED_LOCALE {
                    if let Some(tts) = tts.filter(|t| *t != record.name) {
                        diagnostics.push(Diagnostic::name_mismatch(&record.name, tts));
                    }
                }

                if let Some(tts) = tts {
                    name = tts.to_string();
                }
                keywords =
                    assemble_keywords(annotation.keywords.as_deref(), cfg.duplicate_keywords);
            }
        }

        entries.push(EmojiEntry {
            emoji: record.emoji.clone(),
            category: record.category,
            name,
            variations: set.variations[id].clone(),
            keywords,
        });
    }

    Reconciled {
        entries,
        stats,
        diagnostics,
    }
}
