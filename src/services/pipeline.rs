use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;

use serde::Serialize;
use tracing::debug;

use crate::error::GenError;
use crate::model::config::GeneratorConfig;
use crate::model::record::Dataset;
use crate::parsers::annotations;
use crate::parsers::emoji_test::TestDataParser;
use crate::services::diagnostics::Diagnostic;
use crate::services::emit;
use crate::services::reconcile::{self, ReconcileStats};

const FULLY_QUALIFIED: &str = "fully-qualified";

#[derive(Debug, Serialize)]
pub struct GenerationReport {
    pub locale: String,
    pub categories: usize,
    pub parsed: usize,
    pub minimally_qualified: usize,
    pub unicode_version: String,
    pub emitted: usize,
    pub stats: ReconcileStats,
    pub diagnostics: Vec<Diagnostic>,
    pub artifacts: Vec<PathBuf>,
    pub digest: String,
}

/// Builds and writes the dataset for `cfg.locale`.
///
/// Annotations are loaded first so a structural error aborts before any
/// output exists; the test data is then streamed to completion before the
/// reconciler sees the whole record set.
pub fn run(cfg: &GeneratorConfig) -> Result<GenerationReport, GenError> {
    let annotations = annotations::load_locale(cfg)?;
    debug!(count = annotations.len(), "annotations ready");

    let path = cfg.test_data_path();
    let file = File::open(&path).map_err(|e| GenError::io(&path, e))?;

    let mut parser = TestDataParser::new(BufReader::new(file), &path, cfg);
    let records = parser.by_ref().collect::<Result<Vec<_>, _>>()?;
    let (categories, mut diagnostics) = parser.finish();
    let parsed = records.len();
    let minimally_qualified = records
        .iter()
        .filter(|r| r.qualification != FULLY_QUALIFIED)
        .count();
    let unicode_version = records
        .iter()
        .map(|r| r.version.as_str())
        .max_by_key(|v| version_key(v))
        .unwrap_or_default()
        .to_string();
    debug!(parsed, categories = categories.len(), "test data parsed");

    let reconciled = reconcile::reconcile(records, &annotations, cfg);
    diagnostics.extend(reconciled.diagnostics);

    for d in &diagnostics {
        d.emit();
    }

    let dataset = Dataset {
        categories,
        emoji: reconciled.entries,
    };

    let artifacts = emit::render(&dataset, &cfg.locale)?;
    let written = emit::write(cfg, &artifacts)?;

    Ok(GenerationReport {
        locale: cfg.locale.clone(),
        categories: dataset.categories.len(),
        parsed,
        minimally_qualified,
        unicode_version,
        emitted: dataset.emoji.len(),
        stats: reconciled.stats,
        diagnostics,
        artifacts: written,
        digest: artifacts.digest,
    })
}

/// `"12.1"` -> `[12, 1]`, so versions order numerically.
fn version_key(version: &str) -> Vec<u32> {
    version.split('.').map(|part| part.parse().unwrap_or(0)).collect()
}
