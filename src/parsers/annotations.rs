use std::path::Path;

use roxmltree::{Document, ParsingOptions};
use tracing::debug;

use crate::error::GenError;
use crate::model::annotation::AnnotationMap;
use crate::model::config::GeneratorConfig;
use crate::services::encoding;

/// Loads the base and derived documents of a locale into one mapping.
pub fn load_locale(cfg: &GeneratorConfig) -> Result<AnnotationMap, GenError> {
    let mut annotations = AnnotationMap::new();

    for path in cfg.annotation_paths() {
        let xml = encoding::read_text(&path)?;
        let count = parse_into(&mut annotations, &xml, &path)?;
        debug!(path = %path.display(), count, "loaded annotations");
    }

    Ok(annotations)
}

/// Merges one `<ldml><annotations>` document into `annotations`.
/// Fields set by this document overwrite earlier values; others are kept.
/// Returns the number of annotation elements read.
pub fn parse_into(
    annotations: &mut AnnotationMap,
    xml: &str,
    path: &Path,
) -> Result<usize, GenError> {
    // CLDR files carry a DOCTYPE pointing at ldml.dtd
    let options = ParsingOptions {
        allow_dtd: true,
        ..ParsingOptions::default()
    };

    let doc = Document::parse_with_options(xml, options).map_err(|source| GenError::Xml {
        path: path.to_path_buf(),
        source,
    })?;

    let root = doc.root_element();
    let list = root
        .has_tag_name("ldml")
        .then(|| root.children().find(|n| n.has_tag_name("annotations")))
        .flatten()
        .ok_or_else(|| GenError::MissingAnnotations {
            path: path.to_path_buf(),
        })?;

    let mut count = 0usize;

    for node in list.children().filter(|n| n.has_tag_name("annotation")) {
        let Some(cp) = node.attribute("cp") else {
            continue;
        };
        let text = node.text().unwrap_or("");

        let entry = annotations.entry(cp.to_string()).or_default();
        if node.attribute("type") == Some("tts") {
            entry.tts = Some(text.to_string());
        } else {
            entry.keywords = Some(join_keywords(text));
        }

        count += 1;
    }

    Ok(count)
}

/// `"face | grin"` -> `"face,grin"`
fn join_keywords(text: &str) -> String {
    text.split('|').map(str::trim).collect::<Vec<_>>().join(",")
}
