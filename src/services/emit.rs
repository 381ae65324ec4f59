use std::fs;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::error::GenError;
use crate::model::config::GeneratorConfig;
use crate::model::record::Dataset;
use crate::services::digest;

/// Both encodings of one dataset, rendered before anything touches disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifacts {
    pub module: String,
    pub plain: String,
    pub digest: String,
}

pub fn render(dataset: &Dataset, locale: &str) -> Result<Artifacts, GenError> {
    let payload = serde_json::to_string(dataset)?;

    Ok(Artifacts {
        module: format!("export default {payload}"),
        plain: format!("var emojiData_{locale}={payload};"),
        digest: digest::payload_digest(&payload),
    })
}

/// Writes the module and plain artifacts; returns their paths in that order.
///
/// Both files are staged next to their destinations and only renamed into
/// place once every staged write succeeded. If staging fails, the staged
/// files are removed and existing artifacts stay as they were.
pub fn write(cfg: &GeneratorConfig, artifacts: &Artifacts) -> Result<Vec<PathBuf>, GenError> {
    let targets = [
        (cfg.module_artifact_path(), artifacts.module.as_str()),
        (cfg.plain_artifact_path(), artifacts.plain.as_str()),
    ];

    fs::create_dir_all(&cfg.output_dir).map_err(|e| GenError::io(&cfg.output_dir, e))?;

    let mut staged = Vec::with_capacity(targets.len());
    if let Err(e) = stage(&targets, &mut staged) {
        discard(&staged);
        return Err(e);
    }

    let mut written = Vec::with_capacity(staged.len());
    for (staging, (path, contents)) in staged.iter().zip(&targets) {
        // fs::rename replaces an existing destination in one step
        if let Err(e) = fs::rename(staging, path) {
            discard(&staged);
            return Err(GenError::io(path, e));
        }
        info!(path = %path.display(), bytes = contents.len(), "wrote artifact");
        written.push(path.clone());
    }

    Ok(written)
}

fn stage(targets: &[(PathBuf, &str)], staged: &mut Vec<PathBuf>) -> Result<(), GenError> {
    for (path, contents) in targets {
        let staging = staging_path(path);
        staged.push(staging.clone());
        fs::write(&staging, contents.as_bytes()).map_err(|e| GenError::io(&staging, e))?;
    }
    Ok(())
}

/// Best effort; a staging path that is not a plain file is left alone.
fn discard(staged: &[PathBuf]) {
    for staging in staged {
        if staging.is_file() {
            if let Err(e) = fs::remove_file(staging) {
                warn!(path = %staging.display(), "failed to remove staged artifact: {e}");
            }
        }
    }
}

/// `emoji-node-en.js` -> `emoji-node-en.js.tmp`
fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::record::EmojiEntry;

    fn dataset() -> Dataset {
        Dataset {
            categories: vec!["smileys".into()],
            emoji: vec![EmojiEntry {
                emoji: "😀".into(),
                category: 0,
                name: "grinning face".into(),
                variations: Vec::new(),
                keywords: "face".into(),
            }],
        }
    }

    #[test]
    fn both_encodings_share_the_payload() {
        let artifacts = render(&dataset(), "en").unwrap();
        let payload = r#"{"categories":["smileys"],"emoji":[{"emoji":"😀","category":0,"name":"grinning face","keywords":"face"}]}"#;

        assert_eq!(artifacts.module, format!("export default {payload}"));
        assert_eq!(artifacts.plain, format!("var emojiData_en={payload};"));
        assert_eq!(artifacts.digest, digest::payload_digest(payload));
    }

    #[test]
    fn writes_locale_named_files() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GeneratorConfig {
            output_dir: dir.path().join("data"),
            ..GeneratorConfig::for_locale("de")
        };

        let artifacts = render(&dataset(), "de").unwrap();
        let written = write(&cfg, &artifacts).unwrap();

        assert_eq!(written[0], dir.path().join("data").join("emoji-node-de.js"));
        assert_eq!(written[1], dir.path().join("data").join("emoji-plain-de.js"));
        assert_eq!(fs::read_to_string(&written[1]).unwrap(), artifacts.plain);
        assert!(!staging_path(&written[0]).exists());
    }

    #[test]
    fn failed_staging_leaves_no_artifact_behind() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };
        // a directory where the plain artifact would be staged
        fs::create_dir_all(staging_path(&cfg.plain_artifact_path())).unwrap();

        let artifacts = render(&dataset(), "en").unwrap();
        let err = write(&cfg, &artifacts).unwrap_err();

        assert!(matches!(err, GenError::Io { .. }));
        assert!(!cfg.module_artifact_path().exists());
        assert!(!cfg.plain_artifact_path().exists());
        assert!(!staging_path(&cfg.module_artifact_path()).exists());
    }

    #[test]
    fn failed_staging_keeps_previous_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };
        fs::write(cfg.module_artifact_path(), "old module").unwrap();
        fs::write(cfg.plain_artifact_path(), "old plain").unwrap();
        fs::create_dir_all(staging_path(&cfg.plain_artifact_path())).unwrap();

        let artifacts = render(&dataset(), "en").unwrap();
        assert!(write(&cfg, &artifacts).is_err());

        assert_eq!(fs::read_to_string(cfg.module_artifact_path()).unwrap(), "old module");
        assert_eq!(fs::read_to_string(cfg.plain_artifact_path()).unwrap(), "old plain");
    }

    #[test]
    fn rewrites_replace_existing_artifacts() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = GeneratorConfig {
            output_dir: dir.path().to_path_buf(),
            ..GeneratorConfig::default()
        };
        fs::write(cfg.module_artifact_path(), "old module").unwrap();

        let artifacts = render(&dataset(), "en").unwrap();
        write(&cfg, &artifacts).unwrap();

        assert_eq!(fs::read_to_string(cfg.module_artifact_path()).unwrap(), artifacts.module);
    }

    #[test]
    fn staging_path_appends_suffix() {
        assert_eq!(
            staging_path(Path::new("out/emoji-node-en.js")),
            PathBuf::from("out/emoji-node-en.js.tmp")
        );
    }
}
