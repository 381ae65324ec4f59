use std::path::PathBuf;

use serde::{Deserialize, Serialize};

const DATA_DIR_ENV: &str = "EMOJI_DATA_DIR";
const OUTPUT_DIR_ENV: &str = "EMOJI_OUTPUT_DIR";
const CLDR_RELEASE_ENV: &str = "EMOJI_CLDR_RELEASE";

fn default_locale() -> String {
    "en".to_string()
}

fn default_data_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("src").join("data")
}

fn default_cldr_release() -> String {
    "r37".to_string()
}

fn default_test_data_file() -> String {
    "emoji-test.txt".to_string()
}

fn default_duplicate_keywords() -> bool {
    true
}

fn default_category_keys() -> Vec<(String, String)> {
    [
        ("Smileys & Emotion", "smileys"),
        ("People & Body", "people"),
        ("Animals & Nature", "animals"),
        ("Food & Drink", "food"),
        ("Travel & Places", "travel"),
        ("Activities", "activities"),
        ("Objects", "objects"),
        ("Symbols", "symbols"),
        ("Flags", "flags"),
    ]
    .into_iter()
    .map(|(group, key)| (group.to_string(), key.to_string()))
    .collect()
}

fn default_blacklist() -> Vec<String> {
    [
        "light skin tone",
        "medium-light skin tone",
        "medium skin tone",
        "medium-dark skin tone",
        "dark skin tone",
        "red hair",
        "white hair",
        "curly hair",
        "bald",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}

fn default_modifier_substitutions() -> Vec<(String, String)> {
    vec![("bald".to_string(), "no hair".to_string())]
}

/// Everything one generator run depends on. A run is parameterized by
/// locale; the remaining fields default to the stock Unicode/CLDR tables.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct GeneratorConfig {
    #[serde(default = "default_locale")]
    pub locale: String,

    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_cldr_release")]
    pub cldr_release: String,

    #[serde(default = "default_test_data_file")]
    pub test_data_file: String,

    /// Unicode group name -> category key, in declaration order.
    #[serde(default = "default_category_keys")]
    pub category_keys: Vec<(String, String)>,

    /// Names of modifier-definition records that are not pickable emoji.
    #[serde(default = "default_blacklist")]
    pub blacklist: Vec<String>,

    /// Checked in order; at most one applies per phrase.
    #[serde(default = "default_modifier_substitutions")]
    pub modifier_substitutions: Vec<(String, String)>,

    /// Keep the historical `keywords,keywords` output. Consumers search the
    /// list by substring so the repetition is harmless, and turning it off
    /// changes the published artifacts.
    #[serde(default = "default_duplicate_keywords")]
    pub duplicate_keywords: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            locale: default_locale(),
            data_dir: default_data_dir(),
            output_dir: default_output_dir(),
            cldr_release: default_cldr_release(),
            test_data_file: default_test_data_file(),
            category_keys: default_category_keys(),
            blacklist: default_blacklist(),
            modifier_substitutions: default_modifier_substitutions(),
            duplicate_keywords: default_duplicate_keywords(),
        }
    }
}

impl GeneratorConfig {
    pub fn for_locale(locale: &str) -> Self {
        let locale = locale.trim();
        Self {
            locale: if locale.is_empty() {
                default_locale()
            } else {
                locale.to_string()
            },
            ..Self::default()
        }
    }

    /// Applies directory overrides from the environment. Empty values are ignored.
    pub fn with_env_overrides(mut self) -> Self {
        if let Some(dir) = env_value(DATA_DIR_ENV) {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(dir) = env_value(OUTPUT_DIR_ENV) {
            self.output_dir = PathBuf::from(dir);
        }
        if let Some(release) = env_value(CLDR_RELEASE_ENV) {
            self.cldr_release = release;
        }
        self
    }

    pub fn test_data_path(&self) -> PathBuf {
        self.data_dir.join(&self.test_data_file)
    }

    /// Base document first, derived second: later documents augment earlier ones.
    pub fn annotation_paths(&self) -> [PathBuf; 2] {
        [
            self.data_dir
                .join(format!("{}-annotations.{}.xml", self.locale, self.cldr_release)),
            self.data_dir
                .join(format!("{}-derived.{}.xml", self.locale, self.cldr_release)),
        ]
    }

    pub fn module_artifact_path(&self) -> PathBuf {
        self.output_dir.join(format!("emoji-node-{}.js", self.locale))
    }

    pub fn plain_artifact_path(&self) -> PathBuf {
        self.output_dir.join(format!("emoji-plain-{}.js", self.locale))
    }

    pub fn category_key(&self, group: &str) -> Option<&str> {
        self.category_keys
            .iter()
            .find(|(name, _)| name == group)
            .map(|(_, key)| key.as_str())
    }

    pub fn is_blacklisted(&self, name: &str) -> bool {
        self.blacklist.iter().any(|term| term == name)
    }
}

fn env_value(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
