use std::sync::LazyLock;

use regex::Regex;

static WITH_MODIFIER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z]+): ([a-z -]+)").expect("modifier pattern"));

static WITH_SKIN_TONE_AND_MODIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([a-z]+): ([a-z -]+), ([a-z ]+)")
        .expect("skin tone pattern")
});

/// Applies the first substitution whose key occurs in `phrase`, once.
pub fn substitute_modifier(phrase: &str, substitutions: &[(String, String)]) -> String {
    substitutions
        .iter()
        .find(|(from, _)| phrase.contains(from.as_str()))
        .map(|(from, to)| phrase.replacen(from.as_str(), to, 1))
        .unwrap_or_else(|| phrase.to_string())
}

/// Turns `"person: medium skin tone, bald"` into
/// `"person with no hair: medium skin tone"` and `"woman: red hair"` into
/// `"woman with red hair"`. Skin-tone-only names are left for deduplication.
pub fn rewrite_person_name(name: &str, substitutions: &[(String, String)]) -> String {
    if let Some(caps) = WITH_SKIN_TONE_AND_MODIFIER.captures(name) {
        return format!(
            "{} with {}: {}",
            &caps[1],
            substitute_modifier(&caps[3], substitutions),
            &caps[2]
        );
    }

    if let Some(caps) = WITH_MODIFIER.captures(name) {
        if !caps[2].contains("skin tone") {
            return format!(
                "{} with {}",
                &caps[1],
                substitute_modifier(&caps[2], substitutions)
            );
        }
    }

    name.to_string()
}
