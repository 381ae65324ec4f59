use std::fmt;

use crate::error::GenError;

/// VARIATION SELECTOR-16, requests emoji presentation.
pub const PRESENTATION_SELECTOR: char = '\u{FE0F}';

/// Code point sequence as written in the test data: space separated hex.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CodepointSequence(Vec<char>);

impl CodepointSequence {
    pub fn parse(text: &str) -> Result<Self, GenError> {
        let chars = text
            .split_whitespace()
            .map(|token| {
                u32::from_str_radix(token, 16)
                    .ok()
                    .and_then(char::from_u32)
                    .ok_or_else(|| GenError::InvalidCodepoint {
                        token: token.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self(chars))
    }

    /// The literal character string, i.e. the emoji itself.
    pub fn to_emoji(&self) -> String {
        self.0.iter().collect()
    }

    pub fn has_presentation_selector(&self) -> bool {
        self.0.contains(&PRESENTATION_SELECTOR)
    }

    /// Drops the first presentation selector only.
    pub fn without_first_selector(&self) -> Self {
        let mut chars = self.0.clone();
        if let Some(pos) = chars.iter().position(|&c| c == PRESENTATION_SELECTOR) {
            chars.remove(pos);
        }
        Self(chars)
    }

    /// Drops every presentation selector; this is the annotation lookup form.
    pub fn without_selectors(&self) -> Self {
        Self(
            self.0
                .iter()
                .copied()
                .filter(|&c| c != PRESENTATION_SELECTOR)
                .collect(),
        )
    }
}

impl fmt::Display for CodepointSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:04X}", *c as u32)?;
        }
        Ok(())
    }
}
