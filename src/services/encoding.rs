use std::fs;
use std::path::Path;

use chardetng::EncodingDetector;
use encoding_rs::{Encoding, UTF_8};
use tracing::{debug, warn};

use crate::error::GenError;

const UTF8_BOM: &[u8] = &[0xEF, 0xBB, 0xBF];

/// Reads a whole document and decodes it to UTF-8 text.
pub fn read_text(path: &Path) -> Result<String, GenError> {
    let bytes = fs::read(path).map_err(|e| GenError::io(path, e))?;
    let (text, encoding, had_errors) = decode(&bytes);

    if had_errors {
        warn!(
            path = %path.display(),
            encoding = encoding.name(),
            "input contained undecodable bytes"
        );
    } else {
        debug!(path = %path.display(), encoding = encoding.name(), "decoded input");
    }

    Ok(text)
}

pub fn decode(bytes: &[u8]) -> (String, &'static Encoding, bool) {
    // BOM UTF-8 (EF BB BF)
    if let Some(rest) = bytes.strip_prefix(UTF8_BOM) {
        let (text, had_errors) = UTF_8.decode_without_bom_handling(rest);
        return (text.into_owned(), UTF_8, had_errors);
    }

    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    let encoding = detector.guess(None, true);

    let (text, _, had_errors) = encoding.decode(bytes);
    (text.into_owned(), encoding, had_errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_utf8_bom() {
        let mut bytes = UTF8_BOM.to_vec();
        bytes.extend_from_slice("<ldml/>".as_bytes());

        let (text, encoding, had_errors) = decode(&bytes);
        assert_eq!(text, "<ldml/>");
        assert_eq!(encoding, UTF_8);
        assert!(!had_errors);
    }

    #[test]
    fn plain_utf8_passes_through() {
        let source = "<annotation cp=\"😀\">face | grin</annotation>";
        let (text, encoding, _) = decode(source.as_bytes());
        assert_eq!(text, source);
        assert_eq!(encoding, UTF_8);
    }

    #[test]
    fn legacy_single_byte_input_is_decoded() {
        // "café" in windows-1252
        let (text, encoding, _) = decode(&[0x63, 0x61, 0x66, 0xE9]);
        assert_ne!(encoding, UTF_8);
        assert!(text.starts_with("caf"));
    }
}
