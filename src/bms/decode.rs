//! Decoding chart files of unknown encoding.
//!
//! Chart files in the wild are mostly Shift-JIS, sometimes UTF-8 and rarely EUC-JP. The encodings
//! are tried in the order UTF-8, Shift-JIS, EUC-JP, and the first one decoding without errors
//! wins. The Shift-JIS decoder of [`encoding_rs`] is the WHATWG one, which also covers CP932.
//!
//! If nothing decodes cleanly, the bytes are decoded as Shift-JIS with replacement characters.

use std::path::Path;

use encoding_rs::{EUC_JP, Encoding, SHIFT_JIS, UTF_8};
use tracing::{debug, warn};

use crate::bms::LoadError;

const UTF_8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// Text of a chart with the encoding it was decoded from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedSource {
    /// The decoded text.
    pub text: String,
    /// The encoding used.
    pub encoding: &'static Encoding,
    /// Whether some bytes were invalid and replaced.
    pub lossy: bool,
}

/// Decodes the bytes of a chart file.
#[must_use]
pub fn decode_bytes(bytes: &[u8]) -> DecodedSource {
    let without_bom = bytes.strip_prefix(UTF_8_BOM).unwrap_or(bytes);
    if let Ok(text) = std::str::from_utf8(without_bom) {
        return DecodedSource {
            text: text.to_owned(),
            encoding: UTF_8,
            lossy: false,
        };
    }
    for encoding in [SHIFT_JIS, EUC_JP] {
        if let Some(text) = encoding.decode_without_bom_handling_and_without_replacement(bytes) {
            debug!(encoding = encoding.name(), "decoded chart source");
            return DecodedSource {
                text: text.into_owned(),
                encoding,
                lossy: false,
            };
        }
    }
    let (text, had_errors) = SHIFT_JIS.decode_without_bom_handling(bytes);
    warn!(
        had_errors,
        len = bytes.len(),
        "no encoding decoded the chart cleanly, falling back to lossy Shift-JIS"
    );
    DecodedSource {
        text: text.into_owned(),
        encoding: SHIFT_JIS,
        lossy: true,
    }
}

/// Reads and decodes a chart file.
///
/// # Errors
///
/// Returns [`LoadError::Io`] if the file could not be read.
pub fn read_chart_source(path: &Path) -> Result<DecodedSource, LoadError> {
    let bytes = std::fs::read(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(decode_bytes(&bytes))
}
