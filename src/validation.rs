//! Upload validation
//!
//! Collaborators the catalog consults before anything touches disk: a
//! content sniffer, a filename sanitizer, and the extension allow-list.

use crate::error::ValidationFailure;
use unicode_normalization::UnicodeNormalization;

/// Decides from the first bytes of an upload whether it is tabular text.
pub trait ContentValidator: Send + Sync {
    fn is_acceptable(&self, sample: &[u8]) -> bool;
}

/// Turns a client-supplied filename into a safe flat storage name.
pub trait FilenameSanitizer: Send + Sync {
    fn sanitize(&self, raw_name: &str) -> String;
}

/// Accepts UTF-8 text without NUL bytes.
///
/// A multi-byte character cut in half at the end of the sample is tolerated.
/// An empty sample is acceptable: a zero-byte file is a valid empty table.
#[derive(Debug, Default, Clone, Copy)]
pub struct CsvContentSniffer;

impl ContentValidator for CsvContentSniffer {
    fn is_acceptable(&self, sample: &[u8]) -> bool {
        if sample.contains(&0) {
            return false;
        }
        match std::str::from_utf8(sample) {
            Ok(_) => true,
            // error_len() is None only for an incomplete trailing sequence
            Err(e) => e.error_len().is_none(),
        }
    }
}

/// Werkzeug-style secure filename.
///
/// Keeps the last path component, folds to ASCII through NFKD, maps
/// whitespace to `_`, and drops everything outside `[A-Za-z0-9._-]`.
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureFilename;

impl FilenameSanitizer for SecureFilename {
    fn sanitize(&self, raw_name: &str) -> String {
        let base = raw_name
            .rsplit(|c| c == '/' || c == '\\')
            .next()
            .unwrap_or("");

        let mut out = String::with_capacity(base.len());
        for c in base.nfkd() {
            if c.is_whitespace() {
                out.push('_');
            } else if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
                out.push(c);
            }
        }
        out.trim_start_matches(|c| c == '.' || c == '_').to_string()
    }
}

/// Check `filename` against the allow-list, ignoring case.
pub fn check_extension(filename: &str, allowed: &[String]) -> Result<(), ValidationFailure> {
    let extension = match filename.rsplit_once('.') {
        Some((stem, ext)) if !stem.is_empty() => ext.to_ascii_lowercase(),
        _ => String::new(),
    };
    if allowed.iter().any(|a| a.eq_ignore_ascii_case(&extension)) {
        return Ok(());
    }
    Err(ValidationFailure::UnsupportedExtension {
        extension,
        allowed: allowed.join(", "),
    })
}
