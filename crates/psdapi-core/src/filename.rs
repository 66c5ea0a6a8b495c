//! PSD number extraction from mapping-sheet filenames.
//!
//! Filenames look like
//! `LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv`: a fixed prefix,
//! the PSD number, and an upload timestamp. Anything after the timestamp
//! digits (usually an extension) is ignored.

use std::sync::LazyLock;

use psdapi_model::PsdNumber;
use regex::Regex;

use crate::error::FilenameError;

/// Human-readable form of the accepted filename pattern.
pub const EXPECTED_PATTERN: &str = "LegalEntityMapping_SFDC-PSD-{number}_{timestamp}";

/// Anchored at the start only; group 1 is the PSD number.
static FILENAME_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^LegalEntityMapping_(SFDC-PSD-\d+)_\d+").unwrap());

/// Extract the PSD number from `filename`.
///
/// Returns the captured `SFDC-PSD-<digits>` text exactly as it appears.
///
/// # Examples
///
/// ```
/// use psdapi_core::parse_psd;
///
/// let psd = parse_psd("LegalEntityMapping_SFDC-PSD-076858_1767096012389.csv").unwrap();
/// assert_eq!(psd.as_str(), "SFDC-PSD-076858");
///
/// assert!(parse_psd("bad_name.csv").is_err());
/// ```
pub fn parse_psd(filename: &str) -> Result<PsdNumber, FilenameError> {
    FILENAME_RE
        .captures(filename)
        .and_then(|caps| caps.get(1))
        .map(|m| PsdNumber::new(m.as_str()))
        .ok_or_else(|| FilenameError::PatternMismatch {
            filename: filename.to_owned(),
        })
}
