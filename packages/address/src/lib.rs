#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! US address detection, normalization, and suggestion matching.
//!
//! Three independent stages, all pure and synchronous:
//!
//! 1. [`scanner`] — locates address candidates inside arbitrary page text
//!    and reports their byte offsets.
//! 2. [`normalize`] — reshapes one raw candidate into the canonical
//!    `"<street>, <city>, <STATE> <ZIP>"` form, or returns it cleaned but
//!    otherwise untouched when the split is ambiguous.
//! 3. [`suggest`] — picks the autocomplete row on a partner site that
//!    refers to a given canonical address.
//!
//! [`detect`] chains the first two stages for the common "find and
//! canonicalize every address on a page" case.

pub mod normalize;
pub mod scanner;
pub mod suggest;

pub use address_bridge_address_models::{AddressMatch, StateCode, SuggestionCandidate};

/// An address candidate paired with its canonical form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedAddress<'t> {
    /// Where the candidate was found.
    pub location: AddressMatch<'t>,
    /// Output of [`normalize::normalize`] for the candidate.
    pub canonical: String,
    /// Whether normalization restructured the candidate.
    pub structured: bool,
}

/// Scans `text` and normalizes every address candidate found.
#[must_use]
pub fn detect(text: &str) -> Vec<DetectedAddress<'_>> {
    scanner::scan(text)
        .map(|location| {
            let shape = normalize::normalize_shape(location.raw_text);
            DetectedAddress {
                location,
                structured: shape.is_structured(),
                canonical: shape.into_string(),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_and_canonicalizes_each_address() {
        let text = "Open houses: 500 Main St Austin tx 78701 and \
                    710 Kahlden Ct, Houston, TX 77079.";
        let found = detect(text);
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].canonical, "500 Main St, Austin, TX 78701");
        assert!(found[0].structured);
        assert_eq!(found[1].canonical, "710 Kahlden Ct, Houston, TX 77079");
        assert_eq!(found[1].location.raw_text, "710 Kahlden Ct, Houston, TX 77079");
    }

    #[test]
    fn detect_on_empty_text_is_empty() {
        assert!(detect("").is_empty());
    }
}
