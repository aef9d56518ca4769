//! Address detection in free-form text.
//!
//! Finds candidate US street addresses such as `"500 Main St Austin TX 78701"`
//! embedded in arbitrary prose. A candidate is a 1-6 digit house number,
//! then the shortest run of letters, digits, whitespace and commas that
//! reaches a two-letter state code, then a 5-digit ZIP.

use std::sync::LazyLock;

use address_bridge_address_models::{AddressMatch, StateCode};
use regex::Regex;

/// Detection pattern, assembled from [`StateCode::ALL`].
///
/// The middle segment is lazy so a match ends at the first state + ZIP
/// pair instead of running on into unrelated trailing text.
static ADDRESS_RE: LazyLock<Regex> = LazyLock::new(|| {
    let states = StateCode::ALL
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(
        r"(?i)\b[0-9]{{1,6}}[a-z0-9\s,]*?\b(?:{states})[\s,]*[0-9]{{5}}\b"
    ))
    .expect("valid regex")
});

/// Lazy iterator over the address candidates in a text blob.
///
/// Matches are yielded left to right and never overlap; scanning resumes
/// after the end of the previous match.
pub struct AddressMatches<'t> {
    inner: regex::Matches<'static, 't>,
}

impl<'t> Iterator for AddressMatches<'t> {
    type Item = AddressMatch<'t>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|m| AddressMatch {
            raw_text: m.as_str(),
            start: m.start(),
            end: m.end(),
        })
    }
}

/// Scans `text` for address candidates.
///
/// The returned iterator borrows `text`; call `scan` again to restart.
#[must_use]
pub fn scan(text: &str) -> AddressMatches<'_> {
    AddressMatches {
        inner: ADDRESS_RE.find_iter(text),
    }
}

/// Collects every address candidate in `text`.
#[must_use]
pub fn find_all(text: &str) -> Vec<AddressMatch<'_>> {
    scan(text).collect()
}

/// Returns `true` if `text` contains at least one address candidate.
#[must_use]
pub fn contains_address(text: &str) -> bool {
    ADDRESS_RE.is_match(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_single_address_in_prose() {
        let text = "Call about 500 Main St Austin TX 78701 today";
        let matches = find_all(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_text, "500 Main St Austin TX 78701");
        assert_eq!(&text[matches[0].range()], matches[0].raw_text);
    }

    #[test]
    fn empty_text_yields_nothing() {
        assert!(find_all("").is_empty());
        assert!(!contains_address(""));
    }

    #[test]
    fn plain_prose_yields_nothing() {
        assert!(find_all("No addresses here, just 42 words about Texas.").is_empty());
    }

    #[test]
    fn finds_address_with_commas() {
        let matches = find_all("Open house: 123 Main St, Springfield, IL 62704!");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_text, "123 Main St, Springfield, IL 62704");
    }

    #[test]
    fn is_case_insensitive() {
        let matches = find_all("at 9 elm st houston tx 77002.");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_text, "9 elm st houston tx 77002");
    }

    #[test]
    fn stops_at_first_state_and_zip() {
        let text = "1 A St Dallas TX 75201 and 2 B St Waco TX 76701";
        let matches = find_all(text);
        assert_eq!(matches.len(), 2);
        assert_eq!(matches[0].raw_text, "1 A St Dallas TX 75201");
        assert_eq!(matches[1].raw_text, "2 B St Waco TX 76701");
    }

    #[test]
    fn matches_are_ordered_and_disjoint() {
        let text = "10 Oak Ln Reno NV 89501; 20 Pine Rd Boise ID 83702; \
                    30 Elm Ct Provo UT 84601";
        let matches = find_all(text);
        assert_eq!(matches.len(), 3);
        for pair in matches.windows(2) {
            assert!(pair[0].end <= pair[1].start);
            assert!(pair[0].start < pair[1].start);
        }
        for m in &matches {
            assert_eq!(&text[m.range()], m.raw_text);
        }
    }

    #[test]
    fn state_must_be_whole_word() {
        // "Main" contains "IN" but not as a word.
        assert!(find_all("500 Main 78701").is_empty());
    }

    #[test]
    fn finds_state_glued_to_zip() {
        let matches = find_all("Call about 500 Main St Austin TX78701 today");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].raw_text, "500 Main St Austin TX78701");
    }

    #[test]
    fn ignores_non_ascii_digits() {
        assert!(find_all("٥٠٠ Main St Austin TX ٧٨٧٠١").is_empty());
    }

    #[test]
    fn zip_must_be_exactly_five_digits() {
        assert!(find_all("500 Main St Austin TX 787011").is_empty());
    }

    #[test]
    fn offsets_are_byte_offsets_after_multibyte_text() {
        let text = "Café → 7 Rue St Austin TX 78701";
        let matches = find_all(text);
        assert_eq!(matches.len(), 1);
        assert_eq!(&text[matches[0].range()], "7 Rue St Austin TX 78701");
    }

    #[test]
    fn scan_is_restartable() {
        let text = "500 Main St Austin TX 78701";
        assert_eq!(scan(text).count(), 1);
        assert_eq!(scan(text).count(), 1);
    }
}
