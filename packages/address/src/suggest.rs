//! Autocomplete suggestion matching.
//!
//! Partner-site search boxes answer a typed address with a list of
//! suggestion rows whose text rarely matches the query verbatim
//! (`"500 main st austin tx 78701"` vs `"500 Main St, Austin, TX 78701"`).
//! [`AddressTarget`] decides whether a row refers to the same address using
//! three weak signals: the house number, the ZIP, and the overlap of
//! content-bearing words.
//!
//! Selection is recall-oriented: the first acceptable row in list order
//! wins, since a wrong pick is cheaper than falling back to a plain search.

use std::sync::LazyLock;

use address_bridge_address_models::SuggestionCandidate;
use regex::Regex;

/// First run of digits (the house number, when present).
static DIGITS_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[0-9]+").expect("valid regex"));

/// First ZIP or ZIP+4 appearing as a whole word.
static ZIP_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[0-9]{5}(?:-[0-9]{4})?\b").expect("valid regex"));

/// Directionals, street suffixes and country/state tokens too common to
/// count as evidence.
static STOP_WORDS: &[&str] = &[
    "st", "rd", "ave", "blvd", "ln", "ct", "dr", "hwy", "pkwy", "trl", "cir", "cv", "way", "nw",
    "ne", "sw", "se", "n", "s", "e", "w", "tx", "us", "usa",
];

/// Minimum length of a significance token, in characters.
const MIN_TOKEN_LEN: usize = 3;

/// Distinct significance tokens a row must contain when no ZIP decides.
const REQUIRED_TOKEN_HITS: usize = 2;

/// Lower-cases, replaces `,` and `#` with spaces, and collapses whitespace.
#[must_use]
pub fn normalize_for_match(input: &str) -> String {
    input
        .to_lowercase()
        .replace([',', '#'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Content-bearing words of `input`: lower-cased, at least three
/// characters, not a stop word. Duplicates are dropped, keeping
/// first-occurrence order.
#[must_use]
pub fn significance_tokens(input: &str) -> Vec<String> {
    let mut tokens: Vec<String> = Vec::new();
    for token in normalize_for_match(input).split(' ') {
        if token.chars().count() < MIN_TOKEN_LEN || STOP_WORDS.contains(&token) {
            continue;
        }
        if !tokens.iter().any(|t| t == token) {
            tokens.push(token.to_string());
        }
    }
    tokens
}

/// A target address, preprocessed once for scoring many suggestion rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressTarget {
    street_number: Option<String>,
    zip: Option<String>,
    tokens: Vec<String>,
}

impl AddressTarget {
    /// Extracts the house number, ZIP and significance tokens of `target`.
    #[must_use]
    pub fn new(target: &str) -> Self {
        let normalized = normalize_for_match(target);

        Self {
            street_number: DIGITS_RE
                .find(&normalized)
                .map(|m| m.as_str().to_string()),
            zip: ZIP_RE.find(&normalized).map(|m| m.as_str().to_string()),
            tokens: significance_tokens(&normalized),
        }
    }

    /// The first digit run of the target, if any.
    #[must_use]
    pub fn street_number(&self) -> Option<&str> {
        self.street_number.as_deref()
    }

    /// The first ZIP of the target, if any.
    #[must_use]
    pub fn zip(&self) -> Option<&str> {
        self.zip.as_deref()
    }

    /// The distinct significance tokens of the target.
    #[must_use]
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Decides whether a suggestion row's text refers to this address.
    ///
    /// 1. A row missing the house number is rejected outright
    /// 2. A row containing the ZIP is accepted
    /// 3. Otherwise at least two significance tokens must appear
    #[must_use]
    pub fn accepts(&self, candidate_text: &str) -> bool {
        let text = normalize_for_match(candidate_text);

        if let Some(number) = &self.street_number {
            if !text.contains(number.as_str()) {
                log::trace!("suggest: {text:?} lacks street number {number:?}");
                return false;
            }
        }

        if self.zip.as_ref().is_some_and(|zip| text.contains(zip.as_str())) {
            return true;
        }

        let hits = self
            .tokens
            .iter()
            .filter(|t| text.contains(t.as_str()))
            .take(REQUIRED_TOKEN_HITS)
            .count();
        hits >= REQUIRED_TOKEN_HITS
    }

    /// Returns the first candidate, in supplied order, that this target
    /// accepts.
    #[must_use]
    pub fn select<'c, H, I>(&self, candidates: I) -> Option<&'c SuggestionCandidate<H>>
    where
        H: 'c,
        I: IntoIterator<Item = &'c SuggestionCandidate<H>>,
    {
        candidates.into_iter().find(|c| self.accepts(&c.text))
    }
}

/// Picks the first suggestion that matches `target`.
///
/// Returns `None` when `candidates` is empty or nothing is accepted.
#[must_use]
pub fn select_best<'c, H>(
    target: &str,
    candidates: &'c [SuggestionCandidate<H>],
) -> Option<&'c SuggestionCandidate<H>> {
    let selected = AddressTarget::new(target).select(candidates);
    if selected.is_none() && !candidates.is_empty() {
        log::debug!(
            "suggest: none of {} candidates matched {target:?}",
            candidates.len()
        );
    }
    selected
}
