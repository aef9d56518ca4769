//! Canonicalization of scraped address text.
//!
//! Page text loses punctuation and word breaks in all sorts of ways:
//! - Glued tokens: `"710KahldenCtHoustonTX77079"`
//! - Unit designators: `"123 Main St, Apt 4B, Springfield, IL 62704"`
//! - Full-width or doubled commas: `"500 Main St，Austin，tx 78701"`
//!
//! [`normalize`] reshapes these into `"<street>, <city>, <STATE> <ZIP>"`.
//! When the street/city split cannot be made with confidence, the cleaned
//! input is returned as-is. Normalization never fails.

use std::sync::LazyLock;

use address_bridge_address_models::StateCode;
use regex::{Captures, Regex};

/// Regex for unit/suite designators: `"Apt 4 B"`, `"Suite 200"`, `"#12"`.
///
/// Runs after boundary splitting, so `"4B"` has already become `"4 B"`.
/// The designator is a digit run with an optional single trailing letter,
/// or a letter run with an optional trailing digit run.
static UNIT_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)(?:\b(?:apartment|apt|unit|suite|ste)\b\.?|#)\s*#?\s*(?:[0-9]+(?:\s[a-z])?|[a-z]+(?:\s[0-9]+)?)\b",
    )
    .expect("valid regex")
});

/// Full-width and ideographic comma variants.
static WIDE_COMMA_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[，﹐﹑、]").expect("valid regex"));

/// A run of one or more commas with any surrounding whitespace.
static COMMA_RUN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*(?:,\s*)+").expect("valid regex"));

/// Two-letter token directly in front of the trailing ZIP, e.g. `"tx 78701"`.
static STATE_BEFORE_ZIP_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b([a-z]{2})([\s,]*)([0-9]{5}(?:-[0-9]{4})?)$").expect("valid regex")
});

/// A whole token that is a 5-digit ZIP, optionally ZIP+4.
static ZIP_TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5}(?:-[0-9]{4})?$").expect("valid regex"));

/// Street suffixes that anchor the end of the street portion.
static STREET_SUFFIXES: &[&str] = &[
    "st",
    "street",
    "rd",
    "road",
    "dr",
    "drive",
    "ln",
    "lane",
    "ct",
    "court",
    "cir",
    "circle",
    "ave",
    "avenue",
    "blvd",
    "boulevard",
    "pkwy",
    "parkway",
    "trl",
    "trail",
    "way",
    "cv",
    "cove",
    "hwy",
    "highway",
    "ter",
    "terrace",
    "pl",
    "place",
    "sq",
    "square",
    "loop",
    "bend",
];

/// Compass directions that may trail a street suffix (`"St W"`).
static DIRECTIONS: &[&str] = &["n", "s", "e", "w", "ne", "nw", "se", "sw"];

/// Number of street tokens assumed when no suffix anchors the split.
const FIXED_STREET_TOKENS: usize = 3;

/// Outcome of a single normalization strategy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    /// The strategy produced a canonical address.
    Structured(String),
    /// The strategy declined; the cleaned input is carried through.
    Unstructured(String),
}

impl Shape {
    /// Whether the address was restructured.
    #[must_use]
    pub const fn is_structured(&self) -> bool {
        matches!(self, Self::Structured(_))
    }

    /// Returns the carried string regardless of variant.
    #[must_use]
    pub fn into_string(self) -> String {
        match self {
            Self::Structured(s) | Self::Unstructured(s) => s,
        }
    }
}

type Strategy = fn(&str) -> Shape;

/// Strategies in the order they are tried. The first structured result
/// wins.
const STRATEGIES: &[(&str, Strategy)] = &[
    ("comma_delimited", comma_delimited),
    ("suffix_anchored", suffix_anchored),
    ("fixed_arity", fixed_arity),
];

/// Normalizes a raw address into `"<street>, <city>, <STATE> <ZIP>"`.
///
/// Returns the cleaned input unchanged when it cannot be restructured.
#[must_use]
pub fn normalize(raw: &str) -> String {
    normalize_shape(raw).into_string()
}

/// Like [`normalize`], but reports whether a strategy restructured the
/// input.
#[must_use]
pub fn normalize_shape(raw: &str) -> Shape {
    let cleaned = clean(raw);

    for (name, strategy) in STRATEGIES {
        match strategy(&cleaned) {
            Shape::Structured(s) => {
                log::debug!("normalize: {name} structured {raw:?} as {s:?}");
                return Shape::Structured(s);
            }
            Shape::Unstructured(_) => {
                log::trace!("normalize: {name} deferred on {cleaned:?}");
            }
        }
    }

    log::debug!("normalize: leaving {cleaned:?} unstructured");
    Shape::Unstructured(cleaned)
}

/// Applies the structure-independent cleanup passes.
///
/// 1. Splits glued tokens at digit/letter and case boundaries
/// 2. Strips unit and suite designators
/// 3. Normalizes commas to `", "`
#[must_use]
pub fn clean(raw: &str) -> String {
    let split = split_boundaries(raw);
    let stripped = strip_units(&split);
    normalize_commas(&stripped)
}

/// Inserts a space at digit→letter, letter→digit, lower→upper and
/// `UPPER`→`Upper` boundaries, then collapses whitespace.
fn split_boundaries(input: &str) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut out = String::with_capacity(input.len() + 8);

    for (i, &cur) in chars.iter().enumerate() {
        if i > 0 && is_boundary(chars[i - 1], cur, chars.get(i + 1).copied()) {
            out.push(' ');
        }
        out.push(cur);
    }

    collapse_whitespace(&out)
}

fn is_boundary(prev: char, cur: char, next: Option<char>) -> bool {
    (prev.is_ascii_digit() && cur.is_alphabetic())
        || (prev.is_alphabetic() && cur.is_ascii_digit())
        || (prev.is_lowercase() && cur.is_uppercase())
        || (prev.is_uppercase() && cur.is_uppercase() && next.is_some_and(char::is_lowercase))
}

/// Removes unit designators until none remain.
fn strip_units(input: &str) -> String {
    let mut current = input.to_string();
    loop {
        let next = collapse_whitespace(&UNIT_RE.replace_all(&current, " "));
        if next == current {
            return current;
        }
        current = next;
    }
}

fn normalize_commas(input: &str) -> String {
    let ascii = WIDE_COMMA_RE.replace_all(input, ",");
    let joined = COMMA_RUN_RE.replace_all(&ascii, ", ");
    joined
        .trim_matches(|c: char| c == ',' || c.is_whitespace())
        .to_string()
}

fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Input that is already comma-delimited only needs the state in front of
/// its final ZIP re-cased.
fn comma_delimited(input: &str) -> Shape {
    if !input.contains(',') {
        return Shape::Unstructured(input.to_string());
    }

    let recased = STATE_BEFORE_ZIP_RE.replace(input, |caps: &Captures| {
        StateCode::parse_token(&caps[1]).map_or_else(
            || caps[0].to_string(),
            |state| format!("{state}{}{}", &caps[2], &caps[3]),
        )
    });

    Shape::Structured(recased.into_owned())
}

/// Splits street from city at the first known street suffix, carrying
/// trailing route numbers and directions (`"Hwy 6"`, `"St W"`) along with
/// the street.
fn suffix_anchored(input: &str) -> Shape {
    let Some(parts) = AddressParts::parse(input) else {
        return Shape::Unstructured(input.to_string());
    };
    let Some(suffix) = parts.suffix_position() else {
        return Shape::Unstructured(input.to_string());
    };

    let mut end = suffix + 1;
    while parts.rest.get(end).is_some_and(|t| is_street_tail(t)) {
        end += 1;
    }

    parts.emit(end)
}

/// Without a suffix to anchor on, assumes a three-token street name.
fn fixed_arity(input: &str) -> Shape {
    let Some(parts) = AddressParts::parse(input) else {
        return Shape::Unstructured(input.to_string());
    };
    if parts.suffix_position().is_some() || parts.rest.len() <= FIXED_STREET_TOKENS {
        return Shape::Unstructured(input.to_string());
    }

    parts.emit(FIXED_STREET_TOKENS)
}

/// Token layout of an unpunctuated address:
/// `<house number> <rest...> <STATE> <ZIP>`.
struct AddressParts<'a> {
    source: &'a str,
    house_number: &'a str,
    rest: Vec<&'a str>,
    state: StateCode,
    zip: &'a str,
}

impl<'a> AddressParts<'a> {
    fn parse(source: &'a str) -> Option<Self> {
        let tokens: Vec<&str> = source.split_whitespace().collect();
        if tokens.len() < 4 {
            return None;
        }

        let (head, tail) = tokens.split_at(tokens.len() - 2);
        let zip = tail[1];
        if !ZIP_TOKEN_RE.is_match(zip) {
            return None;
        }
        let state = StateCode::parse_token(tail[0])?;

        let (&house_number, rest) = head.split_first()?;
        if !house_number.starts_with(|c: char| c.is_ascii_digit()) {
            return None;
        }

        Some(Self {
            source,
            house_number,
            rest: rest.to_vec(),
            state,
            zip,
        })
    }

    fn suffix_position(&self) -> Option<usize> {
        self.rest.iter().position(|t| is_street_suffix(t))
    }

    /// Emits the canonical form with the first `street_len` tokens of
    /// `rest` as the street.
    fn emit(&self, street_len: usize) -> Shape {
        let (street, city) = self.rest.split_at(street_len.min(self.rest.len()));
        if city.is_empty() {
            return Shape::Unstructured(self.source.to_string());
        }

        let mut street_line = self.house_number.to_string();
        for token in street {
            street_line.push(' ');
            street_line.push_str(token);
        }

        Shape::Structured(format!(
            "{street_line}, {}, {} {}",
            city.join(" "),
            self.state,
            self.zip
        ))
    }
}

fn is_street_suffix(token: &str) -> bool {
    let bare = token.trim_end_matches('.').to_ascii_lowercase();
    STREET_SUFFIXES.contains(&bare.as_str())
}

fn is_street_tail(token: &str) -> bool {
    let bare = token.trim_end_matches('.').to_ascii_lowercase();
    (!bare.is_empty() && bare.chars().all(|c| c.is_ascii_digit()))
        || DIRECTIONS.contains(&bare.as_str())
}
