#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared types for US address detection and suggestion matching.
//!
//! This crate contains only data types and simple conversions. It has no
//! heavyweight dependencies (no regex, no I/O).

use std::ops::Range;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

/// Two-letter USPS abbreviation for the 50 states plus the District of
/// Columbia.
///
/// Parsing is ASCII case-insensitive, so `"tx"`, `"Tx"` and `"TX"` all
/// resolve to [`StateCode::Tx`]. Display always renders upper case.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum StateCode {
    /// Alabama
    Al,
    /// Alaska
    Ak,
    /// Arizona
    Az,
    /// Arkansas
    Ar,
    /// California
    Ca,
    /// Colorado
    Co,
    /// Connecticut
    Ct,
    /// District of Columbia
    Dc,
    /// Delaware
    De,
    /// Florida
    Fl,
    /// Georgia
    Ga,
    /// Hawaii
    Hi,
    /// Iowa
    Ia,
    /// Idaho
    Id,
    /// Illinois
    Il,
    /// Indiana
    In,
    /// Kansas
    Ks,
    /// Kentucky
    Ky,
    /// Louisiana
    La,
    /// Massachusetts
    Ma,
    /// Maryland
    Md,
    /// Maine
    Me,
    /// Michigan
    Mi,
    /// Minnesota
    Mn,
    /// Missouri
    Mo,
    /// Mississippi
    Ms,
    /// Montana
    Mt,
    /// North Carolina
    Nc,
    /// North Dakota
    Nd,
    /// Nebraska
    Ne,
    /// New Hampshire
    Nh,
    /// New Jersey
    Nj,
    /// New Mexico
    Nm,
    /// Nevada
    Nv,
    /// New York
    Ny,
    /// Ohio
    Oh,
    /// Oklahoma
    Ok,
    /// Oregon
    Or,
    /// Pennsylvania
    Pa,
    /// Rhode Island
    Ri,
    /// South Carolina
    Sc,
    /// South Dakota
    Sd,
    /// Tennessee
    Tn,
    /// Texas
    Tx,
    /// Utah
    Ut,
    /// Virginia
    Va,
    /// Vermont
    Vt,
    /// Washington
    Wa,
    /// Wisconsin
    Wi,
    /// West Virginia
    Wv,
    /// Wyoming
    Wy,
}

impl StateCode {
    /// Every state code, in the order used to build the detection pattern.
    pub const ALL: &[Self] = &[
        Self::Al,
        Self::Ak,
        Self::Az,
        Self::Ar,
        Self::Ca,
        Self::Co,
        Self::Ct,
        Self::Dc,
        Self::De,
        Self::Fl,
        Self::Ga,
        Self::Hi,
        Self::Ia,
        Self::Id,
        Self::Il,
        Self::In,
        Self::Ks,
        Self::Ky,
        Self::La,
        Self::Ma,
        Self::Md,
        Self::Me,
        Self::Mi,
        Self::Mn,
        Self::Mo,
        Self::Ms,
        Self::Mt,
        Self::Nc,
        Self::Nd,
        Self::Ne,
        Self::Nh,
        Self::Nj,
        Self::Nm,
        Self::Nv,
        Self::Ny,
        Self::Oh,
        Self::Ok,
        Self::Or,
        Self::Pa,
        Self::Ri,
        Self::Sc,
        Self::Sd,
        Self::Tn,
        Self::Tx,
        Self::Ut,
        Self::Va,
        Self::Vt,
        Self::Wa,
        Self::Wi,
        Self::Wv,
        Self::Wy,
    ];

    /// Parses a bare two-letter token, ignoring ASCII case.
    ///
    /// Returns `None` for anything that is not exactly one of the 51
    /// abbreviations (surrounding whitespace or punctuation included).
    #[must_use]
    pub fn parse_token(token: &str) -> Option<Self> {
        if token.len() != 2 {
            return None;
        }
        token.parse().ok()
    }
}

/// A located address candidate inside a source text blob.
///
/// `start` and `end` are half-open UTF-8 byte offsets into the exact blob
/// the match was produced from, so `&text[m.start..m.end] == m.raw_text`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AddressMatch<'t> {
    /// The matched substring, verbatim.
    pub raw_text: &'t str,
    /// Byte offset of the first matched character.
    pub start: usize,
    /// Byte offset one past the last matched character.
    pub end: usize,
}

impl AddressMatch<'_> {
    /// Byte range of the match within its source text.
    #[must_use]
    pub const fn range(&self) -> Range<usize> {
        self.start..self.end
    }
}

/// One row of an externally populated autocomplete list.
///
/// The `handle` is opaque to the matcher; callers use it to act on the
/// row they were handed back (click it, submit it, look it up).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuggestionCandidate<H> {
    /// Caller-defined reference to the underlying row.
    pub handle: H,
    /// Visible text of the row.
    pub text: String,
}

impl<H> SuggestionCandidate<H> {
    /// Creates a candidate from a handle and its visible text.
    #[must_use]
    pub fn new(handle: H, text: impl Into<String>) -> Self {
        Self {
            handle,
            text: text.into(),
        }
    }
}
