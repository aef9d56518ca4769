//! Compile-time registry of partner site profiles.
//!
//! Each site whose search box gets prefilled is described by a TOML file
//! under `sites/`. The registry embeds these at compile time and exposes
//! them via [`all_sites`], [`enabled_sites`] and [`find_site`].

use serde::Deserialize;

use crate::{PollConfig, PrefillError};

/// A partner site profile loaded from TOML.
#[derive(Debug, Clone, Deserialize)]
pub struct SiteProfile {
    /// Unique identifier (e.g., `"har"`, `"realtor"`).
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Whether prefill runs on this site.
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Listing order — lower values come first.
    pub priority: u32,
    /// Suggestion polling timings for this site.
    #[serde(default)]
    pub poll: PollConfig,
}

const fn default_true() -> bool {
    true
}

// ── Compile-time embedded TOML files ────────────────────────────────

const SITE_TOMLS: &[(&str, &str)] = &[
    ("har", include_str!("../sites/har.toml")),
    ("realtor", include_str!("../sites/realtor.toml")),
];

#[cfg(test)]
const EXPECTED_SITE_COUNT: usize = 2;

/// Returns all site profiles (enabled and disabled).
///
/// # Panics
///
/// Panics if any TOML profile is malformed (the profiles are embedded, so
/// this surfaces in tests rather than in the field).
#[must_use]
pub fn all_sites() -> Vec<SiteProfile> {
    SITE_TOMLS
        .iter()
        .map(|(name, toml_str)| {
            toml::de::from_str(toml_str)
                .unwrap_or_else(|e| panic!("Failed to parse site profile '{name}': {e}"))
        })
        .collect()
}

/// Returns only enabled sites, sorted by priority (ascending).
#[must_use]
pub fn enabled_sites() -> Vec<SiteProfile> {
    let mut sites: Vec<SiteProfile> = all_sites().into_iter().filter(|s| s.enabled).collect();
    sites.sort_by_key(|s| s.priority);
    sites
}

/// Looks up an enabled site by id.
///
/// # Errors
///
/// Returns [`PrefillError::UnknownSite`] if no enabled site has this id.
pub fn find_site(id: &str) -> Result<SiteProfile, PrefillError> {
    enabled_sites()
        .into_iter()
        .find(|s| s.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| PrefillError::UnknownSite { id: id.to_string() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;
    use std::time::Duration;

    #[test]
    fn loads_all_sites() {
        assert_eq!(all_sites().len(), EXPECTED_SITE_COUNT);
    }

    #[test]
    fn site_ids_are_unique() {
        let mut seen = BTreeSet::new();
        for site in &all_sites() {
            assert!(seen.insert(site.id.clone()), "Duplicate site ID: {}", site.id);
        }
    }

    #[test]
    fn enabled_sites_sorted_by_priority() {
        let sites = enabled_sites();
        for window in sites.windows(2) {
            assert!(
                window[0].priority <= window[1].priority,
                "Sites not sorted by priority: {} ({}) > {} ({})",
                window[0].id,
                window[0].priority,
                window[1].id,
                window[1].priority
            );
        }
    }

    #[test]
    fn har_waits_before_selecting() {
        let har = find_site("har").unwrap();
        assert_eq!(har.poll.select_delay(), Duration::from_millis(120));
        assert_eq!(har.poll.poll_timeout(), Duration::from_millis(2500));
    }

    #[test]
    fn realtor_selects_immediately() {
        let realtor = find_site("REALTOR").unwrap();
        assert_eq!(realtor.poll.select_delay(), Duration::ZERO);
        assert_eq!(realtor.poll.poll_interval(), Duration::from_millis(120));
    }

    #[test]
    fn unknown_site_is_an_error() {
        assert!(matches!(
            find_site("zillow"),
            Err(PrefillError::UnknownSite { id }) if id == "zillow"
        ));
    }
}
