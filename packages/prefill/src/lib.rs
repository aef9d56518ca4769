#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Partner-site autocomplete polling.
//!
//! After a canonical address is typed into a partner site's search box,
//! the site's suggestion list fills in asynchronously. [`poll_for_suggestion`]
//! repeatedly snapshots that list through a [`SuggestionSource`] and runs
//! the matcher from [`address_bridge_address::suggest`] on each snapshot
//! until a row matches or the site's poll window closes.
//!
//! Per-site timings live in the [`sites`] registry. Cancellation is done
//! by dropping the returned future.

pub mod file_source;
pub mod sites;

use std::time::Duration;

use address_bridge_address::suggest::AddressTarget;
use address_bridge_address_models::SuggestionCandidate;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::time::Instant;

/// Errors from prefill operations.
#[derive(Debug, Error)]
pub enum PrefillError {
    /// The suggestion source could not produce a snapshot.
    #[error("Suggestion source error: {message}")]
    Source {
        /// Description of the failure.
        message: String,
    },

    /// I/O error (file read).
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// No enabled site profile has the requested id.
    #[error("Unknown site: {id}")]
    UnknownSite {
        /// The id that was looked up.
        id: String,
    },
}

/// A live, externally mutated list of autocomplete rows.
#[async_trait]
pub trait SuggestionSource: Send + Sync {
    /// Opaque per-row reference handed back with the chosen row.
    type Handle: Send;

    /// Takes a snapshot of the rows currently on offer.
    ///
    /// # Errors
    ///
    /// Returns [`PrefillError`] if the snapshot cannot be taken.
    async fn suggestions(&self) -> Result<Vec<SuggestionCandidate<Self::Handle>>, PrefillError>;
}

/// Suggestion polling timings, in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollConfig {
    /// Pause after typing, before the first snapshot.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
    /// Polling stops once this much time has passed since the first
    /// snapshot.
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_ms: u64,
    /// Pause between snapshots.
    #[serde(default = "default_poll_interval")]
    pub poll_interval_ms: u64,
    /// Pause after a match, before handing it back.
    #[serde(default)]
    pub select_delay_ms: u64,
}

const fn default_settle_delay() -> u64 {
    200
}

const fn default_poll_timeout() -> u64 {
    2500
}

const fn default_poll_interval() -> u64 {
    120
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            poll_timeout_ms: default_poll_timeout(),
            poll_interval_ms: default_poll_interval(),
            select_delay_ms: 0,
        }
    }
}

impl PollConfig {
    /// Wait before the first snapshot.
    #[must_use]
    pub const fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }

    /// How long to keep polling after the settle delay.
    #[must_use]
    pub const fn poll_timeout(&self) -> Duration {
        Duration::from_millis(self.poll_timeout_ms)
    }

    /// Pause between snapshots.
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Pause between finding a match and reporting it.
    #[must_use]
    pub const fn select_delay(&self) -> Duration {
        Duration::from_millis(self.select_delay_ms)
    }
}

/// Result of a polling run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrefillOutcome<H> {
    /// A row matched the address; the caller should activate it.
    Selected {
        /// The matching row.
        candidate: SuggestionCandidate<H>,
        /// Snapshots taken, including the matching one.
        polls: u32,
    },
    /// The poll window closed without a match; the caller should fall
    /// back to a plain search submission.
    NoMatch {
        /// Snapshots taken.
        polls: u32,
    },
}

impl<H> PrefillOutcome<H> {
    /// Number of snapshots taken.
    #[must_use]
    pub const fn polls(&self) -> u32 {
        match self {
            Self::Selected { polls, .. } | Self::NoMatch { polls } => *polls,
        }
    }
}

/// Polls `source` until one of its rows matches `address` or
/// `config.poll_timeout` elapses.
///
/// At least one snapshot is taken unless the timeout is zero.
///
/// # Errors
///
/// Returns [`PrefillError`] as soon as the source fails to produce a
/// snapshot.
pub async fn poll_for_suggestion<S>(
    address: &str,
    source: &S,
    config: &PollConfig,
) -> Result<PrefillOutcome<S::Handle>, PrefillError>
where
    S: SuggestionSource + ?Sized,
{
    let target = AddressTarget::new(address);

    if !config.settle_delay().is_zero() {
        tokio::time::sleep(config.settle_delay()).await;
    }

    let start = Instant::now();
    let mut polls: u32 = 0;

    while start.elapsed() < config.poll_timeout() {
        let candidates = source.suggestions().await?;
        polls += 1;
        log::trace!("prefill: poll {polls} saw {} suggestions", candidates.len());

        if let Some(candidate) = candidates.into_iter().find(|c| target.accepts(&c.text)) {
            log::info!(
                "prefill: selected {:?} for {address:?} after {polls} poll(s)",
                candidate.text
            );
            if !config.select_delay().is_zero() {
                tokio::time::sleep(config.select_delay()).await;
            }
            return Ok(PrefillOutcome::Selected { candidate, polls });
        }

        tokio::time::sleep(config.poll_interval()).await;
    }

    log::warn!(
        "prefill: no suggestion matched {address:?} within {:?} ({polls} polls)",
        config.poll_timeout()
    );
    Ok(PrefillOutcome::NoMatch { polls })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    /// Replays a fixed sequence of snapshots, repeating the last one.
    struct ScriptedSource {
        snapshots: Mutex<VecDeque<Vec<&'static str>>>,
    }

    impl ScriptedSource {
        fn new(snapshots: Vec<Vec<&'static str>>) -> Self {
            Self {
                snapshots: Mutex::new(snapshots.into()),
            }
        }
    }

    #[async_trait]
    impl SuggestionSource for ScriptedSource {
        type Handle = usize;

        async fn suggestions(&self) -> Result<Vec<SuggestionCandidate<usize>>, PrefillError> {
            let mut snapshots = self.snapshots.lock().unwrap();
            let rows = if snapshots.len() > 1 {
                snapshots.pop_front().unwrap()
            } else {
                snapshots.front().cloned().unwrap_or_default()
            };
            Ok(rows
                .into_iter()
                .enumerate()
                .map(|(i, t)| SuggestionCandidate::new(i, t))
                .collect())
        }
    }

    struct FailingSource;

    #[async_trait]
    impl SuggestionSource for FailingSource {
        type Handle = ();

        async fn suggestions(&self) -> Result<Vec<SuggestionCandidate<()>>, PrefillError> {
            Err(PrefillError::Source {
                message: "listbox detached".to_string(),
            })
        }
    }

    fn fast_config() -> PollConfig {
        PollConfig {
            settle_delay_ms: 0,
            poll_timeout_ms: 200,
            poll_interval_ms: 1,
            select_delay_ms: 0,
        }
    }

    #[tokio::test]
    async fn selects_once_matching_row_appears() {
        let source = ScriptedSource::new(vec![
            vec![],
            vec!["Austin, TX"],
            vec!["Austin, TX", "500 Main St Austin TX 78701"],
        ]);

        let outcome = poll_for_suggestion("500 Main St, Austin, TX 78701", &source, &fast_config())
            .await
            .unwrap();

        match outcome {
            PrefillOutcome::Selected { candidate, polls } => {
                assert_eq!(candidate.handle, 1);
                assert_eq!(polls, 3);
            }
            PrefillOutcome::NoMatch { .. } => panic!("expected a selection"),
        }
    }

    #[tokio::test]
    async fn gives_up_after_timeout() {
        let source = ScriptedSource::new(vec![vec!["Dallas, TX", "Houston, TX"]]);
        let config = PollConfig {
            poll_timeout_ms: 20,
            ..fast_config()
        };

        let outcome = poll_for_suggestion("500 Main St, Austin, TX 78701", &source, &config)
            .await
            .unwrap();

        assert!(matches!(outcome, PrefillOutcome::NoMatch { .. }));
        assert!(outcome.polls() >= 1);
    }

    #[tokio::test]
    async fn zero_timeout_takes_no_snapshots() {
        let source = ScriptedSource::new(vec![vec!["500 Main St Austin TX 78701"]]);
        let config = PollConfig {
            poll_timeout_ms: 0,
            ..fast_config()
        };

        let outcome = poll_for_suggestion("500 Main St, Austin, TX 78701", &source, &config)
            .await
            .unwrap();

        assert_eq!(outcome, PrefillOutcome::NoMatch { polls: 0 });
    }

    #[tokio::test]
    async fn source_errors_propagate() {
        let result = poll_for_suggestion("9 Elm St", &FailingSource, &fast_config()).await;
        assert!(matches!(result, Err(PrefillError::Source { .. })));
    }

    #[test]
    fn poll_config_defaults_fill_missing_fields() {
        let config: PollConfig = toml::de::from_str("poll_timeout_ms = 4000").unwrap();
        assert_eq!(config.poll_timeout(), Duration::from_millis(4000));
        assert_eq!(config.settle_delay(), Duration::from_millis(200));
        assert_eq!(config.poll_interval(), Duration::from_millis(120));
        assert_eq!(config.select_delay(), Duration::ZERO);
    }
}
