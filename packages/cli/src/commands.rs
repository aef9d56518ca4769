//! Subcommand implementations.

use std::io::Read as _;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use address_bridge_address::{DetectedAddress, detect, normalize, suggest};
use address_bridge_prefill::file_source::{FileSuggestions, parse_rows};
use address_bridge_prefill::{PrefillError, PrefillOutcome, poll_for_suggestion, sites};
use serde::Serialize;

/// One `scan --json` output line.
#[derive(Serialize)]
struct ScanRecord<'a> {
    start: usize,
    end: usize,
    raw_text: &'a str,
    canonical: &'a str,
    structured: bool,
}

impl<'a> From<&'a DetectedAddress<'a>> for ScanRecord<'a> {
    fn from(found: &'a DetectedAddress<'a>) -> Self {
        Self {
            start: found.location.start,
            end: found.location.end,
            raw_text: found.location.raw_text,
            canonical: &found.canonical,
            structured: found.structured,
        }
    }
}

/// Reads `path`, or all of stdin when no path is given.
fn read_input(path: Option<&Path>) -> std::io::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn scan(path: Option<&Path>, json: bool) -> Result<(), Box<dyn std::error::Error>> {
    let text = read_input(path)?;
    let found = detect(&text);
    log::info!("Found {} address(es)", found.len());

    for address in &found {
        if json {
            println!("{}", serde_json::to_string(&ScanRecord::from(address))?);
        } else {
            println!(
                "{}..{}\t{}\t{}",
                address.location.start,
                address.location.end,
                address.location.raw_text,
                address.canonical
            );
        }
    }

    Ok(())
}

pub fn normalize_addresses(addresses: &[String]) {
    for address in addresses {
        println!("{}", normalize::normalize(address));
    }
}

/// Prints the first matching row; exits with failure when none matches.
pub fn match_suggestions(target: &str, path: Option<&Path>) -> std::io::Result<ExitCode> {
    let rows = parse_rows(&read_input(path)?);

    match suggest::select_best(target, &rows) {
        Some(row) => {
            println!("{}\t{}", row.handle, row.text);
            Ok(ExitCode::SUCCESS)
        }
        None => {
            println!("no match");
            Ok(ExitCode::FAILURE)
        }
    }
}

/// Runs the polling driver against a file, using the site's timings.
pub async fn prefill(
    site_id: &str,
    target: &str,
    suggestions: PathBuf,
) -> Result<ExitCode, PrefillError> {
    let site = sites::find_site(site_id)?;
    log::info!("Polling {} with {:?}", site.name, site.poll);

    let source = FileSuggestions::new(suggestions);
    let outcome = poll_for_suggestion(target, &source, &site.poll).await?;

    match outcome {
        PrefillOutcome::Selected { candidate, polls } => {
            println!("{}\t{}", candidate.handle, candidate.text);
            log::info!("Matched after {polls} poll(s)");
            Ok(ExitCode::SUCCESS)
        }
        PrefillOutcome::NoMatch { polls } => {
            println!("no match after {polls} poll(s); submit the search instead");
            Ok(ExitCode::FAILURE)
        }
    }
}

pub fn list_sites() {
    for site in sites::enabled_sites() {
        println!(
            "{}\t{}\ttimeout={}ms interval={}ms",
            site.id, site.name, site.poll.poll_timeout_ms, site.poll.poll_interval_ms
        );
    }
}
