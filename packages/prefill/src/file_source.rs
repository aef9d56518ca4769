//! A [`SuggestionSource`] backed by a plain text file.
//!
//! Each non-blank line is one suggestion row; the handle is the 1-based
//! line number. The file is re-read on every snapshot so another process
//! can append rows while polling is in progress. A file that does not
//! exist yet reads as an empty list.

use std::io::ErrorKind;
use std::path::PathBuf;

use address_bridge_address_models::SuggestionCandidate;
use async_trait::async_trait;

use crate::{PrefillError, SuggestionSource};

/// Suggestion rows read from a text file, one per line.
#[derive(Debug, Clone)]
pub struct FileSuggestions {
    path: PathBuf,
}

impl FileSuggestions {
    /// Creates a source that reads `path` on every snapshot.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parses suggestion rows from text, skipping blank lines.
#[must_use]
pub fn parse_rows(contents: &str) -> Vec<SuggestionCandidate<usize>> {
    contents
        .lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .map(|(i, line)| SuggestionCandidate::new(i + 1, line.trim()))
        .collect()
}

#[async_trait]
impl SuggestionSource for FileSuggestions {
    type Handle = usize;

    async fn suggestions(&self) -> Result<Vec<SuggestionCandidate<usize>>, PrefillError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => Ok(parse_rows(&contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Vec::new()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_rows_with_line_numbers() {
        let rows = parse_rows("500 main st\n\n  501 main st  \n");
        assert_eq!(
            rows,
            vec![
                SuggestionCandidate::new(1, "500 main st"),
                SuggestionCandidate::new(3, "501 main st"),
            ]
        );
    }

    #[tokio::test]
    async fn missing_file_reads_as_empty() {
        let path = std::env::temp_dir().join("address_bridge_missing_suggestions.txt");
        let _ = std::fs::remove_file(&path);

        let rows = FileSuggestions::new(&path).suggestions().await.unwrap();
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn rereads_file_on_each_snapshot() {
        let path = std::env::temp_dir().join("address_bridge_live_suggestions.txt");
        std::fs::write(&path, "Austin, TX\n").unwrap();

        let source = FileSuggestions::new(&path);
        assert_eq!(source.suggestions().await.unwrap().len(), 1);

        std::fs::write(&path, "Austin, TX\n500 Main St, Austin, TX 78701\n").unwrap();
        let rows = source.suggestions().await.unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].handle, 2);

        let _ = std::fs::remove_file(&path);
    }
}
