use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::io::BufRead;

/// One scraped movie, already normalized by the extractor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieRecord {
    pub title_pretty: String,
    pub title_lower: String,
    #[serde(default)]
    pub genres: Vec<String>,
    /// Directors and stars, not distinguished.
    #[serde(default)]
    pub people: Vec<String>,
}

impl MovieRecord {
    /// Build a record from raw extracted strings: genres and names are trimmed and lowercased.
    pub fn new<G, P>(title: &str, genres: G, people: P) -> Self
    where
        G: IntoIterator,
        G::Item: AsRef<str>,
        P: IntoIterator,
        P::Item: AsRef<str>,
    {
        Self {
            title_pretty: title.to_string(),
            title_lower: title.to_lowercase(),
            genres: genres.into_iter().map(|g| g.as_ref().trim().to_lowercase()).collect(),
            people: people.into_iter().map(|p| p.as_ref().trim().to_lowercase()).collect(),
        }
    }
}

/// Read JSON Lines records; blank lines are skipped.
pub fn read_records<R: BufRead>(reader: R) -> Result<Vec<MovieRecord>> {
    let mut records = Vec::new();
    for (lineno, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() { continue; }
        let rec: MovieRecord = serde_json::from_str(&line)
            .with_context(|| format!("invalid movie record on line {}", lineno + 1))?;
        records.push(rec);
    }
    Ok(records)
}
