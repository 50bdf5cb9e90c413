use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::{debug, info};

use crate::models::{PuzzleRecord, SimilarityRecord};

/// In-memory view of the metadata tables: every puzzle row keyed by xdid,
/// and the optional per-puzzle similarity rows.
pub struct MetadataStore {
    /// Iteration (and therefore group insertion order downstream) follows
    /// xdid order, not source row order. Equivalent in practice: xdids
    /// embed the publication code and date.
    pub puzzles: BTreeMap<String, PuzzleRecord>,
    pub similar: HashMap<String, SimilarityRecord>,
}

impl MetadataStore {
    pub fn load(puzzles_path: &Path, similar_path: &Path) -> Result<Self> {
        let start = std::time::Instant::now();

        let puzzle_rows: Vec<PuzzleRecord> = read_table(puzzles_path)?;
        let puzzles: BTreeMap<String, PuzzleRecord> = puzzle_rows
            .into_iter()
            .map(|r| (r.xdid.clone(), r))
            .collect();

        let similar_rows: Vec<SimilarityRecord> = read_table(similar_path)?;
        let similar: HashMap<String, SimilarityRecord> = similar_rows
            .into_iter()
            .map(|r| (r.xdid.clone(), r))
            .collect();

        info!(
            "Metadata loaded - duration={:.2}s, puzzles={}, similarity_records={}",
            start.elapsed().as_secs_f32(),
            puzzles.len(),
            similar.len()
        );

        Ok(Self { puzzles, similar })
    }
}

fn read_table<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    debug!("Reading table - path={}", path.display());
    let mut rdr = csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result.with_context(|| format!("parsing {}", path.display()))?;
        rows.push(row);
    }
    Ok(rows)
}

/// Leading ASCII-alphabetic run of an xdid, e.g. "nyt1999-01-03" -> "nyt".
pub fn parse_pubid(xdid: &str) -> &str {
    let end = xdid
        .find(|c: char| !c.is_ascii_alphabetic())
        .unwrap_or(xdid.len());
    &xdid[..end]
}

/// Leading 4-digit year of a date string, None when absent or malformed.
pub fn year_from_date(date: &str) -> Option<u16> {
    date.get(..4)?.parse().ok()
}
