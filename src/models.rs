use serde::{Deserialize, Serialize};

/// One puzzle's metadata row, keyed by its xdid.
///
/// The xdid encodes the publication code and date/sequence, e.g.
/// "nyt1999-01-03". All fields are free text from the metadata table and
/// may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PuzzleRecord {
    pub xdid: String,
    #[serde(rename = "Date", default)]
    pub date: String, // "YYYY-MM-DD", or empty when unknown
    #[serde(rename = "Size", default)]
    pub size: String, // e.g. "15x15", "15x15 RS"
    #[serde(rename = "Title", default)]
    pub title: String,
    #[serde(rename = "Author", default)]
    pub author: String,
    #[serde(rename = "Editor", default)]
    pub editor: String,
    #[serde(rename = "Copyright", default)]
    pub copyright: String,
    #[serde(rename = "A1_D1", default)]
    pub a1_d1: String, // first across / first down answers, "WORD_WORD"
}

/// Precomputed cross-puzzle overlap statistics for one puzzle.
///
/// Not every puzzle has one; absence means no similarity data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimilarityRecord {
    pub xdid: String,
    #[serde(default)]
    pub similar_grid_pct: String, // 0–100, float-encoded in the table
    #[serde(default)]
    pub reused_clues: u64,
    #[serde(default)]
    pub reused_answers: u64,
    #[serde(default)]
    pub total_clues: u64,
    #[serde(default)]
    pub matches: String, // whitespace-separated "<otherXdid>=<pct>" tokens
}
