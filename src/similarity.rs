use anyhow::{Context, Result};
use std::collections::BTreeMap;

use crate::models::{PuzzleRecord, SimilarityRecord};
use crate::render::mkhref;

/// Numeric contributions of one resolved row, folded into the group's
/// running [`ReuseTotals`] by the caller.
#[derive(Debug, Clone, PartialEq)]
pub struct RowDeltas {
    pub reused_clues: u64,
    pub reused_answers: u64,
    pub total_clues: u64,
    pub similar_pct: f64,
}

/// Reuse counters accumulated across the rows of one (publisher, year)
/// group.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReuseTotals {
    pub reused_clues: u64,
    pub reused_answers: u64,
    pub total_clues: u64,
    pub similar_pcts: Vec<f64>,
}

impl ReuseTotals {
    pub fn fold(&mut self, resolution: &RowResolution) {
        if let Some(d) = &resolution.deltas {
            self.reused_clues += d.reused_clues;
            self.reused_answers += d.reused_answers;
            self.total_clues += d.total_clues;
            // Recorded whenever a similarity record exists, including 0.
            self.similar_pcts.push(d.similar_pct);
        }
    }
}

/// Per-row similarity resolution: display cells plus the numeric deltas.
#[derive(Debug, Clone)]
pub struct RowResolution {
    /// SimilarGrids cell: empty (no similarity record), "0" (record with a
    /// zero percentage), or "<br/>"-joined match fragments.
    pub annotation: String,
    /// ReusedCluePct cell: "n/a" without a record, the floored integer
    /// percentage with one, blank when the record has zero total clues.
    pub reused_clue_pct: String,
    /// xdid cell: hyperlinked to its own page when matches exist.
    pub id_cell: String,
    pub deltas: Option<RowDeltas>,
}

/// Resolve one puzzle against its similarity record (if any).
///
/// A match token referencing an xdid absent from the puzzle collection is
/// a fatal lookup miss: the error names both ids and aborts the run.
pub fn resolve_row(
    record: &PuzzleRecord,
    similar: Option<&SimilarityRecord>,
    puzzles: &BTreeMap<String, PuzzleRecord>,
) -> Result<RowResolution> {
    let mut annotation = String::new();
    let mut reused_clue_pct = "n/a".to_string();
    let mut deltas = None;

    if let Some(rsim) = similar {
        let similar_pct: f64 = rsim.similar_grid_pct.parse().with_context(|| {
            format!(
                "bad similar_grid_pct {:?} for {}",
                rsim.similar_grid_pct, record.xdid
            )
        })?;

        if similar_pct > 0.0 {
            for token in rsim.matches.split_whitespace() {
                let (other_xdid, pct) = token.split_once('=').with_context(|| {
                    format!("bad match token {:?} for {}", token, record.xdid)
                })?;
                let other = puzzles.get(other_xdid).with_context(|| {
                    format!(
                        "similarity match for {} references unknown puzzle {}",
                        record.xdid, other_xdid
                    )
                })?;
                annotation.push_str(&format!("({}%) {} [{}]<br/>", pct, other.author, other_xdid));
            }
        } else {
            annotation.push_str("0");
        }

        // Guarded: puzzles with zero clues are legitimate, blank the cell.
        reused_clue_pct = if rsim.total_clues > 0 {
            (100 * rsim.reused_clues / rsim.total_clues).to_string()
        } else {
            String::new()
        };

        deltas = Some(RowDeltas {
            reused_clues: rsim.reused_clues,
            reused_answers: rsim.reused_answers,
            total_clues: rsim.total_clues,
            similar_pct,
        });
    }

    let id_cell = if !annotation.is_empty() && annotation != "0" {
        mkhref(&record.xdid, &format!("/pub/{}", record.xdid))
    } else {
        record.xdid.clone()
    };

    Ok(RowResolution {
        annotation,
        reused_clue_pct,
        id_cell,
        deltas,
    })
}
