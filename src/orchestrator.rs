use anyhow::Result;
use itertools::Itertools;
use std::collections::BTreeMap;
use tracing::{debug, info};

use crate::aggregate::PublicationAggregate;
use crate::output::OutputWriter;
use crate::render;
use crate::similarity::{resolve_row, ReuseTotals};
use crate::store::{parse_pubid, year_from_date, MetadataStore};

pub const PUBYEAR_HEADER: [&str; 10] = [
    "xdid",
    "Date",
    "Size",
    "Title",
    "Author",
    "Editor",
    "Copyright",
    "Grid_1A_1D",
    "ReusedCluePct",
    "SimilarGrids",
];

pub const PUB_HEADER: [&str; 5] = [
    "Year",
    "NumberOfPuzzles",
    "SimilarPuzzles",
    "OriginalWordPct",
    "OriginalCluePct",
];

/// Year bucket for records without a usable date; sorts after real years.
pub const UNDATED_YEAR: u16 = 9999;

pub type GroupKey = (String, u16);

/// Roll-up line for one (publisher, year) group.
#[derive(Debug, Clone, PartialEq)]
pub struct YearSummary {
    pub pubid: String,
    pub year: u16,
    pub num_puzzles: usize,
    pub similarity: String, // "<sum of pcts / 100>/<count>"
    pub word_pct: String,   // blank when the group has no clue data
    pub clue_pct: String,
}

/// Everything emitted for one group: the 10-column rows in insertion order
/// plus the roll-up summary.
#[derive(Debug, Clone)]
pub struct GroupReport {
    pub rows: Vec<Vec<String>>,
    pub summary: YearSummary,
}

/// Phase 1: one ordered fold over every puzzle record, bucketing into
/// (publisher id, year) aggregates created on first sight. Runs to
/// completion before any emission starts.
pub fn collate(store: &MetadataStore) -> BTreeMap<GroupKey, PublicationAggregate> {
    let mut all_pubs: BTreeMap<GroupKey, PublicationAggregate> = BTreeMap::new();

    for record in store.puzzles.values() {
        let pubid = parse_pubid(&record.xdid);
        let year = year_from_date(&record.date).unwrap_or(UNDATED_YEAR);
        all_pubs
            .entry((pubid.to_string(), year))
            .or_insert_with(|| PublicationAggregate::new(pubid))
            .add(record);
    }

    all_pubs
}

/// Phase 2, one group: resolve every contributed record in insertion order,
/// folding reuse deltas into the group totals, then compute the roll-up.
pub fn emit_group(
    agg: &PublicationAggregate,
    year: u16,
    store: &MetadataStore,
) -> Result<GroupReport> {
    let mut totals = ReuseTotals::default();
    let mut rows = Vec::with_capacity(agg.puzzles.len());

    for r in &agg.puzzles {
        let res = resolve_row(r, store.similar.get(&r.xdid), &store.puzzles)?;
        totals.fold(&res);
        rows.push(vec![
            res.id_cell,
            r.date.clone(),
            r.size.clone(),
            r.title.clone(),
            r.author.clone(),
            r.editor.clone(),
            r.copyright.clone(),
            r.a1_d1.clone(),
            res.reused_clue_pct,
            res.annotation,
        ]);
    }

    let summary = roll_up(&agg.pubid, year, rows.len(), &totals);
    Ok(GroupReport { rows, summary })
}

fn roll_up(pubid: &str, year: u16, num_puzzles: usize, totals: &ReuseTotals) -> YearSummary {
    // Zero total clues is a legitimate group (no similarity data at all, or
    // only clueless puzzles); the percentages stay blank.
    let (word_pct, clue_pct) = if totals.total_clues > 0 {
        // Truncation toward zero, not floor: the percentage can go negative
        // when anomalous data reports more reused clues than total clues.
        let total = totals.total_clues as f64;
        let clue = (100.0 * (total - totals.reused_clues as f64) / total).trunc();
        let word = (100.0 * (total - totals.reused_answers as f64) / total).trunc();
        (format!("{:.2}%", word), format!("{}%", clue as i64))
    } else {
        (String::new(), String::new())
    };

    // Summed via fold from 0.0; f64's Sum identity is -0.0, which would
    // render an empty list as "-0.00".
    let similarity = format!(
        "{:.2}/{}",
        totals.similar_pcts.iter().fold(0.0, |acc, p| acc + p) / 100.0,
        totals.similar_pcts.len()
    );

    YearSummary {
        pubid: pubid.to_string(),
        year,
        num_puzzles,
        similarity,
        word_pct,
        clue_pct,
    }
}

/// Full generation pass: collate, emit every group in ascending
/// (publisher id, year) order, then the per-publisher and corpus pages.
pub fn run(store: &MetadataStore, outf: &mut OutputWriter) -> Result<()> {
    let start = std::time::Instant::now();

    // 1) collate
    info!("Collating puzzles - records={}", store.puzzles.len());
    let all_pubs = collate(store);
    info!(
        "Collation completed - duration={:.2}s, groups={}",
        start.elapsed().as_secs_f32(),
        all_pubs.len()
    );

    // 2) per-group pages and TSV row streams
    let emit_start = std::time::Instant::now();
    let mut pubyear_rows: BTreeMap<String, Vec<YearSummary>> = BTreeMap::new();

    for ((pubid, year), agg) in &all_pubs {
        debug!("Generating group pages - pubid={}, year={}", pubid, year);
        let report = emit_group(agg, *year, store)?;

        // Stream rows in insertion order; sort only the table view.
        for row in &report.rows {
            outf.write_row(&format!("pub/{}{}.tsv", pubid, year), &PUBYEAR_HEADER, row)?;
        }

        let table_rows: Vec<Vec<String>> = report
            .rows
            .iter()
            .cloned()
            .sorted_by(|a, b| a[1].cmp(&b[1]))
            .collect();
        let mut body = render::pubyear_line(pubid, *year, report.rows.len());
        body.push_str(&render::html_table(&table_rows, &PUBYEAR_HEADER, "puzzle"));
        outf.write_html(
            &format!("pub/{}{}/index.html", pubid, year),
            &body,
            &format!("{} {}", pubid, year),
        )?;

        pubyear_rows
            .entry(pubid.clone())
            .or_default()
            .push(report.summary);
    }
    info!(
        "Group emission completed - duration={:.2}s, groups={}",
        emit_start.elapsed().as_secs_f32(),
        all_pubs.len()
    );

    // 3) per-publisher roll-up pages
    for (pubid, mut summaries) in pubyear_rows {
        summaries.sort_by(|a, b| (&a.pubid, a.year).cmp(&(&b.pubid, b.year)));
        let rows: Vec<Vec<String>> = summaries
            .iter()
            .map(|s| {
                vec![
                    render::mkhref(&s.year.to_string(), &format!("/pub/{}{}", s.pubid, s.year)),
                    s.num_puzzles.to_string(),
                    s.similarity.clone(),
                    s.word_pct.clone(),
                    s.clue_pct.clone(),
                ]
            })
            .collect();
        let body = render::html_table(&rows, &PUB_HEADER, "onepub");
        outf.write_html(&format!("pub/{}/index.html", pubid), &body, &pubid)?;
    }

    // 4) corpus index: one summary row per group
    let index_rows: Vec<Vec<String>> = all_pubs.values().map(|a| a.summary_row()).collect();
    let body = render::html_table(
        &index_rows,
        &PublicationAggregate::summary_header(),
        "pubindex",
    );
    outf.write_html("pub/index.html", &body, "The xd crossword puzzle corpus")?;

    info!(
        "Generation completed - duration={:.2}s, groups={}, publishers={}",
        start.elapsed().as_secs_f32(),
        all_pubs.len(),
        all_pubs.keys().map(|(p, _)| p).unique().count()
    );
    Ok(())
}
