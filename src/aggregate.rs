use crate::models::PuzzleRecord;
use crate::render::mkhref;
use crate::tally::FrequencyTally;

/// Running statistics for one (publisher, year) bucket.
///
/// Built incrementally during collation, read-only afterwards. Date min/max
/// use lexical string comparison; that is chronologically correct only
/// while every record carries the same sortable date format (YYYY-MM-DD).
#[derive(Debug, Clone, Default)]
pub struct PublicationAggregate {
    pub pubid: String,
    pub copyrights: FrequencyTally,
    pub editors: FrequencyTally,
    pub formats: FrequencyTally,
    pub mindate: String, // empty until the first dated record
    pub maxdate: String,
    pub num_xd: usize,
    pub puzzles: Vec<PuzzleRecord>, // insertion order = processing order
}

impl PublicationAggregate {
    pub fn new(pubid: &str) -> Self {
        Self {
            pubid: pubid.to_string(),
            ..Self::default()
        }
    }

    pub fn add(&mut self, record: &PuzzleRecord) {
        self.copyrights.add(record.copyright.trim());
        self.editors.add(record.editor.trim());
        self.formats.add(&record.size);

        let datestr = record.date.as_str();
        if !datestr.is_empty() {
            if self.mindate.is_empty() || datestr < self.mindate.as_str() {
                self.mindate = datestr.to_string();
            }
            if self.maxdate.is_empty() || datestr > self.maxdate.as_str() {
                self.maxdate = datestr.to_string();
            }
        }

        self.num_xd += 1;
        self.puzzles.push(record.clone());
    }

    pub fn summary_header() -> [&'static str; 6] {
        [
            "PubId",
            "NumCollected",
            "DatesCollected",
            "Formats",
            "Copyrights",
            "Editors",
        ]
    }

    /// Fixed-order summary row for the corpus index table.
    pub fn summary_row(&self) -> Vec<String> {
        vec![
            self.pubid.clone(),
            mkhref(&self.num_xd.to_string(), &self.pubid),
            format!("{} &mdash; {}", self.mindate, self.maxdate),
            self.formats.render(),
            self.copyrights.render(),
            self.editors.render(),
        ]
    }
}
