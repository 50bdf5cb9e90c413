use itertools::Itertools;
use std::collections::HashMap;

/// Frequency counter over categorical string values, rendered
/// most-frequent-first.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTally {
    counts: HashMap<String, u32>,
}

impl FrequencyTally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, value: &str) {
        *self.counts.entry(value.to_string()).or_insert(0) += 1;
    }

    /// Number of distinct values seen.
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// Total number of `add` calls.
    pub fn total(&self) -> u32 {
        self.counts.values().sum()
    }

    /// Render for a table cell: empty tally gives an empty string, a single
    /// value gives one "<value> [xN]" line, and two or more values give a
    /// dropdown with one option per value. Entries are ordered by sorting
    /// (count, value) pairs descending: count first, ties broken by reverse
    /// lexical order of the value.
    pub fn render(&self) -> String {
        let freq_sorted: Vec<(u32, &str)> = self
            .counts
            .iter()
            .map(|(value, &count)| (count, value.as_str()))
            .sorted()
            .rev()
            .collect();

        match freq_sorted.as_slice() {
            [] => String::new(),
            [(count, value)] => format!("{} [x{}]", value, count),
            entries => {
                let options = entries
                    .iter()
                    .map(|(count, value)| format!("<option>{} [x{}]</option>", value, count))
                    .join("");
                format!("<select>{}</select>", options)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_renders_empty() {
        assert_eq!(FrequencyTally::new().render(), "");
    }

    #[test]
    fn test_singleton_renders_count() {
        let mut t = FrequencyTally::new();
        for _ in 0..3 {
            t.add("15x15");
        }
        assert_eq!(t.render(), "15x15 [x3]");
        assert_eq!(t.distinct(), 1);
        assert_eq!(t.total(), 3);
    }

    #[test]
    fn test_multi_renders_dropdown_by_descending_count() {
        let mut t = FrequencyTally::new();
        t.add("21x21");
        t.add("15x15");
        t.add("15x15");
        assert_eq!(
            t.render(),
            "<select><option>15x15 [x2]</option><option>21x21 [x1]</option></select>"
        );
    }

    #[test]
    fn test_ties_break_by_reverse_lexical_value() {
        let mut t = FrequencyTally::new();
        t.add("alpha");
        t.add("beta");
        assert_eq!(
            t.render(),
            "<select><option>beta [x1]</option><option>alpha [x1]</option></select>"
        );
    }

    #[test]
    fn test_total_counts_every_add() {
        let mut t = FrequencyTally::new();
        t.add("");
        t.add("");
        t.add("x");
        assert_eq!(t.total(), 3);
        assert_eq!(t.distinct(), 2);
    }
}
