use anyhow::{Context, Result};
use std::collections::HashSet;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::render;

/// Persists generated pages and TSV row streams under one output root.
///
/// TSV files are row streams: the header line is written the first time a
/// file is touched in a run, rows are appended after that. Nothing is
/// rolled back on failure; a run that aborts mid-way leaves the files
/// written so far in place.
pub struct OutputWriter {
    root: PathBuf,
    started_tsv: HashSet<PathBuf>,
}

impl OutputWriter {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
            started_tsv: HashSet::new(),
        }
    }

    pub fn write_html(&self, relpath: &str, body: &str, title: &str) -> Result<()> {
        let path = self.root.join(relpath);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        fs::write(&path, render::html_page(title, body))
            .with_context(|| format!("write {}", path.display()))?;
        debug!("Wrote {}", path.display());
        Ok(())
    }

    pub fn write_row(&mut self, relpath: &str, header: &[&str], row: &[String]) -> Result<()> {
        let path = self.root.join(relpath);
        if !self.started_tsv.contains(&path) {
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create {}", parent.display()))?;
            }
            fs::write(&path, format!("{}\n", header.join("\t")))
                .with_context(|| format!("write {}", path.display()))?;
            self.started_tsv.insert(path.clone());
        }
        let mut f = OpenOptions::new()
            .append(true)
            .open(&path)
            .with_context(|| format!("append {}", path.display()))?;
        writeln!(f, "{}", row.join("\t")).with_context(|| format!("append {}", path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rows_appended_after_single_header() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = OutputWriter::new(dir.path());

        let header = ["xdid", "Date"];
        out.write_row("pub/nyt2020.tsv", &header, &["a".to_string(), "1".to_string()])
            .unwrap();
        out.write_row("pub/nyt2020.tsv", &header, &["b".to_string(), "2".to_string()])
            .unwrap();

        let text = fs::read_to_string(dir.path().join("pub/nyt2020.tsv")).unwrap();
        assert_eq!(text, "xdid\tDate\na\t1\nb\t2\n");
    }

    #[test]
    fn test_html_page_written_with_parents() {
        let dir = tempfile::tempdir().unwrap();
        let out = OutputWriter::new(dir.path());
        out.write_html("pub/nyt2020/index.html", "<p>x</p>", "nyt 2020")
            .unwrap();

        let text = fs::read_to_string(dir.path().join("pub/nyt2020/index.html")).unwrap();
        assert!(text.contains("<title>nyt 2020</title>"));
        assert!(text.contains("<p>x</p>"));
    }
}
