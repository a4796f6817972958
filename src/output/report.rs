//! Result collection and report rendering
//!
//! The report starts with the literal header `url, depth, ratio` (comma
//! separated) followed by one `url\trank\tdepth` row per processed page.

use crate::CrawlError;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Header row of the report, written comma separated
pub const REPORT_HEADER: [&str; 3] = ["url", "depth", "ratio"];

/// Outcome of one successfully processed page
#[derive(Debug, Clone, PartialEq)]
pub struct CrawlRecord {
    /// URL of the page
    pub url: String,

    /// Locality rank of the page
    pub rank: f64,

    /// Depth the page was crawled at
    pub depth: u32,

    /// Kept links discovered on the page
    pub links: Vec<String>,
}

impl CrawlRecord {
    /// Formats the record as a tab separated report row
    pub fn to_row(&self) -> String {
        format!("{}\t{}\t{}", self.url, self.rank, self.depth)
    }
}

/// Collects crawl records in the order pages were visited
#[derive(Debug, Default)]
pub struct ResultSink {
    records: Vec<CrawlRecord>,
}

impl ResultSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a record; no reordering and no deduplication
    pub fn append(&mut self, record: CrawlRecord) {
        self.records.push(record);
    }

    pub fn records(&self) -> &[CrawlRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Writes the header and every record to `writer`
    pub fn render<W: Write>(&self, mut writer: W) -> io::Result<()> {
        writeln!(writer, "{}", REPORT_HEADER.join(", "))?;
        for record in &self.records {
            writeln!(writer, "{}", record.to_row())?;
        }
        writer.flush()
    }

    /// Renders the report into the file at `path`
    ///
    /// The file is created (or truncated) and closed within this call.
    pub fn write_report(&self, path: &Path) -> Result<(), CrawlError> {
        let to_report_error = |source| CrawlError::Report {
            path: path.display().to_string(),
            source,
        };

        let file = File::create(path).map_err(to_report_error)?;
        self.render(BufWriter::new(file)).map_err(to_report_error)?;

        tracing::info!("Wrote {} results to {}", self.records.len(), path.display());
        Ok(())
    }

    /// Prints the results to stdout as `url, rank, depth` lines
    pub fn print_summary(&self) {
        println!("{}", REPORT_HEADER.join(", "));
        for record in &self.records {
            println!("{}, {}, {}", record.url, record.rank, record.depth);
        }
    }
}
