//! CSV output
//!
//! Append-only spreadsheet-importable view of the scraped records. The
//! header row is written once, when the file is first created; resumed runs
//! append below the existing rows.

use super::{RecordSink, SinkResult};
use crate::record::CoachRecord;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

const HEADER_ROW: [&str; 11] = [
    "First Name",
    "Last Name",
    "Full Name",
    "Certification",
    "Niche",
    "Website",
    "Email",
    "Instagram",
    "Twitter",
    "Linkedin",
    "Source URL",
];

/// Appends records as rows of a CSV file.
pub struct CsvSink {
    path: PathBuf,
}

impl CsvSink {
    /// Opens the sink, writing the header row if the file does not exist
    /// yet. An existing file is assumed to already carry the header.
    pub fn open(path: impl Into<PathBuf>) -> SinkResult<Self> {
        let path = path.into();

        if !path.is_file() {
            let header = format_row(HEADER_ROW.iter().copied());
            fs::write(&path, header)?;
            tracing::debug!(path = %path.display(), "created csv file with header row");
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordSink for CsvSink {
    fn append(&mut self, record: &CoachRecord) -> SinkResult<()> {
        let certification = record.certification_display();
        let fields = [
            record.first_name(),
            record.last_name(),
            record.full_name(),
            certification.as_str(),
            record.niche_description(),
            record.website_url(),
            record.email(),
            record.instagram_url(),
            record.twitter_url(),
            record.linkedin_url(),
            record.source_url(),
        ];

        let mut file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(&self.path)?;
        file.write_all(format_row(fields.iter().copied()).as_bytes())?;
        Ok(())
    }

    fn name(&self) -> &'static str {
        "csv"
    }
}

fn format_row<'a>(fields: impl Iterator<Item = &'a str>) -> String {
    let mut row = fields.map(escape_field).collect::<Vec<_>>().join(",");
    row.push('\n');
    row
}

/// Quotes a field when it contains a delimiter, quote, or line break, per
/// RFC 4180. Interior quotes are doubled.
fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\r', '\n']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::CoachBuilder;
    use tempfile::TempDir;

    fn sample_record(niche: &str) -> CoachRecord {
        CoachBuilder::new("https://example.com/coaches/rick")
            .first_name("Rick")
            .last_name("Sanches")
            .full_name("Rick Sanches")
            .certification("pcc")
            .niche_description(niche)
            .website_url("https://ricksanches.com")
            .email("rick@sanches.com")
            .build()
            .unwrap()
    }

    #[test]
    fn test_header_written_once() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coaches.csv");

        {
            let mut sink = CsvSink::open(&path).unwrap();
            sink.append(&sample_record("career")).unwrap();
        }
        {
            let mut sink = CsvSink::open(&path).unwrap();
            sink.append(&sample_record("life")).unwrap();
        }

        let contents = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = contents.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("First Name,Last Name,Full Name"));
        assert_eq!(
            contents.matches("First Name").count(),
            1,
            "header must appear exactly once"
        );
    }

    #[test]
    fn test_row_field_order() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coaches.csv");

        let mut sink = CsvSink::open(&path).unwrap();
        sink.append(&sample_record("career")).unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        let row = contents.lines().nth(1).unwrap();
        assert_eq!(
            row,
            "Rick,Sanches,Rick Sanches,Professional Certified Coach,career,\
             https://ricksanches.com,rick@sanches.com,,,,\
             https://example.com/coaches/rick"
        );
    }

    #[test]
    fn test_field_escaping() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("coaches.csv");

        let mut sink = CsvSink::open(&path).unwrap();
        sink.append(&sample_record("life, career, and \"mindset\""))
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("\"life, career, and \"\"mindset\"\"\""));
    }

    #[test]
    fn test_escape_field() {
        assert_eq!(escape_field("plain"), "plain");
        assert_eq!(escape_field("a,b"), "\"a,b\"");
        assert_eq!(escape_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(escape_field("line\nbreak"), "\"line\nbreak\"");
    }
}
