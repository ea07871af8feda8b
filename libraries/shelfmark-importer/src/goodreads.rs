//! Goodreads export loading

use crate::schema::ExportSchema;
use crate::Result;
use shelfmark_core::types::SourceRecord;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::{debug, info};

/// Load a Goodreads export file
pub fn read_export(path: &Path) -> Result<Vec<SourceRecord>> {
    debug!(path = %path.display(), "Reading Goodreads export");
    let file = File::open(path)?;
    parse_export(file)
}

/// Parse Goodreads export CSV into source records, in file order
///
/// Rows without a title are skipped and counted. Ragged rows, invalid UTF-8,
/// and a header row without title/author/shelf columns are errors.
pub fn parse_export<R: Read>(reader: R) -> Result<Vec<SourceRecord>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(false)
        .from_reader(reader);

    let schema = ExportSchema::detect(csv_reader.headers()?)?;
    debug!(?schema, "Detected export columns");

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for row in csv_reader.records() {
        let row = row?;
        match schema.to_record(&row) {
            Some(record) => records.push(record),
            None => skipped += 1,
        }
    }

    let read = records.iter().filter(|r| r.is_read()).count();
    info!(
        total = records.len(),
        read,
        skipped_without_title = skipped,
        "Loaded Goodreads export"
    );

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ImportError;
    use shelfmark_core::types::ReadStatus;

    #[test]
    fn test_parse_minimal_export() {
        let csv = "Title,Author,Exclusive Shelf\n\
                   Unseen Academy,J. Author,read\n\
                   Someday,Other Person,to-read\n";

        let records = parse_export(csv.as_bytes()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "Unseen Academy");
        assert_eq!(records[0].status, ReadStatus::Read);
        assert_eq!(records[1].status, ReadStatus::NotRead);
    }

    #[test]
    fn test_rows_without_title_are_skipped() {
        let csv = "Title,Author,Exclusive Shelf\n\
                   ,Nobody,read\n\
                   Dune,Frank Herbert,read\n";

        let records = parse_export(csv.as_bytes()).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].title, "Dune");
    }

    #[test]
    fn test_ragged_rows_are_rejected() {
        let csv = "Title,Author,Exclusive Shelf\nDune,Frank Herbert\n";
        assert!(matches!(
            parse_export(csv.as_bytes()),
            Err(ImportError::Csv(_))
        ));
    }

    #[test]
    fn test_empty_input_is_rejected() {
        assert!(matches!(
            parse_export("".as_bytes()),
            Err(ImportError::MissingColumn(_))
        ));
    }
}
