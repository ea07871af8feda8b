//! Column mapping for Goodreads exports
//!
//! Goodreads has shipped several export layouts over the years. This module
//! turns whichever header row it finds into a fixed set of field accessors so
//! the loader and matcher never look at raw column names.

use crate::normalize::{clean_isbn, collapse_whitespace};
use crate::{ImportError, Result};
use csv::StringRecord;
use shelfmark_core::types::{ReadStatus, SourceRecord};

/// Shelf name that marks a book as read
const READ_SHELF: &str = "read";

/// Where the author name comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthorColumn {
    /// "Author": "First Last"
    FirstLast(usize),
    /// "Author l-f": "Last, First"
    LastFirst(usize),
}

/// Where the read/not-read status comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusColumn {
    /// "Exclusive Shelf": exactly one shelf per book
    ExclusiveShelf(usize),
    /// "Bookshelves": comma-separated shelf list
    Bookshelves(usize),
    /// "Date Read": read when non-empty
    DateRead(usize),
}

/// Resolved column positions for one export file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportSchema {
    title: usize,
    author: AuthorColumn,
    status: StatusColumn,
    isbn13: Option<usize>,
    isbn: Option<usize>,
}

impl ExportSchema {
    /// Map a header row to column positions
    ///
    /// Header names are compared case-insensitively after trimming and
    /// stripping a UTF-8 byte order mark.
    pub fn detect(headers: &StringRecord) -> Result<Self> {
        let keys: Vec<String> = headers.iter().map(header_key).collect();
        let find = |name: &str| keys.iter().position(|key| key == name);

        let title = find("title").ok_or(ImportError::MissingColumn("title"))?;

        let author = find("author")
            .map(AuthorColumn::FirstLast)
            .or_else(|| find("author l-f").map(AuthorColumn::LastFirst))
            .ok_or(ImportError::MissingColumn("author"))?;

        let status = find("exclusive shelf")
            .map(StatusColumn::ExclusiveShelf)
            .or_else(|| find("bookshelves").map(StatusColumn::Bookshelves))
            .or_else(|| find("date read").map(StatusColumn::DateRead))
            .ok_or(ImportError::MissingColumn("shelf"))?;

        Ok(Self {
            title,
            author,
            status,
            isbn13: find("isbn13"),
            isbn: find("isbn"),
        })
    }

    pub fn author_column(&self) -> AuthorColumn {
        self.author
    }

    pub fn status_column(&self) -> StatusColumn {
        self.status
    }

    /// Build a `SourceRecord` from a data row, or `None` when the title is empty
    pub fn to_record(&self, row: &StringRecord) -> Option<SourceRecord> {
        let title = collapse_whitespace(field(row, self.title));
        if title.is_empty() {
            return None;
        }

        Some(SourceRecord::new(
            title,
            self.author(row),
            self.isbn(row),
            self.status(row),
        ))
    }

    fn author(&self, row: &StringRecord) -> String {
        match self.author {
            AuthorColumn::FirstLast(idx) => collapse_whitespace(field(row, idx)),
            AuthorColumn::LastFirst(idx) => {
                let raw = collapse_whitespace(field(row, idx));
                match raw.split_once(',') {
                    Some((last, first)) if !first.trim().is_empty() => {
                        format!("{} {}", first.trim(), last.trim())
                    }
                    _ => raw,
                }
            }
        }
    }

    fn status(&self, row: &StringRecord) -> ReadStatus {
        let is_read = match self.status {
            StatusColumn::ExclusiveShelf(idx) => {
                field(row, idx).trim().eq_ignore_ascii_case(READ_SHELF)
            }
            StatusColumn::Bookshelves(idx) => field(row, idx)
                .split(',')
                .any(|shelf| shelf.trim().eq_ignore_ascii_case(READ_SHELF)),
            StatusColumn::DateRead(idx) => !field(row, idx).trim().is_empty(),
        };

        if is_read {
            ReadStatus::Read
        } else {
            ReadStatus::NotRead
        }
    }

    fn isbn(&self, row: &StringRecord) -> Option<String> {
        self.isbn13
            .and_then(|idx| clean_isbn(field(row, idx)))
            .or_else(|| self.isbn.and_then(|idx| clean_isbn(field(row, idx))))
    }
}

fn header_key(header: &str) -> String {
    header.trim_start_matches('\u{feff}').trim().to_lowercase()
}

fn field(row: &StringRecord, idx: usize) -> &str {
    row.get(idx).unwrap_or("")
}
