//! CSV rows for the importer. Every non-blank field becomes `Cell::Text`;
//! dates stay in whatever form the file wrote them.

use super::{Cell, SheetReader};
use crate::error::ImportError;
use ::csv::ReaderBuilder;
use std::path::Path;

#[derive(Debug, Clone, Copy)]
pub struct CsvSheetReader {
    delimiter: u8,
}

impl CsvSheetReader {
    /// Reader for files using `delimiter`, e.g. `b';'` for Excel exports
    /// in locales where the comma is the decimal separator.
    pub fn with_delimiter(delimiter: u8) -> Self {
        CsvSheetReader { delimiter }
    }
}

impl Default for CsvSheetReader {
    fn default() -> Self {
        CsvSheetReader { delimiter: b',' }
    }
}

impl SheetReader for CsvSheetReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<Cell>>, ImportError> {
        let mut rdr = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_path(path)?;

        let mut rows = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            rows.push(
                rec.iter()
                    .map(|field| {
                        if field.trim().is_empty() {
                            Cell::Empty
                        } else {
                            Cell::Text(field.to_string())
                        }
                    })
                    .collect(),
            );
        }
        Ok(rows)
    }
}
