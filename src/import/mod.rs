// Spreadsheet import: turn rows of (Date, Concept, Amount, [Category])
// into expense movements and submit them with one bulk request.
//
// Reading the file is delegated to a `SheetReader`, so the import routine
// does not care whether the rows came from CSV, Excel or a test fixture.
// Which readers exist depends on the enabled cargo features.

pub mod csv;
#[cfg(feature = "xlsx")]
pub mod xlsx;

use crate::api::ApiClient;
use crate::error::ImportError;
use crate::model::{CreateResponse, MovementKind, NewMovement};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, info};

pub use self::csv::CsvSheetReader;
#[cfg(feature = "xlsx")]
pub use self::xlsx::XlsxSheetReader;

const DATE_COL: usize = 0;
const CONCEPT_COL: usize = 1;
const AMOUNT_COL: usize = 2;

static EMPTY: Cell = Cell::Empty;

/// A single spreadsheet cell, as typed as the source format allows.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl Cell {
    /// Missing cells and blank text both count as empty.
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            Cell::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// Literal string form of the cell; dates are rendered `YYYY-MM-DD`.
    pub fn to_text(&self) -> String {
        match self {
            Cell::Empty => String::new(),
            Cell::Text(s) => s.clone(),
            Cell::Number(n) => n.to_string(),
            Cell::Bool(b) => b.to_string(),
            Cell::Date(d) => d.format("%Y-%m-%d").to_string(),
        }
    }

    /// Empty, or a numeric zero: spreadsheets often hold 0 where nothing
    /// was entered, and the API refuses non-positive amounts.
    fn is_missing_amount(&self) -> bool {
        self.is_empty() || matches!(self, Cell::Number(n) if *n == 0.0)
    }

    /// Finite number from the cell; NaN and infinities would go out as
    /// JSON `null`.
    fn to_amount(&self, row: usize) -> Result<f64, ImportError> {
        let invalid = || ImportError::InvalidAmount {
            row,
            value: self.to_text(),
        };
        let amount = match self {
            Cell::Number(n) => *n,
            Cell::Text(s) => s.trim().parse::<f64>().map_err(|_| invalid())?,
            _ => return Err(invalid()),
        };
        if amount.is_finite() {
            Ok(amount)
        } else {
            Err(invalid())
        }
    }
}

/// Source of spreadsheet rows. The first row returned is the header.
pub trait SheetReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<Cell>>, ImportError>;
}

/// Pick a reader from the file extension. Formats whose reader was not
/// compiled in yield `ImportError::ReaderUnavailable`.
pub fn reader_for_path(path: &Path) -> Result<Box<dyn SheetReader>, ImportError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    match ext.as_str() {
        "csv" => Ok(Box::new(CsvSheetReader::default())),
        #[cfg(feature = "xlsx")]
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => Ok(Box::new(XlsxSheetReader)),
        _ => Err(ImportError::ReaderUnavailable(if ext.is_empty() {
            "extensionless".into()
        } else {
            format!(".{ext}")
        })),
    }
}

/// Map data rows (header skipped) to expense movements for `account_id`.
/// Rows without a date or an amount (a numeric 0 counts as none) are dropped.
pub fn rows_to_movements(
    rows: &[Vec<Cell>],
    account_id: &str,
) -> Result<Vec<NewMovement>, ImportError> {
    let mut movements = Vec::new();
    for (idx, row) in rows.iter().enumerate().skip(1) {
        let cell = |col: usize| row.get(col).unwrap_or(&EMPTY);
        let (date, amount) = (cell(DATE_COL), cell(AMOUNT_COL));
        // 1-based row number as shown by spreadsheet apps
        let row_no = idx + 1;
        if date.is_empty() || amount.is_missing_amount() {
            debug!(row = row_no, "skipping row without date or amount");
            continue;
        }
        let concept = cell(CONCEPT_COL);
        let description = if concept.is_empty() {
            String::new()
        } else {
            concept.to_text()
        };
        movements.push(
            NewMovement::new(
                MovementKind::Expense,
                amount.to_amount(row_no)?,
                date.to_text(),
                account_id,
            )
            .with_description(description),
        );
    }
    Ok(movements)
}

/// What an import run ended with.
#[derive(Debug, Clone, PartialEq)]
pub enum ImportOutcome {
    /// No valid rows were found; nothing was sent.
    NothingToImport,
    Imported(CreateResponse),
}

/// Read `path` with `reader`, build the movements and submit them in bulk.
pub fn import_file(
    api: &ApiClient,
    reader: &dyn SheetReader,
    path: &Path,
    account_id: &str,
) -> Result<ImportOutcome, ImportError> {
    let rows = reader.read_rows(path)?;
    let movements = rows_to_movements(&rows, account_id)?;
    info!(path = %path.display(), rows = rows.len(), valid = movements.len(), "parsed spreadsheet");
    if movements.is_empty() {
        return Ok(ImportOutcome::NothingToImport);
    }
    let resp = api.create_movements_bulk(&movements)?;
    Ok(ImportOutcome::Imported(resp))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> Cell {
        Cell::Date(NaiveDate::from_ymd_opt(y, m, d).unwrap())
    }

    fn text(s: &str) -> Cell {
        Cell::Text(s.into())
    }

    fn header() -> Vec<Cell> {
        vec![text("Fecha"), text("Concepto"), text("Importe"), text("Categoría")]
    }

    #[test]
    fn mixed_rows_keep_only_complete_ones() {
        let rows = vec![
            header(),
            vec![date(2024, 3, 1), text("Coffee"), Cell::Number(3.5)],
            vec![Cell::Empty, text("Bad"), Cell::Number(10.0)],
            vec![date(2024, 3, 2), text("Lunch"), Cell::Empty],
            vec![date(2024, 3, 3), text(""), Cell::Number(12.0)],
        ];
        let movements = rows_to_movements(&rows, "X").unwrap();
        let payload = serde_json::to_value(&movements).unwrap();
        assert_eq!(
            payload,
            json!([
                {"kind": "expense", "amount": 3.5, "date": "2024-03-01", "account_id": "X", "description": "Coffee"},
                {"kind": "expense", "amount": 12.0, "date": "2024-03-03", "account_id": "X", "description": ""}
            ])
        );
    }

    #[test]
    fn text_cells_are_used_literally() {
        let rows = vec![
            header(),
            vec![text("01/03/2024"), Cell::Empty, text(" 7.25 ")],
        ];
        let movements = rows_to_movements(&rows, "acc").unwrap();
        assert_eq!(movements[0].date, "01/03/2024");
        assert_eq!(movements[0].amount, 7.25);
        assert_eq!(movements[0].description.as_deref(), Some(""));
    }

    #[test]
    fn short_rows_are_skipped() {
        let rows = vec![header(), vec![date(2024, 3, 1)], vec![]];
        assert!(rows_to_movements(&rows, "acc").unwrap().is_empty());
    }

    #[test]
    fn header_only_yields_nothing() {
        assert!(rows_to_movements(&[header()], "acc").unwrap().is_empty());
        assert!(rows_to_movements(&[], "acc").unwrap().is_empty());
    }

    #[test]
    fn zero_amount_rows_are_dropped() {
        let rows = vec![
            header(),
            vec![date(2024, 3, 1), text("Free"), Cell::Number(0.0)],
            vec![date(2024, 3, 1), text("Coffee"), Cell::Number(3.5)],
            vec![date(2024, 3, 2), text("Refund"), Cell::Number(-0.0)],
            vec![date(2024, 3, 3), text("Tea"), Cell::Number(2.0)],
        ];
        let movements = rows_to_movements(&rows, "X").unwrap();
        let descriptions: Vec<_> = movements
            .iter()
            .map(|m| m.description.as_deref().unwrap_or_default())
            .collect();
        assert_eq!(descriptions, vec!["Coffee", "Tea"]);
    }

    #[test]
    fn non_finite_amounts_are_rejected() {
        for value in ["NaN", "inf", "-infinity"] {
            let rows = vec![header(), vec![date(2024, 3, 1), text("Odd"), text(value)]];
            match rows_to_movements(&rows, "acc") {
                Err(ImportError::InvalidAmount { row, value: got }) => {
                    assert_eq!(row, 2);
                    assert_eq!(got, value);
                }
                other => panic!("{value}: unexpected {other:?}"),
            }
        }
        let rows = vec![header(), vec![date(2024, 3, 1), text("Odd"), Cell::Number(f64::NAN)]];
        assert!(matches!(
            rows_to_movements(&rows, "acc"),
            Err(ImportError::InvalidAmount { row: 2, .. })
        ));
    }

    #[test]
    fn non_numeric_amount_reports_row() {
        let rows = vec![header(), vec![date(2024, 3, 1), text("Tea"), text("abc")]];
        match rows_to_movements(&rows, "acc") {
            Err(ImportError::InvalidAmount { row, value }) => {
                assert_eq!(row, 2);
                assert_eq!(value, "abc");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn numeric_concept_becomes_text() {
        let rows = vec![header(), vec![date(2024, 3, 1), Cell::Number(42.0), Cell::Number(1.0)]];
        let movements = rows_to_movements(&rows, "acc").unwrap();
        assert_eq!(movements[0].description.as_deref(), Some("42"));
    }

    #[test]
    fn reader_picked_by_extension() {
        assert!(reader_for_path(Path::new("gastos.CSV")).is_ok());
        assert!(matches!(
            reader_for_path(Path::new("gastos.txt")),
            Err(ImportError::ReaderUnavailable(ext)) if ext == ".txt"
        ));
        assert!(matches!(
            reader_for_path(Path::new("gastos")),
            Err(ImportError::ReaderUnavailable(_))
        ));
    }

    #[cfg(feature = "xlsx")]
    #[test]
    fn excel_reader_available_with_feature() {
        assert!(reader_for_path(Path::new("gastos.xlsx")).is_ok());
    }

    #[cfg(not(feature = "xlsx"))]
    #[test]
    fn excel_reader_missing_without_feature() {
        assert!(matches!(
            reader_for_path(Path::new("gastos.xlsx")),
            Err(ImportError::ReaderUnavailable(_))
        ));
    }
}
