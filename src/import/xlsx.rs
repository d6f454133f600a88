//! Excel/ODS rows via `calamine`. Only the first worksheet is read.

use super::{Cell, SheetReader};
use crate::error::ImportError;
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use std::path::Path;

#[derive(Debug, Clone, Copy, Default)]
pub struct XlsxSheetReader;

impl SheetReader for XlsxSheetReader {
    fn read_rows(&self, path: &Path) -> Result<Vec<Vec<Cell>>, ImportError> {
        let mut workbook =
            open_workbook_auto(path).map_err(|e| ImportError::Workbook(e.to_string()))?;
        let range = workbook
            .worksheet_range_at(0)
            .ok_or(ImportError::NoWorksheet)?
            .map_err(|e| ImportError::Workbook(e.to_string()))?;
        Ok(range
            .rows()
            .map(|row| row.iter().map(to_cell).collect())
            .collect())
    }
}

fn to_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(f) => Cell::Number(*f),
        Data::Int(i) => Cell::Number(*i as f64),
        Data::Bool(b) => Cell::Bool(*b),
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(dt) => Cell::Date(dt.date()),
            None => Cell::Number(dt.as_f64()),
        },
        Data::DateTimeIso(s) => parse_iso_date(s).map_or_else(|| Cell::Text(s.clone()), Cell::Date),
        Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(e) => Cell::Text(e.to_string()),
    }
}

fn parse_iso_date(s: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S")
        .map(|dt| dt.date())
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y-%m-%d"))
        .ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_cells() {
        assert_eq!(to_cell(&Data::Empty), Cell::Empty);
        assert_eq!(to_cell(&Data::Float(3.5)), Cell::Number(3.5));
        assert_eq!(to_cell(&Data::Int(12)), Cell::Number(12.0));
        assert_eq!(to_cell(&Data::String("Coffee".into())), Cell::Text("Coffee".into()));
    }

    #[test]
    fn excel_serial_dates_become_date_cells() {
        use calamine::{ExcelDateTime, ExcelDateTimeType};

        let day = ExcelDateTime::new(45352.0, ExcelDateTimeType::DateTime, false);
        let cell = to_cell(&Data::DateTime(day));
        assert_eq!(cell, Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()));
        assert_eq!(cell.to_text(), "2024-03-01");

        // time of day is dropped
        let afternoon = ExcelDateTime::new(45352.75, ExcelDateTimeType::DateTime, false);
        assert_eq!(to_cell(&Data::DateTime(afternoon)).to_text(), "2024-03-01");
    }

    #[test]
    fn iso_dates_become_date_cells() {
        let expected = Cell::Date(NaiveDate::from_ymd_opt(2024, 3, 1).unwrap());
        assert_eq!(to_cell(&Data::DateTimeIso("2024-03-01T00:00:00".into())), expected);
        assert_eq!(to_cell(&Data::DateTimeIso("2024-03-01".into())), expected);
        assert_eq!(
            to_cell(&Data::DateTimeIso("soon".into())),
            Cell::Text("soon".into())
        );
    }

    #[test]
    fn unreadable_workbook_is_reported() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let err = XlsxSheetReader.read_rows(file.path()).unwrap_err();
        assert!(matches!(err, ImportError::Workbook(_)));
    }
}
