//! Workbook readers: file on disk -> grid of cells.
//!
//! Two backends, selected by file extension:
//!
//! - Excel workbooks (`.xlsx`, `.xlsm`, `.xls`, `.ods`) via `calamine`,
//!   first sheet only
//! - CSV files via the `csv` crate (the header stays in the grid as row 0)
//!
//! The readers do no validation beyond structure: every cell is surfaced as a
//! [`Cell`] and the ingest pipeline decides what is usable. Failure to open
//! the file is a `ReadFailure`; unreadable structure is `MalformedWorkbook`.

use std::fs::File;
use std::path::Path;

use calamine::{Data, Reader, open_workbook_auto};

use crate::domain::Cell;
use crate::error::UploadError;

/// Read the first sheet of a workbook (or a CSV file) as a grid of rows.
pub fn read_grid(path: &Path) -> Result<Vec<Vec<Cell>>, UploadError> {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("csv") => read_csv_grid(path),
        _ => read_workbook_grid(path),
    }
}

fn read_workbook_grid(path: &Path) -> Result<Vec<Vec<Cell>>, UploadError> {
    let mut workbook = open_workbook_auto(path).map_err(|e| match e {
        calamine::Error::Io(_) => UploadError::ReadFailure,
        _ => UploadError::MalformedWorkbook,
    })?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or(UploadError::MalformedWorkbook)?
        .map_err(|_| UploadError::MalformedWorkbook)?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(convert_cell).collect())
        .collect())
}

fn convert_cell(data: &Data) -> Cell {
    match data {
        Data::Empty => Cell::Empty,
        Data::String(s) => Cell::Text(s.clone()),
        Data::Float(v) => Cell::Number(*v),
        Data::Int(v) => Cell::Number(*v as f64),
        Data::Bool(b) => Cell::Text(b.to_string()),
        // Excel serial dates render as ISO calendar dates so the ingest
        // pipeline can treat them like any other single-date cell.
        Data::DateTime(dt) => match dt.as_datetime() {
            Some(ndt) => Cell::Text(ndt.date().format("%Y-%m-%d").to_string()),
            None => Cell::Empty,
        },
        Data::DateTimeIso(s) | Data::DurationIso(s) => Cell::Text(s.clone()),
        Data::Error(_) => Cell::Empty,
    }
}

fn read_csv_grid(path: &Path) -> Result<Vec<Vec<Cell>>, UploadError> {
    let file = File::open(path).map_err(|_| UploadError::ReadFailure)?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(file);

    let mut rows = Vec::new();
    for result in reader.records() {
        let record = result.map_err(|_| UploadError::MalformedWorkbook)?;
        rows.push(
            record
                .iter()
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

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_temp_csv(name: &str, contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("ccl-trends-test-{name}-{}.csv", std::process::id()));
        let mut file = File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn csv_grid_keeps_the_header_as_row_zero() {
        let path = write_temp_csv(
            "header",
            "Date Range,CCL Index Value\n2023-01-01 to 2023-01-07,180.5\n",
        );
        let grid = read_grid(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(grid.len(), 2);
        assert_eq!(grid[0][0], Cell::Text("Date Range".to_string()));
        assert_eq!(grid[1][1], Cell::Text("180.5".to_string()));
    }

    #[test]
    fn blank_csv_fields_become_empty_cells() {
        let path = write_temp_csv("blanks", "a,b\n,   \n");
        let grid = read_grid(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(grid[1], vec![Cell::Empty, Cell::Empty]);
    }

    #[test]
    fn missing_file_is_a_read_failure() {
        let path = std::env::temp_dir().join("ccl-trends-test-definitely-missing.csv");
        assert_eq!(read_grid(&path), Err(UploadError::ReadFailure));
    }

    #[test]
    fn workbook_cells_convert_to_text_and_numbers() {
        assert_eq!(convert_cell(&Data::String("日期".to_string())), Cell::Text("日期".to_string()));
        assert_eq!(convert_cell(&Data::Float(180.5)), Cell::Number(180.5));
        assert_eq!(convert_cell(&Data::Int(181)), Cell::Number(181.0));
        assert_eq!(convert_cell(&Data::Empty), Cell::Empty);
    }
}
