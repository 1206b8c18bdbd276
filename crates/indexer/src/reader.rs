use crate::{IndexerError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::collections::HashMap;
use std::path::Path;

/// Parsed report before normalization: trimmed header names plus raw cells.
/// Blank cells are `None`.
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    headers: Vec<String>,
    column_index: HashMap<String, usize>,
    rows: Vec<Vec<Option<String>>>,
}

/// One parsed row tagged with its zero-based physical row in the source file.
pub type GridRow = (usize, Vec<Option<String>>);

/// Column-name view over one raw row.
#[derive(Debug, Clone, Copy)]
pub struct RawRow<'a> {
    table: &'a RawTable,
    cells: &'a [Option<String>],
}

impl<'a> RawRow<'a> {
    /// Cell value for `column`, `None` when the column is absent or the cell blank.
    pub fn get(&self, column: &str) -> Option<&'a str> {
        let idx = *self.table.column_index.get(column)?;
        self.cells.get(idx)?.as_deref()
    }
}

impl RawTable {
    pub fn new(headers: Vec<String>, rows: Vec<Vec<Option<String>>>) -> Self {
        let headers: Vec<String> = headers
            .into_iter()
            .map(|header| header.trim_start_matches('\u{feff}').trim().to_string())
            .collect();
        let mut column_index = HashMap::new();
        for (idx, header) in headers.iter().enumerate() {
            column_index.entry(header.clone()).or_insert(idx);
        }
        Self {
            headers,
            column_index,
            rows,
        }
    }

    /// Builds a table from parsed rows: drops the first `skip_rows` physical
    /// rows, then takes the next non-blank row as the header. Physical numbering
    /// counts rows the parser never returned (blank csv lines, unused sheet rows).
    /// `None` when no header row remains.
    pub fn from_grid<I>(grid: I, skip_rows: usize) -> Option<Self>
    where
        I: IntoIterator<Item = GridRow>,
    {
        let mut grid = grid
            .into_iter()
            .filter(|(line, _)| *line >= skip_rows)
            .map(|(_, cells)| cells)
            .filter(|cells| cells.iter().any(Option::is_some));
        let header = grid.next()?;
        let headers = header.into_iter().map(Option::unwrap_or_default).collect();
        Some(Self::new(headers, grid.collect()))
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> impl Iterator<Item = RawRow<'_>> {
        self.rows.iter().map(move |cells| RawRow {
            table: self,
            cells: cells.as_slice(),
        })
    }
}

/// Reads a `.csv` or spreadsheet report into a [`RawTable`].
pub fn read_report(path: &Path, skip_rows: usize) -> Result<RawTable> {
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();
    let table = match extension.as_str() {
        "csv" => RawTable::from_grid(read_csv_grid(path)?, skip_rows),
        "xlsx" | "xlsm" | "xlsb" | "xls" | "ods" => {
            RawTable::from_grid(read_spreadsheet_grid(path)?, skip_rows)
        }
        _ => return Err(IndexerError::UnsupportedFormat(path.to_path_buf())),
    };
    let table = table.ok_or_else(|| IndexerError::MissingHeader(path.to_path_buf()))?;
    log::debug!(
        "Parsed {} rows x {} columns from {}",
        table.len(),
        table.headers().len(),
        path.display()
    );
    Ok(table)
}

// The csv reader skips empty lines, so rows are numbered from their start line.
fn read_csv_grid(path: &Path) -> Result<Vec<GridRow>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;
    let mut grid = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        let line = record
            .position()
            .and_then(|pos| usize::try_from(pos.line()).ok())
            .map_or(idx, |line| line.saturating_sub(1));
        grid.push((line, record.iter().map(cell_from_text).collect()));
    }
    Ok(grid)
}

// A worksheet range begins at its first used cell, not at row 0.
fn read_spreadsheet_grid(path: &Path) -> Result<Vec<GridRow>> {
    let mut workbook = open_workbook_auto(path)?;
    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| IndexerError::MissingHeader(path.to_path_buf()))??;
    let first_row = range.start().map_or(0, |(row, _)| row as usize);
    Ok(range
        .rows()
        .enumerate()
        .map(|(idx, row)| (first_row + idx, row.iter().map(cell_from_data).collect()))
        .collect())
}

fn cell_from_text(raw: &str) -> Option<String> {
    (!raw.trim().is_empty()).then(|| raw.to_string())
}

fn cell_from_data(cell: &Data) -> Option<String> {
    match cell {
        Data::Empty => None,
        Data::String(text) => cell_from_text(text),
        Data::Float(value) if value.fract() == 0.0 => Some(format!("{value:.0}")),
        other => cell_from_text(&other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rust_xlsxwriter::Workbook;
    use tempfile::TempDir;

    #[test]
    fn csv_skips_banner_and_trims_headers() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.csv");
        std::fs::write(
            &path,
            "Workforce Report,,\n Employee ID ,Preferred Name,Worker Type\nE-1,Ada,  \n,,\n7,Bo,Employee\n",
        )
        .expect("write");

        let table = read_report(&path, 1).expect("read");
        assert_eq!(table.headers(), ["Employee ID", "Preferred Name", "Worker Type"]);
        assert_eq!(table.len(), 2);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("Employee ID"), Some("E-1"));
        assert_eq!(rows[0].get("Worker Type"), None);
        assert_eq!(rows[1].get("Preferred Name"), Some("Bo"));
        assert_eq!(rows[1].get("Missing Column"), None);
    }

    #[test]
    fn csv_blank_banner_line_still_counts_as_skipped() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.csv");
        std::fs::write(&path, "\nEmployee ID,Preferred Name\n1001,Ada\n").expect("write");

        let table = read_report(&path, 1).expect("read");
        assert_eq!(table.headers(), ["Employee ID", "Preferred Name"]);
        assert_eq!(table.len(), 1);
        assert_eq!(table.rows().next().and_then(|r| r.get("Employee ID")), Some("1001"));
    }

    fn write_xlsx(path: &Path, banner: Option<&str>) {
        let mut workbook = Workbook::new();
        let sheet = workbook.add_worksheet();
        if let Some(banner) = banner {
            sheet.write_string(0, 0, banner).expect("banner");
        }
        for (col, header) in ["Employee ID", "Preferred Name", "Organization Manager Employee ID"]
            .into_iter()
            .enumerate()
        {
            sheet
                .write_string(1, col as u16, header)
                .expect("header");
        }
        sheet.write_number(2, 0, 1234567).expect("id");
        sheet.write_string(2, 1, "   ").expect("blank name");
        sheet.write_number(2, 2, 7654321.0).expect("manager id");
        sheet.write_number(4, 0, 42.5).expect("fractional id");
        sheet.write_string(4, 1, "Bo").expect("name");
        workbook.save(path).expect("save workbook");
    }

    #[test]
    fn xlsx_renders_numbers_and_blank_cells() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.xlsx");
        write_xlsx(&path, Some("Workforce Report"));

        let table = read_report(&path, 1).expect("read");
        assert_eq!(
            table.headers(),
            ["Employee ID", "Preferred Name", "Organization Manager Employee ID"]
        );
        assert_eq!(table.len(), 2);

        let rows: Vec<_> = table.rows().collect();
        assert_eq!(rows[0].get("Employee ID"), Some("1234567"));
        assert_eq!(rows[0].get("Preferred Name"), None);
        assert_eq!(rows[0].get("Organization Manager Employee ID"), Some("7654321"));
        assert_eq!(rows[1].get("Employee ID"), Some("42.5"));
        assert_eq!(rows[1].get("Organization Manager Employee ID"), None);
    }

    #[test]
    fn xlsx_blank_banner_row_still_counts_as_skipped() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.xlsx");
        write_xlsx(&path, None);

        let table = read_report(&path, 1).expect("read");
        assert_eq!(table.headers()[0], "Employee ID");
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn from_grid_counts_physical_rows() {
        let cells = |text: &str| vec![Some(text.to_string())];
        let table = RawTable::from_grid(vec![(1, cells("Header")), (2, cells("value"))], 1)
            .expect("table");
        assert_eq!(table.headers(), ["Header"]);
        assert_eq!(table.len(), 1);

        let table = RawTable::from_grid(vec![(0, cells("Banner")), (1, cells("Header"))], 1)
            .expect("table");
        assert_eq!(table.headers(), ["Header"]);
        assert!(table.is_empty());
    }

    #[test]
    fn short_rows_read_as_blank() {
        let table = RawTable::from_grid(
            vec![
                (0, vec![Some("A".to_string()), Some("B".to_string())]),
                (1, vec![Some("1".to_string())]),
            ],
            0,
        )
        .expect("table");
        let row = table.rows().next().expect("row");
        assert_eq!(row.get("A"), Some("1"));
        assert_eq!(row.get("B"), None);
    }

    #[test]
    fn unsupported_extension_is_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.json");
        std::fs::write(&path, "{}").expect("write");
        let err = read_report(&path, 1).expect_err("unsupported");
        assert!(matches!(err, IndexerError::UnsupportedFormat(_)));
    }

    #[test]
    fn file_without_header_row_is_rejected() {
        let temp = TempDir::new().expect("tempdir");
        let path = temp.path().join("report.csv");
        std::fs::write(&path, "Only a banner\n").expect("write");
        let err = read_report(&path, 1).expect_err("no header");
        assert!(matches!(err, IndexerError::MissingHeader(_)));
    }
}
