//! Workbook ingestion.
//!
//! The source workbooks carry banner rows above their real header, so every
//! sheet is read at a configured header-row offset. Key columns are resolved
//! by case-insensitive matching against the header text; optional columns
//! degrade with a warning while base-required columns are fatal. Unparseable
//! numbers and dates fall back to `None` per row, never aborting the batch.

use crate::error::{BbMapError, Result};
use crate::model::CompanyRecord;
use calamine::{open_workbook_auto, Data, DataType, Reader};
use chrono::NaiveDate;
use std::path::Path;

/// Resolved header row of one sheet.
pub struct HeaderIndex {
    headers: Vec<String>,
}

impl HeaderIndex {
    fn new(cells: &[Data]) -> Self {
        Self {
            headers: cells.iter().map(cell_text).collect(),
        }
    }

    /// First column whose header contains `needle`, case-insensitively.
    pub fn find_contains(&self, needle: &str) -> Option<usize> {
        let needle = needle.to_lowercase();
        self.headers
            .iter()
            .position(|h| h.to_lowercase().contains(&needle))
    }

    /// First column whose header equals `name`, case-insensitively.
    pub fn find_exact(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.headers.iter().position(|h| h.to_lowercase() == name)
    }

    pub fn joined(&self) -> String {
        self.headers
            .iter()
            .filter(|h| !h.is_empty())
            .cloned()
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Rows of one sheet below the header, with empty rows dropped.
pub struct SheetTable {
    pub header: HeaderIndex,
    pub rows: Vec<Vec<Data>>,
}

pub fn load_sheet(path: &Path, sheet: Option<&str>, header_row: usize) -> Result<SheetTable> {
    if !path.exists() {
        return Err(BbMapError::FileNotFound(path.display().to_string()));
    }

    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_vec();
    let sheet_name = match sheet {
        Some(name) => {
            if !sheet_names.iter().any(|n| n == name) {
                return Err(BbMapError::SheetNotFound(
                    name.to_string(),
                    path.display().to_string(),
                ));
            }
            name.to_string()
        }
        None => sheet_names.first().cloned().ok_or_else(|| {
            BbMapError::SheetNotFound("<first>".into(), path.display().to_string())
        })?,
    };

    let range = workbook.worksheet_range(&sheet_name)?;
    let mut rows_iter = range.rows().skip(header_row);

    let header = match rows_iter.next() {
        Some(cells) => HeaderIndex::new(cells),
        None => HeaderIndex::new(&[]),
    };

    let rows = rows_iter
        .filter(|row| row.iter().any(|c| !cell_text(c).is_empty()))
        .map(|row| row.to_vec())
        .collect();

    Ok(SheetTable { header, rows })
}

pub fn cell_text(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        _ => cell.to_string().trim().to_string(),
    }
}

/// Coerce a cell to a number. Strings are cleaned of currency symbols,
/// grouping characters and `k`/`m` unit suffixes before parsing.
pub fn cell_number(cell: &Data) -> Option<f64> {
    match cell {
        Data::Float(f) => Some(*f),
        Data::Int(i) => Some(*i as f64),
        Data::String(s) => parse_numeric_text(s),
        _ => None,
    }
}

fn parse_numeric_text(s: &str) -> Option<f64> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return None;
    }
    let negative = trimmed.starts_with('-');
    let cleaned: String = trimmed
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .map(|v| if negative { -v } else { v })
}

const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y", "%d/%m/%Y", "%Y/%m/%d"];

/// Coerce a cell to a calendar date. Handles native Excel datetimes and the
/// string formats seen in the source exports.
pub fn cell_date(cell: &Data) -> Option<NaiveDate> {
    if let Some(dt) = cell.as_datetime() {
        return Some(dt.date());
    }
    if let Data::String(s) = cell {
        let s = s.trim();
        for format in DATE_FORMATS {
            if let Ok(date) = NaiveDate::parse_from_str(s, format) {
                return Some(date);
            }
        }
        // Datetime strings: keep the date part.
        if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
            return Some(dt.date());
        }
    }
    None
}

fn split_investors(cell: &str) -> Vec<String> {
    cell.split(',')
        .map(|inv| inv.trim())
        .filter(|inv| !inv.is_empty() && !inv.eq_ignore_ascii_case("nan"))
        .map(|inv| inv.to_string())
        .collect()
}

/// The B&B platforms/add-ons sheet with column-availability flags.
pub struct PlatformSheet {
    pub companies: Vec<CompanyRecord>,
    pub has_investor_column: bool,
    pub has_date_column: bool,
    pub has_revenue_column: bool,
    pub has_ebitda_column: bool,
}

pub fn load_platforms(path: &Path, sheet: &str, header_row: usize) -> Result<PlatformSheet> {
    let table = load_sheet(path, Some(sheet), header_row)?;
    let header = &table.header;

    let col_name = require_column(header, header.find_exact("Companies"), "Companies")?;
    let col_keywords = require_column(header, header.find_exact("Keywords"), "Keywords")?;
    let col_description =
        require_column(header, header.find_exact("Description"), "Description")?;

    let col_id = header.find_exact("Company ID");
    let col_investors = header.find_contains("investor");
    let col_date = header.find_contains("financing date");
    let col_revenue = header.find_contains("revenue");
    let col_ebitda = header.find_contains("ebitda");

    warn_if_missing(col_investors, "investor list", "acquirer aggregation disabled");
    warn_if_missing(col_date, "financing date", "platform/add-on tagging falls back to row order");
    warn_if_missing(col_revenue, "revenue", "revenue shown as N/A");
    warn_if_missing(col_ebitda, "EBITDA", "EBITDA shown as N/A");

    let mut companies = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let name = cell_text(cell_at(row, col_name));
        if name.is_empty() {
            continue;
        }

        let investors = col_investors
            .map(|c| split_investors(&cell_text(cell_at(row, c))))
            .unwrap_or_default();

        companies.push(CompanyRecord {
            name,
            company_id: col_id
                .map(|c| cell_text(cell_at(row, c)))
                .filter(|id| !id.is_empty()),
            description: cell_text(cell_at(row, col_description)),
            keywords: cell_text(cell_at(row, col_keywords)),
            investors,
            acquisition_date: col_date.and_then(|c| cell_date(cell_at(row, c))),
            revenue: col_revenue.and_then(|c| cell_number(cell_at(row, c))),
            ebitda: col_ebitda.and_then(|c| cell_number(cell_at(row, c))),
            segment: String::new(),
            subcategory: String::new(),
            investment_type: Default::default(),
        });
    }

    Ok(PlatformSheet {
        companies,
        has_investor_column: col_investors.is_some(),
        has_date_column: col_date.is_some(),
        has_revenue_column: col_revenue.is_some(),
        has_ebitda_column: col_ebitda.is_some(),
    })
}

/// One row of the target framework sheet before classification.
pub struct RawTarget {
    pub name: String,
    pub nace: String,
    pub raw_score: Option<f64>,
    pub revenue: Option<f64>,
    pub ebit: Option<f64>,
}

pub fn load_targets(path: &Path, sheet: &str, header_row: usize) -> Result<Vec<RawTarget>> {
    let table = load_sheet(path, Some(sheet), header_row)?;
    let header = &table.header;

    let col_name = require_column(
        header,
        header.find_contains("juridisk selskapsnavn"),
        "juridisk selskapsnavn",
    )?;
    let col_nace = require_column(
        header,
        header.find_contains("nace-bransjekode"),
        "nace-bransjekode",
    )?;
    let col_score =
        require_column(header, header.find_contains("total score"), "total score")?;

    let col_revenue = header.find_exact("Sum driftsinnt., 2023");
    let col_ebit = header.find_exact("Driftsres., 2023");
    warn_if_missing(col_revenue, "'Sum driftsinnt., 2023'", "revenue shown as N/A");
    warn_if_missing(col_ebit, "'Driftsres., 2023'", "EBIT shown as N/A");

    let mut targets = Vec::with_capacity(table.rows.len());
    for row in &table.rows {
        let name = cell_text(cell_at(row, col_name));
        if name.is_empty() {
            continue;
        }
        targets.push(RawTarget {
            name,
            nace: cell_text(cell_at(row, col_nace)),
            raw_score: cell_number(cell_at(row, col_score)),
            revenue: col_revenue.and_then(|c| cell_number(cell_at(row, c))),
            ebit: col_ebit.and_then(|c| cell_number(cell_at(row, c))),
        });
    }

    Ok(targets)
}

/// Record count of the optional investors workbook; `None` when absent.
pub fn count_investors(path: &Path, header_row: usize) -> Option<usize> {
    match load_sheet(path, None, header_row) {
        Ok(table) => Some(table.rows.len()),
        Err(e) => {
            eprintln!("Warning: investors workbook skipped: {}", e);
            None
        }
    }
}

fn require_column(
    header: &HeaderIndex,
    column: Option<usize>,
    name: &str,
) -> Result<usize> {
    column.ok_or_else(|| BbMapError::MissingColumn {
        missing: name.to_string(),
        headers: header.joined(),
    })
}

fn warn_if_missing(column: Option<usize>, name: &str, consequence: &str) {
    if column.is_none() {
        eprintln!("Warning: column {} not found; {}", name, consequence);
    }
}

static EMPTY_CELL: Data = Data::Empty;

fn cell_at(row: &[Data], index: usize) -> &Data {
    row.get(index).unwrap_or(&EMPTY_CELL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_numeric_text() {
        assert_eq!(parse_numeric_text("1234.5"), Some(1234.5));
        assert_eq!(parse_numeric_text("NOK 12 345"), Some(12345.0));
        assert_eq!(parse_numeric_text("€45m"), Some(45.0));
        assert_eq!(parse_numeric_text("1,200k"), Some(1200.0));
        assert_eq!(parse_numeric_text("-350"), Some(-350.0));
        assert_eq!(parse_numeric_text("n/a"), None);
        assert_eq!(parse_numeric_text(""), None);
    }

    #[test]
    fn test_cell_number_variants() {
        assert_eq!(cell_number(&Data::Float(3.5)), Some(3.5));
        assert_eq!(cell_number(&Data::Int(7)), Some(7.0));
        assert_eq!(cell_number(&Data::String("8.1".into())), Some(8.1));
        assert_eq!(cell_number(&Data::Empty), None);
        assert_eq!(cell_number(&Data::Bool(true)), None);
    }

    #[test]
    fn test_cell_date_strings() {
        let expected = NaiveDate::from_ymd_opt(2021, 3, 15).unwrap();
        assert_eq!(cell_date(&Data::String("2021-03-15".into())), Some(expected));
        assert_eq!(cell_date(&Data::String("15.03.2021".into())), Some(expected));
        assert_eq!(cell_date(&Data::String("not a date".into())), None);
        assert_eq!(cell_date(&Data::Empty), None);
    }

    #[test]
    fn test_split_investors() {
        assert_eq!(
            split_investors("Alpha Capital, Beta Invest ,  Gamma"),
            vec!["Alpha Capital", "Beta Invest", "Gamma"]
        );
        assert!(split_investors("").is_empty());
        assert!(split_investors("nan").is_empty());
    }

    #[test]
    fn test_header_index_matching() {
        let header = HeaderIndex::new(&[
            Data::String("Companies".into()),
            Data::String("All investors".into()),
            Data::String("Last Financing Date".into()),
        ]);
        assert_eq!(header.find_exact("companies"), Some(0));
        assert_eq!(header.find_contains("investor"), Some(1));
        assert_eq!(header.find_contains("financing date"), Some(2));
        assert_eq!(header.find_contains("ebitda"), None);
    }
}
