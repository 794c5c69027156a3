//! Record types shared by the two pipelines.

use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fmt;

/// Composite key identifying a taxonomy cell. A real type rather than a
/// formatted string so map identity never depends on string conventions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CategoryKey {
    pub segment: String,
    pub subcategory: String,
}

impl CategoryKey {
    pub fn new(segment: &str, subcategory: &str) -> Self {
        Self {
            segment: segment.to_string(),
            subcategory: subcategory.to_string(),
        }
    }
}

/// Platform/Add-on status of an investee company, computed once per run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum InvestmentType {
    Platform,
    AddOn,
    #[default]
    Unknown,
}

impl fmt::Display for InvestmentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvestmentType::Platform => write!(f, "Platform"),
            InvestmentType::AddOn => write!(f, "Add-on"),
            InvestmentType::Unknown => write!(f, "Unknown"),
        }
    }
}

/// One row of the B&B platforms/add-ons workbook, plus derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    pub company_id: Option<String>,
    pub description: String,
    pub keywords: String,
    /// Parsed from the comma-separated investor cell; empty when the cell
    /// was blank or the column is missing.
    pub investors: Vec<String>,
    pub acquisition_date: Option<NaiveDate>,
    pub revenue: Option<f64>,
    pub ebitda: Option<f64>,
    pub segment: String,
    pub subcategory: String,
    pub investment_type: InvestmentType,
}

impl CompanyRecord {
    pub fn acquisition_year(&self) -> Option<i32> {
        use chrono::Datelike;
        self.acquisition_date.map(|d| d.year())
    }

    /// "Name (2021)" when the acquisition year is known, bare name otherwise.
    pub fn labelled_name(&self) -> String {
        match self.acquisition_year() {
            Some(year) => format!("{} ({})", self.name, year),
            None => self.name.clone(),
        }
    }
}

/// Aggregated initiative: one investor's activity within one segment.
#[derive(Debug, Clone, Serialize)]
pub struct InitiativeRow {
    pub investor: String,
    pub segment: String,
    /// Labelled company names, in acquisition-row order.
    pub companies: Vec<String>,
}

impl InitiativeRow {
    pub fn count(&self) -> usize {
        self.companies.len()
    }
}

/// Companies acquired by one investor within one (segment, subcategory).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcquirerEntry {
    /// Sorted, deduplicated company names.
    pub companies: Vec<String>,
    pub count: usize,
}

/// Per-category investor activity, ordered for deterministic output.
pub type AcquirerMap = BTreeMap<String, AcquirerEntry>;

/// One row of the target framework workbook, plus derived fields.
#[derive(Debug, Clone, Serialize)]
pub struct TargetRecord {
    pub name: String,
    pub nace: String,
    pub raw_score: Option<f64>,
    pub revenue: Option<f64>,
    pub ebit: Option<f64>,
    pub segment: String,
    pub subcategory: String,
    pub exit_probability: f64,
    pub acquirers: AcquirerMap,
}
