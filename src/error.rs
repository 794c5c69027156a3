use thiserror::Error;

#[derive(Error, Debug)]
pub enum BbMapError {
    #[error("config error: {0}")]
    Config(String),

    #[error("input file not found: {0}")]
    FileNotFound(String),

    #[error("sheet '{0}' not found in workbook {1}")]
    SheetNotFound(String, String),

    #[error("required column missing: {missing} (resolved headers: {headers})")]
    MissingColumn { missing: String, headers: String },

    #[error("invalid taxonomy keyword pattern: {0}")]
    Taxonomy(String),

    #[error("spreadsheet read error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("workbook write error: {0}")]
    Excel(#[from] rust_xlsxwriter::XlsxError),

    #[error("CSV write error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BbMapError>;
