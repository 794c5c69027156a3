use crate::error::{BbMapError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Input/output locations and the fixed header-row offsets of the source
/// workbooks. Defaults reproduce the layout the analysis files have always
/// shipped with: the B&B exports (platforms and investors) carry six banner
/// rows above their header, the target framework three.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub platforms_file: PathBuf,
    pub platforms_sheet: String,
    pub platforms_header_row: usize,

    pub investors_file: PathBuf,
    pub investors_header_row: usize,

    pub targets_file: PathBuf,
    pub targets_sheet: String,
    pub targets_header_row: usize,

    pub output_dir: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            platforms_file: PathBuf::from("B&B platforms and addons.xlsx"),
            platforms_sheet: "Data".into(),
            platforms_header_row: 6,
            investors_file: PathBuf::from("B&B investors.xlsx"),
            investors_header_row: 6,
            targets_file: PathBuf::from("main_target_framework.xlsx"),
            targets_sheet: "Main".into(),
            targets_header_row: 3,
            output_dir: PathBuf::from("."),
        }
    }
}

impl Config {
    /// Load from a JSON file when given, otherwise fall back to defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => {
                let content = std::fs::read_to_string(p)?;
                let config: Config = serde_json::from_str(&content)
                    .map_err(|e| BbMapError::Config(format!("{}: {}", p.display(), e)))?;
                Ok(config)
            }
            None => Ok(Self::default()),
        }
    }

    pub fn initiatives_workbook(&self) -> PathBuf {
        self.output_dir.join("bb_initiatives_overview.xlsx")
    }

    pub fn initiatives_html(&self) -> PathBuf {
        self.output_dir.join("bb_initiatives_overview.html")
    }

    pub fn segments_csv(&self) -> PathBuf {
        self.output_dir.join("construction_segments.csv")
    }

    pub fn targets_html(&self) -> PathBuf {
        self.output_dir.join("potential_targets_overview.html")
    }

    pub fn targets_workbook(&self) -> PathBuf {
        self.output_dir.join("mapped_targets_output.xlsx")
    }
}
