//! Workbook and CSV exports.

use crate::error::Result;
use crate::format::format_nok_thousands;
use crate::model::TargetRecord;
use crate::pipeline::ClassifyOutcome;
use crate::taxonomy::Taxonomy;
use rust_xlsxwriter::{Format, Workbook, Worksheet};
use std::path::Path;

fn header_format() -> Format {
    Format::new().set_bold()
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str], format: &Format) -> Result<()> {
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, format)?;
    }
    Ok(())
}

/// Classification workbook: per-company results plus the three aggregation
/// sheets.
pub fn write_initiatives_workbook(path: &Path, outcome: &ClassifyOutcome) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = header_format();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Company Classifications")?;
    write_headers(
        worksheet,
        &[
            "Company",
            "Company ID",
            "Segment",
            "Subcategory",
            "Investment Type",
            "Investors",
            "Acquisition Date",
            "Keywords",
        ],
        &bold,
    )?;
    for (i, company) in outcome.companies.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &company.name)?;
        worksheet.write_string(row, 1, company.company_id.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 2, &company.segment)?;
        worksheet.write_string(row, 3, &company.subcategory)?;
        worksheet.write_string(row, 4, company.investment_type.to_string())?;
        worksheet.write_string(row, 5, company.investors.join(", "))?;
        let date = company
            .acquisition_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default();
        worksheet.write_string(row, 6, date)?;
        worksheet.write_string(row, 7, &company.keywords)?;
    }
    worksheet.set_column_width(0, 35)?;
    worksheet.set_column_width(2, 35)?;
    worksheet.set_column_width(5, 30)?;
    worksheet.set_column_width(7, 50)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("B&B Initiatives")?;
    write_headers(
        worksheet,
        &["Investor", "Segment", "Companies", "Portfolio Companies"],
        &bold,
    )?;
    for (i, initiative) in outcome.initiatives.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &initiative.investor)?;
        worksheet.write_string(row, 1, &initiative.segment)?;
        worksheet.write_number(row, 2, initiative.count() as f64)?;
        worksheet.write_string(row, 3, initiative.companies.join("; "))?;
    }
    worksheet.set_column_width(0, 30)?;
    worksheet.set_column_width(1, 35)?;
    worksheet.set_column_width(3, 80)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Segment Statistics")?;
    write_headers(worksheet, &["Segment", "Companies"], &bold)?;
    for (i, (segment, count)) in outcome.segment_stats.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, segment)?;
        worksheet.write_number(row, 1, *count as f64)?;
    }
    worksheet.set_column_width(0, 35)?;

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Investor Statistics")?;
    write_headers(worksheet, &["Investor", "Portfolio Companies"], &bold)?;
    for (i, (investor, total)) in outcome.investor_stats.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, investor)?;
        worksheet.write_number(row, 1, *total as f64)?;
    }
    worksheet.set_column_width(0, 30)?;

    workbook.save(path)?;
    Ok(())
}

/// Flat segment/keyword listing, one row per keyword.
pub fn write_segments_csv(path: &Path, taxonomy: &Taxonomy) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    writer.write_record(["Segment", "Keyword"])?;
    for segment in &taxonomy.segments {
        for keyword in &segment.keywords {
            writer.write_record([segment.name.as_str(), keyword.as_str()])?;
        }
    }
    writer.flush()?;
    Ok(())
}

fn acquirer_summary(target: &TargetRecord) -> String {
    if target.acquirers.is_empty() {
        return "None found".to_string();
    }
    target
        .acquirers
        .iter()
        .map(|(investor, entry)| format!("{} ({})", investor, entry.count))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Mapped targets workbook, one sheet mirroring the HTML table.
pub fn write_targets_workbook(path: &Path, targets: &[TargetRecord]) -> Result<()> {
    let mut workbook = Workbook::new();
    let bold = header_format();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name("Mapped Targets")?;
    write_headers(
        worksheet,
        &[
            "Target Company",
            "Segment",
            "Subcategory",
            "Revenue (NOK k)",
            "EBIT (NOK k)",
            "Exit Probability (%)",
            "NACE",
            "Raw Score",
            "Potential Acquirers",
        ],
        &bold,
    )?;
    for (i, target) in targets.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, &target.name)?;
        worksheet.write_string(row, 1, &target.segment)?;
        worksheet.write_string(row, 2, &target.subcategory)?;
        worksheet.write_string(row, 3, format_nok_thousands(target.revenue))?;
        worksheet.write_string(row, 4, format_nok_thousands(target.ebit))?;
        worksheet.write_number(row, 5, target.exit_probability)?;
        worksheet.write_string(row, 6, &target.nace)?;
        match target.raw_score {
            Some(score) => worksheet.write_number(row, 7, score)?,
            None => worksheet.write_string(row, 7, "")?,
        };
        worksheet.write_string(row, 8, acquirer_summary(target))?;
    }
    worksheet.set_column_width(0, 40)?;
    worksheet.set_column_width(1, 35)?;
    worksheet.set_column_width(2, 20)?;
    worksheet.set_column_width(8, 60)?;

    workbook.save(path)?;
    Ok(())
}
