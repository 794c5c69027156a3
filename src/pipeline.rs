//! Pipeline orchestration: load → classify → aggregate → render → write.
//!
//! Both pipelines are single linear passes; everything is recomputed from the
//! source workbooks on every run and outputs are overwritten in place, so a
//! rerun on unchanged inputs reproduces the previous results (timestamp
//! footers aside).

use crate::acquirers::AcquirerLookup;
use crate::classify::{Classifier, MatchMode};
use crate::config::Config;
use crate::error::Result;
use crate::export;
use crate::ingest;
use crate::model::{CompanyRecord, InitiativeRow, TargetRecord};
use crate::nace::NaceTable;
use crate::platform;
use crate::report;
use crate::score;
use crate::taxonomy::{Taxonomy, GENERAL_SUBCATEGORY};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

/// Classified B&B dataset plus its aggregations.
#[derive(Debug, Serialize)]
pub struct ClassifyOutcome {
    pub companies: Vec<CompanyRecord>,
    pub initiatives: Vec<InitiativeRow>,
    /// (segment, company count), descending by count.
    pub segment_stats: Vec<(String, usize)>,
    /// (investor, total companies), descending by total.
    pub investor_stats: Vec<(String, usize)>,
}

impl ClassifyOutcome {
    pub fn distinct_investors(&self) -> usize {
        self.initiatives
            .iter()
            .map(|i| i.investor.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }

    pub fn distinct_segments(&self) -> usize {
        self.companies
            .iter()
            .map(|c| c.segment.as_str())
            .collect::<BTreeSet<_>>()
            .len()
    }
}

/// Run the B&B classification pipeline over the platforms workbook.
pub fn run_classify(config: &Config, taxonomy: &Taxonomy) -> Result<ClassifyOutcome> {
    let sheet = ingest::load_platforms(
        &config.platforms_file,
        &config.platforms_sheet,
        config.platforms_header_row,
    )?;
    let mut companies = sheet.companies;

    let classifier = Classifier::new(taxonomy, MatchMode::WholeWord)?;
    for company in &mut companies {
        let (segment, subcategory) = classifier.classify(&company.keywords, &company.description);
        company.segment = segment;
        company.subcategory = subcategory;
    }

    platform::tag_investment_types(&mut companies);

    let initiatives = build_initiatives(&companies);
    let segment_stats = segment_statistics(&companies);
    let investor_stats = investor_statistics(&initiatives);

    Ok(ClassifyOutcome {
        companies,
        initiatives,
        segment_stats,
        investor_stats,
    })
}

/// One initiative per (investor, segment) pair, companies in row order,
/// sorted by investor ascending then portfolio size descending.
fn build_initiatives(companies: &[CompanyRecord]) -> Vec<InitiativeRow> {
    let mut grouped: BTreeMap<(String, String), Vec<String>> = BTreeMap::new();
    for company in companies {
        for investor in &company.investors {
            grouped
                .entry((investor.clone(), company.segment.clone()))
                .or_default()
                .push(company.labelled_name());
        }
    }

    let mut rows: Vec<InitiativeRow> = grouped
        .into_iter()
        .map(|((investor, segment), companies)| InitiativeRow {
            investor,
            segment,
            companies,
        })
        .collect();

    rows.sort_by(|a, b| {
        a.investor
            .cmp(&b.investor)
            .then(b.count().cmp(&a.count()))
            .then(a.segment.cmp(&b.segment))
    });
    rows
}

fn segment_statistics(companies: &[CompanyRecord]) -> Vec<(String, usize)> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for company in companies {
        *counts.entry(company.segment.as_str()).or_default() += 1;
    }
    let mut stats: Vec<(String, usize)> = counts
        .into_iter()
        .map(|(segment, n)| (segment.to_string(), n))
        .collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    stats
}

fn investor_statistics(initiatives: &[InitiativeRow]) -> Vec<(String, usize)> {
    let mut totals: BTreeMap<&str, usize> = BTreeMap::new();
    for initiative in initiatives {
        *totals.entry(initiative.investor.as_str()).or_default() += initiative.count();
    }
    let mut stats: Vec<(String, usize)> = totals
        .into_iter()
        .map(|(investor, n)| (investor.to_string(), n))
        .collect();
    stats.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    stats
}

/// Write the initiatives workbook, segment keyword CSV and HTML dashboard.
pub fn write_classify_outputs(
    config: &Config,
    outcome: &ClassifyOutcome,
    taxonomy: &Taxonomy,
) -> Result<()> {
    export::write_initiatives_workbook(&config.initiatives_workbook(), outcome)?;
    export::write_segments_csv(&config.segments_csv(), taxonomy)?;

    let generated_at = chrono::Local::now().format("%Y-%m-%d").to_string();
    let html = report::initiatives::render(outcome, &generated_at);
    std::fs::write(config.initiatives_html(), html)?;
    Ok(())
}

/// Mapped target dataset.
#[derive(Debug, Serialize)]
pub struct TargetsOutcome {
    /// Relevant targets, sorted by descending exit probability.
    pub targets: Vec<TargetRecord>,
    pub total_loaded: usize,
    pub dropped_unmapped: usize,
    pub dropped_general: usize,
}

/// Run the target mapping pipeline: NACE-classify the target framework and
/// cross-reference against acquirers derived from the B&B workbook.
pub fn run_map_targets(config: &Config, taxonomy: &Taxonomy) -> Result<TargetsOutcome> {
    // The acquirer lookup is built from the keyword-classified B&B dataset.
    let bb = run_classify(config, taxonomy)?;
    let lookup = AcquirerLookup::build(&bb.companies);

    let raw_targets = ingest::load_targets(
        &config.targets_file,
        &config.targets_sheet,
        config.targets_header_row,
    )?;
    let nace = NaceTable::construction();

    Ok(map_targets(raw_targets, &nace, &lookup))
}

/// Pure mapping step, separated from workbook I/O for testability.
pub fn map_targets(
    raw_targets: Vec<ingest::RawTarget>,
    nace: &NaceTable,
    lookup: &AcquirerLookup,
) -> TargetsOutcome {
    let total_loaded = raw_targets.len();
    let mut dropped_unmapped = 0;
    let mut dropped_general = 0;

    let mut targets: Vec<TargetRecord> = Vec::new();
    for raw in raw_targets {
        let Some(category) = nace.lookup_text(&raw.nace) else {
            dropped_unmapped += 1;
            continue;
        };
        if category.subcategory == GENERAL_SUBCATEGORY {
            dropped_general += 1;
            continue;
        }

        let acquirers = lookup
            .get(&category.segment, &category.subcategory)
            .cloned()
            .unwrap_or_default();

        targets.push(TargetRecord {
            name: raw.name,
            nace: raw.nace,
            raw_score: raw.raw_score,
            revenue: raw.revenue,
            ebit: raw.ebit,
            segment: category.segment.clone(),
            subcategory: category.subcategory.clone(),
            exit_probability: score::exit_probability(raw.raw_score),
            acquirers,
        });
    }

    // Stable sort keeps row order for equal probabilities.
    targets.sort_by(|a, b| {
        b.exit_probability
            .partial_cmp(&a.exit_probability)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    TargetsOutcome {
        targets,
        total_loaded,
        dropped_unmapped,
        dropped_general,
    }
}

/// Write the targets HTML report and workbook.
pub fn write_targets_outputs(config: &Config, outcome: &TargetsOutcome) -> Result<()> {
    let generated_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let html = report::targets::render(&outcome.targets, &generated_at);
    std::fs::write(config.targets_html(), html)?;

    export::write_targets_workbook(&config.targets_workbook(), &outcome.targets)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ingest::RawTarget;
    use crate::model::InvestmentType;

    fn company(name: &str, segment: &str, subcategory: &str, investors: &[&str]) -> CompanyRecord {
        CompanyRecord {
            name: name.into(),
            company_id: None,
            description: String::new(),
            keywords: String::new(),
            investors: investors.iter().map(|s| s.to_string()).collect(),
            acquisition_date: None,
            revenue: None,
            ebitda: None,
            segment: segment.into(),
            subcategory: subcategory.into(),
            investment_type: InvestmentType::Unknown,
        }
    }

    fn target(name: &str, nace: &str, raw_score: Option<f64>) -> RawTarget {
        RawTarget {
            name: name.into(),
            nace: nace.into(),
            raw_score,
            revenue: None,
            ebit: None,
        }
    }

    #[test]
    fn test_initiatives_grouping_and_sort() {
        let companies = vec![
            company("A", "Roofing", "General", &["Beta"]),
            company("B", "Roofing", "General", &["Alpha"]),
            company("C", "Flooring", "General", &["Alpha"]),
            company("D", "Roofing", "General", &["Alpha"]),
        ];
        let initiatives = build_initiatives(&companies);
        // Alpha before Beta; within Alpha, the larger Roofing portfolio first.
        assert_eq!(initiatives[0].investor, "Alpha");
        assert_eq!(initiatives[0].segment, "Roofing");
        assert_eq!(initiatives[0].count(), 2);
        assert_eq!(initiatives[1].investor, "Alpha");
        assert_eq!(initiatives[1].segment, "Flooring");
        assert_eq!(initiatives[2].investor, "Beta");
    }

    #[test]
    fn test_map_targets_filters_unmapped_and_general() {
        let nace = NaceTable::construction();
        let lookup = AcquirerLookup::default();
        let outcome = map_targets(
            vec![
                target("Mapped", "43.21 Elektro", Some(5.0)),
                target("General", "43.29 Annen installasjon", Some(9.0)),
                target("Unmapped", "99.99 - something else", Some(9.0)),
                target("No code", "", Some(9.0)),
            ],
            &nace,
            &lookup,
        );
        assert_eq!(outcome.total_loaded, 4);
        assert_eq!(outcome.targets.len(), 1);
        assert_eq!(outcome.targets[0].name, "Mapped");
        assert_eq!(outcome.dropped_general, 1);
        assert_eq!(outcome.dropped_unmapped, 2);
    }

    #[test]
    fn test_map_targets_sorted_by_exit_probability() {
        let nace = NaceTable::construction();
        let lookup = AcquirerLookup::default();
        let outcome = map_targets(
            vec![
                target("Low", "43.21", Some(2.0)),
                target("High", "43.21", Some(9.0)),
                target("Mid", "43.22", Some(5.5)),
            ],
            &nace,
            &lookup,
        );
        let names: Vec<&str> = outcome.targets.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
        assert_eq!(outcome.targets[0].exit_probability, 90.0);
        assert_eq!(outcome.targets[1].exit_probability, 55.0);
    }

    #[test]
    fn test_map_targets_attaches_acquirers() {
        let nace = NaceTable::construction();
        let bb = vec![company(
            "Elektro AS",
            "Mechanical, Electrical & HVAC",
            "Electrical",
            &["Alpha"],
        )];
        let lookup = AcquirerLookup::build(&bb);
        let outcome = map_targets(vec![target("T", "43.21", Some(5.0))], &nace, &lookup);
        assert_eq!(outcome.targets[0].acquirers["Alpha"].count, 1);
    }

    #[test]
    fn test_statistics_ordering() {
        let companies = vec![
            company("A", "Roofing", "General", &["X"]),
            company("B", "Roofing", "General", &["X"]),
            company("C", "Flooring", "General", &["Y"]),
        ];
        let stats = segment_statistics(&companies);
        assert_eq!(stats[0], ("Roofing".to_string(), 2));
        assert_eq!(stats[1], ("Flooring".to_string(), 1));

        let initiatives = build_initiatives(&companies);
        let investors = investor_statistics(&initiatives);
        assert_eq!(investors[0], ("X".to_string(), 2));
    }
}
