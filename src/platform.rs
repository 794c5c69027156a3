//! Platform vs. Add-on tagging.
//!
//! Scoped per (investor, segment): the earliest acquisition an investor made
//! inside a segment is the platform it consolidates around; later ones are
//! add-ons. A revenue outlier (more than 5x the segment mean) is always a
//! platform, whatever its date.

use crate::model::{CompanyRecord, InvestmentType};
use chrono::NaiveDate;
use std::collections::{HashMap, HashSet};

const REVENUE_OUTLIER_FACTOR: f64 = 5.0;

/// Tag every company in place. Companies without a usable date are excluded
/// from the date ranking and stay `Unknown` unless the revenue override
/// catches them. When no row has a date at all the tagging degrades to
/// first-in-row-order per (segment, investor) group.
pub fn tag_investment_types(companies: &mut [CompanyRecord]) {
    let any_dates = companies.iter().any(|c| c.acquisition_date.is_some());
    if any_dates {
        tag_by_date(companies);
        apply_revenue_override(companies);
    } else {
        tag_by_row_order(companies);
    }
}

fn tag_by_date(companies: &mut [CompanyRecord]) {
    // Earliest dated acquisition per (investor, segment).
    let mut first: HashMap<(String, String), (usize, NaiveDate)> = HashMap::new();

    for (idx, company) in companies.iter().enumerate() {
        let date = match company.acquisition_date {
            Some(d) => d,
            None => continue,
        };
        for investor in &company.investors {
            let key = (investor.clone(), company.segment.clone());
            match first.get(&key) {
                Some((_, earliest)) if *earliest <= date => {}
                _ => {
                    first.insert(key, (idx, date));
                }
            }
        }
    }

    let platform_indices: HashSet<usize> = first.values().map(|(idx, _)| *idx).collect();

    for (idx, company) in companies.iter_mut().enumerate() {
        company.investment_type = if platform_indices.contains(&idx) {
            InvestmentType::Platform
        } else if company.acquisition_date.is_some() {
            InvestmentType::AddOn
        } else {
            InvestmentType::Unknown
        };
    }
}

fn apply_revenue_override(companies: &mut [CompanyRecord]) {
    // Mean revenue per segment across companies with a numeric figure.
    let mut sums: HashMap<&str, (f64, usize)> = HashMap::new();
    for company in companies.iter() {
        if let Some(revenue) = company.revenue {
            let entry = sums.entry(company.segment.as_str()).or_insert((0.0, 0));
            entry.0 += revenue;
            entry.1 += 1;
        }
    }
    let means: HashMap<String, f64> = sums
        .into_iter()
        .map(|(segment, (sum, n))| (segment.to_string(), sum / n as f64))
        .collect();

    for company in companies.iter_mut() {
        let (Some(revenue), Some(mean)) = (company.revenue, means.get(&company.segment)) else {
            continue;
        };
        if revenue > mean * REVENUE_OUTLIER_FACTOR {
            // Upgrade only: platforms from the date rule stay platforms.
            company.investment_type = InvestmentType::Platform;
        }
    }
}

fn tag_by_row_order(companies: &mut [CompanyRecord]) {
    let mut seen: HashSet<(String, String)> = HashSet::new();

    for company in companies.iter_mut() {
        if company.investors.is_empty() {
            company.investment_type = InvestmentType::Unknown;
            continue;
        }
        let mut first_for_any = false;
        for investor in &company.investors {
            if seen.insert((investor.clone(), company.segment.clone())) {
                first_for_any = true;
            }
        }
        company.investment_type = if first_for_any {
            InvestmentType::Platform
        } else {
            InvestmentType::AddOn
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn company(
        name: &str,
        segment: &str,
        investors: &[&str],
        date: Option<(i32, u32, u32)>,
        revenue: Option<f64>,
    ) -> CompanyRecord {
        CompanyRecord {
            name: name.into(),
            company_id: None,
            description: String::new(),
            keywords: String::new(),
            investors: investors.iter().map(|s| s.to_string()).collect(),
            acquisition_date: date.map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap()),
            revenue,
            ebitda: None,
            segment: segment.into(),
            subcategory: "General".into(),
            investment_type: InvestmentType::Unknown,
        }
    }

    #[test]
    fn test_earliest_is_platform_later_is_addon() {
        let mut companies = vec![
            company("Late Co", "Roofing", &["X"], Some((2022, 6, 1)), None),
            company("Early Co", "Roofing", &["X"], Some((2020, 2, 1)), None),
        ];
        tag_investment_types(&mut companies);
        assert_eq!(companies[0].investment_type, InvestmentType::AddOn);
        assert_eq!(companies[1].investment_type, InvestmentType::Platform);
    }

    #[test]
    fn test_scope_is_per_investor_and_segment() {
        let mut companies = vec![
            company("A", "Roofing", &["X"], Some((2020, 1, 1)), None),
            company("B", "Roofing", &["Y"], Some((2021, 1, 1)), None),
            company("C", "Flooring", &["X"], Some((2022, 1, 1)), None),
        ];
        tag_investment_types(&mut companies);
        // B is Y's first in Roofing, C is X's first in Flooring.
        assert_eq!(companies[0].investment_type, InvestmentType::Platform);
        assert_eq!(companies[1].investment_type, InvestmentType::Platform);
        assert_eq!(companies[2].investment_type, InvestmentType::Platform);
    }

    #[test]
    fn test_revenue_outlier_forces_platform() {
        // Five small companies and one giant: the giant's revenue (300)
        // exceeds 5x the segment mean ((5*10 + 300) / 6 = 58.3).
        let mut companies = vec![
            company("P", "Roofing", &["X"], Some((2019, 1, 1)), Some(10.0)),
            company("A1", "Roofing", &["X"], Some((2020, 1, 1)), Some(10.0)),
            company("A2", "Roofing", &["X"], Some((2020, 2, 1)), Some(10.0)),
            company("A3", "Roofing", &["X"], Some((2020, 3, 1)), Some(10.0)),
            company("A4", "Roofing", &["X"], Some((2020, 4, 1)), Some(10.0)),
            company("Giant", "Roofing", &["X"], Some((2023, 1, 1)), Some(300.0)),
        ];
        tag_investment_types(&mut companies);
        assert_eq!(companies[0].investment_type, InvestmentType::Platform);
        assert_eq!(companies[1].investment_type, InvestmentType::AddOn);
        assert_eq!(companies[5].investment_type, InvestmentType::Platform);
    }

    #[test]
    fn test_missing_date_stays_unknown() {
        let mut companies = vec![
            company("Dated", "Roofing", &["X"], Some((2020, 1, 1)), None),
            company("Undated", "Roofing", &["X"], None, None),
        ];
        tag_investment_types(&mut companies);
        assert_eq!(companies[0].investment_type, InvestmentType::Platform);
        // Not competing for "first", not an add-on either.
        assert_eq!(companies[1].investment_type, InvestmentType::Unknown);
    }

    #[test]
    fn test_missing_date_still_eligible_for_revenue_override() {
        let mut companies = vec![
            company("P", "Roofing", &["X"], Some((2019, 1, 1)), Some(10.0)),
            company("A1", "Roofing", &["X"], Some((2020, 1, 1)), Some(10.0)),
            company("A2", "Roofing", &["X"], Some((2020, 2, 1)), Some(10.0)),
            company("A3", "Roofing", &["X"], Some((2020, 3, 1)), Some(10.0)),
            company("A4", "Roofing", &["X"], Some((2020, 4, 1)), Some(10.0)),
            company("Undated Giant", "Roofing", &["X"], None, Some(300.0)),
        ];
        tag_investment_types(&mut companies);
        assert_eq!(companies[5].investment_type, InvestmentType::Platform);
    }

    #[test]
    fn test_no_dates_falls_back_to_row_order() {
        let mut companies = vec![
            company("First", "Roofing", &["X"], None, None),
            company("Second", "Roofing", &["X"], None, None),
            company("Other Investor", "Roofing", &["Y"], None, None),
        ];
        tag_investment_types(&mut companies);
        assert_eq!(companies[0].investment_type, InvestmentType::Platform);
        assert_eq!(companies[1].investment_type, InvestmentType::AddOn);
        assert_eq!(companies[2].investment_type, InvestmentType::Platform);
    }
}
