//! Acquirer lookup: which investors are active in each taxonomy cell.

use crate::model::{AcquirerEntry, AcquirerMap, CategoryKey, CompanyRecord};
use std::collections::{BTreeMap, BTreeSet};

/// `(Segment, Subcategory) -> {Investor -> {companies, count}}`, with
/// deterministic iteration order throughout.
#[derive(Debug, Default)]
pub struct AcquirerLookup {
    by_category: BTreeMap<CategoryKey, AcquirerMap>,
}

impl AcquirerLookup {
    /// Two passes: accumulate a deduplicating company-name set per
    /// (segment, subcategory, investor), then flatten with counts. Rows with
    /// no investors are skipped entirely.
    pub fn build(companies: &[CompanyRecord]) -> Self {
        let mut sets: BTreeMap<(CategoryKey, String), BTreeSet<String>> = BTreeMap::new();

        for company in companies {
            if company.investors.is_empty() {
                continue;
            }
            let category = CategoryKey::new(&company.segment, &company.subcategory);
            for investor in &company.investors {
                sets.entry((category.clone(), investor.clone()))
                    .or_default()
                    .insert(company.name.clone());
            }
        }

        let mut by_category: BTreeMap<CategoryKey, AcquirerMap> = BTreeMap::new();
        for ((category, investor), names) in sets {
            by_category.entry(category).or_default().insert(
                investor,
                AcquirerEntry {
                    count: names.len(),
                    companies: names.into_iter().collect(),
                },
            );
        }

        Self { by_category }
    }

    pub fn get(&self, segment: &str, subcategory: &str) -> Option<&AcquirerMap> {
        self.by_category
            .get(&CategoryKey::new(segment, subcategory))
    }

    pub fn is_empty(&self) -> bool {
        self.by_category.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
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

    #[test]
    fn test_groups_by_category_and_investor() {
        let companies = vec![
            company("Tak AS", "Specialized Trades", "Roofing", &["Alpha"]),
            company("Takproffen", "Specialized Trades", "Roofing", &["Alpha", "Beta"]),
            company("Gulv AS", "Specialized Trades", "Flooring", &["Alpha"]),
        ];
        let lookup = AcquirerLookup::build(&companies);

        let roofing = lookup.get("Specialized Trades", "Roofing").unwrap();
        assert_eq!(roofing.len(), 2);
        assert_eq!(roofing["Alpha"].count, 2);
        assert_eq!(roofing["Alpha"].companies, vec!["Tak AS", "Takproffen"]);
        assert_eq!(roofing["Beta"].count, 1);

        let flooring = lookup.get("Specialized Trades", "Flooring").unwrap();
        assert_eq!(flooring["Alpha"].count, 1);
    }

    #[test]
    fn test_duplicate_listing_counted_once() {
        // The same investor/company pair appearing on two rows of the same
        // subcategory must not inflate the count.
        let companies = vec![
            company("Tak AS", "Specialized Trades", "Roofing", &["Alpha"]),
            company("Tak AS", "Specialized Trades", "Roofing", &["Alpha"]),
        ];
        let lookup = AcquirerLookup::build(&companies);
        let roofing = lookup.get("Specialized Trades", "Roofing").unwrap();
        assert_eq!(roofing["Alpha"].count, 1);
        assert_eq!(roofing["Alpha"].companies, vec!["Tak AS"]);
    }

    #[test]
    fn test_blank_investors_skipped() {
        let companies = vec![company("Orphan AS", "Specialized Trades", "Roofing", &[])];
        let lookup = AcquirerLookup::build(&companies);
        assert!(lookup.is_empty());
        assert!(lookup.get("Specialized Trades", "Roofing").is_none());
    }

    #[test]
    fn test_company_lists_sorted() {
        let companies = vec![
            company("Zeta Bygg", "Specialized Trades", "Roofing", &["Alpha"]),
            company("Alfa Bygg", "Specialized Trades", "Roofing", &["Alpha"]),
        ];
        let lookup = AcquirerLookup::build(&companies);
        let roofing = lookup.get("Specialized Trades", "Roofing").unwrap();
        assert_eq!(roofing["Alpha"].companies, vec!["Alfa Bygg", "Zeta Bygg"]);
    }
}
