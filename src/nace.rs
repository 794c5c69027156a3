//! NACE Rev. 2 industry-code mapping.
//!
//! Target rows carry a free-text cell like `"41.201 - Bygging av bygninger"`.
//! The leading numeric code is extracted and looked up against a prefix table
//! with decreasing specificity: `XX.YY`, then `XX.Y`, then `XX`. The first
//! hit wins, so a specific `43.21` rule can never be shadowed by a broader
//! `43` rule.

use crate::model::CategoryKey;
use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref NACE_CODE_RE: Regex =
        Regex::new(r"^\s*(\d{2}(\.\d{1,3})?|\d{4,5})").unwrap();
}

#[derive(Debug, Clone)]
pub struct NaceTable {
    rules: HashMap<String, CategoryKey>,
}

impl NaceTable {
    pub fn from_rules(rules: &[(&str, &str, &str)]) -> Self {
        let rules = rules
            .iter()
            .map(|(prefix, segment, subcategory)| {
                (prefix.to_string(), CategoryKey::new(segment, subcategory))
            })
            .collect();
        Self { rules }
    }

    /// The NACE → (segment, subcategory) rule set for the construction sector.
    pub fn construction() -> Self {
        Self::from_rules(&[
            // F - Construction
            ("41", "Core Construction & Civil Engineering", "Building Construction"),
            ("42", "Core Construction & Civil Engineering", "Civil Engineering"),
            ("43.1", "Core Construction & Civil Engineering", "Civil Engineering"),
            ("43.21", "Mechanical, Electrical & HVAC", "Electrical"),
            ("43.22", "Mechanical, Electrical & HVAC", "HVAC"),
            ("43.29", "Specialized Trades", "General"),
            ("43.31", "Specialized Trades", "Painting"),
            ("43.32", "Specialized Trades", "Carpentry"),
            ("43.33", "Specialized Trades", "Flooring"),
            ("43.34", "Specialized Trades", "Painting"),
            ("43.39", "Specialized Trades", "General"),
            ("43.91", "Specialized Trades", "Roofing"),
            ("43.99", "Specialized Trades", "General"),
            // M - Professional, scientific and technical activities
            ("71.11", "Consulting, Advisory & Project Management", "General"),
            ("71.12", "Consulting, Advisory & Project Management", "General"),
            ("71.2", "Consulting, Advisory & Project Management", "General"),
            // N - Administrative and support service activities
            ("77.32", "Equipment Rental & Heavy Machinery", "General"),
            ("81.1", "Facility Services & Real Estate Ops", "General"),
            ("81.29", "Facility Services & Real Estate Ops", "General"),
            ("81.3", "Facility Services & Real Estate Ops", "General"),
            // C - Manufacturing
            ("23.5", "Building Products & Materials", "General"),
            ("23.6", "Industrial Services & Manufacturing Support", "Concrete"),
            ("23.7", "Building Products & Materials", "General"),
            ("25.1", "Industrial Services & Manufacturing Support", "Welding & Metalwork"),
            ("32.99", "Building Products & Materials", "General"),
            // E - Water supply, sewerage, waste management
            ("37", "Core Construction & Civil Engineering", "Civil Engineering"),
            ("38", "Environmental & Waste Management", "General"),
            ("39", "Environmental & Waste Management", "General"),
            // G - Wholesale trade
            ("46.73", "Building Products & Materials", "General"),
            ("46.74", "Building Products & Materials", "General"),
        ])
    }

    fn get(&self, prefix: &str) -> Option<&CategoryKey> {
        self.rules.get(prefix)
    }

    /// Extract the leading code from a free-text NACE cell and map it.
    /// Returns `None` for empty/unparseable cells or when no prefix matches.
    pub fn lookup_text(&self, cell: &str) -> Option<&CategoryKey> {
        let captures = NACE_CODE_RE.captures(cell)?;
        let code: String = captures[1].replace('.', "");

        // Longest prefix first: 43.21, then 43.2, then 43.
        let digits: Vec<char> = code.chars().collect();
        let mut prefixes = Vec::new();
        if digits.len() >= 4 {
            prefixes.push(format!(
                "{}{}.{}{}",
                digits[0], digits[1], digits[2], digits[3]
            ));
        }
        if digits.len() >= 3 {
            prefixes.push(format!("{}{}.{}", digits[0], digits[1], digits[2]));
        }
        if digits.len() >= 2 {
            prefixes.push(format!("{}{}", digits[0], digits[1]));
        }

        prefixes.iter().find_map(|p| self.get(p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_cell_text_maps() {
        let table = NaceTable::construction();
        let hit = table.lookup_text("41.201 - Bygging av bygninger").unwrap();
        assert_eq!(hit.segment, "Core Construction & Civil Engineering");
        assert_eq!(hit.subcategory, "Building Construction");
    }

    #[test]
    fn test_four_digit_rule_hits() {
        let table = NaceTable::construction();
        let hit = table.lookup_text("43.21 Elektrisk installasjonsarbeid").unwrap();
        assert_eq!(hit.segment, "Mechanical, Electrical & HVAC");
        assert_eq!(hit.subcategory, "Electrical");
    }

    #[test]
    fn test_three_digit_fallback() {
        // 43.12 has no 4-digit rule; falls back to the 43.1 entry.
        let table = NaceTable::construction();
        let hit = table.lookup_text("43.120 - Grunnarbeid").unwrap();
        assert_eq!(hit.subcategory, "Civil Engineering");
    }

    #[test]
    fn test_longest_prefix_wins_over_broad_rule() {
        // A table carrying both 43.21 and a broad 43 entry must still resolve
        // 43.21 to the specific rule.
        let table = NaceTable::from_rules(&[
            ("43", "Core Construction & Civil Engineering", "General"),
            ("43.21", "Mechanical, Electrical & HVAC", "Electrical"),
        ]);
        let hit = table.lookup_text("43.21 description").unwrap();
        assert_eq!(hit.segment, "Mechanical, Electrical & HVAC");
        assert_eq!(hit.subcategory, "Electrical");

        // Codes with no specific rule drop through to the broad one.
        let broad = table.lookup_text("43.85").unwrap();
        assert_eq!(broad.subcategory, "General");
    }

    #[test]
    fn test_unparseable_and_unknown() {
        let table = NaceTable::construction();
        assert!(table.lookup_text("").is_none());
        assert!(table.lookup_text("no code here").is_none());
        assert!(table.lookup_text("99.99 - unmapped industry").is_none());
        // Single digit is not a valid code.
        assert!(table.lookup_text("4").is_none());
    }
}
