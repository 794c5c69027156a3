//! Keyword classifier mapping free text onto the taxonomy.
//!
//! Whole-word matching is the canonical rule; `MatchMode::Substring` keeps
//! plain containment available behind an explicit switch (it also hits
//! keywords embedded in longer words, e.g. "roofing" inside "waterproofing").
//! See DESIGN.md for the choice.

use crate::error::{BbMapError, Result};
use crate::taxonomy::{Taxonomy, GENERAL_SUBCATEGORY, OTHER_SEGMENT};
use regex::Regex;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Whole-word match via `\b`-anchored regex.
    #[default]
    WholeWord,
    /// Plain case-folded substring containment.
    Substring,
}

enum KeywordMatcher {
    Word(Regex),
    Substring(String),
}

impl KeywordMatcher {
    fn compile(keyword: &str, mode: MatchMode) -> Result<Self> {
        let keyword = keyword.to_lowercase();
        match mode {
            MatchMode::WholeWord => {
                let pattern = format!(r"\b{}\b", regex::escape(&keyword));
                let re = Regex::new(&pattern)
                    .map_err(|e| BbMapError::Taxonomy(format!("{keyword}: {e}")))?;
                Ok(KeywordMatcher::Word(re))
            }
            MatchMode::Substring => Ok(KeywordMatcher::Substring(keyword)),
        }
    }

    fn is_match(&self, text: &str) -> bool {
        match self {
            KeywordMatcher::Word(re) => re.is_match(text),
            KeywordMatcher::Substring(kw) => text.contains(kw.as_str()),
        }
    }
}

struct CompiledSubcategory {
    name: String,
    matchers: Vec<KeywordMatcher>,
}

struct CompiledSegment {
    name: String,
    matchers: Vec<KeywordMatcher>,
    subcategories: Vec<CompiledSubcategory>,
}

/// Precompiled classifier over an injected taxonomy. Pure: classification is
/// a function of the input text only, no state accumulates across calls.
pub struct Classifier {
    segments: Vec<CompiledSegment>,
}

impl Classifier {
    pub fn new(taxonomy: &Taxonomy, mode: MatchMode) -> Result<Self> {
        let mut segments = Vec::with_capacity(taxonomy.segments.len());
        for seg in &taxonomy.segments {
            let matchers = seg
                .keywords
                .iter()
                .map(|k| KeywordMatcher::compile(k, mode))
                .collect::<Result<Vec<_>>>()?;
            let subcategories = seg
                .subcategories
                .iter()
                .filter(|sub| sub.name != GENERAL_SUBCATEGORY)
                .map(|sub| {
                    Ok(CompiledSubcategory {
                        name: sub.name.clone(),
                        matchers: sub
                            .keywords
                            .iter()
                            .map(|k| KeywordMatcher::compile(k, mode))
                            .collect::<Result<Vec<_>>>()?,
                    })
                })
                .collect::<Result<Vec<_>>>()?;
            segments.push(CompiledSegment {
                name: seg.name.clone(),
                matchers,
                subcategories,
            });
        }
        Ok(Self { segments })
    }

    /// First segment (taxonomy order) with a keyword hit, else "Other".
    pub fn segment(&self, text: &str) -> &str {
        let text = text.to_lowercase();
        for seg in &self.segments {
            if seg.matchers.iter().any(|m| m.is_match(&text)) {
                return &seg.name;
            }
        }
        OTHER_SEGMENT
    }

    /// First specific subcategory of `segment` with a keyword hit, else
    /// "General". Unknown segments (including "Other") resolve to "General".
    pub fn subcategory(&self, text: &str, segment: &str) -> &str {
        if text.is_empty() {
            return GENERAL_SUBCATEGORY;
        }
        let text = text.to_lowercase();
        if let Some(seg) = self.segments.iter().find(|s| s.name == segment) {
            for sub in &seg.subcategories {
                if sub.matchers.iter().any(|m| m.is_match(&text)) {
                    return &sub.name;
                }
            }
        }
        GENERAL_SUBCATEGORY
    }

    /// Classify keyword + description text into a (segment, subcategory) pair.
    pub fn classify(&self, keywords: &str, description: &str) -> (String, String) {
        let blob = format!("{} {}", keywords, description);
        let segment = self.segment(&blob).to_string();
        let subcategory = self.subcategory(&blob, &segment).to_string();
        (segment, subcategory)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::taxonomy::{SegmentDef, SubcategoryDef};

    fn classifier(mode: MatchMode) -> Classifier {
        Classifier::new(&Taxonomy::construction(), mode).unwrap()
    }

    #[test]
    fn test_unique_keyword_resolves_segment() {
        let c = classifier(MatchMode::WholeWord);
        assert_eq!(c.segment("leading provider of scaffolding"), "Equipment Rental & Heavy Machinery");
        assert_eq!(c.segment("hvac services for offices"), "Mechanical, Electrical & HVAC");
    }

    #[test]
    fn test_no_keyword_is_other() {
        let c = classifier(MatchMode::WholeWord);
        assert_eq!(c.segment("artisanal cheese wholesaler"), "Other");
        assert_eq!(c.segment(""), "Other");
    }

    #[test]
    fn test_first_match_wins_in_taxonomy_order() {
        // Text hits both "road construction" (Core) and "machinery rental"
        // (Equipment Rental); Core comes first in the taxonomy.
        let c = classifier(MatchMode::WholeWord);
        assert_eq!(
            c.segment("road construction and machinery rental group"),
            "Core Construction & Civil Engineering"
        );
    }

    #[test]
    fn test_subcategory_falls_back_to_general() {
        let c = classifier(MatchMode::WholeWord);
        assert_eq!(c.subcategory("marine survey specialist", "Marine, Offshore & Energy"), "General");
        assert_eq!(c.subcategory("", "Specialized Trades"), "General");
        assert_eq!(c.subcategory("anything", "Other"), "General");
    }

    #[test]
    fn test_subcategory_specific_before_general() {
        let c = classifier(MatchMode::WholeWord);
        assert_eq!(
            c.subcategory("electrical contractor", "Mechanical, Electrical & HVAC"),
            "Electrical"
        );
        assert_eq!(c.subcategory("betong og sement", "Industrial Services & Manufacturing Support"), "Concrete");
    }

    #[test]
    fn test_whole_word_vs_substring_divergence() {
        // "waterproofing" contains "roofing" as a substring but not as a word.
        let whole = classifier(MatchMode::WholeWord);
        let substr = classifier(MatchMode::Substring);
        assert_eq!(whole.subcategory("waterproofing membranes", "Specialized Trades"), "General");
        assert_eq!(substr.subcategory("waterproofing membranes", "Specialized Trades"), "Roofing");
    }

    #[test]
    fn test_classify_combines_keywords_and_description() {
        let c = classifier(MatchMode::WholeWord);
        let (segment, subcategory) = c.classify("plumbing services", "installs pipe networks");
        assert_eq!(segment, "Mechanical, Electrical & HVAC");
        assert_eq!(subcategory, "Plumbing");
    }

    #[test]
    fn test_injected_taxonomy() {
        let taxonomy = Taxonomy::new(vec![SegmentDef {
            name: "Bakeries".into(),
            keywords: vec!["sourdough".into()],
            subcategories: vec![SubcategoryDef {
                name: "Rye".into(),
                keywords: vec!["rye".into()],
            }],
        }]);
        let c = Classifier::new(&taxonomy, MatchMode::WholeWord).unwrap();
        assert_eq!(c.segment("sourdough loaves"), "Bakeries");
        assert_eq!(c.subcategory("dark rye bread", "Bakeries"), "Rye");
        assert_eq!(c.subcategory("white bread", "Bakeries"), "General");
    }
}
