//! Pluggable scope-matching strategies

use takeoff_domain::WorkScope;

/// Scores a scope-description line against one catalog work scope
///
/// The mapper's control flow is independent of the scoring strategy;
/// weighted or fuzzy matchers implement this same trait.
pub trait ScopeMatcher {
    /// Score of `scope` for `line`; zero means no match
    fn score(&self, line: &str, scope: &WorkScope) -> u32;
}

/// Default matcher: counts occurrences of the scope's keywords in the line
///
/// Matching is case-insensitive and counts non-overlapping substring
/// occurrences summed across the scope's keyword list.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl KeywordMatcher {
    fn count_occurrences(haystack: &str, needle: &str) -> u32 {
        if needle.is_empty() {
            return 0;
        }
        let mut count = 0;
        let mut rest = haystack;
        while let Some(pos) = rest.find(needle) {
            count += 1;
            rest = &rest[pos + needle.len()..];
        }
        count
    }
}

impl ScopeMatcher for KeywordMatcher {
    fn score(&self, line: &str, scope: &WorkScope) -> u32 {
        let line = line.to_lowercase();
        scope
            .keywords
            .iter()
            .map(|kw| Self::count_occurrences(&line, &kw.to_lowercase()))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_domain::{LaborRequirement, MeasurementKind, Unit, WorkCategory};

    fn scope(keywords: &[&str]) -> WorkScope {
        WorkScope {
            code: "DEMO-DRY".to_string(),
            name: "Drywall demolition".to_string(),
            category: WorkCategory::Demolition,
            measurement_kind: MeasurementKind::Area,
            unit_of_measure: Unit::SquareFeet,
            keywords: keywords.iter().map(|s| s.to_string()).collect(),
            material_requirements: vec![],
            labor_requirement: LaborRequirement {
                trade_code: "LAB".to_string(),
                hours_per_unit: 0.02,
                difficulty_factor: 1.0,
            },
            equipment_requirement: None,
        }
    }

    #[test]
    fn test_counts_each_keyword_occurrence() {
        let matcher = KeywordMatcher;
        let s = scope(&["drywall", "demo"]);
        assert_eq!(matcher.score("demo the kitchen drywall", &s), 2);
        assert_eq!(matcher.score("demo drywall, patch drywall", &s), 3);
    }

    #[test]
    fn test_case_insensitive() {
        let matcher = KeywordMatcher;
        let s = scope(&["drywall"]);
        assert_eq!(matcher.score("remove DRYWALL", &s), 1);
    }

    #[test]
    fn test_zero_when_no_keyword_present() {
        let matcher = KeywordMatcher;
        let s = scope(&["drywall"]);
        assert_eq!(matcher.score("replace roof shingles", &s), 0);
    }
}
