//! Measurement pattern families
//!
//! Each family is a compiled regex plus an interpretation that turns capture
//! groups into a typed candidate. Families are matched in priority order and
//! each match consumes its byte span: a span claimed by `180 sq ft` is never
//! re-read by the bare decimal-feet family as `180 ft`.

use regex::Regex;
use std::sync::OnceLock;
use takeoff_domain::{MeasurementKind, Unit};

/// One typed candidate recovered from a fragment's text
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Candidate {
    /// Kind of quantity the pattern family expresses
    pub kind: MeasurementKind,
    /// Numeric value in `unit`
    pub value: f64,
    /// Unit of measure
    pub unit: Unit,
}

struct Family {
    name: &'static str,
    regex: Regex,
    interpret: fn(&regex::Captures<'_>) -> Option<Candidate>,
}

fn feet_inches(caps: &regex::Captures<'_>) -> Option<Candidate> {
    let feet: f64 = caps.get(1)?.as_str().parse().ok()?;
    let inches: f64 = match caps.get(2) {
        Some(m) => m.as_str().parse().ok()?,
        None => 0.0,
    };
    Some(Candidate {
        kind: MeasurementKind::Linear,
        value: feet + inches / 12.0,
        unit: Unit::Feet,
    })
}

fn dimension_pair(caps: &regex::Captures<'_>) -> Option<Candidate> {
    let width: f64 = caps.get(1)?.as_str().parse().ok()?;
    let length: f64 = caps.get(2)?.as_str().parse().ok()?;
    Some(Candidate {
        kind: MeasurementKind::Area,
        value: width * length,
        unit: Unit::SquareFeet,
    })
}

fn explicit_area(caps: &regex::Captures<'_>) -> Option<Candidate> {
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(Candidate {
        kind: MeasurementKind::Area,
        value,
        unit: Unit::SquareFeet,
    })
}

fn explicit_linear(caps: &regex::Captures<'_>) -> Option<Candidate> {
    let value: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(Candidate {
        kind: MeasurementKind::Linear,
        value,
        unit: Unit::Feet,
    })
}

/// The compiled families in priority order
///
/// Priority matters: the dimension pair must claim `12x15` before either
/// number can match a looser family, and the explicit-area family must claim
/// `180 sq ft` before bare decimal feet sees `180 ft`. The regexes are
/// known-good literals; compilation cannot fail.
fn families() -> &'static [Family] {
    static FAMILIES: OnceLock<Vec<Family>> = OnceLock::new();
    FAMILIES.get_or_init(|| {
        vec![
            Family {
                name: "dimension_pair",
                regex: Regex::new(
                    r#"(\d+(?:\.\d+)?)\s*'?\s*[xX×]\s*(\d+(?:\.\d+)?)\s*'?"#,
                )
                .unwrap(),
                interpret: dimension_pair,
            },
            Family {
                name: "feet_inches",
                regex: Regex::new(r#"(\d+)\s*'\s*-?\s*(?:(\d+)\s*(?:"|''))?"#).unwrap(),
                interpret: feet_inches,
            },
            Family {
                name: "explicit_area",
                regex: Regex::new(
                    r"(\d+(?:\.\d+)?)\s*(?:sq\.?\s*\.?\s*ft\.?|sqft|square\s+f(?:ee|oo)t|ft²|ft\^?2)",
                )
                .unwrap(),
                interpret: explicit_area,
            },
            Family {
                name: "explicit_linear",
                regex: Regex::new(r"(\d+(?:\.\d+)?)\s*(?:lin\.?\s*\.?\s*ft\.?|linear\s+f(?:ee|oo)t|lf\b)")
                    .unwrap(),
                interpret: explicit_linear,
            },
            Family {
                name: "decimal_feet",
                regex: Regex::new(r"(\d+(?:\.\d+)?)\s*(?:ft\b|feet\b|foot\b)").unwrap(),
                interpret: explicit_linear,
            },
        ]
    })
}

/// Run every pattern family over one fragment's text
///
/// A single fragment may yield several candidates. Returns candidates paired
/// with the family name that produced them, for trace logging.
pub(crate) fn match_all(text: &str) -> Vec<(&'static str, Candidate)> {
    let mut consumed: Vec<(usize, usize)> = Vec::new();
    let mut out = Vec::new();

    for family in families() {
        for caps in family.regex.captures_iter(text) {
            let whole = match caps.get(0) {
                Some(m) => m,
                None => continue,
            };
            let span = (whole.start(), whole.end());
            if consumed.iter().any(|&(s, e)| span.0 < e && s < span.1) {
                continue;
            }
            if let Some(candidate) = (family.interpret)(&caps) {
                consumed.push(span);
                out.push((family.name, candidate));
            }
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn only(text: &str) -> Candidate {
        let matches = match_all(text);
        assert_eq!(matches.len(), 1, "expected one match in {:?}: {:?}", text, matches);
        matches[0].1.clone()
    }

    #[test]
    fn test_feet_inches() {
        let c = only("wall 10'-6\"");
        assert_eq!(c.kind, MeasurementKind::Linear);
        assert_eq!(c.value, 10.5);
        assert_eq!(c.unit, Unit::Feet);
    }

    #[test]
    fn test_bare_feet_tick() {
        let c = only("ceiling 8'");
        assert_eq!(c.kind, MeasurementKind::Linear);
        assert_eq!(c.value, 8.0);
    }

    #[test]
    fn test_decimal_feet() {
        let c = only("run of 10.5 ft");
        assert_eq!(c.kind, MeasurementKind::Linear);
        assert_eq!(c.value, 10.5);
        assert_eq!(c.unit, Unit::Feet);
    }

    #[test]
    fn test_dimension_pair() {
        let c = only("room 12x15");
        assert_eq!(c.kind, MeasurementKind::Area);
        assert_eq!(c.value, 180.0);
        assert_eq!(c.unit, Unit::SquareFeet);
    }

    #[test]
    fn test_dimension_pair_spaced_with_ticks() {
        let c = only("floor 12' x 15'");
        assert_eq!(c.kind, MeasurementKind::Area);
        assert_eq!(c.value, 180.0);
    }

    #[test]
    fn test_explicit_area() {
        let c = only("drywall 180 sq ft");
        assert_eq!(c.kind, MeasurementKind::Area);
        assert_eq!(c.value, 180.0);
        assert_eq!(c.unit, Unit::SquareFeet);
    }

    #[test]
    fn test_explicit_area_superscript() {
        let c = only("tile 100 ft²");
        assert_eq!(c.kind, MeasurementKind::Area);
        assert_eq!(c.value, 100.0);
    }

    #[test]
    fn test_explicit_linear() {
        let c = only("trim 50 lin ft");
        assert_eq!(c.kind, MeasurementKind::Linear);
        assert_eq!(c.value, 50.0);
        assert_eq!(c.unit, Unit::Feet);

        let c = only("baseboard 50 lf");
        assert_eq!(c.kind, MeasurementKind::Linear);
        assert_eq!(c.value, 50.0);
    }

    #[test]
    fn test_area_not_double_counted_as_linear() {
        // "180 sq ft" must not also yield a 180 ft linear candidate
        let matches = match_all("180 sq ft");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].1.kind, MeasurementKind::Area);
    }

    #[test]
    fn test_dimension_numbers_not_reparsed() {
        let matches = match_all("12x15 kitchen floor");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0, "dimension_pair");
    }

    #[test]
    fn test_multiple_candidates_from_one_fragment() {
        let matches = match_all("wall 10'-6\" and floor 180 sq ft");
        assert_eq!(matches.len(), 2);
    }

    #[test]
    fn test_no_match() {
        assert!(match_all("remove cabinets").is_empty());
    }

    #[test]
    fn test_bare_number_is_not_a_measurement() {
        assert!(match_all("invoice 4021").is_empty());
    }
}
