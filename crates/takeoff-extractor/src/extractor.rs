//! Measurement extraction and deduplication

use crate::config::ExtractorConfig;
use crate::error::ExtractorError;
use crate::patterns;
use serde::Serialize;
use takeoff_domain::{BoundingBox, Fragment, FragmentId, Location, Measurement, MeasurementId};
use tracing::{debug, info, warn};

/// Why a fragment produced no measurements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// Polygon had fewer than 4 points
    MalformedPolygon,
    /// No pattern family matched the text
    NoPatternMatch,
    /// Every candidate fell below the confidence threshold
    BelowConfidenceThreshold,
}

/// One fragment the extractor skipped, with its reason
///
/// Skips are reported, never fatal: a batch with unparseable fragments
/// still yields the measurements the rest of the batch supports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedFragment {
    /// Identifier of the skipped fragment
    pub fragment_id: FragmentId,
    /// Source text, for the report
    pub text: String,
    /// Why it was skipped
    pub reason: SkipReason,
}

/// Output of one extraction pass
#[derive(Debug, Clone, Default)]
pub struct ExtractionReport {
    /// Deduplicated measurements, each tagged with source text and geometry
    pub measurements: Vec<Measurement>,
    /// Fragments that produced nothing, with reasons
    pub skipped: Vec<SkippedFragment>,
    /// Number of candidates merged away by deduplication
    pub duplicates_removed: usize,
}

/// Converts OCR fragments into typed, deduplicated measurements
///
/// Stateless apart from its configuration; one instance can serve any
/// number of batches.
#[derive(Debug, Clone)]
pub struct MeasurementExtractor {
    config: ExtractorConfig,
}

impl MeasurementExtractor {
    /// Create an extractor with the given configuration
    pub fn new(config: ExtractorConfig) -> Result<Self, ExtractorError> {
        config.validate().map_err(ExtractorError::Config)?;
        Ok(Self { config })
    }

    /// Extract measurements from a batch of fragments
    ///
    /// Runs every pattern family over every fragment independently, drops
    /// candidates below the confidence threshold, then deduplicates by
    /// value proximity and bounding-box overlap, keeping the
    /// highest-confidence candidate of each duplicate group.
    pub fn extract(&self, fragments: &[Fragment]) -> ExtractionReport {
        let mut report = ExtractionReport::default();
        let mut candidates: Vec<Measurement> = Vec::new();

        for fragment in fragments {
            let bbox = match BoundingBox::from_polygon(&fragment.polygon) {
                Some(b) => b,
                None => {
                    warn!(
                        fragment_id = %fragment.id,
                        points = fragment.polygon.len(),
                        "skipping fragment with malformed polygon"
                    );
                    report.skipped.push(SkippedFragment {
                        fragment_id: fragment.id,
                        text: fragment.text.clone(),
                        reason: SkipReason::MalformedPolygon,
                    });
                    continue;
                }
            };

            let matches = patterns::match_all(&fragment.text);
            if matches.is_empty() {
                debug!(fragment_id = %fragment.id, text = %fragment.text, "no pattern match");
                report.skipped.push(SkippedFragment {
                    fragment_id: fragment.id,
                    text: fragment.text.clone(),
                    reason: SkipReason::NoPatternMatch,
                });
                continue;
            }

            let mut survived_any = false;
            for (family, candidate) in matches {
                if fragment.confidence < self.config.confidence_threshold {
                    continue;
                }
                survived_any = true;
                debug!(
                    fragment_id = %fragment.id,
                    family,
                    value = candidate.value,
                    unit = %candidate.unit,
                    "candidate"
                );
                candidates.push(Measurement {
                    id: MeasurementId::new(),
                    kind: candidate.kind,
                    value: candidate.value,
                    unit: candidate.unit,
                    confidence: fragment.confidence,
                    location: Location::detect(&fragment.text),
                    source_text: fragment.text.clone(),
                    bounding_box: bbox,
                    source_fragment_id: fragment.id,
                });
            }
            if !survived_any {
                report.skipped.push(SkippedFragment {
                    fragment_id: fragment.id,
                    text: fragment.text.clone(),
                    reason: SkipReason::BelowConfidenceThreshold,
                });
            }
        }

        let before = candidates.len();
        report.measurements = self.deduplicate(candidates);
        report.duplicates_removed = before - report.measurements.len();

        info!(
            fragments = fragments.len(),
            measurements = report.measurements.len(),
            skipped = report.skipped.len(),
            duplicates_removed = report.duplicates_removed,
            "extraction pass complete"
        );
        report
    }

    fn is_duplicate(&self, a: &Measurement, b: &Measurement) -> bool {
        a.kind == b.kind
            && a.unit == b.unit
            && (a.value - b.value).abs() < self.config.value_epsilon
            && (a.bounding_box.overlap_ratio(&b.bounding_box) > self.config.overlap_threshold
                || b.bounding_box.overlap_ratio(&a.bounding_box) > self.config.overlap_threshold)
    }

    /// Keep the highest-confidence candidate of each duplicate group
    ///
    /// Candidates are visited in descending confidence order, so each
    /// survivor absorbs every later candidate that duplicates it.
    fn deduplicate(&self, mut candidates: Vec<Measurement>) -> Vec<Measurement> {
        candidates.sort_by(|a, b| {
            b.confidence
                .partial_cmp(&a.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let mut survivors: Vec<Measurement> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            if survivors.iter().any(|kept| self.is_duplicate(kept, &candidate)) {
                debug!(
                    value = candidate.value,
                    confidence = candidate.confidence,
                    "merged duplicate candidate"
                );
                continue;
            }
            survivors.push(candidate);
        }
        survivors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_domain::{MeasurementKind, Unit};

    fn fragment(text: &str, confidence: f64, origin_x: f64) -> Fragment {
        Fragment {
            id: FragmentId::new(),
            text: text.to_string(),
            confidence,
            polygon: vec![
                (origin_x, 0.0),
                (origin_x + 100.0, 0.0),
                (origin_x + 100.0, 20.0),
                (origin_x, 20.0),
            ],
            source_image_id: "IMG_0001".to_string(),
        }
    }

    fn extractor() -> MeasurementExtractor {
        MeasurementExtractor::new(ExtractorConfig::default()).unwrap()
    }

    #[test]
    fn test_feet_inches_extraction() {
        let report = extractor().extract(&[fragment("kitchen wall 10'-6\"", 0.92, 0.0)]);
        assert_eq!(report.measurements.len(), 1);
        let m = &report.measurements[0];
        assert_eq!(m.kind, MeasurementKind::Linear);
        assert_eq!(m.value, 10.5);
        assert_eq!(m.unit, Unit::Feet);
        assert_eq!(m.location, Some(Location::new("kitchen")));
        assert_eq!(m.source_text, "kitchen wall 10'-6\"");
    }

    #[test]
    fn test_dimension_pair_yields_area() {
        let report = extractor().extract(&[fragment("bathroom 12x15", 0.8, 0.0)]);
        assert_eq!(report.measurements.len(), 1);
        let m = &report.measurements[0];
        assert_eq!(m.kind, MeasurementKind::Area);
        assert_eq!(m.value, 180.0);
        assert_eq!(m.unit, Unit::SquareFeet);
    }

    #[test]
    fn test_one_fragment_many_candidates() {
        let report = extractor().extract(&[fragment("wall 8' floor 180 sq ft", 0.9, 0.0)]);
        assert_eq!(report.measurements.len(), 2);
    }

    #[test]
    fn test_low_confidence_dropped() {
        let report = extractor().extract(&[fragment("wall 8'", 0.2, 0.0)]);
        assert!(report.measurements.is_empty());
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(
            report.skipped[0].reason,
            SkipReason::BelowConfidenceThreshold
        );
    }

    #[test]
    fn test_malformed_polygon_skipped_without_aborting_batch() {
        let mut bad = fragment("wall 8'", 0.9, 0.0);
        bad.polygon.truncate(2);
        let good = fragment("trim 50 lf", 0.9, 500.0);

        let report = extractor().extract(&[bad, good]);
        assert_eq!(report.measurements.len(), 1);
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(report.skipped[0].reason, SkipReason::MalformedPolygon);
    }

    #[test]
    fn test_no_pattern_match_reported() {
        let report = extractor().extract(&[fragment("remove upper cabinets", 0.9, 0.0)]);
        assert!(report.measurements.is_empty());
        assert_eq!(report.skipped[0].reason, SkipReason::NoPatternMatch);
    }

    #[test]
    fn test_dedup_keeps_highest_confidence() {
        // Same value and kind, heavily overlapping boxes: the OCR engine
        // read the same wall label twice.
        let a = fragment("wall 10.5 ft", 0.7, 0.0);
        let b = fragment("wall 10'-6\"", 0.95, 10.0);

        let report = extractor().extract(&[a, b]);
        assert_eq!(report.measurements.len(), 1);
        assert_eq!(report.measurements[0].confidence, 0.95);
        assert_eq!(report.duplicates_removed, 1);
    }

    #[test]
    fn test_distant_boxes_are_not_duplicates() {
        // Same value, but disjoint geometry: two different 8-foot walls.
        let a = fragment("wall 8'", 0.9, 0.0);
        let b = fragment("wall 8'", 0.9, 500.0);

        let report = extractor().extract(&[a, b]);
        assert_eq!(report.measurements.len(), 2);
    }

    #[test]
    fn test_different_kinds_never_merge() {
        // Overlapping boxes, close values, but linear vs area.
        let a = fragment("wall 12 ft", 0.9, 0.0);
        let b = fragment("floor 12 sq ft", 0.9, 5.0);

        let report = extractor().extract(&[a, b]);
        assert_eq!(report.measurements.len(), 2);
    }

    #[test]
    fn test_overlap_triggers_in_either_direction() {
        // Small box fully inside a large one: overlap exceeds 30% of the
        // small box's area even though it is tiny relative to the large box.
        let mut small = fragment("8 ft", 0.9, 0.0);
        small.polygon = vec![(0.0, 0.0), (10.0, 0.0), (10.0, 5.0), (0.0, 5.0)];
        let mut large = fragment("8 ft", 0.8, 0.0);
        large.polygon = vec![(0.0, 0.0), (1000.0, 0.0), (1000.0, 500.0), (0.0, 500.0)];

        let report = extractor().extract(&[small, large]);
        assert_eq!(report.measurements.len(), 1);
        assert_eq!(report.measurements[0].confidence, 0.9);
    }

    #[test]
    fn test_empty_batch() {
        let report = extractor().extract(&[]);
        assert!(report.measurements.is_empty());
        assert!(report.skipped.is_empty());
    }
}
