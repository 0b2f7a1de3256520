//! Batch orchestration across the pipeline stages

use crate::config::PipelineConfig;
use crate::error::PipelineError;
use serde::Serialize;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::Arc;
use takeoff_costing::{CostAggregator, PricingOmission};
use takeoff_domain::{
    Conflict, CostItem, Estimate, Fragment, Measurement, PricingCatalog, QuantificationItem,
    ScopeCatalog, Timeline,
};
use takeoff_estimate::EstimateFinalizer;
use takeoff_extractor::{MeasurementExtractor, SkippedFragment};
use takeoff_mapper::{ConflictDetector, DetectionError, MappingOmission, ScopeMapper};
use takeoff_schedule::{TaskPlan, TimelineBuilder};
use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tracing::{info, warn};

/// OCR outcome for one image, as delivered by the OCR collaborator
#[derive(Debug, Clone)]
pub struct ImageOcr {
    /// Source image identifier
    pub image_id: String,
    /// Recognized fragments, or the OCR failure for this image
    pub outcome: Result<Vec<Fragment>, String>,
}

/// One image whose OCR failed; the rest of the batch proceeded without it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedImage {
    /// Source image identifier
    pub image_id: String,
    /// The OCR error
    pub error: String,
}

/// Every omission and partial failure of one batch
///
/// Nothing recoverable is silently dropped: each stage's skips and
/// omissions are aggregated here for the final output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct BatchReport {
    /// Images whose OCR failed
    pub failed_images: Vec<FailedImage>,
    /// Fragments the extractor skipped
    pub skipped_fragments: Vec<SkippedFragment>,
    /// Candidates merged away by deduplication
    pub duplicates_removed: usize,
    /// Scope lines the mapper omitted
    pub mapping_omissions: Vec<MappingOmission>,
    /// Item pairs the conflict detector could not evaluate
    pub detection_errors: Vec<DetectionError>,
    /// Items the cost aggregator could not price
    pub pricing_omissions: Vec<PricingOmission>,
}

/// Everything one pipeline pass produces
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutput {
    /// Deduplicated measurements
    pub measurements: Vec<Measurement>,
    /// Quantification items
    pub items: Vec<QuantificationItem>,
    /// Detected conflicts
    pub conflicts: Vec<Conflict>,
    /// Priced items
    pub cost_items: Vec<CostItem>,
    /// Dependency-resolved schedule
    pub timeline: Timeline,
    /// The finalized (or draft) estimate
    pub estimate: Estimate,
    /// All omissions and partial failures
    pub report: BatchReport,
}

/// Orchestrates one estimation pass end to end
///
/// The pipeline owns the stage components; catalogs and the task plan are
/// passed per run and are read-only for its duration.
pub struct TakeoffPipeline {
    config: PipelineConfig,
    extractor: Arc<MeasurementExtractor>,
    mapper: ScopeMapper,
    detector: ConflictDetector,
    aggregator: CostAggregator,
    builder: TimelineBuilder,
    finalizer: EstimateFinalizer,
    abandoned: AtomicBool,
    next_version: AtomicU32,
}

impl TakeoffPipeline {
    /// Create a pipeline from an aggregate configuration
    pub fn new(config: PipelineConfig) -> Result<Self, PipelineError> {
        config.validate().map_err(PipelineError::Config)?;
        Ok(Self {
            extractor: Arc::new(MeasurementExtractor::new(config.extractor.clone())?),
            mapper: ScopeMapper::new(config.mapper.clone())?,
            detector: ConflictDetector::new(config.conflict_rules.clone()),
            aggregator: CostAggregator::new(config.costing.clone())?,
            builder: TimelineBuilder::new(config.schedule.clone())?,
            finalizer: EstimateFinalizer::new(config.estimate.clone())?,
            config,
            abandoned: AtomicBool::new(false),
            next_version: AtomicU32::new(1),
        })
    }

    /// Mark the batch abandoned; downstream phases refuse to run
    pub fn abandon(&self) {
        warn!("batch abandoned");
        self.abandoned.store(true, Ordering::SeqCst);
    }

    /// Whether the batch has been abandoned
    pub fn is_abandoned(&self) -> bool {
        self.abandoned.load(Ordering::SeqCst)
    }

    fn ensure_active(&self) -> Result<(), PipelineError> {
        if self.is_abandoned() {
            Err(PipelineError::Abandoned)
        } else {
            Ok(())
        }
    }

    /// Apply a manual quantity override under optimistic concurrency
    ///
    /// Stale writers get [`PipelineError::StaleWrite`] carrying the item's
    /// current timestamp and must re-read and retry.
    pub fn override_quantity(
        &self,
        item: &mut QuantificationItem,
        expected_updated_at: u64,
        quantity: f64,
        notes: Option<String>,
        now_millis: u64,
    ) -> Result<(), PipelineError> {
        item.apply_override(expected_updated_at, quantity, notes, now_millis)
            .map_err(|current| PipelineError::StaleWrite { current })
    }

    /// Run one estimation pass
    ///
    /// Extraction runs per image under a bounded worker pool; every worker
    /// is awaited before mapping begins. Per-image OCR failures are
    /// recorded and excluded without aborting the batch. The only fatal
    /// stage error is a cyclic task dependency.
    pub async fn run<C>(
        &self,
        images: Vec<ImageOcr>,
        scope_text: &str,
        catalog: &C,
        plan: &TaskPlan,
        now_millis: u64,
    ) -> Result<PipelineOutput, PipelineError>
    where
        C: ScopeCatalog + PricingCatalog,
    {
        self.ensure_active()?;
        let mut report = BatchReport::default();

        // extraction, parallel per image
        let semaphore = Arc::new(Semaphore::new(self.config.worker_count));
        let mut workers = JoinSet::new();
        for image in images {
            match image.outcome {
                Ok(fragments) => {
                    let extractor = Arc::clone(&self.extractor);
                    let semaphore = Arc::clone(&semaphore);
                    workers.spawn(async move {
                        let _permit = semaphore.acquire_owned().await.ok();
                        extractor.extract(&fragments)
                    });
                }
                Err(error) => {
                    warn!(image_id = %image.image_id, error, "image excluded from batch");
                    report.failed_images.push(FailedImage {
                        image_id: image.image_id,
                        error,
                    });
                }
            }
        }

        // barrier join: mapping needs the complete measurement set
        let mut measurements = Vec::new();
        while let Some(joined) = workers.join_next().await {
            let extraction = joined.map_err(|e| PipelineError::Worker(e.to_string()))?;
            measurements.extend(extraction.measurements);
            report.skipped_fragments.extend(extraction.skipped);
            report.duplicates_removed += extraction.duplicates_removed;
        }

        self.ensure_active()?;
        let mapping = self.mapper.map(scope_text, &measurements, catalog, now_millis);
        report.mapping_omissions = mapping.omissions;
        let items = mapping.items;

        let conflict_report = self.detector.detect(&items, catalog);
        report.detection_errors = conflict_report.detection_errors;

        self.ensure_active()?;
        let costing = self.aggregator.price(&items, catalog, catalog);
        report.pricing_omissions = costing.omissions;
        let cost_items = costing.cost_items;

        self.ensure_active()?;
        let timeline = self.builder.build(&cost_items, plan)?;

        self.ensure_active()?;
        let incomplete = !report.pricing_omissions.is_empty();
        let version = self.next_version.fetch_add(1, Ordering::SeqCst);
        let estimate = self.finalizer.finalize(
            &items,
            &cost_items,
            &timeline,
            incomplete,
            version,
            now_millis,
        );

        info!(
            measurements = measurements.len(),
            items = items.len(),
            conflicts = conflict_report.conflicts.len(),
            cost_items = cost_items.len(),
            total_estimate = estimate.total_estimate,
            status = estimate.status.as_str(),
            "pipeline pass complete"
        );

        Ok(PipelineOutput {
            measurements,
            items,
            conflicts: conflict_report.conflicts,
            cost_items,
            timeline,
            estimate,
            report,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_domain::{FragmentId, ItemId, Location, StaticCatalog, Unit};

    fn pipeline() -> TakeoffPipeline {
        TakeoffPipeline::new(PipelineConfig::default()).unwrap()
    }

    fn fragment(text: &str) -> Fragment {
        Fragment {
            id: FragmentId::new(),
            text: text.to_string(),
            confidence: 0.9,
            polygon: vec![(0.0, 0.0), (100.0, 0.0), (100.0, 20.0), (0.0, 20.0)],
            source_image_id: "IMG_0001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_abandoned_batch_refuses_to_run() {
        let pipeline = pipeline();
        pipeline.abandon();
        let result = pipeline
            .run(
                vec![],
                "",
                &StaticCatalog::default(),
                &TaskPlan::default(),
                1_000,
            )
            .await;
        assert!(matches!(result, Err(PipelineError::Abandoned)));
    }

    #[tokio::test]
    async fn test_failed_images_are_recorded_and_excluded() {
        let pipeline = pipeline();
        let images = vec![
            ImageOcr {
                image_id: "IMG_0001".to_string(),
                outcome: Ok(vec![fragment("kitchen 120 sq ft")]),
            },
            ImageOcr {
                image_id: "IMG_0002".to_string(),
                outcome: Err("lens obstruction".to_string()),
            },
        ];

        let output = pipeline
            .run(
                images,
                "",
                &StaticCatalog::default(),
                &TaskPlan::default(),
                1_000,
            )
            .await
            .unwrap();

        assert_eq!(output.measurements.len(), 1);
        assert_eq!(
            output.report.failed_images,
            vec![FailedImage {
                image_id: "IMG_0002".to_string(),
                error: "lens obstruction".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_stale_override_maps_to_pipeline_error() {
        let pipeline = pipeline();
        let mut item = QuantificationItem {
            id: ItemId::new(),
            work_scope_code: "DEMO-DRY".to_string(),
            measurement_ids: vec![],
            quantity: 100.0,
            unit: Unit::SquareFeet,
            location: Some(Location::new("kitchen")),
            debris_weight: None,
            manual_override: false,
            notes: None,
            updated_at: 1_000,
        };

        pipeline
            .override_quantity(&mut item, 1_000, 150.0, None, 2_000)
            .unwrap();

        let err = pipeline
            .override_quantity(&mut item, 1_000, 99.0, None, 3_000)
            .unwrap_err();
        assert!(matches!(err, PipelineError::StaleWrite { current: 2_000 }));
        assert_eq!(item.quantity, 150.0);
    }
}
