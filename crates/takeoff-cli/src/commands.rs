//! Command execution: file loading, pipeline invocation, output.

use crate::cli::{ExtractArgs, RunArgs};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};
use takeoff_domain::{Fragment, StaticCatalog};
use takeoff_extractor::{ExtractionReport, MeasurementExtractor};
use takeoff_pipeline::{ImageOcr, PipelineConfig, TakeoffPipeline};
use takeoff_schedule::TaskPlan;

/// One image entry of the fragments file
///
/// Either `fragments` (OCR succeeded) or `error` (OCR failed) is present;
/// an entry carrying an error is excluded from the batch and reported.
#[derive(Debug, Deserialize)]
struct ImageEntry {
    image_id: String,
    #[serde(default)]
    fragments: Vec<Fragment>,
    #[serde(default)]
    error: Option<String>,
}

fn load_images(path: &Path) -> Result<Vec<ImageOcr>> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading fragments file {}", path.display()))?;
    let entries: Vec<ImageEntry> = serde_json::from_str(&raw)
        .with_context(|| format!("parsing fragments file {}", path.display()))?;
    Ok(entries
        .into_iter()
        .map(|entry| ImageOcr {
            image_id: entry.image_id,
            outcome: match entry.error {
                Some(error) => Err(error),
                None => Ok(entry.fragments),
            },
        })
        .collect())
}

fn load_catalog(path: &Path) -> Result<StaticCatalog> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading catalog file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing catalog file {}", path.display()))
}

fn load_plan(path: &Path) -> Result<TaskPlan> {
    let raw =
        fs::read_to_string(path).with_context(|| format!("reading plan file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing plan file {}", path.display()))
}

/// Overlay the price sections of a dedicated pricing file
fn merge_pricing(catalog: &mut StaticCatalog, pricing: StaticCatalog) {
    if !pricing.materials.is_empty() {
        catalog.materials = pricing.materials;
    }
    if !pricing.labor_rates.is_empty() {
        catalog.labor_rates = pricing.labor_rates;
    }
    if !pricing.equipment_rates.is_empty() {
        catalog.equipment_rates = pricing.equipment_rates;
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Execute the run command: the full pipeline from files to estimate.
pub async fn execute_run(args: RunArgs, config: PipelineConfig, json: bool) -> Result<()> {
    let images = load_images(&args.fragments)?;
    let scope_text = fs::read_to_string(&args.scope)
        .with_context(|| format!("reading scope file {}", args.scope.display()))?;
    let mut catalog = load_catalog(&args.catalog)?;
    if let Some(pricing_path) = &args.pricing {
        merge_pricing(&mut catalog, load_catalog(pricing_path)?);
    }
    let plan = match &args.plan {
        Some(path) => load_plan(path)?,
        None => TaskPlan::default(),
    };

    let pipeline = TakeoffPipeline::new(config).map_err(anyhow::Error::from)?;
    let output = pipeline
        .run(images, &scope_text, &catalog, &plan, now_millis())
        .await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
        return Ok(());
    }

    println!("Measurements:       {}", output.measurements.len());
    println!("Items:              {}", output.items.len());
    for item in &output.items {
        let location = item
            .location
            .as_ref()
            .map(|l| l.as_str().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "  {:<12} {:>10.2} {:<6} @ {}",
            item.work_scope_code, item.quantity, item.unit, location
        );
    }
    println!("Conflicts:          {}", output.conflicts.len());
    for conflict in &output.conflicts {
        println!("  [{:?}] {}", conflict.severity, conflict.message);
    }
    println!(
        "Schedule:           {:.1} days ({:.1} on the critical path)",
        output.timeline.total_duration_days,
        output.timeline.critical_path_days()
    );

    let e = &output.estimate;
    println!("Direct costs:       {:>12.2}", e.direct_costs);
    println!("Disposal:           {:>12.2}", e.disposal_cost);
    println!(
        "Overhead ({:>4.1}%):   {:>12.2}",
        e.overhead_percentage, e.overhead_amount
    );
    println!(
        "Profit ({:>4.1}%):     {:>12.2}",
        e.profit_percentage, e.profit_amount
    );
    println!("Tax:                {:>12.2}", e.material_tax + e.labor_tax);
    println!("Total estimate:     {:>12.2}", e.total_estimate);
    println!(
        "Status:             {}{}",
        e.status.as_str(),
        if e.incomplete { " (incomplete)" } else { "" }
    );
    for check in &e.validation_checks {
        println!("  [{:?}] {}: {}", check.outcome, check.name, check.message);
    }

    let r = &output.report;
    let omissions = r.failed_images.len()
        + r.skipped_fragments.len()
        + r.mapping_omissions.len()
        + r.detection_errors.len()
        + r.pricing_omissions.len();
    if omissions > 0 {
        println!("Report:             {} omission(s)", omissions);
        for failed in &r.failed_images {
            println!("  image {} failed: {}", failed.image_id, failed.error);
        }
        for skipped in &r.skipped_fragments {
            println!("  fragment skipped ({:?}): {}", skipped.reason, skipped.text);
        }
        for omission in &r.mapping_omissions {
            println!("  line unmapped ({:?}): {}", omission.reason, omission.line);
        }
        for error in &r.detection_errors {
            println!("  conflict check failed: {}", error.message);
        }
        for omission in &r.pricing_omissions {
            println!("  item unpriced: {}", omission.message);
        }
    }

    Ok(())
}

/// Extract each image's batch separately and aggregate the reports
///
/// Bounding boxes are only comparable within one image's pixel space, so
/// deduplication must never see fragments from two images at once.
fn extract_per_image(
    extractor: &MeasurementExtractor,
    batches: &[Vec<Fragment>],
) -> ExtractionReport {
    let mut report = ExtractionReport::default();
    for batch in batches {
        let extraction = extractor.extract(batch);
        report.measurements.extend(extraction.measurements);
        report.skipped.extend(extraction.skipped);
        report.duplicates_removed += extraction.duplicates_removed;
    }
    report
}

/// Execute the extract command: measurements only.
pub fn execute_extract(args: ExtractArgs, config: PipelineConfig, json: bool) -> Result<()> {
    let images = load_images(&args.fragments)?;
    let extractor = MeasurementExtractor::new(config.extractor)?;

    let mut batches = Vec::new();
    for image in images {
        match image.outcome {
            Ok(batch) => batches.push(batch),
            Err(error) => eprintln!("image {} failed: {}", image.image_id, error),
        }
    }
    let report = extract_per_image(&extractor, &batches);

    if json {
        println!("{}", serde_json::to_string_pretty(&report.measurements)?);
        return Ok(());
    }

    for m in &report.measurements {
        let location = m
            .location
            .as_ref()
            .map(|l| l.as_str().to_string())
            .unwrap_or_else(|| "-".to_string());
        println!(
            "{:<8} {:>10.2} {:<6} conf {:.2} @ {:<12} \"{}\"",
            m.kind.as_str(),
            m.value,
            m.unit,
            m.confidence,
            location,
            m.source_text
        );
    }
    println!(
        "{} measurement(s), {} skipped, {} duplicate(s) removed",
        report.measurements.len(),
        report.skipped.len(),
        report.duplicates_removed
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use takeoff_domain::FragmentId;
    use takeoff_extractor::ExtractorConfig;

    fn fragment(text: &str, image_id: &str) -> Fragment {
        Fragment {
            id: FragmentId::new(),
            text: text.to_string(),
            confidence: 0.9,
            polygon: vec![(0.0, 0.0), (100.0, 0.0), (100.0, 20.0), (0.0, 20.0)],
            source_image_id: image_id.to_string(),
        }
    }

    #[test]
    fn test_same_coordinates_in_different_images_stay_distinct() {
        // Two physically distinct 8-foot walls whose labels happen to sit at
        // the same pixel coordinates of their respective photographs.
        let extractor = MeasurementExtractor::new(ExtractorConfig::default()).unwrap();
        let batches = vec![
            vec![fragment("wall 8'", "IMG_0001")],
            vec![fragment("wall 8'", "IMG_0002")],
        ];

        let report = extract_per_image(&extractor, &batches);
        assert_eq!(report.measurements.len(), 2);
        assert_eq!(report.duplicates_removed, 0);
    }

    #[test]
    fn test_duplicates_within_one_image_still_merge() {
        let extractor = MeasurementExtractor::new(ExtractorConfig::default()).unwrap();
        let batches = vec![vec![
            fragment("wall 8'", "IMG_0001"),
            fragment("wall 8'", "IMG_0001"),
        ]];

        let report = extract_per_image(&extractor, &batches);
        assert_eq!(report.measurements.len(), 1);
        assert_eq!(report.duplicates_removed, 1);
    }
}
