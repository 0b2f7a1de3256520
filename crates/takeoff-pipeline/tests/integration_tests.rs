//! End-to-end pipeline tests over an in-memory catalog

use takeoff_domain::{
    EstimateStatus, Fragment, FragmentId, LaborRate, LaborRequirement, Location, Material,
    MaterialRequirement, MeasurementKind, StaticCatalog, Unit, WorkCategory, WorkScope,
};
use takeoff_pipeline::{ImageOcr, PipelineConfig, TakeoffPipeline};
use takeoff_schedule::{PlannedTask, TaskPlan};

fn scope(
    code: &str,
    category: WorkCategory,
    keywords: &[&str],
    materials: &[(&str, f64)],
) -> WorkScope {
    WorkScope {
        code: code.to_string(),
        name: code.to_string(),
        category,
        measurement_kind: MeasurementKind::Area,
        unit_of_measure: Unit::SquareFeet,
        keywords: keywords.iter().map(|s| s.to_string()).collect(),
        material_requirements: materials
            .iter()
            .map(|(code, qty)| MaterialRequirement {
                material_code: code.to_string(),
                quantity_per_unit: *qty,
            })
            .collect(),
        labor_requirement: LaborRequirement {
            trade_code: "CARP".to_string(),
            hours_per_unit: 0.05,
            difficulty_factor: 1.0,
        },
        equipment_requirement: None,
    }
}

fn catalog() -> StaticCatalog {
    StaticCatalog {
        work_scopes: vec![
            scope("DEMO-DRY", WorkCategory::Demolition, &["demo", "drywall"], &[]),
            scope(
                "INST-DRY",
                WorkCategory::Installation,
                &["install", "new", "drywall"],
                &[("DRY-5/8", 1.0)],
            ),
        ],
        materials: vec![Material {
            code: "DRY-5/8".to_string(),
            name: "5/8\" drywall".to_string(),
            unit_cost: 0.60,
            region_multipliers: Default::default(),
        }],
        labor_rates: vec![LaborRate {
            trade_code: "CARP".to_string(),
            hourly_rate: 50.0,
            region_multipliers: Default::default(),
        }],
        equipment_rates: vec![],
    }
}

fn plan() -> TaskPlan {
    TaskPlan {
        tasks: vec![
            PlannedTask {
                work_scope_code: "DEMO-DRY".to_string(),
                duration_days: 1.0,
                dependencies: vec![],
                can_parallel: true,
                crew_size: 2,
            },
            PlannedTask {
                work_scope_code: "INST-DRY".to_string(),
                duration_days: 3.0,
                dependencies: vec!["DEMO-DRY".to_string()],
                can_parallel: false,
                crew_size: 3,
            },
        ],
    }
}

fn kitchen_image() -> ImageOcr {
    ImageOcr {
        image_id: "IMG_0041".to_string(),
        outcome: Ok(vec![Fragment {
            id: FragmentId::new(),
            text: "kitchen wall 120 sq ft".to_string(),
            confidence: 0.92,
            polygon: vec![(0.0, 0.0), (200.0, 0.0), (200.0, 30.0), (0.0, 30.0)],
            source_image_id: "IMG_0041".to_string(),
        }]),
    }
}

#[tokio::test]
async fn test_drywall_demo_and_install_end_to_end() {
    let pipeline = TakeoffPipeline::new(PipelineConfig::default()).unwrap();
    let scope_text = "kitchen demo drywall\nkitchen install new drywall";

    let output = pipeline
        .run(vec![kitchen_image()], scope_text, &catalog(), &plan(), 1_000)
        .await
        .unwrap();

    // one measurement, two quantification items from the same 120 sq ft
    assert_eq!(output.measurements.len(), 1);
    assert_eq!(output.measurements[0].value, 120.0);
    assert_eq!(output.items.len(), 2);

    let demo = output
        .items
        .iter()
        .find(|i| i.work_scope_code == "DEMO-DRY")
        .unwrap();
    assert_eq!(demo.quantity, 120.0);
    assert_eq!(demo.location, Some(Location::new("kitchen")));
    // drywall demolition debris: 120 × 2.5
    assert_eq!(demo.debris_weight, Some(300.0));

    let install = output
        .items
        .iter()
        .find(|i| i.work_scope_code == "INST-DRY")
        .unwrap();
    assert_eq!(install.quantity, 120.0);
    assert_eq!(install.debris_weight, None);

    // both items priced, schedule respects the demo → install dependency
    assert_eq!(output.cost_items.len(), 2);
    assert!(output.report.pricing_omissions.is_empty());
    assert!((output.timeline.critical_path_days() - 4.0).abs() < 1e-9);
    assert!((output.timeline.total_duration_days - 4.6).abs() < 1e-9);

    // roll-up identity and successful promotion
    let e = &output.estimate;
    assert_eq!(
        e.total_estimate,
        e.direct_costs + e.disposal_cost + e.overhead_amount + e.profit_amount
            + e.material_tax
            + e.labor_tax
    );
    assert!(!e.incomplete);
    assert_eq!(e.status, EstimateStatus::Final);
    assert_eq!(e.version, 1);
}

#[tokio::test]
async fn test_versions_increase_across_passes() {
    let pipeline = TakeoffPipeline::new(PipelineConfig::default()).unwrap();
    let scope_text = "kitchen demo drywall";

    let first = pipeline
        .run(vec![kitchen_image()], scope_text, &catalog(), &plan(), 1_000)
        .await
        .unwrap();
    let second = pipeline
        .run(vec![kitchen_image()], scope_text, &catalog(), &plan(), 2_000)
        .await
        .unwrap();

    assert_eq!(first.estimate.version, 1);
    assert_eq!(second.estimate.version, 2);
    // the first record is a distinct, untouched version
    assert_ne!(first.estimate.id, second.estimate.id);
}

#[tokio::test]
async fn test_missing_pricing_marks_estimate_incomplete() {
    let pipeline = TakeoffPipeline::new(PipelineConfig::default()).unwrap();
    let mut catalog = catalog();
    catalog.materials.clear();

    let output = pipeline
        .run(
            vec![kitchen_image()],
            "kitchen install new drywall",
            &catalog,
            &plan(),
            1_000,
        )
        .await
        .unwrap();

    assert_eq!(output.report.pricing_omissions.len(), 1);
    assert!(output.cost_items.is_empty());
    assert!(output.estimate.incomplete);
}

#[tokio::test]
async fn test_cyclic_plan_is_fatal() {
    let pipeline = TakeoffPipeline::new(PipelineConfig::default()).unwrap();
    let plan = TaskPlan {
        tasks: vec![
            PlannedTask {
                work_scope_code: "DEMO-DRY".to_string(),
                duration_days: 1.0,
                dependencies: vec!["INST-DRY".to_string()],
                can_parallel: true,
                crew_size: 2,
            },
            PlannedTask {
                work_scope_code: "INST-DRY".to_string(),
                duration_days: 3.0,
                dependencies: vec!["DEMO-DRY".to_string()],
                can_parallel: true,
                crew_size: 2,
            },
        ],
    };

    let result = pipeline
        .run(
            vec![kitchen_image()],
            "kitchen demo drywall\nkitchen install new drywall",
            &catalog(),
            &plan,
            1_000,
        )
        .await;
    assert!(matches!(
        result,
        Err(takeoff_pipeline::PipelineError::Schedule(
            takeoff_schedule::ScheduleError::CyclicDependency(_)
        ))
    ));
}

#[tokio::test]
async fn test_unmatched_scope_line_is_reported_not_fatal() {
    let pipeline = TakeoffPipeline::new(PipelineConfig::default()).unwrap();
    let scope_text = "kitchen demo drywall\nreplace roof shingles";

    let output = pipeline
        .run(vec![kitchen_image()], scope_text, &catalog(), &plan(), 1_000)
        .await
        .unwrap();

    assert_eq!(output.items.len(), 1);
    assert_eq!(output.report.mapping_omissions.len(), 1);
    assert_eq!(
        output.report.mapping_omissions[0].line,
        "replace roof shingles"
    );
}
