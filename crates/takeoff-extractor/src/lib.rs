//! Takeoff Extractor
//!
//! Converts raw OCR fragments into typed, deduplicated measurements.
//!
//! # Overview
//!
//! Construction-site photographs yield noisy text spans like `10'-6"`,
//! `12 x 15` or `180 sq ft`. The extractor runs every measurement pattern
//! family over every fragment independently (one fragment can yield several
//! candidates), drops low-confidence candidates, and deduplicates the rest
//! by value proximity and bounding-box overlap.
//!
//! # Architecture
//!
//! ```text
//! Fragments → patterns → candidates → confidence filter → dedup → Measurements
//! ```
//!
//! # Example Usage
//!
//! ```
//! use takeoff_extractor::{ExtractorConfig, MeasurementExtractor};
//! use takeoff_domain::{Fragment, FragmentId};
//!
//! let extractor = MeasurementExtractor::new(ExtractorConfig::default()).unwrap();
//! let fragments = vec![Fragment {
//!     id: FragmentId::new(),
//!     text: "kitchen wall 10'-6\"".to_string(),
//!     confidence: 0.92,
//!     polygon: vec![(0.0, 0.0), (120.0, 0.0), (120.0, 20.0), (0.0, 20.0)],
//!     source_image_id: "IMG_0041".to_string(),
//! }];
//!
//! let report = extractor.extract(&fragments);
//! assert_eq!(report.measurements.len(), 1);
//! assert_eq!(report.measurements[0].value, 10.5);
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod extractor;
mod patterns;

pub use config::ExtractorConfig;
pub use error::ExtractorError;
pub use extractor::{ExtractionReport, MeasurementExtractor, SkippedFragment};
