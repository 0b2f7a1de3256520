//! Takeoff CLI - command-line front end for the estimation pipeline.
//!
//! Two subcommands: `run` drives the full pipeline from OCR fragments, a
//! scope description and catalogs to a finalized estimate; `extract` stops
//! after measurement extraction, for inspecting what the OCR output yields.
//! All inputs are files; results print as a plain summary or as JSON with
//! `--json`.

pub mod cli;
pub mod commands;
