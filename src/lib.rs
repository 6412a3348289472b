//! # Set Stats - Head-to-head statistics for Melee replay sets
//!
//! This library turns a collection of decoded Slippi replay records into a
//! single report comparing the two players of a set.
//!
//! ## Overview
//!
//! A set is a series of games played by the same two ports. Records that are
//! not singles, or that belong to a different port pairing, are set aside;
//! the largest consistent group becomes the set. Every stat in the catalog is
//! then computed once per player and collected into a report together with
//! per-game descriptions and a short list of highlights.
//!
//! ## Architecture
//!
//! - `replay`: Typed model of decoded records, name tables and disk loading
//! - `stats`: Series validation, stat calculation, highlights and reporting
//! - `config`: Report configuration structures and validation
//! - `config_loader`: YAML loading and CLI overrides
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use set_stats::{config::HighlightConfig, replay, stats};
//!
//! let records = replay::load_records(Path::new("replays"))?;
//! let selection = stats::select_series(records)?;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let report = stats::generate_output(&selection.series, &HighlightConfig::default(), &mut rng);
//! stats::generate_json_report(&report, Path::new("output.json"))?;
//! # Ok::<(), color_eyre::Report>(())
//! ```
//!
//! ## Configuration Format
//!
//! ```yaml
//! highlights:
//!   random_count: 2
//!   self_destruct_threshold: 1
//! seed: 42
//! output: output.json
//! ```

pub mod config;
pub mod config_loader;
pub mod replay;
pub mod stats;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use stats::SetReport;
