//! Head-to-head statistics for a set of games between two players.
//!
//! This module validates a collection of match records into a single
//! two-player series, evaluates the stat catalog from both players' points
//! of view, and assembles the final set report.

pub mod calculators;
pub mod definitions;
pub mod engine;
pub mod highlights;
pub mod report;
pub mod series;

pub use definitions::{Stat, StatDefinition, StatOutcome, StatResult};
pub use engine::{compute_stats, StatSummary};
pub use highlights::{generate_highlights, Highlight};
pub use report::{
    generate_game_info, generate_json_report, generate_output, generate_text_report, GameInfo,
    SetReport,
};
pub use series::{select_series, ExcludedGame, SeriesError, SeriesSelection, ValidatedSeries};
