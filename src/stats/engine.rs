//! Evaluation of the stat catalog for both participants of a set.

use rayon::prelude::*;
use serde::Serialize;

use super::definitions::{Stat, StatDefinition, StatOutcome};
use super::series::{ParticipantIndex, ValidatedSeries};

/// A stat outcome seen from one participant
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlayerStatOutcome {
    #[serde(flatten)]
    pub outcome: StatOutcome,
    pub port: u8,
}

/// One catalog entry computed from both participants' points of view
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatSummary {
    #[serde(flatten)]
    pub definition: StatDefinition,
    pub results: [PlayerStatOutcome; 2],
}

impl StatSummary {
    pub fn id(&self) -> Stat {
        self.definition.id
    }
}

/// Orientation order: the participant in the first slot, then the other
const ORIENTATIONS: [ParticipantIndex; 2] = [0, 1];

/// Compute one stat for both orientations
pub fn compute_stat(stat: Stat, series: &ValidatedSeries) -> StatSummary {
    let results = ORIENTATIONS.map(|participant| PlayerStatOutcome {
        outcome: stat.calculate(series, participant),
        port: series.port_of(participant),
    });

    StatSummary {
        definition: stat.definition(),
        results,
    }
}

/// Compute every stat in the catalog, in catalog order
pub fn compute_stats(series: &ValidatedSeries) -> Vec<StatSummary> {
    let [left, right] = series.ports();
    log::info!(
        "Computing {} stats over {} games (ports {}-{})",
        Stat::ALL.len(),
        series.game_count(),
        left,
        right
    );

    Stat::ALL
        .par_iter()
        .map(|&stat| {
            let summary = compute_stat(stat, series);
            log::debug!("Computed {:?}", stat);
            summary
        })
        .collect()
}
