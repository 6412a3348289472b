//! The short "highlights" list shown alongside the full summary.
//!
//! A fixed set of stats is always shown. The rest are drawn at random from
//! the remaining eligible stats using the caller's RNG, so a seeded RNG gives
//! a reproducible report.

use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;

use super::definitions::{Stat, StatDefinition, ValueType};
use super::engine::StatSummary;
use crate::config::HighlightConfig;

/// Always shown, in this order
pub const FIXED_HIGHLIGHTS: [Stat; 4] = [
    Stat::KillMoves,
    Stat::NeutralOpenerMoves,
    Stat::OpeningsPerKill,
    Stat::DamageDone,
];

/// The short value of one orientation, matching the stat's declared type
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum HighlightValue {
    Text(String),
    Number(Option<f64>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Highlight {
    #[serde(flatten)]
    pub definition: StatDefinition,
    pub results: [HighlightValue; 2],
}

impl Highlight {
    pub fn id(&self) -> Stat {
        self.definition.id
    }
}

/// Collapse a summary entry to its short values; `None` for stats without one
pub fn summarize(summary: &StatSummary) -> Option<Highlight> {
    let value_type = summary.definition.value_type?;

    let value = |orientation: usize| {
        let simple = summary.results[orientation].outcome.simple.as_ref();
        match value_type {
            ValueType::Text => HighlightValue::Text(
                simple.map(|s| s.text.clone()).unwrap_or_default(),
            ),
            ValueType::Number => HighlightValue::Number(simple.and_then(|s| s.number)),
        }
    };

    Some(Highlight {
        definition: summary.definition.clone(),
        results: [value(0), value(1)],
    })
}

/// Whether either player self-destructed often enough to be worth showing
pub fn self_destructs_qualify(summary: &[StatSummary], threshold: i64) -> bool {
    summary
        .iter()
        .find(|s| s.id() == Stat::SelfDestructs)
        .map_or(false, |sds| {
            sds.results.iter().any(|r| {
                r.outcome
                    .simple
                    .as_ref()
                    .and_then(|s| s.number)
                    .map_or(false, |n| n > threshold as f64)
            })
        })
}

/// Fixed highlights followed by `random_count` stats drawn from the rest
pub fn generate_highlights<R: Rng + ?Sized>(
    summary: &[StatSummary],
    config: &HighlightConfig,
    rng: &mut R,
) -> Vec<Highlight> {
    let mut highlights = Vec::with_capacity(FIXED_HIGHLIGHTS.len() + config.random_count);

    for stat in FIXED_HIGHLIGHTS {
        match summary.iter().find(|s| s.id() == stat) {
            Some(entry) => highlights.extend(summarize(entry)),
            None => log::warn!("Fixed highlight {:?} missing from summary", stat),
        }
    }

    let include_sds = self_destructs_qualify(summary, config.self_destruct_threshold);
    if !include_sds {
        log::debug!("Self-destructs not eligible for highlights");
    }

    let mut pool: Vec<&StatSummary> = summary
        .iter()
        .filter(|s| !FIXED_HIGHLIGHTS.contains(&s.id()))
        .filter(|s| s.definition.value_type.is_some())
        .filter(|s| include_sds || s.id() != Stat::SelfDestructs)
        .collect();

    pool.shuffle(rng);
    highlights.extend(
        pool.into_iter()
            .take(config.random_count)
            .filter_map(summarize),
    );

    highlights
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::MatchRecord;
    use crate::stats::engine::compute_stats;
    use crate::stats::series::select_series;
    use crate::test_support::{conversion, stock, GameBuilder};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn summary_for(games: Vec<MatchRecord>) -> Vec<StatSummary> {
        compute_stats(&select_series(games).unwrap().series)
    }

    /// Port 2 loses three stocks nobody punished
    fn self_destructing_set() -> Vec<MatchRecord> {
        vec![GameBuilder::singles("a", [1, 2])
            .stocks(vec![stock(1, Some(10.0)), stock(1, Some(20.0)), stock(1, Some(30.0))])
            .build()]
    }

    fn quiet_set() -> Vec<MatchRecord> {
        vec![GameBuilder::singles("a", [1, 2])
            .stocks(vec![stock(1, Some(90.0))])
            .conversions(vec![conversion(0, "neutral-win", &[14], 0.0, Some(90.0), true)])
            .build()]
    }

    fn ids(highlights: &[Highlight]) -> Vec<Stat> {
        highlights.iter().map(Highlight::id).collect()
    }

    #[test]
    fn test_fixed_then_random() {
        let summary = summary_for(quiet_set());
        let mut rng = StdRng::seed_from_u64(7);
        let highlights = generate_highlights(&summary, &HighlightConfig::default(), &mut rng);

        assert_eq!(highlights.len(), 6);
        assert_eq!(ids(&highlights)[..4], FIXED_HIGHLIGHTS);
        for random in &highlights[4..] {
            assert!(!FIXED_HIGHLIGHTS.contains(&random.id()));
            assert_ne!(random.id(), Stat::NeutralWinCoords);
        }
        assert_ne!(highlights[4].id(), highlights[5].id());
    }

    #[test]
    fn test_same_seed_same_selection() {
        let summary = summary_for(quiet_set());
        let config = HighlightConfig::default();

        let first = generate_highlights(&summary, &config, &mut StdRng::seed_from_u64(99));
        let second = generate_highlights(&summary, &config, &mut StdRng::seed_from_u64(99));
        assert_eq!(first, second);
    }

    #[test]
    fn test_self_destructs_dropped_below_threshold() {
        let summary = summary_for(quiet_set());
        assert!(!self_destructs_qualify(&summary, 1));

        let config = HighlightConfig {
            random_count: Stat::ALL.len(),
            ..HighlightConfig::default()
        };
        let highlights = generate_highlights(&summary, &config, &mut StdRng::seed_from_u64(1));
        assert!(!ids(&highlights).contains(&Stat::SelfDestructs));
        // 13 stats - 4 fixed - coordinates - self-destructs
        assert_eq!(highlights.len(), 4 + 7);
    }

    #[test]
    fn test_self_destructs_kept_when_second_player_qualifies() {
        let summary = summary_for(self_destructing_set());
        assert!(self_destructs_qualify(&summary, 1));
        assert!(!self_destructs_qualify(&summary, 3));

        let config = HighlightConfig {
            random_count: Stat::ALL.len(),
            ..HighlightConfig::default()
        };
        let highlights = generate_highlights(&summary, &config, &mut StdRng::seed_from_u64(1));
        let sds = highlights
            .iter()
            .find(|h| h.id() == Stat::SelfDestructs)
            .expect("self-destructs should be eligible");
        assert_eq!(
            sds.results,
            [HighlightValue::Number(Some(0.0)), HighlightValue::Number(Some(3.0))]
        );
    }

    #[test]
    fn test_values_reduced_to_declared_type() {
        let summary = summary_for(quiet_set());
        let highlights = generate_highlights(&summary, &HighlightConfig::default(), &mut StdRng::seed_from_u64(3));

        assert_eq!(
            highlights[0].results,
            [HighlightValue::Text("fair (1)".to_string()), HighlightValue::Text("N/A".to_string())]
        );
        // Openings / kill has no overall data: ratio unavailable
        assert_eq!(highlights[2].results, [HighlightValue::Number(None), HighlightValue::Number(None)]);
        assert_eq!(highlights[3].results, [HighlightValue::Number(Some(0.0)), HighlightValue::Number(Some(0.0))]);

        let value = serde_json::to_value(&highlights[0]).unwrap();
        assert_eq!(value["results"][0], "fair (1)");
        assert_eq!(value["type"], "text");
    }

    #[test]
    fn test_highlights_only_reference_summary_entries() {
        let full = summary_for(quiet_set());
        let partial: Vec<StatSummary> = full
            .into_iter()
            .filter(|s| s.id() != Stat::DamageDone && s.id() != Stat::LateDeaths)
            .collect();

        for seed in 0..20 {
            let highlights = generate_highlights(
                &partial,
                &HighlightConfig::default(),
                &mut StdRng::seed_from_u64(seed),
            );
            assert_eq!(highlights.len(), 3 + 2);
            for highlight in &highlights {
                assert!(partial.iter().any(|s| s.id() == highlight.id()));
            }
        }
    }
}
