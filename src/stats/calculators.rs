//! Formulas behind each stat in the catalog.
//!
//! Every function reads one participant's view of the series and returns a
//! fresh [`StatOutcome`]. Games missing a derived-stat category simply add
//! nothing.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::definitions::{
    MoveCount, NeutralWinCoord, SimpleValue, StatOutcome, StatResult, NOT_AVAILABLE,
};
use super::series::{ParticipantIndex, ValidatedSeries};
use crate::replay::names::{self, character};
use crate::replay::{Conversion, Move, RatioField, RatioValue, Stock};

/// Number of entries kept in ranked stat results
pub const TOP_RESULTS: usize = 5;

/// Which part of a summed ratio the short form shows
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatioDisplay {
    Ratio,
    Count,
}

/// Sum counts and totals, then divide once
pub fn sum_ratios<'a>(ratios: impl IntoIterator<Item = &'a RatioValue>) -> RatioValue {
    let (count, total) = ratios
        .into_iter()
        .fold((0.0, 0.0), |(count, total), r| (count + r.count, total + r.total));

    RatioValue {
        count,
        total,
        ratio: if total != 0.0 { Some(count / total) } else { None },
    }
}

fn simple_from_ratio(ratio: &RatioValue, decimals: usize, display: RatioDisplay) -> SimpleValue {
    match display {
        RatioDisplay::Ratio => match ratio.ratio {
            Some(value) => SimpleValue::number(value, decimals),
            None => SimpleValue::not_available(),
        },
        RatioDisplay::Count => SimpleValue::number(ratio.count, decimals),
    }
}

/// Ratio-of-sums of one per-game `overall` field
pub fn overall_ratio(
    series: &ValidatedSeries,
    participant: ParticipantIndex,
    field: RatioField,
    decimals: usize,
    display: RatioDisplay,
) -> StatOutcome {
    let per_game: Vec<RatioValue> = series
        .games()
        .iter()
        .filter_map(|game| {
            let (me, _) = series.slots(game, participant);
            game.overall_for(me)?.ratio(field)
        })
        .collect();

    let summed = sum_ratios(&per_game);
    StatOutcome {
        simple: Some(simple_from_ratio(&summed, decimals, display)),
        result: StatResult::Ratio(summed),
    }
}

/// Count moves by id, most frequent first; ties keep first-seen order
pub fn rank_moves<'a>(moves: impl IntoIterator<Item = &'a Move>) -> Vec<MoveCount> {
    let mut counts: Vec<MoveCount> = Vec::new();
    for mv in moves {
        match counts.iter_mut().find(|c| c.id == mv.move_id) {
            Some(entry) => entry.count += 1,
            None => {
                let name = names::move_name(mv.move_id);
                counts.push(MoveCount {
                    count: 1,
                    id: mv.move_id,
                    name: name.name,
                    short_name: name.short_name,
                });
            }
        }
    }

    counts.sort_by(|a, b| b.count.cmp(&a.count));
    counts
}

fn most_common_move(ranked: Vec<MoveCount>) -> StatOutcome {
    let simple = match ranked.first() {
        Some(top) => SimpleValue::text(format!("{} ({})", top.short_name, top.count)),
        None => SimpleValue::text(NOT_AVAILABLE),
    };

    StatOutcome {
        result: StatResult::Moves(ranked),
        simple: Some(simple),
    }
}

/// Conversions started by the participant, across every game
fn own_conversions<'a>(
    series: &'a ValidatedSeries,
    participant: ParticipantIndex,
) -> impl Iterator<Item = &'a Conversion> + 'a {
    series.games().iter().flat_map(move |game| {
        let (me, _) = series.slots(game, participant);
        game.conversions().iter().filter(move |c| c.player_index == me)
    })
}

/// Final hit of every punish that took a stock
pub fn kill_moves(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let moves = own_conversions(series, participant)
        .filter(|c| c.did_kill)
        .filter_map(|c| c.moves.last());

    most_common_move(rank_moves(moves))
}

/// Opening hit of every punish that began from neutral
pub fn neutral_opener_moves(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let moves = own_conversions(series, participant)
        .filter(|c| c.is_neutral_win())
        .filter_map(|c| c.moves.first());

    most_common_move(rank_moves(moves))
}

/// Stocks with a recorded end percent, selected by owner
fn ended_stocks<'a>(
    series: &'a ValidatedSeries,
    participant: ParticipantIndex,
    own: bool,
) -> Vec<&'a Stock> {
    series
        .games()
        .iter()
        .flat_map(|game| {
            let (me, _) = series.slots(game, participant);
            game.stocks()
                .iter()
                .filter(move |s| (s.player_index == me) == own && s.end_percent.is_some())
        })
        .collect()
}

fn compare_f64(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

/// Top entries of an ordered list plus the short form of the first one
fn extreme<T: Clone>(
    ordered: &[&T],
    value: impl Fn(&T) -> Option<f64>,
) -> (Vec<T>, SimpleValue) {
    let simple = ordered
        .first()
        .and_then(|top| value(*top))
        .map(|v| SimpleValue::number(v, 1))
        .unwrap_or_else(SimpleValue::not_available);

    let top = ordered.iter().take(TOP_RESULTS).map(|t| (*t).clone()).collect();
    (top, simple)
}

/// Lowest percent the opponent lost a stock at
pub fn early_kills(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let mut stocks = ended_stocks(series, participant, false);
    stocks.sort_by(|a, b| compare_f64(a.end_percent.unwrap_or(0.0), b.end_percent.unwrap_or(0.0)));

    let (top, simple) = extreme(&stocks, |s| s.end_percent);
    StatOutcome {
        result: StatResult::Stocks(top),
        simple: Some(simple),
    }
}

/// Highest percent the participant survived to before losing a stock
pub fn late_deaths(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let mut stocks = ended_stocks(series, participant, true);
    stocks.sort_by(|a, b| compare_f64(b.end_percent.unwrap_or(0.0), a.end_percent.unwrap_or(0.0)));

    let (top, simple) = extreme(&stocks, |s| s.end_percent);
    StatOutcome {
        result: StatResult::Stocks(top),
        simple: Some(simple),
    }
}

/// Biggest damage dealt in a single punish
pub fn high_damage_punishes(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let mut punishes: Vec<&Conversion> = own_conversions(series, participant)
        .filter(|c| c.end_percent.is_some())
        .collect();
    punishes.sort_by(|a, b| {
        compare_f64(b.damage_done().unwrap_or(0.0), a.damage_done().unwrap_or(0.0))
    });

    let (top, simple) = extreme(&punishes, Conversion::damage_done);
    StatOutcome {
        result: StatResult::Punishes(top),
        simple: Some(simple),
    }
}

/// Mean percent of the opponent's lost stocks
pub fn avg_kill_percent(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let stocks = ended_stocks(series, participant, false);
    let total = stocks.len() as f64;
    let count: f64 = stocks.iter().filter_map(|s| s.end_percent).sum();

    let result = RatioValue {
        count,
        total,
        ratio: if total != 0.0 { Some(count / total) } else { None },
    };

    StatOutcome {
        simple: Some(simple_from_ratio(&result, 1, RatioDisplay::Ratio)),
        result: StatResult::Ratio(result),
    }
}

/// Stocks lost that no opponent punish accounts for
pub fn self_destructs(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let total: i64 = series
        .games()
        .iter()
        .map(|game| {
            let (me, _) = series.slots(game, participant);
            let lost = game
                .stocks()
                .iter()
                .filter(|s| s.player_index == me && s.end_percent.is_some())
                .count() as i64;
            let killed_by_opponent = game
                .conversions()
                .iter()
                .filter(|c| c.player_index != me && c.did_kill)
                .count() as i64;
            lost - killed_by_opponent
        })
        .sum();

    StatOutcome {
        result: StatResult::Count(total),
        simple: Some(SimpleValue::number(total as f64, 0)),
    }
}

/// Position of the participant at the first hit of each of their punishes,
/// grouped by game
pub fn neutral_win_coords(series: &ValidatedSeries, participant: ParticipantIndex) -> StatOutcome {
    let mut grouped: BTreeMap<String, Vec<NeutralWinCoord>> = BTreeMap::new();

    for game in series.games() {
        let (me, _) = series.slots(game, participant);
        let game_id = game.game_id();
        // Zelda and Sheik share a costume palette and can transform mid-game
        let transforms = game
            .player(me)
            .map_or(false, |p| p.character_id == character::ZELDA || p.character_id == character::SHEIK);

        for conversion in game.conversions().iter().filter(|c| c.player_index == me) {
            let Some(opener) = conversion.moves.first() else {
                continue;
            };
            let Some(player_frame) = game.frames.get(&opener.frame).and_then(|f| f.players.get(&me))
            else {
                continue;
            };
            let Some((x, y)) = player_frame
                .pre
                .as_ref()
                .and_then(|pre| Some((pre.position_x?, pre.position_y?)))
            else {
                continue;
            };

            let is_zelda = transforms.then(|| {
                player_frame.post.as_ref().and_then(|post| post.internal_character_id)
                    != Some(character::SHEIK_INTERNAL)
            });

            let name = names::move_name(opener.move_id);
            grouped.entry(game_id.clone()).or_default().push(NeutralWinCoord {
                x,
                y,
                id: opener.move_id,
                name: name.name,
                short_name: name.short_name,
                stage_id: game.settings.stage_id,
                opening_type: conversion.opening_type.clone(),
                game_id: game_id.clone(),
                is_zelda,
            });
        }
    }

    StatOutcome {
        result: StatResult::Coords(grouped),
        simple: None,
    }
}
