//! Set report assembly and persistence.
//!
//! Combines per-game descriptions with the stat summary and the highlight
//! list, and writes the result as JSON or as a human-readable text file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, NaiveTime, Utc};
use color_eyre::eyre::{Context, Result};
use rand::Rng;
use serde::Serialize;

use super::definitions::{format_fixed, NOT_AVAILABLE};
use super::engine::{compute_stats, StatSummary};
use super::highlights::{generate_highlights, Highlight, HighlightValue};
use super::series::ValidatedSeries;
use crate::config::HighlightConfig;
use crate::replay::names;
use crate::replay::{GameEndMethod, MatchRecord, PlayerSettings};

/// Fixed frame rate of recorded games
pub const FRAMES_PER_SECOND: i32 = 60;

/// Result of a game for one player
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GameResult {
    Winner,
    Loser,
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StageInfo {
    pub id: Option<u16>,
    pub name: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    pub port: u8,
    pub character_id: u8,
    pub character_name: &'static str,
    pub character_color: &'static str,
    pub nametag: Option<String>,
    pub game_result: GameResult,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub stage: StageInfo,
    pub players: Vec<PlayerInfo>,
    pub start_time: Option<DateTime<Utc>>,
    pub duration: String,
}

/// The complete set report
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetReport {
    pub games: Vec<GameInfo>,
    pub summary: Vec<StatSummary>,
    pub bts_summary: Vec<Highlight>,
}

/// Format a frame count as `m:ss`
pub fn format_duration(frame_count: i32) -> String {
    let seconds = (frame_count.max(0) / FRAMES_PER_SECOND) as u32;
    NaiveTime::from_num_seconds_from_midnight_opt(seconds % 86_400, 0)
        .map(|t| t.format("%-M:%S").to_string())
        .unwrap_or_default()
}

/// Decide how a game ended for the player in slot `player_index`
pub fn game_result(game: &MatchRecord, player_index: u8) -> GameResult {
    let Some(method) = game.game_end.as_ref().and_then(|end| end.method()) else {
        return GameResult::Unknown;
    };

    match method {
        GameEndMethod::Game => {
            let opponent = game
                .settings
                .players
                .iter()
                .find(|p| p.player_index != player_index)
                .map(|p| p.player_index);
            let own_stocks = game.final_stocks(player_index);
            let opponent_stocks = opponent.and_then(|o| game.final_stocks(o));

            match (own_stocks, opponent_stocks) {
                (Some(0), Some(0)) => GameResult::Unknown,
                (Some(0), _) => GameResult::Loser,
                (Some(_), _) => GameResult::Winner,
                (None, _) => GameResult::Unknown,
            }
        }
        GameEndMethod::NoContest => {
            match game.game_end.as_ref().and_then(|end| end.lras_initiator_index) {
                Some(initiator) if initiator < 0 => GameResult::Unknown,
                Some(initiator) if initiator == player_index as i8 => GameResult::Loser,
                Some(_) => GameResult::Winner,
                None => GameResult::Unknown,
            }
        }
        // TIME! endings and unresolved games have no reliable winner
        _ => GameResult::Unknown,
    }
}

fn player_info(game: &MatchRecord, player: &PlayerSettings) -> PlayerInfo {
    PlayerInfo {
        port: player.port,
        character_id: player.character_id,
        character_name: names::character_name(player.character_id),
        character_color: names::character_color_name(player.character_id, player.character_color),
        nametag: player.nametag.clone(),
        game_result: game_result(game, player.player_index),
    }
}

/// Per-game descriptions, oldest game first
pub fn generate_game_info(series: &ValidatedSeries) -> Vec<GameInfo> {
    let mut games: Vec<&MatchRecord> = series.games().iter().collect();
    // Undated games go last; stable sort keeps their input order
    games.sort_by_key(|g| (g.start_at().is_none(), g.start_at()));

    games
        .into_iter()
        .map(|game| GameInfo {
            stage: StageInfo {
                id: game.settings.stage_id,
                name: game
                    .settings
                    .stage_id
                    .map_or("Unknown Stage", names::stage_name),
            },
            players: game
                .settings
                .players
                .iter()
                .map(|p| player_info(game, p))
                .collect(),
            start_time: game.start_at(),
            duration: format_duration(game.frame_count()),
        })
        .collect()
}

/// Build the full report for a validated set
pub fn generate_output<R: Rng + ?Sized>(
    series: &ValidatedSeries,
    config: &HighlightConfig,
    rng: &mut R,
) -> SetReport {
    let summary = compute_stats(series);
    let bts_summary = generate_highlights(&summary, config, rng);

    SetReport {
        games: generate_game_info(series),
        summary,
        bts_summary,
    }
}

/// Generate JSON report
pub fn generate_json_report(report: &SetReport, output_path: &Path) -> Result<()> {
    let json = serde_json::to_string_pretty(report)
        .context("Failed to serialize report to JSON")?;

    fs::write(output_path, json)
        .with_context(|| format!("Failed to write JSON report to {}", output_path.display()))?;

    log::info!("Finished writing stats to {}", output_path.display());
    Ok(())
}

fn highlight_text(value: &HighlightValue) -> String {
    match value {
        HighlightValue::Text(text) => text.clone(),
        HighlightValue::Number(Some(n)) => format_fixed(*n, 1),
        HighlightValue::Number(None) => NOT_AVAILABLE.to_string(),
    }
}

fn port_header(report: &SetReport) -> (String, String) {
    match report.summary.first() {
        Some(entry) => (
            format!("Port {}", entry.results[0].port),
            format!("Port {}", entry.results[1].port),
        ),
        None => ("Player 1".to_string(), "Player 2".to_string()),
    }
}

/// Generate human-readable text report
pub fn generate_text_report(report: &SetReport, output_path: &Path) -> Result<()> {
    let mut lines: Vec<String> = Vec::new();

    lines.push("=".repeat(80));
    lines.push("                              SET STATISTICS".to_string());
    lines.push("=".repeat(80));
    lines.push(String::new());

    lines.push(format!("Games: {}", report.games.len()));
    for (i, game) in report.games.iter().enumerate() {
        let players: Vec<String> = game
            .players
            .iter()
            .map(|p| {
                format!(
                    "P{} {} ({}) {:?}",
                    p.port, p.character_name, p.character_color, p.game_result
                )
            })
            .collect();
        lines.push(format!(
            "  {}. {} [{}] {}",
            i + 1,
            game.stage.name,
            game.duration,
            players.join(" vs ")
        ));
    }
    lines.push(String::new());

    let (left, right) = port_header(report);
    lines.push("=".repeat(80));
    lines.push(format!("{:<32} {:>22} {:>22}", "Stat", left, right));
    lines.push("=".repeat(80));
    for entry in &report.summary {
        let texts: Vec<String> = entry
            .results
            .iter()
            .map(|r| {
                r.outcome
                    .simple
                    .as_ref()
                    .map(|s| s.text.clone())
                    .unwrap_or_else(|| "-".to_string())
            })
            .collect();
        lines.push(format!(
            "{:<32} {:>22} {:>22}",
            entry.definition.name, texts[0], texts[1]
        ));
    }
    lines.push(String::new());

    lines.push("Highlights:".to_string());
    for highlight in &report.bts_summary {
        lines.push(format!(
            "  {}: {} / {}",
            highlight.definition.name,
            highlight_text(&highlight.results[0]),
            highlight_text(&highlight.results[1])
        ));
    }
    lines.push("=".repeat(80));

    let content = lines.join("\n");
    fs::write(output_path, content)
        .with_context(|| format!("Failed to write text report to {}", output_path.display()))?;

    log::info!("Text report written to {}", output_path.display());
    Ok(())
}

/// Print the highlights to stdout
pub fn print_summary(report: &SetReport) {
    let (left, right) = port_header(report);

    println!("\n=== SET SUMMARY ({} games) ===\n", report.games.len());
    println!("{:<32} {:>14} {:>14}", "", left, right);
    for highlight in &report.bts_summary {
        println!(
            "{:<32} {:>14} {:>14}",
            highlight.definition.name,
            highlight_text(&highlight.results[0]),
            highlight_text(&highlight.results[1])
        );
    }
    println!();
}
